//! Test doubles shared across this crate's unit tests: an in-memory
//! [`SectorSource`] addressable by (cylinder, head, sector) and the Otrona
//! floppy geometry used throughout the spec's literal scenarios.

use std::collections::HashMap;

use cpmfs_ds::{Result, SectorSource};

use crate::Attributes;

pub(crate) fn attrs_otrona() -> Attributes {
    Attributes {
        cylinders: 40,
        heads: 2,
        sector_count: 10,
        sector_size: 512,
        block_size: 2048,
        max_dir_entries: 128,
        boot_cylinders: 3,
        skip_first_cylinders: 0,
    }
}

pub(crate) struct MapSource {
    sectors: HashMap<(u32, u32, u32), Vec<u8>>,
    sector_size: u32,
}

impl MapSource {
    pub(crate) fn new(sector_size: u32) -> Self {
        Self {
            sectors: HashMap::new(),
            sector_size,
        }
    }

    pub(crate) fn new_all_free(sector_size: u32) -> Self {
        Self::new(sector_size)
    }

    fn sector_mut(&mut self, cylinder: u32, head: u32, sector: u32) -> &mut Vec<u8> {
        let sector_size = self.sector_size;
        self.sectors
            .entry((cylinder, head, sector))
            .or_insert_with(|| vec![0xE5u8; sector_size as usize])
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn put_entry(
        &mut self,
        cylinder: u32,
        head: u32,
        sector: u32,
        slot: usize,
        status: u8,
        name: &[u8; 8],
        extension: &[u8; 3],
        extent_l: u8,
        extent_h: u8,
        rc: u8,
        blocks: &[u8],
    ) {
        let buf = self.sector_mut(cylinder, head, sector);
        let off = slot * 32;
        buf[off] = status;
        buf[off + 1..off + 9].copy_from_slice(name);
        buf[off + 9..off + 12].copy_from_slice(extension);
        buf[off + 12] = extent_l;
        buf[off + 13] = 0;
        buf[off + 14] = extent_h;
        buf[off + 15] = rc;
        let n = blocks.len().min(16);
        buf[off + 16..off + 16 + n].copy_from_slice(&blocks[..n]);
    }

    pub(crate) fn put_bytes(&mut self, cylinder: u32, head: u32, sector: u32, offset: usize, bytes: &[u8]) {
        let buf = self.sector_mut(cylinder, head, sector);
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

impl SectorSource for MapSource {
    fn read_sector(&mut self, cylinder: u32, head: u32, sector: u32, buffer: &mut [u8]) -> Result<()> {
        match self.sectors.get(&(cylinder, head, sector)) {
            Some(bytes) => buffer.copy_from_slice(bytes),
            None => buffer.fill(0xE5),
        }
        Ok(())
    }
}
