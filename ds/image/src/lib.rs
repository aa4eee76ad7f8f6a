// SPDX-License-Identifier: BSD-3-Clause

//! [`SectorSource`] backed by a flat raw disk image file.
//!
//! This is the Rust analogue of `examples/cpmls.c`'s `get_sector`: a CHS
//! triple is translated into a byte offset into a single on-disk file that
//! holds the whole image, cylinder-major and head-minor (all sectors of
//! cylinder 0 head 0, then cylinder 0 head 1, then cylinder 1 head 0, ...).
//! This is how most CP/M floppy dumps are laid out on disk and is
//! independent of the block-addressing layout the core assumes internally
//! (spec section 4.2) — a `SectorSource` is free to store bytes however it
//! likes as long as it answers `(cylinder, head, sector)` correctly.
//!
//! Not part of the core's public contract: disk-image handling is an
//! external collaborator. This crate exists so the core has a real,
//! runnable backend to test against.

use std::fs::File;
use std::io;
use std::os::unix::fs::FileExt;

use cpmfs_ds::{Error, Result, SectorSource};

pub struct ImageSectorSource {
    file: File,
    heads: u32,
    sector_count: u32,
    sector_size: u32,
}

impl ImageSectorSource {
    /// Opens `path` as a flat raw disk image with the given geometry.
    pub fn open(path: &str, heads: u32, sector_count: u32, sector_size: u32) -> io::Result<Self> {
        Ok(Self {
            file: File::open(path)?,
            heads,
            sector_count,
            sector_size,
        })
    }

    fn offset(&self, cylinder: u32, head: u32, sector: u32) -> u64 {
        let track_size = (self.heads * self.sector_count * self.sector_size) as u64;
        let head_size = (self.sector_count * self.sector_size) as u64;
        cylinder as u64 * track_size
            + head as u64 * head_size
            + (sector - 1) as u64 * self.sector_size as u64
    }
}

impl SectorSource for ImageSectorSource {
    fn read_sector(
        &mut self,
        cylinder: u32,
        head: u32,
        sector: u32,
        buffer: &mut [u8],
    ) -> Result<()> {
        let offset = self.offset(cylinder, head, sector);
        self.file
            .read_exact_at(buffer, offset)
            .map_err(|e| Error::Sector(e.raw_os_error().unwrap_or(-1)))
    }
}
