//! The single-slot sector cache (spec section 4.1): a tiny state machine
//! with two states, `Empty` and `Valid(c, h, s)`. A miss invokes the
//! sector callback; success moves to `Valid`, failure moves back to
//! `Empty` (the C original encodes `Empty` as the sentinel CHS triple
//! `(0, 0, 0)`, impossible since sectors are 1-based; `Option` expresses
//! the same state machine without a sentinel value).

use cpmfs_ds::{Result, SectorSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chs {
    cylinder: u32,
    head: u32,
    sector: u32,
}

pub(crate) struct SectorCache {
    buffer: Vec<u8>,
    valid: Option<Chs>,
}

impl SectorCache {
    pub(crate) fn new(sector_size: u32) -> Self {
        Self {
            buffer: vec![0u8; sector_size as usize],
            valid: None,
        }
    }

    /// Returns the cached sector for `(cylinder, head, sector)`, reading it
    /// through `source` on a miss.
    pub(crate) fn read<S: SectorSource>(
        &mut self,
        source: &mut S,
        cylinder: u32,
        head: u32,
        sector: u32,
    ) -> Result<&[u8]> {
        let want = Chs { cylinder, head, sector };
        if self.valid != Some(want) {
            match source.read_sector(cylinder, head, sector, &mut self.buffer) {
                Ok(()) => self.valid = Some(want),
                Err(e) => {
                    self.valid = None;
                    return Err(e);
                }
            }
        }
        Ok(&self.buffer)
    }
}
