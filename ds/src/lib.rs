//! The sole point of polymorphism in cpmfs: a physical sector source.
//!
//! A [`SectorSource`] stands in for the C library's `get_sector_cb`
//! (cylinder, head, sector) -> status function pointer plus userdata. The
//! core never performs I/O itself; it only ever asks a `SectorSource` for
//! one sector at a time, in the order dictated by the superblock loader and
//! the read engine's block walk.

pub use cpmfs_err::{Error, Result};

/// Reads one physical sector from a CP/M floppy image.
///
/// `cylinder` and `head` are 0-based; `sector` is 1-based, matching the
/// convention of the floppy controllers CP/M targeted. `buffer` always has
/// exactly `sector_size` bytes of capacity, as configured on the
/// [`Attributes`](../cpmfs/struct.Attributes.html) the filesystem was built
/// with.
///
/// Implementations must be deterministic and idempotent for a given
/// `(cylinder, head, sector)` over the lifetime of the filesystem handle
/// built on top of them: the core's one-slot cache and its directory
/// superblock snapshot both assume repeated reads of the same sector always
/// return the same bytes.
pub trait SectorSource {
    fn read_sector(&mut self, cylinder: u32, head: u32, sector: u32, buffer: &mut [u8]) -> Result<()>;
}
