//! A read-only reader for CP/M 2.2 floppy-disk filesystems.
//!
//! The core never performs I/O: every sector is fetched through a
//! caller-supplied [`SectorSource`], the sole point of polymorphism (spec
//! section 9). [`Filesystem::new`] eagerly loads and validates the
//! directory area; from there, callers either walk [`Filesystem::read_dir`]
//! or open a file by name with [`Filesystem::open`] and pull bytes through
//! [`Filesystem::read`].
//!
//! Write support, non-CP/M-2.2 filesystems, skew/interleave correction, and
//! concurrent access to one handle are out of scope — see the crate's
//! design notes.

mod cache;
mod dirit;
mod fcb;
mod geometry;
mod integrity;
mod logical;
mod lookup;
mod read;
mod superblock;

#[cfg(test)]
mod tests_support;

pub use cpmfs_ds::{Error, Result, SectorSource};
pub use dirit::{DirRecord, ReadDir};
pub use fcb::Flags;
pub use read::FileHandle;

use fcb::{AddressingMode, RawEntry};

/// Crate version, exposed for callers that log or report it alongside
/// filesystem diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Physical geometry plus filesystem parameters, supplied by the caller and
/// immutable over a [`Filesystem`]'s lifetime (spec section 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub cylinders: u32,
    pub heads: u32,
    pub sector_count: u32,
    pub sector_size: u32,
    pub block_size: u32,
    pub max_dir_entries: u32,
    /// Whole cylinders reserved at the disk start, on every head.
    pub boot_cylinders: u32,
    /// Cylinders skipped on head 0 only. Mutually exclusive with
    /// `boot_cylinders`; at most one may be non-zero.
    pub skip_first_cylinders: u32,
}

/// A CP/M 2.2 filesystem handle: the loaded, validated directory area plus
/// everything needed to resolve file contents through a [`SectorSource`].
pub struct Filesystem<S> {
    attrs: Attributes,
    entries: Vec<RawEntry>,
    cache: cache::SectorCache,
    mode: AddressingMode,
    source: S,
}

impl<S: SectorSource> Filesystem<S> {
    /// Loads and validates the directory area through `source`. Fails with
    /// [`Error::InvalidArg`] if both reserved-area fields are non-zero, if
    /// the reserved area exceeds the disk's cylinder count, or if
    /// `sector_size` is too small to hold one directory entry; fails with an
    /// integrity error if the directory references blocks inconsistently, or
    /// with whatever `source` itself reports.
    pub fn new(attrs: Attributes, mut source: S) -> Result<Self> {
        if attrs.boot_cylinders != 0 && attrs.skip_first_cylinders != 0 {
            log::error!("boot_cylinders and skip_first_cylinders are mutually exclusive");
            return Err(Error::InvalidArg);
        }

        let entries = superblock::load(&attrs, &mut source)?;
        let capacity = geometry::capacity(&attrs)?;
        let mode = AddressingMode::from_capacity(capacity, attrs.block_size);

        integrity::check(&attrs, &entries, mode, capacity)?;

        log::debug!(
            "loaded {} directory entries, {mode:?}, capacity {capacity} bytes",
            entries.len()
        );

        Ok(Self {
            attrs,
            entries,
            cache: cache::SectorCache::new(attrs.sector_size),
            mode,
            source,
        })
    }

    /// Returns an iterator over the one record per logical file held in the
    /// directory area.
    pub fn read_dir(&self) -> ReadDir<'_, S> {
        ReadDir::new(self)
    }

    /// Opens the file named by `path` for `user`, or `None` if no matching
    /// entry exists.
    pub fn open(&self, path: &str, user: u8) -> Option<FileHandle> {
        let entry = lookup::find_file(&self.entries, path, user)?;
        Some(FileHandle {
            entry,
            block_index: 0,
            byte_offset: 0,
        })
    }
}
