//! The stateful file cursor that follows an extent's block pointers,
//! chains to the next extent, and enforces end-of-file from the record
//! count of the last extent (spec section 4.8).

use cpmfs_ds::{Result, SectorSource};

use crate::{logical, Filesystem};

/// A cursor into one open CP/M file. Carries no borrow of the
/// [`Filesystem`] it was opened from — reads are driven through
/// [`Filesystem::read`] so that multiple handles can coexist over the
/// same filesystem (serialized by the caller, spec section 5).
#[derive(Debug, Clone, Copy)]
pub struct FileHandle {
    pub(crate) entry: usize,
    pub(crate) block_index: usize,
    pub(crate) byte_offset: u32,
}

impl<S: SectorSource> Filesystem<S> {
    /// Reads up to `buf.len()` bytes, advancing `handle`. Returns the
    /// number of bytes actually delivered; `0` before `buf` is empty means
    /// end-of-file.
    pub fn read(&mut self, handle: &mut FileHandle, mut buf: &mut [u8]) -> Result<usize> {
        let mut delivered = 0usize;

        while !buf.is_empty() {
            let entry = &self.entries[handle.entry];
            let block = self.mode.block_at(entry, handle.block_index);

            if block == 0 {
                // A zero block inside a non-last extent means this extent's
                // block list ended early (it need not fill all 16/8 slots);
                // chain to the next extent the same as when the slot count
                // is exhausted. Only a genuine absence of a further extent
                // is end-of-file.
                match logical::next_extent(&self.entries, handle.entry) {
                    Some(next) => {
                        handle.entry = next;
                        handle.block_index = 0;
                        handle.byte_offset = 0;
                        continue;
                    }
                    None => break,
                }
            }

            let last_extent = logical::last_extent_nb(&self.entries, handle.entry);
            let next_slot_is_empty = handle.block_index + 1 >= self.mode.slots()
                || self.mode.block_at(entry, handle.block_index + 1) == 0;
            let effective_block_size = if entry.extent_nb() == last_extent && next_slot_is_empty {
                (128u64 * entry.rc as u64)
                    .saturating_sub(self.attrs.block_size as u64 * handle.block_index as u64)
            } else {
                self.attrs.block_size as u64
            };

            let (cylinder, head, sector) =
                crate::geometry::block_to_chs(&self.attrs, block, handle.byte_offset);
            let sector_bytes = self.cache.read(&mut self.source, cylinder, head, sector)?;

            let in_sector = (handle.byte_offset % self.attrs.sector_size) as usize;
            let left_in_sector = self.attrs.sector_size as usize - in_sector;
            let left_in_block = (effective_block_size - handle.byte_offset as u64) as usize;
            let n = left_in_sector.min(left_in_block).min(buf.len());

            buf[..n].copy_from_slice(&sector_bytes[in_sector..in_sector + n]);
            delivered += n;
            buf = &mut buf[n..];
            handle.byte_offset += n as u32;

            if handle.byte_offset as u64 >= effective_block_size {
                handle.block_index += 1;
                handle.byte_offset = 0;
                if handle.block_index >= self.mode.slots() {
                    handle.block_index = 0;
                    match logical::next_extent(&self.entries, handle.entry) {
                        Some(next) => handle.entry = next,
                        None => break,
                    }
                }
            }
        }

        Ok(delivered)
    }
}
