//! Helpers that treat a set of directory entries sharing the same
//! (status, filename, extension) as one logical file (spec section 4.6).

use crate::fcb::{AddressingMode, RawEntry};

fn same_file(a: &RawEntry, b: &RawEntry) -> bool {
    a.logical_key() == b.logical_key()
}

/// True iff no other extent of the same logical file has a smaller
/// `extent_l`. Compares `extent_l` only, not the full extent number — a
/// known limitation for files whose extents cross the 32-extent boundary
/// (spec section 9).
pub(crate) fn is_first_extent(entries: &[RawEntry], index: usize) -> bool {
    let entry = &entries[index];
    let is_first = !entries
        .iter()
        .enumerate()
        .any(|(i, other)| i != index && same_file(other, entry) && other.extent_l < entry.extent_l);

    if is_first && entry.extent_h != 0 {
        log::warn!(
            "entry at index {index} reported as the first extent but has extent_h={}; \
             first-extent detection only compares extent_l and may be wrong past the 32-extent boundary",
            entry.extent_h
        );
    }
    is_first
}

pub(crate) fn last_extent_nb(entries: &[RawEntry], index: usize) -> u32 {
    let entry = &entries[index];
    entries
        .iter()
        .filter(|other| same_file(other, entry))
        .map(RawEntry::extent_nb)
        .max()
        .unwrap_or(0)
}

/// Index of the extent with the smallest extent number greater than the
/// given one, within the same logical file. `None` is the "no further
/// extent" sentinel.
pub(crate) fn next_extent(entries: &[RawEntry], index: usize) -> Option<usize> {
    let entry = &entries[index];
    let current = entry.extent_nb();
    entries
        .iter()
        .enumerate()
        .filter(|(i, other)| *i != index && same_file(other, entry) && other.extent_nb() > current)
        .min_by_key(|(_, other)| other.extent_nb())
        .map(|(i, _)| i)
}

pub(crate) fn used_blocks(entry: &RawEntry, mode: AddressingMode) -> u32 {
    (0..mode.slots())
        .filter(|&i| mode.block_at(entry, i) != 0)
        .count() as u32
}

/// Sums the contribution of every extent of the logical file `index`
/// belongs to: the record-count tail for the last extent, used blocks
/// times block size for the rest.
pub(crate) fn file_size(entries: &[RawEntry], index: usize, mode: AddressingMode, block_size: u32) -> u64 {
    let entry = &entries[index];
    let last = last_extent_nb(entries, index);
    entries
        .iter()
        .filter(|other| same_file(other, entry))
        .map(|other| {
            if other.extent_nb() == last {
                128u64 * other.rc as u64
            } else {
                used_blocks(other, mode) as u64 * block_size as u64
            }
        })
        .sum()
}
