//! Structural validation of the loaded directory area (spec section 4.5).
//! Runs once during construction; a non-success result means no
//! filesystem handle is produced.

use cpmfs_ds::{Error, Result};

use crate::fcb::{AddressingMode, RawEntry};
use crate::Attributes;

pub(crate) fn check(
    attrs: &Attributes,
    entries: &[RawEntry],
    mode: AddressingMode,
    capacity: u64,
) -> Result<()> {
    let max_blocks = (capacity / attrs.block_size as u64) as u32;
    let dir_bytes = attrs.max_dir_entries as u64 * 32;
    let dir_blocks = dir_bytes.div_ceil(attrs.block_size as u64) as u32;

    let valid = entries.iter().filter(|e| e.is_valid());

    for entry in valid.clone() {
        for i in 0..mode.slots() {
            let block = mode.block_at(entry, i);
            if block > max_blocks {
                log::error!("block {block} exceeds disk capacity ({max_blocks} blocks)");
                return Err(Error::BlockOverflow);
            }
            if block != 0 && dir_blocks > 0 && block <= dir_blocks - 1 {
                log::error!("block {block} overlaps the directory area ({dir_blocks} blocks)");
                return Err(Error::FileDirOverlap);
            }
        }
    }

    let mut all_blocks: Vec<u32> = Vec::with_capacity(entries.len() * mode.slots());
    for entry in valid {
        for i in 0..mode.slots() {
            all_blocks.push(mode.block_at(entry, i));
        }
    }
    all_blocks.sort_unstable();
    for pair in all_blocks.windows(2) {
        if pair[0] != 0 && pair[0] == pair[1] {
            log::error!("block {} referenced by more than one file", pair[0]);
            return Err(Error::FileOverlap);
        }
    }

    Ok(())
}
