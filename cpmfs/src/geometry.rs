//! Pure functions mapping disk geometry to data capacity and logical
//! (block, byte offset) pairs to physical (cylinder, head, sector).

use cpmfs_ds::{Error, Result};

use crate::Attributes;

/// Total data-area capacity in bytes, after subtracting whichever reserved
/// area (if any) the attributes name.
///
/// `boot_cylinders` reserves whole cylinders on every head;
/// `skip_first_cylinders` reserves cylinders on head 0 only — so the
/// former is scaled by `heads` and the latter is not (spec section 9).
///
/// Fails with [`Error::InvalidArg`] if the reserved area would consume more
/// cylinders than the disk has.
pub(crate) fn capacity(attrs: &Attributes) -> Result<u64> {
    let total_cylinders = attrs.cylinders as u64 * attrs.heads as u64;
    let reserved_cylinders =
        attrs.skip_first_cylinders as u64 + attrs.boot_cylinders as u64 * attrs.heads as u64;
    let usable_cylinders = total_cylinders.checked_sub(reserved_cylinders).ok_or_else(|| {
        log::error!(
            "reserved area ({reserved_cylinders} cylinders) exceeds disk size ({total_cylinders} cylinders)"
        );
        Error::InvalidArg
    })?;
    Ok(usable_cylinders * attrs.sector_count as u64 * attrs.sector_size as u64)
}

/// Translates a logical (block, byte-offset-in-block) pair into a physical
/// (cylinder, head, sector) triple, reproducing the layout of a
/// head-interleaved raw image: all tracks of head 0 across cylinders
/// `0..cylinders`, then all of head 1, and so on.
pub(crate) fn block_to_chs(attrs: &Attributes, block: u32, offset_in_block: u32) -> (u32, u32, u32) {
    let mut offset = block as u64 * attrs.block_size as u64 + offset_in_block as u64;
    offset += attrs.skip_first_cylinders as u64 * attrs.sector_count as u64 * attrs.sector_size as u64;
    offset += attrs.boot_cylinders as u64
        * attrs.heads as u64
        * attrs.sector_count as u64
        * attrs.sector_size as u64;

    let sector_linear = offset / attrs.sector_size as u64;
    let track_index = sector_linear / attrs.sector_count as u64;

    let cylinder = (track_index % attrs.cylinders as u64) as u32;
    let head = (track_index / attrs.cylinders as u64) as u32;
    let sector = (sector_linear % attrs.sector_count as u64) as u32 + 1;

    (cylinder, head, sector)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn otrona() -> Attributes {
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

    #[test]
    fn capacity_subtracts_boot_cylinders_on_every_head() {
        // (40*2 - 0 - 3*2) * 10 * 512
        assert_eq!(capacity(&otrona()).unwrap(), 74 * 10 * 512);
    }

    #[test]
    fn capacity_subtracts_skip_first_cylinders_on_one_head_only() {
        let mut attrs = otrona();
        attrs.boot_cylinders = 0;
        attrs.skip_first_cylinders = 3;
        // (40*2 - 3 - 0) * 10 * 512
        assert_eq!(capacity(&attrs).unwrap(), 77 * 10 * 512);
    }

    #[test]
    fn reserved_area_larger_than_the_disk_is_rejected() {
        let mut attrs = otrona();
        attrs.boot_cylinders = attrs.cylinders + 1;
        assert!(matches!(capacity(&attrs).unwrap_err(), Error::InvalidArg));
    }

    #[test]
    fn block_to_chs_matches_hand_computed_otrona_address() {
        // block 2, offset 0, with 3 reserved boot cylinders on both heads.
        let (c, h, s) = block_to_chs(&otrona(), 2, 0);
        assert_eq!((c, h, s), (6, 0, 9));
    }

    #[test]
    fn block_to_chs_advances_sector_within_same_track() {
        let (c0, h0, s0) = block_to_chs(&otrona(), 0, 0);
        let (c1, h1, s1) = block_to_chs(&otrona(), 0, 512);
        assert_eq!((c0, h0), (c1, h1));
        assert_eq!(s1, s0 + 1);
    }
}
