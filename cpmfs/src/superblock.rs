//! Reads the directory area through the sector callback into an in-memory
//! array of directory entries (spec section 4.4).

use cpmfs_ds::{Error, Result, SectorSource};

use crate::fcb::RawEntry;
use crate::Attributes;

const ENTRY_SIZE: usize = 32;

/// Loads `attrs.max_dir_entries` directory entries starting at the first
/// sector of the data area, walking sectors sequentially.
pub(crate) fn load<S: SectorSource>(attrs: &Attributes, source: &mut S) -> Result<Vec<RawEntry>> {
    let needed = attrs.max_dir_entries as usize;
    let entries_per_sector = attrs.sector_size as usize / ENTRY_SIZE;
    if entries_per_sector == 0 {
        log::error!(
            "sector_size {} is smaller than a directory entry ({ENTRY_SIZE} bytes)",
            attrs.sector_size
        );
        return Err(Error::InvalidArg);
    }

    let mut entries = Vec::with_capacity(needed);
    let mut sector_buf = vec![0u8; attrs.sector_size as usize];

    // Mutually exclusive by construction (checked in Filesystem::new): the
    // bitwise-or picks whichever of the two is non-zero.
    let mut cylinder = attrs.skip_first_cylinders | attrs.boot_cylinders;
    let mut sector = 1u32;

    while entries.len() < needed {
        source.read_sector(cylinder, 0, sector, &mut sector_buf).map_err(|e| {
            log::error!("failed to read directory sector ({cylinder}, 0, {sector}): {e}");
            e
        })?;

        let remaining = needed - entries.len();
        for i in 0..remaining.min(entries_per_sector) {
            let chunk = &sector_buf[i * ENTRY_SIZE..(i + 1) * ENTRY_SIZE];
            entries.push(RawEntry::from_sector_chunk(chunk));
        }

        sector += 1;
        if sector > attrs.sector_count {
            sector = 1;
            cylinder += 1;
        }
    }

    Ok(entries)
}
