//! Resolves a textual path + user number to the first extent of a file
//! (spec section 4.7).

use crate::fcb::RawEntry;

/// Finds the directory-entry index of the first extent of the file named
/// by `path` for `user`, if any.
///
/// The name portion is compared against the 8-byte filename field by the
/// request's own byte length, not padded to 8 — a shorter input matches
/// any file sharing that prefix. This mirrors the original library and is
/// preserved for compatibility (spec section 9), not stricter matching.
pub(crate) fn find_file(entries: &[RawEntry], path: &str, user: u8) -> Option<usize> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let (name, ext) = match path.split_once('.') {
        Some((name, ext)) => (name, Some(ext)),
        None => (path, None),
    };
    let name_bytes = name.as_bytes();
    if name_bytes.len() > 8 {
        return None;
    }

    let mut ext_bytes = [0u8; 3];
    let mut ext_len = 0usize;
    if let Some(ext) = ext {
        let raw = ext.as_bytes();
        for i in 0..3 {
            ext_bytes[i] = raw.get(i).copied().unwrap_or(0) & 0x7f;
        }
        ext_len = raw.iter().position(|&b| b == b' ').unwrap_or(3).min(3);
    }

    let mut best: Option<usize> = None;
    for (i, entry) in entries.iter().enumerate() {
        if entry.status != user {
            continue;
        }
        if &entry.file[..name_bytes.len()] != name_bytes {
            continue;
        }
        if entry.extension[..ext_len] != ext_bytes[..ext_len] {
            continue;
        }

        best = match best {
            Some(b) if entries[b].extent_nb() <= entry.extent_nb() => Some(b),
            _ => Some(i),
        };
    }
    best
}
