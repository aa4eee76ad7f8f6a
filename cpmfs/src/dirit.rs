//! Walks the loaded directory entries, presenting exactly one record per
//! logical file (spec section 4.9).

use cpmfs_ds::SectorSource;

use crate::fcb::Flags;
use crate::{logical, Filesystem};

/// One synthesized directory record. `inode` is the entry's index into the
/// filesystem's directory-entry array, stable across iteration of the same
/// handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirRecord {
    pub name: String,
    pub user: u8,
    pub flags: Flags,
    pub size: u64,
    pub inode: usize,
}

/// Iterator over the logical files of a [`Filesystem`]. Borrows the
/// filesystem for its lifetime; issues no sector reads (the directory area
/// is already resident from construction).
pub struct ReadDir<'a, S> {
    fs: &'a Filesystem<S>,
    cursor: usize,
}

impl<'a, S: SectorSource> ReadDir<'a, S> {
    pub(crate) fn new(fs: &'a Filesystem<S>) -> Self {
        Self { fs, cursor: 0 }
    }
}

impl<'a, S: SectorSource> Iterator for ReadDir<'a, S> {
    type Item = DirRecord;

    fn next(&mut self) -> Option<DirRecord> {
        let entries = &self.fs.entries;
        while self.cursor < entries.len() {
            let index = self.cursor;
            self.cursor += 1;

            let entry = &entries[index];
            if !entry.is_valid() || !logical::is_first_extent(entries, index) {
                continue;
            }

            let size = logical::file_size(entries, index, self.fs.mode, self.fs.attrs.block_size);
            return Some(DirRecord {
                name: format_name(entry),
                user: entry.status & 0x0f,
                flags: entry.flags(),
                size,
                inode: index,
            });
        }
        None
    }
}

fn format_name(entry: &crate::fcb::RawEntry) -> String {
    let mut name = String::with_capacity(12);
    for &b in &entry.file {
        let c = b & 0x7f;
        if c == b' ' {
            break;
        }
        name.push(c as char);
    }

    let ext_first = entry.extension[0] & 0x7f;
    if ext_first != b' ' {
        name.push('.');
        for &b in &entry.extension {
            let c = b & 0x7f;
            if c == b' ' {
                break;
            }
            name.push(c as char);
        }
    }

    name
}

#[cfg(test)]
mod tests {
    use super::super::tests_support::{attrs_otrona, MapSource};
    use crate::fcb::Flags;
    use crate::Filesystem;

    #[test]
    fn empty_directory_yields_no_records() {
        let attrs = attrs_otrona();
        let source = MapSource::new_all_free(attrs.sector_size);
        let fs = Filesystem::new(attrs, source).unwrap();
        assert_eq!(fs.read_dir().count(), 0);
    }

    #[test]
    fn single_file_yields_one_record_with_expected_size() {
        let attrs = attrs_otrona();
        let mut source = MapSource::new(attrs.sector_size);
        source.put_entry(3, 0, 1, 0, 0, b"HELLO   ", b"TXT", 0, 0, 1, &[2]);

        let fs = Filesystem::new(attrs, source).unwrap();
        let records: Vec<_> = fs.read_dir().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "HELLO.TXT");
        assert_eq!(records[0].user, 0);
        assert_eq!(records[0].size, 128);
        assert_eq!(records[0].inode, 0);
    }

    #[test]
    fn second_extent_of_a_file_is_not_reported_separately() {
        let attrs = attrs_otrona();
        let mut source = MapSource::new(attrs.sector_size);
        source.put_entry(3, 0, 1, 0, 0, b"BIG     ", b"TXT", 1, 0, 16, &[6, 7]);
        source.put_entry(3, 0, 1, 1, 0, b"BIG     ", b"TXT", 0, 0, 0, &[2, 3, 4, 5]);

        let fs = Filesystem::new(attrs, source).unwrap();
        let records: Vec<_> = fs.read_dir().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].size, 4 * 2048 + 16 * 128);
    }

    #[test]
    fn flags_are_decoded_from_extension_high_bits() {
        let attrs = attrs_otrona();
        let mut source = MapSource::new(attrs.sector_size);
        source.put_entry(
            3,
            0,
            1,
            0,
            0,
            b"HELLO   ",
            &[b'T' | 0x80, b'X' | 0x80, b'T' | 0x80],
            0,
            0,
            1,
            &[2],
        );

        let fs = Filesystem::new(attrs, source).unwrap();
        let records: Vec<_> = fs.read_dir().collect();
        assert_eq!(records[0].name, "HELLO.TXT");
        assert!(records[0].flags.contains(Flags::READ_ONLY));
        assert!(records[0].flags.contains(Flags::SYSTEM));
        assert!(records[0].flags.contains(Flags::ARCHIVED));
    }
}
