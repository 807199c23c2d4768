//! Intel-HEX decoding into an [`AddressSpace`].

use std::path::Path;

use ihex::{Reader, Record};

use crate::error::LoadError;
use crate::space::AddressSpace;

impl AddressSpace {
    /// Decodes Intel-HEX text. Reading stops at the end-of-file record;
    /// start address records carry no memory content and are skipped.
    pub fn from_ihex(text: &str) -> Result<Self, LoadError> {
        let mut builder = AddressSpace::builder();
        let mut base: u32 = 0;
        let mut records = 0usize;

        for (index, record) in Reader::new(text).enumerate() {
            let record = record.map_err(|error| LoadError::Record { index, error })?;
            records += 1;

            match record {
                Record::Data { offset, value } => {
                    let addr = base.wrapping_add(offset as u32);
                    if let Some(addr) = builder.overlap(addr, value.len()) {
                        return Err(LoadError::Overlap { addr });
                    }
                    builder.load(addr, &value);
                }
                Record::ExtendedSegmentAddress(segment) => base = (segment as u32) << 4,
                Record::ExtendedLinearAddress(upper) => base = (upper as u32) << 16,
                Record::StartSegmentAddress { .. } | Record::StartLinearAddress(_) => {}
                Record::EndOfFile => break,
            }
        }

        log::debug!("decoded {records} hex record(s)");
        Ok(builder.build())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        log::debug!("loading {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_ihex(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(space: &AddressSpace) -> Vec<(u32, u64)> {
        space.segments().iter().map(|s| (s.start(), s.end())).collect()
    }

    #[test]
    fn test_data_records_merge_into_segments() {
        let text = ":0400100001020304E2\n:020014000506DF\n:0100200007D8\n:00000001FF\n";
        let space = AddressSpace::from_ihex(text).unwrap();
        assert_eq!(ranges(&space), [(0x10, 0x16), (0x20, 0x21)]);
        assert_eq!(space.segments()[0].data(), hex::decode("010203040506").unwrap());
    }

    #[test]
    fn test_extended_addresses() {
        let text = ":020000021000EC\n:02010000AABB98\n:020000040002F8\n:02010000AABB98\n:00000001FF\n";
        let space = AddressSpace::from_ihex(text).unwrap();
        assert_eq!(ranges(&space), [(0x10100, 0x10102), (0x20100, 0x20102)]);
        assert_eq!(space.read_byte(0x20101), 0xBB);
    }

    #[test]
    fn test_start_records_skipped() {
        let text = ":0400000300001234B3\n:0400000500000100F6\n:0100200007D8\n:00000001FF\n";
        let space = AddressSpace::from_ihex(text).unwrap();
        assert_eq!(ranges(&space), [(0x20, 0x21)]);
    }

    #[test]
    fn test_overlap_rejected() {
        let text = ":0400100001020304E2\n:0100120009E4\n:00000001FF\n";
        match AddressSpace::from_ihex(text) {
            Err(LoadError::Overlap { addr }) => assert_eq!(addr, 0x12),
            other => panic!("expected overlap, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_checksum() {
        let text = ":0400100001020304E2\n:0100200007D9\n:00000001FF\n";
        match AddressSpace::from_ihex(text) {
            Err(LoadError::Record { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected record error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_file() {
        let space = AddressSpace::from_ihex(":00000001FF\n").unwrap();
        assert!(space.is_empty());
    }
}
