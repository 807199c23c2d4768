use crate::space::AddressSpace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffEntry {
    /// A reference segment is not wholly loaded in the target
    RangeNotLoaded { start: u32, end: u64 },
    /// Byte values differ; unloaded target bytes read as padding
    Byte { addr: u32, reference: u8, target: u8 },
}

/// Differences between two images over the segments loaded in `reference`.
///
/// Entries come in segment order, then ascending address. Addresses loaded
/// only in the target are never visited.
pub struct Diff<'a> {
    reference: &'a AddressSpace,
    target: &'a AddressSpace,
    segment: usize,
    offset: usize,
    range_checked: bool,
}

pub fn diff<'a>(reference: &'a AddressSpace, target: &'a AddressSpace) -> Diff<'a> {
    Diff {
        reference,
        target,
        segment: 0,
        offset: 0,
        range_checked: false,
    }
}

impl<'a> Iterator for Diff<'a> {
    type Item = DiffEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let reference = self.reference;
        loop {
            let seg = reference.segments().get(self.segment)?;

            if !self.range_checked {
                self.range_checked = true;
                if !self.target.has_range(seg.start(), seg.len() as u32) {
                    return Some(DiffEntry::RangeNotLoaded {
                        start: seg.start(),
                        end: seg.end(),
                    });
                }
            }

            while let Some(&expected) = seg.data().get(self.offset) {
                let addr = seg.start() + self.offset as u32;
                self.offset += 1;

                let actual = self.target.read_byte(addr);
                if expected != actual {
                    return Some(DiffEntry::Byte {
                        addr,
                        reference: expected,
                        target: actual,
                    });
                }
            }

            log::trace!("diff: segment 0x{:06x} done", seg.start());
            self.segment += 1;
            self.offset = 0;
            self.range_checked = false;
        }
    }
}
