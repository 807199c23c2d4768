use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::crc::Crc16Modbus;
use crate::error::RangeError;

/// A maximal run of consecutive byte addresses backed by loaded data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    start: u32,
    data: Vec<u8>,
}

impl Segment {
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Exclusive end address
    pub fn end(&self) -> u64 {
        self.start as u64 + self.data.len() as u64
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, addr: u64) -> bool {
        self.start as u64 <= addr && addr < self.end()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Collects loaded bytes before freezing them into an [`AddressSpace`].
#[derive(Debug, Default)]
pub struct AddressSpaceBuilder {
    bytes: BTreeMap<u32, u8>,
}

impl AddressSpaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` starting at byte address `addr`. A later load of an
    /// address replaces the earlier value.
    pub fn load(&mut self, addr: u32, data: &[u8]) -> &mut Self {
        for (offset, &byte) in data.iter().enumerate() {
            self.bytes.insert(addr.wrapping_add(offset as u32), byte);
        }
        self
    }

    /// First address in `[addr, addr + len)` that already holds data.
    pub fn overlap(&self, addr: u32, len: usize) -> Option<u32> {
        let end = addr as u64 + len as u64;
        self.bytes
            .range(addr..)
            .map(|(&a, _)| a)
            .next()
            .filter(|&a| (a as u64) < end)
    }

    pub fn build(self) -> AddressSpace {
        let mut segments: Vec<Segment> = Vec::new();

        for (addr, byte) in self.bytes {
            if let Some(seg) = segments.last_mut() {
                if seg.end() == addr as u64 {
                    seg.data.push(byte);
                    continue;
                }
            }
            segments.push(Segment {
                start: addr,
                data: alloc::vec![byte],
            });
        }

        log::debug!(
            "built address space: {} segment(s), {} byte(s)",
            segments.len(),
            segments.iter().map(Segment::len).sum::<usize>()
        );

        AddressSpace { segments }
    }
}

/// Byte-addressed memory image assembled from disjoint loaded segments.
///
/// Reads outside every segment return [`AddressSpace::PADDING`] rather than
/// failing; use [`AddressSpace::has_range`] when real data is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSpace {
    segments: Vec<Segment>,
}

impl AddressSpace {
    pub const PADDING: u8 = 0xFF;

    pub fn builder() -> AddressSpaceBuilder {
        AddressSpaceBuilder::new()
    }

    /// Sorted, non-overlapping, non-adjacent.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn segment_for(&self, addr: u64) -> Option<&Segment> {
        let idx = self.segments.partition_point(|s| s.start as u64 <= addr);
        let seg = self.segments.get(idx.checked_sub(1)?)?;
        seg.contains(addr).then_some(seg)
    }

    fn byte_at(&self, addr: u64) -> Option<u8> {
        let seg = self.segment_for(addr)?;
        Some(seg.data[(addr - seg.start as u64) as usize])
    }

    pub fn get(&self, addr: u32) -> Option<u8> {
        self.byte_at(addr as u64)
    }

    pub fn read_byte(&self, addr: u32) -> u8 {
        self.get(addr).unwrap_or(Self::PADDING)
    }

    /// True when `[start, start + length)` lies inside the single segment
    /// holding `start`. Ranges that cross a gap are rejected even when both
    /// ends are loaded.
    pub fn has_range(&self, start: u32, length: u32) -> bool {
        self.slice(start, length).is_some()
    }

    /// Loaded bytes of `[start, start + length)`, if [`Self::has_range`].
    pub fn slice(&self, start: u32, length: u32) -> Option<&[u8]> {
        let seg = self.segment_for(start as u64)?;
        let offset = (start - seg.start) as usize;
        seg.data.get(offset..offset.checked_add(length as usize)?)
    }

    /// Reads the 16-bit word at word address `word_addr`, i.e. the little
    /// endian pair at byte addresses `2 * word_addr` and `2 * word_addr + 1`.
    pub fn read_word16(&self, word_addr: u32) -> u16 {
        let byte_addr = (word_addr as u64) << 1;
        let lo = self.byte_at(byte_addr).unwrap_or(Self::PADDING);
        let hi = self.byte_at(byte_addr + 1).unwrap_or(Self::PADDING);
        u16::from_le_bytes([lo, hi])
    }

    /// CRC-16/MODBUS over the `length` bytes starting at byte address `start`.
    pub fn crc16_modbus(&self, start: u32, length: u32) -> Result<u16, RangeError> {
        let data = self
            .slice(start, length)
            .ok_or_else(|| RangeError::new(start, length))?;
        let crc = Crc16Modbus::modbus(data);
        log::trace!("crc16 0x{start:06x}+{length} = {crc:04x}");
        Ok(crc)
    }
}
