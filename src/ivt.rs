//! Interrupt vector table of the ILC firmware.
//!
//! Every vector occupies four words: target address low word, the `goto`
//! opcode word (0x0004), target address high word and a zero padding word.

use crate::space::AddressSpace;

pub const TRAP_VECTORS: [&str; 8] = [
    "Reserved Trap 0",
    "Oscillator Fail",
    "Address Error",
    "Stack Error",
    "Math Error",
    "Reserved Trap 5",
    "Reserved Trap 6",
    "Reserved Trap 7",
];

pub const INTERRUPT_VECTORS: [&str; 118] = [
    "INT0 Interrupt",
    "IC1 Interrupt",
    "OC1 Interrupt",
    "T1 Interrupt",
    "Interrupt 4",
    "IC2 Interrupt",
    "OC2 Interrupt",
    "T2 Interrupt",
    "T3 Interrupt",
    "SPI1 Error Interrupt",
    "SPI1 Interrupt",
    "U1RX Interrupt",
    "U1 TX Interrupt",
    "ADC1 Interrupt",
    "Interrupt 14",
    "Interrupt 15",
    "SI2 C1 Interrupt",
    "MI2 C1 Interrupt",
    "Comp Interrupt",
    "CN Interrupt",
    "INT1 Interrupt",
    "Interrupt 21",
    "Interrupt 22",
    "Interrupt 23",
    "Interrupt 24",
    "OC3 Interrupt",
    "Interrupt 26",
    "T4 Interrupt",
    "T5 Interrupt",
    "INT2 Interrupt",
    "U2RX Interrupt",
    "U2TX Interrupt",
    "SPI2 Error Interrupt",
    "SPI2 Interrupt",
    "Interrupt 34",
    "Interrupt 35",
    "Interrupt 36",
    "IC3 Interrupt",
    "Interrupt 38",
    "Interrupt 39",
    "Interrupt 40",
    "Interrupt 41",
    "Interrupt 42",
    "Interrupt 43",
    "Interrupt 44",
    "Interrupt 45",
    "Interrupt 46",
    "Interrupt 47",
    "Interrupt 48",
    "SI2 C2 Interrupt",
    "MI2 C2 Interrupt",
    "Interrupt 51",
    "Interrupt 52",
    "Interrupt 53",
    "Interrupt 54",
    "Interrupt 55",
    "Interrupt 56",
    "Interrupt 57",
    "Interrupt 58",
    "Interrupt 59",
    "Interrupt 60",
    "Interrupt 61",
    "RTC Interrupt",
    "Interrupt 63",
    "Interrupt 64",
    "U1 Error Interrupt",
    "U2 Error Interrupt",
    "CRC Interrupt",
    "Interrupt 68",
    "Interrupt 69",
    "Interrupt 70",
    "Interrupt 71",
    "LVD Interrupt",
    "Interrupt 73",
    "Interrupt 74",
    "Interrupt 75",
    "Interrupt 76",
    "Interrupt 77",
    "Interrupt 78",
    "Interrupt 79",
    "ULPWU Interrupt",
    "Interrupt 81",
    "Interrupt 82",
    "Interrupt 83",
    "Interrupt 84",
    "Interrupt 85",
    "Interrupt 86",
    "Interrupt 87",
    "Interrupt 88",
    "Interrupt 89",
    "Interrupt 90",
    "Interrupt 91",
    "Interrupt 92",
    "Interrupt 93",
    "Interrupt 94",
    "Interrupt 95",
    "Interrupt 96",
    "Interrupt 97",
    "Interrupt 98",
    "Interrupt 99",
    "Interrupt 100",
    "Interrupt 101",
    "Interrupt 102",
    "Interrupt 103",
    "Interrupt 104",
    "Interrupt 105",
    "Interrupt 106",
    "Interrupt 107",
    "Interrupt 108",
    "Interrupt 109",
    "Interrupt 110",
    "Interrupt 111",
    "Interrupt 112",
    "Interrupt 113",
    "Interrupt 114",
    "Interrupt 115",
    "Interrupt 116",
    "Interrupt 117",
];

/// Number of vectors in the table, traps first.
pub const VECTOR_COUNT: usize = TRAP_VECTORS.len() + INTERRUPT_VECTORS.len();

const GOTO_OPCODE: u16 = 0x0004;
const WORDS_PER_VECTOR: u32 = 4;

pub fn vector_name(index: usize) -> Option<&'static str> {
    match index.checked_sub(TRAP_VECTORS.len()) {
        None => Some(TRAP_VECTORS[index]),
        Some(i) => INTERRUPT_VECTORS.get(i).copied(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IvtEntry {
    pub name: &'static str,
    /// Word address of the entry's first word
    pub addr: u32,
    pub low: u16,
    pub jump: u16,
    pub high: u16,
    pub zero: u16,
}

impl IvtEntry {
    pub fn is_valid(&self) -> bool {
        self.jump == GOTO_OPCODE && self.zero == 0
    }

    pub fn target(&self) -> u32 {
        (self.high as u32) << 16 | self.low as u32
    }

    pub fn warning(&self) -> Option<IvtWarning<'_>> {
        (!self.is_valid()).then_some(IvtWarning(self))
    }
}

/// Diagnostic for an entry that is not a `goto` instruction.
#[derive(Debug, Clone, Copy)]
pub struct IvtWarning<'a>(pub &'a IvtEntry);

/// Walks the vector table starting at a word address. Unloaded words read
/// as padding, so malformed entries are yielded rather than rejected.
pub struct IvtIter<'a> {
    space: &'a AddressSpace,
    base: u32,
    index: usize,
}

impl<'a> IvtIter<'a> {
    pub fn new(space: &'a AddressSpace, base: u32) -> Self {
        Self {
            space,
            base,
            index: 0,
        }
    }
}

impl<'a> Iterator for IvtIter<'a> {
    type Item = IvtEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let name = vector_name(self.index)?;
        let addr = self.base;

        let entry = IvtEntry {
            name,
            addr,
            low: self.space.read_word16(addr),
            jump: self.space.read_word16(addr.wrapping_add(1)),
            high: self.space.read_word16(addr.wrapping_add(2)),
            zero: self.space.read_word16(addr.wrapping_add(3)),
        };

        if !entry.is_valid() {
            log::debug!("{name}: malformed vector at word 0x{addr:06x}");
        }

        self.index += 1;
        self.base = addr.wrapping_add(WORDS_PER_VECTOR);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = VECTOR_COUNT - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for IvtIter<'_> {}

impl<'a> crate::verify::IlcVerifier<'a> {
    /// Decodes the interrupt vector table at word address `base`.
    pub fn ivt(&self, base: u32) -> IvtIter<'a> {
        IvtIter::new(self.space(), base)
    }
}
