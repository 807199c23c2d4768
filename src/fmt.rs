use core::fmt;

use crate::error::RangeError;
use crate::space::Segment;
use crate::verify::{ApplicationCheck, StatisticsCheck, VerificationReport};

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = (self.start, self.end);
        match self.context {
            Some(context) => write!(f, "{context}: address range")?,
            None => write!(f, "Address range")?,
        }
        write!(
            f,
            " {start} - {end} (0x{start:06x} - 0x{end:06x}) is outside loaded range."
        )
    }
}

#[cfg(feature = "std")]
impl fmt::Display for crate::error::LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::error::LoadError;
        match self {
            LoadError::Record { index, error } => {
                write!(f, "malformed hex record #{index}: {error:?}")
            }
            LoadError::Overlap { addr } => write!(f, "data overlap at address 0x{addr:06x}"),
            LoadError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

/// Renders segments as `start - end` pairs joined by `, `.
pub struct SegmentList<'a>(pub &'a [Segment]);

impl fmt::Display for SegmentList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:04x} - {:04x}", seg.start(), seg.end())?;
        }
        Ok(())
    }
}

impl fmt::Display for StatisticsCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reset command address {:04x}", self.reset_command)?;
        writeln!(f, "Application start address {:04x}", self.application_start)?;
        writeln!(f, "Application length {}", self.application_length)?;
        writeln!(f, "Application end {:04x}", self.application_end())?;
        writeln!(f, "Stat CRC {:04x}", self.stat_crc)?;
        write!(f, "Calculated Stat CRC {:04x}", self.calculated_stat_crc)?;
        if !self.matches() {
            write!(f, "\nApplication statistics CRC doesn't match!")?;
        }
        Ok(())
    }
}

impl fmt::Display for ApplicationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Application CRC {:04x}", self.app_crc)?;
        write!(f, "Calculated Application CRC {:04x}", self.calculated_app_crc)?;
        if !self.matches() {
            write!(f, "\nApplication CRC doesn't match!")?;
        }
        Ok(())
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.statistics, self.application)
    }
}

#[cfg(feature = "ivt")]
impl fmt::Display for crate::ivt::IvtEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>22}: {:04x} {:04x}", self.name, self.high, self.low)
    }
}

#[cfg(feature = "ivt")]
impl fmt::Display for crate::ivt::IvtWarning<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid hex entry - jump: {:04x} zero: {:04x}",
            self.0.jump, self.0.zero
        )
    }
}

#[cfg(feature = "diff")]
impl fmt::Display for crate::diff::DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::diff::DiffEntry;
        match *self {
            DiffEntry::RangeNotLoaded { start, end } => {
                write!(f, "Diff: range not fully loaded: 0x{start:06x} - 0x{end:06x}")
            }
            DiffEntry::Byte {
                addr,
                reference,
                target,
            } => write!(f, "Diff: {addr:06x} {reference:02x} {target:02x}"),
        }
    }
}
