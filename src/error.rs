/// A requested address range is not wholly backed by loaded data.
///
/// `end` is exclusive. `context` names the operation that needed the range;
/// the message itself is assembled by the `Display` impl in [`crate::fmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    pub start: u64,
    pub end: u64,
    pub context: Option<&'static str>,
}

impl RangeError {
    pub const STATISTICS: &'static str = "Cannot retrieve application statistics record";
    pub const APPLICATION: &'static str = "Cannot retrieve content of the application programme";

    pub fn new(start: u32, length: u32) -> Self {
        Self {
            start: start as u64,
            end: start as u64 + length as u64,
            context: None,
        }
    }

    pub fn with_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RangeError {}

/// Failure to turn Intel-HEX text into an [`crate::AddressSpace`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub enum LoadError {
    /// Record number `index` (zero based, blank lines skipped) is malformed
    Record {
        index: usize,
        error: ihex::ReaderError,
    },
    /// The same byte address is written by more than one data record
    Overlap { addr: u32 },
    Io(std::io::Error),
}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}
