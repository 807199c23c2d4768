#![cfg_attr(not(any(test, feature = "std")), no_std)]
extern crate alloc;

pub mod crc;
#[cfg(feature = "diff")]
pub mod diff;
pub mod error;
pub mod fmt;
#[cfg(feature = "ivt")]
pub mod ivt;
pub mod layout;
#[cfg(feature = "std")]
pub mod load;
pub mod space;
pub mod verify;

pub use error::RangeError;
pub use layout::MemoryLayout;
pub use space::{AddressSpace, AddressSpaceBuilder, Segment};
pub use verify::{IlcVerifier, VerificationReport};
