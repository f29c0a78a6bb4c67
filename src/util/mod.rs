//! Miscellaneous helpers

#[macro_use]
mod secret;
mod bits;
mod keccak256;
mod result;

pub(crate) use self::bits::Bits;
pub use self::keccak256::keccak256;
pub use self::result::{Error, Result, Step};
