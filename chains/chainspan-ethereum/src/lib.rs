//! The Ethereum side of the cross-chain encoding core: the `( )`/`[ ]`
//! signature grammar, the builder turning parsed signatures into
//! `ethers_core::abi` parameter types, calldata splitting, and the token
//! helpers the value aligner needs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use self::{abi::*, calldata::*, signature::*, token::*};

mod abi;
mod calldata;
mod signature;
mod token;

/// The opening delimiter of a tuple type.
pub const BEGIN_TUPLE: char = '(';
/// The closing delimiter of a tuple type.
pub const END_TUPLE: char = ')';
/// The opening delimiter of an array suffix.
pub const BEGIN_ARRAY: char = '[';
/// The closing delimiter of an array suffix.
pub const END_ARRAY: char = ']';

/// The `tuple` keyword used in parsed type names.
pub const TUPLE: &str = "tuple";
