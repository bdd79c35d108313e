//! The MultiversX side of the cross-chain encoding core: the `< >`
//! signature grammar, the sealed argument value model with its empty-clone
//! support, and the parts-based wire codec.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use self::{abi::*, codec::*, serializer::*, signature::*, value::*};

mod abi;
mod codec;
mod serializer;
mod signature;
mod value;

/// The opening delimiter of a type parameter list.
pub const BEGIN_TYPE: char = '<';
/// The closing delimiter of a type parameter list.
pub const END_TYPE: char = '>';

/// The separator between serialized parts in the string wire form.
pub const PARTS_SEPARATOR: &str = "@";

/// The `array` keyword prefix; the arity follows as a numeric suffix
/// (`array3`).
pub const ARRAY: &str = "array";
/// The `tuple` keyword.
pub const TUPLE: &str = "tuple";
