//! Dialect-neutral building blocks shared by the chain-specific encoding
//! crates: the parsed type expression tree, the token extraction helpers
//! both signature grammars are built on, the address-space model with its
//! account adapter trait, and the VM call surface of the built-in function.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use self::{address::*, expression::*, vm::*};

mod address;
mod expression;
mod vm;
