//! The cross-chain encoding core: type mapping between the Ethereum and
//! MultiversX ABI dialects, the value aligner moving decoded values
//! between them, the four encoding entry points, and the built-in
//! function facade the VM host calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use self::{builtin::*, error::*, handler::*};

mod builtin;
mod error;
mod handler;

/// The Ethereum-to-MultiversX direction: type mapping and value attach.
pub mod eth_to_mvx;
/// The MultiversX-to-Ethereum direction: type mapping and value detach.
pub mod mvx_to_eth;
