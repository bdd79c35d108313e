use ethers_core::abi::ParamType;

use chainspan_core::{extract_numeric_suffix, ExpressionError, TypeNode};

use crate::{END_ARRAY, TUPLE};

/// Bit width bands of the integer types.
pub const SIZE_8: usize = 8;
/// 16-bit band.
pub const SIZE_16: usize = 16;
/// 32-bit band.
pub const SIZE_32: usize = 32;
/// 64-bit band.
pub const SIZE_64: usize = 64;
/// The width of the big integer types.
pub const SIZE_256: usize = 256;

/// Byte length of a `function` selector value (address + 4-byte selector).
pub const FUNCTION_SELECTOR_LENGTH: usize = 24;
/// Largest `bytesN` length.
pub const MAX_FIXED_BYTES_LENGTH: usize = 32;

/// Errors produced while turning parsed signatures into ABI types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EthAbiError {
    /// The type name is not part of the Ethereum ABI grammar
    #[error("invalid signature abi type provided: {0}")]
    InvalidSignatureAbiType(String),
    /// A malformed numeric suffix on an array, integer or bytes type
    #[error("{0}")]
    Expression(#[from] ExpressionError),
}

/// Builds the Ethereum ABI descriptor of a parsed signature: one
/// `ParamType` per top-level argument.
pub fn build_ethereum_abi(arguments: &[TypeNode]) -> Result<Vec<ParamType>, EthAbiError> {
    arguments.iter().map(build_param_type).collect()
}

fn build_param_type(node: &TypeNode) -> Result<ParamType, EthAbiError> {
    build_named_type(&node.name, &node.children)
}

fn build_named_type(name: &str, children: &[TypeNode]) -> Result<ParamType, EthAbiError> {
    if let Some(stripped) = name.strip_suffix(END_ARRAY) {
        return build_array_type(name, stripped, children);
    }
    match name {
        TUPLE => Ok(ParamType::Tuple(
            children.iter().map(build_param_type).collect::<Result<_, _>>()?,
        )),
        "address" => Ok(ParamType::Address),
        "bool" => Ok(ParamType::Bool),
        "string" => Ok(ParamType::String),
        "bytes" => Ok(ParamType::Bytes),
        "function" => Ok(ParamType::FixedBytes(FUNCTION_SELECTOR_LENGTH)),
        "uint" => Ok(ParamType::Uint(SIZE_256)),
        "int" => Ok(ParamType::Int(SIZE_256)),
        _ if name.starts_with("uint") => Ok(ParamType::Uint(integer_width(name, "uint")?)),
        _ if name.starts_with("int") => Ok(ParamType::Int(integer_width(name, "int")?)),
        _ if name.starts_with("bytes") => Ok(ParamType::FixedBytes(fixed_bytes_length(name)?)),
        _ => Err(EthAbiError::InvalidSignatureAbiType(name.to_owned())),
    }
}

// "uint256[2][3]" reads as an array of 3 elements of "uint256[2]": the
// outermost suffix is the rightmost one.
fn build_array_type(
    name: &str,
    stripped: &str,
    children: &[TypeNode],
) -> Result<ParamType, EthAbiError> {
    let open = stripped
        .rfind(crate::BEGIN_ARRAY)
        .ok_or_else(|| EthAbiError::InvalidSignatureAbiType(name.to_owned()))?;
    let elem = build_named_type(&stripped[..open], children)?;
    let arity = &stripped[open + 1..];
    if arity.is_empty() {
        return Ok(ParamType::Array(Box::new(elem)));
    }
    let arity: usize = arity.parse().map_err(ExpressionError::from)?;
    if arity == 0 {
        return Err(EthAbiError::InvalidSignatureAbiType(name.to_owned()));
    }
    Ok(ParamType::FixedArray(Box::new(elem), arity))
}

fn integer_width(name: &str, prefix: &str) -> Result<usize, EthAbiError> {
    let width = extract_numeric_suffix(name, prefix)?;
    if width == 0 || width > SIZE_256 || width % 8 != 0 {
        return Err(EthAbiError::InvalidSignatureAbiType(name.to_owned()));
    }
    Ok(width)
}

fn fixed_bytes_length(name: &str) -> Result<usize, EthAbiError> {
    let length = extract_numeric_suffix(name, "bytes")?;
    if length == 0 || length > MAX_FIXED_BYTES_LENGTH {
        return Err(EthAbiError::InvalidSignatureAbiType(name.to_owned()));
    }
    Ok(length)
}
