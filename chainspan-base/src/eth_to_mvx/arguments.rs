use ethers_core::abi::ParamType;

use chainspan_core::TypeNode;
use chainspan_ethereum::{SIZE_16, SIZE_32, SIZE_64, SIZE_8};

/// Maps an Ethereum ABI descriptor onto MultiversX type nodes.
///
/// Infallible: every Ethereum type has a MultiversX counterpart. Integer
/// widths are banded up to the next native width (`uint40` rides in
/// `u64`), with everything past 64 bits becoming a big integer.
pub fn ethereum_to_multiversx_arguments(arguments: &[ParamType]) -> Vec<TypeNode> {
    arguments.iter().map(ethereum_to_multiversx_argument).collect()
}

fn ethereum_to_multiversx_argument(argument: &ParamType) -> TypeNode {
    match argument {
        ParamType::Int(size) => TypeNode::leaf(banded_signed(*size)),
        ParamType::Uint(size) => TypeNode::leaf(banded_unsigned(*size)),
        ParamType::Bool => TypeNode::leaf("bool"),
        ParamType::String => TypeNode::leaf("utf-8 string"),
        ParamType::Address => TypeNode::leaf("Address"),
        ParamType::Bytes => TypeNode::leaf("bytes"),
        ParamType::Array(elem) => {
            TypeNode::with_children("List", vec![ethereum_to_multiversx_argument(elem)])
        }
        ParamType::FixedArray(elem, size) => TypeNode::with_children(
            format!("array{size}"),
            vec![ethereum_to_multiversx_argument(elem)],
        ),
        // Fixed bytes (function selectors included) travel as fixed
        // arrays of u8.
        ParamType::FixedBytes(size) => {
            TypeNode::with_children(format!("array{size}"), vec![TypeNode::leaf("u8")])
        }
        ParamType::Tuple(elems) => TypeNode::with_children(
            "tuple",
            elems.iter().map(ethereum_to_multiversx_argument).collect(),
        ),
    }
}

fn banded_signed(size: usize) -> &'static str {
    match size {
        0..=SIZE_8 => "i8",
        0..=SIZE_16 => "i16",
        0..=SIZE_32 => "i32",
        0..=SIZE_64 => "i64",
        _ => "BigInt",
    }
}

fn banded_unsigned(size: usize) -> &'static str {
    match size {
        0..=SIZE_8 => "u8",
        0..=SIZE_16 => "u16",
        0..=SIZE_32 => "u32",
        0..=SIZE_64 => "u64",
        _ => "BigUint",
    }
}
