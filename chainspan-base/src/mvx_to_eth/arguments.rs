use chainspan_core::TypeNode;
use chainspan_ethereum::{BEGIN_ARRAY, END_ARRAY, TUPLE};
use chainspan_multiversx::{extract_array_size, ARRAY};

use crate::MvxToEthError;

/// Maps MultiversX type nodes onto Ethereum type nodes.
///
/// Lists and variadics flatten into dynamic arrays, tuples and multis
/// into Ethereum tuples; options expand into a `(bool,T)` pair whose
/// first slot marks presence.
pub fn multiversx_to_ethereum_arguments(
    arguments: &[TypeNode],
) -> Result<Vec<TypeNode>, MvxToEthError> {
    arguments.iter().map(multiversx_to_ethereum_argument).collect()
}

fn multiversx_to_ethereum_argument(argument: &TypeNode) -> Result<TypeNode, MvxToEthError> {
    if argument.name.starts_with(ARRAY) {
        return sized_array_argument(argument);
    }
    if argument.name.starts_with(TUPLE) {
        return tuple_argument(&argument.children);
    }
    match argument.name.as_str() {
        "u8" => Ok(TypeNode::leaf("uint8")),
        "u16" => Ok(TypeNode::leaf("uint16")),
        "u32" => Ok(TypeNode::leaf("uint32")),
        "u64" => Ok(TypeNode::leaf("uint64")),
        "BigUint" => Ok(TypeNode::leaf("uint256")),
        "i8" => Ok(TypeNode::leaf("int8")),
        "i16" => Ok(TypeNode::leaf("int16")),
        "i32" => Ok(TypeNode::leaf("int32")),
        "i64" => Ok(TypeNode::leaf("int64")),
        "BigInt" => Ok(TypeNode::leaf("int256")),
        "bool" => Ok(TypeNode::leaf("bool")),
        "bytes" | "TokenIdentifier" => Ok(TypeNode::leaf("bytes")),
        "Address" => Ok(TypeNode::leaf("address")),
        "utf-8 string" => Ok(TypeNode::leaf("string")),
        "List" | "variadic" | "Variadic" => dynamic_array_argument(argument),
        "Option" | "optional" | "Optional" => conditional_argument(argument),
        "multi" | "Multi" => tuple_argument(&argument.children),
        other => Err(MvxToEthError::UnhandledAbiType(other.to_owned())),
    }
}

fn dynamic_array_argument(argument: &TypeNode) -> Result<TypeNode, MvxToEthError> {
    let nested = multiversx_to_ethereum_argument(argument.single_child()?)?;
    Ok(TypeNode::with_children(
        format!("{}{BEGIN_ARRAY}{END_ARRAY}", nested.name),
        nested.children,
    ))
}

fn sized_array_argument(argument: &TypeNode) -> Result<TypeNode, MvxToEthError> {
    let size = extract_array_size(&argument.name)?;
    let nested = multiversx_to_ethereum_argument(argument.single_child()?)?;
    Ok(TypeNode::with_children(
        format!("{}{BEGIN_ARRAY}{size}{END_ARRAY}", nested.name),
        nested.children,
    ))
}

fn tuple_argument(children: &[TypeNode]) -> Result<TypeNode, MvxToEthError> {
    Ok(TypeNode::with_children(
        TUPLE,
        children
            .iter()
            .map(multiversx_to_ethereum_argument)
            .collect::<Result<_, _>>()?,
    ))
}

// Option<T> has no Ethereum counterpart; it crosses as (bool, T').
fn conditional_argument(argument: &TypeNode) -> Result<TypeNode, MvxToEthError> {
    let nested = argument.single_child()?;
    tuple_argument(&[TypeNode::leaf("bool"), nested.clone()])
}

#[cfg(test)]
mod test {
    use super::*;
    use chainspan_multiversx::parse_multiversx_signature;

    fn map(signature: &str) -> Vec<TypeNode> {
        let nodes = parse_multiversx_signature(signature).unwrap();
        multiversx_to_ethereum_arguments(&nodes).unwrap()
    }

    #[test]
    fn maps_scalars_by_width() {
        let mapped = map("u8,u64,BigUint,i32,BigInt,bool,bytes,TokenIdentifier,Address,utf-8 string");
        let names: Vec<_> = mapped.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(
            names,
            ["uint8", "uint64", "uint256", "int32", "int256", "bool", "bytes", "bytes", "address", "string"]
        );
    }

    #[test]
    fn flattens_sequences_into_array_suffixes() {
        let mapped = map("List<BigInt>,variadic<List<BigInt>>,array3<u8>,array2<tuple<u64,i32>>");
        assert_eq!(mapped[0].name, "int256[]");
        assert_eq!(mapped[1].name, "int256[][]");
        assert_eq!(mapped[2].name, "uint8[3]");
        assert_eq!(mapped[3].name, "tuple[2]");
        assert_eq!(mapped[3].children.len(), 2);
    }

    #[test]
    fn expands_options_into_presence_pairs() {
        let mapped = map("Option<tuple<List<BigInt>,TokenIdentifier,bool>>,optional<List<BigInt>>");

        assert_eq!(mapped[0].name, "tuple");
        assert_eq!(mapped[0].children[0].name, "bool");
        assert_eq!(mapped[0].children[1].name, "tuple");
        assert_eq!(
            mapped[0].children[1]
                .children
                .iter()
                .map(|node| node.name.as_str())
                .collect::<Vec<_>>(),
            ["int256[]", "bytes", "bool"]
        );

        assert_eq!(mapped[1].name, "tuple");
        assert_eq!(mapped[1].children[1].name, "int256[]");
    }

    #[test]
    fn maps_multi_like_a_tuple() {
        let mapped = map("multi<List<BigInt>,BigUint>");
        assert_eq!(mapped[0].name, "tuple");
        assert_eq!(mapped[0].children[0].name, "int256[]");
        assert_eq!(mapped[0].children[1].name, "uint256");
    }

    #[test]
    fn unknown_types_are_typed_errors() {
        let nodes = parse_multiversx_signature("arg0").unwrap();
        assert!(matches!(
            multiversx_to_ethereum_arguments(&nodes),
            Err(MvxToEthError::UnhandledAbiType(name)) if name == "arg0"
        ));
    }
}
