use chainspan_core::{ExpressionError, TypeNode};

use crate::{extract_array_size, SingleValue, TopValue, ARRAY, TUPLE};

/// Errors produced while turning parsed signatures into argument slots.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MvxAbiError {
    /// The type name is not part of the MultiversX ABI grammar
    #[error("invalid signature abi type provided: {0}")]
    InvalidSignatureAbiType(String),
    /// A nested-argument or arity violation
    #[error("{0}")]
    Expression(#[from] ExpressionError),
}

/// Builds the MultiversX ABI descriptor of a parsed signature: one empty
/// argument slot per top-level type node, ready to be populated.
pub fn build_multiversx_abi(arguments: &[TypeNode]) -> Result<Vec<TopValue>, MvxAbiError> {
    arguments.iter().map(build_top_value).collect()
}

fn build_top_value(argument: &TypeNode) -> Result<TopValue, MvxAbiError> {
    match argument.name.as_str() {
        "variadic" | "Variadic" => Ok(TopValue::Variadic {
            prototype: Box::new(build_top_value(argument.single_child()?)?),
            items: Vec::new(),
        }),
        "optional" | "Optional" => Ok(TopValue::Optional {
            inner: Box::new(build_top_value(argument.single_child()?)?),
            is_set: false,
        }),
        "multi" | "Multi" => Ok(TopValue::Multi {
            items: argument
                .children
                .iter()
                .map(build_top_value)
                .collect::<Result<_, _>>()?,
        }),
        _ => Ok(TopValue::Single(build_single_value(argument)?)),
    }
}

fn build_single_value(argument: &TypeNode) -> Result<SingleValue, MvxAbiError> {
    if argument.name.starts_with(ARRAY) {
        let size = extract_array_size(&argument.name)?;
        if size == 0 {
            return Err(MvxAbiError::InvalidSignatureAbiType(argument.name.clone()));
        }
        return Ok(SingleValue::Array {
            size,
            prototype: Box::new(build_single_value(argument.single_child()?)?),
            items: Vec::new(),
        });
    }
    if argument.name.starts_with(TUPLE) {
        return Ok(SingleValue::Struct {
            fields: argument
                .children
                .iter()
                .map(build_single_value)
                .collect::<Result<_, _>>()?,
        });
    }
    match argument.name.as_str() {
        "u8" => Ok(SingleValue::U8(0)),
        "u16" => Ok(SingleValue::U16(0)),
        "u32" => Ok(SingleValue::U32(0)),
        "u64" => Ok(SingleValue::U64(0)),
        "BigUint" => Ok(SingleValue::BigUint(Default::default())),
        "i8" => Ok(SingleValue::I8(0)),
        "i16" => Ok(SingleValue::I16(0)),
        "i32" => Ok(SingleValue::I32(0)),
        "i64" => Ok(SingleValue::I64(0)),
        "BigInt" => Ok(SingleValue::BigInt(Default::default())),
        "bool" => Ok(SingleValue::Bool(false)),
        "bytes" | "TokenIdentifier" => Ok(SingleValue::Bytes(Vec::new())),
        "Address" => Ok(SingleValue::Address(Vec::new())),
        "utf-8 string" => Ok(SingleValue::String(String::new())),
        "List" => Ok(SingleValue::List {
            prototype: Box::new(build_single_value(argument.single_child()?)?),
            items: Vec::new(),
        }),
        "Option" => Ok(SingleValue::Option {
            inner: Box::new(build_single_value(argument.single_child()?)?),
            is_set: false,
        }),
        other => Err(MvxAbiError::InvalidSignatureAbiType(other.to_owned())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse_multiversx_signature;

    #[test]
    fn builds_slots_for_every_kind() {
        let nodes = parse_multiversx_signature(
            "u8,BigUint,i64,bool,bytes,TokenIdentifier,Address,utf-8 string,\
             List<u32>,array3<u8>,tuple<u64,i32>,Option<bool>,\
             optional<List<BigInt>>,variadic<bytes>,multi<u8,utf-8 string>",
        )
        .unwrap();
        let abi = build_multiversx_abi(&nodes).unwrap();
        assert_eq!(abi.len(), nodes.len());

        assert_eq!(abi[0], TopValue::Single(SingleValue::U8(0)));
        assert_eq!(abi[5], TopValue::Single(SingleValue::Bytes(Vec::new())));
        match &abi[9] {
            TopValue::Single(SingleValue::Array { size, prototype, items }) => {
                assert_eq!(*size, 3);
                assert_eq!(prototype.kind(), "u8");
                assert!(items.is_empty());
            }
            other => panic!("unexpected slot: {other:?}"),
        }
        match &abi[12] {
            TopValue::Optional { inner, is_set } => {
                assert!(!is_set);
                assert_eq!(inner.kind(), "List");
            }
            other => panic!("unexpected slot: {other:?}"),
        }
        match &abi[14] {
            TopValue::Multi { items } => assert_eq!(items.len(), 2),
            other => panic!("unexpected slot: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_types() {
        let nodes = parse_multiversx_signature("arg0").unwrap();
        assert_eq!(
            build_multiversx_abi(&nodes),
            Err(MvxAbiError::InvalidSignatureAbiType("arg0".to_owned()))
        );

        let nodes = parse_multiversx_signature("array0<u8>").unwrap();
        assert_eq!(
            build_multiversx_abi(&nodes),
            Err(MvxAbiError::InvalidSignatureAbiType("array0".to_owned()))
        );
    }

    #[test]
    fn parameterized_types_require_one_parameter() {
        let nodes = parse_multiversx_signature("List<u8,u16>").unwrap();
        assert_eq!(
            build_multiversx_abi(&nodes),
            Err(ExpressionError::ExpectedOneNestedArgument.into())
        );
    }
}
