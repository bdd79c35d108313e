use ethers_core::abi::{ParamType, Token};
use ethers_core::types::U256;
use num_bigint::{BigInt, BigUint};

use chainspan_core::{resolve_address, AddressRequest, AddressSpace};
use chainspan_ethereum::token_tag;
use chainspan_multiversx::{SingleValue, TopValue};

use crate::{EncodingContext, EthToMvxError};

/// Populates the MultiversX argument slots with the values decoded from
/// an Ethereum-encoded blob, walking the paired descriptors in lock-step.
pub fn attach_values_to_multiversx_abi(
    context: &EncodingContext<'_>,
    multiversx_abi: &mut [TopValue],
    ethereum_abi: &[ParamType],
    values: Vec<Token>,
) -> Result<(), EthToMvxError> {
    if multiversx_abi.len() != values.len() || multiversx_abi.len() != ethereum_abi.len() {
        return Err(EthToMvxError::InvalidValuesSizeForAttach);
    }
    for ((slot, eth_argument), value) in multiversx_abi.iter_mut().zip(ethereum_abi).zip(values) {
        attach_top_value(context, slot, eth_argument, value)?;
    }
    Ok(())
}

fn attach_top_value(
    context: &EncodingContext<'_>,
    slot: &mut TopValue,
    eth_argument: &ParamType,
    value: Token,
) -> Result<(), EthToMvxError> {
    match (slot, value) {
        (TopValue::Single(single), value) => attach_single_value(context, single, eth_argument, value),
        (TopValue::Optional { inner, is_set }, Token::Tuple(values)) => {
            let (marker, inner_value) = split_conditional_tuple("optional", values)?;
            let inner_argument = conditional_inner_type("optional", eth_argument)?;
            attach_top_value(context, inner, inner_argument, inner_value)?;
            *is_set = marker;
            Ok(())
        }
        (TopValue::Variadic { prototype, items }, Token::Array(values)) => {
            let ParamType::Array(elem) = eth_argument else {
                return Err(attach_failed("variadic", &Token::Array(values)));
            };
            *items = values
                .into_iter()
                .map(|value| {
                    let mut item = prototype.fresh();
                    attach_top_value(context, &mut item, elem, value)?;
                    Ok(item)
                })
                .collect::<Result<_, EthToMvxError>>()?;
            Ok(())
        }
        (TopValue::Multi { items }, Token::Tuple(values)) => {
            let ParamType::Tuple(elems) = eth_argument else {
                return Err(attach_failed("multi", &Token::Tuple(values)));
            };
            if items.len() != values.len() || items.len() != elems.len() {
                return Err(attach_failed("multi", &Token::Tuple(values)));
            }
            for ((item, elem), value) in items.iter_mut().zip(elems).zip(values) {
                attach_top_value(context, item, elem, value)?;
            }
            Ok(())
        }
        (slot, value) => Err(attach_failed(slot.kind(), &value)),
    }
}

fn attach_single_value(
    context: &EncodingContext<'_>,
    slot: &mut SingleValue,
    eth_argument: &ParamType,
    value: Token,
) -> Result<(), EthToMvxError> {
    match (slot, value) {
        (SingleValue::U8(slot), Token::Uint(raw)) => *slot = raw.low_u64() as u8,
        (SingleValue::U16(slot), Token::Uint(raw)) => *slot = raw.low_u64() as u16,
        (SingleValue::U32(slot), Token::Uint(raw)) => *slot = raw.low_u64() as u32,
        (SingleValue::U64(slot), Token::Uint(raw)) => *slot = raw.low_u64(),
        (SingleValue::BigUint(slot), Token::Uint(raw)) => *slot = biguint_from_u256(raw),
        (SingleValue::I8(slot), Token::Int(raw)) => *slot = raw.low_u64() as i8,
        (SingleValue::I16(slot), Token::Int(raw)) => *slot = raw.low_u64() as i16,
        (SingleValue::I32(slot), Token::Int(raw)) => *slot = raw.low_u64() as i32,
        (SingleValue::I64(slot), Token::Int(raw)) => *slot = raw.low_u64() as i64,
        (SingleValue::BigInt(slot), Token::Int(raw)) => *slot = bigint_from_u256(raw),
        (SingleValue::Bool(slot), Token::Bool(value)) => *slot = value,
        (SingleValue::Bytes(slot), Token::Bytes(value)) => *slot = value,
        (SingleValue::String(slot), Token::String(value)) => *slot = value,
        (SingleValue::Address(slot), Token::Address(address)) => {
            let response = resolve_address(
                context.accounts,
                AddressRequest::new(
                    address.as_bytes().to_vec(),
                    AddressSpace::Ethereum,
                    AddressSpace::MultiversX,
                    true,
                ),
            )?;
            *slot = response.requested_address;
        }
        (SingleValue::List { prototype, items }, Token::Array(values)) => {
            let ParamType::Array(elem) = eth_argument else {
                return Err(attach_failed("List", &Token::Array(values)));
            };
            *items = attach_items(context, prototype, elem, values)?;
        }
        (SingleValue::Array { size, prototype, items }, Token::FixedArray(values)) => {
            let ParamType::FixedArray(elem, _) = eth_argument else {
                return Err(attach_failed("array", &Token::FixedArray(values)));
            };
            if values.len() != *size {
                return Err(EthToMvxError::InvalidValueSizeForArrayAttach);
            }
            *items = attach_items(context, prototype, elem, values)?;
        }
        // Fixed bytes and function selectors arrive as one byte blob; the
        // paired slot is an array of u8.
        (SingleValue::Array { size, prototype, items }, Token::FixedBytes(bytes)) => {
            if bytes.len() != *size {
                return Err(EthToMvxError::InvalidValueSizeForArrayAttach);
            }
            let byte_values = bytes.into_iter().map(|byte| Token::Uint(byte.into())).collect();
            *items = attach_items(context, prototype, &ParamType::Uint(8), byte_values)?;
        }
        (SingleValue::Struct { fields }, Token::Tuple(values)) => {
            let ParamType::Tuple(elems) = eth_argument else {
                return Err(attach_failed("tuple", &Token::Tuple(values)));
            };
            if fields.len() != values.len() || fields.len() != elems.len() {
                return Err(attach_failed("tuple", &Token::Tuple(values)));
            }
            for ((field, elem), value) in fields.iter_mut().zip(elems).zip(values) {
                attach_single_value(context, field, elem, value)?;
            }
        }
        (SingleValue::Option { inner, is_set }, Token::Tuple(values)) => {
            let (marker, inner_value) = split_conditional_tuple("Option", values)?;
            let inner_argument = conditional_inner_type("Option", eth_argument)?;
            attach_single_value(context, inner, inner_argument, inner_value)?;
            *is_set = marker;
        }
        (slot, value) => return Err(attach_failed(slot.kind(), &value)),
    }
    Ok(())
}

fn attach_items(
    context: &EncodingContext<'_>,
    prototype: &SingleValue,
    elem: &ParamType,
    values: Vec<Token>,
) -> Result<Vec<SingleValue>, EthToMvxError> {
    values
        .into_iter()
        .map(|value| {
            let mut item = prototype.fresh();
            attach_single_value(context, &mut item, elem, value)?;
            Ok(item)
        })
        .collect()
}

// An option crosses the chain boundary as a (present, value) pair.
fn split_conditional_tuple(
    kind: &'static str,
    values: Vec<Token>,
) -> Result<(bool, Token), EthToMvxError> {
    let mut values = values.into_iter();
    match (values.next(), values.next(), values.next()) {
        (Some(Token::Bool(marker)), Some(inner_value), None) => Ok((marker, inner_value)),
        _ => Err(EthToMvxError::AttachFailed {
            argument: kind,
            value: "tuple",
        }),
    }
}

fn conditional_inner_type<'a>(
    kind: &'static str,
    eth_argument: &'a ParamType,
) -> Result<&'a ParamType, EthToMvxError> {
    match eth_argument {
        ParamType::Tuple(elems) if elems.len() == 2 => Ok(&elems[1]),
        _ => Err(EthToMvxError::AttachFailed {
            argument: kind,
            value: "tuple",
        }),
    }
}

fn attach_failed(argument: &'static str, value: &Token) -> EthToMvxError {
    EthToMvxError::AttachFailed {
        argument,
        value: token_tag(value),
    }
}

fn biguint_from_u256(raw: U256) -> BigUint {
    let mut buffer = [0u8; 32];
    raw.to_big_endian(&mut buffer);
    BigUint::from_bytes_be(&buffer)
}

// 256-bit two's complement.
fn bigint_from_u256(raw: U256) -> BigInt {
    let mut buffer = [0u8; 32];
    raw.to_big_endian(&mut buffer);
    BigInt::from_signed_bytes_be(&buffer)
}

#[cfg(test)]
mod test {
    use super::*;
    use chainspan_multiversx::build_multiversx_abi;
    use chainspan_multiversx::parse_multiversx_signature;
    use chainspan_test::TestAccountAdapter;
    use ethers_core::types::H160;

    fn attach(
        signature: &str,
        ethereum_abi: &[ParamType],
        values: Vec<Token>,
    ) -> Result<Vec<TopValue>, EthToMvxError> {
        let nodes = parse_multiversx_signature(signature).unwrap();
        let mut slots = build_multiversx_abi(&nodes).unwrap();
        let accounts = TestAccountAdapter::default();
        let context = EncodingContext { accounts: &accounts };
        attach_values_to_multiversx_abi(&context, &mut slots, ethereum_abi, values)?;
        Ok(slots)
    }

    #[test]
    fn attaches_the_full_kind_matrix() {
        let signature = "u8,u16,u32,u64,BigUint,i8,i16,i32,i64,BigInt,bool,bytes,Address,\
             utf-8 string,List<utf-8 string>,array2<utf-8 string>,tuple<u8>,Option<u8>,\
             optional<u8>,variadic<utf-8 string>,multi<u8,utf-8 string>";
        let ethereum_abi = vec![
            ParamType::Uint(8),
            ParamType::Uint(16),
            ParamType::Uint(32),
            ParamType::Uint(64),
            ParamType::Uint(256),
            ParamType::Int(8),
            ParamType::Int(16),
            ParamType::Int(32),
            ParamType::Int(64),
            ParamType::Int(256),
            ParamType::Bool,
            ParamType::Bytes,
            ParamType::Address,
            ParamType::String,
            ParamType::Array(Box::new(ParamType::String)),
            ParamType::FixedArray(Box::new(ParamType::String), 2),
            ParamType::Tuple(vec![ParamType::Uint(8)]),
            ParamType::Tuple(vec![ParamType::Bool, ParamType::Uint(8)]),
            ParamType::Tuple(vec![ParamType::Bool, ParamType::Uint(8)]),
            ParamType::Array(Box::new(ParamType::String)),
            ParamType::Tuple(vec![ParamType::Uint(8), ParamType::String]),
        ];
        let values = vec![
            Token::Uint(1u8.into()),
            Token::Uint(2u8.into()),
            Token::Uint(3u8.into()),
            Token::Uint(4u8.into()),
            Token::Uint(5u8.into()),
            Token::Int(6u8.into()),
            Token::Int(7u8.into()),
            Token::Int(8u8.into()),
            Token::Int(9u8.into()),
            Token::Int(10u8.into()),
            Token::Bool(true),
            Token::Bytes(vec![0x11, 0x12]),
            Token::Address(H160::from_low_u64_be(0x1314)),
            Token::String("arg15".to_owned()),
            Token::Array(vec![
                Token::String("arg16".to_owned()),
                Token::String("arg17".to_owned()),
            ]),
            Token::FixedArray(vec![
                Token::String("arg18".to_owned()),
                Token::String("arg19".to_owned()),
            ]),
            Token::Tuple(vec![Token::Uint(20u8.into())]),
            Token::Tuple(vec![Token::Bool(false), Token::Uint(21u8.into())]),
            Token::Tuple(vec![Token::Bool(true), Token::Uint(22u8.into())]),
            Token::Array(vec![
                Token::String("arg23".to_owned()),
                Token::String("arg24".to_owned()),
                Token::String("arg25".to_owned()),
            ]),
            Token::Tuple(vec![Token::Uint(26u8.into()), Token::String("arg27".to_owned())]),
        ];

        let slots = attach(signature, &ethereum_abi, values).unwrap();

        assert_eq!(slots[0], TopValue::Single(SingleValue::U8(1)));
        assert_eq!(
            slots[4],
            TopValue::Single(SingleValue::BigUint(BigUint::from(5u8)))
        );
        assert_eq!(slots[10], TopValue::Single(SingleValue::Bool(true)));
        match &slots[12] {
            TopValue::Single(SingleValue::Address(address)) => {
                assert_eq!(address.len(), 32);
                assert_eq!(address[30..], [0x13, 0x14]);
            }
            other => panic!("unexpected slot: {other:?}"),
        }
        match &slots[17] {
            TopValue::Single(SingleValue::Option { is_set, .. }) => assert!(!is_set),
            other => panic!("unexpected slot: {other:?}"),
        }
        match &slots[18] {
            TopValue::Optional { is_set, inner } => {
                assert!(*is_set);
                assert_eq!(**inner, TopValue::Single(SingleValue::U8(22)));
            }
            other => panic!("unexpected slot: {other:?}"),
        }
        match &slots[19] {
            TopValue::Variadic { items, .. } => assert_eq!(items.len(), 3),
            other => panic!("unexpected slot: {other:?}"),
        }
    }

    #[test]
    fn narrows_banded_integers() {
        let slots = attach(
            "u64,i64",
            &[ParamType::Uint(40), ParamType::Int(56)],
            vec![Token::Uint(0x12_3456u64.into()), Token::Int(u256_of(-5))],
        )
        .unwrap();
        assert_eq!(slots[0], TopValue::Single(SingleValue::U64(0x12_3456)));
        assert_eq!(slots[1], TopValue::Single(SingleValue::I64(-5)));
    }

    fn u256_of(value: i64) -> U256 {
        if value >= 0 {
            U256::from(value as u64)
        } else {
            U256::MAX - U256::from(-(value + 1) as u64)
        }
    }

    #[test]
    fn rejects_top_level_size_mismatches() {
        let result = attach("u8,u16", &[ParamType::Uint(8)], vec![Token::Uint(1u8.into())]);
        assert!(matches!(
            result,
            Err(EthToMvxError::InvalidValuesSizeForAttach)
        ));
    }

    #[test]
    fn rejects_array_arity_mismatches() {
        let result = attach(
            "array3<u8>",
            &[ParamType::FixedArray(Box::new(ParamType::Uint(8)), 2)],
            vec![Token::FixedArray(vec![
                Token::Uint(1u8.into()),
                Token::Uint(2u8.into()),
            ])],
        );
        assert!(matches!(
            result,
            Err(EthToMvxError::InvalidValueSizeForArrayAttach)
        ));
    }

    #[test]
    fn shape_mismatches_become_attach_failures() {
        let result = attach("bool", &[ParamType::Uint(8)], vec![Token::Uint(1u8.into())]);
        match result {
            Err(EthToMvxError::AttachFailed { argument, value }) => {
                assert_eq!(argument, "bool");
                assert_eq!(value, "uint");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
