use ethers_core::abi::{ParamType, Token};
use ethers_core::types::U256;
use num_bigint::{BigInt, BigUint, Sign};

use chainspan_core::{resolve_address, AddressRequest, AddressSpace};
use chainspan_ethereum::{h160_from_bytes, zero_token};
use chainspan_multiversx::{SingleValue, TopValue};

use crate::{EncodingContext, MvxToEthError};

/// Reads the populated MultiversX argument slots back out as the value
/// list the Ethereum ABI packer expects, walking the paired descriptors
/// in lock-step.
pub fn detach_values_from_multiversx_abi(
    context: &EncodingContext<'_>,
    multiversx_abi: &[TopValue],
    ethereum_abi: &[ParamType],
) -> Result<Vec<Token>, MvxToEthError> {
    multiversx_abi
        .iter()
        .enumerate()
        .map(|(position, slot)| {
            let eth_argument = ethereum_abi
                .get(position)
                .ok_or(MvxToEthError::DetachFailed { argument: slot.kind() })?;
            detach_top_value(context, slot, eth_argument)
        })
        .collect()
}

fn detach_top_value(
    context: &EncodingContext<'_>,
    slot: &TopValue,
    eth_argument: &ParamType,
) -> Result<Token, MvxToEthError> {
    match slot {
        TopValue::Single(single) => detach_single_value(context, single, eth_argument),
        TopValue::Optional { inner, is_set } => {
            let inner_argument = conditional_inner_type("optional", eth_argument)?;
            let inner_value = if *is_set {
                detach_top_value(context, inner, inner_argument)?
            } else {
                zero_token(inner_argument)
            };
            Ok(Token::Tuple(vec![Token::Bool(*is_set), inner_value]))
        }
        TopValue::Variadic { items, .. } => {
            let ParamType::Array(elem) = eth_argument else {
                return Err(MvxToEthError::DetachFailed { argument: "variadic" });
            };
            Ok(Token::Array(
                items
                    .iter()
                    .map(|item| detach_top_value(context, item, elem))
                    .collect::<Result<_, _>>()?,
            ))
        }
        TopValue::Multi { items } => {
            let ParamType::Tuple(elems) = eth_argument else {
                return Err(MvxToEthError::DetachFailed { argument: "multi" });
            };
            if items.len() != elems.len() {
                return Err(MvxToEthError::DetachFailed { argument: "multi" });
            }
            Ok(Token::Tuple(
                items
                    .iter()
                    .zip(elems)
                    .map(|(item, elem)| detach_top_value(context, item, elem))
                    .collect::<Result<_, _>>()?,
            ))
        }
    }
}

fn detach_single_value(
    context: &EncodingContext<'_>,
    slot: &SingleValue,
    eth_argument: &ParamType,
) -> Result<Token, MvxToEthError> {
    match slot {
        SingleValue::U8(value) => Ok(Token::Uint((*value).into())),
        SingleValue::U16(value) => Ok(Token::Uint((*value).into())),
        SingleValue::U32(value) => Ok(Token::Uint((*value).into())),
        SingleValue::U64(value) => Ok(Token::Uint((*value).into())),
        SingleValue::BigUint(value) => Ok(Token::Uint(u256_from_biguint(value)?)),
        SingleValue::I8(value) => Ok(Token::Int(u256_from_i64((*value).into()))),
        SingleValue::I16(value) => Ok(Token::Int(u256_from_i64((*value).into()))),
        SingleValue::I32(value) => Ok(Token::Int(u256_from_i64((*value).into()))),
        SingleValue::I64(value) => Ok(Token::Int(u256_from_i64(*value))),
        SingleValue::BigInt(value) => Ok(Token::Int(u256_from_bigint(value)?)),
        SingleValue::Bool(value) => Ok(Token::Bool(*value)),
        SingleValue::Bytes(value) => Ok(Token::Bytes(value.clone())),
        SingleValue::String(value) => Ok(Token::String(value.clone())),
        SingleValue::Address(address) => {
            let response = resolve_address(
                context.accounts,
                AddressRequest::new(
                    address.clone(),
                    AddressSpace::MultiversX,
                    AddressSpace::Ethereum,
                    true,
                ),
            )?;
            Ok(Token::Address(h160_from_bytes(&response.requested_address)))
        }
        SingleValue::List { items, .. } => {
            let ParamType::Array(elem) = eth_argument else {
                return Err(MvxToEthError::DetachFailed { argument: "List" });
            };
            Ok(Token::Array(
                items
                    .iter()
                    .map(|item| detach_single_value(context, item, elem))
                    .collect::<Result<_, _>>()?,
            ))
        }
        SingleValue::Array { items, .. } => match eth_argument {
            ParamType::FixedArray(elem, size) => {
                if items.len() != *size {
                    return Err(MvxToEthError::InvalidValueSizeForArrayDetach);
                }
                Ok(Token::FixedArray(
                    items
                        .iter()
                        .map(|item| detach_single_value(context, item, elem))
                        .collect::<Result<_, _>>()?,
                ))
            }
            // The u8 array pairing of bytesN / function selectors folds
            // back into one byte blob.
            ParamType::FixedBytes(size) => {
                if items.len() != *size {
                    return Err(MvxToEthError::InvalidValueSizeForArrayDetach);
                }
                let bytes = items
                    .iter()
                    .map(|item| match item {
                        SingleValue::U8(byte) => Ok(*byte),
                        other => Err(MvxToEthError::DetachFailed { argument: other.kind() }),
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Token::FixedBytes(bytes))
            }
            _ => Err(MvxToEthError::DetachFailed { argument: "array" }),
        },
        SingleValue::Struct { fields } => {
            let ParamType::Tuple(elems) = eth_argument else {
                return Err(MvxToEthError::DetachFailed { argument: "tuple" });
            };
            if fields.len() != elems.len() {
                return Err(MvxToEthError::DetachFailed { argument: "tuple" });
            }
            Ok(Token::Tuple(
                fields
                    .iter()
                    .zip(elems)
                    .map(|(field, elem)| detach_single_value(context, field, elem))
                    .collect::<Result<_, _>>()?,
            ))
        }
        SingleValue::Option { inner, is_set } => {
            let inner_argument = conditional_inner_type("Option", eth_argument)?;
            let inner_value = if *is_set {
                detach_single_value(context, inner, inner_argument)?
            } else {
                zero_token(inner_argument)
            };
            Ok(Token::Tuple(vec![Token::Bool(*is_set), inner_value]))
        }
    }
}

fn conditional_inner_type<'a>(
    kind: &'static str,
    eth_argument: &'a ParamType,
) -> Result<&'a ParamType, MvxToEthError> {
    match eth_argument {
        ParamType::Tuple(elems) if elems.len() == 2 => Ok(&elems[1]),
        _ => Err(MvxToEthError::DetachFailed { argument: kind }),
    }
}

fn u256_from_biguint(value: &BigUint) -> Result<U256, MvxToEthError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(MvxToEthError::DetachFailed { argument: "BigUint" });
    }
    Ok(U256::from_big_endian(&bytes))
}

// 256-bit two's complement, sign-extended from the minimal form.
fn u256_from_bigint(value: &BigInt) -> Result<U256, MvxToEthError> {
    let bytes = value.to_signed_bytes_be();
    if bytes.len() > 32 {
        return Err(MvxToEthError::DetachFailed { argument: "BigInt" });
    }
    let filler = if value.sign() == Sign::Minus { 0xff } else { 0x00 };
    let mut buffer = [filler; 32];
    buffer[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(U256::from_big_endian(&buffer))
}

fn u256_from_i64(value: i64) -> U256 {
    if value >= 0 {
        U256::from(value as u64)
    } else {
        U256::MAX - U256::from(-(value + 1) as u64)
    }
}
