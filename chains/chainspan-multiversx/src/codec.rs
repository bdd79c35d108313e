use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use chainspan_core::MULTIVERSX_ADDRESS_LENGTH;

use crate::SingleValue;

/// Errors produced by the wire codec and the parts serializer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// The data ended before the value was fully read
    #[error("unexpected end of data")]
    UnexpectedEndOfData,
    /// A boolean byte other than 0 or 1
    #[error("invalid boolean value: 0x{0:02x}")]
    InvalidBool(u8),
    /// An option presence flag other than 0 or 1
    #[error("invalid option flag: 0x{0:02x}")]
    InvalidOptionFlag(u8),
    /// A top-level number wider than its declared type
    #[error("decoded value is too large for {0}")]
    NumberTooLarge(&'static str),
    /// An address of the wrong length
    #[error("invalid address length: {0}")]
    InvalidAddressLength(usize),
    /// A string value holding invalid UTF-8
    #[error("invalid utf-8 string")]
    InvalidUtf8,
    /// A fixed-size array holding the wrong number of items
    #[error("invalid array length: expected {expected}, got {actual}")]
    InvalidArrayLength {
        /// The declared arity
        expected: usize,
        /// The held item count
        actual: usize,
    },
    /// Data remained after the value was fully read
    #[error("unconsumed data: {0} bytes left")]
    UnconsumedData(usize),
    /// Fewer parts than top-level arguments
    #[error("too few parts")]
    TooFewParts,
    /// More parts than top-level arguments
    #[error("too many parts")]
    TooManyParts,
    /// A variadic or optional argument before the end of the argument list
    #[error("{0} argument must be last")]
    ArgumentNotLast(&'static str),
    /// The parts separator is empty
    #[error("empty parts separator")]
    EmptyPartsSeparator,
    /// A part in the string wire form is not valid hex
    #[error("invalid hex part")]
    InvalidHexPart,
}

/// Encodes `value` in the nested form: fixed-width integers,
/// length-prefixed dynamic data, count-prefixed lists, flag-prefixed
/// options.
pub fn encode_nested(value: &SingleValue, out: &mut Vec<u8>) -> Result<(), CodecError> {
    match value {
        SingleValue::U8(value) => out.push(*value),
        SingleValue::U16(value) => out.extend_from_slice(&value.to_be_bytes()),
        SingleValue::U32(value) => out.extend_from_slice(&value.to_be_bytes()),
        SingleValue::U64(value) => out.extend_from_slice(&value.to_be_bytes()),
        SingleValue::I8(value) => out.extend_from_slice(&value.to_be_bytes()),
        SingleValue::I16(value) => out.extend_from_slice(&value.to_be_bytes()),
        SingleValue::I32(value) => out.extend_from_slice(&value.to_be_bytes()),
        SingleValue::I64(value) => out.extend_from_slice(&value.to_be_bytes()),
        SingleValue::BigUint(value) => write_length_prefixed(&biguint_bytes(value), out),
        SingleValue::BigInt(value) => write_length_prefixed(&bigint_bytes(value), out),
        SingleValue::Bool(value) => out.push(*value as u8),
        SingleValue::Bytes(value) => write_length_prefixed(value, out),
        SingleValue::String(value) => write_length_prefixed(value.as_bytes(), out),
        SingleValue::Address(value) => {
            out.extend_from_slice(checked_address(value)?);
        }
        SingleValue::List { items, .. } => {
            out.extend_from_slice(&(items.len() as u32).to_be_bytes());
            for item in items {
                encode_nested(item, out)?;
            }
        }
        SingleValue::Array { size, items, .. } => {
            check_array_length(*size, items.len())?;
            for item in items {
                encode_nested(item, out)?;
            }
        }
        SingleValue::Struct { fields } => {
            for field in fields {
                encode_nested(field, out)?;
            }
        }
        SingleValue::Option { inner, is_set } => {
            out.push(*is_set as u8);
            if *is_set {
                encode_nested(inner, out)?;
            }
        }
    }
    Ok(())
}

/// Encodes `value` in the top-level form: minimal integers, raw dynamic
/// data, empty-or-flagged booleans and options.
pub fn encode_top_level(value: &SingleValue) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    match value {
        SingleValue::U8(value) => write_minimal_unsigned(&value.to_be_bytes(), &mut out),
        SingleValue::U16(value) => write_minimal_unsigned(&value.to_be_bytes(), &mut out),
        SingleValue::U32(value) => write_minimal_unsigned(&value.to_be_bytes(), &mut out),
        SingleValue::U64(value) => write_minimal_unsigned(&value.to_be_bytes(), &mut out),
        SingleValue::I8(value) => write_minimal_signed(*value as i64, &mut out),
        SingleValue::I16(value) => write_minimal_signed(*value as i64, &mut out),
        SingleValue::I32(value) => write_minimal_signed(*value as i64, &mut out),
        SingleValue::I64(value) => write_minimal_signed(*value, &mut out),
        SingleValue::BigUint(value) => out.extend_from_slice(&biguint_bytes(value)),
        SingleValue::BigInt(value) => out.extend_from_slice(&bigint_bytes(value)),
        SingleValue::Bool(value) => {
            if *value {
                out.push(1);
            }
        }
        SingleValue::Bytes(value) => out.extend_from_slice(value),
        SingleValue::String(value) => out.extend_from_slice(value.as_bytes()),
        SingleValue::Address(value) => out.extend_from_slice(checked_address(value)?),
        SingleValue::List { items, .. } => {
            for item in items {
                encode_nested(item, &mut out)?;
            }
        }
        SingleValue::Array { size, items, .. } => {
            check_array_length(*size, items.len())?;
            for item in items {
                encode_nested(item, &mut out)?;
            }
        }
        SingleValue::Struct { fields } => {
            for field in fields {
                encode_nested(field, &mut out)?;
            }
        }
        SingleValue::Option { inner, is_set } => {
            if *is_set {
                out.push(1);
                encode_nested(inner, &mut out)?;
            }
        }
    }
    Ok(out)
}

/// Decodes `value` from the nested form, consuming bytes off the cursor.
pub fn decode_nested(value: &mut SingleValue, data: &mut &[u8]) -> Result<(), CodecError> {
    match value {
        SingleValue::U8(value) => *value = read_bytes(data, 1)?[0],
        SingleValue::U16(value) => *value = u16::from_be_bytes(read_fixed(data)?),
        SingleValue::U32(value) => *value = u32::from_be_bytes(read_fixed(data)?),
        SingleValue::U64(value) => *value = u64::from_be_bytes(read_fixed(data)?),
        SingleValue::I8(value) => *value = i8::from_be_bytes(read_fixed(data)?),
        SingleValue::I16(value) => *value = i16::from_be_bytes(read_fixed(data)?),
        SingleValue::I32(value) => *value = i32::from_be_bytes(read_fixed(data)?),
        SingleValue::I64(value) => *value = i64::from_be_bytes(read_fixed(data)?),
        SingleValue::BigUint(value) => {
            *value = BigUint::from_bytes_be(read_length_prefixed(data)?);
        }
        SingleValue::BigInt(value) => {
            *value = BigInt::from_signed_bytes_be(read_length_prefixed(data)?);
        }
        SingleValue::Bool(value) => *value = read_bool_byte(data)?,
        SingleValue::Bytes(value) => *value = read_length_prefixed(data)?.to_vec(),
        SingleValue::String(value) => {
            *value = String::from_utf8(read_length_prefixed(data)?.to_vec())
                .map_err(|_| CodecError::InvalidUtf8)?;
        }
        SingleValue::Address(value) => {
            *value = read_bytes(data, MULTIVERSX_ADDRESS_LENGTH)?.to_vec();
        }
        SingleValue::List { prototype, items } => {
            let count = u32::from_be_bytes(read_fixed(data)?) as usize;
            // Every item occupies at least one byte, so a count beyond the
            // remaining data cannot be honest; reject it before allocating.
            if count > data.len() {
                return Err(CodecError::UnexpectedEndOfData);
            }
            *items = Vec::with_capacity(count);
            for _ in 0..count {
                let mut item = prototype.fresh();
                decode_nested(&mut item, data)?;
                items.push(item);
            }
        }
        SingleValue::Array { size, prototype, items } => {
            if *size > data.len() {
                return Err(CodecError::UnexpectedEndOfData);
            }
            *items = Vec::with_capacity(*size);
            for _ in 0..*size {
                let mut item = prototype.fresh();
                decode_nested(&mut item, data)?;
                items.push(item);
            }
        }
        SingleValue::Struct { fields } => {
            for field in fields {
                decode_nested(field, data)?;
            }
        }
        SingleValue::Option { inner, is_set } => {
            match read_bytes(data, 1)?[0] {
                0 => *is_set = false,
                1 => {
                    decode_nested(inner, data)?;
                    *is_set = true;
                }
                flag => return Err(CodecError::InvalidOptionFlag(flag)),
            }
        }
    }
    Ok(())
}

/// Decodes `value` from the top-level form; the whole part must be
/// consumed.
pub fn decode_top_level(value: &mut SingleValue, part: &[u8]) -> Result<(), CodecError> {
    match value {
        SingleValue::U8(value) => *value = read_minimal_unsigned(part, "u8")? as u8,
        SingleValue::U16(value) => *value = read_minimal_unsigned(part, "u16")? as u16,
        SingleValue::U32(value) => *value = read_minimal_unsigned(part, "u32")? as u32,
        SingleValue::U64(value) => *value = read_minimal_unsigned(part, "u64")?,
        SingleValue::I8(value) => *value = read_minimal_signed(part, "i8")? as i8,
        SingleValue::I16(value) => *value = read_minimal_signed(part, "i16")? as i16,
        SingleValue::I32(value) => *value = read_minimal_signed(part, "i32")? as i32,
        SingleValue::I64(value) => *value = read_minimal_signed(part, "i64")?,
        SingleValue::BigUint(value) => *value = BigUint::from_bytes_be(part),
        SingleValue::BigInt(value) => *value = BigInt::from_signed_bytes_be(part),
        SingleValue::Bool(value) => {
            *value = match part {
                [] => false,
                [1] => true,
                [byte, ..] => return Err(CodecError::InvalidBool(*byte)),
            };
        }
        SingleValue::Bytes(value) => *value = part.to_vec(),
        SingleValue::String(value) => {
            *value =
                String::from_utf8(part.to_vec()).map_err(|_| CodecError::InvalidUtf8)?;
        }
        SingleValue::Address(value) => {
            if part.len() != MULTIVERSX_ADDRESS_LENGTH {
                return Err(CodecError::InvalidAddressLength(part.len()));
            }
            *value = part.to_vec();
        }
        SingleValue::List { prototype, items } => {
            let cursor = &mut &part[..];
            items.clear();
            while !cursor.is_empty() {
                let mut item = prototype.fresh();
                decode_nested(&mut item, cursor)?;
                items.push(item);
            }
        }
        SingleValue::Array { .. } | SingleValue::Struct { .. } => {
            let cursor = &mut &part[..];
            decode_nested(value, cursor)?;
            if !cursor.is_empty() {
                return Err(CodecError::UnconsumedData(cursor.len()));
            }
        }
        SingleValue::Option { inner, is_set } => {
            if part.is_empty() {
                *is_set = false;
                return Ok(());
            }
            let cursor = &mut &part[..];
            match read_bytes(cursor, 1)?[0] {
                1 => {
                    decode_nested(inner, cursor)?;
                    *is_set = true;
                }
                flag => return Err(CodecError::InvalidOptionFlag(flag)),
            }
            if !cursor.is_empty() {
                return Err(CodecError::UnconsumedData(cursor.len()));
            }
        }
    }
    Ok(())
}

fn checked_address(address: &[u8]) -> Result<&[u8], CodecError> {
    if address.len() != MULTIVERSX_ADDRESS_LENGTH {
        return Err(CodecError::InvalidAddressLength(address.len()));
    }
    Ok(address)
}

fn check_array_length(expected: usize, actual: usize) -> Result<(), CodecError> {
    if expected != actual {
        return Err(CodecError::InvalidArrayLength { expected, actual });
    }
    Ok(())
}

// Big integer bytes, minimal form: unsigned magnitude / two's complement,
// empty for zero.
fn biguint_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

fn bigint_bytes(value: &BigInt) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_signed_bytes_be()
    }
}

fn write_length_prefixed(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

fn write_minimal_unsigned(bytes: &[u8], out: &mut Vec<u8>) {
    let first_significant = bytes.iter().position(|byte| *byte != 0);
    if let Some(position) = first_significant {
        out.extend_from_slice(&bytes[position..]);
    }
}

fn write_minimal_signed(value: i64, out: &mut Vec<u8>) {
    if value == 0 {
        return;
    }
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant_zero = bytes[start] == 0x00 && bytes[start + 1] < 0x80;
        let redundant_sign = bytes[start] == 0xff && bytes[start + 1] >= 0x80;
        if redundant_zero || redundant_sign {
            start += 1;
        } else {
            break;
        }
    }
    out.extend_from_slice(&bytes[start..]);
}

fn read_minimal_unsigned(part: &[u8], kind: &'static str) -> Result<u64, CodecError> {
    let width = unsigned_width(kind);
    if part.len() > width {
        return Err(CodecError::NumberTooLarge(kind));
    }
    let mut value: u64 = 0;
    for byte in part {
        value = value << 8 | u64::from(*byte);
    }
    Ok(value)
}

fn read_minimal_signed(part: &[u8], kind: &'static str) -> Result<i64, CodecError> {
    let width = signed_width(kind);
    if part.len() > width {
        return Err(CodecError::NumberTooLarge(kind));
    }
    let Some(first) = part.first() else {
        return Ok(0);
    };
    let mut value: i64 = if first & 0x80 != 0 { -1 } else { 0 };
    for byte in part {
        value = value << 8 | i64::from(*byte);
    }
    Ok(value)
}

fn unsigned_width(kind: &'static str) -> usize {
    match kind {
        "u8" => 1,
        "u16" => 2,
        "u32" => 4,
        _ => 8,
    }
}

fn signed_width(kind: &'static str) -> usize {
    match kind {
        "i8" => 1,
        "i16" => 2,
        "i32" => 4,
        _ => 8,
    }
}

fn read_bytes<'a>(data: &mut &'a [u8], length: usize) -> Result<&'a [u8], CodecError> {
    if data.len() < length {
        return Err(CodecError::UnexpectedEndOfData);
    }
    let (head, tail) = data.split_at(length);
    *data = tail;
    Ok(head)
}

fn read_fixed<const N: usize>(data: &mut &[u8]) -> Result<[u8; N], CodecError> {
    let bytes = read_bytes(data, N)?;
    bytes.try_into().map_err(|_| CodecError::UnexpectedEndOfData)
}

fn read_length_prefixed<'a>(data: &mut &'a [u8]) -> Result<&'a [u8], CodecError> {
    let length = u32::from_be_bytes(read_fixed(data)?);
    read_bytes(data, length as usize)
}

fn read_bool_byte(data: &mut &[u8]) -> Result<bool, CodecError> {
    match read_bytes(data, 1)?[0] {
        0 => Ok(false),
        1 => Ok(true),
        byte => Err(CodecError::InvalidBool(byte)),
    }
}
