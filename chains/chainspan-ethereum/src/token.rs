use ethers_core::abi::{ParamType, Token};
use ethers_core::types::{H160, U256};

use chainspan_core::ETHEREUM_ADDRESS_LENGTH;

/// Builds a zero-valued token of the given type. Used to fill the value
/// side of an absent option: the presence flag tells consumers to ignore
/// it, but the ABI packer still needs a shape-correct value.
pub fn zero_token(param: &ParamType) -> Token {
    match param {
        ParamType::Address => Token::Address(H160::zero()),
        ParamType::Bytes => Token::Bytes(Vec::new()),
        ParamType::Int(_) => Token::Int(U256::zero()),
        ParamType::Uint(_) => Token::Uint(U256::zero()),
        ParamType::Bool => Token::Bool(false),
        ParamType::String => Token::String(String::new()),
        ParamType::Array(_) => Token::Array(Vec::new()),
        ParamType::FixedBytes(length) => Token::FixedBytes(vec![0; *length]),
        ParamType::FixedArray(elem, length) => {
            Token::FixedArray(vec![zero_token(elem); *length])
        }
        ParamType::Tuple(elems) => Token::Tuple(elems.iter().map(zero_token).collect()),
    }
}

/// Coerces raw bytes into an Ethereum address: longer inputs keep their
/// last 20 bytes, shorter inputs are left-padded with zeros.
pub fn h160_from_bytes(bytes: &[u8]) -> H160 {
    let mut address = H160::zero();
    if bytes.len() >= ETHEREUM_ADDRESS_LENGTH {
        address.assign_from_slice(&bytes[bytes.len() - ETHEREUM_ADDRESS_LENGTH..]);
    } else {
        address.as_bytes_mut()[ETHEREUM_ADDRESS_LENGTH - bytes.len()..].copy_from_slice(bytes);
    }
    address
}

/// A short tag naming a token's shape, for error reporting.
pub fn token_tag(token: &Token) -> &'static str {
    match token {
        Token::Address(_) => "address",
        Token::FixedBytes(_) => "fixed bytes",
        Token::Bytes(_) => "bytes",
        Token::Int(_) => "int",
        Token::Uint(_) => "uint",
        Token::Bool(_) => "bool",
        Token::String(_) => "string",
        Token::FixedArray(_) => "fixed array",
        Token::Array(_) => "array",
        Token::Tuple(_) => "tuple",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_tokens_match_their_types() {
        assert_eq!(zero_token(&ParamType::Uint(64)), Token::Uint(U256::zero()));
        assert_eq!(zero_token(&ParamType::FixedBytes(3)), Token::FixedBytes(vec![0; 3]));
        assert_eq!(
            zero_token(&ParamType::Tuple(vec![ParamType::Bool, ParamType::String])),
            Token::Tuple(vec![Token::Bool(false), Token::String(String::new())])
        );
        assert_eq!(
            zero_token(&ParamType::FixedArray(Box::new(ParamType::Uint(8)), 2)),
            Token::FixedArray(vec![Token::Uint(U256::zero()); 2])
        );
    }

    #[test]
    fn coerces_addresses_from_either_length() {
        let long = (0u8..32).collect::<Vec<_>>();
        assert_eq!(h160_from_bytes(&long).as_bytes(), &long[12..]);

        let short = [0x13, 0x14];
        let address = h160_from_bytes(&short);
        assert_eq!(&address.as_bytes()[18..], &short);
        assert!(address.as_bytes()[..18].iter().all(|byte| *byte == 0));
    }
}
