//! Deterministic stubs and shared fixtures for the encoding test suites.

#![forbid(unsafe_code)]

use std::sync::Mutex;

use chainspan_core::{
    validate_address_request, validate_alias_save_request, AccountAdapter, AccountError,
    AddressError, AddressRequest, AddressResponse, AddressSpace, AliasSaveRequest,
    ETHEREUM_ADDRESS_LENGTH, MULTIVERSX_ADDRESS_LENGTH,
};

/// The full-width Ethereum-grammar signature exercised across the suites.
pub const ETH_COMPLEX_SIGNATURE: &str = "function,address,uint56,bytes24,bool,(uint256,uint256),(uint256[],bool,bytes,address),address[],string,uint256[],bytes[],bool[],(uint256,int256)[],(uint256[],bool,bytes,address)[],uint256[2][3],(uint256[2],uint256[3])[],(uint256,bytes,bool,address)[3][2],(uint256,bytes,bool,(address,uint256)[]),(uint256,bytes,bool,(address,uint256)[])[2]";

/// A full-width MultiversX-grammar signature ending in a trailing optional.
pub const MVX_COMPLEX_SIGNATURE_1: &str = "Address,BigInt,bytes,bool,tuple<u64,i32>,tuple<List<u64>,bool,utf-8 string,Address>,List<Address>,List<BigInt>,List<bytes>,List<bool>,List<tuple<u64,i32>>,List<tuple<List<u64>,bool,utf-8 string,Address>>,array3<array2<BigInt>>,List<tuple<array2<u64>,array3<i32>>>,array2<array3<tuple<u64,bytes,bool>>>,tuple<u64,bytes,bool,List<tuple<Address,BigInt>>>,array2<tuple<u64,bytes,bool,List<tuple<Address,BigInt>>>>,Option<tuple<List<BigInt>,TokenIdentifier,bool>>,Option<tuple<List<BigInt>,TokenIdentifier,bool>>,optional<List<BigInt>>";

/// A full-width MultiversX-grammar signature ending in a trailing variadic.
pub const MVX_COMPLEX_SIGNATURE_2: &str = "Address,BigInt,bytes,bool,tuple<u64,i32>,tuple<List<u64>,bool,utf-8 string,Address>,List<Address>,List<BigInt>,List<bytes>,List<bool>,List<tuple<u64,i32>>,List<tuple<List<u64>,bool,utf-8 string,Address>>,array3<array2<BigInt>>,List<tuple<array2<u64>,array3<i32>>>,array2<array3<tuple<u64,bytes,bool>>>,tuple<u64,bytes,bool,List<tuple<Address,BigInt>>>,array2<tuple<u64,bytes,bool,List<tuple<Address,BigInt>>>>,Option<tuple<List<BigInt>,TokenIdentifier,bool>>,variadic<List<BigInt>>";

/// A full-width MultiversX-grammar signature ending in a trailing multi.
pub const MVX_COMPLEX_SIGNATURE_3: &str = "u8,u16,u32,i8,i16,i64,Address,BigInt,bytes,bool,tuple<u64,i32>,tuple<List<u64>,bool,utf-8 string,Address>,List<Address>,List<BigInt>,List<bytes>,List<bool>,List<tuple<u64,i32>>,List<tuple<List<u64>,bool,utf-8 string,Address>>,array3<array2<BigInt>>,List<tuple<array2<u64>,array3<i32>>>,array2<array3<tuple<u64,bytes,bool>>>,tuple<u64,bytes,bool,List<tuple<Address,BigInt>>>,array2<tuple<u64,bytes,bool,List<tuple<Address,BigInt>>>>,Option<tuple<List<BigInt>,TokenIdentifier,bool>>,multi<List<BigInt>,BigUint>";

/// A deterministic in-memory account registry: the Ethereum alias of a
/// MultiversX address is its last 20 bytes, and the MultiversX form of an
/// Ethereum address prepends 12 zero bytes. Saved aliases are recorded
/// for inspection.
#[derive(Debug, Default)]
pub struct TestAccountAdapter {
    saved_aliases: Mutex<Vec<AliasSaveRequest>>,
}

impl TestAccountAdapter {
    /// The alias save requests recorded so far.
    pub fn saved_aliases(&self) -> Vec<AliasSaveRequest> {
        self.saved_aliases.lock().expect("alias lock poisoned").clone()
    }
}

impl AccountAdapter for TestAccountAdapter {
    fn request_address(&self, request: &AddressRequest) -> Result<AddressResponse, AccountError> {
        validate_address_request(request)?;

        match (request.source_identifier, request.requested_identifier) {
            (AddressSpace::MultiversX, AddressSpace::Ethereum) => {
                let stripped = request.source_address
                    [request.source_address.len() - ETHEREUM_ADDRESS_LENGTH..]
                    .to_vec();
                Ok(AddressResponse::new(stripped, request.source_address.clone()))
            }
            (AddressSpace::Ethereum, AddressSpace::MultiversX) => {
                let mut padded =
                    vec![0; MULTIVERSX_ADDRESS_LENGTH - request.source_address.len()];
                padded.extend_from_slice(&request.source_address);
                Ok(AddressResponse::new(padded.clone(), padded))
            }
            _ => Err(AccountError::Address(AddressError::InvalidSourceIdentifier)),
        }
    }

    fn save_alias_address(&self, request: &AliasSaveRequest) -> Result<(), AccountError> {
        validate_alias_save_request(request)?;
        self.saved_aliases
            .lock()
            .expect("alias lock poisoned")
            .push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn the_stub_strips_and_restores_the_zero_prefix() {
        let adapter = TestAccountAdapter::default();
        let multiversx_address: Vec<u8> = [vec![0u8; 12], vec![0x17; 20]].concat();

        let response = adapter
            .request_address(&AddressRequest::new(
                multiversx_address.clone(),
                AddressSpace::MultiversX,
                AddressSpace::Ethereum,
                true,
            ))
            .unwrap();
        assert_eq!(response.requested_address, vec![0x17; 20]);
        assert_eq!(response.multiversx_address, multiversx_address);

        let back = adapter
            .request_address(&AddressRequest::new(
                response.requested_address,
                AddressSpace::Ethereum,
                AddressSpace::MultiversX,
                true,
            ))
            .unwrap();
        assert_eq!(back.requested_address, multiversx_address);
    }

    #[test]
    fn alias_saves_are_validated_and_recorded() {
        let adapter = TestAccountAdapter::default();
        let request =
            AliasSaveRequest::new(vec![0; 32], vec![0x17; 20], AddressSpace::Ethereum);
        adapter.save_alias_address(&request).unwrap();
        assert_eq!(adapter.saved_aliases(), vec![request.clone()]);

        let invalid = AliasSaveRequest {
            alias_identifier: AddressSpace::MultiversX,
            ..request
        };
        assert!(adapter.save_alias_address(&invalid).is_err());
        assert_eq!(adapter.saved_aliases().len(), 1);
    }
}
