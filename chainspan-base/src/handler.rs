use ethers_core::abi::{self, ParamType};
use tracing::debug;

use chainspan_core::AccountAdapter;
use chainspan_ethereum::{build_ethereum_abi, parse_ethereum_signature};
use chainspan_multiversx::{
    build_multiversx_abi, parse_multiversx_signature, Serializer, TopValue, PARTS_SEPARATOR,
};

use crate::eth_to_mvx::{attach_values_to_multiversx_abi, ethereum_to_multiversx_arguments};
use crate::mvx_to_eth::{detach_values_from_multiversx_abi, multiversx_to_ethereum_arguments};
use crate::{EncodingError, EthToMvxError};

/// Request-scoped state shared by the aligner walkers: a borrow of the
/// host's account registry, nothing else.
#[derive(Clone, Copy)]
pub struct EncodingContext<'a> {
    /// The host account registry
    pub accounts: &'a dyn AccountAdapter,
}

/// The four encoding entry points, bundled around one context.
pub struct EncodingHandler<'a> {
    context: EncodingContext<'a>,
}

impl<'a> EncodingHandler<'a> {
    /// A handler borrowing the host account registry.
    pub fn new(accounts: &'a dyn AccountAdapter) -> Self {
        Self {
            context: EncodingContext { accounts },
        }
    }

    /// Re-encodes an Ethereum blob as MultiversX parts; the signature is
    /// given in the MultiversX grammar.
    pub fn eth_to_mvx_encoding_with_mvx_signature(
        &self,
        signature: &str,
        input_data: &[Vec<u8>],
    ) -> Result<Vec<Vec<u8>>, EncodingError> {
        let (mut multiversx_abi, ethereum_abi) = mvx_and_eth_abi_from_mvx_signature(signature)?;
        ethereum_to_multiversx_encoding(&self.context, &mut multiversx_abi, &ethereum_abi, input_data)
    }

    /// Re-encodes an Ethereum blob as MultiversX parts; the signature is
    /// given in the Ethereum grammar.
    pub fn eth_to_mvx_encoding_with_eth_signature(
        &self,
        signature: &str,
        input_data: &[Vec<u8>],
    ) -> Result<Vec<Vec<u8>>, EncodingError> {
        let (mut multiversx_abi, ethereum_abi) = mvx_and_eth_abi_from_eth_signature(signature)?;
        ethereum_to_multiversx_encoding(&self.context, &mut multiversx_abi, &ethereum_abi, input_data)
    }

    /// Re-encodes MultiversX parts as one Ethereum blob; the signature is
    /// given in the MultiversX grammar.
    pub fn mvx_to_eth_encoding_with_mvx_signature(
        &self,
        signature: &str,
        input_data: &[Vec<u8>],
    ) -> Result<Vec<Vec<u8>>, EncodingError> {
        let (mut multiversx_abi, ethereum_abi) = mvx_and_eth_abi_from_mvx_signature(signature)?;
        multiversx_to_ethereum_encoding(&self.context, &mut multiversx_abi, &ethereum_abi, input_data)
    }

    /// Re-encodes MultiversX parts as one Ethereum blob; the signature is
    /// given in the Ethereum grammar.
    pub fn mvx_to_eth_encoding_with_eth_signature(
        &self,
        signature: &str,
        input_data: &[Vec<u8>],
    ) -> Result<Vec<Vec<u8>>, EncodingError> {
        let (mut multiversx_abi, ethereum_abi) = mvx_and_eth_abi_from_eth_signature(signature)?;
        multiversx_to_ethereum_encoding(&self.context, &mut multiversx_abi, &ethereum_abi, input_data)
    }
}

/// Builds the paired ABI descriptors from a MultiversX-grammar signature.
pub fn mvx_and_eth_abi_from_mvx_signature(
    signature: &str,
) -> Result<(Vec<TopValue>, Vec<ParamType>), EncodingError> {
    let mvx_arguments = parse_multiversx_signature(signature)?;
    let multiversx_abi = build_multiversx_abi(&mvx_arguments)?;
    let eth_arguments = multiversx_to_ethereum_arguments(&mvx_arguments)?;
    let ethereum_abi = build_ethereum_abi(&eth_arguments)?;
    Ok((multiversx_abi, ethereum_abi))
}

/// Builds the paired ABI descriptors from an Ethereum-grammar signature.
pub fn mvx_and_eth_abi_from_eth_signature(
    signature: &str,
) -> Result<(Vec<TopValue>, Vec<ParamType>), EncodingError> {
    let eth_arguments = parse_ethereum_signature(signature)?;
    let ethereum_abi = build_ethereum_abi(&eth_arguments)?;
    let mvx_arguments = ethereum_to_multiversx_arguments(&ethereum_abi);
    let multiversx_abi = build_multiversx_abi(&mvx_arguments)?;
    Ok((multiversx_abi, ethereum_abi))
}

fn ethereum_to_multiversx_encoding(
    context: &EncodingContext<'_>,
    multiversx_abi: &mut [TopValue],
    ethereum_abi: &[ParamType],
    input_data: &[Vec<u8>],
) -> Result<Vec<Vec<u8>>, EncodingError> {
    let [blob] = input_data else {
        return Err(EthToMvxError::ExpectedOneArgument.into());
    };
    debug!(arguments = multiversx_abi.len(), bytes = blob.len(), "decoding ethereum blob");

    let values = abi::decode(ethereum_abi, blob)?;
    attach_values_to_multiversx_abi(context, multiversx_abi, ethereum_abi, values)?;

    let serializer = Serializer::new(PARTS_SEPARATOR)?;
    Ok(serializer.serialize_to_parts(multiversx_abi)?)
}

fn multiversx_to_ethereum_encoding(
    context: &EncodingContext<'_>,
    multiversx_abi: &mut [TopValue],
    ethereum_abi: &[ParamType],
    input_data: &[Vec<u8>],
) -> Result<Vec<Vec<u8>>, EncodingError> {
    debug!(arguments = multiversx_abi.len(), parts = input_data.len(), "decoding multiversx parts");

    let serializer = Serializer::new(PARTS_SEPARATOR)?;
    serializer.deserialize_parts(input_data, multiversx_abi)?;

    let values = detach_values_from_multiversx_abi(context, multiversx_abi, ethereum_abi)?;
    Ok(vec![abi::encode(&values)])
}
