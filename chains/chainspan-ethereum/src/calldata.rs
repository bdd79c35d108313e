/// Size in bytes of an EVM function selector.
pub const EVM_SELECTOR_SIZE: usize = 4;

/// Errors produced while splitting EVM calldata.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EthCallDataError {
    /// The calldata is shorter than a function selector
    #[error("unexpected input size")]
    UnexpectedInputSize,
}

/// Splits EVM calldata into its 4-byte function selector and the encoded
/// argument blob.
pub fn parse_ethereum_call_input(input: &[u8]) -> Result<(&[u8], &[u8]), EthCallDataError> {
    if input.len() < EVM_SELECTOR_SIZE {
        return Err(EthCallDataError::UnexpectedInputSize);
    }
    Ok(input.split_at(EVM_SELECTOR_SIZE))
}
