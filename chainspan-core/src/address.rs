use std::error::Error as StdError;

use derive_new::new;

/// Byte length of a MultiversX address.
pub const MULTIVERSX_ADDRESS_LENGTH: usize = 32;
/// Byte length of an Ethereum address.
pub const ETHEREUM_ADDRESS_LENGTH: usize = 20;

const MULTIVERSX_BLANK_ADDRESS: [u8; MULTIVERSX_ADDRESS_LENGTH] = [0; MULTIVERSX_ADDRESS_LENGTH];
const ETHEREUM_BLANK_ADDRESS: [u8; ETHEREUM_ADDRESS_LENGTH] = [0; ETHEREUM_ADDRESS_LENGTH];

/// The address space an address belongs to.
///
/// `Invalid` is the unset zero value hosts hand us before a space was
/// chosen; every request is validated against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum AddressSpace {
    /// Unset
    #[default]
    Invalid,
    /// The 32-byte MultiversX address space
    MultiversX,
    /// The 20-byte Ethereum address space
    Ethereum,
}

/// Errors raised while validating address and alias requests.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    /// The source identifier is the unset zero value
    #[error("invalid source identifier")]
    InvalidSourceIdentifier,
    /// The requested identifier is the unset zero value
    #[error("invalid requested identifier")]
    InvalidRequestedIdentifier,
    /// Source and requested identifiers name the same address space
    #[error("source identifier matches requested identifier")]
    SourceIdentifierMatchesRequestedIdentifier,
    /// No blank address is defined for the identifier
    #[error("identifier not handled for blank address")]
    IdentifierNotHandledForBlankAddress,
    /// The alias identifier must name a non-MultiversX address space
    #[error("invalid alias identifier")]
    InvalidAliasIdentifier,
}

/// A request to translate an address into another address space.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct AddressRequest {
    /// The address to translate; empty means the blank address of the
    /// source space
    pub source_address: Vec<u8>,
    /// The space `source_address` belongs to
    pub source_identifier: AddressSpace,
    /// The space to translate into
    pub requested_identifier: AddressSpace,
    /// Whether a generated alias may be persisted by the adapter
    pub save_on_generate: bool,
}

/// The translated address, plus its canonical MultiversX form.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct AddressResponse {
    /// The address in the requested space
    pub requested_address: Vec<u8>,
    /// The MultiversX address the alias is anchored to
    pub multiversx_address: Vec<u8>,
}

/// A request to persist an alias for a MultiversX address.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct AliasSaveRequest {
    /// The MultiversX address the alias belongs to
    pub multiversx_address: Vec<u8>,
    /// The alias in the foreign space
    pub alias_address: Vec<u8>,
    /// The space of `alias_address`
    pub alias_identifier: AddressSpace,
}

/// Errors surfaced by an [`AccountAdapter`].
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The request failed validation
    #[error("{0}")]
    Address(#[from] AddressError),
    /// Any adapter-side failure
    #[error("{0}")]
    Other(Box<dyn StdError + Send + Sync>),
}

impl AccountError {
    /// Wraps an adapter-side error, preserving it as the cause.
    pub fn from_other<E: StdError + Send + Sync + 'static>(error: E) -> Self {
        Self::Other(Box::new(error))
    }
}

/// The host-supplied account registry mapping addresses between the two
/// address spaces. Long-lived; the encoding core borrows it per call.
///
/// The call path has no suspension points, so the trait is synchronous.
pub trait AccountAdapter: Send + Sync {
    /// Translates `request.source_address` into the requested space,
    /// optionally persisting a generated alias.
    fn request_address(&self, request: &AddressRequest) -> Result<AddressResponse, AccountError>;

    /// Persists an alias for a MultiversX address.
    fn save_alias_address(&self, request: &AliasSaveRequest) -> Result<(), AccountError>;
}

/// Checks an alias save request before it reaches the adapter.
pub fn validate_alias_save_request(request: &AliasSaveRequest) -> Result<(), AddressError> {
    match request.alias_identifier {
        AddressSpace::Invalid | AddressSpace::MultiversX => {
            Err(AddressError::InvalidAliasIdentifier)
        }
        _ => Ok(()),
    }
}

/// Checks an address request before it reaches the adapter: identifiers
/// must be set and must name distinct spaces.
pub fn validate_address_request(request: &AddressRequest) -> Result<(), AddressError> {
    if request.source_identifier == AddressSpace::Invalid {
        return Err(AddressError::InvalidSourceIdentifier);
    }
    if request.requested_identifier == AddressSpace::Invalid {
        return Err(AddressError::InvalidRequestedIdentifier);
    }
    if request.source_identifier == request.requested_identifier {
        return Err(AddressError::SourceIdentifierMatchesRequestedIdentifier);
    }
    Ok(())
}

/// Replaces an empty source address with the blank address of its space.
pub fn enhance_address_request(request: &mut AddressRequest) -> Result<(), AddressError> {
    if request.source_address.is_empty() {
        request.source_address = request_blank_address(request.source_identifier)?.to_vec();
    }
    Ok(())
}

/// Whether `address` is the blank (all-zero) address of the given space.
pub fn is_blank_address(address: &[u8], identifier: AddressSpace) -> bool {
    match identifier {
        AddressSpace::MultiversX => address == MULTIVERSX_BLANK_ADDRESS,
        AddressSpace::Ethereum => address == ETHEREUM_BLANK_ADDRESS,
        AddressSpace::Invalid => false,
    }
}

/// The blank address of the given space.
pub fn request_blank_address(identifier: AddressSpace) -> Result<&'static [u8], AddressError> {
    match identifier {
        AddressSpace::MultiversX => Ok(&MULTIVERSX_BLANK_ADDRESS),
        AddressSpace::Ethereum => Ok(&ETHEREUM_BLANK_ADDRESS),
        AddressSpace::Invalid => Err(AddressError::IdentifierNotHandledForBlankAddress),
    }
}

/// Validates and normalizes `request`, then delegates to the adapter.
///
/// This is the single entry point the encoding walkers use whenever an
/// address crosses the chain boundary.
pub fn resolve_address(
    accounts: &dyn AccountAdapter,
    mut request: AddressRequest,
) -> Result<AddressResponse, AccountError> {
    validate_address_request(&request)?;
    enhance_address_request(&mut request)?;
    accounts.request_address(&request)
}
