use chainspan_core::{AccountError, ExpressionError};
use chainspan_ethereum::{EthAbiError, EthSignatureError};
use chainspan_multiversx::{CodecError, MvxAbiError, MvxSignatureError};

/// Errors of the Ethereum-to-MultiversX direction.
///
/// The unhandled-type mapping error of the reference behavior does not
/// exist here: the mapper matches the Ethereum type universe
/// exhaustively, so the compiler rules the case out.
#[derive(Debug, thiserror::Error)]
pub enum EthToMvxError {
    /// The decoded value list and the argument slots differ in length
    #[error("invalid values size for attach")]
    InvalidValuesSizeForAttach,
    /// A fixed-size array received the wrong number of values
    #[error("invalid value size for array attach")]
    InvalidValueSizeForArrayAttach,
    /// A decoded value does not fit the shape of its paired slot
    #[error("attach failed for argument {argument} and value {value}")]
    AttachFailed {
        /// The kind of the receiving slot
        argument: &'static str,
        /// The kind of the offending value
        value: &'static str,
    },
    /// The Ethereum-encoded input must be a single blob
    #[error("expected one argument for ethereum to multiversx conversion")]
    ExpectedOneArgument,
    /// An address translation failed
    #[error("{0}")]
    Account(#[from] AccountError),
}

/// Errors of the MultiversX-to-Ethereum direction.
#[derive(Debug, thiserror::Error)]
pub enum MvxToEthError {
    /// The MultiversX type name has no Ethereum counterpart
    #[error("unhandled abi type provided for multiversx to ethereum arguments conversion: {0}")]
    UnhandledAbiType(String),
    /// A fixed-size array holds the wrong number of items
    #[error("invalid value size for array detach")]
    InvalidValueSizeForArrayDetach,
    /// An argument slot does not fit the shape of its paired Ethereum type
    #[error("detach failed for argument {argument}")]
    DetachFailed {
        /// The kind of the unpaired slot
        argument: &'static str,
    },
    /// A nested-argument or arity violation in the source type
    #[error("{0}")]
    Expression(#[from] ExpressionError),
    /// An address translation failed
    #[error("{0}")]
    Account(#[from] AccountError),
}

/// Errors of the built-in function facade.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuiltinError {
    /// The host passed no VM input
    #[error("nil vm input")]
    NilVmInput,
    /// Fewer than a signature and one data part, or an unknown function tag
    #[error("invalid arguments")]
    InvalidArguments,
    /// The host passed no call value
    #[error("nil value")]
    NilValue,
    /// Encoding built-ins are not payable
    #[error("built in function called with value")]
    BuiltInFunctionCalledWithValue,
    /// The provided gas does not cover the metered input length
    #[error("not enough gas")]
    NotEnoughGas,
}

/// The umbrella error of the encoding core. Every inner failure is kept
/// as the cause.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// Ethereum signature parsing failed
    #[error("{0}")]
    EthSignature(#[from] EthSignatureError),
    /// MultiversX signature parsing failed
    #[error("{0}")]
    MvxSignature(#[from] MvxSignatureError),
    /// Building the Ethereum ABI descriptor failed
    #[error("{0}")]
    EthAbi(#[from] EthAbiError),
    /// Building the MultiversX ABI descriptor failed
    #[error("{0}")]
    MvxAbi(#[from] MvxAbiError),
    /// The MultiversX wire codec rejected the data
    #[error("{0}")]
    Codec(#[from] CodecError),
    /// The Ethereum ABI codec rejected the data
    #[error("{0}")]
    EthCodec(#[from] ethers_core::abi::Error),
    /// Attaching values to the MultiversX slots failed
    #[error("{0}")]
    EthToMvx(#[from] EthToMvxError),
    /// Detaching values from the MultiversX slots failed
    #[error("{0}")]
    MvxToEth(#[from] MvxToEthError),
    /// The built-in call surface rejected the input
    #[error("{0}")]
    Builtin(#[from] BuiltinError),
}
