use std::sync::Arc;

use num_traits::Zero;
use parking_lot::RwLock;
use tracing::debug;

use chainspan_core::{
    AccountAdapter, BaseOperationCost, ContractCallInput, GasCost, ReturnCode, VmOutput,
};

use crate::{BuiltinError, EncodingError, EncodingHandler};

const MIN_ARGS_COUNT: usize = 2;
const SIGNATURE_POSITION: usize = 0;
const DATA_START_POSITION: usize = 1;

/// The four encoding built-in function tags, as the protocol names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum EncodingFunction {
    /// Ethereum blob in, MultiversX parts out, MultiversX-grammar signature
    #[strum(serialize = "EthereumToMultiversXEncodingWithMultiversXSignature")]
    EthereumToMultiversXWithMultiversXSignature,
    /// Ethereum blob in, MultiversX parts out, Ethereum-grammar signature
    #[strum(serialize = "EthereumToMultiversXEncodingWithEthereumSignature")]
    EthereumToMultiversXWithEthereumSignature,
    /// MultiversX parts in, Ethereum blob out, MultiversX-grammar signature
    #[strum(serialize = "MultiversXToEthereumEncodingWithMultiversXSignature")]
    MultiversXToEthereumWithMultiversXSignature,
    /// MultiversX parts in, Ethereum blob out, Ethereum-grammar signature
    #[strum(serialize = "MultiversXToEthereumEncodingWithEthereumSignature")]
    MultiversXToEthereumWithEthereumSignature,
}

/// The encoding built-in function: validates the call, meters gas by
/// input length, dispatches to the matching encoding entry point and
/// wraps the result into a VM output.
///
/// The gas schedule can be reloaded concurrently with call processing;
/// the cost record sits behind a reader/writer lock.
pub struct ConvertEncoding {
    base_operation_cost: RwLock<BaseOperationCost>,
    function: EncodingFunction,
    accounts: Arc<dyn AccountAdapter>,
}

impl ConvertEncoding {
    /// A built-in handler for one of the four function tags; unknown tags
    /// are rejected up front.
    pub fn new(
        base_operation_cost: BaseOperationCost,
        accounts: Arc<dyn AccountAdapter>,
        function: &str,
    ) -> Result<Self, EncodingError> {
        let function = function
            .parse()
            .map_err(|_| BuiltinError::InvalidArguments)?;
        Ok(Self {
            base_operation_cost: RwLock::new(base_operation_cost),
            function,
            accounts,
        })
    }

    /// Installs a freshly reloaded gas schedule; absent configs are
    /// ignored.
    pub fn set_new_gas_config(&self, gas_cost: Option<&GasCost>) {
        let Some(gas_cost) = gas_cost else {
            return;
        };
        *self.base_operation_cost.write() = gas_cost.base_operation_cost;
        debug!(
            compile_per_byte = gas_cost.base_operation_cost.compile_per_byte,
            "gas config reloaded"
        );
    }

    /// Resolves one encoding call. The gas check precedes any
    /// state-visible work; inner errors surface with their cause kept.
    pub fn process_builtin_function(
        &self,
        vm_input: Option<&ContractCallInput>,
    ) -> Result<VmOutput, EncodingError> {
        let base_operation_cost = self.base_operation_cost.read();

        let vm_input = vm_input.ok_or(BuiltinError::NilVmInput)?;
        validate_input(vm_input)?;

        let signature = String::from_utf8_lossy(&vm_input.arguments[SIGNATURE_POSITION]);
        let input_data = &vm_input.arguments[DATA_START_POSITION..];

        let gas_to_use = calculate_gas_to_use(input_data, base_operation_cost.compile_per_byte);
        if vm_input.gas_provided < gas_to_use {
            return Err(BuiltinError::NotEnoughGas.into());
        }
        debug!(function = %self.function, parts = input_data.len(), gas = gas_to_use, "converting encoding");

        let handler = EncodingHandler::new(self.accounts.as_ref());
        let return_data = match self.function {
            EncodingFunction::EthereumToMultiversXWithMultiversXSignature => {
                handler.eth_to_mvx_encoding_with_mvx_signature(&signature, input_data)
            }
            EncodingFunction::EthereumToMultiversXWithEthereumSignature => {
                handler.eth_to_mvx_encoding_with_eth_signature(&signature, input_data)
            }
            EncodingFunction::MultiversXToEthereumWithMultiversXSignature => {
                handler.mvx_to_eth_encoding_with_mvx_signature(&signature, input_data)
            }
            EncodingFunction::MultiversXToEthereumWithEthereumSignature => {
                handler.mvx_to_eth_encoding_with_eth_signature(&signature, input_data)
            }
        }?;

        Ok(VmOutput {
            return_code: ReturnCode::Ok,
            gas_remaining: vm_input.gas_provided - gas_to_use,
            return_data,
        })
    }
}

fn validate_input(vm_input: &ContractCallInput) -> Result<(), BuiltinError> {
    if vm_input.arguments.len() < MIN_ARGS_COUNT {
        return Err(BuiltinError::InvalidArguments);
    }
    let Some(call_value) = &vm_input.call_value else {
        return Err(BuiltinError::NilValue);
    };
    if !call_value.is_zero() {
        return Err(BuiltinError::BuiltInFunctionCalledWithValue);
    }
    Ok(())
}

fn calculate_gas_to_use(input_data: &[Vec<u8>], compile_per_byte: u64) -> u64 {
    input_data
        .iter()
        .map(|part| part.len() as u64)
        .sum::<u64>()
        .saturating_mul(compile_per_byte)
}

#[cfg(test)]
mod test {
    use super::*;
    use chainspan_test::TestAccountAdapter;
    use num_bigint::BigUint;

    const FUNCTION: &str = "MultiversXToEthereumEncodingWithMultiversXSignature";

    fn cost(compile_per_byte: u64) -> BaseOperationCost {
        BaseOperationCost {
            compile_per_byte,
            ..Default::default()
        }
    }

    fn builtin() -> ConvertEncoding {
        ConvertEncoding::new(cost(10), Arc::new(TestAccountAdapter::default()), FUNCTION).unwrap()
    }

    fn input(arguments: Vec<Vec<u8>>, gas_provided: u64) -> ContractCallInput {
        ContractCallInput {
            function: FUNCTION.to_owned(),
            arguments,
            call_value: Some(BigUint::zero()),
            gas_provided,
        }
    }

    #[test]
    fn unknown_function_tags_are_rejected_at_construction() {
        let result = ConvertEncoding::new(
            cost(10),
            Arc::new(TestAccountAdapter::default()),
            "ESDTTransfer",
        );
        assert!(matches!(
            result,
            Err(EncodingError::Builtin(BuiltinError::InvalidArguments))
        ));
    }

    #[test]
    fn processes_a_simple_call_and_meters_gas() {
        let call = input(vec![b"u8".to_vec(), vec![0x05]], 1_000);
        let output = builtin().process_builtin_function(Some(&call)).unwrap();

        assert_eq!(output.return_code, ReturnCode::Ok);
        // One metered input byte at 10 gas per byte.
        assert_eq!(output.gas_remaining, 990);
        assert_eq!(output.return_data.len(), 1);
    }

    #[test]
    fn validates_the_call_surface() {
        let builtin = builtin();

        assert!(matches!(
            builtin.process_builtin_function(None),
            Err(EncodingError::Builtin(BuiltinError::NilVmInput))
        ));

        let too_few = input(vec![b"u8".to_vec()], 1_000);
        assert!(matches!(
            builtin.process_builtin_function(Some(&too_few)),
            Err(EncodingError::Builtin(BuiltinError::InvalidArguments))
        ));

        let mut nil_value = input(vec![b"u8".to_vec(), vec![0x05]], 1_000);
        nil_value.call_value = None;
        assert!(matches!(
            builtin.process_builtin_function(Some(&nil_value)),
            Err(EncodingError::Builtin(BuiltinError::NilValue))
        ));

        let mut paid = input(vec![b"u8".to_vec(), vec![0x05]], 1_000);
        paid.call_value = Some(BigUint::from(1u8));
        assert!(matches!(
            builtin.process_builtin_function(Some(&paid)),
            Err(EncodingError::Builtin(BuiltinError::BuiltInFunctionCalledWithValue))
        ));
    }

    #[test]
    fn gas_shortfall_is_rejected_before_any_work() {
        // One input byte at 10 gas per byte; providing 9 is one short.
        let call = input(vec![b"u8".to_vec(), vec![0x05]], 9);
        assert!(matches!(
            builtin().process_builtin_function(Some(&call)),
            Err(EncodingError::Builtin(BuiltinError::NotEnoughGas))
        ));
    }

    #[test]
    fn gas_use_is_monotone_in_input_length() {
        let short = input(vec![b"u8,u8".to_vec(), vec![0x05], vec![0x06]], 1_000);
        let long = input(
            vec![b"u8,bytes".to_vec(), vec![0x05], vec![0x06, 0x07, 0x08]],
            1_000,
        );
        let builtin = builtin();
        let short_used = 1_000 - builtin.process_builtin_function(Some(&short)).unwrap().gas_remaining;
        let long_used = 1_000 - builtin.process_builtin_function(Some(&long)).unwrap().gas_remaining;
        assert!(long_used >= short_used);
    }

    #[test]
    fn gas_config_reloads_swap_the_cost() {
        let builtin = builtin();
        builtin.set_new_gas_config(None);

        let gas_cost = GasCost {
            base_operation_cost: cost(1),
        };
        builtin.set_new_gas_config(Some(&gas_cost));

        let call = input(vec![b"u8".to_vec(), vec![0x05]], 1_000);
        let output = builtin.process_builtin_function(Some(&call)).unwrap();
        assert_eq!(output.gas_remaining, 999);
    }
}
