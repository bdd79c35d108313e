use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// The outcome class of a built-in function call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum ReturnCode {
    /// The call succeeded
    #[default]
    Ok,
    /// The call failed on user input
    UserError,
    /// The call ran out of gas
    OutOfGas,
    /// The call failed during execution
    ExecutionFailed,
}

/// The input of a built-in function call, as handed over by the VM host.
#[derive(Debug, Clone)]
pub struct ContractCallInput {
    /// The called function name
    pub function: String,
    /// Raw call arguments; the first one is the signature
    pub arguments: Vec<Vec<u8>>,
    /// The value transferred with the call; `None` when the host did not
    /// set one
    pub call_value: Option<BigUint>,
    /// Gas available to the call
    pub gas_provided: u64,
}

/// The output of a built-in function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmOutput {
    /// The outcome class
    pub return_code: ReturnCode,
    /// Gas left after the call
    pub gas_remaining: u64,
    /// The produced output parts
    pub return_data: Vec<Vec<u8>>,
}

/// Per-byte costs of the base VM operations, reloadable at runtime from
/// the host's gas schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseOperationCost {
    /// Cost per stored byte
    pub store_per_byte: u64,
    /// Cost per released byte
    pub release_per_byte: u64,
    /// Cost per copied byte
    pub data_copy_per_byte: u64,
    /// Cost per persisted byte
    pub persist_per_byte: u64,
    /// Cost per compiled (processed) byte; the metering unit of the
    /// encoding built-ins
    pub compile_per_byte: u64,
    /// Cost per ahead-of-time prepared byte
    #[serde(rename = "AoTPreparePerByte")]
    pub aot_prepare_per_byte: u64,
}

/// The gas schedule section relevant to the encoding built-ins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GasCost {
    /// Base operation costs
    pub base_operation_cost: BaseOperationCost,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gas_cost_deserializes_from_schedule_keys() {
        let gas_cost: GasCost = serde_json::from_str(
            r#"{"BaseOperationCost": {
                "StorePerByte": 1, "ReleasePerByte": 2, "DataCopyPerByte": 3,
                "PersistPerByte": 4, "CompilePerByte": 5, "AoTPreparePerByte": 6
            }}"#,
        )
        .unwrap();
        assert_eq!(gas_cost.base_operation_cost.compile_per_byte, 5);
        assert_eq!(gas_cost.base_operation_cost.store_per_byte, 1);
    }
}
