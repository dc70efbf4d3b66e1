// Path: crates/api/src/common.rs
//! RPC-shape types shared by [`crate::main_chain::MainChainRpc`] and
//! [`crate::side_chain::SideChainRpc`] that do not belong in `relay-types`'
//! core data model (request/response shapes, not domain concepts).

/// The witness scope attached to a NEO invocation signer. Only
/// `CalledByEntry` is used by the transaction factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WitnessScope {
    /// The witness is only valid for the entry-point script.
    CalledByEntry,
}

/// A NEO invocation signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    /// The signer's 20-byte script hash.
    pub account: [u8; 20],
    /// The witness scope.
    pub scope: WitnessScope,
}

/// The result of a NEO `invoke_script` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeResult {
    /// The terminal VM state of the invocation.
    pub state: relay_types::VmState,
    /// GAS consumed by the invocation, in fractional GAS units (NEO's
    /// native "datoshi" denomination).
    pub gas_consumed: i64,
    /// The fault message, populated only when `state == Fault`.
    pub fault_exception: Option<String>,
}

/// Whether a broadcast transaction has been observed as accepted by the
/// chain, as reported by `get_raw_transaction` / `get_transaction_by_hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionStatus {
    /// Not yet observed by the node queried.
    Pending,
    /// Observed and accepted.
    Accepted,
}

/// A minimal EVM call request, enough to drive `eth_estimateGas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmCallRequest {
    /// The sender address.
    pub from: [u8; 20],
    /// The destination address.
    pub to: [u8; 20],
    /// The call value, in wei.
    pub value: u128,
    /// The call data (ABI-encoded method call).
    pub data: Vec<u8>,
    /// The gas price to use for estimation.
    pub gas_price: u128,
}
