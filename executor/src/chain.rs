//! Chain adapter: the narrow interface the protocol state machine
//! needs from a target chain.
//!
//! Each target chain supplies a [`ChainHost`] plus a translation of
//! its grouped transactions into [`GroupTxn`] values. Everything else
//! is written once against these types.

use std::fmt;

use crate::error::ExecutorError;
use crate::event::Event;

/// Canonical 32-byte account address.
pub type Address = [u8; 32];

/// Operation kinds within an atomic group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnKind {
    /// Native-currency payment
    Pay,
    /// Fungible-asset transfer
    Axfer,
    /// Application call
    Appl,
}

impl fmt::Display for TxnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TxnKind::Pay => "pay",
            TxnKind::Axfer => "axfer",
            TxnKind::Appl => "appl",
        })
    }
}

/// Completion semantics of an application call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnCompletion {
    NoOp,
    OptIn,
    CloseOut,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTxn {
    pub sender: Address,
    pub receiver: Address,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransferTxn {
    pub sender: Address,
    pub asset_receiver: Address,
    pub xfer_asset: u64,
    pub asset_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCallTxn {
    pub app_id: u64,
    pub on_completion: OnCompletion,
    /// Application arguments; `args[0]` is the 4-byte method selector.
    pub args: Vec<Vec<u8>>,
    /// Last log record of the call, used for ABI return values.
    pub last_log: Vec<u8>,
}

impl AppCallTxn {
    /// The 4-byte method selector in `args[0]`.
    pub fn selector(&self) -> Result<[u8; 4], ExecutorError> {
        self.args
            .first()
            .and_then(|a| <[u8; 4]>::try_from(a.as_slice()).ok())
            .ok_or(ExecutorError::IncorrectMethod)
    }

    pub fn arg(&self, index: usize, field: &'static str) -> Result<&[u8], ExecutorError> {
        self.args
            .get(index)
            .map(Vec::as_slice)
            .ok_or(ExecutorError::InvalidEncodingLength { field })
    }
}

/// One leg of an atomic operation group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupTxn {
    Payment(PaymentTxn),
    AssetTransfer(AssetTransferTxn),
    AppCall(AppCallTxn),
}

impl GroupTxn {
    pub fn kind(&self) -> TxnKind {
        match self {
            GroupTxn::Payment(_) => TxnKind::Pay,
            GroupTxn::AssetTransfer(_) => TxnKind::Axfer,
            GroupTxn::AppCall(_) => TxnKind::Appl,
        }
    }

    /// The leg as a payment, or `WrongTransactionType`.
    pub fn payment(&self) -> Result<&PaymentTxn, ExecutorError> {
        match self {
            GroupTxn::Payment(txn) => Ok(txn),
            _ => Err(ExecutorError::WrongTransactionType { expected: TxnKind::Pay }),
        }
    }

    /// The leg as an asset transfer, or `WrongTransactionType`.
    pub fn asset_transfer(&self) -> Result<&AssetTransferTxn, ExecutorError> {
        match self {
            GroupTxn::AssetTransfer(txn) => Ok(txn),
            _ => Err(ExecutorError::WrongTransactionType { expected: TxnKind::Axfer }),
        }
    }

    /// The leg as an application call, or `WrongTransactionType`.
    pub fn app_call(&self) -> Result<&AppCallTxn, ExecutorError> {
        match self {
            GroupTxn::AppCall(txn) => Ok(txn),
            _ => Err(ExecutorError::WrongTransactionType { expected: TxnKind::Appl }),
        }
    }
}

/// Per-call context: the sender of the outer transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub sender: Address,
}

/// Failure data captured from an external call instead of propagating
/// the revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFailure {
    /// Encoded revert reason; empty when none was returned.
    pub reason: Vec<u8>,
    /// The call consumed its entire gas allocation; the reason (if
    /// any) is not meaningful.
    pub out_of_gas: bool,
}

/// The primitives a target chain exposes to the protocol core.
///
/// All effects issued through a host are part of the caller's atomic
/// group: if the protocol call returns an error, the platform discards
/// every effect issued so far.
pub trait ChainHost {
    /// Current block timestamp (seconds).
    fn now(&self) -> u64;

    /// Canonical address of an application, if it exists.
    fn app_address(&self, app_id: u64) -> Option<Address>;

    /// Issue an outbound native-currency payment.
    fn submit_payment(&mut self, receiver: Address, amount: u64) -> Result<(), ExecutorError>;

    /// Issue an outbound fungible-asset transfer. A zero-amount
    /// transfer to self is an asset opt-in on chains that require
    /// registration, and a no-op elsewhere.
    fn submit_asset_transfer(
        &mut self,
        asset_id: u64,
        receiver: Address,
        amount: u64,
    ) -> Result<(), ExecutorError>;

    /// Append an event to the log.
    fn emit(&mut self, event: Event);

    /// Invoke an external receiver, capturing failure data rather than
    /// propagating a revert. `out_of_gas` must be set when the callee
    /// exhausted `gas_budget` entirely, as distinguished by the
    /// runtime's consumed-versus-allocated accounting.
    fn invoke(
        &mut self,
        target: Address,
        payload: &[u8],
        gas_budget: u64,
    ) -> Result<Vec<u8>, CapturedFailure>;
}
