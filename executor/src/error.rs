//! Protocol validation errors.
//!
//! Every validation step returns a tagged result and propagates by
//! early return; a single `Err` anywhere aborts the whole operation
//! group with no partial effects. Display strings match the contract
//! assertion messages relayers already match on.

use thiserror::Error;

use executor_messages::quote::QuoteError;

use crate::chain::TxnKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    // Structural / encoding
    #[error("transaction type is {expected}")]
    WrongTransactionType { expected: TxnKind },
    #[error("invalid number of bytes for {field}")]
    InvalidEncodingLength { field: &'static str },
    #[error("invalid tuple encoding")]
    InvalidTupleEncoding,
    #[error("invalid tail pointer at index {0}")]
    InvalidTailPointer(u8),
    #[error("Incorrect app on completion")]
    IncorrectCompletionType,
    #[error("Incorrect method")]
    IncorrectMethod,
    #[error("Request id must be 32 bytes")]
    InvalidRequestId,
    #[error("Batch length mismatch")]
    BatchLengthMismatch,
    #[error("Unknown return prefix")]
    UnknownReturnPrefix,

    // Quote
    #[error("Prefix mismatch")]
    QuotePrefixMismatch,
    #[error("Quote source chain mismatch")]
    QuoteSourceChainMismatch,
    #[error("Quote destination chain mismatch")]
    QuoteDestinationChainMismatch,
    #[error("Quote expired")]
    QuoteExpired,

    // Fee collection
    #[error("Fee txn must be from same sender")]
    FeeSenderMismatch,
    #[error("Unknown fee payment receiver")]
    UnknownFeeReceiver,
    #[error("Unknown asset id")]
    UnknownAssetId,
    #[error("Unsafe conversion of bytes32 to uint64")]
    UnsafeAddressConversion,

    // Receive / drop-off
    #[error("Contract address unknown")]
    UnknownAppAddress,
    #[error("Gas receiver unknown")]
    UnknownGasReceiver,

    // NTT manager composition
    #[error("Pay executor txn must be from same sender")]
    PayExecutorSenderMismatch,
    #[error("Unknown pay executor receiver")]
    UnknownPayExecutorReceiver,
    #[error("Pay referrer txn must be from same sender")]
    PayReferrerSenderMismatch,
    #[error("Unknown pay referrer receiver")]
    UnknownPayReferrerReceiver,
    #[error("Unknown pay referrer asset")]
    UnknownPayReferrerAsset,
    #[error("Incorrect pay referrer amount")]
    IncorrectReferrerAmount,
    #[error("Incorrect ntt transfer amount")]
    IncorrectNttTransferAmount,
    #[error("Unknown ntt manager peer")]
    UnknownManagerPeer,

    // Host
    #[error("Transfer failed")]
    TransferFailed,
}

impl From<QuoteError> for ExecutorError {
    fn from(e: QuoteError) -> Self {
        match e {
            QuoteError::InvalidLength => ExecutorError::InvalidEncodingLength {
                field: "signed_quote_bytes",
            },
            QuoteError::PrefixMismatch => ExecutorError::QuotePrefixMismatch,
            QuoteError::SourceChainMismatch => ExecutorError::QuoteSourceChainMismatch,
            QuoteError::DestinationChainMismatch => ExecutorError::QuoteDestinationChainMismatch,
            QuoteError::Expired => ExecutorError::QuoteExpired,
        }
    }
}
