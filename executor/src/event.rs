//! Canonical protocol events, consumed by off-chain relayers.

use crate::chain::Address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A paid request for off-chain execution. Wire-format fields are
    /// carried verbatim.
    RequestForExecution {
        quoter_address: [u8; 20],
        amount: u64,
        dst_chain: u16,
        dst_addr: [u8; 32],
        refund_addr: Address,
        signed_quote_bytes: Vec<u8>,
        request_bytes: Vec<u8>,
        relay_instructions: Vec<u8>,
    },
    /// An execution fee collected in a whitelisted token rather than
    /// native currency.
    PaymentInToken { asset_id: u64, amount: u64 },
    /// Outcome of a VAA delivery on the receiving side.
    VaaMessageReceived {
        request_for_execution_id: [u8; 32],
        success: bool,
        reason: Vec<u8>,
    },
    /// Outcome of an NTT delivery on the receiving side.
    NttMessageReceived {
        request_for_execution_id: [u8; 32],
        success: bool,
        reason: Vec<u8>,
    },
}
