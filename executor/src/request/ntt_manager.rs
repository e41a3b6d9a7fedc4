//! NTT manager composition: pairs a peer NTT-manager transfer with a
//! referrer fee split and forwards the execution fee into the wrapped
//! executor.

use tracing::debug;

use executor_messages::bytes::{
    decode_bytes32, decode_u16, decode_u64, encode_length_prefixed, u64_to_bytes32,
};
use executor_messages::maths::calculate_fee;
use executor_messages::request::make_ntt_v1_request;

use crate::args::{read_dynamic_arg, ExecutorArgs, FeeArgs};
use crate::chain::{
    Address, AppCallTxn, AssetTransferTxn, CallContext, ChainHost, GroupTxn, OnCompletion,
    PaymentTxn,
};
use crate::error::ExecutorError;
use crate::request::{Executor, RequestForExecutionArgs, TokenPaymentExecutor};

pub const NTT_MANAGER_WITH_EXECUTOR_VERSION: &str = "NttManagerWithExecutor-0.0.1";
pub const NTT_MANAGER_WITH_TOKEN_PAYMENT_EXECUTOR_VERSION: &str =
    "NttManagerWithTokenPaymentExecutor-0.0.1";

/// ABI return-value log prefix.
pub const RETURN_PREFIX: [u8; 4] = [0x15, 0x1f, 0x7c, 0x75];

/// Method selectors accepted on the ntt-transfer leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NttTransferSelectors {
    pub transfer: [u8; 4],
    pub transfer_full: [u8; 4],
}

/// Peer NTT-manager collaborator: resolves the manager contract on a
/// destination chain.
pub trait NttManagerPeer {
    fn peer_contract(&self, recipient_chain: u16) -> Result<[u8; 32], ExecutorError>;
}

/// Facts extracted from a validated ntt-transfer group.
struct NttTransferFacts {
    recipient_chain: u16,
    message_id: [u8; 32],
    src_manager: [u8; 32],
}

/// Validates the ntt-transfer and pay-referrer legs shared by both
/// manager variants and returns the transfer facts.
fn validate_ntt_legs(
    selectors: &NttTransferSelectors,
    ntt_send_token: &AssetTransferTxn,
    ntt_transfer: &AppCallTxn,
    pay_referrer: &AssetTransferTxn,
    amount: u64,
    fee_args: &FeeArgs,
) -> Result<NttTransferFacts, ExecutorError> {
    if ntt_transfer.on_completion != OnCompletion::NoOp {
        return Err(ExecutorError::IncorrectCompletionType);
    }
    let selector = ntt_transfer.selector()?;
    if selector != selectors.transfer && selector != selectors.transfer_full {
        return Err(ExecutorError::IncorrectMethod);
    }

    // the message id is the ABI return value of the transfer call
    if ntt_transfer.last_log.len() < 4 || ntt_transfer.last_log[..4] != RETURN_PREFIX {
        return Err(ExecutorError::UnknownReturnPrefix);
    }
    let message_id = decode_bytes32(&ntt_transfer.last_log[4..])
        .map_err(|_| ExecutorError::InvalidEncodingLength { field: "message_id" })?;

    let recipient_chain = decode_u16(ntt_transfer.arg(2, "recipient_chain")?)
        .map_err(|_| ExecutorError::InvalidEncodingLength { field: "recipient_chain" })?;
    let ntt_transfer_amount = decode_u64(ntt_transfer.arg(1, "ntt_transfer_amount")?)
        .map_err(|_| ExecutorError::InvalidEncodingLength { field: "ntt_transfer_amount" })?;

    // referrer leg
    if pay_referrer.xfer_asset != ntt_send_token.xfer_asset {
        return Err(ExecutorError::UnknownPayReferrerAsset);
    }
    if pay_referrer.sender != ntt_send_token.sender {
        return Err(ExecutorError::PayReferrerSenderMismatch);
    }
    if pay_referrer.asset_receiver != fee_args.payee {
        return Err(ExecutorError::UnknownPayReferrerReceiver);
    }

    // split amounts must match exactly, no rounding tolerance
    let referrer_amount = calculate_fee(amount, fee_args.dbps);
    if pay_referrer.asset_amount != referrer_amount {
        return Err(ExecutorError::IncorrectReferrerAmount);
    }
    let expected_transfer = amount
        .checked_sub(referrer_amount)
        .ok_or(ExecutorError::IncorrectNttTransferAmount)?;
    if ntt_transfer_amount != expected_transfer {
        return Err(ExecutorError::IncorrectNttTransferAmount);
    }

    Ok(NttTransferFacts {
        recipient_chain,
        message_id,
        src_manager: u64_to_bytes32(ntt_transfer.app_id),
    })
}

/// Wraps a peer NTT-manager transfer with a referrer fee split and a
/// native-currency executor fee forwarded into the wrapped
/// [`Executor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NttManagerWithExecutor {
    our_chain: u16,
    address: Address,
    executor: Executor,
    selectors: NttTransferSelectors,
}

impl NttManagerWithExecutor {
    pub fn new(
        our_chain: u16,
        address: Address,
        executor: Executor,
        selectors: NttTransferSelectors,
    ) -> Self {
        Self { our_chain, address, executor, selectors }
    }

    pub fn version(&self) -> &'static str {
        NTT_MANAGER_WITH_EXECUTOR_VERSION
    }

    /// Validates the atomic {ntt send, ntt transfer, pay executor, pay
    /// referrer} group, then forwards the executor fee and a freshly
    /// built `ERN1` request into the wrapped executor.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer<H: ChainHost, P: NttManagerPeer>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        ntt_send_token: &GroupTxn,
        ntt_transfer: &GroupTxn,
        pay_executor: &GroupTxn,
        pay_referrer: &GroupTxn,
        amount: u64,
        executor_args_bytes: &[u8],
        fee_args_bytes: &[u8],
        peers: &P,
    ) -> Result<(), ExecutorError> {
        let ntt_send_token = ntt_send_token.asset_transfer()?;
        let ntt_transfer = ntt_transfer.app_call()?;
        let pay_executor = pay_executor.payment()?;
        let pay_referrer = pay_referrer.asset_transfer()?;

        let executor_args = ExecutorArgs::decode(executor_args_bytes)?;
        let fee_args = FeeArgs::decode(fee_args_bytes)?;

        if pay_executor.sender != ctx.sender {
            return Err(ExecutorError::PayExecutorSenderMismatch);
        }
        if pay_executor.receiver != self.address {
            return Err(ExecutorError::UnknownPayExecutorReceiver);
        }

        let facts = validate_ntt_legs(
            &self.selectors,
            ntt_send_token,
            ntt_transfer,
            pay_referrer,
            amount,
            &fee_args,
        )?;

        debug!(
            recipient_chain = facts.recipient_chain,
            amount, "ntt transfer with execution relay"
        );

        let dst_addr = peers.peer_contract(facts.recipient_chain)?;
        let request_bytes =
            make_ntt_v1_request(self.our_chain, facts.src_manager, facts.message_id);

        let inner_fee = GroupTxn::Payment(PaymentTxn {
            sender: self.address,
            receiver: self.executor.address(),
            amount: pay_executor.amount,
        });
        self.executor.request_execution(
            host,
            &CallContext { sender: self.address },
            &inner_fee,
            &RequestForExecutionArgs {
                dst_chain: facts.recipient_chain,
                dst_addr,
                refund_addr: executor_args.refund_address,
                // re-framed with wire length prefixes; the inner
                // executor validates them byte-exactly
                signed_quote_bytes: encode_length_prefixed(executor_args.signed_quote_bytes)
                    .as_slice(),
                request_bytes: encode_length_prefixed(&request_bytes).as_slice(),
                relay_instructions: encode_length_prefixed(executor_args.relay_instructions)
                    .as_slice(),
            },
        )
    }
}

/// Wraps a peer NTT-manager transfer with a referrer fee split and a
/// token-denominated executor fee forwarded into the wrapped
/// [`TokenPaymentExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NttManagerWithTokenPaymentExecutor {
    our_chain: u16,
    address: Address,
    executor: TokenPaymentExecutor,
    selectors: NttTransferSelectors,
}

impl NttManagerWithTokenPaymentExecutor {
    pub fn new(
        our_chain: u16,
        address: Address,
        executor: TokenPaymentExecutor,
        selectors: NttTransferSelectors,
    ) -> Self {
        Self { our_chain, address, executor, selectors }
    }

    pub fn version(&self) -> &'static str {
        NTT_MANAGER_WITH_TOKEN_PAYMENT_EXECUTOR_VERSION
    }

    /// Same as [`NttManagerWithExecutor::transfer`] with the executor
    /// fee leg paid in the quote's custom token.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer<H: ChainHost, P: NttManagerPeer>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        ntt_send_token: &GroupTxn,
        ntt_transfer: &GroupTxn,
        pay_executor: &GroupTxn,
        pay_referrer: &GroupTxn,
        amount: u64,
        executor_args_bytes: &[u8],
        fee_args_bytes: &[u8],
        peers: &P,
    ) -> Result<(), ExecutorError> {
        let ntt_send_token = ntt_send_token.asset_transfer()?;
        let ntt_transfer = ntt_transfer.app_call()?;
        let pay_executor = pay_executor.asset_transfer()?;
        let pay_referrer = pay_referrer.asset_transfer()?;

        let executor_args = ExecutorArgs::decode(executor_args_bytes)?;
        let fee_args = FeeArgs::decode(fee_args_bytes)?;

        if pay_executor.sender != ctx.sender {
            return Err(ExecutorError::PayExecutorSenderMismatch);
        }
        if pay_executor.asset_receiver != self.address {
            return Err(ExecutorError::UnknownPayExecutorReceiver);
        }

        let facts = validate_ntt_legs(
            &self.selectors,
            ntt_send_token,
            ntt_transfer,
            pay_referrer,
            amount,
            &fee_args,
        )?;

        let dst_addr = peers.peer_contract(facts.recipient_chain)?;
        let request_bytes =
            make_ntt_v1_request(self.our_chain, facts.src_manager, facts.message_id);

        let inner_fee = GroupTxn::AssetTransfer(AssetTransferTxn {
            sender: self.address,
            asset_receiver: self.executor.address(),
            xfer_asset: pay_executor.xfer_asset,
            asset_amount: pay_executor.asset_amount,
        });
        self.executor.request_execution_with_token_payment(
            host,
            &CallContext { sender: self.address },
            &inner_fee,
            &RequestForExecutionArgs {
                dst_chain: facts.recipient_chain,
                dst_addr,
                refund_addr: executor_args.refund_address,
                // re-framed with wire length prefixes; the inner
                // executor validates them byte-exactly
                signed_quote_bytes: encode_length_prefixed(executor_args.signed_quote_bytes)
                    .as_slice(),
                request_bytes: encode_length_prefixed(&request_bytes).as_slice(),
                relay_instructions: encode_length_prefixed(executor_args.relay_instructions)
                    .as_slice(),
            },
        )
    }
}
