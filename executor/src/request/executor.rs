//! Fee collection and `RequestForExecution` emission.

use tracing::debug;

use executor_messages::quote::SignedQuoteHeader;

use crate::args::read_dynamic_arg;
use crate::chain::{Address, CallContext, ChainHost, GroupTxn};
use crate::error::ExecutorError;
use crate::event::Event;

pub const EXECUTOR_VERSION: &str = "Executor-0.0.1";

/// Arguments of a `request_execution` call. Dynamic byte fields carry
/// their 2-byte wire length prefix and are validated byte-exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestForExecutionArgs<'a> {
    pub dst_chain: u16,
    pub dst_addr: [u8; 32],
    pub refund_addr: Address,
    pub signed_quote_bytes: &'a [u8],
    pub request_bytes: &'a [u8],
    pub relay_instructions: &'a [u8],
}

/// Collects a native-currency execution fee and emits the canonical
/// `RequestForExecution` event.
///
/// Single-shot: no state beyond the chain id and own address fixed at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executor {
    our_chain: u16,
    address: Address,
}

impl Executor {
    pub fn new(our_chain: u16, address: Address) -> Self {
        Self { our_chain, address }
    }

    pub fn version(&self) -> &'static str {
        EXECUTOR_VERSION
    }

    pub fn our_chain(&self) -> u16 {
        self.our_chain
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Validates an atomic {fee payment, request} group, forwards the
    /// full fee to the quote's payee and emits `RequestForExecution`.
    ///
    /// The fee amount itself is not checked against the quote; pricing
    /// is enforced off-chain by the executor honoring (or not) the
    /// request.
    pub fn request_execution<H: ChainHost>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        fee_payment: &GroupTxn,
        args: &RequestForExecutionArgs<'_>,
    ) -> Result<(), ExecutorError> {
        let fee_payment = fee_payment.payment()?;

        let signed_quote = read_dynamic_arg(args.signed_quote_bytes, "signed_quote_bytes")?;
        let request_bytes = read_dynamic_arg(args.request_bytes, "request_bytes")?;
        let relay_instructions = read_dynamic_arg(args.relay_instructions, "relay_instructions")?;

        let quote = SignedQuoteHeader::decode(signed_quote)?;
        quote.validate(self.our_chain, args.dst_chain, host.now())?;

        if fee_payment.sender != ctx.sender {
            return Err(ExecutorError::FeeSenderMismatch);
        }
        if fee_payment.receiver != self.address {
            return Err(ExecutorError::UnknownFeeReceiver);
        }

        // forward payment to payee, amount is not checked
        host.submit_payment(quote.payee_address, fee_payment.amount)?;

        debug!(
            dst_chain = args.dst_chain,
            amount = fee_payment.amount,
            "execution requested"
        );

        host.emit(Event::RequestForExecution {
            quoter_address: quote.quoter_address,
            amount: fee_payment.amount,
            dst_chain: args.dst_chain,
            dst_addr: args.dst_addr,
            refund_addr: args.refund_addr,
            signed_quote_bytes: signed_quote.to_vec(),
            request_bytes: request_bytes.to_vec(),
            relay_instructions: relay_instructions.to_vec(),
        });

        Ok(())
    }
}
