//! Fee collection in a whitelisted token instead of native currency.

use tracing::debug;

use executor_messages::bytes::safe_bytes32_to_u64;
use executor_messages::quote::{custom_token_address, SignedQuoteHeader, CUSTOM_TOKEN_FEE_PREFIX};

use crate::args::read_dynamic_arg;
use crate::chain::{Address, CallContext, ChainHost, GroupTxn, PaymentTxn};
use crate::error::ExecutorError;
use crate::event::Event;
use crate::request::{Executor, RequestForExecutionArgs};
use crate::state::TokenWhitelist;

pub const TOKEN_PAYMENT_EXECUTOR_VERSION: &str = "TokenPaymentExecutor-0.0.1";

/// Same state machine as [`Executor`], with the fee leg paid in a
/// whitelisted fungible token named by an `EQC1` quote. Delegates to a
/// wrapped inner executor with a zero-amount payment once the token
/// fee is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPaymentExecutor {
    address: Address,
    executor: Executor,
    whitelist: TokenWhitelist,
}

impl TokenPaymentExecutor {
    pub fn new(address: Address, executor: Executor) -> Self {
        Self {
            address,
            executor,
            whitelist: TokenWhitelist::new(),
        }
    }

    pub fn version(&self) -> &'static str {
        TOKEN_PAYMENT_EXECUTOR_VERSION
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn is_whitelisted(&self, asset_id: u64) -> bool {
        self.whitelist.contains(asset_id)
    }

    /// Records an asset as payable and opts the component into it via
    /// a zero-amount self transfer (a no-op on chains without explicit
    /// asset registration).
    pub fn whitelist_token_for_payment<H: ChainHost>(
        &mut self,
        host: &mut H,
        asset_id: u64,
    ) -> Result<(), ExecutorError> {
        self.whitelist.insert(asset_id);
        host.submit_asset_transfer(asset_id, self.address, 0)?;
        debug!(asset_id, "token whitelisted for fee payment");
        Ok(())
    }

    /// Validates an atomic {token fee transfer, request} group,
    /// forwards the token fee to the quote's payee and delegates to
    /// the inner executor, which emits `RequestForExecution`.
    pub fn request_execution_with_token_payment<H: ChainHost>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        fee_payment: &GroupTxn,
        args: &RequestForExecutionArgs<'_>,
    ) -> Result<(), ExecutorError> {
        let fee_payment = fee_payment.asset_transfer()?;

        let signed_quote = read_dynamic_arg(args.signed_quote_bytes, "signed_quote_bytes")?;
        let quote = SignedQuoteHeader::decode(signed_quote)?;
        quote.require_prefix(CUSTOM_TOKEN_FEE_PREFIX)?;

        let token_address = custom_token_address(signed_quote)?;
        let asset_id = safe_bytes32_to_u64(&token_address)
            .map_err(|_| ExecutorError::UnsafeAddressConversion)?;

        if fee_payment.sender != ctx.sender {
            return Err(ExecutorError::FeeSenderMismatch);
        }
        if fee_payment.asset_receiver != self.address {
            return Err(ExecutorError::UnknownFeeReceiver);
        }
        if fee_payment.xfer_asset != asset_id || !self.whitelist.contains(asset_id) {
            return Err(ExecutorError::UnknownAssetId);
        }

        // forward payment to payee, amount is not checked
        host.submit_asset_transfer(asset_id, quote.payee_address, fee_payment.asset_amount)?;

        host.emit(Event::PaymentInToken {
            asset_id,
            amount: fee_payment.asset_amount,
        });

        // zero native payment because the token payment covers the
        // entire cost
        let inner_fee = GroupTxn::Payment(PaymentTxn {
            sender: self.address,
            receiver: self.executor.address(),
            amount: 0,
        });
        self.executor
            .request_execution(host, &CallContext { sender: self.address }, &inner_fee, args)
    }
}
