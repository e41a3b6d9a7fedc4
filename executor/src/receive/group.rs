//! Grouped-delivery validation with gas drop-off.
//!
//! Validates an atomic {gas payment, verify signatures, verify
//! message, deliver, gas drop-off} group against an external
//! verifier/receiver and emits the delivery outcome event. A separate
//! `report_error` entry point emits a failure outcome when off-chain
//! pre-flight finds delivery impossible.

use executor_messages::bytes::decode_bytes32;

use crate::args::read_dynamic_arg;
use crate::chain::{ChainHost, GroupTxn, OnCompletion};
use crate::error::ExecutorError;
use crate::event::Event;

pub const VAA_V1_RECEIVE_VERSION: &str = "VaaV1ReceiveWithGasDropOff-0.0.1";
pub const NTT_V1_RECEIVE_VERSION: &str = "NttV1ReceiveWithGasDropOff-0.0.1";

/// Validates the delivery group shape shared by both receive flavors.
fn validate_receive_group<H: ChainHost>(
    host: &H,
    gas: &GroupTxn,
    verify_sigs: &GroupTxn,
    verify_message: &GroupTxn,
    deliver: &GroupTxn,
    gas_drop_off: &GroupTxn,
    deliver_selector: [u8; 4],
) -> Result<(), ExecutorError> {
    let gas = gas.payment()?;

    // verify_sigs is implicitly required by the verify call; the
    // receiver contract checks the verify call itself, so only the
    // operation kinds are checked here to avoid redundancy
    verify_sigs.app_call()?;
    verify_message.app_call()?;

    let deliver = deliver.app_call()?;
    if deliver.on_completion != OnCompletion::NoOp {
        return Err(ExecutorError::IncorrectCompletionType);
    }
    if deliver.selector()? != deliver_selector {
        return Err(ExecutorError::IncorrectMethod);
    }

    // the gas leg funds the receiver contract
    let receiver_address = host
        .app_address(deliver.app_id)
        .ok_or(ExecutorError::UnknownAppAddress)?;
    if gas.receiver != receiver_address {
        return Err(ExecutorError::UnknownGasReceiver);
    }

    // drop-off amount and recipient are deliberately unconstrained
    gas_drop_off.payment()?;

    Ok(())
}

/// Single-message (VAA) receive with gas drop-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaaV1ReceiveWithGasDropOff {
    execute_vaa_selector: [u8; 4],
}

impl VaaV1ReceiveWithGasDropOff {
    pub fn new(execute_vaa_selector: [u8; 4]) -> Self {
        Self { execute_vaa_selector }
    }

    pub fn version(&self) -> &'static str {
        VAA_V1_RECEIVE_VERSION
    }

    #[allow(clippy::too_many_arguments)]
    pub fn receive_message<H: ChainHost>(
        &self,
        host: &mut H,
        gas: &GroupTxn,
        verify_sigs: &GroupTxn,
        verify_vaa: &GroupTxn,
        execute_vaa: &GroupTxn,
        gas_drop_off: &GroupTxn,
        request_for_execution_id: &[u8],
    ) -> Result<(), ExecutorError> {
        let request_for_execution_id =
            decode_bytes32(request_for_execution_id).map_err(|_| ExecutorError::InvalidRequestId)?;
        validate_receive_group(
            host,
            gas,
            verify_sigs,
            verify_vaa,
            execute_vaa,
            gas_drop_off,
            self.execute_vaa_selector,
        )?;
        host.emit(Event::VaaMessageReceived {
            request_for_execution_id,
            success: true,
            reason: Vec::new(),
        });
        Ok(())
    }

    /// Emits a failure outcome without performing delivery.
    pub fn report_error<H: ChainHost>(
        &self,
        host: &mut H,
        request_for_execution_id: &[u8],
        error_reason: &[u8],
    ) -> Result<(), ExecutorError> {
        let request_for_execution_id =
            decode_bytes32(request_for_execution_id).map_err(|_| ExecutorError::InvalidRequestId)?;
        let reason = read_dynamic_arg(error_reason, "error_reason")?;
        host.emit(Event::VaaMessageReceived {
            request_for_execution_id,
            success: false,
            reason: reason.to_vec(),
        });
        Ok(())
    }
}

/// Multi-message (NTT) receive with gas drop-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NttV1ReceiveWithGasDropOff {
    receive_selector: [u8; 4],
}

impl NttV1ReceiveWithGasDropOff {
    pub fn new(receive_selector: [u8; 4]) -> Self {
        Self { receive_selector }
    }

    pub fn version(&self) -> &'static str {
        NTT_V1_RECEIVE_VERSION
    }

    #[allow(clippy::too_many_arguments)]
    pub fn receive_message<H: ChainHost>(
        &self,
        host: &mut H,
        gas: &GroupTxn,
        verify_sigs: &GroupTxn,
        verify_vaa: &GroupTxn,
        receive_ntt: &GroupTxn,
        gas_drop_off: &GroupTxn,
        request_for_execution_id: &[u8],
    ) -> Result<(), ExecutorError> {
        let request_for_execution_id =
            decode_bytes32(request_for_execution_id).map_err(|_| ExecutorError::InvalidRequestId)?;
        validate_receive_group(
            host,
            gas,
            verify_sigs,
            verify_vaa,
            receive_ntt,
            gas_drop_off,
            self.receive_selector,
        )?;
        host.emit(Event::NttMessageReceived {
            request_for_execution_id,
            success: true,
            reason: Vec::new(),
        });
        Ok(())
    }

    /// Emits a failure outcome without performing delivery.
    pub fn report_error<H: ChainHost>(
        &self,
        host: &mut H,
        request_for_execution_id: &[u8],
        error_reason: &[u8],
    ) -> Result<(), ExecutorError> {
        let request_for_execution_id =
            decode_bytes32(request_for_execution_id).map_err(|_| ExecutorError::InvalidRequestId)?;
        let reason = read_dynamic_arg(error_reason, "error_reason")?;
        host.emit(Event::NttMessageReceived {
            request_for_execution_id,
            success: false,
            reason: reason.to_vec(),
        });
        Ok(())
    }
}
