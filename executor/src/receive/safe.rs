//! Safe-call receive wrappers.
//!
//! Invoke the underlying receiver through a call that captures revert
//! data instead of propagating it, so the relay's own accounting
//! commits even when the payload delivery fails. A call that exhausts
//! its whole gas allocation is treated as a silent failure; any other
//! captured reason is truncated to a fixed threshold so the outcome
//! event stays bounded.

use tracing::debug;

use crate::chain::{Address, CapturedFailure, ChainHost};
use crate::error::ExecutorError;
use crate::event::Event;

pub const SAFE_VAA_V1_RECEIVE_VERSION: &str = "SafeVaaV1ReceiveWithGasDropOff-0.0.1";
pub const SAFE_MULTI_RECEIVE_VERSION: &str = "SafeMultiReceiveWithGasDropOff-0.0.1";

/// Maximum size of a captured failure reason carried in an outcome
/// event; longer reasons are cut to exactly this many bytes.
pub const RETURN_DATA_TRUNCATION_THRESHOLD: usize = 266;

fn failure_reason(failure: CapturedFailure) -> Vec<u8> {
    if failure.out_of_gas {
        return Vec::new();
    }
    let mut reason = failure.reason;
    reason.truncate(RETURN_DATA_TRUNCATION_THRESHOLD);
    reason
}

/// Single-message safe receive wrapping a VAA receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeVaaV1ReceiveWithGasDropOff {
    receiver: Address,
}

impl SafeVaaV1ReceiveWithGasDropOff {
    pub fn new(receiver: Address) -> Self {
        Self { receiver }
    }

    pub fn version(&self) -> &'static str {
        SAFE_VAA_V1_RECEIVE_VERSION
    }

    pub fn receiver(&self) -> Address {
        self.receiver
    }

    /// Delivers `payload` to the wrapped receiver. On success performs
    /// the gas drop-off and emits a success outcome; on failure emits
    /// a failure outcome with the captured (possibly truncated)
    /// reason. Delivery failure never aborts the group.
    pub fn receive_message<H: ChainHost>(
        &self,
        host: &mut H,
        payload: &[u8],
        drop_off_recipient: Address,
        drop_off_amount: u64,
        gas_budget: u64,
        request_for_execution_id: [u8; 32],
    ) -> Result<(), ExecutorError> {
        match host.invoke(self.receiver, payload, gas_budget) {
            Ok(_) => {
                if drop_off_amount > 0 {
                    host.submit_payment(drop_off_recipient, drop_off_amount)?;
                }
                host.emit(Event::VaaMessageReceived {
                    request_for_execution_id,
                    success: true,
                    reason: Vec::new(),
                });
            }
            Err(failure) => {
                debug!(out_of_gas = failure.out_of_gas, "vaa delivery failed");
                host.emit(Event::VaaMessageReceived {
                    request_for_execution_id,
                    success: false,
                    reason: failure_reason(failure),
                });
            }
        }
        Ok(())
    }
}

/// Batch safe receive wrapping an NTT receiver. One outcome event per
/// message; the drop-off payment is shared across the batch and
/// performed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeMultiReceiveWithGasDropOff {
    receiver: Address,
}

impl SafeMultiReceiveWithGasDropOff {
    pub fn new(receiver: Address) -> Self {
        Self { receiver }
    }

    pub fn version(&self) -> &'static str {
        SAFE_MULTI_RECEIVE_VERSION
    }

    pub fn receiver(&self) -> Address {
        self.receiver
    }

    #[allow(clippy::too_many_arguments)]
    pub fn receive_messages<H: ChainHost>(
        &self,
        host: &mut H,
        payloads: &[Vec<u8>],
        drop_off_recipient: Address,
        drop_off_amount: u64,
        gas_budget: u64,
        request_for_execution_ids: &[[u8; 32]],
    ) -> Result<(), ExecutorError> {
        if payloads.len() != request_for_execution_ids.len() {
            return Err(ExecutorError::BatchLengthMismatch);
        }

        for (payload, id) in payloads.iter().zip(request_for_execution_ids) {
            match host.invoke(self.receiver, payload, gas_budget) {
                Ok(_) => host.emit(Event::NttMessageReceived {
                    request_for_execution_id: *id,
                    success: true,
                    reason: Vec::new(),
                }),
                Err(failure) => host.emit(Event::NttMessageReceived {
                    request_for_execution_id: *id,
                    success: false,
                    reason: failure_reason(failure),
                }),
            }
        }

        if drop_off_amount > 0 {
            host.submit_payment(drop_off_recipient, drop_off_amount)?;
        }

        Ok(())
    }
}
