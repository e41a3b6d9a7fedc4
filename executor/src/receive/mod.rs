//! Receive-side components: delivery-group validation, gas drop-off
//! accounting and safe-call wrappers.

mod group;
mod safe;

pub use group::{
    NttV1ReceiveWithGasDropOff, VaaV1ReceiveWithGasDropOff, NTT_V1_RECEIVE_VERSION,
    VAA_V1_RECEIVE_VERSION,
};
pub use safe::{
    SafeMultiReceiveWithGasDropOff, SafeVaaV1ReceiveWithGasDropOff,
    RETURN_DATA_TRUNCATION_THRESHOLD, SAFE_MULTI_RECEIVE_VERSION, SAFE_VAA_V1_RECEIVE_VERSION,
};
