//! Execution relay protocol core.
//!
//! A user on a source chain pays a quoted fee to request that an
//! off-chain executor deliver a message (a VAA, an NTT transfer, or a
//! generic request payload) on a destination chain, optionally with a
//! gas drop-off to the recipient. This crate holds the protocol state
//! machine once, chain-agnostically: validation of atomic operation
//! groups, fee forwarding and splitting, and receive-side delivery
//! accounting. Chain specifics (timestamps, group introspection,
//! outbound transfers, event logs, external calls) sit behind the
//! [`chain::ChainHost`] trait.
//!
//! Wire formats live in the `executor-messages` crate, re-exported as
//! [`messages`].

pub mod args;
pub mod chain;
pub mod error;
pub mod event;
pub mod receive;
pub mod request;
pub mod state;

pub use executor_messages as messages;

pub use chain::{Address, CallContext, CapturedFailure, ChainHost, GroupTxn};
pub use error::ExecutorError;
pub use event::Event;
