//! Wire-format codecs for the execution relay protocol.
//!
//! All multi-byte integers are big-endian. Decoders are byte-exact: a
//! fixed field decoded from the wrong number of bytes, or a dynamic
//! field whose length prefix disagrees with its actual byte count, is a
//! hard error rather than being truncated or padded.

#![no_std]

extern crate alloc;

pub mod bytes;
pub mod maths;
pub mod quote;
pub mod relay;
pub mod request;

pub use bytes::BytesError;
pub use quote::{QuoteError, SignedQuoteHeader};
pub use relay::{RelayInstruction, RelayParseError};
pub use request::{Request, RequestError};
