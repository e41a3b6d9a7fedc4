//! ABI argument decoding for entry-point calls.
//!
//! Dynamic byte arguments arrive length-prefixed (2-byte big-endian)
//! and must be byte-exact. Tuples follow the head/tail layout: static
//! fields and 2-byte tail offsets in the head, each tail a
//! length-prefixed byte string. Tail offsets must point exactly at the
//! start of their section.

use executor_messages::bytes::{decode_length_prefixed, read_fixed, read_u16};

use crate::chain::Address;
use crate::error::ExecutorError;

/// Decodes a length-prefixed dynamic argument. The prefix must equal
/// the remaining byte count exactly.
pub fn read_dynamic_arg<'a>(data: &'a [u8], field: &'static str) -> Result<&'a [u8], ExecutorError> {
    decode_length_prefixed(data).map_err(|_| ExecutorError::InvalidEncodingLength { field })
}

/// The executor-facing argument bundle passed through a manager call:
/// `refund_address(32) || off1(2) || off2(2) || tail1 || tail2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorArgs<'a> {
    pub refund_address: Address,
    pub signed_quote_bytes: &'a [u8],
    pub relay_instructions: &'a [u8],
}

impl<'a> ExecutorArgs<'a> {
    /// Head size: refund address plus the two tail offsets.
    const HEAD_LEN: usize = 32 + 2 + 2;

    pub fn decode(data: &'a [u8]) -> Result<Self, ExecutorError> {
        if data.len() < Self::HEAD_LEN {
            return Err(ExecutorError::InvalidTupleEncoding);
        }
        let refund_address =
            read_fixed::<32>(data, 0).map_err(|_| ExecutorError::InvalidTupleEncoding)?;
        let off1 = read_u16(data, 32).map_err(|_| ExecutorError::InvalidTupleEncoding)? as usize;
        let off2 = read_u16(data, 34).map_err(|_| ExecutorError::InvalidTupleEncoding)? as usize;

        // the first tail must start immediately after the head
        if off1 != Self::HEAD_LEN {
            return Err(ExecutorError::InvalidTailPointer(1));
        }
        let len1 = read_u16(data, off1).map_err(|_| ExecutorError::InvalidTupleEncoding)? as usize;
        let tail1_end = off1 + 2 + len1;
        if tail1_end > data.len() {
            return Err(ExecutorError::InvalidTupleEncoding);
        }
        let signed_quote_bytes = &data[off1 + 2..tail1_end];

        // the second tail must start exactly where the first ends
        if off2 != tail1_end {
            return Err(ExecutorError::InvalidTailPointer(2));
        }
        let len2 = read_u16(data, off2).map_err(|_| ExecutorError::InvalidTupleEncoding)? as usize;
        let tail2_end = off2 + 2 + len2;
        if tail2_end != data.len() {
            return Err(ExecutorError::InvalidTupleEncoding);
        }
        let relay_instructions = &data[off2 + 2..tail2_end];

        Ok(Self {
            refund_address,
            signed_quote_bytes,
            relay_instructions,
        })
    }

    /// Encodes the tuple with correct tail pointers.
    pub fn encode(&self) -> Vec<u8> {
        let off1 = Self::HEAD_LEN;
        let off2 = off1 + 2 + self.signed_quote_bytes.len();
        let mut out = Vec::with_capacity(off2 + 2 + self.relay_instructions.len());
        out.extend_from_slice(&self.refund_address);
        out.extend_from_slice(&(off1 as u16).to_be_bytes());
        out.extend_from_slice(&(off2 as u16).to_be_bytes());
        out.extend_from_slice(&(self.signed_quote_bytes.len() as u16).to_be_bytes());
        out.extend_from_slice(self.signed_quote_bytes);
        out.extend_from_slice(&(self.relay_instructions.len() as u16).to_be_bytes());
        out.extend_from_slice(self.relay_instructions);
        out
    }
}

/// Referrer fee split: `dbps(2) || payee(32)`, static 34 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeArgs {
    /// Fee share in tenths of basis points (100_000 = 100%).
    pub dbps: u16,
    /// The referrer receiving the fee share.
    pub payee: Address,
}

impl FeeArgs {
    pub const LEN: usize = 2 + 32;

    pub fn decode(data: &[u8]) -> Result<Self, ExecutorError> {
        if data.len() != Self::LEN {
            return Err(ExecutorError::InvalidTupleEncoding);
        }
        Ok(Self {
            dbps: read_u16(data, 0).map_err(|_| ExecutorError::InvalidTupleEncoding)?,
            payee: read_fixed::<32>(data, 2).map_err(|_| ExecutorError::InvalidTupleEncoding)?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&self.dbps.to_be_bytes());
        out.extend_from_slice(&self.payee);
        out
    }
}
