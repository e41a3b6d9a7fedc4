//! Signed quote codec and validation.
//!
//! A signed quote is a fixed 68-byte header followed by a fee-scheme
//! specific body. The 4-byte prefix names the scheme:
//!
//! - `EQ01`: native-currency fee, body
//!   `base_fee(8) || dst_gas_price(8) || src_price(8) || dst_price(8) || signature(65)`
//! - `EQC1`: custom-token fee, same body with `token_address(32)`
//!   inserted before the signature
//!
//! The trailing signature is checked structurally (65 bytes) but never
//! verified cryptographically here; the quoter address is opaque and
//! echoed in events.

use alloc::vec::Vec;

use crate::bytes::{read_fixed, read_u16, read_u64};

/// Quote fee-scheme prefixes.
pub const NATIVE_TOKEN_FEE_PREFIX: &[u8; 4] = b"EQ01";
pub const CUSTOM_TOKEN_FEE_PREFIX: &[u8; 4] = b"EQC1";

/// Header layout: `prefix(4) || quoter(20) || payee(32) || src_chain(2)
/// || dst_chain(2) || expiry_time(8)`.
pub const SIGNED_QUOTE_HEADER_LEN: usize = 68;

const OFFSET_QUOTER: usize = 4;
const OFFSET_PAYEE: usize = 24;
const OFFSET_SRC_CHAIN: usize = 56;
const OFFSET_DST_CHAIN: usize = 58;
const OFFSET_EXPIRY: usize = 60;
/// Token address offset within a custom-token quote (header + 4 fee fields).
const OFFSET_TOKEN_ADDRESS: usize = 100;

pub const SIGNATURE_LEN: usize = 65;

/// Quote parse and validation errors.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    /// Input shorter than the expected fixed layout
    InvalidLength = 0,
    /// Prefix does not name the expected fee scheme
    PrefixMismatch = 1,
    /// Quote source chain differs from the local chain
    SourceChainMismatch = 2,
    /// Quote destination chain differs from the requested destination
    DestinationChainMismatch = 3,
    /// Reference time at or past the expiry time
    Expired = 4,
}

/// Fixed signed-quote header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedQuoteHeader {
    pub prefix: [u8; 4],
    pub quoter_address: [u8; 20],
    pub payee_address: [u8; 32],
    pub src_chain: u16,
    pub dst_chain: u16,
    pub expiry_time: u64,
}

impl SignedQuoteHeader {
    /// Decodes the fixed 68-byte header from the front of a signed
    /// quote. Trailing body bytes are ignored.
    pub fn decode(data: &[u8]) -> Result<Self, QuoteError> {
        if data.len() < SIGNED_QUOTE_HEADER_LEN {
            return Err(QuoteError::InvalidLength);
        }
        Ok(Self {
            prefix: read_fixed::<4>(data, 0).map_err(|_| QuoteError::InvalidLength)?,
            quoter_address: read_fixed::<20>(data, OFFSET_QUOTER)
                .map_err(|_| QuoteError::InvalidLength)?,
            payee_address: read_fixed::<32>(data, OFFSET_PAYEE)
                .map_err(|_| QuoteError::InvalidLength)?,
            src_chain: read_u16(data, OFFSET_SRC_CHAIN).map_err(|_| QuoteError::InvalidLength)?,
            dst_chain: read_u16(data, OFFSET_DST_CHAIN).map_err(|_| QuoteError::InvalidLength)?,
            expiry_time: read_u64(data, OFFSET_EXPIRY).map_err(|_| QuoteError::InvalidLength)?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNED_QUOTE_HEADER_LEN);
        out.extend_from_slice(&self.prefix);
        out.extend_from_slice(&self.quoter_address);
        out.extend_from_slice(&self.payee_address);
        out.extend_from_slice(&self.src_chain.to_be_bytes());
        out.extend_from_slice(&self.dst_chain.to_be_bytes());
        out.extend_from_slice(&self.expiry_time.to_be_bytes());
        out
    }

    /// Fails unless the header carries the expected fee-scheme prefix.
    pub fn require_prefix(&self, expected: &[u8; 4]) -> Result<(), QuoteError> {
        if &self.prefix != expected {
            return Err(QuoteError::PrefixMismatch);
        }
        Ok(())
    }

    /// Validates the header against the local chain, the requested
    /// destination and the current time.
    ///
    /// The expiry bound is exclusive: a quote valid exactly at its
    /// expiry time is expired.
    pub fn validate(&self, our_chain: u16, dst_chain: u16, now: u64) -> Result<(), QuoteError> {
        if self.src_chain != our_chain {
            return Err(QuoteError::SourceChainMismatch);
        }
        if self.dst_chain != dst_chain {
            return Err(QuoteError::DestinationChainMismatch);
        }
        if now >= self.expiry_time {
            return Err(QuoteError::Expired);
        }
        Ok(())
    }
}

/// Native-fee quote body (97 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeQuoteBody {
    pub base_fee: u64,
    pub dst_gas_price: u64,
    pub src_price: u64,
    pub dst_price: u64,
    pub signature: [u8; SIGNATURE_LEN],
}

impl NativeQuoteBody {
    pub const LEN: usize = 8 * 4 + SIGNATURE_LEN;

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&self.base_fee.to_be_bytes());
        out.extend_from_slice(&self.dst_gas_price.to_be_bytes());
        out.extend_from_slice(&self.src_price.to_be_bytes());
        out.extend_from_slice(&self.dst_price.to_be_bytes());
        out.extend_from_slice(&self.signature);
        out
    }

    /// Decodes the body trailing a 68-byte header. The supplied slice
    /// must hold the full quote.
    pub fn decode(quote: &[u8]) -> Result<Self, QuoteError> {
        if quote.len() != SIGNED_QUOTE_HEADER_LEN + Self::LEN {
            return Err(QuoteError::InvalidLength);
        }
        let base = SIGNED_QUOTE_HEADER_LEN;
        Ok(Self {
            base_fee: read_u64(quote, base).map_err(|_| QuoteError::InvalidLength)?,
            dst_gas_price: read_u64(quote, base + 8).map_err(|_| QuoteError::InvalidLength)?,
            src_price: read_u64(quote, base + 16).map_err(|_| QuoteError::InvalidLength)?,
            dst_price: read_u64(quote, base + 24).map_err(|_| QuoteError::InvalidLength)?,
            signature: read_fixed::<SIGNATURE_LEN>(quote, base + 32)
                .map_err(|_| QuoteError::InvalidLength)?,
        })
    }
}

/// Custom-token-fee quote body (129 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomTokenQuoteBody {
    pub base_fee: u64,
    pub dst_gas_price: u64,
    pub src_price: u64,
    pub dst_price: u64,
    pub token_address: [u8; 32],
    pub signature: [u8; SIGNATURE_LEN],
}

impl CustomTokenQuoteBody {
    pub const LEN: usize = 8 * 4 + 32 + SIGNATURE_LEN;

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&self.base_fee.to_be_bytes());
        out.extend_from_slice(&self.dst_gas_price.to_be_bytes());
        out.extend_from_slice(&self.src_price.to_be_bytes());
        out.extend_from_slice(&self.dst_price.to_be_bytes());
        out.extend_from_slice(&self.token_address);
        out.extend_from_slice(&self.signature);
        out
    }

    pub fn decode(quote: &[u8]) -> Result<Self, QuoteError> {
        if quote.len() != SIGNED_QUOTE_HEADER_LEN + Self::LEN {
            return Err(QuoteError::InvalidLength);
        }
        let base = SIGNED_QUOTE_HEADER_LEN;
        Ok(Self {
            base_fee: read_u64(quote, base).map_err(|_| QuoteError::InvalidLength)?,
            dst_gas_price: read_u64(quote, base + 8).map_err(|_| QuoteError::InvalidLength)?,
            src_price: read_u64(quote, base + 16).map_err(|_| QuoteError::InvalidLength)?,
            dst_price: read_u64(quote, base + 24).map_err(|_| QuoteError::InvalidLength)?,
            token_address: read_fixed::<32>(quote, OFFSET_TOKEN_ADDRESS)
                .map_err(|_| QuoteError::InvalidLength)?,
            signature: read_fixed::<SIGNATURE_LEN>(quote, base + 64)
                .map_err(|_| QuoteError::InvalidLength)?,
        })
    }
}

/// Extracts the 32-byte token address from a custom-token quote
/// without decoding the whole body.
pub fn custom_token_address(quote: &[u8]) -> Result<[u8; 32], QuoteError> {
    read_fixed::<32>(quote, OFFSET_TOKEN_ADDRESS).map_err(|_| QuoteError::InvalidLength)
}

/// Concatenates a header and body into a full signed quote.
pub fn encode_signed_quote(header: &[u8], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(header.len() + body.len());
    out.extend_from_slice(header);
    out.extend_from_slice(body);
    out
}
