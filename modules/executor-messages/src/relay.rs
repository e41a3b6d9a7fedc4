//! Relay instruction codec.
//!
//! Relay instructions tell the executor how to relay a message.
//! Instructions are concatenated together. Each instruction starts with
//! a 1-byte type discriminator followed by type-specific data. All
//! multi-byte integers are big-endian.

use alloc::vec::Vec;

use crate::bytes::{read_fixed, read_u128, BytesError};

/// Relay instruction type discriminators
pub const RELAY_IX_GAS: u8 = 1;
pub const RELAY_IX_GAS_DROP_OFF: u8 = 2;

/// Encodes a Gas relay instruction.
///
/// Layout (33 bytes):
/// - type: u8 = 1
/// - gas_limit: u128 be (16 bytes)
/// - msg_value: u128 be (16 bytes)
pub fn encode_gas(gas_limit: u128, msg_value: u128) -> Vec<u8> {
    let mut out = Vec::with_capacity(33);
    out.push(RELAY_IX_GAS);
    out.extend_from_slice(&gas_limit.to_be_bytes());
    out.extend_from_slice(&msg_value.to_be_bytes());
    out
}

/// Encodes a GasDropOff relay instruction.
///
/// Layout (49 bytes):
/// - type: u8 = 2
/// - drop_off: u128 be (16 bytes)
/// - recipient: [u8; 32] (universal address)
pub fn encode_gas_drop_off(drop_off: u128, recipient: &[u8; 32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(49);
    out.push(RELAY_IX_GAS_DROP_OFF);
    out.extend_from_slice(&drop_off.to_be_bytes());
    out.extend_from_slice(recipient);
    out
}

/// Builder for constructing relay instructions.
///
/// Multiple instructions can be combined by appending them together.
/// This is a convenience wrapper that allows chaining.
#[derive(Default)]
pub struct RelayInstructionsBuilder {
    data: Vec<u8>,
}

impl RelayInstructionsBuilder {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Add a Gas instruction to the relay instructions.
    pub fn with_gas(mut self, gas_limit: u128, msg_value: u128) -> Self {
        self.data.extend(encode_gas(gas_limit, msg_value));
        self
    }

    /// Add a GasDropOff instruction to the relay instructions.
    pub fn with_gas_drop_off(mut self, drop_off: u128, recipient: &[u8; 32]) -> Self {
        self.data.extend(encode_gas_drop_off(drop_off, recipient));
        self
    }

    /// Build the final relay instructions bytes.
    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

/// Relay instruction parse errors.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayParseError {
    /// Unknown relay instruction type
    UnsupportedType = 0,
    /// More than one drop-off instruction found
    MultipleDropOff = 1,
    /// Arithmetic overflow when accumulating gas_limit or msg_value
    Overflow = 2,
    /// Instruction data truncated / not enough bytes
    Truncated = 3,
}

/// A decoded relay instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayInstruction {
    Gas { gas_limit: u128, msg_value: u128 },
    GasDropOff { drop_off: u128, recipient: [u8; 32] },
}

/// Decodes a relay instruction stream into its instructions.
///
/// The stream is a flat concatenation of `type || payload`; decoding
/// runs until the bytes are exhausted. Unknown types and truncated
/// payloads are hard errors. No ordering constraint is imposed between
/// instruction kinds.
pub fn decode_relay_instructions(data: &[u8]) -> Result<Vec<RelayInstruction>, RelayParseError> {
    let mut out = Vec::new();
    let mut offset = 0;

    while offset < data.len() {
        let ix_type = data[offset];
        offset += 1;

        match ix_type {
            RELAY_IX_GAS => {
                let gas_limit = read_u128(data, offset).map_err(truncated)?;
                let msg_value = read_u128(data, offset + 16).map_err(truncated)?;
                offset += 32;
                out.push(RelayInstruction::Gas { gas_limit, msg_value });
            }
            RELAY_IX_GAS_DROP_OFF => {
                let drop_off = read_u128(data, offset).map_err(truncated)?;
                let recipient = read_fixed::<32>(data, offset + 16).map_err(truncated)?;
                offset += 48;
                out.push(RelayInstruction::GasDropOff { drop_off, recipient });
            }
            _ => {
                return Err(RelayParseError::UnsupportedType);
            }
        }
    }

    Ok(out)
}

fn truncated(_: BytesError) -> RelayParseError {
    RelayParseError::Truncated
}

/// Parses relay instructions to extract total gas limit and msg value.
///
/// Returns `(gas_limit, msg_value)` on success. Multiple gas
/// instructions are summed. Only one drop-off is allowed; its amount
/// counts toward `msg_value`.
pub fn total_gas_and_msg_value(data: &[u8]) -> Result<(u128, u128), RelayParseError> {
    let mut gas_limit: u128 = 0;
    let mut msg_value: u128 = 0;
    let mut has_drop_off = false;

    for instruction in decode_relay_instructions(data)? {
        match instruction {
            RelayInstruction::Gas {
                gas_limit: ix_gas_limit,
                msg_value: ix_msg_value,
            } => {
                gas_limit = gas_limit
                    .checked_add(ix_gas_limit)
                    .ok_or(RelayParseError::Overflow)?;
                msg_value = msg_value
                    .checked_add(ix_msg_value)
                    .ok_or(RelayParseError::Overflow)?;
            }
            RelayInstruction::GasDropOff { drop_off, .. } => {
                if has_drop_off {
                    return Err(RelayParseError::MultipleDropOff);
                }
                has_drop_off = true;
                msg_value = msg_value
                    .checked_add(drop_off)
                    .ok_or(RelayParseError::Overflow)?;
            }
        }
    }

    Ok((gas_limit, msg_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_encode_gas() {
        let result = encode_gas(250_000, 1_000_000);
        assert_eq!(result.len(), 33);
        assert_eq!(result[0], RELAY_IX_GAS);
        assert_eq!(&result[1..17], &250_000u128.to_be_bytes());
        assert_eq!(&result[17..33], &1_000_000u128.to_be_bytes());
    }

    #[test]
    fn test_encode_gas_drop_off() {
        let recipient = [0xAB; 32];
        let result = encode_gas_drop_off(500_000, &recipient);
        assert_eq!(result.len(), 49);
        assert_eq!(result[0], RELAY_IX_GAS_DROP_OFF);
        assert_eq!(&result[1..17], &500_000u128.to_be_bytes());
        assert_eq!(&result[17..49], &recipient);
    }

    #[test]
    fn test_builder() {
        let recipient = [0xCD; 32];
        let result = RelayInstructionsBuilder::new()
            .with_gas(100_000, 200_000)
            .with_gas_drop_off(300_000, &recipient)
            .build();

        // Total: 33 + 49 = 82 bytes
        assert_eq!(result.len(), 82);
        assert_eq!(result[0], RELAY_IX_GAS);
        assert_eq!(result[33], RELAY_IX_GAS_DROP_OFF);
    }

    #[test]
    fn test_builder_empty() {
        assert_eq!(RelayInstructionsBuilder::new().build().len(), 0);
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_relay_instructions(&[]), Ok(vec![]));
    }

    #[test]
    fn test_decode_roundtrip() {
        let recipient = [0x42; 32];
        let data = RelayInstructionsBuilder::new()
            .with_gas(100_000, 200_000)
            .with_gas_drop_off(300_000, &recipient)
            .build();
        assert_eq!(
            decode_relay_instructions(&data),
            Ok(vec![
                RelayInstruction::Gas { gas_limit: 100_000, msg_value: 200_000 },
                RelayInstruction::GasDropOff { drop_off: 300_000, recipient },
            ])
        );
    }

    #[test]
    fn test_decode_order_not_constrained() {
        let recipient = [0x42; 32];
        let mut data = encode_gas_drop_off(1, &recipient);
        data.extend(encode_gas(2, 3));
        let decoded = decode_relay_instructions(&data).unwrap();
        assert!(matches!(decoded[0], RelayInstruction::GasDropOff { .. }));
        assert!(matches!(decoded[1], RelayInstruction::Gas { .. }));
    }

    #[test]
    fn test_decode_invalid_type() {
        let data = [0xFF, 0x00, 0x00];
        assert_eq!(decode_relay_instructions(&data), Err(RelayParseError::UnsupportedType));
    }

    #[test]
    fn test_decode_truncated_gas() {
        let mut data = vec![RELAY_IX_GAS];
        data.extend_from_slice(&[0u8; 10]);
        assert_eq!(decode_relay_instructions(&data), Err(RelayParseError::Truncated));
    }

    #[test]
    fn test_decode_truncated_drop_off() {
        let mut data = vec![RELAY_IX_GAS_DROP_OFF];
        data.extend_from_slice(&[0u8; 20]);
        assert_eq!(decode_relay_instructions(&data), Err(RelayParseError::Truncated));
    }

    #[test]
    fn test_totals_gas_and_drop_off() {
        let recipient = [0xCD; 32];
        let data = RelayInstructionsBuilder::new()
            .with_gas(100_000, 200_000)
            .with_gas_drop_off(300_000, &recipient)
            .build();
        assert_eq!(total_gas_and_msg_value(&data), Ok((100_000, 500_000)));
    }

    #[test]
    fn test_totals_multiple_gas() {
        let mut data = encode_gas(100_000, 50_000);
        data.extend(encode_gas(200_000, 75_000));
        data.extend(encode_gas(50_000, 25_000));
        assert_eq!(total_gas_and_msg_value(&data), Ok((350_000, 150_000)));
    }

    #[test]
    fn test_totals_multiple_drop_off() {
        let recipient = [0xAB; 32];
        let mut data = encode_gas_drop_off(100_000, &recipient);
        data.extend(encode_gas_drop_off(200_000, &recipient));
        assert_eq!(total_gas_and_msg_value(&data), Err(RelayParseError::MultipleDropOff));
    }

    #[test]
    fn test_totals_overflow() {
        let mut data = encode_gas(u128::MAX, 0);
        data.extend(encode_gas(1, 0));
        assert_eq!(total_gas_and_msg_value(&data), Err(RelayParseError::Overflow));

        let mut data = encode_gas(0, u128::MAX);
        data.extend(encode_gas(0, 1));
        assert_eq!(total_gas_and_msg_value(&data), Err(RelayParseError::Overflow));
    }
}
