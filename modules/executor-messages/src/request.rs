//! Request payload codec.
//!
//! A request payload tells the off-chain executor what to deliver. It
//! is treated as an opaque blob by the fee-collection layer and only
//! decoded by the receiving side.

use alloc::vec::Vec;

/// Request type prefixes
pub const REQ_VAA_V1: &[u8; 4] = b"ERV1";
pub const REQ_NTT_V1: &[u8; 4] = b"ERN1";

/// Encodes a version 1 VAA request payload.
pub fn make_vaa_v1_request(emitter_chain: u16, emitter_address: [u8; 32], sequence: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity({
        4 // type
        + 2 // chain
        + 32 // address
        + 8 // sequence
    });
    out.extend_from_slice(REQ_VAA_V1);
    out.extend_from_slice(&emitter_chain.to_be_bytes());
    out.extend_from_slice(&emitter_address);
    out.extend_from_slice(&sequence.to_be_bytes());
    out
}

/// Encodes a version 1 NTT request payload.
pub fn make_ntt_v1_request(
    src_chain: u16,
    src_manager: [u8; 32],
    message_id: [u8; 32],
) -> Vec<u8> {
    let mut out = Vec::with_capacity({
        4 // type
        + 2 // source chain
        + 32 // source manager
        + 32 // message id
    });
    out.extend_from_slice(REQ_NTT_V1);
    out.extend_from_slice(&src_chain.to_be_bytes());
    out.extend_from_slice(&src_manager);
    out.extend_from_slice(&message_id);
    out
}

/// Request parse errors.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Unknown request type prefix
    UnsupportedType = 0,
    /// Payload length does not match the fixed layout for its type
    InvalidLength = 1,
}

/// A decoded request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    VaaV1 {
        emitter_chain: u16,
        emitter_address: [u8; 32],
        sequence: u64,
    },
    NttV1 {
        src_chain: u16,
        src_manager: [u8; 32],
        message_id: [u8; 32],
    },
}

impl Request {
    /// Decodes a request payload. The payload must be exactly the
    /// fixed length for its type; trailing bytes are an error.
    pub fn decode(data: &[u8]) -> Result<Self, RequestError> {
        if data.len() < 4 {
            return Err(RequestError::InvalidLength);
        }
        let prefix: &[u8; 4] = data[..4].try_into().map_err(|_| RequestError::InvalidLength)?;
        match prefix {
            p if p == REQ_VAA_V1 => {
                if data.len() != 4 + 2 + 32 + 8 {
                    return Err(RequestError::InvalidLength);
                }
                let mut emitter_address = [0u8; 32];
                emitter_address.copy_from_slice(&data[6..38]);
                Ok(Request::VaaV1 {
                    emitter_chain: u16::from_be_bytes([data[4], data[5]]),
                    emitter_address,
                    sequence: u64::from_be_bytes(
                        data[38..46].try_into().map_err(|_| RequestError::InvalidLength)?,
                    ),
                })
            }
            p if p == REQ_NTT_V1 => {
                if data.len() != 4 + 2 + 32 + 32 {
                    return Err(RequestError::InvalidLength);
                }
                let mut src_manager = [0u8; 32];
                src_manager.copy_from_slice(&data[6..38]);
                let mut message_id = [0u8; 32];
                message_id.copy_from_slice(&data[38..70]);
                Ok(Request::NttV1 {
                    src_chain: u16::from_be_bytes([data[4], data[5]]),
                    src_manager,
                    message_id,
                })
            }
            _ => Err(RequestError::UnsupportedType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vaa_v1() {
        let result = make_vaa_v1_request(
            10002,
            [
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xd4, 0xa6,
                0xa7, 0x2a, 0x02, 0x55, 0x99, 0xfd, 0x73, 0x57, 0xc0, 0xf1, 0x57, 0xc7, 0x18, 0xd0,
                0xf5, 0xe3, 0x8c, 0x76,
            ],
            29,
        );
        assert_eq!(
            result,
            [
                0x45, 0x52, 0x56, 0x31, 0x27, 0x12, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0xd4, 0xa6, 0xa7, 0x2a, 0x02, 0x55, 0x99, 0xfd, 0x73, 0x57,
                0xc0, 0xf1, 0x57, 0xc7, 0x18, 0xd0, 0xf5, 0xe3, 0x8c, 0x76, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x1d
            ]
        );
    }

    #[test]
    fn test_ntt_v1() {
        let mut message_id: [u8; 32] = [0; 32];
        message_id[24..].copy_from_slice(&29_u64.to_be_bytes());
        let result = make_ntt_v1_request(
            10002,
            [
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xd4, 0xa6,
                0xa7, 0x2a, 0x02, 0x55, 0x99, 0xfd, 0x73, 0x57, 0xc0, 0xf1, 0x57, 0xc7, 0x18, 0xd0,
                0xf5, 0xe3, 0x8c, 0x76,
            ],
            message_id,
        );
        assert_eq!(
            result,
            [
                0x45, 0x52, 0x4E, 0x31, 0x27, 0x12, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0xd4, 0xa6, 0xa7, 0x2a, 0x02, 0x55, 0x99, 0xfd, 0x73, 0x57,
                0xc0, 0xf1, 0x57, 0xc7, 0x18, 0xd0, 0xf5, 0xe3, 0x8c, 0x76, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1d
            ]
        );
    }

    #[test]
    fn test_decode_roundtrip_vaa() {
        let encoded = make_vaa_v1_request(31, [0x44; 32], 7);
        assert_eq!(
            Request::decode(&encoded),
            Ok(Request::VaaV1 {
                emitter_chain: 31,
                emitter_address: [0x44; 32],
                sequence: 7,
            })
        );
    }

    #[test]
    fn test_decode_roundtrip_ntt() {
        let encoded = make_ntt_v1_request(8, [0x55; 32], [0x66; 32]);
        assert_eq!(
            Request::decode(&encoded),
            Ok(Request::NttV1 {
                src_chain: 8,
                src_manager: [0x55; 32],
                message_id: [0x66; 32],
            })
        );
    }

    #[test]
    fn test_decode_unknown_tag() {
        assert_eq!(Request::decode(b"ERXX\x00\x01"), Err(RequestError::UnsupportedType));
    }

    #[test]
    fn test_decode_length_exactness() {
        let mut encoded = make_vaa_v1_request(31, [0x44; 32], 7);
        encoded.pop();
        assert_eq!(Request::decode(&encoded), Err(RequestError::InvalidLength));

        let mut encoded = make_ntt_v1_request(8, [0x55; 32], [0x66; 32]);
        encoded.push(0);
        assert_eq!(Request::decode(&encoded), Err(RequestError::InvalidLength));

        assert_eq!(Request::decode(b"ER"), Err(RequestError::InvalidLength));
    }
}
