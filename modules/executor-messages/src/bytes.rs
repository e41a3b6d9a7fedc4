//! Fixed-width and length-prefixed byte codecs.

use alloc::vec::Vec;

/// Byte codec errors.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesError {
    /// Supplied byte count does not match the expected width or the
    /// declared length prefix.
    InvalidLength = 0,
    /// A 32-byte value does not fit the narrower native width.
    UnsafeConversion = 1,
}

macro_rules! exact_decode {
    ($name:ident, $ty:ty) => {
        /// Decodes a big-endian integer from a slice of exactly the
        /// integer's width.
        pub fn $name(data: &[u8]) -> Result<$ty, BytesError> {
            let arr: [u8; core::mem::size_of::<$ty>()] =
                data.try_into().map_err(|_| BytesError::InvalidLength)?;
            Ok(<$ty>::from_be_bytes(arr))
        }
    };
}

exact_decode!(decode_u16, u16);
exact_decode!(decode_u32, u32);
exact_decode!(decode_u64, u64);
exact_decode!(decode_u128, u128);

pub fn decode_u8(data: &[u8]) -> Result<u8, BytesError> {
    match data {
        [b] => Ok(*b),
        _ => Err(BytesError::InvalidLength),
    }
}

pub fn decode_bytes32(data: &[u8]) -> Result<[u8; 32], BytesError> {
    data.try_into().map_err(|_| BytesError::InvalidLength)
}

/// Reads a fixed-width byte array at `offset`, failing if fewer than
/// `N` bytes remain.
pub fn read_fixed<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], BytesError> {
    let end = offset.checked_add(N).ok_or(BytesError::InvalidLength)?;
    if end > data.len() {
        return Err(BytesError::InvalidLength);
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&data[offset..end]);
    Ok(out)
}

pub fn read_u16(data: &[u8], offset: usize) -> Result<u16, BytesError> {
    read_fixed::<2>(data, offset).map(u16::from_be_bytes)
}

pub fn read_u64(data: &[u8], offset: usize) -> Result<u64, BytesError> {
    read_fixed::<8>(data, offset).map(u64::from_be_bytes)
}

pub fn read_u128(data: &[u8], offset: usize) -> Result<u128, BytesError> {
    read_fixed::<16>(data, offset).map(u128::from_be_bytes)
}

/// Encodes a byte string with a 2-byte big-endian length prefix.
pub fn encode_length_prefixed(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + data.len());
    out.extend_from_slice(&(data.len() as u16).to_be_bytes());
    out.extend_from_slice(data);
    out
}

/// Decodes a length-prefixed byte string. The 2-byte prefix must equal
/// the remaining byte count exactly.
pub fn decode_length_prefixed(data: &[u8]) -> Result<&[u8], BytesError> {
    let len = read_u16(data, 0)? as usize;
    if data.len() != 2 + len {
        return Err(BytesError::InvalidLength);
    }
    Ok(&data[2..])
}

/// Reduces a 32-byte universal address to a native `u64` identifier.
///
/// Fails if any of the 24 high-order bytes is non-zero, i.e. the value
/// does not fit the native width.
pub fn safe_bytes32_to_u64(value: &[u8; 32]) -> Result<u64, BytesError> {
    if value[..24].iter().any(|b| *b != 0) {
        return Err(BytesError::UnsafeConversion);
    }
    let mut arr = [0u8; 8];
    arr.copy_from_slice(&value[24..]);
    Ok(u64::from_be_bytes(arr))
}

/// Widens a native `u64` identifier to a 32-byte universal address.
pub fn u64_to_bytes32(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_decode_u64_exact_width_only() {
        assert_eq!(decode_u64(&29u64.to_be_bytes()), Ok(29));
        // width-4 and width-16 inputs must be rejected when width-8 is expected
        assert_eq!(decode_u64(&29u32.to_be_bytes()), Err(BytesError::InvalidLength));
        assert_eq!(decode_u64(&29u128.to_be_bytes()), Err(BytesError::InvalidLength));
    }

    #[test]
    fn test_decode_u16_exact_width_only() {
        assert_eq!(decode_u16(&[0x27, 0x12]), Ok(10002));
        assert_eq!(decode_u16(&[0x27]), Err(BytesError::InvalidLength));
        assert_eq!(decode_u16(&[0x00, 0x27, 0x12]), Err(BytesError::InvalidLength));
    }

    #[test]
    fn test_read_fixed_out_of_range() {
        let data = [1u8, 2, 3, 4];
        assert_eq!(read_fixed::<4>(&data, 0), Ok([1, 2, 3, 4]));
        assert_eq!(read_fixed::<4>(&data, 1), Err(BytesError::InvalidLength));
        assert_eq!(read_fixed::<2>(&data, usize::MAX), Err(BytesError::InvalidLength));
    }

    #[test]
    fn test_length_prefixed_roundtrip() {
        let payload = [0xAB; 17];
        let encoded = encode_length_prefixed(&payload);
        assert_eq!(encoded.len(), 19);
        assert_eq!(&encoded[..2], &[0x00, 0x11]);
        assert_eq!(decode_length_prefixed(&encoded), Ok(&payload[..]));
    }

    #[test]
    fn test_length_prefixed_off_by_one() {
        let mut encoded = encode_length_prefixed(&[0xCD; 8]);
        // one byte short
        encoded.pop();
        assert_eq!(decode_length_prefixed(&encoded), Err(BytesError::InvalidLength));
        // one byte long
        let mut encoded = encode_length_prefixed(&[0xCD; 8]);
        encoded.push(0);
        assert_eq!(decode_length_prefixed(&encoded), Err(BytesError::InvalidLength));
    }

    #[test]
    fn test_length_prefixed_empty() {
        let encoded = encode_length_prefixed(&[]);
        assert_eq!(encoded, vec![0, 0]);
        assert_eq!(decode_length_prefixed(&encoded), Ok(&[][..]));
    }

    #[test]
    fn test_safe_bytes32_to_u64() {
        let mut value = [0u8; 32];
        value[24..].copy_from_slice(&123_456u64.to_be_bytes());
        assert_eq!(safe_bytes32_to_u64(&value), Ok(123_456));

        value[23] = 1;
        assert_eq!(safe_bytes32_to_u64(&value), Err(BytesError::UnsafeConversion));
    }

    #[test]
    fn test_u64_to_bytes32_roundtrip() {
        let value = u64_to_bytes32(u64::MAX);
        assert_eq!(safe_bytes32_to_u64(&value), Ok(u64::MAX));
    }
}
