use std::fmt::Write;

use eyre::{eyre, Result};

/// Decodes a hex string into a vector of bytes
///
/// ```
/// use optrace_common::utils::strings::decode_hex;
///
/// let hex = "48656c6c6f20576f726c64"; // "Hello World" in hex
/// let result = decode_hex(hex).expect("should decode hex");
/// assert_eq!(result, vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100]);
/// ```
pub fn decode_hex(mut s: &str) -> Result<Vec<u8>> {
    // normalize
    s = s.trim_start_matches("0x").trim();

    if s.is_empty() {
        return Ok(vec![]);
    }

    if s.len() % 2 != 0 {
        return Err(eyre!("invalid hex string: odd length: {}", s));
    }

    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| eyre!("invalid hex string: {}", s))
}

/// Encodes a vector of bytes into a hex string
///
/// ```
/// use optrace_common::utils::strings::encode_hex;
///
/// let bytes = vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100];
/// let result = encode_hex(&bytes);
/// assert_eq!(result, "48656c6c6f20576f726c64");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::new(), |mut acc, b| {
        write!(acc, "{b:02x}").expect("unable to write");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_with_prefix() {
        let result = decode_hex("0xdeadbeef").expect("should decode hex");
        assert_eq!(result, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_decode_hex_empty() {
        let result = decode_hex("0x").expect("should decode hex");
        assert_eq!(result, Vec::<u8>::new());
    }

    #[test]
    fn test_decode_hex_odd_length() {
        assert!(decode_hex("0xabc").is_err());
    }

    #[test]
    fn test_decode_hex_invalid_characters() {
        assert!(decode_hex("0xzz").is_err());
    }

    #[test]
    fn test_encode_hex_roundtrip() {
        let bytes = vec![0x00, 0x01, 0xff];
        let encoded = encode_hex(&bytes);
        assert_eq!(encoded, "0001ff");
        assert_eq!(decode_hex(&encoded).expect("should decode hex"), bytes);
    }
}
