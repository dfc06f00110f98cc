use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::DecodeError;
use base64::DecodeSliceError;
use base64::EncodeSliceError;
use base64::Engine;

use super::errors::Base64UrlError;

/// Encode bytes with the URL-safe alphabet and no padding.
///
/// # Arguments
/// * `input` - Bytes to encode
///
/// # Returns
/// Encoded text
///
/// # Errors
/// * `Memory` - Output buffer could not be allocated
pub fn encode(input: &[u8]) -> Result<String, Base64UrlError> {
    let needed = encoded_length(input.len());
    let mut output = String::new();
    output
        .try_reserve_exact(needed)
        .map_err(|_| Base64UrlError::Memory(needed))?;

    URL_SAFE_NO_PAD.encode_string(input, &mut output);
    Ok(output)
}

/// Decode unpadded URL-safe text back into bytes.
///
/// Decoding is strict: padding, characters outside `A-Z a-z 0-9 - _`,
/// impossible lengths and non-zero trailing bits are all rejected, so every
/// byte sequence has exactly one accepted encoding.
///
/// # Arguments
/// * `input` - Encoded text
///
/// # Returns
/// Decoded bytes
///
/// # Errors
/// * `InvalidInput` - Malformed character, padding or length
/// * `Memory` - Output buffer could not be allocated
pub fn decode(input: &str) -> Result<Vec<u8>, Base64UrlError> {
    let needed = decoded_length(input)?;
    let mut output = Vec::new();
    output
        .try_reserve_exact(needed)
        .map_err(|_| Base64UrlError::Memory(needed))?;

    URL_SAFE_NO_PAD
        .decode_vec(input, &mut output)
        .map_err(invalid_input)?;
    Ok(output)
}

/// Encode into a caller-supplied buffer.
///
/// # Returns
/// Number of bytes written
///
/// # Errors
/// * `BufferTooSmall` - `output` is shorter than [`encoded_length`]
pub fn encode_into(input: &[u8], output: &mut [u8]) -> Result<usize, Base64UrlError> {
    let needed = encoded_length(input.len());
    if output.len() < needed {
        return Err(Base64UrlError::BufferTooSmall {
            needed,
            available: output.len(),
        });
    }

    URL_SAFE_NO_PAD
        .encode_slice(input, output)
        .map_err(|e| match e {
            EncodeSliceError::OutputSliceTooSmall => Base64UrlError::BufferTooSmall {
                needed,
                available: output.len(),
            },
        })
}

/// Decode into a caller-supplied buffer.
///
/// # Returns
/// Number of bytes written
///
/// # Errors
/// * `InvalidInput` - Malformed character, padding or length
/// * `BufferTooSmall` - `output` is shorter than [`decoded_length`]
pub fn decode_into(input: &str, output: &mut [u8]) -> Result<usize, Base64UrlError> {
    let needed = decoded_length(input)?;
    let available = output.len();
    if available < needed {
        return Err(Base64UrlError::BufferTooSmall { needed, available });
    }

    URL_SAFE_NO_PAD
        .decode_slice(input, output)
        .map_err(|e| match e {
            DecodeSliceError::DecodeError(e) => invalid_input(e),
            DecodeSliceError::OutputSliceTooSmall => {
                Base64UrlError::BufferTooSmall { needed, available }
            }
        })
}

/// Exact length of the encoding of `input_len` bytes.
///
/// Saturates at `usize::MAX` for lengths whose encoding cannot be addressed.
pub fn encoded_length(input_len: usize) -> usize {
    base64::encoded_len(input_len, false).unwrap_or(usize::MAX)
}

/// Exact number of bytes `input` decodes to, derived from its length alone.
///
/// # Errors
/// * `InvalidInput` - No byte sequence encodes to this many characters
pub fn decoded_length(input: &str) -> Result<usize, Base64UrlError> {
    let len = input.len();
    let tail = match len % 4 {
        0 => 0,
        2 => 1,
        3 => 2,
        _ => {
            return Err(Base64UrlError::InvalidInput(format!(
                "length {} is not a valid unpadded encoding",
                len
            )))
        }
    };

    Ok(len / 4 * 3 + tail)
}

fn invalid_input(e: DecodeError) -> Base64UrlError {
    Base64UrlError::InvalidInput(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(encode(b"").unwrap(), "");
        assert_eq!(encode(b"f").unwrap(), "Zg");
        assert_eq!(encode(b"fo").unwrap(), "Zm8");
        assert_eq!(encode(b"foo").unwrap(), "Zm9v");
        assert_eq!(encode(b"foob").unwrap(), "Zm9vYg");
        assert_eq!(encode(&[0xfb, 0xff]).unwrap(), "-_8");
    }

    #[test]
    fn test_roundtrip_every_length_and_byte_value() {
        let all_bytes: Vec<u8> = (0..=255u8).collect();

        for len in 0..=all_bytes.len() {
            let input = &all_bytes[..len];
            let encoded = encode(input).expect("Failed to encode");
            assert_eq!(encoded.len(), encoded_length(len));
            assert!(!encoded.contains('='));
            assert!(!encoded.contains('+'));
            assert!(!encoded.contains('/'));

            let decoded = decode(&encoded).expect("Failed to decode");
            assert_eq!(decoded, input);
        }
    }

    #[test]
    fn test_decode_rejects_padding() {
        let result = decode("Zg==");
        assert!(matches!(result, Err(Base64UrlError::InvalidInput(_))));
    }

    #[test]
    fn test_decode_rejects_standard_alphabet() {
        assert!(matches!(
            decode("+/8"),
            Err(Base64UrlError::InvalidInput(_))
        ));
        assert!(matches!(
            decode("Zm 9v"),
            Err(Base64UrlError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decode_rejects_impossible_length() {
        assert!(matches!(decode("Z"), Err(Base64UrlError::InvalidInput(_))));
        assert!(matches!(
            decode("Zm9vY"),
            Err(Base64UrlError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decode_rejects_trailing_bits() {
        // "Zh" carries non-zero bits past the single encoded byte
        assert!(matches!(decode("Zh"), Err(Base64UrlError::InvalidInput(_))));
    }

    #[test]
    fn test_decoded_length_is_exact() {
        assert_eq!(decoded_length("").unwrap(), 0);
        assert_eq!(decoded_length("Zg").unwrap(), 1);
        assert_eq!(decoded_length("Zm8").unwrap(), 2);
        assert_eq!(decoded_length("Zm9v").unwrap(), 3);
        assert_eq!(decoded_length("Zm9vYg").unwrap(), 4);
        assert!(decoded_length("Zm9vY").is_err());
    }

    #[test]
    fn test_encoded_length_is_exact() {
        assert_eq!(encoded_length(0), 0);
        assert_eq!(encoded_length(1), 2);
        assert_eq!(encoded_length(2), 3);
        assert_eq!(encoded_length(3), 4);
        assert_eq!(encoded_length(32), 43);
        assert_eq!(encoded_length(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_encode_into_buffer_too_small() {
        let mut buffer = [0u8; 3];
        let result = encode_into(b"foo", &mut buffer);
        assert_eq!(
            result,
            Err(Base64UrlError::BufferTooSmall {
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_encode_into_exact_buffer() {
        let mut buffer = [0u8; 4];
        let written = encode_into(b"foo", &mut buffer).expect("Failed to encode");
        assert_eq!(written, 4);
        assert_eq!(&buffer, b"Zm9v");
    }

    #[test]
    fn test_decode_into() {
        let mut buffer = [0u8; 4];
        let written = decode_into("Zm9vYg", &mut buffer).expect("Failed to decode");
        assert_eq!(&buffer[..written], b"foob");

        let mut small = [0u8; 3];
        assert!(matches!(
            decode_into("Zm9vYg", &mut small),
            Err(Base64UrlError::BufferTooSmall {
                needed: 4,
                available: 3
            })
        ));

        assert!(matches!(
            decode_into("Zm9v!g", &mut buffer),
            Err(Base64UrlError::InvalidInput(_))
        ));
    }
}
