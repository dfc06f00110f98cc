use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use crate::base64url;

pub const SEGMENT_DELIMITER: char = '.';

/// The three raw segments of a compact token.
///
/// Produced by [`split_token`] or [`parse_token`]. Segments are views into
/// the original string, split at the two delimiter offsets. Nothing in here
/// has been verified; use [`verify`](super::verify) before trusting any claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    raw_token: String,
    header_end: usize,
    payload_end: usize,
}

impl ParsedToken {
    pub fn header(&self) -> &str {
        &self.raw_token[..self.header_end]
    }

    pub fn payload(&self) -> &str {
        &self.raw_token[self.header_end + 1..self.payload_end]
    }

    pub fn signature(&self) -> &str {
        &self.raw_token[self.payload_end + 1..]
    }

    pub fn raw_token(&self) -> &str {
        &self.raw_token
    }

    /// The exact wire bytes the signature covers: `header.payload`.
    pub fn signing_input(&self) -> &str {
        &self.raw_token[..self.payload_end]
    }

    /// Decode and parse the header segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Segment is not base64url JSON naming a known algorithm
    pub fn decode_header(&self) -> Result<Header, JwtError> {
        let bytes = base64url::decode(self.header()).map_err(JwtError::from_segment)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| JwtError::InvalidFormat(format!("header: {}", e)))
    }

    /// Decode and parse the payload segment without checking the signature.
    ///
    /// # Errors
    /// * `InvalidFormat` - Segment is not base64url JSON with the expected claims
    pub fn decode_unverified_claims(&self) -> Result<Claims, JwtError> {
        let bytes = base64url::decode(self.payload()).map_err(JwtError::from_segment)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| JwtError::InvalidFormat(format!("payload: {}", e)))
    }

    /// Decode the signature segment into raw MAC bytes.
    ///
    /// # Errors
    /// * `InvalidSignature` - Segment is empty or not strict base64url
    pub fn decode_signature(&self) -> Result<Vec<u8>, JwtError> {
        if self.signature().is_empty() {
            return Err(JwtError::InvalidSignature);
        }
        base64url::decode(self.signature()).map_err(|e| match e {
            base64url::Base64UrlError::Memory(size) => JwtError::Memory(size),
            _ => JwtError::InvalidSignature,
        })
    }
}

/// Split a token at its delimiters without decoding any segment.
///
/// # Errors
/// * `InvalidFormat` - Not exactly three segments
pub fn split_token(token: &str) -> Result<ParsedToken, JwtError> {
    let mut delimiters = token.match_indices(SEGMENT_DELIMITER).map(|(index, _)| index);

    match (delimiters.next(), delimiters.next(), delimiters.next()) {
        (Some(header_end), Some(payload_end), None) => Ok(ParsedToken {
            raw_token: token.to_string(),
            header_end,
            payload_end,
        }),
        _ => Err(JwtError::InvalidFormat(format!(
            "expected 3 segments, found {}",
            token.split(SEGMENT_DELIMITER).count()
        ))),
    }
}

/// Split a token into its segments and check their shape.
///
/// Pure and side-effect free, for inspecting a token outside verification:
/// exactly three delimiter-separated segments, with non-empty header and
/// payload segments that decode as base64url.
///
/// # Errors
/// * `InvalidFormat` - Wrong segment count, or undecodable header/payload
pub fn parse_token(token: &str) -> Result<ParsedToken, JwtError> {
    let parsed = split_token(token)?;

    for (name, segment) in [("header", parsed.header()), ("payload", parsed.payload())] {
        if segment.is_empty() {
            return Err(JwtError::InvalidFormat(format!("{} segment is empty", name)));
        }
        base64url::decode(segment).map_err(JwtError::from_segment)?;
    }

    Ok(parsed)
}
