//! Transport codec for share tokens.
//!
//! A token is a list's JSON text made safe for a URL query parameter. Two
//! encodings exist:
//!
//! - **plain**: UTF-8 JSON, base64, URL-safe alphabet, no padding
//! - **compressed**: UTF-8 JSON, gzip, base64, URL-safe alphabet, no padding
//!
//! Tokens carry no format tag. [`auto_detect_and_decode`] sniffs the first
//! two characters instead: base64 of a JSON object opening with `{"` always
//! starts with `ey`, while a gzip stream starts with `H4sI`.
//!
//! # Example
//!
//! ```
//! use grocery_core::codec;
//!
//! let token = codec::encode_compressed(r#"{"id":"x","items":[]}"#).unwrap();
//! let value = codec::auto_detect_and_decode(&token).unwrap();
//! assert_eq!(value["id"], "x");
//! ```

use std::borrow::Cow;
use std::io::{Read, Write};

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde_json::Value;
use thiserror::Error;

/// Prefix every plain token starts with (`{"` in base64).
pub const PLAIN_SNIFF: &str = "ey";

/// Why a token could not be turned back into JSON.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid gzip stream: {0}")]
    Gzip(#[source] std::io::Error),

    #[error("decoded bytes are not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("decoded text is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encoding of a token, as guessed by [`detect_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFormat {
    /// base64 of the JSON text
    Plain,
    /// base64 of the gzip-compressed JSON text
    Compressed,
}

/// Encode JSON text as a plain token.
pub fn encode(json: &str) -> String {
    URL_SAFE_NO_PAD.encode(json.as_bytes())
}

/// Encode JSON text as a gzip-compressed token.
pub fn encode_compressed(json: &str) -> std::io::Result<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(json.as_bytes())?;
    let compressed = encoder.finish()?;

    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Decode a plain token into JSON.
pub fn decode(token: &str) -> Result<Value, DecodeError> {
    let bytes = base64_bytes(token)?;
    let text = String::from_utf8(bytes)?;

    Ok(serde_json::from_str(&text)?)
}

/// Decode a gzip-compressed token into JSON.
pub fn decode_compressed(token: &str) -> Result<Value, DecodeError> {
    let bytes = base64_bytes(token)?;

    let mut text = Vec::new();
    GzDecoder::new(bytes.as_slice())
        .read_to_end(&mut text)
        .map_err(DecodeError::Gzip)?;
    let text = String::from_utf8(text)?;

    Ok(serde_json::from_str(&text)?)
}

/// Guess a token's encoding from its first two characters.
pub fn detect_format(token: &str) -> TokenFormat {
    if percent_decoded(token).starts_with(PLAIN_SNIFF) {
        TokenFormat::Plain
    } else {
        TokenFormat::Compressed
    }
}

/// Decode a token of either encoding.
pub fn auto_detect_and_decode(token: &str) -> Result<Value, DecodeError> {
    let format = detect_format(token);
    log::debug!("Decoding {:?} token, {} chars", format, token.len());

    match format {
        TokenFormat::Plain => decode(token),
        TokenFormat::Compressed => decode_compressed(token),
    }
}

/// Undo URL percent-encoding if any is present.
///
/// A token that is already decoded passes through unchanged, as does one
/// whose escapes do not form valid UTF-8.
fn percent_decoded(token: &str) -> Cow<'_, str> {
    if !token.contains('%') {
        return Cow::Borrowed(token);
    }

    match urlencoding::decode(token) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(token),
    }
}

/// Normalize a token to the standard alphabet with padding and decode it.
fn base64_bytes(token: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let token = percent_decoded(token.trim());

    // Query parsers turn a bare '+' into a space.
    let mut normalized: String = token
        .chars()
        .map(|c| match c {
            '-' | ' ' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }

    STANDARD.decode(normalized)
}
