pub mod decode;

pub use decode::DecodeError;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("{0} is empty or blank")]
    Blank(String),

    #[error("{label} is neither JSON nor base64 text: {source}")]
    Base64 {
        label: String,
        source: base64::DecodeError,
    },

    #[error("{label} could not be decompressed: {source}")]
    Decode {
        label: String,
        source: DecodeError,
    },

    #[error("{label} decompressed to non-UTF-8 text: {source}")]
    Utf8 {
        label: String,
        source: std::string::FromUtf8Error,
    },

    #[error("{label} decompressed but is not valid JSON: {source}")]
    Json {
        label: String,
        source: serde_json::Error,
    },
}

/// Forgiving base64: padding optional, non-canonical trailing bits accepted.
/// Combined with the alphabet filter in `decode_base64` this mirrors the
/// lenient decoder of the event source that produced the payload.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn decode_base64(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let filtered: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/'))
        .collect();
    LENIENT_BASE64.decode(filtered)
}

/// Recover a structured event object from a raw payload string.
///
/// The payload is either plain JSON text (the common case, tried first) or
/// base64-encoded compressed JSON text. Exactly one of direct success,
/// decompressed success, or failure occurs; a partial result is never
/// returned. `label` names the input in every error message.
#[instrument(skip(value))]
pub fn resolve(value: &str, label: &str) -> Result<Value, InputError> {
    if value.trim().is_empty() {
        return Err(InputError::Blank(label.to_string()));
    }

    if let Ok(parsed) = serde_json::from_str::<Value>(value) {
        debug!("payload parsed as plain JSON");
        return Ok(parsed);
    }

    let bytes = decode_base64(value).map_err(|source| InputError::Base64 {
        label: label.to_string(),
        source,
    })?;
    debug!(encoded_bytes = bytes.len(), "payload base64-decoded, trying codecs");

    let plain = decode::decode(&bytes).map_err(|source| InputError::Decode {
        label: label.to_string(),
        source,
    })?;
    let text = String::from_utf8(plain).map_err(|source| InputError::Utf8 {
        label: label.to_string(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| InputError::Json {
        label: label.to_string(),
        source,
    })
}
