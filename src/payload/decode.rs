use std::io::Read;

use thiserror::Error;
use tracing::debug;

/// All decompression codecs failed. Display enumerates, in trial order,
/// each codec's name with the error it produced.
#[derive(Debug, Error)]
#[error("no codec could decompress the payload ({})", .attempts.join("; "))]
pub struct DecodeError {
    attempts: Vec<String>,
}

impl DecodeError {
    #[cfg(test)]
    pub fn attempts(&self) -> &[String] {
        &self.attempts
    }
}

type DecodeFn = fn(&[u8]) -> std::io::Result<Vec<u8>>;

/// Codecs in trial order. None of them is identified by magic bytes here;
/// each codec's own stream validation is what rejects foreign input, so the
/// order must stay stable.
const CODECS: &[(&str, DecodeFn)] = &[
    ("brotli", decode_brotli),
    ("gzip", decode_gzip),
    ("zlib", decode_zlib),
    ("deflate", decode_deflate),
];

/// Try each codec in order and return the first successful decompression.
///
/// Short-circuits on the first codec that accepts the input. If every codec
/// rejects it, the returned error carries one diagnostic per attempt.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut attempts = Vec::with_capacity(CODECS.len());
    for (name, decode_fn) in CODECS {
        match decode_fn(bytes) {
            Ok(plain) => {
                debug!(codec = name, decoded_bytes = plain.len(), "codec accepted payload");
                return Ok(plain);
            }
            Err(err) => attempts.push(format!("{name}: {err}")),
        }
    }
    Err(DecodeError { attempts })
}

fn decode_brotli(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut plain = Vec::new();
    brotli::Decompressor::new(bytes, 4096).read_to_end(&mut plain)?;
    Ok(plain)
}

fn decode_gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut plain = Vec::new();
    flate2::read::GzDecoder::new(bytes).read_to_end(&mut plain)?;
    Ok(plain)
}

fn decode_zlib(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut plain = Vec::new();
    flate2::read::ZlibDecoder::new(bytes).read_to_end(&mut plain)?;
    Ok(plain)
}

fn decode_deflate(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut plain = Vec::new();
    flate2::read::DeflateDecoder::new(bytes).read_to_end(&mut plain)?;
    Ok(plain)
}
