//! Standard (padded) base64 conversion for keys, nonces and ciphertext.

use base64::{Engine, engine::general_purpose};

/// Decodes base64 text into bytes. Malformed input is returned as the
/// decoder's own error.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(text)
}

pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}
