//! Transport encoding for file bytes.
//!
//! Uploads travel inside a JSON body, so the client base64-encodes the file
//! and the server decodes it back before forwarding it to the pinning
//! provider. Decoding is lenient about what browsers hand over: a
//! `data:<mime>;base64,` prefix, embedded whitespace, missing padding and the
//! URL-safe alphabet are all accepted.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

const LENIENT_STANDARD: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent));
const LENIENT_URL_SAFE: GeneralPurpose =
    GeneralPurpose::new(&alphabet::URL_SAFE, PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent));

#[derive(Debug, thiserror::Error)]
#[error("invalid file encoding: {0}")]
pub struct EncodingError(#[from] base64::DecodeError);

/// Encode raw bytes for transport.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode transport text back to the original bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, EncodingError> {
    let payload = strip_data_url(text.trim());
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let engine = if compact.contains(['-', '_']) { &LENIENT_URL_SAFE } else { &LENIENT_STANDARD };
    Ok(engine.decode(compact)?)
}

fn strip_data_url(text: &str) -> &str {
    if !text.starts_with("data:") {
        return text;
    }
    match text.split_once(',') {
        Some((_, payload)) => payload,
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_roundtrips() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn all_byte_values_roundtrip() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn decodes_known_text() {
        assert_eq!(encode(b"hello"), "aGVsbG8=");
        assert_eq!(decode("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn accepts_data_url_prefix() {
        assert_eq!(decode("data:application/pdf;base64,aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn accepts_missing_padding_and_whitespace() {
        assert_eq!(decode("aGVs\nbG8").unwrap(), b"hello");
        assert_eq!(decode("  aGVsbG8=  ").unwrap(), b"hello");
    }

    #[test]
    fn accepts_url_safe_alphabet() {
        let bytes = [0xfbu8, 0xff, 0xfe];
        assert_eq!(STANDARD.encode(bytes), "+//+");
        assert_eq!(decode("-__-").unwrap(), bytes);
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode("not base64!").is_err());
    }
}
