//! Document payloads for model calls.
//!
//! Documents cross the API boundary as self-describing encoded blobs: a
//! MIME type plus base64 data, rendered as `data:<mime>;base64,<data>`
//! URIs at the edges and carried as [`DocumentPayload`] internally.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors producing or parsing document payloads.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A binary document ready to be embedded in a model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPayload {
    /// MIME type of the underlying bytes (e.g. `application/pdf`).
    pub mime_type: String,
    /// Base64-encoded document bytes.
    pub data: String,
}

impl DocumentPayload {
    /// Encode raw bytes into a payload.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self { mime_type: mime_type.into(), data: BASE64.encode(bytes) }
    }

    /// Read a file from disk, guessing the MIME type from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MediaError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(mime_for_path(path), &bytes))
    }

    /// Parse a `data:<mime>;base64,<data>` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, MediaError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| MediaError::InvalidDataUri("missing data: scheme".into()))?;
        let (mime_type, data) = rest
            .split_once(";base64,")
            .ok_or_else(|| MediaError::InvalidDataUri("missing ;base64, marker".into()))?;
        if mime_type.is_empty() {
            return Err(MediaError::InvalidDataUri("empty MIME type".into()));
        }
        if data.is_empty() {
            return Err(MediaError::InvalidDataUri("empty payload".into()));
        }
        BASE64.decode(data)?;
        Ok(Self { mime_type: mime_type.to_string(), data: data.to_string() })
    }

    /// Render the payload as a data URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decoded size of the payload in bytes.
    pub fn byte_len(&self) -> usize {
        // Base64 expands 3 bytes to 4 characters; padding trims the tail.
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        self.data.len() / 4 * 3 - padding
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("txt") | Some("text") => "text/plain",
        Some("md") => "text/markdown",
        Some("html") | Some("htm") => "text/html",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_roundtrip() {
        let payload = DocumentPayload::from_bytes("application/pdf", b"%PDF-1.4 fake");
        let uri = payload.to_data_uri();
        assert!(uri.starts_with("data:application/pdf;base64,"));

        let parsed = DocumentPayload::from_data_uri(&uri).unwrap();
        assert_eq!(parsed, payload);
        assert_eq!(parsed.byte_len(), b"%PDF-1.4 fake".len());
    }

    #[test]
    fn test_rejects_missing_scheme() {
        let err = DocumentPayload::from_data_uri("text/plain;base64,aGk=").unwrap_err();
        assert!(matches!(err, MediaError::InvalidDataUri(_)));
    }

    #[test]
    fn test_rejects_missing_base64_marker() {
        let err = DocumentPayload::from_data_uri("data:text/plain,hello").unwrap_err();
        assert!(matches!(err, MediaError::InvalidDataUri(_)));
    }

    #[test]
    fn test_rejects_empty_payload() {
        let err = DocumentPayload::from_data_uri("data:text/plain;base64,").unwrap_err();
        assert!(matches!(err, MediaError::InvalidDataUri(_)));
    }

    #[test]
    fn test_rejects_invalid_base64() {
        let err = DocumentPayload::from_data_uri("data:text/plain;base64,@@@@").unwrap_err();
        assert!(matches!(err, MediaError::InvalidBase64(_)));
    }

    #[test]
    fn test_mime_guess_from_extension() {
        assert_eq!(mime_for_path(Path::new("lease.PDF")), "application/pdf");
        assert_eq!(mime_for_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_for_path(Path::new("scan.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("mystery.bin")), "application/octet-stream");
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contract.txt");
        std::fs::write(&path, "lorem ipsum").unwrap();

        let payload = DocumentPayload::load(&path).unwrap();
        assert_eq!(payload.mime_type, "text/plain");
        assert_eq!(payload.byte_len(), 11);
    }
}
