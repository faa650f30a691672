//! Archive codec.
//!
//! The storage medium only holds text, so every archive passes through
//! [`encode`] on the way in and [`decode`] on the way out. The text form is
//! standard base64 with canonical padding, the same payload a browser data
//! URL carries.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::store::{StorageError, StorageResult};

/// MIME type of a packaged `.jar` archive.
pub const JAR_MIME: &str = "application/java-archive";
/// MIME type of a `.jad` application descriptor.
pub const JAD_MIME: &str = "text/vnd.sun.j2me.app-descriptor";
/// Fallback MIME type for anything else.
pub const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// Encode raw archive bytes into their text-safe form.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a text-safe payload produced by [`encode`].
///
/// Fails with [`StorageError::CorruptEncoding`] on characters outside the
/// base64 alphabet or on missing/truncated padding.
pub fn decode(text: &str) -> StorageResult<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| StorageError::corrupt_encoding(e.to_string()))
}

// ============================================================================
// Archive kinds
// ============================================================================

/// File types accepted for ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// Packaged application (`.jar`).
    Jar,
    /// Application descriptor (`.jad`).
    Jad,
}

impl ArchiveKind {
    /// Classify a file name by its suffix. Matching is case-sensitive.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.ends_with(".jar") {
            Some(Self::Jar)
        } else if name.ends_with(".jad") {
            Some(Self::Jad)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jar => "jar",
            Self::Jad => "jad",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jar => JAR_MIME,
            Self::Jad => JAD_MIME,
        }
    }
}

// ============================================================================
// ArchiveBlob
// ============================================================================

/// Loadable handle for a decoded archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBlob {
    name: String,
    mime_type: &'static str,
    bytes: Vec<u8>,
}

impl ArchiveBlob {
    /// Wrap raw bytes; the MIME type follows the name's suffix.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = ArchiveKind::from_file_name(&name)
            .map(ArchiveKind::mime_type)
            .unwrap_or(OCTET_STREAM_MIME);
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    /// Decode a persisted payload into a blob.
    pub fn from_encoded(name: impl Into<String>, encoded: &str) -> StorageResult<Self> {
        Ok(Self::new(name, decode(encoded)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<ArchiveKind> {
        ArchiveKind::from_file_name(&self.name)
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_empty() {
        let encoded = encode(&[]);
        assert_eq!(encoded, "");
        assert_eq!(decode(&encoded).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn roundtrip_every_byte_value() {
        let bytes: Vec<u8> = (0..4096).map(|i| (i % 256) as u8).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn roundtrip_partial_groups() {
        let cases: [&[u8]; 3] = [&[0xff], &[0x00, 0xff], &[0xfb, 0xff, 0xbf]];
        for bytes in cases {
            let encoded = encode(bytes);
            assert_eq!(encoded.len() % 4, 0);
            assert_eq!(decode(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn roundtrip_pseudo_random_lengths() {
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for _ in 0..256 {
            let len = (next() % 2048) as usize;
            let bytes: Vec<u8> = (0..len).map(|_| next() as u8).collect();
            assert_eq!(decode(&encode(&bytes)).unwrap(), bytes, "length {len}");
        }
    }

    #[test]
    fn encode_is_standard_padded_base64() {
        assert_eq!(encode(b"Man"), "TWFu");
        assert_eq!(encode(b"Ma"), "TWE=");
        assert_eq!(encode(b"M"), "TQ==");
    }

    #[test]
    fn decode_rejects_foreign_alphabet() {
        let err = decode("TWFu!").unwrap_err();
        assert!(matches!(err, StorageError::CorruptEncoding(_)));
    }

    #[test]
    fn decode_rejects_truncated_padding() {
        let err = decode("TQ=").unwrap_err();
        assert!(matches!(err, StorageError::CorruptEncoding(_)));
    }

    #[test]
    fn kind_matches_suffix_case_sensitively() {
        assert_eq!(ArchiveKind::from_file_name("snake.jar"), Some(ArchiveKind::Jar));
        assert_eq!(ArchiveKind::from_file_name("snake.jad"), Some(ArchiveKind::Jad));
        assert_eq!(ArchiveKind::from_file_name("SNAKE.JAR"), None);
        assert_eq!(ArchiveKind::from_file_name("readme.txt"), None);
        assert_eq!(ArchiveKind::from_file_name("jar"), None);
    }

    #[test]
    fn blob_mime_follows_name() {
        assert_eq!(ArchiveBlob::new("a.jar", vec![]).mime_type(), JAR_MIME);
        assert_eq!(ArchiveBlob::new("a.jad", vec![]).mime_type(), JAD_MIME);
        assert_eq!(
            ArchiveBlob::new("a.bin", vec![]).mime_type(),
            OCTET_STREAM_MIME
        );
    }

    #[test]
    fn blob_from_encoded() {
        let blob = ArchiveBlob::from_encoded("snake.jar", &encode(b"PK\x03\x04")).unwrap();
        assert_eq!(blob.bytes(), b"PK\x03\x04");
        assert_eq!(blob.len(), 4);
        assert_eq!(blob.kind(), Some(ArchiveKind::Jar));
    }
}
