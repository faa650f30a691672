// Container sniffing for installed archives.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// ZIP container (a `.jar`).
    Zip,
    /// Plain-text `Name: value` descriptor (a `.jad`).
    Descriptor,
    Unknown,
}

/// Detect the container format from the leading bytes of an archive.
pub fn detect_container(header: &[u8]) -> ContainerFormat {
    // ZIP: local file header, or end-of-central-directory for an empty archive
    if header.len() >= 4 && (header[0..4] == *b"PK\x03\x04" || header[0..4] == *b"PK\x05\x06") {
        return ContainerFormat::Zip;
    }

    // JAD: UTF-8 text whose first non-blank line is a MIDlet-/MicroEdition- attribute
    if let Ok(text) = std::str::from_utf8(header) {
        let first = text
            .trim_start_matches('\u{feff}')
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty());
        if let Some(line) = first
            && (line.starts_with("MIDlet-") || line.starts_with("MicroEdition-"))
            && line.contains(':')
        {
            return ContainerFormat::Descriptor;
        }
    }

    ContainerFormat::Unknown
}

/// Parse descriptor attributes (`Name: value` per line).
///
/// Blank lines are skipped; a line without a colon is an error.
pub fn parse_descriptor(text: &str) -> Result<BTreeMap<String, String>, String> {
    let mut attributes = BTreeMap::new();

    for (index, raw) in text.trim_start_matches('\u{feff}').lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            return Err(format!("line {} has no attribute separator", index + 1));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("line {} has an empty attribute name", index + 1));
        }
        attributes.insert(name.to_string(), value.trim().to_string());
    }

    Ok(attributes)
}
