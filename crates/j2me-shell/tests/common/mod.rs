#![allow(dead_code)]
//! Common test utilities.

use std::path::PathBuf;

use tempfile::TempDir;

use j2me_shell::store::{Vault, VaultOptions};

pub fn storage_dir(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("storage")
}

/// File-backed vault rooted in `temp_dir`.
pub fn open_vault(temp_dir: &TempDir) -> Vault {
    Vault::open(storage_dir(temp_dir), VaultOptions::default())
}

/// Bytes with a ZIP local-file header, padded to `len`.
pub fn jar_bytes(len: usize) -> Vec<u8> {
    let mut bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    bytes[..4].copy_from_slice(b"PK\x03\x04");
    bytes
}

pub fn jad_text(name: &str) -> Vec<u8> {
    format!(
        "MIDlet-Name: {name}\nMIDlet-Version: 1.0\nMIDlet-Vendor: Test\nMIDlet-Jar-URL: {name}.jar\n"
    )
    .into_bytes()
}
