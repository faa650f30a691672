//! Headless runtime.
//!
//! Validates the archive container, counts frames and records key input.
//! It never executes application code; hosts without a real VM use it to
//! exercise the session lifecycle end to end.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::codec::{ArchiveBlob, ArchiveKind};

use super::detect::{ContainerFormat, detect_container, parse_descriptor};
use super::{AppRuntime, KeyEvent, RuntimeError};

/// Attribute every descriptor must carry.
const REQUIRED_DESCRIPTOR_ATTRIBUTE: &str = "MIDlet-Name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedApp {
    pub name: String,
    pub kind: ArchiveKind,
    /// Descriptor attributes (empty for `.jar` archives).
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
pub struct HeadlessRuntime {
    loaded: Option<LoadedApp>,
    updates: u64,
    frames: u64,
    keys: Vec<KeyEvent>,
}

impl HeadlessRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(&self) -> Option<&LoadedApp> {
        self.loaded.as_ref()
    }

    /// Frames rendered, including frames restored from saved state.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn key_events(&self) -> &[KeyEvent] {
        &self.keys
    }
}

#[async_trait]
impl AppRuntime for HeadlessRuntime {
    async fn load(&mut self, archive: &ArchiveBlob) -> Result<(), RuntimeError> {
        let unrecognized = || RuntimeError::UnrecognizedContainer {
            name: archive.name().to_string(),
        };
        let kind = archive.kind().ok_or_else(unrecognized)?;

        let attributes = match (kind, detect_container(archive.bytes())) {
            (ArchiveKind::Jar, ContainerFormat::Zip) => BTreeMap::new(),
            (ArchiveKind::Jad, ContainerFormat::Descriptor) => {
                let text = std::str::from_utf8(archive.bytes()).map_err(|e| {
                    RuntimeError::InvalidDescriptor {
                        name: archive.name().to_string(),
                        reason: e.to_string(),
                    }
                })?;
                let attributes =
                    parse_descriptor(text).map_err(|reason| RuntimeError::InvalidDescriptor {
                        name: archive.name().to_string(),
                        reason,
                    })?;
                if !attributes.contains_key(REQUIRED_DESCRIPTOR_ATTRIBUTE) {
                    return Err(RuntimeError::InvalidDescriptor {
                        name: archive.name().to_string(),
                        reason: format!("missing {REQUIRED_DESCRIPTOR_ATTRIBUTE}"),
                    });
                }
                attributes
            }
            _ => return Err(unrecognized()),
        };

        debug!(archive = %archive.name(), bytes = archive.len(), "headless runtime loaded archive");
        self.loaded = Some(LoadedApp {
            name: archive.name().to_string(),
            kind,
            attributes,
        });
        self.updates = 0;
        self.frames = 0;
        self.keys.clear();
        Ok(())
    }

    fn update(&mut self) {
        self.updates += 1;
    }

    fn render(&mut self) {
        self.frames += 1;
    }

    fn handle_key(&mut self, event: KeyEvent) {
        self.keys.push(event);
    }

    fn snapshot_state(&self) -> Option<Value> {
        self.loaded.as_ref().map(|_| json!({ "frames": self.frames }))
    }

    fn restore_state(&mut self, state: Value) {
        if let Some(frames) = state.get("frames").and_then(Value::as_u64) {
            self.frames = frames;
        }
    }

    fn unload(&mut self) {
        self.loaded = None;
    }
}
