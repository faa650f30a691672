//! User settings.
//!
//! Presentation and session preferences, persisted as camelCase JSON under
//! [`SETTINGS_KEY`]. Fields missing from the stored document fall back to
//! their defaults, so older documents keep loading as fields are added.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::{StorageError, StorageMedium, StorageResult};

/// Medium key holding the settings document.
pub const SETTINGS_KEY: &str = "j2me_settings";

// ============================================================================
// ScreenScaling
// ============================================================================

/// How the device screen is fitted into the host window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenScaling {
    /// Keep aspect ratio, letterbox as needed.
    #[default]
    Fit,
    /// Fill the window, ignoring aspect ratio.
    Stretch,
    /// Integer scaling with nearest-neighbour sampling.
    PixelPerfect,
}

impl ScreenScaling {
    /// CSS `object-fit` value for the screen element.
    pub fn object_fit(self) -> &'static str {
        match self {
            Self::Stretch => "fill",
            Self::Fit | Self::PixelPerfect => "contain",
        }
    }

    pub fn pixelated(self) -> bool {
        self == Self::PixelPerfect
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Stretch => "stretch",
            Self::PixelPerfect => "pixel-perfect",
        }
    }
}

impl fmt::Display for ScreenScaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenScaling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fit" => Ok(Self::Fit),
            "stretch" => Ok(Self::Stretch),
            "pixel-perfect" => Ok(Self::PixelPerfect),
            other => Err(format!(
                "unknown screen scaling '{other}' (expected fit, stretch or pixel-perfect)"
            )),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub phone_color: String,
    pub screen_scaling: ScreenScaling,
    pub enable_vibration: bool,
    pub enable_keyboard: bool,
    /// Minutes between automatic state saves while running. Zero disables.
    pub auto_save_interval: u32,
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            phone_color: "#333333".to_string(),
            screen_scaling: ScreenScaling::Fit,
            enable_vibration: false,
            enable_keyboard: true,
            auto_save_interval: 1,
            volume: 0.7,
        }
    }
}

impl Settings {
    /// Auto-save period, or `None` when disabled.
    pub fn auto_save_period(&self) -> Option<Duration> {
        (self.auto_save_interval > 0)
            .then(|| Duration::from_secs(u64::from(self.auto_save_interval) * 60))
    }

    /// Clamp out-of-range values into their valid ranges.
    pub fn normalized(mut self) -> Self {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            Settings::default().volume
        };
        self
    }
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Loads and saves [`Settings`] through the storage medium.
#[derive(Clone)]
pub struct SettingsStore {
    medium: Arc<dyn StorageMedium>,
}

impl SettingsStore {
    pub fn new(medium: Arc<dyn StorageMedium>) -> Self {
        Self { medium }
    }

    /// Load settings, merged over defaults.
    ///
    /// An unreadable document is logged and replaced by defaults.
    pub async fn load(&self) -> StorageResult<Settings> {
        let Some(content) = self.medium.get(SETTINGS_KEY).await? else {
            return Ok(Settings::default());
        };

        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => Ok(settings.normalized()),
            Err(e) => {
                warn!(error = %e, "Failed to parse stored settings, using defaults");
                Ok(Settings::default())
            }
        }
    }

    pub async fn save(&self, settings: &Settings) -> StorageResult<()> {
        let content = serde_json::to_string(&settings.clone().normalized())
            .map_err(|e| StorageError::serialization(e.to_string()))?;
        self.medium.set(SETTINGS_KEY, &content).await?;

        tracing::debug!("saved settings");
        Ok(())
    }

    /// Overwrite stored settings with defaults.
    pub async fn reset(&self) -> StorageResult<Settings> {
        let defaults = Settings::default();
        self.save(&defaults).await?;
        Ok(defaults)
    }
}
