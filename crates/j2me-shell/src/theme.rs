//! Phone-frame themes.
//!
//! The catalogue is fixed at compile time; only the selected theme id is
//! persisted, under [`THEME_KEY`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::store::{StorageError, StorageMedium, StorageResult};

/// Medium key holding the selected theme id.
pub const THEME_KEY: &str = "j2me_theme";

/// Theme used when nothing (or something unknown) is stored.
pub const DEFAULT_THEME: &str = "classic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Round,
    Flat,
    Square,
    Rounded,
    Beveled,
}

impl fmt::Display for ButtonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Round => "round",
            Self::Flat => "flat",
            Self::Square => "square",
            Self::Rounded => "rounded",
            Self::Beveled => "beveled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub phone_color: &'static str,
    pub button_color: &'static str,
    pub text_color: &'static str,
    pub screen_border: &'static str,
    pub font_family: &'static str,
    pub button_style: ButtonStyle,
    pub screen_filter: &'static str,
    pub background_color: &'static str,
}

/// Built-in themes, in display order.
pub static THEMES: [Theme; 5] = [
    Theme {
        id: "classic",
        name: "Classic Nokia",
        phone_color: "#1B1F22",
        button_color: "#2C3539",
        text_color: "#32CD32",
        screen_border: "5px solid #1B1F22",
        font_family: "'Nokia Pure Text', sans-serif",
        button_style: ButtonStyle::Round,
        screen_filter: "none",
        background_color: "#1B1F22",
    },
    Theme {
        id: "modern",
        name: "Modern Dark",
        phone_color: "#2C2C2C",
        button_color: "#3D3D3D",
        text_color: "#FFFFFF",
        screen_border: "2px solid #404040",
        font_family: "'Roboto', sans-serif",
        button_style: ButtonStyle::Flat,
        screen_filter: "none",
        background_color: "#1A1A1A",
    },
    Theme {
        id: "retro",
        name: "Retro Green",
        phone_color: "#383838",
        button_color: "#4A4A4A",
        text_color: "#33FF33",
        screen_border: "10px solid #383838",
        font_family: "monospace",
        button_style: ButtonStyle::Square,
        screen_filter: "brightness(1.2) contrast(1.1) sepia(0.2)",
        background_color: "#000000",
    },
    Theme {
        id: "blue",
        name: "Blue Wave",
        phone_color: "#1E3F66",
        button_color: "#2E5984",
        text_color: "#7FB3D5",
        screen_border: "3px solid #2E5984",
        font_family: "'Segoe UI', sans-serif",
        button_style: ButtonStyle::Rounded,
        screen_filter: "brightness(1.1) contrast(1.05)",
        background_color: "#152F4F",
    },
    Theme {
        id: "vintage",
        name: "Vintage Gold",
        phone_color: "#8B7355",
        button_color: "#A67D3D",
        text_color: "#FFD700",
        screen_border: "6px solid #8B7355",
        font_family: "'Times New Roman', serif",
        button_style: ButtonStyle::Beveled,
        screen_filter: "sepia(0.4) contrast(1.1)",
        background_color: "#5C4033",
    },
];

impl Theme {
    pub fn find(id: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.id == id)
    }

    pub fn default_theme() -> &'static Theme {
        &THEMES[0]
    }

    /// Presentation variables the UI layer applies at the document root.
    pub fn css_variables(&self) -> [(&'static str, &'static str); 6] {
        [
            ("--phone-color", self.phone_color),
            ("--button-color", self.button_color),
            ("--text-color", self.text_color),
            ("--screen-border", self.screen_border),
            ("--font-family", self.font_family),
            ("--background-color", self.background_color),
        ]
    }

    /// Class list for the phone frame element.
    pub fn frame_class(&self) -> String {
        format!("phone-frame theme-{} button-{}", self.id, self.button_style)
    }
}

/// Persists the selected theme.
#[derive(Clone)]
pub struct ThemeStore {
    medium: Arc<dyn StorageMedium>,
}

impl ThemeStore {
    pub fn new(medium: Arc<dyn StorageMedium>) -> Self {
        Self { medium }
    }

    pub fn available(&self) -> &'static [Theme] {
        &THEMES
    }

    /// The selected theme; unknown or missing ids resolve to the default.
    pub async fn current(&self) -> StorageResult<&'static Theme> {
        let stored = self.medium.get(THEME_KEY).await?;
        Ok(stored
            .as_deref()
            .and_then(Theme::find)
            .unwrap_or_else(Theme::default_theme))
    }

    /// Select theme `id`. Unknown ids are rejected and nothing is stored.
    pub async fn apply(&self, id: &str) -> StorageResult<&'static Theme> {
        let theme = Theme::find(id).ok_or_else(|| StorageError::not_found("theme", id))?;
        self.medium.set(THEME_KEY, theme.id).await?;

        tracing::debug!(theme = theme.id, "applied theme");
        Ok(theme)
    }
}
