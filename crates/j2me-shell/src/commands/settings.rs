//! `j2me-shell settings`: show or update settings and theme.

use anyhow::{Result, bail};

use j2me_shell::settings::{ScreenScaling, Settings};
use j2me_shell::theme::Theme;

use super::open_vault;

/// Requested changes; `None` leaves a field alone.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub theme: Option<String>,
    pub scaling: Option<ScreenScaling>,
    pub phone_color: Option<String>,
    pub auto_save: Option<u32>,
    pub volume: Option<f32>,
    pub vibration: Option<bool>,
    pub keyboard: Option<bool>,
    pub reset: bool,
}

impl SettingsUpdate {
    fn changes_settings(&self) -> bool {
        self.scaling.is_some()
            || self.phone_color.is_some()
            || self.auto_save.is_some()
            || self.volume.is_some()
            || self.vibration.is_some()
            || self.keyboard.is_some()
    }

    fn apply_to(self, settings: &mut Settings) {
        if let Some(scaling) = self.scaling {
            settings.screen_scaling = scaling;
        }
        if let Some(color) = self.phone_color {
            settings.phone_color = color;
        }
        if let Some(minutes) = self.auto_save {
            settings.auto_save_interval = minutes;
        }
        if let Some(volume) = self.volume {
            settings.volume = volume;
        }
        if let Some(enabled) = self.vibration {
            settings.enable_vibration = enabled;
        }
        if let Some(enabled) = self.keyboard {
            settings.enable_keyboard = enabled;
        }
    }
}

pub async fn run(config_path: &str, mut update: SettingsUpdate) -> Result<()> {
    let (_, vault) = open_vault(config_path).await?;

    if update.reset {
        vault.settings().reset().await?;
    }

    if let Some(id) = update.theme.take() {
        if Theme::find(&id).is_none() {
            let ids: Vec<_> = vault.themes().available().iter().map(|t| t.id).collect();
            bail!("unknown theme '{id}' (available: {})", ids.join(", "));
        }
        vault.themes().apply(&id).await?;
    }

    let mut settings = vault.settings().load().await?;
    if update.changes_settings() {
        update.apply_to(&mut settings);
        vault.settings().save(&settings).await?;
        settings = vault.settings().load().await?;
    }

    let theme = vault.themes().current().await?;
    print_settings(&settings, theme);
    Ok(())
}

fn print_settings(settings: &Settings, theme: &Theme) {
    println!("Theme:            {} ({})", theme.name, theme.id);
    println!("Phone colour:     {}", settings.phone_color);
    println!("Screen scaling:   {}", settings.screen_scaling);
    println!("Vibration:        {}", on_off(settings.enable_vibration));
    println!("Keyboard input:   {}", on_off(settings.enable_keyboard));
    match settings.auto_save_interval {
        0 => println!("Auto-save:        off"),
        1 => println!("Auto-save:        every minute"),
        n => println!("Auto-save:        every {n} minutes"),
    }
    println!("Volume:           {:.0}%", settings.volume * 100.0);
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
