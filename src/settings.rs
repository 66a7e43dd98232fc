//! Tuning settings
//!
//! Persisted in LocalStorage on web. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::SimConfig;

/// Parameters of the presentation spring (per second, not per frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            stiffness: SMOOTHING_STIFFNESS,
            damping: SMOOTHING_DAMPING,
            mass: SMOOTHING_MASS,
        }
    }
}

impl SmoothingConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("smoothing.stiffness", self.stiffness),
            ("smoothing.damping", self.damping),
            ("smoothing.mass", self.mass),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Everything tunable for a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Evasion physics
    pub sim: SimConfig,
    /// Presentation spring
    pub smoothing: SmoothingConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        self.sim.validate()?;
        self.smoothing.validate()
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "evasive_target_settings";

    /// Environment variable naming a settings file (native only)
    pub const SETTINGS_ENV: &'static str = "EVASIVE_TARGET_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings rejected: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `EVASIVE_TARGET_SETTINGS`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("Settings file {path} rejected ({e}), using defaults");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // Nothing is persisted natively
    }
}
