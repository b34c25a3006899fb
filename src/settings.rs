//! Game settings
//!
//! Read-only configuration supplied as JSON by the host (a `data-settings`
//! attribute on the web, a file argument for the native runner). Missing
//! fields fall back to defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::TRAIL_FADE_ALPHA;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Motion trails (translucent clear instead of a full clear)
    pub trails: bool,
    /// Opacity of the per-frame fade fill when trails are on
    pub trail_fade_alpha: f32,
    /// Kill burst particles
    pub particles: bool,

    // === Rules ===
    /// A projectile scores at most one kill per tick.
    /// Off by default: one shot can take out every zombie it overlaps.
    pub single_kill_projectiles: bool,

    // === Debug ===
    /// Fixed RNG seed (None = seeded from the host clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trails: true,
            trail_fade_alpha: TRAIL_FADE_ALPHA,
            particles: true,
            single_kill_projectiles: false,
            seed: None,
        }
    }
}

/// Why a settings document was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// Not valid JSON for `Settings`
    Parse(serde_json::Error),
    /// Well-formed but out of range
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.trail_fade_alpha > 0.0 && self.trail_fade_alpha <= 1.0) {
            return Err(SettingsError::Invalid(format!(
                "trail_fade_alpha must be in (0, 1], got {}",
                self.trail_fade_alpha
            )));
        }
        Ok(())
    }

    /// Opacity of the per-frame clear (1.0 = no trails)
    pub fn effective_fade_alpha(&self) -> f32 {
        if self.trails {
            self.trail_fade_alpha
        } else {
            1.0
        }
    }

    /// Load settings from the `data-settings` attribute of an element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(element: &web_sys::Element) -> Self {
        match element.get_attribute("data-settings") {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from data-settings");
                    settings
                }
                Err(e) => {
                    log::warn!("{}; using defaults", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Invalid(format!("{}: {}", path.display(), e)))
            .and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "particles": false }"#).unwrap();
        assert!(!settings.particles);
        assert!(settings.trails);
        assert_eq!(settings.trail_fade_alpha, TRAIL_FADE_ALPHA);
        assert!(!settings.single_kill_projectiles);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_rejects_bad_fade_alpha() {
        let err = Settings::from_json(r#"{ "trail_fade_alpha": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        let err = Settings::from_json(r#"{ "trail_fade_alpha": 1.5 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ trails: yes").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse settings"));
    }

    #[test]
    fn test_effective_fade_alpha() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_fade_alpha(), TRAIL_FADE_ALPHA);
        settings.trails = false;
        assert_eq!(settings.effective_fade_alpha(), 1.0);
    }

    #[test]
    fn test_fixed_seed() {
        let settings = Settings::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
    }
}
