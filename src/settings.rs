//! Presentation settings and preferences
//!
//! Affect only how the race is shown, never the simulation. Kept in memory for
//! the session; callers may hand them over as JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Most decimal places the HUD will show for stamina
pub const MAX_HUD_PRECISION: usize = 3;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Blur/saturate flash when the neck-bend lands
    pub photo_finish_effect: bool,
    /// Reduced motion (suppresses the photo-finish flash)
    pub reduced_motion: bool,
    /// High contrast colours for lanes and dial
    pub high_contrast: bool,
    /// Show elapsed race time on the HUD
    pub show_elapsed: bool,
    /// Decimal places for the stamina readout
    pub hud_precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            photo_finish_effect: true,
            reduced_motion: false,
            high_contrast: false,
            show_elapsed: false,
            hud_precision: 0,
        }
    }
}

impl Settings {
    /// Parse and validate settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hud_precision > MAX_HUD_PRECISION {
            return Err(Error::InvalidSetting {
                name: "hud_precision",
                reason: format!("{} exceeds {}", self.hud_precision, MAX_HUD_PRECISION),
            });
        }
        Ok(())
    }

    /// Effective photo-finish flash (respects reduced_motion)
    pub fn effective_photo_finish(&self) -> bool {
        self.photo_finish_effect && !self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"reduced_motion": true}"#).unwrap();
        assert!(settings.reduced_motion);
        assert!(settings.photo_finish_effect);
        assert!(!settings.effective_photo_finish());
        assert_eq!(settings.hud_precision, 0);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(Error::Settings(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_precision() {
        let err = Settings::from_json(r#"{"hud_precision": 9}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { name: "hud_precision", .. }));
        assert!(err.to_string().contains("hud_precision"));
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            high_contrast: true,
            show_elapsed: true,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
