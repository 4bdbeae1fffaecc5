//! Schema configuration: default pictures and role codes.

use crate::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Defaults used when a document lacks its own value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Default video picture.
    pub default_video_pic: String,
    /// Default audio HD picture.
    pub default_audio_hd_pic: String,
    /// Default audio SD picture.
    pub default_audio_sd_pic: String,
    /// Role code of the auto-publisher user when added as an embedded person.
    pub auto_publisher_role_code: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            default_video_pic: "/bundles/pumukitschema/images/video_none.jpg".to_string(),
            default_audio_hd_pic: "/bundles/pumukitschema/images/audio_hd.svg".to_string(),
            default_audio_sd_pic: "/bundles/pumukitschema/images/audio_sd.svg".to_string(),
            auto_publisher_role_code: "owner".to_string(),
        }
    }
}

impl SchemaConfig {
    /// Parses a `[schema]`-style TOML table. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> ModelResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects blank values.
    pub fn validate(&self) -> ModelResult<()> {
        let fields = [
            ("default_video_pic", &self.default_video_pic),
            ("default_audio_hd_pic", &self.default_audio_hd_pic),
            ("default_audio_sd_pic", &self.default_audio_sd_pic),
            ("auto_publisher_role_code", &self.auto_publisher_role_code),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ModelError::ConfigInvalid(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}
