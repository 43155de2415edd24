//! Per-rule settings payload
//!
//! Each rule carries one group per asset category. A group only takes part in
//! merging when its `enabled` flag is set.

mod audio;
mod model;
mod texture;

pub use audio::{
    AudioCompressionFormat, AudioLoadType, AudioQuality, AudioSettings, SampleRate,
    SampleRateSetting,
};
pub use model::{AnimationType, MeshCompression, ModelSettings, NormalsMode, TangentsMode};
pub use texture::{
    AlphaSource, CompressionQuality, FilterMode, MaxTextureSize, MipMapFilter, ResizeAlgorithm,
    TextureCompression, TextureSettings, TextureShape, TextureType, WrapMode,
};

use serde::{Deserialize, Serialize};

/// A settings group that can be switched on or off independently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Override<T> {
    /// Whether this group overrides anything
    #[serde(default)]
    pub enabled: bool,

    #[serde(flatten)]
    pub settings: T,
}

impl<T> Override<T> {
    /// An enabled group carrying `settings`
    pub fn enabled(settings: T) -> Self {
        Self {
            enabled: true,
            settings,
        }
    }

    /// The settings if the group is enabled
    pub fn active(&self) -> Option<&T> {
        self.enabled.then_some(&self.settings)
    }
}

/// Settings overrides attached to a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImportSettings {
    #[serde(default)]
    pub texture: Override<TextureSettings>,

    #[serde(default)]
    pub model: Override<ModelSettings>,

    #[serde(default)]
    pub audio: Override<AudioSettings>,
}

impl ImportSettings {
    /// Check the enabled groups for out-of-range values
    pub fn validate(&self) -> Result<(), String> {
        if let Some(texture) = self.texture.active() {
            texture.validate()?;
        }
        if let Some(model) = self.model.active() {
            model.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_groups() {
        let settings: ImportSettings = toml::from_str(
            r#"
            [texture]
            enabled = true
            max_size = 256
            texture_type = "sprite"

            [audio]
            quality = 40
        "#,
        )
        .unwrap();

        let texture = settings.texture.active().unwrap();
        assert_eq!(texture.max_size, MaxTextureSize::Size256);
        assert_eq!(texture.texture_type, TextureType::Sprite);
        assert!(texture.generate_mip_maps);

        assert!(settings.model.active().is_none());
        assert!(settings.audio.active().is_none());
        assert_eq!(settings.audio.settings.quality.percent(), 40);
    }

    #[test]
    fn test_disabled_group_skips_validation() {
        let mut settings = ImportSettings::default();
        settings.texture.settings.aniso_level = 99;
        assert!(settings.validate().is_ok());

        settings.texture.enabled = true;
        assert!(settings.validate().is_err());
    }
}
