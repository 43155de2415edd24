//! Settings merger - combines the settings of matched rules

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RuleSet;
use crate::settings::{AudioSettings, ModelSettings, TextureSettings};

/// Final settings for one asset, one optional group per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EffectiveConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioSettings>,
}

impl EffectiveConfiguration {
    /// True when no category is overridden
    pub fn is_empty(&self) -> bool {
        self.texture.is_none() && self.model.is_none() && self.audio.is_none()
    }
}

/// Merges the settings of matched rules into an [`EffectiveConfiguration`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsMerger;

impl SettingsMerger {
    /// Walk `matched` in order; every enabled group replaces the current one
    /// for its category wholesale, so the last enabling rule wins.
    ///
    /// Indices that fall outside `rules` are ignored.
    pub fn merge(rules: &RuleSet, matched: &[usize]) -> EffectiveConfiguration {
        let mut effective = EffectiveConfiguration::default();

        for &index in matched {
            let Some(rule) = rules.get(index) else {
                continue;
            };
            let settings = &rule.settings;

            if let Some(texture) = settings.texture.active() {
                debug!("Texture settings from rule '{}'", rule.name);
                effective.texture = Some(texture.clone());
            }
            if let Some(model) = settings.model.active() {
                debug!("Model settings from rule '{}'", rule.name);
                effective.model = Some(model.clone());
            }
            if let Some(audio) = settings.audio.active() {
                debug!("Audio settings from rule '{}'", rule.name);
                effective.audio = Some(audio.clone());
            }
        }

        effective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Predicate, Resolver, Rule};
    use crate::settings::{
        AudioQuality, ImportSettings, MaxTextureSize, Override, TextureType,
    };

    fn texture(max_size: MaxTextureSize) -> ImportSettings {
        ImportSettings {
            texture: Override::enabled(TextureSettings {
                max_size,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_merge() {
        let rules = RuleSet::default();
        let effective = SettingsMerger::merge(&rules, &[]);
        assert!(effective.is_empty());
    }

    #[test]
    fn test_single_rule_passes_through() {
        let mut settings = texture(MaxTextureSize::Size512);
        settings.audio = Override::enabled(AudioSettings {
            quality: AudioQuality::new(30).unwrap(),
            ..Default::default()
        });
        settings.model.settings.scale_factor = 2.0;

        let rules = RuleSet::new(vec![Rule::new("Only", Vec::new(), settings.clone())]);
        let effective = SettingsMerger::merge(&rules, &[0]);

        assert_eq!(effective.texture.as_ref(), Some(&settings.texture.settings));
        assert_eq!(effective.audio.as_ref(), Some(&settings.audio.settings));
        assert!(effective.model.is_none());
    }

    #[test]
    fn test_last_rule_wins_whole_group() {
        let first = ImportSettings {
            texture: Override::enabled(TextureSettings {
                texture_type: TextureType::Sprite,
                max_size: MaxTextureSize::Size256,
                ..Default::default()
            }),
            ..Default::default()
        };
        let rules = RuleSet::new(vec![
            Rule::new("First", Vec::new(), first),
            Rule::new("Second", Vec::new(), texture(MaxTextureSize::Size4096)),
        ]);

        let effective = SettingsMerger::merge(&rules, &[0, 1]);
        let merged = effective.texture.unwrap();
        assert_eq!(merged, rules.rules()[1].settings.texture.settings);
        // Fields are not carried over from the earlier rule
        assert_eq!(merged.texture_type, TextureType::Default);
    }

    #[test]
    fn test_disabled_group_does_not_override() {
        let mut second = texture(MaxTextureSize::Size32);
        second.texture.enabled = false;

        let rules = RuleSet::new(vec![
            Rule::new("First", Vec::new(), texture(MaxTextureSize::Size128)),
            Rule::new("Second", Vec::new(), second),
        ]);

        let effective = SettingsMerger::merge(&rules, &[0, 1]);
        assert_eq!(
            effective.texture.map(|t| t.max_size),
            Some(MaxTextureSize::Size128)
        );
    }

    #[test]
    fn test_categories_are_independent() {
        let audio_only = ImportSettings {
            audio: Override::enabled(AudioSettings::default()),
            ..Default::default()
        };
        let rules = RuleSet::new(vec![
            Rule::new("Texture", Vec::new(), texture(MaxTextureSize::Size64)),
            Rule::new("Audio", Vec::new(), audio_only),
        ]);

        let effective = SettingsMerger::merge(&rules, &[0, 1]);
        assert_eq!(
            effective.texture.map(|t| t.max_size),
            Some(MaxTextureSize::Size64)
        );
        assert!(effective.audio.is_some());
        assert!(effective.model.is_none());
    }

    #[test]
    fn test_icons_and_png_scenario() {
        let rules = RuleSet::new(vec![
            Rule::new(
                "Icons",
                vec![Predicate::path_contains("UI")],
                texture(MaxTextureSize::Size256),
            ),
            Rule::new(
                "All PNG",
                vec![Predicate::extension_equals("png")],
                texture(MaxTextureSize::Size1024),
            ),
        ]);

        let matched = Resolver::resolve(&rules, "Assets/UI/icon.png");
        assert_eq!(matched, vec![0, 1]);

        let effective = SettingsMerger::merge(&rules, &matched);
        assert_eq!(
            effective.texture.map(|t| t.max_size),
            Some(MaxTextureSize::Size1024)
        );
    }
}
