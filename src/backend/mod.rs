//! Host side - applies resolved settings to newly imported assets

mod sidecar;

pub use sidecar::SidecarBackend;

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::rules::{EffectiveConfiguration, Resolver, RuleSet, SettingsMerger};
use crate::settings::{AudioSettings, ModelSettings, TextureSettings};

const TEXTURE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tga", "psd", "tif", "tiff", "bmp", "gif", "exr", "hdr", "iff", "pict",
];
const MODEL_EXTENSIONS: &[&str] = &["fbx", "obj", "dae", "3ds", "dxf", "blend", "max", "ma", "mb"];
const AUDIO_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "ogg", "aif", "aiff", "flac", "mod", "it", "s3m", "xm",
];

/// Kind of importer an asset goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Texture,
    Model,
    Audio,
}

impl AssetCategory {
    /// Classify an asset by its extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if TEXTURE_EXTENSIONS.contains(&ext.as_str()) {
            Some(AssetCategory::Texture)
        } else if MODEL_EXTENSIONS.contains(&ext.as_str()) {
            Some(AssetCategory::Model)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(AssetCategory::Audio)
        } else {
            None
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetCategory::Texture => "texture",
            AssetCategory::Model => "model",
            AssetCategory::Audio => "audio",
        };
        f.write_str(name)
    }
}

/// Owner of the real importer configuration for assets
pub trait ImportBackend {
    /// Whether the asset already went through import once
    fn is_imported(&self, asset: &Path) -> bool;

    fn apply_texture(&mut self, asset: &Path, settings: &TextureSettings) -> Result<()>;

    fn apply_model(&mut self, asset: &Path, settings: &ModelSettings) -> Result<()>;

    fn apply_audio(&mut self, asset: &Path, settings: &AudioSettings) -> Result<()>;
}

/// What happened to an asset handed to the [`Preprocessor`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// Not a texture, model or audio file
    Unsupported,
    /// Imported before; settings are left alone
    AlreadyImported,
    /// Rules were resolved; `applied` is set when a group for the asset's
    /// category reached the backend
    Resolved {
        category: AssetCategory,
        matched: Vec<String>,
        applied: bool,
    },
}

/// Runs the rules for each new asset and hands the result to a backend
pub struct Preprocessor<B> {
    rules: RuleSet,
    root: Option<PathBuf>,
    backend: B,
}

impl<B: ImportBackend> Preprocessor<B> {
    pub fn new(rules: RuleSet, backend: B) -> Self {
        Self {
            rules,
            root: None,
            backend,
        }
    }

    /// Match rules against paths relative to `root` instead of the full path
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The path string rules are matched against
    pub fn rule_path(&self, asset: &Path) -> String {
        let relative = self
            .root
            .as_deref()
            .and_then(|root| asset.strip_prefix(root).ok())
            .unwrap_or(asset);
        relative.to_string_lossy().replace('\\', "/")
    }

    /// Resolve and merge without touching the backend
    pub fn effective(&self, asset: &Path) -> (Vec<usize>, EffectiveConfiguration) {
        let path = self.rule_path(asset);
        let matched = Resolver::resolve(&self.rules, &path);
        let effective = SettingsMerger::merge(&self.rules, &matched);
        (matched, effective)
    }

    /// Work out what [`Preprocessor::process`] would do, without applying
    /// anything. `applied` reports whether a group would reach the backend.
    pub fn plan(&self, asset: &Path) -> ProcessOutcome {
        match self.prepare(asset) {
            Prepared::Skip(outcome) => outcome,
            Prepared::Resolved {
                category,
                matched,
                effective,
            } => ProcessOutcome::Resolved {
                category,
                matched,
                applied: overrides(&effective, category),
            },
        }
    }

    /// Apply the rules to a newly imported asset
    pub fn process(&mut self, asset: &Path) -> Result<ProcessOutcome> {
        let (category, matched, effective) = match self.prepare(asset) {
            Prepared::Skip(outcome) => return Ok(outcome),
            Prepared::Resolved {
                category,
                matched,
                effective,
            } => (category, matched, effective),
        };

        let applied = match category {
            AssetCategory::Texture => match &effective.texture {
                Some(settings) => {
                    self.backend.apply_texture(asset, settings)?;
                    true
                }
                None => false,
            },
            AssetCategory::Model => match &effective.model {
                Some(settings) => {
                    self.backend.apply_model(asset, settings)?;
                    true
                }
                None => false,
            },
            AssetCategory::Audio => match &effective.audio {
                Some(settings) => {
                    self.backend.apply_audio(asset, settings)?;
                    true
                }
                None => false,
            },
        };

        if applied {
            info!("Applied {} settings to {}", category, asset.display());
        }

        Ok(ProcessOutcome::Resolved {
            category,
            matched,
            applied,
        })
    }

    fn prepare(&self, asset: &Path) -> Prepared {
        let Some(category) = AssetCategory::from_path(asset) else {
            debug!("Ignoring unsupported asset: {}", asset.display());
            return Prepared::Skip(ProcessOutcome::Unsupported);
        };

        if self.backend.is_imported(asset) {
            debug!("Already imported: {}", asset.display());
            return Prepared::Skip(ProcessOutcome::AlreadyImported);
        }

        if self.rules.is_empty() {
            return Prepared::Resolved {
                category,
                matched: Vec::new(),
                effective: EffectiveConfiguration::default(),
            };
        }

        let (matched, effective) = self.effective(asset);
        let matched = matched
            .into_iter()
            .filter_map(|i| self.rules.get(i))
            .map(|rule| rule.name.clone())
            .collect();

        Prepared::Resolved {
            category,
            matched,
            effective,
        }
    }
}

enum Prepared {
    Skip(ProcessOutcome),
    Resolved {
        category: AssetCategory,
        matched: Vec<String>,
        effective: EffectiveConfiguration,
    },
}

fn overrides(effective: &EffectiveConfiguration, category: AssetCategory) -> bool {
    match category {
        AssetCategory::Texture => effective.texture.is_some(),
        AssetCategory::Model => effective.model.is_some(),
        AssetCategory::Audio => effective.audio.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Predicate, Rule};
    use crate::settings::{ImportSettings, MaxTextureSize, Override};
    use std::collections::HashSet;

    #[derive(Default)]
    struct MemoryBackend {
        imported: HashSet<PathBuf>,
        textures: Vec<(PathBuf, u32)>,
        models: Vec<PathBuf>,
        audio: Vec<(PathBuf, f32)>,
    }

    impl ImportBackend for MemoryBackend {
        fn is_imported(&self, asset: &Path) -> bool {
            self.imported.contains(asset)
        }

        fn apply_texture(&mut self, asset: &Path, settings: &TextureSettings) -> Result<()> {
            self.textures
                .push((asset.to_path_buf(), settings.max_size.pixels()));
            Ok(())
        }

        fn apply_model(&mut self, asset: &Path, _settings: &ModelSettings) -> Result<()> {
            self.models.push(asset.to_path_buf());
            Ok(())
        }

        fn apply_audio(&mut self, asset: &Path, settings: &AudioSettings) -> Result<()> {
            self.audio
                .push((asset.to_path_buf(), settings.quality.fraction()));
            Ok(())
        }
    }

    fn rules() -> RuleSet {
        let mut everything = ImportSettings {
            texture: Override::enabled(TextureSettings {
                max_size: MaxTextureSize::Size512,
                ..Default::default()
            }),
            ..Default::default()
        };
        everything.audio = Override::enabled(AudioSettings::default());

        RuleSet::new(vec![
            Rule::new("Everything", Vec::new(), everything),
            Rule::new(
                "UI",
                vec![Predicate::path_contains("project/ui")],
                ImportSettings::default(),
            ),
        ])
    }

    #[test]
    fn test_category_from_extension() {
        assert_eq!(
            AssetCategory::from_path(Path::new("a/icon.PNG")),
            Some(AssetCategory::Texture)
        );
        assert_eq!(
            AssetCategory::from_path(Path::new("hero.fbx")),
            Some(AssetCategory::Model)
        );
        assert_eq!(
            AssetCategory::from_path(Path::new("hit.ogg")),
            Some(AssetCategory::Audio)
        );
        assert_eq!(AssetCategory::from_path(Path::new("notes.txt")), None);
        assert_eq!(AssetCategory::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_applies_only_matching_category() {
        let mut preprocessor = Preprocessor::new(rules(), MemoryBackend::default());

        let outcome = preprocessor.process(Path::new("/project/ui/icon.png")).unwrap();
        assert_eq!(
            outcome,
            ProcessOutcome::Resolved {
                category: AssetCategory::Texture,
                matched: vec!["Everything".to_string(), "UI".to_string()],
                applied: true,
            }
        );

        let outcome = preprocessor.process(Path::new("/project/hero.fbx")).unwrap();
        assert!(matches!(
            outcome,
            ProcessOutcome::Resolved { applied: false, .. }
        ));

        preprocessor.process(Path::new("/project/hit.wav")).unwrap();

        let backend = preprocessor.backend();
        assert_eq!(
            backend.textures,
            vec![(PathBuf::from("/project/ui/icon.png"), 512)]
        );
        assert!(backend.models.is_empty());
        assert_eq!(backend.audio.len(), 1);
        assert!((backend.audio[0].1 - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_skips_imported_and_unsupported() {
        let mut backend = MemoryBackend::default();
        backend.imported.insert(PathBuf::from("old.png"));
        let mut preprocessor = Preprocessor::new(rules(), backend);

        assert_eq!(
            preprocessor.process(Path::new("old.png")).unwrap(),
            ProcessOutcome::AlreadyImported
        );
        assert_eq!(
            preprocessor.process(Path::new("readme.md")).unwrap(),
            ProcessOutcome::Unsupported
        );
        assert!(preprocessor.backend().textures.is_empty());
    }

    #[test]
    fn test_plan_matches_process_without_applying() {
        let mut backend = MemoryBackend::default();
        backend.imported.insert(PathBuf::from("/project/old.png"));
        let mut preprocessor = Preprocessor::new(rules(), backend);

        let assets = [
            "/project/ui/icon.png",
            "/project/hero.fbx",
            "/project/hit.wav",
            "/project/old.png",
            "/project/readme.md",
        ];
        let planned: Vec<ProcessOutcome> =
            assets.iter().map(|a| preprocessor.plan(Path::new(a))).collect();

        let backend = preprocessor.backend();
        assert!(backend.textures.is_empty());
        assert!(backend.audio.is_empty());

        let processed: Vec<ProcessOutcome> = assets
            .iter()
            .map(|a| preprocessor.process(Path::new(a)).unwrap())
            .collect();
        assert_eq!(planned, processed);
        assert_eq!(planned[3], ProcessOutcome::AlreadyImported);
        assert!(matches!(
            planned[1],
            ProcessOutcome::Resolved { applied: false, .. }
        ));
    }

    #[test]
    fn test_root_makes_paths_relative() {
        let preprocessor =
            Preprocessor::new(RuleSet::default(), MemoryBackend::default()).with_root("/work");
        assert_eq!(
            preprocessor.rule_path(Path::new("/work/Assets/UI/icon.png")),
            "Assets/UI/icon.png"
        );
        assert_eq!(
            preprocessor.rule_path(Path::new("/elsewhere/icon.png")),
            "/elsewhere/icon.png"
        );
    }
}
