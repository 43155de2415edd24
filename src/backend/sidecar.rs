//! Backend that records import settings in a TOML file next to each asset

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::ImportBackend;
use crate::rules::EffectiveConfiguration;
use crate::settings::{AudioSettings, ModelSettings, TextureSettings};

/// Suffix appended to the asset file name
pub const SIDECAR_SUFFIX: &str = ".import.toml";

/// Writes `<asset>.import.toml`; an existing sidecar marks the asset as imported
#[derive(Debug, Clone, Default)]
pub struct SidecarBackend {
    written: Vec<PathBuf>,
}

impl SidecarBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sidecar path for an asset
    pub fn sidecar_path(asset: &Path) -> PathBuf {
        let mut name = asset.as_os_str().to_owned();
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }

    /// Sidecars written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, asset: &Path, config: &EffectiveConfiguration) -> Result<()> {
        let path = Self::sidecar_path(asset);
        let content = toml::to_string_pretty(config).context("Failed to serialize settings")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

impl ImportBackend for SidecarBackend {
    fn is_imported(&self, asset: &Path) -> bool {
        Self::sidecar_path(asset).exists()
    }

    fn apply_texture(&mut self, asset: &Path, settings: &TextureSettings) -> Result<()> {
        let config = EffectiveConfiguration {
            texture: Some(settings.clone()),
            ..Default::default()
        };
        self.write(asset, &config)
    }

    fn apply_model(&mut self, asset: &Path, settings: &ModelSettings) -> Result<()> {
        let config = EffectiveConfiguration {
            model: Some(settings.clone()),
            ..Default::default()
        };
        self.write(asset, &config)
    }

    fn apply_audio(&mut self, asset: &Path, settings: &AudioSettings) -> Result<()> {
        let config = EffectiveConfiguration {
            audio: Some(settings.clone()),
            ..Default::default()
        };
        self.write(asset, &config)
    }
}
