//! Model import settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeshCompression {
    #[default]
    Off,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalsMode {
    #[default]
    Import,
    Calculate,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TangentsMode {
    Import,
    CalculateLegacy,
    CalculateLegacyWithSplitTangents,
    #[default]
    CalculateMikk,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnimationType {
    None,
    Legacy,
    #[default]
    Generic,
    Human,
}

/// Fields applied to a model importer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    // Meshes
    pub scale_factor: f32,
    pub use_file_scale: bool,
    pub mesh_compression: MeshCompression,
    pub read_write_enabled: bool,
    pub optimize_mesh: bool,
    pub import_blend_shapes: bool,
    pub generate_colliders: bool,
    pub keep_quads: bool,
    pub weld_vertices: bool,
    pub swap_uvs: bool,
    pub generate_lightmap_uvs: bool,

    // Normals & tangents
    pub normals: NormalsMode,
    /// Degrees, 0..=180
    pub smoothing_angle: f32,
    pub tangents: TangentsMode,

    pub import_materials: bool,
    pub animation_type: AnimationType,
    pub import_animation: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            use_file_scale: true,
            mesh_compression: MeshCompression::Off,
            read_write_enabled: false,
            optimize_mesh: true,
            import_blend_shapes: true,
            generate_colliders: false,
            keep_quads: false,
            weld_vertices: true,
            swap_uvs: false,
            generate_lightmap_uvs: false,
            normals: NormalsMode::Import,
            smoothing_angle: 60.0,
            tangents: TangentsMode::CalculateMikk,
            import_materials: true,
            animation_type: AnimationType::Generic,
            import_animation: true,
        }
    }
}

impl ModelSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(format!(
                "model scale_factor {} must be a positive number",
                self.scale_factor
            ));
        }
        if !(0.0..=180.0).contains(&self.smoothing_angle) {
            return Err(format!(
                "model smoothing_angle {} is outside 0..=180",
                self.smoothing_angle
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ranges() {
        assert!(ModelSettings::default().validate().is_ok());

        let settings = ModelSettings {
            smoothing_angle: 200.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = ModelSettings {
            scale_factor: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
