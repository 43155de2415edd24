//! Texture import settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextureType {
    #[default]
    Default,
    NormalMap,
    EditorGui,
    Sprite,
    Cursor,
    Cookie,
    Lightmap,
    SingleChannel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextureShape {
    #[default]
    Texture2d,
    TextureCube,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlphaSource {
    None,
    #[default]
    FromInput,
    FromGrayScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MipMapFilter {
    #[default]
    Box,
    Kaiser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    #[default]
    Repeat,
    Clamp,
    Mirror,
    MirrorOnce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Point,
    #[default]
    Bilinear,
    Trilinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResizeAlgorithm {
    #[default]
    Mitchell,
    Bilinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompressionQuality {
    Fast,
    #[default]
    Normal,
    Best,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextureCompression {
    Uncompressed,
    #[default]
    Compressed,
    CompressedHq,
    CompressedLq,
}

/// Largest dimension a texture is imported at.
///
/// Authored as a plain integer; only the listed powers of two are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum MaxTextureSize {
    Size32,
    Size64,
    Size128,
    Size256,
    Size512,
    Size1024,
    #[default]
    Size2048,
    Size4096,
    Size8192,
}

impl MaxTextureSize {
    pub const ALL: [MaxTextureSize; 9] = [
        MaxTextureSize::Size32,
        MaxTextureSize::Size64,
        MaxTextureSize::Size128,
        MaxTextureSize::Size256,
        MaxTextureSize::Size512,
        MaxTextureSize::Size1024,
        MaxTextureSize::Size2048,
        MaxTextureSize::Size4096,
        MaxTextureSize::Size8192,
    ];

    /// Size in pixels
    pub fn pixels(self) -> u32 {
        match self {
            MaxTextureSize::Size32 => 32,
            MaxTextureSize::Size64 => 64,
            MaxTextureSize::Size128 => 128,
            MaxTextureSize::Size256 => 256,
            MaxTextureSize::Size512 => 512,
            MaxTextureSize::Size1024 => 1024,
            MaxTextureSize::Size2048 => 2048,
            MaxTextureSize::Size4096 => 4096,
            MaxTextureSize::Size8192 => 8192,
        }
    }
}

impl TryFrom<u32> for MaxTextureSize {
    type Error = String;

    fn try_from(pixels: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.pixels() == pixels)
            .ok_or_else(|| format!("unsupported max texture size {}", pixels))
    }
}

impl From<MaxTextureSize> for u32 {
    fn from(size: MaxTextureSize) -> Self {
        size.pixels()
    }
}

/// Fields applied to a texture importer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    pub texture_type: TextureType,
    pub shape: TextureShape,
    pub srgb: bool,
    pub alpha_source: AlphaSource,
    pub alpha_is_transparency: bool,
    pub read_write: bool,
    pub generate_mip_maps: bool,
    pub mip_map_filter: MipMapFilter,
    pub mip_maps_preserve_coverage: bool,
    pub fadeout_mip_maps: bool,
    pub wrap_mode: WrapMode,
    pub filter_mode: FilterMode,
    /// 0..=16
    pub aniso_level: u8,
    pub max_size: MaxTextureSize,
    pub resize_algorithm: ResizeAlgorithm,
    pub compression_quality: CompressionQuality,
    pub compression: TextureCompression,
    pub use_crunch_compression: bool,
    /// 0..=100
    pub compressor_quality: u8,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            texture_type: TextureType::Default,
            shape: TextureShape::Texture2d,
            srgb: true,
            alpha_source: AlphaSource::FromInput,
            alpha_is_transparency: false,
            read_write: false,
            generate_mip_maps: true,
            mip_map_filter: MipMapFilter::Box,
            mip_maps_preserve_coverage: false,
            fadeout_mip_maps: false,
            wrap_mode: WrapMode::Repeat,
            filter_mode: FilterMode::Bilinear,
            aniso_level: 1,
            max_size: MaxTextureSize::Size2048,
            resize_algorithm: ResizeAlgorithm::Mitchell,
            compression_quality: CompressionQuality::Normal,
            compression: TextureCompression::Compressed,
            use_crunch_compression: false,
            compressor_quality: 50,
        }
    }
}

impl TextureSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.aniso_level > 16 {
            return Err(format!(
                "texture aniso_level {} is outside 0..=16",
                self.aniso_level
            ));
        }
        if self.compressor_quality > 100 {
            return Err(format!(
                "texture compressor_quality {} is outside 0..=100",
                self.compressor_quality
            ));
        }
        Ok(())
    }
}
