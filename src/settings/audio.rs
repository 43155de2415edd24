//! Audio import settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AudioLoadType {
    #[default]
    DecompressOnLoad,
    CompressedInMemory,
    Streaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AudioCompressionFormat {
    Pcm,
    #[default]
    Vorbis,
    Adpcm,
    Mp3,
    Aac,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SampleRateSetting {
    #[default]
    PreserveSampleRate,
    OptimizeSampleRate,
    OverrideSampleRate,
}

/// Sample rate used with [`SampleRateSetting::OverrideSampleRate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum SampleRate {
    Hz8000,
    Hz11025,
    Hz22050,
    #[default]
    Hz44100,
    Hz48000,
    Hz96000,
    Hz192000,
}

impl SampleRate {
    pub const ALL: [SampleRate; 7] = [
        SampleRate::Hz8000,
        SampleRate::Hz11025,
        SampleRate::Hz22050,
        SampleRate::Hz44100,
        SampleRate::Hz48000,
        SampleRate::Hz96000,
        SampleRate::Hz192000,
    ];

    pub fn hertz(self) -> u32 {
        match self {
            SampleRate::Hz8000 => 8000,
            SampleRate::Hz11025 => 11025,
            SampleRate::Hz22050 => 22050,
            SampleRate::Hz44100 => 44100,
            SampleRate::Hz48000 => 48000,
            SampleRate::Hz96000 => 96000,
            SampleRate::Hz192000 => 192000,
        }
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = String;

    fn try_from(hertz: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|rate| rate.hertz() == hertz)
            .ok_or_else(|| format!("unsupported sample rate {}", hertz))
    }
}

impl From<SampleRate> for u32 {
    fn from(rate: SampleRate) -> Self {
        rate.hertz()
    }
}

/// Compression quality authored as a percentage in 1..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AudioQuality(u8);

impl AudioQuality {
    pub fn new(percent: u8) -> Result<Self, String> {
        if (1..=100).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(format!("audio quality {} is outside 1..=100", percent))
        }
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Normalized quality in 0.01..=1.0, the form importers expect
    pub fn fraction(self) -> f32 {
        f32::from(self.0) * 0.01
    }
}

impl Default for AudioQuality {
    fn default() -> Self {
        Self(100)
    }
}

impl TryFrom<u8> for AudioQuality {
    type Error = String;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<AudioQuality> for u8 {
    fn from(quality: AudioQuality) -> Self {
        quality.0
    }
}

/// Fields applied to an audio importer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AudioSettings {
    pub force_to_mono: bool,
    pub normalize: bool,
    pub load_in_background: bool,
    pub ambisonic: bool,
    pub load_type: AudioLoadType,
    pub preload_audio_data: bool,
    pub compression_format: AudioCompressionFormat,
    pub quality: AudioQuality,
    pub sample_rate_setting: SampleRateSetting,
    pub sample_rate: SampleRate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_bounds() {
        assert!(AudioQuality::new(0).is_err());
        assert!(AudioQuality::new(101).is_err());
        assert_eq!(AudioQuality::new(1).unwrap().percent(), 1);
        assert!((AudioQuality::new(1).unwrap().fraction() - 0.01).abs() < f32::EPSILON);
        assert!((AudioQuality::new(100).unwrap().fraction() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_audio_settings() {
        let settings: AudioSettings = toml::from_str(
            r#"
            force_to_mono = true
            load_type = "streaming"
            quality = 70
            sample_rate_setting = "override_sample_rate"
            sample_rate = 22050
        "#,
        )
        .unwrap();

        assert!(settings.force_to_mono);
        assert_eq!(settings.load_type, AudioLoadType::Streaming);
        assert_eq!(settings.quality.percent(), 70);
        assert_eq!(settings.sample_rate, SampleRate::Hz22050);

        let result: Result<AudioSettings, _> = toml::from_str("quality = 0");
        assert!(result.is_err());
    }
}
