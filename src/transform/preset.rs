//! Gevel (facade) presets: named lighting/material bundles that make a text
//! line read like a physical surface.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use super::BlendMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GevelPreset {
    Brick,
    Stone,
    Metal,
    Glass,
    Wood,
}

/// Fields a preset assigns. `None` leaves the current value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresetBundle {
    pub lighting_enabled: Option<bool>,
    pub intensity: Option<f32>,
    pub ambient: Option<f32>,
    pub direction: Option<Vec3>,
    pub tint: Option<u32>,
    pub blend_mode: Option<BlendMode>,
    pub roughness: Option<f32>,
    pub metallic: Option<f32>,
    pub opacity: Option<f32>,
}

impl GevelPreset {
    pub const ALL: [GevelPreset; 5] = [
        GevelPreset::Brick,
        GevelPreset::Stone,
        GevelPreset::Metal,
        GevelPreset::Glass,
        GevelPreset::Wood,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GevelPreset::Brick => "brick",
            GevelPreset::Stone => "stone",
            GevelPreset::Metal => "metal",
            GevelPreset::Glass => "glass",
            GevelPreset::Wood => "wood",
        }
    }

    /// Looks up a preset by name, ignoring case. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn bundle(self) -> PresetBundle {
        match self {
            GevelPreset::Brick => PresetBundle {
                lighting_enabled: Some(true),
                intensity: Some(0.8),
                ambient: Some(0.4),
                tint: Some(0xC8_6B_4A),
                blend_mode: Some(BlendMode::Multiply),
                roughness: Some(0.9),
                metallic: Some(0.0),
                ..PresetBundle::default()
            },
            GevelPreset::Stone => PresetBundle {
                lighting_enabled: Some(true),
                intensity: Some(0.7),
                ambient: Some(0.5),
                tint: Some(0xB4_B0_A8),
                blend_mode: Some(BlendMode::Normal),
                roughness: Some(0.8),
                metallic: Some(0.1),
                ..PresetBundle::default()
            },
            GevelPreset::Metal => PresetBundle {
                lighting_enabled: Some(true),
                intensity: Some(1.2),
                ambient: Some(0.2),
                direction: Some(Vec3::new(-0.3, -0.6, 1.0)),
                blend_mode: Some(BlendMode::Screen),
                roughness: Some(0.2),
                metallic: Some(0.9),
                ..PresetBundle::default()
            },
            GevelPreset::Glass => PresetBundle {
                lighting_enabled: Some(true),
                intensity: Some(1.0),
                ambient: Some(0.6),
                blend_mode: Some(BlendMode::Screen),
                roughness: Some(0.05),
                metallic: Some(0.1),
                opacity: Some(0.6),
                ..PresetBundle::default()
            },
            GevelPreset::Wood => PresetBundle {
                lighting_enabled: Some(true),
                intensity: Some(0.9),
                ambient: Some(0.35),
                tint: Some(0xA0_6A_3C),
                blend_mode: Some(BlendMode::Multiply),
                roughness: Some(0.7),
                metallic: Some(0.0),
                ..PresetBundle::default()
            },
        }
    }
}

impl fmt::Display for GevelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gevel preset: {0}")]
pub struct UnknownPreset(pub String);

impl FromStr for GevelPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for preset in GevelPreset::ALL {
            assert_eq!(preset.name().parse::<GevelPreset>(), Ok(preset));
        }
        assert_eq!(GevelPreset::from_name(" Metal "), Some(GevelPreset::Metal));
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(GevelPreset::from_name("marble"), None);
        assert!("".parse::<GevelPreset>().is_err());
    }

    #[test]
    fn test_every_bundle_enables_lighting() {
        for preset in GevelPreset::ALL {
            assert_eq!(preset.bundle().lighting_enabled, Some(true), "{preset}");
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&GevelPreset::Glass).unwrap();
        assert_eq!(json, "\"glass\"");
        let preset: GevelPreset = serde_json::from_str("\"wood\"").unwrap();
        assert_eq!(preset, GevelPreset::Wood);
    }
}
