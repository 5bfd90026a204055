//! Per-line 3D transform model.
//!
//! A [`Transform`] is plain data: pose, scale, skew, pivot, lighting and
//! material for one text line. [`Transform::to_render_properties`] turns it
//! into the flat tuple the 2D scene graph consumes every frame.

pub mod math;
pub mod preset;

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};

pub use math::{DEFAULT_PERSPECTIVE, LightingEffect, WHITE};
pub use preset::{GevelPreset, PresetBundle, UnknownPreset};

/// Named pivot positions. Advisory only: [`Transform::set_pivot`] moves the
/// pivot without touching the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotMode {
    Top,
    #[default]
    Center,
    Bottom,
}

impl PivotMode {
    pub fn pivot(self) -> Vec2 {
        match self {
            PivotMode::Top => Vec2::new(0.5, 0.0),
            PivotMode::Center => Vec2::new(0.5, 0.5),
            PivotMode::Bottom => Vec2::new(0.5, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pivot mode: {0}")]
pub struct UnknownPivotMode(pub String);

impl FromStr for PivotMode {
    type Err = UnknownPivotMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(PivotMode::Top),
            "center" => Ok(PivotMode::Center),
            "bottom" => Ok(PivotMode::Bottom),
            _ => Err(UnknownPivotMode(s.to_string())),
        }
    }
}

/// Tint compositing mode handed through to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Overlay,
    Screen,
    Add,
}

impl BlendMode {
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Overlay => "overlay",
            BlendMode::Screen => "screen",
            BlendMode::Add => "add",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blend mode: {0}")]
pub struct UnknownBlendMode(pub String);

impl FromStr for BlendMode {
    type Err = UnknownBlendMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(BlendMode::Normal),
            "multiply" => Ok(BlendMode::Multiply),
            "overlay" => Ok(BlendMode::Overlay),
            "screen" => Ok(BlendMode::Screen),
            "add" => Ok(BlendMode::Add),
            _ => Err(UnknownBlendMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lighting {
    pub enabled: bool,
    pub intensity: f32,
    pub ambient: f32,
    pub direction: Vec3,
    /// `0xRRGGBB`; anything other than white replaces the computed grey.
    pub tint: u32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 1.0,
            ambient: 0.3,
            direction: Vec3::new(-0.5, -0.5, 1.0),
            tint: WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub blend_mode: BlendMode,
    pub roughness: f32,
    pub metallic: f32,
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Normal,
            roughness: 0.5,
            metallic: 0.0,
            opacity: 1.0,
        }
    }
}

/// Everything the scene graph needs to place one line for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderProperties {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale: Vec2,
    pub pivot: Vec2,
    pub alpha: f32,
    pub skew: Vec2,
    pub tint: u32,
    pub blend_mode: BlendMode,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub position: Vec3,
    /// Degrees. `z` is in-plane rotation, `x`/`y` only feed skew and lighting.
    pub rotation: Vec3,
    pub scale: Vec3,
    uniform_scale: f32,
    /// Degrees, independent of rotation.
    pub skew: Vec3,
    /// Normalized `0..1` within the line's bounds.
    pub pivot: Vec2,
    pivot_mode: PivotMode,
    pub lighting: Lighting,
    pub material: Material,
    pub perspective: f32,
    preset: Option<GevelPreset>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::with_perspective(DEFAULT_PERSPECTIVE)
    }

    pub fn with_perspective(perspective: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            uniform_scale: 1.0,
            skew: Vec3::ZERO,
            pivot: PivotMode::Center.pivot(),
            pivot_mode: PivotMode::Center,
            lighting: Lighting::default(),
            material: Material::default(),
            perspective,
            preset: None,
        }
    }

    pub fn uniform_scale(&self) -> f32 {
        self.uniform_scale
    }

    /// Overwrites `scale.x` and `scale.y` together.
    pub fn set_uniform_scale(&mut self, value: f32) {
        self.uniform_scale = value;
        self.scale.x = value;
        self.scale.y = value;
    }

    pub fn pivot_mode(&self) -> PivotMode {
        self.pivot_mode
    }

    pub fn set_pivot_mode(&mut self, mode: PivotMode) {
        self.pivot_mode = mode;
        self.pivot = mode.pivot();
    }

    /// Free-form pivot. The named mode is left as it was.
    pub fn set_pivot(&mut self, pivot: Vec2) {
        self.pivot = pivot;
    }

    pub fn preset(&self) -> Option<GevelPreset> {
        self.preset
    }

    /// Merges the preset's bundle into lighting/material. Fields the preset
    /// does not name keep their current values.
    pub fn apply_preset(&mut self, preset: GevelPreset) {
        let bundle = preset.bundle();
        let lighting = &mut self.lighting;
        if let Some(enabled) = bundle.lighting_enabled {
            lighting.enabled = enabled;
        }
        if let Some(intensity) = bundle.intensity {
            lighting.intensity = intensity;
        }
        if let Some(ambient) = bundle.ambient {
            lighting.ambient = ambient;
        }
        if let Some(direction) = bundle.direction {
            lighting.direction = direction;
        }
        if let Some(tint) = bundle.tint {
            lighting.tint = tint;
        }

        let material = &mut self.material;
        if let Some(blend_mode) = bundle.blend_mode {
            material.blend_mode = blend_mode;
        }
        if let Some(roughness) = bundle.roughness {
            material.roughness = roughness;
        }
        if let Some(metallic) = bundle.metallic {
            material.metallic = metallic;
        }
        if let Some(opacity) = bundle.opacity {
            material.opacity = opacity;
        }
        self.preset = Some(preset);
    }

    /// Applies a preset by name. Returns `false` (and changes nothing) for
    /// unknown names.
    pub fn apply_preset_named(&mut self, name: &str) -> bool {
        match GevelPreset::from_name(name) {
            Some(preset) => {
                self.apply_preset(preset);
                true
            }
            None => {
                log::debug!("ignoring unknown gevel preset {name:?}");
                false
            }
        }
    }

    /// `None` clears the preset marker only; lighting and material keep
    /// whatever the last preset assigned.
    pub fn set_preset(&mut self, preset: Option<GevelPreset>) {
        match preset {
            Some(preset) => self.apply_preset(preset),
            None => self.preset = None,
        }
    }

    pub fn depth_alpha(&self) -> f32 {
        math::depth_alpha(self.position.z, self.perspective)
    }

    /// Renderer skew in radians.
    pub fn combined_skew(&self) -> Vec2 {
        math::combined_skew(self.rotation, self.skew, self.perspective)
    }

    pub fn lighting_effect(&self) -> LightingEffect {
        let input = math::LightingInput {
            enabled: self.lighting.enabled,
            intensity: self.lighting.intensity,
            ambient: self.lighting.ambient,
            direction: self.lighting.direction,
            tint: self.lighting.tint,
            metallic: self.material.metallic,
            roughness: self.material.roughness,
        };
        math::lighting_effect(self.rotation, &input)
    }

    pub fn to_render_properties(&self) -> RenderProperties {
        let lighting = self.lighting_effect();
        let alpha = self.depth_alpha() * lighting.alpha * self.material.opacity;
        RenderProperties {
            x: self.position.x,
            y: self.position.y,
            rotation: self.rotation.z.to_radians(),
            scale: Vec2::new(self.scale.x, self.scale.y),
            pivot: self.pivot,
            alpha: if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) },
            skew: self.combined_skew(),
            tint: lighting.tint,
            blend_mode: self.material.blend_mode,
        }
    }
}
