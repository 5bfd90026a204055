use std::path::Path;

use crate::interaction::EditorMode;
use crate::registry::TransformRegistry;
use crate::transform::{BlendMode, DEFAULT_PERSPECTIVE, GevelPreset, PivotMode, Transform};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialConfig {
    pub blend_mode: Option<BlendMode>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightingConfig {
    pub enabled: Option<bool>,
}

/// Editor options. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub pivot_mode: PivotMode,
    pub gevel_preset: Option<GevelPreset>,
    pub material: MaterialConfig,
    pub lighting: LightingConfig,
    pub perspective: f32,
    pub depth_sorting: bool,
    pub pan_enabled: bool,
    pub mode: EditorMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pivot_mode: PivotMode::Center,
            gevel_preset: None,
            material: MaterialConfig::default(),
            lighting: LightingConfig::default(),
            perspective: DEFAULT_PERSPECTIVE,
            depth_sorting: true,
            pan_enabled: true,
            mode: EditorMode::Edit,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Transform every new line starts from. Explicit material/lighting
    /// options win over the preset bundle.
    pub fn line_defaults(&self) -> Transform {
        let mut transform = Transform::with_perspective(self.perspective);
        transform.set_pivot_mode(self.pivot_mode);
        transform.set_preset(self.gevel_preset);
        if let Some(blend_mode) = self.material.blend_mode {
            transform.material.blend_mode = blend_mode;
        }
        if let Some(enabled) = self.lighting.enabled {
            transform.lighting.enabled = enabled;
        }
        transform
    }

    pub fn apply(&self, registry: &mut TransformRegistry) {
        registry.set_defaults(self.line_defaults());
        registry.set_perspective(self.perspective);
        registry.set_depth_sorting(self.depth_sorting);
        log::debug!("applied editor config {self:?}");
    }
}
