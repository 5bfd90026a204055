use glam::Vec2;
use poster3d::{
    Bounds, CameraCapabilities, HostError, LineIndex, RenderHost, TransformRegistry,
    registry::child_slot,
};

use super::camera::ViewportCamera;

const LINE_HEIGHT: f32 = 32.0;
const LINE_GAP: f32 = 8.0;
const CHAR_WIDTH: f32 = 11.0;

/// Text-only scene used by the demo window. Bounds come from a monospace
/// layout estimate plus each line's drag offset; pose transforms are not
/// reflected in hit boxes.
pub struct DemoHost {
    pub camera: ViewportCamera,
    content_origin: Vec2,
    texts: Vec<String>,
    line_offsets: Vec<Vec2>,
    poem_offset: Vec2,
    content_alpha: f32,
}

impl DemoHost {
    pub fn new(content_origin: Vec2) -> Self {
        Self {
            camera: ViewportCamera::new(),
            content_origin,
            texts: Vec::new(),
            line_offsets: Vec::new(),
            poem_offset: Vec2::ZERO,
            content_alpha: 1.0,
        }
    }

    /// `texts` are the content container's children: title, author, lines.
    pub fn set_texts(&mut self, texts: Vec<String>) {
        self.line_offsets = vec![Vec2::ZERO; texts.len()];
        self.texts = texts;
    }

    pub fn content_alpha(&self) -> f32 {
        self.content_alpha
    }

    /// Pulls drag offsets from the registry so hit boxes follow the lines.
    pub fn sync(&mut self, registry: &TransformRegistry, indices: impl Iterator<Item = LineIndex>) {
        self.poem_offset = registry.poem_offset();
        for index in indices {
            if let Some(slot) = child_slot(index).filter(|slot| *slot < self.line_offsets.len()) {
                self.line_offsets[slot] = registry.line_offset(index);
            }
        }
    }
}

impl RenderHost for DemoHost {
    fn to_content_local(&self, global: Vec2) -> Result<Vec2, HostError> {
        if self.texts.is_empty() {
            return Err(HostError::NotMounted);
        }
        Ok(self.camera.to_world(global) - self.content_origin - self.poem_offset)
    }

    fn poem_bounds(&self) -> Result<Bounds, HostError> {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for slot in 0..self.texts.len() {
            let bounds = self.child_bounds(slot)?;
            min = min.min(Vec2::new(bounds.x, bounds.y));
            max = max.max(Vec2::new(bounds.x + bounds.width, bounds.y + bounds.height));
        }
        if !min.is_finite() {
            return Err(HostError::NotMounted);
        }
        Ok(Bounds::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    fn child_bounds(&self, slot: usize) -> Result<Bounds, HostError> {
        let text = self.texts.get(slot).ok_or(HostError::MissingChild(slot))?;
        let offset = self.line_offsets.get(slot).copied().unwrap_or(Vec2::ZERO);
        Ok(Bounds::new(
            offset.x,
            slot as f32 * (LINE_HEIGHT + LINE_GAP) + offset.y,
            text.chars().count() as f32 * CHAR_WIDTH,
            LINE_HEIGHT,
        ))
    }

    fn set_content_alpha(&mut self, alpha: f32) {
        self.content_alpha = alpha;
    }

    fn set_camera_capabilities(&mut self, capabilities: CameraCapabilities) {
        self.camera.set_capabilities(capabilities);
    }

    fn remove_camera_pan(&mut self) {
        let capabilities = self.camera.capabilities();
        self.camera.set_capabilities(CameraCapabilities {
            pan: false,
            ..capabilities
        });
    }
}
