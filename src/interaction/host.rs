//! Boundary to the scene graph that actually paints the poster.
//!
//! The controller never touches renderer objects directly; it asks a
//! [`RenderHost`] for bounds and coordinate conversions and tells it which
//! camera capabilities to expose.

use glam::Vec2;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("content container is not mounted")]
    NotMounted,
    #[error("content container has no child at slot {0}")]
    MissingChild(usize),
    #[error("renderer error: {0}")]
    Renderer(String),
}

/// Axis-aligned box in the content container's local space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Edges are inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Which camera plugins the renderer's viewport should have installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CameraCapabilities {
    pub pan: bool,
    pub zoom: bool,
    pub inertia: bool,
}

impl CameraCapabilities {
    pub const NONE: Self = Self {
        pan: false,
        zoom: false,
        inertia: false,
    };

    pub const ALL: Self = Self {
        pan: true,
        zoom: true,
        inertia: true,
    };
}

pub trait RenderHost {
    /// Converts a pointer position from global (stage) space into the content
    /// container's local space.
    fn to_content_local(&self, global: Vec2) -> Result<Vec2, HostError>;

    /// Bounds of the whole poem block.
    fn poem_bounds(&self) -> Result<Bounds, HostError>;

    /// Bounds of the content container child at `slot`
    /// (see [`child_slot`](crate::registry::child_slot)).
    fn child_bounds(&self, slot: usize) -> Result<Bounds, HostError>;

    fn set_content_alpha(&mut self, alpha: f32);

    fn set_camera_capabilities(&mut self, capabilities: CameraCapabilities);

    /// Removes only the pan plugin, leaving zoom and inertia alone.
    fn remove_camera_pan(&mut self);
}
