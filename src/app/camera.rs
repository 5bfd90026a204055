use glam::Vec2;
use poster3d::CameraCapabilities;

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 8.0;
const WHEEL_ZOOM_STEP: f32 = 1.1;

/// Stand-in for the renderer's viewport plugins: drag-to-pan and wheel zoom,
/// each only while its capability is installed. Inertia is not simulated.
#[derive(Debug, Clone, Copy)]
pub struct ViewportCamera {
    pub offset: Vec2,
    pub zoom: f32,
    drag_last: Option<Vec2>,
    capabilities: CameraCapabilities,
}

impl ViewportCamera {
    pub fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            drag_last: None,
            capabilities: CameraCapabilities::NONE,
        }
    }

    pub fn capabilities(&self) -> CameraCapabilities {
        self.capabilities
    }

    pub fn set_capabilities(&mut self, capabilities: CameraCapabilities) {
        self.capabilities = capabilities;
        if !capabilities.pan {
            self.drag_last = None;
        }
    }

    /// Screen position to world (stage) position.
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.zoom
    }

    pub fn pointer_down(&mut self, screen: Vec2) {
        if self.capabilities.pan {
            self.drag_last = Some(screen);
        }
    }

    pub fn pointer_move(&mut self, screen: Vec2) -> bool {
        let Some(last) = self.drag_last else {
            return false;
        };
        let delta = screen - last;
        self.offset += delta;
        self.drag_last = Some(screen);
        delta != Vec2::ZERO
    }

    pub fn pointer_up(&mut self) {
        self.drag_last = None;
    }

    /// Zooms around `screen` so the point under the cursor stays put.
    pub fn wheel(&mut self, screen: Vec2, lines: f32) -> bool {
        if !self.capabilities.zoom || lines == 0.0 {
            return false;
        }
        let anchor = self.to_world(screen);
        self.zoom = (self.zoom * WHEEL_ZOOM_STEP.powf(lines)).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = screen - anchor * self.zoom;
        true
    }
}
