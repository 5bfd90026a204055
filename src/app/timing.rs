use std::time::Instant;
use winit::window::Window;

/// Once-per-half-second title refresh showing fps and editor status.
pub struct FrameTiming {
    last_title_time: Instant,
    frame_count: u32,
    base_title: String,
}

impl FrameTiming {
    pub fn new(base_title: String) -> Self {
        Self {
            last_title_time: Instant::now(),
            frame_count: 0,
            base_title,
        }
    }

    pub fn update(&mut self, window: Option<&Window>, now: Instant, status: &str) {
        self.frame_count = self.frame_count.saturating_add(1);
        let elapsed = now.saturating_duration_since(self.last_title_time);
        if elapsed.as_secs_f32() >= 0.5 {
            let fps = self.frame_count as f32 / elapsed.as_secs_f32();
            if let Some(window) = window {
                window.set_title(&format!("{} - {} - {:.0} fps", self.base_title, status, fps));
            }
            self.frame_count = 0;
            self.last_title_time = now;
        }
    }
}
