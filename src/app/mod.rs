mod camera;
mod host;
mod input;
mod timing;

use glam::Vec2;
use host::DemoHost;
use input::InputAction;
use poster3d::{
    CursorHint, EditorConfig, EditorSession, Frame, LineIndex, Modifiers, PointerEvent,
};
use timing::FrameTiming;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

/// Title, author, then the poem's lines.
const POEMS: &[&[&str]] = &[
    &[
        "Herfst",
        "Anoniem",
        "de bladeren vallen",
        "langs de gevel van het huis",
        "waar niemand meer woont",
    ],
    &[
        "Stad",
        "Onbekend",
        "baksteen en glas",
        "staal in de regen",
        "hout dat nog ruikt",
        "naar het bos",
    ],
];

const CONTENT_ORIGIN: Vec2 = Vec2::new(80.0, 80.0);

pub struct App {
    window: Option<Arc<Window>>,
    session: EditorSession,
    host: DemoHost,
    modifiers: Modifiers,
    mouse_pos: Option<Vec2>,
    poem_index: usize,
    cursor: CursorHint,
    rendered_revision: Option<u64>,
    timing: FrameTiming,
    target_frame_duration: Duration,
    next_frame_time: Instant,
}

impl App {
    fn new(config: &EditorConfig) -> Self {
        let mut host = DemoHost::new(CONTENT_ORIGIN);
        let session = EditorSession::from_config(config, 0, &mut host);
        let mut app = Self {
            window: None,
            session,
            host,
            modifiers: Modifiers::NONE,
            mouse_pos: None,
            poem_index: 0,
            cursor: CursorHint::Default,
            rendered_revision: None,
            timing: FrameTiming::new("Poster3d".to_string()),
            target_frame_duration: Duration::from_millis(16),
            next_frame_time: Instant::now(),
        };
        app.load_poem(0);
        app
    }

    fn load_poem(&mut self, index: usize) {
        let Some(poem) = POEMS.get(index) else {
            return;
        };
        self.poem_index = index;
        self.host
            .set_texts(poem.iter().map(|text| text.to_string()).collect());
        self.session
            .set_poem(poem.len().saturating_sub(2), &mut self.host);
        log::info!("loaded poem '{}'", poem[0]);
    }

    fn selected(&self) -> Vec<LineIndex> {
        self.session.controller().selection().iter().copied().collect()
    }

    fn status(&self) -> String {
        let controller = self.session.controller();
        format!(
            "{:?} ({:?}), pan {}, selected {:?}",
            controller.mode(),
            controller.state(),
            if controller.pan_enabled() { "on" } else { "off" },
            controller.selection()
        )
    }

    fn pointer(&mut self, event: PointerEvent) {
        self.host
            .sync(self.session.registry(), self.session.line_indices());
        self.session.handle_pointer(event, &mut self.host);

        let camera = &mut self.host.camera;
        match event {
            PointerEvent::Down { position, .. } => camera.pointer_down(position),
            PointerEvent::Move { position } => {
                if camera.pointer_move(position) {
                    self.rendered_revision = None;
                }
            }
            PointerEvent::Up { .. } | PointerEvent::UpOutside => camera.pointer_up(),
        }
        self.update_cursor();
    }

    fn update_cursor(&mut self) {
        let cursor = self.session.controller().cursor();
        if cursor == self.cursor {
            return;
        }
        self.cursor = cursor;
        if let Some(window) = &self.window {
            window.set_cursor(match cursor {
                CursorHint::Default => CursorIcon::Default,
                CursorHint::Grab => CursorIcon::Grab,
                CursorHint::Grabbing => CursorIcon::Grabbing,
            });
        }
    }

    fn apply_action(&mut self, action: InputAction) {
        let selected = self.selected();
        let registry = self.session.registry_mut();
        match action {
            InputAction::None => {}
            InputAction::SetMode(mode) => self.session.set_mode(mode, &mut self.host),
            InputAction::TogglePan => {
                let enabled = !self.session.controller().pan_enabled();
                self.session.set_pan_enabled(enabled, &mut self.host);
            }
            InputAction::ToggleDepthSorting => {
                let enabled = !registry.depth_sorting();
                registry.set_depth_sorting(enabled);
            }
            InputAction::Preset(preset) if selected.is_empty() => {
                registry.apply_preset_all(preset);
            }
            InputAction::Preset(preset) => {
                for index in selected {
                    registry.apply_preset(index, preset);
                }
            }
            InputAction::ResetSelected => {
                for index in selected {
                    registry.reset(index);
                }
            }
            InputAction::ResetAll => registry.reset_all(),
            InputAction::Rotate(degrees) => {
                for index in selected {
                    let z = registry.get(index).rotation.z;
                    registry.update(index, "rotation.z", z + degrees);
                }
            }
            InputAction::Push(depth) => {
                for index in selected {
                    let z = registry.get(index).position.z;
                    registry.update(index, "position.z", z + depth);
                }
            }
            InputAction::NextPoem => self.load_poem((self.poem_index + 1) % POEMS.len()),
        }
    }

    fn render(&mut self) {
        let now = Instant::now();
        let status = self.status();
        self.timing
            .update(self.window.as_deref(), now, &status);

        let revision = self.session.registry().revision();
        if self.rendered_revision != Some(revision) {
            let frame = self.session.frame();
            self.rendered_revision = Some(self.session.registry().revision());
            self.log_frame(&frame);
        }
    }

    fn log_frame(&self, frame: &Frame) {
        log::debug!(
            "frame: content offset {}, camera {} x{:.2}, content alpha {:.2}",
            frame.content_offset,
            self.host.camera.offset,
            self.host.camera.zoom,
            self.host.content_alpha()
        );
        for line in &frame.lines {
            let props = &line.properties;
            log::debug!(
                "  line {:>2}: at ({:.1}, {:.1}) rot {:.3} scale {} skew {} alpha {:.2} tint #{:06x} {}",
                line.index,
                props.x,
                props.y,
                props.rotation,
                props.scale,
                props.skew,
                props.alpha,
                props.tint,
                props.blend_mode
            );
        }
        if log::log_enabled!(log::Level::Trace) {
            match self.session.registry().to_json() {
                Ok(json) => log::trace!("registry: {json}"),
                Err(err) => log::warn!("failed to dump registry: {err}"),
            }
        }
    }

    fn update_target_frame_duration(&mut self, window: &Window) {
        let mut target = Duration::from_millis(16);
        if let Some(monitor) = window.current_monitor() {
            if let Some(millihz) = monitor.refresh_rate_millihertz() {
                let hz = millihz as f32 / 1000.0;
                if hz > 1.0 {
                    target = Duration::from_secs_f32(1.0 / hz);
                }
            }
        }
        self.target_frame_duration = target;
        self.next_frame_time = Instant::now() + self.target_frame_duration;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("Poster3d")
            .with_inner_size(PhysicalSize::new(1280u32, 720u32))
            .with_resizable(true);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );
        self.update_target_frame_duration(&window);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Focused(false) => {
                self.pointer(PointerEvent::UpOutside);
                self.mouse_pos = None;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }
                let pressed = event.state == ElementState::Pressed;
                let action = input::handle_key(event.physical_key, pressed, self.modifiers);
                self.apply_action(action);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = input::map_modifiers(modifiers);
                self.session
                    .modifiers_changed(self.modifiers, &mut self.host);
                self.update_cursor();
            }
            WindowEvent::Moved(_) | WindowEvent::Resized(_) => {
                if let Some(window) = self.window.clone() {
                    self.update_target_frame_duration(&window);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.mouse_pos = Some(position);
                self.pointer(PointerEvent::Move { position });
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_pos = None;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let event = match (state, self.mouse_pos) {
                    (ElementState::Pressed, Some(position)) => PointerEvent::Down {
                        position,
                        modifiers: self.modifiers,
                    },
                    (ElementState::Pressed, None) => return,
                    (ElementState::Released, Some(position)) => PointerEvent::Up { position },
                    (ElementState::Released, None) => PointerEvent::UpOutside,
                };
                self.pointer(event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                if let Some(position) = self.mouse_pos {
                    if self.host.camera.wheel(position, lines) {
                        self.rendered_revision = None;
                    }
                }
            }
            WindowEvent::RedrawRequested => self.render(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame_time {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame_time = now + self.target_frame_duration;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame_time));
    }
}

pub fn run(config_path: Option<PathBuf>) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = match config_path {
        Some(path) => match EditorConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Failed to load config {}: {}", path.display(), err);
                EditorConfig::default()
            }
        },
        None => EditorConfig::default(),
    };

    log::info!("Poster3d editor demo");
    log::info!("   V/E/P/L: viewport/edit/poem/line mode, T: pan toggle, D: depth sort");
    log::info!("   1-5: brick/stone/metal/glass/wood, 0: clear preset, R/Shift+R: reset");
    log::info!("   arrows: rotate/push selected lines, N: next poem, ESC: quit");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {err}");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(&config);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {err}");
    }
}
