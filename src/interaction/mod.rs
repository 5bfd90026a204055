//! Pointer-drag state machine for the poster canvas.
//!
//! One press decides one gesture: panning the camera, dragging the whole
//! poem, or dragging the selected lines together. The decision is taken on
//! pointer-down and held until the pointer is released, however the release
//! arrives.

pub mod host;

use std::collections::BTreeSet;

use glam::Vec2;

use crate::registry::{LineIndex, TransformRegistry, child_slot};
pub use host::{Bounds, CameraCapabilities, HostError, RenderHost};

/// Content opacity while the poem is being dragged.
const DRAG_CONTENT_ALPHA: f32 = 0.5;

/// Overall editing mode, chosen by the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Navigation only: the camera owns every gesture.
    Viewport,
    /// Line selection; ctrl/meta + drag pans.
    #[default]
    Edit,
    /// Drag the whole poem.
    #[serde(rename = "poem")]
    PoemMove,
    /// Drag the selected lines.
    #[serde(rename = "line")]
    LineMove,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    fn pans(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Vec2, modifiers: Modifiers },
    Move { position: Vec2 },
    Up { position: Vec2 },
    /// Released outside the canvas; no usable position.
    UpOutside,
}

/// Whether an event should continue to later handlers (line selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    Grab,
    Grabbing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    DraggingViewport,
    DraggingPoem,
    DraggingLine,
}

/// Scratch state of one press, dropped on release.
#[derive(Debug, Clone, PartialEq)]
enum Session {
    Viewport,
    Poem {
        start_pointer: Vec2,
        start_offset: Vec2,
    },
    Line {
        start_pointer: Vec2,
        start_offsets: Vec<(LineIndex, Vec2)>,
    },
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    mode: EditorMode,
    pan_enabled: bool,
    selection: BTreeSet<LineIndex>,
    session: Option<Session>,
    cursor: CursorHint,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            mode: EditorMode::Edit,
            pan_enabled: true,
            selection: BTreeSet::new(),
            session: None,
            cursor: CursorHint::Default,
        }
    }

    pub fn with_pan_enabled(mut self, enabled: bool) -> Self {
        self.pan_enabled = enabled;
        self
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switches mode and reconfigures the camera right away, so the next
    /// press already sees the new capabilities. An active gesture is ended
    /// as if the pointer had been released.
    pub fn set_mode(&mut self, mode: EditorMode, host: &mut dyn RenderHost) {
        if self.session.is_some() {
            self.release(host, None);
        }
        if self.mode != mode {
            log::info!("editor mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.cursor = CursorHint::Default;
        self.configure_camera(host);
    }

    pub fn pan_enabled(&self) -> bool {
        self.pan_enabled
    }

    pub fn set_pan_enabled(&mut self, enabled: bool, host: &mut dyn RenderHost) {
        self.pan_enabled = enabled;
        self.configure_camera(host);
    }

    /// Camera plugins each mode allows.
    pub fn camera_capabilities(&self) -> CameraCapabilities {
        match self.mode {
            EditorMode::Viewport => CameraCapabilities::ALL,
            EditorMode::Edit => CameraCapabilities {
                pan: self.pan_enabled,
                zoom: true,
                inertia: true,
            },
            EditorMode::PoemMove | EditorMode::LineMove => CameraCapabilities::NONE,
        }
    }

    pub fn configure_camera(&self, host: &mut dyn RenderHost) {
        let capabilities = self.camera_capabilities();
        log::debug!("camera capabilities for {:?}: {capabilities:?}", self.mode);
        host.set_camera_capabilities(capabilities);
    }

    pub fn selection(&self) -> &BTreeSet<LineIndex> {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: impl IntoIterator<Item = LineIndex>) {
        self.selection = selection.into_iter().collect();
    }

    pub fn select(&mut self, index: LineIndex) {
        self.selection.clear();
        self.selection.insert(index);
    }

    pub fn toggle_selected(&mut self, index: LineIndex) {
        if !self.selection.remove(&index) {
            self.selection.insert(index);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn state(&self) -> InteractionState {
        match self.session {
            None => InteractionState::Idle,
            Some(Session::Viewport) => InteractionState::DraggingViewport,
            Some(Session::Poem { .. }) => InteractionState::DraggingPoem,
            Some(Session::Line { .. }) => InteractionState::DraggingLine,
        }
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        host: &mut dyn RenderHost,
        registry: &mut TransformRegistry,
    ) -> Propagation {
        match event {
            PointerEvent::Down {
                position,
                modifiers,
            } => self.pointer_down(position, modifiers, host, registry),
            PointerEvent::Move { position } => self.pointer_move(position, host, registry),
            PointerEvent::Up { position } => self.release(host, Some(position)),
            PointerEvent::UpOutside => self.release(host, None),
        }
    }

    pub fn pointer_down(
        &mut self,
        position: Vec2,
        modifiers: Modifiers,
        host: &mut dyn RenderHost,
        registry: &TransformRegistry,
    ) -> Propagation {
        if self.session.is_some() {
            log::debug!("ignoring pointer-down during {:?}", self.state());
            return Propagation::Continue;
        }

        match self.mode {
            EditorMode::Viewport => Propagation::Continue,
            EditorMode::Edit => {
                if !modifiers.pans() {
                    return Propagation::Continue;
                }
                host.set_camera_capabilities(CameraCapabilities {
                    pan: true,
                    ..self.camera_capabilities()
                });
                self.session = Some(Session::Viewport);
                self.cursor = CursorHint::Grabbing;
                log::debug!("viewport drag started at {position}");
                Propagation::Stop
            }
            EditorMode::PoemMove => {
                if !self.over_poem(position, host) {
                    return Propagation::Continue;
                }
                let start_offset = registry.poem_offset();
                self.session = Some(Session::Poem {
                    start_pointer: position,
                    start_offset,
                });
                host.set_content_alpha(DRAG_CONTENT_ALPHA);
                self.cursor = CursorHint::Grabbing;
                log::debug!("poem drag started at {position} from offset {start_offset}");
                Propagation::Stop
            }
            EditorMode::LineMove => {
                if !self.over_selected_line(position, host) {
                    return Propagation::Continue;
                }
                let start_offsets: Vec<_> = self
                    .selection
                    .iter()
                    .map(|&index| (index, registry.line_offset(index)))
                    .collect();
                log::debug!(
                    "line drag started at {position} for {} lines",
                    start_offsets.len()
                );
                self.session = Some(Session::Line {
                    start_pointer: position,
                    start_offsets,
                });
                self.cursor = CursorHint::Grabbing;
                Propagation::Stop
            }
        }
    }

    pub fn pointer_move(
        &mut self,
        position: Vec2,
        host: &mut dyn RenderHost,
        registry: &mut TransformRegistry,
    ) -> Propagation {
        match &self.session {
            None => {
                if let Some(cursor) = self.hover_cursor(position, host) {
                    self.cursor = cursor;
                }
                Propagation::Continue
            }
            // The camera plugin moves the viewport itself.
            Some(Session::Viewport) => Propagation::Stop,
            Some(Session::Poem {
                start_pointer,
                start_offset,
            }) => {
                let delta = position - *start_pointer;
                registry.set_poem_offset(*start_offset + delta);
                Propagation::Stop
            }
            Some(Session::Line {
                start_pointer,
                start_offsets,
            }) => {
                let delta = position - *start_pointer;
                for &(index, start) in start_offsets {
                    registry.set_line_offset(index, start + delta);
                }
                Propagation::Stop
            }
        }
    }

    /// Ends the current gesture whichever way the pointer left: release,
    /// release outside, or losing the pan modifier.
    pub fn release(&mut self, host: &mut dyn RenderHost, position: Option<Vec2>) -> Propagation {
        let Some(session) = self.session.take() else {
            return Propagation::Continue;
        };
        if session == Session::Viewport {
            host.remove_camera_pan();
        }
        host.set_content_alpha(1.0);
        log::debug!("drag ended ({session:?})");

        self.cursor = match position {
            Some(position) => self.hover_cursor(position, &*host).unwrap_or_default(),
            None => CursorHint::Default,
        };
        Propagation::Stop
    }

    /// Ends a viewport drag when the ctrl/meta key that started it goes up.
    pub fn modifiers_changed(&mut self, modifiers: Modifiers, host: &mut dyn RenderHost) {
        if self.session == Some(Session::Viewport) && !modifiers.pans() {
            log::debug!("pan modifier released mid-drag");
            self.release(host, None);
        }
    }

    /// Cursor for an idle pointer at `position`, or `None` when the host
    /// could not answer.
    fn hover_cursor(&self, position: Vec2, host: &dyn RenderHost) -> Option<CursorHint> {
        let over = match self.mode {
            EditorMode::Viewport | EditorMode::Edit => return Some(CursorHint::Default),
            EditorMode::PoemMove => self.try_over_poem(position, host),
            EditorMode::LineMove => self.try_over_selected_line(position, host),
        };
        match over {
            Ok(true) => Some(CursorHint::Grab),
            Ok(false) => Some(CursorHint::Default),
            Err(err) => {
                log::warn!("cursor hit test failed: {err}");
                None
            }
        }
    }

    fn over_poem(&self, position: Vec2, host: &dyn RenderHost) -> bool {
        self.try_over_poem(position, host).unwrap_or_else(|err| {
            log::warn!("poem hit test failed: {err}");
            false
        })
    }

    fn over_selected_line(&self, position: Vec2, host: &dyn RenderHost) -> bool {
        self.try_over_selected_line(position, host)
            .unwrap_or_else(|err| {
                log::warn!("line hit test failed: {err}");
                false
            })
    }

    fn try_over_poem(&self, position: Vec2, host: &dyn RenderHost) -> Result<bool, HostError> {
        let local = host.to_content_local(position)?;
        Ok(host.poem_bounds()?.contains(local))
    }

    fn try_over_selected_line(
        &self,
        position: Vec2,
        host: &dyn RenderHost,
    ) -> Result<bool, HostError> {
        let local = host.to_content_local(position)?;
        for &index in &self.selection {
            if line_hit(index, local, host)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Bounds test for one line at a point already in content-local space.
pub fn line_hit(index: LineIndex, local: Vec2, host: &dyn RenderHost) -> Result<bool, HostError> {
    let Some(slot) = child_slot(index) else {
        return Ok(false);
    };
    Ok(host.child_bounds(slot)?.contains(local))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Host with fixed bounds and an identity coordinate transform.
    #[derive(Debug, Default)]
    pub(crate) struct FakeHost {
        pub origin: Vec2,
        pub poem: Option<Bounds>,
        pub children: Vec<Bounds>,
        pub content_alpha: Vec<f32>,
        pub capabilities: Vec<CameraCapabilities>,
        pub pan_removed: usize,
        pub broken: bool,
    }

    impl FakeHost {
        pub(crate) fn with_lines(lines: &[Bounds]) -> Self {
            // Title and author sit above the poem lines.
            let mut children = vec![
                Bounds::new(0.0, -60.0, 200.0, 20.0),
                Bounds::new(0.0, -30.0, 200.0, 20.0),
            ];
            children.extend_from_slice(lines);
            Self {
                poem: Some(Bounds::new(0.0, -60.0, 300.0, 400.0)),
                children,
                ..Self::default()
            }
        }

        pub(crate) fn current_capabilities(&self) -> Option<CameraCapabilities> {
            self.capabilities.last().copied()
        }
    }

    impl RenderHost for FakeHost {
        fn to_content_local(&self, global: Vec2) -> Result<Vec2, HostError> {
            if self.broken {
                return Err(HostError::NotMounted);
            }
            Ok(global - self.origin)
        }

        fn poem_bounds(&self) -> Result<Bounds, HostError> {
            self.poem.ok_or(HostError::NotMounted)
        }

        fn child_bounds(&self, slot: usize) -> Result<Bounds, HostError> {
            self.children
                .get(slot)
                .copied()
                .ok_or(HostError::MissingChild(slot))
        }

        fn set_content_alpha(&mut self, alpha: f32) {
            self.content_alpha.push(alpha);
        }

        fn set_camera_capabilities(&mut self, capabilities: CameraCapabilities) {
            self.capabilities.push(capabilities);
        }

        fn remove_camera_pan(&mut self) {
            self.pan_removed += 1;
            if let Some(mut last) = self.current_capabilities() {
                last.pan = false;
                self.capabilities.push(last);
            }
        }
    }

    fn down(x: f32, y: f32, modifiers: Modifiers) -> PointerEvent {
        PointerEvent::Down {
            position: Vec2::new(x, y),
            modifiers,
        }
    }

    fn moved(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move {
            position: Vec2::new(x, y),
        }
    }

    fn up(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Up {
            position: Vec2::new(x, y),
        }
    }

    fn lines_host() -> FakeHost {
        FakeHost::with_lines(&[
            Bounds::new(0.0, 0.0, 200.0, 20.0),
            Bounds::new(0.0, 30.0, 200.0, 20.0),
            Bounds::new(0.0, 60.0, 200.0, 20.0),
            Bounds::new(0.0, 90.0, 200.0, 20.0),
        ])
    }

    #[test]
    fn test_poem_drag_moves_offset_and_restores_alpha() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        registry.set_poem_offset(Vec2::new(5.0, -5.0));
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::PoemMove, &mut host);

        let result = controller.handle(down(100.0, 100.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(result, Propagation::Stop);
        assert_eq!(controller.state(), InteractionState::DraggingPoem);
        assert_eq!(host.content_alpha.last(), Some(&0.5));

        controller.handle(moved(140.0, 130.0), &mut host, &mut registry);
        assert_eq!(registry.poem_offset(), Vec2::new(45.0, 25.0));

        controller.handle(up(140.0, 130.0), &mut host, &mut registry);
        assert_eq!(controller.state(), InteractionState::Idle);
        assert_eq!(host.content_alpha.last(), Some(&1.0));
    }

    #[test]
    fn test_poem_miss_is_not_claimed() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::PoemMove, &mut host);

        let result = controller.handle(down(900.0, 900.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(result, Propagation::Continue);
        assert_eq!(controller.state(), InteractionState::Idle);
        assert!(host.content_alpha.is_empty());
    }

    #[test]
    fn test_selected_lines_move_together_from_own_snapshots() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        registry.set_line_offset(2, Vec2::new(1.0, 1.0));
        registry.set_line_offset(3, Vec2::new(-7.0, 4.0));
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::LineMove, &mut host);
        controller.set_selection([2, 3]);

        // Line 2 occupies y 60..80.
        let result = controller.handle(down(50.0, 65.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(result, Propagation::Stop);
        assert_eq!(controller.state(), InteractionState::DraggingLine);

        controller.handle(moved(60.0, 95.0), &mut host, &mut registry);
        assert_eq!(registry.line_offset(2), Vec2::new(11.0, 31.0));
        assert_eq!(registry.line_offset(3), Vec2::new(3.0, 34.0));
        assert_eq!(registry.line_offset(0), Vec2::ZERO);

        controller.handle(moved(50.0, 65.0), &mut host, &mut registry);
        assert_eq!(registry.line_offset(2), Vec2::new(1.0, 1.0));
        assert_eq!(registry.line_offset(3), Vec2::new(-7.0, 4.0));
    }

    #[test]
    fn test_unselected_line_does_not_start_drag() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::LineMove, &mut host);
        controller.set_selection([3]);

        let result = controller.handle(down(50.0, 5.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(result, Propagation::Continue);
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_ctrl_press_in_edit_mode_pans_and_stops_propagation() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_pan_enabled(false, &mut host);
        controller.set_mode(EditorMode::Edit, &mut host);

        let result = controller.handle(down(10.0, 10.0, Modifiers::CTRL), &mut host, &mut registry);
        assert_eq!(result, Propagation::Stop);
        assert_eq!(controller.state(), InteractionState::DraggingViewport);
        assert!(host.current_capabilities().is_some_and(|caps| caps.pan));

        controller.handle(moved(40.0, 40.0), &mut host, &mut registry);
        assert_eq!(registry.poem_offset(), Vec2::ZERO);

        controller.handle(up(40.0, 40.0), &mut host, &mut registry);
        assert_eq!(controller.state(), InteractionState::Idle);
        assert_eq!(host.pan_removed, 1);
        assert!(host.current_capabilities().is_some_and(|caps| !caps.pan));
        assert_eq!(host.content_alpha.last(), Some(&1.0));
    }

    #[test]
    fn test_meta_counts_as_pan_modifier() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        let meta = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        controller.handle(down(10.0, 10.0, meta), &mut host, &mut registry);
        assert_eq!(controller.state(), InteractionState::DraggingViewport);
    }

    #[test]
    fn test_plain_press_in_edit_mode_is_not_claimed() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        let result = controller.handle(down(10.0, 10.0, Modifiers::SHIFT), &mut host, &mut registry);
        assert_eq!(result, Propagation::Continue);
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_releasing_modifier_ends_viewport_drag() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.handle(down(10.0, 10.0, Modifiers::CTRL), &mut host, &mut registry);

        controller.modifiers_changed(Modifiers::CTRL, &mut host);
        assert_eq!(controller.state(), InteractionState::DraggingViewport);

        controller.modifiers_changed(Modifiers::NONE, &mut host);
        assert_eq!(controller.state(), InteractionState::Idle);
        assert_eq!(host.pan_removed, 1);
    }

    #[test]
    fn test_up_outside_ends_drag_and_late_moves_are_ignored() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::PoemMove, &mut host);
        controller.handle(down(10.0, 10.0, Modifiers::NONE), &mut host, &mut registry);
        controller.handle(moved(20.0, 10.0), &mut host, &mut registry);

        controller.handle(PointerEvent::UpOutside, &mut host, &mut registry);
        assert_eq!(controller.state(), InteractionState::Idle);
        assert_eq!(host.content_alpha.last(), Some(&1.0));

        let offset = registry.poem_offset();
        let result = controller.handle(moved(300.0, 300.0), &mut host, &mut registry);
        assert_eq!(result, Propagation::Continue);
        assert_eq!(registry.poem_offset(), offset);

        let result = controller.handle(PointerEvent::UpOutside, &mut host, &mut registry);
        assert_eq!(result, Propagation::Continue);
    }

    #[test]
    fn test_mode_switch_disables_camera_before_next_press() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::Edit, &mut host);
        assert_eq!(host.current_capabilities(), Some(CameraCapabilities::ALL));

        controller.handle(down(10.0, 10.0, Modifiers::CTRL), &mut host, &mut registry);
        controller.set_mode(EditorMode::PoemMove, &mut host);
        assert_eq!(host.current_capabilities(), Some(CameraCapabilities::NONE));
        assert_eq!(controller.state(), InteractionState::Idle);

        controller.handle(down(10.0, 10.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(controller.state(), InteractionState::DraggingPoem);
        assert_eq!(host.current_capabilities(), Some(CameraCapabilities::NONE));
    }

    #[test]
    fn test_camera_capabilities_per_mode() {
        let mut host = FakeHost::default();
        let mut controller = InteractionController::new();

        controller.set_pan_enabled(false, &mut host);
        assert_eq!(
            controller.camera_capabilities(),
            CameraCapabilities {
                pan: false,
                zoom: true,
                inertia: true
            }
        );
        controller.set_mode(EditorMode::LineMove, &mut host);
        assert_eq!(controller.camera_capabilities(), CameraCapabilities::NONE);
        controller.set_mode(EditorMode::Viewport, &mut host);
        assert_eq!(controller.camera_capabilities(), CameraCapabilities::ALL);
        assert_eq!(host.current_capabilities(), Some(CameraCapabilities::ALL));
    }

    #[test]
    fn test_hover_sets_grab_cursor_without_moving() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::LineMove, &mut host);
        controller.set_selection([1]);

        controller.handle(moved(20.0, 35.0), &mut host, &mut registry);
        assert_eq!(controller.cursor(), CursorHint::Grab);
        controller.handle(moved(20.0, 5.0), &mut host, &mut registry);
        assert_eq!(controller.cursor(), CursorHint::Default);
        assert_eq!(registry.line_offset(1), Vec2::ZERO);
        assert_eq!(registry.revision(), 0);

        controller.set_mode(EditorMode::Edit, &mut host);
        controller.handle(moved(20.0, 35.0), &mut host, &mut registry);
        assert_eq!(controller.cursor(), CursorHint::Default);
    }

    #[test]
    fn test_drag_cursor_and_release_hover() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::PoemMove, &mut host);
        controller.handle(down(10.0, 10.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(controller.cursor(), CursorHint::Grabbing);
        controller.handle(up(10.0, 10.0), &mut host, &mut registry);
        assert_eq!(controller.cursor(), CursorHint::Grab);
    }

    #[test]
    fn test_host_failures_count_as_misses() {
        let mut host = lines_host();
        host.broken = true;
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::PoemMove, &mut host);

        controller.handle(moved(10.0, 10.0), &mut host, &mut registry);
        assert_eq!(controller.cursor(), CursorHint::Default);
        let result = controller.handle(down(10.0, 10.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(result, Propagation::Continue);
        assert_eq!(controller.state(), InteractionState::Idle);

        host.broken = false;
        host.poem = None;
        let result = controller.handle(down(10.0, 10.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(result, Propagation::Continue);
    }

    #[test]
    fn test_missing_line_child_is_a_miss() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::LineMove, &mut host);
        controller.set_selection([42]);
        let result = controller.handle(down(10.0, 10.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(result, Propagation::Continue);
    }

    #[test]
    fn test_hit_test_uses_content_local_space() {
        let mut host = lines_host();
        host.origin = Vec2::new(1000.0, 1000.0);
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::PoemMove, &mut host);

        let result = controller.handle(down(10.0, 10.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(result, Propagation::Continue);
        let result = controller.handle(down(1010.0, 1010.0, Modifiers::NONE), &mut host, &mut registry);
        assert_eq!(result, Propagation::Stop);
    }

    #[test]
    fn test_second_press_during_drag_is_ignored() {
        let mut host = lines_host();
        let mut registry = TransformRegistry::new();
        let mut controller = InteractionController::new();
        controller.set_mode(EditorMode::PoemMove, &mut host);
        controller.handle(down(10.0, 10.0, Modifiers::NONE), &mut host, &mut registry);
        controller.handle(down(50.0, 50.0, Modifiers::CTRL), &mut host, &mut registry);
        assert_eq!(controller.state(), InteractionState::DraggingPoem);
        controller.handle(moved(20.0, 20.0), &mut host, &mut registry);
        assert_eq!(registry.poem_offset(), Vec2::new(10.0, 10.0));
    }
}
