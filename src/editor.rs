//! Editor session: the registry, the interaction controller and line
//! selection wired together for one poem.

use glam::Vec2;

use crate::config::EditorConfig;
use crate::interaction::{
    EditorMode, InteractionController, Modifiers, PointerEvent, Propagation, RenderHost, line_hit,
};
use crate::registry::{AUTHOR, LineIndex, TITLE, TransformRegistry};
use crate::transform::RenderProperties;

/// One line as the renderer should draw it this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFrame {
    pub index: LineIndex,
    pub properties: RenderProperties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Translation of the whole content container.
    pub content_offset: Vec2,
    /// Lines in draw order.
    pub lines: Vec<LineFrame>,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    registry: TransformRegistry,
    controller: InteractionController,
    line_count: usize,
}

impl EditorSession {
    pub fn new(line_count: usize) -> Self {
        Self {
            registry: TransformRegistry::new(),
            controller: InteractionController::new(),
            line_count,
        }
    }

    /// Session set up from `config`, with the configured mode already wired
    /// into the host's camera.
    pub fn from_config(
        config: &EditorConfig,
        line_count: usize,
        host: &mut dyn RenderHost,
    ) -> Self {
        let mut session = Self::new(line_count);
        config.apply(&mut session.registry);
        session.controller = InteractionController::new().with_pan_enabled(config.pan_enabled);
        session.controller.set_mode(config.mode, host);
        session
    }

    pub fn registry(&self) -> &TransformRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TransformRegistry {
        &mut self.registry
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Title, author, then every poem line in reading order.
    pub fn line_indices(&self) -> impl Iterator<Item = LineIndex> {
        let count = LineIndex::try_from(self.line_count).unwrap_or(LineIndex::MAX);
        [TITLE, AUTHOR].into_iter().chain(0..count)
    }

    /// Starts over with a different poem: transforms, offsets and selection
    /// are dropped and any gesture in flight is ended.
    pub fn set_poem(&mut self, line_count: usize, host: &mut dyn RenderHost) {
        self.controller.release(host, None);
        self.controller.clear_selection();
        self.registry.clear();
        self.line_count = line_count;
        log::info!("poem changed, {line_count} lines");
    }

    pub fn set_mode(&mut self, mode: EditorMode, host: &mut dyn RenderHost) {
        self.controller.set_mode(mode, host);
    }

    pub fn set_pan_enabled(&mut self, enabled: bool, host: &mut dyn RenderHost) {
        self.controller.set_pan_enabled(enabled, host);
    }

    pub fn set_selection(&mut self, selection: impl IntoIterator<Item = LineIndex>) {
        self.controller.set_selection(selection);
    }

    pub fn modifiers_changed(&mut self, modifiers: Modifiers, host: &mut dyn RenderHost) {
        self.controller.modifiers_changed(modifiers, host);
    }

    /// Routes a pointer event to the controller first. Presses it does not
    /// claim fall through to line selection in edit mode.
    pub fn handle_pointer(&mut self, event: PointerEvent, host: &mut dyn RenderHost) -> Propagation {
        let propagation = self.controller.handle(event, host, &mut self.registry);
        if propagation == Propagation::Stop {
            return propagation;
        }
        if let PointerEvent::Down {
            position,
            modifiers,
        } = event
        {
            if self.controller.mode() == EditorMode::Edit {
                self.select_at(position, modifiers, &*host);
            }
        }
        propagation
    }

    fn ensure_lines(&mut self) {
        for index in self.line_indices() {
            self.registry.get(index);
        }
    }

    /// Click selection: the topmost line under the pointer becomes the
    /// selection, shift toggles it instead, and empty space clears.
    fn select_at(&mut self, position: Vec2, modifiers: Modifiers, host: &dyn RenderHost) {
        let local = match host.to_content_local(position) {
            Ok(local) => local,
            Err(err) => {
                log::warn!("selection hit test failed: {err}");
                return;
            }
        };

        self.ensure_lines();
        let candidates: Vec<LineIndex> = self
            .registry
            .depth_sorted()
            .into_iter()
            .map(|(index, _)| index)
            .collect();

        let hit = candidates.into_iter().rev().find(|&index| {
            line_hit(index, local, host).unwrap_or_else(|err| {
                log::debug!("line {index} not hit-testable: {err}");
                false
            })
        });

        match hit {
            Some(index) if modifiers.shift => self.controller.toggle_selected(index),
            Some(index) => self.controller.select(index),
            None if modifiers.shift => {}
            None => self.controller.clear_selection(),
        }
        log::debug!("selection now {:?}", self.controller.selection());
    }

    /// Render list for this frame. Creates default transforms for lines that
    /// have none yet.
    pub fn frame(&mut self) -> Frame {
        self.ensure_lines();
        let registry = &self.registry;
        let lines = registry
            .depth_sorted()
            .into_iter()
            .map(|(index, transform)| {
                let mut properties = transform.to_render_properties();
                let offset = registry.line_offset(index);
                properties.x += offset.x;
                properties.y += offset.y;
                LineFrame { index, properties }
            })
            .collect();
        Frame {
            content_offset: registry.poem_offset(),
            lines,
        }
    }
}
