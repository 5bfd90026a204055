//! Poster3d - per-line 3D text transforms and pointer interaction for a
//! canvas poster editor.
//!
//! The crate does not paint anything. Each frame the host asks an
//! [`EditorSession`] for a [`Frame`]: one [`RenderProperties`] tuple per text
//! line, in draw order. Pointer input flows the other way through
//! [`EditorSession::handle_pointer`], which needs a [`RenderHost`] for bounds
//! queries and camera wiring.

pub mod config;
pub mod editor;
pub mod interaction;
pub mod registry;
pub mod transform;

pub use config::{ConfigError, EditorConfig};
pub use editor::{EditorSession, Frame, LineFrame};
pub use interaction::{
    Bounds, CameraCapabilities, CursorHint, EditorMode, HostError, InteractionController,
    InteractionState, Modifiers, PointerEvent, Propagation, RenderHost,
};
pub use registry::{AUTHOR, FieldPath, FieldValue, LineIndex, TITLE, TransformRegistry};
pub use transform::{
    BlendMode, GevelPreset, Lighting, Material, PivotMode, RenderProperties, Transform,
};
