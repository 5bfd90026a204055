//! Poster3d demo host.
//!
//! Opens a window and drives an [`poster3d::EditorSession`] from mouse and
//! keyboard input. Nothing is painted: the window title shows the editor
//! state, the OS cursor follows the controller's cursor hint, and each
//! changed frame is logged at debug level (`RUST_LOG=debug`).
//!
//! Usage: `poster3d [config.json]`

mod app;

fn main() {
    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    app::run(config_path);
}
