use poster3d::{EditorMode, GevelPreset, Modifiers};
use winit::event::Modifiers as WinitModifiers;
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    None,
    SetMode(EditorMode),
    TogglePan,
    ToggleDepthSorting,
    Preset(Option<GevelPreset>),
    ResetSelected,
    ResetAll,
    /// Degrees added to `rotation.z` of the selected lines.
    Rotate(f32),
    /// Added to `position.z` of the selected lines.
    Push(f32),
    NextPoem,
}

pub fn map_modifiers(modifiers: WinitModifiers) -> Modifiers {
    let state = modifiers.state();
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

pub fn handle_key(key: PhysicalKey, pressed: bool, modifiers: Modifiers) -> InputAction {
    if !pressed {
        return InputAction::None;
    }
    let PhysicalKey::Code(code) = key else {
        return InputAction::None;
    };
    match code {
        KeyCode::KeyV => InputAction::SetMode(EditorMode::Viewport),
        KeyCode::KeyE => InputAction::SetMode(EditorMode::Edit),
        KeyCode::KeyP => InputAction::SetMode(EditorMode::PoemMove),
        KeyCode::KeyL => InputAction::SetMode(EditorMode::LineMove),
        KeyCode::KeyT => InputAction::TogglePan,
        KeyCode::KeyD => InputAction::ToggleDepthSorting,
        KeyCode::KeyN => InputAction::NextPoem,
        KeyCode::KeyR if modifiers.shift => InputAction::ResetAll,
        KeyCode::KeyR => InputAction::ResetSelected,
        KeyCode::Digit0 => InputAction::Preset(None),
        KeyCode::Digit1 => InputAction::Preset(Some(GevelPreset::Brick)),
        KeyCode::Digit2 => InputAction::Preset(Some(GevelPreset::Stone)),
        KeyCode::Digit3 => InputAction::Preset(Some(GevelPreset::Metal)),
        KeyCode::Digit4 => InputAction::Preset(Some(GevelPreset::Glass)),
        KeyCode::Digit5 => InputAction::Preset(Some(GevelPreset::Wood)),
        KeyCode::ArrowLeft => InputAction::Rotate(-5.0),
        KeyCode::ArrowRight => InputAction::Rotate(5.0),
        KeyCode::ArrowUp => InputAction::Push(-50.0),
        KeyCode::ArrowDown => InputAction::Push(50.0),
        _ => InputAction::None,
    }
}
