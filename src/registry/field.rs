//! Typed field paths for [`TransformRegistry::update`](super::TransformRegistry::update).
//!
//! Controls address transform fields with dotted paths such as
//! `"rotation.z"` or `"lighting.enabled"`. Paths are parsed into a closed
//! [`FieldPath`] and applied through explicit setters; anything that does not
//! parse, or a value of the wrong shape, leaves the transform untouched.

use std::str::FromStr;

use glam::{Vec2, Vec3};

use crate::transform::{BlendMode, PivotMode, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    X,
    Y,
    Z,
    /// The whole vector.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Position(Component),
    Rotation(Component),
    Scale(Component),
    Skew(Component),
    /// `Z` is not addressable.
    Pivot(Component),
    UniformScale,
    PivotMode,
    LightingEnabled,
    LightingIntensity,
    LightingAmbient,
    LightingDirection(Component),
    LightingTint,
    BlendMode,
    Roughness,
    Metallic,
    Opacity,
    Perspective,
    GevelPreset,
}

impl FieldPath {
    fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split('.');
        let head = parts.next()?;
        let rest: Vec<&str> = parts.collect();

        let vector = |make: fn(Component) -> FieldPath, allow_z: bool| -> Option<FieldPath> {
            let component = match rest.as_slice() {
                [] => Component::All,
                ["x"] => Component::X,
                ["y"] => Component::Y,
                ["z"] if allow_z => Component::Z,
                _ => return None,
            };
            Some(make(component))
        };
        let leaf = |path: FieldPath| if rest.is_empty() { Some(path) } else { None };

        match head {
            "position" => vector(FieldPath::Position, true),
            "rotation" => vector(FieldPath::Rotation, true),
            "scale" => vector(FieldPath::Scale, true),
            "skew" => vector(FieldPath::Skew, true),
            "pivot" => vector(FieldPath::Pivot, false),
            "uniformScale" => leaf(FieldPath::UniformScale),
            "pivotMode" => leaf(FieldPath::PivotMode),
            "perspective" => leaf(FieldPath::Perspective),
            "gevelPreset" => leaf(FieldPath::GevelPreset),
            "lighting" => match rest.as_slice() {
                ["enabled"] => Some(FieldPath::LightingEnabled),
                ["intensity"] => Some(FieldPath::LightingIntensity),
                ["ambient"] => Some(FieldPath::LightingAmbient),
                ["tint"] => Some(FieldPath::LightingTint),
                ["direction"] => Some(FieldPath::LightingDirection(Component::All)),
                ["direction", "x"] => Some(FieldPath::LightingDirection(Component::X)),
                ["direction", "y"] => Some(FieldPath::LightingDirection(Component::Y)),
                ["direction", "z"] => Some(FieldPath::LightingDirection(Component::Z)),
                _ => None,
            },
            "material" => match rest.as_slice() {
                ["blendMode"] => Some(FieldPath::BlendMode),
                ["roughness"] => Some(FieldPath::Roughness),
                ["metallic"] => Some(FieldPath::Metallic),
                ["opacity"] => Some(FieldPath::Opacity),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field path: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldPath {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A value handed to [`TransformRegistry::update`](super::TransformRegistry::update).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f32),
    Text(String),
    Vec2(Vec2),
    Vec3(Vec3),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Number(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value as f32)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec2> for FieldValue {
    fn from(value: Vec2) -> Self {
        FieldValue::Vec2(value)
    }
}

impl From<Vec3> for FieldValue {
    fn from(value: Vec3) -> Self {
        FieldValue::Vec3(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        let number = |value: &Value| value.as_f64().map(|n| n as f32);
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(FieldValue::Null, |n| FieldValue::Number(n as f32)),
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Array(items) => {
                let numbers: Option<Vec<f32>> = items.iter().map(number).collect();
                match numbers.as_deref() {
                    Some([x, y]) => FieldValue::Vec2(Vec2::new(*x, *y)),
                    Some([x, y, z]) => FieldValue::Vec3(Vec3::new(*x, *y, *z)),
                    _ => FieldValue::Null,
                }
            }
            Value::Object(map) => {
                let x = map.get("x").and_then(number);
                let y = map.get("y").and_then(number);
                let z = map.get("z").and_then(number);
                match (x, y, z) {
                    (Some(x), Some(y), Some(z)) => FieldValue::Vec3(Vec3::new(x, y, z)),
                    (Some(x), Some(y), None) => FieldValue::Vec2(Vec2::new(x, y)),
                    _ => FieldValue::Null,
                }
            }
        }
    }
}

impl FieldValue {
    fn number(&self) -> Option<f32> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    fn vec3(&self) -> Option<Vec3> {
        match self {
            FieldValue::Vec3(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    fn vec2(&self) -> Option<Vec2> {
        match self {
            FieldValue::Vec2(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn tint(&self) -> Option<u32> {
        match self {
            FieldValue::Number(n) if n.is_finite() && *n >= 0.0 && *n <= 0xFF_FF_FF as f32 => {
                Some(*n as u32)
            }
            FieldValue::Text(s) => {
                let hex = s.trim().trim_start_matches('#').trim_start_matches("0x");
                u32::from_str_radix(hex, 16).ok().filter(|v| *v <= 0xFF_FF_FF)
            }
            _ => None,
        }
    }
}

fn set_component(target: &mut Vec3, component: Component, value: &FieldValue) -> bool {
    let slot = match component {
        Component::X => &mut target.x,
        Component::Y => &mut target.y,
        Component::Z => &mut target.z,
        Component::All => {
            return match value.vec3() {
                Some(v) => {
                    *target = v;
                    true
                }
                None => false,
            };
        }
    };
    set_number(slot, value)
}

fn set_number(target: &mut f32, value: &FieldValue) -> bool {
    match value.number() {
        Some(n) => {
            *target = n;
            true
        }
        None => false,
    }
}

impl FieldPath {
    /// Writes `value` into `transform`. Returns `false` when the value does
    /// not fit the field, in which case nothing changed.
    pub fn apply(self, transform: &mut Transform, value: &FieldValue) -> bool {
        match self {
            FieldPath::Position(c) => set_component(&mut transform.position, c, value),
            FieldPath::Rotation(c) => set_component(&mut transform.rotation, c, value),
            FieldPath::Scale(c) => set_component(&mut transform.scale, c, value),
            FieldPath::Skew(c) => set_component(&mut transform.skew, c, value),
            FieldPath::LightingDirection(c) => {
                set_component(&mut transform.lighting.direction, c, value)
            }
            FieldPath::Pivot(Component::All) => match value.vec2() {
                Some(pivot) => {
                    transform.set_pivot(pivot);
                    true
                }
                None => false,
            },
            FieldPath::Pivot(c) => {
                let Some(n) = value.number() else {
                    return false;
                };
                let mut pivot = transform.pivot;
                match c {
                    Component::X => pivot.x = n,
                    Component::Y => pivot.y = n,
                    Component::Z | Component::All => return false,
                }
                transform.set_pivot(pivot);
                true
            }
            FieldPath::UniformScale => match value.number() {
                Some(n) => {
                    transform.set_uniform_scale(n);
                    true
                }
                None => false,
            },
            FieldPath::PivotMode => match value.text().and_then(|s| s.parse::<PivotMode>().ok()) {
                Some(mode) => {
                    transform.set_pivot_mode(mode);
                    true
                }
                None => false,
            },
            FieldPath::LightingEnabled => match value {
                FieldValue::Bool(enabled) => {
                    transform.lighting.enabled = *enabled;
                    true
                }
                _ => false,
            },
            FieldPath::LightingIntensity => set_number(&mut transform.lighting.intensity, value),
            FieldPath::LightingAmbient => set_number(&mut transform.lighting.ambient, value),
            FieldPath::LightingTint => match value.tint() {
                Some(tint) => {
                    transform.lighting.tint = tint;
                    true
                }
                None => false,
            },
            FieldPath::BlendMode => match value.text().and_then(|s| s.parse::<BlendMode>().ok()) {
                Some(mode) => {
                    transform.material.blend_mode = mode;
                    true
                }
                None => false,
            },
            FieldPath::Roughness => set_number(&mut transform.material.roughness, value),
            FieldPath::Metallic => set_number(&mut transform.material.metallic, value),
            FieldPath::Opacity => set_number(&mut transform.material.opacity, value),
            FieldPath::Perspective => set_number(&mut transform.perspective, value),
            FieldPath::GevelPreset => match value {
                FieldValue::Null => {
                    transform.set_preset(None);
                    true
                }
                FieldValue::Text(name) => transform.apply_preset_named(name),
                _ => false,
            },
        }
    }
}
