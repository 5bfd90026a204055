//! Stateless skew and lighting math shared by [`Transform`](super::Transform).
//!
//! Everything here works in the renderer's 2D vocabulary: a 3D pose is
//! approximated by a skew vector plus an alpha/tint pair, since the scene
//! graph only knows affine 2D sprites.

use glam::{Vec2, Vec3};

/// Perspective distance every transform starts with.
pub const DEFAULT_PERSPECTIVE: f32 = 1000.0;

/// Skew produced by a 3D rotation at the default perspective distance.
const PERSPECTIVE_SKEW_FACTOR: f32 = 0.5;

/// Amplitude of the rotational mapping that folds `skew.z` into x/y.
const Z_SKEW_AMPLITUDE: f32 = 0.3;

/// Lowest alpha a line can fade to through depth alone.
pub const MIN_DEPTH_ALPHA: f32 = 0.1;

pub const WHITE: u32 = 0xFF_FF_FF;

/// Combines perspective-derived skew, direct skew and the z-skew mapping into
/// one renderer skew vector (radians).
///
/// `rotation_deg` and `skew_deg` are in degrees. `perspective` only scales the
/// rotation contribution; non-positive distances are treated as 1.
pub fn combined_skew(rotation_deg: Vec3, skew_deg: Vec3, perspective: f32) -> Vec2 {
    let rot_x = rotation_deg.x.to_radians();
    let rot_y = rotation_deg.y.to_radians();
    let factor = PERSPECTIVE_SKEW_FACTOR * DEFAULT_PERSPECTIVE / perspective.max(1.0);
    // Rotating about Y leans vertical edges, rotating about X leans horizontal ones.
    let perspective_skew = Vec2::new(rot_y.sin(), rot_x.sin()) * factor;

    let direct = Vec2::new(skew_deg.x.to_radians(), skew_deg.y.to_radians());

    let (sin_z, cos_z) = skew_deg.z.to_radians().sin_cos();
    let z_skew = Vec2::new(
        sin_z * Z_SKEW_AMPLITUDE,
        cos_z * Z_SKEW_AMPLITUDE - Z_SKEW_AMPLITUDE,
    );

    perspective_skew + direct + z_skew
}

/// Alpha from depth alone: opaque at `z = 0`, fading linearly with `|z|`
/// across the perspective distance and never below [`MIN_DEPTH_ALPHA`].
pub fn depth_alpha(z: f32, perspective: f32) -> f32 {
    let range = perspective.max(1.0);
    let alpha = 1.0 - z.abs() / range;
    if alpha.is_nan() {
        return MIN_DEPTH_ALPHA;
    }
    alpha.clamp(MIN_DEPTH_ALPHA, 1.0)
}

/// Inputs for [`lighting_effect`], borrowed from a transform.
#[derive(Debug, Clone, Copy)]
pub struct LightingInput {
    pub enabled: bool,
    pub intensity: f32,
    pub ambient: f32,
    pub direction: Vec3,
    pub tint: u32,
    pub metallic: f32,
    pub roughness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingEffect {
    pub alpha: f32,
    pub tint: u32,
}

impl LightingEffect {
    pub const UNLIT: Self = Self {
        alpha: 1.0,
        tint: WHITE,
    };
}

/// Simulated directional light on a flat text line tilted by `rotation_deg`.
pub fn lighting_effect(rotation_deg: Vec3, input: &LightingInput) -> LightingEffect {
    if !input.enabled {
        return LightingEffect::UNLIT;
    }

    let rot_x = rotation_deg.x.to_radians();
    let rot_y = rotation_deg.y.to_radians();
    let normal = Vec3::new(rot_y.sin(), rot_x.sin(), rot_x.cos() * rot_y.cos());
    let diffuse = normal.dot(input.direction.normalize_or_zero()).max(0.0);

    let intensity = input.intensity.max(0.0);
    let ambient = input.ambient.clamp(0.0, 1.0);
    let mut light = ambient + (1.0 - ambient) * diffuse * intensity;
    light *= 1.0 - input.metallic * 0.3;
    light *= 1.0 - input.roughness * 0.2;

    let alpha = if light.is_nan() {
        0.0
    } else {
        light.clamp(0.0, 1.0)
    };
    let tint = if input.tint != WHITE {
        input.tint
    } else {
        greyscale_tint(alpha)
    };
    LightingEffect { alpha, tint }
}

/// Packs a `[0, 1]` brightness into a `0xRRGGBB` grey.
pub fn greyscale_tint(brightness: f32) -> u32 {
    let level = (brightness.clamp(0.0, 1.0) * 255.0).round() as u32;
    (level << 16) | (level << 8) | level
}
