//! Per-line transform storage for one editor session.
//!
//! Lines are keyed by [`LineIndex`]: [`TITLE`] and [`AUTHOR`] are reserved,
//! poem lines count up from zero in reading order. Entries are created lazily
//! on first access and keep insertion order, which is the draw order whenever
//! depth sorting is off.

pub mod field;

use std::collections::BTreeMap;

use glam::Vec2;

use crate::transform::{DEFAULT_PERSPECTIVE, GevelPreset, Transform};
pub use field::{Component, FieldPath, FieldValue, UnknownField};

pub type LineIndex = i32;

pub const TITLE: LineIndex = -2;
pub const AUTHOR: LineIndex = -1;

/// Position of a line among the content container's children: title and
/// author come first, poem lines follow.
pub fn child_slot(index: LineIndex) -> Option<usize> {
    index
        .checked_sub(TITLE)
        .and_then(|slot| usize::try_from(slot).ok())
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSnapshot<'a> {
    pub index: LineIndex,
    pub offset: Vec2,
    pub transform: &'a Transform,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot<'a> {
    pub revision: u64,
    pub perspective: f32,
    pub depth_sorting: bool,
    pub poem_offset: Vec2,
    pub lines: Vec<LineSnapshot<'a>>,
}

#[derive(Debug, Clone)]
pub struct TransformRegistry {
    entries: Vec<(LineIndex, Transform)>,
    line_offsets: BTreeMap<LineIndex, Vec2>,
    poem_offset: Vec2,
    perspective: f32,
    depth_sorting: bool,
    defaults: Transform,
    revision: u64,
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            line_offsets: BTreeMap::new(),
            poem_offset: Vec2::ZERO,
            perspective: DEFAULT_PERSPECTIVE,
            depth_sorting: true,
            defaults: Transform::new(),
            revision: 0,
        }
    }

    /// Bumped on every mutation. Hosts compare it against the value they last
    /// rendered to decide whether to redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn perspective(&self) -> f32 {
        self.perspective
    }

    /// Sets the global perspective distance on the defaults and every
    /// existing entry.
    pub fn set_perspective(&mut self, perspective: f32) {
        self.perspective = perspective;
        self.defaults.perspective = perspective;
        for (_, transform) in &mut self.entries {
            transform.perspective = perspective;
        }
        self.touch();
    }

    pub fn depth_sorting(&self) -> bool {
        self.depth_sorting
    }

    pub fn set_depth_sorting(&mut self, enabled: bool) {
        self.depth_sorting = enabled;
        self.touch();
    }

    /// Template for lazily created and reset entries.
    pub fn defaults(&self) -> &Transform {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: Transform) {
        self.defaults = defaults;
        self.touch();
    }

    fn position(&self, index: LineIndex) -> Option<usize> {
        self.entries.iter().position(|(i, _)| *i == index)
    }

    /// Looks up an entry without creating it.
    pub fn peek(&self, index: LineIndex) -> Option<&Transform> {
        self.position(index).map(|pos| &self.entries[pos].1)
    }

    /// Returns the entry for `index`, creating it from the defaults first if
    /// it does not exist yet.
    pub fn get(&mut self, index: LineIndex) -> &Transform {
        self.get_mut(index)
    }

    pub fn get_mut(&mut self, index: LineIndex) -> &mut Transform {
        let pos = match self.position(index) {
            Some(pos) => pos,
            None => {
                self.entries.push((index, self.defaults));
                self.touch();
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }

    pub fn set(&mut self, index: LineIndex, transform: Transform) {
        *self.get_mut(index) = transform;
        self.touch();
    }

    /// Writes one field addressed by a dotted path such as `"rotation.z"` or
    /// `"lighting.enabled"`. Unknown paths and mismatched values are ignored;
    /// the return value says whether anything was written.
    pub fn update(&mut self, index: LineIndex, path: &str, value: impl Into<FieldValue>) -> bool {
        let field = match path.parse::<FieldPath>() {
            Ok(field) => field,
            Err(err) => {
                log::debug!("ignoring update on line {index}: {err}");
                return false;
            }
        };
        let value = value.into();
        self.update_field(index, field, &value)
    }

    /// Rejected values leave the registry untouched: no entry is created and
    /// the revision stays put.
    pub fn update_field(&mut self, index: LineIndex, field: FieldPath, value: &FieldValue) -> bool {
        let mut transform = self.peek(index).copied().unwrap_or(self.defaults);
        if !field.apply(&mut transform, value) {
            log::debug!("ignoring {value:?} for {field:?} on line {index}");
            return false;
        }
        *self.get_mut(index) = transform;
        self.touch();
        true
    }

    /// Applies `preset` to one line.
    pub fn apply_preset(&mut self, index: LineIndex, preset: Option<GevelPreset>) {
        self.get_mut(index).set_preset(preset);
        self.touch();
    }

    /// Applies `preset` to the defaults and every existing line.
    pub fn apply_preset_all(&mut self, preset: Option<GevelPreset>) {
        self.defaults.set_preset(preset);
        for (_, transform) in &mut self.entries {
            transform.set_preset(preset);
        }
        log::info!(
            "applied gevel preset {} to {} lines",
            preset.map_or("none", GevelPreset::name),
            self.entries.len()
        );
        self.touch();
    }

    /// Reinitializes one entry from the defaults.
    pub fn reset(&mut self, index: LineIndex) {
        let defaults = self.defaults;
        *self.get_mut(index) = defaults;
        self.touch();
    }

    /// Drops every transform. Offsets are layout state and survive.
    pub fn reset_all(&mut self) {
        self.entries.clear();
        self.touch();
    }

    /// Forgets everything tied to the current poem: transforms, line offsets
    /// and the poem offset.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.line_offsets.clear();
        self.poem_offset = Vec2::ZERO;
        self.touch();
    }

    pub fn iter(&self) -> impl Iterator<Item = (LineIndex, &Transform)> {
        self.entries.iter().map(|(index, transform)| (*index, transform))
    }

    /// Serializable view of every line: transform plus drag offset, in
    /// insertion order.
    pub fn snapshot(&self) -> RegistrySnapshot<'_> {
        RegistrySnapshot {
            revision: self.revision,
            perspective: self.perspective,
            depth_sorting: self.depth_sorting,
            poem_offset: self.poem_offset,
            lines: self
                .entries
                .iter()
                .map(|(index, transform)| LineSnapshot {
                    index: *index,
                    offset: self.line_offset(*index),
                    transform,
                })
                .collect(),
        }
    }

    /// Pretty JSON of [`snapshot`](Self::snapshot), for debug dumps.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    /// Entries in draw order: ascending `z` (farthest back first) when depth
    /// sorting is enabled, insertion order otherwise. Ties keep insertion
    /// order.
    pub fn depth_sorted(&self) -> Vec<(LineIndex, &Transform)> {
        let mut sorted: Vec<_> = self.iter().collect();
        if self.depth_sorting {
            // NaN depths sort last instead of breaking the order.
            sorted.sort_by(|(_, a), (_, b)| a.position.z.total_cmp(&b.position.z));
        }
        sorted
    }

    pub fn line_offset(&self, index: LineIndex) -> Vec2 {
        self.line_offsets.get(&index).copied().unwrap_or(Vec2::ZERO)
    }

    pub fn set_line_offset(&mut self, index: LineIndex, offset: Vec2) {
        self.line_offsets.insert(index, offset);
        self.touch();
    }

    pub fn poem_offset(&self) -> Vec2 {
        self.poem_offset
    }

    pub fn set_poem_offset(&mut self, offset: Vec2) {
        self.poem_offset = offset;
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::BlendMode;
    use glam::Vec3;

    #[test]
    fn test_child_slots_follow_title_author_lines() {
        assert_eq!(child_slot(TITLE), Some(0));
        assert_eq!(child_slot(AUTHOR), Some(1));
        assert_eq!(child_slot(0), Some(2));
        assert_eq!(child_slot(7), Some(9));
        assert_eq!(child_slot(-3), None);
    }

    #[test]
    fn test_get_creates_lazily() {
        let mut registry = TransformRegistry::new();
        assert!(registry.peek(3).is_none());
        let created = *registry.get(3);
        assert_eq!(created, Transform::new());
        assert_eq!(registry.len(), 1);
        let revision = registry.revision();
        registry.get(3);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.revision(), revision);
    }

    #[test]
    fn test_update_resolves_nested_paths() {
        let mut registry = TransformRegistry::new();
        assert!(registry.update(0, "lighting.enabled", true));
        assert!(registry.update(0, "material.blendMode", "overlay"));
        assert!(registry.update(0, "rotation.z", 45.0));
        let transform = registry.peek(0).unwrap();
        assert!(transform.lighting.enabled);
        assert_eq!(transform.material.blend_mode, BlendMode::Overlay);
        assert_eq!(transform.rotation.z, 45.0);
    }

    #[test]
    fn test_update_ignores_unknown_fields() {
        let mut registry = TransformRegistry::new();
        assert!(!registry.update(1, "lighting.enabeld", true));
        assert!(!registry.update(1, "colour", 1.0));
        assert!(!registry.update(7, "rotation.z", "fast"));
        assert!(!registry.update(7, "position.z", f32::NAN));
        assert!(registry.is_empty());
        assert_eq!(registry.revision(), 0);

        registry.get(1);
        let before = *registry.peek(1).unwrap();
        let revision = registry.revision();
        assert!(!registry.update(1, "material.opacity", "opaque"));
        assert_eq!(*registry.peek(1).unwrap(), before);
        assert_eq!(registry.revision(), revision);
    }

    #[test]
    fn test_rejected_update_keeps_draw_order() {
        let mut registry = TransformRegistry::new();
        registry.set_depth_sorting(false);
        assert!(!registry.update(5, "rotation", 1.0));
        registry.get(0);
        registry.get(5);
        let order: Vec<LineIndex> = registry.depth_sorted().iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 5]);
    }

    #[test]
    fn test_depth_sort_tolerates_nan() {
        let mut registry = TransformRegistry::new();
        for index in 0..22 {
            let mut transform = Transform::new();
            transform.position.z = if index % 3 == 0 {
                f32::NAN
            } else {
                (index * 37 % 11) as f32 - 5.0
            };
            registry.set(index, transform);
        }

        let sorted = registry.depth_sorted();
        assert_eq!(sorted.len(), 22);
        let depths: Vec<f32> = sorted.iter().map(|(_, t)| t.position.z).collect();
        let finite = depths.iter().take_while(|z| !z.is_nan()).count();
        assert_eq!(finite, 14);
        assert!(depths[..finite].windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(depths[finite..].iter().all(|z| z.is_nan()));
    }

    #[test]
    fn test_json_dump_round_trips_transforms() {
        let mut registry = TransformRegistry::new();
        registry.update(0, "rotation", Vec3::new(10.0, -20.0, 30.0));
        registry.update(0, "gevelPreset", "glass");
        registry.update(TITLE, "pivotMode", "top");
        registry.set_line_offset(0, Vec2::new(3.0, 4.0));

        let json = registry.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let lines = value["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["index"], 0);
        assert_eq!(lines[0]["offset"], serde_json::json!([3.0, 4.0]));

        let transform: Transform = serde_json::from_value(lines[0]["transform"].clone()).unwrap();
        assert_eq!(&transform, registry.peek(0).unwrap());
        let title: Transform = serde_json::from_value(lines[1]["transform"].clone()).unwrap();
        assert_eq!(title.pivot_mode(), crate::transform::PivotMode::Top);
    }

    #[test]
    fn test_reset_matches_fresh_transform() {
        let mut registry = TransformRegistry::new();
        registry.update(2, "rotation", Vec3::new(10.0, 20.0, 30.0));
        registry.update(2, "gevelPreset", "metal");
        registry.update(2, "uniformScale", 2.5);
        registry.reset(2);

        let mut fresh = TransformRegistry::new();
        assert_eq!(
            registry.get(2).to_render_properties(),
            fresh.get(2).to_render_properties()
        );
    }

    #[test]
    fn test_reset_all_empties_registry_but_keeps_offsets() {
        let mut registry = TransformRegistry::new();
        registry.get(0);
        registry.get(1);
        registry.set_line_offset(0, Vec2::new(4.0, 5.0));
        registry.reset_all();
        assert!(registry.is_empty());
        assert_eq!(registry.line_offset(0), Vec2::new(4.0, 5.0));

        registry.set_poem_offset(Vec2::new(1.0, 1.0));
        registry.clear();
        assert_eq!(registry.line_offset(0), Vec2::ZERO);
        assert_eq!(registry.poem_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_depth_sort_is_stable_and_ascending() {
        let mut registry = TransformRegistry::new();
        registry.update(TITLE, "position.z", 0.0);
        registry.update(0, "position.z", -100.0);
        registry.update(1, "position.z", 50.0);
        registry.update(2, "position.z", 0.0);
        registry.update(3, "position.z", -100.0);

        let order: Vec<LineIndex> = registry.depth_sorted().iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 3, TITLE, 2, 1]);

        registry.set_depth_sorting(false);
        let order: Vec<LineIndex> = registry.depth_sorted().iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![TITLE, 0, 1, 2, 3]);
    }

    #[test]
    fn test_perspective_applies_globally() {
        let mut registry = TransformRegistry::new();
        registry.get(0);
        registry.set_perspective(500.0);
        assert_eq!(registry.peek(0).unwrap().perspective, 500.0);
        assert_eq!(registry.get(1).perspective, 500.0);
    }

    #[test]
    fn test_bulk_preset_reaches_new_lines() {
        let mut registry = TransformRegistry::new();
        registry.get(0);
        registry.apply_preset_all(Some(GevelPreset::Wood));
        assert_eq!(registry.peek(0).unwrap().preset(), Some(GevelPreset::Wood));
        assert_eq!(registry.get(5).preset(), Some(GevelPreset::Wood));

        registry.apply_preset_all(None);
        assert_eq!(registry.peek(0).unwrap().preset(), None);
        assert!(registry.peek(0).unwrap().lighting.enabled);
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut registry = TransformRegistry::new();
        registry.update(0, "position.x", 10.0);
        let snapshot = registry.clone();
        registry.update(0, "position.x", 20.0);
        assert_eq!(snapshot.peek(0).unwrap().position.x, 10.0);
        assert!(registry.revision() > snapshot.revision());
    }
}
