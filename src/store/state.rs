//! Customization state types
//!
//! Plain data read by the renderer every frame. Mutation goes through
//! [`super::CustomizationStore`].

use macroquad::math::{Vec2, Vec3};
use macroquad::prelude::Color;
use std::fmt;

use super::slot::SlotId;

/// Which screen the customizer is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Landing screen, garment shown off to the side
    #[default]
    Intro,
    /// Editor panels, gizmos and filter tabs visible
    Editing,
    /// Read-only turntable view of the current design
    Preview,
}

impl ViewMode {
    /// Camera targets only distinguish intro from the editor views
    pub fn is_intro(self) -> bool {
        self == ViewMode::Intro
    }
}

/// Garment base color (sRGB, 8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BaseColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        match digits.len() {
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
                let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
                let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            3 => {
                let expand = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
                Some(Self::new(expand(0).ok()?, expand(1).ok()?, expand(2).ok()?))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_color(self) -> Color {
        Color::from_rgba(self.r, self.g, self.b, 255)
    }

    pub fn with_alpha(self, alpha: f32) -> Color {
        let mut c = self.to_color();
        c.a = alpha;
        c
    }
}

impl Default for BaseColor {
    fn default() -> Self {
        Self::new(0xEF, 0xBD, 0x4E)
    }
}

impl fmt::Display for BaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Local placement of a decal relative to its slot anchor.
///
/// Position is in the slot frame: x along the surface, y up, z off the
/// surface. Rotation is XYZ Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl DecalTransform {
    /// Default placement for a slot: centered on the anchor, pinned depth
    pub fn slot_default(slot: SlotId, base_scale: f32) -> Self {
        let spec = slot.spec();
        Self {
            position: Vec3::new(0.0, 0.0, spec.depth_offset),
            rotation: Vec3::ZERO,
            scale: Vec3::splat(base_scale * spec.base_scale_factor),
        }
    }
}

/// Per-slot decal state
#[derive(Debug, Clone, PartialEq)]
pub struct DecalSlotState {
    pub active: bool,
    /// Data URL or asset reference; empty means "use the placeholder"
    pub image_ref: String,
    pub transform: DecalTransform,
}

impl DecalSlotState {
    pub fn has_image(&self) -> bool {
        !self.image_ref.is_empty()
    }
}

/// Clamp ranges enforced on the chest slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalLimits {
    pub base_scale: f32,
    pub chest_scale_min: f32,
    pub chest_scale_max: f32,
    pub chest_bounds_min: Vec2,
    pub chest_bounds_max: Vec2,
}

impl Default for DecalLimits {
    fn default() -> Self {
        Self {
            base_scale: 0.1,
            chest_scale_min: 0.04,
            chest_scale_max: 0.25,
            chest_bounds_min: Vec2::new(-0.12, -0.16),
            chest_bounds_max: Vec2::new(0.12, 0.10),
        }
    }
}

impl DecalLimits {
    /// Apply the slot's clamp ranges and pin the depth axis.
    /// Placed slots keep x on the garment wall; the chest is also bounded
    /// in y and scale.
    pub fn constrain(&self, slot: SlotId, mut transform: DecalTransform) -> DecalTransform {
        let spec = slot.spec();
        transform.position.z = spec.depth_offset;
        if spec.has_gizmo() {
            transform.position.x = transform.position.x.clamp(-spec.lateral_limit, spec.lateral_limit);
        }
        if slot == SlotId::Chest {
            let xy = Vec2::new(transform.position.x, transform.position.y)
                .clamp(self.chest_bounds_min, self.chest_bounds_max);
            transform.position.x = xy.x;
            transform.position.y = xy.y;
            transform.scale = transform
                .scale
                .clamp(Vec3::splat(self.chest_scale_min), Vec3::splat(self.chest_scale_max));
        }
        transform
    }
}

/// The garment's complete visual configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CustomizationState {
    pub view_mode: ViewMode,
    pub base_color: BaseColor,
    slots: [DecalSlotState; 5],
}

impl CustomizationState {
    pub fn new(base_color: BaseColor, limits: &DecalLimits) -> Self {
        let slot = |id: SlotId| DecalSlotState {
            active: id == SlotId::Chest,
            image_ref: String::new(),
            transform: DecalTransform::slot_default(id, limits.base_scale),
        };
        Self {
            view_mode: ViewMode::Intro,
            base_color,
            slots: [
                slot(SlotId::Chest),
                slot(SlotId::Full),
                slot(SlotId::Back),
                slot(SlotId::LeftShoulder),
                slot(SlotId::RightShoulder),
            ],
        }
    }

    pub fn slot(&self, id: SlotId) -> &DecalSlotState {
        &self.slots[id.index()]
    }

    pub(super) fn slot_mut(&mut self, id: SlotId) -> &mut DecalSlotState {
        &mut self.slots[id.index()]
    }

    /// Active slots in tab order
    pub fn active_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        SlotId::ALL.into_iter().filter(|id| self.slot(*id).active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse() {
        assert_eq!(BaseColor::from_hex("#EFBD4E"), Some(BaseColor::new(0xEF, 0xBD, 0x4E)));
        assert_eq!(BaseColor::from_hex("2ccce4"), Some(BaseColor::new(0x2C, 0xCC, 0xE4)));
        assert_eq!(BaseColor::from_hex("#ccc"), Some(BaseColor::new(0xCC, 0xCC, 0xCC)));
        assert_eq!(BaseColor::from_hex("#12345"), None);
        assert_eq!(BaseColor::from_hex("#GG0000"), None);
        assert_eq!(BaseColor::from_hex("#é0000"), None);
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(BaseColor::new(0x2C, 0xCC, 0xE4).to_hex(), "#2CCCE4");
        assert_eq!(BaseColor::default().to_string(), "#EFBD4E");
    }

    #[test]
    fn test_default_state() {
        let state = CustomizationState::new(BaseColor::default(), &DecalLimits::default());
        assert_eq!(state.view_mode, ViewMode::Intro);
        assert_eq!(state.active_slots().collect::<Vec<_>>(), vec![SlotId::Chest]);
        for id in SlotId::ALL {
            assert!(!state.slot(id).has_image());
            assert!((state.slot(id).transform.position.z - id.spec().depth_offset).abs() < 0.0001);
        }
        assert!((state.slot(SlotId::Chest).transform.scale.x - 0.1).abs() < 0.0001);
        assert!((state.slot(SlotId::Back).transform.scale.x - 0.15).abs() < 0.0001);
    }

    #[test]
    fn test_constrain_chest() {
        let limits = DecalLimits::default();
        let wild = DecalTransform {
            position: Vec3::new(5.0, -5.0, 3.0),
            rotation: Vec3::ZERO,
            scale: Vec3::new(10.0, 0.0, 0.1),
        };
        let t = limits.constrain(SlotId::Chest, wild);
        assert!((t.position.x - 0.12).abs() < 0.0001);
        assert!((t.position.y + 0.16).abs() < 0.0001);
        assert!((t.position.z - SlotId::Chest.spec().depth_offset).abs() < 0.0001);
        assert!((t.scale.x - 0.25).abs() < 0.0001);
        assert!((t.scale.y - 0.04).abs() < 0.0001);
    }

    #[test]
    fn test_constrain_other_slots_keep_lateral_range() {
        let limits = DecalLimits::default();
        let wild = DecalTransform {
            position: Vec3::new(5.0, -5.0, 3.0),
            rotation: Vec3::new(0.1, 0.2, 0.3),
            scale: Vec3::splat(2.0),
        };
        let t = limits.constrain(SlotId::Back, wild);
        assert!((t.position.x - SlotId::Back.spec().lateral_limit).abs() < 0.0001);
        assert!((t.position.y + 5.0).abs() < 0.0001);
        assert!((t.position.z - SlotId::Back.spec().depth_offset).abs() < 0.0001);
        assert!((t.scale.x - 2.0).abs() < 0.0001);
        assert_eq!(t.rotation, wild.rotation);

        let mut left = wild;
        left.position.x = -5.0;
        let t = limits.constrain(SlotId::LeftShoulder, left);
        assert!((t.position.x + SlotId::LeftShoulder.spec().lateral_limit).abs() < 0.0001);
    }
}
