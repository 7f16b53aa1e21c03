//! Decal slots
//!
//! Closed set of placement locations on the garment. Each slot carries its
//! own placement data so nothing downstream matches on tab names or field
//! names.

use std::f32::consts::{FRAC_PI_2, PI};

/// A named placement location for a decal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotId {
    Chest,
    Full,
    Back,
    LeftShoulder,
    RightShoulder,
}

impl SlotId {
    /// Tab order used by the filter bar and the file panel
    pub const ALL: [SlotId; 5] = [
        SlotId::Chest,
        SlotId::Full,
        SlotId::LeftShoulder,
        SlotId::RightShoulder,
        SlotId::Back,
    ];

    /// Slots that are placed with the gizmo (everything but the full wrap)
    pub const PLACED: [SlotId; 4] = [
        SlotId::Chest,
        SlotId::LeftShoulder,
        SlotId::RightShoulder,
        SlotId::Back,
    ];

    pub fn spec(self) -> &'static SlotSpec {
        match self {
            SlotId::Chest => &CHEST,
            SlotId::Full => &FULL,
            SlotId::Back => &BACK,
            SlotId::LeftShoulder => &LEFT_SHOULDER,
            SlotId::RightShoulder => &RIGHT_SHOULDER,
        }
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    /// Stable index into per-slot arrays
    pub fn index(self) -> usize {
        match self {
            SlotId::Chest => 0,
            SlotId::Full => 1,
            SlotId::Back => 2,
            SlotId::LeftShoulder => 3,
            SlotId::RightShoulder => 4,
        }
    }
}

/// Static placement data for a slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotSpec {
    pub label: &'static str,
    /// Height of the slot anchor on the garment axis
    pub anchor_height: f32,
    /// Rotation about +Y of the slot's outward normal (0 = facing +Z, the chest)
    pub surface_yaw: f32,
    /// Fixed distance off the surface; the depth axis is pinned to this
    pub depth_offset: f32,
    /// Default decal size as a multiple of the configured base scale
    pub base_scale_factor: f32,
    /// Largest |x| along the slot's sideways axis that still lands on the
    /// garment wall (wall half-extent in that direction, minus a margin)
    pub lateral_limit: f32,
    /// Wraps the whole garment instead of sitting at an anchor
    pub wraps_surface: bool,
}

impl SlotSpec {
    /// Whether a placement gizmo is offered for this slot
    pub fn has_gizmo(&self) -> bool {
        !self.wraps_surface
    }
}

const CHEST: SlotSpec = SlotSpec {
    label: "Chest",
    anchor_height: 0.04,
    surface_yaw: 0.0,
    depth_offset: 0.004,
    base_scale_factor: 1.0,
    lateral_limit: 0.26,
    wraps_surface: false,
};

const FULL: SlotSpec = SlotSpec {
    label: "Full",
    anchor_height: 0.0,
    surface_yaw: 0.0,
    depth_offset: 0.0,
    base_scale_factor: 1.0,
    lateral_limit: 0.0,
    wraps_surface: true,
};

const BACK: SlotSpec = SlotSpec {
    label: "Back",
    anchor_height: 0.06,
    surface_yaw: PI,
    depth_offset: 0.004,
    base_scale_factor: 1.5,
    lateral_limit: 0.26,
    wraps_surface: false,
};

const LEFT_SHOULDER: SlotSpec = SlotSpec {
    label: "Left",
    anchor_height: 0.10,
    surface_yaw: -FRAC_PI_2,
    depth_offset: 0.006,
    base_scale_factor: 1.0,
    lateral_limit: 0.07,
    wraps_surface: false,
};

const RIGHT_SHOULDER: SlotSpec = SlotSpec {
    label: "Right",
    anchor_height: 0.10,
    surface_yaw: FRAC_PI_2,
    depth_offset: 0.006,
    base_scale_factor: 1.0,
    lateral_limit: 0.07,
    wraps_surface: false,
};
