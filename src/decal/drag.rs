//! Gizmo drag trackers
//!
//! Same shape as the editor's handle-drag system: a `DragState` snapshot
//! taken at drag start, a `DragTracker` per handle kind, and a
//! `DragStatus` telling the caller whether the proposed update was taken.
//!
//! Trackers produce a [`GizmoPose`]: the gizmo's own local translation,
//! in-plane angle and uniform scale. The gizmo turns that into a matrix.

use macroquad::math::Vec2;

/// The status of a drag operation after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStatus {
    /// Drag continues normally, pose was applied
    Continue,
    /// Drag continues but this update was rejected (e.g. ray missed the plane)
    Deny,
}

/// Gizmo-local pose (x/y translation, rotation about the normal, scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoPose {
    pub translation: Vec2,
    pub angle: f32,
    pub scale: f32,
}

impl Default for GizmoPose {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            angle: 0.0,
            scale: 1.0,
        }
    }
}

/// State of an active drag operation
#[derive(Debug, Clone)]
pub struct DragState {
    /// Pose at drag start
    pub initial_pose: GizmoPose,
    /// Initial pointer position in screen coords
    pub initial_mouse: Vec2,
    /// Current pointer position in screen coords
    pub current_mouse: Vec2,
    /// Gizmo center in screen coords (rotation/scale pivot)
    pub center_screen: Vec2,
    /// Pointer projected onto the slot plane at drag start (slot-local x/y)
    pub initial_hit: Option<Vec2>,
    /// Pointer projected onto the slot plane now
    pub current_hit: Option<Vec2>,
    /// Snap modifier held
    pub snap: bool,
}

impl DragState {
    pub fn new(initial_pose: GizmoPose, mouse: Vec2, center_screen: Vec2, hit: Option<Vec2>) -> Self {
        Self {
            initial_pose,
            initial_mouse: mouse,
            current_mouse: mouse,
            center_screen,
            initial_hit: hit,
            current_hit: hit,
            snap: false,
        }
    }
}

/// Snap a single value to grid
pub fn snap_value(value: f32, grid_size: f32) -> f32 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap an angle change to increments, relative to where the drag started
pub fn snap_angle(angle: f32, initial_angle: f32, snap_radians: f32) -> f32 {
    initial_angle + snap_value(angle - initial_angle, snap_radians)
}

/// Trait for objects that handle one kind of gizmo drag
pub trait DragTracker {
    /// Called each update with the latest pointer data.
    /// Writes the new pose on Continue.
    fn update(&mut self, drag_state: &DragState, pose: &mut GizmoPose) -> DragStatus;
}

/// Moves the decal within the slot plane
#[derive(Debug, Clone, Default)]
pub struct MoveTracker;

impl DragTracker for MoveTracker {
    fn update(&mut self, drag_state: &DragState, pose: &mut GizmoPose) -> DragStatus {
        let (Some(start), Some(now)) = (drag_state.initial_hit, drag_state.current_hit) else {
            return DragStatus::Deny;
        };
        pose.translation = drag_state.initial_pose.translation + (now - start);
        DragStatus::Continue
    }
}

/// Rotates about the surface normal by the pointer's sweep around the center
#[derive(Debug, Clone)]
pub struct RotateTracker {
    /// Snap increment in radians when the snap modifier is held
    pub snap_radians: f32,
}

/// Counter-clockwise screen angle (screen y grows downward)
fn screen_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    (-d.y).atan2(d.x)
}

impl DragTracker for RotateTracker {
    fn update(&mut self, drag_state: &DragState, pose: &mut GizmoPose) -> DragStatus {
        let c = drag_state.center_screen;
        if (drag_state.current_mouse - c).length() < 1.0 {
            // Angle undefined at the pivot
            return DragStatus::Deny;
        }
        let sweep = screen_angle(c, drag_state.current_mouse) - screen_angle(c, drag_state.initial_mouse);
        let initial = drag_state.initial_pose.angle;
        let angle = initial + sweep;
        pose.angle = if drag_state.snap {
            snap_angle(angle, initial, self.snap_radians)
        } else {
            angle
        };
        DragStatus::Continue
    }
}

/// Scales uniformly by the pointer's distance ratio from the center
#[derive(Debug, Clone)]
pub struct ScaleTracker {
    pub min_scale: f32,
}

impl DragTracker for ScaleTracker {
    fn update(&mut self, drag_state: &DragState, pose: &mut GizmoPose) -> DragStatus {
        let c = drag_state.center_screen;
        let start = (drag_state.initial_mouse - c).length().max(1.0);
        let now = (drag_state.current_mouse - c).length();
        pose.scale = (drag_state.initial_pose.scale * now / start).max(self.min_scale);
        DragStatus::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn state(mouse: Vec2, hit: Option<Vec2>) -> DragState {
        DragState::new(GizmoPose::default(), mouse, Vec2::new(100.0, 100.0), hit)
    }

    #[test]
    fn test_snap_value() {
        assert!((snap_value(1.3, 1.0) - 1.0).abs() < 0.001);
        assert!((snap_value(1.6, 1.0) - 2.0).abs() < 0.001);
        assert!((snap_value(-1.3, 1.0) - -1.0).abs() < 0.001);
        assert!((snap_value(1.3, 0.0) - 1.3).abs() < 0.001);
    }

    #[test]
    fn test_move_follows_plane_hit() {
        let mut s = state(Vec2::new(100.0, 100.0), Some(Vec2::new(0.01, 0.02)));
        s.current_hit = Some(Vec2::new(0.05, -0.01));
        let mut pose = GizmoPose::default();
        assert_eq!(MoveTracker.update(&s, &mut pose), DragStatus::Continue);
        assert!((pose.translation - Vec2::new(0.04, -0.03)).length() < 0.0001);

        s.current_hit = None;
        assert_eq!(MoveTracker.update(&s, &mut pose), DragStatus::Deny);
        assert!((pose.translation - Vec2::new(0.04, -0.03)).length() < 0.0001);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        // Start to the right of center, sweep to straight above: +90 degrees
        let mut s = state(Vec2::new(150.0, 100.0), None);
        s.current_mouse = Vec2::new(100.0, 50.0);
        let mut pose = GizmoPose::default();
        let mut tracker = RotateTracker { snap_radians: 15f32.to_radians() };
        tracker.update(&s, &mut pose);
        assert!((pose.angle - FRAC_PI_2).abs() < 0.001);
    }

    #[test]
    fn test_rotate_snaps() {
        let mut s = state(Vec2::new(150.0, 100.0), None);
        // ~20 degrees counter-clockwise
        s.current_mouse = Vec2::new(100.0 + 50.0 * 0.94, 100.0 - 50.0 * 0.342);
        s.snap = true;
        let mut pose = GizmoPose::default();
        let mut tracker = RotateTracker { snap_radians: 15f32.to_radians() };
        tracker.update(&s, &mut pose);
        assert!((pose.angle - 15f32.to_radians()).abs() < 0.001);
    }

    #[test]
    fn test_scale_ratio() {
        let mut s = state(Vec2::new(120.0, 100.0), None);
        s.current_mouse = Vec2::new(140.0, 100.0);
        let mut pose = GizmoPose::default();
        let mut tracker = ScaleTracker { min_scale: 0.1 };
        tracker.update(&s, &mut pose);
        assert!((pose.scale - 2.0).abs() < 0.001);

        s.current_mouse = Vec2::new(100.0, 100.0);
        tracker.update(&s, &mut pose);
        assert!((pose.scale - 0.1).abs() < 0.001);
    }
}
