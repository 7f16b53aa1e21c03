//! Camera Rig
//!
//! Two independent pieces of camera state:
//! - Yaw of the garment's root group, driven by horizontal drag gestures.
//!   A gesture sets `live = committed + delta / divisor`; release (or
//!   cancel) commits the live value, so the next gesture continues from it.
//! - Camera position, damped every frame toward a target chosen from the
//!   view mode and viewport breakpoint.

pub mod damping;

use macroquad::math::Vec3;
use macroquad::prelude::Camera3D;
use std::f32::consts::TAU;

use crate::config::{vec3, BreakpointConfig, CameraConfig};
use crate::input::{PointerEvent, PointerPhase, PointerSource};
use crate::store::ViewMode;
use damping::damp3;

/// Viewport size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub fn from_width(width: f32, config: &BreakpointConfig) -> Self {
        if width <= config.mobile_max_width {
            Breakpoint::Mobile
        } else if width <= config.tablet_max_width {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Breakpoint::Mobile
    }
}

#[derive(Debug, Clone, Copy)]
struct YawDrag {
    source: PointerSource,
    origin_x: f32,
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    committed_yaw: f32,
    live_yaw: f32,
    drag: Option<YawDrag>,
    /// Preview turntable angle, kept apart from the user's yaw
    spin: f32,
    position: Vec3,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        let position = vec3(config.targets.editing_desktop);
        Self {
            config,
            committed_yaw: 0.0,
            live_yaw: 0.0,
            drag: None,
            spin: 0.0,
            position,
        }
    }

    /// Back to defaults, camera placed directly on its target
    pub fn reset(&mut self, mode: ViewMode, breakpoint: Breakpoint) {
        self.committed_yaw = 0.0;
        self.live_yaw = 0.0;
        self.drag = None;
        self.spin = 0.0;
        self.position = self.target(mode, breakpoint);
    }

    pub fn target(&self, mode: ViewMode, breakpoint: Breakpoint) -> Vec3 {
        let t = &self.config.targets;
        let triple = match (mode.is_intro(), breakpoint) {
            (true, Breakpoint::Mobile) => t.intro_mobile,
            (true, Breakpoint::Tablet) => t.intro_tablet,
            (true, Breakpoint::Desktop) => t.intro_desktop,
            (false, Breakpoint::Mobile) => t.editing_mobile,
            (false, _) => t.editing_desktop,
        };
        vec3(triple)
    }

    /// Per-frame update: damp position toward the target, advance the turntable
    pub fn update(&mut self, dt: f32, mode: ViewMode, breakpoint: Breakpoint) {
        let target = self.target(mode, breakpoint);
        self.position = damp3(self.position, target, self.config.smooth_time, dt);
        if mode == ViewMode::Preview {
            self.spin = (self.spin + self.config.preview_spin_speed * dt) % TAU;
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    // ========================================================================
    // Yaw drag gesture
    // ========================================================================

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Only one source drives the gesture; a second pointer is ignored
    pub fn begin_drag(&mut self, source: PointerSource, x: f32) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.drag = Some(YawDrag { source, origin_x: x });
        self.live_yaw = self.committed_yaw;
        true
    }

    pub fn drag_to(&mut self, source: PointerSource, x: f32) {
        if let Some(drag) = self.drag {
            if drag.source == source {
                self.live_yaw = self.committed_yaw + (x - drag.origin_x) / self.config.drag_divisor;
            }
        }
    }

    /// Release and cancel both commit the live value
    pub fn end_drag(&mut self, source: PointerSource) {
        if self.drag.map(|d| d.source) == Some(source) {
            self.committed_yaw = self.live_yaw;
            self.drag = None;
        }
    }

    /// Feed one pointer event. Returns true if the rig owns the gesture.
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        match event.phase {
            PointerPhase::Down => self.begin_drag(event.source, event.x),
            PointerPhase::Move => {
                self.drag_to(event.source, event.x);
                self.owns(event.source)
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                let owned = self.owns(event.source);
                if owned && event.phase == PointerPhase::Up {
                    self.drag_to(event.source, event.x);
                }
                self.end_drag(event.source);
                owned
            }
        }
    }

    pub fn owns(&self, source: PointerSource) -> bool {
        self.drag.map(|d| d.source) == Some(source)
    }

    /// Yaw the user dragged to (live during a gesture)
    pub fn rotation_y(&self) -> f32 {
        self.live_yaw
    }

    pub fn committed_rotation_y(&self) -> f32 {
        self.committed_yaw
    }

    /// Yaw applied to the garment root, including the preview turntable
    pub fn model_yaw(&self) -> f32 {
        self.live_yaw + self.spin
    }

    /// Camera looking straight down -Z from the damped position
    pub fn camera(&self) -> Camera3D {
        Camera3D {
            position: self.position,
            target: Vec3::new(self.position.x, self.position.y, 0.0),
            up: Vec3::Y,
            fovy: self.config.fov_degrees.to_radians(),
            ..Default::default()
        }
    }

    #[cfg(test)]
    fn with_committed(mut self, yaw: f32) -> Self {
        self.committed_yaw = yaw;
        self.live_yaw = yaw;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUSE: PointerSource = PointerSource::Mouse;

    fn rig() -> CameraRig {
        CameraRig::new(CameraConfig::default())
    }

    fn ev(source: PointerSource, phase: PointerPhase, x: f32) -> PointerEvent {
        PointerEvent::new(source, phase, x, 0.0)
    }

    #[test]
    fn test_drag_continues_from_commit() {
        let mut rig = rig().with_committed(0.3);

        rig.handle(&ev(MOUSE, PointerPhase::Down, 200.0));
        rig.handle(&ev(MOUSE, PointerPhase::Move, 250.0));
        assert!((rig.rotation_y() - 0.35).abs() < 0.0001);
        rig.handle(&ev(MOUSE, PointerPhase::Up, 250.0));
        assert!((rig.committed_rotation_y() - 0.35).abs() < 0.0001);
        assert!(!rig.is_dragging());

        rig.handle(&ev(MOUSE, PointerPhase::Down, 400.0));
        rig.handle(&ev(MOUSE, PointerPhase::Move, 380.0));
        assert!((rig.rotation_y() - 0.15).abs() < 0.0001);
    }

    #[test]
    fn test_rotation_freezes_after_release() {
        let mut rig = rig();
        rig.handle(&ev(MOUSE, PointerPhase::Down, 0.0));
        rig.handle(&ev(MOUSE, PointerPhase::Move, 100.0));
        rig.handle(&ev(MOUSE, PointerPhase::Up, 100.0));
        rig.handle(&ev(MOUSE, PointerPhase::Move, 500.0));
        for _ in 0..10 {
            rig.update(1.0 / 60.0, ViewMode::Editing, Breakpoint::Desktop);
        }
        assert!((rig.rotation_y() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_touch_and_mouse_share_model() {
        let touch = PointerSource::Touch(7);
        let mut rig = rig();
        rig.handle(&ev(touch, PointerPhase::Down, 100.0));
        // Mouse cannot hijack an active touch gesture
        assert!(!rig.handle(&ev(MOUSE, PointerPhase::Down, 0.0)));
        rig.handle(&ev(MOUSE, PointerPhase::Move, 900.0));
        rig.handle(&ev(touch, PointerPhase::Move, 150.0));
        assert!((rig.rotation_y() - 0.5).abs() < 0.0001);
        rig.handle(&ev(touch, PointerPhase::Up, 150.0));
        assert!((rig.committed_rotation_y() - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_cancel_force_commits() {
        let mut rig = rig();
        rig.handle(&ev(MOUSE, PointerPhase::Down, 0.0));
        rig.handle(&ev(MOUSE, PointerPhase::Move, -30.0));
        // Cancel position is ignored; the last live value is kept
        rig.handle(&ev(MOUSE, PointerPhase::Cancel, 999.0));
        assert!(!rig.is_dragging());
        assert!((rig.committed_rotation_y() + 0.3).abs() < 0.0001);
    }

    #[test]
    fn test_breakpoints() {
        let bp = BreakpointConfig::default();
        assert_eq!(Breakpoint::from_width(767.0, &bp), Breakpoint::Mobile);
        assert_eq!(Breakpoint::from_width(768.0, &bp), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1260.0, &bp), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1920.0, &bp), Breakpoint::Desktop);
    }

    #[test]
    fn test_targets() {
        let rig = rig();
        let t = CameraConfig::default().targets;
        assert_eq!(rig.target(ViewMode::Intro, Breakpoint::Tablet), vec3(t.intro_tablet));
        assert_eq!(rig.target(ViewMode::Editing, Breakpoint::Tablet), vec3(t.editing_desktop));
        assert_eq!(rig.target(ViewMode::Preview, Breakpoint::Mobile), vec3(t.editing_mobile));
    }

    #[test]
    fn test_mode_switch_damps_without_jump() {
        let mut rig = rig();
        rig.reset(ViewMode::Intro, Breakpoint::Desktop);
        let start = rig.position();
        let target = rig.target(ViewMode::Editing, Breakpoint::Desktop);
        assert!((start - target).length() > 0.1);

        let dt = 1.0 / 60.0;
        let max_step = (start - target).length() * damping::damp_factor(0.25, dt) + 0.0001;
        let mut prev = start;
        for _ in 0..240 {
            rig.update(dt, ViewMode::Editing, Breakpoint::Desktop);
            let pos = rig.position();
            assert!((pos - prev).length() <= max_step);
            assert!((pos - target).length() < (prev - target).length() + 0.0001);
            prev = pos;
        }
        assert!((prev - target).length() < 0.001);
    }

    #[test]
    fn test_preview_spins_model_only() {
        let mut rig = rig();
        rig.update(0.5, ViewMode::Preview, Breakpoint::Desktop);
        assert!(rig.rotation_y().abs() < 0.0001);
        assert!((rig.model_yaw() - 0.3).abs() < 0.0001);
        rig.update(0.5, ViewMode::Editing, Breakpoint::Desktop);
        assert!((rig.model_yaw() - 0.3).abs() < 0.0001);
    }
}
