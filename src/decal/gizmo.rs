//! Per-slot transform gizmo
//!
//! Screen-space handles drawn over each placed decal while editing:
//! a center disc to move, a knob above to rotate, a knob at the corner to
//! scale. Dragging a handle runs the matching tracker and commits the
//! resulting gizmo matrix to the store on every update.

use macroquad::logging::debug;
use macroquad::math::{EulerRot, Mat4, Quat, Vec2, Vec3};
use macroquad::prelude::*;

use super::drag::{DragState, DragStatus, DragTracker, GizmoPose, MoveTracker, RotateTracker, ScaleTracker};
use super::apply_gizmo_matrix;
use crate::input::{PointerEvent, PointerPhase, PointerSource};
use crate::ray::{ray_plane_intersection, screen_to_ray, world_to_screen, Ray};
use crate::render::garment::{slot_normal, slot_right, GarmentShape};
use crate::store::{CustomizationState, CustomizationStore, DecalTransform, SlotId, ViewMode};

const TRANSLATE_RADIUS: f32 = 14.0;
const ROTATE_OFFSET: f32 = 46.0;
const SCALE_OFFSET: f32 = 34.0;
const KNOB_RADIUS: f32 = 10.0;
const MIN_GIZMO_SCALE: f32 = 0.05;

/// Which part of the gizmo is grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoHandle {
    Translate,
    Rotate,
    Scale,
}

/// Everything needed to project gizmos for the current frame
pub struct GizmoScene {
    pub camera: Camera3D,
    pub screen: Vec2,
    /// Garment-local → world
    pub model: Mat4,
    pub shape: GarmentShape,
}

impl GizmoScene {
    /// Screen placement of a slot's gizmo, if the decal faces the camera
    pub fn view(&self, slot: SlotId, transform: &DecalTransform) -> Option<GizmoView> {
        let p = transform.position;
        let frame = self.shape.surface_frame(slot, Vec2::new(p.x, p.y));
        let center = self.model.transform_point3(frame.origin + frame.normal * p.z);
        let normal = self.model.transform_vector3(frame.normal).normalize_or_zero();
        if (self.camera.position - center).dot(normal) <= 0.0 {
            return None;
        }
        let screen = world_to_screen(center, self.screen.x, self.screen.y, &self.camera)?;
        Some(GizmoView { slot, center: screen })
    }

    /// Pointer projected onto the slot's tangent plane, in slot-local x/y
    pub fn plane_hit(&self, slot: SlotId, pointer: Vec2) -> Option<Vec2> {
        let world = screen_to_ray(pointer.x, pointer.y, self.screen.x, self.screen.y, &self.camera);
        let inverse = self.model.inverse();
        let ray = Ray::new(
            inverse.transform_point3(world.origin),
            inverse.transform_vector3(world.direction),
        );
        let normal = slot_normal(slot);
        let anchor = self.shape.surface_frame(slot, Vec2::ZERO).origin;
        let t = ray_plane_intersection(&ray, anchor, normal)?;
        let hit = ray.at(t);
        Some(Vec2::new(hit.dot(slot_right(slot)), hit.y - slot.spec().anchor_height))
    }
}

/// A gizmo placed on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoView {
    pub slot: SlotId,
    pub center: Vec2,
}

impl GizmoView {
    pub fn handle_position(&self, handle: GizmoHandle) -> Vec2 {
        match handle {
            GizmoHandle::Translate => self.center,
            GizmoHandle::Rotate => self.center + Vec2::new(0.0, -ROTATE_OFFSET),
            GizmoHandle::Scale => self.center + Vec2::new(SCALE_OFFSET, SCALE_OFFSET),
        }
    }

    /// Knobs win over the center disc
    pub fn hit(&self, pointer: Vec2) -> Option<GizmoHandle> {
        for handle in [GizmoHandle::Rotate, GizmoHandle::Scale] {
            if pointer.distance(self.handle_position(handle)) <= KNOB_RADIUS {
                return Some(handle);
            }
        }
        (pointer.distance(self.center) <= TRANSLATE_RADIUS).then_some(GizmoHandle::Translate)
    }
}

/// Gizmo pose for a stored transform
pub fn pose_of(transform: &DecalTransform, base_scale: f32) -> GizmoPose {
    GizmoPose {
        translation: Vec2::new(transform.position.x, transform.position.y),
        angle: transform.rotation.z,
        scale: if base_scale > 0.0 { transform.scale.x / base_scale } else { 1.0 },
    }
}

/// Gizmo-local matrix for a pose, keeping the untouched X/Y rotations
pub fn compose(pose: &GizmoPose, tilt: Vec2) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(pose.scale),
        Quat::from_euler(EulerRot::XYZ, tilt.x, tilt.y, pose.angle),
        Vec3::new(pose.translation.x, pose.translation.y, 0.0),
    )
}

#[derive(Debug, Clone)]
enum ActiveTracker {
    Move(MoveTracker),
    Rotate(RotateTracker),
    Scale(ScaleTracker),
}

impl ActiveTracker {
    fn update(&mut self, state: &DragState, pose: &mut GizmoPose) -> DragStatus {
        match self {
            ActiveTracker::Move(t) => t.update(state, pose),
            ActiveTracker::Rotate(t) => t.update(state, pose),
            ActiveTracker::Scale(t) => t.update(state, pose),
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveGizmoDrag {
    slot: SlotId,
    source: PointerSource,
    handle: GizmoHandle,
    tracker: ActiveTracker,
    state: DragState,
    pose: GizmoPose,
    tilt: Vec2,
    last_matrix: Mat4,
}

/// Owns the in-progress gizmo drag, if any
#[derive(Debug, Clone)]
pub struct GizmoController {
    active: Option<ActiveGizmoDrag>,
    last_slot: Option<SlotId>,
    hovered: Option<(SlotId, GizmoHandle)>,
    snap_radians: f32,
}

impl GizmoController {
    pub fn new(snap_degrees: f32) -> Self {
        Self {
            active: None,
            last_slot: None,
            hovered: None,
            snap_radians: snap_degrees.to_radians(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Slot most recently grabbed or wheel-resized
    pub fn last_slot(&self) -> Option<SlotId> {
        self.last_slot
    }

    /// Record a change made outside a gizmo drag
    pub fn mark_manipulated(&mut self, slot: SlotId) {
        self.last_slot = Some(slot);
    }

    /// Gizmos shown this frame: active placed slots, editing only
    pub fn views(state: &CustomizationState, scene: &GizmoScene) -> Vec<GizmoView> {
        if state.view_mode != ViewMode::Editing {
            return Vec::new();
        }
        state
            .active_slots()
            .filter(|slot| slot.spec().has_gizmo())
            .filter_map(|slot| scene.view(slot, &state.slot(slot).transform))
            .collect()
    }

    fn pick(views: &[GizmoView], pointer: Vec2) -> Option<(SlotId, GizmoHandle)> {
        views
            .iter()
            .find_map(|view| view.hit(pointer).map(|handle| (view.slot, handle)))
    }

    /// Refresh the hover highlight
    pub fn hover(&mut self, views: &[GizmoView], pointer: Vec2) {
        self.hovered = match &self.active {
            Some(drag) => Some((drag.slot, drag.handle)),
            None => Self::pick(views, pointer),
        };
    }

    /// Route a pointer event. Returns true when the gizmo consumed it.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        store: &mut CustomizationStore,
        scene: &GizmoScene,
        snap: bool,
    ) -> bool {
        let pointer = Vec2::new(event.x, event.y);
        match event.phase {
            PointerPhase::Down => {
                if self.active.is_some() {
                    return false;
                }
                let views = Self::views(store.state(), scene);
                let Some((slot, handle)) = Self::pick(&views, pointer) else {
                    return false;
                };
                let Some(view) = views.iter().find(|v| v.slot == slot) else {
                    return false;
                };
                let transform = store.state().slot(slot).transform;
                let pose = pose_of(&transform, store.limits().base_scale);
                let tilt = Vec2::new(transform.rotation.x, transform.rotation.y);
                let tracker = match handle {
                    GizmoHandle::Translate => ActiveTracker::Move(MoveTracker),
                    GizmoHandle::Rotate => ActiveTracker::Rotate(RotateTracker { snap_radians: self.snap_radians }),
                    GizmoHandle::Scale => ActiveTracker::Scale(ScaleTracker { min_scale: MIN_GIZMO_SCALE }),
                };
                debug!("gizmo drag start: {} {:?}", slot.label(), handle);
                self.active = Some(ActiveGizmoDrag {
                    slot,
                    source: event.source,
                    handle,
                    tracker,
                    state: DragState::new(pose, pointer, view.center, scene.plane_hit(slot, pointer)),
                    pose,
                    tilt,
                    last_matrix: compose(&pose, tilt),
                });
                self.last_slot = Some(slot);
                self.hovered = Some((slot, handle));
                true
            }
            PointerPhase::Move | PointerPhase::Up => {
                let Some(drag) = self.active.as_mut().filter(|d| d.source == event.source) else {
                    return false;
                };
                drag.state.current_mouse = pointer;
                drag.state.current_hit = scene.plane_hit(drag.slot, pointer);
                drag.state.snap = snap;
                if drag.tracker.update(&drag.state, &mut drag.pose) == DragStatus::Continue {
                    let matrix = compose(&drag.pose, drag.tilt);
                    apply_gizmo_matrix(store, drag.slot, matrix);
                    drag.last_matrix = matrix;
                }
                if event.phase == PointerPhase::Up {
                    debug!("gizmo drag end: {}", drag.slot.label());
                    self.active = None;
                }
                true
            }
            PointerPhase::Cancel => {
                let Some(drag) = self.active.take() else {
                    return false;
                };
                if drag.source != event.source {
                    self.active = Some(drag);
                    return false;
                }
                // Commit whatever the gizmo last showed
                apply_gizmo_matrix(store, drag.slot, drag.last_matrix);
                debug!("gizmo drag cancelled: {}", drag.slot.label());
                true
            }
        }
    }

    /// Draw all visible gizmos
    pub fn draw(&self, views: &[GizmoView]) {
        for view in views {
            let state_of = |handle: GizmoHandle| {
                let dragging = matches!(&self.active, Some(d) if d.slot == view.slot && d.handle == handle);
                let hovered = self.hovered == Some((view.slot, handle));
                (hovered, dragging)
            };

            let rotate = view.handle_position(GizmoHandle::Rotate);
            let scale = view.handle_position(GizmoHandle::Scale);
            let (h, d) = state_of(GizmoHandle::Rotate);
            draw_line(view.center.x, view.center.y, rotate.x, rotate.y, 2.0, handle_color(GREEN, h, d));
            draw_circle(rotate.x, rotate.y, KNOB_RADIUS * 0.7, handle_color(GREEN, h, d));

            let (h, d) = state_of(GizmoHandle::Scale);
            draw_line(view.center.x, view.center.y, scale.x, scale.y, 2.0, handle_color(BLUE, h, d));
            draw_rectangle(scale.x - 5.0, scale.y - 5.0, 10.0, 10.0, handle_color(BLUE, h, d));

            let (h, d) = state_of(GizmoHandle::Translate);
            let thickness = if h || d { 3.0 } else { 2.0 };
            draw_circle_lines(view.center.x, view.center.y, TRANSLATE_RADIUS, thickness, handle_color(RED, h, d));
            draw_circle(view.center.x, view.center.y, 3.0, if d { YELLOW } else { WHITE });
        }
    }
}

/// Handle color with hover/drag state
fn handle_color(base_color: Color, is_hovered: bool, is_dragging: bool) -> Color {
    if is_dragging {
        YELLOW
    } else if is_hovered {
        Color::new(base_color.r, base_color.g, base_color.b, 1.0)
    } else {
        Color::new(base_color.r * 0.8, base_color.g * 0.8, base_color.b * 0.8, 0.8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::garment::model_matrix;
    use crate::rig::Breakpoint;
    use crate::store::{BaseColor, DecalLimits};

    fn scene() -> GizmoScene {
        GizmoScene {
            camera: Camera3D {
                position: vec3(0.0, 0.0, 2.0),
                target: vec3(0.0, 0.0, 0.0),
                up: vec3(0.0, 1.0, 0.0),
                fovy: 25f32.to_radians(),
                ..Default::default()
            },
            screen: Vec2::new(800.0, 600.0),
            model: model_matrix(0.0, Breakpoint::Desktop),
            shape: GarmentShape::default(),
        }
    }

    fn editing_store() -> CustomizationStore {
        let mut store = CustomizationStore::new(BaseColor::default(), DecalLimits::default());
        store.set_view_mode(ViewMode::Editing);
        store
    }

    fn chest_center(store: &CustomizationStore, scene: &GizmoScene) -> Vec2 {
        scene
            .view(SlotId::Chest, &store.state().slot(SlotId::Chest).transform)
            .map(|v| v.center)
            .unwrap_or(Vec2::ZERO)
    }

    #[test]
    fn test_back_gizmo_hidden_from_front() {
        let scene = scene();
        let mut store = editing_store();
        store.set_slot_active(SlotId::Back, true);
        let views = GizmoController::views(store.state(), &scene);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].slot, SlotId::Chest);
    }

    #[test]
    fn test_no_gizmos_outside_editing() {
        let scene = scene();
        let mut store = editing_store();
        store.set_view_mode(ViewMode::Preview);
        assert!(GizmoController::views(store.state(), &scene).is_empty());
    }

    #[test]
    fn test_plane_hit_at_center_is_origin() {
        let scene = scene();
        let store = editing_store();
        let center = chest_center(&store, &scene);
        let hit = scene.plane_hit(SlotId::Chest, center);
        assert!(hit.is_some());
        let hit = hit.unwrap_or(Vec2::ONE);
        assert!(hit.length() < 0.01);
    }

    #[test]
    fn test_translate_drag_moves_chest_and_pins_depth() {
        let scene = scene();
        let mut store = editing_store();
        let mut gizmo = GizmoController::new(15.0);
        let c = chest_center(&store, &scene);

        let down = PointerEvent::new(PointerSource::Mouse, PointerPhase::Down, c.x, c.y);
        assert!(gizmo.handle(&down, &mut store, &scene, false));
        assert!(gizmo.is_dragging());

        let mv = PointerEvent::new(PointerSource::Mouse, PointerPhase::Move, c.x + 30.0, c.y);
        assert!(gizmo.handle(&mv, &mut store, &scene, false));
        let t = store.state().slot(SlotId::Chest).transform;
        assert!(t.position.x > 0.01);
        assert!(t.position.y.abs() < 0.005);
        assert!((t.position.z - SlotId::Chest.spec().depth_offset).abs() < 0.0001);

        let up = PointerEvent::new(PointerSource::Mouse, PointerPhase::Up, c.x + 30.0, c.y);
        assert!(gizmo.handle(&up, &mut store, &scene, false));
        assert!(!gizmo.is_dragging());
        assert_eq!(gizmo.last_slot(), Some(SlotId::Chest));
    }

    #[test]
    fn test_rotate_knob_rotates() {
        let scene = scene();
        let mut store = editing_store();
        let mut gizmo = GizmoController::new(15.0);
        let c = chest_center(&store, &scene);
        let knob = c + Vec2::new(0.0, -ROTATE_OFFSET);

        gizmo.handle(&PointerEvent::new(PointerSource::Mouse, PointerPhase::Down, knob.x, knob.y), &mut store, &scene, false);
        // Sweep a quarter turn counter-clockwise (up → left)
        let left = c + Vec2::new(-ROTATE_OFFSET, 0.0);
        gizmo.handle(&PointerEvent::new(PointerSource::Mouse, PointerPhase::Up, left.x, left.y), &mut store, &scene, false);
        let t = store.state().slot(SlotId::Chest).transform;
        assert!((t.rotation.z - std::f32::consts::FRAC_PI_2).abs() < 0.01);
    }

    #[test]
    fn test_scale_knob_clamped_by_store() {
        let scene = scene();
        let mut store = editing_store();
        let mut gizmo = GizmoController::new(15.0);
        let c = chest_center(&store, &scene);
        let knob = c + Vec2::new(SCALE_OFFSET, SCALE_OFFSET);

        gizmo.handle(&PointerEvent::new(PointerSource::Mouse, PointerPhase::Down, knob.x, knob.y), &mut store, &scene, false);
        let far = c + Vec2::new(SCALE_OFFSET, SCALE_OFFSET) * 20.0;
        gizmo.handle(&PointerEvent::new(PointerSource::Mouse, PointerPhase::Move, far.x, far.y), &mut store, &scene, false);
        let s = store.state().slot(SlotId::Chest).transform.scale.x;
        assert!((s - store.limits().chest_scale_max).abs() < 0.0001);
    }

    #[test]
    fn test_cancel_commits_last_pose() {
        let scene = scene();
        let mut store = editing_store();
        let mut gizmo = GizmoController::new(15.0);
        let c = chest_center(&store, &scene);

        gizmo.handle(&PointerEvent::new(PointerSource::Touch(3), PointerPhase::Down, c.x, c.y), &mut store, &scene, false);
        gizmo.handle(&PointerEvent::new(PointerSource::Touch(3), PointerPhase::Move, c.x, c.y + 20.0), &mut store, &scene, false);
        let moved = store.state().slot(SlotId::Chest).transform;

        // Other sources don't affect the drag
        assert!(!gizmo.handle(&PointerEvent::new(PointerSource::Mouse, PointerPhase::Cancel, 0.0, 0.0), &mut store, &scene, false));
        assert!(gizmo.is_dragging());

        assert!(gizmo.handle(&PointerEvent::new(PointerSource::Touch(3), PointerPhase::Cancel, 0.0, 0.0), &mut store, &scene, false));
        assert!(!gizmo.is_dragging());
        assert_eq!(store.state().slot(SlotId::Chest).transform, moved);
        assert!(moved.position.y < 0.0);
    }

    #[test]
    fn test_miss_passes_through() {
        let scene = scene();
        let mut store = editing_store();
        let mut gizmo = GizmoController::new(15.0);
        let down = PointerEvent::new(PointerSource::Mouse, PointerPhase::Down, 5.0, 5.0);
        assert!(!gizmo.handle(&down, &mut store, &scene, false));
        assert!(!gizmo.is_dragging());
    }
}
