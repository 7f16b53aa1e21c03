//! Decal placement
//!
//! Turns gizmo matrices and wheel input into store updates:
//! - `decompose_gizmo_matrix`: gizmo-local matrix → slot transform
//! - `apply_gizmo_matrix`: decompose and commit to the store
//! - `wheel_resize`: chest scale from the scroll wheel
//!
//! Depth is always pinned to the slot's surface offset. Lateral and chest
//! clamping are enforced by the store, so nothing here can push a decal off
//! the garment.

mod drag;
mod gizmo;

pub use gizmo::{GizmoController, GizmoScene, GizmoView};

use macroquad::math::{EulerRot, Mat4, Vec3};

use crate::store::{CustomizationStore, DecalTransform, SlotId, ViewMode};

/// Split a gizmo-local matrix into a slot transform.
///
/// Translation keeps x/y; z comes from the slot's depth offset.
/// Rotation is read back as XYZ Euler angles. The gizmo's unit scale is
/// multiplied by the base decal scale.
pub fn decompose_gizmo_matrix(slot: SlotId, local: Mat4, base_scale: f32) -> DecalTransform {
    let (scale, rotation, translation) = local.to_scale_rotation_translation();
    let (rx, ry, rz) = rotation.to_euler(EulerRot::XYZ);
    DecalTransform {
        position: Vec3::new(translation.x, translation.y, slot.spec().depth_offset),
        rotation: Vec3::new(rx, ry, rz),
        scale: scale * base_scale,
    }
}

/// Decompose a gizmo matrix and commit it for `slot`
pub fn apply_gizmo_matrix(store: &mut CustomizationStore, slot: SlotId, local: Mat4) {
    let transform = decompose_gizmo_matrix(slot, local, store.limits().base_scale);
    store.set_slot_transform(slot, transform);
}

/// Whether the scroll event was claimed by the customizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Let the page/scene handle it
    Ignored,
    /// Default scrolling suppressed
    Consumed,
}

/// Resize the chest decal from a wheel delta.
///
/// Only acts while editing. The event is consumed there even when the
/// chest slot is inactive, so the page never scrolls under the editor.
/// Scrolling down (negative delta) shrinks.
pub fn wheel_resize(store: &mut CustomizationStore, wheel_delta: f32, step: f32) -> WheelOutcome {
    if store.state().view_mode != ViewMode::Editing {
        return WheelOutcome::Ignored;
    }
    if wheel_delta == 0.0 {
        return WheelOutcome::Ignored;
    }
    let chest = store.state().slot(SlotId::Chest);
    if chest.active {
        let mut transform = chest.transform;
        transform.scale += Vec3::splat(step * wheel_delta.signum());
        store.set_slot_transform(SlotId::Chest, transform);
    }
    WheelOutcome::Consumed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{BaseColor, DecalLimits};
    use macroquad::math::Quat;

    fn editing_store() -> CustomizationStore {
        let mut store = CustomizationStore::new(BaseColor::default(), DecalLimits::default());
        store.set_view_mode(ViewMode::Editing);
        store
    }

    #[test]
    fn test_decompose_pins_depth() {
        for slot in SlotId::PLACED {
            let m = Mat4::from_scale_rotation_translation(
                Vec3::splat(1.5),
                Quat::from_rotation_z(0.4),
                Vec3::new(0.02, -0.03, 0.9),
            );
            let t = decompose_gizmo_matrix(slot, m, 0.1);
            assert!((t.position.z - slot.spec().depth_offset).abs() < 0.0001);
            assert!((t.position.x - 0.02).abs() < 0.0001);
            assert!((t.position.y + 0.03).abs() < 0.0001);
            assert!((t.rotation.z - 0.4).abs() < 0.001);
            assert!((t.scale.x - 0.15).abs() < 0.0001);
        }
    }

    #[test]
    fn test_apply_gizmo_matrix_clamps_chest() {
        let mut store = editing_store();
        let m = Mat4::from_scale_rotation_translation(Vec3::splat(10.0), Quat::IDENTITY, Vec3::new(5.0, 5.0, 0.0));
        apply_gizmo_matrix(&mut store, SlotId::Chest, m);
        let t = store.state().slot(SlotId::Chest).transform;
        let limits = *store.limits();
        assert!((t.scale.x - limits.chest_scale_max).abs() < 0.0001);
        assert!((t.position.x - limits.chest_bounds_max.x).abs() < 0.0001);
        assert!((t.position.y - limits.chest_bounds_max.y).abs() < 0.0001);
    }

    #[test]
    fn test_apply_gizmo_matrix_back_scale_unclamped() {
        let mut store = editing_store();
        let m = Mat4::from_scale_rotation_translation(Vec3::splat(3.0), Quat::IDENTITY, Vec3::new(0.2, 0.0, 0.0));
        apply_gizmo_matrix(&mut store, SlotId::Back, m);
        let t = store.state().slot(SlotId::Back).transform;
        assert!((t.scale.x - 0.3).abs() < 0.0001);
        assert!((t.position.x - 0.2).abs() < 0.0001);
    }

    #[test]
    fn test_wheel_only_in_editing() {
        let mut store = CustomizationStore::new(BaseColor::default(), DecalLimits::default());
        let before = store.state().slot(SlotId::Chest).transform;
        assert_eq!(wheel_resize(&mut store, 1.0, 0.01), WheelOutcome::Ignored);
        assert_eq!(store.state().slot(SlotId::Chest).transform, before);

        store.set_view_mode(ViewMode::Preview);
        assert_eq!(wheel_resize(&mut store, 1.0, 0.01), WheelOutcome::Ignored);
    }

    #[test]
    fn test_wheel_steps_scale() {
        let mut store = editing_store();
        assert_eq!(wheel_resize(&mut store, 3.0, 0.01), WheelOutcome::Consumed);
        let s = store.state().slot(SlotId::Chest).transform.scale;
        assert!((s.x - 0.11).abs() < 0.0001);
        assert!((s.y - 0.11).abs() < 0.0001);
        wheel_resize(&mut store, -1.0, 0.01);
        wheel_resize(&mut store, -1.0, 0.01);
        let s = store.state().slot(SlotId::Chest).transform.scale;
        assert!((s.x - 0.09).abs() < 0.0001);
    }

    #[test]
    fn test_wheel_stays_in_range() {
        let mut store = editing_store();
        let limits = *store.limits();
        for i in 0..200 {
            let delta = if (i / 40) % 2 == 0 { 1.0 } else { -1.0 };
            wheel_resize(&mut store, delta, 0.01);
            let s = store.state().slot(SlotId::Chest).transform.scale;
            assert!(s.x >= limits.chest_scale_min - 0.0001 && s.x <= limits.chest_scale_max + 0.0001);
        }
    }

    #[test]
    fn test_wheel_consumed_when_chest_inactive() {
        let mut store = editing_store();
        store.set_slot_active(SlotId::Chest, false);
        let before = store.state().slot(SlotId::Chest).transform;
        assert_eq!(wheel_resize(&mut store, 1.0, 0.01), WheelOutcome::Consumed);
        assert_eq!(store.state().slot(SlotId::Chest).transform, before);
    }
}
