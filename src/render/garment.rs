//! Garment surface
//!
//! The garment is an elliptic tube with a closed top. Decals are glued to
//! it by projecting their slot-frame position outward onto the surface, so
//! sliding a decal sideways follows the curvature instead of floating off.
//!
//! All coordinates here are garment-local; [`model_matrix`] places the
//! garment in the world.

use macroquad::math::{Mat4, Quat, Vec2, Vec3};
use std::f32::consts::TAU;

use crate::rig::Breakpoint;
use crate::store::{DecalTransform, SlotId};

/// Cross-section radii and vertical extent of the tube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarmentShape {
    pub radius_x: f32,
    pub radius_z: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for GarmentShape {
    fn default() -> Self {
        Self {
            radius_x: 0.32,
            radius_z: 0.14,
            bottom: -0.38,
            top: 0.26,
        }
    }
}

/// Orthonormal frame of a slot on the surface
#[derive(Debug, Clone, Copy)]
pub struct SurfaceFrame {
    pub origin: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub normal: Vec3,
}

impl SurfaceFrame {
    /// Rotation taking decal space (quad in XY, facing +Z) into this frame
    pub fn rotation(&self) -> Quat {
        Quat::from_mat3(&macroquad::math::Mat3::from_cols(self.right, self.up, self.normal))
    }
}

/// Outward direction a slot faces before projection
pub fn slot_normal(slot: SlotId) -> Vec3 {
    let yaw = slot.spec().surface_yaw;
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Sideways direction of the slot frame (+X for the chest)
pub fn slot_right(slot: SlotId) -> Vec3 {
    let yaw = slot.spec().surface_yaw;
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

impl GarmentShape {
    /// Outward normal of the tube wall at a point
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x / (self.radius_x * self.radius_x),
            0.0,
            point.z / (self.radius_z * self.radius_z),
        )
        .normalize_or_zero()
    }

    /// Cast from `from` along `dir` (horizontal) to the tube wall.
    /// Returns the far intersection, or None when the line misses.
    pub fn cast_to_wall(&self, from: Vec3, dir: Vec3) -> Option<Vec3> {
        let (ax, az) = (self.radius_x * self.radius_x, self.radius_z * self.radius_z);
        let a = dir.x * dir.x / ax + dir.z * dir.z / az;
        let b = 2.0 * (from.x * dir.x / ax + from.z * dir.z / az);
        let c = from.x * from.x / ax + from.z * from.z / az - 1.0;
        if a <= f32::EPSILON {
            return None;
        }
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let s = (-b + disc.sqrt()) / (2.0 * a);
        Some(from + dir * s)
    }

    /// Distance from the axis to the wall along a horizontal direction
    pub fn half_extent(&self, dir: Vec3) -> f32 {
        let v = (dir.x / self.radius_x).powi(2) + (dir.z / self.radius_z).powi(2);
        if v <= f32::EPSILON {
            return 0.0;
        }
        1.0 / v.sqrt()
    }

    /// Surface frame for a slot at slot-local (x, y).
    /// Sideways offsets past the wall are pulled back onto it.
    pub fn surface_frame(&self, slot: SlotId, offset: Vec2) -> SurfaceFrame {
        let normal = slot_normal(slot);
        let right = slot_right(slot);
        let reach = self.half_extent(right) * 0.95;
        let height = (slot.spec().anchor_height + offset.y).clamp(self.bottom, self.top);
        let axis_point = right * offset.x.clamp(-reach, reach) + Vec3::new(0.0, height, 0.0);

        let origin = self.cast_to_wall(axis_point, normal).unwrap_or(axis_point);
        let surface_normal = match self.normal_at(origin) {
            n if n.length_squared() > 0.0 => n,
            _ => normal,
        };
        let surface_right = Vec3::Y.cross(surface_normal).normalize_or_zero();
        SurfaceFrame {
            origin,
            right: surface_right,
            up: surface_normal.cross(surface_right),
            normal: surface_normal,
        }
    }

    /// Garment-local matrix of a decal quad (unit quad in XY facing +Z)
    pub fn decal_matrix(&self, slot: SlotId, transform: &DecalTransform) -> Mat4 {
        let p = transform.position;
        let frame = self.surface_frame(slot, Vec2::new(p.x, p.y));
        let center = frame.origin + frame.normal * p.z;
        let r = transform.rotation;
        let local = Quat::from_euler(macroquad::math::EulerRot::XYZ, r.x, r.y, r.z);
        Mat4::from_scale_rotation_translation(transform.scale, frame.rotation() * local, center)
    }
}

/// CPU-side mesh data; converted to a macroquad mesh each frame
#[derive(Debug, Clone, Default)]
pub struct GarmentMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u16>,
}

impl GarmentMesh {
    /// Tube wall plus a top cap. `segments` around, `rings` vertically.
    pub fn build(shape: &GarmentShape, segments: usize, rings: usize) -> Self {
        let mut mesh = GarmentMesh::default();
        let height = shape.top - shape.bottom;

        for ring in 0..=rings {
            let v = ring as f32 / rings as f32;
            let y = shape.top - v * height;
            for seg in 0..=segments {
                let u = seg as f32 / segments as f32;
                // u = 0 at the back seam, 0.5 on the chest
                let angle = u * TAU + std::f32::consts::PI;
                let p = Vec3::new(shape.radius_x * angle.sin(), y, shape.radius_z * angle.cos());
                mesh.positions.push(p);
                mesh.normals.push(shape.normal_at(p));
                mesh.uvs.push(Vec2::new(u, v));
            }
        }

        let stride = segments + 1;
        for ring in 0..rings {
            for seg in 0..segments {
                let i0 = (ring * stride + seg) as u16;
                let i1 = i0 + 1;
                let i2 = i0 + stride as u16;
                let i3 = i2 + 1;
                mesh.indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }

        // Top cap: fan around a center vertex
        let center = mesh.positions.len() as u16;
        mesh.positions.push(Vec3::new(0.0, shape.top, 0.0));
        mesh.normals.push(Vec3::Y);
        mesh.uvs.push(Vec2::new(0.5, 0.0));
        for seg in 0..segments {
            mesh.indices.extend_from_slice(&[center, seg as u16 + 1, seg as u16]);
        }

        mesh
    }
}

/// Garment size multiplier per breakpoint
pub fn garment_scale(breakpoint: Breakpoint) -> f32 {
    if breakpoint.is_mobile() {
        0.76
    } else {
        0.9
    }
}

/// Garment-local → world
pub fn model_matrix(yaw: f32, breakpoint: Breakpoint) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(garment_scale(breakpoint)),
        Quat::from_rotation_y(yaw),
        Vec3::ZERO,
    )
}
