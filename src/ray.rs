//! Ray casting utilities for picking and gizmo drags
//!
//! Screen ↔ world conversions use the same perspective setup macroquad
//! builds for a [`Camera3D`], computed from the camera fields directly so
//! they work without a live window.

use macroquad::math::{Mat4, Vec2, Vec3, Vec4};
use macroquad::prelude::Camera3D;

const Z_NEAR: f32 = 0.01;
const Z_FAR: f32 = 10000.0;

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3, // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get point at distance t along ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Combined projection * view matrix for a perspective camera
pub fn view_projection(camera: &Camera3D, aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(camera.fovy, aspect, Z_NEAR, Z_FAR)
        * Mat4::look_at_rh(camera.position, camera.target, camera.up)
}

/// Generate a ray from screen coordinates (pixels, y down) through the camera
pub fn screen_to_ray(x: f32, y: f32, screen_w: f32, screen_h: f32, camera: &Camera3D) -> Ray {
    let inverse = view_projection(camera, screen_w / screen_h).inverse();
    let ndc_x = 2.0 * x / screen_w - 1.0;
    let ndc_y = 1.0 - 2.0 * y / screen_h;
    let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
    let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
    Ray::new(near, far - near)
}

/// Project a world point to screen pixels. None if behind the camera.
pub fn world_to_screen(point: Vec3, screen_w: f32, screen_h: f32, camera: &Camera3D) -> Option<Vec2> {
    let clip = view_projection(camera, screen_w / screen_h) * Vec4::new(point.x, point.y, point.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * screen_w,
        (1.0 - ndc.y) * 0.5 * screen_h,
    ))
}

/// Find the intersection of a ray with a plane.
///
/// Returns the distance along the ray to the intersection point,
/// or None if the ray is parallel to the plane or intersection is behind ray origin.
pub fn ray_plane_intersection(ray: &Ray, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
    let denom = ray.direction.dot(plane_normal);
    if denom.abs() < 0.0001 {
        return None; // Ray parallel to plane
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None; // Intersection behind ray origin
    }

    Some(t)
}
