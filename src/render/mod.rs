//! 3D scene rendering
//!
//! Draws the garment and its decals with macroquad's 3D pipeline:
//! - Garment: CPU-transformed tube mesh, Lambert-shaded in the base color,
//!   textured with the full-wrap image when that slot is active
//! - Decals: textured quads glued to the surface at their slot frames
//!
//! Geometry math lives in [`garment`]; everything here that needs a GL
//! context is kept thin.

pub mod garment;
mod textures;

pub use textures::TextureCache;

use macroquad::math::{Mat4, Vec2, Vec3};
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;

use crate::rig::{Breakpoint, CameraRig};
use crate::store::{CustomizationState, SlotId};
use garment::{model_matrix, GarmentMesh, GarmentShape};

const SEGMENTS: usize = 48;
const RINGS: usize = 12;
const AMBIENT: f32 = 0.45;

/// Key light direction (world space, toward the light)
fn light_dir() -> Vec3 {
    Vec3::new(0.4, 0.6, 1.0).normalize()
}

/// Lambert shade with an ambient floor
pub fn shade(color: Color, normal: Vec3, light: Vec3) -> Color {
    let k = AMBIENT + (1.0 - AMBIENT) * normal.dot(light).max(0.0);
    Color::new(color.r * k, color.g * k, color.b * k, color.a)
}

/// Corners of a decal quad in world space, counter-clockwise from top-left
pub fn decal_corners(matrix: Mat4) -> [Vec3; 4] {
    [
        matrix.transform_point3(Vec3::new(-0.5, 0.5, 0.0)),
        matrix.transform_point3(Vec3::new(-0.5, -0.5, 0.0)),
        matrix.transform_point3(Vec3::new(0.5, -0.5, 0.0)),
        matrix.transform_point3(Vec3::new(0.5, 0.5, 0.0)),
    ]
}

const DECAL_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
];

fn vertex(p: Vec3, uv: Vec2, color: Color) -> Vertex {
    Vertex::new(p.x, p.y, p.z, uv.x, uv.y, color)
}

/// Scene renderer; owns the garment geometry and decal textures
pub struct SceneRenderer {
    pub shape: GarmentShape,
    mesh: GarmentMesh,
    textures: TextureCache,
}

impl SceneRenderer {
    pub fn new() -> Self {
        let shape = GarmentShape::default();
        Self {
            mesh: GarmentMesh::build(&shape, SEGMENTS, RINGS),
            shape,
            textures: TextureCache::new(),
        }
    }

    /// Draw the garment scene through the rig's camera.
    /// Leaves the default 2D camera set for the overlay.
    pub fn draw(&mut self, state: &CustomizationState, rig: &CameraRig, breakpoint: Breakpoint) {
        self.textures
            .retain_refs(SlotId::ALL.iter().map(|id| state.slot(*id).image_ref.as_str()));

        set_camera(&rig.camera());
        let model = model_matrix(rig.model_yaw(), breakpoint);
        self.draw_garment(state, model);
        for slot in state.active_slots().filter(|s| s.spec().has_gizmo()) {
            self.draw_decal(state, slot, model);
        }
        set_default_camera();
    }

    fn draw_garment(&mut self, state: &CustomizationState, model: Mat4) {
        let full = state.slot(SlotId::Full);
        let texture = if full.active {
            self.textures.get(&full.image_ref)
        } else {
            None
        };
        // Texture replaces the base color; shading still applies
        let base = if texture.is_some() { WHITE } else { state.base_color.to_color() };
        let light = light_dir();

        let vertices = self
            .mesh
            .positions
            .iter()
            .zip(&self.mesh.normals)
            .zip(&self.mesh.uvs)
            .map(|((p, n), uv)| {
                let normal = model.transform_vector3(*n).normalize_or_zero();
                vertex(model.transform_point3(*p), *uv, shade(base, normal, light))
            })
            .collect();

        draw_mesh(&Mesh {
            vertices,
            indices: self.mesh.indices.clone(),
            texture,
        });
    }

    fn draw_decal(&mut self, state: &CustomizationState, slot: SlotId, model: Mat4) {
        let slot_state = state.slot(slot);
        let Some(texture) = self.textures.get(&slot_state.image_ref) else {
            return;
        };
        let matrix = model * self.shape.decal_matrix(slot, &slot_state.transform);
        let corners = decal_corners(matrix);
        let vertices = corners
            .iter()
            .zip(DECAL_UVS)
            .map(|(p, uv)| vertex(*p, uv, WHITE))
            .collect();
        draw_mesh(&Mesh {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
            texture: Some(texture),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DecalTransform, DecalLimits};

    #[test]
    fn test_shade_facing_light_is_full() {
        let light = light_dir();
        let c = shade(Color::new(1.0, 0.5, 0.25, 1.0), light, light);
        assert!((c.r - 1.0).abs() < 0.001);
        assert!((c.g - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_shade_away_is_ambient() {
        let light = light_dir();
        let c = shade(WHITE, -light, light);
        assert!((c.r - AMBIENT).abs() < 0.001);
        assert!((c.a - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_chest_decal_quad_faces_front() {
        let shape = GarmentShape::default();
        let limits = DecalLimits::default();
        let t = DecalTransform::slot_default(SlotId::Chest, limits.base_scale);
        let corners = decal_corners(shape.decal_matrix(SlotId::Chest, &t));
        // Counter-clockwise when seen from +z
        let n = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
        assert!(n.z > 0.0);
        let width = (corners[3] - corners[0]).length();
        assert!((width - limits.base_scale).abs() < 0.001);
        // Sits just outside the chest wall
        assert!(corners.iter().all(|c| c.z > shape.radius_z));
    }
}
