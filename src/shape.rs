use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::mesh::{self, Mesh, MeshError};
use crate::render::Rasterizer;

/// Closed set of parametric solids the viewer can display, each variant
/// carrying its generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeKind {
    Cube {
        size: f32,
    },
    Sphere {
        radius: f32,
        slices: u32,
        stacks: u32,
    },
    Pyramid {
        size: f32,
    },
    Cylinder {
        radius: f32,
        height: f32,
        slices: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        slices: u32,
    },
}

impl ShapeKind {
    /// Short lowercase name used in logs and scene summaries.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cube { .. } => "cube",
            Self::Sphere { .. } => "sphere",
            Self::Pyramid { .. } => "pyramid",
            Self::Cylinder { .. } => "cylinder",
            Self::Cone { .. } => "cone",
        }
    }

    /// Runs the matching procedural generator.
    pub fn generate(self) -> Result<Mesh, MeshError> {
        match self {
            Self::Cube { size } => mesh::generate_cube(size),
            Self::Sphere {
                radius,
                slices,
                stacks,
            } => mesh::generate_sphere(radius, slices, stacks),
            Self::Pyramid { size } => mesh::generate_pyramid(size),
            Self::Cylinder {
                radius,
                height,
                slices,
            } => mesh::generate_cylinder(radius, height, slices),
            Self::Cone {
                radius,
                height,
                slices,
            } => mesh::generate_cone(radius, height, slices),
        }
    }
}

/// A placed solid: a shape-kind tag plus its generated mesh.
///
/// Transforms are baked directly into the stored vertex positions, so
/// every operation applies to the buffer state left by the previous one;
/// there is no model matrix and no reference pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    kind: ShapeKind,
    mesh: Mesh,
}

impl Shape {
    /// Generates the mesh for `kind` and wraps it as a placeable shape.
    pub fn new(kind: ShapeKind) -> Result<Self, MeshError> {
        Ok(Self {
            mesh: kind.generate()?,
            kind,
        })
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Adds the offset to every stored vertex position.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        let offset = Vec3::new(dx, dy, dz);
        for position in self.mesh.positions_mut() {
            *position += offset;
        }
    }

    /// Multiplies every stored vertex position componentwise. Repeated
    /// calls compound, and scaling does not commute with translation.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        let factor = Vec3::new(sx, sy, sz);
        for position in self.mesh.positions_mut() {
            *position *= factor;
        }
    }

    /// Rotates every stored vertex position by elementary rotations about
    /// X, then Y, then Z (radians), each axis applied to the output of
    /// the previous one rather than through one combined matrix.
    pub fn rotate(&mut self, rx: f32, ry: f32, rz: f32) {
        let around_x = Mat3::from_rotation_x(rx);
        let around_y = Mat3::from_rotation_y(ry);
        let around_z = Mat3::from_rotation_z(rz);
        for position in self.mesh.positions_mut() {
            *position = around_z * (around_y * (around_x * *position));
        }
    }

    /// Hands the mesh to the rasterizer for one indexed draw.
    pub fn draw(&self, rasterizer: &mut dyn Rasterizer) {
        rasterizer.draw_mesh(&self.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn unit_cube() -> Shape {
        Shape::new(ShapeKind::Cube { size: 1.0 }).unwrap()
    }

    fn assert_positions_eq(actual: &[Vec3], expected: &[Vec3]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.abs_diff_eq(*e, 1e-5), "expected {e}, got {a}");
        }
    }

    #[test]
    fn translate_round_trips() {
        let mut shape = unit_cube();
        let original = shape.mesh().positions().to_vec();
        shape.translate(1.5, -2.0, 0.25);
        shape.translate(-1.5, 2.0, -0.25);
        assert_positions_eq(shape.mesh().positions(), &original);
    }

    #[test]
    fn scale_and_translate_do_not_commute() {
        let mut translate_first = unit_cube();
        translate_first.translate(1.0, 0.0, 0.0);
        translate_first.scale(2.0, 1.0, 1.0);

        let mut scale_first = unit_cube();
        scale_first.scale(2.0, 1.0, 1.0);
        scale_first.translate(1.0, 0.0, 0.0);

        assert_ne!(
            translate_first.mesh().positions(),
            scale_first.mesh().positions()
        );
    }

    #[test]
    fn rotate_quarter_turn_about_x_maps_y_to_z() {
        let mesh = Mesh::new(vec![Vec3::Y, Vec3::X, Vec3::ZERO], None, None, vec![0, 1, 2]).unwrap();
        let mut shape = Shape {
            kind: ShapeKind::Pyramid { size: 1.0 },
            mesh,
        };
        shape.rotate(FRAC_PI_2, 0.0, 0.0);
        assert_positions_eq(
            shape.mesh().positions(),
            &[Vec3::Z, Vec3::X, Vec3::ZERO],
        );
    }

    #[test]
    fn rotate_chains_axes_sequentially() {
        let mesh = Mesh::new(vec![Vec3::Y], None, None, vec![0, 0, 0]).unwrap();
        let mut shape = Shape {
            kind: ShapeKind::Pyramid { size: 1.0 },
            mesh,
        };
        // X then Y then Z: (0,1,0) -> (0,0,1) -> (1,0,0) -> (0,1,0).
        shape.rotate(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2);
        assert_positions_eq(shape.mesh().positions(), &[Vec3::Y]);
    }

    #[test]
    fn rotation_preserves_topology() {
        let mut shape = Shape::new(ShapeKind::Sphere {
            radius: 1.0,
            slices: 8,
            stacks: 4,
        })
        .unwrap();
        let indices = shape.mesh().indices().to_vec();
        shape.rotate(0.3, 0.7, -0.2);
        assert_eq!(shape.mesh().indices(), indices.as_slice());
        assert_eq!(shape.mesh().vertex_count(), 9 * 5);
    }

    #[test]
    fn generation_failure_propagates_through_shape() {
        assert!(Shape::new(ShapeKind::Cone {
            radius: -1.0,
            height: 1.0,
            slices: 8,
        })
        .is_err());
    }
}
