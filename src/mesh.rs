use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest vertex count addressable by the 16-bit index buffers.
pub const MAX_INDEXED_VERTICES: usize = u16::MAX as usize + 1;

/// Errors surfaced by mesh construction and the procedural generators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("invalid {name}: {requirement}")]
    InvalidParameter {
        name: &'static str,
        requirement: &'static str,
    },
    #[error("{vertices} vertices cannot be addressed by 16-bit indices")]
    IndexOverflow { vertices: usize },
    #[error("inconsistent mesh buffers: {0}")]
    Inconsistent(&'static str),
}

/// Triangle mesh buffers ready for upload by an external rasterizer.
///
/// Topology is fixed after construction; only the vertex positions may be
/// rewritten in place, through [`Shape`](crate::shape::Shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    texcoords: Option<Vec<Vec2>>,
    indices: Vec<u16>,
}

impl Mesh {
    /// Builds a mesh after checking the buffer invariants: the index list
    /// describes whole triangles, every index addresses a stored vertex,
    /// and optional attribute arrays match the position count.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Option<Vec<Vec3>>,
        texcoords: Option<Vec<Vec2>>,
        indices: Vec<u16>,
    ) -> Result<Self, MeshError> {
        if positions.len() > MAX_INDEXED_VERTICES {
            return Err(MeshError::IndexOverflow {
                vertices: positions.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::Inconsistent(
                "index count is not a multiple of three",
            ));
        }
        if indices
            .iter()
            .any(|&index| usize::from(index) >= positions.len())
        {
            return Err(MeshError::Inconsistent("index exceeds vertex count"));
        }
        if let Some(normals) = &normals {
            if normals.len() != positions.len() {
                return Err(MeshError::Inconsistent(
                    "normal count differs from vertex count",
                ));
            }
        }
        if let Some(texcoords) = &texcoords {
            if texcoords.len() != positions.len() {
                return Err(MeshError::Inconsistent(
                    "texcoord count differs from vertex count",
                ));
            }
        }
        Ok(Self {
            positions,
            normals,
            texcoords,
            indices,
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    pub fn texcoords(&self) -> Option<&[Vec2]> {
        self.texcoords.as_deref()
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generates a cube with corners at `±size` on every axis.
///
/// The eight corners are shared between faces, so the mesh carries
/// positions only.
pub fn generate_cube(size: f32) -> Result<Mesh, MeshError> {
    ensure_positive(size, "size")?;

    let s = size;
    let positions = vec![
        // front face corners
        Vec3::new(-s, -s, s),
        Vec3::new(s, -s, s),
        Vec3::new(s, s, s),
        Vec3::new(-s, s, s),
        // back face corners
        Vec3::new(-s, -s, -s),
        Vec3::new(s, -s, -s),
        Vec3::new(s, s, -s),
        Vec3::new(-s, s, -s),
    ];

    let indices = vec![
        0, 1, 2, 0, 2, 3, // front
        1, 5, 6, 1, 6, 2, // right
        5, 4, 7, 5, 7, 6, // back
        4, 0, 3, 4, 3, 7, // left
        3, 2, 6, 3, 6, 7, // top
        4, 5, 1, 4, 1, 0, // bottom
    ];

    Mesh::new(positions, None, None, indices)
}

/// Generates a UV sphere from stack/slice subdivisions.
///
/// The vertex grid is `(slices + 1) x (stacks + 1)`; the column at
/// `j = slices` repeats the angles of column zero so the texture seam can
/// carry distinct coordinates.
pub fn generate_sphere(radius: f32, slices: u32, stacks: u32) -> Result<Mesh, MeshError> {
    ensure_positive(radius, "radius")?;
    ensure_at_least(slices, 3, "slices", "must be at least 3")?;
    ensure_at_least(stacks, 2, "stacks", "must be at least 2")?;
    let vertex_count = (slices as usize + 1) * (stacks as usize + 1);
    ensure_indexable(vertex_count)?;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut texcoords = Vec::with_capacity(vertex_count);

    for i in 0..=stacks {
        let phi = i as f32 * PI / stacks as f32;
        for j in 0..=slices {
            let theta = j as f32 * 2.0 * PI / slices as f32;
            let unit = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            positions.push(unit * radius);
            normals.push(unit);
            texcoords.push(Vec2::new(
                1.0 - j as f32 / slices as f32,
                1.0 - i as f32 / stacks as f32,
            ));
        }
    }

    let mut indices = Vec::with_capacity(slices as usize * stacks as usize * 6);
    for i in 0..stacks {
        for j in 0..slices {
            let first = (i * (slices + 1) + j) as u16;
            let second = first + slices as u16 + 1;
            indices.extend_from_slice(&[first, first + 1, second]);
            indices.extend_from_slice(&[first + 1, second + 1, second]);
        }
    }

    Mesh::new(positions, Some(normals), Some(texcoords), indices)
}

/// Generates a square pyramid: four base corners at `(±size, -size,
/// ±size)` plus the apex at `(0, size, 0)`.
pub fn generate_pyramid(size: f32) -> Result<Mesh, MeshError> {
    ensure_positive(size, "size")?;

    let s = size;
    let positions = vec![
        Vec3::new(-s, -s, s),
        Vec3::new(s, -s, s),
        Vec3::new(s, -s, -s),
        Vec3::new(-s, -s, -s),
        Vec3::new(0.0, s, 0.0),
    ];

    let indices = vec![
        0, 1, 4, 1, 2, 4, // front and right sides
        2, 3, 4, 3, 0, 4, // back and left sides
        0, 2, 1, 0, 3, 2, // base, split along the 0-2 diagonal
    ];

    Mesh::new(positions, None, None, indices)
}

/// Generates the open side wall of a cylinder: a bottom ring at
/// `-height / 2` and a top ring at `+height / 2`, no caps.
pub fn generate_cylinder(radius: f32, height: f32, slices: u32) -> Result<Mesh, MeshError> {
    ensure_positive(radius, "radius")?;
    ensure_positive(height, "height")?;
    ensure_at_least(slices, 3, "slices", "must be at least 3")?;
    let ring = slices as usize + 1;
    ensure_indexable(ring * 2)?;

    let mut positions = Vec::with_capacity(ring * 2);
    let mut normals = Vec::with_capacity(ring * 2);
    let mut texcoords = Vec::with_capacity(ring * 2);
    let half_height = height * 0.5;

    for (y, v) in [(-half_height, 0.0), (half_height, 1.0)] {
        for j in 0..=slices {
            let theta = j as f32 * 2.0 * PI / slices as f32;
            positions.push(Vec3::new(radius * theta.cos(), y, radius * theta.sin()));
            normals.push(Vec3::new(theta.cos(), 0.0, theta.sin()));
            texcoords.push(Vec2::new(j as f32 / slices as f32, v));
        }
    }

    let mut indices = Vec::with_capacity(slices as usize * 6);
    for j in 0..slices {
        let bottom = j as u16;
        let top = bottom + slices as u16 + 1;
        indices.extend_from_slice(&[bottom, bottom + 1, top]);
        indices.extend_from_slice(&[bottom + 1, top + 1, top]);
    }

    Mesh::new(positions, Some(normals), Some(texcoords), indices)
}

/// Generates the open side wall of a cone as one triangle fan segment per
/// slice, with the base ring vertices duplicated per segment.
pub fn generate_cone(radius: f32, height: f32, slices: u32) -> Result<Mesh, MeshError> {
    ensure_positive(radius, "radius")?;
    ensure_positive(height, "height")?;
    ensure_at_least(slices, 3, "slices", "must be at least 3")?;
    let vertex_count = slices as usize * 3;
    ensure_indexable(vertex_count)?;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(vertex_count);
    let half_height = height * 0.5;
    let apex = Vec3::new(0.0, half_height, 0.0);

    for j in 0..slices {
        let theta = j as f32 * 2.0 * PI / slices as f32;
        let next_theta = (j + 1) as f32 * 2.0 * PI / slices as f32;
        positions.push(Vec3::new(
            radius * theta.cos(),
            -half_height,
            radius * theta.sin(),
        ));
        positions.push(apex);
        positions.push(Vec3::new(
            radius * next_theta.cos(),
            -half_height,
            radius * next_theta.sin(),
        ));
        let base = (j * 3) as u16;
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    Mesh::new(positions, None, None, indices)
}

fn ensure_positive(value: f32, name: &'static str) -> Result<(), MeshError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(MeshError::InvalidParameter {
            name,
            requirement: "must be a finite value greater than zero",
        })
    }
}

fn ensure_at_least(
    value: u32,
    minimum: u32,
    name: &'static str,
    requirement: &'static str,
) -> Result<(), MeshError> {
    if value >= minimum {
        Ok(())
    } else {
        Err(MeshError::InvalidParameter { name, requirement })
    }
}

fn ensure_indexable(vertex_count: usize) -> Result<(), MeshError> {
    if vertex_count <= MAX_INDEXED_VERTICES {
        Ok(())
    } else {
        Err(MeshError::IndexOverflow {
            vertices: vertex_count,
        })
    }
}
