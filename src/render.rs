use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::mesh::Mesh;

/// Matrices handed to the rasterizer once per frame.
///
/// Both matrices are column-major, matching the convention GPU APIs
/// expect for uniform upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub view: Mat4,
    pub projection: Mat4,
}

/// External rasterization step the scene draws into.
///
/// Implementations bind the mesh buffers and issue one indexed triangle
/// draw per call; the core never touches a graphics API itself.
pub trait Rasterizer {
    fn draw_mesh(&mut self, mesh: &Mesh);
}

/// GPU-ready interleaved vertex layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

/// Interleaves a mesh into [`Vertex`] records for buffer upload.
///
/// Attributes the mesh does not carry are zero-filled so every mesh
/// shares one vertex layout.
pub fn interleave(mesh: &Mesh) -> Vec<Vertex> {
    let normals = mesh.normals();
    let texcoords = mesh.texcoords();
    mesh.positions()
        .iter()
        .enumerate()
        .map(|(i, position)| Vertex {
            position: position.to_array(),
            normal: normals.map_or([0.0; 3], |normals| normals[i].to_array()),
            texcoord: texcoords.map_or([0.0; 2], |texcoords| texcoords[i].to_array()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{generate_cube, generate_sphere};

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        let cube = generate_cube(1.0).unwrap();
        let vertices = interleave(&cube);
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * 32);
    }

    #[test]
    fn missing_attributes_are_zero_filled() {
        let cube = generate_cube(1.0).unwrap();
        for vertex in interleave(&cube) {
            assert_eq!(vertex.normal, [0.0; 3]);
            assert_eq!(vertex.texcoord, [0.0; 2]);
        }
    }

    #[test]
    fn present_attributes_are_carried_over() {
        let sphere = generate_sphere(1.0, 8, 4).unwrap();
        let vertices = interleave(&sphere);
        assert_eq!(vertices.len(), sphere.vertex_count());
        assert_eq!(vertices[0].normal, sphere.normals().unwrap()[0].to_array());
        assert_eq!(
            vertices[0].texcoord,
            sphere.texcoords().unwrap()[0].to_array()
        );
    }
}
