//! The fixed cube mesh: 8 corner vertices and 36 indices.

use std::mem;

/// Per-vertex data for the cube, laid out to match the vertex shader inputs.
///
/// Attribute byte offsets are fixed at 0 (position), 12 (color), 24 (normal)
/// and 36 (uv); the stride is 44 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 9]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// The 8 corners of a unit cube centered at the origin, immutable after
/// upload. Corner normals point along the corner diagonals (1/sqrt(3) per
/// axis) and the color channels encode the corner's octant.
pub const CUBE_VERTICES: [Vertex; 8] = [
    Vertex {
        position: [-0.5, -0.5, -0.5],
        color: [0.0, 0.0, 0.0],
        normal: [-0.577, -0.577, -0.577],
        uv: [0.0, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5, 0.5],
        color: [0.0, 0.0, 1.0],
        normal: [-0.577, -0.577, 0.577],
        uv: [0.0, 1.0],
    },
    Vertex {
        position: [-0.5, 0.5, -0.5],
        color: [0.0, 1.0, 0.0],
        normal: [-0.577, 0.577, -0.577],
        uv: [1.0, 0.0],
    },
    Vertex {
        position: [-0.5, 0.5, 0.5],
        color: [0.0, 1.0, 1.0],
        normal: [-0.577, 0.577, 0.577],
        uv: [1.0, 1.0],
    },
    Vertex {
        position: [0.5, -0.5, -0.5],
        color: [1.0, 0.0, 0.0],
        normal: [0.577, -0.577, -0.577],
        uv: [1.0, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.5],
        color: [1.0, 0.0, 1.0],
        normal: [0.577, -0.577, 0.577],
        uv: [1.0, 1.0],
    },
    Vertex {
        position: [0.5, 0.5, -0.5],
        color: [1.0, 1.0, 0.0],
        normal: [0.577, 0.577, -0.577],
        uv: [0.0, 1.0],
    },
    Vertex {
        position: [0.5, 0.5, 0.5],
        color: [1.0, 1.0, 1.0],
        normal: [0.577, 0.577, 0.577],
        uv: [0.0, 0.0],
    },
];

/// 12 triangles over the 8 corners, two per face, wound counter-clockwise as
/// seen from outside the cube so back-face culling keeps the outside visible.
#[rustfmt::skip]
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, // -x
    1, 3, 2,

    4, 6, 5, // +x
    5, 6, 7,

    0, 5, 1, // -y
    0, 4, 5,

    2, 7, 6, // +y
    2, 3, 7,

    0, 6, 4, // -z
    0, 2, 6,

    1, 7, 3, // +z
    1, 5, 7,
];
