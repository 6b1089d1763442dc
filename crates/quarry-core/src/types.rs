use bytemuck::{Pod, Zeroable};

/// GPU vertex record: position and an interpolated base color.
/// Layout must match the vertex buffer layout declared by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// Per-primitive value that must never be interpolated across a triangle.
/// The GPU carries these with @interpolate(flat); the CPU rasterizer
/// resolves them from the provoking vertex. Wrapping the value keeps
/// smooth and flat channels from being mixed up in stage signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flat<T>(T);

impl<T: Copy> Flat<T> {
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    pub fn get(self) -> T {
        self.0
    }
}
