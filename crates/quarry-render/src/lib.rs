pub mod renderer;

pub use renderer::{CameraUniforms, ChunkRenderer, GpuMesh, ModelUniforms, DEPTH_FORMAT};
