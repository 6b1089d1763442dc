pub mod constants;
pub mod error;
pub mod face;
pub mod stage;
pub mod types;

pub use error::QuarryError;
pub use face::{FaceDir, ALL_FACES};
pub use stage::{FragmentInput, VertexInput, VertexOutput};
pub use types::{Flat, Vertex};
