use thiserror::Error;

/// Errors that can occur during Quarry initialization and readback.
#[derive(Debug, Error)]
pub enum QuarryError {
    #[error("WebGPU adapter not found: {0}")]
    AdapterNotFound(String),

    #[error("Failed to request GPU device: {0}")]
    DeviceRequestFailed(String),

    #[error("Framebuffer readback failed: {0}")]
    ReadbackFailed(String),
}
