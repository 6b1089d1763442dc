//! Single source of truth for shared constants.
//! These values are used by both Rust and WGSL. The renderer injects
//! them into the shader preamble at module creation time.

/// Unique vertices emitted per quad face. With an indexed draw the
/// vertex stage sees index-buffer values, so face identity is
/// vertex_index / 4.
pub const VERTICES_PER_FACE: u32 = 4;

/// Indices emitted per quad face (two triangles).
pub const INDICES_PER_FACE: u32 = 6;

/// Side length of a chunk in blocks (x and z).
pub const CHUNK_SIZE: u32 = 16;

/// Height of a chunk in blocks (y).
pub const CHUNK_HEIGHT: u32 = 16;

/// Brightness applied to front/back faces (codes 0 and 1).
pub const TIER_DARK: f32 = 0.3;

/// Brightness applied to up/down faces (codes 2 and 3).
pub const TIER_MID: f32 = 0.5;

/// Brightness applied to left/right faces (codes 4 and 5).
pub const TIER_BRIGHT: f32 = 0.75;

/// Base color scaled by the brightness tiers.
pub const BASE_RED: [f32; 3] = [1.0, 0.0, 0.0];

/// Output for any face code outside 0..=5. Corrupt data renders
/// gray instead of aborting the draw.
pub const SENTINEL_GRAY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
