//! CPU rendition of the chunk shader stages. Pure functions over their
//! inputs, matching shaders/render/chunk.wgsl one to one so the raster
//! crate can check the two agree.

use glam::{Mat4, Vec3, Vec4};

use crate::constants::{
    BASE_RED, SENTINEL_GRAY, TIER_BRIGHT, TIER_DARK, TIER_MID, VERTICES_PER_FACE,
};
use crate::types::Flat;

/// What the vertex stage receives per invocation: the vertex record plus
/// the builtin vertex index (the index-buffer value under an indexed draw).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInput {
    pub position: Vec3,
    pub color: Vec3,
    pub vertex_index: u32,
}

/// What the vertex stage hands to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    pub color: Vec3,
    pub face_slot: Flat<u32>,
}

/// What the fragment stage receives per covered pixel: interpolated color
/// and the flat face slot from the provoking vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentInput {
    pub color: Vec3,
    pub face_slot: Flat<u32>,
}

/// Which face a vertex belongs to. The mesher emits 4 unique vertices per
/// face, so consecutive groups of 4 vertex ids map to one face.
pub fn face_slot(vertex_index: u32) -> u32 {
    vertex_index / VERTICES_PER_FACE
}

/// Vertex stage: clip transform and face-slot derivation. Matrix order is
/// camera then model, applied right to left to the position.
pub fn transform_vertex(input: &VertexInput, camera: Mat4, model: Mat4) -> VertexOutput {
    VertexOutput {
        clip_position: camera * model * input.position.extend(1.0),
        color: input.color,
        face_slot: Flat::new(face_slot(input.vertex_index)),
    }
}

/// The brightness ladder. Closed over all u32 values: codes 0..=5 scale
/// the base color by their tier, anything else is the sentinel.
pub fn shade_code(code: u32) -> [f32; 4] {
    let tier = match code {
        0 | 1 => TIER_DARK,
        2 | 3 => TIER_MID,
        4 | 5 => TIER_BRIGHT,
        _ => return SENTINEL_GRAY,
    };
    [BASE_RED[0] * tier, BASE_RED[1] * tier, BASE_RED[2] * tier, 1.0]
}

/// Fragment stage: look up the face code for this primitive's slot and
/// run it through the ladder. A slot past the end of the buffer shades
/// as the sentinel, same as a malformed code.
pub fn shade_fragment(frag: &FragmentInput, face_codes: &[u32]) -> [f32; 4] {
    let code = face_codes
        .get(frag.face_slot.get() as usize)
        .copied()
        .unwrap_or(u32::MAX);
    shade_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_slot_floor_division() {
        assert_eq!(face_slot(0), 0);
        assert_eq!(face_slot(1), 0);
        assert_eq!(face_slot(2), 0);
        assert_eq!(face_slot(3), 0);
        assert_eq!(face_slot(4), 1);
        assert_eq!(face_slot(7), 1);
        assert_eq!(face_slot(8), 2);
        assert_eq!(face_slot(1000), 250);
        assert_eq!(face_slot(1003), 250);
    }

    #[test]
    fn test_ladder_dark_tier() {
        assert_eq!(shade_code(0), [0.3, 0.0, 0.0, 1.0]);
        assert_eq!(shade_code(1), [0.3, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_ladder_mid_tier() {
        assert_eq!(shade_code(2), [0.5, 0.0, 0.0, 1.0]);
        assert_eq!(shade_code(3), [0.5, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_ladder_bright_tier() {
        assert_eq!(shade_code(4), [0.75, 0.0, 0.0, 1.0]);
        assert_eq!(shade_code(5), [0.75, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_ladder_sentinel() {
        assert_eq!(shade_code(6), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(shade_code(255), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(shade_code(u32::MAX), [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_alpha_always_one() {
        for code in [0, 1, 2, 3, 4, 5, 6, 99, u32::MAX] {
            assert_eq!(shade_code(code)[3], 1.0);
        }
    }

    #[test]
    fn test_transform_identity() {
        let input = VertexInput {
            position: Vec3::new(0.25, -0.5, 0.75),
            color: Vec3::new(0.1, 0.2, 0.3),
            vertex_index: 5,
        };
        let out = transform_vertex(&input, Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(out.clip_position, Vec4::new(0.25, -0.5, 0.75, 1.0));
        assert_eq!(out.color, input.color);
        assert_eq!(out.face_slot.get(), 1);
    }

    #[test]
    fn test_transform_matrix_order() {
        // Translate in model space, then scale in camera space. If the
        // order were model * camera the x result would be 2.5, not 4.0.
        let model = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let camera = Mat4::from_scale(Vec3::splat(2.0));
        let input = VertexInput {
            position: Vec3::new(1.0, 0.0, 0.0),
            color: Vec3::ZERO,
            vertex_index: 0,
        };
        let out = transform_vertex(&input, camera, model);
        assert_eq!(out.clip_position, Vec4::new(4.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_transform_deterministic() {
        let input = VertexInput {
            position: Vec3::new(3.0, 1.0, -2.0),
            color: Vec3::new(1.0, 0.0, 0.0),
            vertex_index: 1003,
        };
        let camera = Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
        let model = Mat4::from_rotation_y(0.7);
        let a = transform_vertex(&input, camera, model);
        let b = transform_vertex(&input, camera, model);
        assert_eq!(a, b);
    }

    #[test]
    fn test_shade_fragment_lookup() {
        let codes = [2u32, 4];
        let frag = FragmentInput {
            color: Vec3::ONE,
            face_slot: Flat::new(0),
        };
        assert_eq!(shade_fragment(&frag, &codes), [0.5, 0.0, 0.0, 1.0]);
        let frag = FragmentInput {
            color: Vec3::ONE,
            face_slot: Flat::new(1),
        };
        assert_eq!(shade_fragment(&frag, &codes), [0.75, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_shade_fragment_slot_past_buffer() {
        let codes = [0u32];
        let frag = FragmentInput {
            color: Vec3::ONE,
            face_slot: Flat::new(10),
        };
        assert_eq!(shade_fragment(&frag, &codes), [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_shade_fragment_ignores_vertex_color() {
        let codes = [9u32];
        for color in [Vec3::ZERO, Vec3::ONE, Vec3::new(0.0, 1.0, 0.0)] {
            let frag = FragmentInput {
                color,
                face_slot: Flat::new(0),
            };
            assert_eq!(shade_fragment(&frag, &codes), [0.5, 0.5, 0.5, 1.0]);
        }
    }
}
