//! Naive visible-face mesher. Every solid block contributes one quad per
//! face whose neighbor is air or past the chunk edge. Each quad owns 4
//! consecutive vertices, 6 indices, and one face code, which is the
//! alignment the shader's vertex_index / 4 derivation depends on.

use glam::IVec3;

use quarry_core::constants::{INDICES_PER_FACE, VERTICES_PER_FACE};
use quarry_core::face::{FaceDir, ALL_FACES};
use quarry_core::types::Vertex;

use crate::block::Block;
use crate::chunk::Chunk;

/// Unit-cube corners per face, counter-clockwise seen from outside the
/// block. Offsets are added to the block position.
fn face_corners(face: FaceDir) -> [[f32; 3]; 4] {
    match face {
        FaceDir::Front => [
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        ],
        FaceDir::Back => [
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
        FaceDir::Up => [
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
        ],
        FaceDir::Down => [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
        FaceDir::Left => [
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
        ],
        FaceDir::Right => [
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
        ],
    }
}

/// Mesh buffers for one chunk. Face f owns vertices 4f..4f+4, indices
/// 6f..6f+6, and face_codes[f].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub face_codes: Vec<u32>,
}

impl ChunkMesh {
    pub fn face_count(&self) -> usize {
        self.face_codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.face_codes.is_empty()
    }

    /// Whether the buffers satisfy the per-face grouping alignment.
    pub fn is_aligned(&self) -> bool {
        self.vertices.len() == self.face_codes.len() * VERTICES_PER_FACE as usize
            && self.indices.len() == self.face_codes.len() * INDICES_PER_FACE as usize
    }

    fn push_face(&mut self, face: FaceDir, pos: IVec3, color: [f32; 3]) {
        let base = self.vertices.len() as u32;
        for corner in face_corners(face) {
            self.vertices.push(Vertex::new(
                [
                    pos.x as f32 + corner[0],
                    pos.y as f32 + corner[1],
                    pos.z as f32 + corner[2],
                ],
                color,
            ));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.face_codes.push(face.code());
    }
}

/// Build the visible-face mesh for a chunk.
pub fn mesh_chunk(chunk: &Chunk) -> ChunkMesh {
    let mut mesh = ChunkMesh::default();

    for (pos, block) in chunk.iter_solid() {
        let color = block.color();
        for face in ALL_FACES {
            let exposed = match chunk.neighbor(pos, face) {
                Some(neighbor) => neighbor == Block::Air,
                None => true,
            };
            if exposed {
                mesh.push_face(face, pos, color);
            }
        }
    }

    debug_assert!(mesh.is_aligned());
    log::debug!(
        "meshed chunk: {} solid blocks -> {} faces",
        chunk.solid_count(),
        mesh.face_count()
    );
    mesh
}
