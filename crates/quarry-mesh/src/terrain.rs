//! Deterministic chunk fills for benches and tests.

use glam::IVec3;

use quarry_core::constants::{CHUNK_HEIGHT, CHUNK_SIZE};

use crate::block::Block;
use crate::chunk::Chunk;

/// One dirt block resting on the chunk floor, centered.
pub fn single_block() -> Chunk {
    let mut chunk = Chunk::new();
    let mid = CHUNK_SIZE as i32 / 2;
    let _ = chunk.set(IVec3::new(mid, 0, mid), Block::Dirt);
    chunk
}

/// Stone slab covering the chunk floor, `layers` blocks thick.
pub fn flat_floor(layers: u32) -> Chunk {
    let mut chunk = Chunk::new();
    let layers = layers.min(CHUNK_HEIGHT) as i32;
    for y in 0..layers {
        for z in 0..CHUNK_SIZE as i32 {
            for x in 0..CHUNK_SIZE as i32 {
                let _ = chunk.set(IVec3::new(x, y, z), Block::Stone);
            }
        }
    }
    chunk
}

/// Staircase wedge rising along x: column height equals x.
pub fn wedge() -> Chunk {
    let mut chunk = Chunk::new();
    for x in 0..CHUNK_SIZE as i32 {
        for y in 0..x.min(CHUNK_HEIGHT as i32) {
            for z in 0..CHUNK_SIZE as i32 {
                let _ = chunk.set(IVec3::new(x, y, z), Block::Dirt);
            }
        }
    }
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::mesh_chunk;

    #[test]
    fn test_single_block_count() {
        assert_eq!(single_block().solid_count(), 1);
    }

    #[test]
    fn test_flat_floor_count() {
        let chunk = flat_floor(2);
        assert_eq!(chunk.solid_count(), 2 * 16 * 16);
    }

    #[test]
    fn test_wedge_count() {
        // Column at x holds x blocks per z row.
        let expected: i32 = (0..16).map(|x| x * 16).sum();
        assert_eq!(wedge().solid_count(), expected as usize);
    }

    #[test]
    fn test_terrain_meshes_stay_aligned() {
        for chunk in [single_block(), flat_floor(3), wedge()] {
            let mesh = mesh_chunk(&chunk);
            assert!(!mesh.is_empty());
            assert!(mesh.is_aligned());
        }
    }
}
