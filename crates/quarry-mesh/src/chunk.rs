use glam::IVec3;

use quarry_core::constants::{CHUNK_HEIGHT, CHUNK_SIZE};
use quarry_core::face::FaceDir;

use crate::block::Block;

/// Dense block storage for one chunk: CHUNK_SIZE x CHUNK_HEIGHT x
/// CHUNK_SIZE, indexed y-major to match the flat layout.
pub struct Chunk {
    blocks: Vec<Block>,
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunk {
    pub fn new() -> Self {
        let volume = (CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE) as usize;
        Self {
            blocks: vec![Block::Air; volume],
        }
    }

    fn index(pos: IVec3) -> Option<usize> {
        let size = CHUNK_SIZE as i32;
        let height = CHUNK_HEIGHT as i32;
        if pos.x < 0 || pos.x >= size || pos.y < 0 || pos.y >= height || pos.z < 0 || pos.z >= size
        {
            return None;
        }
        Some(((pos.y * size + pos.z) * size + pos.x) as usize)
    }

    /// Block at `pos`, or None if out of bounds.
    pub fn get(&self, pos: IVec3) -> Option<Block> {
        Self::index(pos).map(|i| self.blocks[i])
    }

    /// Place a block. Returns None if out of bounds.
    pub fn set(&mut self, pos: IVec3, block: Block) -> Option<()> {
        let i = Self::index(pos)?;
        self.blocks[i] = block;
        Some(())
    }

    /// Block behind the given face of `pos`, or None past the chunk edge.
    pub fn neighbor(&self, pos: IVec3, face: FaceDir) -> Option<Block> {
        self.get(pos + face.offset())
    }

    /// Iterator over the positions of all solid blocks.
    pub fn iter_solid(&self) -> impl Iterator<Item = (IVec3, Block)> + '_ {
        let size = CHUNK_SIZE as i32;
        self.blocks.iter().enumerate().filter_map(move |(i, &b)| {
            if !b.is_solid() {
                return None;
            }
            let i = i as i32;
            let x = i % size;
            let z = (i / size) % size;
            let y = i / (size * size);
            Some((IVec3::new(x, y, z), b))
        })
    }

    /// Number of solid blocks.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip() {
        let mut chunk = Chunk::new();
        let pos = IVec3::new(3, 7, 11);
        assert_eq!(chunk.get(pos), Some(Block::Air));
        assert_eq!(chunk.set(pos, Block::Stone), Some(()));
        assert_eq!(chunk.get(pos), Some(Block::Stone));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut chunk = Chunk::new();
        for pos in [
            IVec3::new(-1, 0, 0),
            IVec3::new(0, -1, 0),
            IVec3::new(0, 0, -1),
            IVec3::new(CHUNK_SIZE as i32, 0, 0),
            IVec3::new(0, CHUNK_HEIGHT as i32, 0),
            IVec3::new(0, 0, CHUNK_SIZE as i32),
        ] {
            assert_eq!(chunk.get(pos), None, "{pos:?} should be out of bounds");
            assert_eq!(chunk.set(pos, Block::Dirt), None);
        }
    }

    #[test]
    fn test_neighbor_lookup() {
        let mut chunk = Chunk::new();
        let pos = IVec3::new(5, 5, 5);
        chunk.set(pos, Block::Dirt).unwrap();
        chunk.set(IVec3::new(5, 6, 5), Block::Stone).unwrap();

        assert_eq!(chunk.neighbor(pos, FaceDir::Up), Some(Block::Stone));
        assert_eq!(chunk.neighbor(pos, FaceDir::Down), Some(Block::Air));
    }

    #[test]
    fn test_neighbor_past_edge() {
        let chunk = Chunk::new();
        assert_eq!(chunk.neighbor(IVec3::new(0, 0, 0), FaceDir::Left), None);
        assert_eq!(chunk.neighbor(IVec3::new(0, 0, 0), FaceDir::Front), None);
        assert_eq!(
            chunk.neighbor(IVec3::new(CHUNK_SIZE as i32 - 1, 0, 0), FaceDir::Right),
            None
        );
    }

    #[test]
    fn test_iter_solid_positions() {
        let mut chunk = Chunk::new();
        chunk.set(IVec3::new(0, 0, 0), Block::Dirt).unwrap();
        chunk.set(IVec3::new(15, 15, 15), Block::Stone).unwrap();

        let solid: Vec<_> = chunk.iter_solid().collect();
        assert_eq!(
            solid,
            vec![
                (IVec3::new(0, 0, 0), Block::Dirt),
                (IVec3::new(15, 15, 15), Block::Stone),
            ]
        );
        assert_eq!(chunk.solid_count(), 2);
    }
}
