/// Block kinds stored in a chunk. `Air` is empty space and never meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    #[default]
    Air,
    Dirt,
    Stone,
}

impl Block {
    /// Base vertex color for the smooth interpolation channel. The
    /// brightness ladder shades faces independently of this value.
    pub fn color(self) -> [f32; 3] {
        match self {
            // Air never reaches the mesher; black keeps the function total.
            Block::Air => [0.0, 0.0, 0.0],
            Block::Dirt => [0.5, 0.35, 0.2],
            Block::Stone => [0.6, 0.6, 0.6],
        }
    }

    pub fn is_solid(self) -> bool {
        self != Block::Air
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_not_solid() {
        assert!(!Block::Air.is_solid());
        assert!(Block::Dirt.is_solid());
        assert!(Block::Stone.is_solid());
    }

    #[test]
    fn test_default_is_air() {
        assert_eq!(Block::default(), Block::Air);
    }
}
