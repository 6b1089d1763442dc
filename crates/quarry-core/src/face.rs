use glam::IVec3;

/// One of the six axis-aligned faces of a block. The discriminant is the
/// face code carried per quad in the mesh's face-code buffer and consumed
/// by the fragment stage brightness ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FaceDir {
    Front = 0,
    Back = 1,
    Up = 2,
    Down = 3,
    Left = 4,
    Right = 5,
}

/// All six faces in code order.
pub const ALL_FACES: [FaceDir; 6] = [
    FaceDir::Front,
    FaceDir::Back,
    FaceDir::Up,
    FaceDir::Down,
    FaceDir::Left,
    FaceDir::Right,
];

impl FaceDir {
    /// Offset to the neighbor block this face looks at. Y-up, -Z front.
    pub fn offset(self) -> IVec3 {
        match self {
            FaceDir::Front => IVec3::new(0, 0, -1),
            FaceDir::Back => IVec3::new(0, 0, 1),
            FaceDir::Up => IVec3::new(0, 1, 0),
            FaceDir::Down => IVec3::new(0, -1, 0),
            FaceDir::Left => IVec3::new(-1, 0, 0),
            FaceDir::Right => IVec3::new(1, 0, 0),
        }
    }

    /// Face code as stored in the per-face buffer.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Decode a face code. Codes outside 0..=5 have no face.
    pub fn from_code(code: u32) -> Option<FaceDir> {
        match code {
            0 => Some(FaceDir::Front),
            1 => Some(FaceDir::Back),
            2 => Some(FaceDir::Up),
            3 => Some(FaceDir::Down),
            4 => Some(FaceDir::Left),
            5 => Some(FaceDir::Right),
            _ => None,
        }
    }
}
