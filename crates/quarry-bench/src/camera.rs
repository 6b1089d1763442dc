use glam::{Mat4, Vec3};
use quarry_core::constants::{CHUNK_HEIGHT, CHUNK_SIZE};

/// Free-orbit camera around a target point.
pub struct Camera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y_rad: f32,
}

impl Camera {
    /// Camera centered on the chunk, pulled back far enough to frame it.
    pub fn new() -> Self {
        let half = CHUNK_SIZE as f32 / 2.0;
        Self {
            target: Vec3::new(half, CHUNK_HEIGHT as f32 / 2.0, half),
            distance: 40.0,
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: -0.4,
            fov_y_rad: std::f32::consts::FRAC_PI_4,
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * 0.005;
        self.pitch = (self.pitch - dy * 0.005).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta * self.distance * 0.1).clamp(2.0, 200.0);
    }

    pub fn view_proj(&self, width: f32, height: f32) -> Mat4 {
        let eye = self.eye_position();
        let view = Mat4::look_at_rh(eye, self.target, Vec3::Y);
        let aspect = width / height;
        let proj = Mat4::perspective_rh(self.fov_y_rad, aspect, 0.1, 500.0);
        proj * view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
