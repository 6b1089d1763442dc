use quarry_mesh::{terrain, Chunk};

use crate::camera::Camera;

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub build: fn() -> Chunk,
    pub camera_distance: f32,
    pub camera_yaw: f32,
    pub camera_pitch: f32,
}

impl SceneConfig {
    pub fn camera(&self) -> Camera {
        let mut cam = Camera::new();
        cam.distance = self.camera_distance;
        cam.yaw = self.camera_yaw;
        cam.pitch = self.camera_pitch;
        cam
    }
}

/// Return the standard suite of benchmark scenes, smallest mesh first.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "single-block",
            build: terrain::single_block,
            camera_distance: 20.0,
            camera_yaw: std::f32::consts::FRAC_PI_4,
            camera_pitch: -0.4,
        },
        SceneConfig {
            name: "flat-floor",
            build: || terrain::flat_floor(4),
            camera_distance: 40.0,
            camera_yaw: std::f32::consts::FRAC_PI_4,
            camera_pitch: -0.6,
        },
        SceneConfig {
            name: "wedge",
            build: terrain::wedge,
            camera_distance: 40.0,
            camera_yaw: std::f32::consts::FRAC_PI_4,
            camera_pitch: -0.4,
        },
    ]
}
