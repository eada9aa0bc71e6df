use crate::engine::config::CameraConfig;
use crate::engine::utils::math::{
    Mat3x3,
    Mat4x4,
    mat3x3_identity,
    mat3x3_normal_from_mat4x4,
    mat4x4_look_at,
    mat4x4_mul,
    mat4x4_perspective,
    mat4x4_rot_y,
};

/// Matrices for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub projection: Mat4x4,
    pub modelview: Mat4x4,
    pub normal_matrix: Mat3x3,
}

/// Fixed eye on the +Z axis looking at the origin, with the model spun about
/// Y by an angle that grows a fixed step each frame. Speed therefore follows
/// the frame rate.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    settings: CameraConfig,
    angle: f32,
}

impl OrbitCamera {
    pub fn new(settings: CameraConfig) -> Self {
        Self { settings, angle: 0.0 }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn angle_step(&self) -> f32 {
        self.settings.angle_step
    }

    pub fn advance(&mut self) {
        self.angle += self.settings.angle_step;
    }

    pub fn projection(&self, width: u32, height: u32) -> Mat4x4 {
        let aspect_ratio = (width.max(1) as f32) / (height.max(1) as f32);
        mat4x4_perspective(
            self.settings.fov_y_radians,
            aspect_ratio,
            self.settings.near,
            self.settings.far
        )
    }

    pub fn modelview(&self) -> Mat4x4 {
        let view = mat4x4_look_at(
            [0.0, 0.0, self.settings.eye_distance],
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0]
        );
        mat4x4_mul(view, mat4x4_rot_y(self.angle))
    }

    pub fn transforms(&self, width: u32, height: u32) -> FrameTransforms {
        let modelview = self.modelview();
        let normal_matrix = mat3x3_normal_from_mat4x4(&modelview).unwrap_or_else(|| {
            log::warn!("model-view matrix is singular, using identity normal matrix");
            mat3x3_identity()
        });

        FrameTransforms {
            projection: self.projection(width, height),
            modelview,
            normal_matrix,
        }
    }
}
