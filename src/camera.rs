use crate::matrix::Matrix;
use crate::vector::Vec3;

/// Pinhole camera. `total_pitch`/`total_yaw` accumulate look rotations;
/// the orthonormal basis and the camera-to-world transform are rebuilt
/// from them before every render.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    pub origin: Vec3,
    pub fov_angle: f64,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub total_pitch: f64,
    pub total_yaw: f64,
    pub camera_to_world: Matrix,
}

impl Camera {
    pub fn new(origin: Vec3, fov_angle: f64) -> Camera {
        Camera {
            origin,
            fov_angle,
            forward: Vec3::unit_z(),
            up: Vec3::unit_y(),
            right: Vec3::unit_x(),
            total_pitch: 0.0,
            total_yaw: 0.0,
            camera_to_world: Matrix::identity(),
        }
    }

    /// Rebuilds forward from the accumulated pitch/yaw applied to +Z, then
    /// re-orthonormalizes the basis against world up and assembles
    /// [right | up | forward | origin].
    pub fn calculate_camera_to_world(&mut self) -> Matrix {
        let rotation = Matrix::rotation(self.total_pitch, self.total_yaw, 0.0);
        self.forward = rotation.transform_vector(Vec3::unit_z()).normalize();
        self.right = Vec3::unit_y().cross(self.forward).normalize();
        self.up = self.forward.cross(self.right).normalize();

        self.camera_to_world = Matrix::from_axes(self.right, self.up, self.forward, self.origin);
        self.camera_to_world
    }
}

impl Default for Camera {
    fn default() -> Camera {
        Camera::new(Vec3::zero(), 90.0)
    }
}
