//! Camera used to turn pointer positions into picking rays

use crate::core::types::{Mat4, Quat, Vec2, Vec3};
use crate::math::Ray;

/// Perspective camera with position, rotation, and projection parameters
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera looking down -Z
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Create camera looking at a target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);

        let rotation = Quat::from_mat3(&glam::Mat3::from_cols(right, up, -forward));

        Self {
            position,
            rotation,
            ..Self::new(position, 45.0, 16.0 / 9.0)
        }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get inverse view-projection matrix (for ray generation)
    pub fn view_projection_inverse(&self) -> Mat4 {
        self.view_projection().inverse()
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Update aspect ratio (call on viewport resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    /// Build a world-space ray through a pointer position.
    ///
    /// `screen` is in pixels with the origin at the top-left corner of a
    /// viewport of `viewport` pixels.
    pub fn screen_to_ray(&self, screen: Vec2, viewport: Vec2) -> Ray {
        let ndc_x = (screen.x / viewport.x) * 2.0 - 1.0;
        let ndc_y = -(screen.y / viewport.y) * 2.0 + 1.0;

        let inv = self.view_projection_inverse();
        // perspective_rh maps depth to [0, 1]
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        Ray::new(self.position, (far - near).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(Vec3::new(30.0, 40.0, 50.0), Vec3::ZERO, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_of_new_camera() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), 60.0, 1.0);
        let forward = camera.forward();
        assert!((forward.z - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_view_matrix_translation() {
        let mut camera = Camera::new(Vec3::ZERO, 60.0, 1.0);
        camera.position = Vec3::new(10.0, 0.0, 0.0);

        let view = camera.view_matrix();
        let origin_in_camera = view.transform_point3(Vec3::ZERO);
        assert!((origin_in_camera.x - (-10.0)).abs() < 0.001);
    }

    #[test]
    fn test_center_ray_follows_forward() {
        let camera = Camera::default();
        let ray = camera.screen_to_ray(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
        assert!((ray.direction - camera.forward()).length() < 0.001);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn test_top_left_ray_points_up_and_left() {
        let camera = Camera::new(Vec3::ZERO, 60.0, 1.0);
        let ray = camera.screen_to_ray(Vec2::ZERO, Vec2::new(100.0, 100.0));
        assert!(ray.direction.x < 0.0);
        assert!(ray.direction.y > 0.0);
        assert!(ray.direction.z < 0.0);
    }
}
