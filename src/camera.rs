//! Reference first-person camera that turns screen points into aiming rays

use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::touch::{Ray, RayPicker};

/// Perspective camera looking down -Z when yaw and pitch are zero
#[derive(Debug, Clone)]
pub struct PinholeCamera {
    pub position: Vec3,
    /// Degrees, positive turns left
    pub yaw: f32,
    /// Degrees, positive looks up
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    /// Surface size in logical pixels
    pub surface: Vec2,
}

impl PinholeCamera {
    pub fn new(surface: Vec2) -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 72.0,
            surface,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Applies a yaw delta and an absolute pitch, as reported by the overlay
    pub fn look(&mut self, yaw_change: f32, pitch: f32) {
        self.yaw = (self.yaw + yaw_change).rem_euclid(360.0);
        self.pitch = pitch.clamp(-89.9, 89.9);
    }

    pub fn resize(&mut self, surface: Vec2) {
        self.surface = surface;
    }

    fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        )
    }
}

impl RayPicker for PinholeCamera {
    fn ray_at(&self, screen: Vec2) -> Ray {
        let size = self.surface.max(Vec2::ONE);
        let ndc = Vec2::new(2.0 * screen.x / size.x - 1.0, 1.0 - 2.0 * screen.y / size.y);
        let tan_half = (self.fov_y.to_radians() / 2.0).tan();
        let aspect = size.x / size.y;

        let local = Vec3::new(ndc.x * aspect * tan_half, ndc.y * tan_half, -1.0);
        Ray::new(self.position, self.orientation() * local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_center_looks_forward() {
        let camera = PinholeCamera::new(Vec2::new(800.0, 600.0)).with_position(Vec3::Y);
        let ray = camera.ray_at(Vec2::new(400.0, 300.0));
        assert_eq!(ray.origin, Vec3::Y);
        assert!(close(ray.direction, Vec3::NEG_Z));
    }

    #[test]
    fn test_corner_follows_fov() {
        let camera = PinholeCamera::new(Vec2::new(600.0, 600.0)).with_fov(90.0);
        let ray = camera.ray_at(Vec2::new(600.0, 300.0));
        assert!(close(ray.direction, Vec3::new(1.0, 0.0, -1.0).normalize()));
    }

    #[test]
    fn test_yaw_turns_the_ray() {
        let mut camera = PinholeCamera::new(Vec2::new(800.0, 600.0));
        camera.look(90.0, 0.0);
        let ray = camera.ray_at(Vec2::new(400.0, 300.0));
        assert!(close(ray.direction, Vec3::NEG_X));
    }

    #[test]
    fn test_pitch_is_limited() {
        let mut camera = PinholeCamera::new(Vec2::new(800.0, 600.0));
        camera.look(-30.0, 180.0);
        assert_eq!(camera.pitch, 89.9);
        assert_eq!(camera.yaw, 330.0);
    }
}
