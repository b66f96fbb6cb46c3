//! Perspective camera, viewport mapping and picking rays.

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Screen rectangle the scene is drawn into, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Viewport anchored at the window origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Width over height, 1.0 for degenerate sizes.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Maps client coordinates to normalized device coordinates.
    ///
    /// The top-left corner of the viewport is (-1, 1) and the bottom-right
    /// corner is (1, -1).
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> Vec2 {
        let w = self.width.max(f32::EPSILON);
        let h = self.height.max(f32::EPSILON);
        Vec2::new(
            ((client_x - self.left) / w) * 2.0 - 1.0,
            -((client_y - self.top) / h) * 2.0 + 1.0,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Y-up perspective camera looking at a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Width over height.
    pub aspect: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a camera from configuration defaults.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: Vec3::from(config.position),
            target: Vec3::from(config.target),
            up: Vec3::Y,
            fov: config.fov_degrees.to_radians(),
            aspect,
            near: config.near_plane,
            far: config.far_plane,
        }
    }

    /// Updates aspect ratio.
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Returns the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Builds the world-space ray through a point in normalized device
    /// coordinates, starting on the near plane.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv_view_proj = (self.projection_matrix() * self.view_matrix()).inverse();

        // glam's perspective_rh maps depth to [0, 1]
        let near = inv_view_proj * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Ray::new(near, far - near)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), Viewport::default().aspect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ndc_corners() {
        let vp = Viewport {
            left: 10.0,
            top: 20.0,
            width: 200.0,
            height: 100.0,
        };
        assert_eq!(vp.to_ndc(10.0, 20.0), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(210.0, 120.0), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(110.0, 70.0), Vec2::ZERO);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 60f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        };
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert_relative_eq!(ray.direction.z, -1.0, epsilon = 1e-4);
        assert_relative_eq!(ray.origin.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(ray.origin.z, 9.9, epsilon = 1e-3);
    }

    #[test]
    fn test_offset_ray_leans_right() {
        let camera = Camera {
            position: Vec3::new(0.0, 0.0, 10.0),
            ..Camera::default()
        };
        let camera = Camera {
            target: Vec3::ZERO,
            ..camera
        };
        let ray = camera.ray_from_ndc(Vec2::new(0.5, 0.0));
        assert!(ray.direction.x > 0.0);
        assert_relative_eq!(ray.direction.length(), 1.0, epsilon = 1e-5);
    }
}
