/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Perspective camera at the origin looking down -Z.
///
/// The scene is pushed `distance` units away from the eye before projecting.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_aspect(width as f32 / height.max(1) as f32)
    }

    pub fn with_aspect(aspect: f32) -> Self {
        Self {
            distance: 20.0,
            fov: 60f32.to_radians(),
            aspect,
            near: 2.0,
            far: 50.0,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(0.0, 0.0, -self.distance))
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `None` for points outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix();
        let clip = mvp * point.to_homogeneous();

        // Behind the eye or on the eye plane
        if clip.w < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.iter().any(|v| !(-1.0..=1.0).contains(v)) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
