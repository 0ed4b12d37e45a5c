//! Orbit camera circling the particle cloud.

use glam::{Mat4, Vec3};

use crate::params::{OrbitCameraParams, RenderConfig};

/// Keep the camera this far (radians) from the poles so `look_at` stays defined
const POLE_MARGIN: f32 = 0.01;

/// Orbit camera in spherical coordinates around the origin
pub struct OrbitCamera {
    params: OrbitCameraParams,

    /// Angle around the Y axis (radians)
    azimuth: f32,

    /// Angle from the +Y axis (radians), in (0, π)
    polar: f32,

    /// Distance from the origin (world units)
    distance: f32,
}

impl OrbitCamera {
    /// Start on the +Z axis at the configured distance, level with the cloud
    pub fn new(params: OrbitCameraParams) -> Self {
        let distance = params
            .distance
            .clamp(params.min_distance, params.max_distance);
        Self {
            params,
            azimuth: 0.0,
            polar: std::f32::consts::FRAC_PI_2,
            distance,
        }
    }

    /// Advance auto-rotation; only idles spin the view
    pub fn update(&mut self, dt_s: f32, listening: bool) {
        if !listening {
            self.azimuth += self.params.auto_rotate_rad_per_s() * dt_s;
        }
    }

    /// Orbit by a mouse drag (pixels)
    pub fn drag(&mut self, dx_px: f32, dy_px: f32) {
        let k = self.params.drag_radians_per_px;
        self.azimuth -= dx_px * k;
        self.polar = (self.polar - dy_px * k).clamp(POLE_MARGIN, std::f32::consts::PI - POLE_MARGIN);
    }

    /// Zoom by wheel lines (positive = closer)
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - self.params.zoom_step).powf(lines);
        self.distance =
            (self.distance * factor).clamp(self.params.min_distance, self.params.max_distance);
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Camera position in world space
    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        Vec3::new(
            self.distance * sin_polar * sin_az,
            self.distance * cos_polar,
            self.distance * sin_polar * cos_az,
        )
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        let eye = self.eye();
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );
        (proj * view, eye)
    }
}
