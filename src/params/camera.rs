//! Orbit camera configuration.

/// Orbit camera parameters (spherical coordinates around the cloud centre)
#[derive(Debug, Clone)]
pub struct OrbitCameraParams {
    /// Initial distance from the origin (world units)
    pub distance: f32,

    /// Closest allowed zoom (world units)
    pub min_distance: f32,

    /// Farthest allowed zoom (world units)
    pub max_distance: f32,

    /// Auto-rotation speed while idle
    /// 1.0 = one revolution per minute, 0.5 = one per two minutes
    pub auto_rotate_speed: f32,

    /// Drag sensitivity (radians per pixel)
    pub drag_radians_per_px: f32,

    /// Zoom factor per wheel line (fraction of current distance)
    pub zoom_step: f32,
}

impl Default for OrbitCameraParams {
    fn default() -> Self {
        Self {
            distance: 60.0,
            min_distance: 20.0,
            max_distance: 100.0,
            auto_rotate_speed: 0.5,
            drag_radians_per_px: 0.005,
            zoom_step: 0.05,
        }
    }
}

impl OrbitCameraParams {
    /// Auto-rotation rate (radians per second)
    pub fn auto_rotate_rad_per_s(&self) -> f32 {
        self.auto_rotate_speed * std::f32::consts::TAU / 60.0
    }
}
