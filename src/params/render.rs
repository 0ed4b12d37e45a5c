//! Rendering and post-processing configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    /// Comfortably beyond max zoom + outer shell radius
    pub far_plane: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Bloom parameter selector for interactive adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloomParam {
    Intensity,
    Threshold,
    Radius,
}

impl BloomParam {
    /// Allowed range and step size for this parameter
    pub fn range_and_step(self) -> (f32, f32, f32) {
        match self {
            Self::Intensity => (0.0, 5.0, 0.1),
            Self::Threshold => (0.0, 1.0, 0.05),
            Self::Radius => (0.0, 1.5, 0.05),
        }
    }
}

/// Bloom post-processing parameters (consumed only by the render backend)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomConfig {
    /// Glow strength added on top of the scene
    pub intensity: f32,

    /// Luminance above which pixels start to glow
    pub threshold: f32,

    /// Spread of the glow (fraction of the maximum blur footprint)
    pub radius: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            intensity: 1.5,
            threshold: 0.6,
            radius: 0.6,
        }
    }
}

impl BloomConfig {
    pub fn get(&self, param: BloomParam) -> f32 {
        match param {
            BloomParam::Intensity => self.intensity,
            BloomParam::Threshold => self.threshold,
            BloomParam::Radius => self.radius,
        }
    }

    /// Set a parameter, clamped to its allowed range
    pub fn set(&mut self, param: BloomParam, value: f32) {
        let (min, max, _) = param.range_and_step();
        let value = value.clamp(min, max);
        match param {
            BloomParam::Intensity => self.intensity = value,
            BloomParam::Threshold => self.threshold = value,
            BloomParam::Radius => self.radius = value,
        }
    }

    /// Move a parameter by a number of slider steps (negative = down)
    pub fn step(&mut self, param: BloomParam, steps: i32) -> f32 {
        let (_, _, step) = param.range_and_step();
        let raw = self.get(param) + step * steps as f32;
        // Snap to the step grid so repeated presses don't accumulate float error
        self.set(param, (raw / step).round() * step);
        self.get(param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bloom_defaults() {
        let bloom = BloomConfig::default();
        assert_eq!(bloom.intensity, 1.5);
        assert_eq!(bloom.threshold, 0.6);
        assert_eq!(bloom.radius, 0.6);
    }

    #[test]
    fn test_bloom_step_clamps_to_range() {
        let mut bloom = BloomConfig::default();

        for _ in 0..100 {
            bloom.step(BloomParam::Intensity, 1);
        }
        assert!((bloom.intensity - 5.0).abs() < 1e-5);

        for _ in 0..100 {
            bloom.step(BloomParam::Threshold, -1);
        }
        assert_eq!(bloom.threshold, 0.0);
    }

    #[test]
    fn test_bloom_step_moves_by_slider_step() {
        let mut bloom = BloomConfig::default();
        let radius = bloom.step(BloomParam::Radius, 2);
        assert!((radius - 0.7).abs() < 1e-5);

        let intensity = bloom.step(BloomParam::Intensity, -3);
        assert!((intensity - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_bloom_set_clamps() {
        let mut bloom = BloomConfig::default();
        bloom.set(BloomParam::Radius, 9.0);
        assert_eq!(bloom.radius, 1.5);
        bloom.set(BloomParam::Threshold, -1.0);
        assert_eq!(bloom.threshold, 0.0);
    }

    #[test]
    fn test_aspect_ratio() {
        let config = RenderConfig::default();
        assert!((config.aspect_ratio() - 16.0 / 9.0).abs() < 1e-5);
    }
}
