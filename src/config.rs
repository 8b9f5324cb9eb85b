use glam::Vec3;

/// How the click-to-move glide closes the gap to its target each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// Fixed lerp factor per tick; apparent speed follows the frame rate.
    PerTick { step: f32 },
    /// Same decay as `step` at `reference_hz`, scaled by elapsed time.
    TimeConstant { step: f32, reference_hz: f32 },
}

impl Smoothing {
    /// Lerp factor in [0, 1] for a frame that took `dt` seconds.
    pub fn factor(&self, dt: f32) -> f32 {
        match *self {
            Smoothing::PerTick { step } => step.clamp(0.0, 1.0),
            Smoothing::TimeConstant { step, reference_hz } => {
                let frames = (dt.max(0.0) * reference_hz).max(0.0);
                let keep = (1.0 - step.clamp(0.0, 1.0)).powf(frames);
                (1.0 - keep).clamp(0.0, 1.0)
            }
        }
    }
}

/// Tunables for the navigation controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationConfig {
    /// Pointer travel (pixels, either axis) before a drag counts as a rotation
    pub rotate_threshold: f32,
    /// Radians per pixel of drag
    pub rotate_sensitivity: f32,
    /// Distance at which a glide is considered arrived
    pub arrive_epsilon: f32,
    /// Camera height used for click-to-move targets
    pub glide_height: f32,
    pub smoothing: Smoothing,
    /// Height above the hit point after a teleport
    pub eye_height: f32,
    pub marker_radius: f32,
}

impl NavigationConfig {
    /// Mouse-driven viewer: orbit drag plus click-to-move.
    pub fn desktop() -> Self {
        Self {
            rotate_threshold: 5.0,
            rotate_sensitivity: 0.002,
            arrive_epsilon: 0.1,
            glide_height: 2.0,
            smoothing: Smoothing::TimeConstant { step: 0.05, reference_hz: 60.0 },
            eye_height: 1.6,
            marker_radius: 0.2,
        }
    }

    /// Headset viewer: controller teleport at standing eye height.
    pub fn immersive() -> Self {
        Self {
            glide_height: 1.6,
            ..Self::desktop()
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

/// Static scene layout for the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub background: [f64; 3],
    pub camera_eye: Vec3,
    pub camera_pitch: f32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub platform_radius: f32,
    pub platform_height: f32,
    pub platform_segments: u32,
    pub platform_center: Vec3,
    pub platform_color: [f32; 4],
    pub marker_color: [f32; 4],
    pub ambient: f32,
    pub sun_position: Vec3,
    pub sun_intensity: f32,
}

impl SceneConfig {
    /// Hex RGB (0xRRGGBB) to normalized components.
    pub fn rgb(hex: u32) -> [f32; 3] {
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        ]
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let bg = Self::rgb(0x202020);
        let platform = Self::rgb(0x333333);
        Self {
            background: [bg[0] as f64, bg[1] as f64, bg[2] as f64],
            camera_eye: Vec3::new(0.0, 2.0, 5.0),
            camera_pitch: -0.35,
            fov_y_degrees: 75.0,
            z_near: 0.1,
            z_far: 100.0,
            platform_radius: 2.0,
            platform_height: 0.2,
            platform_segments: 32,
            platform_center: Vec3::ZERO,
            platform_color: [platform[0], platform[1], platform[2], 1.0],
            marker_color: [0.2, 0.9, 0.4, 1.0],
            ambient: 0.5,
            sun_position: Vec3::new(5.0, 10.0, 5.0),
            sun_intensity: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_tick_ignores_elapsed_time() {
        let s = Smoothing::PerTick { step: 0.05 };
        assert_eq!(s.factor(0.0), 0.05);
        assert_eq!(s.factor(1.0), 0.05);
    }

    #[test]
    fn time_constant_matches_step_at_reference_rate() {
        let s = Smoothing::TimeConstant { step: 0.05, reference_hz: 60.0 };
        let f = s.factor(1.0 / 60.0);
        assert!((f - 0.05).abs() < 1e-4, "one reference frame should give the base step, got {f}");
    }

    #[test]
    fn time_constant_is_frame_rate_independent() {
        let s = Smoothing::TimeConstant { step: 0.05, reference_hz: 60.0 };
        // two 120 Hz frames keep the same fraction as one 60 Hz frame
        let keep_fast = (1.0 - s.factor(1.0 / 120.0)).powi(2);
        let keep_slow = 1.0 - s.factor(1.0 / 60.0);
        assert!((keep_fast - keep_slow).abs() < 1e-5);
        assert_eq!(s.factor(0.0), 0.0);
        assert_eq!(s.factor(-1.0), 0.0);
    }

    #[test]
    fn presets_share_gesture_tuning() {
        let desktop = NavigationConfig::desktop();
        let immersive = NavigationConfig::immersive();
        assert_eq!(desktop.rotate_threshold, 5.0);
        assert_eq!(desktop.glide_height, 2.0);
        assert_eq!(immersive.eye_height, 1.6);
        assert_eq!(immersive.rotate_sensitivity, desktop.rotate_sensitivity);
    }

    #[test]
    fn hex_colors_convert() {
        assert_eq!(SceneConfig::rgb(0xff0000), [1.0, 0.0, 0.0]);
        let c = SceneConfig::rgb(0x202020);
        assert!((c[0] - 32.0 / 255.0).abs() < f32::EPSILON);
    }
}
