use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use super::ray::Ray;

/// Perspective camera. Looks down -Z at identity orientation, Y up.
pub struct Camera {
    pub eye: Vec3,
    pub orientation: Quat,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 5.0),
            orientation: Quat::IDENTITY,
            fov_y: 75f32.to_radians(),
            aspect: aspect_ratio(width, height),
            z_near: 0.1,
            z_far: 100.0,
        }
    }

    /// Yaw about world Y, then pitch about the local X axis. No roll.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.orientation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
    }

    pub fn yaw_pitch(&self) -> (f32, f32) {
        let (yaw, pitch, _roll) = self.orientation.to_euler(EulerRot::YXZ);
        (yaw, pitch)
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.eye).inverse()
    }

    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.proj() * self.view()
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Option<Ray> {
        if !ndc.is_finite() {
            return None;
        }
        let inv = self.view_proj().inverse();
        let through = inv.project_point3(ndc.extend(0.5));
        Ray::new(self.eye, through - self.eye)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Pixel coordinates to NDC: x right in [-1, 1], y up in [-1, 1].
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    let ndc = Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0);
    ndc.is_finite().then_some(ndc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_looks_down_negative_z() {
        let cam = Camera::new(800, 600);
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn yaw_then_pitch_has_no_roll() {
        let mut cam = Camera::new(800, 600);
        cam.set_yaw_pitch(FRAC_PI_2, 0.0);
        assert!((cam.forward() - Vec3::NEG_X).length() < 1e-5, "yaw left faces -X");

        cam.set_yaw_pitch(0.7, -0.4);
        let right = cam.orientation * Vec3::X;
        assert!(right.y.abs() < 1e-5, "right vector stays horizontal");
        let (yaw, pitch) = cam.yaw_pitch();
        assert!((yaw - 0.7).abs() < 1e-4 && (pitch + 0.4).abs() < 1e-4);
    }

    #[test]
    fn center_ray_follows_forward() {
        let mut cam = Camera::new(640, 480);
        cam.set_yaw_pitch(0.3, -0.2);
        let ray = cam.ray_through_ndc(Vec2::ZERO).unwrap();
        assert_eq!(ray.origin, cam.eye);
        assert!((ray.direction - cam.forward()).length() < 1e-4);
    }

    #[test]
    fn ndc_conversion_flips_y() {
        assert_eq!(screen_to_ndc(0.0, 0.0, 200.0, 100.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(screen_to_ndc(100.0, 50.0, 200.0, 100.0), Some(Vec2::ZERO));
        assert_eq!(screen_to_ndc(200.0, 100.0, 200.0, 100.0), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(screen_to_ndc(10.0, 10.0, 0.0, 100.0), None);
        assert_eq!(screen_to_ndc(f32::NAN, 10.0, 100.0, 100.0), None);
    }

    #[test]
    fn offscreen_pixels_still_produce_rays() {
        let cam = Camera::new(100, 100);
        let ndc = screen_to_ndc(-500.0, 900.0, 100.0, 100.0).unwrap();
        assert!(cam.ray_through_ndc(ndc).is_some());
    }
}
