use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use crate::model::Camera;

/// Camera orientation accumulated from drag deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRotation {
    pub yaw: f32,
    pub pitch: f32,
    pub sensitivity: f32,
}

impl OrbitRotation {
    pub fn new(sensitivity: f32) -> Self {
        Self { yaw: 0.0, pitch: 0.0, sensitivity }
    }

    pub fn sync_from(&mut self, camera: &Camera) {
        let (yaw, pitch) = camera.yaw_pitch();
        self.yaw = yaw;
        self.pitch = pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Dragging right turns left, dragging down tilts the view down.
    pub fn apply_drag(&mut self, camera: &mut Camera, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch = (self.pitch - delta.y * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
        camera.set_yaw_pitch(self.yaw, self.pitch);
    }
}
