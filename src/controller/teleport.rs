use glam::Vec3;
use tracing::{debug, trace};

use crate::model::{Camera, GroundSurface, Ray, Scene};

use super::input::ControllerPose;

/// Instant reposition to where a tracked controller points.
pub struct Teleport {
    pub eye_height: f32,
}

impl Teleport {
    pub fn new(eye_height: f32) -> Self {
        Self { eye_height }
    }

    /// Returns the new eye position, or `None` if the controller ray missed the ground.
    pub fn on_select_start(&self, pose: &ControllerPose, camera: &mut Camera, scene: &Scene) -> Option<Vec3> {
        let ray = Ray::new(pose.position, pose.forward)?;
        let Some(hit) = scene.ground.first_hit(&ray) else {
            trace!(position = ?pose.position, "teleport ray missed the ground");
            return None;
        };
        camera.eye = hit.point + Vec3::Y * self.eye_height;
        debug!(eye = ?camera.eye, "teleported");
        Some(camera.eye)
    }

    pub fn on_select_end(&self, pose: &ControllerPose) {
        trace!(position = ?pose.position, "select end");
    }
}
