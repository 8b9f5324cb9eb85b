use glam::Vec2;
use tracing::debug;

use crate::config::NavigationConfig;
use crate::model::{Camera, NodeId, Scene};

use super::click_to_move::{ClickToMove, GlideStatus, NavigationTarget};
use super::drag::{DragState, GestureEnd};
use super::input::{ControllerPose, InputEvent, PointerButton};
use super::orbit::OrbitRotation;
use super::teleport::Teleport;

/// Size of the surface pointer coordinates are measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width: width as f32, height: height as f32 }
    }
}

/// Owns every piece of navigation state for one viewing session.
///
/// Input handlers and [`tick`](Self::tick) are expected to run on the same thread,
/// one after another, the way a host event loop calls them.
pub struct NavigationController {
    config: NavigationConfig,
    drag: DragState,
    orbit: OrbitRotation,
    click_to_move: ClickToMove,
    teleport: Teleport,
}

impl NavigationController {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            drag: DragState::Idle,
            orbit: OrbitRotation::new(config.rotate_sensitivity),
            click_to_move: ClickToMove::new(&config),
            teleport: Teleport::new(config.eye_height),
            config,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn orientation(&self) -> &OrbitRotation {
        &self.orbit
    }

    pub fn target(&self) -> Option<NavigationTarget> {
        self.click_to_move.target()
    }

    pub fn is_animating(&self) -> bool {
        self.click_to_move.is_animating()
    }

    pub fn marker(&self) -> Option<NodeId> {
        self.click_to_move.marker()
    }

    /// Seed yaw/pitch from wherever the camera currently points.
    pub fn sync_from_camera(&mut self, camera: &Camera) {
        self.orbit.sync_from(camera);
    }

    pub fn handle_event(&mut self, event: &InputEvent, camera: &mut Camera, scene: &mut Scene, viewport: Viewport) {
        match *event {
            InputEvent::PointerDown { button: PointerButton::Primary, x, y } => {
                self.drag.press(Vec2::new(x, y));
            }
            InputEvent::PointerMove { primary_held: false, .. } if self.drag.is_active() => {
                // the release happened somewhere we never heard about
                debug!("pointer moved with no button held, gesture dropped");
                self.drag.reset();
            }
            InputEvent::PointerMove { x, y, .. } => {
                if let Some(delta) = self.drag.motion(Vec2::new(x, y), self.config.rotate_threshold) {
                    self.orbit.apply_drag(camera, delta);
                }
            }
            InputEvent::PointerUp { button: PointerButton::Primary, x, y } => {
                if self.drag.release() == GestureEnd::Click {
                    self.click_to_move.on_click(Vec2::new(x, y), viewport, camera, scene);
                }
            }
            InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. } => {}
            InputEvent::SelectStart(pose) => {
                if self.teleport.on_select_start(&pose, camera, scene).is_some() {
                    // a glide still in flight would pull the camera off the teleport spot
                    self.click_to_move.clear(scene);
                }
            }
            InputEvent::SelectEnd(pose) => self.teleport.on_select_end(&pose),
            InputEvent::CancelNavigation => {
                if self.click_to_move.is_animating() {
                    debug!("glide cancelled");
                }
                self.click_to_move.clear(scene);
            }
            InputEvent::FocusLost => self.drag.reset(),
        }
    }

    /// Once per rendered frame.
    pub fn tick(&mut self, dt: f32, camera: &mut Camera, scene: &mut Scene) -> GlideStatus {
        self.click_to_move.tick(dt, camera, scene)
    }

    /// Pose for a controller held at the camera, pointing where the camera looks.
    pub fn camera_pose(camera: &Camera) -> ControllerPose {
        ControllerPose { position: camera.eye, forward: camera.forward() }
    }
}
