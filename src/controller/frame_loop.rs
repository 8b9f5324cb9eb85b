use glam::{Mat4, Vec3};
use wgpu::Queue;

use crate::config::{NavigationConfig, SceneConfig};
use crate::controller::click_to_move::GlideStatus;
use crate::controller::input::InputEvent;
use crate::controller::navigation::{NavigationController, Viewport};
use crate::model::{Camera, Ground, NodeKind, Platform, Scene};
use crate::view::RenderState;

/// Longest frame step fed to the glide, in seconds
pub const MAX_FRAME_DT: f32 = 0.1;

// Keeps the marker disc off the surface it lies on
const MARKER_LIFT: f32 = 0.005;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub sun_dir: [f32; 3],
    pub sun_intensity: f32,
    pub ambient: f32,
    pub _pad1: f32,
    pub _pad2: f32,
    pub _pad3: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Seconds between two millisecond timestamps, clamped to [0, MAX_FRAME_DT].
pub fn frame_dt(now_ms: f64, last_ms: f64) -> f32 {
    (((now_ms - last_ms) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT)
}

/// Drawing-buffer size for a canvas that fills the window. Missing or
/// non-positive window dimensions fall back to 800x600.
pub fn canvas_size(inner_width: Option<f64>, inner_height: Option<f64>) -> (u32, u32) {
    let pick = |v: Option<f64>, fallback: u32| v.filter(|v| *v >= 1.0).map(|v| v as u32).unwrap_or(fallback);
    (pick(inner_width, 800), pick(inner_height, 600))
}

/// Everything one viewer session updates per frame: camera, scene and navigation.
pub struct FrameLoopContext {
    pub camera: Camera,
    pub scene: Scene,
    pub navigation: NavigationController,
    pub config: SceneConfig,
    pub last_status: GlideStatus,
}

impl FrameLoopContext {
    pub fn new(config: SceneConfig, navigation: NavigationConfig, width: u32, height: u32) -> Self {
        let mut camera = Camera::new(width, height);
        camera.eye = config.camera_eye;
        camera.fov_y = config.fov_y_degrees.to_radians();
        camera.z_near = config.z_near;
        camera.z_far = config.z_far;
        camera.set_yaw_pitch(0.0, config.camera_pitch);

        let platform = Platform::new(config.platform_center, config.platform_radius, config.platform_height);
        let scene = Scene::new(Ground::Platform(platform));

        let mut navigation = NavigationController::new(navigation);
        navigation.sync_from_camera(&camera);

        Self { camera, scene, navigation, config, last_status: GlideStatus::Idle }
    }

    pub fn handle_event(&mut self, event: &InputEvent, viewport: Viewport) {
        self.navigation.handle_event(event, &mut self.camera, &mut self.scene, viewport);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    /// Advance navigation by `dt` seconds and upload the resulting uniforms.
    pub fn update(&mut self, dt: f32, queue: &Queue, render_state: &mut RenderState) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.last_status = self.navigation.tick(dt, &mut self.camera, &mut self.scene);

        queue.write_buffer(&render_state.camera.camera_buffer, 0, bytemuck::bytes_of(&self.camera_uniform()));

        match self.marker_uniform() {
            Some(uniform) => {
                queue.write_buffer(&render_state.marker_node.buffer, 0, bytemuck::bytes_of(&uniform));
                render_state.show_marker = true;
            }
            None => render_state.show_marker = false,
        }
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        CameraUniform { view_proj: self.camera.view_proj().to_cols_array_2d() }
    }

    pub fn lighting_uniform(&self) -> LightingUniform {
        let sun_dir = self.config.sun_position.normalize_or_zero();
        LightingUniform {
            sun_dir: sun_dir.to_array(),
            sun_intensity: self.config.sun_intensity,
            ambient: self.config.ambient,
            _pad1: 0.0,
            _pad2: 0.0,
            _pad3: 0.0,
        }
    }

    pub fn platform_uniform(&self) -> NodeUniform {
        NodeUniform {
            model: Mat4::from_translation(self.config.platform_center).to_cols_array_2d(),
            color: self.config.platform_color,
        }
    }

    /// Transform for the click-to-move marker, if one is placed.
    pub fn marker_uniform(&self) -> Option<NodeUniform> {
        let node = self.scene.node(self.navigation.marker()?)?;
        let NodeKind::Marker { radius } = node.kind;
        let model = Mat4::from_translation(node.position + Vec3::Y * MARKER_LIFT)
            * Mat4::from_scale(Vec3::new(radius, 1.0, radius));
        Some(NodeUniform { model: model.to_cols_array_2d(), color: self.config.marker_color })
    }
}
