use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::PhysicalKey,
    window::Window,
};

// Import from the library crate
use glidenav::{config, controller, logging, ui, view};

use config::{NavigationConfig, SceneConfig};
use controller::input::native as native_input;
use controller::{FrameLoopContext, InputEvent, NavigationController, Viewport};
use view::gpu_init::{self, GpuContext};
use view::RenderState;

struct App {
    window: Arc<Window>,
    gpu: GpuContext,
    size: winit::dpi::PhysicalSize<u32>,
    render_state: RenderState,
    frame: FrameLoopContext,

    // egui
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,

    // Last cursor position in physical pixels
    cursor: (f32, f32),
    primary_held: bool,

    // Frame timing
    last_frame_time: Instant,
    fps: f32,
    frame_count: u32,
    fps_timer: f32,
}

impl App {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = gpu_init::create_instance();
        let surface = instance.create_surface(window.clone())?;
        let gpu = GpuContext::new_native(&instance, surface, size.width, size.height).await?;

        let frame = FrameLoopContext::new(
            SceneConfig::default(),
            NavigationConfig::desktop(),
            gpu.config.width,
            gpu.config.height,
        );
        let render_state = RenderState::new(&gpu.device, &gpu.queue, &gpu.config, &frame);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        info!(width = size.width, height = size.height, "viewer ready");

        Ok(Self {
            window,
            gpu,
            size,
            render_state,
            frame,
            egui_state,
            egui_ctx,
            cursor: (0.0, 0.0),
            primary_held: false,
            last_frame_time: Instant::now(),
            fps: 0.0,
            frame_count: 0,
            fps_timer: 0.0,
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.size.width, self.size.height)
    }

    fn dispatch(&mut self, event: InputEvent) {
        let viewport = self.viewport();
        self.frame.handle_event(&event, viewport);
    }

    /// Returns true when the event was consumed.
    fn input(&mut self, event: &WindowEvent) -> bool {
        // First let egui process the event
        let egui_captured = self.egui_state.on_window_event(self.window.as_ref(), event).consumed;

        if let WindowEvent::MouseInput { state, button, .. } = event {
            self.primary_held = native_input::track_primary(self.primary_held, *state, *button);
        }

        match event {
            // the gesture must still see the move after egui takes the pointer
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                let (x, y) = self.cursor;
                self.dispatch(InputEvent::PointerMove { x, y, primary_held: self.primary_held });
                egui_captured
            }
            // releases always end the gesture, even over the HUD
            WindowEvent::MouseInput { state: ElementState::Released, button, .. } => {
                if let Some(event) = native_input::mouse_input_to_input(ElementState::Released, *button, self.cursor) {
                    self.dispatch(event);
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.primary_held = false;
                self.dispatch(InputEvent::FocusLost);
                egui_captured
            }
            _ if egui_captured => true,
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) = native_input::mouse_input_to_input(*state, *button, self.cursor) {
                    self.dispatch(event);
                }
                true
            }
            WindowEvent::KeyboardInput { event: KeyEvent { state, physical_key, repeat: false, .. }, .. } => {
                if let PhysicalKey::Code(code) = physical_key {
                    let pose = NavigationController::camera_pose(&self.frame.camera);
                    if let Some(event) = native_input::key_to_input(*code, *state, pose) {
                        self.dispatch(event);
                    }
                }
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.render_state.resize(&self.gpu.device, &self.gpu.surface, new_size.width, new_size.height);
            self.frame.resize(new_size.width, new_size.height);
        }
    }

    fn update(&mut self, dt: f32) {
        // Update FPS
        self.frame_count += 1;
        self.fps_timer += dt;
        if self.fps_timer >= 1.0 {
            self.fps = self.frame_count as f32 / self.fps_timer;
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }

        self.frame.update(dt, &self.gpu.queue, &mut self.render_state);
    }

    fn render_ui(&mut self) {
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let fps = self.fps;
        let frame = &self.frame;
        let output = self.egui_ctx.run(raw_input, |ctx| ui::draw_hud(ctx, frame, fps));

        self.egui_state.handle_platform_output(&self.window, output.platform_output);
        let dpr = self.window.scale_factor() as f32;
        let primitives = self.egui_ctx.tessellate(output.shapes, dpr);
        self.render_state.set_ui(primitives, output.textures_delta, dpr);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.render_ui();
        self.render_state.draw_frame(&self.gpu.device, &self.gpu.queue, &self.gpu.surface)
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title("glidenav")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let mut app = pollster::block_on(App::new(window))?;

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            let now = Instant::now();
                            let dt = (now - app.last_frame_time).as_secs_f32();
                            app.last_frame_time = now;

                            app.update(dt);

                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => app.resize(app.size),
                                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                Err(e) => warn!("frame dropped: {e:?}"),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
