use egui::{Context, RichText};

use crate::controller::{DragState, FrameLoopContext, GlideStatus};

/// Build the HUD from a synthetic screen-sized input (WASM has no egui platform layer).
pub fn build_ui(
    egui_ctx: &Context,
    frame: &FrameLoopContext,
    canvas_width: u32,
    canvas_height: u32,
    dpr: f32,
    dt: f32,
    now: f64,
) -> egui::FullOutput {
    let mut raw_input = egui::RawInput::default();
    raw_input.time = Some(now / 1000.0);
    raw_input.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(canvas_width as f32 / dpr, canvas_height as f32 / dpr),
    ));
    egui_ctx.set_pixels_per_point(dpr);

    let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
    egui_ctx.run(raw_input, |ctx| draw_hud(ctx, frame, fps))
}

fn drag_label(drag: DragState) -> &'static str {
    match drag {
        DragState::Idle => "idle",
        DragState::Pending { .. } => "pressed",
        DragState::Rotating { .. } => "rotating",
    }
}

fn glide_label(status: GlideStatus) -> &'static str {
    match status {
        GlideStatus::Idle => "idle",
        GlideStatus::Gliding => "gliding",
        GlideStatus::Arrived => "arrived",
    }
}

pub fn draw_hud(ctx: &Context, frame: &FrameLoopContext, fps: f32) {
    let nav = &frame.navigation;
    let eye = frame.camera.eye;
    let orbit = nav.orientation();

    egui::Window::new("Navigation")
        .default_pos([8.0, 8.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(format!("FPS: {fps:.0}")).small());
            ui.label(RichText::new(format!("Eye: {:.2}, {:.2}, {:.2}", eye.x, eye.y, eye.z)).small());
            ui.label(
                RichText::new(format!("Yaw: {:.1} Pitch: {:.1}", orbit.yaw.to_degrees(), orbit.pitch.to_degrees()))
                    .small(),
            );
            ui.label(RichText::new(format!("Drag: {}", drag_label(nav.drag_state()))).small());
            match nav.target() {
                Some(target) => {
                    let p = target.position;
                    ui.label(RichText::new(format!("Target: {:.2}, {:.2}, {:.2}", p.x, p.y, p.z)).small());
                }
                None => {
                    ui.label(RichText::new("Target: none").small());
                }
            }
            ui.label(RichText::new(format!("Glide: {}", glide_label(frame.last_status))).small());
            ui.label(RichText::new(format!("Markers: {}", frame.scene.markers().count())).small());
            ui.separator();
            ui.label(RichText::new("Controls:").small());
            ui.label(RichText::new("Drag - Look around").small());
            ui.label(RichText::new("Click - Move to point").small());
            ui.label(RichText::new("Esc - Cancel move").small());
            #[cfg(not(target_arch = "wasm32"))]
            ui.label(RichText::new("T - Teleport along view").small());
        });
}
