// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

#[cfg(target_arch = "wasm32")]
pub use web::start;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tracing::{error, info, warn};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{Document, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use crate::config::{NavigationConfig, SceneConfig};
    use crate::controller::frame_loop::{canvas_size, frame_dt};
    use crate::controller::input::{self, InputEvent};
    use crate::controller::{FrameLoopContext, Viewport};
    use crate::error::ViewerError;
    use crate::logging;
    use crate::ui;
    use crate::view::{GpuContext, RenderState};

    #[wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        logging::init();
        let (window, document, canvas) = init_canvas()?;
        setup_app(&window, &document, &canvas).await?;
        Ok(())
    }

    /// Main application setup for WASM
    async fn setup_app(window: &Window, document: &Document, canvas: &HtmlCanvasElement) -> Result<(), ViewerError> {
        let gpu = GpuContext::new(canvas, canvas.width(), canvas.height()).await?;
        let width = gpu.config.width;
        let height = gpu.config.height;

        let frame = FrameLoopContext::new(SceneConfig::default(), NavigationConfig::desktop(), width, height);
        let mut render_state = RenderState::new(gpu.device.as_ref(), gpu.queue.as_ref(), &gpu.config, &frame);
        let frame = Rc::new(RefCell::new(frame));

        setup_input_listeners(document, window, canvas, frame.clone()).map_err(dom_error)?;
        info!(width, height, "viewer ready");

        let egui_ctx = egui::Context::default();
        let performance = window.performance();
        let now = move || performance.as_ref().map(|p| p.now()).unwrap_or(0.0);
        let mut last_time = now();

        // Continuous redraw using requestAnimationFrame
        let f = RcCellCallback::new(window.clone(), {
            let window = window.clone();
            let canvas = canvas.clone();

            move || {
                let t = now();
                let dt = frame_dt(t, last_time);
                last_time = t;

                let mut frame = frame.borrow_mut();

                // Canvas follows the window
                let (nw, nh) = window_size(&window);
                if nw != render_state.width || nh != render_state.height {
                    canvas.set_width(nw);
                    canvas.set_height(nh);
                    render_state.resize(gpu.device.as_ref(), &gpu.surface, nw, nh);
                    frame.resize(nw, nh);
                }

                frame.update(dt, gpu.queue.as_ref(), &mut render_state);

                let dpr = window.device_pixel_ratio() as f32;
                let mut output = ui::build_ui(&egui_ctx, &frame, render_state.width, render_state.height, dpr, dt, t);
                let primitives = egui_ctx.tessellate(std::mem::take(&mut output.shapes), dpr);
                render_state.set_ui(primitives, output.textures_delta, dpr);

                match render_state.draw_frame(gpu.device.as_ref(), gpu.queue.as_ref(), &gpu.surface) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.surface.configure(gpu.device.as_ref(), &render_state.surface_config());
                    }
                    Err(e) => warn!("frame dropped: {e:?}"),
                }
            }
        });
        f.start().map_err(dom_error)?;

        Ok(())
    }

    fn window_size(window: &Window) -> (u32, u32) {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
        canvas_size(read(window.inner_width()), read(window.inner_height()))
    }

    /// Pointer size in canvas pixels for the current layout.
    fn viewport(canvas: &HtmlCanvasElement) -> Viewport {
        Viewport::new(canvas.client_width().max(0) as u32, canvas.client_height().max(0) as u32)
    }

    fn listen<E, F>(target: &web_sys::EventTarget, kind: &str, mut handler: F) -> Result<(), JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |e: Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                handler(e);
            }
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_listeners(
        document: &Document,
        window: &Window,
        canvas: &HtmlCanvasElement,
        frame: Rc<RefCell<FrameLoopContext>>,
    ) -> Result<(), JsValue> {
        let dispatch = {
            let canvas = canvas.clone();
            move |event: InputEvent| {
                let viewport = viewport(&canvas);
                frame.borrow_mut().handle_event(&event, viewport);
            }
        };
        let dispatch = Rc::new(dispatch);

        // Presses start on the canvas; moves and releases are tracked on the document
        // so a drag that leaves the canvas still ends.
        {
            let dispatch = dispatch.clone();
            let surface = canvas.clone();
            listen(canvas, "mousedown", move |e: MouseEvent| {
                dispatch(input::wasm::mouse_down_to_input(&e, &surface));
                e.prevent_default();
            })?;
        }
        {
            let dispatch = dispatch.clone();
            let surface = canvas.clone();
            listen(document, "mousemove", move |e: MouseEvent| {
                dispatch(input::wasm::mouse_move_to_input(&e, &surface))
            })?;
        }
        {
            let dispatch = dispatch.clone();
            let surface = canvas.clone();
            listen(document, "mouseup", move |e: MouseEvent| dispatch(input::wasm::mouse_up_to_input(&e, &surface)))?;
        }
        {
            let dispatch = dispatch.clone();
            listen(document, "keydown", move |e: KeyboardEvent| {
                if let Some(event) = input::wasm::key_down_to_input(&e) {
                    dispatch(event);
                    e.prevent_default();
                }
            })?;
        }
        // Focus loss - abort any gesture in progress
        listen(window, "blur", move |_: Event| dispatch(InputEvent::FocusLost))?;
        listen(canvas, "contextmenu", |e: MouseEvent| e.prevent_default())?;

        Ok(())
    }

    fn init_canvas() -> Result<(Window, Document, HtmlCanvasElement), JsValue> {
        let window = web_sys::window().ok_or(js_error("no global `window`"))?;
        let (width, height) = window_size(&window);
        let document = window.document().ok_or(js_error("no document on window"))?;
        let body = document.body().ok_or(js_error("no body on document"))?;
        let canvas_el = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error("failed to create canvas"))?;
        canvas_el.set_width(width);
        canvas_el.set_height(height);
        // Full-window canvas without scrollbars
        body.set_attribute("style", "margin: 0; overflow: hidden")?;
        canvas_el.set_attribute("style", "display: block")?;
        body.append_child(&canvas_el)?;
        Ok((window, document, canvas_el))
    }

    fn js_error<E: Into<String>>(msg: E) -> JsValue {
        JsValue::from_str(&msg.into())
    }

    fn dom_error(err: JsValue) -> ViewerError {
        ViewerError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }

    struct RcCellCallback {
        inner: Rc<RefCell<Box<dyn FnMut()>>>,
        window: Window,
    }

    impl RcCellCallback {
        fn new(window: Window, f: impl FnMut() + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Box::new(f))),
                window,
            }
        }

        fn start(self) -> Result<(), JsValue> {
            let inner = self.inner.clone();
            let window = self.window.clone();

            let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
            let callback_clone = callback.clone();

            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                inner.borrow_mut().as_mut()();

                // Recursively schedule next frame
                if let Some(cb) = callback_clone.borrow().as_ref() {
                    if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        error!("requestAnimationFrame failed: {e:?}");
                    }
                }
            }) as Box<dyn FnMut()>));

            if let Some(cb) = callback.borrow().as_ref() {
                self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            }

            // Leak the closure to keep it alive
            std::mem::forget(callback);
            Ok(())
        }
    }
}
