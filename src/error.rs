use thiserror::Error;

/// Failures while bringing up the viewer host. Navigation itself never fails.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("dom: {0}")]
    Dom(String),
}

#[cfg(target_arch = "wasm32")]
impl From<ViewerError> for wasm_bindgen::JsValue {
    fn from(err: ViewerError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
