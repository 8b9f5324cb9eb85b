// CONTROLLER: input, navigation and the per-frame update
pub mod click_to_move;
pub mod drag;
pub mod frame_loop;
pub mod input;
pub mod navigation;
pub mod orbit;
pub mod teleport;

pub use click_to_move::{ClickToMove, GlideStatus, NavigationTarget};
pub use drag::{DragState, GestureEnd};
pub use frame_loop::{CameraUniform, FrameLoopContext, LightingUniform, NodeUniform};
pub use input::{ControllerPose, InputEvent, PointerButton};
pub use navigation::{NavigationController, Viewport};
pub use orbit::OrbitRotation;
pub use teleport::Teleport;
