//! Platform-agnostic input handling
use glam::Vec3;

/// Input events the navigation controller understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    // Pointer events, in viewport pixels
    PointerDown { button: PointerButton, x: f32, y: f32 },
    /// `primary_held` is the primary button state as the platform reports it during the move
    PointerMove { x: f32, y: f32, primary_held: bool },
    PointerUp { button: PointerButton, x: f32, y: f32 },

    // Tracked controller events
    SelectStart(ControllerPose),
    SelectEnd(ControllerPose),

    CancelNavigation,
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    pub fn from_web_button(button: i16) -> Self {
        match button {
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            _ => PointerButton::Primary,
        }
    }
}

/// World-space pose of a tracked controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerPose {
    pub position: Vec3,
    pub forward: Vec3,
}

pub mod wasm {
    use super::*;
    use web_sys::{Element, KeyboardEvent, MouseEvent};

    // `MouseEvent::buttons` bit for the primary button
    const PRIMARY_BIT: u16 = 1;

    /// Position relative to `surface`, so events caught on the document still map
    /// into canvas pixels.
    fn relative(e: &MouseEvent, surface: &Element) -> (f32, f32) {
        let rect = surface.get_bounding_client_rect();
        (e.client_x() as f32 - rect.left() as f32, e.client_y() as f32 - rect.top() as f32)
    }

    pub fn mouse_down_to_input(e: &MouseEvent, surface: &Element) -> InputEvent {
        let (x, y) = relative(e, surface);
        InputEvent::PointerDown { button: PointerButton::from_web_button(e.button()), x, y }
    }

    pub fn mouse_move_to_input(e: &MouseEvent, surface: &Element) -> InputEvent {
        let (x, y) = relative(e, surface);
        InputEvent::PointerMove { x, y, primary_held: e.buttons() & PRIMARY_BIT != 0 }
    }

    pub fn mouse_up_to_input(e: &MouseEvent, surface: &Element) -> InputEvent {
        let (x, y) = relative(e, surface);
        InputEvent::PointerUp { button: PointerButton::from_web_button(e.button()), x, y }
    }

    pub fn key_down_to_input(e: &KeyboardEvent) -> Option<InputEvent> {
        match e.key().as_str() {
            "Escape" => Some(InputEvent::CancelNavigation),
            _ => None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod native {
    use super::*;
    use winit::event::{ElementState, MouseButton};
    use winit::keyboard::KeyCode;

    pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
        match button {
            MouseButton::Left => Some(PointerButton::Primary),
            MouseButton::Right => Some(PointerButton::Secondary),
            MouseButton::Middle => Some(PointerButton::Middle),
            _ => None,
        }
    }

    pub fn mouse_input_to_input(state: ElementState, button: MouseButton, cursor: (f32, f32)) -> Option<InputEvent> {
        let button = pointer_button(button)?;
        let (x, y) = cursor;
        Some(match state {
            ElementState::Pressed => InputEvent::PointerDown { button, x, y },
            ElementState::Released => InputEvent::PointerUp { button, x, y },
        })
    }

    /// Primary button state after a mouse button event.
    pub fn track_primary(held: bool, state: ElementState, button: MouseButton) -> bool {
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => true,
            (MouseButton::Left, ElementState::Released) => false,
            _ => held,
        }
    }

    /// `controller` is the pose used for the `T` stand-in select.
    pub fn key_to_input(code: KeyCode, state: ElementState, controller: ControllerPose) -> Option<InputEvent> {
        match (code, state) {
            (KeyCode::Escape, ElementState::Pressed) => Some(InputEvent::CancelNavigation),
            (KeyCode::KeyT, ElementState::Pressed) => Some(InputEvent::SelectStart(controller)),
            (KeyCode::KeyT, ElementState::Released) => Some(InputEvent::SelectEnd(controller)),
            _ => None,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn left_button_maps_to_primary_pointer() {
            let down = mouse_input_to_input(ElementState::Pressed, MouseButton::Left, (3.0, 4.0));
            assert_eq!(down, Some(InputEvent::PointerDown { button: PointerButton::Primary, x: 3.0, y: 4.0 }));
            let up = mouse_input_to_input(ElementState::Released, MouseButton::Left, (5.0, 6.0));
            assert_eq!(up, Some(InputEvent::PointerUp { button: PointerButton::Primary, x: 5.0, y: 6.0 }));
            assert_eq!(mouse_input_to_input(ElementState::Pressed, MouseButton::Back, (0.0, 0.0)), None);
        }

        #[test]
        fn primary_state_follows_left_button_only() {
            let held = track_primary(false, ElementState::Pressed, MouseButton::Left);
            assert!(held);
            assert!(track_primary(held, ElementState::Released, MouseButton::Right), "right release keeps left held");
            assert!(!track_primary(held, ElementState::Released, MouseButton::Left));
        }

        #[test]
        fn t_key_drives_select_events() {
            let pose = ControllerPose { position: Vec3::Y, forward: Vec3::NEG_Z };
            assert_eq!(key_to_input(KeyCode::KeyT, ElementState::Pressed, pose), Some(InputEvent::SelectStart(pose)));
            assert_eq!(key_to_input(KeyCode::KeyT, ElementState::Released, pose), Some(InputEvent::SelectEnd(pose)));
            assert_eq!(key_to_input(KeyCode::Escape, ElementState::Pressed, pose), Some(InputEvent::CancelNavigation));
            assert_eq!(key_to_input(KeyCode::KeyW, ElementState::Pressed, pose), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_buttons_map_like_dom() {
        assert_eq!(PointerButton::from_web_button(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_web_button(1), PointerButton::Middle);
        assert_eq!(PointerButton::from_web_button(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_web_button(4), PointerButton::Primary);
    }
}
