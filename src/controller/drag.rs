use glam::Vec2;

/// Pointer gesture state. A press starts `Pending`; it becomes `Rotating` once the
/// pointer strays past the threshold from where it went down, and stays there until release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Pending { origin: Vec2, last: Vec2 },
    Rotating { last: Vec2 },
}

/// How a gesture ended on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    /// Released without passing the threshold
    Click,
    Rotation,
    /// Release with no matching press
    Stray,
}

impl DragState {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self, DragState::Rotating { .. })
    }

    pub fn press(&mut self, pos: Vec2) {
        *self = DragState::Pending { origin: pos, last: pos };
    }

    /// Returns the delta since the previous position once the gesture is a rotation.
    pub fn motion(&mut self, pos: Vec2, threshold: f32) -> Option<Vec2> {
        if !pos.is_finite() {
            return None;
        }
        match *self {
            DragState::Idle => None,
            DragState::Pending { origin, last } => {
                let travel = (pos - origin).abs();
                if travel.x > threshold || travel.y > threshold {
                    *self = DragState::Rotating { last: pos };
                    Some(pos - last)
                } else {
                    *self = DragState::Pending { origin, last: pos };
                    None
                }
            }
            DragState::Rotating { last } => {
                *self = DragState::Rotating { last: pos };
                Some(pos - last)
            }
        }
    }

    pub fn release(&mut self) -> GestureEnd {
        let end = match self {
            DragState::Idle => GestureEnd::Stray,
            DragState::Pending { .. } => GestureEnd::Click,
            DragState::Rotating { .. } => GestureEnd::Rotation,
        };
        *self = DragState::Idle;
        end
    }

    pub fn reset(&mut self) {
        *self = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_jitter_stays_a_click() {
        let mut drag = DragState::default();
        drag.press(Vec2::new(100.0, 100.0));
        for (x, y) in [(103.0, 98.0), (105.0, 95.0), (96.0, 104.0), (100.0, 100.0)] {
            assert_eq!(drag.motion(Vec2::new(x, y), 5.0), None);
        }
        assert!(drag.is_active() && !drag.is_rotating());
        assert_eq!(drag.release(), GestureEnd::Click);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn threshold_is_measured_from_origin() {
        let mut drag = DragState::default();
        drag.press(Vec2::ZERO);
        // many small steps add up
        for i in 1..=5 {
            assert_eq!(drag.motion(Vec2::new(i as f32, 0.0), 5.0), None);
        }
        let delta = drag.motion(Vec2::new(6.0, 0.0), 5.0);
        assert_eq!(delta, Some(Vec2::new(1.0, 0.0)), "first rotating step reports the per-move delta");
        assert!(drag.is_rotating());
    }

    #[test]
    fn rotation_is_sticky_until_release() {
        let mut drag = DragState::default();
        drag.press(Vec2::ZERO);
        drag.motion(Vec2::new(0.0, 20.0), 5.0);
        // back inside the threshold, still rotating
        assert_eq!(drag.motion(Vec2::ZERO, 5.0), Some(Vec2::new(0.0, -20.0)));
        assert!(drag.is_rotating());
        assert_eq!(drag.release(), GestureEnd::Rotation);
        assert_eq!(drag.release(), GestureEnd::Stray);
    }

    #[test]
    fn idle_ignores_motion_and_bad_coordinates() {
        let mut drag = DragState::default();
        assert_eq!(drag.motion(Vec2::new(50.0, 50.0), 5.0), None);
        drag.press(Vec2::ZERO);
        assert_eq!(drag.motion(Vec2::new(f32::NAN, 1.0), 5.0), None);
        assert_eq!(drag, DragState::Pending { origin: Vec2::ZERO, last: Vec2::ZERO });
        drag.reset();
        assert!(!drag.is_active());
    }
}
