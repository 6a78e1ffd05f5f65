use crate::api::types::Movement;
use crate::input::queue::{InputEvent, Intent};

pub const KEY_A: u32 = 65;
pub const KEY_D: u32 = 68;
pub const KEY_F: u32 = 70;
pub const KEY_R: u32 = 82;
pub const KEY_S: u32 = 83;
pub const KEY_W: u32 = 87;
pub const KEY_SPACE: u32 = 32;

/// Raw event to intent translation. Key codes are DOM `keyCode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Reset and freeze-toggle keys are only bound when set.
    pub debug_controls: bool,
}

impl KeyBindings {
    pub fn new(debug_controls: bool) -> Self {
        Self { debug_controls }
    }

    fn movement(key_code: u32) -> Option<Movement> {
        match key_code {
            KEY_A => Some(Movement::Left),
            KEY_D => Some(Movement::Right),
            KEY_W => Some(Movement::Up),
            KEY_S => Some(Movement::Down),
            KEY_SPACE => Some(Movement::Jump),
            _ => None,
        }
    }

    /// Translate one event. Unbound keys yield None.
    pub fn translate(&self, event: &InputEvent) -> Option<Intent> {
        match *event {
            InputEvent::KeyDown { key_code } => match key_code {
                KEY_R if self.debug_controls => Some(Intent::Reset),
                KEY_F if self.debug_controls => Some(Intent::ToggleFreeze),
                code => Self::movement(code).map(Intent::Move),
            },
            InputEvent::KeyUp { key_code } => Self::movement(key_code).map(Intent::StopMove),
            InputEvent::PointerDown { x, y } => Some(Intent::Attack { x, y }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys() {
        let keys = KeyBindings::new(false);
        assert_eq!(
            keys.translate(&InputEvent::KeyDown { key_code: KEY_A }),
            Some(Intent::Move(Movement::Left))
        );
        assert_eq!(
            keys.translate(&InputEvent::KeyUp { key_code: KEY_SPACE }),
            Some(Intent::StopMove(Movement::Jump))
        );
        assert_eq!(keys.translate(&InputEvent::KeyDown { key_code: 999 }), None);
    }

    #[test]
    fn pointer_attacks() {
        let keys = KeyBindings::new(false);
        assert_eq!(
            keys.translate(&InputEvent::PointerDown { x: 3.0, y: 4.0 }),
            Some(Intent::Attack { x: 3.0, y: 4.0 })
        );
    }

    #[test]
    fn debug_keys_need_debug_controls() {
        let release = KeyBindings::new(false);
        assert_eq!(release.translate(&InputEvent::KeyDown { key_code: KEY_R }), None);

        let debug = KeyBindings::new(true);
        assert_eq!(debug.translate(&InputEvent::KeyDown { key_code: KEY_R }), Some(Intent::Reset));
        assert_eq!(
            debug.translate(&InputEvent::KeyDown { key_code: KEY_F }),
            Some(Intent::ToggleFreeze)
        );
        assert_eq!(debug.translate(&InputEvent::KeyUp { key_code: KEY_F }), None);
    }
}
