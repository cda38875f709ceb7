//! Synthesized pointer and key events
//!
//! These mirror what a desktop cursor or keyboard would deliver, so widgets
//! hosted on a 3D surface need no VR-specific handling.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

bitflags::bitflags! {
    /// Modifier keys held while an event was generated
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierKeys: u8 {
        /// Either shift key
        const SHIFT = 0b0001;
        /// Either control key
        const CONTROL = 0b0010;
        /// Either alt key
        const ALT = 0b0100;
        /// Command / super key
        const COMMAND = 0b1000;
    }
}

/// Keys the emulation layer can synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter / return
    Enter,
    /// Space bar
    SpaceBar,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Bottom face button of a gamepad (accept)
    GamepadFaceButtonBottom,
}

/// A pointer event as seen by a widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Index of the user that generated the event
    pub user_index: u32,
    /// Pointer (finger / controller) index
    pub pointer_index: u32,
    /// Cursor position this event
    pub screen_space_position: Vec2,
    /// Cursor position on the previous event
    pub last_screen_space_position: Vec2,
    /// Button that caused the event, if any
    pub effecting_button: Option<MouseButton>,
    /// Whether the event was generated by a touch-style source
    pub is_touch: bool,
    /// Modifier keys held
    pub modifiers: ModifierKeys,
}

impl PointerEvent {
    /// Touch-style event; `press_primary` marks the left button as the effecting button
    pub fn touch(
        user_index: u32,
        pointer_index: u32,
        current: Vec2,
        last: Vec2,
        press_primary: bool,
    ) -> Self {
        Self {
            user_index,
            pointer_index,
            screen_space_position: current,
            last_screen_space_position: last,
            effecting_button: press_primary.then_some(MouseButton::Left),
            is_touch: true,
            modifiers: ModifierKeys::empty(),
        }
    }

    /// Whether the primary (left) button is held for this event
    pub fn is_primary_pressed(&self) -> bool {
        self.effecting_button == Some(MouseButton::Left)
    }

    /// Cursor movement since the previous event
    pub fn cursor_delta(&self) -> Vec2 {
        self.screen_space_position - self.last_screen_space_position
    }
}

/// A key event as seen by a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key pressed or released
    pub key: Key,
    /// Modifier keys held
    pub modifiers: ModifierKeys,
    /// Index of the user that generated the event
    pub user_index: u32,
    /// Whether this is an auto-repeat
    pub is_repeat: bool,
}

impl KeyEvent {
    /// Non-repeat key event
    pub fn new(key: Key, modifiers: ModifierKeys, user_index: u32) -> Self {
        Self {
            key,
            modifiers,
            user_index,
            is_repeat: false,
        }
    }
}

/// Result of a widget handling an event
///
/// The host processes the reply against a widget path to apply capture and
/// focus side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reply {
    /// Whether the widget consumed the event
    pub handled: bool,
    /// Widget asks to capture the pointer
    pub capture_mouse: bool,
    /// Widget asks to release a pointer capture it holds
    pub release_mouse_capture: bool,
    /// Widget asks for user focus
    pub set_focus: bool,
}

impl Reply {
    /// Event consumed, no side effects
    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Default::default()
        }
    }

    /// Event not consumed
    pub fn unhandled() -> Self {
        Self::default()
    }

    /// Request pointer capture (builder pattern)
    pub fn capture_mouse(mut self) -> Self {
        self.capture_mouse = true;
        self
    }

    /// Request capture release (builder pattern)
    pub fn release_mouse_capture(mut self) -> Self {
        self.release_mouse_capture = true;
        self
    }

    /// Request user focus (builder pattern)
    pub fn set_focus(mut self) -> Self {
        self.set_focus = true;
        self
    }
}

/// How a player's input is routed between game and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Input goes to the game only; UI does not capture the cursor
    GameOnly,
    /// Input goes to the UI only
    UiOnly,
    /// Both game and UI receive input
    GameAndUi,
}
