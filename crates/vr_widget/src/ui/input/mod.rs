//! UI input handling module

pub mod events;

// Re-export commonly used types
pub use events::{InputMode, Key, KeyEvent, ModifierKeys, MouseButton, PointerEvent, Reply};
