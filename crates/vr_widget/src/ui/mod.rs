//! UI System Module
//!
//! Host-framework facing types used by the VR hit-test path:
//! - geometry: layout geometry and virtual cursor positions
//! - widget: widget handles, arranged widgets and widget paths
//! - input: synthesized pointer and key events
//! - hit_test_grid: per-surface widget hit-testing
//! - host: focus, input mode and reply processing

pub mod geometry;
pub mod widget;
pub mod input;
pub mod hit_test_grid;
pub mod host;

pub use geometry::{Geometry, LayoutTransform, VirtualPointerPosition};
pub use widget::{
    same_widget, ArrangedChildren, ArrangedWidget, Widget, WidgetAndPointer, WidgetPath, WidgetRef,
};
pub use input::{InputMode, Key, KeyEvent, ModifierKeys, MouseButton, PointerEvent, Reply};
pub use hit_test_grid::{GridKey, HitTestGrid};
pub use host::UiHost;
