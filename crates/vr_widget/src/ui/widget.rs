//! Widget handles and arranged widget paths
//!
//! Widgets belong to the host UI framework. This crate only holds shared
//! handles to them, compares them by identity and calls their event entry
//! points.

use std::fmt;
use std::rc::Rc;

use super::geometry::{Geometry, VirtualPointerPosition};
use super::input::{KeyEvent, PointerEvent, Reply};

/// Event entry points of a host UI widget
///
/// Widgets are shared handles; implementations use interior mutability for
/// any state they update in response to events.
pub trait Widget {
    /// Pointer entered the widget
    fn on_mouse_enter(&self, _geometry: &Geometry, _event: &PointerEvent) {}

    /// Pointer left the widget
    fn on_mouse_leave(&self, _event: &PointerEvent) {}

    /// Pointer button pressed over the widget
    fn on_mouse_button_down(&self, _geometry: &Geometry, _event: &PointerEvent) -> Reply {
        Reply::unhandled()
    }

    /// Pointer button released over the widget
    fn on_mouse_button_up(&self, _geometry: &Geometry, _event: &PointerEvent) -> Reply {
        Reply::unhandled()
    }

    /// Pointer moved over the widget
    fn on_mouse_move(&self, _geometry: &Geometry, _event: &PointerEvent) -> Reply {
        Reply::unhandled()
    }

    /// Key pressed while the widget is targeted
    fn on_key_down(&self, _geometry: &Geometry, _event: &KeyEvent) -> Reply {
        Reply::unhandled()
    }

    /// Key released while the widget is targeted
    fn on_key_up(&self, _geometry: &Geometry, _event: &KeyEvent) -> Reply {
        Reply::unhandled()
    }
}

/// Shared handle to a host widget
pub type WidgetRef = Rc<dyn Widget>;

/// Identity comparison of two widget handles
pub fn same_widget(a: &WidgetRef, b: &WidgetRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

fn widget_addr(widget: &WidgetRef) -> *const () {
    Rc::as_ptr(widget).cast::<()>()
}

/// A widget with its arranged geometry
#[derive(Clone)]
pub struct ArrangedWidget {
    /// The widget
    pub widget: WidgetRef,
    /// Its arranged geometry
    pub geometry: Geometry,
}

impl ArrangedWidget {
    /// Pair a widget with its geometry
    pub fn new(widget: WidgetRef, geometry: Geometry) -> Self {
        Self { widget, geometry }
    }
}

impl fmt::Debug for ArrangedWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrangedWidget")
            .field("widget", &widget_addr(&self.widget))
            .field("geometry", &self.geometry)
            .finish()
    }
}

/// Collection filled by a hit-test path when the host arranges its 3D children
#[derive(Debug, Clone, Default)]
pub struct ArrangedChildren {
    widgets: Vec<ArrangedWidget>,
}

impl ArrangedChildren {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arranged widget
    pub fn add_widget(&mut self, widget: ArrangedWidget) {
        self.widgets.push(widget);
    }

    /// Number of arranged widgets
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether nothing was arranged
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Iterate the arranged widgets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ArrangedWidget> {
        self.widgets.iter()
    }
}

/// A widget in a hit path, with the virtual cursor position it should see
///
/// Equality is widget identity: the same widget at a different cursor
/// position is the same hover entry.
#[derive(Clone)]
pub struct WidgetAndPointer {
    /// The widget
    pub widget: WidgetRef,
    /// Its arranged geometry
    pub geometry: Geometry,
    /// Cursor position in the widget surface's local space
    pub pointer: VirtualPointerPosition,
}

impl WidgetAndPointer {
    /// Build a path entry
    pub fn new(widget: WidgetRef, geometry: Geometry, pointer: VirtualPointerPosition) -> Self {
        Self {
            widget,
            geometry,
            pointer,
        }
    }

    /// Drop the pointer, keeping widget and geometry
    pub fn arranged(&self) -> ArrangedWidget {
        ArrangedWidget::new(Rc::clone(&self.widget), self.geometry)
    }
}

impl PartialEq for WidgetAndPointer {
    fn eq(&self, other: &Self) -> bool {
        same_widget(&self.widget, &other.widget)
    }
}

impl fmt::Debug for WidgetAndPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetAndPointer")
            .field("widget", &widget_addr(&self.widget))
            .field("geometry", &self.geometry)
            .field("pointer", &self.pointer)
            .finish()
    }
}

/// Ordered widget path (leaf first, bubbling toward the root)
#[derive(Debug, Clone, Default)]
pub struct WidgetPath {
    widgets: Vec<WidgetAndPointer>,
}

impl WidgetPath {
    /// Build a path from a bubble path
    pub fn new(widgets: Vec<WidgetAndPointer>) -> Self {
        Self { widgets }
    }

    /// The hit target, if the path is not empty
    pub fn leaf(&self) -> Option<&WidgetAndPointer> {
        self.widgets.first()
    }

    /// Whether the path contains the given widget
    pub fn contains_widget(&self, widget: &WidgetRef) -> bool {
        self.widgets.iter().any(|entry| same_widget(&entry.widget, widget))
    }

    /// Path length
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the path is empty
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Iterate leaf to root
    pub fn iter(&self) -> impl Iterator<Item = &WidgetAndPointer> {
        self.widgets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    struct Blank;
    impl Widget for Blank {}

    #[test]
    fn test_identity_comparison() {
        let a: WidgetRef = Rc::new(Blank);
        let b: WidgetRef = Rc::new(Blank);
        let a_again = Rc::clone(&a);

        assert!(same_widget(&a, &a_again));
        assert!(!same_widget(&a, &b));
    }

    #[test]
    fn test_path_entry_equality_ignores_pointer() {
        let widget: WidgetRef = Rc::new(Blank);
        let first = WidgetAndPointer::new(
            Rc::clone(&widget),
            Geometry::default(),
            VirtualPointerPosition::stationary(Vec2::new(1.0, 1.0)),
        );
        let moved = WidgetAndPointer::new(
            widget,
            Geometry::default(),
            VirtualPointerPosition::stationary(Vec2::new(9.0, 9.0)),
        );

        assert_eq!(first, moved);
    }

    #[test]
    fn test_widget_path_queries() {
        let leaf: WidgetRef = Rc::new(Blank);
        let root: WidgetRef = Rc::new(Blank);
        let outsider: WidgetRef = Rc::new(Blank);
        let pointer = VirtualPointerPosition::default();

        let path = WidgetPath::new(vec![
            WidgetAndPointer::new(Rc::clone(&leaf), Geometry::default(), pointer),
            WidgetAndPointer::new(Rc::clone(&root), Geometry::default(), pointer),
        ]);

        assert_eq!(path.len(), 2);
        assert!(same_widget(&path.leaf().unwrap().widget, &leaf));
        assert!(path.contains_widget(&root));
        assert!(!path.contains_widget(&outsider));
    }
}
