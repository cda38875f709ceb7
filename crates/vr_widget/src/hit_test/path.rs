//! Custom hit-test path seam
//!
//! A host viewport that renders widgets onto 3D surfaces cannot hit-test
//! them with its 2D layout. It asks an installed [`CustomHitTestPath`]
//! instead.

use crate::foundation::math::Vec2;
use crate::ui::{ArrangedChildren, Geometry, VirtualPointerPosition, WidgetAndPointer, WidgetRef};

/// Hit-testing for widgets the host viewport does not lay out itself
pub trait CustomHitTestPath {
    /// Widgets under a desktop-space coordinate, leaf first
    ///
    /// `geometry` is the viewport geometry used to turn the desktop
    /// coordinate into a viewport-local screen position.
    fn bubble_path_and_virtual_cursors(
        &self,
        geometry: &Geometry,
        desktop_coordinate: Vec2,
        ignore_enabled: bool,
    ) -> Vec<WidgetAndPointer>;

    /// Report the root widget and footprint of every 3D child
    fn arrange_children(&self, children: &mut ArrangedChildren);

    /// Virtual cursor position a 3D child should see for a screen cursor
    fn translate_mouse_coordinate_for_3d_child(
        &self,
        child: &WidgetRef,
        viewport_geometry: &Geometry,
        screen_coordinate: Vec2,
        last_screen_coordinate: Vec2,
    ) -> Option<VirtualPointerPosition>;
}
