//! Widget hit-test grid
//!
//! Records where each widget of a surface was laid out during the last
//! paint and answers "which widgets are under this local point". A grid
//! that has not been painted yet is invalid, and every query on an invalid
//! grid reports no widgets.

use std::rc::Rc;

use slotmap::SlotMap;

use crate::foundation::math::Vec2;
use super::geometry::{Geometry, VirtualPointerPosition};
use super::widget::{WidgetAndPointer, WidgetRef};

slotmap::new_key_type! {
    /// Handle to a widget recorded in a [`HitTestGrid`]
    pub struct GridKey;
}

struct GridEntry {
    widget: WidgetRef,
    geometry: Geometry,
    enabled: bool,
    parent: Option<GridKey>,
    depth: u32,
    order: u64,
}

/// Hit-test grid for one widget surface
///
/// Widgets are recorded as a tree: queries find the deepest, most recently
/// painted widget under the point and bubble up through its parents.
#[derive(Default)]
pub struct HitTestGrid {
    entries: SlotMap<GridKey, GridEntry>,
    painted: bool,
    next_order: u64,
}

impl HitTestGrid {
    /// Create an empty, unpainted grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the grid has been painted and can answer queries
    pub fn is_valid(&self) -> bool {
        self.painted
    }

    /// Mark the grid as painted
    pub fn mark_painted(&mut self) {
        self.painted = true;
    }

    /// Drop all recorded widgets and mark the grid unpainted
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.painted = false;
        self.next_order = 0;
    }

    /// Record a root widget occupying `geometry` in surface-local space
    pub fn add_root(&mut self, widget: WidgetRef, geometry: Geometry) -> GridKey {
        let order = self.bump_order();
        self.entries.insert(GridEntry {
            widget,
            geometry,
            enabled: true,
            parent: None,
            depth: 0,
            order,
        })
    }

    /// Record a child widget; `None` if `parent` is not in the grid
    pub fn add_child(&mut self, parent: GridKey, widget: WidgetRef, geometry: Geometry) -> Option<GridKey> {
        let depth = self.entries.get(parent)?.depth + 1;
        let order = self.bump_order();
        Some(self.entries.insert(GridEntry {
            widget,
            geometry,
            enabled: true,
            parent: Some(parent),
            depth,
            order,
        }))
    }

    /// Enable or disable a recorded widget (and, for queries, its subtree)
    pub fn set_enabled(&mut self, key: GridKey, enabled: bool) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.enabled = enabled;
        }
    }

    /// Remove a widget and everything recorded beneath it
    pub fn remove(&mut self, key: GridKey) {
        if self.entries.remove(key).is_none() {
            return;
        }

        // Orphans are removed until no entry points at a removed parent.
        loop {
            let orphans: Vec<GridKey> = self
                .entries
                .iter()
                .filter(|(_, entry)| entry.parent.is_some_and(|parent| !self.entries.contains_key(parent)))
                .map(|(key, _)| key)
                .collect();
            if orphans.is_empty() {
                break;
            }
            for orphan in orphans {
                self.entries.remove(orphan);
            }
        }
    }

    /// Number of recorded widgets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no widgets are recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Widgets under `point`, leaf first, each tagged with the virtual cursor
    ///
    /// # Arguments
    /// * `point` - Cursor position in surface-local space
    /// * `last_point` - Cursor position of the previous hit
    /// * `ignore_enabled` - Consider disabled widgets as hittable
    /// * `cursor_radius` - Inflate widget bounds by this many local units
    pub fn bubble_path(
        &self,
        point: Vec2,
        last_point: Vec2,
        ignore_enabled: bool,
        cursor_radius: f32,
    ) -> Vec<WidgetAndPointer> {
        if !self.painted {
            return Vec::new();
        }

        let target = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.geometry.contains_absolute(point, cursor_radius))
            .filter(|(key, _)| ignore_enabled || self.is_effectively_enabled(*key))
            .max_by_key(|(_, entry)| (entry.depth, entry.order))
            .map(|(key, _)| key);

        let pointer = VirtualPointerPosition::new(point, last_point);
        let mut path = Vec::new();
        let mut cursor = target;
        while let Some(key) = cursor {
            let Some(entry) = self.entries.get(key) else {
                break;
            };
            path.push(WidgetAndPointer::new(Rc::clone(&entry.widget), entry.geometry, pointer));
            cursor = entry.parent;
        }

        path
    }

    fn is_effectively_enabled(&self, key: GridKey) -> bool {
        let mut cursor = Some(key);
        while let Some(current) = cursor {
            match self.entries.get(current) {
                Some(entry) if entry.enabled => cursor = entry.parent,
                Some(_) => return false,
                None => break,
            }
        }
        true
    }

    fn bump_order(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }
}
