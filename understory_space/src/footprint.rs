// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Occlusion footprints of UI elements.
//!
//! A rounded-corner element cannot opaquely cover its corner pixels, so its footprint is
//! modelled as two bands through its unrounded interior: a full-width horizontal band and a
//! full-height vertical band. Elements without rounding have identical bands.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Insets, Rect, RoundedRectRadii};

use crate::rect_ops::{approximately, collapse_inverted, min_max_rect};

/// The occluding footprint of one visible, opaque element.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementFootprint {
    /// World bounds after margins; the outer limit of what the element covers.
    pub max_bounds: Rect,
    /// Full-width band between the top and bottom corner radii.
    pub horizontal_band: Rect,
    /// Full-height band between the left and right corner radii.
    pub vertical_band: Rect,
    /// Label carried into the positive-space rectangles. May be empty.
    pub label: String,
}

impl ElementFootprint {
    /// A footprint from precomputed bands.
    pub fn new(
        max_bounds: Rect,
        horizontal_band: Rect,
        vertical_band: Rect,
        label: impl Into<String>,
    ) -> Self {
        Self {
            max_bounds,
            horizontal_band,
            vertical_band,
            label: label.into(),
        }
    }

    /// A footprint for a square-cornered element: both bands equal `bounds`.
    pub fn from_rect(bounds: Rect, label: impl Into<String>) -> Self {
        Self::new(bounds, bounds, bounds, label)
    }

    /// Derive a footprint from an element's world bounds, margins, and corner radii.
    ///
    /// Margins shrink `world_bounds` into [`ElementFootprint::max_bounds`]. Each edge then
    /// shrinks again by the larger radius of its two corners; the horizontal band keeps the
    /// full width and the vertical band the full height. Negative radii count as zero.
    ///
    /// Margins that cross collapse `max_bounds` to their midpoint. Radii that cross swap the
    /// inner edges instead, so a small element with large radii still covers the overlap of
    /// its corner arcs.
    pub fn from_element(
        world_bounds: Rect,
        margins: Insets,
        radii: RoundedRectRadii,
        label: impl Into<String>,
    ) -> Self {
        let max_bounds = shrink(
            world_bounds,
            margins.x0,
            margins.y0,
            margins.x1,
            margins.y1,
        );

        let tl = radii.top_left.max(0.0);
        let tr = radii.top_right.max(0.0);
        let br = radii.bottom_right.max(0.0);
        let bl = radii.bottom_left.max(0.0);
        let inner = min_max_rect(
            max_bounds.x0 + tl.max(bl),
            max_bounds.y0 + tl.max(tr),
            max_bounds.x1 - tr.max(br),
            max_bounds.y1 - bl.max(br),
        );

        Self::new(
            max_bounds,
            Rect::new(max_bounds.x0, inner.y0, max_bounds.x1, inner.y1),
            Rect::new(inner.x0, max_bounds.y0, inner.x1, max_bounds.y1),
            label,
        )
    }

    /// Whether the element has no rounding, so one band suffices.
    pub fn is_square(&self) -> bool {
        self.horizontal_band == self.vertical_band
    }
}

fn shrink(rect: Rect, left: f64, top: f64, right: f64, bottom: f64) -> Rect {
    let (x0, x1) = collapse_inverted(rect.x0 + left, rect.x1 - right);
    let (y0, y1) = collapse_inverted(rect.y0 + top, rect.y1 - bottom);
    Rect::new(x0, y0, x1, y1)
}

/// A flattened snapshot of one element in a UI tree, enough to decide whether it occludes.
///
/// Snapshots are stored in a slice; [`ElementSnapshot::parent`] indexes into the same slice.
#[derive(Clone, Debug)]
pub struct ElementSnapshot {
    /// World-space bounding box.
    pub world_bounds: Rect,
    /// Resolved margins (left, top, right, bottom).
    pub margins: Insets,
    /// Resolved corner radii.
    pub radii: RoundedRectRadii,
    /// Whether the element is shown at all.
    pub visible: bool,
    /// The element's own opacity, multiplied with its ancestors' when deciding opacity.
    pub opacity: f64,
    /// Alpha of the resolved background color.
    pub background_alpha: f64,
    /// Index of the parent snapshot, if any.
    pub parent: Option<usize>,
    /// Element name; may be empty.
    pub label: String,
}

impl Default for ElementSnapshot {
    fn default() -> Self {
        Self {
            world_bounds: Rect::ZERO,
            margins: Insets::ZERO,
            radii: RoundedRectRadii::from_single_radius(0.0),
            visible: true,
            opacity: 1.0,
            background_alpha: 1.0,
            parent: None,
            label: String::new(),
        }
    }
}

/// Default world-area threshold for [`collect_footprints`]: elements this size or smaller
/// are not worth occluding with.
pub const DEFAULT_MIN_ELEMENT_AREA: f64 = 4.0;

/// Footprints of every element in `elements` that occludes what is behind it.
///
/// An element occludes when it is visible, its world area exceeds `min_area`, its
/// background is opaque, and it and all of its ancestors have an opacity of one.
pub fn collect_footprints(elements: &[ElementSnapshot], min_area: f64) -> Vec<ElementFootprint> {
    elements
        .iter()
        .enumerate()
        .filter(|(idx, element)| {
            let occludes = element.visible
                && element.world_bounds.area() > min_area
                && approximately(element.background_alpha, 1.0)
                && fully_opaque_chain(elements, *idx);
            #[cfg(feature = "tracing")]
            if !occludes {
                tracing::trace!(index = idx, label = %element.label, "element does not occlude");
            }
            occludes
        })
        .map(|(_, element)| {
            ElementFootprint::from_element(
                element.world_bounds,
                element.margins,
                element.radii,
                element.label.clone(),
            )
        })
        .collect()
}

/// Whether the element at `idx` and every ancestor has an opacity of one.
///
/// Dangling parent indices end the walk; the walk is bounded so a parent cycle cannot spin.
fn fully_opaque_chain(elements: &[ElementSnapshot], idx: usize) -> bool {
    let mut current = Some(idx);
    for _ in 0..=elements.len() {
        let Some(element) = current.and_then(|i| elements.get(i)) else {
            return true;
        };
        if !approximately(element.opacity, 1.0) {
            return false;
        }
        current = element.parent;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn square_element_has_identical_bands() {
        let fp = ElementFootprint::from_element(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Insets::uniform(5.0),
            RoundedRectRadii::from_single_radius(0.0),
            "panel",
        );
        assert_eq!(fp.max_bounds, Rect::new(5.0, 5.0, 95.0, 45.0));
        assert!(fp.is_square());
    }

    #[test]
    fn rounded_corners_split_into_bands() {
        let fp = ElementFootprint::from_element(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Insets::uniform(5.0),
            RoundedRectRadii::new(10.0, 0.0, 4.0, 2.0),
            "card",
        );
        assert_eq!(fp.max_bounds, Rect::new(5.0, 5.0, 95.0, 45.0));
        assert_eq!(fp.horizontal_band, Rect::new(5.0, 15.0, 95.0, 41.0));
        assert_eq!(fp.vertical_band, Rect::new(15.0, 5.0, 91.0, 45.0));
        assert!(!fp.is_square());
    }

    #[test]
    fn oversized_margins_collapse() {
        let fp = ElementFootprint::from_element(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Insets::new(8.0, 0.0, 8.0, 0.0),
            RoundedRectRadii::from_single_radius(-3.0),
            "",
        );
        assert_eq!(fp.max_bounds, Rect::new(5.0, 0.0, 5.0, 10.0));
        assert!(fp.is_square());
    }

    #[test]
    fn oversized_radii_swap_band_edges() {
        let fp = ElementFootprint::from_element(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Insets::ZERO,
            RoundedRectRadii::from_single_radius(6.0),
            "pill",
        );
        assert_eq!(fp.max_bounds, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(fp.horizontal_band, Rect::new(0.0, 4.0, 10.0, 6.0));
        assert_eq!(fp.vertical_band, Rect::new(4.0, 0.0, 6.0, 10.0));
        assert!(fp.horizontal_band.area() > 0.0 && fp.vertical_band.area() > 0.0);
    }

    #[test]
    fn collect_skips_hidden_and_translucent() {
        let bounds = Rect::new(0.0, 0.0, 20.0, 20.0);
        let elements = vec![
            // 0: translucent root, hides everything below it.
            ElementSnapshot {
                world_bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                opacity: 0.5,
                label: "overlay".into(),
                ..ElementSnapshot::default()
            },
            // 1: opaque root.
            ElementSnapshot {
                world_bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                background_alpha: 0.0,
                label: "root".into(),
                ..ElementSnapshot::default()
            },
            // 2: child of the translucent root.
            ElementSnapshot {
                world_bounds: bounds,
                parent: Some(0),
                label: "ghost".into(),
                ..ElementSnapshot::default()
            },
            // 3: child of the opaque root.
            ElementSnapshot {
                world_bounds: bounds,
                parent: Some(1),
                label: "sidebar".into(),
                ..ElementSnapshot::default()
            },
            // 4: invisible.
            ElementSnapshot {
                world_bounds: bounds,
                parent: Some(1),
                visible: false,
                ..ElementSnapshot::default()
            },
            // 5: too small to matter.
            ElementSnapshot {
                world_bounds: Rect::new(0.0, 0.0, 2.0, 2.0),
                parent: Some(1),
                ..ElementSnapshot::default()
            },
        ];

        let footprints = collect_footprints(&elements, 4.0);
        assert_eq!(footprints.len(), 1);
        assert_eq!(footprints[0].label, "sidebar");
        assert_eq!(footprints[0].max_bounds, bounds);
    }

    #[test]
    fn parent_cycles_terminate() {
        let elements = vec![
            ElementSnapshot {
                world_bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                parent: Some(1),
                ..ElementSnapshot::default()
            },
            ElementSnapshot {
                world_bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                parent: Some(0),
                ..ElementSnapshot::default()
            },
        ];
        assert_eq!(collect_footprints(&elements, 4.0).len(), 2);
    }
}
