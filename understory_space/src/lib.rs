// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_space --heading-base-level=0

//! Understory Space: positive and negative space analysis for 2D UI layouts.
//!
//! ## Overview
//!
//! Given a canvas rectangle and the footprints of the opaque elements drawn over it, this
//! crate computes two groups of axis-aligned rectangles:
//!
//! - **Positive space**: a containment-reduced set of rectangles covering every occluding
//!   footprint.
//! - **Negative space**: rectangles tiling the part of the canvas nothing covers.
//!
//! A typical consumer fits a 3D camera viewport into the negative space so the scene stays
//! visible around sidebars, toolbars, and panels.
//!
//! ## Building blocks
//!
//! - [`RectOps`] extends [`kurbo::Rect`] with side-aware overlap predicates, encapsulation,
//!   punching (rectangle subtraction), and normalization. Comparisons against side
//!   boundaries are approximate; see [`approximately`].
//! - [`RectGroup`] pairs an immutable collection of rectangles with its encapsulating bounds.
//!   [`NamedRect`] attaches a label, defaulting to the rectangle's center.
//! - [`ElementFootprint`] models a rounded element as two bands through its unrounded
//!   interior. [`collect_footprints`] filters a flattened UI tree down to the elements that
//!   actually occlude.
//! - [`SpaceAnalyzer`] reduces footprints into [`Spaces`]. It holds no state between passes.
//! - [`SpaceMinder`] caches the last result and notifies [`SpaceListener`]s of changes,
//!   positive space first.
//! - [`ViewportApplier`] is a listener that applies the y-flipped negative-space bounds to
//!   [`Viewport`]s.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_space::{ElementFootprint, SpaceKind, SpaceMinder};
//!
//! let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let sidebar = ElementFootprint::from_rect(Rect::new(0.0, 0.0, 30.0, 100.0), "sidebar");
//!
//! let mut minder = SpaceMinder::default();
//! minder.subscribe(|change: &understory_space::SpaceChange<'_>| {
//!     if change.kind == SpaceKind::Negative {
//!         assert_eq!(change.normalized_bounds, Rect::new(0.3, 0.0, 1.0, 1.0));
//!     }
//! });
//!
//! let spaces = minder.analyze(canvas, &[sidebar], false);
//! assert_eq!(spaces.positive.bounds(), Rect::new(0.0, 0.0, 30.0, 100.0));
//! assert_eq!(spaces.negative.bounds(), Rect::new(30.0, 0.0, 100.0, 100.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//! - `tracing`: emits `tracing` events for skipped footprints, punch queues, and change
//!   notifications.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod analyzer;
pub mod error;
pub mod footprint;
pub mod group;
pub mod minder;
pub mod rect_ops;
pub mod sides;
pub mod viewport;

pub use analyzer::{AnalyzeParams, CANVAS_LABEL, SpaceAnalyzer, Spaces};
pub use error::SpaceError;
pub use footprint::{
    DEFAULT_MIN_ELEMENT_AREA, ElementFootprint, ElementSnapshot, collect_footprints,
};
pub use group::{AsRect, NamedRect, NamedRectGroup, RectGroup, center_label};
pub use minder::{ListenerId, SpaceChange, SpaceKind, SpaceListener, SpaceMinder};
pub use rect_ops::{
    Fragments, RectOps, approximately, encapsulate_all, intersect_slice_many, min_max_rect,
};
pub use sides::{Axis, Sides};
pub use viewport::{Viewport, ViewportApplier, flip_y, scale_into};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::{Insets, Rect, RoundedRectRadii};

    #[test]
    fn snapshots_to_viewport() {
        let canvas = Rect::new(0.0, 0.0, 200.0, 100.0);
        let elements = vec![
            ElementSnapshot {
                world_bounds: canvas,
                background_alpha: 0.0,
                label: "root".into(),
                ..ElementSnapshot::default()
            },
            ElementSnapshot {
                world_bounds: Rect::new(0.0, 0.0, 50.0, 100.0),
                parent: Some(0),
                label: "inspector".into(),
                ..ElementSnapshot::default()
            },
            ElementSnapshot {
                world_bounds: Rect::new(150.0, 0.0, 200.0, 100.0),
                margins: Insets::ZERO,
                radii: RoundedRectRadii::from_single_radius(0.0),
                parent: Some(0),
                label: "outliner".into(),
                ..ElementSnapshot::default()
            },
        ];

        let footprints = collect_footprints(&elements, DEFAULT_MIN_ELEMENT_AREA);
        assert_eq!(footprints.len(), 2);

        let mut minder = SpaceMinder::new(SpaceAnalyzer::with_params(AnalyzeParams::default()));
        let spaces = minder.analyze(canvas, &footprints, false);
        assert_eq!(spaces.positive.bounds(), canvas);
        assert_eq!(
            spaces.negative.rects().collect::<alloc::vec::Vec<_>>(),
            vec![Rect::new(50.0, 0.0, 150.0, 100.0)]
        );
        assert_eq!(
            flip_y(spaces.negative.normalized_bounds(canvas)),
            Rect::new(0.25, 0.0, 0.75, 1.0)
        );
    }
}
