// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting render viewports into negative space.
//!
//! Normalized bounds produced by the analysis grow downward in y, like UI coordinates.
//! Viewports are assumed to grow upward, so bounds are flipped with [`flip_y`] before being
//! applied.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Rect, Size};

use crate::minder::{SpaceChange, SpaceKind, SpaceListener, SpaceMinder};
use crate::rect_ops::RectOps;

/// Something that renders into a normalized sub-rectangle of its surface.
pub trait Viewport {
    /// Set the normalized rectangle, with y growing upward.
    fn set_normalized_rect(&mut self, rect: Rect);
}

impl<V: Viewport + ?Sized> Viewport for &mut V {
    fn set_normalized_rect(&mut self, rect: Rect) {
        (**self).set_normalized_rect(rect);
    }
}

impl<V: Viewport + ?Sized> Viewport for Rc<RefCell<V>> {
    fn set_normalized_rect(&mut self, rect: Rect) {
        self.borrow_mut().set_normalized_rect(rect);
    }
}

/// Mirror a normalized rectangle vertically within the unit square.
#[inline]
pub fn flip_y(normalized: Rect) -> Rect {
    Rect::new(normalized.x0, 1.0 - normalized.y1, normalized.x1, 1.0 - normalized.y0)
}

/// Map `rect`, given in `canvas` coordinates, onto a preview surface of size `preview`.
///
/// The preview's origin corresponds to the canvas origin; no y flip is applied.
pub fn scale_into(rect: Rect, canvas: Rect, preview: Size) -> Rect {
    let n = rect.normalize(canvas);
    Rect::new(
        n.x0 * preview.width,
        n.y0 * preview.height,
        n.x1 * preview.width,
        n.y1 * preview.height,
    )
}

/// Listener that keeps a set of viewports fitted to the negative space.
///
/// Positive-space changes are ignored, as are negative-space changes to an empty group:
/// when the canvas is entirely covered the viewports keep their previous rectangle.
#[derive(Debug, Default)]
pub struct ViewportApplier<V> {
    viewports: Vec<V>,
}

impl<V: Viewport> ViewportApplier<V> {
    /// An applier driving `viewports`.
    pub fn new(viewports: Vec<V>) -> Self {
        Self { viewports }
    }

    /// Add another viewport.
    pub fn push(&mut self, viewport: V) {
        self.viewports.push(viewport);
    }

    /// The driven viewports.
    pub fn viewports(&self) -> &[V] {
        &self.viewports
    }

    /// Apply normalized (y-down) bounds to every viewport, flipping them first.
    pub fn apply(&mut self, normalized: Rect) {
        let flipped = flip_y(normalized);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            rect = ?flipped,
            viewports = self.viewports.len(),
            "applying negative space to viewports"
        );
        for viewport in &mut self.viewports {
            viewport.set_normalized_rect(flipped);
        }
    }

    /// Fit the viewports to the negative space `minder` last computed.
    ///
    /// Returns `false` without touching the viewports if that space is empty, for instance
    /// before the first pass.
    pub fn apply_current(&mut self, minder: &SpaceMinder) -> bool {
        let negative = minder.negative();
        if negative.is_empty() {
            return false;
        }
        self.apply(negative.normalized_bounds(minder.last_known_canvas()));
        true
    }
}

impl<V: Viewport> SpaceListener for ViewportApplier<V> {
    fn on_space_changed(&mut self, change: &SpaceChange<'_>) {
        if change.kind == SpaceKind::Negative && !change.group.is_empty() {
            self.apply(change.normalized_bounds);
        }
    }
}
