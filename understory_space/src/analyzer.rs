// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reduction of element footprints into positive and negative space.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::footprint::ElementFootprint;
use crate::group::{NamedRect, NamedRectGroup, center_label};
use crate::rect_ops::{RectOps, encapsulate_all};

/// Label of the single negative-space rectangle when nothing occludes the canvas.
pub const CANVAS_LABEL: &str = "Canvas";

/// Parameters controlling an analysis pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyzeParams {
    /// Negative-space fragments with this area or less are discarded as slivers.
    pub min_fragment_area: f64,
}

impl Default for AnalyzeParams {
    fn default() -> Self {
        Self {
            min_fragment_area: 4.0,
        }
    }
}

/// Result of one analysis pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spaces {
    /// Containment-reduced rectangles covering every occluding footprint.
    pub positive: NamedRectGroup,
    /// Rectangles tiling the canvas minus the positive space.
    pub negative: NamedRectGroup,
}

/// Stateless reducer from footprints to [`Spaces`].
///
/// Each pass recomputes everything from its inputs; identical inputs give identical output.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpaceAnalyzer {
    params: AnalyzeParams,
}

impl SpaceAnalyzer {
    /// An analyzer with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// An analyzer with the given parameters.
    pub fn with_params(params: AnalyzeParams) -> Self {
        Self { params }
    }

    /// The parameters in use.
    pub fn params(&self) -> AnalyzeParams {
        self.params
    }

    /// Compute both positive and negative space for `footprints` on `canvas`.
    pub fn reduce(&self, canvas: Rect, footprints: &[ElementFootprint]) -> Spaces {
        let positive = self.positive_space(canvas, footprints);
        let negative = self.negative_space(canvas, &positive);
        Spaces { positive, negative }
    }

    /// The containment-reduced set of footprint bands that intersect `canvas`.
    ///
    /// Footprints with zero-area bounds, or bounds that do not overlap the canvas, are
    /// skipped. A band already enclosed by an earlier entry is dropped; otherwise it
    /// replaces every entry it encloses. The vertical band of a rounded footprint goes
    /// through the same test after its horizontal band.
    ///
    /// Returns [`NamedRectGroup::EMPTY`] when nothing remains.
    pub fn positive_space(
        &self,
        canvas: Rect,
        footprints: &[ElementFootprint],
    ) -> NamedRectGroup {
        let mut rects: Vec<NamedRect> = Vec::with_capacity(footprints.len() * 2);

        for footprint in footprints {
            if footprint.max_bounds.has_zero_area()
                || !footprint.max_bounds.overlaps_interior(canvas)
            {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    label = %footprint.label,
                    bounds = ?footprint.max_bounds,
                    "skipping footprint outside canvas or without area"
                );
                continue;
            }

            let label = if footprint.label.is_empty() {
                center_label(footprint.max_bounds)
            } else {
                footprint.label.clone()
            };

            insert_unless_enclosed(&mut rects, footprint.horizontal_band, &label);
            if !footprint.is_square() {
                insert_unless_enclosed(&mut rects, footprint.vertical_band, &label);
            }
        }

        match encapsulate_all(rects.iter().map(|r| r.rect)) {
            Ok(bounds) => NamedRectGroup::from_parts(bounds, rects),
            Err(_) => NamedRectGroup::EMPTY,
        }
    }

    /// Punch every rectangle of `positive` out of `canvas`.
    ///
    /// The canvas is subtracted breadth-first: each positive rectangle punches every
    /// fragment left by the previous ones, and fragments no larger than
    /// [`AnalyzeParams::min_fragment_area`] are dropped.
    ///
    /// If `positive` has zero-area bounds (including [`NamedRectGroup::EMPTY`]), the result
    /// is the whole canvas labelled [`CANVAS_LABEL`]. If nothing survives, the result is
    /// [`NamedRectGroup::EMPTY`].
    pub fn negative_space(&self, canvas: Rect, positive: &NamedRectGroup) -> NamedRectGroup {
        if positive.bounds().has_zero_area() {
            return NamedRectGroup::from_parts(
                canvas,
                alloc::vec![NamedRect::new(canvas, CANVAS_LABEL)],
            );
        }

        let mut queue = VecDeque::from([canvas]);
        for occluder in positive.rects() {
            for _ in 0..queue.len() {
                let Some(fragment) = queue.pop_front() else {
                    break;
                };
                queue.extend(
                    fragment
                        .punch(occluder)
                        .into_iter()
                        .filter(|f| f.area() > self.params.min_fragment_area),
                );
            }
            if queue.is_empty() {
                break;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(fragments = ?queue, "punch queue contents");

        match encapsulate_all(queue.iter().copied()) {
            Ok(bounds) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(bounds = ?bounds, "negative space bounds");
                let fragments = queue.into_iter().map(NamedRect::unnamed).collect();
                NamedRectGroup::from_parts(bounds, fragments)
            }
            Err(_) => NamedRectGroup::EMPTY,
        }
    }
}

/// Add `band` unless an existing entry encloses it, evicting entries `band` encloses.
fn insert_unless_enclosed(rects: &mut Vec<NamedRect>, band: Rect, label: &str) {
    if rects.iter().any(|r| r.rect.encloses(band)) {
        return;
    }
    rects.retain(|r| !band.encloses(r.rect));
    rects.push(NamedRect::new(band, label));
}
