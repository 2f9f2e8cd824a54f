// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Predicates and set operations over axis-aligned rectangles.
//!
//! Everything here is a pure function of its inputs. Rectangles are expected in canonical
//! order (`x0 <= x1`, `y0 <= y1`); use [`min_max_rect`] when the corner order is unknown.
//!
//! Boundary comparisons in the side-touch predicates are approximate (see [`approximately`]),
//! while overlap tests are strict: two rectangles that only share an edge do not overlap.

use alloc::vec::Vec;

use kurbo::Rect;
use smallvec::{SmallVec, smallvec};

use crate::error::SpaceError;
use crate::sides::{Axis, Sides};

/// Relative tolerance used by [`approximately`].
pub const APPROX_RELATIVE: f64 = 1e-6;

/// Absolute floor used by [`approximately`] for values near zero.
pub const APPROX_ABSOLUTE: f64 = 8.0 * f64::EPSILON;

/// Fragments produced by [`RectOps::punch`]. A punch never yields more than eight.
pub type Fragments = SmallVec<[Rect; 8]>;

/// Fragment emission order for [`RectOps::punch`]: corners interleaved with edges,
/// walking around the cut.
const PUNCH_SECTIONS: [Sides; 8] = [
    Sides::X0Y0,
    Sides::Y_MIN,
    Sides::X1Y0,
    Sides::X_MAX,
    Sides::X1Y1,
    Sides::Y_MAX,
    Sides::X0Y1,
    Sides::X_MIN,
];

/// Build a rectangle from two corners given in any order.
#[inline]
pub fn min_max_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
    Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
}

/// Whether two coordinates are equal within [`APPROX_RELATIVE`] (scaled by the larger
/// magnitude) or [`APPROX_ABSOLUTE`], whichever is larger.
#[inline]
pub fn approximately(a: f64, b: f64) -> bool {
    (b - a).abs() < (APPROX_RELATIVE * a.abs().max(b.abs())).max(APPROX_ABSOLUTE)
}

/// Per-axis overlap between two rectangles, see [`RectOps::overlaps_horizontally`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct AxisOverlap {
    horizontal: bool,
    vertical: bool,
}

impl AxisOverlap {
    fn of(a: &Rect, b: Rect) -> Self {
        Self {
            horizontal: a.overlaps_horizontally(b),
            vertical: a.overlaps_vertically(b),
        }
    }

    fn any(self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Rectangle operations used by the space analysis.
///
/// Method names avoid the inherent methods on [`Rect`] so that the strict overlap and
/// inclusive containment semantics here are never shadowed.
pub trait RectOps {
    /// Whether the width or height is approximately zero.
    fn has_zero_area(&self) -> bool;

    /// Strict overlap: the interiors intersect. Shared edges do not count.
    fn overlaps_interior(&self, other: Rect) -> bool;

    /// Inclusive containment: `other` lies entirely within `self`, edges included.
    fn encloses(&self, other: Rect) -> bool;

    /// Whether the x intervals overlap, ignoring where the rectangles sit vertically.
    fn overlaps_horizontally(&self, other: Rect) -> bool;

    /// Whether the y intervals overlap, ignoring where the rectangles sit horizontally.
    fn overlaps_vertically(&self, other: Rect) -> bool;

    /// Whether `self` touches or overlaps `other`, and which sides of `other` it reaches.
    ///
    /// A side is reported when `self` touches it approximately, or when `self` straddles
    /// it while overlapping `other` along the perpendicular axis. Equal rectangles report
    /// [`Sides::ALL`]. A rectangle strictly inside `other` reaches no side and returns
    /// `(false, Sides::empty())`.
    fn overlaps_or_touches_sides(&self, other: Rect) -> (bool, Sides);

    /// Whether `self` touches **every** requested side of `other`.
    ///
    /// Each requested side requires overlap along the perpendicular axis and an
    /// approximately equal boundary, either external (`self` abuts the side) or internal
    /// (`self` is flush with it). Requesting several sides combines them with AND, which
    /// differs from OR-ing several single-side calls.
    ///
    /// An empty `sides` asks the opposite question: whether the rectangles do not overlap.
    ///
    /// # Panics
    ///
    /// Panics if `sides` carries bits outside [`Sides::ALL`]. Use [`Sides::try_from_bits`]
    /// to validate raw bits first.
    fn touches_side_approximately(&self, other: Rect, sides: Sides) -> bool;

    /// Like [`RectOps::overlaps_or_touches_sides`], but a side only counts when `self`
    /// spans the full length of that side of `other`.
    fn overlaps_or_touches_entirely(&self, other: Rect) -> (bool, Sides);

    /// Starting from `self`, collect every rectangle of `others` connected to it through a
    /// chain of touching or overlapping rectangles. `self` is the first element.
    ///
    /// Candidates are tried nearest-first by center distance, which only affects growth
    /// order. This is quadratic in the number of candidates.
    fn all_adjacent<I: IntoIterator<Item = Rect>>(&self, others: I) -> Vec<Rect>;

    /// The smallest rectangle containing both `self` and `other`.
    fn encapsulate(&self, other: Rect) -> Rect;

    /// Subtract `remove` from `self`.
    ///
    /// Returns `self` unchanged if they do not overlap, nothing if `remove` covers `self`,
    /// and otherwise up to eight non-overlapping fragments that exactly tile the rest.
    /// Fragments with approximately zero area, as left by a zero-width `remove`, are omitted.
    fn punch(&self, remove: Rect) -> Fragments;

    /// Express `self` relative to `limits`, mapping `limits` itself to `(0, 0, 1, 1)`.
    ///
    /// Values are not clamped, so anything outside `limits` falls outside `[0, 1]`. A
    /// degenerate axis of `limits` maps every coordinate on that axis to `0`.
    fn normalize(&self, limits: Rect) -> Rect;
}

impl RectOps for Rect {
    #[inline]
    fn has_zero_area(&self) -> bool {
        approximately(self.width(), 0.0) || approximately(self.height(), 0.0)
    }

    #[inline]
    fn overlaps_interior(&self, other: Rect) -> bool {
        other.x1 > self.x0 && other.x0 < self.x1 && other.y1 > self.y0 && other.y0 < self.y1
    }

    #[inline]
    fn encloses(&self, other: Rect) -> bool {
        other.y0 >= self.y0 && other.y1 <= self.y1 && other.x0 >= self.x0 && other.x1 <= self.x1
    }

    // Both tests behave as if the other axis were recentred on zero: the recentred
    // intervals always overlap unless both rectangles are flat along that axis.
    fn overlaps_horizontally(&self, other: Rect) -> bool {
        other.x1 > self.x0 && other.x0 < self.x1 && self.height() + other.height() > 0.0
    }

    fn overlaps_vertically(&self, other: Rect) -> bool {
        other.y1 > self.y0 && other.y0 < self.y1 && self.width() + other.width() > 0.0
    }

    fn overlaps_or_touches_sides(&self, other: Rect) -> (bool, Sides) {
        let overlap = AxisOverlap::of(self, other);
        if !overlap.any() {
            return (false, Sides::empty());
        }

        let mut sides = Sides::empty();
        if touches_single_side(self, other, Sides::X_MIN, overlap)
            || (overlap.vertical && self.x0 <= other.x0 && self.x1 > other.x0)
        {
            sides |= Sides::X_MIN;
        }
        if touches_single_side(self, other, Sides::Y_MIN, overlap)
            || (overlap.horizontal && self.y0 <= other.y0 && self.y1 > other.y0)
        {
            sides |= Sides::Y_MIN;
        }
        if touches_single_side(self, other, Sides::X_MAX, overlap)
            || (overlap.vertical && self.x1 >= other.x1 && self.x0 < other.x1)
        {
            sides |= Sides::X_MAX;
        }
        if touches_single_side(self, other, Sides::Y_MAX, overlap)
            || (overlap.horizontal && self.y1 >= other.y1 && self.y0 < other.y1)
        {
            sides |= Sides::Y_MAX;
        }

        (!sides.is_empty(), sides)
    }

    fn touches_side_approximately(&self, other: Rect, sides: Sides) -> bool {
        assert!(
            Sides::ALL.contains(sides),
            "side flags out of range: {:#06b}",
            sides.bits()
        );
        let overlap = AxisOverlap::of(self, other);
        if !overlap.any() {
            return false;
        }
        if sides.is_empty() {
            return !self.overlaps_interior(other);
        }
        Sides::SINGLE
            .iter()
            .filter(|side| sides.contains(**side))
            .all(|side| touches_single_side(self, other, *side, overlap))
    }

    fn overlaps_or_touches_entirely(&self, other: Rect) -> (bool, Sides) {
        let spans_x = self.x0 <= other.x0 && self.x1 >= other.x1;
        let spans_y = self.y0 <= other.y0 && self.y1 >= other.y1;

        let mut sides = Sides::empty();
        if spans_y
            && (self.touches_side_approximately(other, Sides::X_MIN)
                || (self.x0 <= other.x0 && self.x1 >= other.x0))
        {
            sides |= Sides::X_MIN;
        }
        if spans_x
            && (self.touches_side_approximately(other, Sides::Y_MIN)
                || (self.y0 <= other.y0 && self.y1 >= other.y0))
        {
            sides |= Sides::Y_MIN;
        }
        if spans_y
            && (self.touches_side_approximately(other, Sides::X_MAX)
                || (self.x1 >= other.x1 && self.x0 <= other.x1))
        {
            sides |= Sides::X_MAX;
        }
        if spans_x
            && (self.touches_side_approximately(other, Sides::Y_MAX)
                || (self.y1 >= other.y1 && self.y0 <= other.y1))
        {
            sides |= Sides::Y_MAX;
        }

        (!sides.is_empty(), sides)
    }

    fn all_adjacent<I: IntoIterator<Item = Rect>>(&self, others: I) -> Vec<Rect> {
        let seed = self.center();
        let mut unconfirmed: Vec<Rect> = others.into_iter().collect();
        unconfirmed.sort_by(|a, b| {
            let da = (a.center() - seed).hypot2();
            let db = (b.center() - seed).hypot2();
            da.total_cmp(&db)
        });

        let mut confirmed = alloc::vec![*self];
        while let Some(next) = unconfirmed.iter().position(|candidate| {
            confirmed
                .iter()
                .any(|c| candidate.overlaps_or_touches_sides(*c).0)
        }) {
            confirmed.push(unconfirmed.remove(next));
        }
        confirmed
    }

    #[inline]
    fn encapsulate(&self, other: Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    fn punch(&self, remove: Rect) -> Fragments {
        let canvas = *self;
        if !canvas.overlaps_interior(remove) {
            return smallvec![canvas];
        }

        let cut = Rect::new(
            canvas.x0.max(remove.x0),
            canvas.y0.max(remove.y0),
            canvas.x1.min(remove.x1),
            canvas.y1.min(remove.y1),
        );
        if cut == canvas {
            return Fragments::new();
        }

        // Sides of the canvas that the cut leaves a gap along.
        let mut open = Sides::empty();
        if cut.x0 > canvas.x0 {
            open |= Sides::X_MIN;
        }
        if cut.x1 < canvas.x1 {
            open |= Sides::X_MAX;
        }
        if cut.y0 > canvas.y0 {
            open |= Sides::Y_MIN;
        }
        if cut.y1 < canvas.y1 {
            open |= Sides::Y_MAX;
        }

        PUNCH_SECTIONS
            .iter()
            .filter(|section| open.contains(**section))
            .map(|section| punch_section(canvas, cut, *section))
            .filter(|fragment| !fragment.has_zero_area())
            .collect()
    }

    fn normalize(&self, limits: Rect) -> Rect {
        min_max_rect(
            inverse_lerp(limits.x0, limits.x1, self.x0),
            inverse_lerp(limits.y0, limits.y1, self.y0),
            inverse_lerp(limits.x0, limits.x1, self.x1),
            inverse_lerp(limits.y0, limits.y1, self.y1),
        )
    }
}

/// The smallest rectangle containing every rectangle in `rects`.
///
/// Fails with [`SpaceError::EmptyCollection`] when `rects` yields nothing.
pub fn encapsulate_all<I>(rects: I) -> Result<Rect, SpaceError>
where
    I: IntoIterator<Item = Rect>,
{
    let mut it = rects.into_iter();
    let first = it.next().ok_or(SpaceError::EmptyCollection)?;
    Ok(it.fold(first, |acc, r| acc.encapsulate(r)))
}

/// Intersect `rects` along `axis`.
///
/// - [`Axis::None`]: a single rectangle, the intersection of all of `rects`.
/// - [`Axis::X`] / [`Axis::Y`]: one rectangle per input, each clamped to the band shared by
///   all inputs on that axis while keeping its own extent on the other axis.
///
/// When the inputs share no band on an axis, that axis collapses to the midpoint of the
/// inverted band, giving zero-width (or zero-height) results rather than inverted ones.
/// An empty input yields an empty output.
pub fn intersect_slice_many(rects: &[Rect], axis: Axis) -> Vec<Rect> {
    let Some(first) = rects.first() else {
        return Vec::new();
    };
    let band = rects[1..].iter().fold(*first, |acc, r| {
        Rect::new(
            acc.x0.max(r.x0),
            acc.y0.max(r.y0),
            acc.x1.min(r.x1),
            acc.y1.min(r.y1),
        )
    });
    let (x0, x1) = collapse_inverted(band.x0, band.x1);
    let (y0, y1) = collapse_inverted(band.y0, band.y1);

    match axis {
        Axis::None => alloc::vec![Rect::new(x0, y0, x1, y1)],
        Axis::X => rects.iter().map(|r| Rect::new(x0, r.y0, x1, r.y1)).collect(),
        Axis::Y => rects.iter().map(|r| Rect::new(r.x0, y0, r.x1, y1)).collect(),
    }
}

fn touches_single_side(alpha: &Rect, beta: Rect, side: Sides, overlap: AxisOverlap) -> bool {
    // External adjacency first, then internal flushness.
    if side == Sides::X_MIN {
        overlap.vertical && (approximately(alpha.x1, beta.x0) || approximately(alpha.x0, beta.x0))
    } else if side == Sides::Y_MIN {
        overlap.horizontal
            && (approximately(alpha.y1, beta.y0) || approximately(alpha.y0, beta.y0))
    } else if side == Sides::X_MAX {
        overlap.vertical && (approximately(alpha.x0, beta.x1) || approximately(alpha.x1, beta.x1))
    } else if side == Sides::Y_MAX {
        overlap.horizontal
            && (approximately(alpha.y0, beta.y1) || approximately(alpha.y1, beta.y1))
    } else {
        false
    }
}

/// One cell of the 3×3 grid that `cut` carves out of `canvas`.
///
/// A section naming `X_MIN` takes the column left of the cut, `X_MAX` the column right of
/// it, and neither the cut's own column; likewise for rows.
fn punch_section(canvas: Rect, cut: Rect, section: Sides) -> Rect {
    let (x0, x1) = if section.contains(Sides::X_MIN) {
        (canvas.x0, cut.x0)
    } else if section.contains(Sides::X_MAX) {
        (cut.x1, canvas.x1)
    } else {
        (cut.x0, cut.x1)
    };
    let (y0, y1) = if section.contains(Sides::Y_MIN) {
        (canvas.y0, cut.y0)
    } else if section.contains(Sides::Y_MAX) {
        (cut.y1, canvas.y1)
    } else {
        (cut.y0, cut.y1)
    };
    Rect::new(x0, y0, x1, y1)
}

pub(crate) fn collapse_inverted(min: f64, max: f64) -> (f64, f64) {
    if min > max {
        let mid = 0.5 * (min + max);
        (mid, mid)
    } else {
        (min, max)
    }
}

#[inline]
fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    if a == b { 0.0 } else { (v - a) / (b - a) }
}
