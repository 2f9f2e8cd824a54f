// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable rectangle collections with their encapsulating bounds.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::error::SpaceError;
use crate::rect_ops::{RectOps, encapsulate_all};

/// Anything that carries a rectangle.
pub trait AsRect {
    /// The rectangle itself.
    fn rect(&self) -> Rect;
}

impl AsRect for Rect {
    #[inline]
    fn rect(&self) -> Rect {
        *self
    }
}

/// A rectangle paired with a label for context (usually the element it came from).
#[derive(Clone, Debug, PartialEq)]
pub struct NamedRect {
    /// The rectangle.
    pub rect: Rect,
    /// Label; never empty.
    pub label: String,
}

impl NamedRect {
    /// Pair `rect` with `label`. An empty label falls back to the rectangle's center.
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        let label = label.into();
        if label.is_empty() {
            Self::unnamed(rect)
        } else {
            Self { rect, label }
        }
    }

    /// A rectangle labelled with its own center.
    pub fn unnamed(rect: Rect) -> Self {
        Self {
            rect,
            label: center_label(rect),
        }
    }
}

impl AsRect for NamedRect {
    #[inline]
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl fmt::Display for NamedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamedRect <{}>: {:?}", self.label, self.rect)
    }
}

/// Render the center of `rect` the way default labels show it.
pub fn center_label(rect: Rect) -> String {
    let c = rect.center();
    format!("({:.2}, {:.2})", c.x, c.y)
}

/// A collection of rectangles together with the bounds that encapsulate them.
///
/// Groups are built once and never mutated. Unless the group is [`RectGroup::EMPTY`],
/// [`RectGroup::bounds`] is the encapsulation of every rectangle in the collection.
/// `EMPTY` carries [`Rect::ZERO`] bounds, which callers must not read as a real union.
///
/// Equality is structural and order-sensitive.
#[derive(Clone, Debug, PartialEq)]
pub struct RectGroup<R = NamedRect> {
    bounds: Rect,
    collection: Vec<R>,
}

/// A group of labelled rectangles, as produced by the space analysis.
pub type NamedRectGroup = RectGroup<NamedRect>;

impl<R> RectGroup<R> {
    /// The group with no rectangles and zero bounds.
    pub const EMPTY: Self = Self {
        bounds: Rect::ZERO,
        collection: Vec::new(),
    };

    /// Bounds encapsulating every rectangle in the collection.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The rectangles, in construction order.
    #[inline]
    pub fn collection(&self) -> &[R] {
        &self.collection
    }

    /// Number of rectangles in the group.
    #[inline]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Whether the group holds no rectangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// The group's bounds expressed relative to `canvas`, see [`RectOps::normalize`].
    pub fn normalized_bounds(&self, canvas: Rect) -> Rect {
        self.bounds.normalize(canvas)
    }
}

impl<R: AsRect> RectGroup<R> {
    /// Build a group, computing its bounds from `collection`.
    ///
    /// Fails with [`SpaceError::EmptyCollection`] if `collection` is empty; use
    /// [`RectGroup::EMPTY`] for that case.
    pub fn new(collection: Vec<R>) -> Result<Self, SpaceError> {
        let bounds = encapsulate_all(collection.iter().map(AsRect::rect))?;
        Ok(Self { bounds, collection })
    }

    /// Build a group from bounds the caller already computed.
    ///
    /// `bounds` must encapsulate `collection`; this is only checked in debug builds.
    pub fn from_parts(bounds: Rect, collection: Vec<R>) -> Self {
        debug_assert!(
            !matches!(encapsulate_all(collection.iter().map(AsRect::rect)), Ok(b) if b != bounds),
            "bounds {bounds:?} do not encapsulate the collection"
        );
        Self { bounds, collection }
    }

    /// The bare rectangles of the collection.
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.collection.iter().map(AsRect::rect)
    }
}

impl<R> Default for RectGroup<R> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<R> fmt::Display for RectGroup<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RectGroup: bounds = {:?}, {} in collection",
            self.bounds,
            self.collection.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn new_computes_bounds() {
        let group = RectGroup::new(vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, -5.0, 30.0, 5.0),
        ])
        .unwrap();
        assert_eq!(group.bounds(), Rect::new(0.0, -5.0, 30.0, 10.0));
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn new_rejects_empty_collection() {
        let group = RectGroup::<Rect>::new(Vec::new());
        assert_eq!(group, Err(SpaceError::EmptyCollection));
    }

    #[test]
    fn empty_has_zero_bounds() {
        let empty = NamedRectGroup::EMPTY;
        assert!(empty.is_empty());
        assert_eq!(empty.bounds(), Rect::ZERO);
        assert_eq!(empty, NamedRectGroup::default());
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, 2.0, 3.0, 3.0);
        let ab = RectGroup::new(vec![a, b]).unwrap();
        let ba = RectGroup::new(vec![b, a]).unwrap();
        assert_eq!(ab.bounds(), ba.bounds());
        assert_ne!(ab, ba);
        assert_eq!(ab, RectGroup::new(vec![a, b]).unwrap());
    }

    #[test]
    fn labels_take_part_in_equality() {
        let r = Rect::new(0.0, 0.0, 4.0, 2.0);
        assert_ne!(NamedRect::new(r, "menu"), NamedRect::new(r, "toolbar"));
        assert_eq!(NamedRect::new(r, "menu"), NamedRect::new(r, "menu"));
    }

    #[test]
    fn empty_label_falls_back_to_center() {
        let r = Rect::new(0.0, 0.0, 4.0, 2.0);
        let named = NamedRect::new(r, "");
        assert_eq!(named.label, "(2.00, 1.00)");
        assert_eq!(named, NamedRect::unnamed(r));
        assert!(named.to_string().starts_with("NamedRect <(2.00, 1.00)>"));
    }

    #[test]
    fn rects_strip_labels() {
        let group = NamedRectGroup::new(vec![
            NamedRect::new(Rect::new(0.0, 0.0, 1.0, 1.0), "a"),
            NamedRect::new(Rect::new(1.0, 0.0, 2.0, 1.0), "b"),
        ])
        .unwrap();
        let rects: Vec<Rect> = group.rects().collect();
        assert_eq!(
            rects,
            vec![Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(1.0, 0.0, 2.0, 1.0)]
        );
        assert_eq!(
            group.normalized_bounds(Rect::new(0.0, 0.0, 4.0, 2.0)),
            Rect::new(0.0, 0.0, 0.5, 0.5)
        );
    }
}
