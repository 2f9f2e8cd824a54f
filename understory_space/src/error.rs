// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for invalid arguments.
//!
//! Degenerate geometry (zero-area rectangles, an empty canvas) is never an error; those
//! inputs resolve to documented empty or whole results instead.

/// Invalid-argument conditions raised by the rectangle operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpaceError {
    /// Encapsulation requires at least one rectangle.
    #[error("cannot encapsulate an empty collection of rects")]
    EmptyCollection,
    /// Raw side bits that do not name any combination of the four sides.
    #[error("side flags out of range: {0:#06b}")]
    InvalidSides(u8),
}
