// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side flags and slicing axes used by the rectangle predicates.

use crate::error::SpaceError;

bitflags::bitflags! {
    /// Which boundaries of a reference rectangle a comparison touches or overlaps.
    ///
    /// Single-bit flags name one side; combinations of two adjacent sides name a corner.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Sides: u8 {
        /// The minimum-x (left) side.
        const X_MIN = 0b0000_0001;
        /// The minimum-y side.
        const Y_MIN = 0b0000_0010;
        /// The maximum-x (right) side.
        const X_MAX = 0b0000_0100;
        /// The maximum-y side.
        const Y_MAX = 0b0000_1000;

        /// Corner shared by [`Sides::X_MIN`] and [`Sides::Y_MIN`].
        const X0Y0 = Self::X_MIN.bits() | Self::Y_MIN.bits();
        /// Corner shared by [`Sides::X_MAX`] and [`Sides::Y_MIN`].
        const X1Y0 = Self::X_MAX.bits() | Self::Y_MIN.bits();
        /// Corner shared by [`Sides::X_MAX`] and [`Sides::Y_MAX`].
        const X1Y1 = Self::X_MAX.bits() | Self::Y_MAX.bits();
        /// Corner shared by [`Sides::X_MIN`] and [`Sides::Y_MAX`].
        const X0Y1 = Self::X_MIN.bits() | Self::Y_MAX.bits();

        /// All four sides.
        const ALL = Self::X_MIN.bits() | Self::Y_MIN.bits() | Self::X_MAX.bits() | Self::Y_MAX.bits();
    }
}

impl Sides {
    /// The single-side flags, in the order the predicates evaluate them.
    pub const SINGLE: [Self; 4] = [Self::X_MIN, Self::Y_MIN, Self::X_MAX, Self::Y_MAX];

    /// Convert raw bits into side flags, rejecting bits outside the four sides.
    pub fn try_from_bits(bits: u8) -> Result<Self, SpaceError> {
        Self::from_bits(bits).ok_or(SpaceError::InvalidSides(bits))
    }
}

/// Which dimension an intersection-slicing operation constrains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// No axis: compute the plain intersection.
    #[default]
    None,
    /// Constrain the horizontal extent.
    X,
    /// Constrain the vertical extent.
    Y,
}
