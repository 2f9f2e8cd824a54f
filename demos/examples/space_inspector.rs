// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text-mode preview of positive and negative space.
//!
//! Each rectangle is scaled into a fixed-size character grid with `scale_into`.
//! Positive space is drawn with `#`, negative space with `.`, and anything left blank was
//! dropped as a sliver.
//!
//! Run:
//! - `cargo run -p understory_space_demos --example space_inspector`

use kurbo::{Insets, Rect, RoundedRectRadii, Size};
use understory_space::{ElementFootprint, NamedRectGroup, SpaceAnalyzer, scale_into};

const COLUMNS: usize = 64;
const ROWS: usize = 24;

fn paint(grid: &mut [[char; COLUMNS]; ROWS], group: &NamedRectGroup, canvas: Rect, glyph: char) {
    let preview = Size::new(COLUMNS as f64, ROWS as f64);
    for rect in group.rects() {
        let cells = scale_into(rect, canvas, preview);
        let (c0, c1) = (cells.x0.round() as usize, cells.x1.round() as usize);
        let (r0, r1) = (cells.y0.round() as usize, cells.y1.round() as usize);
        for row in grid.iter_mut().take(r1.min(ROWS)).skip(r0) {
            for cell in row.iter_mut().take(c1.min(COLUMNS)).skip(c0) {
                *cell = glyph;
            }
        }
    }
}

fn print_group(title: &str, group: &NamedRectGroup) {
    println!("{title}: {group}");
    for named in group.collection() {
        println!("  {named}");
    }
}

fn main() {
    let canvas = Rect::new(0.0, 0.0, 1600.0, 900.0);
    let footprints = [
        ElementFootprint::from_rect(Rect::new(0.0, 0.0, 1600.0, 60.0), "menu bar"),
        ElementFootprint::from_rect(Rect::new(0.0, 60.0, 300.0, 900.0), "hierarchy"),
        ElementFootprint::from_element(
            Rect::new(1250.0, 60.0, 1600.0, 900.0),
            Insets::uniform(10.0),
            RoundedRectRadii::from_single_radius(40.0),
            "inspector",
        ),
        ElementFootprint::from_element(
            Rect::new(700.0, 780.0, 1000.0, 860.0),
            Insets::ZERO,
            RoundedRectRadii::from_single_radius(20.0),
            "",
        ),
    ];

    let spaces = SpaceAnalyzer::new().reduce(canvas, &footprints);

    let mut grid = [[' '; COLUMNS]; ROWS];
    paint(&mut grid, &spaces.negative, canvas, '.');
    paint(&mut grid, &spaces.positive, canvas, '#');
    for row in &grid {
        println!("{}", row.iter().collect::<String>());
    }

    print_group("positive", &spaces.positive);
    print_group("negative", &spaces.negative);
}
