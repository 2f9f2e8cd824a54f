// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keep a 3D camera viewport inside the negative space of a resizable editor layout.
//!
//! This example shows how to combine:
//! - `collect_footprints` to pick the occluding elements out of a flattened UI tree,
//! - `SpaceMinder` to recompute spaces and notify only on change,
//! - `ViewportApplier` to push the flipped negative-space bounds into a camera.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_space_demos --example sidebar_viewport`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Insets, Rect, RoundedRectRadii};
use tracing_subscriber::EnvFilter;
use understory_space::{
    AnalyzeParams, DEFAULT_MIN_ELEMENT_AREA, ElementSnapshot, SpaceAnalyzer, SpaceChange,
    SpaceMinder, Viewport, ViewportApplier, collect_footprints,
};

/// Stand-in for an engine camera.
#[derive(Debug, Default)]
struct Camera {
    rect: Rect,
}

impl Viewport for Camera {
    fn set_normalized_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

fn layout(canvas: Rect, sidebar_width: f64, show_toolbar: bool) -> Vec<ElementSnapshot> {
    vec![
        ElementSnapshot {
            world_bounds: canvas,
            background_alpha: 0.0,
            label: "root".into(),
            ..ElementSnapshot::default()
        },
        ElementSnapshot {
            world_bounds: Rect::new(canvas.x0, canvas.y0, canvas.x0 + sidebar_width, canvas.y1),
            parent: Some(0),
            label: "hierarchy".into(),
            ..ElementSnapshot::default()
        },
        ElementSnapshot {
            world_bounds: Rect::new(canvas.x0, canvas.y0, canvas.x1, canvas.y0 + 40.0),
            margins: Insets::new(0.0, 0.0, 0.0, 4.0),
            radii: RoundedRectRadii::new(0.0, 0.0, 8.0, 8.0),
            visible: show_toolbar,
            parent: Some(0),
            label: "toolbar".into(),
            ..ElementSnapshot::default()
        },
        // Half-transparent tooltip: never occludes.
        ElementSnapshot {
            world_bounds: Rect::new(600.0, 300.0, 760.0, 340.0),
            opacity: 0.6,
            parent: Some(0),
            label: "tooltip".into(),
            ..ElementSnapshot::default()
        },
    ]
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let canvas = Rect::new(0.0, 0.0, 1280.0, 720.0);
    let camera = Rc::new(RefCell::new(Camera::default()));

    let mut minder = SpaceMinder::new(SpaceAnalyzer::with_params(AnalyzeParams::default()));
    minder.subscribe(|change: &SpaceChange<'_>| {
        println!(
            "{:?} space changed: {} rect(s), normalized {:?}",
            change.kind,
            change.group.len(),
            change.normalized_bounds
        );
    });
    minder.subscribe(ViewportApplier::new(vec![camera.clone()]));

    // The second frame repeats the first and should stay quiet.
    let frames = [(240.0, true), (240.0, true), (320.0, true), (320.0, false)];
    for (frame, (sidebar_width, show_toolbar)) in frames.into_iter().enumerate() {
        let elements = layout(canvas, sidebar_width, show_toolbar);
        let footprints = collect_footprints(&elements, DEFAULT_MIN_ELEMENT_AREA);
        minder.analyze(canvas, &footprints, false);
        println!("frame {frame}: camera rect {:?}", camera.borrow().rect);
    }
}
