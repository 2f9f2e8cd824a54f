// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cached analysis with change notifications.
//!
//! [`SpaceMinder`] remembers the result of its last pass. Each new pass compares the fresh
//! groups against the cache and notifies listeners of the ones that changed, positive space
//! first.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::analyzer::{SpaceAnalyzer, Spaces};
use crate::footprint::ElementFootprint;
use crate::group::NamedRectGroup;

/// Which half of the analysis a change concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpaceKind {
    /// Space covered by occluding elements.
    Positive,
    /// Space left uncovered.
    Negative,
}

/// A notification that one group differs from the previous pass (or that a pass was forced).
#[derive(Clone, Copy, Debug)]
pub struct SpaceChange<'a> {
    /// Which group changed.
    pub kind: SpaceKind,
    /// The new group.
    pub group: &'a NamedRectGroup,
    /// Canvas the group was computed against.
    pub canvas: Rect,
    /// The group's bounds normalized against `canvas`.
    pub normalized_bounds: Rect,
}

/// Receiver of [`SpaceChange`] notifications.
///
/// Any `FnMut(&SpaceChange<'_>)` closure is a listener.
pub trait SpaceListener {
    /// Called synchronously from [`SpaceMinder::analyze`].
    fn on_space_changed(&mut self, change: &SpaceChange<'_>);
}

impl<F> SpaceListener for F
where
    F: FnMut(&SpaceChange<'_>),
{
    fn on_space_changed(&mut self, change: &SpaceChange<'_>) {
        self(change);
    }
}

/// Handle returned by [`SpaceMinder::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Runs analysis passes, caches their results, and notifies listeners of changes.
///
/// Listeners are invoked in registration order. Within one pass the positive-space
/// notification always precedes the negative-space one.
pub struct SpaceMinder {
    analyzer: SpaceAnalyzer,
    last_canvas: Rect,
    spaces: Spaces,
    listeners: Vec<(ListenerId, Box<dyn SpaceListener>)>,
    next_id: u64,
}

impl fmt::Debug for SpaceMinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceMinder")
            .field("analyzer", &self.analyzer)
            .field("last_canvas", &self.last_canvas)
            .field("spaces", &self.spaces)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for SpaceMinder {
    fn default() -> Self {
        Self::new(SpaceAnalyzer::default())
    }
}

impl SpaceMinder {
    /// A minder with an empty cache and no listeners.
    pub fn new(analyzer: SpaceAnalyzer) -> Self {
        Self {
            analyzer,
            last_canvas: Rect::ZERO,
            spaces: Spaces::default(),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Register `listener`, to be called after every listener registered before it.
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: SpaceListener + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Recompute both groups for `canvas` and `footprints`.
    ///
    /// Listeners hear about each group that differs structurally from the previous pass, or
    /// about both when `force_notify` is set. The cache is replaced either way.
    pub fn analyze(
        &mut self,
        canvas: Rect,
        footprints: &[ElementFootprint],
        force_notify: bool,
    ) -> &Spaces {
        let fresh = self.analyzer.reduce(canvas, footprints);
        let positive_changed = force_notify || fresh.positive != self.spaces.positive;
        let negative_changed = force_notify || fresh.negative != self.spaces.negative;

        self.last_canvas = canvas;
        self.spaces = fresh;

        if positive_changed {
            self.notify(SpaceKind::Positive);
        }
        if negative_changed {
            self.notify(SpaceKind::Negative);
        }
        &self.spaces
    }

    fn notify(&mut self, kind: SpaceKind) {
        let group = match kind {
            SpaceKind::Positive => &self.spaces.positive,
            SpaceKind::Negative => &self.spaces.negative,
        };
        let change = SpaceChange {
            kind,
            group,
            canvas: self.last_canvas,
            normalized_bounds: group.normalized_bounds(self.last_canvas),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            kind = ?kind,
            bounds = ?group.bounds(),
            normalized = ?change.normalized_bounds,
            listeners = self.listeners.len(),
            "space changed"
        );

        for (_, listener) in &mut self.listeners {
            listener.on_space_changed(&change);
        }
    }

    /// Results of the last pass.
    pub fn spaces(&self) -> &Spaces {
        &self.spaces
    }

    /// Positive space from the last pass.
    pub fn positive(&self) -> &NamedRectGroup {
        &self.spaces.positive
    }

    /// Negative space from the last pass.
    pub fn negative(&self) -> &NamedRectGroup {
        &self.spaces.negative
    }

    /// Canvas of the last pass, or [`Rect::ZERO`] before the first.
    pub fn last_known_canvas(&self) -> Rect {
        self.last_canvas
    }

    /// The analyzer used for each pass.
    pub fn analyzer(&self) -> &SpaceAnalyzer {
        &self.analyzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    const CANVAS: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    type Log = Rc<RefCell<Vec<(usize, SpaceKind, Rect)>>>;

    fn recorder(log: &Log, tag: usize) -> impl FnMut(&SpaceChange<'_>) + 'static {
        let log = log.clone();
        move |change| {
            log.borrow_mut()
                .push((tag, change.kind, change.normalized_bounds));
        }
    }

    fn sidebar() -> ElementFootprint {
        ElementFootprint::from_rect(Rect::new(0.0, 0.0, 30.0, 100.0), "sidebar")
    }

    #[test]
    fn positive_is_announced_before_negative() {
        let log = Log::default();
        let mut minder = SpaceMinder::default();
        minder.subscribe(recorder(&log, 0));
        minder.subscribe(recorder(&log, 1));

        minder.analyze(CANVAS, &[sidebar()], false);

        assert_eq!(
            *log.borrow(),
            vec![
                (0, SpaceKind::Positive, Rect::new(0.0, 0.0, 0.3, 1.0)),
                (1, SpaceKind::Positive, Rect::new(0.0, 0.0, 0.3, 1.0)),
                (0, SpaceKind::Negative, Rect::new(0.3, 0.0, 1.0, 1.0)),
                (1, SpaceKind::Negative, Rect::new(0.3, 0.0, 1.0, 1.0)),
            ]
        );
    }

    #[test]
    fn unchanged_groups_are_not_announced() {
        let log = Log::default();
        let mut minder = SpaceMinder::default();
        minder.subscribe(recorder(&log, 0));

        minder.analyze(CANVAS, &[sidebar()], false);
        log.borrow_mut().clear();

        minder.analyze(CANVAS, &[sidebar()], false);
        assert!(log.borrow().is_empty());

        minder.analyze(CANVAS, &[sidebar()], true);
        let kinds: Vec<SpaceKind> = log.borrow().iter().map(|(_, k, _)| *k).collect();
        assert_eq!(kinds, vec![SpaceKind::Positive, SpaceKind::Negative]);
    }

    #[test]
    fn empty_positive_space_only_announces_negative() {
        let log = Log::default();
        let mut minder = SpaceMinder::default();
        minder.subscribe(recorder(&log, 0));

        let spaces = minder.analyze(CANVAS, &[], false);
        assert_eq!(spaces.positive, NamedRectGroup::EMPTY);
        assert_eq!(spaces.negative.bounds(), CANVAS);
        assert_eq!(
            *log.borrow(),
            vec![(0, SpaceKind::Negative, Rect::new(0.0, 0.0, 1.0, 1.0))]
        );
    }

    #[test]
    fn cache_tracks_latest_pass() {
        let mut minder = SpaceMinder::default();
        assert_eq!(minder.last_known_canvas(), Rect::ZERO);

        minder.analyze(CANVAS, &[sidebar()], false);
        let wide = Rect::new(0.0, 0.0, 200.0, 100.0);
        minder.analyze(wide, &[], false);

        assert_eq!(minder.last_known_canvas(), wide);
        assert_eq!(minder.positive(), &NamedRectGroup::EMPTY);
        assert_eq!(minder.negative().bounds(), wide);
    }

    #[test]
    fn unsubscribed_listeners_go_quiet() {
        let log = Log::default();
        let mut minder = SpaceMinder::default();
        let first = minder.subscribe(recorder(&log, 0));
        minder.subscribe(recorder(&log, 1));

        assert!(minder.unsubscribe(first));
        assert!(!minder.unsubscribe(first));
        assert_eq!(minder.listener_count(), 1);

        minder.analyze(CANVAS, &[sidebar()], false);
        assert!(log.borrow().iter().all(|(tag, _, _)| *tag == 1));
        assert_eq!(log.borrow().len(), 2);
    }
}
