//! Intersection observation - scroll-position thresholds as explicit state.
//!
//! An [`IntersectionObserver`] watches elements and notifies its callback
//! when an element's intersection with the (margin-adjusted) viewport band
//! changes. Watching is an explicit state machine per target:
//!
//! ```text
//! Watching --unobserve--> Triggered   (terminal; no further notifications)
//! ```
//!
//! Sweeps are change-driven: a target is notified when its intersection
//! status differs from the previous sweep, plus once on the first sweep
//! after it is observed (so already-visible targets fire without moving).
//! Each notification batch carries one entry; callbacks receive a slice and
//! by contract inspect only the first entry.

use crate::document::NodeId;
use crate::types::Band;

// =============================================================================
// TYPES
// =============================================================================

/// Observation tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction required to count as intersecting. At 0.0 any
    /// overlap counts.
    pub threshold: f32,
    /// Rows added to (or, negative, removed from) both viewport edges before
    /// testing.
    pub root_margin: i32,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: 0,
        }
    }
}

/// One observation delivered to a callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    /// Visible fraction of the target, in `[0, 1]`.
    pub ratio: f32,
}

/// Per-target watch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Watching,
    /// Released; the target will never be notified again.
    Triggered,
}

struct Watcher {
    target: NodeId,
    state: WatchState,
    last_intersecting: Option<bool>,
}

/// Handed to callbacks so they can release targets mid-notification.
#[derive(Default)]
pub struct ObserverCtl {
    released: Vec<NodeId>,
}

impl ObserverCtl {
    /// Release `target`: its watcher transitions to [`WatchState::Triggered`]
    /// once the current batch finishes.
    pub fn unobserve(&mut self, target: NodeId) {
        self.released.push(target);
    }
}

/// Callback invoked per notification batch.
pub type ObserverCallback = Box<dyn Fn(&[IntersectionEntry], &mut ObserverCtl)>;

// =============================================================================
// OBSERVER
// =============================================================================

/// Watches a set of targets against the viewport.
pub struct IntersectionObserver {
    options: ObserverOptions,
    watchers: Vec<Watcher>,
    callback: ObserverCallback,
}

impl IntersectionObserver {
    pub fn new<F>(options: ObserverOptions, callback: F) -> Self
    where
        F: Fn(&[IntersectionEntry], &mut ObserverCtl) + 'static,
    {
        Self {
            options,
            watchers: Vec::new(),
            callback: Box::new(callback),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Start watching `target`. Re-observing an existing target is a no-op.
    pub fn observe(&mut self, target: NodeId) {
        if self.watchers.iter().any(|w| w.target == target) {
            return;
        }
        self.watchers.push(Watcher {
            target,
            state: WatchState::Watching,
            last_intersecting: None,
        });
    }

    /// Release `target` explicitly.
    pub fn unobserve(&mut self, target: NodeId) {
        if let Some(watcher) = self.watchers.iter_mut().find(|w| w.target == target) {
            watcher.state = WatchState::Triggered;
        }
    }

    /// Watch state for `target`, if it was ever observed.
    pub fn state_of(&self, target: NodeId) -> Option<WatchState> {
        self.watchers
            .iter()
            .find(|w| w.target == target)
            .map(|w| w.state)
    }

    pub fn is_watching(&self, target: NodeId) -> bool {
        self.state_of(target) == Some(WatchState::Watching)
    }

    /// Number of targets still being watched.
    pub fn watching_count(&self) -> usize {
        self.watchers
            .iter()
            .filter(|w| w.state == WatchState::Watching)
            .count()
    }

    /// Test every watched target against `view` and notify changes.
    ///
    /// `band_of` supplies a target's current page band.
    pub fn sweep<F>(&mut self, view: Band, band_of: F)
    where
        F: Fn(NodeId) -> Band,
    {
        let adjusted = view.expand(self.options.root_margin);

        // Evaluate first: the callback must not observe a half-updated set.
        let mut pending: Vec<IntersectionEntry> = Vec::new();
        for watcher in &mut self.watchers {
            if watcher.state != WatchState::Watching {
                continue;
            }
            let ratio = band_of(watcher.target).visible_ratio(&adjusted);
            let is_intersecting = if self.options.threshold > 0.0 {
                ratio >= self.options.threshold
            } else {
                ratio > 0.0
            };
            if watcher.last_intersecting != Some(is_intersecting) {
                watcher.last_intersecting = Some(is_intersecting);
                pending.push(IntersectionEntry {
                    target: watcher.target,
                    is_intersecting,
                    ratio,
                });
            }
        }

        // One single-entry batch per changed target: nothing is discarded by
        // the first-entry-only contract, and released targets are dropped
        // before their batch would fire.
        for entry in pending {
            let watching = self
                .watchers
                .iter()
                .any(|w| w.target == entry.target && w.state == WatchState::Watching);
            if !watching {
                continue;
            }
            let mut ctl = ObserverCtl::default();
            (self.callback)(&[entry], &mut ctl);
            for target in ctl.released {
                self.unobserve(target);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
