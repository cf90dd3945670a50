//! Sticky header.
//!
//! A sentinel ends the header; its observer runs with a root margin of minus
//! the nav's rendered height, so the stuck state engages exactly when the
//! nav would start overlapping content. The state is reversible: scrolling
//! back up releases it.

use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::document::{NodeId, SharedDocument};
use crate::observe::{IntersectionObserver, ObserverOptions};
use crate::types::ClassSet;

use super::refs::PageRefs;

/// Whether the nav is pinned to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickyState {
    Normal,
    Stuck,
}

/// Observable sticky state.
pub struct StickyController {
    state: Signal<StickyState>,
}

impl StickyController {
    pub fn state(&self) -> StickyState {
        self.state.get()
    }

    pub fn is_stuck(&self) -> bool {
        self.state.get() == StickyState::Stuck
    }
}

/// Build the sentinel observer. `nav_height` is the nav's rendered height
/// from layout, measured once at init.
pub fn init(
    doc: &SharedDocument,
    refs: &PageRefs,
    nav_height: i32,
) -> (Rc<StickyController>, IntersectionObserver) {
    let controller = Rc::new(StickyController {
        state: signal(StickyState::Normal),
    });

    let doc = doc.clone();
    let nav: NodeId = refs.nav;
    let ctl = controller.clone();
    let mut observer = IntersectionObserver::new(
        ObserverOptions {
            threshold: 0.0,
            root_margin: -nav_height,
        },
        move |entries, _ctl| {
            let Some(entry) = entries.first() else {
                return;
            };
            let mut doc = doc.borrow_mut();
            if entry.is_intersecting {
                doc.remove_class(nav, ClassSet::STICKY);
                drop(doc);
                ctl.state.set(StickyState::Normal);
            } else {
                doc.add_class(nav, ClassSet::STICKY);
                drop(doc);
                ctl.state.set(StickyState::Stuck);
            }
        },
    );
    observer.observe(refs.sentinel);

    (controller, observer)
}

// =============================================================================
// TESTS
// =============================================================================
