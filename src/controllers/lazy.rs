//! Lazy image loading.
//!
//! Deferred images are watched with a proximity margin. On first proximity
//! the real source replaces the placeholder and the watcher is released
//! immediately - not when the load finishes. The load itself completes on a
//! later tick; only then does the placeholder blur treatment come off.

use std::cell::RefCell;
use std::rc::Rc;

use crate::document::{NodeId, SharedDocument};
use crate::observe::{IntersectionObserver, ObserverOptions};
use crate::types::ClassSet;

use super::refs::PageRefs;

/// Tracks swapped images whose load has not yet completed.
pub struct LazyLoader {
    doc: SharedDocument,
    loading: RefCell<Vec<NodeId>>,
}

impl LazyLoader {
    /// Images swapped but not yet finished loading.
    pub fn loading_count(&self) -> usize {
        self.loading.borrow().len()
    }

    /// Swap in the real source for `image` and queue its load.
    fn begin_load(&self, image: NodeId) {
        let mut doc = self.doc.borrow_mut();
        let Some(real) = doc.deferred_src(image).map(str::to_owned) else {
            return;
        };
        doc.set_src(image, real);
        drop(doc);
        self.loading.borrow_mut().push(image);
    }

    /// Finish pending loads: the blur treatment comes off each image.
    ///
    /// Called once per event-loop tick; the terminal "decodes" instantly, so
    /// every queued load completes on the tick after its swap.
    pub fn complete_loads(&self) {
        let done: Vec<NodeId> = self.loading.borrow_mut().drain(..).collect();
        let mut doc = self.doc.borrow_mut();
        for image in done {
            doc.remove_class(image, ClassSet::BLURRED);
        }
    }
}

/// Build the proximity observer over every deferred image. `margin` is in
/// rows ahead of the viewport.
pub fn init(
    doc: &SharedDocument,
    refs: &PageRefs,
    margin: i32,
) -> (Rc<LazyLoader>, IntersectionObserver) {
    let loader = Rc::new(LazyLoader {
        doc: doc.clone(),
        loading: RefCell::new(Vec::new()),
    });

    let inner = loader.clone();
    let mut observer = IntersectionObserver::new(
        ObserverOptions {
            threshold: 0.0,
            root_margin: margin,
        },
        move |entries, ctl| {
            let Some(entry) = entries.first() else {
                return;
            };
            if !entry.is_intersecting {
                return;
            }
            inner.begin_load(entry.target);
            // Released on the swap, not on load completion.
            ctl.unobserve(entry.target);
        },
    );
    for &image in &refs.images {
        observer.observe(image);
    }

    (loader, observer)
}

// =============================================================================
// TESTS
// =============================================================================
