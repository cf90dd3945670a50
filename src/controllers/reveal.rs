//! Section reveal.
//!
//! Every content section starts veiled. The first time a section reaches the
//! visibility threshold it is unveiled and its watcher released - the
//! transition is irreversible and happens at most once per section.

use crate::document::SharedDocument;
use crate::observe::{IntersectionObserver, ObserverOptions};
use crate::types::ClassSet;

use super::refs::PageRefs;

/// Veil all sections and build their observer.
pub fn init(doc: &SharedDocument, refs: &PageRefs, threshold: f32) -> IntersectionObserver {
    {
        let mut doc = doc.borrow_mut();
        for &section in &refs.sections {
            doc.add_class(section, ClassSet::VEILED);
        }
    }

    let doc = doc.clone();
    let mut observer = IntersectionObserver::new(
        ObserverOptions {
            threshold,
            root_margin: 0,
        },
        move |entries, ctl| {
            let Some(entry) = entries.first() else {
                return;
            };
            if !entry.is_intersecting {
                return;
            }
            doc.borrow_mut().remove_class(entry.target, ClassSet::VEILED);
            ctl.unobserve(entry.target);
        },
    );
    for &section in &refs.sections {
        observer.observe(section);
    }
    observer
}

// =============================================================================
// TESTS
// =============================================================================
