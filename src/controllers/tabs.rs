//! Tab switcher - exclusive selection over a fixed set of panels.
//!
//! One delegated listener on the tab bar: the click target's nearest tab
//! ancestor decides the transition, so clicks on a tab's label work and
//! clicks on bar padding fall through untouched. Exactly one tab and one
//! panel are active after every transition, paired by key.

use crate::document::{Role, SharedDocument};
use crate::state::pointer;
use crate::types::ClassSet;

use super::refs::PageRefs;
use super::Cleanup;

/// Wire the tab bar. Returns listener cleanups.
pub fn init(doc: &SharedDocument, refs: &PageRefs) -> Vec<Cleanup> {
    let doc = doc.clone();
    let tabs = refs.tabs.clone();
    let panels = refs.panels.clone();

    let cleanup = pointer::on_click(refs.tab_bar, move |event| {
        let mut doc = doc.borrow_mut();

        let clicked = event.target.and_then(|target| doc.closest(target, Role::Tab));
        let Some(clicked) = clicked else {
            return false; // bar padding
        };

        for &tab in &tabs {
            doc.remove_class(tab, ClassSet::ACTIVE);
        }
        doc.add_class(clicked, ClassSet::ACTIVE);

        for &panel in &panels {
            doc.remove_class(panel, ClassSet::ACTIVE);
        }
        if let Some(panel) = doc
            .key(clicked)
            .and_then(|key| doc.find_by_key(Role::TabPanel, key))
        {
            doc.add_class(panel, ClassSet::ACTIVE);
        }
        true
    });

    vec![Box::new(cleanup)]
}

// =============================================================================
// TESTS
// =============================================================================
