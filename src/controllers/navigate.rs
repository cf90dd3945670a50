//! Smooth-scroll navigation.
//!
//! The call-to-action under the hero scrolls to the landing section. Clicks
//! inside the nav-link container are delegated: a recognized link resolves
//! its fragment key to a section and scrolls there; anything else in the
//! container is consumed without scrolling.

use std::cell::RefCell;
use std::rc::Rc;

use crate::document::{Role, SharedDocument};
use crate::layout::ComputedLayout;
use crate::state::pointer;
use crate::state::viewport::Viewport;

use super::refs::PageRefs;
use super::Cleanup;

/// Wire the scroll triggers. Returns listener cleanups.
pub fn init(
    doc: &SharedDocument,
    viewport: &Rc<Viewport>,
    layout: &Rc<RefCell<ComputedLayout>>,
    refs: &PageRefs,
) -> Vec<Cleanup> {
    let mut cleanups: Vec<Cleanup> = Vec::new();

    let landing = refs.landing_section;
    let vp = viewport.clone();
    let lay = layout.clone();
    cleanups.push(Box::new(pointer::on_click(refs.scroll_cta, move |_event| {
        vp.animate_to(lay.borrow().band(landing).top);
        true
    })));

    let doc = doc.clone();
    let vp = viewport.clone();
    let lay = layout.clone();
    cleanups.push(Box::new(pointer::on_click(refs.nav_links, move |event| {
        let doc = doc.borrow();
        let Some(target) = event.target else {
            return true;
        };
        // Only real links navigate; the container itself (padding) does not.
        if doc.role(target) != Role::NavLink {
            return true;
        }
        if let Some(section) = doc
            .key(target)
            .and_then(|fragment| doc.find_by_key(Role::Section, fragment))
        {
            vp.animate_to(lay.borrow().band(section).top);
        }
        true
    })));

    cleanups
}

// =============================================================================
// TESTS
// =============================================================================
