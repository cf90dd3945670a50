//! Nav hover dimmer.
//!
//! Hovering a navigation link fades the sibling links and the brand logo to
//! a configured level; leaving restores full opacity. The fade level is
//! bound per listener - one listener carries the dim level, the other 1.0 -
//! and both guard against hover events bubbling from non-link children.

use crate::document::{NodeId, Role, SharedDocument};
use crate::state::pointer::{self, HoverEvent, HoverPhase};

use super::refs::PageRefs;
use super::Cleanup;

/// Full opacity, restored on hover exit.
const OPAQUE: f32 = 1.0;

/// Set every sibling link (and the logo) to `level`, leaving `hovered`
/// untouched.
fn fade(doc: &SharedDocument, links: &[NodeId], logo: NodeId, hovered: NodeId, level: f32) {
    let mut doc = doc.borrow_mut();
    for &link in links {
        if link != hovered {
            doc.set_opacity(link, level);
        }
    }
    doc.set_opacity(logo, level);
}

/// A hover listener with its fade level bound in.
fn listener(
    doc: SharedDocument,
    links: Vec<NodeId>,
    logo: NodeId,
    phase: HoverPhase,
    level: f32,
) -> impl Fn(&HoverEvent) {
    move |event| {
        if event.phase != phase {
            return;
        }
        // Only links trigger the effect; the logo or nav padding do not.
        if doc.borrow().role(event.target) != Role::NavLink {
            return;
        }
        fade(&doc, &links, logo, event.target, level);
    }
}

/// Wire the dimmer onto the nav. Returns listener cleanups.
pub fn init(doc: &SharedDocument, refs: &PageRefs, dim: f32) -> Vec<Cleanup> {
    let enter = pointer::on_hover(
        refs.nav,
        listener(
            doc.clone(),
            refs.links.clone(),
            refs.nav_logo,
            HoverPhase::Enter,
            dim,
        ),
    );
    let exit = pointer::on_hover(
        refs.nav,
        listener(
            doc.clone(),
            refs.links.clone(),
            refs.nav_logo,
            HoverPhase::Exit,
            OPAQUE,
        ),
    );
    vec![Box::new(enter), Box::new(exit)]
}

// =============================================================================
// TESTS
// =============================================================================
