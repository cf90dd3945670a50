//! Constructors for the fixed landing-page structure.
//!
//! The markup of the page is an external contract: controllers address the
//! elements built here by role and key. These functions author that structure
//! piece by piece; [`standard`] assembles the canonical page the demo runs.

use super::{Document, Element, NodeId, Role};
use crate::types::ClassSet;

/// Build the page header: brand logo, navigation links, an open-modal
/// trigger, the hero copy with its scroll call-to-action, and the sticky
/// sentinel that ends the header.
///
/// `links` pairs a section key with a label.
pub fn header(doc: &mut Document, logo: &str, links: &[(&str, &str)], hero_rows: u16) -> NodeId {
    let root = doc.root();
    let header = doc.append(root, Element::new(Role::Header));

    let nav = doc.append(header, Element::new(Role::Nav).rows(3));
    doc.append(nav, Element::new(Role::NavLogo).text(logo).rows(1));
    let nav_links = doc.append(nav, Element::new(Role::NavLinks).rows(1));
    for (key, label) in links {
        doc.append(
            nav_links,
            Element::new(Role::NavLink).text(*label).key(*key).rows(1),
        );
    }
    doc.append(
        nav,
        Element::new(Role::OpenModal).text("Open account").rows(1),
    );

    doc.append(
        header,
        Element::new(Role::Heading)
            .text("When banking meets minimalism")
            .rows(hero_rows),
    );
    doc.append(
        header,
        Element::new(Role::ScrollCta).text("Learn more v").rows(1),
    );
    doc.append(header, Element::new(Role::Sentinel));

    header
}

/// Build an empty content section tagged with `key`.
pub fn section(doc: &mut Document, key: &str, title: &str) -> NodeId {
    let root = doc.root();
    let section = doc.append(root, Element::new(Role::Section).key(key));
    doc.append(section, Element::new(Role::Heading).text(title).rows(2));
    section
}

/// Append body copy to a section.
pub fn paragraph(doc: &mut Document, parent: NodeId, text: &str, rows: u16) -> NodeId {
    doc.append(parent, Element::new(Role::Paragraph).text(text).rows(rows))
}

/// Append an image whose real content loads lazily.
pub fn deferred_image(
    doc: &mut Document,
    parent: NodeId,
    placeholder: &str,
    real: &str,
) -> NodeId {
    doc.append(
        parent,
        Element::new(Role::Image).deferred(placeholder, real).rows(4),
    )
}

/// Build a tab group: a tab bar plus one content panel per entry, paired by
/// key. The first tab and panel start active.
pub fn tab_group(doc: &mut Document, parent: NodeId, tabs: &[(&str, &str, &str)]) -> NodeId {
    let bar = doc.append(parent, Element::new(Role::TabBar).rows(1));
    for (i, (key, label, _)) in tabs.iter().enumerate() {
        let mut tab = Element::new(Role::Tab).text(*label).key(*key).rows(1);
        if i == 0 {
            tab = tab.classes(ClassSet::ACTIVE);
        }
        doc.append(bar, tab);
    }
    for (i, (key, _, content)) in tabs.iter().enumerate() {
        let mut panel = Element::new(Role::TabPanel).text(*content).key(*key).rows(4);
        if i == 0 {
            panel = panel.classes(ClassSet::ACTIVE);
        }
        doc.append(parent, panel);
    }
    bar
}

/// Build the slider: the slides in order, the prev/next controls and the
/// (initially empty) dot rail the carousel fills at init.
pub fn slider(doc: &mut Document, parent: NodeId, slides: &[&str]) -> NodeId {
    let slider = doc.append(parent, Element::new(Role::Slider).rows(6));
    for (i, text) in slides.iter().enumerate() {
        doc.append(slider, Element::new(Role::Slide).text(*text).ordinal(i));
    }
    doc.append(slider, Element::new(Role::SliderPrev).text("<").rows(1));
    doc.append(slider, Element::new(Role::SliderNext).text(">").rows(1));
    doc.append(slider, Element::new(Role::DotRail).rows(1));
    slider
}

/// Build the modal dialog and its backdrop, both hidden at rest.
pub fn modal(doc: &mut Document, title: &str, body: &str) -> (NodeId, NodeId) {
    let root = doc.root();
    let backdrop = doc.append(
        root,
        Element::new(Role::Backdrop).classes(ClassSet::HIDDEN),
    );
    let modal = doc.append(
        root,
        Element::new(Role::Modal)
            .text(title)
            .rows(8)
            .classes(ClassSet::HIDDEN),
    );
    doc.append(modal, Element::new(Role::Paragraph).text(body).rows(2));
    doc.append(modal, Element::new(Role::CloseModal).text("x").rows(1));
    (modal, backdrop)
}

/// The canonical landing page: header, four sections (copy + lazy images,
/// tabbed operations, testimonial slider, sign-up trigger) and the modal.
pub fn standard() -> Document {
    let mut doc = Document::new();

    header(
        &mut doc,
        "vitrine",
        &[
            ("features", "Features"),
            ("operations", "Operations"),
            ("testimonials", "Testimonials"),
        ],
        6,
    );

    let features = section(&mut doc, "features", "Everything you need");
    paragraph(
        &mut doc,
        features,
        "A simpler balance sheet. No branches, no paper, no queues.",
        2,
    );
    deferred_image(&mut doc, features, "grid.lo", "grid.png");
    paragraph(
        &mut doc,
        features,
        "Instant transfers, instant loans, instant closing.",
        2,
    );
    deferred_image(&mut doc, features, "card.lo", "card.png");

    let operations = section(&mut doc, "operations", "Operations, simplified");
    tab_group(
        &mut doc,
        operations,
        &[
            ("transfers", "Transfers", "Move money in seconds, to anyone."),
            ("loans", "Loans", "Buy a home or make your dreams real."),
            ("closing", "Closing", "No longer need the account? Close it."),
        ],
    );

    let testimonials = section(&mut doc, "testimonials", "Millions already on board");
    slider(
        &mut doc,
        testimonials,
        &[
            "Best financial decision I ever made.",
            "The last step to becoming a complete minimalist.",
            "Finally free from old-school banks.",
        ],
    );

    let signup = section(&mut doc, "signup", "Join today, cancel anytime");
    doc.append(
        signup,
        Element::new(Role::OpenModal)
            .text("Start your free trial")
            .rows(1),
    );

    modal(
        &mut doc,
        "Open your free account",
        "A flat fee of nothing at all. Takes five minutes.",
    );

    doc
}

// =============================================================================
// TESTS
// =============================================================================
