//! Bound element handles.
//!
//! Instead of scattered document lookups, initialization binds every element
//! the controllers address into one bundle up front. A missing element is an
//! initialization-time fatal: the page structure is a build-time guarantee,
//! not runtime input.

use crate::document::{Document, NodeId, Role};
use crate::error::PageError;

/// Every element the eight controllers touch, bound once.
#[derive(Debug, Clone)]
pub struct PageRefs {
    pub header: NodeId,
    /// Marker at the end of the header; drives the sticky observer.
    pub sentinel: NodeId,
    pub nav: NodeId,
    pub nav_logo: NodeId,
    pub nav_links: NodeId,
    pub links: Vec<NodeId>,
    pub scroll_cta: NodeId,
    /// Where the scroll call-to-action lands: the first content section.
    pub landing_section: NodeId,

    pub modal: NodeId,
    pub backdrop: NodeId,
    pub open_modal_buttons: Vec<NodeId>,
    pub close_modal: NodeId,

    pub tab_bar: NodeId,
    pub tabs: Vec<NodeId>,
    pub panels: Vec<NodeId>,

    pub sections: Vec<NodeId>,
    /// Images carrying a deferred source (may be empty).
    pub images: Vec<NodeId>,

    pub slider: NodeId,
    pub slides: Vec<NodeId>,
    pub prev_control: NodeId,
    pub next_control: NodeId,
    pub dot_rail: NodeId,
}

fn require(found: Option<NodeId>, name: &'static str) -> Result<NodeId, PageError> {
    found.ok_or(PageError::MissingElement(name))
}

fn require_some(found: Vec<NodeId>, name: &'static str) -> Result<Vec<NodeId>, PageError> {
    if found.is_empty() {
        Err(PageError::MissingElement(name))
    } else {
        Ok(found)
    }
}

impl PageRefs {
    /// Bind against the document. Fails on the first missing element.
    pub fn bind(doc: &Document) -> Result<Self, PageError> {
        let sections = require_some(doc.find_all(Role::Section), "section")?;
        let tabs = require_some(doc.find_all(Role::Tab), "tab")?;
        let panels = require_some(doc.find_all(Role::TabPanel), "tab panel")?;

        // Tabs pair with panels through a shared key; verify the pairing now
        // rather than at click time.
        for &tab in &tabs {
            let key = doc.key(tab).ok_or(PageError::MissingElement("tab key"))?;
            if doc.find_by_key(Role::TabPanel, key).is_none() {
                return Err(PageError::MissingElement("tab panel for key"));
            }
        }

        let images = doc
            .find_all(Role::Image)
            .into_iter()
            .filter(|&img| doc.deferred_src(img).is_some())
            .collect();

        Ok(Self {
            header: require(doc.find_first(Role::Header), "header")?,
            sentinel: require(doc.find_first(Role::Sentinel), "header sentinel")?,
            nav: require(doc.find_first(Role::Nav), "nav")?,
            nav_logo: require(doc.find_first(Role::NavLogo), "nav logo")?,
            nav_links: require(doc.find_first(Role::NavLinks), "nav links")?,
            links: require_some(doc.find_all(Role::NavLink), "nav link")?,
            scroll_cta: require(doc.find_first(Role::ScrollCta), "scroll control")?,
            landing_section: sections[0],

            modal: require(doc.find_first(Role::Modal), "modal")?,
            backdrop: require(doc.find_first(Role::Backdrop), "backdrop")?,
            open_modal_buttons: require_some(doc.find_all(Role::OpenModal), "open-modal trigger")?,
            close_modal: require(doc.find_first(Role::CloseModal), "close-modal control")?,

            tab_bar: require(doc.find_first(Role::TabBar), "tab bar")?,
            tabs,
            panels,

            sections,
            images,

            slider: require(doc.find_first(Role::Slider), "slider")?,
            slides: require_some(doc.find_all(Role::Slide), "slide")?,
            prev_control: require(doc.find_first(Role::SliderPrev), "slider prev control")?,
            next_control: require(doc.find_first(Role::SliderNext), "slider next control")?,
            dot_rail: require(doc.find_first(Role::DotRail), "dot rail")?,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::builder;

    #[test]
    fn test_bind_standard_page() {
        let doc = builder::standard();
        let refs = PageRefs::bind(&doc).unwrap();

        assert_eq!(refs.sections.len(), 4);
        assert_eq!(refs.landing_section, refs.sections[0]);
        assert_eq!(refs.slides.len(), 3);
        assert_eq!(refs.tabs.len(), refs.panels.len());
        assert_eq!(refs.images.len(), 2);
        assert_eq!(refs.open_modal_buttons.len(), 2);
    }

    #[test]
    fn test_bind_fails_on_missing_element() {
        let doc = Document::new();
        match PageRefs::bind(&doc) {
            Err(PageError::MissingElement(_)) => {}
            other => panic!("expected MissingElement, got {other:?}"),
        }
    }

    #[test]
    fn test_bind_fails_on_unpaired_tab() {
        use crate::document::Element;

        let mut doc = builder::standard();
        let bar = doc.find_first(Role::TabBar).unwrap();
        doc.append(bar, Element::new(Role::Tab).key("orphan"));

        match PageRefs::bind(&doc) {
            Err(PageError::MissingElement("tab panel for key")) => {}
            other => panic!("expected unpaired-tab error, got {other:?}"),
        }
    }
}
