//! Page controllers - the eight interactive behaviors.
//!
//! [`Page::init`] binds the element bundle, wires every controller against
//! the shared document and returns one handle owning the intersection
//! observers and every listener cleanup. Controllers are independent; the
//! only state two of them share is the document itself.

pub mod hover;
pub mod lazy;
pub mod modal;
pub mod navigate;
pub mod refs;
pub mod reveal;
pub mod slider;
pub mod sticky;
pub mod tabs;

pub use refs::PageRefs;

use std::cell::RefCell;
use std::rc::Rc;

use crate::document::SharedDocument;
use crate::error::PageError;
use crate::layout::{self, ComputedLayout};
use crate::observe::IntersectionObserver;
use crate::state::viewport::Viewport;
use crate::types::Band;

/// Listener teardown, returned by every subscription.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// CONFIG
// =============================================================================

/// Tuning constants for the controllers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    /// Opacity applied to sibling nav links (and the logo) during hover.
    pub hover_dim: f32,
    /// Visible fraction at which a section reveals.
    pub reveal_threshold: f32,
    /// Rows ahead of the viewport at which deferred images start loading.
    pub lazy_margin: i32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            hover_dim: 0.3,
            reveal_threshold: 0.15,
            lazy_margin: 8,
        }
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// The initialized page: controllers, observers and their cleanups.
pub struct Page {
    pub refs: PageRefs,
    pub modal: Rc<modal::ModalController>,
    pub slider: Rc<slider::SliderController>,
    pub sticky: Rc<sticky::StickyController>,
    pub lazy: Rc<lazy::LazyLoader>,
    observers: Vec<IntersectionObserver>,
    cleanups: Vec<Cleanup>,
}

impl Page {
    /// Wire all eight controllers. `layout` must hold a computed layout for
    /// the current document (the sticky margin is measured from it).
    pub fn init(
        doc: &SharedDocument,
        viewport: &Rc<Viewport>,
        layout: &Rc<RefCell<ComputedLayout>>,
        config: PageConfig,
    ) -> Result<Self, PageError> {
        let refs = PageRefs::bind(&doc.borrow())?;
        let nav_height = layout::nav_height(&doc.borrow(), &layout.borrow());

        let mut cleanups: Vec<Cleanup> = Vec::new();
        let mut observers: Vec<IntersectionObserver> = Vec::new();

        let (modal, modal_cleanups) = modal::init(doc, &refs);
        cleanups.extend(modal_cleanups);

        cleanups.extend(navigate::init(doc, viewport, layout, &refs));
        cleanups.extend(tabs::init(doc, &refs));
        cleanups.extend(hover::init(doc, &refs, config.hover_dim));

        let (sticky, sticky_observer) = sticky::init(doc, &refs, nav_height);
        observers.push(sticky_observer);

        observers.push(reveal::init(doc, &refs, config.reveal_threshold));

        let (lazy, lazy_observer) = lazy::init(doc, &refs, config.lazy_margin);
        observers.push(lazy_observer);

        let (slider, slider_cleanups) = slider::init(doc, &refs);
        cleanups.extend(slider_cleanups);

        Ok(Self {
            refs,
            modal,
            slider,
            sticky,
            lazy,
            observers,
            cleanups,
        })
    }

    /// Run every observer against the current viewport band.
    pub fn sweep(&mut self, view: Band, layout: &ComputedLayout) {
        for observer in &mut self.observers {
            observer.sweep(view, |id| layout.band(id));
        }
    }

    /// Per-tick upkeep: finish image loads queued by the lazy loader.
    pub fn tick(&self) {
        self.lazy.complete_loads();
    }

    /// Targets still watched across all observers.
    pub fn watching_count(&self) -> usize {
        self.observers.iter().map(|o| o.watching_count()).sum()
    }

    /// Unregister every listener.
    pub fn teardown(self) {
        for cleanup in self.cleanups {
            cleanup();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
