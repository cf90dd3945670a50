//! Modal controller - the dialog overlay.
//!
//! Open is wired to every open trigger; close to the close control, the
//! backdrop, and Escape (only while visible). Close is idempotent: closing a
//! closed modal changes nothing.

use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::document::{NodeId, SharedDocument};
use crate::state::{keyboard, pointer};
use crate::types::ClassSet;

use super::refs::PageRefs;
use super::Cleanup;

/// Dialog visibility state and the operations that toggle it.
pub struct ModalController {
    doc: SharedDocument,
    modal: NodeId,
    backdrop: NodeId,
    visible: Signal<bool>,
}

impl ModalController {
    pub fn new(doc: SharedDocument, refs: &PageRefs) -> Rc<Self> {
        let visible = !doc.borrow().has_class(refs.modal, ClassSet::HIDDEN);
        Rc::new(Self {
            doc,
            modal: refs.modal,
            backdrop: refs.backdrop,
            visible: signal(visible),
        })
    }

    pub fn is_open(&self) -> bool {
        self.visible.get()
    }

    /// Reveal the dialog and backdrop.
    pub fn open(&self) {
        let mut doc = self.doc.borrow_mut();
        doc.remove_class(self.modal, ClassSet::HIDDEN);
        doc.remove_class(self.backdrop, ClassSet::HIDDEN);
        drop(doc);
        self.visible.set(true);
    }

    /// Hide the dialog and backdrop. No-op when already closed.
    pub fn close(&self) {
        let mut doc = self.doc.borrow_mut();
        doc.add_class(self.modal, ClassSet::HIDDEN);
        doc.add_class(self.backdrop, ClassSet::HIDDEN);
        drop(doc);
        self.visible.set(false);
    }
}

/// Wire the modal to its triggers. Returns the controller and the listener
/// cleanups.
pub fn init(doc: &SharedDocument, refs: &PageRefs) -> (Rc<ModalController>, Vec<Cleanup>) {
    let controller = ModalController::new(doc.clone(), refs);
    let mut cleanups: Vec<Cleanup> = Vec::new();

    for &button in &refs.open_modal_buttons {
        let ctl = controller.clone();
        cleanups.push(Box::new(pointer::on_click(button, move |_event| {
            ctl.open();
            true
        })));
    }

    let ctl = controller.clone();
    cleanups.push(Box::new(pointer::on_click(refs.close_modal, move |_event| {
        ctl.close();
        true
    })));

    let ctl = controller.clone();
    cleanups.push(Box::new(pointer::on_click(refs.backdrop, move |_event| {
        ctl.close();
        true
    })));

    // Escape closes only while visible; otherwise the key stays available.
    let ctl = controller.clone();
    cleanups.push(Box::new(keyboard::on_key(keyboard::Key::Escape, move || {
        if ctl.is_open() {
            ctl.close();
            true
        } else {
            false
        }
    })));

    (controller, cleanups)
}

// =============================================================================
// TESTS
// =============================================================================
