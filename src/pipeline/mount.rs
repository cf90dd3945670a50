//! Mount - application lifecycle and the event loop.
//!
//! [`mount`] computes layout, wires the page controllers, enters the
//! terminal and returns a [`MountHandle`]. Each [`MountHandle::tick`]: poll
//! one input event and route it, step the smooth-scroll animation, sweep the
//! intersection observers when the scroll offset moved, finish pending image
//! loads, and repaint when anything got dirty.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::controllers::{Page, PageConfig};
use crate::document::{NodeId, SharedDocument};
use crate::error::PageError;
use crate::layout::{self, ComputedLayout};
use crate::renderer::{self, TermRenderer};
use crate::state::input::{self, InputEvent};
use crate::state::keyboard::{self, Key};
use crate::state::pointer::{self, ClickEvent};
use crate::state::viewport::Viewport;
use crate::types::ClassSet;

use super::terminal::TerminalSetup;

/// Poll timeout per tick (~60 fps).
const TICK: Duration = Duration::from_millis(16);

/// Fraction of the viewport covered by a Page Up/Down jump.
const PAGE_SCROLL_FACTOR: f32 = 0.9;

// =============================================================================
// MOUNT HANDLE
// =============================================================================

/// The running application.
pub struct MountHandle {
    doc: SharedDocument,
    page: Page,
    viewport: Rc<Viewport>,
    layout: Rc<RefCell<ComputedLayout>>,
    terminal: TerminalSetup,
    renderer: TermRenderer,
    running: Arc<AtomicBool>,
    swept_at: Option<i32>,
}

/// Wire the page and enter the terminal.
pub fn mount(doc: SharedDocument, config: PageConfig) -> Result<MountHandle, PageError> {
    let (width, height) = TerminalSetup::size()?;
    let viewport = Rc::new(Viewport::new(width, height));

    let computed = layout::compute(&doc.borrow(), width)?;
    let layout = Rc::new(RefCell::new(computed));

    let page = Page::init(&doc, &viewport, &layout, config)?;

    // The carousel appended its dot rail; refresh layout to include it.
    *layout.borrow_mut() = layout::compute(&doc.borrow(), width)?;
    viewport.set_content_height(layout.borrow().content_height());

    let mut terminal = TerminalSetup::new();
    terminal.enter()?;

    Ok(MountHandle {
        doc,
        page,
        viewport,
        layout,
        terminal,
        renderer: TermRenderer::new(),
        running: Arc::new(AtomicBool::new(true)),
        swept_at: None,
    })
}

impl MountHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request shutdown; the loop exits on the next tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Blocking event loop. Returns after [`stop`](Self::stop) or Ctrl+C.
    pub fn run(&mut self) -> Result<(), PageError> {
        while self.tick(TICK)? {}
        Ok(())
    }

    /// One loop iteration. Returns false once stopped.
    pub fn tick(&mut self, timeout: Duration) -> Result<bool, PageError> {
        if !self.is_running() {
            return Ok(false);
        }

        if let Some(event) = input::poll_event(timeout)? {
            self.route(event)?;
        }

        if self.viewport.step_animation() {
            self.doc.borrow_mut().mark_dirty();
        }

        // Observers react to the final offset of the tick, one batch each.
        let scroll = self.viewport.scroll_y();
        if self.swept_at != Some(scroll) {
            self.swept_at = Some(scroll);
            self.page.sweep(self.viewport.band(0), &self.layout.borrow());
        }

        self.page.tick();

        if self.doc.borrow_mut().take_dirty() {
            let frame = renderer::compose(&self.doc.borrow(), &self.layout.borrow(), &self.viewport);
            self.renderer.render(&frame)?;
        }

        Ok(self.is_running())
    }

    /// Restore the terminal and unregister every listener.
    pub fn unmount(mut self) {
        self.stop();
        let _ = self.terminal.exit();
        self.page.teardown();
    }

    // =========================================================================
    // EVENT ROUTING
    // =========================================================================

    fn route(&mut self, event: InputEvent) -> Result<(), PageError> {
        match event {
            InputEvent::Key(key) => {
                if key.modifiers.ctrl && key.key == Key::Char('c') {
                    self.stop();
                    return Ok(());
                }
                if keyboard::dispatch(key) {
                    return Ok(());
                }
                // Unconsumed navigation keys scroll the viewport.
                let jump = (self.viewport.height() as f32 * PAGE_SCROLL_FACTOR) as i32;
                match key.key {
                    Key::PageDown => self.scroll_by(jump),
                    Key::PageUp => self.scroll_by(-jump),
                    Key::Home => self.scroll_to(0),
                    Key::End => self.scroll_to(i32::MAX),
                    _ => {}
                }
            }
            InputEvent::Click { x, y } => {
                let target = self.resolve(x, y);
                let chain = match target {
                    Some(id) => self.doc.borrow().ancestors_inclusive(id),
                    None => Vec::new(),
                };
                pointer::dispatch_click(&chain, &ClickEvent::new(target, x as i32, y as i32));
            }
            InputEvent::Move { x, y } => {
                let target = self.resolve(x, y);
                let doc = self.doc.clone();
                pointer::update_hover(target, move |id| doc.borrow().ancestors_inclusive(id));
            }
            InputEvent::Wheel { rows } => self.scroll_by(rows),
            InputEvent::Resize(width, height) => {
                self.viewport.resize(width, height);
                *self.layout.borrow_mut() = layout::compute(&self.doc.borrow(), width)?;
                self.viewport
                    .set_content_height(self.layout.borrow().content_height());
                self.doc.borrow_mut().mark_dirty();
            }
            InputEvent::None => {}
        }
        Ok(())
    }

    fn scroll_by(&self, rows: i32) {
        self.viewport.scroll_by(rows);
        self.doc.borrow_mut().mark_dirty();
    }

    fn scroll_to(&self, y: i32) {
        self.viewport.scroll_to(y);
        self.doc.borrow_mut().mark_dirty();
    }

    /// Map a screen position to the element under it: the modal overlay when
    /// open, the pinned nav when stuck, otherwise the page behind the
    /// viewport.
    fn resolve(&self, x: u16, y: u16) -> Option<NodeId> {
        let doc = self.doc.borrow();
        let (x, y) = (x as i32, y as i32);

        let modal = self.page.refs.modal;
        if !doc.has_class(modal, ClassSet::HIDDEN) {
            let geometry = renderer::modal_geometry(
                &doc,
                modal,
                self.viewport.width(),
                self.viewport.height(),
            );
            return Some(if geometry.is_close(x, y) {
                self.page.refs.close_modal
            } else if geometry.contains(x, y) {
                modal
            } else {
                self.page.refs.backdrop
            });
        }

        let layout = self.layout.borrow();
        let nav = self.page.refs.nav;
        if doc.has_class(nav, ClassSet::STICKY) {
            let band = layout.band(nav);
            if y < band.height {
                // The pinned bar shows the nav's own rows.
                return layout.hit_test(&doc, x, band.top + y);
            }
        }

        let hit = layout.hit_test(&doc, x, self.viewport.scroll_y() + y);
        // Veiled content is invisible; clicks pass through to nothing.
        hit.filter(|&id| {
            doc.ancestors_inclusive(id)
                .iter()
                .all(|&node| !doc.has_class(node, ClassSet::VEILED))
        })
    }
}
