//! Pointer state and handler registry.
//!
//! Click and hover events carry the hit element. Listeners attach to any
//! element and fire for the element itself or anything below it, the way
//! delegated DOM listeners do: dispatch walks the hit element's ancestor
//! chain nearest-first and hands every listener the *actual* target, so a
//! container can inspect what was really clicked. A click handler returning
//! true consumes the event and stops the walk (the analogue of suppressing
//! the default action).
//!
//! Hover enter/exit pairs are synthesized from move targets by
//! [`update_hover`].

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::{Signal, signal};

use crate::document::NodeId;

// =============================================================================
// TYPES
// =============================================================================

/// A click, in page coordinates. `target` is the deepest element hit, or
/// `None` for a click on bare page background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub target: Option<NodeId>,
    pub x: i32,
    pub y: i32,
}

impl ClickEvent {
    pub fn new(target: Option<NodeId>, x: i32, y: i32) -> Self {
        Self { target, x, y }
    }

    /// A click synthesized for tests and controllers, without coordinates.
    pub fn on(target: NodeId) -> Self {
        Self {
            target: Some(target),
            x: 0,
            y: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    Enter,
    Exit,
}

/// Hover transition for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverEvent {
    pub phase: HoverPhase,
    pub target: NodeId,
}

/// Click handler. Return true to consume the event.
pub type ClickHandler = Box<dyn Fn(&ClickEvent) -> bool>;

/// Hover handler. Hover never consumes.
pub type HoverHandler = Box<dyn Fn(&HoverEvent)>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static HOVERED: Signal<Option<NodeId>> = signal(None);
}

/// Element currently under the pointer.
pub fn hovered() -> Option<NodeId> {
    HOVERED.with(|s| s.get())
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct Registry {
    click: HashMap<NodeId, Vec<(usize, ClickHandler)>>,
    hover: HashMap<NodeId, Vec<(usize, HoverHandler)>>,
    next_id: usize,
}

impl Registry {
    fn new() -> Self {
        Self {
            click: HashMap::new(),
            hover: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::new());
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Dispatch a click along an ancestor chain (hit target first, root last).
/// Returns true if any handler consumed the event.
pub fn dispatch_click(chain: &[NodeId], event: &ClickEvent) -> bool {
    for &node in chain {
        // Snapshot ids: handlers may (un)subscribe while running.
        let ids: Vec<usize> = REGISTRY.with(|reg| {
            reg.borrow()
                .click
                .get(&node)
                .map(|handlers| handlers.iter().map(|(id, _)| *id).collect())
                .unwrap_or_default()
        });
        for id in ids {
            let consumed = REGISTRY.with(|reg| {
                let reg = reg.borrow();
                reg.click
                    .get(&node)
                    .and_then(|handlers| handlers.iter().find(|(hid, _)| *hid == id))
                    .map(|(_, handler)| handler(event))
            });
            if consumed == Some(true) {
                return true;
            }
        }
    }
    false
}

/// Deliver a hover transition along an ancestor chain.
pub fn dispatch_hover(event: &HoverEvent, chain: &[NodeId]) {
    for &node in chain {
        let ids: Vec<usize> = REGISTRY.with(|reg| {
            reg.borrow()
                .hover
                .get(&node)
                .map(|handlers| handlers.iter().map(|(id, _)| *id).collect())
                .unwrap_or_default()
        });
        for id in ids {
            REGISTRY.with(|reg| {
                let reg = reg.borrow();
                if let Some((_, handler)) = reg
                    .hover
                    .get(&node)
                    .and_then(|handlers| handlers.iter().find(|(hid, _)| *hid == id))
                {
                    handler(event);
                }
            });
        }
    }
}

/// Track the element under the pointer, synthesizing exit/enter pairs when it
/// changes. `chain_of` supplies an element's ancestor chain (nearest first).
pub fn update_hover<F>(target: Option<NodeId>, chain_of: F)
where
    F: Fn(NodeId) -> Vec<NodeId>,
{
    let previous = HOVERED.with(|s| s.get());
    if previous == target {
        return;
    }

    if let Some(old) = previous {
        dispatch_hover(
            &HoverEvent {
                phase: HoverPhase::Exit,
                target: old,
            },
            &chain_of(old),
        );
    }

    HOVERED.with(|s| s.set(target));

    if let Some(new) = target {
        dispatch_hover(
            &HoverEvent {
                phase: HoverPhase::Enter,
                target: new,
            },
            &chain_of(new),
        );
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Listen for clicks on `node` or anything below it. Returns cleanup.
pub fn on_click<F>(node: NodeId, handler: F) -> impl FnOnce()
where
    F: Fn(&ClickEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.click
            .entry(node)
            .or_default()
            .push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.click.get_mut(&node) {
                handlers.retain(|(hid, _)| *hid != id);
                if handlers.is_empty() {
                    reg.click.remove(&node);
                }
            }
        });
    }
}

/// Listen for hover transitions on `node` or anything below it. Returns
/// cleanup.
pub fn on_hover<F>(node: NodeId, handler: F) -> impl FnOnce()
where
    F: Fn(&HoverEvent) + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.hover
            .entry(node)
            .or_default()
            .push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.hover.get_mut(&node) {
                handlers.retain(|(hid, _)| *hid != id);
                if handlers.is_empty() {
                    reg.hover.remove(&node);
                }
            }
        });
    }
}

/// Clear all state and handlers (for testing).
pub fn reset_pointer_state() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.click.clear();
        reg.hover.clear();
        reg.next_id = 0;
    });
    HOVERED.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Element, Role};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn setup() -> (Document, NodeId, NodeId) {
        reset_pointer_state();
        let mut doc = Document::new();
        let container = doc.append(doc.root(), Element::new(Role::NavLinks));
        let link = doc.append(container, Element::new(Role::NavLink));
        (doc, container, link)
    }

    #[test]
    fn test_delegated_click_sees_actual_target() {
        let (doc, container, link) = setup();

        let seen = Rc::new(Cell::new(None));
        let seen_clone = seen.clone();
        let _cleanup = on_click(container, move |event| {
            seen_clone.set(event.target);
            false
        });

        let chain = doc.ancestors_inclusive(link);
        dispatch_click(&chain, &ClickEvent::on(link));
        assert_eq!(seen.get(), Some(link));
    }

    #[test]
    fn test_consumption_stops_bubbling() {
        let (doc, container, link) = setup();

        let outer = Rc::new(Cell::new(0));
        let outer_clone = outer.clone();
        let _c1 = on_click(container, move |_| {
            outer_clone.set(outer_clone.get() + 1);
            false
        });
        let _c2 = on_click(link, |_| true); // consumes at the target

        let chain = doc.ancestors_inclusive(link);
        assert!(dispatch_click(&chain, &ClickEvent::on(link)));
        assert_eq!(outer.get(), 0);
    }

    #[test]
    fn test_click_cleanup() {
        let (doc, container, link) = setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let cleanup = on_click(container, move |_| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        let chain = doc.ancestors_inclusive(link);
        dispatch_click(&chain, &ClickEvent::on(link));
        cleanup();
        dispatch_click(&chain, &ClickEvent::on(link));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_update_hover_synthesizes_enter_exit() {
        let (doc, container, link) = setup();
        let doc = Rc::new(doc);

        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        let _cleanup = on_hover(container, move |event| {
            log_clone.borrow_mut().push(event.phase);
        });

        let doc_for_chains = doc.clone();
        let chain_of = move |id: NodeId| doc_for_chains.ancestors_inclusive(id);

        update_hover(Some(link), &chain_of);
        assert_eq!(hovered(), Some(link));
        assert_eq!(*log.borrow(), vec![HoverPhase::Enter]);

        // Unchanged target is a no-op.
        update_hover(Some(link), &chain_of);
        assert_eq!(log.borrow().len(), 1);

        update_hover(None, &chain_of);
        assert_eq!(hovered(), None);
        assert_eq!(*log.borrow(), vec![HoverPhase::Enter, HoverPhase::Exit]);
    }

    #[test]
    fn test_hover_between_elements_exits_then_enters() {
        let (mut doc, container, link) = setup();
        let second = doc.append(container, Element::new(Role::NavLink));
        let doc = Rc::new(doc);

        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        let _cleanup = on_hover(container, move |event| {
            log_clone.borrow_mut().push((event.phase, event.target));
        });

        let doc_for_chains = doc.clone();
        let chain_of = move |id: NodeId| doc_for_chains.ancestors_inclusive(id);

        update_hover(Some(link), &chain_of);
        update_hover(Some(second), &chain_of);

        assert_eq!(
            *log.borrow(),
            vec![
                (HoverPhase::Enter, link),
                (HoverPhase::Exit, link),
                (HoverPhase::Enter, second),
            ]
        );
    }
}
