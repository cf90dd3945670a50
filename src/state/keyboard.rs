//! Keyboard state and handler registry.
//!
//! Controllers subscribe to keys (`on_key`) or to every event (`on`) and get
//! back a cleanup closure. Dispatch walks key-specific handlers first, then
//! global handlers, stopping at the first one that consumes the event.
//!
//! # Example
//!
//! ```ignore
//! use vitrine::state::keyboard::{self, Key};
//!
//! let cleanup = keyboard::on_key(Key::Escape, || {
//!     // close something
//!     true // consume
//! });
//! cleanup();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::{Signal, signal};

// =============================================================================
// TYPES
// =============================================================================

/// The keys the page reacts to. Anything else arrives as [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Other,
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::none(),
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Handler for any keyboard event. Return true to consume.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

/// Handler for a specific key. Return true to consume.
pub type KeySpecificHandler = Box<dyn Fn() -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Last dispatched keyboard event.
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Last key pressed.
pub fn last_key() -> Option<Key> {
    last_event().map(|e| e.key)
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct Registry {
    global: Vec<(usize, KeyHandler)>,
    by_key: HashMap<Key, Vec<(usize, KeySpecificHandler)>>,
    next_id: usize,
}

impl Registry {
    fn new() -> Self {
        Self {
            global: Vec::new(),
            by_key: HashMap::new(),
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

/// Dispatch a keyboard event. Returns true if any handler consumed it.
pub fn dispatch(event: KeyboardEvent) -> bool {
    LAST_EVENT.with(|s| s.set(Some(event)));

    // Snapshot handler ids first: a handler may (un)subscribe while running.
    let key_ids: Vec<usize> = REGISTRY.with(|reg| {
        reg.borrow()
            .by_key
            .get(&event.key)
            .map(|handlers| handlers.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default()
    });
    for id in key_ids {
        let consumed = REGISTRY.with(|reg| {
            let reg = reg.borrow();
            reg.by_key
                .get(&event.key)
                .and_then(|handlers| handlers.iter().find(|(hid, _)| *hid == id))
                .map(|(_, handler)| handler())
        });
        if consumed == Some(true) {
            return true;
        }
    }

    let global_ids: Vec<usize> =
        REGISTRY.with(|reg| reg.borrow().global.iter().map(|(id, _)| *id).collect());
    for id in global_ids {
        let consumed = REGISTRY.with(|reg| {
            let reg = reg.borrow();
            reg.global
                .iter()
                .find(|(hid, _)| *hid == id)
                .map(|(_, handler)| handler(&event))
        });
        if consumed == Some(true) {
            return true;
        }
    }

    false
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all keyboard events. Returns a cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.global.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            reg.borrow_mut().global.retain(|(hid, _)| *hid != id);
        });
    }
}

/// Subscribe to a specific key. Returns a cleanup function.
pub fn on_key<F>(key: Key, handler: F) -> impl FnOnce()
where
    F: Fn() -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.by_key
            .entry(key)
            .or_default()
            .push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.by_key.get_mut(&key) {
                handlers.retain(|(hid, _)| *hid != id);
                if handlers.is_empty() {
                    reg.by_key.remove(&key);
                }
            }
        });
    }
}

/// Clear all state and handlers (for testing).
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.global.clear();
        reg.by_key.clear();
        reg.next_id = 0;
    });
    LAST_EVENT.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================
