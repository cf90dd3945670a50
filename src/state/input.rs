//! Input bridge - crossterm events to page events.
//!
//! Converts crossterm key and mouse events into the crate's own types and
//! provides polling. Pointer events carry raw screen coordinates here; the
//! pipeline resolves them to elements before dispatch.

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
    KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind, poll, read,
};
use crossterm::execute;

use super::keyboard::{Key, KeyboardEvent, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified input event, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyboardEvent),
    /// Left-button press at a screen position.
    Click { x: u16, y: u16 },
    /// Pointer motion to a screen position.
    Move { x: u16, y: u16 },
    /// Wheel scroll; positive rows scroll the page down.
    Wheel { rows: i32 },
    Resize(u16, u16),
    /// Unhandled event type.
    None,
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert a crossterm key event. Repeats and releases convert to
/// [`InputEvent::None`]; only presses drive the page.
pub fn convert_key_event(event: CrosstermKeyEvent) -> InputEvent {
    if event.kind != KeyEventKind::Press {
        return InputEvent::None;
    }

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => Key::Other,
    };

    InputEvent::Key(KeyboardEvent::with_modifiers(
        key,
        convert_modifiers(event.modifiers),
    ))
}

/// Convert a crossterm mouse event.
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> InputEvent {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => InputEvent::Click {
            x: event.column,
            y: event.row,
        },
        MouseEventKind::Moved => InputEvent::Move {
            x: event.column,
            y: event.row,
        },
        MouseEventKind::ScrollUp => InputEvent::Wheel {
            rows: -super::viewport::WHEEL_SCROLL,
        },
        MouseEventKind::ScrollDown => InputEvent::Wheel {
            rows: super::viewport::WHEEL_SCROLL,
        },
        _ => InputEvent::None,
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout. Returns None if nothing arrived.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(match read()? {
        CrosstermEvent::Key(key) => convert_key_event(key),
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    })
}

// =============================================================================
// MOUSE CAPTURE
// =============================================================================

pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

// =============================================================================
// TESTS
// =============================================================================
