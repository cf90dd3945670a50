//! Runtime state systems behind the page controllers:
//!
//! - **Keyboard** - event types, dispatch, handler registry
//! - **Pointer** - click/hover dispatch with delegation, hover tracking
//! - **Viewport** - scroll offset, smooth-scroll animation, band math
//! - **Input** - crossterm bridge and event polling

pub mod input;
pub mod keyboard;
pub mod pointer;
pub mod viewport;
