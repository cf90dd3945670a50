//! Terminal renderer: cell frames, page composition and ANSI emission.

mod compose;
mod frame;
mod output;

pub use compose::{ModalGeometry, compose, modal_geometry};
pub use frame::{Cell, Frame};
pub use output::{OutputBuffer, TermRenderer};
