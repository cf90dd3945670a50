//! # vitrine
//!
//! Reactive landing-page interactivity for the terminal.
//!
//! A fixed, hand-authored page (header, nav, content sections, a tabbed
//! panel, deferred images, a testimonial carousel, a modal dialog) rendered
//! in the terminal, with every behavior of the page driven by discrete
//! events: clicks, hovers, key presses and viewport-intersection changes.
//!
//! ## Architecture
//!
//! ```text
//! Document (element arena) -> layout (taffy) -> ComputedLayout
//!        ^                                            |
//!   controllers  <-  keyboard/pointer dispatch  <-  input (crossterm)
//!        |
//!   intersection observers  <-  viewport scroll
//!        |
//!   renderer (compose -> frame -> ANSI)
//! ```
//!
//! Eight independent controllers own the page state: modal visibility,
//! smooth-scroll navigation, exclusive tab selection, nav hover dimming,
//! the sticky header, one-shot section reveals, one-shot lazy image loads,
//! and the cyclic carousel index with its synchronized dots.
//!
//! ## Modules
//!
//! - [`document`] - element arena, roles, classes, the page builder
//! - [`layout`] - taffy flow layout to absolute page bands
//! - [`state`] - keyboard/pointer registries, viewport, input bridge
//! - [`observe`] - intersection observers with explicit watch state
//! - [`controllers`] - the eight page controllers and [`Page::init`]
//! - [`renderer`] - frame composition and ANSI emission
//! - [`pipeline`] - terminal setup and the mount/run loop

pub mod controllers;
pub mod document;
pub mod error;
pub mod layout;
pub mod observe;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::{Attr, Band, ClassSet};

pub use document::{Document, Element, InlineStyle, NodeId, Role, SharedDocument, builder};

pub use error::PageError;

pub use layout::{ComputedLayout, compute as compute_layout, nav_height};

pub use observe::{
    IntersectionEntry, IntersectionObserver, ObserverCtl, ObserverOptions, WatchState,
};

pub use controllers::{
    Cleanup, Page, PageConfig, PageRefs,
    lazy::LazyLoader,
    modal::ModalController,
    slider::{SliderController, wrap},
    sticky::{StickyController, StickyState},
};

pub use state::viewport::Viewport;

pub use renderer::{Frame, ModalGeometry, TermRenderer, compose, modal_geometry};

pub use pipeline::{MountHandle, TerminalSetup, mount};
