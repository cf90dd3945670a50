//! Viewport-intersection observation.

mod intersection;

pub use intersection::{
    IntersectionEntry, IntersectionObserver, ObserverCtl, ObserverOptions, WatchState,
};
