//! Application pipeline: terminal setup and the mount/run event loop.

mod mount;
mod terminal;

pub use mount::{MountHandle, mount};
pub use terminal::TerminalSetup;
