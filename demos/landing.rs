//! Landing Demo - the full page running in the terminal.
//!
//! Scroll with the mouse wheel or PageUp/PageDown, click the nav links,
//! switch the operation tabs, drive the carousel with the on-screen arrows,
//! the dots or the left/right keys, and open the account modal (Escape or
//! the backdrop closes it). Sections reveal as they scroll in; the images
//! load as they approach.
//!
//! Run with: cargo run --example landing

use std::cell::RefCell;
use std::rc::Rc;

use vitrine::{PageConfig, builder, mount};

fn main() {
    let doc = Rc::new(RefCell::new(builder::standard()));

    match mount(doc, PageConfig::default()) {
        Ok(mut handle) => {
            if let Err(e) = handle.run() {
                eprintln!("Event loop failed: {e}");
            }
            handle.unmount();
        }
        Err(e) => {
            eprintln!("Failed to mount: {e}");
        }
    }
}
