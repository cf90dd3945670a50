//! Page composition - document + layout + viewport to a frame.
//!
//! One pass paints the in-flow content visible through the viewport, then
//! two overlay passes: the sticky nav pinned to the top rows, and the modal
//! with its backdrop above everything.

use crate::document::{Document, NodeId, Role};
use crate::layout::ComputedLayout;
use crate::state::viewport::Viewport;
use crate::types::{Attr, ClassSet};

use super::frame::Frame;

// =============================================================================
// MODAL GEOMETRY
// =============================================================================

/// Where the modal box lands on screen. Shared with the pipeline's overlay
/// hit testing so clicks and pixels agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Cell of the close control.
    pub close: (i32, i32),
}

impl ModalGeometry {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn is_close(&self, x: i32, y: i32) -> bool {
        (x, y) == self.close
    }
}

/// Compute the centered modal box for the current frame size.
pub fn modal_geometry(doc: &Document, modal: NodeId, frame_w: u16, frame_h: u16) -> ModalGeometry {
    let body_rows: i32 = doc
        .children(modal)
        .iter()
        .filter(|&&child| doc.role(child) == Role::Paragraph)
        .map(|&child| doc.get(child).rows.max(1) as i32)
        .sum();
    let height = (body_rows + 4).min(frame_h as i32); // border + title + body + border
    let width = (frame_w as i32 - 4).min(46).max(10);
    let x = (frame_w as i32 - width) / 2;
    let y = (frame_h as i32 - height) / 2;
    ModalGeometry {
        x,
        y,
        width,
        height,
        close: (x + width - 2, y),
    }
}

// =============================================================================
// COMPOSE
// =============================================================================

/// Paint the page as seen through the viewport.
pub fn compose(doc: &Document, layout: &ComputedLayout, viewport: &Viewport) -> Frame {
    let mut frame = Frame::new(viewport.width(), viewport.height());
    let scroll = viewport.scroll_y();

    // Veiling is inherited: a veiled section hides everything inside it.
    // Parents precede children in the arena, so one forward pass settles it.
    let mut veiled = vec![false; doc.len()];
    for i in 0..doc.len() {
        let id = doc.node_at(i);
        let own = doc.has_class(id, ClassSet::VEILED);
        let inherited = doc
            .parent(id)
            .map(|p| veiled[p.index()])
            .unwrap_or(false);
        veiled[i] = own || inherited;
    }

    let limit = doc.len().min(layout.len());
    for i in 0..limit {
        let id = doc.node_at(i);
        if !layout.in_flow(id) || veiled[i] {
            continue;
        }
        paint_element(&mut frame, doc, layout, id, scroll);
    }

    if let Some(nav) = doc.find_first(Role::Nav) {
        if doc.has_class(nav, ClassSet::STICKY) {
            paint_sticky_nav(&mut frame, doc, layout, nav);
        }
    }

    if let Some(modal) = doc.find_first(Role::Modal) {
        if !doc.has_class(modal, ClassSet::HIDDEN) {
            paint_modal(&mut frame, doc, modal);
        }
    }

    frame
}

fn dimmed(base: Attr, opacity: f32) -> Attr {
    if opacity < 1.0 { base | Attr::DIM } else { base }
}

fn paint_element(frame: &mut Frame, doc: &Document, layout: &ComputedLayout, id: NodeId, scroll: i32) {
    let i = id.index();
    let element = doc.get(id);
    let shift = (element.style.translate_x / 100.0 * layout.width[i] as f32) as i32;
    let x = layout.x[i] + shift;
    let y = layout.y[i] - scroll;

    match element.role {
        Role::Heading => frame.write_str(x + 1, y, &element.text, Attr::BOLD),
        Role::Paragraph => frame.write_str(x + 1, y, &element.text, Attr::NONE),
        Role::NavLogo => {
            frame.write_str(x + 1, y, &element.text, dimmed(Attr::BOLD, element.style.opacity))
        }
        Role::NavLink => frame.write_str(
            x + 1,
            y,
            &element.text,
            dimmed(Attr::UNDERLINE, element.style.opacity),
        ),
        Role::ScrollCta | Role::OpenModal | Role::SliderPrev | Role::SliderNext => {
            frame.write_str(x + 1, y, &element.text, Attr::REVERSE)
        }
        Role::Tab => {
            let attrs = if element.classes.contains(ClassSet::ACTIVE) {
                Attr::REVERSE | Attr::BOLD
            } else {
                Attr::NONE
            };
            frame.write_str(x + 1, y, &element.text, attrs);
        }
        Role::TabPanel => {
            if element.classes.contains(ClassSet::ACTIVE) {
                frame.write_str(x + 1, y, &element.text, Attr::NONE);
            }
        }
        Role::Image => {
            let src = element.src.as_deref().unwrap_or("");
            if element.classes.contains(ClassSet::BLURRED) {
                frame.write_str(x + 1, y, &format!("( {src} )"), Attr::DIM);
            } else {
                frame.write_str(x + 1, y, &format!("[ {src} ]"), Attr::NONE);
            }
        }
        Role::Slide => frame.write_str(x + 2, y + 1, &element.text, Attr::NONE),
        Role::Dot => {
            let ch = if element.classes.contains(ClassSet::ACTIVE) {
                '\u{25cf}' // ●
            } else {
                '\u{00b7}' // ·
            };
            frame.set(x, y, ch, Attr::NONE);
        }
        _ => {}
    }
}

/// Repaint the nav subtree pinned to the top rows, as a reversed bar.
fn paint_sticky_nav(frame: &mut Frame, doc: &Document, layout: &ComputedLayout, nav: NodeId) {
    let band = layout.band(nav);
    for row in 0..band.height {
        frame.fill_row(row, ' ', Attr::REVERSE);
    }

    let mut stack = vec![nav];
    while let Some(id) = stack.pop() {
        stack.extend(doc.children(id).iter().copied());
        let element = doc.get(id);
        let i = id.index();
        let x = layout.x[i] + 1;
        let y = layout.y[i] - band.top;
        match element.role {
            Role::NavLogo => frame.write_str(x, y, &element.text, Attr::REVERSE | Attr::BOLD),
            Role::NavLink | Role::OpenModal => {
                frame.write_str(x, y, &element.text, Attr::REVERSE)
            }
            _ => {}
        }
    }
}

/// Backdrop plus the centered dialog box.
fn paint_modal(frame: &mut Frame, doc: &Document, modal: NodeId) {
    frame.fill('\u{2591}', Attr::DIM); // ░

    let geometry = modal_geometry(doc, modal, frame.width(), frame.height());
    let ModalGeometry {
        x,
        y,
        width,
        height,
        close,
    } = geometry;

    for row in y..y + height {
        for col in x..x + width {
            frame.set(col, row, ' ', Attr::NONE);
        }
    }
    // Border.
    for col in x..x + width {
        frame.set(col, y, '\u{2500}', Attr::NONE);
        frame.set(col, y + height - 1, '\u{2500}', Attr::NONE);
    }
    for row in y..y + height {
        frame.set(x, row, '\u{2502}', Attr::NONE);
        frame.set(x + width - 1, row, '\u{2502}', Attr::NONE);
    }
    frame.set(x, y, '\u{250c}', Attr::NONE);
    frame.set(x + width - 1, y, '\u{2510}', Attr::NONE);
    frame.set(x, y + height - 1, '\u{2514}', Attr::NONE);
    frame.set(x + width - 1, y + height - 1, '\u{2518}', Attr::NONE);

    frame.write_str(x + 2, y + 1, doc.text(modal), Attr::BOLD);

    let mut row = y + 2;
    for &child in doc.children(modal) {
        if doc.role(child) == Role::Paragraph {
            frame.write_str(x + 2, row, doc.text(child), Attr::NONE);
            row += doc.get(child).rows.max(1) as i32;
        }
    }

    frame.set(close.0, close.1, 'x', Attr::REVERSE);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::builder;
    use crate::layout;

    fn setup() -> (Document, ComputedLayout, Viewport) {
        let doc = builder::standard();
        let computed = layout::compute(&doc, 80).unwrap();
        let viewport = Viewport::new(80, 24);
        viewport.set_content_height(computed.content_height());
        (doc, computed, viewport)
    }

    #[test]
    fn test_hero_heading_painted_at_top() {
        let (doc, computed, viewport) = setup();
        let frame = compose(&doc, &computed, &viewport);

        let heading = doc.find_all(Role::Heading)[0];
        let row = computed.band(heading).top as u16;
        assert!(frame.row_text(row).contains("When banking meets minimalism"));
    }

    #[test]
    fn test_scroll_moves_content_up() {
        let (doc, computed, viewport) = setup();
        viewport.scroll_to(2);
        let frame = compose(&doc, &computed, &viewport);

        let heading = doc.find_all(Role::Heading)[0];
        let row = (computed.band(heading).top - 2) as u16;
        assert!(frame.row_text(row).contains("When banking"));
    }

    #[test]
    fn test_veiled_section_paints_nothing() {
        let (mut doc, computed, viewport) = setup();
        let section = doc.find_all(Role::Section)[0];
        doc.add_class(section, ClassSet::VEILED);

        let band = computed.band(section);
        viewport.scroll_to(band.top);
        let frame = compose(&doc, &computed, &viewport);

        for row in 0..band.height.min(viewport.height() as i32) {
            assert_eq!(frame.row_text(row as u16).trim(), "", "row {row} not blank");
        }
    }

    #[test]
    fn test_only_current_slide_visible() {
        let (doc, _computed, viewport) = setup();
        let mut doc = doc;
        let slides = doc.find_all(Role::Slide);

        // Position at slide 0: neighbours pushed off by +/-100%.
        for (ordinal, &slide) in slides.iter().enumerate() {
            doc.set_translate_x(slide, ordinal as f32 * 100.0);
        }
        let computed = layout::compute(&doc, 80).unwrap();
        let slider = doc.find_first(Role::Slider).unwrap();
        viewport.scroll_to(computed.band(slider).top);
        let frame = compose(&doc, &computed, &viewport);

        let first = doc.text(slides[0]).to_string();
        let second = doc.text(slides[1]).to_string();
        let all: String = (0..frame.height()).map(|y| frame.row_text(y)).collect();
        assert!(all.contains(&first));
        assert!(!all.contains(&second));
    }

    #[test]
    fn test_modal_overlay_covers_page() {
        let (mut doc, computed, viewport) = setup();
        let modal = doc.find_first(Role::Modal).unwrap();
        let backdrop = doc.find_first(Role::Backdrop).unwrap();

        // Hidden: no backdrop shading anywhere.
        let frame = compose(&doc, &computed, &viewport);
        let all: String = (0..frame.height()).map(|y| frame.row_text(y)).collect();
        assert!(!all.contains('\u{2591}'));

        doc.remove_class(modal, ClassSet::HIDDEN);
        doc.remove_class(backdrop, ClassSet::HIDDEN);
        let frame = compose(&doc, &computed, &viewport);
        let all: String = (0..frame.height()).map(|y| frame.row_text(y)).collect();
        assert!(all.contains('\u{2591}'));
        assert!(all.contains("Open your free account"));

        let geometry = modal_geometry(&doc, modal, 80, 24);
        let close = frame.get(geometry.close.0, geometry.close.1).unwrap();
        assert_eq!(close.ch, 'x');
    }

    #[test]
    fn test_sticky_nav_pinned_to_top() {
        let (mut doc, computed, viewport) = setup();
        let nav = doc.find_first(Role::Nav).unwrap();
        doc.add_class(nav, ClassSet::STICKY);
        viewport.scroll_to(20);

        let frame = compose(&doc, &computed, &viewport);
        let bar: String = (0..3).map(|y| frame.row_text(y)).collect();
        assert!(bar.contains("vitrine"));
        assert!(bar.contains("Features"));
    }

    #[test]
    fn test_modal_geometry_centered_and_bounded() {
        let (doc, _computed, _viewport) = setup();
        let modal = doc.find_first(Role::Modal).unwrap();

        let geometry = modal_geometry(&doc, modal, 80, 24);
        assert!(geometry.x > 0 && geometry.y > 0);
        assert!(geometry.x + geometry.width <= 80);
        assert!(geometry.y + geometry.height <= 24);
        assert!(geometry.contains(geometry.close.0, geometry.close.1));
        assert!(!geometry.contains(0, 0));
    }
}
