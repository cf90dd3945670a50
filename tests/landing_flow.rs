//! Full-page flow: the canonical landing page driven through scripted event
//! sequences, controllers wired together exactly as the pipeline wires them.

use std::cell::RefCell;
use std::rc::Rc;

use vitrine::state::{keyboard, pointer};
use vitrine::{
    ClassSet, ComputedLayout, Document, Element, NodeId, Page, PageConfig, Role, SharedDocument,
    Viewport, builder, compute_layout,
};

/// The standard page extended to five slides, per the reference scenario.
fn five_slide_page() -> Document {
    let mut doc = builder::standard();
    let slider = doc.find_first(Role::Slider).unwrap();
    let count = doc.find_all(Role::Slide).len();
    for i in count..5 {
        doc.append(
            slider,
            Element::new(Role::Slide).text("More happy customers.").ordinal(i),
        );
    }
    doc
}

/// A page whose hero pushes every section below the fold, so reveals and
/// image loads all happen by scrolling.
fn tall_page() -> Document {
    let mut doc = Document::new();
    builder::header(
        &mut doc,
        "vitrine",
        &[("features", "Features"), ("operations", "Operations")],
        30,
    );

    let features = builder::section(&mut doc, "features", "Everything you need");
    builder::paragraph(&mut doc, features, "No branches, no paper.", 2);
    builder::deferred_image(&mut doc, features, "grid.lo", "grid.png");
    builder::deferred_image(&mut doc, features, "card.lo", "card.png");

    let operations = builder::section(&mut doc, "operations", "Operations");
    builder::tab_group(
        &mut doc,
        operations,
        &[("transfers", "Transfers", "Fast."), ("loans", "Loans", "Easy.")],
    );

    let stories = builder::section(&mut doc, "testimonials", "On board");
    builder::slider(&mut doc, stories, &["One.", "Two.", "Three."]);

    builder::modal(&mut doc, "Open your free account", "Five minutes.");
    doc
}

struct Harness {
    doc: SharedDocument,
    viewport: Rc<Viewport>,
    layout: Rc<RefCell<ComputedLayout>>,
    page: Page,
}

impl Harness {
    fn new() -> Self {
        Self::with(five_slide_page())
    }

    fn with(doc: Document) -> Self {
        keyboard::reset_keyboard_state();
        pointer::reset_pointer_state();

        let doc: SharedDocument = Rc::new(RefCell::new(doc));
        let computed = compute_layout(&doc.borrow(), 80).unwrap();
        let viewport = Rc::new(Viewport::new(80, 24));
        let layout = Rc::new(RefCell::new(computed));

        let page = Page::init(&doc, &viewport, &layout, PageConfig::default()).unwrap();

        // The carousel appended its dots; refresh layout as mount() does.
        *layout.borrow_mut() = compute_layout(&doc.borrow(), 80).unwrap();
        viewport.set_content_height(layout.borrow().content_height());

        Self {
            doc,
            viewport,
            layout,
            page,
        }
    }

    fn click(&self, target: NodeId) -> bool {
        let chain = self.doc.borrow().ancestors_inclusive(target);
        pointer::dispatch_click(&chain, &pointer::ClickEvent::on(target))
    }

    fn key(&self, key: keyboard::Key) -> bool {
        keyboard::dispatch(keyboard::KeyboardEvent::new(key))
    }

    /// Scroll to `y` and run the per-tick upkeep the pipeline would.
    fn scroll_and_settle(&mut self, y: i32) {
        self.viewport.scroll_to(y);
        self.page.sweep(self.viewport.band(0), &self.layout.borrow());
        self.page.tick();
    }
}

#[test]
fn carousel_reference_scenario() {
    let h = Harness::new();
    let slider = &h.page.slider;
    assert_eq!(slider.slide_count(), 5);
    assert_eq!(slider.index(), 0);

    // next() x4 -> index 4 (last).
    for _ in 0..4 {
        h.click(h.page.refs.next_control);
    }
    assert_eq!(slider.index(), 4);

    // next() from the last slide wraps to 0.
    h.click(h.page.refs.next_control);
    assert_eq!(slider.index(), 0);

    // prev() from 0 wraps to 4.
    h.click(h.page.refs.prev_control);
    assert_eq!(slider.index(), 4);

    // Arrow keys drive the same state machine.
    h.key(keyboard::Key::ArrowRight);
    assert_eq!(slider.index(), 0);
    h.key(keyboard::Key::ArrowLeft);
    assert_eq!(slider.index(), 4);
}

#[test]
fn carousel_dot_jump_from_any_state() {
    let h = Harness::new();
    let doc = h.doc.borrow();
    let dots = doc.find_all(Role::Dot);
    assert_eq!(dots.len(), 5);
    let dot_two = dots[2];
    drop(doc);

    for warmup in [0, 3] {
        for _ in 0..warmup {
            h.click(h.page.refs.next_control);
        }
        assert!(h.click(dot_two));
        assert_eq!(h.page.slider.index(), 2);

        // Exactly one active dot, matching the index.
        let doc = h.doc.borrow();
        let active: Vec<NodeId> = doc
            .find_all(Role::Dot)
            .into_iter()
            .filter(|&d| doc.has_class(d, ClassSet::ACTIVE))
            .collect();
        assert_eq!(active, vec![dot_two]);
    }
}

#[test]
fn tab_clicks_keep_exclusive_pair() {
    let h = Harness::new();

    for &tab in &[h.page.refs.tabs[2], h.page.refs.tabs[1], h.page.refs.tabs[1]] {
        h.click(tab);
        let doc = h.doc.borrow();
        let active_tabs: Vec<NodeId> = h
            .page
            .refs
            .tabs
            .iter()
            .copied()
            .filter(|&t| doc.has_class(t, ClassSet::ACTIVE))
            .collect();
        let active_panels: Vec<NodeId> = h
            .page
            .refs
            .panels
            .iter()
            .copied()
            .filter(|&p| doc.has_class(p, ClassSet::ACTIVE))
            .collect();
        assert_eq!(active_tabs, vec![tab]);
        assert_eq!(active_panels.len(), 1);
        assert_eq!(doc.key(active_panels[0]), doc.key(tab));
    }

    // A click on bar padding changes nothing.
    let before = h.page.slider.index(); // unrelated state as a canary
    assert!(!h.click(h.page.refs.tab_bar));
    let doc = h.doc.borrow();
    assert!(doc.has_class(h.page.refs.tabs[1], ClassSet::ACTIVE));
    assert_eq!(h.page.slider.index(), before);
}

#[test]
fn modal_lifecycle() {
    let h = Harness::new();
    let modal = h.page.refs.modal;

    assert!(h.doc.borrow().has_class(modal, ClassSet::HIDDEN));

    // Open from the sign-up trigger, close with Escape.
    h.click(h.page.refs.open_modal_buttons[1]);
    assert!(h.page.modal.is_open());
    assert!(h.key(keyboard::Key::Escape));
    assert!(!h.page.modal.is_open());

    // Escape with the modal closed is not consumed (left/right keys still
    // reach the carousel either way).
    assert!(!h.key(keyboard::Key::Escape));

    // Backdrop click closes; close is idempotent.
    h.click(h.page.refs.open_modal_buttons[0]);
    h.click(h.page.refs.backdrop);
    assert!(!h.page.modal.is_open());
    h.page.modal.close();
    assert!(!h.page.modal.is_open());
    assert!(h.doc.borrow().has_class(modal, ClassSet::HIDDEN));
}

#[test]
fn scroll_journey_reveals_loads_and_sticks() {
    let mut h = Harness::with(tall_page());

    // Initial sweep at the top: hero visible, nav not stuck, every section
    // below the fold still veiled, images untouched.
    h.scroll_and_settle(0);
    assert!(!h.page.sticky.is_stuck());
    {
        let doc = h.doc.borrow();
        for &section in &h.page.refs.sections {
            assert!(doc.has_class(section, ClassSet::VEILED));
        }
        for &image in &h.page.refs.images {
            assert!(doc.has_class(image, ClassSet::BLURRED));
            assert_ne!(doc.src(image), doc.deferred_src(image));
        }
    }

    // Walk to the bottom.
    let bottom = h.layout.borrow().content_height();
    let mut y = 0;
    while y < bottom {
        h.scroll_and_settle(y);
        y += 6;
    }

    assert!(h.page.sticky.is_stuck());
    {
        let doc = h.doc.borrow();
        for &section in &h.page.refs.sections {
            assert!(!doc.has_class(section, ClassSet::VEILED));
        }
        for &image in &h.page.refs.images {
            assert_eq!(doc.src(image), doc.deferred_src(image));
            assert!(!doc.has_class(image, ClassSet::BLURRED));
        }
    }

    // Back to the top: the nav releases, but reveals and loads are one-shot.
    h.scroll_and_settle(0);
    assert!(!h.page.sticky.is_stuck());
    {
        let doc = h.doc.borrow();
        for &section in &h.page.refs.sections {
            assert!(!doc.has_class(section, ClassSet::VEILED));
        }
    }
    // Only the sentinel is still watched.
    assert_eq!(h.page.watching_count(), 1);
}

#[test]
fn smooth_scroll_lands_on_section() {
    let h = Harness::new();

    // Nav link to "operations".
    let link = h.page.refs.links[1];
    let section = {
        let doc = h.doc.borrow();
        let key = doc.key(link).unwrap().to_string();
        doc.find_by_key(Role::Section, &key).unwrap()
    };

    assert!(h.click(link));
    assert!(h.viewport.is_animating());
    while h.viewport.step_animation() {}
    assert_eq!(h.viewport.scroll_y(), h.layout.borrow().band(section).top);

    // Padding click in the container: consumed, no new animation.
    assert!(h.click(h.page.refs.nav_links));
    assert!(!h.viewport.is_animating());
}

#[test]
fn rendered_frame_tracks_state() {
    let mut h = Harness::new();
    h.scroll_and_settle(0);

    let frame = vitrine::compose(&h.doc.borrow(), &h.layout.borrow(), &h.viewport);
    let screen: String = (0..frame.height()).map(|y| frame.row_text(y)).collect();
    assert!(screen.contains("vitrine"));
    assert!(screen.contains("When banking meets minimalism"));

    // Open the modal: the dialog and backdrop render above the page.
    h.page.modal.open();
    let frame = vitrine::compose(&h.doc.borrow(), &h.layout.borrow(), &h.viewport);
    let screen: String = (0..frame.height()).map(|y| frame.row_text(y)).collect();
    assert!(screen.contains("Open your free account"));
    assert!(screen.contains('\u{2591}'));
}
