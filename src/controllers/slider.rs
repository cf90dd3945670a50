//! Carousel controller.
//!
//! A cyclic index drives two things in lockstep: every slide's horizontal
//! translate (`(ordinal - index) * 100%`, so the current slide sits at 0)
//! and the active dot. The index only changes through [`SliderController`]
//! methods, each running to completion before the next event, so the pair
//! can never drift apart.

use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::document::{Element, NodeId, Role, SharedDocument};
use crate::state::{keyboard, pointer};
use crate::types::ClassSet;

use super::refs::PageRefs;
use super::Cleanup;

/// Wrap `index` into `[0, count)`, cyclically.
///
/// Total over all inputs (for `count > 0`): `wrap(-1, n) == n - 1`,
/// `wrap(n, n) == 0`.
pub fn wrap(index: i64, count: usize) -> usize {
    debug_assert!(count > 0, "wrap over an empty group");
    let count = count as i64;
    (((index % count) + count) % count) as usize
}

/// Slide position and dot state.
pub struct SliderController {
    doc: SharedDocument,
    slides: Vec<NodeId>,
    dots: Vec<NodeId>,
    index: Signal<usize>,
}

impl SliderController {
    /// Build the dot rail (one dot per slide, tagged with its ordinal) and
    /// position the carousel at slide 0.
    pub fn new(doc: SharedDocument, refs: &PageRefs) -> Rc<Self> {
        let dots = {
            let mut doc = doc.borrow_mut();
            refs.slides
                .iter()
                .enumerate()
                .map(|(ordinal, _)| {
                    doc.append(refs.dot_rail, Element::new(Role::Dot).ordinal(ordinal).rows(1))
                })
                .collect()
        };

        let controller = Rc::new(Self {
            doc,
            slides: refs.slides.clone(),
            dots,
            index: signal(0),
        });
        controller.go_to(0);
        controller.activate_dot(0);
        controller
    }

    /// Current slide index.
    pub fn index(&self) -> usize {
        self.index.get()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Position every slide relative to `index`. No bounds check: callers
    /// keep the index valid through [`wrap`] or a dot's own ordinal.
    fn go_to(&self, index: usize) {
        let mut doc = self.doc.borrow_mut();
        for (ordinal, &slide) in self.slides.iter().enumerate() {
            let offset = (ordinal as f32 - index as f32) * 100.0;
            doc.set_translate_x(slide, offset);
        }
    }

    /// Mark the dot for `index` active, all others inactive.
    fn activate_dot(&self, index: usize) {
        let mut doc = self.doc.borrow_mut();
        for &dot in &self.dots {
            doc.remove_class(dot, ClassSet::ACTIVE);
        }
        if let Some(&dot) = self.dots.get(index) {
            doc.add_class(dot, ClassSet::ACTIVE);
        }
    }

    fn apply(&self, index: usize) {
        self.index.set(index);
        self.go_to(index);
        self.activate_dot(index);
    }

    /// Advance one slide, wrapping past the last back to 0.
    pub fn next(&self) {
        self.apply(wrap(self.index.get() as i64 + 1, self.slides.len()));
    }

    /// Go back one slide, wrapping past 0 to the last.
    pub fn prev(&self) {
        self.apply(wrap(self.index.get() as i64 - 1, self.slides.len()));
    }

    /// Jump straight to `index` (sourced from a dot's ordinal, so already
    /// valid).
    pub fn jump_to(&self, index: usize) {
        self.apply(index);
    }
}

/// Wire the slider controls, dots and arrow keys. Returns the controller and
/// the listener cleanups.
pub fn init(doc: &SharedDocument, refs: &PageRefs) -> (Rc<SliderController>, Vec<Cleanup>) {
    let controller = SliderController::new(doc.clone(), refs);
    let mut cleanups: Vec<Cleanup> = Vec::new();

    let ctl = controller.clone();
    cleanups.push(Box::new(pointer::on_click(refs.prev_control, move |_event| {
        ctl.prev();
        true
    })));

    let ctl = controller.clone();
    cleanups.push(Box::new(pointer::on_click(refs.next_control, move |_event| {
        ctl.next();
        true
    })));

    // Dot clicks are delegated to the rail; anything that is not a dot is
    // ignored.
    let ctl = controller.clone();
    let doc_for_dots = doc.clone();
    cleanups.push(Box::new(pointer::on_click(refs.dot_rail, move |event| {
        let Some(target) = event.target else {
            return false;
        };
        let ordinal = {
            let doc = doc_for_dots.borrow();
            if doc.role(target) != Role::Dot {
                return false;
            }
            doc.ordinal(target)
        };
        if let Some(ordinal) = ordinal {
            ctl.jump_to(ordinal);
        }
        true
    })));

    let ctl = controller.clone();
    cleanups.push(Box::new(keyboard::on_key(keyboard::Key::ArrowLeft, move || {
        ctl.prev();
        true
    })));

    let ctl = controller.clone();
    cleanups.push(Box::new(keyboard::on_key(keyboard::Key::ArrowRight, move || {
        ctl.next();
        true
    })));

    (controller, cleanups)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{builder, Document};
    use crate::state::keyboard::{Key, KeyboardEvent};
    use crate::state::pointer::ClickEvent;
    use std::cell::RefCell;

    /// Five slides, as in the reference scenario.
    fn five_slide_doc() -> Document {
        let mut doc = builder::standard();
        let slider = doc.find_first(Role::Slider).unwrap();
        let count = doc.find_all(Role::Slide).len();
        for i in count..5 {
            doc.append(slider, Element::new(Role::Slide).ordinal(i));
        }
        doc
    }

    fn setup() -> (SharedDocument, PageRefs, Rc<SliderController>, Vec<Cleanup>) {
        keyboard::reset_keyboard_state();
        pointer::reset_pointer_state();

        let doc: SharedDocument = Rc::new(RefCell::new(five_slide_doc()));
        let refs = PageRefs::bind(&doc.borrow()).unwrap();
        let (controller, cleanups) = init(&doc, &refs);
        (doc, refs, controller, cleanups)
    }

    fn click(doc: &SharedDocument, target: NodeId) -> bool {
        let chain = doc.borrow().ancestors_inclusive(target);
        pointer::dispatch_click(&chain, &ClickEvent::on(target))
    }

    fn assert_in_lockstep(doc: &SharedDocument, controller: &SliderController) {
        let doc = doc.borrow();
        let index = controller.index();

        // The current slide sits at offset 0, neighbours at +/-100%.
        for (ordinal, &slide) in controller.slides.iter().enumerate() {
            let expected = (ordinal as f32 - index as f32) * 100.0;
            assert_eq!(doc.translate_x(slide), expected);
        }

        // Exactly one active dot, and it is the index's.
        let active: Vec<usize> = controller
            .dots
            .iter()
            .enumerate()
            .filter(|&(_, &dot)| doc.has_class(dot, ClassSet::ACTIVE))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active, vec![index]);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(0, 5), 0);
        assert_eq!(wrap(4, 5), 4);
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(-6, 5), 4);
        assert_eq!(wrap(12, 5), 2);
        assert_eq!(wrap(-1, 1), 0);
    }

    #[test]
    fn test_init_builds_dots_and_starts_at_zero() {
        let (doc, refs, controller, _cleanups) = setup();

        assert_eq!(controller.index(), 0);
        assert_eq!(controller.slide_count(), 5);
        assert_eq!(doc.borrow().children(refs.dot_rail).len(), 5);
        for (i, &dot) in controller.dots.iter().enumerate() {
            assert_eq!(doc.borrow().ordinal(dot), Some(i));
        }
        assert_in_lockstep(&doc, &controller);
    }

    #[test]
    fn test_next_wraps_at_last_slide() {
        let (doc, _refs, controller, _cleanups) = setup();

        // 0 -> 1 -> 2 -> 3 -> 4
        for expected in 1..5 {
            controller.next();
            assert_eq!(controller.index(), expected);
            assert_in_lockstep(&doc, &controller);
        }

        // 4 -> 0 (wrap)
        controller.next();
        assert_eq!(controller.index(), 0);
        assert_in_lockstep(&doc, &controller);
    }

    #[test]
    fn test_prev_wraps_at_first_slide() {
        let (doc, _refs, controller, _cleanups) = setup();

        controller.prev();
        assert_eq!(controller.index(), 4);
        assert_in_lockstep(&doc, &controller);

        controller.prev();
        assert_eq!(controller.index(), 3);
        assert_in_lockstep(&doc, &controller);
    }

    #[test]
    fn test_controls_drive_slides() {
        let (doc, refs, controller, _cleanups) = setup();

        assert!(click(&doc, refs.next_control));
        assert_eq!(controller.index(), 1);

        assert!(click(&doc, refs.prev_control));
        assert!(click(&doc, refs.prev_control));
        assert_eq!(controller.index(), 4);
        assert_in_lockstep(&doc, &controller);
    }

    #[test]
    fn test_arrow_keys_drive_slides() {
        let (doc, _refs, controller, _cleanups) = setup();

        assert!(keyboard::dispatch(KeyboardEvent::new(Key::ArrowRight)));
        assert!(keyboard::dispatch(KeyboardEvent::new(Key::ArrowRight)));
        assert_eq!(controller.index(), 2);

        assert!(keyboard::dispatch(KeyboardEvent::new(Key::ArrowLeft)));
        assert_eq!(controller.index(), 1);
        assert_in_lockstep(&doc, &controller);
    }

    #[test]
    fn test_dot_click_jumps_from_any_state() {
        let (doc, _refs, controller, _cleanups) = setup();

        let dot_two = controller.dots[2];
        for start in [0usize, 3, 4] {
            controller.jump_to(start);
            assert!(click(&doc, dot_two));
            assert_eq!(controller.index(), 2);
            assert_in_lockstep(&doc, &controller);
        }
    }

    #[test]
    fn test_non_dot_click_on_rail_is_ignored() {
        let (doc, refs, controller, _cleanups) = setup();

        controller.jump_to(3);
        assert!(!click(&doc, refs.dot_rail));
        assert_eq!(controller.index(), 3);
        assert_in_lockstep(&doc, &controller);
    }
}
