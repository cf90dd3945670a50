//! Element - the unit of the document arena.
//!
//! An element carries structural identity ([`Role`]), toggleable state classes
//! ([`ClassSet`]), inline style (opacity, horizontal translate) and the
//! handful of attributes the controllers read: a pairing key, a deferred image
//! source and an ordinal.

use crate::types::ClassSet;

// =============================================================================
// ROLE
// =============================================================================

/// Structural identity of an element.
///
/// The landing page is hand-authored, so roles enumerate exactly the kinds of
/// elements the controllers address. This is the analogue of addressing by
/// class name against a fixed stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Document root.
    Page,
    Header,
    /// Zero-content marker at the end of the header; its viewport
    /// intersection proxies for the sticky-nav scroll threshold.
    Sentinel,
    Nav,
    NavLogo,
    NavLinks,
    NavLink,
    Section,
    Heading,
    Paragraph,
    /// Image, possibly with a deferred source.
    Image,
    /// Trigger that opens the modal dialog.
    OpenModal,
    /// Close control inside the modal dialog.
    CloseModal,
    /// Call-to-action that scrolls to the landing section.
    ScrollCta,
    TabBar,
    Tab,
    TabPanel,
    Slider,
    Slide,
    SliderPrev,
    SliderNext,
    DotRail,
    Dot,
    Modal,
    Backdrop,
}

// =============================================================================
// INLINE STYLE
// =============================================================================

/// Inline style the controllers mutate directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlineStyle {
    /// 1.0 is fully opaque; the hover dimmer lowers this on siblings.
    pub opacity: f32,
    /// Horizontal translate in percent of the container width. The carousel
    /// positions slide `k` at `(k - index) * 100.0`.
    pub translate_x: f32,
}

impl Default for InlineStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
        }
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

/// One element of the document.
#[derive(Debug, Clone)]
pub struct Element {
    pub role: Role,
    pub classes: ClassSet,
    pub style: InlineStyle,
    /// Rendered text content (may be empty for pure containers).
    pub text: String,
    /// Authored height in rows; 0 lets the element size to its children.
    pub rows: u16,
    /// Pairing key: a tab and its panel share one, a nav link carries the
    /// key of the section it points at, a section carries its own.
    pub key: Option<String>,
    /// The real content of a deferred image, withheld until proximity.
    pub deferred_src: Option<String>,
    /// Current image content (placeholder until the lazy loader swaps it).
    pub src: Option<String>,
    /// Position of a slide or dot within its group.
    pub ordinal: Option<usize>,
}

impl Element {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            classes: ClassSet::NONE,
            style: InlineStyle::default(),
            text: String::new(),
            rows: 0,
            key: None,
            deferred_src: None,
            src: None,
            ordinal: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn rows(mut self, rows: u16) -> Self {
        self.rows = rows;
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn classes(mut self, classes: ClassSet) -> Self {
        self.classes = classes;
        self
    }

    pub fn ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    /// Author an image whose real content is deferred behind `placeholder`.
    pub fn deferred(mut self, placeholder: impl Into<String>, real: impl Into<String>) -> Self {
        self.src = Some(placeholder.into());
        self.deferred_src = Some(real.into());
        self.classes |= ClassSet::BLURRED;
        self
    }
}
