//! Document - the fixed element tree the controllers act on.
//!
//! The document is an index arena: elements are [`NodeId`]s into a flat
//! vector, with parent links and ordered child lists. The structure is
//! authored once at startup ([`builder`]) and only its *state* mutates
//! afterwards (classes, inline style, image sources) - plus the dot rail,
//! which the carousel populates at init.
//!
//! Every mutation raises a dirty flag the render loop consumes.

mod element;
pub mod builder;

pub use element::{Element, InlineStyle, Role};

use crate::types::ClassSet;

/// Shared handle the controllers hold on the document.
pub type SharedDocument = std::rc::Rc<std::cell::RefCell<Document>>;

// =============================================================================
// NODE ID
// =============================================================================

/// Handle to an element in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index, for parallel per-node storage.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// The element tree.
pub struct Document {
    elements: Vec<Element>,
    parents: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
    dirty: bool,
}

impl Document {
    /// Create a document holding only the page root.
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new(Role::Page)],
            parents: vec![None],
            children: vec![Vec::new()],
            dirty: true,
        }
    }

    /// The page root.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of elements in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document holds nothing beyond the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.len() == 1
    }

    /// Handle for an arena index (parallel storage walks indices directly).
    ///
    /// # Panics
    /// Panics when `index` is out of bounds.
    #[inline]
    pub fn node_at(&self, index: usize) -> NodeId {
        assert!(index < self.elements.len());
        NodeId(index)
    }

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(element);
        self.parents.push(Some(parent));
        self.children.push(Vec::new());
        self.children[parent.0].push(id);
        self.dirty = true;
        id
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    #[inline]
    pub fn role(&self, id: NodeId) -> Role {
        self.elements[id.0].role
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id.0]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Element {
        &self.elements[id.0]
    }

    /// The element and every ancestor up to the root, nearest first.
    pub fn ancestors_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parents[node.0];
        }
        chain
    }

    /// Nearest ancestor (including `id` itself) with the given role.
    pub fn closest(&self, id: NodeId, role: Role) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.elements[node.0].role == role {
                return Some(node);
            }
            current = self.parents[node.0];
        }
        None
    }

    /// All elements with the given role, in document order.
    pub fn find_all(&self, role: Role) -> Vec<NodeId> {
        (0..self.elements.len())
            .filter(|&i| self.elements[i].role == role)
            .map(NodeId)
            .collect()
    }

    /// First element with the given role, in document order.
    pub fn find_first(&self, role: Role) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|e| e.role == role)
            .map(NodeId)
    }

    /// First element with the given role carrying `key`.
    pub fn find_by_key(&self, role: Role, key: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|e| e.role == role && e.key.as_deref() == Some(key))
            .map(NodeId)
    }

    /// Descendants of `id` (excluding `id`) with the given role, in order.
    pub fn descendants(&self, id: NodeId, role: Role) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children[id.0].iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.elements[node.0].role == role {
                found.push(node);
            }
            stack.extend(self.children[node.0].iter().rev().copied());
        }
        found
    }

    /// Whether `id` is `ancestor` or lies below it.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parents[node.0];
        }
        false
    }

    // =========================================================================
    // STATE MUTATION
    // =========================================================================

    #[inline]
    pub fn has_class(&self, id: NodeId, class: ClassSet) -> bool {
        self.elements[id.0].classes.contains(class)
    }

    pub fn add_class(&mut self, id: NodeId, class: ClassSet) {
        let classes = &mut self.elements[id.0].classes;
        if !classes.contains(class) {
            *classes |= class;
            self.dirty = true;
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: ClassSet) {
        let classes = &mut self.elements[id.0].classes;
        if classes.intersects(class) {
            *classes &= !class;
            self.dirty = true;
        }
    }

    #[inline]
    pub fn opacity(&self, id: NodeId) -> f32 {
        self.elements[id.0].style.opacity
    }

    pub fn set_opacity(&mut self, id: NodeId, opacity: f32) {
        let style = &mut self.elements[id.0].style;
        if style.opacity != opacity {
            style.opacity = opacity;
            self.dirty = true;
        }
    }

    #[inline]
    pub fn translate_x(&self, id: NodeId) -> f32 {
        self.elements[id.0].style.translate_x
    }

    pub fn set_translate_x(&mut self, id: NodeId, translate_x: f32) {
        let style = &mut self.elements[id.0].style;
        if style.translate_x != translate_x {
            style.translate_x = translate_x;
            self.dirty = true;
        }
    }

    #[inline]
    pub fn src(&self, id: NodeId) -> Option<&str> {
        self.elements[id.0].src.as_deref()
    }

    #[inline]
    pub fn deferred_src(&self, id: NodeId) -> Option<&str> {
        self.elements[id.0].deferred_src.as_deref()
    }

    pub fn set_src(&mut self, id: NodeId, src: impl Into<String>) {
        self.elements[id.0].src = Some(src.into());
        self.dirty = true;
    }

    #[inline]
    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.elements[id.0].key.as_deref()
    }

    #[inline]
    pub fn ordinal(&self, id: NodeId) -> Option<usize> {
        self.elements[id.0].ordinal
    }

    #[inline]
    pub fn text(&self, id: NodeId) -> &str {
        &self.elements[id.0].text
    }

    // =========================================================================
    // DIRTY TRACKING
    // =========================================================================

    /// Mark the document as needing a repaint.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Consume the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let bar = doc.append(root, Element::new(Role::TabBar));
        let tab = doc.append(bar, Element::new(Role::Tab).key("one"));
        let label = doc.append(tab, Element::new(Role::Paragraph).text("One"));
        (doc, bar, tab, label)
    }

    #[test]
    fn test_append_links_parent_and_children() {
        let (doc, bar, tab, _) = tree();
        assert_eq!(doc.parent(tab), Some(bar));
        assert_eq!(doc.children(bar), &[tab]);
        assert_eq!(doc.parent(doc.root()), None);
    }

    #[test]
    fn test_closest_walks_up_from_self() {
        let (doc, bar, tab, label) = tree();
        assert_eq!(doc.closest(label, Role::Tab), Some(tab));
        assert_eq!(doc.closest(tab, Role::Tab), Some(tab));
        assert_eq!(doc.closest(bar, Role::Tab), None);
        assert_eq!(doc.closest(label, Role::Slider), None);
    }

    #[test]
    fn test_ancestors_inclusive_order() {
        let (doc, bar, tab, label) = tree();
        assert_eq!(
            doc.ancestors_inclusive(label),
            vec![label, tab, bar, doc.root()]
        );
    }

    #[test]
    fn test_find_by_key() {
        let (doc, _, tab, _) = tree();
        assert_eq!(doc.find_by_key(Role::Tab, "one"), Some(tab));
        assert_eq!(doc.find_by_key(Role::Tab, "two"), None);
        assert_eq!(doc.find_by_key(Role::Section, "one"), None);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append(root, Element::new(Role::Section));
        let img1 = doc.append(a, Element::new(Role::Image));
        let b = doc.append(root, Element::new(Role::Section));
        let img2 = doc.append(b, Element::new(Role::Image));
        assert_eq!(doc.descendants(root, Role::Image), vec![img1, img2]);
        assert_eq!(doc.descendants(a, Role::Image), vec![img1]);
    }

    #[test]
    fn test_class_mutation_sets_dirty() {
        let (mut doc, _, tab, _) = tree();
        doc.take_dirty();

        doc.add_class(tab, ClassSet::ACTIVE);
        assert!(doc.has_class(tab, ClassSet::ACTIVE));
        assert!(doc.take_dirty());

        // No-op mutation leaves the flag down.
        doc.add_class(tab, ClassSet::ACTIVE);
        assert!(!doc.take_dirty());

        doc.remove_class(tab, ClassSet::ACTIVE);
        assert!(!doc.has_class(tab, ClassSet::ACTIVE));
        assert!(doc.take_dirty());
    }

    #[test]
    fn test_style_mutation() {
        let (mut doc, _, tab, _) = tree();
        doc.take_dirty();

        doc.set_opacity(tab, 0.3);
        assert_eq!(doc.opacity(tab), 0.3);
        assert!(doc.take_dirty());

        doc.set_translate_x(tab, -100.0);
        assert_eq!(doc.translate_x(tab), -100.0);
        assert!(doc.take_dirty());

        doc.set_opacity(tab, 0.3); // unchanged
        assert!(!doc.take_dirty());
    }

    #[test]
    fn test_is_within() {
        let (doc, bar, tab, label) = tree();
        assert!(doc.is_within(label, bar));
        assert!(doc.is_within(tab, tab));
        assert!(!doc.is_within(bar, tab));
    }
}
