//! Layout - document to absolute page-space rectangles, via Taffy.
//!
//! The page flows as one vertical flex column; navigation rows, the tab bar
//! and the dot rail flow horizontally. Slides and slider chrome are
//! absolutely positioned inside the slider (their horizontal placement is
//! carried by the translate style, not by layout). The modal and backdrop are
//! overlay, not flow: their subtrees are skipped entirely and painted by the
//! renderer on top.
//!
//! The result is a [`ComputedLayout`]: parallel vectors of absolute
//! rectangles indexed by [`NodeId`].

use taffy::{
    AlignItems, AvailableSpace, Dimension, Display, FlexDirection, JustifyContent,
    LengthPercentageAuto, NodeId as TaffyNodeId, Position, Rect, Size, Style, TaffyTree,
};
use unicode_width::UnicodeWidthStr;

use crate::document::{Document, NodeId, Role};
use crate::error::PageError;
use crate::types::Band;

// =============================================================================
// COMPUTED LAYOUT
// =============================================================================

/// Absolute page-space rectangles, indexed by arena position.
///
/// Out-of-flow elements (the modal subtree) keep zeroed rectangles and are
/// excluded from hit testing via `in_flow`.
#[derive(Debug, Clone, Default)]
pub struct ComputedLayout {
    pub x: Vec<i32>,
    pub y: Vec<i32>,
    pub width: Vec<i32>,
    pub height: Vec<i32>,
    in_flow: Vec<bool>,
}

impl ComputedLayout {
    fn with_len(len: usize) -> Self {
        Self {
            x: vec![0; len],
            y: vec![0; len],
            width: vec![0; len],
            height: vec![0; len],
            in_flow: vec![false; len],
        }
    }

    /// Number of elements this layout covers.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Vertical extent of an element, for intersection math.
    pub fn band(&self, id: NodeId) -> Band {
        let i = id.index();
        if i >= self.len() || !self.in_flow[i] {
            return Band::new(0, 0);
        }
        Band::new(self.y[i], self.height[i])
    }

    /// Whether the element participates in page flow.
    pub fn in_flow(&self, id: NodeId) -> bool {
        let i = id.index();
        i < self.len() && self.in_flow[i]
    }

    /// Total page height in rows.
    pub fn content_height(&self) -> i32 {
        (0..self.len())
            .filter(|&i| self.in_flow[i])
            .map(|i| self.y[i] + self.height[i])
            .max()
            .unwrap_or(0)
    }

    /// Deepest in-flow element containing the page-space point.
    ///
    /// Later arena entries sit on top (children follow parents, runtime dots
    /// follow everything), so the scan runs back to front. The horizontal
    /// translate style shifts an element's effective rectangle, which is what
    /// parks off-index slides outside the page.
    pub fn hit_test(&self, doc: &Document, x: i32, y: i32) -> Option<NodeId> {
        let len = self.len().min(doc.len());
        for i in (0..len).rev() {
            if !self.in_flow[i] || self.width[i] <= 0 || self.height[i] <= 0 {
                continue;
            }
            let id = doc.node_at(i);
            let shift = (doc.translate_x(id) / 100.0 * self.width[i] as f32) as i32;
            let left = self.x[i] + shift;
            if x >= left && x < left + self.width[i] && y >= self.y[i] && y < self.y[i] + self.height[i]
            {
                return Some(id);
            }
        }
        None
    }
}

// =============================================================================
// COMPUTE
// =============================================================================

/// Compute absolute layout for the current document state.
pub fn compute(doc: &Document, viewport_width: u16) -> Result<ComputedLayout, PageError> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let mut taffy_ids: Vec<Option<TaffyNodeId>> = vec![None; doc.len()];

    let Some(root) = build_node(doc, doc.root(), &mut tree, &mut taffy_ids)? else {
        // The root is never an overlay element; nothing to lay out.
        return Ok(ComputedLayout::with_len(doc.len()));
    };

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(viewport_width as f32),
            height: AvailableSpace::MaxContent,
        },
    )?;

    let mut layout = ComputedLayout::with_len(doc.len());
    extract(doc, doc.root(), &tree, &taffy_ids, 0.0, 0.0, &mut layout)?;
    Ok(layout)
}

/// Build the Taffy node for `id` (children first). Overlay subtrees return
/// `None` and never enter the tree.
fn build_node(
    doc: &Document,
    id: NodeId,
    tree: &mut TaffyTree<()>,
    taffy_ids: &mut Vec<Option<TaffyNodeId>>,
) -> Result<Option<TaffyNodeId>, PageError> {
    let role = doc.role(id);
    if matches!(role, Role::Modal | Role::Backdrop) {
        return Ok(None);
    }

    let mut children = Vec::new();
    for &child in doc.children(id) {
        if let Some(node) = build_node(doc, child, tree, taffy_ids)? {
            children.push(node);
        }
    }

    let style = style_for(doc, id);
    let node = if children.is_empty() {
        tree.new_leaf(style)?
    } else {
        tree.new_with_children(style, &children)?
    };
    taffy_ids[id.index()] = Some(node);
    Ok(Some(node))
}

/// Map an element to its Taffy style.
fn style_for(doc: &Document, id: NodeId) -> Style {
    let element = doc.get(id);
    let role = element.role;

    let mut style = Style {
        display: Display::Flex,
        flex_direction: match role {
            Role::Nav | Role::NavLinks | Role::TabBar | Role::DotRail => FlexDirection::Row,
            _ => FlexDirection::Column,
        },
        ..Style::default()
    };

    if matches!(role, Role::Nav | Role::NavLinks | Role::TabBar | Role::DotRail) {
        style.align_items = Some(AlignItems::Center);
    }
    if role == Role::DotRail {
        style.justify_content = Some(JustifyContent::Center);
    }

    // Inline-ish elements size to their text; everything else spans the row.
    style.size = Size {
        width: match role {
            Role::NavLogo
            | Role::NavLink
            | Role::Tab
            | Role::OpenModal
            | Role::CloseModal
            | Role::ScrollCta
            | Role::SliderPrev
            | Role::SliderNext => Dimension::Length(element.text.width() as f32 + 2.0),
            Role::Dot => Dimension::Length(2.0),
            _ => Dimension::Percent(1.0),
        },
        height: if element.rows > 0 {
            Dimension::Length(element.rows as f32)
        } else if matches!(role, Role::Sentinel) {
            Dimension::Length(0.0)
        } else {
            Dimension::Auto
        },
    };

    // Slider chrome overlays the slides; horizontal slide placement is the
    // translate style's job, so every slide anchors at the slider origin.
    match role {
        Role::Slide => {
            style.position = Position::Absolute;
            style.inset = Rect {
                left: LengthPercentageAuto::Length(0.0),
                right: LengthPercentageAuto::Auto,
                top: LengthPercentageAuto::Length(0.0),
                bottom: LengthPercentageAuto::Auto,
            };
            style.size = Size {
                width: Dimension::Percent(1.0),
                height: Dimension::Percent(1.0),
            };
        }
        Role::SliderPrev => {
            style.position = Position::Absolute;
            style.inset = Rect {
                left: LengthPercentageAuto::Length(1.0),
                right: LengthPercentageAuto::Auto,
                top: LengthPercentageAuto::Percent(0.5),
                bottom: LengthPercentageAuto::Auto,
            };
        }
        Role::SliderNext => {
            style.position = Position::Absolute;
            style.inset = Rect {
                left: LengthPercentageAuto::Auto,
                right: LengthPercentageAuto::Length(1.0),
                top: LengthPercentageAuto::Percent(0.5),
                bottom: LengthPercentageAuto::Auto,
            };
        }
        Role::DotRail => {
            style.position = Position::Absolute;
            style.inset = Rect {
                left: LengthPercentageAuto::Length(0.0),
                right: LengthPercentageAuto::Auto,
                top: LengthPercentageAuto::Auto,
                bottom: LengthPercentageAuto::Length(0.0),
            };
            style.size = Size {
                width: Dimension::Percent(1.0),
                height: Dimension::Length(1.0),
            };
        }
        _ => {}
    }

    style
}

/// Walk the tree accumulating parent offsets into absolute coordinates.
fn extract(
    doc: &Document,
    id: NodeId,
    tree: &TaffyTree<()>,
    taffy_ids: &[Option<TaffyNodeId>],
    parent_x: f32,
    parent_y: f32,
    out: &mut ComputedLayout,
) -> Result<(), PageError> {
    let Some(node) = taffy_ids[id.index()] else {
        return Ok(()); // overlay subtree
    };
    let placement = tree.layout(node)?;
    let abs_x = parent_x + placement.location.x;
    let abs_y = parent_y + placement.location.y;

    let i = id.index();
    out.x[i] = abs_x.round() as i32;
    out.y[i] = abs_y.round() as i32;
    out.width[i] = placement.size.width.round() as i32;
    out.height[i] = placement.size.height.round() as i32;
    out.in_flow[i] = true;

    for &child in doc.children(id) {
        extract(doc, child, tree, taffy_ids, abs_x, abs_y, out)?;
    }
    Ok(())
}

/// Rendered height of the navigation bar, measured once at init for the
/// sticky observer's margin.
pub fn nav_height(doc: &Document, layout: &ComputedLayout) -> i32 {
    doc.find_first(Role::Nav)
        .map(|nav| layout.band(nav).height)
        .unwrap_or(0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::builder;

    #[test]
    fn test_sections_stack_vertically() {
        let doc = builder::standard();
        let layout = compute(&doc, 80).unwrap();

        let sections = doc.find_all(Role::Section);
        let mut last_bottom = 0;
        for section in sections {
            let band = layout.band(section);
            assert!(band.top >= last_bottom, "sections overlap");
            assert!(band.height > 0);
            last_bottom = band.bottom();
        }
        assert!(layout.content_height() >= last_bottom);
    }

    #[test]
    fn test_nav_links_flow_horizontally() {
        let doc = builder::standard();
        let layout = compute(&doc, 80).unwrap();

        let links = doc.find_all(Role::NavLink);
        assert!(links.len() >= 2);
        let y0 = layout.y[links[0].index()];
        let mut last_right = i32::MIN;
        for link in links {
            let i = link.index();
            assert_eq!(layout.y[i], y0, "links on different rows");
            assert!(layout.x[i] >= last_right, "links overlap");
            last_right = layout.x[i] + layout.width[i];
        }
    }

    #[test]
    fn test_slides_anchor_at_slider_origin() {
        let doc = builder::standard();
        let layout = compute(&doc, 80).unwrap();

        let slider = doc.find_first(Role::Slider).unwrap();
        for slide in doc.find_all(Role::Slide) {
            assert_eq!(layout.x[slide.index()], layout.x[slider.index()]);
            assert_eq!(layout.y[slide.index()], layout.y[slider.index()]);
            assert_eq!(layout.band(slide).height, layout.band(slider).height);
        }
    }

    #[test]
    fn test_modal_subtree_out_of_flow() {
        let doc = builder::standard();
        let layout = compute(&doc, 80).unwrap();

        let modal = doc.find_first(Role::Modal).unwrap();
        let backdrop = doc.find_first(Role::Backdrop).unwrap();
        assert!(!layout.in_flow(modal));
        assert!(!layout.in_flow(backdrop));
        assert_eq!(layout.band(modal), Band::new(0, 0));
    }

    #[test]
    fn test_sentinel_sits_at_header_end() {
        let doc = builder::standard();
        let layout = compute(&doc, 80).unwrap();

        let header = doc.find_first(Role::Header).unwrap();
        let sentinel = doc.find_first(Role::Sentinel).unwrap();
        let band = layout.band(sentinel);
        assert_eq!(band.height, 0);
        assert_eq!(band.top, layout.band(header).bottom());
    }

    #[test]
    fn test_nav_height_measured() {
        let doc = builder::standard();
        let layout = compute(&doc, 80).unwrap();
        assert_eq!(nav_height(&doc, &layout), 3);
    }

    #[test]
    fn test_hit_test_finds_deepest_and_respects_translate() {
        let doc = builder::standard();
        let layout = compute(&doc, 80).unwrap();

        let links = doc.find_all(Role::NavLink);
        let i = links[0].index();
        let hit = layout.hit_test(&doc, layout.x[i], layout.y[i]);
        assert_eq!(hit, Some(links[0]));

        // Point outside the page.
        assert_eq!(layout.hit_test(&doc, 0, layout.content_height() + 10), None);
    }
}
