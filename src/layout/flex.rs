//! Node tree to taffy flexbox bridge.

use taffy::prelude::{AvailableSpace, NodeId, Rect, Size};
use taffy::style::{
    AlignItems, Dimension, Display, FlexDirection, JustifyContent, LengthPercentage,
    LengthPercentageAuto,
};

use crate::{
    foundation::{
        core::{Canvas, Edges, Length},
        error::{CardError, CardResult},
    },
    layout::text::{TextMeasurer, TextSpec},
    template::{
        node::Node,
        style::{Align, FlexDirection as Direction, Style},
    },
};

/// Absolute border box of a laid-out node, in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct BoxRect {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) w: f32,
    pub(crate) h: f32,
}

/// Taffy tree mirroring a [`Node`] tree. Text leaves carry an index into `texts`.
pub(crate) struct FlexTree {
    taffy: taffy::TaffyTree<usize>,
    root: NodeId,
    texts: Vec<TextSpec>,
}

impl FlexTree {
    /// The root is sized to the canvas regardless of its own width and height.
    pub(crate) fn build(tree: &Node, canvas: Canvas) -> CardResult<Self> {
        let mut taffy = taffy::TaffyTree::new();
        let mut texts = Vec::new();
        let root = build_subtree(&mut taffy, &mut texts, tree, Some(canvas))?;
        Ok(Self { taffy, root, texts })
    }

    pub(crate) fn text_count(&self) -> usize {
        self.texts.len()
    }

    pub(crate) fn compute(&mut self, canvas: Canvas, measurer: &mut TextMeasurer) -> CardResult<()> {
        let texts = &self.texts;
        let available = Size {
            width: AvailableSpace::Definite(canvas.width as f32),
            height: AvailableSpace::Definite(canvas.height as f32),
        };
        self.taffy
            .compute_layout_with_measure(
                self.root,
                available,
                |known_dimensions, available_space, _node_id, node_context, _style| {
                    let Some(spec) = node_context.and_then(|i| texts.get(*i)) else {
                        return known_dimensions.unwrap_or(Size::ZERO);
                    };
                    if let Size {
                        width: Some(width),
                        height: Some(height),
                    } = known_dimensions
                    {
                        return Size { width, height };
                    }

                    let max_width = known_dimensions.width.or(match available_space.width {
                        AvailableSpace::Definite(w) => Some(w),
                        AvailableSpace::MinContent => Some(0.0),
                        AvailableSpace::MaxContent => None,
                    });
                    let shaped = measurer.shape(spec, max_width);
                    Size {
                        width: known_dimensions.width.unwrap_or(shaped.width),
                        height: known_dimensions.height.unwrap_or(shaped.height),
                    }
                },
            )
            .map_err(layout_err)
    }

    /// Visit every node in paint order with its absolute box and, for text leaves, its
    /// resolved typography.
    pub(crate) fn walk(
        &self,
        tree: &Node,
        visit: &mut dyn FnMut(&Node, BoxRect, Option<&TextSpec>) -> CardResult<()>,
    ) -> CardResult<()> {
        self.walk_node(tree, self.root, (0.0, 0.0), visit)
    }

    fn walk_node(
        &self,
        node: &Node,
        id: NodeId,
        origin: (f32, f32),
        visit: &mut dyn FnMut(&Node, BoxRect, Option<&TextSpec>) -> CardResult<()>,
    ) -> CardResult<()> {
        let l = self.taffy.layout(id).map_err(layout_err)?;
        let rect = BoxRect {
            x: origin.0 + l.location.x,
            y: origin.1 + l.location.y,
            w: l.size.width,
            h: l.size.height,
        };
        let text = self
            .taffy
            .get_node_context(id)
            .and_then(|i| self.texts.get(*i));
        visit(node, rect, text)?;

        let ids = self.taffy.children(id).map_err(layout_err)?;
        if ids.len() != node.children().len() {
            return Err(CardError::layout("layout tree out of sync with node tree"));
        }
        for (child, cid) in node.children().iter().zip(ids) {
            self.walk_node(child, cid, (rect.x, rect.y), visit)?;
        }
        Ok(())
    }
}

fn build_subtree(
    taffy: &mut taffy::TaffyTree<usize>,
    texts: &mut Vec<TextSpec>,
    node: &Node,
    root: Option<Canvas>,
) -> CardResult<NodeId> {
    let style = flex_style(node.style(), root)?;
    match node {
        Node::Container { children, .. } => {
            let mut ids = Vec::with_capacity(children.len());
            for child in children {
                ids.push(build_subtree(taffy, texts, child, None)?);
            }
            taffy.new_with_children(style, &ids).map_err(layout_err)
        }
        Node::Text { style: s, text } => {
            texts.push(TextSpec::from_style(s, text)?);
            taffy
                .new_leaf_with_context(style, texts.len() - 1)
                .map_err(layout_err)
        }
        Node::Image { .. } => taffy.new_leaf(style).map_err(layout_err),
    }
}

fn flex_style(style: &Style, root: Option<Canvas>) -> CardResult<taffy::Style> {
    let padding = style.padding.unwrap_or_default();
    let margin = style.margin.unwrap_or_default();

    let mut out: taffy::Style = taffy::Style {
        display: Display::Flex,
        flex_direction: match style.flex_direction {
            Some(Direction::Column) => FlexDirection::Column,
            Some(Direction::Row) | None => FlexDirection::Row,
        },
        align_items: style.align_items.map(align_items),
        justify_content: style.justify_content.map(justify_content),
        flex_grow: finite(style.flex_grow.unwrap_or(0.0), "flex-grow")?.max(0.0),
        flex_shrink: finite(style.flex_shrink.unwrap_or(1.0), "flex-shrink")?.max(0.0),
        size: Size {
            width: dimension(style.width)?,
            height: dimension(style.height)?,
        },
        max_size: Size {
            width: dimension(style.max_width)?,
            height: Dimension::auto(),
        },
        padding: padding_rect(padding)?,
        margin: margin_rect(margin)?,
        ..taffy::Style::default()
    };

    if let Some(canvas) = root {
        out.size = Size {
            width: Dimension::length(canvas.width as f32),
            height: Dimension::length(canvas.height as f32),
        };
    }
    Ok(out)
}

fn align_items(a: Align) -> AlignItems {
    match a {
        Align::Start => AlignItems::FlexStart,
        Align::Center => AlignItems::Center,
        Align::End => AlignItems::FlexEnd,
        Align::Stretch => AlignItems::Stretch,
    }
}

fn justify_content(a: Align) -> JustifyContent {
    match a {
        Align::Start => JustifyContent::FlexStart,
        Align::Center => JustifyContent::Center,
        Align::End => JustifyContent::FlexEnd,
        Align::Stretch => JustifyContent::Stretch,
    }
}

fn dimension(len: Option<Length>) -> CardResult<Dimension> {
    Ok(match len {
        None => Dimension::auto(),
        Some(Length::Px(v)) => Dimension::length(finite(v, "length")?.max(0.0)),
        Some(Length::Percent(p)) => Dimension::percent(finite(p, "percentage")?.max(0.0) / 100.0),
    })
}

fn padding_rect(e: Edges) -> CardResult<Rect<LengthPercentage>> {
    Ok(Rect {
        left: LengthPercentage::length(finite(e.left, "padding")?.max(0.0)),
        right: LengthPercentage::length(finite(e.right, "padding")?.max(0.0)),
        top: LengthPercentage::length(finite(e.top, "padding")?.max(0.0)),
        bottom: LengthPercentage::length(finite(e.bottom, "padding")?.max(0.0)),
    })
}

fn margin_rect(e: Edges) -> CardResult<Rect<LengthPercentageAuto>> {
    Ok(Rect {
        left: LengthPercentageAuto::length(finite(e.left, "margin")?),
        right: LengthPercentageAuto::length(finite(e.right, "margin")?),
        top: LengthPercentageAuto::length(finite(e.top, "margin")?),
        bottom: LengthPercentageAuto::length(finite(e.bottom, "margin")?),
    })
}

fn finite(v: f32, what: &str) -> CardResult<f32> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CardError::layout(format!("{what} must be finite, got {v}")))
    }
}

fn layout_err(e: taffy::TaffyError) -> CardError {
    CardError::layout(e.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/flex.rs"]
mod tests;
