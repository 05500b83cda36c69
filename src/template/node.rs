use serde::Serialize;

use crate::{assets::resolve::EmbeddedImage, template::style::Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Container,
    Text,
    Image,
}

/// Immutable box-model tree handed to the layout engine.
///
/// Child order is paint and flow order. Images carry their bytes inline, so a tree never
/// references files.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    Container { style: Style, children: Vec<Node> },
    Text { style: Style, text: String },
    Image { style: Style, src: EmbeddedImage },
}

impl Node {
    pub fn container(style: Style, children: Vec<Node>) -> Self {
        Self::Container { style, children }
    }

    pub fn text(style: Style, text: impl Into<String>) -> Self {
        Self::Text {
            style,
            text: text.into(),
        }
    }

    pub fn image(style: Style, src: EmbeddedImage) -> Self {
        Self::Image { style, src }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Container { .. } => NodeKind::Container,
            Self::Text { .. } => NodeKind::Text,
            Self::Image { .. } => NodeKind::Image,
        }
    }

    pub fn style(&self) -> &Style {
        match self {
            Self::Container { style, .. } | Self::Text { style, .. } | Self::Image { style, .. } => {
                style
            }
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Container { children, .. } => children,
            Self::Text { .. } | Self::Image { .. } => &[],
        }
    }

    /// Literal text of a text leaf.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Depth-first, pre-order walk including `self`.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.iter().filter(|n| n.kind() == kind).count()
    }
}

/// Iterator returned by [`Node::iter`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/node.rs"]
mod tests;
