/// Tag of a [`Node`] variant. Handler and strategy tables are keyed by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading,
    Emphasis,
    Strong,
    Strikethrough,
    InlineCode,
    CodeBlock,
    Link,
    Image,
    Blockquote,
    List,
    ListItem,
    Table,
    TableRow,
    TableCell,
    ThematicBreak,
    LineBreak,
    Text,
    Html,
    FootnoteDefinition,
    FootnoteReference,
}

/// Document tree node.
///
/// Containers own their children; leaves carry their raw (unescaped) text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document(Vec<Node>),
    Paragraph(Vec<Node>),
    Heading {
        level: u8,
        children: Vec<Node>,
    },
    Emphasis(Vec<Node>),
    Strong(Vec<Node>),
    Strikethrough(Vec<Node>),
    InlineCode(String),
    CodeBlock {
        language: Option<String>,
        value: String,
    },
    Link {
        url: String,
        children: Vec<Node>,
    },
    Image {
        url: String,
        alt: Option<String>,
    },
    Blockquote(Vec<Node>),
    List {
        ordered: bool,
        start: Option<u64>,
        items: Vec<Node>,
    },
    ListItem {
        checked: Option<bool>,
        children: Vec<Node>,
    },
    Table(Vec<Node>),
    TableRow(Vec<Node>),
    TableCell(Vec<Node>),
    ThematicBreak,
    /// Hard line break.
    LineBreak,
    Text(String),
    /// Raw HTML, block or inline.
    Html(String),
    FootnoteDefinition {
        label: String,
        children: Vec<Node>,
    },
    FootnoteReference(String),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Heading { .. } => NodeKind::Heading,
            Node::Emphasis(_) => NodeKind::Emphasis,
            Node::Strong(_) => NodeKind::Strong,
            Node::Strikethrough(_) => NodeKind::Strikethrough,
            Node::InlineCode(_) => NodeKind::InlineCode,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::Link { .. } => NodeKind::Link,
            Node::Image { .. } => NodeKind::Image,
            Node::Blockquote(_) => NodeKind::Blockquote,
            Node::List { .. } => NodeKind::List,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::Table(_) => NodeKind::Table,
            Node::TableRow(_) => NodeKind::TableRow,
            Node::TableCell(_) => NodeKind::TableCell,
            Node::ThematicBreak => NodeKind::ThematicBreak,
            Node::LineBreak => NodeKind::LineBreak,
            Node::Text(_) => NodeKind::Text,
            Node::Html(_) => NodeKind::Html,
            Node::FootnoteDefinition { .. } => NodeKind::FootnoteDefinition,
            Node::FootnoteReference(_) => NodeKind::FootnoteReference,
        }
    }

    /// Child nodes, or `None` for leaves.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Document(c)
            | Node::Paragraph(c)
            | Node::Emphasis(c)
            | Node::Strong(c)
            | Node::Strikethrough(c)
            | Node::Blockquote(c)
            | Node::Table(c)
            | Node::TableRow(c)
            | Node::TableCell(c) => Some(c),
            Node::Heading { children, .. }
            | Node::Link { children, .. }
            | Node::ListItem { children, .. }
            | Node::FootnoteDefinition { children, .. } => Some(children),
            Node::List { items, .. } => Some(items),
            Node::InlineCode(_)
            | Node::CodeBlock { .. }
            | Node::Image { .. }
            | Node::ThematicBreak
            | Node::LineBreak
            | Node::Text(_)
            | Node::Html(_)
            | Node::FootnoteReference(_) => None,
        }
    }

    /// Whether the node is phrasing content (lives inside a paragraph).
    pub fn is_inline(&self) -> bool {
        matches!(
            self.kind(),
            NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Strikethrough
                | NodeKind::InlineCode
                | NodeKind::Link
                | NodeKind::Image
                | NodeKind::LineBreak
                | NodeKind::Text
                | NodeKind::FootnoteReference
        )
    }

    /// Concatenated raw text of the subtree, without any markup.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(s) | Node::InlineCode(s) => out.push_str(s),
        Node::Image { alt: Some(a), .. } => out.push_str(a),
        Node::LineBreak => out.push('\n'),
        other => {
            if let Some(children) = other.children() {
                for c in children {
                    collect_text(c, out);
                }
            }
        }
    }
}
