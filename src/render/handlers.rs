use crate::ast::{Node, NodeKind};
use crate::escape::{escape_code, escape_text, escape_url};
use crate::render::{Context, Handler, Traverse};
use crate::text::Region;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Dispatch table from node kind to handler.
///
/// Kinds without an entry are rendered by recursing into their children,
/// or as nothing when they are leaves.
#[derive(Clone, Default)]
pub struct Handlers {
    map: HashMap<NodeKind, Handler>,
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.map.keys().collect();
        kinds.sort();
        f.debug_struct("Handlers").field("kinds", &kinds).finish()
    }
}

impl Handlers {
    /// An empty table.
    pub fn new() -> Self {
        Handlers::default()
    }

    /// The MarkdownV2 handlers.
    pub fn builtin() -> Self {
        let mut h = Handlers::new();
        h.insert(NodeKind::Document, render_document)
            .insert(NodeKind::Paragraph, render_paragraph)
            .insert(NodeKind::Text, render_text)
            .insert(NodeKind::Strong, |n: &Node, c: &Context, t: Traverse| {
                wrap_inline(n, c, t, "*")
            })
            .insert(NodeKind::Emphasis, |n: &Node, c: &Context, t: Traverse| {
                wrap_inline(n, c, t, "_")
            })
            .insert(NodeKind::Strikethrough, |n: &Node, c: &Context, t: Traverse| {
                wrap_inline(n, c, t, "~")
            })
            .insert(NodeKind::InlineCode, render_inline_code)
            .insert(NodeKind::CodeBlock, render_code_block)
            .insert(NodeKind::Heading, render_heading)
            .insert(NodeKind::Link, render_link)
            .insert(NodeKind::Image, render_image)
            .insert(NodeKind::Blockquote, render_blockquote)
            .insert(NodeKind::List, render_list)
            .insert(NodeKind::LineBreak, |_: &Node, _: &Context, _: Traverse| {
                "\n".to_owned()
            })
            .insert(NodeKind::ThematicBreak, render_thematic_break)
            .insert(NodeKind::Table, render_table)
            .insert(NodeKind::TableRow, render_table_row)
            .insert(NodeKind::TableCell, render_table_cell)
            .insert(NodeKind::Html, render_html);
        h
    }

    /// Set the handler for `kind`, replacing any existing one.
    pub fn insert<F>(&mut self, kind: NodeKind, handler: F) -> &mut Self
    where
        F: Fn(&Node, &Context, Traverse) -> String + Send + Sync + 'static,
    {
        self.map.insert(kind, Arc::new(handler));
        self
    }

    /// Builder form of [`Handlers::insert`].
    pub fn with<F>(mut self, kind: NodeKind, handler: F) -> Self
    where
        F: Fn(&Node, &Context, Traverse) -> String + Send + Sync + 'static,
    {
        self.insert(kind, handler);
        self
    }

    pub fn remove(&mut self, kind: NodeKind) -> Option<Handler> {
        self.map.remove(&kind)
    }

    /// Lay `overrides` over this table; entries in `overrides` win.
    pub fn merge(&mut self, overrides: &Handlers) -> &mut Self {
        for (kind, handler) in &overrides.map {
            self.map.insert(*kind, Arc::clone(handler));
        }
        self
    }

    pub fn get(&self, kind: NodeKind) -> Option<&Handler> {
        self.map.get(&kind)
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.map.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Prefix every line of `s` with `>`.
pub fn quote(s: &str) -> String {
    let mut r = Region::from_str(s);
    r.quote();
    r.apply()
}

fn children(node: &Node) -> &[Node] {
    node.children().unwrap_or(&[])
}

fn render_document(node: &Node, ctx: &Context, traverse: Traverse) -> String {
    traverse(children(node), &ctx.with_join("\n\n"))
        .trim()
        .to_owned()
}

fn render_paragraph(node: &Node, ctx: &Context, traverse: Traverse) -> String {
    traverse(children(node), &ctx.inline())
}

fn render_text(node: &Node, _: &Context, _: Traverse) -> String {
    match node {
        Node::Text(value) => escape_text(value),
        _ => String::new(),
    }
}

// Text inside tables is shown in a code fence.
fn render_text_as_code(node: &Node, _: &Context, _: Traverse) -> String {
    match node {
        Node::Text(value) => escape_code(value),
        _ => String::new(),
    }
}

fn wrap_inline(node: &Node, ctx: &Context, traverse: Traverse, delim: &str) -> String {
    format!("{delim}{}{delim}", traverse(children(node), &ctx.inline()))
}

fn render_inline_code(node: &Node, _: &Context, _: Traverse) -> String {
    match node {
        Node::InlineCode(value) => format!("`{}`", escape_code(value)),
        _ => String::new(),
    }
}

/// A fenced MarkdownV2 code block.
pub fn code_fence(language: Option<&str>, body: &str) -> String {
    let lang = language.map(escape_text).unwrap_or_default();
    format!("```{lang}\n{}\n```", escape_code(body))
}

fn render_code_block(node: &Node, _: &Context, _: Traverse) -> String {
    match node {
        Node::CodeBlock { language, value } => code_fence(language.as_deref(), value),
        _ => String::new(),
    }
}

fn render_heading(node: &Node, ctx: &Context, traverse: Traverse) -> String {
    let Node::Heading { level, children } = node else {
        return String::new();
    };
    let text = traverse(children, &ctx.inline());
    match ctx.options().heading_glyphs.get(*level) {
        Some(glyph) => format!("*{} {text}*", escape_text(glyph)),
        None => format!("*{text}*"),
    }
}

fn render_link(node: &Node, ctx: &Context, traverse: Traverse) -> String {
    let Node::Link { url, children } = node else {
        return String::new();
    };
    let text = traverse(children, &ctx.inline());
    format!("[{text}]({})", escape_url(url))
}

fn render_image(node: &Node, ctx: &Context, _: Traverse) -> String {
    let Node::Image { url, alt } = node else {
        return String::new();
    };
    let marker = match ctx.options().image_marker.as_str() {
        "" => "!",
        m => m,
    };
    let alt = alt.as_deref().filter(|a| !a.is_empty()).unwrap_or("Image");
    format!(
        "[{} {}]({})",
        escape_text(marker),
        escape_text(alt),
        escape_url(url)
    )
}

fn render_blockquote(node: &Node, ctx: &Context, traverse: Traverse) -> String {
    quote(&traverse(children(node), &ctx.with_join("\n\n")))
}

fn render_list(node: &Node, ctx: &Context, traverse: Traverse) -> String {
    let Node::List {
        ordered,
        start,
        items,
    } = node
    else {
        return String::new();
    };
    let opts = ctx.options();
    let start = start.unwrap_or(1);
    let indent = "  ".repeat(ctx.depth());
    let item_ctx = ctx.nested().with_join("\n");

    let mut lines = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let marker = if *ordered {
            format!("{}{}", start + i as u64, opts.ordered_list_separator)
        } else {
            opts.unordered_list_marker.clone()
        };
        let (checked, content) = match item {
            Node::ListItem { checked, children } => (*checked, children.as_slice()),
            other => (None, std::slice::from_ref(other)),
        };
        let checkbox = match checked {
            Some(true) => "[x] ",
            Some(false) => "[ ] ",
            None => "",
        };
        let prefix = escape_text(&format!("{indent}{marker} {checkbox}"));
        let content = traverse(content, &item_ctx);
        lines.push(format!("{prefix}{}", content.trim()));
    }
    lines.join("\n")
}

fn render_thematic_break(_: &Node, ctx: &Context, _: Traverse) -> String {
    escape_text(&ctx.options().thematic_break_text)
}

fn render_table(node: &Node, ctx: &Context, traverse: Traverse) -> String {
    let table_ctx = ctx
        .with_join("\n")
        .with_handler(NodeKind::Text, render_text_as_code);
    format!("```\n{}\n```", traverse(children(node), &table_ctx))
}

fn render_table_row(node: &Node, ctx: &Context, traverse: Traverse) -> String {
    format!("| {} |", traverse(children(node), &ctx.with_join(" | ")))
}

fn render_table_cell(node: &Node, ctx: &Context, traverse: Traverse) -> String {
    traverse(children(node), &ctx.inline())
}

fn render_html(node: &Node, _: &Context, _: Traverse) -> String {
    match node {
        Node::Html(value) => format!("`{}`", escape_code(value)),
        _ => String::new(),
    }
}
