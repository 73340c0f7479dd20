use crate::ast::node::Node;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag};

/// Parser extensions matching CommonMark + GFM: tables, strikethrough,
/// task lists and footnotes.
pub fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Parse Markdown source into a `Node::Document`.
pub fn parse_document(source: &str) -> Node {
    let events: Vec<Event> = Parser::new_ext(source, parser_options()).collect();
    Node::Document(parse_events_to_nodes(&events))
}

/// A stack frame used while folding Start/End pairs into nodes. The root
/// frame has no tag.
struct Frame<'a> {
    tag: Option<Tag<'a>>,
    children: Vec<Node>,
    // span-level containers take inlines directly; block containers wrap
    // runs of inlines into an implicit paragraph
    collect_inlines: bool,
    open_paragraph: bool,
    // raw content of code and html blocks
    raw: String,
    checked: Option<bool>,
}

impl<'a> Frame<'a> {
    fn new(tag: Option<Tag<'a>>) -> Self {
        let collect_inlines = matches!(
            tag,
            Some(
                Tag::Paragraph
                    | Tag::Heading { .. }
                    | Tag::Emphasis
                    | Tag::Strong
                    | Tag::Strikethrough
                    | Tag::Link { .. }
                    | Tag::Image { .. }
                    | Tag::TableCell
            )
        );
        Frame {
            tag,
            children: Vec::new(),
            collect_inlines,
            open_paragraph: false,
            raw: String::new(),
            checked: None,
        }
    }

    fn collects_raw(&self) -> bool {
        matches!(self.tag, Some(Tag::CodeBlock(_) | Tag::HtmlBlock))
    }

    fn push(&mut self, node: Node, inline: bool) {
        if self.collect_inlines || !inline {
            self.open_paragraph = false;
            push_merging_text(&mut self.children, node);
            return;
        }
        if self.open_paragraph {
            if let Some(Node::Paragraph(inls)) = self.children.last_mut() {
                push_merging_text(inls, node);
                return;
            }
        }
        self.children.push(Node::Paragraph(vec![node]));
        self.open_paragraph = true;
    }
}

// adjacent text runs are stored as one Text node
fn push_merging_text(children: &mut Vec<Node>, node: Node) {
    if let Node::Text(s) = &node {
        if let Some(Node::Text(prev)) = children.last_mut() {
            prev.push_str(s);
            return;
        }
    }
    children.push(node);
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// What a closed frame contributes to its parent.
enum Closed {
    /// A node, and whether it is phrasing content.
    Node(Node, bool),
    /// Children spliced into the parent as they are.
    Splice(Vec<Node>),
}

impl Closed {
    fn into_parent(self, parent: &mut Frame<'_>) {
        match self {
            Closed::Node(node, inline) => parent.push(node, inline),
            Closed::Splice(children) => {
                for child in children {
                    let inline = child.is_inline();
                    parent.push(child, inline);
                }
            }
        }
    }
}

fn close_frame(frame: Frame<'_>) -> Closed {
    let Frame {
        tag,
        children,
        raw,
        checked,
        ..
    } = frame;
    let Some(tag) = tag else {
        return Closed::Splice(children);
    };
    let (node, inline) = match tag {
        Tag::Paragraph => (Node::Paragraph(children), false),
        Tag::Heading { level, .. } => (
            Node::Heading {
                level: heading_level(level),
                children,
            },
            false,
        ),
        Tag::BlockQuote(_) => (Node::Blockquote(children), false),
        Tag::CodeBlock(kind) => {
            let language = match kind {
                CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                CodeBlockKind::Indented => None,
            };
            let value = raw.strip_suffix('\n').unwrap_or(&raw).to_owned();
            (Node::CodeBlock { language, value }, false)
        }
        Tag::HtmlBlock => (Node::Html(raw.trim_end_matches('\n').to_owned()), false),
        Tag::List(start) => (
            Node::List {
                ordered: start.is_some(),
                start,
                items: children,
            },
            false,
        ),
        Tag::Item => (Node::ListItem { checked, children }, false),
        Tag::FootnoteDefinition(label) => (
            Node::FootnoteDefinition {
                label: label.to_string(),
                children,
            },
            false,
        ),
        Tag::Table(_) => (Node::Table(children), false),
        Tag::TableHead | Tag::TableRow => (Node::TableRow(children), false),
        Tag::TableCell => (Node::TableCell(children), false),
        Tag::Emphasis => (Node::Emphasis(children), true),
        Tag::Strong => (Node::Strong(children), true),
        Tag::Strikethrough => (Node::Strikethrough(children), true),
        Tag::Link {
            link_type, dest_url, ..
        } => {
            let url = if link_type == LinkType::Email && !dest_url.starts_with("mailto:") {
                format!("mailto:{dest_url}")
            } else {
                dest_url.to_string()
            };
            (Node::Link { url, children }, true)
        }
        Tag::Image { dest_url, .. } => {
            let alt: String = children.iter().map(Node::plain_text).collect();
            (
                Node::Image {
                    url: dest_url.to_string(),
                    alt: (!alt.is_empty()).then_some(alt),
                },
                true,
            )
        }
        // extensions that are not enabled: keep their content
        _ => return Closed::Splice(children),
    };
    Closed::Node(node, inline)
}

/// Convert a pulldown-cmark `Event` slice into the top-level nodes of a
/// document. This is a best-effort fold: unbalanced or unknown structures
/// keep their content rather than failing.
pub fn parse_events_to_nodes(events: &[Event<'_>]) -> Vec<Node> {
    let mut stack: Vec<Frame> = vec![Frame::new(None)];

    for ev in events {
        match ev {
            Event::Start(tag) => stack.push(Frame::new(Some(tag.clone()))),
            Event::End(_) => {
                if stack.len() < 2 {
                    continue;
                }
                let Some(frame) = stack.pop() else { continue };
                let Some(parent) = stack.last_mut() else { continue };
                close_frame(frame).into_parent(parent);
            }
            Event::Text(t) => {
                let Some(top) = stack.last_mut() else { continue };
                if top.collects_raw() {
                    top.raw.push_str(t);
                } else {
                    top.push(Node::Text(t.to_string()), true);
                }
            }
            Event::Html(t) => {
                let Some(top) = stack.last_mut() else { continue };
                if top.collects_raw() {
                    top.raw.push_str(t);
                } else {
                    top.push(Node::Html(t.trim_end_matches('\n').to_owned()), false);
                }
            }
            Event::Code(t) => {
                if let Some(top) = stack.last_mut() {
                    top.push(Node::InlineCode(t.to_string()), true);
                }
            }
            Event::InlineHtml(t) => {
                if let Some(top) = stack.last_mut() {
                    top.push(Node::Html(t.to_string()), true);
                }
            }
            Event::SoftBreak => {
                if let Some(top) = stack.last_mut() {
                    top.push(Node::Text("\n".to_owned()), true);
                }
            }
            Event::HardBreak => {
                if let Some(top) = stack.last_mut() {
                    top.push(Node::LineBreak, true);
                }
            }
            Event::Rule => {
                if let Some(top) = stack.last_mut() {
                    top.push(Node::ThematicBreak, false);
                }
            }
            Event::FootnoteReference(label) => {
                if let Some(top) = stack.last_mut() {
                    top.push(Node::FootnoteReference(label.to_string()), true);
                }
            }
            Event::TaskListMarker(checked) => {
                if let Some(item) = stack
                    .iter_mut()
                    .rev()
                    .find(|f| matches!(f.tag, Some(Tag::Item)))
                {
                    item.checked = Some(*checked);
                }
            }
            // math is not enabled in `parser_options`
            Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    // close anything left open by a truncated event stream
    while stack.len() > 1 {
        let Some(frame) = stack.pop() else { break };
        let Some(parent) = stack.last_mut() else { break };
        close_frame(frame).into_parent(parent);
    }

    stack.pop().map(|root| root.children).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Vec<Node> {
        match parse_document(src) {
            Node::Document(children) => children,
            other => panic!("expected document, got {other:?}"),
        }
    }

    #[test]
    fn heading_and_paragraph() {
        let nodes = parse("# Title\n\nHello *world*");
        assert_eq!(
            nodes,
            vec![
                Node::Heading {
                    level: 1,
                    children: vec![Node::Text("Title".into())],
                },
                Node::Paragraph(vec![
                    Node::Text("Hello ".into()),
                    Node::Emphasis(vec![Node::Text("world".into())]),
                ]),
            ]
        );
    }

    #[test]
    fn tight_list_items_get_paragraphs() {
        let nodes = parse("- a\n- b");
        let Node::List { ordered, items, .. } = &nodes[0] else {
            panic!("expected list");
        };
        assert!(!ordered);
        assert_eq!(
            items[0],
            Node::ListItem {
                checked: None,
                children: vec![Node::Paragraph(vec![Node::Text("a".into())])],
            }
        );
    }

    #[test]
    fn task_markers_set_checked() {
        let nodes = parse("- [x] done\n- [ ] todo");
        let Node::List { items, .. } = &nodes[0] else {
            panic!("expected list");
        };
        assert!(matches!(items[0], Node::ListItem { checked: Some(true), .. }));
        assert!(matches!(items[1], Node::ListItem { checked: Some(false), .. }));
    }

    #[test]
    fn ordered_list_keeps_start() {
        let nodes = parse("3. three\n4. four");
        assert!(matches!(
            nodes[0],
            Node::List {
                ordered: true,
                start: Some(3),
                ..
            }
        ));
    }

    #[test]
    fn code_block_language_and_value() {
        let nodes = parse("```rust ignore\nfn main() {}\n```");
        assert_eq!(
            nodes[0],
            Node::CodeBlock {
                language: Some("rust".into()),
                value: "fn main() {}".into(),
            }
        );
    }

    #[test]
    fn soft_breaks_merge_into_text() {
        let nodes = parse("one\ntwo");
        assert_eq!(nodes[0], Node::Paragraph(vec![Node::Text("one\ntwo".into())]));
    }

    #[test]
    fn image_alt_is_plain_text() {
        let nodes = parse("![a *b*](http://x/y.png)");
        assert_eq!(
            nodes[0],
            Node::Paragraph(vec![Node::Image {
                url: "http://x/y.png".into(),
                alt: Some("a b".into()),
            }])
        );
    }

    #[test]
    fn table_head_is_first_row() {
        let nodes = parse("| a | b |\n|---|---|\n| 1 | 2 |");
        let Node::Table(rows) = &nodes[0] else {
            panic!("expected table");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            Node::TableRow(vec![
                Node::TableCell(vec![Node::Text("a".into())]),
                Node::TableCell(vec![Node::Text("b".into())]),
            ])
        );
    }

    #[test]
    fn html_block_is_one_node() {
        let nodes = parse("<div>\nhi\n</div>");
        assert_eq!(nodes[0], Node::Html("<div>\nhi\n</div>".into()));
    }

    #[test]
    fn email_autolink_gets_mailto() {
        let nodes = parse("<me@example.com>");
        let Node::Paragraph(inls) = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert!(matches!(&inls[0], Node::Link { url, .. } if url == "mailto:me@example.com"));
    }

    #[test]
    fn caret_and_dollar_stay_text() {
        let nodes = parse("x^2^ and $y$");
        assert_eq!(
            nodes,
            vec![Node::Paragraph(vec![Node::Text("x^2^ and $y$".into())])]
        );
    }
}
