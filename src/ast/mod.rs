pub mod node;
pub mod parse;

pub use node::{Node, NodeKind};
pub use parse::{parse_document, parse_events_to_nodes, parser_options};

/// Parse Markdown source into its top-level block nodes.
pub fn parse_blocks(source: &str) -> Vec<Node> {
    match parse_document(source) {
        Node::Document(children) => children,
        other => vec![other],
    }
}
