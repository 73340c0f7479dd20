//! Node-dispatch rendering into MarkdownV2.
//!
//! [`traverse`] walks a node sequence, looks each node's kind up in the
//! context's [`Handlers`] table and joins the results with the context's
//! separator. Handlers get `traverse` passed in and call it for their own
//! children, usually with a derived [`Context`].

pub mod context;
pub mod handlers;

pub use context::Context;
pub use handlers::{Handlers, code_fence, quote};

use crate::ast::Node;
use std::sync::Arc;

/// The traversal function handed to every handler.
pub type Traverse = fn(&[Node], &Context) -> String;

/// Renders one node. Receives the node, the active context and the
/// traversal function for recursing into children.
pub type Handler = Arc<dyn Fn(&Node, &Context, Traverse) -> String + Send + Sync>;

/// Render `nodes` under `ctx`.
///
/// A node without a handler renders as its children (with the same
/// context), or as nothing when it has none.
pub fn traverse(nodes: &[Node], ctx: &Context) -> String {
    let parts: Vec<String> = nodes
        .iter()
        .map(|node| match ctx.handler(node.kind()) {
            Some(handler) => handler(node, ctx, traverse),
            None => match node.children() {
                Some(children) => traverse(children, ctx),
                None => String::new(),
            },
        })
        .collect();
    parts.join(ctx.separator())
}
