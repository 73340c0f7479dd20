//! Render CommonMark + GFM into Telegram's MarkdownV2 and split the result
//! into messages that fit a size limit.
//!
//! ```
//! use pulldown_cmark_mdv2::{Converter, DEFAULT_LIMIT};
//!
//! let converter = Converter::new();
//! assert_eq!(converter.render("# Title"), "*📌 Title*");
//!
//! let chunks = converter.split("first\n\nsecond", DEFAULT_LIMIT);
//! assert_eq!(chunks, vec!["first\n\nsecond"]);
//! ```
//!
//! Rendering is driven by a [`Handlers`] table keyed by [`NodeKind`];
//! callers can replace any built-in handler. Splitting packs rendered
//! top-level blocks greedily and breaks up oversized code blocks and block
//! quotes through the [`Strategies`] registry.

pub mod ast;
pub mod error;
pub mod escape;
pub mod options;
pub mod render;
pub mod split;
pub mod text;

pub use ast::{Node, NodeKind, parse_blocks, parse_document};
pub use error::{Error, Result};
pub use escape::{escape_code, escape_text, escape_url};
pub use options::{HeadingGlyphs, Options};
pub use render::{Context, Handler, Handlers, Traverse, traverse};
pub use split::{DEFAULT_LIMIT, Splitter, Strategies, Strategy};

/// Render Markdown `source` to MarkdownV2 with `handlers` laid over the
/// built-in ones. The result is trimmed.
pub fn render_document(source: &str, options: &Options, handlers: &Handlers) -> String {
    Converter::new()
        .options(options.clone())
        .handlers(handlers)
        .render(source)
}

/// Split already parsed top-level `nodes` into chunks of at most `limit`
/// UTF-16 units, using the built-in strategies.
pub fn split_document(nodes: &[Node], ctx: &Context, limit: usize) -> Vec<String> {
    Splitter::new(limit).split(nodes, ctx)
}

/// Reusable configuration: options plus handler and strategy overrides.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    options: Options,
    handlers: Handlers,
    strategies: Strategies,
}

impl Converter {
    pub fn new() -> Self {
        Converter::default()
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Override the handler for one node kind.
    pub fn handler<F>(mut self, kind: NodeKind, handler: F) -> Self
    where
        F: Fn(&Node, &Context, Traverse) -> String + Send + Sync + 'static,
    {
        self.handlers.insert(kind, handler);
        self
    }

    /// Override handlers for every kind present in `handlers`.
    pub fn handlers(mut self, handlers: &Handlers) -> Self {
        self.handlers.merge(handlers);
        self
    }

    /// Override the decomposition strategy for one node kind.
    pub fn strategy<F>(mut self, kind: NodeKind, strategy: F) -> Self
    where
        F: Fn(&Node, &Context, Traverse, usize) -> Vec<String> + Send + Sync + 'static,
    {
        self.strategies.insert(kind, strategy);
        self
    }

    /// Top-level context with the built-in handlers and the overrides.
    pub fn context(&self) -> Context {
        let mut handlers = Handlers::builtin();
        handlers.merge(&self.handlers);
        Context::new(self.options.clone(), handlers)
    }

    /// Splitter with the built-in strategies and the overrides.
    pub fn splitter(&self, limit: usize) -> Splitter {
        let mut strategies = Strategies::builtin();
        strategies.merge(&self.strategies);
        Splitter::with_strategies(limit, strategies)
    }

    /// Render `source` in one piece.
    pub fn render(&self, source: &str) -> String {
        let doc = parse_document(source);
        traverse(std::slice::from_ref(&doc), &self.context())
            .trim()
            .to_owned()
    }

    /// Render `source` as chunks of at most `limit` UTF-16 units.
    pub fn split(&self, source: &str, limit: usize) -> Vec<String> {
        let blocks = parse_blocks(source);
        self.splitter(limit).split(&blocks, &self.context())
    }
}
