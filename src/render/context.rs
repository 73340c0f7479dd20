use crate::ast::{Node, NodeKind};
use crate::options::Options;
use crate::render::handlers::Handlers;
use crate::render::{Handler, Traverse};
use std::borrow::Cow;
use std::sync::Arc;

/// State threaded through one traversal.
///
/// A context is never changed after construction. Handlers that need
/// something different for their children derive a new one with the
/// `with_*`/`nested`/`inline` methods; siblings and the parent keep
/// seeing the original. Options and the handler table are behind `Arc`,
/// so deriving is cheap.
#[derive(Clone, Debug)]
pub struct Context {
    options: Arc<Options>,
    depth: usize,
    join: Option<Cow<'static, str>>,
    handlers: Arc<Handlers>,
}

impl Default for Context {
    fn default() -> Self {
        Context::new(Options::default(), Handlers::builtin())
    }
}

impl Context {
    /// Top-level context: depth 0, no join override.
    pub fn new(options: Options, handlers: Handlers) -> Self {
        Context {
            options: Arc::new(options),
            depth: 0,
            join: None,
            handlers: Arc::new(handlers),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Nesting depth, 0 at the top level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The explicit join separator, if one was set.
    pub fn join(&self) -> Option<&str> {
        self.join.as_deref()
    }

    /// Separator placed between sibling results: the explicit join if set,
    /// otherwise a blank line at the top level and nothing below it.
    pub fn separator(&self) -> &str {
        match &self.join {
            Some(sep) => &**sep,
            None if self.depth == 0 => "\n\n",
            None => "",
        }
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    pub fn handler(&self, kind: NodeKind) -> Option<&Handler> {
        self.handlers.get(kind)
    }

    pub fn with_join(&self, sep: impl Into<Cow<'static, str>>) -> Context {
        Context {
            join: Some(sep.into()),
            ..self.clone()
        }
    }

    /// Children glued together without separators.
    pub fn inline(&self) -> Context {
        self.with_join("")
    }

    /// One nesting level deeper.
    pub fn nested(&self) -> Context {
        Context {
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Replace the handler for `kind` in the derived context only.
    pub fn with_handler<F>(&self, kind: NodeKind, handler: F) -> Context
    where
        F: Fn(&Node, &Context, Traverse) -> String + Send + Sync + 'static,
    {
        let mut handlers = (*self.handlers).clone();
        handlers.insert(kind, handler);
        Context {
            handlers: Arc::new(handlers),
            ..self.clone()
        }
    }
}
