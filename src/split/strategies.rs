use crate::ast::{Node, NodeKind};
use crate::escape::escape_text;
use crate::render::{Context, Traverse, code_fence, quote};
use crate::text::{slice_units, text_len};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Breaks one oversized node into rendered fragments that are each valid
/// on their own. Fragments are not required to fit the limit; the splitter
/// checks them again. An empty result means the node can't be broken up.
pub type Strategy = Arc<dyn Fn(&Node, &Context, Traverse, usize) -> Vec<String> + Send + Sync>;

/// Decomposition strategies keyed by node kind.
#[derive(Clone, Default)]
pub struct Strategies {
    map: HashMap<NodeKind, Strategy>,
}

impl fmt::Debug for Strategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.map.keys().collect();
        kinds.sort();
        f.debug_struct("Strategies").field("kinds", &kinds).finish()
    }
}

impl Strategies {
    pub fn new() -> Self {
        Strategies::default()
    }

    /// Code blocks and block quotes.
    pub fn builtin() -> Self {
        let mut s = Strategies::new();
        s.insert(NodeKind::CodeBlock, split_code)
            .insert(NodeKind::Blockquote, split_blockquote);
        s
    }

    pub fn insert<F>(&mut self, kind: NodeKind, strategy: F) -> &mut Self
    where
        F: Fn(&Node, &Context, Traverse, usize) -> Vec<String> + Send + Sync + 'static,
    {
        self.map.insert(kind, Arc::new(strategy));
        self
    }

    pub fn with<F>(mut self, kind: NodeKind, strategy: F) -> Self
    where
        F: Fn(&Node, &Context, Traverse, usize) -> Vec<String> + Send + Sync + 'static,
    {
        self.insert(kind, strategy);
        self
    }

    pub fn remove(&mut self, kind: NodeKind) -> Option<Strategy> {
        self.map.remove(&kind)
    }

    /// Lay `overrides` over this registry; entries in `overrides` win.
    pub fn merge(&mut self, overrides: &Strategies) -> &mut Self {
        for (kind, strategy) in &overrides.map {
            self.map.insert(*kind, Arc::clone(strategy));
        }
        self
    }

    pub fn get(&self, kind: NodeKind) -> Option<&Strategy> {
        self.map.get(&kind)
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.map.contains_key(&kind)
    }
}

/// Cut a code block's raw text into pieces that fit the limit once fenced.
///
/// Every piece gets its own fence with the original language tag. The
/// fence costs `3 + lang + 1 + 1 + 3` units; when that alone reaches the
/// limit nothing can be done and the result is empty. Escaping happens
/// after slicing, so a piece full of backticks can still end up over the
/// limit.
pub fn split_code(node: &Node, _: &Context, _: Traverse, limit: usize) -> Vec<String> {
    let Node::CodeBlock { language, value } = node else {
        return Vec::new();
    };
    let lang = language.as_deref().map(escape_text).unwrap_or_default();
    let overhead = 3 + text_len(&lang) + 1 + 1 + 3;
    let budget = limit.saturating_sub(overhead);
    if budget == 0 {
        return Vec::new();
    }
    slice_units(value, budget)
        .into_iter()
        .map(|piece| code_fence(language.as_deref(), piece))
        .collect()
}

/// Quote each direct child of a block quote separately.
///
/// Children are not broken up further: a child that is itself over the
/// limit comes back as one oversized fragment.
pub fn split_blockquote(node: &Node, ctx: &Context, traverse: Traverse, _: usize) -> Vec<String> {
    let Node::Blockquote(children) = node else {
        return Vec::new();
    };
    children
        .iter()
        .map(|child| quote(&traverse(std::slice::from_ref(child), ctx)))
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
