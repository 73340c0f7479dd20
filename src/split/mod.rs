//! Packing rendered blocks into length-bounded chunks.
//!
//! Top-level blocks are rendered one at a time and packed greedily, with a
//! blank line between blocks that share a chunk. A block that doesn't fit
//! even in an empty chunk is handed to the [`Strategies`] registry for its
//! kind and the fragments are packed the same way. Content is never
//! dropped: a block or fragment that can't be brought under the limit is
//! emitted as a chunk of its own, over the limit.

pub mod strategies;

pub use strategies::{Strategies, Strategy, split_blockquote, split_code};

use crate::ast::Node;
use crate::render::{Context, traverse};
use crate::text::text_len;
use log::{debug, trace, warn};

/// Message size cap of the canonical transport, in UTF-16 code units.
pub const DEFAULT_LIMIT: usize = 4096;

const BLOCK_SEPARATOR: &str = "\n\n";

/// Splits rendered documents into chunks of at most `limit` units.
#[derive(Clone, Debug)]
pub struct Splitter {
    limit: usize,
    strategies: Strategies,
}

impl Default for Splitter {
    fn default() -> Self {
        Splitter::new(DEFAULT_LIMIT)
    }
}

impl Splitter {
    /// A splitter with the built-in strategies.
    pub fn new(limit: usize) -> Self {
        Splitter::with_strategies(limit, Strategies::builtin())
    }

    pub fn with_strategies(limit: usize, strategies: Strategies) -> Self {
        Splitter { limit, strategies }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn strategies(&self) -> &Strategies {
        &self.strategies
    }

    /// Split the top-level `nodes` of a document into ordered chunks.
    pub fn split(&self, nodes: &[Node], ctx: &Context) -> Vec<String> {
        let mut packer = Packer::new(self.limit);

        for node in nodes {
            let block = traverse(std::slice::from_ref(node), ctx);
            if block.is_empty() {
                continue;
            }
            let len = text_len(&block);
            trace!("{:?} block of {} units", node.kind(), len);

            if packer.fits(&block) || len <= self.limit {
                packer.pack(block);
                continue;
            }

            packer.flush();
            let parts = match self.strategies.get(node.kind()) {
                Some(strategy) => strategy(node, ctx, traverse, self.limit),
                None => Vec::new(),
            };
            if parts.is_empty() {
                packer.push_oversized(block);
            } else {
                debug!(
                    "split {:?} block of {} units into {} fragments",
                    node.kind(),
                    len,
                    parts.len()
                );
                for part in parts.into_iter().filter(|p| !p.is_empty()) {
                    packer.pack(part);
                }
            }
        }

        packer.finish()
    }
}

/// Accumulates blocks into the current chunk and emits finished chunks.
struct Packer {
    limit: usize,
    current: String,
    chunks: Vec<String>,
}

impl Packer {
    fn new(limit: usize) -> Self {
        Packer {
            limit,
            current: String::new(),
            chunks: Vec::new(),
        }
    }

    fn separator(&self) -> &'static str {
        if self.current.is_empty() {
            ""
        } else {
            BLOCK_SEPARATOR
        }
    }

    fn fits(&self, block: &str) -> bool {
        text_len(&self.current) + text_len(self.separator()) + text_len(block) <= self.limit
    }

    /// Add `block` to the current chunk, or start a new chunk with it. A
    /// block over the limit becomes a chunk of its own.
    fn pack(&mut self, block: String) {
        if self.fits(&block) {
            let sep = self.separator();
            self.current.push_str(sep);
            self.current.push_str(&block);
            return;
        }
        self.flush();
        if text_len(&block) > self.limit {
            self.push_oversized(block);
        } else {
            self.current = block;
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.chunks.push(std::mem::take(&mut self.current));
        }
    }

    fn push_oversized(&mut self, block: String) {
        warn!(
            "emitting chunk of {} units over the limit of {}",
            text_len(&block),
            self.limit
        );
        self.chunks.push(block);
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.chunks
    }
}
