//! Build block trees from nested literal descriptions.
//!
//! The literal format is a tagged list, first element the tag:
//!
//! ```text
//! ["lambda", name, argsList?, comment?, bodyList]
//! ["var", name, typeName, literalValue]
//! ["bind", name, typeName]
//! [anything else, ...]            → text leaf showing the tag
//! "scalar"                         → text leaf showing the scalar
//! ```
//!
//! Chain lists are wired with the connect-block protocol, each element into
//! the last socket of the one before, so input order is chain order. A
//! terminal block in the middle of a chain leaves nowhere to attach the
//! rest: those elements are dropped and reported as [`BuildWarning`]s.

use serde_json::{Value, json};
use thiserror::Error;

use kumiki_types::{BlockId, BlockKind, SocketRef, SocketSlot};

use crate::block::BlockVariant;
use crate::graph::BlockGraph;

/// A problem with the literal that did not stop the build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// A terminal block appeared mid-chain; the trailing elements were lost.
    #[error("chain at {socket} truncated: {dropped} trailing element(s) dropped after a terminal block")]
    ChainTruncated { socket: SocketRef, dropped: usize },

    /// A chain position held something other than a list.
    #[error("chain at {socket} is not a list; treated as empty")]
    MalformedChain { socket: SocketRef },
}

/// Output of [`build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Built {
    pub root: BlockId,
    pub warnings: Vec<BuildWarning>,
}

/// Build the block tree described by `literal` into `graph`.
///
/// Blocks are created at the origin; lay the root out afterwards.
pub fn build(graph: &mut BlockGraph, literal: &Value) -> Built {
    let mut builder = Builder {
        graph,
        warnings: Vec::new(),
    };
    let root = builder.block(literal);
    Built {
        root,
        warnings: builder.warnings,
    }
}

/// The demo program the editor opens with.
pub fn sample_program() -> Value {
    json!([
        "lambda",
        "some_function",
        [
            ["var", "x", "Num", 10],
            ["var", "s", "String", "test"]
        ],
        "This is a function",
        [
            ["var", "blah", "Num", 10],
            ["var", "boo", "String", "test"]
        ]
    ])
}

struct Builder<'a> {
    graph: &'a mut BlockGraph,
    warnings: Vec<BuildWarning>,
}

impl Builder<'_> {
    fn block(&mut self, literal: &Value) -> BlockId {
        let Some(items) = literal.as_array() else {
            return self.graph.insert_block(BlockVariant::text(scalar_text(literal)));
        };
        let tag = items.first().map(scalar_text).unwrap_or_default();

        match BlockKind::from_tag(&tag) {
            BlockKind::Lambda => self.lambda(items),
            BlockKind::Var => self.graph.insert_block(BlockVariant::Var {
                label: text_at(items, 1),
                type_name: text_at(items, 2),
                value: items.get(3).cloned().unwrap_or(Value::Null),
            }),
            BlockKind::Bind => self
                .graph
                .insert_block(BlockVariant::bind(text_at(items, 1), text_at(items, 2))),
            BlockKind::Text => self.graph.insert_block(BlockVariant::text(tag)),
        }
    }

    fn lambda(&mut self, items: &[Value]) -> BlockId {
        let id = self.graph.insert_block(BlockVariant::Lambda {
            label: text_at(items, 1),
            comment: text_at(items, 3),
        });
        self.chain(items.get(2), SocketRef::new(id, SocketSlot::Args));
        self.chain(items.get(4), SocketRef::new(id, SocketSlot::Body));
        id
    }

    fn chain(&mut self, list: Option<&Value>, head: SocketRef) {
        let items = match list {
            None | Some(Value::Null) => return,
            Some(Value::Array(items)) => items,
            Some(_) => {
                tracing::warn!(socket = %head, "chain is not a list, ignoring");
                self.warnings.push(BuildWarning::MalformedChain { socket: head });
                return;
            }
        };

        let mut socket = Some(head);
        for (i, item) in items.iter().enumerate() {
            let Some(target) = socket else {
                let dropped = items.len() - i;
                tracing::warn!(socket = %head, dropped, "terminal block mid-chain, dropping the rest");
                self.warnings.push(BuildWarning::ChainTruncated {
                    socket: head,
                    dropped,
                });
                return;
            };
            let id = self.block(item);
            let outcome = self.graph.connect_block(target, id);
            if !outcome.is_connected() {
                tracing::warn!(socket = %target, block = %id, ?outcome, "could not attach chain element");
            }
            socket = self.graph[id].last_socket();
        }
    }
}

/// Text shown for a scalar literal: strings verbatim, null empty, the rest as JSON.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn text_at(items: &[Value], index: usize) -> String {
    items.get(index).map(scalar_text).unwrap_or_default()
}
