//! Blocks: the nodes of the connection graph.
//!
//! A block is one of a closed set of variants ([`BlockVariant`]). Every block
//! owns its plug and its sockets; it never owns the blocks attached to those
//! sockets, which live independently in the arena.
//!
//! ## Sizes
//!
//! | Variant | Width                                  | Height                  |
//! |---------|----------------------------------------|-------------------------|
//! | Lambda  | `max(6, label + 2)`                    | `6 + args + body`       |
//! | Var     | `label + 1 + type`                     | `2`                     |
//! | Bind    | `label + 1 + type`                     | `2`                     |
//! | Text    | `text`                                 | `1`                     |
//!
//! Text widths are character counts with a minimum of one cell. Lambda
//! heights depend on their chains and are computed by the graph; the memo
//! cells live here so the graph can invalidate them.

use std::cell::Cell;

use kumiki_types::{BlockId, BlockKind, Position, SocketRef, SocketSlot};

use crate::joint::{Plug, Socket};

/// Lambda header, separator, and footer bands together.
pub const LAMBDA_FRAME_HEIGHT: i32 = 6;
/// Height of each lambda band (header, separator, footer).
pub const LAMBDA_BAND_HEIGHT: i32 = 2;
/// Lambda width when its label is short (or absent).
pub const LAMBDA_MIN_WIDTH: i32 = 6;
/// Horizontal indent of a lambda's chains.
pub const LAMBDA_INDENT: i32 = 1;
/// Height of var and bind blocks.
pub const LINEAR_HEIGHT: i32 = 2;
/// Height of text leaves.
pub const TEXT_HEIGHT: i32 = 1;
/// Gap between a label and its type name.
pub const LABEL_GAP: i32 = 1;

/// Width of a piece of text in grid cells.
pub fn text_width(text: &str) -> i32 {
    (text.chars().count() as i32).max(1)
}

/// Variant payload of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockVariant {
    Lambda {
        label: String,
        comment: String,
    },
    Var {
        label: String,
        type_name: String,
        value: serde_json::Value,
    },
    Bind {
        label: String,
        type_name: String,
    },
    Text {
        text: String,
    },
}

impl BlockVariant {
    pub fn lambda(label: impl Into<String>) -> Self {
        BlockVariant::Lambda {
            label: label.into(),
            comment: String::new(),
        }
    }

    pub fn var(label: impl Into<String>, type_name: impl Into<String>) -> Self {
        BlockVariant::Var {
            label: label.into(),
            type_name: type_name.into(),
            value: serde_json::Value::Null,
        }
    }

    pub fn bind(label: impl Into<String>, type_name: impl Into<String>) -> Self {
        BlockVariant::Bind {
            label: label.into(),
            type_name: type_name.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        BlockVariant::Text { text: text.into() }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockVariant::Lambda { .. } => BlockKind::Lambda,
            BlockVariant::Var { .. } => BlockKind::Var,
            BlockVariant::Bind { .. } => BlockKind::Bind,
            BlockVariant::Text { .. } => BlockKind::Text,
        }
    }

    /// The display label: a lambda or var name, or the text itself.
    pub fn label(&self) -> &str {
        match self {
            BlockVariant::Lambda { label, .. }
            | BlockVariant::Var { label, .. }
            | BlockVariant::Bind { label, .. } => label,
            BlockVariant::Text { text } => text,
        }
    }

    fn intrinsic_width(&self) -> i32 {
        match self {
            BlockVariant::Lambda { label, .. } => {
                if label.is_empty() {
                    LAMBDA_MIN_WIDTH
                } else {
                    (text_width(label) + 2).max(LAMBDA_MIN_WIDTH)
                }
            }
            BlockVariant::Var {
                label, type_name, ..
            }
            | BlockVariant::Bind { label, type_name } => {
                text_width(label) + LABEL_GAP + text_width(type_name)
            }
            BlockVariant::Text { text } => text_width(text),
        }
    }
}

/// Memoized geometry, cleared whenever the block's subtree changes shape.
#[derive(Debug, Default)]
pub(crate) struct SizeCache {
    pub(crate) width: Cell<Option<i32>>,
    pub(crate) height: Cell<Option<i32>>,
    pub(crate) args_height: Cell<Option<i32>>,
    pub(crate) body_height: Cell<Option<i32>>,
}

impl SizeCache {
    pub(crate) fn clear(&self) {
        self.width.set(None);
        self.height.set(None);
        self.args_height.set(None);
        self.body_height.set(None);
    }

    /// Memo cell for the height of the chain hanging off `slot`. Only lambda
    /// chains are memoized.
    pub(crate) fn chain(&self, slot: SocketSlot) -> Option<&Cell<Option<i32>>> {
        match slot {
            SocketSlot::Args => Some(&self.args_height),
            SocketSlot::Body => Some(&self.body_height),
            SocketSlot::Next => None,
        }
    }
}

/// One node of the connection graph.
#[derive(Debug)]
pub struct Block {
    id: BlockId,
    variant: BlockVariant,
    pub(crate) position: Position,
    pub(crate) plug: Plug,
    pub(crate) sockets: Vec<Socket>,
    pub(crate) removed: bool,
    pub(crate) size: SizeCache,
}

impl Block {
    pub(crate) fn new(id: BlockId, variant: BlockVariant) -> Self {
        let sockets = variant
            .kind()
            .socket_slots()
            .iter()
            .map(|slot| Socket::new(*slot))
            .collect();
        Self {
            id,
            variant,
            position: Position::ORIGIN,
            plug: Plug::default(),
            sockets,
            removed: false,
            size: SizeCache::default(),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> &BlockVariant {
        &self.variant
    }

    pub fn label(&self) -> &str {
        self.variant.label()
    }

    /// Absolute position of the block's top-left corner (and its plug).
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn plug(&self) -> &Plug {
        &self.plug
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Own attachment points, in snap-scan order.
    pub fn sockets(&self) -> Vec<SocketRef> {
        self.sockets
            .iter()
            .map(|s| SocketRef::new(self.id, s.slot()))
            .collect()
    }

    pub fn socket(&self, slot: SocketSlot) -> Option<&Socket> {
        self.sockets.iter().find(|s| s.slot() == slot)
    }

    pub(crate) fn socket_mut(&mut self, slot: SocketSlot) -> Option<&mut Socket> {
        self.sockets.iter_mut().find(|s| s.slot() == slot)
    }

    /// The socket a chain continues from, or `None` for terminal blocks.
    ///
    /// A lambda is not appendable: program flow does not fall through the
    /// end of a function.
    pub fn last_socket(&self) -> Option<SocketRef> {
        match self.variant {
            BlockVariant::Var { .. } => Some(SocketRef::new(self.id, SocketSlot::Next)),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.last_socket().is_none()
    }

    /// Width in grid cells. Label-derived, memoized.
    pub fn width(&self) -> i32 {
        if let Some(w) = self.size.width.get() {
            return w;
        }
        let w = self.variant.intrinsic_width();
        self.size.width.set(Some(w));
        w
    }

    /// Height that does not depend on attached blocks.
    pub(crate) fn fixed_height(&self) -> i32 {
        match self.variant {
            BlockVariant::Lambda { .. } => LAMBDA_FRAME_HEIGHT,
            BlockVariant::Var { .. } | BlockVariant::Bind { .. } => LINEAR_HEIGHT,
            BlockVariant::Text { .. } => TEXT_HEIGHT,
        }
    }
}
