//! Typed identifiers for blocks and sockets.
//!
//! `BlockId` is an index into the block arena. Blocks are never recycled, so
//! an id handed out by a graph stays meaningful for that graph's lifetime
//! (it may point at a removed block, never at a different one).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::SocketSlot;

/// Arena index of a block.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u32);

impl BlockId {
    /// Wrap a raw arena index.
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// The arena index.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

/// Address of one socket: its owning block plus which slot on that block.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SocketRef {
    pub block: BlockId,
    pub slot: SocketSlot,
}

impl SocketRef {
    pub const fn new(block: BlockId, slot: SocketSlot) -> Self {
        Self { block, slot }
    }
}

impl fmt::Display for SocketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.block, self.slot)
    }
}

impl fmt::Debug for SocketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SocketRef({}.{})", self.block.0, self.slot)
    }
}
