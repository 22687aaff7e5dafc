//! Block arena and the raw joint operations.
//!
//! [`BlockGraph`] owns every block. Plugs and sockets refer to each other by
//! [`BlockId`]/[`SocketRef`], so the only place a link can be made or broken
//! is here, and both halves always change together.
//!
//! The connect/disconnect *protocols* (splicing, re-knitting) live in
//! `protocol.rs`; chain traversal in `chain.rs`; sizes, positions and layout
//! in `geometry.rs`. They are all `impl BlockGraph` blocks.

use std::ops::Index;

use kumiki_types::{BlockId, SocketRef, SocketSlot};

use crate::block::{Block, BlockVariant};
use crate::events::GraphEvent;
use crate::{GraphError, MAX_CHAIN_DEPTH, Result};

/// Distance (grid units) at which a connected block tears away from its socket.
pub const DEFAULT_DISCONNECT_DISTANCE: f64 = 2.0;

/// Arena of blocks plus the pending event queue.
pub struct BlockGraph {
    /// All blocks ever created, indexed by `BlockId`. Never shrinks.
    blocks: Vec<Block>,

    /// Events not yet drained by the presentation layer.
    events: Vec<GraphEvent>,

    /// Bumped on every link change or position change.
    version: u64,

    /// Plug-to-socket distance at which `move_relative` disconnects.
    pub(crate) disconnect_threshold: f64,
}

impl Default for BlockGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            events: Vec::new(),
            version: 0,
            disconnect_threshold: DEFAULT_DISCONNECT_DISTANCE,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
    }

    pub fn disconnect_threshold(&self) -> f64 {
        self.disconnect_threshold
    }

    pub fn set_disconnect_threshold(&mut self, threshold: f64) {
        self.disconnect_threshold = threshold;
    }

    /// Number of live (non-removed) blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.removed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.block_count() == 0
    }

    /// Get a block by id, removed or not.
    ///
    /// # Panics
    ///
    /// If `id` was not handed out by this graph. That is a construction-order
    /// bug, not a runtime condition.
    #[track_caller]
    pub fn block(&self, id: BlockId) -> &Block {
        &self[id]
    }

    /// Get a live block, or `None` if it was removed or never existed.
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index()).filter(|b| !b.removed)
    }

    pub(crate) fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(id.index()).filter(|b| !b.removed)
    }

    /// Checked lookup of a live block.
    pub fn try_block(&self, id: BlockId) -> Result<&Block> {
        match self.blocks.get(id.index()) {
            None => Err(GraphError::BlockNotFound(id)),
            Some(b) if b.removed => Err(GraphError::BlockRemoved(id)),
            Some(b) => Ok(b),
        }
    }

    /// Checked construction of a socket address.
    pub fn socket_ref(&self, block: BlockId, slot: SocketSlot) -> Result<SocketRef> {
        let b = self.try_block(block)?;
        if b.socket(slot).is_none() {
            return Err(GraphError::NoSuchSocket { block, slot });
        }
        Ok(SocketRef::new(block, slot))
    }

    /// Ids of all live blocks, in creation order.
    pub fn block_ids(&self) -> Vec<BlockId> {
        self.blocks
            .iter()
            .filter(|b| !b.removed)
            .map(|b| b.id())
            .collect()
    }

    /// Live blocks whose plug is not attached anywhere.
    pub fn roots(&self) -> Vec<BlockId> {
        self.blocks
            .iter()
            .filter(|b| !b.removed && !b.plug.is_connected())
            .map(|b| b.id())
            .collect()
    }

    // =========================================================================
    // Block lifecycle
    // =========================================================================

    /// Create a block. It starts at the origin, unconnected.
    pub fn insert_block(&mut self, variant: BlockVariant) -> BlockId {
        let id = BlockId::from_index(self.blocks.len());
        self.blocks.push(Block::new(id, variant));
        self.touch();
        id
    }

    /// Remove a block from the document.
    ///
    /// The block is pulled out of whatever chain holds it (the chain is
    /// re-knitted), everything attached to its sockets becomes a root at its
    /// current position, and the block is tombstoned. Its id is never reused.
    pub fn remove_block(&mut self, id: BlockId) -> Result<()> {
        let sockets = self.try_block(id)?.sockets();
        self.disconnect_block(id);
        for socket in sockets {
            self.disconnect_socket(socket);
        }
        let block = &mut self.blocks[id.index()];
        block.removed = true;
        block.size.clear();
        self.events.push(GraphEvent::BlockRemoved { block: id });
        self.touch();
        tracing::debug!(block = %id, "removed block");
        Ok(())
    }

    // =========================================================================
    // Joints
    // =========================================================================

    /// The socket a block's plug is attached to.
    pub fn plug_connected_to(&self, plug: BlockId) -> Option<SocketRef> {
        self.get(plug)?.plug.connected_to()
    }

    /// The block whose plug occupies `socket`.
    pub fn socket_connected_to(&self, socket: SocketRef) -> Option<BlockId> {
        self.get(socket.block)?.socket(socket.slot)?.connected_to()
    }

    /// Link `plug` into `socket`.
    ///
    /// Fails (returns `false`, changes nothing) if either joint is already
    /// occupied, either block is gone, or the block would plug into itself.
    /// Callers decide what to do with an existing link before calling this.
    pub fn connect(&mut self, socket: SocketRef, plug: BlockId) -> bool {
        if socket.block == plug {
            return false;
        }
        let Some(incoming) = self.get(plug) else {
            return false;
        };
        if incoming.plug.is_connected() {
            return false;
        }
        let Some(target) = self.get(socket.block).and_then(|b| b.socket(socket.slot)) else {
            return false;
        };
        if target.is_connected() {
            return false;
        }

        self.blocks[plug.index()].plug.socket = Some(socket);
        if let Some(s) = self.blocks[socket.block.index()].socket_mut(socket.slot) {
            s.plug = Some(plug);
        }
        self.invalidate_upstream(socket.block);
        self.events.push(GraphEvent::SocketConnected { socket, plug });
        self.touch();
        tracing::trace!(%socket, plug = %plug, "linked");
        true
    }

    /// Unlink a block's plug from its socket. Returns the socket it left.
    pub fn disconnect_plug(&mut self, plug: BlockId) -> Option<SocketRef> {
        let socket = self.get(plug)?.plug.connected_to()?;
        self.blocks[plug.index()].plug.socket = None;
        if let Some(s) = self.blocks[socket.block.index()].socket_mut(socket.slot) {
            s.plug = None;
        }
        self.invalidate_upstream(socket.block);
        self.events.push(GraphEvent::SocketDisconnected { socket, plug });
        self.touch();
        tracing::trace!(%socket, plug = %plug, "unlinked");
        Some(socket)
    }

    /// Unlink whatever occupies `socket`. Returns the block that was there.
    pub fn disconnect_socket(&mut self, socket: SocketRef) -> Option<BlockId> {
        let plug = self.socket_connected_to(socket)?;
        self.disconnect_plug(plug);
        Some(plug)
    }

    /// Clear memoized sizes of `block` and of every block upstream of it.
    ///
    /// A socket change anywhere in a chain changes the height of every lambda
    /// that (transitively) contains the chain.
    pub(crate) fn invalidate_upstream(&self, block: BlockId) {
        let mut current = Some(block);
        let mut depth = 0;
        while let Some(id) = current {
            if depth >= MAX_CHAIN_DEPTH {
                tracing::warn!("invalidate_upstream() hit MAX_CHAIN_DEPTH ({MAX_CHAIN_DEPTH}), truncating");
                break;
            }
            depth += 1;
            let Some(b) = self.blocks.get(id.index()) else {
                break;
            };
            b.size.clear();
            current = b.plug.connected_to().map(|s| s.block);
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Pending events, oldest first.
    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Check that every link is mirrored by its other half and that removed
    /// blocks hold no links.
    pub fn verify_links(&self) -> Result<()> {
        for block in &self.blocks {
            if let Some(socket) = block.plug.connected_to() {
                let mirrored = self
                    .blocks
                    .get(socket.block.index())
                    .and_then(|owner| owner.socket(socket.slot))
                    .and_then(|s| s.connected_to());
                if block.removed || mirrored != Some(block.id()) {
                    return Err(GraphError::AsymmetricLink {
                        plug: block.id(),
                        socket,
                    });
                }
            }
            for socket in block.sockets() {
                let Some(plug) = block.socket(socket.slot).and_then(|s| s.connected_to()) else {
                    continue;
                };
                let mirrored = self
                    .blocks
                    .get(plug.index())
                    .and_then(|b| b.plug.connected_to());
                if block.removed || mirrored != Some(socket) {
                    return Err(GraphError::AsymmetricLink { plug, socket });
                }
            }
        }
        Ok(())
    }
}

impl Index<BlockId> for BlockGraph {
    type Output = Block;

    #[track_caller]
    fn index(&self, id: BlockId) -> &Block {
        match self.blocks.get(id.index()) {
            Some(block) => block,
            None => panic!("{id:?} does not belong to this graph ({} blocks)", self.blocks.len()),
        }
    }
}
