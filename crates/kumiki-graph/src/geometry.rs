//! Sizes, socket positions, movement, and layout.
//!
//! Socket offsets are never stored: a lambda's body socket sits below its
//! argument chain, so it moves whenever that chain changes height. Every
//! position query recomputes from the owner's current geometry.

use kumiki_types::{BlockId, BlockKind, Position, SocketRef, SocketSlot};

use crate::block::{LAMBDA_BAND_HEIGHT, LAMBDA_INDENT};
use crate::graph::BlockGraph;
use crate::protocol::{DisconnectOutcome, Detachment};
use crate::MAX_CHAIN_DEPTH;

impl BlockGraph {
    // =========================================================================
    // Sizes
    // =========================================================================

    /// Width of a block in grid cells.
    #[track_caller]
    pub fn width(&self, id: BlockId) -> i32 {
        self[id].width()
    }

    /// Height of a block in grid cells, including attached chains.
    #[track_caller]
    pub fn height(&self, id: BlockId) -> i32 {
        let block = &self[id];
        if let Some(h) = block.size.height.get() {
            return h;
        }
        let mut h = block.fixed_height();
        if block.kind() == BlockKind::Lambda {
            h += self.chain_height(SocketRef::new(id, SocketSlot::Args));
            h += self.chain_height(SocketRef::new(id, SocketSlot::Body));
        }
        block.size.height.set(Some(h));
        h
    }

    /// Sum of the heights of the chain hanging off `socket`.
    pub fn chain_height(&self, socket: SocketRef) -> i32 {
        let memo = self
            .get(socket.block)
            .and_then(|owner| owner.size.chain(socket.slot));
        if let Some(h) = memo.and_then(|cell| cell.get()) {
            return h;
        }
        let mut total = 0;
        self.iterate_chain(socket, |b| total += self.height(b.id()));
        if let Some(cell) = memo {
            cell.set(Some(total));
        }
        total
    }

    // =========================================================================
    // Joint positions
    // =========================================================================

    /// Offset of a socket from its owner's origin.
    pub fn socket_offset(&self, socket: SocketRef) -> Position {
        match socket.slot {
            SocketSlot::Args => Position::new(LAMBDA_INDENT, LAMBDA_BAND_HEIGHT),
            SocketSlot::Body => Position::new(
                LAMBDA_INDENT,
                2 * LAMBDA_BAND_HEIGHT
                    + self.chain_height(SocketRef::new(socket.block, SocketSlot::Args)),
            ),
            SocketSlot::Next => Position::new(0, self.height(socket.block)),
        }
    }

    /// Absolute position of a socket.
    #[track_caller]
    pub fn socket_position(&self, socket: SocketRef) -> Position {
        self[socket.block].position() + self.socket_offset(socket)
    }

    /// Absolute position of a block's plug (its top-left corner).
    #[track_caller]
    pub fn plug_position(&self, plug: BlockId) -> Position {
        self[plug].position()
    }

    /// Whether a plug this far from its socket tears away.
    pub fn should_disconnect(&self, distance: f64) -> bool {
        distance >= self.disconnect_threshold
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Place a single block without moving anything attached to it.
    pub fn set_position(&mut self, id: BlockId, position: Position) {
        let Some(block) = self.get_mut(id) else {
            return;
        };
        if block.position != position {
            block.position = position;
            self.touch();
        }
    }

    /// Move a block and everything attached below it by `delta`.
    ///
    /// After moving, each moved block whose plug ended up at least the
    /// disconnect threshold away from its socket is detached with the
    /// disconnect-block protocol. Returns those detachments.
    pub fn move_relative(&mut self, id: BlockId, delta: Position) -> Vec<Detachment> {
        let mut detached = Vec::new();
        if !delta.is_origin() {
            self.move_relative_inner(id, delta, 0, &mut detached);
        }
        detached
    }

    fn move_relative_inner(
        &mut self,
        id: BlockId,
        delta: Position,
        depth: usize,
        detached: &mut Vec<Detachment>,
    ) {
        if depth >= MAX_CHAIN_DEPTH {
            tracing::warn!(block = %id, "move_relative() hit MAX_CHAIN_DEPTH ({MAX_CHAIN_DEPTH}), truncating");
            return;
        }
        let Some(block) = self.get_mut(id) else {
            return;
        };
        block.position += delta;
        self.touch();

        for child in self.drag_blocks(id) {
            self.move_relative_inner(child, delta, depth + 1, detached);
        }

        let Some(socket) = self.plug_connected_to(id) else {
            return;
        };
        let distance = self.socket_position(socket).distance(self[id].position());
        if self.should_disconnect(distance) {
            tracing::debug!(block = %id, %socket, distance, "pulled too far, disconnecting");
            if let DisconnectOutcome::Detached(d) = self.disconnect_block(id) {
                detached.push(d);
            }
        }
    }

    /// Move a block (and its subtree) so its origin lands on `position`.
    pub fn move_to(&mut self, id: BlockId, position: Position) -> Vec<Detachment> {
        match self.get(id) {
            Some(block) => {
                let delta = position - block.position();
                self.move_relative(id, delta)
            }
            None => Vec::new(),
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Place `root` at `origin` and every attached block exactly on its socket.
    pub fn layout(&mut self, root: BlockId, origin: Position) {
        self.layout_inner(root, origin, 0);
    }

    fn layout_inner(&mut self, id: BlockId, origin: Position, depth: usize) {
        if depth >= MAX_CHAIN_DEPTH {
            tracing::warn!(block = %id, "layout() hit MAX_CHAIN_DEPTH ({MAX_CHAIN_DEPTH}), truncating");
            return;
        }
        self.set_position(id, origin);
        let Some(block) = self.get(id) else {
            return;
        };
        for socket in block.sockets() {
            if let Some(child) = self.socket_connected_to(socket) {
                let at = self.socket_position(socket);
                self.layout_inner(child, at, depth + 1);
            }
        }
    }

    /// Lay out every tree in place, each root staying where it is.
    pub fn relayout(&mut self) {
        for root in self.roots() {
            let origin = self[root].position();
            self.layout(root, origin);
        }
    }
}
