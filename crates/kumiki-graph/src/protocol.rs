//! The connect-block and disconnect-block protocols.
//!
//! These are the business rules for making and breaking connections between
//! whole blocks, layered over the raw joint operations in `graph.rs`:
//!
//! - **connect**: plugging a block into an occupied socket splices it in
//!   front of the occupant (like `unshift()`), unless the incoming chain ends
//!   in a terminal block, in which case nothing changes.
//! - **disconnect**: pulling a block out of the middle of a chain re-knits
//!   the chain so its remainder stays attached to the original socket.

use kumiki_types::{BlockId, SocketRef};

use crate::graph::BlockGraph;

/// Result of [`BlockGraph::connect_block`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Linked into an empty socket.
    Connected,
    /// Linked into an occupied socket; the old occupant now hangs off the
    /// end of the incoming chain.
    Spliced { displaced: BlockId },
    /// The incoming plug is already attached elsewhere. Nothing changed.
    PlugOccupied,
    /// The socket is occupied and the incoming chain ends in a terminal
    /// block, so the occupant has nowhere to go. Nothing changed.
    Terminal,
    /// Removed block, missing socket, or a block plugging into itself.
    Rejected,
}

impl ConnectOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectOutcome::Connected | ConnectOutcome::Spliced { .. })
    }
}

/// A block torn off its socket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detachment {
    /// The block that left.
    pub block: BlockId,
    /// The socket it was attached to.
    pub from: SocketRef,
    /// The downstream block moved onto `from` to keep the chain whole.
    pub reknit: Option<BlockId>,
}

/// Result of [`BlockGraph::disconnect_block`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisconnectOutcome {
    NotConnected,
    Detached(Detachment),
}

impl BlockGraph {
    /// Move `existing` to the end of the chain that starts at `incoming`.
    ///
    /// Fails (returns `false`, changes nothing) when that chain ends in a
    /// terminal block.
    pub fn append(&mut self, incoming: BlockId, existing: BlockId) -> bool {
        let Some(tail) = self.chain_tail(incoming) else {
            tracing::debug!(incoming = %incoming, existing = %existing, "append refused: chain ends in a terminal block");
            return false;
        };
        self.disconnect_plug(existing);
        self.connect(tail, existing)
    }

    /// Connect `plug` into `socket`, splicing in front of any occupant.
    pub fn connect_block(&mut self, socket: SocketRef, plug: BlockId) -> ConnectOutcome {
        if socket.block == plug
            || self.get(plug).is_none()
            || self.get(socket.block).and_then(|b| b.socket(socket.slot)).is_none()
        {
            return ConnectOutcome::Rejected;
        }

        // An attached block must be detached explicitly before it can move.
        if self.plug_connected_to(plug).is_some() {
            return ConnectOutcome::PlugOccupied;
        }

        let displaced = self.socket_connected_to(socket);
        if let Some(existing) = displaced {
            if !self.append(plug, existing) {
                return ConnectOutcome::Terminal;
            }
            tracing::debug!(%socket, plug = %plug, existing = %existing, "spliced in front of existing chain");
        }

        // The socket is free here: `append` unplugged the old occupant.
        if !self.connect(socket, plug) {
            tracing::warn!(%socket, plug = %plug, "connect failed after socket was cleared");
            return ConnectOutcome::Rejected;
        }

        match displaced {
            Some(displaced) => ConnectOutcome::Spliced { displaced },
            None => ConnectOutcome::Connected,
        }
    }

    /// Detach `block` from its socket, re-knitting the chain around it.
    pub fn disconnect_block(&mut self, block: BlockId) -> DisconnectOutcome {
        let Some(from) = self.disconnect_plug(block) else {
            return DisconnectOutcome::NotConnected;
        };

        let downstream = self[block]
            .last_socket()
            .and_then(|last| self.socket_connected_to(last));

        let mut reknit = None;
        if let Some(next) = downstream {
            self.disconnect_plug(next);
            if self.connect(from, next) {
                reknit = Some(next);
            }
        }

        tracing::debug!(block = %block, %from, reknit = ?reknit, "detached block");
        DisconnectOutcome::Detached(Detachment {
            block,
            from,
            reknit,
        })
    }
}
