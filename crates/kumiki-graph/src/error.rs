//! Error types for graph operations.
//!
//! Most user-facing failures in the connection model are structural no-ops
//! (see `ConnectOutcome`), not errors. These errors cover checked lookups and
//! invariant verification.

use thiserror::Error;

use kumiki_types::{BlockId, SocketRef, SocketSlot};

/// Errors that can occur during graph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Block id does not belong to this graph.
    #[error("block not found: {0:?}")]
    BlockNotFound(BlockId),

    /// Block has been removed from the document.
    #[error("block removed: {0:?}")]
    BlockRemoved(BlockId),

    /// Block exists but has no socket in that slot.
    #[error("block {block:?} has no {slot} socket")]
    NoSuchSocket { block: BlockId, slot: SocketSlot },

    /// A plug and socket disagree about their link.
    #[error("asymmetric link between plug of {plug:?} and socket {socket:?}")]
    AsymmetricLink { plug: BlockId, socket: SocketRef },
}
