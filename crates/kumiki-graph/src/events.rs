//! Connection-state change notifications.
//!
//! The graph queues an event for every link it makes or breaks. Presentation
//! layers drain the queue after each pointer handler (e.g. to flash a socket
//! owner when something snaps into it).

use kumiki_types::{BlockId, SocketRef};

/// Events emitted as the joint graph changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphEvent {
    /// A plug was linked into a socket.
    SocketConnected { socket: SocketRef, plug: BlockId },
    /// A plug was unlinked from a socket.
    SocketDisconnected { socket: SocketRef, plug: BlockId },
    /// A block was removed from the document.
    BlockRemoved { block: BlockId },
}

impl GraphEvent {
    /// The block that owns the affected socket, if the event concerns one.
    pub fn socket_owner(&self) -> Option<BlockId> {
        match self {
            GraphEvent::SocketConnected { socket, .. }
            | GraphEvent::SocketDisconnected { socket, .. } => Some(socket.block),
            GraphEvent::BlockRemoved { .. } => None,
        }
    }
}
