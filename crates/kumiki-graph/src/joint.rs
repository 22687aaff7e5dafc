//! The two halves of a connection point.
//!
//! A [`Plug`] sits at a block's top-left corner; there is exactly one per
//! block. A [`Socket`] is a place where another block's plug can attach.
//! Links are relations between arena entries, never ownership: a plug stores
//! the [`SocketRef`] it is attached to and the socket stores the plug owner's
//! [`BlockId`]. [`crate::BlockGraph`] keeps both halves in step.

use kumiki_types::{BlockId, SocketRef, SocketSlot};

/// Outbound joint of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plug {
    pub(crate) socket: Option<SocketRef>,
}

impl Plug {
    /// The socket this plug is attached to, if any.
    pub fn connected_to(&self) -> Option<SocketRef> {
        self.socket
    }

    pub fn is_connected(&self) -> bool {
        self.socket.is_some()
    }
}

/// Inbound joint of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Socket {
    slot: SocketSlot,
    pub(crate) plug: Option<BlockId>,
}

impl Socket {
    pub(crate) fn new(slot: SocketSlot) -> Self {
        Self { slot, plug: None }
    }

    pub fn slot(&self) -> SocketSlot {
        self.slot
    }

    /// The block whose plug occupies this socket, if any.
    pub fn connected_to(&self) -> Option<BlockId> {
        self.plug
    }

    pub fn is_connected(&self) -> bool {
        self.plug.is_some()
    }
}
