//! Plug/socket connection graph for Kumiki.
//!
//! A program is shown as a tree of blocks joined by joints: each block has
//! one plug at its top-left corner and zero or more sockets where other
//! blocks plug in. This crate keeps that joint graph consistent while it is
//! mutated one drag event at a time.
//!
//! # Design
//!
//! - **Arena**: [`BlockGraph`] owns every [`Block`]. Joints refer to each
//!   other by [`BlockId`]/[`SocketRef`]; nothing owns the blocks attached to
//!   it.
//! - **Closed variants**: [`BlockVariant`] is a sum type (lambda, var, bind,
//!   text) with shared capabilities (`sockets`, `last_socket`, sizes).
//! - **Protocols**: [`BlockGraph::connect_block`] splices into occupied
//!   sockets; [`BlockGraph::disconnect_block`] re-knits chains.
//! - **Events**: every link change queues a [`GraphEvent`].
//!
//! # Invariants
//!
//! - A plug points at a socket iff that socket points back at the plug.
//! - Chains are acyclic. Callers must not plug a block into its own
//!   subtree; walks still stop at [`MAX_CHAIN_DEPTH`].
//! - Sizes are memoized and cleared upstream on every link change.

mod block;
pub mod builder;
mod chain;
mod error;
mod events;
mod geometry;
mod graph;
mod joint;
mod protocol;

pub use block::{
    Block, BlockVariant, LABEL_GAP, LAMBDA_BAND_HEIGHT, LAMBDA_FRAME_HEIGHT, LAMBDA_INDENT,
    LAMBDA_MIN_WIDTH, LINEAR_HEIGHT, TEXT_HEIGHT, text_width,
};
pub use builder::{BuildWarning, Built, build, sample_program};
pub use error::GraphError;
pub use events::GraphEvent;
pub use graph::{BlockGraph, DEFAULT_DISCONNECT_DISTANCE};
pub use joint::{Plug, Socket};
pub use protocol::{ConnectOutcome, Detachment, DisconnectOutcome};

pub use kumiki_types::{BlockId, BlockKind, Position, SocketRef, SocketSlot};

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Maximum expected chain length / nesting depth. Traversal code uses this
/// as a circuit breaker; exceeding it means a cycle slipped in.
pub const MAX_CHAIN_DEPTH: usize = 4096;
