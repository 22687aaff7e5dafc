//! Shared geometry and identity types for Kumiki.
//!
//! This crate has **no internal kumiki dependencies**: it is the leaf crate
//! the graph, renderer, and editor build on.
//!
//! # Relationship Overview
//!
//! ```text
//! Block (BlockId) ← one node in the arena, never recycled
//!     └── owns exactly one Plug (top-left corner, offset 0,0)
//!     └── owns zero or more Sockets (SocketSlot: args / body / next)
//!
//! Socket (SocketRef = BlockId + SocketSlot)
//!     └── holds at most one Plug (by the plug owner's BlockId)
//!     └── chains: block → last socket → block → …
//! ```
//!
//! # Key Types
//!
//! |-----------------|------------------------------------------------|
//! | Type            | Purpose                                        |
//! |-----------------|------------------------------------------------|
//! | [`Position`]    | Integer grid coordinate                        |
//! | [`BlockId`]     | Arena index of a block                         |
//! | [`BlockKind`]   | Variant tag (lambda, var, bind, text)          |
//! | [`SocketSlot`]  | Which socket on its owner (args, body, next)   |
//! | [`SocketRef`]   | Address of one socket in the graph             |
//! |-----------------|------------------------------------------------|

pub mod block;
pub mod geometry;
pub mod ids;

pub use block::{BlockKind, SocketSlot};
pub use geometry::{Position, point_distance};
pub use ids::{BlockId, SocketRef};
