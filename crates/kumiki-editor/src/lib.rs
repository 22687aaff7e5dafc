//! Interactive editing on top of the Kumiki block graph.
//!
//! [`Editor`] owns a [`BlockGraph`](kumiki_graph::BlockGraph), the
//! [`Scene`](kumiki_render::Scene) rendered from it, a [`DragController`],
//! and [`Highlights`]. Hosts feed it pointer events in screen units and
//! read the scene back after each one.
//!
//! Each handler runs to completion before the next event: there are no
//! locks and no background work. Highlight reverts are driven by the host
//! calling [`Editor::tick`].

mod config;
mod drag;
mod editor;
mod highlight;

pub use config::{ConfigError, EditorConfig};
pub use drag::{Drag, DragController, DragState, MoveOutcome, Snap, grid_delta};
pub use editor::{Editor, PointerEvent};
pub use highlight::{HighlightTicket, Highlights};
