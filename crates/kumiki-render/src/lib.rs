//! Block outlines, hit-testing, and SVG output.
//!
//! Rendering is a pure function of the graph: [`Scene::build`] walks every
//! root and emits one [`Primitive`] per block, parents first, so later
//! primitives paint over earlier ones. Coordinates stay in grid cells;
//! [`Scene::to_svg`] applies the pixel scale.
//!
//! | Item | Role |
//! |------|------|
//! | [`outline`] | Closed polygon for one block at a given origin |
//! | [`render`] | Hook: one subtree, translated to an origin |
//! | [`Scene`] | All trees plus the drag ghost |
//! | [`HitTest`] | Pointer → block lookup used by the drag controller |

mod outline;
mod scene;

pub use outline::outline;
pub use scene::{Primitive, Scene, render};

use kurbo::Point;

use kumiki_types::{BlockId, Position};

/// Nesting depth at which rendering gives up.
pub const MAX_RENDER_DEPTH: usize = kumiki_graph::MAX_CHAIN_DEPTH;

/// Dashed preview of where a dragged block will land on release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ghost {
    pub block: BlockId,
    pub origin: Position,
}

/// Find the block under a point, in grid coordinates.
pub trait HitTest {
    fn block_at(&self, point: Point) -> Option<BlockId>;
}
