//! Pointer-driven drag state machine.
//!
//! ```text
//!            pointer_down (hit)
//!   Idle ─────────────────────────▶ Dragging
//!    ▲                                 │ pointer_move: snap to grid, move
//!    │                                 │ subtree, tear off, snap-scan
//!    └──────── pointer_up / cancel ────┘
//! ```
//!
//! Pointer positions are screen units; the block moves in whole grid cells,
//! `ceil((pointer - start) / grid_cell)` per axis from where it started.

use kurbo::Point;

use kumiki_graph::{BlockGraph, ConnectOutcome, Detachment};
use kumiki_render::{Ghost, HitTest};
use kumiki_types::{BlockId, Position, SocketRef};

/// A drag in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
    pub block: BlockId,
    /// Pointer position at `pointer_down`, screen units.
    pub start: Point,
    /// Block position at `pointer_down`, grid cells.
    pub origin: Position,
    pub ghost: Option<Ghost>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

/// A snap attempt made after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snap {
    pub socket: SocketRef,
    pub outcome: ConnectOutcome,
}

/// Result of [`DragController::pointer_move`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing is being dragged.
    Idle,
    /// The pointer is still inside the current grid cell; nothing ran.
    Unchanged,
    Moved {
        detached: Vec<Detachment>,
        snapped: Option<Snap>,
    },
}

#[derive(Debug)]
pub struct DragController {
    state: DragState,
    grid_cell: f64,
}

impl DragController {
    pub fn new(grid_cell: f64) -> Self {
        Self {
            state: DragState::Idle,
            grid_cell,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragged(&self) -> Option<BlockId> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag.block),
            DragState::Idle => None,
        }
    }

    pub fn ghost(&self) -> Option<Ghost> {
        match &self.state {
            DragState::Dragging(drag) => drag.ghost,
            DragState::Idle => None,
        }
    }

    /// Screen position to grid coordinates.
    pub fn to_grid(&self, pos: Point) -> Point {
        Point::new(pos.x / self.grid_cell, pos.y / self.grid_cell)
    }

    // ========================================================================
    // Pointer events
    // ========================================================================

    /// Start dragging the block under `pos`, if any.
    pub fn pointer_down(
        &mut self,
        graph: &BlockGraph,
        hit: &impl HitTest,
        pos: Point,
    ) -> Option<BlockId> {
        if let Some(block) = self.dragged() {
            tracing::debug!(block = %block, "pointer_down during drag ignored");
            return None;
        }
        let block = hit.block_at(self.to_grid(pos))?;
        let origin = graph.get(block)?.position();
        tracing::debug!(block = %block, %origin, "drag start");
        self.state = DragState::Dragging(Drag {
            block,
            start: pos,
            origin,
            ghost: Some(Ghost { block, origin }),
        });
        Some(block)
    }

    /// Follow the pointer: move, tear off, snap.
    pub fn pointer_move(&mut self, graph: &mut BlockGraph, pos: Point) -> MoveOutcome {
        let grid_cell = self.grid_cell;
        let DragState::Dragging(drag) = &mut self.state else {
            return MoveOutcome::Idle;
        };
        let block = drag.block;
        let Some(current) = graph.get(block).map(|b| b.position()) else {
            tracing::debug!(block = %block, "dragged block is gone, ending drag");
            self.state = DragState::Idle;
            return MoveOutcome::Idle;
        };

        let target = drag.origin + grid_delta(drag.start, pos, grid_cell);
        let delta = target - current;
        if delta.is_origin() {
            return MoveOutcome::Unchanged;
        }

        let detached = graph.move_relative(block, delta);
        for d in &detached {
            drag.ghost = None;
            let root = graph.root_of(d.from.block);
            let at = graph[root].position();
            graph.layout(root, at);
        }

        let snapped = snap_scan(graph, block);
        if let Some(snap) = snapped.filter(|s| s.outcome.is_connected()) {
            drag.ghost = Some(Ghost {
                block,
                origin: graph.socket_position(snap.socket),
            });
        }

        MoveOutcome::Moved { detached, snapped }
    }

    /// Apply the final move, then drop the block. A block still attached
    /// to a socket is pulled exactly onto it.
    pub fn pointer_up(&mut self, graph: &mut BlockGraph, pos: Point) -> Option<BlockId> {
        self.pointer_move(graph, pos);
        self.finish(graph)
    }

    /// Drop the block where it is, as if released without moving.
    pub fn cancel(&mut self, graph: &mut BlockGraph) -> Option<BlockId> {
        self.finish(graph)
    }

    fn finish(&mut self, graph: &mut BlockGraph) -> Option<BlockId> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return None;
        };
        graph.get(drag.block)?;
        if let Some(socket) = graph.plug_connected_to(drag.block) {
            let at = graph.socket_position(socket);
            graph.move_to(drag.block, at);
        }
        graph.relayout();
        tracing::debug!(block = %drag.block, position = %graph[drag.block].position(), "drag end");
        Some(drag.block)
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// Whole grid cells between two screen positions, rounded up.
pub fn grid_delta(start: Point, pos: Point, grid_cell: f64) -> Position {
    Position::new(
        ((pos.x - start.x) / grid_cell).ceil() as i32,
        ((pos.y - start.y) / grid_cell).ceil() as i32,
    )
}

/// Connect `block` to the first socket sitting exactly under its plug.
///
/// Sockets inside `block`'s own subtree are skipped. Returns the successful
/// attempt, or the last refused one if every candidate refused.
fn snap_scan(graph: &mut BlockGraph, block: BlockId) -> Option<Snap> {
    if graph.plug_connected_to(block).is_some() {
        return None;
    }
    let position = graph[block].position();
    let dragged = graph.subtree(block);
    let candidates: Vec<SocketRef> = graph
        .block_ids()
        .into_iter()
        .filter(|id| !dragged.contains(id))
        .flat_map(|id| graph[id].sockets())
        .filter(|socket| graph.socket_position(*socket) == position)
        .collect();

    let mut last = None;
    for socket in candidates {
        let outcome = graph.connect_block(socket, block);
        tracing::debug!(block = %block, %socket, ?outcome, "snap");
        let snap = Snap { socket, outcome };
        if outcome.is_connected() {
            let root = graph.root_of(socket.block);
            let at = graph[root].position();
            graph.layout(root, at);
            return Some(snap);
        }
        last = Some(snap);
    }
    last
}

#[cfg(test)]
mod tests {
    use kumiki_graph::{BlockVariant, SocketSlot};
    use kumiki_render::Scene;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_grid_delta_rounds_up() {
        let start = Point::new(25.0, 35.0);
        assert_eq!(grid_delta(start, start, 10.0), Position::ORIGIN);
        assert_eq!(grid_delta(start, Point::new(26.0, 35.0), 10.0), Position::new(1, 0));
        assert_eq!(grid_delta(start, Point::new(35.0, 35.0), 10.0), Position::new(1, 0));
        assert_eq!(grid_delta(start, Point::new(36.0, 35.0), 10.0), Position::new(2, 0));
        assert_eq!(grid_delta(start, Point::new(24.0, 20.0), 10.0), Position::new(0, -1));
    }

    #[test]
    fn test_pointer_down_on_empty_space_stays_idle() {
        let graph = BlockGraph::new();
        let scene = Scene::build(&graph, None);
        let mut drag = DragController::default();
        assert_eq!(drag.pointer_down(&graph, &scene, Point::new(5.0, 5.0)), None);
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn test_move_while_idle_is_idle() {
        let mut graph = BlockGraph::new();
        let mut drag = DragController::default();
        assert_eq!(drag.pointer_move(&mut graph, Point::new(5.0, 5.0)), MoveOutcome::Idle);
        assert_eq!(drag.cancel(&mut graph), None);
    }

    #[test]
    fn test_free_block_snaps_onto_socket() {
        let mut graph = BlockGraph::new();
        let a = graph.insert_block(BlockVariant::var("a", "Num"));
        let b = graph.insert_block(BlockVariant::var("b", "Num"));
        graph.set_position(a, Position::new(1, 1));
        graph.set_position(b, Position::new(10, 1));
        let scene = Scene::build(&graph, None);

        let mut drag = DragController::default();
        assert_eq!(drag.pointer_down(&graph, &scene, Point::new(115.0, 15.0)), Some(b));

        // a's next socket is at (1, 3): nine cells left, two down.
        let outcome = drag.pointer_move(&mut graph, Point::new(25.0, 35.0));
        let next = SocketRef::new(a, SocketSlot::Next);
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                detached: vec![],
                snapped: Some(Snap { socket: next, outcome: ConnectOutcome::Connected }),
            }
        );
        assert_eq!(drag.ghost(), Some(Ghost { block: b, origin: Position::new(1, 3) }));

        assert_eq!(drag.pointer_up(&mut graph, Point::new(25.0, 35.0)), Some(b));
        assert!(!drag.is_dragging());
        assert_eq!(graph.socket_connected_to(next), Some(b));
        assert_eq!(graph.plug_position(b), Position::new(1, 3));
    }

    #[test]
    fn test_release_pulls_block_onto_socket() {
        let mut graph = BlockGraph::new();
        let a = graph.insert_block(BlockVariant::var("a", "Num"));
        let b = graph.insert_block(BlockVariant::var("b", "Num"));
        graph.connect(SocketRef::new(a, SocketSlot::Next), b);
        graph.layout(a, Position::new(1, 1));
        let scene = Scene::build(&graph, None);

        let mut drag = DragController::default();
        assert_eq!(drag.pointer_down(&graph, &scene, Point::new(25.0, 35.0)), Some(b));
        // One cell right: distance 1, still attached.
        let outcome = drag.pointer_move(&mut graph, Point::new(26.0, 35.0));
        assert_eq!(outcome, MoveOutcome::Moved { detached: vec![], snapped: None });
        assert_eq!(graph.plug_position(b), Position::new(2, 3));

        drag.pointer_up(&mut graph, Point::new(26.0, 35.0));
        assert_eq!(graph.plug_position(b), Position::new(1, 3));
        assert_eq!(graph.plug_connected_to(b), Some(SocketRef::new(a, SocketSlot::Next)));
    }
}
