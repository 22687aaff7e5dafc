//! The editor facade: one graph, its rendered scene, the drag controller,
//! and highlight bookkeeping, kept in step after every pointer event.

use std::fmt::Write as _;
use std::time::Instant;

use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use kumiki_graph::{BlockGraph, BuildWarning, GraphEvent};
use kumiki_render::Scene;
use kumiki_types::BlockId;

use crate::config::EditorConfig;
use crate::drag::{DragController, MoveOutcome};
use crate::highlight::Highlights;

/// A pointer event in screen units, as recorded by a host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(f64, f64),
    Move(f64, f64),
    Up(f64, f64),
    Cancel,
}

pub struct Editor {
    config: EditorConfig,
    graph: BlockGraph,
    scene: Scene,
    drag: DragController,
    highlights: Highlights,
    warnings: Vec<BuildWarning>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let mut graph = BlockGraph::new();
        graph.set_disconnect_threshold(config.disconnect_threshold);
        Self {
            drag: DragController::new(config.grid_cell),
            highlights: Highlights::new(config.highlight_duration()),
            scene: Scene::default(),
            graph,
            warnings: Vec::new(),
            config,
        }
    }

    /// An editor showing `literal`.
    pub fn with_program(config: EditorConfig, literal: &Value) -> Self {
        let mut editor = Self::new(config);
        editor.load(literal);
        editor
    }

    /// Build `literal` into the graph and lay it out at the configured origin.
    pub fn load(&mut self, literal: &Value) -> BlockId {
        let built = kumiki_graph::build(&mut self.graph, literal);
        self.graph.layout(built.root, self.config.origin);
        // Links made while building are not user connections.
        self.graph.drain_events();
        if !built.warnings.is_empty() {
            tracing::warn!(count = built.warnings.len(), "program loaded with warnings");
        }
        self.warnings.extend(built.warnings);
        self.refresh();
        built.root
    }

    // ========================================================================
    // Pointer events
    // ========================================================================

    pub fn pointer_down(&mut self, pos: Point) -> Option<BlockId> {
        let hit = self.drag.pointer_down(&self.graph, &self.scene, pos);
        if hit.is_some() {
            self.refresh();
        }
        hit
    }

    pub fn pointer_move(&mut self, pos: Point) -> MoveOutcome {
        let outcome = self.drag.pointer_move(&mut self.graph, pos);
        if matches!(outcome, MoveOutcome::Moved { .. }) {
            self.absorb_events(Instant::now());
            self.refresh();
        }
        outcome
    }

    pub fn pointer_up(&mut self, pos: Point) -> Option<BlockId> {
        let dropped = self.drag.pointer_up(&mut self.graph, pos);
        self.absorb_events(Instant::now());
        self.refresh();
        dropped
    }

    pub fn cancel(&mut self) -> Option<BlockId> {
        let dropped = self.drag.cancel(&mut self.graph);
        self.absorb_events(Instant::now());
        self.refresh();
        dropped
    }

    pub fn dispatch(&mut self, event: PointerEvent) {
        tracing::trace!(?event, "dispatch");
        match event {
            PointerEvent::Down(x, y) => {
                self.pointer_down(Point::new(x, y));
            }
            PointerEvent::Move(x, y) => {
                self.pointer_move(Point::new(x, y));
            }
            PointerEvent::Up(x, y) => {
                self.pointer_up(Point::new(x, y));
            }
            PointerEvent::Cancel => {
                self.cancel();
            }
        }
    }

    /// Revert highlights whose time is up.
    pub fn tick(&mut self, now: Instant) -> Vec<BlockId> {
        self.highlights.expire(now)
    }

    fn absorb_events(&mut self, now: Instant) {
        for event in self.graph.drain_events() {
            if let GraphEvent::SocketConnected { socket, plug } = event {
                tracing::debug!(%socket, plug = %plug, "highlight");
                self.highlights.start(socket.block, now);
            }
        }
    }

    fn refresh(&mut self) {
        self.scene = Scene::build(&self.graph, self.drag.ghost());
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn graph(&self) -> &BlockGraph {
        &self.graph
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    pub fn to_svg(&self) -> String {
        self.scene.to_svg(self.config.grid_cell)
    }

    /// Indented text dump of every tree: kind, label, position, size.
    pub fn outline_text(&self) -> String {
        let mut out = String::new();
        for root in self.graph.roots() {
            self.outline_block(&mut out, root, 0);
        }
        out
    }

    fn outline_block(&self, out: &mut String, id: BlockId, depth: usize) {
        let block = &self.graph[id];
        let mark = if self.highlights.is_highlighted(id) { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:indent$}{} {:?} @ {} {}x{}{}",
            "",
            block.kind(),
            block.label(),
            block.position(),
            self.graph.width(id),
            self.graph.height(id),
            mark,
            indent = depth * 2,
        );
        for socket in block.sockets() {
            let chain = self.graph.chain_blocks(socket);
            if chain.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{:indent$}{}:", "", socket.slot, indent = depth * 2 + 2);
            for child in chain {
                self.outline_block(out, child, depth + 2);
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_load_lays_out_at_origin() {
        let editor = Editor::with_program(EditorConfig::default(), &kumiki_graph::sample_program());
        let root = editor.graph().roots()[0];
        assert_eq!(editor.graph().plug_position(root), editor.config().origin);
        assert_eq!(editor.scene().primitives().len(), 5);
        assert!(editor.highlights().active().is_empty());
    }

    #[test]
    fn test_outline_text() {
        let editor = Editor::with_program(
            EditorConfig::default(),
            &serde_json::json!(["lambda", "f", [["var", "x", "Num", 1]], "", []]),
        );
        assert_eq!(
            editor.outline_text(),
            "lambda \"f\" @ (1, 1) 6x8\n  args:\n    var \"x\" @ (2, 3) 5x2\n"
        );
    }

    #[test]
    fn test_config_threshold_reaches_graph() {
        let config = EditorConfig {
            disconnect_threshold: 5.0,
            ..EditorConfig::default()
        };
        let editor = Editor::new(config);
        assert_eq!(editor.graph().disconnect_threshold(), 5.0);
    }

    #[test]
    fn test_pointer_event_ron() {
        let events: Vec<PointerEvent> =
            ron::from_str("[Down(25.0, 35.0), Move(45.5, 35.0), Up(45.5, 35.0), Cancel]").unwrap();
        assert_eq!(events[0], PointerEvent::Down(25.0, 35.0));
        assert_eq!(events[3], PointerEvent::Cancel);
    }
}
