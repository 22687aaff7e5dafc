//! Rendered scene: per-block outlines in paint order.

use std::fmt::Write as _;

use kurbo::{BezPath, Point, Rect, Shape};

use kumiki_graph::BlockGraph;
use kumiki_types::{BlockId, BlockKind, Position};

use crate::outline::outline;
use crate::{Ghost, HitTest, MAX_RENDER_DEPTH};

/// One painted block.
#[derive(Clone, Debug)]
pub struct Primitive {
    pub block: BlockId,
    pub kind: BlockKind,
    pub label: String,
    pub path: BezPath,
}

/// Render `block` and everything attached to it with `block` at `origin`.
///
/// Attached blocks keep their stored positions relative to `block`, so
/// a subtree mid-drag renders exactly where the pointer left it. Parents
/// are pushed before children.
pub fn render(graph: &BlockGraph, block: BlockId, origin: Position, out: &mut Vec<Primitive>) {
    let Some(root) = graph.get(block) else {
        return;
    };
    let shift = origin - root.position();
    render_inner(graph, block, shift, 0, out);
}

fn render_inner(
    graph: &BlockGraph,
    id: BlockId,
    shift: Position,
    depth: usize,
    out: &mut Vec<Primitive>,
) {
    if depth >= MAX_RENDER_DEPTH {
        tracing::warn!(block = %id, "render() hit MAX_RENDER_DEPTH ({MAX_RENDER_DEPTH}), truncating");
        return;
    }
    let block = &graph[id];
    out.push(Primitive {
        block: id,
        kind: block.kind(),
        label: block.label().to_string(),
        path: outline(graph, id, block.position() + shift),
    });
    for child in graph.drag_blocks(id) {
        render_inner(graph, child, shift, depth + 1, out);
    }
}

/// Every live tree in the graph, rendered at stored positions.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    ghost: Option<BezPath>,
}

impl Scene {
    /// Render all roots, in insertion order, plus the optional ghost.
    pub fn build(graph: &BlockGraph, ghost: Option<Ghost>) -> Self {
        let mut primitives = Vec::with_capacity(graph.block_count());
        for root in graph.roots() {
            render(graph, root, graph[root].position(), &mut primitives);
        }
        let ghost = ghost
            .filter(|g| graph.get(g.block).is_some())
            .map(|g| outline(graph, g.block, g.origin));
        tracing::trace!(blocks = primitives.len(), ghost = ghost.is_some(), "scene built");
        Self { primitives, ghost }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn ghost(&self) -> Option<&BezPath> {
        self.ghost.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Union of all outline bounds, ghost included.
    pub fn bounds(&self) -> Rect {
        self.primitives
            .iter()
            .map(|p| &p.path)
            .chain(self.ghost.iter())
            .map(|path| path.bounding_box())
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }

    /// SVG document with one `<path>` per block, `scale` pixels per cell.
    pub fn to_svg(&self, scale: f64) -> String {
        let bounds = self.bounds().inflate(1.0, 1.0);
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            bounds.width() * scale,
            bounds.height() * scale,
            bounds.x0,
            bounds.y0,
            bounds.width(),
            bounds.height(),
        );
        for p in &self.primitives {
            let _ = writeln!(
                svg,
                r#"  <path class="block {}" data-block="{}" d="{}"><title>{}</title></path>"#,
                p.kind,
                p.block.index(),
                p.path.to_svg(),
                escape(&p.label),
            );
        }
        if let Some(ghost) = &self.ghost {
            let _ = writeln!(svg, r#"  <path class="ghost" d="{}"/>"#, ghost.to_svg());
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl HitTest for Scene {
    /// Topmost block whose outline contains `point`. The ghost never hits.
    fn block_at(&self, point: Point) -> Option<BlockId> {
        self.primitives
            .iter()
            .rev()
            .find(|p| p.path.contains(point))
            .map(|p| p.block)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
