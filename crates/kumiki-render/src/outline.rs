//! Block shapes.
//!
//! Outlines are closed polygons in grid units. Linear blocks carry a small
//! bevel at the plug corner and a matching tab below the next socket; a
//! lambda is a C-shape with one bay per chain.

use kurbo::BezPath;

use kumiki_graph::{BlockGraph, LAMBDA_BAND_HEIGHT, LAMBDA_INDENT};
use kumiki_types::{BlockId, BlockKind, Position, SocketRef, SocketSlot};

/// The outline of `block` with its top-left corner at `origin`.
pub fn outline(graph: &BlockGraph, block: BlockId, origin: Position) -> BezPath {
    let points = match graph[block].kind() {
        BlockKind::Lambda => lambda_points(graph, block),
        BlockKind::Var => linear_points(graph.width(block), graph.height(block)),
        BlockKind::Bind => notched_points(graph.width(block), graph.height(block)),
        BlockKind::Text => rect_points(graph.width(block), graph.height(block)),
    };
    polygon(&points, origin)
}

fn polygon(points: &[(f64, f64)], origin: Position) -> BezPath {
    let ox = f64::from(origin.x);
    let oy = f64::from(origin.y);
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&(x, y)) = iter.next() {
        path.move_to((ox + x, oy + y));
        for &(x, y) in iter {
            path.line_to((ox + x, oy + y));
        }
        path.close_path();
    }
    path
}

/// Var: bevelled plug corner, tab hanging below the next socket.
fn linear_points(width: i32, height: i32) -> Vec<(f64, f64)> {
    let w = f64::from(width);
    let h = f64::from(height);
    vec![
        (0.0, 0.5),
        (0.5, 0.0),
        (w, 0.0),
        (w, h),
        (0.5, h),
        (0.0, h + 0.5),
    ]
}

/// Bind: bevelled plug corner, flat bottom (nothing attaches below).
fn notched_points(width: i32, height: i32) -> Vec<(f64, f64)> {
    let w = f64::from(width);
    let h = f64::from(height);
    vec![(0.0, 0.5), (0.5, 0.0), (w, 0.0), (w, h), (0.0, h)]
}

fn rect_points(width: i32, height: i32) -> Vec<(f64, f64)> {
    let w = f64::from(width);
    let h = f64::from(height);
    vec![(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)]
}

/// Lambda: header band, args bay, separator band, body bay, footer band.
fn lambda_points(graph: &BlockGraph, block: BlockId) -> Vec<(f64, f64)> {
    let w = f64::from(graph.width(block));
    let band = f64::from(LAMBDA_BAND_HEIGHT);
    let indent = f64::from(LAMBDA_INDENT);
    let args = f64::from(graph.chain_height(SocketRef::new(block, SocketSlot::Args)));
    let body = f64::from(graph.chain_height(SocketRef::new(block, SocketSlot::Body)));

    let mut points = Vec::with_capacity(18);
    let mut h = 0.0;
    points.push((0.0, h));
    points.push((w, h));

    // Args bay.
    h += band;
    points.push((w, h));
    points.push((indent + 0.5, h));
    points.push((indent, h + 0.5));
    h += args;
    points.push((indent, h + 0.5));
    points.push((indent + 0.5, h));
    points.push((w, h));

    // Body bay.
    h += band;
    points.push((w, h));
    points.push((indent + 0.5, h));
    points.push((indent, h + 0.5));
    h += body;
    points.push((indent, h + 0.5));
    points.push((indent + 0.5, h));
    points.push((w, h));

    h += band;
    points.push((w, h));
    points.push((0.0, h));
    points
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Shape};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_var_outline_bounds() {
        let mut graph = BlockGraph::new();
        let built = kumiki_graph::build(&mut graph, &json!(["var", "x", "Num", 1]));
        let path = outline(&graph, built.root, Position::new(3, 4));

        let bounds = path.bounding_box();
        assert_eq!(bounds.x0, 3.0);
        assert_eq!(bounds.y0, 4.0);
        assert_eq!(bounds.x1, 3.0 + 5.0);
        assert_eq!(bounds.y1, 4.0 + 2.5);
        assert!(path.contains(Point::new(5.0, 5.0)));
        assert!(!path.contains(Point::new(9.0, 5.0)));
    }

    #[test]
    fn test_lambda_bays_are_hollow() {
        let mut graph = BlockGraph::new();
        let built = kumiki_graph::build(
            &mut graph,
            &json!(["lambda", "f", [["var", "x", "Num", 1]], "", []]),
        );
        let path = outline(&graph, built.root, Position::ORIGIN);

        // Header band is solid.
        assert!(path.contains(Point::new(3.0, 1.0)));
        // Inside the args bay (where the var sits) is not the lambda.
        assert!(!path.contains(Point::new(3.0, 3.0)));
        // Left spine is.
        assert!(path.contains(Point::new(0.5, 3.0)));
        assert_eq!(path.bounding_box().y1, 6.0 + 2.0);
    }
}
