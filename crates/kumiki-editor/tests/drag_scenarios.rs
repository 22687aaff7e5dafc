//! End-to-end drag scenarios against the demo program.
//!
//! The demo program laid out at (1, 1) with a 10-unit grid:
//!
//! ```text
//! some_function  (1, 1)  15x14
//!   args: x (2, 3), s (2, 5)
//!   body: blah (2, 9), boo (2, 11)
//! ```

use std::time::{Duration, Instant};

use kurbo::Point;
use pretty_assertions::assert_eq;

use kumiki_editor::{DragController, Editor, EditorConfig, MoveOutcome, PointerEvent, Snap};
use kumiki_graph::{
    BlockGraph, BlockId, BlockVariant, ConnectOutcome, Detachment, Position, SocketRef,
    SocketSlot,
};
use kumiki_render::Scene;

struct Demo {
    editor: Editor,
    f: BlockId,
    x: BlockId,
    s: BlockId,
    blah: BlockId,
    boo: BlockId,
}

fn demo() -> Demo {
    let editor = Editor::with_program(EditorConfig::default(), &kumiki_graph::sample_program());
    let graph = editor.graph();
    let f = graph.roots()[0];
    let args = graph.chain_blocks(SocketRef::new(f, SocketSlot::Args));
    let body = graph.chain_blocks(SocketRef::new(f, SocketSlot::Body));
    Demo {
        f,
        x: args[0],
        s: args[1],
        blah: body[0],
        boo: body[1],
        editor,
    }
}

fn args(id: BlockId) -> SocketRef {
    SocketRef::new(id, SocketSlot::Args)
}

fn body(id: BlockId) -> SocketRef {
    SocketRef::new(id, SocketSlot::Body)
}

fn next(id: BlockId) -> SocketRef {
    SocketRef::new(id, SocketSlot::Next)
}

#[test]
fn test_demo_layout() {
    let d = demo();
    let graph = d.editor.graph();
    assert_eq!(graph.height(d.f), 14);
    assert_eq!(graph.plug_position(d.x), Position::new(2, 3));
    assert_eq!(graph.plug_position(d.s), Position::new(2, 5));
    assert_eq!(graph.plug_position(d.blah), Position::new(2, 9));
    assert_eq!(graph.plug_position(d.boo), Position::new(2, 11));
}

#[test]
fn test_tear_off_and_snap_back() {
    let mut d = demo();

    assert_eq!(d.editor.pointer_down(Point::new(35.0, 55.0)), Some(d.s));

    // Two cells right: torn off, body chain moves up.
    let outcome = d.editor.pointer_move(Point::new(55.0, 55.0));
    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            detached: vec![Detachment { block: d.s, from: next(d.x), reknit: None }],
            snapped: None,
        }
    );
    let graph = d.editor.graph();
    assert_eq!(graph.plug_connected_to(d.s), None);
    assert_eq!(graph.height(d.f), 12);
    assert_eq!(graph.plug_position(d.blah), Position::new(2, 7));
    assert_eq!(d.editor.drag().ghost(), None);

    // Back over x's next socket: snaps in.
    let outcome = d.editor.pointer_move(Point::new(35.0, 55.0));
    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            detached: vec![],
            snapped: Some(Snap { socket: next(d.x), outcome: ConnectOutcome::Connected }),
        }
    );
    assert!(d.editor.highlights().is_highlighted(d.x));

    assert_eq!(d.editor.pointer_up(Point::new(35.0, 55.0)), Some(d.s));
    let graph = d.editor.graph();
    assert!(!d.editor.drag().is_dragging());
    assert_eq!(graph.chain_blocks(args(d.f)), vec![d.x, d.s]);
    assert_eq!(graph.height(d.f), 14);
    assert_eq!(graph.plug_position(d.blah), Position::new(2, 9));
    graph.verify_links().unwrap();
}

#[test]
fn test_drag_body_head_into_args_splices() {
    let mut d = demo();

    assert_eq!(d.editor.pointer_down(Point::new(35.0, 95.0)), Some(d.blah));
    let outcome = d.editor.pointer_move(Point::new(35.0, 35.0));

    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            detached: vec![Detachment { block: d.blah, from: body(d.f), reknit: Some(d.boo) }],
            snapped: Some(Snap {
                socket: args(d.f),
                outcome: ConnectOutcome::Spliced { displaced: d.x },
            }),
        }
    );
    d.editor.pointer_up(Point::new(35.0, 35.0));

    let graph = d.editor.graph();
    assert_eq!(graph.chain_blocks(args(d.f)), vec![d.blah, d.x, d.s]);
    assert_eq!(graph.chain_blocks(body(d.f)), vec![d.boo]);
    assert_eq!(graph.plug_position(d.x), Position::new(2, 5));
    assert_eq!(graph.plug_position(d.s), Position::new(2, 7));
    assert_eq!(graph.plug_position(d.boo), Position::new(2, 11));
    assert_eq!(graph.height(d.f), 6 + 6 + 2);
    assert_eq!(d.editor.highlights().active(), {
        let mut expected = vec![d.f, d.blah];
        expected.sort();
        expected
    });
    graph.verify_links().unwrap();
}

#[test]
fn test_moves_within_one_cell_do_nothing() {
    let mut d = demo();
    d.editor.pointer_down(Point::new(35.0, 55.0));

    assert!(matches!(
        d.editor.pointer_move(Point::new(36.0, 55.0)),
        MoveOutcome::Moved { .. }
    ));
    let version = d.editor.graph().version();
    let position = d.editor.graph().plug_position(d.s);

    for x in [37.0, 40.0, 44.0, 45.0] {
        assert_eq!(d.editor.pointer_move(Point::new(x, 55.0)), MoveOutcome::Unchanged);
    }
    assert_eq!(d.editor.graph().version(), version);
    assert_eq!(d.editor.graph().plug_position(d.s), position);
    // Still attached: one cell is under the threshold.
    assert_eq!(d.editor.graph().plug_connected_to(d.s), Some(next(d.x)));
}

#[test]
fn test_terminal_block_cannot_splice() {
    let mut graph = BlockGraph::new();
    let f = graph.insert_block(BlockVariant::lambda("f"));
    let a = graph.insert_block(BlockVariant::var("a", "Num"));
    graph.connect(body(f), a);
    graph.layout(f, Position::new(1, 1));
    let ret = graph.insert_block(BlockVariant::text("ret"));
    graph.set_position(ret, Position::new(20, 1));

    let scene = Scene::build(&graph, None);
    let mut drag = DragController::default();
    assert_eq!(drag.pointer_down(&graph, &scene, Point::new(205.0, 15.0)), Some(ret));

    let outcome = drag.pointer_move(&mut graph, Point::new(25.0, 55.0));
    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            detached: vec![],
            snapped: Some(Snap { socket: body(f), outcome: ConnectOutcome::Terminal }),
        }
    );
    drag.pointer_up(&mut graph, Point::new(25.0, 55.0));

    assert_eq!(graph.socket_connected_to(body(f)), Some(a));
    assert_eq!(graph.plug_connected_to(ret), None);
    assert_eq!(graph.plug_position(ret), Position::new(2, 5));
    graph.verify_links().unwrap();
}

#[test]
fn test_cancel_leaves_torn_block_free() {
    let mut d = demo();
    d.editor.pointer_down(Point::new(35.0, 55.0));
    d.editor.pointer_move(Point::new(55.0, 55.0));
    assert_eq!(d.editor.cancel(), Some(d.s));

    let graph = d.editor.graph();
    assert!(!d.editor.drag().is_dragging());
    assert_eq!(graph.plug_connected_to(d.s), None);
    assert_eq!(graph.plug_position(d.s), Position::new(4, 5));
    assert_eq!(graph.roots(), vec![d.f, d.s]);
}

#[test]
fn test_highlights_expire_on_tick() {
    let mut d = demo();
    for event in [
        PointerEvent::Down(35.0, 55.0),
        PointerEvent::Move(55.0, 55.0),
        PointerEvent::Move(35.0, 55.0),
        PointerEvent::Up(35.0, 55.0),
    ] {
        d.editor.dispatch(event);
    }
    assert_eq!(d.editor.highlights().active(), vec![d.x]);

    let reverted = d.editor.tick(Instant::now() + Duration::from_secs(5));
    assert_eq!(reverted, vec![d.x]);
    assert!(d.editor.highlights().active().is_empty());
}

#[test]
fn test_ghost_tracks_original_position() {
    let mut d = demo();
    d.editor.pointer_down(Point::new(35.0, 55.0));
    let ghost = d.editor.drag().ghost().unwrap();
    assert_eq!((ghost.block, ghost.origin), (d.s, Position::new(2, 5)));
    assert!(d.editor.scene().ghost().is_some());

    d.editor.pointer_up(Point::new(35.0, 55.0));
    assert!(d.editor.scene().ghost().is_none());
    assert!(!d.editor.to_svg().contains("ghost"));
}
