//! Chain traversal and subtree queries.
//!
//! Blocks with a plug at the top and a socket at the bottom form chains:
//! singly-linked lists that start at a named socket (a lambda's `args` or
//! `body`) and follow `socket → plug owner → last socket → …`. Chains are
//! acyclic by construction; every walk here still carries a depth circuit
//! breaker.

use std::collections::HashSet;

use kumiki_types::{BlockId, SocketRef};

use crate::block::Block;
use crate::graph::BlockGraph;
use crate::MAX_CHAIN_DEPTH;

impl BlockGraph {
    /// Visit every block of the chain hanging off `socket`, in order.
    ///
    /// Stops at the first terminal block (no last socket) or the first empty
    /// socket.
    pub fn iterate_chain(&self, socket: SocketRef, mut visit: impl FnMut(&Block)) {
        let mut next = self.socket_connected_to(socket);
        let mut depth = 0;
        while let Some(id) = next {
            if depth >= MAX_CHAIN_DEPTH {
                tracing::warn!(%socket, "iterate_chain() hit MAX_CHAIN_DEPTH ({MAX_CHAIN_DEPTH}), truncating");
                break;
            }
            depth += 1;
            let block = &self[id];
            visit(block);
            next = block
                .last_socket()
                .and_then(|last| self.socket_connected_to(last));
        }
    }

    /// Ids of the chain hanging off `socket`, in order.
    pub fn chain_blocks(&self, socket: SocketRef) -> Vec<BlockId> {
        let mut ids = Vec::new();
        self.iterate_chain(socket, |b| ids.push(b.id()));
        ids
    }

    /// The empty socket at the end of the chain that starts at `block`.
    ///
    /// `None` if the chain ends in a terminal block (including `block`
    /// itself being terminal): nothing can be appended after it.
    pub fn chain_tail(&self, block: BlockId) -> Option<SocketRef> {
        let mut tail = self.get(block)?.last_socket()?;
        for _ in 0..MAX_CHAIN_DEPTH {
            match self.socket_connected_to(tail) {
                None => return Some(tail),
                Some(next) => tail = self[next].last_socket()?,
            }
        }
        tracing::warn!(block = %block, "chain_tail() hit MAX_CHAIN_DEPTH ({MAX_CHAIN_DEPTH})");
        None
    }

    /// Blocks attached directly to `block`'s sockets, in socket order.
    ///
    /// Moving a block moves these along (and, recursively, theirs).
    pub fn drag_blocks(&self, block: BlockId) -> Vec<BlockId> {
        let Some(b) = self.get(block) else {
            return Vec::new();
        };
        b.sockets()
            .into_iter()
            .filter_map(|socket| self.socket_connected_to(socket))
            .collect()
    }

    /// Every block transitively attached below `block`, pre-order.
    pub fn child_blocks(&self, block: BlockId) -> Vec<BlockId> {
        let mut out = Vec::new();
        let mut stack: Vec<BlockId> = self.drag_blocks(block).into_iter().rev().collect();
        let limit = self.block_count();
        while let Some(id) = stack.pop() {
            if out.len() >= limit {
                tracing::warn!(block = %block, "child_blocks() visited every block, cycle suspected");
                break;
            }
            out.push(id);
            stack.extend(self.drag_blocks(id).into_iter().rev());
        }
        out
    }

    /// `block` plus everything below it.
    pub fn subtree(&self, block: BlockId) -> HashSet<BlockId> {
        let mut set: HashSet<BlockId> = self.child_blocks(block).into_iter().collect();
        set.insert(block);
        set
    }

    /// Walk plug links upward to the block at the top of `block`'s tree.
    pub fn root_of(&self, block: BlockId) -> BlockId {
        let mut current = block;
        for _ in 0..MAX_CHAIN_DEPTH {
            match self.plug_connected_to(current) {
                Some(socket) => current = socket.block,
                None => return current,
            }
        }
        tracing::warn!(block = %block, "root_of() hit MAX_CHAIN_DEPTH ({MAX_CHAIN_DEPTH})");
        current
    }
}

#[cfg(test)]
mod tests {
    use kumiki_types::SocketSlot;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::block::BlockVariant;

    fn next(id: BlockId) -> SocketRef {
        SocketRef::new(id, SocketSlot::Next)
    }

    /// Lambda with a var chain of `n` blocks in its args socket.
    fn lambda_with_args(n: usize) -> (BlockGraph, BlockId, Vec<BlockId>) {
        let mut graph = BlockGraph::new();
        let lambda = graph.insert_block(BlockVariant::lambda("f"));
        let mut socket = SocketRef::new(lambda, SocketSlot::Args);
        let mut vars = Vec::new();
        for i in 0..n {
            let v = graph.insert_block(BlockVariant::var(format!("v{i}"), "Num"));
            assert!(graph.connect(socket, v));
            socket = next(v);
            vars.push(v);
        }
        (graph, lambda, vars)
    }

    #[test]
    fn test_iterate_empty_chain() {
        let (graph, lambda, _) = lambda_with_args(0);
        let mut visits = 0;
        graph.iterate_chain(SocketRef::new(lambda, SocketSlot::Args), |_| visits += 1);
        assert_eq!(visits, 0);
    }

    #[test]
    fn test_iterate_single_block_chain() {
        let (graph, lambda, vars) = lambda_with_args(1);
        assert_eq!(graph.chain_blocks(SocketRef::new(lambda, SocketSlot::Args)), vars);
    }

    #[test]
    fn test_iterate_long_chain_visits_each_once() {
        let (graph, lambda, vars) = lambda_with_args(25);
        let visited = graph.chain_blocks(SocketRef::new(lambda, SocketSlot::Args));
        assert_eq!(visited, vars);
        let unique: HashSet<_> = visited.iter().collect();
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn test_iterate_stops_at_terminal_block() {
        let (mut graph, lambda, vars) = lambda_with_args(2);
        let text = graph.insert_block(BlockVariant::text("return"));
        graph.connect(next(vars[1]), text);

        let chain = graph.chain_blocks(SocketRef::new(lambda, SocketSlot::Args));
        assert_eq!(chain, vec![vars[0], vars[1], text]);
        assert_eq!(graph.chain_tail(vars[0]), None);
    }

    #[test]
    fn test_chain_tail_finds_empty_socket() {
        let (graph, _, vars) = lambda_with_args(3);
        assert_eq!(graph.chain_tail(vars[0]), Some(next(vars[2])));
        assert_eq!(graph.chain_tail(vars[2]), Some(next(vars[2])));
    }

    #[test]
    fn test_drag_and_child_blocks() {
        let (mut graph, lambda, vars) = lambda_with_args(2);
        let body = graph.insert_block(BlockVariant::var("b", "Num"));
        graph.connect(SocketRef::new(lambda, SocketSlot::Body), body);

        assert_eq!(graph.drag_blocks(lambda), vec![vars[0], body]);
        assert_eq!(graph.drag_blocks(vars[0]), vec![vars[1]]);
        assert_eq!(graph.child_blocks(lambda), vec![vars[0], vars[1], body]);
        assert!(graph.child_blocks(body).is_empty());
        assert!(graph.subtree(vars[0]).contains(&vars[1]));
        assert!(!graph.subtree(vars[0]).contains(&lambda));
    }

    #[test]
    fn test_root_of() {
        let (graph, lambda, vars) = lambda_with_args(3);
        assert_eq!(graph.root_of(vars[2]), lambda);
        assert_eq!(graph.root_of(lambda), lambda);
    }
}
