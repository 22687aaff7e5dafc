//! Transient highlights on freshly connected blocks.
//!
//! A highlight is started with a deadline and reverted when the deadline
//! passes. Each start bumps a generation counter, and a revert only clears
//! the highlight if its ticket still carries the block's current
//! generation. A block re-highlighted before its first revert fires keeps
//! the newer highlight.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use kumiki_types::BlockId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HighlightTicket {
    pub block: BlockId,
    pub generation: u64,
}

#[derive(Debug)]
pub struct Highlights {
    duration: Duration,
    generation: u64,
    active: HashMap<BlockId, u64>,
    pending: Vec<(Instant, HighlightTicket)>,
}

impl Highlights {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            generation: 0,
            active: HashMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Highlight `block` now; it reverts at `now + duration`.
    pub fn start(&mut self, block: BlockId, now: Instant) -> HighlightTicket {
        self.generation += 1;
        let ticket = HighlightTicket {
            block,
            generation: self.generation,
        };
        self.active.insert(block, ticket.generation);
        self.pending.push((now + self.duration, ticket));
        ticket
    }

    /// Clear the highlight `ticket` started. Stale tickets are ignored.
    pub fn revert(&mut self, ticket: HighlightTicket) -> bool {
        if self.active.get(&ticket.block) != Some(&ticket.generation) {
            return false;
        }
        self.active.remove(&ticket.block);
        true
    }

    /// Revert every highlight whose deadline is at or before `now`.
    /// Returns the blocks that stopped being highlighted.
    pub fn expire(&mut self, now: Instant) -> Vec<BlockId> {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(deadline, _)| *deadline <= now);
        self.pending = waiting;
        due.into_iter()
            .filter_map(|(_, ticket)| self.revert(ticket).then_some(ticket.block))
            .collect()
    }

    pub fn is_highlighted(&self, block: BlockId) -> bool {
        self.active.contains_key(&block)
    }

    /// Highlighted blocks, sorted.
    pub fn active(&self) -> Vec<BlockId> {
        let mut blocks: Vec<_> = self.active.keys().copied().collect();
        blocks.sort();
        blocks
    }

    /// Drop every highlight immediately.
    pub fn clear(&mut self) {
        self.active.clear();
        self.pending.clear();
    }
}

impl Default for Highlights {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
