//! A* search: Dijkstra's settling discipline plus a Manhattan heuristic.

use std::collections::VecDeque;

use stepgrid_core::{Cell, CellEvent, Grid, GridError, Point, SearchStep};

use crate::distance::manhattan;
use crate::heap::MinHeap;
use crate::state::{DistanceMap, Phase, Predecessors, VisitState, check_endpoints};
use crate::trace::intermediate_path;

/// Heap entry keyed by `f = g + h`, tie-broken on smaller `h` so that of
/// several equally promising cells the one nearest the goal pops first.
/// Remaining ties fall back to the heap's FIFO order. The position does
/// not participate in ordering.
struct ScoredEntry {
    f: i32,
    h: i32,
    pos: Point,
}

impl PartialEq for ScoredEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.h == other.h
    }
}

impl Eq for ScoredEntry {}

impl PartialOrd for ScoredEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f.cmp(&other.f).then(self.h.cmp(&other.h))
    }
}

/// An A* run.
///
/// Like [`Dijkstra`](crate::Dijkstra) but the heap is keyed by
/// `f = g + manhattan(pos, goal)`. Staleness is detected at pop time by
/// recomputing the expected `f` from the best known `g` for the popped
/// cell: a mismatch means a cheaper path was found after the entry was
/// pushed, and the entry is silently discarded. Closing order is the
/// visit-event order; no cell is ever settled twice.
pub struct Astar<'a> {
    grid: &'a Grid,
    start: Point,
    goal: Point,
    open: MinHeap<ScoredEntry>,
    g: DistanceMap,
    settled: VisitState,
    prev: Predecessors,
    pending: VecDeque<CellEvent>,
    phase: Phase,
    settled_count: usize,
}

impl<'a> Astar<'a> {
    /// Start a run over `grid` from `start` toward `goal`.
    pub fn new(grid: &'a Grid, start: Point, goal: Point) -> Result<Self, GridError> {
        check_endpoints(grid, start, goal)?;
        let mut g = DistanceMap::new(grid.bounds());
        g.set(start, 0);
        let h0 = manhattan(start, goal);
        let mut open = MinHeap::new();
        open.push(ScoredEntry {
            f: h0,
            h: h0,
            pos: start,
        });
        Ok(Self {
            grid,
            start,
            goal,
            open,
            g,
            settled: VisitState::new(grid.bounds()),
            prev: Predecessors::new(grid.bounds()),
            pending: VecDeque::new(),
            phase: Phase::Running,
            settled_count: 0,
        })
    }

    /// One pop: discard if stale, otherwise settle and relax neighbours.
    fn advance(&mut self) {
        let Some(entry) = self.open.pop() else {
            self.phase = Phase::Draining { found: false };
            return;
        };

        // An entry is current only if its f still follows from the best
        // known g; anything else was superseded after being pushed.
        if entry.f != self.g.get(entry.pos) + manhattan(entry.pos, self.goal) {
            return;
        }

        self.settled.mark(entry.pos);
        self.settled_count += 1;
        if entry.pos != self.start && entry.pos != self.goal {
            self.pending.push_back(CellEvent {
                pos: entry.pos,
                cell: Cell::Visited,
            });
        }

        if entry.pos == self.goal {
            for p in intermediate_path(&self.prev, self.goal) {
                self.pending.push_back(CellEvent {
                    pos: p,
                    cell: Cell::Path,
                });
            }
            self.phase = Phase::Draining { found: true };
            return;
        }

        let current_g = self.g.get(entry.pos);
        for n in entry.pos.neighbors_4() {
            if !self.grid.walkable(n) || self.settled.contains(n) {
                continue;
            }
            let ng = current_g + 1;
            if ng < self.g.get(n) {
                self.g.set(n, ng);
                self.prev.set(n, entry.pos);
                let nh = manhattan(n, self.goal);
                self.open.push(ScoredEntry {
                    f: ng + nh,
                    h: nh,
                    pos: n,
                });
            }
        }
    }
}

impl Iterator for Astar<'_> {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        loop {
            if let Some(ev) = self.pending.pop_front() {
                return Some(SearchStep::Change(ev));
            }
            match self.phase {
                Phase::Finished => return None,
                Phase::Draining { found } => {
                    self.phase = Phase::Finished;
                    log::debug!("astar done: found={found}, settled={}", self.settled_count);
                    return Some(SearchStep::Done { found });
                }
                Phase::Running => self.advance(),
            }
        }
    }
}
