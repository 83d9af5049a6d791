//! Breadth-first search: FIFO discovery over uniform-cost cells.

use std::collections::VecDeque;

use stepgrid_core::{Cell, CellEvent, Grid, GridError, Point, SearchStep};

use crate::state::{Phase, Predecessors, VisitState, check_endpoints};
use crate::trace::intermediate_path;

/// A breadth-first search run.
///
/// The queue is seeded with the start cell. Each dequeue expands the four
/// neighbours in canonical order; every newly discovered traversable
/// neighbour is marked, its predecessor recorded, and enqueued, and that
/// discovery is the externally visible visit. Because every edge costs
/// one, first-discovery order is shortest-path order and no relaxation is
/// needed. The run succeeds the moment the target is dequeued and fails
/// when the queue empties first.
pub struct Bfs<'a> {
    grid: &'a Grid,
    goal: Point,
    queue: VecDeque<Point>,
    visited: VisitState,
    prev: Predecessors,
    pending: VecDeque<CellEvent>,
    phase: Phase,
    discovered: usize,
}

impl<'a> Bfs<'a> {
    /// Start a run over `grid` from `start` toward `goal`.
    pub fn new(grid: &'a Grid, start: Point, goal: Point) -> Result<Self, GridError> {
        check_endpoints(grid, start, goal)?;
        let mut visited = VisitState::new(grid.bounds());
        visited.mark(start);
        Ok(Self {
            grid,
            goal,
            queue: VecDeque::from([start]),
            visited,
            prev: Predecessors::new(grid.bounds()),
            pending: VecDeque::new(),
            phase: Phase::Running,
            discovered: 0,
        })
    }

    /// Process one dequeue: either the terminal test or a full neighbour
    /// expansion, buffering any discovery events.
    fn expand(&mut self) {
        let Some(cur) = self.queue.pop_front() else {
            self.phase = Phase::Draining { found: false };
            return;
        };

        if cur == self.goal {
            for p in intermediate_path(&self.prev, self.goal) {
                self.pending.push_back(CellEvent {
                    pos: p,
                    cell: Cell::Path,
                });
            }
            self.phase = Phase::Draining { found: true };
            return;
        }

        for n in cur.neighbors_4() {
            if self.grid.walkable(n) && !self.visited.contains(n) {
                self.visited.mark(n);
                self.prev.set(n, cur);
                self.queue.push_back(n);
                self.discovered += 1;
                if n != self.goal {
                    self.pending.push_back(CellEvent {
                        pos: n,
                        cell: Cell::Visited,
                    });
                }
            }
        }
    }
}

impl Iterator for Bfs<'_> {
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
                    log::debug!("bfs done: found={found}, discovered={}", self.discovered);
                    return Some(SearchStep::Done { found });
                }
                Phase::Running => self.expand(),
            }
        }
    }
}
