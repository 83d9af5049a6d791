//! Depth-first search: exhaustive backtracking with first-hit
//! short-circuit.

use std::collections::VecDeque;

use stepgrid_core::{Cell, CellEvent, Grid, GridError, Point, SearchStep};

use crate::state::{Phase, Predecessors, VisitState, check_endpoints};
use crate::trace::intermediate_path;

/// One suspended recursion level: a cell and the next neighbour direction
/// to try.
#[derive(Clone, Copy)]
struct Frame {
    pos: Point,
    dir: usize,
}

/// A depth-first search run.
///
/// The explicit stack mirrors the recursive formulation: entering a cell
/// marks it visited and emits its visit event before the target test, each
/// neighbour is tried in canonical order, and the first branch to reach
/// the target aborts all remaining sibling exploration. Predecessors are
/// recorded at push time. The result is *a* path, not necessarily a
/// shortest one.
pub struct Dfs<'a> {
    grid: &'a Grid,
    start: Point,
    goal: Point,
    stack: Vec<Frame>,
    visited: VisitState,
    prev: Predecessors,
    pending: VecDeque<CellEvent>,
    phase: Phase,
    entered: usize,
}

impl<'a> Dfs<'a> {
    /// Start a run over `grid` from `start` toward `goal`.
    pub fn new(grid: &'a Grid, start: Point, goal: Point) -> Result<Self, GridError> {
        check_endpoints(grid, start, goal)?;
        let mut run = Self {
            grid,
            start,
            goal,
            stack: Vec::new(),
            visited: VisitState::new(grid.bounds()),
            prev: Predecessors::new(grid.bounds()),
            pending: VecDeque::new(),
            phase: Phase::Running,
            entered: 0,
        };
        run.stack.push(Frame { pos: start, dir: 0 });
        run.enter(start);
        Ok(run)
    }

    /// Entering a cell: mark it, emit its visit event (endpoints
    /// suppressed), then report whether it is the target.
    fn enter(&mut self, p: Point) -> bool {
        self.visited.mark(p);
        self.entered += 1;
        if p != self.start && p != self.goal {
            self.pending.push_back(CellEvent {
                pos: p,
                cell: Cell::Visited,
            });
        }
        p == self.goal
    }

    /// Advance the topmost frame by one neighbour probe, descending into
    /// the first traversable one or popping the frame when exhausted.
    fn explore(&mut self) {
        let Some(top) = self.stack.last().copied() else {
            self.phase = Phase::Draining { found: false };
            return;
        };

        let mut dir = top.dir;
        let mut descend = None;
        while dir < 4 {
            let n = top.pos.neighbors_4()[dir];
            dir += 1;
            if self.grid.walkable(n) && !self.visited.contains(n) {
                descend = Some(n);
                break;
            }
        }
        if let Some(frame) = self.stack.last_mut() {
            frame.dir = dir;
        }

        match descend {
            Some(n) => {
                self.prev.set(n, top.pos);
                self.stack.push(Frame { pos: n, dir: 0 });
                if self.enter(n) {
                    for p in intermediate_path(&self.prev, self.goal) {
                        self.pending.push_back(CellEvent {
                            pos: p,
                            cell: Cell::Path,
                        });
                    }
                    self.phase = Phase::Draining { found: true };
                }
            }
            None => {
                self.stack.pop();
            }
        }
    }
}

impl Iterator for Dfs<'_> {
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
                    log::debug!("dfs done: found={found}, entered={}", self.entered);
                    return Some(SearchStep::Done { found });
                }
                Phase::Running => self.explore(),
            }
        }
    }
}
