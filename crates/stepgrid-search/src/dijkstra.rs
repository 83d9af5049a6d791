//! Dijkstra search with a push-only heap and lazy staleness checks.

use std::collections::VecDeque;

use stepgrid_core::{Cell, CellEvent, Grid, GridError, Point, SearchStep};

use crate::heap::MinHeap;
use crate::state::{DistanceMap, Phase, Predecessors, VisitState, check_endpoints};
use crate::trace::intermediate_path;

/// Heap entry keyed by accumulated cost. Ordering uses the cost alone;
/// equal costs fall back to the heap's FIFO tie-break. The position does
/// not participate in ordering.
struct CostEntry {
    g: i32,
    pos: Point,
}

impl PartialEq for CostEntry {
    fn eq(&self, other: &Self) -> bool {
        self.g == other.g
    }
}

impl Eq for CostEntry {}

impl PartialOrd for CostEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CostEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.g.cmp(&other.g)
    }
}

/// A Dijkstra run.
///
/// Pops settle cells in nondecreasing cost order; settling is the moment
/// the visit event is emitted. A popped entry whose cell is already
/// settled, or whose cost no longer matches the best known distance, was
/// superseded by a cheaper relaxation pushed after it and is silently
/// discarded. Heap entries are never mutated or removed in place.
pub struct Dijkstra<'a> {
    grid: &'a Grid,
    start: Point,
    goal: Point,
    open: MinHeap<CostEntry>,
    dist: DistanceMap,
    settled: VisitState,
    prev: Predecessors,
    pending: VecDeque<CellEvent>,
    phase: Phase,
    settled_count: usize,
}

impl<'a> Dijkstra<'a> {
    /// Start a run over `grid` from `start` toward `goal`.
    pub fn new(grid: &'a Grid, start: Point, goal: Point) -> Result<Self, GridError> {
        check_endpoints(grid, start, goal)?;
        let mut dist = DistanceMap::new(grid.bounds());
        dist.set(start, 0);
        let mut open = MinHeap::new();
        open.push(CostEntry { g: 0, pos: start });
        Ok(Self {
            grid,
            start,
            goal,
            open,
            dist,
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

        // Lazy invalidation: staleness is detected here, not prevented.
        if self.settled.contains(entry.pos) || entry.g != self.dist.get(entry.pos) {
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

        for n in entry.pos.neighbors_4() {
            if !self.grid.walkable(n) || self.settled.contains(n) {
                continue;
            }
            let nd = entry.g + 1;
            if nd < self.dist.get(n) {
                self.dist.set(n, nd);
                self.prev.set(n, entry.pos);
                self.open.push(CostEntry { g: nd, pos: n });
            }
        }
    }
}

impl Iterator for Dijkstra<'_> {
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
                    log::debug!(
                        "dijkstra done: found={found}, settled={}",
                        self.settled_count
                    );
                    return Some(SearchStep::Done { found });
                }
                Phase::Running => self.advance(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bfs;
    use crate::fixtures::{assert_contiguous, drain, grid};

    #[test]
    fn settles_in_cost_then_fifo_order() {
        let (g, start, goal) = grid(&[
            ".....", //
            ".....",
            "s...e",
            ".....",
            ".....",
        ]);
        let out = drain(Dijkstra::new(&g, start, goal).unwrap());
        assert!(out.found);
        // With unit costs and FIFO tie-breaking the settle order matches
        // BFS's dequeue order; cells discovered but not yet settled when
        // the goal settles emit nothing.
        let expected = [
            (1, 2),
            (0, 1),
            (0, 3),
            (2, 2),
            (1, 1),
            (1, 3),
            (0, 0),
            (0, 4),
            (3, 2),
            (2, 1),
            (2, 3),
            (1, 0),
            (1, 4),
        ];
        let expected: Vec<Point> = expected.iter().map(|&(x, y)| Point::new(x, y)).collect();
        assert_eq!(out.visits, expected);
        assert_eq!(
            out.path,
            vec![Point::new(1, 2), Point::new(2, 2), Point::new(3, 2)]
        );
    }

    #[test]
    fn agrees_with_bfs_on_path_length() {
        let (g, start, goal) = grid(&[
            "s.#..", //
            "..#..",
            "..#..",
            ".....",
            "....e",
        ]);
        let dij = drain(Dijkstra::new(&g, start, goal).unwrap());
        let bfs = drain(Bfs::new(&g, start, goal).unwrap());
        assert!(dij.found);
        assert_eq!(dij.path.len(), bfs.path.len());
        assert_contiguous(start, &dij.path, goal);
    }

    #[test]
    fn adjacent_endpoints_find_empty_path() {
        let (g, start, goal) = grid(&["se"]);
        let out = drain(Dijkstra::new(&g, start, goal).unwrap());
        assert!(out.found);
        assert!(out.visits.is_empty());
        assert!(out.path.is_empty());
    }

    #[test]
    fn enclosed_goal_reports_not_found() {
        let (g, start, goal) = grid(&[
            "s..#e", //
            "...##",
            ".....",
        ]);
        let out = drain(Dijkstra::new(&g, start, goal).unwrap());
        assert!(!out.found);
        assert!(out.path.is_empty());
        // Exhaustion settles every reachable cell exactly once.
        assert_eq!(out.visits.len(), 10);
        let mut dedup = out.visits.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 10);
    }
}
