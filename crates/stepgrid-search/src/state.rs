//! Per-run search state: visit flags, distances, predecessors.
//!
//! One set of matrices is allocated per algorithm invocation and dropped
//! with the run, so runs over logically independent snapshots never share
//! state. All three are flat row-major vectors indexed by point.

use stepgrid_core::{Grid, GridError, Point, Range};

/// Cost value meaning "not yet reached".
pub(crate) const UNREACHABLE: i32 = i32::MAX;

#[inline]
fn index(bounds: Range, p: Point) -> Option<usize> {
    if !bounds.contains(p) {
        return None;
    }
    Some((p.y * bounds.width() + p.x) as usize)
}

/// Cells already visited (BFS/DFS) or settled (Dijkstra/A*) this run.
pub(crate) struct VisitState {
    bounds: Range,
    seen: Vec<bool>,
}

impl VisitState {
    pub(crate) fn new(bounds: Range) -> Self {
        Self {
            bounds,
            seen: vec![false; bounds.len()],
        }
    }

    pub(crate) fn mark(&mut self, p: Point) {
        if let Some(i) = index(self.bounds, p) {
            self.seen[i] = true;
        }
    }

    pub(crate) fn contains(&self, p: Point) -> bool {
        index(self.bounds, p).is_some_and(|i| self.seen[i])
    }
}

/// Best-known accumulated cost per cell, `UNREACHABLE` until discovered.
pub(crate) struct DistanceMap {
    bounds: Range,
    dist: Vec<i32>,
}

impl DistanceMap {
    pub(crate) fn new(bounds: Range) -> Self {
        Self {
            bounds,
            dist: vec![UNREACHABLE; bounds.len()],
        }
    }

    pub(crate) fn get(&self, p: Point) -> i32 {
        index(self.bounds, p).map_or(UNREACHABLE, |i| self.dist[i])
    }

    pub(crate) fn set(&mut self, p: Point, d: i32) {
        if let Some(i) = index(self.bounds, p) {
            self.dist[i] = d;
        }
    }
}

/// Parent links of the discovered tree, used only for path reconstruction.
pub(crate) struct Predecessors {
    bounds: Range,
    prev: Vec<Option<Point>>,
}

impl Predecessors {
    pub(crate) fn new(bounds: Range) -> Self {
        Self {
            bounds,
            prev: vec![None; bounds.len()],
        }
    }

    pub(crate) fn get(&self, p: Point) -> Option<Point> {
        index(self.bounds, p).and_then(|i| self.prev[i])
    }

    pub(crate) fn set(&mut self, p: Point, parent: Point) {
        if let Some(i) = index(self.bounds, p) {
            self.prev[i] = Some(parent);
        }
    }
}

/// Lifecycle of a run: still expanding, delivering the verdict, exhausted.
#[derive(Clone, Copy)]
pub(crate) enum Phase {
    Running,
    Draining { found: bool },
    Finished,
}

/// Boundary validation shared by every run constructor: both endpoints in
/// bounds and distinct. Runs fail fast here, before any state mutates.
pub(crate) fn check_endpoints(grid: &Grid, start: Point, goal: Point) -> Result<(), GridError> {
    if !grid.contains(start) {
        return Err(GridError::OutOfBounds(start));
    }
    if !grid.contains(goal) {
        return Err(GridError::OutOfBounds(goal));
    }
    if start == goal {
        return Err(GridError::EndpointsCoincide(start));
    }
    Ok(())
}
