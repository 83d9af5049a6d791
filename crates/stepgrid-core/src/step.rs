//! The stepping protocol: how engine output reaches a caller-owned loop.
//!
//! Every algorithm in the engine is a pull-based source of [`CellEvent`]s.
//! The caller drains events at whatever cadence suits its display and
//! yields control between pulls; the engine imposes no timing of its own.
//! Search sources additionally deliver a terminal verdict as the final
//! [`SearchStep`] of their stream.

use crate::cell::Cell;
use crate::geom::Point;

/// A single externally visible state change: the cell at `pos` takes the
/// state `cell`.
///
/// Searches emit `Visited` then (on success) `Path` changes; the maze
/// carver emits an `Empty` reset batch followed by `Obstacle` placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellEvent {
    pub pos: Point,
    pub cell: Cell,
}

/// One unit of work pulled from a search run.
///
/// A run yields any number of `Change` steps followed by exactly one
/// `Done` carrying the verdict, after which the source is exhausted. A
/// finished run is not restartable; replaying requires a fresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStep {
    /// A cell changed state.
    Change(CellEvent),
    /// The run is complete; `found` is false when the target is
    /// unreachable.
    Done { found: bool },
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// Groups an event stream into caller-sized chunks.
///
/// The pacing analogue of a cells-per-frame setting: a render loop pulls
/// one batch, paints it, then yields until its next frame. The final batch
/// may be short.
#[derive(Debug)]
pub struct Batches<I> {
    inner: I,
    size: usize,
}

impl<I: Iterator> Batches<I> {
    /// Wrap `inner`, delivering at most `size` items per batch.
    /// A `size` of zero is treated as one.
    pub fn new(inner: I, size: usize) -> Self {
        Self {
            inner,
            size: size.max(1),
        }
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        let batch: Vec<_> = self.inner.by_ref().take(self.size).collect();
        if batch.is_empty() { None } else { Some(batch) }
    }
}
