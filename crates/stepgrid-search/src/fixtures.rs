//! Shared helpers for the algorithm tests.

use stepgrid_core::{Cell, CellEvent, Grid, Point, SearchStep};

/// Build a grid from ASCII rows: `#` obstacle, `s` start, `e` end,
/// anything else empty. Returns the grid with both endpoint coordinates.
pub(crate) fn grid(rows: &[&str]) -> (Grid, Point, Point) {
    let height = rows.len() as i32;
    let width = rows[0].len() as i32;
    let mut g = Grid::new(width, height);
    let mut start = None;
    let mut end = None;
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len() as i32, width, "ragged fixture");
        for (x, ch) in row.chars().enumerate() {
            let p = Point::new(x as i32, y as i32);
            match ch {
                '#' => g.set(p, Cell::Obstacle),
                's' => {
                    g.set(p, Cell::Start);
                    start = Some(p);
                }
                'e' => {
                    g.set(p, Cell::End);
                    end = Some(p);
                }
                _ => {}
            }
        }
    }
    (g, start.expect("fixture has no start"), end.expect("fixture has no end"))
}

/// Everything a run produced, split by event kind.
pub(crate) struct Drained {
    pub visits: Vec<Point>,
    pub path: Vec<Point>,
    pub found: bool,
}

/// Drain a run to exhaustion while checking the protocol shape: visit
/// events, then path events, then exactly one verdict, then `None`.
pub(crate) fn drain(mut run: impl Iterator<Item = SearchStep>) -> Drained {
    let mut visits = Vec::new();
    let mut path = Vec::new();
    let mut found = None;
    for step in run.by_ref() {
        match step {
            SearchStep::Change(CellEvent { pos, cell }) => {
                assert!(found.is_none(), "change event after the verdict");
                match cell {
                    Cell::Visited => {
                        assert!(path.is_empty(), "visit event after a path event");
                        visits.push(pos);
                    }
                    Cell::Path => path.push(pos),
                    other => panic!("search emitted unexpected state {other:?}"),
                }
            }
            SearchStep::Done { found: f } => {
                assert!(found.is_none(), "second verdict");
                found = Some(f);
            }
        }
    }
    assert!(run.next().is_none(), "run yielded past exhaustion");
    Drained {
        visits,
        path,
        found: found.expect("run ended without a verdict"),
    }
}

/// Assert that `start -> path -> goal` is a chain of 4-adjacent cells.
pub(crate) fn assert_contiguous(start: Point, path: &[Point], goal: Point) {
    let mut full = vec![start];
    full.extend_from_slice(path);
    full.push(goal);
    for pair in full.windows(2) {
        let d = pair[1] - pair[0];
        assert_eq!(
            d.x.abs() + d.y.abs(),
            1,
            "{} and {} are not 4-adjacent",
            pair[0],
            pair[1]
        );
    }
}
