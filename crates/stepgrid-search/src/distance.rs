use stepgrid_core::Point;

/// Manhattan (L1) distance between two points.
///
/// On a 4-connected uniform-cost grid this is admissible and consistent,
/// which makes it the A* heuristic.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
