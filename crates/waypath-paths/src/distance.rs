use waypath_core::Point;

use crate::pather::STEP_COST;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    let d = a - b;
    d.x.abs() + d.y.abs()
}

/// Total cost of a path made of orthogonal unit steps.
///
/// A path of `n` points has `n - 1` moves; empty and single-point paths cost
/// nothing.
#[inline]
pub fn path_cost(path: &[Point]) -> i32 {
    path.len().saturating_sub(1) as i32 * STEP_COST
}
