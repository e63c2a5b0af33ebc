//! Random wall placement.

use rand::Rng;
use waypath_core::Point;

/// Sample `count` wall positions uniformly inside `width × height`, with
/// replacement, so duplicates are possible and the grid may end up with
/// fewer distinct walls than requested.
pub fn sample_walls<R: Rng>(rng: &mut R, width: i32, height: i32, count: usize) -> Vec<Point> {
    if width <= 0 || height <= 0 {
        return Vec::new();
    }
    (0..count)
        .map(|_| Point::new(rng.random_range(0..width), rng.random_range(0..height)))
        .collect()
}
