//! ASCII diagnostics for grids, paths and tours.
//!
//! One line per grid row, top row first.

use waypath_core::{Grid, Point, Range};

/// Meaning of the characters used by [`render`] and [`render_tour`].
pub const LEGEND: &str = "\
'-': empty cell
'X': wall
'S': start
'T': target
'o': path
";

/// Draw `grid` with `path` overlaid. The grid's start and end are marked
/// `S` and `T` and take precedence over path and wall marks.
pub fn render(grid: &Grid, path: &[Point]) -> String {
    draw(grid.bounds(), |p| {
        if p == grid.start() {
            'S'
        } else if p == grid.end() {
            'T'
        } else if path.contains(&p) {
            'o'
        } else if grid.is_reachable(p) {
            '-'
        } else {
            'X'
        }
    })
}

/// Draw a tour's full path on a `width × height` canvas: waypoints as `T`,
/// the starting point as `S`, the path as `o`. Walls are not shown since
/// every leg may have been searched on a different grid.
pub fn render_tour(
    width: i32,
    height: i32,
    start: Point,
    waypoints: &[Point],
    path: &[Point],
) -> String {
    draw(Range::with_size(width, height), |p| {
        if waypoints.contains(&p) {
            'T'
        } else if p == start {
            'S'
        } else if path.contains(&p) {
            'o'
        } else {
            '-'
        }
    })
}

fn draw(bounds: Range, mark: impl Fn(Point) -> char) -> String {
    let mut out = String::with_capacity(bounds.len() + bounds.height().max(0) as usize);
    for y in bounds.min.y..bounds.max.y {
        for x in bounds.min.x..bounds.max.x {
            out.push(mark(Point::new(x, y)));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_grid_with_path() {
        let mut grid = Grid::new(4, 3, [Point::new(1, 1), Point::new(2, 1)]).unwrap();
        grid.set_start(Point::new(0, 0)).unwrap();
        grid.set_end(Point::new(3, 2)).unwrap();
        let path = [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(3, 0),
            Point::new(3, 1),
            Point::new(3, 2),
        ];
        assert_eq!(render(&grid, &path), "Sooo\n-XXo\n---T\n");
    }

    #[test]
    fn render_without_path() {
        let grid = Grid::new(3, 2, [Point::new(1, 0)]).unwrap();
        assert_eq!(render(&grid, &[]), "SX-\n--T\n");
    }

    #[test]
    fn render_tour_marks_waypoints() {
        let path = [Point::new(1, 1), Point::new(2, 1), Point::new(2, 0)];
        let out = render_tour(3, 2, Point::new(1, 1), &[Point::new(2, 0)], &path);
        assert_eq!(out, "--T\n-So\n");
    }

    #[test]
    fn legend_lists_every_mark() {
        for ch in ['-', 'X', 'S', 'T', 'o'] {
            assert!(LEGEND.contains(&format!("'{ch}'")));
        }
    }
}
