use log::{debug, trace};
use waypath_core::{Grid, GridError, Point, Range};

use crate::error::PathError;
use crate::pather::GridPather;
use crate::pathfinder::{Membership, NO_PARENT, Node, PathFinder, SearchState, SearchStats};
use crate::traits::AstarPather;

impl PathFinder {
    /// Find a shortest path from `grid.start()` to `grid.end()`.
    ///
    /// Moves are orthogonal with uniform cost. The path includes both
    /// endpoints; `start == end` on an open cell yields a single point. An
    /// unreachable goal, a walled-in goal or a start on a wall all end in
    /// [`PathError::NoPathFound`]. The grid is only read.
    pub fn run(&mut self, grid: &Grid) -> Result<Vec<Point>, PathError> {
        let (from, to) = (grid.start(), grid.end());
        if from == to && !grid.is_reachable(from) {
            self.state = SearchState::Exhausted;
            self.stats = SearchStats::default();
            debug!("search {from} -> {to}: endpoint is a wall");
            return Err(PathError::NoPathFound { from, to });
        }
        self.astar_path(grid.bounds(), &GridPather::new(grid), from, to)
    }

    /// Compute the shortest path from `from` to `to` inside `bounds` using A*.
    ///
    /// Among frontier entries with equal `f`, the one queued (or improved)
    /// earliest is expanded first, which together with the pather's neighbour
    /// order makes the result fully deterministic.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        bounds: Range,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<Vec<Point>, PathError> {
        if bounds != self.rng || self.nodes.len() < bounds.len() {
            self.set_range(bounds);
        }
        // A rejected endpoint must not leave the previous run's outcome behind.
        self.state = SearchState::Ready;
        self.stats = SearchStats::default();
        let start_idx = self
            .idx(from)
            .ok_or(GridError::OutOfBounds { pos: from, bounds })?;
        let goal_idx = self
            .idx(to)
            .ok_or(GridError::OutOfBounds { pos: to, bounds })?;

        let cur_gen = self.next_generation();
        self.frontier.clear();

        // Initialise the start node.
        let h = pather.estimate(from, to);
        self.nodes[start_idx] = Node {
            g: 0,
            h,
            f: h,
            parent: NO_PARENT,
            generation: cur_gen,
            membership: Membership::Open,
        };
        self.frontier.push(start_idx, h);
        self.stats.pushed = 1;
        self.state = SearchState::Running;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some((ci, _)) = self.frontier.pop() else {
                break SearchState::Exhausted;
            };
            self.nodes[ci].membership = Membership::Closed;

            if ci == goal_idx {
                break SearchState::Found;
            }
            if self
                .config
                .max_expansions
                .is_some_and(|limit| self.stats.expanded >= limit)
            {
                break SearchState::BudgetExceeded;
            }
            self.stats.expanded += 1;

            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);
            trace!(
                "expand {current_point} g={current_g} f={}",
                self.nodes[ci].f
            );

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.nodes[ni];
                if n.generation != cur_gen {
                    let h = pather.estimate(np, to);
                    *n = Node {
                        g: tentative_g,
                        h,
                        f: tentative_g + h,
                        parent: ci,
                        generation: cur_gen,
                        membership: Membership::Open,
                    };
                    self.frontier.push(ni, n.f);
                    self.stats.pushed += 1;
                    continue;
                }
                if n.membership == Membership::Closed || tentative_g >= n.g {
                    continue;
                }
                n.g = tentative_g;
                n.f = tentative_g + n.h;
                n.parent = ci;
                self.frontier.decrease_key(ni, n.f);
                self.stats.decreased += 1;
            }
        };

        self.nbuf = nbuf;
        self.state = outcome;

        match outcome {
            SearchState::Found => {
                let path = self.reconstruct(goal_idx);
                debug!(
                    "search {from} -> {to}: found {} steps, {:?}",
                    path.len() - 1,
                    self.stats
                );
                Ok(path)
            }
            SearchState::BudgetExceeded => {
                let limit = self.config.max_expansions.unwrap_or_default();
                debug!("search {from} -> {to}: budget of {limit} expansions exhausted");
                Err(PathError::BudgetExceeded { limit })
            }
            _ => {
                debug!("search {from} -> {to}: no path, {:?}", self.stats);
                Err(PathError::NoPathFound { from, to })
            }
        }
    }

    /// Walk parent links back from `goal_idx` and return the path in
    /// start-to-goal order.
    fn reconstruct(&self, goal_idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::config::SearchConfig;
    use crate::distance::path_cost;
    use crate::traits::{Pather, WeightedPather};

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| p.into()).collect()
    }

    fn grid_with(w: i32, h: i32, walls: &[(i32, i32)], from: (i32, i32), to: (i32, i32)) -> Grid {
        let mut grid = Grid::new(w, h, pts(walls)).unwrap();
        grid.set_start(from.into()).unwrap();
        grid.set_end(to.into()).unwrap();
        grid
    }

    /// Every step is orthogonal and lands on an open cell.
    fn assert_valid(grid: &Grid, path: &[Point]) {
        assert_eq!(path.first(), Some(&grid.start()));
        assert_eq!(path.last(), Some(&grid.end()));
        for p in path {
            assert!(grid.is_reachable(*p), "path crosses wall at {p}");
        }
        for w in path.windows(2) {
            assert!(w[0].is_adjacent_4(w[1]), "{} -> {} is not a step", w[0], w[1]);
        }
    }

    /// Brute-force breadth-first distance in moves, for cross-checking.
    fn bfs_moves(grid: &Grid) -> Option<usize> {
        let (from, to) = (grid.start(), grid.end());
        if !grid.is_reachable(from) || !grid.is_reachable(to) {
            return None;
        }
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([(from, 0usize)]);
        while let Some((p, d)) = queue.pop_front() {
            if p == to {
                return Some(d);
            }
            for n in p.neighbors_4() {
                if grid.is_reachable(n) && seen.insert(n) {
                    queue.push_back((n, d + 1));
                }
            }
        }
        None
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let grid = grid_with(10, 10, &[], (0, 0), (9, 9));
        let mut pf = PathFinder::default();
        let path = pf.run(&grid).unwrap();
        assert_eq!(path.len(), 19);
        assert_eq!(path_cost(&path), 180);
        assert_valid(&grid, &path);
        assert_eq!(pf.state(), SearchState::Found);
    }

    #[test]
    fn detours_around_diagonal_wall() {
        let walls = [(7, 2), (6, 3), (5, 4), (4, 4), (3, 5), (2, 4)];
        let grid = grid_with(10, 10, &walls, (0, 0), (2, 3));
        let mut pf = PathFinder::default();
        let path = pf.run(&grid).unwrap();
        assert_valid(&grid, &path);
        for w in pts(&walls) {
            assert!(!path.contains(&w));
        }
        assert_eq!(path.len() - 1, bfs_moves(&grid).unwrap());
        assert_eq!(path_cost(&path), 50);
    }

    #[test]
    fn walled_in_goal_has_no_path() {
        let walls = [(1, 0), (0, 1), (1, 2), (2, 1), (1, 1)];
        let grid = grid_with(3, 3, &walls, (0, 0), (2, 2));
        let mut pf = PathFinder::default();
        assert_eq!(
            pf.run(&grid),
            Err(PathError::NoPathFound {
                from: Point::new(0, 0),
                to: Point::new(2, 2),
            })
        );
        assert_eq!(pf.state(), SearchState::Exhausted);
        // Only the start was ever expanded.
        assert_eq!(pf.stats().expanded, 1);
    }

    #[test]
    fn enclosed_goal_is_never_a_partial_path() {
        // Goal at (5, 5) ringed by walls on all four sides.
        let walls = [(6, 5), (5, 4), (4, 5), (5, 6)];
        let grid = grid_with(8, 8, &walls, (0, 0), (5, 5));
        let mut pf = PathFinder::default();
        let err = pf.run(&grid).unwrap_err();
        assert!(err.is_no_path());
        // Everything reachable was explored before giving up.
        assert_eq!(pf.stats().expanded, 64 - 4 - 1);
    }

    #[test]
    fn start_equals_end() {
        let grid = grid_with(5, 5, &[], (3, 1), (3, 1));
        let mut pf = PathFinder::default();
        let path = pf.run(&grid).unwrap();
        assert_eq!(path, pts(&[(3, 1)]));
        assert_eq!(path_cost(&path), 0);
    }

    #[test]
    fn start_equals_end_on_wall() {
        let grid = grid_with(5, 5, &[(3, 1)], (3, 1), (3, 1));
        let mut pf = PathFinder::default();
        assert!(pf.run(&grid).unwrap_err().is_no_path());
        assert_eq!(pf.state(), SearchState::Exhausted);
    }

    #[test]
    fn start_on_wall_exhausts() {
        let grid = grid_with(5, 5, &[(0, 0)], (0, 0), (4, 4));
        let mut pf = PathFinder::default();
        assert!(pf.run(&grid).unwrap_err().is_no_path());
        assert_eq!(pf.stats().pushed, 1);
    }

    #[test]
    fn goal_on_wall_exhausts() {
        let grid = grid_with(5, 5, &[(4, 4)], (0, 0), (4, 4));
        let mut pf = PathFinder::default();
        assert!(pf.run(&grid).unwrap_err().is_no_path());
    }

    #[test]
    fn equal_cost_ties_prefer_east() {
        let grid = grid_with(2, 2, &[], (0, 0), (1, 1));
        let mut pf = PathFinder::default();
        assert_eq!(pf.run(&grid).unwrap(), pts(&[(0, 0), (1, 0), (1, 1)]));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let walls = [(7, 2), (6, 3), (5, 4), (4, 4), (3, 5), (2, 4)];
        let grid = grid_with(10, 10, &walls, (9, 0), (0, 9));
        let mut pf = PathFinder::default();
        let first = pf.run(&grid).unwrap();
        let stats = pf.stats();
        for _ in 0..5 {
            assert_eq!(pf.run(&grid).unwrap(), first);
            assert_eq!(pf.stats(), stats);
        }
        // A fresh finder agrees with a reused one.
        assert_eq!(PathFinder::default().run(&grid).unwrap(), first);
    }

    #[test]
    fn reuse_across_grids_does_not_leak_state() {
        let mut pf = PathFinder::default();
        let big = grid_with(12, 12, &[(1, 0), (1, 1), (1, 2)], (0, 0), (11, 11));
        pf.run(&big).unwrap();

        let small = grid_with(4, 4, &[], (0, 0), (3, 0));
        let path = pf.run(&small).unwrap();
        assert_eq!(path, pts(&[(0, 0), (1, 0), (2, 0), (3, 0)]));

        let walled = grid_with(4, 4, &[(1, 0), (1, 1), (1, 2), (1, 3)], (0, 0), (3, 0));
        assert!(pf.run(&walled).unwrap_err().is_no_path());
        assert_eq!(pf.run(&small).unwrap(), path);
    }

    #[test]
    fn matches_breadth_first_search_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut pf = PathFinder::default();
        for _ in 0..200 {
            let size = rng.random_range(2..12);
            let count = rng.random_range(0..(size * size / 2));
            let walls: Vec<Point> = (0..count)
                .map(|_| Point::new(rng.random_range(0..size), rng.random_range(0..size)))
                .collect();
            let mut grid = Grid::new(size, size, walls).unwrap();
            let from = Point::new(rng.random_range(0..size), rng.random_range(0..size));
            let to = Point::new(rng.random_range(0..size), rng.random_range(0..size));
            grid.set_start(from).unwrap();
            grid.set_end(to).unwrap();

            match (pf.run(&grid), bfs_moves(&grid)) {
                (Ok(path), Some(moves)) => {
                    assert_valid(&grid, &path);
                    assert_eq!(path.len() - 1, moves, "suboptimal {from} -> {to}");
                }
                (Err(e), None) => assert!(e.is_no_path()),
                (got, want) => panic!("{from} -> {to}: got {got:?}, bfs says {want:?}"),
            }
        }
    }

    #[test]
    fn out_of_bounds_endpoint() {
        let grid = grid_with(4, 4, &[], (0, 0), (3, 3));
        let mut pf = PathFinder::default();
        pf.run(&grid).unwrap();
        assert_eq!(pf.state(), SearchState::Found);
        let err = pf
            .astar_path(
                grid.bounds(),
                &GridPather::new(&grid),
                Point::new(0, 0),
                Point::new(4, 0),
            )
            .unwrap_err();
        assert_eq!(
            err,
            PathError::Grid(GridError::OutOfBounds {
                pos: Point::new(4, 0),
                bounds: grid.bounds(),
            })
        );
        // Nothing from the earlier successful run survives the rejection.
        assert_eq!(pf.state(), SearchState::Ready);
        assert_eq!(pf.stats(), SearchStats::default());
    }

    #[test]
    fn budget_caps_expansions() {
        let grid = grid_with(20, 20, &[], (0, 0), (19, 19));
        let mut pf = PathFinder::new(SearchConfig::default().with_max_expansions(5));
        assert_eq!(pf.run(&grid), Err(PathError::BudgetExceeded { limit: 5 }));
        assert_eq!(pf.state(), SearchState::BudgetExceeded);
        assert_eq!(pf.stats().expanded, 5);

        // A budget large enough for the search leaves the result unchanged.
        pf.set_config(SearchConfig::default().with_max_expansions(10_000));
        assert_eq!(pf.run(&grid).unwrap().len(), 39);
    }

    /// Tiny hand-built graph whose cheap route is only discovered after the
    /// expensive one: S=(0,0) -5-> X=(1,0), S -1-> Y=(0,1) -1-> X -1-> G=(2,0).
    struct Detour;

    impl Pather for Detour {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            match (p.x, p.y) {
                (0, 0) => buf.extend(pts(&[(1, 0), (0, 1)])),
                (0, 1) => buf.push(Point::new(1, 0)),
                (1, 0) => buf.push(Point::new(2, 0)),
                _ => {}
            }
        }
    }

    impl WeightedPather for Detour {
        fn cost(&self, from: Point, to: Point) -> i32 {
            if from == Point::new(0, 0) && to == Point::new(1, 0) {
                5
            } else {
                1
            }
        }
    }

    impl AstarPather for Detour {
        fn estimate(&self, _from: Point, _to: Point) -> i32 {
            0
        }
    }

    #[test]
    fn relax_accepts_strictly_better_paths() {
        let mut pf = PathFinder::default();
        let path = pf
            .astar_path(Range::with_size(3, 2), &Detour, Point::new(0, 0), Point::new(2, 0))
            .unwrap();
        assert_eq!(path, pts(&[(0, 0), (0, 1), (1, 0), (2, 0)]));
        assert_eq!(pf.stats().decreased, 1);
    }
}
