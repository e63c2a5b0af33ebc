//! Walk a robot through a list of targets on a grid, one A* leg at a time.
//!
//! ```text
//! cargo run --bin tour -- --walls 12 --seed 7
//! cargo run --bin tour -- --size 10 --start 0,0 --target 9,9 --target 0,9
//! ```

use std::process::ExitCode;

use clap::Parser;
use log::error;
use rand::SeedableRng;
use rand::rngs::StdRng;
use waypath_core::Point;
use waypath_paths::SearchConfig;
use waypath_tour::{LEGEND, RandomWalls, TourConfig, TourRunner, render, render_tour};

/// Targets visited when none are given on the command line.
const DEFAULT_TARGETS: [(i32, i32); 9] = [
    (2, 2),
    (7, 2),
    (12, 2),
    (2, 7),
    (7, 7),
    (12, 7),
    (2, 12),
    (7, 12),
    (12, 12),
];

#[derive(Parser)]
#[command(name = "tour")]
#[command(about = "Visit a sequence of targets with chained A* searches")]
struct Args {
    /// Side length of the square grid
    #[arg(long, default_value = "16")]
    size: i32,

    /// Random wall samples per leg
    #[arg(long, default_value = "0")]
    walls: usize,

    /// Seed for wall placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position as x,y
    #[arg(long, default_value = "4,6", value_parser = parse_point)]
    start: Point,

    /// Target position as x,y; repeat to visit several in order
    #[arg(long = "target", value_parser = parse_point)]
    targets: Vec<Point>,

    /// Give up a leg after expanding this many cells
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Let sampled walls land on a leg's start or target
    #[arg(long)]
    wall_endpoints: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let targets: Vec<Point> = if args.targets.is_empty() {
        DEFAULT_TARGETS.iter().map(|&p| p.into()).collect()
    } else {
        args.targets.clone()
    };

    let rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut source =
        RandomWalls::new(rng, args.size, args.walls).with_protect_endpoints(!args.wall_endpoints);

    let config = TourConfig {
        search: SearchConfig {
            max_expansions: args.max_expansions,
        },
        ..TourConfig::default()
    };
    let mut runner = TourRunner::new(config);

    let result = runner.run_with(&mut source, args.start, &targets, |leg, grid, path| {
        println!("leg {leg}: {} -> {}", grid.start(), grid.end());
        print!("{}", render(grid, path));
        println!();
    });

    match result {
        Ok(tour) => {
            println!(
                "tour of {} legs, {} steps, cost {}",
                tour.legs.len(),
                tour.path.len() - 1,
                tour.cost()
            );
            print!(
                "{}",
                render_tour(args.size, args.size, tour.start, &targets, &tour.path)
            );
            println!();
            print!("{LEGEND}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let stats = runner.finder().stats();
            error!(
                "{e} ({:?} after {} expansions)",
                runner.finder().state(),
                stats.expanded
            );
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_accepts_pairs() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert_eq!(parse_point(" 12 , 0"), Ok(Point::new(12, 0)));
    }

    #[test]
    fn parse_point_rejects_garbage() {
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,4").is_err());
        assert!(parse_point("1,2,3").is_err());
    }

    #[test]
    fn args_defaults_match_original_run() {
        let args = Args::parse_from(["tour"]);
        assert_eq!(args.size, 16);
        assert_eq!(args.walls, 0);
        assert_eq!(args.start, Point::new(4, 6));
        assert!(args.targets.is_empty());
    }

    #[test]
    fn args_repeatable_targets() {
        let args = Args::parse_from(["tour", "--target", "1,1", "--target", "2,3", "--seed", "5"]);
        assert_eq!(args.targets, vec![Point::new(1, 1), Point::new(2, 3)]);
        assert_eq!(args.seed, Some(5));
    }
}
