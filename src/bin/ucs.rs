// Search runner
// Builds the environment, runs the battery-constrained search,
// prints the status lines and plots the path

use battery_ucs::{
    Agent, ConfigError, Coordinate, Display, Grid, RunConfig, create_search_report,
};

use clap::Parser;
use log::info;
use std::io::stdout;
use std::path::PathBuf;

/// NOTE - Obstacle threshold for generated grids
const DEFAULT_THRESHOLD: f64 = 0.5;

/// Command-line arguments for the search runner.
///
/// With no arguments the built-in 10x10 demonstration grid is searched
/// from (0, 0) to (9, 9).
#[derive(Parser, Debug)]
#[command(name = "ucs", about = "Uniform-cost grid search with battery recharges")]
struct Cli {
    /// JSON run configuration (grid, start, goal, optional search section).
    #[arg(long, conflicts_with = "random")]
    config: Option<PathBuf>,

    /// Generate a ROWSxCOLS obstacle field instead of using a fixed grid.
    /// Start is the top-left cell, goal the bottom-right one.
    #[arg(long, value_name = "ROWSxCOLS", value_parser = parse_size)]
    random: Option<(usize, usize)>,

    /// Noise seed for `--random`; drawn at random when absent.
    #[arg(long, requires = "random")]
    seed: Option<u32>,

    /// Noise level above which a generated cell becomes an obstacle (default: 0.5).
    #[arg(long, requires = "random", allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Print the report as JSON instead of status lines.
    #[arg(long)]
    json: bool,

    /// Skip the terminal plot.
    #[arg(long)]
    no_render: bool,
}

fn parse_size(value: &str) -> Result<(usize, usize), ConfigError> {
    let (rows, cols) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| ConfigError::GridSize(format!("expected ROWSxCOLS, got {value:?}")))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::GridSize(format!("{part:?}: {e}")))
    };
    Ok((parse(rows)?, parse(cols)?))
}

fn load_config(cli: &Cli) -> Result<RunConfig, ConfigError> {
    if let Some(path) = &cli.config {
        return RunConfig::load(path);
    }

    if let Some((rows, cols)) = cli.random {
        let start = Coordinate::new(0, 0);
        let goal = Coordinate::new(rows.saturating_sub(1), cols.saturating_sub(1));
        let threshold = cli.threshold.unwrap_or(DEFAULT_THRESHOLD);
        let mut grid = Grid::generate(rows, cols, cli.seed, threshold)?;
        grid.clear(start);
        grid.clear(goal);
        info!("Generated {}x{} grid, {} free cells", rows, cols, grid.free_cells());
        return Ok(RunConfig::from_grid(&grid, start, goal));
    }

    info!("Using built-in demonstration grid");
    Ok(RunConfig::default())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // NOTE - Every configuration problem surfaces here, before the search starts
    let config = load_config(&cli)?;
    let env = config.build_environment()?;
    let mut agent = Agent::with_config(&env, config.search.clone())?;

    if !cli.json {
        println!("🚀 Searching from {} to {} ...", env.start(), env.goal());
    }

    let outcome = agent.search();
    let report = create_search_report(&env, &outcome);

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        for line in report.summary_lines() {
            println!("{line}");
        }
    }

    if !cli.no_render && !cli.json {
        if outcome.path.is_empty() {
            println!("⚠️  Nothing to plot, showing the bare grid.");
        }
        println!();
        Display::render(&mut stdout(), env.grid(), &outcome.path)?;
    }

    Ok(())
}
