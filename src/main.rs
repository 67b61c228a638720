//! Command-line driver: runs a scripted search against a simulated world

use clap::Parser;
use gridseeker::engine::InferenceEngine;
use gridseeker::grid::Cell;
use gridseeker::script;
use gridseeker::world::GridWorld;
use std::path::PathBuf;

/// Run a scripted grid search and print the knowledge matrix after each step
#[derive(Parser, Debug)]
#[command(name = "gridseeker", version)]
struct Cli {
    /// World dimension N
    #[arg(long)]
    dim: u32,

    /// True target cell, as row,col
    #[arg(long)]
    target: Cell,

    /// File with the movement script (one line of row,col steps)
    #[arg(long)]
    steps: PathBuf,

    /// File with informant locations (row,col tokens)
    #[arg(long)]
    informants: Option<PathBuf>,

    /// Agent starting cell
    #[arg(long, default_value = "1,1")]
    start: Cell,

    /// Run at most this many steps of the script
    #[arg(long)]
    max_steps: Option<usize>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> gridseeker::Result<()> {
    let informants = match &cli.informants {
        Some(path) => script::load_informants(path)?,
        None => Vec::new(),
    };
    let world = GridWorld::new(cli.dim, cli.target, &informants)?;
    let steps = script::load_steps(&cli.steps)?;
    let limit = cli.max_steps.unwrap_or(steps.len());

    let mut engine = InferenceEngine::new(cli.dim, cli.start)?;
    let mut position = cli.start;
    println!("{}", engine.knowledge());

    for step in steps.into_iter().take(limit) {
        let outcome = match world.accept_move(step) {
            Some(outcome) => {
                position = outcome.position;
                outcome
            }
            None => {
                // rejected moves leave the agent in place; the round still
                // runs with sensors read at the old position
                log::warn!("move to {step} rejected, staying at {position}");
                world
                    .accept_move(position)
                    .expect("current position stays within the world")
            }
        };
        let observation = world.observe(&outcome);
        engine.run_round(&outcome, &observation)?;
        println!("{}", engine.knowledge());
    }
    Ok(())
}
