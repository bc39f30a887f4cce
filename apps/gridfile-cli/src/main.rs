use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use gridfile_common::Rect;
use gridfile_sim::{SimConfig, World};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridfile-cli", about = "Run grid file simulations and inspect the index")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Run the headless contagion simulation and print a summary
    Simulate {
        #[command(flatten)]
        run: RunArgs,
        /// Centre of an outbreak dropped before the first step, as X,Y
        #[arg(long, value_parser = parse_point)]
        outbreak: Option<Vec2>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a simulation, then list the agents inside a rectangle
    Query {
        #[arg(long)]
        x: f32,
        #[arg(long)]
        y: f32,
        #[arg(long)]
        w: f32,
        #[arg(long)]
        h: f32,
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Number of steps to simulate
    #[arg(short, long, default_value = "100")]
    ticks: u64,
    /// RNG seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,
    /// Initial healthy agents (overrides the config file)
    #[arg(short, long)]
    agents: Option<usize>,
    /// YAML file with simulation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RunArgs {
    fn load_config(&self) -> anyhow::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_path(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SimConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(agents) = self.agents {
            config.initial_agents = agents;
        }
        Ok(config)
    }
}

fn parse_point(text: &str) -> Result<Vec2, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {text:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn run_world(config: SimConfig, outbreak: Option<Vec2>, ticks: u64) -> anyhow::Result<World> {
    let mut world = World::new(config)?;
    if let Some(center) = outbreak {
        world.outbreak(center);
    }
    for _ in 0..ticks {
        world.step();
    }
    Ok(world)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("gridfile-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("index: {}", gridfile_index::crate_info());
            println!("sim: {}", gridfile_sim::crate_info());
        }
        Commands::Simulate { run, outbreak, json } => {
            let config = run.load_config()?;
            tracing::info!(seed = config.seed, ticks = run.ticks, "simulating");
            let world = run_world(config, outbreak, run.ticks)?;
            let summary = world.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
                if let Some(peak) = world.history().samples().max_by_key(|c| c.infected) {
                    println!("peak sample: healthy={} infected={}", peak.healthy, peak.infected);
                }
            }
        }
        Commands::Query { x, y, w, h, run } => {
            let config = run.load_config()?;
            let world = run_world(config, None, run.ticks)?;
            let mut ids = world.query(&Rect::from_xywh(x, y, w, h));
            ids.sort_unstable();
            println!(
                "Query ({x}, {y}, {w}, {h}) at tick {}: {} agents",
                world.tick(),
                ids.len()
            );
            for id in ids {
                if let Some(agent) = world.get(id) {
                    println!(
                        "  {id} at ({:.1}, {:.1}) {:?}",
                        agent.position.x, agent.position.y, agent.health
                    );
                }
            }
        }
    }

    Ok(())
}
