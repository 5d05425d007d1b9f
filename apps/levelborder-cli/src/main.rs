use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::DVec3;
use levelborder_common::{BlockPos, BorderMode, PlayerId};
use levelborder_engine::{BorderConfig, BorderEngine, GameEvent};
use levelborder_sim::{SimServer, run_tick};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "levelborder-cli", about = "Drive the level border engine on a simulated server")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective config
    Info,
    /// Join players with the given levels, level one up, then have one leave
    Simulate {
        /// Aggregation mode: own, shared or sum
        #[arg(short, long)]
        mode: Option<BorderMode>,
        /// Comma-separated experience levels, one player each
        #[arg(short, long, value_delimiter = ',', default_value = "3,5,2")]
        levels: Vec<i32>,
        /// Dump the engine event log as JSON
        #[arg(long)]
        json: bool,
    },
    /// Walk one player away from spawn until the border hurts them
    Wander {
        /// Number of 50ms ticks to run
        #[arg(short, long, default_value = "100")]
        ticks: u32,
        /// Blocks walked per tick
        #[arg(short, long, default_value = "0.5")]
        step: f64,
        /// Experience level of the walker
        #[arg(short = 'L', long, default_value = "5")]
        level: i32,
    },
}

const TICK_MILLIS: u64 = 50;

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<BorderConfig> {
    match path {
        Some(p) => BorderConfig::load(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(BorderConfig::default()),
    }
}

fn print_sizes(engine: &BorderEngine<SimServer>) {
    for p in engine.adapter().players() {
        let size = engine
            .size_of(&p.id)
            .map_or_else(|| "-".to_string(), |s| format!("{s:.1}"));
        println!("  {:<8} level={:<4} border={size}", p.name, p.level);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("levelborder-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("engine: {}", levelborder_engine::crate_info());
            println!("sim: {}", levelborder_sim::crate_info());
            println!(
                "config: mode={} blocks_per_level={} min_size={} transition={}ms grace={} damage={}",
                config.mode,
                config.blocks_per_level,
                config.min_size,
                config.transition_millis,
                config.damage_grace,
                config.damage_amount
            );
        }
        Commands::Simulate { mode, levels, json } => {
            if let Some(mode) = mode {
                config.mode = mode;
            }
            anyhow::ensure!(!levels.is_empty(), "need at least one player level");
            println!("Simulating {} players in {} mode", levels.len(), config.mode);

            let server = SimServer::new(BlockPos::new(0, 64, 0));
            let mut engine = BorderEngine::new(server, config)?;
            let ids: Vec<PlayerId> = levels
                .iter()
                .enumerate()
                .map(|(i, &level)| {
                    let id = engine.adapter_mut().connect(format!("player{}", i + 1), level);
                    engine.dispatch(GameEvent::Join(id));
                    id
                })
                .collect();
            println!("After join:");
            print_sizes(&engine);

            let first = ids[0];
            let level = engine.adapter().player(first).map_or(0, |p| p.level);
            engine.adapter_mut().set_level(first, level + 1);
            engine.dispatch(GameEvent::LevelChange(first));
            println!("After player1 levels up:");
            print_sizes(&engine);

            if let Some(&last) = ids.last() {
                engine.adapter_mut().disconnect(last);
                engine.dispatch(GameEvent::Leave(last));
                println!("After last player leaves:");
                print_sizes(&engine);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(engine.events())?);
            }
        }
        Commands::Wander { ticks, step, level } => {
            let server = SimServer::new(BlockPos::new(0, 64, 0));
            let mut engine = BorderEngine::new(server, config)?;
            let id = engine.adapter_mut().connect("walker", level);
            engine.dispatch(GameEvent::Join(id));
            println!(
                "Walker level={level}, border={:.1}",
                engine.size_of(&id).unwrap_or_default()
            );

            for tick in 1..=ticks {
                engine.adapter_mut().move_by(id, DVec3::new(step, 0.0, 0.0));
                let respawned = run_tick(&mut engine, TICK_MILLIS);
                let Some(p) = engine.adapter().player(id) else {
                    break;
                };
                if !respawned.is_empty() {
                    println!("tick {tick}: died outside the border, respawned at spawn");
                } else if p.health < levelborder_sim::MAX_HEALTH {
                    println!("tick {tick}: x={:.1} health={:.0}", p.position.x, p.health);
                }
            }
        }
    }

    Ok(())
}
