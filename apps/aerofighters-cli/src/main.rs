mod script;

use std::path::PathBuf;

use aerofighters_flight::{FlightTuning, WeaponTuning};
use aerofighters_game::{GameConfig, GameMode, Session};
use aerofighters_tools::FlightInspector;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::script::KeyScript;

#[derive(Parser)]
#[command(name = "aerofighters-cli", about = "Headless flight sessions for aerofighters")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the default tuning
    Info,
    /// Print the default configuration as YAML
    Config,
    /// Fly a scripted session and report the result
    Fly {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// YAML config file; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Held keys, e.g. "0-60:W+Space,30-90:D"
        #[arg(short, long, default_value = "")]
        script: String,
        /// Print one JSON report per frame instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            let flight = FlightTuning::default();
            let weapon = WeaponTuning::default();
            println!("aerofighters-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("tools: {}", aerofighters_tools::crate_info());
            println!(
                "flight: acceleration={} turn_speed={} speed=[{}, {}]",
                flight.acceleration, flight.turn_speed, flight.min_speed, flight.max_speed
            );
            println!(
                "weapon: fire_rate={}s gun_offset=({}, {}, {})",
                weapon.fire_rate, weapon.gun_offset.x, weapon.gun_offset.y, weapon.gun_offset.z
            );
            println!("default pawn: {}", GameMode::default().default_pawn_class);
        }
        Commands::Config => {
            print!("{}", GameConfig::default().to_yaml()?);
        }
        Commands::Fly {
            frames,
            dt,
            config,
            script,
            json,
        } => {
            anyhow::ensure!(dt > 0.0, "--dt must be positive, got {dt}");
            let config = match config {
                Some(path) => GameConfig::load(&path)?,
                None => GameConfig::default(),
            };
            let script = KeyScript::parse(&script)?;
            let mut session = Session::start(GameMode::aero_fighters(), config)?;

            let mut fired = 0;
            let mut hits = 0;
            for frame in 0..frames {
                let report = session.frame(&script.keys_at(frame), dt)?;
                fired += report.projectiles_spawned;
                hits += usize::from(report.hit);
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                }
            }

            if !json {
                println!("{}", FlightInspector::summary(&session));
                if let Some(pawn) = FlightInspector::pawn(&session) {
                    println!("{pawn}");
                }
                println!("projectiles fired={fired} surface hits={hits}");
            }
            session.end();
            tracing::debug!(frames, "flight finished");
        }
    }

    Ok(())
}
