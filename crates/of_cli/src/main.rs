//! of_cli
//!
//! Runs the match iteration core over JSON documents on disk:
//! set up a match, play single ticks, swap ends, or play a whole match.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use of_engine::{EngineConfig, MatchDetails, MatchEngine, Pitch, TeamInput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "of_cli")]
#[command(about = "Play football matches tick by tick from JSON documents", long_about = None)]
struct Cli {
    /// Random seed; the same seed and inputs replay the same match
    #[arg(long, global = true, default_value = "0")]
    seed: u64,

    /// Engine tuning file (.yaml, .yml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a match from two rosters and a pitch
    Init {
        #[arg(long)]
        team1: PathBuf,
        #[arg(long)]
        team2: PathBuf,
        #[arg(long)]
        pitch: PathBuf,
        /// Output match file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Advance a match by one tick
    Tick {
        #[arg(long)]
        state: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Swap ends and kick off the second half
    SecondHalf {
        #[arg(long)]
        state: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Play both halves and print every log line
    Play {
        #[arg(long)]
        team1: PathBuf,
        #[arg(long)]
        team2: PathBuf,
        #[arg(long)]
        pitch: PathBuf,
        /// Ticks per half
        #[arg(long, default_value = "100")]
        ticks: u32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let mut engine = MatchEngine::with_config(ChaCha8Rng::seed_from_u64(cli.seed), config);

    match cli.command {
        Commands::Init { team1, team2, pitch, out } => {
            let team1: TeamInput = read_json(&team1)?;
            let team2: TeamInput = read_json(&team2)?;
            let pitch: Pitch = read_json(&pitch)?;
            let md = engine.initiate_game(team1, team2, pitch).context("match setup failed")?;
            print_log(&md);
            write_json(out.as_deref(), &md)?;
        }

        Commands::Tick { state, out } => {
            let mut md: MatchDetails = read_json(&state)?;
            engine.play_iteration(&mut md).context("tick failed")?;
            print_log(&md);
            write_json(out.as_deref(), &md)?;
        }

        Commands::SecondHalf { state, out } => {
            let mut md: MatchDetails = read_json(&state)?;
            engine.start_second_half(&mut md).context("second half failed")?;
            print_log(&md);
            write_json(out.as_deref(), &md)?;
        }

        Commands::Play { team1, team2, pitch, ticks, out } => {
            let team1: TeamInput = read_json(&team1)?;
            let team2: TeamInput = read_json(&team2)?;
            let pitch: Pitch = read_json(&pitch)?;
            let mut md = engine.initiate_game(team1, team2, pitch).context("match setup failed")?;
            print_log(&md);
            for half in 1..=2 {
                if half == 2 {
                    engine.start_second_half(&mut md).context("second half failed")?;
                    print_log(&md);
                }
                for tick in 0..ticks {
                    engine
                        .play_iteration(&mut md)
                        .with_context(|| format!("half {half}, tick {tick} failed"))?;
                    print_log(&md);
                }
            }
            print_summary(&md);
            write_json(out.as_deref(), &md)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let config = if is_json { EngineConfig::from_json_str(&text) } else { EngineConfig::from_yaml_str(&text) };
    config.with_context(|| format!("loading config {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn write_json<T: Serialize>(out: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("📄 Match saved to: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Log lines go to stderr so stdout stays a clean JSON document.
fn print_log(md: &MatchDetails) {
    for line in &md.iteration_log {
        eprintln!("   {line}");
    }
}

fn print_summary(md: &MatchDetails) {
    let home = &md.kick_off_team_statistics;
    let away = &md.second_team_statistics;
    eprintln!("\n✅ Full time");
    eprintln!("   {} {} - {} {}", md.kick_off_team.name, home.goals, away.goals, md.second_team.name);
    eprintln!("   Shots:   {} - {}", home.shots.total, away.shots.total);
    eprintln!("   Fouls:   {} - {}", home.fouls, away.fouls);
    eprintln!("   Corners: {} - {}", home.corners, away.corners);
}
