use anyhow::{anyhow, Context, Result};
use asteroids_cli::benchmark::{resolve_pilots, run_benchmark, BenchmarkConfig};
use asteroids_cli::pilots::{create_pilot, describe_pilots, pilot_ids};
use asteroids_cli::runner::{run_with_options, RunOptions};
use asteroids_cli::settings::{default_max_frames, load_config};
use asteroids_cli::util::{parse_seed, resolve_seeds, seed_to_hex, write_bytes};
use asteroids_core::tape::parse_tape;
use asteroids_core::verify_tape;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(name = "asteroids-cli")]
#[command(about = "Headless driver for the deterministic Asteroids simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one session with a scripted pilot
    Run {
        #[arg(long, default_value = "0xA57E0001")]
        seed: String,
        #[arg(long, default_value = "hunter")]
        pilot: String,
        /// Defaults to ASTEROIDS_MAX_FRAMES, then 30 minutes of play
        #[arg(long)]
        max_frames: Option<u32>,
        /// Pace the loop at the configured frame rate
        #[arg(long)]
        realtime: bool,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        tape_out: Option<PathBuf>,
        /// 1-based frame whose draw list is written as JSON
        #[arg(long)]
        dump_frame: Option<u32>,
        #[arg(long, requires = "dump_frame")]
        dump_out: Option<PathBuf>,
    },
    /// Verify a recorded input tape by replaying it
    Replay {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        max_frames: Option<u32>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run every pilot against every seed in parallel and rank the pilots
    Bench {
        #[arg(long)]
        pilots: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_file: Option<PathBuf>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 8)]
        seed_count: u32,
        #[arg(long, default_value_t = 18_000)]
        max_frames: u32,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = 3)]
        save_top: usize,
    },
    /// List available pilots
    ListPilots,
    /// Print the effective game config as JSON
    ShowConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            seed,
            pilot,
            max_frames,
            realtime,
            config,
            tape_out,
            dump_frame,
            dump_out,
        } => {
            if create_pilot(&pilot).is_none() {
                let available = pilot_ids().join(", ");
                return Err(anyhow!("unknown pilot '{pilot}'. available: {available}"));
            }
            let seed = parse_seed(&seed)?;
            let options = RunOptions {
                pilot_id: pilot,
                seed,
                max_frames: max_frames.unwrap_or_else(default_max_frames),
                config: load_config(config.as_deref())?,
                realtime,
                dump_frame,
            };
            let artifact = run_with_options(&options)?;
            let metrics = &artifact.metrics;

            println!("pilot={}", metrics.pilot_id);
            println!("seed={}", seed_to_hex(metrics.seed));
            println!("frames={}", metrics.frame_count);
            println!("score={}", metrics.final_score);
            println!("lives={}", metrics.final_lives);
            println!("state={}", metrics.final_state.as_str());
            println!("game_over={}", metrics.game_over);

            if let Some(path) = tape_out {
                write_bytes(&path, &artifact.tape)?;
                println!("tape={}", path.display());
            }

            if let Some(frame) = dump_frame {
                let commands = artifact.dumped_frame.ok_or_else(|| {
                    anyhow!("frame {frame} was never drawn (run ended at {})", metrics.frame_count)
                })?;
                let encoded = serde_json::to_vec_pretty(&commands)
                    .context("failed to serialize draw list")?;
                match dump_out {
                    Some(path) => {
                        write_bytes(&path, &encoded)?;
                        println!("dump={}", path.display());
                    }
                    None => println!("{}", String::from_utf8_lossy(&encoded)),
                }
            }
        }
        Commands::Replay {
            input,
            max_frames,
            config,
        } => {
            let max_frames = max_frames.unwrap_or_else(default_max_frames);
            let config = load_config(config.as_deref())?;
            let bytes =
                fs::read(&input).with_context(|| format!("failed reading {}", input.display()))?;
            let tape = parse_tape(&bytes, max_frames)
                .with_context(|| format!("malformed tape {}", input.display()))?;
            let report = verify_tape(&bytes, config, max_frames)
                .with_context(|| format!("tape {} failed verification", input.display()))?;

            println!("input={}", input.display());
            println!("seed={}", seed_to_hex(tape.header.seed));
            println!("frame_count={}", report.frame_count);
            println!("final_score={}", report.final_score);
            println!("final_lives={}", report.final_lives);
            println!("final_state={}", report.final_state.as_str());
            println!("tape_checksum={:#010x}", report.tape_checksum);
            println!("verified=true");
        }
        Commands::Bench {
            pilots,
            seeds,
            seed_file,
            seed_start,
            seed_count,
            max_frames,
            jobs,
            config,
            output,
            save_top,
        } => {
            let pilots = resolve_pilots(pilots.as_deref())?;
            if let Some(unknown) = pilots.iter().find(|id| create_pilot(id).is_none()) {
                let available = pilot_ids().join(", ");
                return Err(anyhow!("unknown pilot '{unknown}'. available: {available}"));
            }
            let seeds = resolve_seeds(
                seeds.as_deref(),
                seed_file.as_deref(),
                seed_start.as_deref(),
                seed_count,
            )?;
            let out_dir = output
                .unwrap_or_else(|| PathBuf::from(format!("benchmarks/bench-{}", timestamp_suffix())));

            let report = run_benchmark(BenchmarkConfig {
                pilots,
                seeds,
                max_frames,
                config: load_config(config.as_deref())?,
                out_dir: out_dir.clone(),
                save_top,
                jobs,
            })?;

            println!("runs={}", report.run_count);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("out_dir={}", out_dir.display());
            println!("rankings:");
            for (idx, pilot) in report.pilot_rankings.iter().enumerate() {
                println!(
                    "  {}. {}  avg_score={:.1} max_score={} avg_frames={:.1} avg_lives={:.2} survival={:.0}%",
                    idx + 1,
                    pilot.pilot_id,
                    pilot.avg_score,
                    pilot.max_score,
                    pilot.avg_frames,
                    pilot.avg_lives,
                    pilot.survival_rate * 100.0,
                );
            }

            if !report.saved_tapes.is_empty() {
                println!("saved tapes:");
            }
            for tape in &report.saved_tapes {
                println!(
                    "  [{} #{:02}] {} {} score={} frames={} lives={}",
                    tape.metric,
                    tape.rank,
                    tape.pilot_id,
                    tape.seed_hex,
                    tape.score,
                    tape.frames,
                    tape.lives,
                );
            }
        }
        Commands::ListPilots => {
            for (id, description) in describe_pilots() {
                println!("{id:10} {description}");
            }
        }
        Commands::ShowConfig { config } => {
            let config = load_config(config.as_deref())?;
            let encoded =
                serde_json::to_string_pretty(&config).context("failed to serialize config")?;
            println!("{encoded}");
        }
    }

    Ok(())
}

fn timestamp_suffix() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
