use crate::pilots::pilot_ids;
use crate::runner::{run_with_options, RunMetrics, RunOptions};
use crate::util::seed_to_hex;
use anyhow::{anyhow, Context, Result};
use asteroids_core::GameConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub max_frames: u32,
    pub config: GameConfig,
    pub out_dir: PathBuf,
    pub save_top: usize,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub pilot_id: String,
    pub seed: u32,
    pub seed_hex: String,
    pub frame_count: u32,
    pub final_score: u32,
    pub final_lives: i32,
    pub game_over: bool,
    pub action_frames: u32,
    pub turn_frames: u32,
    pub thrust_frames: u32,
    pub fire_frames: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PilotAggregate {
    pub pilot_id: String,
    pub runs: usize,
    pub avg_score: f64,
    pub max_score: u32,
    pub avg_frames: f64,
    pub max_frames: u32,
    pub avg_lives: f64,
    pub min_lives: i32,
    pub survival_rate: f64,
    pub avg_action_frames: f64,
    pub avg_fire_frames: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedTapeRecord {
    pub rank: usize,
    pub metric: String,
    pub pilot_id: String,
    pub seed: u32,
    pub seed_hex: String,
    pub score: u32,
    pub frames: u32,
    pub lives: i32,
    pub path: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_frames: u32,
    pub jobs: Option<usize>,
    pub config: GameConfig,
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub pilot_rankings: Vec<PilotAggregate>,
    pub runs: Vec<RunRecord>,
    pub saved_tapes: Vec<SavedTapeRecord>,
}

#[derive(Clone, Debug)]
struct InternalRun {
    metrics: RunMetrics,
    tape: Vec<u8>,
}

/// Comma separated pilot ids, or every registered pilot when absent.
pub fn resolve_pilots(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(pilot_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let pilots: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            if pilots.is_empty() {
                return Err(anyhow!("--pilots resolved to empty list"));
            }
            Ok(pilots)
        }
    }
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.pilots.is_empty() {
        return Err(anyhow!("benchmark requires at least one pilot"));
    }
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let run_jobs: Vec<(String, u32)> = config
        .pilots
        .iter()
        .flat_map(|pilot| config.seeds.iter().map(move |seed| (pilot.clone(), *seed)))
        .collect();

    tracing::info!(
        runs = run_jobs.len(),
        max_frames = config.max_frames,
        "benchmark started"
    );

    let run_one = |(pilot_id, seed): &(String, u32)| -> Result<InternalRun> {
        let options = RunOptions {
            config: config.config,
            ..RunOptions::headless(pilot_id, *seed, config.max_frames)
        };
        let artifact = run_with_options(&options).with_context(|| {
            format!("benchmark run failed for pilot={pilot_id} seed={seed:#x}")
        })?;
        Ok(InternalRun {
            metrics: artifact.metrics,
            tape: artifact.tape,
        })
    };

    let run_results: Vec<Result<InternalRun>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let runs = run_results.into_iter().collect::<Result<Vec<_>>>()?;

    let rankings = rank_pilots(&runs, config.max_frames);

    let mut run_records: Vec<RunRecord> = runs
        .iter()
        .map(|run| RunRecord {
            pilot_id: run.metrics.pilot_id.clone(),
            seed: run.metrics.seed,
            seed_hex: seed_to_hex(run.metrics.seed),
            frame_count: run.metrics.frame_count,
            final_score: run.metrics.final_score,
            final_lives: run.metrics.final_lives,
            game_over: run.metrics.game_over,
            action_frames: run.metrics.action_frames,
            turn_frames: run.metrics.turn_frames,
            thrust_frames: run.metrics.thrust_frames,
            fire_frames: run.metrics.fire_frames,
        })
        .collect();

    run_records.sort_by(|a, b| {
        b.final_score
            .cmp(&a.final_score)
            .then_with(|| b.frame_count.cmp(&a.frame_count))
            .then_with(|| a.pilot_id.cmp(&b.pilot_id))
            .then_with(|| a.seed.cmp(&b.seed))
    });

    let mut saved_tapes = Vec::new();
    if config.save_top > 0 {
        save_top_tapes(
            &config.out_dir,
            &runs,
            "score",
            config.save_top,
            |run| run.metrics.final_score as f64,
            &mut saved_tapes,
        )?;
        save_top_tapes(
            &config.out_dir,
            &runs,
            "survival",
            config.save_top,
            |run| run.metrics.frame_count as f64 + run.metrics.final_lives.max(0) as f64,
            &mut saved_tapes,
        )?;
    }

    write_runs_csv(&config.out_dir.join("runs.csv"), &run_records)?;
    write_rankings_csv(&config.out_dir.join("rankings.csv"), &rankings)?;

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_frames: config.max_frames,
        jobs: config.jobs,
        config: config.config,
        pilots: config.pilots,
        seeds: config.seeds,
        run_count: run_records.len(),
        pilot_rankings: rankings,
        runs: run_records,
        saved_tapes,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;

    tracing::info!(path = %report_path.display(), "benchmark report written");
    Ok(report)
}

/// Best average score first; average survival breaks ties.
fn rank_pilots(runs: &[InternalRun], max_frames: u32) -> Vec<PilotAggregate> {
    let mut grouped: HashMap<&str, Vec<&InternalRun>> = HashMap::new();
    for run in runs {
        grouped
            .entry(run.metrics.pilot_id.as_str())
            .or_default()
            .push(run);
    }

    let mut rankings: Vec<PilotAggregate> = grouped
        .into_iter()
        .map(|(pilot_id, pilot_runs)| {
            let count = pilot_runs.len() as f64;
            let avg = |value: fn(&RunMetrics) -> f64| {
                pilot_runs.iter().map(|r| value(&r.metrics)).sum::<f64>() / count
            };
            let survived = pilot_runs
                .iter()
                .filter(|r| !r.metrics.game_over && r.metrics.frame_count >= max_frames)
                .count();

            PilotAggregate {
                pilot_id: pilot_id.to_string(),
                runs: pilot_runs.len(),
                avg_score: avg(|m| m.final_score as f64),
                max_score: pilot_runs
                    .iter()
                    .map(|r| r.metrics.final_score)
                    .max()
                    .unwrap_or_default(),
                avg_frames: avg(|m| m.frame_count as f64),
                max_frames: pilot_runs
                    .iter()
                    .map(|r| r.metrics.frame_count)
                    .max()
                    .unwrap_or_default(),
                avg_lives: avg(|m| m.final_lives as f64),
                min_lives: pilot_runs
                    .iter()
                    .map(|r| r.metrics.final_lives)
                    .min()
                    .unwrap_or_default(),
                survival_rate: survived as f64 / count,
                avg_action_frames: avg(|m| m.action_frames as f64),
                avg_fire_frames: avg(|m| m.fire_frames as f64),
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.avg_score
            .total_cmp(&a.avg_score)
            .then_with(|| b.avg_frames.total_cmp(&a.avg_frames))
            .then_with(|| a.pilot_id.cmp(&b.pilot_id))
    });
    rankings
}

fn save_top_tapes<F>(
    out_dir: &Path,
    runs: &[InternalRun],
    metric_name: &str,
    count: usize,
    metric: F,
    saved_tapes: &mut Vec<SavedTapeRecord>,
) -> Result<()>
where
    F: Fn(&InternalRun) -> f64,
{
    let mut order: Vec<&InternalRun> = runs.iter().collect();
    order.sort_by(|a, b| {
        metric(b)
            .total_cmp(&metric(a))
            .then_with(|| b.metrics.final_score.cmp(&a.metrics.final_score))
            .then_with(|| a.metrics.seed.cmp(&b.metrics.seed))
    });

    let save_dir = out_dir.join(format!("top-{metric_name}"));
    fs::create_dir_all(&save_dir)
        .with_context(|| format!("failed creating {}", save_dir.display()))?;

    for (idx, run) in order.into_iter().take(count).enumerate() {
        let rank = idx + 1;
        let base = format!(
            "rank{rank:02}-{}-seed{:08x}-score{}-frames{}",
            run.metrics.pilot_id, run.metrics.seed, run.metrics.final_score, run.metrics.frame_count
        );
        let tape_path = save_dir.join(format!("{base}.tape"));
        fs::write(&tape_path, &run.tape)
            .with_context(|| format!("failed writing {}", tape_path.display()))?;

        let meta_path = save_dir.join(format!("{base}.json"));
        fs::write(
            &meta_path,
            serde_json::to_vec_pretty(&run.metrics).context("failed to serialize tape metadata")?,
        )
        .with_context(|| format!("failed writing {}", meta_path.display()))?;

        saved_tapes.push(SavedTapeRecord {
            rank,
            metric: metric_name.to_string(),
            pilot_id: run.metrics.pilot_id.clone(),
            seed: run.metrics.seed,
            seed_hex: seed_to_hex(run.metrics.seed),
            score: run.metrics.final_score,
            frames: run.metrics.frame_count,
            lives: run.metrics.final_lives,
            path: tape_path.to_string_lossy().into_owned(),
        });
    }

    Ok(())
}

fn write_runs_csv(path: &Path, rows: &[RunRecord]) -> Result<()> {
    let mut csv = String::from(
        "pilot_id,seed_hex,seed,frame_count,final_score,final_lives,game_over,action_frames,turn_frames,thrust_frames,fire_frames\n",
    );
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{}\n",
            row.pilot_id,
            row.seed_hex,
            row.seed,
            row.frame_count,
            row.final_score,
            row.final_lives,
            row.game_over,
            row.action_frames,
            row.turn_frames,
            row.thrust_frames,
            row.fire_frames
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}

fn write_rankings_csv(path: &Path, rows: &[PilotAggregate]) -> Result<()> {
    let mut csv = String::from(
        "rank,pilot_id,runs,avg_score,max_score,avg_frames,max_frames,avg_lives,min_lives,survival_rate,avg_action_frames,avg_fire_frames\n",
    );
    for (idx, row) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{:.2},{},{:.2},{},{:.2},{},{:.4},{:.2},{:.2}\n",
            idx + 1,
            row.pilot_id,
            row.runs,
            row.avg_score,
            row.max_score,
            row.avg_frames,
            row.max_frames,
            row.avg_lives,
            row.min_lives,
            row.survival_rate,
            row.avg_action_frames,
            row.avg_fire_frames
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}
