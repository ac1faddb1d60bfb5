//! Train command - Run self-play episodes and reinforce visited states

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    cli::{
        config::{LearningOverrides, load_training_config},
        output::{
            format_number, print_kv, print_section, print_strongest_states, print_subsection,
        },
    },
    pipeline::{
        MetricsObserver, ProgressObserver, TracingObserver, TrainingConfig, TrainingPipeline,
    },
};

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Simulate self-play episodes and learn from their outcomes")]
pub struct TrainArgs {
    /// Number of episodes to simulate
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with training configuration (flags override it)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Start every episode with an empty history
    #[arg(long, default_value_t = false)]
    pub no_carry_history: bool,

    /// Weight added on a win and removed on a loss
    #[arg(long)]
    pub reward: Option<f64>,

    /// Lowest weight a state can fall to
    #[arg(long)]
    pub floor: Option<f64>,

    /// Weight of a state seen for the first time
    #[arg(long)]
    pub initial_weight: Option<f64>,

    /// Episodes between points of the win-rate history
    #[arg(long)]
    pub history_interval: Option<usize>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Number of heaviest states to list after training
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

impl TrainArgs {
    fn training_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => load_training_config(path)?,
            None => TrainingConfig::default(),
        };

        if let Some(games) = self.games {
            config.num_episodes = games;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_carry_history {
            config.carry_history = false;
        }
        if let Some(interval) = self.history_interval {
            if interval == 0 {
                return Err(anyhow!("--history-interval must be at least 1"));
            }
            config.history_interval = interval;
        }

        let overrides = LearningOverrides {
            initial_weight: self.initial_weight,
            reward: self.reward,
            floor: self.floor,
        };
        config.learning = overrides.apply(config.learning)?;
        Ok(config)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.training_config()?;

    let metrics = MetricsObserver::new(config.history_interval);
    let metrics_handle = metrics.handle();

    let mut pipeline = TrainingPipeline::new(config.clone())
        .with_observer(Box::new(TracingObserver::new()))
        .with_observer(Box::new(metrics));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let mut store = pipeline.create_store()?;
    let result = pipeline.run(&mut store)?;

    print_section("Training Summary");
    print_kv("Episodes", &format_number(result.total_episodes));
    print_kv("White wins", &format_number(result.white_wins));
    print_kv("Black wins", &format_number(result.black_wins));
    print_kv("Last rank reached", &format_number(result.last_rank_wins));
    print_kv("No moves left", &format_number(result.no_moves_wins));
    print_kv(
        "White win rate",
        &format!("{:.1}%", result.white_win_rate * 100.0),
    );
    print_kv("Mean plies", &format!("{:.2}", result.mean_plies));
    print_kv("Distinct states", &format_number(result.distinct_states));
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let metrics = metrics_handle
        .lock()
        .map_err(|_| anyhow!("metrics observer state is poisoned"))?;
    if !metrics.white_win_rate_history.is_empty() {
        print_subsection(&format!(
            "White win rate every {} episodes",
            config.history_interval
        ));
        for (index, rate) in metrics.white_win_rate_history.iter().enumerate() {
            print_kv(
                &format!("after {}", (index + 1) * config.history_interval),
                &format!("{:.1}%", rate * 100.0),
            );
        }
    }

    if args.top > 0 && !store.is_empty() {
        print_subsection("Heaviest states");
        print_strongest_states(&store, args.top);
    }

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        result
            .save(&path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
