//! Observer pattern for training pipelines
//!
//! Observers allow composable reporting during training without coupling
//! the episode loop to specific output formats.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{Color, Outcome, TerminalReason, TurnReport},
    identifiers::EpisodeId,
    ports::Observer,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    white_wins: usize,
    black_wins: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            white_wins: 0,
            black_wins: 0,
        }
    }

    fn message(&self) -> String {
        format!("W:{} B:{}", self.white_wins, self.black_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _episode: EpisodeId,
        outcome: Outcome,
        _plies: usize,
    ) -> Result<()> {
        match outcome.winner {
            Color::White => self.white_wins += 1,
            Color::Black => self.black_wins += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Tracing observer - Emits structured events for the run, each episode and each turn
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for TracingObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        tracing::info!(total_episodes, "training started");
        Ok(())
    }

    fn on_turn(&mut self, report: &TurnReport) -> Result<()> {
        if let Some(next) = report.chosen_state() {
            tracing::trace!(
                episode = %report.episode,
                ply = report.ply,
                from = %report.current,
                to = %next,
                candidates = report.candidates.len(),
                "turn played"
            );
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: EpisodeId, outcome: Outcome, plies: usize) -> Result<()> {
        tracing::debug!(
            %episode,
            winner = %outcome.winner,
            reason = %outcome.reason,
            plies,
            "episode finished"
        );
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        tracing::info!("training finished");
        Ok(())
    }
}

/// Aggregate statistics collected by [`MetricsObserver`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeMetrics {
    pub episodes: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub last_rank_wins: usize,
    pub no_moves_wins: usize,
    /// Moves per episode, in play order
    pub plies: Vec<usize>,
    /// Cumulative white win rate sampled every `interval` episodes
    pub white_win_rate_history: Vec<f64>,
}

impl EpisodeMetrics {
    pub fn white_win_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.white_wins as f64 / self.episodes as f64
        }
    }

    pub fn mean_plies(&self) -> f64 {
        if self.plies.is_empty() {
            0.0
        } else {
            self.plies.iter().sum::<usize>() as f64 / self.plies.len() as f64
        }
    }
}

/// Metrics observer - Tracks outcomes and episode lengths
///
/// The collected metrics stay readable through [`MetricsObserver::handle`]
/// after the observer has been moved into a pipeline.
pub struct MetricsObserver {
    metrics: Arc<Mutex<EpisodeMetrics>>,
    interval: usize,
}

impl MetricsObserver {
    /// Create a metrics observer sampling the win-rate history every `interval` episodes
    pub fn new(interval: usize) -> Self {
        Self {
            metrics: Arc::new(Mutex::new(EpisodeMetrics::default())),
            interval: interval.max(1),
        }
    }

    /// Get a shared handle to the collected metrics
    pub fn handle(&self) -> Arc<Mutex<EpisodeMetrics>> {
        Arc::clone(&self.metrics)
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _episode: EpisodeId,
        outcome: Outcome,
        plies: usize,
    ) -> Result<()> {
        let mut metrics = self
            .metrics
            .lock()
            .map_err(|_| crate::Error::ObserverPoisoned { observer: "metrics" })?;

        metrics.episodes += 1;
        metrics.plies.push(plies);
        match outcome.winner {
            Color::White => metrics.white_wins += 1,
            Color::Black => metrics.black_wins += 1,
        }
        match outcome.reason {
            TerminalReason::LastRankReached => metrics.last_rank_wins += 1,
            TerminalReason::NoMovesLeft => metrics.no_moves_wins += 1,
        }

        if metrics.episodes.is_multiple_of(self.interval) {
            let rate = metrics.white_win_rate();
            metrics.white_win_rate_history.push(rate);
        }
        Ok(())
    }
}
