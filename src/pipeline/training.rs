//! Multi-episode driver that carries the learning store forward

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{Color, Episode, TerminalReason},
    learning::{LearningParams, LearningStore},
    ports::Observer,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of episodes to simulate
    pub num_episodes: usize,

    /// Random seed
    pub seed: Option<u64>,

    /// Seed each episode's history with the previous episode's states
    pub carry_history: bool,

    /// Reinforcement constants for a freshly created store
    pub learning: LearningParams,

    /// Episodes between points of the white win-rate history
    pub history_interval: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 500,
            seed: None,
            carry_history: true,
            learning: LearningParams::default(),
            history_interval: 100,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    pub white_wins: usize,

    pub black_wins: usize,

    /// Episodes decided by a pawn reaching the far row
    pub last_rank_wins: usize,

    /// Episodes decided by the side to move being stuck
    pub no_moves_wins: usize,

    pub white_win_rate: f64,

    /// Mean number of moves per episode
    pub mean_plies: f64,

    /// Distinct states in the store after the run
    pub distinct_states: usize,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

#[derive(Debug, Default)]
struct Tally {
    episodes: usize,
    white_wins: usize,
    black_wins: usize,
    last_rank_wins: usize,
    no_moves_wins: usize,
    plies: usize,
}

impl Tally {
    fn into_result(self, distinct_states: usize) -> TrainingResult {
        let rate = |count: usize| {
            if self.episodes > 0 {
                count as f64 / self.episodes as f64
            } else {
                0.0
            }
        };

        TrainingResult {
            total_episodes: self.episodes,
            white_wins: self.white_wins,
            black_wins: self.black_wins,
            last_rank_wins: self.last_rank_wins,
            no_moves_wins: self.no_moves_wins,
            white_win_rate: rate(self.white_wins),
            mean_plies: rate(self.plies),
            distinct_states,
        }
    }
}

/// Runs consecutive self-play episodes against one learning store
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Build a store from the configured learning constants
    pub fn create_store(&self) -> Result<LearningStore> {
        LearningStore::new(self.config.learning)
    }

    /// Play the configured number of episodes, reinforcing `store` after each.
    ///
    /// Episode ids continue from the newest id already present in the store,
    /// so a store can be carried across several runs.
    pub fn run(&mut self, store: &mut LearningStore) -> Result<TrainingResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let mut tally = Tally::default();
        let mut episode_id = store.latest_generation();
        let mut previous: Option<Episode> = None;

        for _ in 0..self.config.num_episodes {
            episode_id = episode_id.next();
            for observer in &mut self.observers {
                observer.on_episode_start(episode_id)?;
            }

            let mut episode = match previous.take() {
                Some(prior) if self.config.carry_history => Episode::continuing(episode_id, prior),
                _ => Episode::new(episode_id),
            };

            let outcome = loop {
                let report = episode.advance(store, &mut rng);
                for observer in &mut self.observers {
                    observer.on_turn(&report)?;
                }
                if let Some(outcome) = report.outcome {
                    break outcome;
                }
            };

            tally.episodes += 1;
            tally.plies += episode.ply();
            match outcome.winner {
                Color::White => tally.white_wins += 1,
                Color::Black => tally.black_wins += 1,
            }
            match outcome.reason {
                TerminalReason::LastRankReached => tally.last_rank_wins += 1,
                TerminalReason::NoMovesLeft => tally.no_moves_wins += 1,
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode_id, outcome, episode.ply())?;
            }

            previous = Some(episode);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(tally.into_result(store.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_reports_zero_rates() {
        let config = TrainingConfig {
            num_episodes: 0,
            seed: Some(1),
            ..TrainingConfig::default()
        };
        let mut pipeline = TrainingPipeline::new(config);
        let mut store = pipeline.create_store().unwrap();
        let result = pipeline.run(&mut store).unwrap();

        assert_eq!(result.total_episodes, 0);
        assert_eq!(result.white_win_rate, 0.0);
        assert_eq!(result.mean_plies, 0.0);
        assert_eq!(result.distinct_states, 0);
    }
}
