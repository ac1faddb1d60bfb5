//! Observer port - abstraction for watching simulated episodes
//!
//! This port defines the interface for observing training events,
//! allowing composable reporting without coupling the driver loop to
//! specific output formats or metrics.

use crate::{
    Result,
    game::{Outcome, TurnReport},
    identifiers::EpisodeId,
};

/// Observer trait for monitoring a training run
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_turn(report)` - For each turn, including the terminal one
///    - `on_episode_end(episode, outcome, plies)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use hexapawn::{
///     game::Outcome,
///     identifiers::EpisodeId,
///     ports::Observer,
/// };
///
/// struct CountingObserver {
///     episodes: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_episode_end(
///         &mut self,
///         _episode: EpisodeId,
///         _outcome: Outcome,
///         _plies: usize,
///     ) -> hexapawn::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called before an episode's first turn.
    fn on_episode_start(&mut self, _episode: EpisodeId) -> Result<()> {
        Ok(())
    }

    /// Called after every turn, with the candidates and their chances.
    fn on_turn(&mut self, _report: &TurnReport) -> Result<()> {
        Ok(())
    }

    /// Called after the store has been reinforced for a finished episode.
    ///
    /// `plies` is the number of moves played in the episode.
    fn on_episode_end(
        &mut self,
        _episode: EpisodeId,
        _outcome: Outcome,
        _plies: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
