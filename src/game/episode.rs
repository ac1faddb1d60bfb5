//! One playthrough from the starting position to a terminal state

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::{BoardState, Color};
use crate::{
    identifiers::EpisodeId,
    learning::{LearningStore, ReinforcementSummary},
    selector,
};

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalReason {
    /// A pawn reached the opponent's home row
    LastRankReached,
    /// The side to move had no legal move
    NoMovesLeft,
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalReason::LastRankReached => f.write_str("last rank reached"),
            TerminalReason::NoMovesLeft => f.write_str("no moves left"),
        }
    }
}

/// Winner of a finished episode and how it was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Color,
    pub reason: TerminalReason,
}

impl Outcome {
    pub fn new(winner: Color, reason: TerminalReason) -> Self {
        Outcome { winner, reason }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wins ({})", self.winner, self.reason)
    }
}

/// A legal successor offered to the selector
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub state: BoardState,
    pub weight: f64,
    /// Probability of being chosen this turn
    pub chance: f64,
    /// Whether the state was already pooled
    pub known: bool,
}

/// Everything observable about one call to [`Episode::advance`]
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub episode: EpisodeId,
    /// Number of moves played before this turn
    pub ply: usize,
    /// State the side to move faced
    pub current: BoardState,
    pub candidates: Vec<Candidate>,
    /// Index into `candidates` of the successor that was played
    pub chosen: Option<usize>,
    pub outcome: Option<Outcome>,
}

impl TurnReport {
    pub fn chosen_state(&self) -> Option<&BoardState> {
        self.chosen
            .and_then(|index| self.candidates.get(index))
            .map(|candidate| &candidate.state)
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}

/// A single simulated game.
///
/// The state history may begin with states carried over from a previous
/// episode; the states played in this episode start at `start`.
#[derive(Debug, Clone)]
pub struct Episode {
    id: EpisodeId,
    history: Vec<BoardState>,
    start: usize,
    started: bool,
    outcome: Option<Outcome>,
    reinforcement: Option<ReinforcementSummary>,
}

impl Episode {
    /// Start a fresh episode from the initial position
    pub fn new(id: EpisodeId) -> Self {
        Episode {
            id,
            history: vec![BoardState::initial()],
            start: 0,
            started: false,
            outcome: None,
            reinforcement: None,
        }
    }

    /// Start a new episode whose history continues from `previous`.
    ///
    /// Only the states `previous` played itself are carried, so the history
    /// holds at most two games no matter how long the chain runs.
    pub fn continuing(id: EpisodeId, previous: Episode) -> Self {
        let mut history = previous.history;
        history.drain(..previous.start);
        let start = history.len();
        history.push(BoardState::initial());
        Episode {
            id,
            history,
            start,
            started: false,
            outcome: None,
            reinforcement: None,
        }
    }

    pub fn id(&self) -> EpisodeId {
        self.id
    }

    pub fn current(&self) -> &BoardState {
        // history is never empty: constructors push the initial position
        &self.history[self.history.len() - 1]
    }

    /// Full history including carried-over states
    pub fn history(&self) -> &[BoardState] {
        &self.history
    }

    /// States played in this episode, starting with the initial position
    pub fn states(&self) -> &[BoardState] {
        &self.history[self.start..]
    }

    /// Moves played so far in this episode
    pub fn ply(&self) -> usize {
        self.states().len() - 1
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Update applied to the store when the episode ended
    pub fn reinforcement(&self) -> Option<ReinforcementSummary> {
        self.reinforcement
    }

    /// Play one turn.
    ///
    /// Checks the current state for a terminal condition first; on a
    /// terminal state the store is reinforced once and the outcome reported.
    /// Otherwise every legal successor is weighted from the store, one is
    /// drawn and adopted, and the turn passes. Calling this on a finished
    /// episode reports the outcome again without touching the store.
    pub fn advance<R: Rng>(&mut self, store: &mut LearningStore, rng: &mut R) -> TurnReport {
        let current = self.current().clone();
        let ply = self.ply();

        if let Some(outcome) = self.outcome {
            return self.report(current, ply, Vec::new(), None, Some(outcome));
        }

        if !self.started {
            store.record_visited(self.id, None, &current);
            self.started = true;
        }

        if let Some(winner) = current.winner_by_advance() {
            let outcome = Outcome::new(winner, TerminalReason::LastRankReached);
            return self.finish(store, current, ply, outcome);
        }

        let candidates: Vec<Candidate> = current
            .next_states()
            .map(|state| {
                let resolution = store.resolve(self.id, &state);
                Candidate {
                    state,
                    weight: resolution.weight,
                    chance: 0.0,
                    known: resolution.matched.is_some(),
                }
            })
            .collect();
        let weights: Vec<f64> = candidates.iter().map(|c| c.weight).collect();

        let Some(chosen) = selector::choose_index(rng, &weights) else {
            let outcome = Outcome::new(current.mover(), TerminalReason::NoMovesLeft);
            return self.finish(store, current, ply, outcome);
        };

        let candidates: Vec<Candidate> = candidates
            .into_iter()
            .zip(selector::chances(&weights))
            .map(|(candidate, chance)| Candidate { chance, ..candidate })
            .collect();

        let next = candidates[chosen].state.clone();
        store.record_visited(self.id, Some(&current.key()), &next);
        self.history.push(next);

        self.report(current, ply, candidates, Some(chosen), None)
    }

    /// Advance until the episode ends, passing every turn to `on_turn`
    pub fn play_out<R, F>(
        &mut self,
        store: &mut LearningStore,
        rng: &mut R,
        mut on_turn: F,
    ) -> Outcome
    where
        R: Rng,
        F: FnMut(&TurnReport),
    {
        loop {
            let report = self.advance(store, rng);
            on_turn(&report);
            if let Some(outcome) = report.outcome {
                return outcome;
            }
        }
    }

    fn finish(
        &mut self,
        store: &mut LearningStore,
        current: BoardState,
        ply: usize,
        outcome: Outcome,
    ) -> TurnReport {
        self.outcome = Some(outcome);
        self.reinforcement = Some(store.reinforce(self.id, outcome.winner));
        tracing::debug!(episode = %self.id, %outcome, plies = ply, "episode finished");
        self.report(current, ply, Vec::new(), None, Some(outcome))
    }

    fn report(
        &self,
        current: BoardState,
        ply: usize,
        candidates: Vec<Candidate>,
        chosen: Option<usize>,
        outcome: Option<Outcome>,
    ) -> TurnReport {
        TurnReport {
            episode: self.id,
            ply,
            current,
            candidates,
            chosen,
            outcome,
        }
    }
}
