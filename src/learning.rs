//! Cross-episode pool of visited states and their preference weights.
//!
//! Every distinct [`BoardState`] the simulation adopts is pooled once, keyed
//! by its [`StateKey`]. A record carries the state's weight and the id of the
//! episode that last touched it. At the end of an episode every record tagged
//! with that episode is rewarded if its mover won and penalised otherwise.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    game::{BoardState, Color},
    identifiers::{EpisodeId, StateKey},
    types::Weight,
};

/// Constants of the reinforcement rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningParams {
    /// Weight given to a state seen for the first time
    pub initial_weight: f64,
    /// Amount added on a win and subtracted on a loss
    pub reward: f64,
    /// Lowest weight a state can fall to
    pub floor: f64,
}

impl LearningParams {
    pub const DEFAULT_INITIAL_WEIGHT: f64 = 1.0;
    pub const DEFAULT_REWARD: f64 = 0.1;
    pub const DEFAULT_FLOOR: f64 = 0.1;

    /// Check the constants describe a usable rule.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidLearningParam`] if any value is not
    /// finite, the reward is negative, the floor is not positive, or the
    /// initial weight is below the floor.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let invalid = |name, value, reason| crate::Error::InvalidLearningParam {
            name,
            value,
            reason,
        };

        for (name, value) in [
            ("initial_weight", self.initial_weight),
            ("reward", self.reward),
            ("floor", self.floor),
        ] {
            if !value.is_finite() {
                return Err(invalid(name, value, "must be finite"));
            }
        }
        if self.reward < 0.0 {
            return Err(invalid("reward", self.reward, "must be non-negative"));
        }
        if self.floor <= 0.0 {
            return Err(invalid("floor", self.floor, "must be positive"));
        }
        if self.initial_weight < self.floor {
            return Err(invalid(
                "initial_weight",
                self.initial_weight,
                "must not be below the floor",
            ));
        }
        Ok(())
    }
}

impl Default for LearningParams {
    fn default() -> Self {
        LearningParams {
            initial_weight: Self::DEFAULT_INITIAL_WEIGHT,
            reward: Self::DEFAULT_REWARD,
            floor: Self::DEFAULT_FLOOR,
        }
    }
}

/// A pooled state with its learned weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    state: BoardState,
    weight: Weight,
    generation: EpisodeId,
}

impl StateRecord {
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn weight(&self) -> f64 {
        self.weight.value()
    }

    /// Episode that last touched this state
    pub fn generation(&self) -> EpisodeId {
        self.generation
    }

    /// Side credited with this state: the one that moved into it
    pub fn mover(&self) -> Color {
        self.state.mover()
    }
}

/// Result of looking a candidate up in the pool
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Current weight, or the initial weight for unseen states
    pub weight: f64,
    /// Key of the existing record, if the candidate was already pooled
    pub matched: Option<StateKey>,
}

/// What one end-of-episode update did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReinforcementSummary {
    pub rewarded: usize,
    pub penalized: usize,
    /// Penalised states that ended at the floor
    pub floored: usize,
}

/// Pool of every distinct state seen during the life of the process
#[derive(Debug, Clone)]
pub struct LearningStore {
    params: LearningParams,
    initial: Weight,
    records: HashMap<StateKey, StateRecord>,
    order: Vec<StateKey>,
}

impl LearningStore {
    /// Create an empty store.
    ///
    /// # Errors
    ///
    /// Returns error if `params` fail [`LearningParams::validate`].
    pub fn new(params: LearningParams) -> Result<Self, crate::Error> {
        params.validate()?;
        Ok(LearningStore {
            params,
            initial: Weight::new(params.initial_weight)?,
            records: HashMap::new(),
            order: Vec::new(),
        })
    }

    pub fn params(&self) -> LearningParams {
        self.params
    }

    /// Look a candidate up, stamping a matching record with `episode`.
    pub fn resolve(&mut self, episode: EpisodeId, candidate: &BoardState) -> Resolution {
        let key = candidate.key();
        match self.records.get_mut(&key) {
            Some(record) => {
                record.generation = episode;
                Resolution {
                    weight: record.weight.value(),
                    matched: Some(key),
                }
            }
            None => Resolution {
                weight: self.initial.value(),
                matched: None,
            },
        }
    }

    /// Current weight of a state without touching it
    pub fn weight_of(&self, state: &BoardState) -> f64 {
        self.records
            .get(state.key().as_str())
            .map_or(self.initial.value(), StateRecord::weight)
    }

    /// Adopt a state chosen during `episode`.
    ///
    /// A state already in the pool keeps its weight and is re-tagged. A new
    /// state is inserted right after `after` in play order (at the end when
    /// `after` is `None` or unknown).
    pub fn record_visited(
        &mut self,
        episode: EpisodeId,
        after: Option<&StateKey>,
        state: &BoardState,
    ) -> StateKey {
        let key = state.key();
        if let Some(record) = self.records.get_mut(&key) {
            record.generation = episode;
            return key;
        }

        let index = after
            .and_then(|pointer| self.order.iter().position(|k| k == pointer))
            .map_or(self.order.len(), |i| i + 1);
        self.order.insert(index, key.clone());
        self.records.insert(
            key.clone(),
            StateRecord {
                state: state.clone(),
                weight: self.initial,
                generation: episode,
            },
        );
        tracing::trace!(state = %key, %episode, pooled = self.order.len(), "pooled new state");
        key
    }

    /// Reward states moved into by `winner` and penalise the rest, for every
    /// record tagged with `episode`.
    pub fn reinforce(&mut self, episode: EpisodeId, winner: Color) -> ReinforcementSummary {
        let LearningParams { reward, floor, .. } = self.params;
        let mut summary = ReinforcementSummary::default();

        for record in self
            .records
            .values_mut()
            .filter(|record| record.generation == episode)
        {
            if record.mover() == winner {
                record.weight.raise(reward);
                summary.rewarded += 1;
            } else {
                summary.penalized += 1;
                if record.weight.lower(reward, floor) {
                    summary.floored += 1;
                }
            }
        }

        tracing::debug!(
            %episode,
            %winner,
            rewarded = summary.rewarded,
            penalized = summary.penalized,
            floored = summary.floored,
            "reinforced episode"
        );
        summary
    }

    pub fn get(&self, key: &StateKey) -> Option<&StateRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, state: &BoardState) -> bool {
        self.records.contains_key(state.key().as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Pooled records in play order
    pub fn iter(&self) -> impl Iterator<Item = &StateRecord> + '_ {
        self.order.iter().filter_map(|key| self.records.get(key))
    }

    /// Records last touched by `episode`
    pub fn touched_by(&self, episode: EpisodeId) -> impl Iterator<Item = &StateRecord> + '_ {
        self.iter().filter(move |record| record.generation == episode)
    }

    /// Most recent episode id found on any record
    pub fn latest_generation(&self) -> EpisodeId {
        self.records
            .values()
            .map(|record| record.generation)
            .max()
            .unwrap_or(EpisodeId::NONE)
    }

    /// Forget everything learned
    pub fn reset(&mut self) {
        self.records.clear();
        self.order.clear();
    }
}

impl Default for LearningStore {
    fn default() -> Self {
        LearningStore {
            params: LearningParams::default(),
            initial: Weight::default(),
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}
