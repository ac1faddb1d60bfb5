//! Domain identifier types for pooled states and episodes.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Content address of a board state in the learning store.
///
/// Built from the board label, so two structurally equal states always map
/// to the same key regardless of how their pieces were listed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Create a new state key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexapawn::identifiers::StateKey;
    ///
    /// let key = StateKey::new("BBB...WWW_W");
    /// assert_eq!(key.as_str(), "BBB...WWW_W");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for StateKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Borrow<str> for StateKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Identifier of one simulated game, issued by the driver.
///
/// Pooled states are tagged with the id of the episode that last touched
/// them; `EpisodeId::NONE` marks a state no episode has touched yet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct EpisodeId(u64);

impl EpisodeId {
    pub const NONE: EpisodeId = EpisodeId(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id issued after this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
