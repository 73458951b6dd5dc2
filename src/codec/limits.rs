//! Resource limits applied while decoding untrusted input.

use serde::{Deserialize, Serialize};

/// Upper bounds on the sizes a decoded automaton may declare.
///
/// Each limit is checked against the declared count before anything is
/// allocated for it.
///
/// # Example
///
/// ```
/// use dfa_interchange::codec::DecodeLimits;
///
/// let limits = DecodeLimits::new().max_states(1_000).max_letter_width(16);
/// assert_eq!(limits.states(), 1_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    pub(crate) max_states: u64,
    pub(crate) max_alphabet_entries: u64,
    pub(crate) max_letter_width: u64,
    pub(crate) max_names_per_state: u64,
    pub(crate) max_name_len: u64,
    pub(crate) max_transitions_per_state: u64,
}

impl DecodeLimits {
    /// Default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// No limits beyond what the input length itself allows.
    pub fn unlimited() -> Self {
        Self {
            max_states: u64::MAX,
            max_alphabet_entries: u64::MAX,
            max_letter_width: u64::MAX,
            max_names_per_state: u64::MAX,
            max_name_len: u64::MAX,
            max_transitions_per_state: u64::MAX,
        }
    }

    /// Cap the declared state count.
    pub fn max_states(mut self, limit: u64) -> Self {
        self.max_states = limit;
        self
    }

    /// Cap the number of custom table entries.
    pub fn max_alphabet_entries(mut self, limit: u64) -> Self {
        self.max_alphabet_entries = limit;
        self
    }

    /// Cap the byte width of a custom letter.
    pub fn max_letter_width(mut self, limit: u64) -> Self {
        self.max_letter_width = limit;
        self
    }

    /// Cap the number of names on one state.
    pub fn max_names_per_state(mut self, limit: u64) -> Self {
        self.max_names_per_state = limit;
        self
    }

    /// Cap the byte length of a state name.
    pub fn max_name_len(mut self, limit: u64) -> Self {
        self.max_name_len = limit;
        self
    }

    /// Cap the explicit transitions out of one state.
    pub fn max_transitions_per_state(mut self, limit: u64) -> Self {
        self.max_transitions_per_state = limit;
        self
    }

    /// Maximum state count.
    pub fn states(&self) -> u64 {
        self.max_states
    }

    /// Maximum custom table entries.
    pub fn alphabet_entries(&self) -> u64 {
        self.max_alphabet_entries
    }

    /// Maximum custom letter width.
    pub fn letter_width(&self) -> u64 {
        self.max_letter_width
    }

    /// Maximum names per state.
    pub fn names_per_state(&self) -> u64 {
        self.max_names_per_state
    }

    /// Maximum state name length.
    pub fn name_len(&self) -> u64 {
        self.max_name_len
    }

    /// Maximum explicit transitions per state.
    pub fn transitions_per_state(&self) -> u64 {
        self.max_transitions_per_state
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_states: 1 << 24,
            max_alphabet_entries: 1 << 24,
            max_letter_width: 1 << 16,
            max_names_per_state: 1 << 10,
            max_name_len: 1 << 16,
            max_transitions_per_state: 1 << 24,
        }
    }
}
