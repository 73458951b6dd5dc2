//! Record of a single automaton run.

use crate::core::{Classification, StateId};
use serde::{Deserialize, Serialize};

/// The states a run visited and how it ended.
///
/// The path always starts with the start state and gains one entry per
/// letter that moved the automaton, so `path().len() <= letters + 1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTrace {
    path: Vec<StateId>,
    outcome: Classification,
    consumed: usize,
    halted: bool,
}

impl RunTrace {
    pub(crate) fn new(
        path: Vec<StateId>,
        outcome: Classification,
        consumed: usize,
        halted: bool,
    ) -> Self {
        Self {
            path,
            outcome,
            consumed,
            halted,
        }
    }

    pub fn path(&self) -> &[StateId] {
        &self.path
    }

    pub fn outcome(&self) -> Classification {
        self.outcome
    }

    /// State the run was in when it ended.
    pub fn final_state(&self) -> Option<StateId> {
        self.path.last().copied()
    }

    /// Letters consumed, including one that triggered a halting fallback.
    pub fn letters_consumed(&self) -> usize {
        self.consumed
    }

    /// Number of resolution steps: one per consumed letter plus the final
    /// classification, unless a fallback ended the run.
    pub fn steps(&self) -> usize {
        if self.halted {
            self.consumed
        } else {
            self.consumed + 1
        }
    }

    /// Whether a `Reject`/`Accept` fallback cut the run short.
    pub fn halted_by_fallback(&self) -> bool {
        self.halted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_run_counts_final_classification() {
        let trace = RunTrace::new(vec![0, 1, 1], Classification::Accept, 2, false);
        assert_eq!(trace.steps(), 3);
        assert_eq!(trace.final_state(), Some(1));
        assert!(!trace.halted_by_fallback());
    }

    #[test]
    fn halted_run_stops_at_fallback() {
        let trace = RunTrace::new(vec![0], Classification::Reject, 1, true);
        assert_eq!(trace.steps(), 1);
        assert_eq!(trace.letters_consumed(), 1);
        assert_eq!(trace.path(), &[0]);
    }

    #[test]
    fn trace_serializes() {
        let trace = RunTrace::new(vec![0, 2], Classification::Accept, 1, false);
        let json = serde_json::to_string(&trace).unwrap();
        let back: RunTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, back);
    }
}
