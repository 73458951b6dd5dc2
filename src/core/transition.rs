//! Transition functions and the policy for letters without an explicit
//! transition.

use super::alphabet::LetterId;
use super::error::{StateError, UnknownTag};
use super::state::StateId;
use super::termination::Classification;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What happens when a state has no explicit transition for a letter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnknownPolicy {
    /// Stop the run and reject
    #[default]
    Reject,
    /// Stop the run and accept
    Accept,
    /// Consume the letter and move to `target`
    Goto { target: StateId },
}

impl UnknownPolicy {
    pub fn tag(self) -> u8 {
        self.kind().tag()
    }

    pub fn kind(self) -> PolicyKind {
        match self {
            Self::Reject => PolicyKind::Reject,
            Self::Accept => PolicyKind::Accept,
            Self::Goto { .. } => PolicyKind::Goto,
        }
    }
}

/// Payload-free discriminant of [`UnknownPolicy`], as tagged on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Reject,
    Accept,
    Goto,
}

impl PolicyKind {
    pub fn tag(self) -> u8 {
        match self {
            Self::Reject => 0x01,
            Self::Accept => 0x02,
            Self::Goto => 0x03,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, UnknownTag> {
        match tag {
            0x01 => Ok(Self::Reject),
            0x02 => Ok(Self::Accept),
            0x03 => Ok(Self::Goto),
            _ => Err(UnknownTag {
                kind: "fallback",
                tag,
            }),
        }
    }
}

/// Result of feeding one letter to one state.
///
/// Either way, exactly one letter has been consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Continue from this state
    Next(StateId),
    /// The fallback ended the run with this classification
    Halt(Classification),
}

/// Transitions out of a single state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionFunction {
    explicit: BTreeMap<LetterId, StateId>,
    fallback: UnknownPolicy,
}

impl TransitionFunction {
    pub fn new(explicit: BTreeMap<LetterId, StateId>, fallback: UnknownPolicy) -> Self {
        Self { explicit, fallback }
    }

    pub fn explicit(&self) -> &BTreeMap<LetterId, StateId> {
        &self.explicit
    }

    pub fn fallback(&self) -> UnknownPolicy {
        self.fallback
    }

    /// Explicit destination if there is one, otherwise the fallback.
    ///
    /// A `Goto` fallback is a single move, never followed further for the
    /// same letter.
    pub fn resolve(&self, letter: LetterId) -> Resolution {
        if let Some(&to) = self.explicit.get(&letter) {
            return Resolution::Next(to);
        }
        match self.fallback {
            UnknownPolicy::Reject => Resolution::Halt(Classification::Reject),
            UnknownPolicy::Accept => Resolution::Halt(Classification::Accept),
            UnknownPolicy::Goto { target } => Resolution::Next(target),
        }
    }
}

/// One transition function per state, indexed by state id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionTable {
    functions: Vec<TransitionFunction>,
}

impl TransitionTable {
    pub fn new(functions: Vec<TransitionFunction>) -> Self {
        Self { functions }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn function(&self, state: StateId) -> Result<&TransitionFunction, StateError> {
        usize::try_from(state)
            .ok()
            .and_then(|index| self.functions.get(index))
            .ok_or(StateError::InvalidState {
                state,
                num_states: self.functions.len() as u64,
            })
    }

    pub fn resolve(&self, state: StateId, letter: LetterId) -> Result<Resolution, StateError> {
        self.function(state).map(|function| function.resolve(letter))
    }

    pub(crate) fn into_functions(self) -> Vec<TransitionFunction> {
        self.functions
    }

    /// Functions paired with their source state, in state order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &TransitionFunction)> {
        (0..).zip(self.functions.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(pairs: &[(LetterId, StateId)], fallback: UnknownPolicy) -> TransitionFunction {
        TransitionFunction::new(pairs.iter().copied().collect(), fallback)
    }

    #[test]
    fn explicit_transition_wins_over_fallback() {
        let f = function(&[(65, 1)], UnknownPolicy::Goto { target: 2 });
        assert_eq!(f.resolve(65), Resolution::Next(1));
        assert_eq!(f.resolve(66), Resolution::Next(2));
    }

    #[test]
    fn reject_and_accept_fallbacks_halt() {
        assert_eq!(
            function(&[], UnknownPolicy::Reject).resolve(0),
            Resolution::Halt(Classification::Reject)
        );
        assert_eq!(
            function(&[], UnknownPolicy::Accept).resolve(0),
            Resolution::Halt(Classification::Accept)
        );
    }

    #[test]
    fn goto_cycle_moves_once_per_letter() {
        let table = TransitionTable::new(vec![
            function(&[], UnknownPolicy::Goto { target: 1 }),
            function(&[], UnknownPolicy::Goto { target: 0 }),
        ]);

        assert_eq!(table.resolve(0, 9), Ok(Resolution::Next(1)));
        assert_eq!(table.resolve(1, 9), Ok(Resolution::Next(0)));
    }

    #[test]
    fn resolve_rejects_unknown_states() {
        let table = TransitionTable::new(vec![TransitionFunction::default()]);
        assert_eq!(
            table.resolve(1, 0),
            Err(StateError::InvalidState {
                state: 1,
                num_states: 1
            })
        );
    }

    #[test]
    fn policy_tags_are_closed() {
        for kind in [PolicyKind::Reject, PolicyKind::Accept, PolicyKind::Goto] {
            assert_eq!(PolicyKind::from_tag(kind.tag()), Ok(kind));
        }
        assert!(PolicyKind::from_tag(0x04).is_err());
        assert_eq!(UnknownPolicy::Goto { target: 3 }.tag(), 0x03);
    }
}
