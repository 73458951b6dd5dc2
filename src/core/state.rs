//! The state space of an automaton: how many states, which one starts,
//! and optional human-readable names.

use super::error::{StateError, UnknownTag};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Identifier of a state, always `< num_states`.
pub type StateId = u64;

/// Names attached to a single state.
pub type StateNames = Vec<Vec<u8>>;

/// Whether states carry names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateNaming {
    Unnamed,
    Named,
}

impl StateNaming {
    pub fn tag(self) -> u8 {
        match self {
            Self::Unnamed => 0x01,
            Self::Named => 0x02,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, UnknownTag> {
        match tag {
            0x01 => Ok(Self::Unnamed),
            0x02 => Ok(Self::Named),
            _ => Err(UnknownTag {
                kind: "state naming",
                tag,
            }),
        }
    }
}

/// The set of states `[0, num_states)` plus the start state.
///
/// Names are present for every state or for none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpace {
    num_states: u64,
    start: StateId,
    names: Option<Vec<StateNames>>,
}

impl StateSpace {
    /// Assemble a state space without checking it; callers validate.
    pub(crate) fn new(num_states: u64, start: StateId, names: Option<Vec<StateNames>>) -> Self {
        Self {
            num_states,
            start,
            names,
        }
    }

    pub fn len(&self) -> u64 {
        self.num_states
    }

    pub fn is_empty(&self) -> bool {
        self.num_states == 0
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn naming(&self) -> StateNaming {
        if self.names.is_some() {
            StateNaming::Named
        } else {
            StateNaming::Unnamed
        }
    }

    pub fn ids(&self) -> Range<StateId> {
        0..self.num_states
    }

    /// Fail with `InvalidState` unless `state` exists.
    pub fn check(&self, state: StateId) -> Result<(), StateError> {
        if state < self.num_states {
            Ok(())
        } else {
            Err(StateError::InvalidState {
                state,
                num_states: self.num_states,
            })
        }
    }

    /// Names of `state`, or `None` when the space is unnamed.
    pub fn names(&self, state: StateId) -> Result<Option<&[Vec<u8>]>, StateError> {
        self.check(state)?;
        Ok(self
            .names
            .as_ref()
            .and_then(|names| names.get(state as usize))
            .map(Vec::as_slice))
    }

    pub(crate) fn name_table(&self) -> Option<&[StateNames]> {
        self.names.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_tags_are_closed() {
        assert_eq!(StateNaming::from_tag(0x01), Ok(StateNaming::Unnamed));
        assert_eq!(StateNaming::from_tag(0x02), Ok(StateNaming::Named));
        assert_eq!(
            StateNaming::from_tag(0x03),
            Err(UnknownTag {
                kind: "state naming",
                tag: 0x03
            })
        );
    }

    #[test]
    fn out_of_range_states_are_rejected() {
        let space = StateSpace::new(2, 0, None);
        assert!(space.check(1).is_ok());
        assert_eq!(
            space.check(2),
            Err(StateError::InvalidState {
                state: 2,
                num_states: 2
            })
        );
        assert!(space.names(5).is_err());
    }

    #[test]
    fn unnamed_space_has_no_names() {
        let space = StateSpace::new(3, 1, None);
        assert_eq!(space.naming(), StateNaming::Unnamed);
        assert_eq!(space.names(2).unwrap(), None);
        assert_eq!(space.ids().count(), 3);
    }

    #[test]
    fn named_space_returns_each_states_names() {
        let names = vec![vec![b"idle".to_vec()], vec![b"busy".to_vec(), b"working".to_vec()]];
        let space = StateSpace::new(2, 0, Some(names));

        assert_eq!(space.naming(), StateNaming::Named);
        assert_eq!(
            space.names(1).unwrap(),
            Some(&[b"busy".to_vec(), b"working".to_vec()][..])
        );
    }
}
