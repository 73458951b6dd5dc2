//! Accept/reject classification of states.
//!
//! A termination spec lists either the accepting or the rejecting states;
//! every unlisted state takes the opposite classification.

use super::error::UnknownTag;
use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of running an automaton, or the class of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Accept,
    Reject,
}

impl Classification {
    pub fn is_accept(self) -> bool {
        matches!(self, Self::Accept)
    }

    fn opposite(self) -> Self {
        match self {
            Self::Accept => Self::Reject,
            Self::Reject => Self::Accept,
        }
    }
}

/// What membership in the termination list means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Listed states reject, all others accept
    RejectList,
    /// Listed states accept, all others reject
    AcceptList,
}

impl Polarity {
    pub fn tag(self) -> u8 {
        match self {
            Self::RejectList => 0x01,
            Self::AcceptList => 0x02,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, UnknownTag> {
        match tag {
            0x01 => Ok(Self::RejectList),
            0x02 => Ok(Self::AcceptList),
            _ => Err(UnknownTag {
                kind: "termination",
                tag,
            }),
        }
    }

    fn listed(self) -> Classification {
        match self {
            Self::RejectList => Classification::Reject,
            Self::AcceptList => Classification::Accept,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationSpec {
    polarity: Polarity,
    listed: BTreeSet<StateId>,
}

impl TerminationSpec {
    pub fn new(polarity: Polarity, listed: impl IntoIterator<Item = StateId>) -> Self {
        Self {
            polarity,
            listed: listed.into_iter().collect(),
        }
    }

    /// Listed states accept.
    pub fn accepting(states: impl IntoIterator<Item = StateId>) -> Self {
        Self::new(Polarity::AcceptList, states)
    }

    /// Listed states reject.
    pub fn rejecting(states: impl IntoIterator<Item = StateId>) -> Self {
        Self::new(Polarity::RejectList, states)
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn listed(&self) -> &BTreeSet<StateId> {
        &self.listed
    }

    /// Classify a state by list membership. Range checks belong to the
    /// state space.
    pub fn classify(&self, state: StateId) -> Classification {
        let listed = self.polarity.listed();
        if self.listed.contains(&state) {
            listed
        } else {
            listed.opposite()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_list_accepts_only_listed_states() {
        let spec = TerminationSpec::accepting([1, 3]);
        assert_eq!(spec.classify(1), Classification::Accept);
        assert_eq!(spec.classify(3), Classification::Accept);
        assert_eq!(spec.classify(0), Classification::Reject);
    }

    #[test]
    fn reject_list_accepts_everything_else() {
        let spec = TerminationSpec::rejecting([0]);
        assert_eq!(spec.classify(0), Classification::Reject);
        assert_eq!(spec.classify(7), Classification::Accept);
    }

    #[test]
    fn polarity_tags_match_binary_format() {
        assert_eq!(Polarity::RejectList.tag(), 0x01);
        assert_eq!(Polarity::AcceptList.tag(), 0x02);
        assert_eq!(Polarity::from_tag(0x02), Ok(Polarity::AcceptList));
        assert!(Polarity::from_tag(0x00).is_err());
    }

    #[test]
    fn duplicate_listing_collapses() {
        let spec = TerminationSpec::accepting([2, 2, 2]);
        assert_eq!(spec.listed().len(), 1);
    }
}
