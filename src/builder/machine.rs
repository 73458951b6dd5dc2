//! Builder for assembling automata incrementally.

use crate::automaton::Automaton;
use crate::builder::error::{ValidationError, Violation};
use crate::builder::validate::{self, Check};
use crate::core::{
    Alphabet, AlphabetError, Letter, LetterId, StateId, StateNames, StateSpace, TerminationSpec,
    TransitionFunction, TransitionTable, UnknownPolicy,
};
use std::collections::BTreeMap;

/// Builder for constructing automata one letter, state and transition at a
/// time.
///
/// Nothing is checked until [`freeze`](Self::freeze), which reports every
/// violated invariant at once. Letters are the exception: a malformed letter
/// encoding is rejected as soon as it is added.
///
/// # Example
///
/// ```
/// use dfa_interchange::builder::AutomatonBuilder;
/// use dfa_interchange::core::{Alphabet, BoundedKind, Classification, TerminationSpec};
///
/// let mut builder = AutomatonBuilder::new(Alphabet::full(BoundedKind::Ascii));
/// let start = builder.add_state();
/// let seen_a = builder.add_state();
/// builder
///     .set_start_state(start)
///     .add_transition(start, u64::from(b'a'), seen_a)
///     .set_termination(TerminationSpec::accepting([seen_a]));
///
/// let automaton = builder.freeze().unwrap();
/// assert_eq!(automaton.run([b"a"]).unwrap(), Classification::Accept);
/// ```
#[derive(Debug, Clone)]
pub struct AutomatonBuilder {
    alphabet: Alphabet,
    names: Vec<Option<StateNames>>,
    start: Option<StateId>,
    termination: Option<TerminationSpec>,
    transitions: Vec<(StateId, LetterId, StateId)>,
    fallbacks: BTreeMap<StateId, UnknownPolicy>,
}

impl AutomatonBuilder {
    /// Create a builder over an alphabet.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            names: Vec::new(),
            start: None,
            termination: None,
            transitions: Vec::new(),
            fallbacks: BTreeMap::new(),
        }
    }

    /// The alphabet letters are added to.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of states added so far.
    pub fn num_states(&self) -> u64 {
        self.names.len() as u64
    }

    /// Add a letter by its encoding.
    ///
    /// Custom alphabets append the letter to their table and assign the next
    /// id. Bounded alphabets already contain every letter of their domain, so
    /// this only decodes the encoding to its id.
    pub fn add_letter(&mut self, raw: impl Into<Vec<u8>>) -> Result<Letter, AlphabetError> {
        self.alphabet.insert(raw.into())
    }

    /// Add an unnamed state and return its id.
    pub fn add_state(&mut self) -> StateId {
        self.names.push(None);
        self.num_states() - 1
    }

    /// Add a named state and return its id.
    pub fn add_named_state<I, N>(&mut self, names: I) -> StateId
    where
        I: IntoIterator<Item = N>,
        N: Into<Vec<u8>>,
    {
        self.names
            .push(Some(names.into_iter().map(Into::into).collect()));
        self.num_states() - 1
    }

    /// Set the initial state (required).
    pub fn set_start_state(&mut self, state: StateId) -> &mut Self {
        self.start = Some(state);
        self
    }

    /// Add an explicit transition. Repeating an identical transition is a
    /// no-op; a different destination for the same letter is a conflict.
    pub fn add_transition(&mut self, from: StateId, letter: LetterId, to: StateId) -> &mut Self {
        self.transitions.push((from, letter, to));
        self
    }

    /// Set which states accept (required).
    pub fn set_termination(&mut self, termination: TerminationSpec) -> &mut Self {
        self.termination = Some(termination);
        self
    }

    /// Set what `state` does with letters it has no transition for.
    /// States without a policy reject.
    pub fn set_fallback(&mut self, state: StateId, policy: UnknownPolicy) -> &mut Self {
        self.fallbacks.insert(state, policy);
        self
    }

    /// Validate every invariant and produce an immutable automaton.
    pub fn freeze(self) -> Result<Automaton, ValidationError> {
        let num_states = self.num_states();
        let mut checks: Vec<Check> = Vec::new();

        checks.push(match self.start {
            Some(start) => validate::check_start(start, num_states),
            None => validate::fail(Violation::MissingStartState),
        });

        match &self.termination {
            Some(termination) => {
                validate::check_termination(termination, num_states, &mut checks)
            }
            None => checks.push(validate::fail(Violation::MissingTermination)),
        }

        let named = self.names.iter().filter(|names| names.is_some()).count() as u64;
        if named != 0 && named != num_states {
            checks.push(validate::fail(Violation::MixedStateNaming {
                named,
                unnamed: num_states - named,
            }));
        }

        let functions = self.collect_functions(&mut checks);
        for (state, function) in (0..).zip(&functions) {
            validate::check_function(state, function, &self.alphabet, num_states, &mut checks);
        }

        if let Err(error) = validate::into_result(validate::finish(checks)) {
            tracing::warn!(
                violations = error.violations.len(),
                "automaton failed freeze-time validation"
            );
            return Err(error);
        }

        let names = if named == num_states && num_states > 0 {
            Some(self.names.into_iter().flatten().collect())
        } else {
            None
        };
        let states = StateSpace::new(num_states, self.start.unwrap_or_default(), names);
        let termination = self.termination.unwrap_or_else(|| TerminationSpec::accepting([]));

        tracing::debug!(
            states = num_states,
            alphabet = ?self.alphabet.kind(),
            "froze automaton"
        );

        Ok(Automaton::from_validated(
            self.alphabet,
            states,
            termination,
            TransitionTable::new(functions),
        ))
    }

    /// Group transitions and fallbacks by source state, recording
    /// conflicts and transitions out of states that were never added.
    fn collect_functions(&self, checks: &mut Vec<Check>) -> Vec<TransitionFunction> {
        let num_states = self.num_states();
        let mut explicit: Vec<BTreeMap<LetterId, StateId>> =
            vec![BTreeMap::new(); self.names.len()];

        for &(state, letter, to) in &self.transitions {
            let Some(map) = explicit.get_mut(state as usize).filter(|_| state < num_states) else {
                checks.push(validate::fail(Violation::UnknownSourceState { state, num_states }));
                continue;
            };
            match map.insert(letter, to) {
                Some(first) if first != to => {
                    map.insert(letter, first);
                    checks.push(validate::fail(Violation::ConflictingTransition {
                        state,
                        letter,
                        first,
                        second: to,
                    }));
                }
                _ => {}
            }
        }

        for &state in self.fallbacks.keys().filter(|&&state| state >= num_states) {
            checks.push(validate::fail(Violation::UnknownSourceState { state, num_states }));
        }

        (0..)
            .zip(explicit)
            .map(|(state, map)| {
                let fallback = self.fallbacks.get(&state).copied().unwrap_or_default();
                TransitionFunction::new(map, fallback)
            })
            .collect()
    }
}
