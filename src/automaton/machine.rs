//! Frozen automata and their execution.

use crate::automaton::trace::RunTrace;
use crate::builder::validate;
use crate::builder::ValidationError;
use crate::core::{
    Alphabet, AlphabetError, Classification, LetterId, LetterRef, Resolution, StateError, StateId,
    StateSpace, TerminationSpec, TransitionFunction, TransitionTable,
};
use serde::{Deserialize, Serialize};

/// Errors that can occur while running an automaton.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// An input symbol did not decode under the alphabet. `position` is the
    /// symbol index for [`Automaton::run`] and the byte offset for
    /// [`Automaton::run_stream`].
    #[error("input symbol at position {position} failed to decode: {source}")]
    Decode {
        position: usize,
        #[source]
        source: AlphabetError,
    },

    #[error(transparent)]
    InvalidState(#[from] StateError),
}

/// How a drive over the input ended.
struct Outcome {
    classification: Classification,
    consumed: usize,
    halted: bool,
}

/// A validated, immutable DFA.
///
/// Every cross-reference (letters, destinations, fallback targets,
/// termination list, start state) was checked when the automaton was
/// frozen or decoded, so execution never meets a dangling id. An
/// `Automaton` is `Send + Sync` and can be shared freely between threads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AutomatonRepr", into = "AutomatonRepr")]
pub struct Automaton {
    alphabet: Alphabet,
    states: StateSpace,
    termination: TerminationSpec,
    transitions: TransitionTable,
}

/// Unvalidated serde form of an [`Automaton`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct AutomatonRepr {
    alphabet: Alphabet,
    states: StateSpace,
    termination: TerminationSpec,
    transitions: Vec<TransitionFunction>,
}

impl Automaton {
    /// Wrap components that already passed validation.
    pub(crate) fn from_validated(
        alphabet: Alphabet,
        states: StateSpace,
        termination: TerminationSpec,
        transitions: TransitionTable,
    ) -> Self {
        Self {
            alphabet,
            states,
            termination,
            transitions,
        }
    }

    /// Validate components assembled outside the builder.
    pub(crate) fn assemble(
        alphabet: Alphabet,
        states: StateSpace,
        termination: TerminationSpec,
        functions: Vec<TransitionFunction>,
    ) -> Result<Self, ValidationError> {
        validate::into_result(validate::check_automaton(
            &alphabet,
            &states,
            &termination,
            &functions,
        ))?;
        Ok(Self::from_validated(
            alphabet,
            states,
            termination,
            TransitionTable::new(functions),
        ))
    }

    /// The alphabet input symbols are decoded with.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// State count, start state and names.
    pub fn states(&self) -> &StateSpace {
        &self.states
    }

    /// Accept/reject classification of states.
    pub fn termination(&self) -> &TerminationSpec {
        &self.termination
    }

    /// One transition function per state.
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Number of states.
    pub fn num_states(&self) -> u64 {
        self.states.len()
    }

    /// State every run starts from.
    pub fn start_state(&self) -> StateId {
        self.states.start()
    }

    /// Accept/reject class of a state.
    pub fn classify(&self, state: StateId) -> Result<Classification, StateError> {
        self.states.check(state)?;
        Ok(self.termination.classify(state))
    }

    /// Names of a state, when the automaton has named states.
    pub fn names(&self, state: StateId) -> Result<Option<&[Vec<u8>]>, StateError> {
        self.states.names(state)
    }

    /// Feed one already-decoded letter to `state`.
    pub fn resolve(&self, state: StateId, letter: LetterId) -> Result<Resolution, StateError> {
        self.transitions.resolve(state, letter)
    }

    /// Decode one raw symbol and feed it to `state`.
    pub fn step(&self, state: StateId, raw: &[u8]) -> Result<Resolution, RunError> {
        self.states.check(state)?;
        let letter = self.decode_at(0, raw)?;
        Ok(self.transitions.resolve(state, letter)?)
    }

    /// Run the automaton over a sequence of raw symbols.
    ///
    /// A `Reject`/`Accept` fallback ends the run immediately and the
    /// remaining input is never decoded. Otherwise the result is the class
    /// of the state reached after the last symbol.
    pub fn run<I>(&self, input: I) -> Result<Classification, RunError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let letters = input
            .into_iter()
            .enumerate()
            .map(|(position, raw)| self.decode_at(position, raw.as_ref()));
        self.drive(letters, |_| {})
            .map(|outcome| outcome.classification)
    }

    /// Run over letter ids that are already decoded.
    pub fn run_letters<I>(&self, letters: I) -> Result<Classification, RunError>
    where
        I: IntoIterator<Item = LetterId>,
    {
        let letters = letters.into_iter().enumerate().map(|(position, letter)| {
            if self.alphabet.contains(letter) {
                Ok(letter)
            } else {
                Err(RunError::Decode {
                    position,
                    source: AlphabetError::UnknownLetter(LetterRef::Id(letter)),
                })
            }
        });
        self.drive(letters, |_| {})
            .map(|outcome| outcome.classification)
    }

    /// Run over one contiguous byte stream, splitting it into letters by
    /// their self-delimiting encodings.
    pub fn run_stream(&self, bytes: &[u8]) -> Result<Classification, RunError> {
        let mut offset = 0;
        let letters = std::iter::from_fn(move || {
            if offset >= bytes.len() {
                return None;
            }
            Some(match self.alphabet.decode_prefix(&bytes[offset..]) {
                Ok((letter, used)) => {
                    offset += used;
                    Ok(letter)
                }
                Err(source) => {
                    let position = offset;
                    offset = bytes.len();
                    Err(RunError::Decode { position, source })
                }
            })
        });
        self.drive(letters, |_| {})
            .map(|outcome| outcome.classification)
    }

    /// Run like [`run`](Self::run), recording every visited state.
    pub fn trace<I>(&self, input: I) -> Result<RunTrace, RunError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let letters = input
            .into_iter()
            .enumerate()
            .map(|(position, raw)| self.decode_at(position, raw.as_ref()));
        let mut path = Vec::new();
        let outcome = self.drive(letters, |state| {
            tracing::trace!(state, step = path.len(), "visited state");
            path.push(state);
        })?;
        Ok(RunTrace::new(
            path,
            outcome.classification,
            outcome.consumed,
            outcome.halted,
        ))
    }

    fn decode_at(&self, position: usize, raw: &[u8]) -> Result<LetterId, RunError> {
        self.alphabet
            .decode(raw)
            .map_err(|source| RunError::Decode { position, source })
    }

    /// Core loop: exactly one resolution per letter, so a run over `n`
    /// letters ends after at most `n + 1` steps even when `Goto` fallbacks
    /// form cycles.
    fn drive<I, F>(&self, letters: I, mut visit: F) -> Result<Outcome, RunError>
    where
        I: IntoIterator<Item = Result<LetterId, RunError>>,
        F: FnMut(StateId),
    {
        let mut state = self.states.start();
        let mut consumed = 0;
        visit(state);

        for letter in letters {
            let letter = letter?;
            consumed += 1;
            match self.transitions.resolve(state, letter)? {
                Resolution::Next(next) => {
                    state = next;
                    visit(state);
                }
                Resolution::Halt(classification) => {
                    return Ok(Outcome {
                        classification,
                        consumed,
                        halted: true,
                    });
                }
            }
        }

        Ok(Outcome {
            classification: self.termination.classify(state),
            consumed,
            halted: false,
        })
    }
}

impl TryFrom<AutomatonRepr> for Automaton {
    type Error = ValidationError;

    fn try_from(repr: AutomatonRepr) -> Result<Self, Self::Error> {
        Self::assemble(repr.alphabet, repr.states, repr.termination, repr.transitions)
    }
}

impl From<Automaton> for AutomatonRepr {
    fn from(automaton: Automaton) -> Self {
        Self {
            alphabet: automaton.alphabet,
            states: automaton.states,
            termination: automaton.termination,
            transitions: automaton.transitions.into_functions(),
        }
    }
}
