//! Invariant checks run when an automaton is frozen or deserialized.
//!
//! Checks accumulate with `Validation` so a single freeze reports every
//! violation instead of stopping at the first one.

use crate::builder::error::{ValidationError, Violation};
use crate::core::{
    Alphabet, AlphabetSpec, StateId, StateSpace, TerminationSpec, TransitionFunction,
    UnknownPolicy,
};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single invariant check.
pub(crate) type Check = Validation<(), NonEmptyVec<Violation>>;

pub(crate) fn pass() -> Check {
    Validation::success(())
}

pub(crate) fn fail(violation: Violation) -> Check {
    Validation::fail(violation)
}

pub(crate) fn check_start(start: StateId, num_states: u64) -> Check {
    if start < num_states {
        pass()
    } else {
        fail(Violation::StartStateOutOfRange { start, num_states })
    }
}

pub(crate) fn check_termination(
    termination: &TerminationSpec,
    num_states: u64,
    checks: &mut Vec<Check>,
) {
    for &state in termination.listed().range(num_states..) {
        checks.push(fail(Violation::TerminationOutOfRange { state, num_states }));
    }
}

/// Letters must belong to the alphabet and be encodable, and every
/// destination must exist.
pub(crate) fn check_function(
    state: StateId,
    function: &TransitionFunction,
    alphabet: &Alphabet,
    num_states: u64,
    checks: &mut Vec<Check>,
) {
    for (&letter, &to) in function.explicit() {
        if !alphabet.contains(letter) {
            checks.push(fail(Violation::LetterOutsideAlphabet { state, letter }));
        } else if !alphabet.is_encodable(letter) {
            if let AlphabetSpec::Bounded { kind, .. } = alphabet.spec() {
                checks.push(fail(Violation::UnencodableLetter {
                    state,
                    letter,
                    width: kind.width(),
                }));
            }
        }
        if to >= num_states {
            checks.push(fail(Violation::UnknownDestination {
                state,
                letter,
                to,
                num_states,
            }));
        }
    }

    if let UnknownPolicy::Goto { target } = function.fallback() {
        if target >= num_states {
            checks.push(fail(Violation::UnknownGotoTarget {
                state,
                target,
                num_states,
            }));
        }
    }
}

/// Check every cross-reference of an assembled automaton.
pub(crate) fn check_automaton(
    alphabet: &Alphabet,
    states: &StateSpace,
    termination: &TerminationSpec,
    functions: &[TransitionFunction],
) -> Check {
    let num_states = states.len();
    let mut checks = vec![check_start(states.start(), num_states)];

    if let Some(names) = states.name_table() {
        if names.len() as u64 != num_states {
            checks.push(fail(Violation::NameTableMismatch {
                names: names.len() as u64,
                num_states,
            }));
        }
    }

    if functions.len() as u64 != num_states {
        checks.push(fail(Violation::TransitionTableMismatch {
            functions: functions.len() as u64,
            num_states,
        }));
    }

    check_termination(termination, num_states, &mut checks);

    for (state, function) in (0..).zip(functions) {
        check_function(state, function, alphabet, num_states, &mut checks);
    }

    finish(checks)
}

/// Accumulate ALL failures into one result.
pub(crate) fn finish(checks: Vec<Check>) -> Check {
    Validation::all_vec(checks).map(|_| ())
}

pub(crate) fn into_result(check: Check) -> Result<(), ValidationError> {
    match check {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(ValidationError {
            violations: errors.iter().cloned().collect(),
        }),
    }
}
