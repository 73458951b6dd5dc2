//! JSON form of an automaton.
//!
//! Deserialization goes through the same validation as
//! [`AutomatonBuilder::freeze`](crate::builder::AutomatonBuilder::freeze),
//! so a document that names a missing state is rejected.

use super::error::CodecError;
use crate::automaton::Automaton;

/// Serialize an automaton to compact JSON.
pub fn to_string(automaton: &Automaton) -> Result<String, CodecError> {
    Ok(serde_json::to_string(automaton)?)
}

/// Serialize an automaton to indented JSON.
pub fn to_string_pretty(automaton: &Automaton) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(automaton)?)
}

/// Deserialize and validate an automaton from JSON.
pub fn from_str(json: &str) -> Result<Automaton, CodecError> {
    serde_json::from_str(json).map_err(|error| {
        tracing::debug!(%error, "rejected automaton JSON");
        CodecError::Json(error)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AutomatonBuilder;
    use crate::core::{Alphabet, BoundedKind, TerminationSpec, UnknownPolicy};

    fn sample() -> Automaton {
        let mut builder = AutomatonBuilder::new(Alphabet::full(BoundedKind::UInt8));
        let a = builder.add_named_state(["start".as_bytes().to_vec()]);
        let b = builder.add_named_state(["done".as_bytes().to_vec(), "end".as_bytes().to_vec()]);
        builder
            .set_start_state(a)
            .add_transition(a, 65, b)
            .set_fallback(b, UnknownPolicy::Goto { target: a })
            .set_termination(TerminationSpec::accepting([b]));
        builder.freeze().unwrap()
    }

    #[test]
    fn pretty_and_compact_forms_agree() {
        let automaton = sample();
        let compact = from_str(&to_string(&automaton).unwrap()).unwrap();
        let pretty = from_str(&to_string_pretty(&automaton).unwrap()).unwrap();
        assert_eq!(compact, automaton);
        assert_eq!(pretty, automaton);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = from_str("{\"alphabet\":").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
        assert_eq!(err.offset(), None);
    }
}
