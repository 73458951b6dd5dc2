//! Property-based tests for automata and the interchange formats.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated automata and inputs.

use dfa_interchange::builder::AutomatonBuilder;
use dfa_interchange::codec::{self, json, CodecError, DecodeLimits};
use dfa_interchange::core::{
    Alphabet, AlphabetKind, AlphabetSpec, BoundedKind, Classification, LetterId, Polarity,
    StateId, TerminationSpec, UnknownPolicy,
};
use dfa_interchange::Automaton;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Everything except the alphabet needed to build an automaton.
#[derive(Clone, Debug)]
struct Shape {
    num_states: u64,
    start: StateId,
    transitions: Vec<(StateId, usize, StateId)>,
    fallbacks: Vec<UnknownPolicy>,
    listed: Vec<bool>,
    polarity: Polarity,
    named: bool,
}

fn arbitrary_policy(num_states: u64) -> impl Strategy<Value = UnknownPolicy> {
    prop_oneof![
        Just(UnknownPolicy::Reject),
        Just(UnknownPolicy::Accept),
        (0..num_states).prop_map(|target| UnknownPolicy::Goto { target }),
    ]
}

prop_compose! {
    fn arbitrary_shape()(num_states in 1..6u64)(
        num_states in Just(num_states),
        start in 0..num_states,
        transitions in prop::collection::vec((0..num_states, any::<usize>(), 0..num_states), 0..24),
        fallbacks in prop::collection::vec(arbitrary_policy(num_states), num_states as usize),
        listed in prop::collection::vec(any::<bool>(), num_states as usize),
        accept_list in any::<bool>(),
        named in any::<bool>(),
    ) -> Shape {
        let polarity = if accept_list { Polarity::AcceptList } else { Polarity::RejectList };
        Shape { num_states, start, transitions, fallbacks, listed, polarity, named }
    }
}

/// A prefix-free table: every letter ends in `z` and contains no other `z`.
fn arbitrary_variable_table() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::btree_set(prop::collection::vec(b'a'..b'z', 0..4), 1..8).prop_map(|set| {
        set.into_iter()
            .map(|mut letter| {
                letter.push(b'z');
                letter
            })
            .collect()
    })
}

fn arbitrary_fixed_table() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::btree_set(prop::collection::vec(any::<u8>(), 2), 1..12)
        .prop_map(|set| set.into_iter().collect())
}

fn arbitrary_alphabet() -> impl Strategy<Value = Alphabet> {
    prop_oneof![
        Just(Alphabet::full(BoundedKind::UInt8)),
        Just(Alphabet::full(BoundedKind::Ascii)),
        (0u64..1000, 0u64..1000).prop_map(|(a, b)| {
            Alphabet::bounded(BoundedKind::UInt16, a.min(b), a.max(b)).unwrap()
        }),
        arbitrary_fixed_table()
            .prop_map(|table| Alphabet::new(AlphabetSpec::CustomFixed { width: 2, table }).unwrap()),
        arbitrary_variable_table()
            .prop_map(|table| Alphabet::new(AlphabetSpec::CustomVariable { table }).unwrap()),
    ]
}

/// Letter ids of `alphabet`, capped to keep bounded domains small.
fn letter_ids(alphabet: &Alphabet) -> Vec<LetterId> {
    match alphabet.spec() {
        AlphabetSpec::Bounded { min, max, .. } => (*min..=*max).take(64).collect(),
        AlphabetSpec::CustomFixed { table, .. } | AlphabetSpec::CustomVariable { table } => {
            (0..table.len() as u64).collect()
        }
    }
}

fn build(alphabet: Alphabet, shape: &Shape) -> Automaton {
    let letters = letter_ids(&alphabet);
    let mut builder = AutomatonBuilder::new(alphabet);
    for state in 0..shape.num_states {
        if shape.named {
            builder.add_named_state([format!("q{state}").into_bytes()]);
        } else {
            builder.add_state();
        }
    }

    // First destination wins so the builder never sees a conflict.
    let mut explicit = BTreeMap::new();
    for &(from, letter, to) in &shape.transitions {
        explicit
            .entry((from, letters[letter % letters.len()]))
            .or_insert(to);
    }
    for ((from, letter), to) in explicit {
        builder.add_transition(from, letter, to);
    }

    for (state, policy) in (0..).zip(&shape.fallbacks) {
        builder.set_fallback(state, *policy);
    }

    let listed: BTreeSet<StateId> = (0..)
        .zip(&shape.listed)
        .filter(|(_, listed)| **listed)
        .map(|(state, _)| state)
        .collect();
    builder
        .set_start_state(shape.start)
        .set_termination(TerminationSpec::new(shape.polarity, listed));

    builder.freeze().unwrap()
}

fn arbitrary_automaton() -> impl Strategy<Value = Automaton> {
    (arbitrary_alphabet(), arbitrary_shape()).prop_map(|(alphabet, shape)| build(alphabet, &shape))
}

/// Every bounded kind paired with an id from its natural domain.
fn arbitrary_bounded_letter() -> impl Strategy<Value = (BoundedKind, LetterId)> {
    let kinds: Vec<BoundedKind> = AlphabetKind::ALL
        .iter()
        .filter_map(|kind| kind.bounded())
        .collect();
    prop::sample::select(kinds).prop_flat_map(|kind| {
        let (min, max) = kind.natural_range();
        (Just(kind), min..=max)
    })
}

/// A custom fixed or variable table paired with one of its letter ids.
fn arbitrary_custom_letter() -> impl Strategy<Value = (Alphabet, LetterId)> {
    prop_oneof![
        arbitrary_fixed_table()
            .prop_map(|table| Alphabet::new(AlphabetSpec::CustomFixed { width: 2, table }).unwrap()),
        arbitrary_variable_table()
            .prop_map(|table| Alphabet::new(AlphabetSpec::CustomVariable { table }).unwrap()),
    ]
    .prop_flat_map(|alphabet| {
        let size = letter_ids(&alphabet).len() as u64;
        (Just(alphabet), 0..size)
    })
}

/// Classify `letters` by walking the transition table directly.
fn walk(automaton: &Automaton, letters: &[LetterId]) -> Classification {
    let mut state = automaton.start_state();
    for letter in letters {
        let function = automaton.transitions().function(state).unwrap();
        state = match (function.explicit().get(letter), function.fallback()) {
            (Some(&to), _) => to,
            (None, UnknownPolicy::Goto { target }) => target,
            (None, UnknownPolicy::Accept) => return Classification::Accept,
            (None, UnknownPolicy::Reject) => return Classification::Reject,
        };
    }
    if automaton.termination().listed().contains(&state)
        == (automaton.termination().polarity() == Polarity::AcceptList)
    {
        Classification::Accept
    } else {
        Classification::Reject
    }
}

/// An automaton together with letter ids drawn from its alphabet.
fn automaton_with_letters() -> impl Strategy<Value = (Automaton, Vec<LetterId>)> {
    arbitrary_automaton().prop_flat_map(|automaton| {
        let letters = letter_ids(automaton.alphabet());
        let input = prop::collection::vec(prop::sample::select(letters), 0..32);
        (Just(automaton), input)
    })
}

/// An automaton together with raw input symbols drawn from its alphabet.
fn automaton_with_input() -> impl Strategy<Value = (Automaton, Vec<Vec<u8>>)> {
    arbitrary_automaton().prop_flat_map(|automaton| {
        let letters = letter_ids(automaton.alphabet());
        let input = prop::collection::vec(prop::sample::select(letters), 0..32);
        (Just(automaton), input).prop_map(|(automaton, ids)| {
            let raw = ids
                .into_iter()
                .map(|id| automaton.alphabet().encode(id).unwrap())
                .collect();
            (automaton, raw)
        })
    })
}

proptest! {
    #[test]
    fn binary_round_trip_is_exact(automaton in arbitrary_automaton()) {
        let bytes = codec::encode(&automaton);
        let decoded = codec::decode(&bytes).unwrap();
        prop_assert_eq!(&decoded, &automaton);
        prop_assert_eq!(codec::encode(&decoded), bytes);
    }

    #[test]
    fn json_round_trip_is_exact(automaton in arbitrary_automaton()) {
        let text = json::to_string(&automaton).unwrap();
        prop_assert_eq!(json::from_str(&text).unwrap(), automaton);
    }

    #[test]
    fn decoded_automaton_runs_identically((automaton, input) in automaton_with_input()) {
        let decoded = codec::decode(&codec::encode(&automaton)).unwrap();
        prop_assert_eq!(
            decoded.run(&input).unwrap(),
            automaton.run(&input).unwrap()
        );
    }

    #[test]
    fn run_matches_a_direct_table_walk((automaton, letters) in automaton_with_letters()) {
        let raw: Vec<Vec<u8>> = letters
            .iter()
            .map(|&id| automaton.alphabet().encode(id).unwrap())
            .collect();
        let expected = walk(&automaton, &letters);
        prop_assert_eq!(automaton.run(&raw).unwrap(), expected);
        prop_assert_eq!(automaton.run_letters(letters.iter().copied()).unwrap(), expected);
    }

    #[test]
    fn bounded_letters_round_trip((kind, id) in arbitrary_bounded_letter()) {
        let alphabet = Alphabet::full(kind);
        let raw = alphabet.encode(id).unwrap();
        prop_assert_eq!(raw.len(), kind.width());
        prop_assert_eq!(alphabet.decode(&raw).unwrap(), id);
        prop_assert_eq!(alphabet.decode_prefix(&raw).unwrap(), (id, kind.width()));
    }

    #[test]
    fn custom_letters_round_trip(
        (alphabet, id) in arbitrary_custom_letter(),
        suffix in prop::collection::vec(any::<u8>(), 0..4),
    ) {
        let raw = alphabet.encode(id).unwrap();
        prop_assert_eq!(alphabet.decode(&raw).unwrap(), id);
        prop_assert_eq!(alphabet.decode_prefix(&raw).unwrap(), (id, raw.len()));

        let mut stream = raw.clone();
        stream.extend_from_slice(&suffix);
        prop_assert_eq!(alphabet.decode_prefix(&stream).unwrap(), (id, raw.len()));
    }

    #[test]
    fn runs_take_at_most_one_step_per_letter((automaton, input) in automaton_with_input()) {
        let trace = automaton.trace(&input).unwrap();
        prop_assert!(trace.steps() <= input.len() + 1);
        prop_assert!(trace.letters_consumed() <= input.len());
        prop_assert_eq!(trace.outcome(), automaton.run(&input).unwrap());
    }

    #[test]
    fn stream_run_matches_symbol_run((automaton, input) in automaton_with_input()) {
        let stream: Vec<u8> = input.concat();
        prop_assert_eq!(
            automaton.run_stream(&stream).unwrap(),
            automaton.run(&input).unwrap()
        );
    }

    #[test]
    fn termination_classifies_every_state(automaton in arbitrary_automaton()) {
        let listed = automaton.termination().listed();
        let accepts_listed = automaton.termination().polarity() == Polarity::AcceptList;
        for state in automaton.states().ids() {
            let expected = if listed.contains(&state) == accepts_listed {
                Classification::Accept
            } else {
                Classification::Reject
            };
            prop_assert_eq!(automaton.classify(state).unwrap(), expected);
        }
    }

    #[test]
    fn truncated_encodings_never_decode(automaton in arbitrary_automaton(), cut in any::<prop::sample::Index>()) {
        let bytes = codec::encode(&automaton);
        let len = cut.index(bytes.len());
        let result = codec::decode(&bytes[..len]);
        prop_assert!(matches!(result, Err(CodecError::CorruptFormat { .. })), "expected CorruptFormat, got {:?}", result);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let limits = DecodeLimits::new().max_states(64).max_alphabet_entries(64);
        let _ = codec::decode_with(&bytes, &limits);
    }
}
