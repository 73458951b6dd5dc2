//! Basic DFA
//!
//! This example builds a small automaton that recognizes unsigned decimal
//! numbers with an optional fractional part, then runs it over a few inputs.
//!
//! Key concepts:
//! - Bounded ASCII alphabet
//! - Named states
//! - Accept-list termination
//! - Reject fallback short-circuiting the run
//! - Run traces
//!
//! Run with: cargo run --example basic_dfa

use dfa_interchange::builder::AutomatonBuilder;
use dfa_interchange::core::{Alphabet, BoundedKind, TerminationSpec, UnknownPolicy};

fn main() {
    println!("=== Basic DFA Example ===\n");

    let mut builder = AutomatonBuilder::new(Alphabet::full(BoundedKind::Ascii));
    let start = builder.add_named_state(["start"]);
    let integer = builder.add_named_state(["integer"]);
    let dot = builder.add_named_state(["dot"]);
    let fraction = builder.add_named_state(["fraction"]);

    for digit in b'0'..=b'9' {
        let digit = u64::from(digit);
        builder
            .add_transition(start, digit, integer)
            .add_transition(integer, digit, integer)
            .add_transition(dot, digit, fraction)
            .add_transition(fraction, digit, fraction);
    }
    builder
        .add_transition(integer, u64::from(b'.'), dot)
        .set_start_state(start)
        .set_fallback(start, UnknownPolicy::Reject)
        .set_termination(TerminationSpec::accepting([integer, fraction]));

    let automaton = match builder.freeze() {
        Ok(automaton) => automaton,
        Err(e) => {
            println!("Failed to freeze automaton: {}", e);
            return;
        }
    };

    println!(
        "Automaton has {} states over {:?}\n",
        automaton.num_states(),
        automaton.alphabet().kind()
    );

    for input in ["42", "3.14", "7.", ".5", "12a3", ""] {
        let symbols = input.as_bytes().iter().map(std::slice::from_ref);
        match automaton.trace(symbols) {
            Ok(trace) => {
                let path: Vec<String> = trace
                    .path()
                    .iter()
                    .map(|state| state_name(&automaton, *state))
                    .collect();
                println!("{:>6?} -> {:?}", input, trace.outcome());
                println!("         path: {}", path.join(" -> "));
                if trace.halted_by_fallback() {
                    println!(
                        "         halted by fallback after {} letter(s)",
                        trace.letters_consumed()
                    );
                }
            }
            Err(e) => println!("{:>6?} -> error: {}", input, e),
        }
    }

    // Non-ASCII bytes are outside the alphabet and fail to decode.
    match automaton.run([[0xC3u8], [0xA9]]) {
        Ok(outcome) => println!("\n\"é\" -> {:?}", outcome),
        Err(e) => println!("\n\"é\" -> error: {}", e),
    }

    println!("\n=== Example Complete ===");
}

fn state_name(automaton: &dfa_interchange::Automaton, state: u64) -> String {
    match automaton.names(state) {
        Ok(Some(names)) if !names.is_empty() => String::from_utf8_lossy(&names[0]).into_owned(),
        _ => state.to_string(),
    }
}
