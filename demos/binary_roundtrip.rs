//! Binary Round Trip
//!
//! This example encodes an automaton over a variable-width alphabet to the
//! binary interchange format, decodes it again, and shows how corrupt input
//! is rejected with the offending byte offset.
//!
//! Key concepts:
//! - Custom variable-width alphabet (self-delimiting tokens)
//! - Goto fallback policies
//! - Exact binary encoding and decoding
//! - Decode limits for untrusted input
//! - JSON interchange
//!
//! Run with: cargo run --example binary_roundtrip

use dfa_interchange::builder::AutomatonBuilder;
use dfa_interchange::codec::{self, json, DecodeLimits};
use dfa_interchange::core::{Alphabet, TerminationSpec, UnknownPolicy};
use dfa_interchange::Automaton;

fn build() -> Result<Automaton, Box<dyn std::error::Error>> {
    let mut builder = AutomatonBuilder::new(Alphabet::variable());
    let open = builder.add_letter("<<")?;
    let close = builder.add_letter(">>")?;
    let word = builder.add_letter("w")?;

    let outside = builder.add_state();
    let inside = builder.add_state();
    builder
        .set_start_state(outside)
        .add_transition(outside, open.id, inside)
        .add_transition(outside, word.id, outside)
        .add_transition(inside, word.id, inside)
        .add_transition(inside, close.id, outside)
        // A stray closing token resets instead of failing.
        .set_fallback(outside, UnknownPolicy::Goto { target: outside })
        .set_fallback(inside, UnknownPolicy::Reject)
        .set_termination(TerminationSpec::accepting([outside]));

    Ok(builder.freeze()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Binary Round Trip Example ===\n");

    let automaton = build()?;
    let bytes = codec::encode(&automaton);
    println!("Encoded {} states into {} bytes:", automaton.num_states(), bytes.len());
    println!("  {:02x?}\n", bytes);

    let decoded = codec::decode(&bytes)?;
    println!("Decoded automaton equals original: {}\n", decoded == automaton);

    for input in ["w<<ww>>w", "<<w", ">>w", "w<<>><<w>>"] {
        match decoded.run_stream(input.as_bytes()) {
            Ok(outcome) => println!("{:>12} -> {:?}", input, outcome),
            Err(e) => println!("{:>12} -> error: {}", input, e),
        }
    }

    println!("\n--- Corrupt input ---");
    let mut corrupt = bytes.clone();
    if let Some(last) = corrupt.last_mut() {
        *last = 0x7f;
    }
    match codec::decode(&corrupt) {
        Ok(_) => println!("unexpectedly decoded corrupt bytes"),
        Err(e) => println!("rejected: {}", e),
    }

    match codec::decode(&bytes[..bytes.len() / 2]) {
        Ok(_) => println!("unexpectedly decoded truncated bytes"),
        Err(e) => println!("rejected: {}", e),
    }

    let strict = DecodeLimits::new().max_alphabet_entries(2);
    match codec::decode_with(&bytes, &strict) {
        Ok(_) => println!("unexpectedly decoded past the limit"),
        Err(e) => println!("rejected: {}", e),
    }

    println!("\n--- JSON form ---");
    println!("{}", json::to_string_pretty(&automaton)?);

    println!("\n=== Example Complete ===");
    Ok(())
}
