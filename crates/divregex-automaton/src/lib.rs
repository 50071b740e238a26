//! Divisibility automata and their conversion to regular expressions.
//!
//! Given a numeral base and a divisor `d`, this crate builds a DFA whose states
//! track the value read so far modulo `d`, then converts it to an anchored
//! regular expression by algebraic state elimination (Brzozowski's equation
//! method with Arden's rule).
//!
//! # Architecture
//!
//! - [`automaton`] -- State-indexed automaton with string-labelled edges
//! - [`builder`] -- Divisibility DFA construction, with and without a sink state
//! - [`equation`] -- Linear equation system over regex fragments, elimination steps
//! - [`synthesize`] -- Elimination order, termination check and final assembly

pub mod automaton;
pub mod builder;
pub mod equation;
pub mod synthesize;

pub use automaton::Automaton;
pub use builder::{
    build_automaton, build_automaton_named, build_automaton_with_sink,
    build_decimal_automaton_with_sink, empty_input_state,
};
pub use divregex_core::{Base, Expr, UnknownBase};
pub use equation::{EquationSystem, Solution};
pub use synthesize::{EliminationOrder, SynthesisOptions, synthesize_regex, synthesize_regex_with};

/// Index of a state. States of an automaton with `n` states are `0..n`.
pub type StateId = usize;

/// The state representing remainder zero; the accept state of every divisibility DFA.
pub const REMAINDER_ZERO: StateId = 0;

/// Error type for automaton construction and regex synthesis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DivisibilityError {
    #[error(transparent)]
    InvalidBase(#[from] UnknownBase),
    #[error("invalid divisor: {0} (must be at least 1)")]
    InvalidDivisor(u32),
    #[error("invalid state {state}: automaton has {state_count} states")]
    InvalidState { state: StateId, state_count: usize },
    #[error("invalid elimination order: {0}")]
    InvalidEliminationOrder(String),
    #[error("accept state {0} is unreachable from the start state")]
    UnreachableAccept(StateId),
    /// Elimination left coefficients other than the self-loop and constant.
    #[error("state elimination did not converge: state {state} still references {live:?}")]
    InternalInconsistency { state: StateId, live: Vec<StateId> },
}

/// Build the divisibility DFA for `(base, divisor)`, start it at the empty-input
/// state and synthesize the regex accepting remainder zero.
///
/// This is the whole contract a host needs: two validated inputs, one regex string.
pub fn divisibility_regex(base: Base, divisor: u32) -> Result<String, DivisibilityError> {
    divisibility_regex_with(base, divisor, &SynthesisOptions::default())
}

/// [`divisibility_regex`] with explicit synthesis options.
pub fn divisibility_regex_with(
    base: Base,
    divisor: u32,
    options: &SynthesisOptions,
) -> Result<String, DivisibilityError> {
    let mut automaton = build_automaton(base, divisor)?;
    automaton.set_start(empty_input_state(divisor))?;
    synthesize_regex_with(&automaton, REMAINDER_ZERO, options)
}
