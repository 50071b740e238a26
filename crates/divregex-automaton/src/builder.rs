// Divisibility DFA construction.
//
// States 0..d hold "value read so far mod d". State d is the empty-input
// state: it has the same outgoing digit edges as a remainder state but no
// incoming edges, so the empty string is never accepted. The sink variant adds
// state d + 1, reached on any non-digit character.

use log::trace;

use crate::automaton::Automaton;
use crate::{Base, DivisibilityError, StateId};

/// Self-loop label of the sink state.
pub const SINK_ANY_LABEL: &str = ".";

/// The empty-input state of a divisibility DFA for `divisor`. Callers pass this
/// to [`Automaton::set_start`].
pub fn empty_input_state(divisor: u32) -> StateId {
    divisor as StateId
}

/// Build the DFA recognising digit strings in `base` whose value is divisible by
/// `divisor`, with `divisor + 1` states.
///
/// State `0` is the accept state. The start state is left at its default; set
/// it to [`empty_input_state`] before synthesis.
pub fn build_automaton(base: Base, divisor: u32) -> Result<Automaton, DivisibilityError> {
    if divisor == 0 {
        return Err(DivisibilityError::InvalidDivisor(divisor));
    }
    let mut dfa = Automaton::new(divisor as usize + 1);
    add_digit_edges(&mut dfa, base, divisor)?;
    trace!(
        "built {base} automaton for divisor {divisor}: {} states, {} edges",
        dfa.state_count(),
        dfa.edge_count()
    );
    Ok(dfa)
}

/// [`build_automaton`] taking the base by name (`binary`, `d`, `16`, ...).
pub fn build_automaton_named(base: &str, divisor: u32) -> Result<Automaton, DivisibilityError> {
    build_automaton(base.parse()?, divisor)
}

/// Build the divisibility DFA plus a non-accepting sink state `divisor + 1`.
///
/// Every other state moves to the sink on any character that is not a digit of
/// `base`, and the sink loops on any character. The accepted language is the
/// same as [`build_automaton`]'s; the sink only makes rejection of foreign
/// characters explicit in the automaton.
pub fn build_automaton_with_sink(base: Base, divisor: u32) -> Result<Automaton, DivisibilityError> {
    if divisor == 0 {
        return Err(DivisibilityError::InvalidDivisor(divisor));
    }
    let sink = divisor as usize + 1;
    let mut dfa = Automaton::new(sink + 1);
    add_digit_edges(&mut dfa, base, divisor)?;

    dfa.add_edge(sink, sink, SINK_ANY_LABEL)?;
    for state in 0..sink {
        dfa.add_edge(state, sink, base.non_digit_class())?;
    }
    trace!(
        "built {base} automaton with sink for divisor {divisor}: {} states, {} edges",
        dfa.state_count(),
        dfa.edge_count()
    );
    Ok(dfa)
}

/// The decimal divisibility DFA with a sink state for non-digit characters.
pub fn build_decimal_automaton_with_sink(divisor: u32) -> Result<Automaton, DivisibilityError> {
    build_automaton_with_sink(Base::Decimal, divisor)
}

fn add_digit_edges(dfa: &mut Automaton, base: Base, divisor: u32) -> Result<(), DivisibilityError> {
    let d = u64::from(divisor);
    let radix = u64::from(base.radix());
    let start = empty_input_state(divisor);
    let mut buf = [0u8; 4];

    for (value, digit) in base.digits().iter().enumerate() {
        let label = digit.encode_utf8(&mut buf);
        dfa.add_edge(start, (value as u64 % d) as StateId, label)?;
    }

    // On each digit: value = value * radix + digit
    for remainder in 0..d {
        for (value, digit) in base.digits().iter().enumerate() {
            let target = (radix * remainder + value as u64) % d;
            let label = digit.encode_utf8(&mut buf);
            dfa.add_edge(remainder as StateId, target as StateId, label)?;
        }
    }
    Ok(())
}
