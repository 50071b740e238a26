//! End-to-end checks: compile synthesized expressions with the `regex` crate and
//! compare them with integer arithmetic.
//!
//! Expressions grow quickly with the divisor (decimal 9 is several hundred
//! kilobytes), so matching tests stay at small divisors while the structural
//! checks on the equation system run much further.

use divregex_automaton::{
    Automaton, Base, DivisibilityError, EliminationOrder, EquationSystem, REMAINDER_ZERO,
    SynthesisOptions, build_automaton, build_decimal_automaton_with_sink, divisibility_regex,
    empty_input_state, synthesize_regex_with,
};
use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use regex::{Regex, RegexBuilder};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .size_limit(1 << 30)
        .dfa_size_limit(1 << 30)
        .nest_limit(10_000)
        .build()
        .unwrap_or_else(|e| panic!("failed to compile {} byte regex: {e}", pattern.len()))
}

fn regex_for(base: Base, divisor: u32) -> Regex {
    let pattern = divisibility_regex(base, divisor)
        .unwrap_or_else(|e| panic!("synthesis failed for {base} {divisor}: {e}"));
    compile(&pattern)
}

fn started(base: Base, divisor: u32) -> Automaton {
    let mut dfa = build_automaton(base, divisor).unwrap();
    dfa.set_start(empty_input_state(divisor)).unwrap();
    dfa
}

fn is_divisible(base: Base, s: &str, divisor: u32) -> bool {
    let value = base
        .parse(s)
        .unwrap_or_else(|| panic!("{s:?} is not a {base} numeral"));
    value % u128::from(divisor) == 0
}

fn assert_matches_arithmetic(re: &Regex, base: Base, divisor: u32, samples: u64) {
    for n in 0..samples {
        let s = base.format(n);
        assert_eq!(
            re.is_match(&s),
            n % u64::from(divisor) == 0,
            "{base} divisor {divisor}: {s}"
        );
    }
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn decimal_by_two() {
    let re = regex_for(Base::Decimal, 2);
    for s in ["0", "10", "124"] {
        assert!(re.is_match(s), "{s}");
    }
    for s in ["", "1", "123"] {
        assert!(!re.is_match(s), "{s}");
    }
}

#[test]
fn decimal_by_three() {
    let re = regex_for(Base::Decimal, 3);
    for s in ["0", "3", "12", "999"] {
        assert!(re.is_match(s), "{s}");
    }
    for s in ["1", "100"] {
        assert!(!re.is_match(s), "{s}");
    }
}

#[test]
fn binary_by_two() {
    let re = regex_for(Base::Binary, 2);
    for s in ["0", "10", "100"] {
        assert!(re.is_match(s), "{s}");
    }
    for s in ["", "1", "11"] {
        assert!(!re.is_match(s), "{s}");
    }
}

#[test]
fn hexadecimal_by_five() {
    let re = regex_for(Base::Hexadecimal, 5);
    for s in ["5", "A", "F", "14", "1", "10", "FF", "100"] {
        assert_eq!(re.is_match(s), is_divisible(Base::Hexadecimal, s, 5), "{s}");
    }
    // 0x14 = 20, 0xF = 15
    assert!(re.is_match("14"));
    assert!(re.is_match("F"));
    assert!(!re.is_match("10"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn matches_divisibility_in_every_base() {
    for base in Base::ALL {
        for divisor in 1..=7 {
            let re = regex_for(base, divisor);
            assert_matches_arithmetic(&re, base, divisor, 400 * u64::from(divisor));
        }
    }
}

#[test]
fn never_matches_the_empty_string() {
    for base in Base::ALL {
        for divisor in 1..=7 {
            assert!(!regex_for(base, divisor).is_match(""), "{base} {divisor}");
        }
    }
}

#[test]
fn leading_zeros_are_accepted() {
    let re = regex_for(Base::Decimal, 4);
    assert!(re.is_match("0008"));
    assert!(re.is_match("00"));
    assert!(!re.is_match("0006"));
}

#[test]
fn whole_string_only() {
    let re = regex_for(Base::Decimal, 5);
    assert!(!re.is_match("x10"));
    assert!(!re.is_match("10x"));
    assert!(!re.is_match("1 0"));
    assert!(!re.is_match("a"));
}

#[test]
fn regex_agrees_with_the_automaton() {
    for base in Base::ALL {
        for divisor in 1..=5 {
            let dfa = started(base, divisor);
            let pattern =
                synthesize_regex_with(&dfa, REMAINDER_ZERO, &SynthesisOptions::default()).unwrap();
            let re = compile(&pattern);
            let digits = base.digits();
            // every string of length <= 3 over the digit alphabet
            let mut strings = vec![String::new()];
            for _ in 0..3 {
                let next: Vec<String> = strings
                    .iter()
                    .flat_map(|s| digits.iter().map(move |d| format!("{s}{d}")))
                    .collect();
                for s in &next {
                    assert_eq!(
                        re.is_match(s),
                        dfa.accepts(s, REMAINDER_ZERO),
                        "{base} {divisor} {s}"
                    );
                }
                strings = next;
            }
        }
    }
}

#[test]
fn descending_order_is_language_equivalent() {
    let options = SynthesisOptions {
        order: EliminationOrder::Descending,
    };
    for base in Base::ALL {
        for divisor in 1..=6 {
            let dfa = started(base, divisor);
            let pattern = synthesize_regex_with(&dfa, REMAINDER_ZERO, &options).unwrap();
            assert_matches_arithmetic(&compile(&pattern), base, divisor, 300 * u64::from(divisor));
        }
    }
}

#[test]
fn sink_variant_matches_the_same_language() {
    for divisor in 1..=6 {
        let mut dfa = build_decimal_automaton_with_sink(divisor).unwrap();
        dfa.set_start(empty_input_state(divisor)).unwrap();
        let pattern =
            synthesize_regex_with(&dfa, REMAINDER_ZERO, &SynthesisOptions::default()).unwrap();
        let re = compile(&pattern);
        assert_matches_arithmetic(&re, Base::Decimal, divisor, 300 * u64::from(divisor));
        assert!(!re.is_match("12a"));
    }
}

/// After eliminating every other state, only the self-loop and constant of
/// remainder zero remain, for every base and a wide range of divisors.
#[test]
fn elimination_leaves_only_loop_and_constant() {
    for base in Base::ALL {
        for divisor in 1..=50u32 {
            let dfa = started(base, divisor);
            let mut equations = EquationSystem::from_automaton(&dfa);
            for state in EliminationOrder::Ascending
                .resolve(dfa.state_count(), REMAINDER_ZERO)
                .unwrap()
            {
                equations.eliminate(state).unwrap();
            }
            assert!(equations.live_terms(REMAINDER_ZERO).is_empty(), "{base} {divisor}");
            let solution = equations.solution(REMAINDER_ZERO).unwrap();
            assert!(solution.self_loop.is_some(), "{base} {divisor}");
            assert!(solution.constant.is_some(), "{base} {divisor}");
        }
    }
}

#[test]
fn skipping_a_state_is_an_internal_inconsistency() {
    let dfa = started(Base::Decimal, 3);
    let mut equations = EquationSystem::from_automaton(&dfa);
    equations.eliminate(1).unwrap();
    equations.eliminate(3).unwrap();
    match equations.solution(REMAINDER_ZERO) {
        Err(DivisibilityError::InternalInconsistency { state, live }) => {
            assert_eq!(state, REMAINDER_ZERO);
            assert_eq!(live, [2]);
        }
        other => panic!("expected an inconsistency, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Random elimination orders
// ---------------------------------------------------------------------------

/// A base, a divisor and a random permutation of the non-accept states.
#[derive(Debug, Clone)]
struct OrderCase {
    base: Base,
    divisor: u32,
    order: Vec<usize>,
}

impl Arbitrary for OrderCase {
    fn arbitrary(g: &mut Gen) -> Self {
        let base = *g.choose(&Base::ALL).unwrap();
        let divisor = u32::arbitrary(g) % 6 + 1;
        let mut order: Vec<usize> = (1..=divisor as usize).collect();
        // Fisher-Yates driven by the generator
        for i in (1..order.len()).rev() {
            let j = usize::arbitrary(g) % (i + 1);
            order.swap(i, j);
        }
        OrderCase {
            base,
            divisor,
            order,
        }
    }
}

fn any_order_is_language_equivalent(case: OrderCase) -> TestResult {
    let options = SynthesisOptions {
        order: EliminationOrder::Explicit(case.order.clone()),
    };
    let dfa = started(case.base, case.divisor);
    let pattern = match synthesize_regex_with(&dfa, REMAINDER_ZERO, &options) {
        Ok(p) => p,
        Err(e) => return TestResult::error(format!("{case:?}: {e}")),
    };
    let re = compile(&pattern);
    if re.is_match("") {
        return TestResult::failed();
    }
    for n in 0..200 * u64::from(case.divisor) {
        let s = case.base.format(n);
        if re.is_match(&s) != (n % u64::from(case.divisor) == 0) {
            return TestResult::error(format!("{case:?}: mismatch on {s}"));
        }
    }
    TestResult::passed()
}

#[test]
fn elimination_order_independence() {
    QuickCheck::new()
        .tests(40)
        .quickcheck(any_order_is_language_equivalent as fn(OrderCase) -> TestResult);
}
