// Regex synthesis by state elimination.
//
// Every state except the accept state is eliminated in a fixed order. The
// accepted language does not depend on the order; the text of the regex does.

use log::debug;

use crate::automaton::Automaton;
use crate::equation::EquationSystem;
use crate::{DivisibilityError, StateId};

/// Order in which non-accept states are eliminated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EliminationOrder {
    /// Ascending state index, skipping the accept state.
    #[default]
    Ascending,
    /// Descending state index, skipping the accept state.
    Descending,
    /// Exactly these states, in this order. Must list every state except the
    /// accept state once.
    Explicit(Vec<StateId>),
}

impl EliminationOrder {
    /// The concrete sequence of states to eliminate for an automaton with
    /// `state_count` states and the given accept state.
    pub fn resolve(
        &self,
        state_count: usize,
        accept: StateId,
    ) -> Result<Vec<StateId>, DivisibilityError> {
        let others = (0..state_count).filter(|&s| s != accept);
        match self {
            EliminationOrder::Ascending => Ok(others.collect()),
            EliminationOrder::Descending => Ok(others.rev().collect()),
            EliminationOrder::Explicit(order) => {
                let mut seen = vec![false; state_count];
                for &state in order {
                    if state >= state_count {
                        return Err(DivisibilityError::InvalidState { state, state_count });
                    }
                    if state == accept {
                        return Err(DivisibilityError::InvalidEliminationOrder(format!(
                            "accept state {accept} cannot be eliminated"
                        )));
                    }
                    if std::mem::replace(&mut seen[state], true) {
                        return Err(DivisibilityError::InvalidEliminationOrder(format!(
                            "state {state} listed more than once"
                        )));
                    }
                }
                if let Some(missing) = others.clone().find(|&s| !seen[s]) {
                    return Err(DivisibilityError::InvalidEliminationOrder(format!(
                        "state {missing} is never eliminated"
                    )));
                }
                Ok(order.clone())
            }
        }
    }
}

/// Options for [`synthesize_regex_with`].
#[derive(Debug, Clone, Default)]
pub struct SynthesisOptions {
    pub order: EliminationOrder,
}

/// Convert `automaton` to an anchored regex matching exactly the strings that
/// lead from its start state to `accept`, eliminating states in ascending order.
pub fn synthesize_regex(automaton: &Automaton, accept: StateId) -> Result<String, DivisibilityError> {
    synthesize_regex_with(automaton, accept, &SynthesisOptions::default())
}

/// [`synthesize_regex`] with an explicit elimination order.
///
/// The result is `^C(L)*$`, where after elimination the accept state's equation
/// reads `R = R L + C`.
pub fn synthesize_regex_with(
    automaton: &Automaton,
    accept: StateId,
    options: &SynthesisOptions,
) -> Result<String, DivisibilityError> {
    automaton.check_state(accept)?;
    let order = options.order.resolve(automaton.state_count(), accept)?;

    let mut equations = EquationSystem::from_automaton(automaton);
    for state in order {
        equations.eliminate(state)?;
    }

    let solution = equations.solution(accept)?;
    let expr = solution
        .expr()
        .ok_or(DivisibilityError::UnreachableAccept(accept))?;
    let regex = expr.render_anchored();
    debug!(
        "synthesized regex for accept state {accept} from {} states: {} bytes",
        automaton.state_count(),
        regex.len()
    );
    Ok(regex)
}
