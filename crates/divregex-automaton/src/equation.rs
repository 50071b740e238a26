// Linear equation system over regex fragments.
//
// One equation per state i, in the "reverse" (incoming-edge) view:
//
//     R_i = R_0 L_0i + R_1 L_1i + ... + R_{n-1} L_{n-1,i} [+ eps if i is the start]
//
// R_i is the set of strings leading from the start state to i, and L_ji is the
// merged label on edge j -> i. Coefficients multiply on the right throughout:
// Arden's rule solves R = R L + C as R = C L*.

use log::debug;

use divregex_core::Expr;

use crate::automaton::Automaton;
use crate::{DivisibilityError, StateId};

/// Dense equation matrix.
///
/// `rows[i][j]` is the coefficient of `R_j` in the equation of `R_i`, and
/// `rows[i][n]` is its constant term. `None` means the term is absent, which is
/// distinct from `Some(Expr::Empty)`, the empty string.
#[derive(Debug, Clone)]
pub struct EquationSystem {
    state_count: usize,
    rows: Vec<Vec<Option<Expr>>>,
}

/// The accept state's equation once every other state is eliminated:
/// `R = R self_loop + constant`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub self_loop: Option<Expr>,
    pub constant: Option<Expr>,
}

impl Solution {
    /// `constant self_loop*`, or `None` if there is no constant (empty language).
    pub fn expr(&self) -> Option<Expr> {
        let constant = self.constant.clone()?;
        Some(match &self.self_loop {
            Some(l) => constant.concat(l.clone().star()),
            None => constant,
        })
    }
}

impl EquationSystem {
    /// Derive the equations from `automaton`. Parallel edges are merged into a
    /// single alternation; the start state gets the constant term epsilon.
    pub fn from_automaton(automaton: &Automaton) -> Self {
        let n = automaton.state_count();
        let start = automaton.start_state();
        let rows = (0..n)
            .map(|target| {
                let mut row: Vec<Option<Expr>> = (0..n)
                    .map(|source| {
                        let labels = automaton.labels(source, target);
                        Expr::union(labels.iter().map(|label| Expr::literal(label)))
                    })
                    .collect();
                row.push((target == start).then_some(Expr::Empty));
                row
            })
            .collect();
        Self {
            state_count: n,
            rows,
        }
    }

    /// Number of equations (states).
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Coefficient of `R_term` in the equation of `R_state`.
    pub fn coefficient(&self, state: StateId, term: StateId) -> Option<&Expr> {
        self.rows.get(state)?.get(term)?.as_ref()
    }

    /// Constant term of the equation of `R_state`.
    pub fn constant(&self, state: StateId) -> Option<&Expr> {
        self.rows.get(state)?.get(self.state_count)?.as_ref()
    }

    /// Self-loop coefficient of `R_state`.
    pub fn self_loop(&self, state: StateId) -> Option<&Expr> {
        self.coefficient(state, state)
    }

    /// States other than `state` that still appear in its equation.
    pub fn live_terms(&self, state: StateId) -> Vec<StateId> {
        let Some(row) = self.rows.get(state) else {
            return Vec::new();
        };
        row[..self.state_count]
            .iter()
            .enumerate()
            .filter(|&(term, coeff)| term != state && coeff.is_some())
            .map(|(term, _)| term)
            .collect()
    }

    /// Remove `state` from the system: resolve its self-loop, substitute its
    /// equation into every equation that references it, then clear its row.
    pub fn eliminate(&mut self, state: StateId) -> Result<(), DivisibilityError> {
        if state >= self.state_count {
            return Err(DivisibilityError::InvalidState {
                state,
                state_count: self.state_count,
            });
        }
        let had_loop = self.apply_arden(state);
        let referencing = self.substitute(state);
        debug!(
            "eliminated state {state} (self-loop: {had_loop}, substituted into {referencing} equations)"
        );
        self.rows[state].iter_mut().for_each(|slot| *slot = None);
        Ok(())
    }

    /// Arden's rule: `R_s = R_s L + rest` becomes `R_s = rest L*`. Returns
    /// whether there was a self-loop.
    fn apply_arden(&mut self, state: StateId) -> bool {
        let Some(self_label) = self.rows[state][state].take() else {
            return false;
        };
        let star = self_label.star();
        for slot in self.rows[state].iter_mut() {
            if let Some(coeff) = slot.take() {
                *slot = Some(coeff.concat(star.clone()));
            }
        }
        true
    }

    /// Replace `R_state` in every other equation by its (loop-free) right-hand
    /// side. A reference `R_state c` contributes `R_k (t_k c)` for each term
    /// `R_k t_k` of the replacement, merged into the existing term by alternation.
    /// Returns the number of equations rewritten.
    fn substitute(&mut self, state: StateId) -> usize {
        let replacement = self.rows[state].clone();
        let mut rewritten = 0;
        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == state {
                continue;
            }
            let Some(coeff) = row[state].take() else {
                continue;
            };
            rewritten += 1;
            for (slot, term) in row.iter_mut().zip(&replacement) {
                let Some(term) = term else {
                    continue;
                };
                let term = term.clone().concat(coeff.clone());
                *slot = Some(match slot.take() {
                    Some(existing) => existing.alt(term),
                    None => term,
                });
            }
        }
        rewritten
    }

    /// Check that only the self-loop and constant of `accept` remain and return
    /// them. Call after every other state has been eliminated.
    pub fn solution(&self, accept: StateId) -> Result<Solution, DivisibilityError> {
        if accept >= self.state_count {
            return Err(DivisibilityError::InvalidState {
                state: accept,
                state_count: self.state_count,
            });
        }
        let live = self.live_terms(accept);
        if !live.is_empty() {
            return Err(DivisibilityError::InternalInconsistency {
                state: accept,
                live,
            });
        }
        Ok(Solution {
            self_loop: self.self_loop(accept).cloned(),
            constant: self.constant(accept).cloned(),
        })
    }
}
