// Automaton with a fixed set of integer-indexed states and string-labelled edges.

use hashbrown::HashMap;

use crate::{DivisibilityError, StateId};

/// A finite automaton over states `0..state_count`.
///
/// Edges are stored twice: keyed by `(source, target)` for building equations,
/// and per source state for simulation. Several labels may connect the same
/// ordered pair; they are kept in insertion order and merged into an
/// alternation when equations are built.
///
/// The state count is fixed at construction. The start state defaults to `0`
/// and must be set explicitly by the caller.
#[derive(Clone)]
pub struct Automaton {
    state_count: usize,
    start: StateId,
    /// `(source, target)` -> labels, in insertion order.
    edges: HashMap<(StateId, StateId), Vec<String>>,
    /// Per source state: `(label, target)`.
    outgoing: Vec<Vec<(String, StateId)>>,
}

impl std::fmt::Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("state_count", &self.state_count)
            .field("start", &self.start)
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

impl Automaton {
    /// Create an automaton with `state_count` states and no edges.
    pub fn new(state_count: usize) -> Self {
        Self {
            state_count,
            start: 0,
            edges: HashMap::new(),
            outgoing: vec![Vec::new(); state_count],
        }
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// The current start state.
    pub fn start_state(&self) -> StateId {
        self.start
    }

    /// Designate `state` as the start state.
    pub fn set_start(&mut self, state: StateId) -> Result<(), DivisibilityError> {
        self.check_state(state)?;
        self.start = state;
        Ok(())
    }

    /// Add an edge `source -> target` labelled with `label` (regex source text).
    pub fn add_edge(
        &mut self,
        source: StateId,
        target: StateId,
        label: &str,
    ) -> Result<(), DivisibilityError> {
        self.check_state(source)?;
        self.check_state(target)?;
        self.edges
            .entry((source, target))
            .or_default()
            .push(label.to_string());
        self.outgoing[source].push((label.to_string(), target));
        Ok(())
    }

    /// Labels on edges `source -> target`, in insertion order. Empty if there are none.
    pub fn labels(&self, source: StateId, target: StateId) -> &[String] {
        self.edges
            .get(&(source, target))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Outgoing `(label, target)` pairs of `state`, in insertion order.
    pub fn outgoing(&self, state: StateId) -> &[(String, StateId)] {
        self.outgoing.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of raw edges (parallel edges counted separately).
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    /// Target of the edge from `state` whose label is exactly `symbol`.
    pub fn transition(&self, state: StateId, symbol: &str) -> Option<StateId> {
        self.outgoing(state)
            .iter()
            .find(|(label, _)| label == symbol)
            .map(|&(_, target)| target)
    }

    /// Run the automaton from the start state, one character per step.
    ///
    /// Only edges whose label is exactly the character are followed; pattern
    /// labels such as `[^0-9]` are not interpreted. Returns `None` when no edge
    /// matches.
    pub fn run(&self, input: &str) -> Option<StateId> {
        let mut state = self.start;
        let mut buf = [0u8; 4];
        for ch in input.chars() {
            state = self.transition(state, ch.encode_utf8(&mut buf))?;
        }
        Some(state)
    }

    /// Whether running `input` ends in `accept`.
    pub fn accepts(&self, input: &str, accept: StateId) -> bool {
        self.run(input) == Some(accept)
    }

    pub(crate) fn check_state(&self, state: StateId) -> Result<(), DivisibilityError> {
        if state < self.state_count {
            Ok(())
        } else {
            Err(DivisibilityError::InvalidState {
                state,
                state_count: self.state_count,
            })
        }
    }
}
