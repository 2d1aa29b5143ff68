//! Chain and position-range selection over a contact graph.

use std::collections::BTreeSet;

use crate::contact::ContactGraph;

/// Which residues of a contact graph to keep.
///
/// `None` fields mean "everything": all chains present, and the minimum or
/// maximum position of the graph at the time the selection is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidueSelection {
    /// Chains to keep.
    pub chains: Option<BTreeSet<char>>,
    /// First position to keep (inclusive).
    pub start: Option<i32>,
    /// Last position to keep (inclusive).
    pub stop: Option<i32>,
}

impl ResidueSelection {
    /// Keep everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to the given chains.
    pub fn with_chains(mut self, chains: impl IntoIterator<Item = char>) -> Self {
        self.chains = Some(chains.into_iter().collect());
        self
    }

    /// Restrict to the inclusive position range `[start, stop]`.
    pub fn with_range(mut self, start: Option<i32>, stop: Option<i32>) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }

    /// Chains that survive this selection on `graph`.
    pub fn selected_chains(&self, graph: &ContactGraph) -> BTreeSet<char> {
        match &self.chains {
            Some(chains) => chains.clone(),
            None => graph.chains(),
        }
    }

    /// Remove unselected residues (and their contacts) from `graph`.
    ///
    /// Position bounds default to the extremes of the residues present when
    /// this is called. Returns the number of residues removed; an empty result
    /// graph is not an error.
    pub fn apply(&self, graph: &mut ContactGraph) -> usize {
        let positions = graph.residues().map(|id| id.position);
        let (lo, hi) = positions.fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p), hi.max(p)));
        let start = self.start.unwrap_or(lo);
        let stop = self.stop.unwrap_or(hi);

        let removed = graph.remove_residues(|id| {
            let outside = id.position < start || id.position > stop;
            let unselected = self
                .chains
                .as_ref()
                .is_some_and(|chains| !chains.contains(&id.chain));
            outside || unselected
        });
        log::debug!(
            "residue selection [{}, {}] chains {:?}: removed {} residue(s), {} remain",
            start,
            stop,
            self.chains,
            removed,
            graph.node_count()
        );
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResidueId;
    use proptest::prelude::*;

    fn r(chain: char, position: i32) -> ResidueId {
        ResidueId::new(chain, position)
    }

    fn two_chain_graph() -> ContactGraph {
        ContactGraph::from_contacts([
            (r('A', 1), r('A', 2), 1),
            (r('A', 2), r('A', 3), 1),
            (r('A', 3), r('A', 10), 2),
            (r('A', 10), r('B', 5), 1),
            (r('B', 5), r('B', 6), 4),
        ])
        .unwrap()
    }

    #[test]
    fn default_selection_keeps_everything() {
        let mut g = two_chain_graph();
        assert_eq!(ResidueSelection::all().apply(&mut g), 0);
        assert_eq!(g.node_count(), 6);
    }

    #[test]
    fn range_selection() {
        let mut g = two_chain_graph();
        let removed = ResidueSelection::all()
            .with_range(Some(2), Some(6))
            .apply(&mut g);
        assert_eq!(removed, 2); // A1, A10
        assert!(!g.contains(&r('A', 1)));
        assert!(!g.contains(&r('A', 10)));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn open_ended_range_uses_live_extremes() {
        let mut g = two_chain_graph();
        let removed = ResidueSelection::all().with_range(Some(5), None).apply(&mut g);
        assert_eq!(removed, 3); // A1, A2, A3
        assert!(g.contains(&r('A', 10)));
        assert!(g.contains(&r('B', 5)));
    }

    #[test]
    fn chain_selection_executes() {
        let mut g = two_chain_graph();
        let removed = ResidueSelection::all().with_chains(['B']).apply(&mut g);
        assert_eq!(removed, 4);
        assert_eq!(g.chains(), BTreeSet::from(['B']));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn empty_result_is_fine() {
        let mut g = two_chain_graph();
        ResidueSelection::all().with_chains(['Z']).apply(&mut g);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(ResidueSelection::all().apply(&mut g), 0);
    }

    proptest! {
        #[test]
        fn selection_is_idempotent(
            contacts in proptest::collection::vec((0i32..40, 0i32..40, 1u32..10, any::<bool>()), 1..60),
            start in proptest::option::of(0i32..40),
            stop in proptest::option::of(0i32..40),
            keep_b in any::<bool>(),
        ) {
            let mut g = ContactGraph::new();
            for (a, b, w, cross) in contacts {
                let other = if cross { 'B' } else { 'A' };
                if a != b || cross {
                    g.add_contact(r('A', a), r(other, b), w).unwrap();
                }
            }
            let mut sel = ResidueSelection::all().with_range(start, stop);
            if keep_b {
                sel = sel.with_chains(['B']);
            }
            sel.apply(&mut g);
            let after_first = g.node_count();
            prop_assert_eq!(sel.apply(&mut g), 0);
            prop_assert_eq!(g.node_count(), after_first);
        }
    }
}
