//! Residue-residue contact graphs.
//!
//! An undirected graph with one node per residue and one edge per residue
//! pair in contact. Edge weights are atomic contact counts supplied by the
//! structure loader; the annotation stages only add labels on top.

use std::collections::{BTreeMap, BTreeSet};

use contacta_core::{ContactaError, Result, Summarizable};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::types::{Contact, ResidueId, ResidueNode};

/// Weighted residue contact graph with fixed-schema node and edge records.
#[derive(Debug, Clone, Default)]
pub struct ContactGraph {
    graph: StableUnGraph<ResidueNode, Contact>,
    index: BTreeMap<ResidueId, NodeIndex>,
}

impl ContactGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(residue, residue, weight)` triples.
    pub fn from_contacts<I>(contacts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ResidueId, ResidueId, u32)>,
    {
        let mut graph = Self::new();
        for (a, b, weight) in contacts {
            graph.add_contact(a, b, weight)?;
        }
        Ok(graph)
    }

    /// Insert a residue node if absent, returning its index.
    pub fn add_residue(&mut self, id: ResidueId) -> NodeIndex {
        if let Some(&ix) = self.index.get(&id) {
            return ix;
        }
        let ix = self.graph.add_node(ResidueNode::new(id));
        self.index.insert(id, ix);
        ix
    }

    /// Record `weight` atomic contacts between two residues.
    ///
    /// Both residues are inserted if absent. Repeated pairs accumulate weight
    /// regardless of orientation.
    ///
    /// # Errors
    ///
    /// Self-contacts, zero weights and weight overflow are rejected.
    pub fn add_contact(&mut self, a: ResidueId, b: ResidueId, weight: u32) -> Result<()> {
        if a == b {
            return Err(ContactaError::InvalidInput(format!(
                "self-contact on residue {}",
                a
            )));
        }
        if weight == 0 {
            return Err(ContactaError::InvalidInput(format!(
                "zero-weight contact between {} and {}",
                a, b
            )));
        }
        let ia = self.add_residue(a);
        let ib = self.add_residue(b);
        match self.graph.find_edge(ia, ib) {
            Some(e) => {
                let contact = &mut self.graph[e];
                contact.weight = contact.weight.checked_add(weight).ok_or_else(|| {
                    ContactaError::InvalidInput(format!(
                        "contact weight overflow between {} and {}",
                        a, b
                    ))
                })?;
            }
            None => {
                self.graph.add_edge(ia, ib, Contact::new(weight));
            }
        }
        Ok(())
    }

    /// Number of residues.
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Number of contacts.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no residues.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether a residue is present.
    pub fn contains(&self, id: &ResidueId) -> bool {
        self.index.contains_key(id)
    }

    /// Residue keys in ascending `(chain, position)` order.
    pub fn residues(&self) -> impl Iterator<Item = ResidueId> + '_ {
        self.index.keys().copied()
    }

    /// Residue nodes in ascending `(chain, position)` order.
    pub fn nodes(&self) -> impl Iterator<Item = &ResidueNode> + '_ {
        self.index.values().map(move |&ix| &self.graph[ix])
    }

    /// Distinct chain identifiers present.
    pub fn chains(&self) -> BTreeSet<char> {
        self.index.keys().map(|id| id.chain).collect()
    }

    /// Look up a residue node.
    pub fn node(&self, id: &ResidueId) -> Option<&ResidueNode> {
        self.index.get(id).map(|&ix| &self.graph[ix])
    }

    pub(crate) fn node_mut(&mut self, id: &ResidueId) -> Option<&mut ResidueNode> {
        let ix = *self.index.get(id)?;
        self.graph.node_weight_mut(ix)
    }

    /// The contact between two residues, in either orientation.
    pub fn contact(&self, a: &ResidueId, b: &ResidueId) -> Option<&Contact> {
        let ia = *self.index.get(a)?;
        let ib = *self.index.get(b)?;
        self.graph.find_edge(ia, ib).map(|e| &self.graph[e])
    }

    /// All contacts as `(residue, residue, contact)`.
    pub fn contacts(&self) -> impl Iterator<Item = (ResidueId, ResidueId, &Contact)> + '_ {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()].id,
                self.graph[e.target()].id,
                e.weight(),
            )
        })
    }

    /// Contacts incident to a residue as `(neighbour, contact)`.
    pub fn incident(&self, id: &ResidueId) -> Vec<(ResidueId, &Contact)> {
        let Some(&ix) = self.index.get(id) else {
            return Vec::new();
        };
        self.graph
            .edges(ix)
            .map(|e| {
                let other = if e.source() == ix { e.target() } else { e.source() };
                (self.graph[other].id, e.weight())
            })
            .collect()
    }

    /// Sum of incident contact weights.
    pub fn weighted_degree(&self, id: &ResidueId) -> u64 {
        self.incident(id)
            .iter()
            .map(|(_, c)| u64::from(c.weight))
            .sum()
    }

    /// Edge handles with their endpoint keys, for in-place edge annotation.
    pub(crate) fn edge_keys(&self) -> Vec<(EdgeIndex, ResidueId, ResidueId)> {
        self.graph
            .edge_references()
            .map(|e| (e.id(), self.graph[e.source()].id, self.graph[e.target()].id))
            .collect()
    }

    pub(crate) fn contact_mut(&mut self, e: EdgeIndex) -> Option<&mut Contact> {
        self.graph.edge_weight_mut(e)
    }

    /// Remove every residue matching `predicate`, with its contacts.
    ///
    /// Returns the number of residues removed.
    pub fn remove_residues<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&ResidueId) -> bool,
    {
        let doomed: Vec<ResidueId> = self.index.keys().copied().filter(|id| predicate(id)).collect();
        for id in &doomed {
            if let Some(ix) = self.index.remove(id) {
                self.graph.remove_node(ix);
            }
        }
        doomed.len()
    }
}

impl Summarizable for ContactGraph {
    fn summary(&self) -> String {
        let total: u64 = self.contacts().map(|(_, _, c)| u64::from(c.weight)).sum();
        format!(
            "ContactGraph — {} residue(s) on {} chain(s), {} contact(s), {} atomic contact(s)",
            self.node_count(),
            self.chains().len(),
            self.edge_count(),
            total,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(chain: char, position: i32) -> ResidueId {
        ResidueId::new(chain, position)
    }

    fn make_test_graph() -> ContactGraph {
        ContactGraph::from_contacts([
            (r('A', 1), r('A', 2), 5),
            (r('A', 2), r('A', 3), 4),
            (r('A', 1), r('A', 4), 2),
            (r('A', 3), r('B', 1), 3),
        ])
        .unwrap()
    }

    #[test]
    fn builds_nodes_and_edges() {
        let g = make_test_graph();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.chains().len(), 2);
        let order: Vec<_> = g.residues().collect();
        assert_eq!(order.first(), Some(&r('A', 1)));
        assert_eq!(order.last(), Some(&r('B', 1)));
    }

    #[test]
    fn contact_lookup_either_orientation() {
        let g = make_test_graph();
        assert_eq!(g.contact(&r('A', 1), &r('A', 2)).unwrap().weight, 5);
        assert_eq!(g.contact(&r('A', 2), &r('A', 1)).unwrap().weight, 5);
        assert!(g.contact(&r('A', 1), &r('A', 3)).is_none());
    }

    #[test]
    fn repeated_pairs_accumulate() {
        let mut g = make_test_graph();
        g.add_contact(r('A', 2), r('A', 1), 3).unwrap();
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.contact(&r('A', 1), &r('A', 2)).unwrap().weight, 8);
    }

    #[test]
    fn rejects_bad_contacts() {
        let mut g = ContactGraph::new();
        assert!(g.add_contact(r('A', 1), r('A', 1), 1).is_err());
        assert!(g.add_contact(r('A', 1), r('A', 2), 0).is_err());
        g.add_contact(r('A', 1), r('A', 2), u32::MAX).unwrap();
        assert!(g.add_contact(r('A', 1), r('A', 2), 1).is_err());
    }

    #[test]
    fn weighted_degree_and_incident() {
        let g = make_test_graph();
        assert_eq!(g.weighted_degree(&r('A', 1)), 7);
        assert_eq!(g.weighted_degree(&r('A', 3)), 7);
        let mut neighbours: Vec<_> = g.incident(&r('A', 3)).into_iter().map(|(n, _)| n).collect();
        neighbours.sort();
        assert_eq!(neighbours, vec![r('A', 2), r('B', 1)]);
        assert!(g.incident(&r('Z', 9)).is_empty());
    }

    #[test]
    fn removing_residues_drops_their_contacts() {
        let mut g = make_test_graph();
        let removed = g.remove_residues(|id| id.chain == 'B');
        assert_eq!(removed, 1);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.weighted_degree(&r('A', 3)), 4);
        // Remaining handles stay valid after removal.
        assert_eq!(g.contact(&r('A', 3), &r('A', 2)).unwrap().weight, 4);
    }

    #[test]
    fn summary_counts() {
        let g = make_test_graph();
        let s = g.summary();
        assert!(s.contains("5 residue(s)"));
        assert!(s.contains("2 chain(s)"));
        assert!(s.contains("14 atomic contact(s)"));
    }
}
