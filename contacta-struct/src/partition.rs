//! Local partitioning: per-residue distribution of contact weight over the
//! four relation classes.

use contacta_core::{ContactaError, Result};

use crate::contact::ContactGraph;
use crate::types::{LocalPartitioning, ResidueId};

/// What to do with a residue whose weighted degree is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsolatedNodePolicy {
    /// Fail with [`ContactaError::IsolatedNode`].
    #[default]
    Fail,
    /// Assign the all-zero vector.
    Zero,
}

/// Compute the local partitioning vector of one residue.
///
/// Every incident contact must already carry a relation.
pub fn local_partitioning(
    graph: &ContactGraph,
    id: &ResidueId,
    policy: IsolatedNodePolicy,
) -> Result<LocalPartitioning> {
    let mut mass = [0u64; 4];
    let mut total = 0u64;
    for (neighbour, contact) in graph.incident(id) {
        let relation = contact.relation.ok_or_else(|| {
            ContactaError::InvalidInput(format!(
                "contact {}-{} has no relation class",
                id, neighbour
            ))
        })?;
        mass[relation.index()] += u64::from(contact.weight);
        total += u64::from(contact.weight);
    }

    if total == 0 {
        return match policy {
            IsolatedNodePolicy::Fail => Err(ContactaError::IsolatedNode(id.to_string())),
            IsolatedNodePolicy::Zero => Ok(LocalPartitioning::default()),
        };
    }

    let w = total as f64;
    Ok(LocalPartitioning(mass.map(|m| m as f64 / w)))
}

/// Attach a local partitioning vector to every residue of `graph`.
pub fn assign_local_partitioning(graph: &mut ContactGraph, policy: IsolatedNodePolicy) -> Result<()> {
    let ids: Vec<ResidueId> = graph.residues().collect();
    let mut isolated = 0usize;
    for id in ids {
        let lp = local_partitioning(graph, &id, policy)?;
        if lp.total() == 0.0 {
            isolated += 1;
        }
        if let Some(node) = graph.node_mut(&id) {
            node.local_partitioning = Some(lp);
        }
    }
    log::debug!(
        "local partitioning: {} residue(s), {} isolated",
        graph.node_count(),
        isolated
    );
    Ok(())
}
