//! Relation classes of residue contacts.
//!
//! Each contact is labeled by chain membership, sequence distance and shared
//! segment:
//!
//! - different chains → [`Relation::FourD`]
//! - same chain, sequence neighbours → [`Relation::OneD`]
//! - same chain and segment, fewer than 5 positions apart → [`Relation::TwoD`]
//! - any other same-chain contact → [`Relation::ThreeD`]

use contacta_core::{ContactaError, Result};

use crate::contact::ContactGraph;
use crate::types::{Relation, ResidueId};

/// Sequence distance below which same-segment contacts count as 2D.
pub const LOCAL_SEGMENT_WINDOW: u32 = 5;

/// Classify a contact between `u` and `v`.
///
/// Symmetric in its arguments.
pub fn classify(u: ResidueId, v: ResidueId, segment_u: &str, segment_v: &str) -> Relation {
    if !u.same_chain(&v) {
        return Relation::FourD;
    }
    let d = u.sequence_distance(&v);
    if d == 1 {
        Relation::OneD
    } else if segment_u == segment_v && d < LOCAL_SEGMENT_WINDOW {
        Relation::TwoD
    } else {
        Relation::ThreeD
    }
}

fn segment_of<'g>(graph: &'g ContactGraph, id: &ResidueId) -> Result<&'g str> {
    graph
        .node(id)
        .and_then(|n| n.secondary_structure.as_deref())
        .ok_or_else(|| ContactaError::InvalidInput(format!("residue {} has no segment label", id)))
}

/// Label every contact of `graph` with its relation class.
///
/// # Errors
///
/// Fails with [`ContactaError::InvalidInput`] if an endpoint has no segment
/// label yet; segment inference must run first.
pub fn assign_relations(graph: &mut ContactGraph) -> Result<()> {
    let mut counts = [0usize; 4];
    for (edge, u, v) in graph.edge_keys() {
        let relation = classify(u, v, segment_of(graph, &u)?, segment_of(graph, &v)?);
        if let Some(contact) = graph.contact_mut(edge) {
            contact.relation = Some(relation);
            counts[relation.index()] += 1;
        }
    }
    log::debug!(
        "relations: 1D={} 2D={} 3D={} 4D={}",
        counts[0],
        counts[1],
        counts[2],
        counts[3]
    );
    Ok(())
}
