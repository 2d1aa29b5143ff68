//! Node-wise comparison of two variants' local partitioning.

use std::collections::BTreeMap;

use contacta_core::{ContactaError, Result};

use crate::types::{LocalPartitioning, ResidueId};
use crate::variant::ProteinVariant;

/// Per-residue `second - first` component differences, ordered `[1D, 2D, 3D, 4D]`.
pub type PartitioningDifference = BTreeMap<ResidueId, [f64; 4]>;

/// Subtract two partitioning maps residue by residue.
///
/// # Errors
///
/// [`ContactaError::IncompatibleVariants`] unless both maps have exactly the
/// same residue keys (chain and position).
pub fn partitioning_difference(
    first: &BTreeMap<ResidueId, LocalPartitioning>,
    second: &BTreeMap<ResidueId, LocalPartitioning>,
) -> Result<PartitioningDifference> {
    let only_first = first.keys().filter(|k| !second.contains_key(k)).count();
    let only_second = second.keys().filter(|k| !first.contains_key(k)).count();
    if only_first > 0 || only_second > 0 {
        return Err(ContactaError::IncompatibleVariants {
            only_first,
            only_second,
        });
    }

    Ok(first
        .iter()
        .map(|(id, lp1)| (*id, second[id].sub(lp1)))
        .collect())
}

/// `variant2 - variant1` local partitioning difference.
pub fn local_partitioning_difference(
    variant1: &ProteinVariant,
    variant2: &ProteinVariant,
) -> Result<PartitioningDifference> {
    partitioning_difference(
        &variant1.local_partitioning(),
        &variant2.local_partitioning(),
    )
}
