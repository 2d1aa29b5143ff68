//! Residue-contact graph annotation for the contacta workspace.
//!
//! Given a weighted residue contact graph from a structure loader and the
//! structure file it came from, annotates every residue and contact:
//!
//! - **Selection** — chain and position-range filtering in [`selection`]
//! - **Residue types** — one- to three-letter code resolution in [`residue`]
//! - **Segments** — HELIX/SHEET records plus inferred loops in [`secondary`]
//! - **Relations** — 1D/2D/3D/4D contact classes in [`relation`]
//! - **Local partitioning** — per-residue class fractions in [`partition`]
//! - **Comparison** — variant-vs-variant differences in [`difference`]
//!
//! # Quick start
//!
//! ```
//! use contacta_struct::{ContactGraph, ProteinVariant, ResidueId, VariantOptions};
//!
//! let pdb_text = "\
//! HEADER                                                        1TST
//! HELIX    1  H1 ALA A    1  ALA A    3  1                                   3
//! ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
//! ATOM      2  CA  ALA A   2       0.000   0.000   0.000  1.00  0.00           C
//! ATOM      3  CA  ALA A   3       0.000   0.000   0.000  1.00  0.00           C
//! END
//! ";
//!
//! let a = |p| ResidueId::new('A', p);
//! let graph = ContactGraph::from_contacts([(a(1), a(2), 3), (a(1), a(3), 1)]).unwrap();
//! let variant = ProteinVariant::from_pdb_str(graph, pdb_text, &VariantOptions::new()).unwrap();
//!
//! let lp = variant.local_partitioning();
//! assert_eq!(lp[&a(1)].0, [0.75, 0.25, 0.0, 0.0]);
//! ```

pub mod contact;
pub mod difference;
pub mod partition;
pub mod pdb;
pub mod relation;
pub mod residue;
pub mod secondary;
pub mod selection;
pub mod types;
pub mod variant;

pub use contact::ContactGraph;
pub use difference::{local_partitioning_difference, partitioning_difference, PartitioningDifference};
pub use partition::IsolatedNodePolicy;
pub use pdb::StructureRecords;
pub use relation::classify;
pub use selection::ResidueSelection;
pub use types::{Contact, LocalPartitioning, Relation, ResidueId, ResidueNode};
pub use variant::{build_pair, ProteinVariant, VariantOptions};
