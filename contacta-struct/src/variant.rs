//! Annotated protein variants.
//!
//! A [`ProteinVariant`] owns one contact graph and runs the annotation
//! pipeline over it exactly once: residue selection, residue typing, segment
//! inference, relation classification, local partitioning. Once built it is
//! read-only.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use contacta_core::hash::FieldHasher;
use contacta_core::{Annotated, ContactaError, ContentAddressable, Result, Summarizable};

use crate::contact::ContactGraph;
use crate::partition::{assign_local_partitioning, IsolatedNodePolicy};
use crate::pdb::{RecordLine, StructureRecords};
use crate::relation::assign_relations;
use crate::residue::assign_residue_types;
use crate::secondary::assign_secondary_structure;
use crate::selection::ResidueSelection;
use crate::types::{LocalPartitioning, Relation, ResidueId, ResidueNode};

/// How to build a variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VariantOptions {
    /// Display name; defaults to the structure's PDB identifier.
    pub name: Option<String>,
    /// Residues to keep.
    pub selection: ResidueSelection,
    /// Zero-degree handling in the partitioning stage.
    pub isolated_nodes: IsolatedNodePolicy,
    /// Treat the first deferred failure as fatal.
    pub strict: bool,
}

impl VariantOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn chains(mut self, chains: impl IntoIterator<Item = char>) -> Self {
        self.selection = self.selection.with_chains(chains);
        self
    }

    pub fn range(mut self, start: Option<i32>, stop: Option<i32>) -> Self {
        self.selection = self.selection.with_range(start, stop);
        self
    }

    pub fn isolated_nodes(mut self, policy: IsolatedNodePolicy) -> Self {
        self.isolated_nodes = policy;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// One protein variant with its fully annotated contact graph.
#[derive(Debug)]
pub struct ProteinVariant {
    name: String,
    graph: ContactGraph,
    chains: BTreeSet<char>,
    diagnostics: Vec<ContactaError>,
    source_hash: Option<String>,
}

impl ProteinVariant {
    /// Annotate `graph` using loader-supplied residue codes and HELIX/SHEET
    /// records.
    ///
    /// # Errors
    ///
    /// Isolated residues under [`IsolatedNodePolicy::Fail`], and in strict
    /// mode the first unknown residue code or malformed record. Otherwise
    /// per-residue and per-record failures are collected in
    /// [`diagnostics`](Self::diagnostics).
    pub fn build<'a, I>(
        mut graph: ContactGraph,
        residue_codes: I,
        records: &[RecordLine],
        options: &VariantOptions,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (ResidueId, &'a str)>,
    {
        let name = options.name.clone().unwrap_or_else(|| "variant".to_string());
        let chains = options.selection.selected_chains(&graph);
        options.selection.apply(&mut graph);

        let mut diagnostics = assign_residue_types(&mut graph, residue_codes);
        diagnostics.extend(assign_secondary_structure(&mut graph, records));
        if options.strict && !diagnostics.is_empty() {
            return Err(diagnostics.remove(0));
        }
        for d in &diagnostics {
            log::warn!("{}: {}", name, d);
        }

        assign_relations(&mut graph)?;
        assign_local_partitioning(&mut graph, options.isolated_nodes)?;

        log::info!(
            "built variant {}: {} residue(s), {} contact(s), {} diagnostic(s)",
            name,
            graph.node_count(),
            graph.edge_count(),
            diagnostics.len()
        );

        Ok(Self {
            name,
            graph,
            chains,
            diagnostics,
            source_hash: None,
        })
    }

    /// Annotate `graph` with records read from a structure file.
    pub fn from_records(
        graph: ContactGraph,
        records: &StructureRecords,
        options: &VariantOptions,
    ) -> Result<Self> {
        let mut options = options.clone();
        if options.name.is_none() {
            options.name = Some(records.id.clone());
        }
        let codes = records.residues.iter().map(|(id, code)| (*id, code.as_str()));
        let mut variant = Self::build(graph, codes, &records.secondary, &options)?;
        variant.source_hash = Some(records.source_hash.clone());
        Ok(variant)
    }

    /// Annotate `graph` with records from PDB-format text.
    pub fn from_pdb_str(graph: ContactGraph, pdb: &str, options: &VariantOptions) -> Result<Self> {
        Self::from_records(graph, &StructureRecords::from_pdb_str(pdb), options)
    }

    /// Annotate `graph` with records from a PDB file on disk.
    pub fn from_pdb_file(
        graph: ContactGraph,
        path: impl AsRef<Path>,
        options: &VariantOptions,
    ) -> Result<Self> {
        Self::from_records(graph, &StructureRecords::from_pdb_file(path)?, options)
    }

    /// The annotated contact graph.
    pub fn graph(&self) -> &ContactGraph {
        &self.graph
    }

    /// Chains this variant was built for.
    pub fn chains(&self) -> &BTreeSet<char> {
        &self.chains
    }

    /// Deferred per-residue and per-record failures.
    pub fn diagnostics(&self) -> &[ContactaError] {
        &self.diagnostics
    }

    /// SHA-256 of the structure file, when built from one.
    pub fn source_hash(&self) -> Option<&str> {
        self.source_hash.as_deref()
    }

    /// Annotations of one residue.
    pub fn residue(&self, id: &ResidueId) -> Option<&ResidueNode> {
        self.graph.node(id)
    }

    /// Relation class of the contact between two residues, either orientation.
    pub fn relation(&self, a: &ResidueId, b: &ResidueId) -> Option<Relation> {
        self.graph.contact(a, b).and_then(|c| c.relation)
    }

    /// Local partitioning vector of every residue.
    pub fn local_partitioning(&self) -> BTreeMap<ResidueId, LocalPartitioning> {
        self.graph
            .nodes()
            .filter_map(|n| n.local_partitioning.map(|lp| (n.id, lp)))
            .collect()
    }

    /// Number of distinct segments.
    pub fn segment_count(&self) -> usize {
        self.graph
            .nodes()
            .filter_map(|n| n.secondary_structure.as_deref())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

impl Annotated for ProteinVariant {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Summarizable for ProteinVariant {
    fn summary(&self) -> String {
        format!(
            "Variant {} — {} residue(s), {} contact(s), {} segment(s), {} diagnostic(s)",
            self.name,
            self.graph.node_count(),
            self.graph.edge_count(),
            self.segment_count(),
            self.diagnostics.len(),
        )
    }
}

impl ContentAddressable for ProteinVariant {
    fn content_hash(&self) -> String {
        let mut hasher = FieldHasher::new();
        for node in self.graph.nodes() {
            hasher.field(node.id.to_string().as_bytes());
            hasher.field(node.residue_type.as_deref().unwrap_or("").as_bytes());
            hasher.field(node.secondary_structure.as_deref().unwrap_or("").as_bytes());
            for f in node.local_partitioning.unwrap_or_default().as_array() {
                hasher.field(&f.to_le_bytes());
            }
        }

        let mut contacts: Vec<_> = self
            .graph
            .contacts()
            .map(|(a, b, c)| (a.min(b), a.max(b), c.weight, c.relation))
            .collect();
        contacts.sort();
        for (a, b, weight, relation) in contacts {
            hasher.field(a.to_string().as_bytes());
            hasher.field(b.to_string().as_bytes());
            hasher.field(&weight.to_le_bytes());
            hasher.field(relation.map(|r| r.label()).unwrap_or("").as_bytes());
        }
        hasher.finish()
    }
}

/// Build two variants, in parallel when the `parallel` feature is enabled.
pub fn build_pair<F1, F2>(first: F1, second: F2) -> Result<(ProteinVariant, ProteinVariant)>
where
    F1: FnOnce() -> Result<ProteinVariant> + Send,
    F2: FnOnce() -> Result<ProteinVariant> + Send,
{
    #[cfg(feature = "parallel")]
    let (a, b) = rayon::join(first, second);

    #[cfg(not(feature = "parallel"))]
    let (a, b) = (first(), second());

    Ok((a?, b?))
}
