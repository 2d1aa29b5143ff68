//! Residue chemical-identity codes.
//!
//! Maps loader-supplied residue names onto three-letter codes. One-letter
//! amino-acid codes are expanded through a fixed table, two-letter codes must
//! name a nucleotide, and codes of three or more characters pass through
//! unchanged after trimming.

use std::collections::HashMap;

use contacta_core::{ContactaError, Result};

use crate::contact::ContactGraph;
use crate::types::ResidueId;

/// Expand a one-letter amino-acid code to its three-letter form.
pub fn one_to_three(code: char) -> Option<&'static str> {
    let three = match code.to_ascii_uppercase() {
        'A' => "ALA",
        'R' => "ARG",
        'N' => "ASN",
        'D' => "ASP",
        'C' => "CYS",
        'E' => "GLU",
        'Q' => "GLN",
        'G' => "GLY",
        'H' => "HIS",
        'I' => "ILE",
        'L' => "LEU",
        'K' => "LYS",
        'M' => "MET",
        'F' => "PHE",
        'P' => "PRO",
        'S' => "SER",
        'T' => "THR",
        'W' => "TRP",
        'Y' => "TYR",
        'V' => "VAL",
        'B' => "ASX",
        'Z' => "GLX",
        'U' => "SEC",
        'O' => "PYL",
        'X' => "UNK",
        _ => return None,
    };
    Some(three)
}

/// Two-letter codes accepted as-is.
const TWO_LETTER_CODES: &[&str] = &["DA", "DC", "DG", "DT", "DU", "DI"];

/// Resolve a raw residue code to its three-letter form.
///
/// # Errors
///
/// Returns [`ContactaError::UnknownResidueCode`] for blank codes and for
/// one- or two-letter codes missing from the lookup tables.
pub fn residue_type(residue: ResidueId, code: &str) -> Result<String> {
    let trimmed = code.trim();
    let mut chars = trimmed.chars();
    let resolved = match (chars.next(), chars.next()) {
        (Some(c), None) => one_to_three(c).map(str::to_string),
        (Some(_), Some(_)) if trimmed.len() == 2 => {
            let upper = trimmed.to_ascii_uppercase();
            TWO_LETTER_CODES.contains(&upper.as_str()).then_some(upper)
        }
        (Some(_), Some(_)) => Some(trimmed.to_string()),
        _ => None,
    };
    resolved.ok_or_else(|| ContactaError::UnknownResidueCode {
        residue: residue.to_string(),
        code: code.to_string(),
    })
}

/// Label every residue of `graph` with its three-letter code.
///
/// `codes` are the raw residue names supplied by the structure loader.
/// Residues with an unknown code, or with no code at all, are left unlabeled
/// and returned as deferred [`ContactaError::UnknownResidueCode`] failures
/// (an absent code is reported as the empty string).
pub fn assign_residue_types<'a, I>(graph: &mut ContactGraph, codes: I) -> Vec<ContactaError>
where
    I: IntoIterator<Item = (ResidueId, &'a str)>,
{
    let codes: HashMap<ResidueId, &str> = codes.into_iter().collect();
    let ids: Vec<ResidueId> = graph.residues().collect();
    let mut failures = Vec::new();

    for id in ids {
        let code = codes.get(&id).copied().unwrap_or("");
        match residue_type(id, code) {
            Ok(three) => {
                if let Some(node) = graph.node_mut(&id) {
                    node.residue_type = Some(three);
                }
            }
            Err(e) => failures.push(e),
        }
    }
    log::debug!(
        "residue types: {} typed, {} unresolved",
        graph.node_count() - failures.len(),
        failures.len()
    );
    failures
}
