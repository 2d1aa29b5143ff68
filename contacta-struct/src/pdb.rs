//! PDB record reader.
//!
//! Reads the pieces of a PDB-format file the annotation pipeline needs:
//! residue names from ATOM/HETATM records of the first MODEL, and HELIX/SHEET
//! records in file order. Coordinates are never interpreted.

use std::collections::HashSet;

use contacta_core::hash::sha256;
use contacta_core::{ContactaError, Result};

use crate::types::ResidueId;

/// A raw HELIX or SHEET line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine {
    /// 1-based line number in the source file.
    pub line: usize,
    /// The full record text.
    pub text: String,
}

/// Everything the annotation pipeline reads from a structure file.
#[derive(Debug, Clone)]
pub struct StructureRecords {
    /// PDB identifier from the HEADER record, or `"UNKN"`.
    pub id: String,
    /// Residue codes in file order, one entry per residue.
    pub residues: Vec<(ResidueId, String)>,
    /// HELIX and SHEET records in file order.
    pub secondary: Vec<RecordLine>,
    /// SHA-256 of the source text.
    pub source_hash: String,
}

impl StructureRecords {
    /// Read records from PDB-format text.
    pub fn from_pdb_str(input: &str) -> Self {
        Self {
            id: parse_header_id(input),
            residues: parse_residue_codes(input),
            secondary: secondary_structure_lines(input),
            source_hash: sha256(input.as_bytes()),
        }
    }

    /// Read records from a PDB file on disk.
    pub fn from_pdb_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ContactaError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        Ok(Self::from_pdb_str(&contents))
    }
}

/// Collect HELIX and SHEET records in file order.
pub fn secondary_structure_lines(input: &str) -> Vec<RecordLine> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| line.starts_with("HELIX") || line.starts_with("SHEET"))
        .map(|(i, line)| RecordLine {
            line: i + 1,
            text: line.to_string(),
        })
        .collect()
}

/// Residue codes from ATOM/HETATM records of the first model.
///
/// Each residue appears once, at the position of its first atom. Records
/// with an unparseable sequence number are skipped with a warning.
pub fn parse_residue_codes(input: &str) -> Vec<(ResidueId, String)> {
    let mut seen: HashSet<ResidueId> = HashSet::new();
    let mut residues = Vec::new();
    let mut in_first_model = true;

    for line in input.lines() {
        if line.starts_with("ENDMDL") {
            break; // only first model
        }
        if line.starts_with("MODEL") {
            if !in_first_model {
                break;
            }
            in_first_model = false;
            continue;
        }
        if !(line.starts_with("ATOM  ") || line.starts_with("HETATM")) {
            continue;
        }

        let chain = safe_slice(line, 21, 22).chars().next().unwrap_or(' ');
        let position = match safe_slice(line, 22, 26).trim().parse::<i32>() {
            Ok(position) => position,
            Err(e) => {
                log::warn!("skipping record with bad residue seq number ({}): {}", e, line);
                continue;
            }
        };
        let id = ResidueId::new(chain, position);
        if seen.insert(id) {
            residues.push((id, safe_slice(line, 17, 20).trim().to_string()));
        }
    }

    residues
}

fn parse_header_id(input: &str) -> String {
    input
        .lines()
        .find(|line| line.starts_with("HEADER") && line.len() >= 66)
        .map(|line| safe_slice(line, 62, 66).trim())
        .filter(|id| !id.is_empty())
        .unwrap_or("UNKN")
        .to_string()
}

/// Safe substring that handles short lines gracefully.
pub(crate) fn safe_slice(s: &str, start: usize, end: usize) -> &str {
    let len = s.len();
    if start >= len {
        return "";
    }
    let actual_end = end.min(len);
    // PDB files are ASCII; fall back to empty on a non-boundary slice.
    s.get(start..actual_end).unwrap_or("")
}
