//! Secondary-structure segment labels from HELIX/SHEET records.
//!
//! Every residue receives a segment label. Residues covered by a HELIX or
//! SHEET record get `helix<id>-<chain>` or `sheet<id>-<chain>`; the gaps are
//! filled with synthesized `loop<n>` labels so that each maximal contiguous
//! run of residues within a chain forms exactly one segment.
//!
//! Record fields are read from the record payload, the line with its
//! 6-character record name removed. Columns below are 1-based, inclusive and
//! relative to that payload:
//!
//! | record | identifier | chain | start | end   |
//! |--------|------------|-------|-------|-------|
//! | HELIX  | 6–8        | 14    | 17–19 | 29–31 |
//! | SHEET  | 7–8        | 16    | 18–20 | 29–31 |

use std::collections::BTreeMap;

use contacta_core::{ContactaError, Result};

use crate::contact::ContactGraph;
use crate::pdb::{safe_slice, RecordLine};
use crate::types::ResidueId;

/// Kind of an explicit secondary-structure element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    Helix,
    Sheet,
}

impl SegmentKind {
    /// Label prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            SegmentKind::Helix => "helix",
            SegmentKind::Sheet => "sheet",
        }
    }
}

/// Column layout of one record kind, as 0-based half-open payload ranges.
struct RecordColumns {
    identifier: (usize, usize),
    chain: usize,
    start: (usize, usize),
    end: (usize, usize),
}

const HELIX_COLUMNS: RecordColumns = RecordColumns {
    identifier: (5, 8),
    chain: 13,
    start: (16, 19),
    end: (28, 31),
};

const SHEET_COLUMNS: RecordColumns = RecordColumns {
    identifier: (6, 8),
    chain: 15,
    start: (17, 20),
    end: (28, 31),
};

const RECORD_NAME_WIDTH: usize = 6;

/// One parsed HELIX or SHEET record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentRecord {
    pub kind: SegmentKind,
    /// Helix or sheet identifier, whitespace-stripped.
    pub identifier: String,
    pub chain: char,
    /// First covered position (inclusive).
    pub start: i32,
    /// Last covered position (inclusive).
    pub end: i32,
}

impl SegmentRecord {
    /// Parse a HELIX or SHEET line.
    ///
    /// # Errors
    ///
    /// [`ContactaError::MalformedStructureRecord`] for other record types, a
    /// blank chain, or a non-numeric range field. A range that ends before it
    /// starts parses fine and covers no residues.
    pub fn parse(record: &RecordLine) -> Result<Self> {
        let malformed = |reason: String| ContactaError::MalformedStructureRecord {
            line: record.line,
            reason,
        };

        let (kind, columns) = if record.text.starts_with("HELIX") {
            (SegmentKind::Helix, &HELIX_COLUMNS)
        } else if record.text.starts_with("SHEET") {
            (SegmentKind::Sheet, &SHEET_COLUMNS)
        } else {
            return Err(malformed(format!("not a HELIX/SHEET record: {:?}", record.text)));
        };

        let payload = safe_slice(&record.text, RECORD_NAME_WIDTH, record.text.len());
        let field = move |(from, to): (usize, usize)| safe_slice(payload, from, to).trim();

        let identifier = field(columns.identifier).to_string();
        let chain = field((columns.chain, columns.chain + 1))
            .chars()
            .next()
            .ok_or_else(|| malformed("missing chain identifier".into()))?;
        let start = field(columns.start)
            .parse::<i32>()
            .map_err(|e| malformed(format!("bad start position: {}", e)))?;
        let end = field(columns.end)
            .parse::<i32>()
            .map_err(|e| malformed(format!("bad end position: {}", e)))?;

        Ok(Self {
            kind,
            identifier,
            chain,
            start,
            end,
        })
    }

    /// Segment label shared by every residue this record covers.
    pub fn label(&self) -> String {
        format!("{}{}-{}", self.kind.prefix(), self.identifier, self.chain)
    }

    /// Residues covered by this record.
    pub fn residues(&self) -> impl Iterator<Item = ResidueId> + '_ {
        (self.start..=self.end).map(move |p| ResidueId::new(self.chain, p))
    }
}

/// Parse records, separating the good ones from deferred failures.
pub fn parse_segment_records(lines: &[RecordLine]) -> (Vec<SegmentRecord>, Vec<ContactaError>) {
    let mut records = Vec::with_capacity(lines.len());
    let mut failures = Vec::new();
    for line in lines {
        match SegmentRecord::parse(line) {
            Ok(record) => records.push(record),
            Err(e) => failures.push(e),
        }
    }
    (records, failures)
}

/// Explicit labels per residue; later records overwrite earlier ones.
pub fn explicit_labels(records: &[SegmentRecord]) -> BTreeMap<ResidueId, String> {
    let mut labels = BTreeMap::new();
    for record in records {
        let label = record.label();
        for id in record.residues() {
            labels.insert(id, label.clone());
        }
    }
    labels
}

/// Label every residue, filling gaps with `loop<n>` segments.
///
/// `residues` must be in ascending `(chain, position)` order. The loop
/// counter advances whenever an explicit label differs from the previous
/// residue's label, and whenever an unlabeled residue starts a new chain.
pub fn segment_labels<I>(
    residues: I,
    explicit: &BTreeMap<ResidueId, String>,
) -> BTreeMap<ResidueId, String>
where
    I: IntoIterator<Item = ResidueId>,
{
    let (_, _, _, labels) = residues.into_iter().fold(
        (0u32, None::<String>, None::<char>, BTreeMap::new()),
        |(mut counter, last_label, last_chain, mut labels), id| {
            let label = match explicit.get(&id) {
                Some(label) => {
                    if last_label.as_ref() != Some(label) {
                        counter += 1;
                    }
                    label.clone()
                }
                None => {
                    if last_chain != Some(id.chain) {
                        counter += 1;
                    }
                    format!("loop{}", counter)
                }
            };
            labels.insert(id, label.clone());
            (counter, Some(label), Some(id.chain), labels)
        },
    );
    labels
}

/// Assign a segment label to every node of `graph`.
///
/// Returns the deferred record failures; those records are skipped.
pub fn assign_secondary_structure(
    graph: &mut ContactGraph,
    lines: &[RecordLine],
) -> Vec<ContactaError> {
    let (records, failures) = parse_segment_records(lines);
    let explicit = explicit_labels(&records);
    let labels = segment_labels(graph.residues().collect::<Vec<_>>(), &explicit);

    for (id, label) in labels {
        if let Some(node) = graph.node_mut(&id) {
            node.secondary_structure = Some(label);
        }
    }
    log::debug!(
        "secondary structure: {} record(s) applied, {} skipped, {} residue(s) explicitly labeled",
        records.len(),
        failures.len(),
        explicit.len()
    );
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(chain: char, position: i32) -> ResidueId {
        ResidueId::new(chain, position)
    }

    fn line(n: usize, text: &str) -> RecordLine {
        RecordLine {
            line: n,
            text: text.to_string(),
        }
    }

    fn helix(id: &str, chain: char, start: i32, end: i32) -> String {
        format!(
            "HELIX    1 {:>3} ALA {}{:>5}  ALA {}{:>5}  1                                   5",
            id, chain, start, chain, end
        )
    }

    fn sheet(id: &str, chain: char, start: i32, end: i32) -> String {
        format!(
            "SHEET    1 {:>3} 2 ALA {}{:>4}  ALA {}{:>4}  0",
            id, chain, start, chain, end
        )
    }

    fn labels_for(residues: &[ResidueId], lines: &[RecordLine]) -> BTreeMap<ResidueId, String> {
        let (records, failures) = parse_segment_records(lines);
        assert!(failures.is_empty(), "{failures:?}");
        segment_labels(residues.iter().copied(), &explicit_labels(&records))
    }

    #[test]
    fn parses_standard_helix_record() {
        let rec = SegmentRecord::parse(&line(
            1,
            "HELIX    1  H1 ILE A    7  PRO A   19  1                                  13",
        ))
        .unwrap();
        assert_eq!(rec.kind, SegmentKind::Helix);
        assert_eq!(rec.identifier, "H1");
        assert_eq!(rec.chain, 'A');
        assert_eq!((rec.start, rec.end), (7, 19));
        assert_eq!(rec.label(), "helixH1-A");
    }

    #[test]
    fn parses_standard_sheet_record() {
        let rec = SegmentRecord::parse(&line(
            1,
            "SHEET    1  S1 2 THR A   1  CYS A   4  0",
        ))
        .unwrap();
        assert_eq!(rec.kind, SegmentKind::Sheet);
        assert_eq!(rec.identifier, "S1");
        assert_eq!(rec.chain, 'A');
        assert_eq!((rec.start, rec.end), (1, 4));
        assert_eq!(rec.label(), "sheetS1-A");
    }

    #[test]
    fn generated_records_round_trip_columns() {
        let h = SegmentRecord::parse(&line(1, &helix("H1", 'B', 10, 14))).unwrap();
        assert_eq!((h.chain, h.start, h.end), ('B', 10, 14));
        let s = SegmentRecord::parse(&line(1, &sheet("A", 'C', 3, 8))).unwrap();
        assert_eq!((s.identifier.as_str(), s.chain, s.start, s.end), ("A", 'C', 3, 8));
    }

    #[test]
    fn malformed_records_are_reported() {
        let lines = vec![
            line(3, "HELIX    1  H1 ILE A    X  PRO A   19"),
            line(4, "SHEET    1  S1 2 THR    1  CYS A   4  0"),
            line(6, &helix("H2", 'A', 1, 2)),
        ];
        let (records, failures) = parse_segment_records(&lines);
        assert_eq!(records.len(), 1);
        assert_eq!(failures.len(), 2);
        assert!(matches!(
            failures[0],
            ContactaError::MalformedStructureRecord { line: 3, .. }
        ));
        assert!(failures[1].to_string().contains("chain"));
    }

    #[test]
    fn reversed_range_covers_nothing() {
        let lines = vec![line(5, "HELIX    1  H1 ALA A   19  ALA A    7")];
        let (records, failures) = parse_segment_records(&lines);
        assert!(failures.is_empty());
        assert_eq!((records[0].start, records[0].end), (19, 7));
        assert_eq!(records[0].residues().count(), 0);
        assert!(explicit_labels(&records).is_empty());

        let residues: Vec<_> = (6..=20).map(|p| r('A', p)).collect();
        let labels = labels_for(&residues, &lines);
        assert!(labels.values().all(|l| l == "loop1"));
    }

    #[test]
    fn later_records_win_on_overlap() {
        let lines = vec![
            line(1, &helix("H1", 'A', 1, 5)),
            line(2, &sheet("S1", 'A', 4, 6)),
        ];
        let (records, _) = parse_segment_records(&lines);
        let labels = explicit_labels(&records);
        assert_eq!(labels[&r('A', 3)], "helixH1-A");
        assert_eq!(labels[&r('A', 4)], "sheetS1-A");
        assert_eq!(labels[&r('A', 6)], "sheetS1-A");
    }

    #[test]
    fn unlabeled_chain_is_one_loop() {
        let residues: Vec<_> = (1..=5).map(|p| r('A', p)).collect();
        let labels = labels_for(&residues, &[]);
        assert!(labels.values().all(|l| l == "loop1"));
        assert_eq!(labels.len(), 5);
    }

    #[test]
    fn helix_splits_loops() {
        let residues: Vec<_> = (9..=15).map(|p| r('A', p)).collect();
        let labels = labels_for(&residues, &[line(1, &helix("H1", 'A', 10, 14))]);
        for p in 10..=14 {
            assert_eq!(labels[&r('A', p)], "helixH1-A");
        }
        assert_eq!(labels[&r('A', 9)], "loop1");
        assert_eq!(labels[&r('A', 15)], "loop2");
    }

    #[test]
    fn chain_change_starts_new_loop() {
        let residues = vec![r('A', 1), r('A', 2), r('B', 1), r('B', 2)];
        let labels = labels_for(&residues, &[]);
        assert_eq!(labels[&r('A', 1)], "loop1");
        assert_eq!(labels[&r('A', 2)], "loop1");
        assert_eq!(labels[&r('B', 1)], "loop2");
        assert_eq!(labels[&r('B', 2)], "loop2");
    }

    #[test]
    fn adjacent_explicit_segments_stay_distinct() {
        let residues: Vec<_> = (1..=8).map(|p| r('A', p)).collect();
        let lines = vec![
            line(1, &helix("H1", 'A', 2, 3)),
            line(2, &helix("H2", 'A', 4, 5)),
        ];
        let labels = labels_for(&residues, &lines);
        assert_eq!(labels[&r('A', 1)], "loop1");
        assert_eq!(labels[&r('A', 3)], "helixH1-A");
        assert_eq!(labels[&r('A', 4)], "helixH2-A");
        assert_eq!(labels[&r('A', 6)], "loop3");
        assert_eq!(labels[&r('A', 8)], "loop3");
    }

    #[test]
    fn assigns_labels_on_graph() {
        let mut g = ContactGraph::from_contacts([
            (r('A', 1), r('A', 2), 1),
            (r('A', 2), r('A', 3), 1),
            (r('A', 3), r('B', 1), 1),
        ])
        .unwrap();
        let lines = vec![line(1, &helix("H1", 'A', 2, 3)), line(2, "HELIX  garbage")];
        let failures = assign_secondary_structure(&mut g, &lines);
        assert_eq!(failures.len(), 1);
        assert!(g.nodes().all(|n| n.secondary_structure.is_some()));
        assert_eq!(
            g.node(&r('A', 2)).unwrap().secondary_structure.as_deref(),
            Some("helixH1-A")
        );
        assert_eq!(
            g.node(&r('B', 1)).unwrap().secondary_structure.as_deref(),
            Some("loop3")
        );
    }
}
