//! Core types for residue-level contact graphs.

use core::fmt;
use core::str::FromStr;

use contacta_core::{ContactaError, Result};

/// Composite residue key: chain letter plus sequence position.
///
/// Ordering is by chain first, then position, which is the order segment
/// inference walks residues in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidueId {
    /// Single-character chain identifier.
    pub chain: char,
    /// Sequence number from the structure file.
    pub position: i32,
}

impl ResidueId {
    /// Create a new residue identifier.
    pub fn new(chain: char, position: i32) -> Self {
        Self { chain, position }
    }

    /// Absolute sequence distance to another residue, ignoring chains.
    pub fn sequence_distance(&self, other: &ResidueId) -> u32 {
        self.position.abs_diff(other.position)
    }

    /// Whether both residues lie on the same chain.
    pub fn same_chain(&self, other: &ResidueId) -> bool {
        self.chain == other.chain
    }
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.chain, self.position)
    }
}

impl FromStr for ResidueId {
    type Err = ContactaError;

    /// Parse the `<chain><position>` form, e.g. `A123` or `B-4`.
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let chain = chars
            .next()
            .ok_or_else(|| ContactaError::Parse("empty residue identifier".into()))?;
        let position = chars.as_str().trim().parse::<i32>().map_err(|e| {
            ContactaError::Parse(format!("bad residue position in {:?}: {}", s, e))
        })?;
        Ok(Self { chain, position })
    }
}

/// The four relation classes an edge can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// Sequence neighbours on the same chain.
    OneD,
    /// Same chain, same segment, fewer than five positions apart.
    TwoD,
    /// Same chain, anything else.
    ThreeD,
    /// Different chains.
    FourD,
}

impl Relation {
    /// All classes in partitioning-vector order.
    pub const ALL: [Relation; 4] = [
        Relation::OneD,
        Relation::TwoD,
        Relation::ThreeD,
        Relation::FourD,
    ];

    /// Slot of this class in a [`LocalPartitioning`] vector.
    pub fn index(&self) -> usize {
        match self {
            Relation::OneD => 0,
            Relation::TwoD => 1,
            Relation::ThreeD => 2,
            Relation::FourD => 3,
        }
    }

    /// Short label (`"1D"` .. `"4D"`).
    pub fn label(&self) -> &'static str {
        match self {
            Relation::OneD => "1D",
            Relation::TwoD => "2D",
            Relation::ThreeD => "3D",
            Relation::FourD => "4D",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-residue fractions of weighted contact mass, ordered `[1D, 2D, 3D, 4D]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalPartitioning(pub [f64; 4]);

impl LocalPartitioning {
    /// Fraction for one relation class.
    pub fn get(&self, relation: Relation) -> f64 {
        self.0[relation.index()]
    }

    /// Sum of the four components.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Component-wise `self - other`.
    pub fn sub(&self, other: &LocalPartitioning) -> [f64; 4] {
        let mut out = [0.0; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.0[i] - other.0[i];
        }
        out
    }

    /// The underlying array.
    pub fn as_array(&self) -> &[f64; 4] {
        &self.0
    }
}

/// A residue node and the annotations attached to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidueNode {
    /// Residue key.
    pub id: ResidueId,
    /// Three-letter chemical code, once typed.
    pub residue_type: Option<String>,
    /// Segment label (`helix<id>-<chain>`, `sheet<id>-<chain>`, `loop<n>`).
    pub secondary_structure: Option<String>,
    /// Contact distribution over the four relation classes.
    pub local_partitioning: Option<LocalPartitioning>,
}

impl ResidueNode {
    /// An unannotated node.
    pub fn new(id: ResidueId) -> Self {
        Self {
            id,
            residue_type: None,
            secondary_structure: None,
            local_partitioning: None,
        }
    }
}

/// A contact between two residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    /// Number of atomic contacts between the two residues.
    pub weight: u32,
    /// Relation class, once classified.
    pub relation: Option<Relation>,
}

impl Contact {
    /// An unclassified contact.
    pub fn new(weight: u32) -> Self {
        Self {
            weight,
            relation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residue_id_orders_by_chain_first() {
        let mut ids = vec![
            ResidueId::new('B', 1),
            ResidueId::new('A', 10),
            ResidueId::new('A', 2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                ResidueId::new('A', 2),
                ResidueId::new('A', 10),
                ResidueId::new('B', 1),
            ]
        );
    }

    #[test]
    fn residue_id_text_form() {
        let id: ResidueId = "A123".parse().unwrap();
        assert_eq!(id, ResidueId::new('A', 123));
        assert_eq!(id.to_string(), "A123");

        let neg: ResidueId = "B-4".parse().unwrap();
        assert_eq!(neg.position, -4);
        assert_eq!(neg.to_string(), "B-4");

        assert!("".parse::<ResidueId>().is_err());
        assert!("Axy".parse::<ResidueId>().is_err());
    }

    #[test]
    fn sequence_distance_is_symmetric() {
        let a = ResidueId::new('A', 100);
        let b = ResidueId::new('A', 103);
        assert_eq!(a.sequence_distance(&b), 3);
        assert_eq!(b.sequence_distance(&a), 3);
    }

    #[test]
    fn relation_slots() {
        for (i, r) in Relation::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
        assert_eq!(Relation::TwoD.to_string(), "2D");
    }

    #[test]
    fn partitioning_arithmetic() {
        let a = LocalPartitioning([0.5, 0.25, 0.25, 0.0]);
        let b = LocalPartitioning([0.25, 0.25, 0.25, 0.25]);
        assert!((a.total() - 1.0).abs() < 1e-12);
        assert_eq!(b.sub(&a), [-0.25, 0.0, 0.0, 0.25]);
        assert_eq!(a.get(Relation::OneD), 0.5);
    }
}
