//! Contig name classification.
//!
//! Sex chromosomes and the mitochondrial genome are recognised through a fixed
//! alias table. Supporting another naming convention means adding rows to
//! [`CONTIG_ALIASES`], not touching the lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Broad class of a contig as far as ploidy is concerned.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ChromosomeClass {
    Autosome,
    X,
    Y,
    Mitochondrial,
}

/// Accepted spellings for the non-autosomal contigs. Matching is exact.
pub const CONTIG_ALIASES: &[(&str, ChromosomeClass)] = &[
    ("x", ChromosomeClass::X),
    ("X", ChromosomeClass::X),
    ("23", ChromosomeClass::X),
    ("chrx", ChromosomeClass::X),
    ("chrX", ChromosomeClass::X),
    ("chr23", ChromosomeClass::X),
    ("y", ChromosomeClass::Y),
    ("Y", ChromosomeClass::Y),
    ("24", ChromosomeClass::Y),
    ("chry", ChromosomeClass::Y),
    ("chrY", ChromosomeClass::Y),
    ("chr24", ChromosomeClass::Y),
    ("m", ChromosomeClass::Mitochondrial),
    ("M", ChromosomeClass::Mitochondrial),
    ("mt", ChromosomeClass::Mitochondrial),
    ("MT", ChromosomeClass::Mitochondrial),
    ("chrm", ChromosomeClass::Mitochondrial),
    ("chrM", ChromosomeClass::Mitochondrial),
    ("chrmt", ChromosomeClass::Mitochondrial),
    ("chrMT", ChromosomeClass::Mitochondrial),
];

static ALIAS_TABLE: LazyLock<HashMap<&'static str, ChromosomeClass>> =
    LazyLock::new(|| CONTIG_ALIASES.iter().copied().collect());

impl ChromosomeClass {
    /// Classify a contig name. Anything not in the alias table is an autosome.
    pub fn classify(contig: &str) -> Self {
        ALIAS_TABLE
            .get(contig)
            .copied()
            .unwrap_or(ChromosomeClass::Autosome)
    }
}

impl fmt::Display for ChromosomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChromosomeClass::Autosome => "autosome",
            ChromosomeClass::X => "X",
            ChromosomeClass::Y => "Y",
            ChromosomeClass::Mitochondrial => "MT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_x_aliases() {
        for name in ["X", "x", "23", "chrX", "chrx", "chr23"] {
            assert_eq!(ChromosomeClass::classify(name), ChromosomeClass::X, "{name}");
        }
    }

    #[test]
    fn classifies_y_and_mt_aliases() {
        for name in ["Y", "y", "24", "chrY", "chry", "chr24"] {
            assert_eq!(ChromosomeClass::classify(name), ChromosomeClass::Y, "{name}");
        }
        for name in ["M", "m", "MT", "mt", "chrM", "chrm", "chrMT", "chrmt"] {
            assert_eq!(
                ChromosomeClass::classify(name),
                ChromosomeClass::Mitochondrial,
                "{name}"
            );
        }
    }

    #[test]
    fn everything_else_is_autosomal() {
        assert_eq!(ChromosomeClass::classify("1"), ChromosomeClass::Autosome);
        assert_eq!(ChromosomeClass::classify("chr22"), ChromosomeClass::Autosome);
        assert_eq!(ChromosomeClass::classify("GL000192.1"), ChromosomeClass::Autosome);
        // Only the listed spellings count.
        assert_eq!(ChromosomeClass::classify("ChrX"), ChromosomeClass::Autosome);
        assert_eq!(ChromosomeClass::Mitochondrial.to_string(), "MT");
    }
}
