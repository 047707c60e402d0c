/// A genotype call as a list of allele indices (0 = REF, 1.. = ALT).
/// `None` entries are missing alleles (`.`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genotype {
    alleles: Vec<Option<usize>>,
}

/// Genotype-level classification, decided once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zygosity {
    /// No allele was called.
    NoCall,
    /// Some but not all alleles were called (e.g. `1/.`).
    Mixed,
    HomRef,
    HomAlt,
    Het,
}

impl Genotype {
    pub fn new(alleles: Vec<Option<usize>>) -> Self {
        Self { alleles }
    }

    pub fn no_call() -> Self {
        Self::default()
    }

    /// Parse a VCF `GT` string such as `0/1`, `1|2`, `./.`, or `1`.
    /// Returns `None` when an allele is neither an index nor `.`.
    pub fn parse(gt: &str) -> Option<Self> {
        let gt = gt.trim();
        if gt.is_empty() {
            return Some(Self::no_call());
        }

        let alleles = gt
            .split(['/', '|'])
            .map(|allele| match allele {
                "." => Some(None),
                index => index.parse::<usize>().ok().map(Some),
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self { alleles })
    }

    pub fn alleles(&self) -> &[Option<usize>] {
        &self.alleles
    }

    /// Highest allele index referenced by the call.
    pub fn max_allele(&self) -> Option<usize> {
        self.alleles.iter().flatten().copied().max()
    }

    /// 0-based ALT positions of every non-reference allele occurrence, in
    /// stored order.
    pub fn alt_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.alleles
            .iter()
            .flatten()
            .filter(|&&allele| allele > 0)
            .map(|&allele| allele - 1)
    }

    pub fn zygosity(&self) -> Zygosity {
        let called = self.alleles.iter().flatten().count();
        if called == 0 {
            return Zygosity::NoCall;
        }
        if called < self.alleles.len() {
            return Zygosity::Mixed;
        }

        let mut called = self.alleles.iter().flatten();
        let first = called.next().copied().unwrap_or_default();
        if called.all(|&allele| allele == first) {
            if first == 0 {
                Zygosity::HomRef
            } else {
                Zygosity::HomAlt
            }
        } else {
            Zygosity::Het
        }
    }
}
