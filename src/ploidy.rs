//! Expected copy number of a locus per sample.
//!
//! Samples of unknown sex are counted as female. This is a deliberate
//! simplification: without a pedigree every sample is unknown, which is why
//! a run without one warns that sex-chromosome counts are inaccurate.

use crate::chrom::ChromosomeClass;
use crate::pedigree::Sex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ploidy {
    Zero,
    Haploid,
    Diploid,
}

impl Ploidy {
    /// Number of chromosome copies this ploidy contributes to AN.
    pub fn copies(self) -> u32 {
        match self {
            Ploidy::Zero => 0,
            Ploidy::Haploid => 1,
            Ploidy::Diploid => 2,
        }
    }
}

/// Where per-sample sex comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SexModel {
    /// Use the sex recorded in the pedigree (unknown counts as female).
    Pedigree,
    /// No pedigree was supplied; every sample is counted as female.
    AssumeFemale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PloidyPolicy {
    sex_model: SexModel,
}

impl PloidyPolicy {
    pub fn new(sex_model: SexModel) -> Self {
        Self { sex_model }
    }

    fn is_male(&self, sex: Sex) -> bool {
        match self.sex_model {
            SexModel::Pedigree => sex == Sex::Male,
            SexModel::AssumeFemale => false,
        }
    }

    /// Expected ploidy of a sample at a contig of the given class.
    ///
    /// Mitochondrial sites never reach the counter; they report haploid here
    /// only so the mapping is total.
    pub fn ploidy(&self, class: ChromosomeClass, sex: Sex) -> Ploidy {
        let male = self.is_male(sex);
        match (class, male) {
            (ChromosomeClass::Autosome, _) => Ploidy::Diploid,
            (ChromosomeClass::Mitochondrial, _) => Ploidy::Haploid,
            (ChromosomeClass::X | ChromosomeClass::Y, true) => Ploidy::Haploid,
            (ChromosomeClass::X, false) => Ploidy::Diploid,
            (ChromosomeClass::Y, false) => Ploidy::Zero,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pedigree_model_follows_sex() {
        let policy = PloidyPolicy::new(SexModel::Pedigree);
        assert_eq!(policy.ploidy(ChromosomeClass::X, Sex::Male).copies(), 1);
        assert_eq!(policy.ploidy(ChromosomeClass::Y, Sex::Male).copies(), 1);
        assert_eq!(policy.ploidy(ChromosomeClass::X, Sex::Female).copies(), 2);
        assert_eq!(policy.ploidy(ChromosomeClass::Y, Sex::Female).copies(), 0);
        assert_eq!(policy.ploidy(ChromosomeClass::Autosome, Sex::Male).copies(), 2);
        assert_eq!(policy.ploidy(ChromosomeClass::Autosome, Sex::Female).copies(), 2);
    }

    #[test]
    fn unknown_sex_counts_as_female() {
        let policy = PloidyPolicy::new(SexModel::Pedigree);
        assert_eq!(policy.ploidy(ChromosomeClass::X, Sex::Unknown), Ploidy::Diploid);
        assert_eq!(policy.ploidy(ChromosomeClass::Y, Sex::Unknown), Ploidy::Zero);
    }

    #[test]
    fn assume_female_ignores_recorded_sex() {
        let policy = PloidyPolicy::new(SexModel::AssumeFemale);
        assert_eq!(policy.ploidy(ChromosomeClass::X, Sex::Male), Ploidy::Diploid);
        assert_eq!(policy.ploidy(ChromosomeClass::Y, Sex::Male), Ploidy::Zero);
    }
}
