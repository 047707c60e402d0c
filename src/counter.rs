//! Per-variant allele counting.
//!
//! Each sample is handled in two steps. The allele step adds every
//! non-reference allele occurrence to AC. The carrier step classifies the
//! whole call once and adds at most one hemizygous, one homozygous, and one
//! heterozygous increment per ALT allele. In a hemizygous context only the
//! first non-reference allele of a call is considered at all, so a `1/1`
//! written for a male X call counts one allele and one hemizygous carrier.

use crate::chrom::ChromosomeClass;
use crate::cohort::SampleSubset;
use crate::genotype::{Genotype, Zygosity};
use crate::ploidy::{Ploidy, PloidyPolicy};
use crate::site::Site;

/// Counts for one site over one sample subset. The per-allele vectors are
/// aligned with the site's ALT alleles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortStatistics {
    pub total_chromosomes: u32,
    pub allele_counts: Vec<u32>,
    pub hemi_counts: Vec<u32>,
    pub het_counts: Vec<u32>,
    pub hom_counts: Vec<u32>,
}

impl CohortStatistics {
    pub fn new(alt_count: usize) -> Self {
        Self {
            total_chromosomes: 0,
            allele_counts: vec![0; alt_count],
            hemi_counts: vec![0; alt_count],
            het_counts: vec![0; alt_count],
            hom_counts: vec![0; alt_count],
        }
    }

    pub fn alt_count(&self) -> usize {
        self.allele_counts.len()
    }

    /// AC / AN per ALT allele. Entries are `None` when AN is zero, which is
    /// written out as the VCF missing value.
    pub fn allele_frequencies(&self) -> Vec<Option<f64>> {
        self.allele_counts
            .iter()
            .map(|&count| {
                (self.total_chromosomes > 0)
                    .then(|| f64::from(count) / f64::from(self.total_chromosomes))
            })
            .collect()
    }

    fn add_sample(&mut self, ploidy: Ploidy, genotype: &Genotype) {
        self.total_chromosomes += ploidy.copies();

        match ploidy {
            // Calls at zero ploidy are dropped from AC too, so AC <= AN holds
            // even when a female carries a call on Y.
            Ploidy::Zero => {}
            Ploidy::Haploid => {
                if let Some(idx) = genotype.alt_indices().next() {
                    self.allele_counts[idx] += 1;
                    self.hemi_counts[idx] += 1;
                }
            }
            Ploidy::Diploid => {
                for idx in genotype.alt_indices() {
                    self.allele_counts[idx] += 1;
                }

                match genotype.zygosity() {
                    Zygosity::Het => {
                        let mut seen = vec![false; self.alt_count()];
                        for idx in genotype.alt_indices() {
                            if !std::mem::replace(&mut seen[idx], true) {
                                self.het_counts[idx] += 1;
                            }
                        }
                    }
                    Zygosity::HomAlt => {
                        if let Some(idx) = genotype.alt_indices().next() {
                            self.hom_counts[idx] += 1;
                        }
                    }
                    Zygosity::HomRef | Zygosity::Mixed | Zygosity::NoCall => {}
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VariantCounter {
    policy: PloidyPolicy,
}

impl VariantCounter {
    pub fn new(policy: PloidyPolicy) -> Self {
        Self { policy }
    }

    /// Count `site` over `samples`. Returns `None` for mitochondrial sites,
    /// which are passed through unannotated.
    ///
    /// Samples missing from the site are no-calls: they still contribute
    /// their expected ploidy to AN.
    pub fn count(&self, site: &Site, samples: &SampleSubset) -> Option<CohortStatistics> {
        let class = site.chromosome_class();
        if class == ChromosomeClass::Mitochondrial {
            return None;
        }

        let no_call = Genotype::no_call();
        let mut stats = CohortStatistics::new(site.alt_count());
        for member in samples.members() {
            let ploidy = self.policy.ploidy(class, member.sex);
            let genotype = site.genotype(member.column).unwrap_or(&no_call);
            stats.add_sample(ploidy, genotype);
        }

        Some(stats)
    }
}
