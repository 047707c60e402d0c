#![no_main]

use libfuzzer_sys::fuzz_target;
use summarize_cohort_vcf::{
    cohort::{CohortMember, SampleSubset},
    counter::VariantCounter,
    genotype::Genotype,
    pedigree::Sex,
    ploidy::{PloidyPolicy, SexModel},
    site::Site,
};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    let Some(genotype) = Genotype::parse(&input) else {
        return;
    };
    assert!(genotype.alleles().len() <= input.len());

    // Counting a diploid-or-smaller call must respect AC <= AN in every context.
    if genotype.alleles().len() > 2 {
        return;
    }
    let Some(alt_count) = genotype.max_allele().filter(|&max| max <= 64) else {
        return;
    };
    let alt_count = alt_count.max(1);
    let site = Site::new("X", alt_count, vec![genotype]);
    let counter = VariantCounter::new(PloidyPolicy::new(SexModel::Pedigree));
    for sex in [Sex::Male, Sex::Female] {
        let subset: SampleSubset = [CohortMember { column: 0, sex }].into_iter().collect();
        if let Some(stats) = counter.count(&site, &subset) {
            assert!(stats.allele_counts.iter().all(|&ac| ac <= stats.total_chromosomes));
        }
    }
});
