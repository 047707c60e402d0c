#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let reader = summarize_cohort_vcf::pedigree::Reader::new(Cursor::new(data));

    // Should never panic
    for result in reader.take(1000) {
        if let Ok(record) = result {
            let _ = record.is_founder();
        }
    }

    if let Ok(records) = summarize_cohort_vcf::pedigree::read_pedigree_from(Cursor::new(data)) {
        let names: Vec<String> = records.iter().map(|record| record.name.clone()).collect();
        let index = summarize_cohort_vcf::pedigree::PedigreeIndex::new(records);
        for name in &names {
            let _ = index.counted_sex(name);
        }
        assert_eq!(index.len(), names.len());
    }
});
