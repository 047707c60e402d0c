use std::{fs, path::PathBuf};

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use summarize_cohort_vcf::{
    CohortConfig,
    cohort::{CohortMember, SampleSubset},
    counter::VariantCounter,
    genotype::Genotype,
    pedigree::Sex,
    ploidy::{PloidyPolicy, SexModel},
    site::Site,
    summarize_cohort,
};
use tempfile::tempdir;

const CALLS: [&str; 6] = ["0/0", "0/1", "1/1", "1/2", "./.", "2/2"];

fn cohort(samples: usize) -> (SampleSubset, Vec<Genotype>) {
    let subset = (0..samples)
        .map(|column| CohortMember {
            column,
            sex: if column % 2 == 0 { Sex::Male } else { Sex::Female },
        })
        .collect();
    let genotypes = (0..samples)
        .map(|i| Genotype::parse(CALLS[i % CALLS.len()]).unwrap())
        .collect();
    (subset, genotypes)
}

fn bench_counting(c: &mut Criterion) {
    let counter = VariantCounter::new(PloidyPolicy::new(SexModel::Pedigree));

    let mut group = c.benchmark_group("count_site");
    for samples in [100, 1_000, 10_000] {
        let (subset, genotypes) = cohort(samples);
        let autosome = Site::new("1", 2, genotypes.clone());
        let x = Site::new("chrX", 2, genotypes);

        group.bench_function(BenchmarkId::new("autosome", samples), |b| {
            b.iter(|| black_box(counter.count(&autosome, &subset)));
        });
        group.bench_function(BenchmarkId::new("x", samples), |b| {
            b.iter(|| black_box(counter.count(&x, &subset)));
        });
    }
    group.finish();
}

fn bench_genotype_parsing(c: &mut Criterion) {
    c.bench_function("genotype_parsing", |b| {
        b.iter(|| {
            for gt in CALLS {
                black_box(Genotype::parse(gt));
            }
        });
    });
}

fn create_vcf(dir: &tempfile::TempDir, samples: usize, records: usize) -> PathBuf {
    let path = dir.path().join("cohort.vcf");
    let mut content = String::from(
        "##fileformat=VCFv4.3\n##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n",
    );
    content.push_str("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT");
    for i in 0..samples {
        content.push_str(&format!("\ts{i}"));
    }
    content.push('\n');
    for pos in 1..=records {
        content.push_str(&format!("1\t{pos}\t.\tA\tC,G\t.\t.\t.\tGT"));
        for i in 0..samples {
            content.push('\t');
            content.push_str(CALLS[(i + pos) % CALLS.len()]);
        }
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

fn bench_pipeline(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let input_path = create_vcf(&dir, 100, 1000);
    let dir_path = dir.path().to_path_buf();

    c.bench_function("summarize_vcf_100x1000", |b| {
        b.iter_batched(
            || {
                tempfile::Builder::new()
                    .suffix(".vcf")
                    .tempfile_in(&dir_path)
                    .unwrap()
            },
            |output| {
                let mut config = CohortConfig::new(input_path.clone(), output.path());
                config.write_checksum = false;
                summarize_cohort(config).expect("summarize");
                output.close().unwrap();
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    counting_benches,
    bench_counting,
    bench_genotype_parsing,
    bench_pipeline
);
criterion_main!(counting_benches);
