fn main() -> anyhow::Result<()> {
    summarize_cohort_vcf::cli::run()
}
