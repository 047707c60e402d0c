use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, error::ErrorKind};
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    CohortConfig, CohortSummary,
    input::InputFormat,
    output::OutputFormat,
    summarize_cohort,
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Annotate a multi-sample VCF with cohort allele statistics and drop its genotypes",
    long_about = None
)]
struct Cli {
    /// Input VCF or BCF containing the cohort's genotypes
    #[arg(long, value_name = "PATH")]
    input_vcf: PathBuf,

    /// Output VCF or BCF path; a `.gz` suffix selects BGZF compression
    #[arg(long, value_name = "PATH")]
    output_vcf: PathBuf,

    /// PED file describing sex and parentage of the cohort
    #[arg(long, value_name = "PATH")]
    pedigree: Option<PathBuf>,

    /// Input file format (auto-detected if not specified)
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    input_format: InputFormat,

    /// Output file format (detected from the output path if not specified)
    #[arg(long, value_enum)]
    output_format: Option<OutputFormat>,

    /// Do not write a tabix index for BGZF-compressed VCF output
    #[arg(long)]
    no_index: bool,

    /// Do not write a SHA-256 checksum next to the output
    #[arg(long)]
    no_checksum: bool,

    /// Write a JSON run report next to the output
    #[arg(long)]
    report: bool,

    /// Logging verbosity (e.g. error, warn, info, debug)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> CohortConfig {
        CohortConfig {
            input: self.input_vcf,
            input_format: self.input_format,
            output: self.output_vcf,
            output_format: self.output_format,
            pedigree: self.pedigree,
            write_index: !self.no_index,
            write_checksum: !self.no_checksum,
            write_report: self.report,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };
    init_logging(&cli.log_level)?;

    let summary = summarize_cohort(cli.into_config())?;
    print_summary(&summary);
    tracing::info!("All done. Have a nice day!");

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
    Ok(())
}

fn print_summary(summary: &CohortSummary) {
    println!(
        "Processed {total} records; annotated {annotated}, passed through {mt} mitochondrial.",
        total = summary.total_records,
        annotated = summary.annotated_records,
        mt = summary.mitochondrial_records,
    );

    match summary.founder_samples {
        Some(founders) => println!(
            "Counted {cohort} cohort samples and {founders} founders.",
            cohort = summary.cohort_samples,
        ),
        None => println!(
            "Counted {cohort} cohort samples (no pedigree given).",
            cohort = summary.cohort_samples,
        ),
    }

    if summary.zero_an_cohort_records > 0 || summary.zero_an_founder_records > 0 {
        println!(
            "{cohort} records had no called cohort chromosomes and {founders} no called founder chromosomes; their frequencies are missing.",
            cohort = summary.zero_an_cohort_records,
            founders = summary.zero_an_founder_records,
        );
    }
}
