#![doc = include_str!("../README.md")]

pub mod annotate;
pub mod chrom;
pub mod cli;
pub mod cohort;
pub mod counter;
pub mod genotype;
pub mod input;
pub mod output;
pub mod pedigree;
pub mod pipeline;
pub mod ploidy;
pub mod report;
pub mod site;
pub mod smart_reader;

pub use pipeline::{CohortConfig, CohortPipeline, RecordOutcome, summarize_cohort};

/// Summary statistics emitted after a run completes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CohortSummary {
    pub total_records: usize,
    pub annotated_records: usize,
    pub mitochondrial_records: usize,
    /// Annotated records where no cohort sample contributed a chromosome.
    pub zero_an_cohort_records: usize,
    /// Annotated records where no founder contributed a chromosome.
    pub zero_an_founder_records: usize,
    pub cohort_samples: usize,
    pub founder_samples: Option<usize>,
}

impl CohortSummary {
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.total_records += 1;
        match outcome {
            RecordOutcome::Mitochondrial => self.mitochondrial_records += 1,
            RecordOutcome::Annotated {
                cohort_an,
                founder_an,
            } => {
                self.annotated_records += 1;
                if cohort_an == 0 {
                    self.zero_an_cohort_records += 1;
                }
                if founder_an == Some(0) {
                    self.zero_an_founder_records += 1;
                }
            }
        }
    }
}
