//! Structured run report for downstream tool consumption.
//!
//! Written as JSON alongside the output when `--report` is given.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::CohortSummary;
use crate::input::InputFormat;
use crate::output::OutputFormat;
use crate::pipeline::CohortConfig;

/// Complete report of a summarization run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Tool version
    pub version: String,
    /// Timestamp of run (RFC 3339)
    pub timestamp: String,

    pub input: FileInfo,
    pub output: FileInfo,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pedigree: Option<String>,

    pub samples: SampleCounts,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: String,
    pub format: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleCounts {
    pub cohort: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founders: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_records: usize,
    pub annotated_records: usize,
    pub mitochondrial_records: usize,
    pub zero_an_cohort_records: usize,
    pub zero_an_founder_records: usize,
}

impl From<&CohortSummary> for Statistics {
    fn from(s: &CohortSummary) -> Self {
        Statistics {
            total_records: s.total_records,
            annotated_records: s.annotated_records,
            mitochondrial_records: s.mitochondrial_records,
            zero_an_cohort_records: s.zero_an_cohort_records,
            zero_an_founder_records: s.zero_an_founder_records,
        }
    }
}

impl RunReport {
    pub fn new(config: &CohortConfig, output_format: OutputFormat, summary: &CohortSummary) -> Self {
        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());

        RunReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp,
            input: FileInfo {
                path: config.input.display().to_string(),
                format: input_format_name(config.input_format.resolve(&config.input)).to_string(),
            },
            output: FileInfo {
                path: config.output.display().to_string(),
                format: output_format_name(output_format).to_string(),
            },
            pedigree: config.pedigree.as_ref().map(|p| p.display().to_string()),
            samples: SampleCounts {
                cohort: summary.cohort_samples,
                founders: summary.founder_samples,
            },
            statistics: Statistics::from(summary),
        }
    }

    /// Location of the report for a given output: `out.vcf` maps to `out_report.json`.
    pub fn path_for(output_path: &Path) -> PathBuf {
        let stem = output_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy();
        output_path.with_file_name(format!("{stem}_report.json"))
    }

    pub fn write(&self, output_path: &Path) -> std::io::Result<PathBuf> {
        let report_path = Self::path_for(output_path);
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        std::fs::write(&report_path, json)?;
        tracing::info!("Wrote run report to {}", report_path.display());

        Ok(report_path)
    }
}

fn input_format_name(format: InputFormat) -> &'static str {
    match format {
        InputFormat::Vcf => "vcf",
        InputFormat::Bcf => "bcf",
        InputFormat::Auto => "auto",
    }
}

fn output_format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Vcf => "vcf",
        OutputFormat::Bcf => "bcf",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_path_uses_output_stem() {
        assert_eq!(
            RunReport::path_for(Path::new("/data/cohort.vcf")),
            PathBuf::from("/data/cohort_report.json")
        );
        assert_eq!(
            RunReport::path_for(Path::new("out.vcf.gz")),
            PathBuf::from("out.vcf_report.json")
        );
    }

    #[test]
    fn serializes_summary_counts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CohortConfig::new(dir.path().join("in.vcf"), dir.path().join("out.vcf"));
        config.pedigree = Some(dir.path().join("family.ped"));
        let summary = CohortSummary {
            total_records: 3,
            annotated_records: 2,
            mitochondrial_records: 1,
            cohort_samples: 4,
            founder_samples: Some(2),
            ..CohortSummary::default()
        };

        let path = RunReport::new(&config, OutputFormat::Vcf, &summary)
            .write(&config.output)
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(json["statistics"]["total_records"], 3);
        assert_eq!(json["statistics"]["mitochondrial_records"], 1);
        assert_eq!(json["samples"]["founders"], 2);
        assert_eq!(json["output"]["format"], "vcf");
        assert_eq!(json["input"]["format"], "vcf");
    }
}
