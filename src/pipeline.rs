use std::path::PathBuf;

use anyhow::{Context, Result};
use noodles::vcf::{self, variant::RecordBuf, variant::record_buf::Samples};

use crate::{
    CohortSummary,
    annotate::{self, Scope},
    cohort::SampleUniverse,
    counter::VariantCounter,
    input::{self, InputFormat},
    output::{self, OutputFormat, VariantWriter},
    pedigree::{self, PedigreeIndex},
    ploidy::PloidyPolicy,
    report::RunReport,
    site::Site,
};

/// Configuration required to drive a summarization run.
#[derive(Debug, Clone)]
pub struct CohortConfig {
    pub input: PathBuf,
    pub input_format: InputFormat,
    pub output: PathBuf,
    pub output_format: Option<OutputFormat>,
    pub pedigree: Option<PathBuf>,
    /// Write a tabix index next to BGZF-compressed VCF output.
    pub write_index: bool,
    /// Write a SHA-256 checksum next to the output.
    pub write_checksum: bool,
    /// Write a JSON run report next to the output.
    pub write_report: bool,
}

impl CohortConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            input_format: InputFormat::Auto,
            output: output.into(),
            output_format: None,
            pedigree: None,
            write_index: true,
            write_checksum: true,
            write_report: false,
        }
    }
}

/// What happened to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Annotated {
        cohort_an: u32,
        founder_an: Option<u32>,
    },
    Mitochondrial,
}

/// Counts and annotates records one at a time.
#[derive(Debug, Clone)]
pub struct CohortPipeline {
    universe: SampleUniverse,
    counter: VariantCounter,
}

impl CohortPipeline {
    pub fn new(universe: SampleUniverse) -> Self {
        let counter = VariantCounter::new(PloidyPolicy::new(universe.sex_model()));
        Self { universe, counter }
    }

    pub fn universe(&self) -> &SampleUniverse {
        &self.universe
    }

    /// Annotate `record` in place. Mitochondrial records are left untouched.
    pub fn process(&self, record: &mut RecordBuf) -> Result<RecordOutcome> {
        let site = Site::from_record(record)?;

        let Some(cohort) = self.counter.count(&site, self.universe.all()) else {
            tracing::debug!(
                contig = site.contig(),
                class = %site.chromosome_class(),
                "passing record through unannotated"
            );
            return Ok(RecordOutcome::Mitochondrial);
        };
        annotate::annotate(record, &cohort, Scope::Cohort);

        let founder_an = self
            .universe
            .founders()
            .and_then(|founders| self.counter.count(&site, founders))
            .map(|stats| {
                annotate::annotate(record, &stats, Scope::Founders);
                stats.total_chromosomes
            });

        Ok(RecordOutcome::Annotated {
            cohort_an: cohort.total_chromosomes,
            founder_an,
        })
    }

    /// Header for the genotype-free output: the input header with the cohort
    /// INFO fields declared and the sample columns removed.
    pub fn output_header(&self, input: &vcf::Header) -> vcf::Header {
        let mut header = input.clone();
        annotate::declare_fields(&mut header, self.universe.has_pedigree());
        header.sample_names_mut().clear();
        header
    }
}

/// Load the pedigree (if any) and resolve it against the VCF sample list.
pub fn build_universe(config: &CohortConfig, header: &vcf::Header) -> Result<SampleUniverse> {
    let samples = header.sample_names().iter().cloned();

    let Some(path) = &config.pedigree else {
        tracing::warn!(
            "no pedigree given, not computing founder statistics; assuming all samples are female \
             and using all samples (sex chromosome counts will be inaccurate)"
        );
        return Ok(SampleUniverse::without_pedigree(samples));
    };

    let individuals = pedigree::read_pedigree(path)?;
    let index = PedigreeIndex::new(individuals);
    tracing::info!(
        individuals = index.len(),
        founders = index.founders().len(),
        males = index.males().len(),
        male_founders = index.male_founders().len(),
        "loaded pedigree"
    );

    let universe = SampleUniverse::with_pedigree(samples, &index)?;

    let non_founder_males: Vec<&str> = index.non_founder_males().collect();
    if !non_founder_males.is_empty() {
        tracing::warn!(
            count = non_founder_males.len(),
            samples = %non_founder_males.join(","),
            "only male founders are counted as hemizygous; non-founder males are counted as female"
        );
    }

    let unknown = universe.unknown_sex_samples();
    if !unknown.is_empty() {
        tracing::warn!(
            count = unknown.len(),
            samples = %unknown.join(","),
            "pedigree samples with unknown sex are counted as female"
        );
    }

    Ok(universe)
}

/// Read the input VCF/BCF, annotate every record, and write the cohort summary.
pub fn summarize_cohort(config: CohortConfig) -> Result<CohortSummary> {
    tracing::info!(
        input = %config.input.display(),
        output = %config.output.display(),
        pedigree = ?config.pedigree.as_ref().map(|p| p.display().to_string()),
        "starting cohort summary",
    );

    let mut source = input::open_source(&config.input, config.input_format)?;
    let universe = build_universe(&config, source.header())?;
    let pipeline = CohortPipeline::new(universe);

    let output_format = config
        .output_format
        .unwrap_or_else(|| OutputFormat::detect(&config.output));
    let header = pipeline.output_header(source.header());

    let mut writer = VariantWriter::create(&config.output, output_format)?;
    writer
        .write_header(&header)
        .context("failed to write output header")?;
    let bgzf_vcf = writer.is_bgzf_vcf();

    let mut summary = CohortSummary {
        cohort_samples: pipeline.universe().all().len(),
        founder_samples: pipeline.universe().founders().map(|f| f.len()),
        ..CohortSummary::default()
    };

    let mut record = RecordBuf::default();
    let mut current_contig: Option<String> = None;
    while source
        .read_record(&mut record)
        .context("failed to read variant record")?
    {
        let contig = record.reference_sequence_name();
        if current_contig.as_deref() != Some(contig) {
            tracing::info!(contig, "starting on contig");
            current_contig = Some(contig.to_string());
        }

        let outcome = pipeline.process(&mut record).with_context(|| {
            format!(
                "failed to process record at {}:{}",
                record.reference_sequence_name(),
                record
                    .variant_start()
                    .map(usize::from)
                    .unwrap_or_default()
            )
        })?;
        summary.record(outcome);

        *record.samples_mut() = Samples::default();
        writer
            .write_variant(&header, &record)
            .context("failed to write variant record")?;
    }

    writer.finish().context("failed to finish output")?;

    if config.write_index {
        if bgzf_vcf {
            output::write_tabix_index(&config.output)?;
        } else {
            tracing::debug!("output is not BGZF-compressed VCF; skipping tabix index");
        }
    }

    if config.write_checksum {
        output::write_checksum(&config.output)?;
    }

    if config.write_report {
        RunReport::new(&config, output_format, &summary)
            .write(&config.output)
            .context("failed to write run report")?;
    }

    tracing::info!(
        records = summary.total_records,
        annotated = summary.annotated_records,
        mitochondrial = summary.mitochondrial_records,
        "finished cohort summary"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::read_pedigree_from;
    use noodles::core::Position;
    use noodles::vcf::variant::record_buf::{
        AlternateBases,
        info::field::{Value, value::Array},
        samples::{Keys, sample::Value as SampleValue},
    };

    fn record(contig: &str, calls: &[&str]) -> RecordBuf {
        let keys: Keys = [String::from("GT")].into_iter().collect();
        let values = calls
            .iter()
            .map(|gt| vec![Some(SampleValue::String(gt.to_string()))])
            .collect();
        RecordBuf::builder()
            .set_reference_sequence_name(contig.to_string())
            .set_variant_start(Position::MIN)
            .set_reference_bases(String::from("A"))
            .set_alternate_bases(AlternateBases::from(vec![String::from("C")]))
            .set_samples(Samples::new(keys, values))
            .build()
    }

    fn trio_pipeline() -> CohortPipeline {
        let ped = read_pedigree_from(&b"F dad 0 0 1 1\nF mum 0 0 2 1\nF kid dad mum 1 2\n"[..])
            .unwrap();
        let universe =
            SampleUniverse::with_pedigree(["dad", "mum", "kid"], &PedigreeIndex::new(ped))
                .unwrap();
        CohortPipeline::new(universe)
    }

    #[test]
    fn annotates_cohort_and_founder_passes() {
        let pipeline = trio_pipeline();
        let mut record = record("X", &["1", "0/1", "1"]);

        let outcome = pipeline.process(&mut record).unwrap();
        // kid is a non-founder male and so diploid: his lone `1` is hom-ALT.
        assert_eq!(
            outcome,
            RecordOutcome::Annotated {
                cohort_an: 5,
                founder_an: Some(3)
            }
        );

        let info = record.info();
        assert_eq!(
            info.get("COHORT_AC"),
            Some(Some(&Value::Array(Array::Integer(vec![Some(3)]))))
        );
        assert_eq!(
            info.get("COHORT_Hemi"),
            Some(Some(&Value::Array(Array::Integer(vec![Some(1)]))))
        );
        assert_eq!(
            info.get("COHORT_Hom"),
            Some(Some(&Value::Array(Array::Integer(vec![Some(1)]))))
        );
        assert_eq!(
            info.get("FOUNDER_COHORT_Hemi"),
            Some(Some(&Value::Array(Array::Integer(vec![Some(1)]))))
        );
        assert_eq!(
            info.get("FOUNDER_COHORT_Het"),
            Some(Some(&Value::Array(Array::Integer(vec![Some(1)]))))
        );
        assert_eq!(info.get("FOUNDER_COHORT_AN"), Some(Some(&Value::Integer(3))));
    }

    #[test]
    fn mitochondrial_records_are_untouched() {
        let pipeline = trio_pipeline();
        let mut record = record("MT", &["1", "1", "1"]);
        let before = record.clone();

        assert_eq!(
            pipeline.process(&mut record).unwrap(),
            RecordOutcome::Mitochondrial
        );
        assert_eq!(record, before);
    }

    #[test]
    fn no_pedigree_skips_founder_fields() {
        let pipeline = CohortPipeline::new(SampleUniverse::without_pedigree(["a", "b"]));
        let mut record = record("1", &["0/1", "1/1"]);

        let outcome = pipeline.process(&mut record).unwrap();
        assert_eq!(
            outcome,
            RecordOutcome::Annotated {
                cohort_an: 4,
                founder_an: None
            }
        );
        assert_eq!(record.info().as_ref().len(), 6);
        assert!(record.info().get("FOUNDER_COHORT_AN").is_none());
    }

    #[test]
    fn output_header_drops_samples_and_declares_fields() {
        let pipeline = trio_pipeline();
        let input = vcf::Header::builder()
            .add_sample_name("dad")
            .add_sample_name("mum")
            .add_sample_name("kid")
            .build();

        let header = pipeline.output_header(&input);
        assert!(header.sample_names().is_empty());
        assert_eq!(header.infos().len(), 12);
    }
}
