use noodles::vcf::variant::{
    RecordBuf,
    record::samples::keys::key,
    record_buf::samples::sample::Value,
};
use thiserror::Error;

use crate::chrom::ChromosomeClass;
use crate::genotype::Genotype;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("genotype of sample #{column} at {contig} references allele {allele}, but the site has {alt_count} ALT allele(s)")]
    AlleleOutOfRange {
        contig: String,
        column: usize,
        allele: usize,
        alt_count: usize,
    },
    #[error("unparsable genotype '{genotype}' for sample #{column} at {contig}")]
    InvalidGenotype {
        contig: String,
        column: usize,
        genotype: String,
    },
}

/// The parts of a variant record the counter looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    contig: String,
    alt_count: usize,
    genotypes: Vec<Genotype>,
}

impl Site {
    /// `genotypes` is indexed by VCF sample column.
    pub fn new(contig: impl Into<String>, alt_count: usize, genotypes: Vec<Genotype>) -> Self {
        Self {
            contig: contig.into(),
            alt_count,
            genotypes,
        }
    }

    /// Extract GT calls for every sample column of a record.
    pub fn from_record(record: &RecordBuf) -> Result<Self, SiteError> {
        let contig = record.reference_sequence_name();
        let alt_count = record.alternate_bases().as_ref().len();

        let mut genotypes = Vec::new();
        for (column, sample) in record.samples().values().enumerate() {
            let genotype = match sample.get(key::GENOTYPE) {
                Some(Some(Value::Genotype(genotype))) => Genotype::new(
                    genotype
                        .as_ref()
                        .iter()
                        .map(|allele| allele.position())
                        .collect(),
                ),
                Some(Some(Value::String(raw))) => {
                    Genotype::parse(raw).ok_or_else(|| SiteError::InvalidGenotype {
                        contig: contig.to_string(),
                        column,
                        genotype: raw.clone(),
                    })?
                }
                _ => Genotype::no_call(),
            };

            if let Some(allele) = genotype.max_allele()
                && allele > alt_count
            {
                return Err(SiteError::AlleleOutOfRange {
                    contig: contig.to_string(),
                    column,
                    allele,
                    alt_count,
                });
            }

            genotypes.push(genotype);
        }

        Ok(Self::new(contig, alt_count, genotypes))
    }

    pub fn contig(&self) -> &str {
        &self.contig
    }

    pub fn chromosome_class(&self) -> ChromosomeClass {
        ChromosomeClass::classify(&self.contig)
    }

    pub fn alt_count(&self) -> usize {
        self.alt_count
    }

    /// Call of the sample in `column`; `None` if the record has no such column.
    pub fn genotype(&self, column: usize) -> Option<&Genotype> {
        self.genotypes.get(column)
    }
}
