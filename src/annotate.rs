//! INFO fields carrying the cohort statistics, and their header declarations.

use noodles::vcf::{
    self,
    header::record::value::{
        Map,
        map::{
            Info as InfoMap,
            info::{Number, Type},
        },
    },
    variant::{
        RecordBuf,
        record_buf::info::field::{Value, value::Array},
    },
};

use crate::counter::CohortStatistics;

pub const FOUNDER_PREFIX: &str = "FOUNDER_";
pub const COHORT_AN: &str = "COHORT_AN";
pub const COHORT_AC: &str = "COHORT_AC";
pub const COHORT_AF: &str = "COHORT_AF";
pub const COHORT_HEMI: &str = "COHORT_Hemi";
pub const COHORT_HET: &str = "COHORT_Het";
pub const COHORT_HOM: &str = "COHORT_Hom";

const NO_PEDIGREE_WARNING: &str =
    " (WARNING: no pedigree given, inaccurate results on sex chromosomes)";

/// Which sample subset a set of fields describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Cohort,
    Founders,
}

impl Scope {
    pub fn prefix(self) -> &'static str {
        match self {
            Scope::Cohort => "",
            Scope::Founders => FOUNDER_PREFIX,
        }
    }

    pub fn key(self, field: &str) -> String {
        format!("{}{}", self.prefix(), field)
    }

    fn note(self) -> &'static str {
        match self {
            Scope::Cohort => "",
            Scope::Founders => " (only considering founders from pedigree)",
        }
    }
}

/// Write the six statistics for `scope` into the record's INFO column,
/// replacing any previous values under the same keys.
pub fn annotate(record: &mut RecordBuf, stats: &CohortStatistics, scope: Scope) {
    let frequencies = stats
        .allele_frequencies()
        .into_iter()
        .map(|af| af.map(|af| af as f32))
        .collect();

    let info = record.info_mut();
    info.insert(
        scope.key(COHORT_AN),
        Some(Value::Integer(to_i32(stats.total_chromosomes))),
    );
    info.insert(scope.key(COHORT_AC), Some(integer_array(&stats.allele_counts)));
    info.insert(
        scope.key(COHORT_AF),
        Some(Value::Array(Array::Float(frequencies))),
    );
    info.insert(scope.key(COHORT_HEMI), Some(integer_array(&stats.hemi_counts)));
    info.insert(scope.key(COHORT_HET), Some(integer_array(&stats.het_counts)));
    info.insert(scope.key(COHORT_HOM), Some(integer_array(&stats.hom_counts)));
}

fn integer_array(counts: &[u32]) -> Value {
    Value::Array(Array::Integer(
        counts.iter().map(|&count| Some(to_i32(count))).collect(),
    ))
}

/// VCF `Integer` is a signed 32-bit value. Reaching `i32::MAX` takes more than
/// a billion diploid samples, so counts saturate there instead of failing the
/// record.
fn to_i32(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Declare all twelve INFO fields, cohort and founder variants alike.
///
/// When no pedigree was supplied every description carries a warning that
/// sex-chromosome counts are inaccurate.
pub fn declare_fields(header: &mut vcf::Header, pedigree_supplied: bool) {
    let warning = if pedigree_supplied {
        ""
    } else {
        NO_PEDIGREE_WARNING
    };

    for scope in [Scope::Cohort, Scope::Founders] {
        let note = scope.note();
        let per_allele = ", for each ALT allele, in the same order as listed";
        let fields = [
            (
                COHORT_AN,
                Number::Count(1),
                Type::Integer,
                format!("Total number of alleles in cohort's called genotypes{note}{warning}"),
            ),
            (
                COHORT_AC,
                Number::AlternateBases,
                Type::Integer,
                format!("Allele count in cohort's called genotypes{note}{per_allele}{warning}"),
            ),
            (
                COHORT_AF,
                Number::AlternateBases,
                Type::Float,
                format!("Allele frequency in cohort{note}{per_allele}{warning}"),
            ),
            (
                COHORT_HEMI,
                Number::AlternateBases,
                Type::Integer,
                format!("Cohort's hemizygous counts{note}{per_allele}{warning}"),
            ),
            (
                COHORT_HET,
                Number::AlternateBases,
                Type::Integer,
                format!("Cohort's heterozygous counts{note}{per_allele}{warning}"),
            ),
            (
                COHORT_HOM,
                Number::AlternateBases,
                Type::Integer,
                format!("Cohort's homozygous counts{note}{per_allele}{warning}"),
            ),
        ];

        for (field, number, ty, description) in fields {
            header
                .infos_mut()
                .insert(scope.key(field), Map::<InfoMap>::new(number, ty, description));
        }
    }
}
