//! Sample subsets resolved against the VCF header's sample columns.

use std::collections::HashMap;

use thiserror::Error;

use crate::pedigree::{PedigreeIndex, Sex};
use crate::ploidy::SexModel;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("the following samples are in the pedigree but missing from the VCF: {}", .missing.join(", "))]
    MissingSamples { missing: Vec<String> },
}

/// A sample taking part in a counting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CohortMember {
    /// Column of the sample in the VCF.
    pub column: usize,
    pub sex: Sex,
}

/// Ordered set of members, sorted by VCF column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSubset {
    members: Vec<CohortMember>,
}

impl SampleSubset {
    fn new(mut members: Vec<CohortMember>) -> Self {
        members.sort_by_key(|member| member.column);
        members.dedup_by_key(|member| member.column);
        Self { members }
    }

    pub fn members(&self) -> &[CohortMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<CohortMember> for SampleSubset {
    fn from_iter<T: IntoIterator<Item = CohortMember>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Every sample subset the pipeline counts over, built once before the
/// first record is read and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct SampleUniverse {
    sample_names: Vec<String>,
    all: SampleSubset,
    founders: Option<SampleSubset>,
    sex_model: SexModel,
}

impl SampleUniverse {
    /// Without a pedigree every VCF sample is counted, sex is unknown, and no
    /// founder pass happens.
    pub fn without_pedigree<I, S>(vcf_samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sample_names: Vec<String> = vcf_samples.into_iter().map(Into::into).collect();
        let all = (0..sample_names.len())
            .map(|column| CohortMember {
                column,
                sex: Sex::Unknown,
            })
            .collect();

        Self {
            sample_names,
            all,
            founders: None,
            sex_model: SexModel::AssumeFemale,
        }
    }

    /// Restrict counting to pedigree individuals. Every pedigree name must be
    /// a VCF sample. Only male founders are counted as male.
    pub fn with_pedigree<I, S>(vcf_samples: I, pedigree: &PedigreeIndex) -> Result<Self, ConsistencyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sample_names: Vec<String> = vcf_samples.into_iter().map(Into::into).collect();
        let columns: HashMap<&str, usize> = sample_names
            .iter()
            .enumerate()
            .map(|(column, name)| (name.as_str(), column))
            .collect();

        let missing: Vec<String> = pedigree
            .all_samples()
            .iter()
            .filter(|name| !columns.contains_key(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(ConsistencyError::MissingSamples { missing });
        }

        let member = |name: &String| CohortMember {
            column: columns[name.as_str()],
            sex: pedigree.counted_sex(name),
        };
        let all = pedigree.all_samples().iter().map(member).collect();
        let founders = pedigree.founders().iter().map(member).collect();

        Ok(Self {
            sample_names,
            all,
            founders: Some(founders),
            sex_model: SexModel::Pedigree,
        })
    }

    pub fn all(&self) -> &SampleSubset {
        &self.all
    }

    /// `None` when no pedigree was supplied; the founder pass is skipped.
    pub fn founders(&self) -> Option<&SampleSubset> {
        self.founders.as_ref()
    }

    pub fn sex_model(&self) -> SexModel {
        self.sex_model
    }

    pub fn has_pedigree(&self) -> bool {
        self.founders.is_some()
    }

    /// Names of counted samples whose sex is unknown.
    pub fn unknown_sex_samples(&self) -> Vec<&str> {
        self.all
            .members()
            .iter()
            .filter(|member| member.sex == Sex::Unknown)
            .map(|member| self.sample_names[member.column].as_str())
            .collect()
    }
}
