use std::{
    collections::{BTreeSet, HashMap, HashSet},
    io::{self, BufRead},
    path::Path,
};

use thiserror::Error;

/// Sex as recorded in a pedigree. Samples without a pedigree are `Unknown`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    fn from_ped_code(code: &str) -> Self {
        match code {
            "1" => Sex::Male,
            "2" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

/// One individual from a PED file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PedigreeRecord {
    pub family: String,
    pub name: String,
    pub father: Option<String>,
    pub mother: Option<String>,
    pub sex: Sex,
}

impl PedigreeRecord {
    /// Founders have no parent recorded in the pedigree.
    pub fn is_founder(&self) -> bool {
        self.father.is_none() && self.mother.is_none()
    }
}

/// Iterator over individuals in a whitespace-delimited PED file.
pub struct Reader<R> {
    inner: R,
    line: u64,
    buf: String,
}

impl<R> Reader<R>
where
    R: BufRead,
{
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R> Iterator for Reader<R>
where
    R: BufRead,
{
    type Item = Result<PedigreeRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    let trimmed = self.buf.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }

                    return Some(parse_record(trimmed).map_err(|kind| ParseError {
                        line: self.line,
                        raw: trimmed.to_string(),
                        kind,
                    }));
                }
                Err(e) => {
                    return Some(Err(ParseError {
                        line: self.line,
                        raw: String::new(),
                        kind: ParseErrorKind::Io(e),
                    }));
                }
            }
        }
    }
}

/// Errors that can arise while parsing a PED line.
#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: u64,
    pub raw: String,
    #[source]
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("expected at least five whitespace-delimited fields, found {0}")]
    FieldCount(usize),
    #[error("individual '{0}' is listed more than once")]
    DuplicateIndividual(String),
}

#[derive(Debug, Error)]
pub enum PedigreeError {
    #[error("failed to open pedigree {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed pedigree {path}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },
}

fn parse_record(line: &str) -> Result<PedigreeRecord, ParseErrorKind> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return Err(ParseErrorKind::FieldCount(fields.len()));
    }

    Ok(PedigreeRecord {
        family: fields[0].to_string(),
        name: fields[1].to_string(),
        father: parent(fields[2]),
        mother: parent(fields[3]),
        sex: Sex::from_ped_code(fields[4]),
    })
}

fn parent(field: &str) -> Option<String> {
    match field {
        "0" | "." => None,
        other => Some(other.to_string()),
    }
}

/// Read every individual from a PED file, rejecting duplicate names.
pub fn read_pedigree_from<R: BufRead>(reader: R) -> Result<Vec<PedigreeRecord>, ParseError> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    let mut reader = Reader::new(reader);
    while let Some(result) = reader.next() {
        let record = result?;
        if !seen.insert(record.name.clone()) {
            return Err(ParseError {
                line: reader.line,
                raw: record.name.clone(),
                kind: ParseErrorKind::DuplicateIndividual(record.name),
            });
        }
        records.push(record);
    }

    Ok(records)
}

/// Open a (possibly gzip-compressed) PED file and read every individual.
pub fn read_pedigree(path: &Path) -> Result<Vec<PedigreeRecord>, PedigreeError> {
    let reader = crate::smart_reader::open_input(path).map_err(|source| PedigreeError::Open {
        path: path.display().to_string(),
        source,
    })?;

    read_pedigree_from(reader).map_err(|source| PedigreeError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Name sets derived from a parsed pedigree. Sets are ordered so iteration
/// is deterministic.
#[derive(Debug, Clone, Default)]
pub struct PedigreeIndex {
    sexes: HashMap<String, Sex>,
    all: BTreeSet<String>,
    founders: BTreeSet<String>,
    males: BTreeSet<String>,
    male_founders: BTreeSet<String>,
}

impl PedigreeIndex {
    pub fn new(individuals: Vec<PedigreeRecord>) -> Self {
        let mut index = Self::default();
        for person in individuals {
            index.all.insert(person.name.clone());
            let male = person.sex == Sex::Male;
            if male {
                index.males.insert(person.name.clone());
            }
            if person.is_founder() {
                index.founders.insert(person.name.clone());
                if male {
                    index.male_founders.insert(person.name.clone());
                }
            }
            index.sexes.insert(person.name, person.sex);
        }
        index
    }

    pub fn all_samples(&self) -> &BTreeSet<String> {
        &self.all
    }

    pub fn founders(&self) -> &BTreeSet<String> {
        &self.founders
    }

    pub fn males(&self) -> &BTreeSet<String> {
        &self.males
    }

    pub fn male_founders(&self) -> &BTreeSet<String> {
        &self.male_founders
    }

    /// Sex recorded in the PED file; `Unknown` for names not in the pedigree.
    pub fn sex_of(&self, name: &str) -> Sex {
        self.sexes.get(name).copied().unwrap_or_default()
    }

    /// Sex used for ploidy. Only male founders are haploid on X and Y; a
    /// non-founder male is counted like a female.
    pub fn counted_sex(&self, name: &str) -> Sex {
        match self.sex_of(name) {
            Sex::Male if self.male_founders.contains(name) => Sex::Male,
            Sex::Male => Sex::Female,
            other => other,
        }
    }

    /// Males that are not founders, and so are counted as diploid on X.
    pub fn non_founder_males(&self) -> impl Iterator<Item = &str> + '_ {
        self.males
            .difference(&self.male_founders)
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
