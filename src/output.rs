use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use noodles::{
    bcf, bgzf, tabix,
    vcf::{self, variant::RecordBuf, variant::io::Write as VariantRecordWrite},
};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Variant Call Format text output; BGZF-compressed when the path ends in `.gz`.
    Vcf,
    /// Binary Call Format output.
    Bcf,
}

impl OutputFormat {
    pub fn detect(path: &Path) -> Self {
        let name = path.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".bcf") {
            Self::Bcf
        } else {
            Self::Vcf
        }
    }
}

/// Destination for annotated records.
pub enum VariantWriter {
    Vcf(vcf::io::Writer<BufWriter<File>>),
    VcfBgzf(vcf::io::Writer<bgzf::io::Writer<File>>),
    Bcf(bcf::io::Writer<bgzf::io::Writer<BufWriter<File>>>),
}

impl VariantWriter {
    pub fn create(path: &Path, format: OutputFormat) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create output {}", path.display()))?;

        let writer = match format {
            OutputFormat::Bcf => Self::Bcf(bcf::io::Writer::new(BufWriter::new(file))),
            OutputFormat::Vcf if is_bgzf_path(path) => {
                Self::VcfBgzf(vcf::io::Writer::new(bgzf::io::Writer::new(file)))
            }
            OutputFormat::Vcf => Self::Vcf(vcf::io::Writer::new(BufWriter::new(file))),
        };
        Ok(writer)
    }

    pub fn is_bgzf_vcf(&self) -> bool {
        matches!(self, Self::VcfBgzf(_))
    }

    pub fn write_header(&mut self, header: &vcf::Header) -> io::Result<()> {
        match self {
            Self::Vcf(writer) => writer.write_header(header),
            Self::VcfBgzf(writer) => writer.write_header(header),
            Self::Bcf(writer) => writer.write_header(header),
        }
    }

    pub fn write_variant(&mut self, header: &vcf::Header, record: &RecordBuf) -> io::Result<()> {
        match self {
            Self::Vcf(writer) => VariantRecordWrite::write_variant_record(writer, header, record),
            Self::VcfBgzf(writer) => {
                VariantRecordWrite::write_variant_record(writer, header, record)
            }
            Self::Bcf(writer) => VariantRecordWrite::write_variant_record(writer, header, record),
        }
    }

    /// Flush buffered data and write the BGZF EOF marker where applicable.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Vcf(writer) => writer.into_inner().flush(),
            Self::VcfBgzf(writer) => writer.into_inner().finish().map(|_| ()),
            Self::Bcf(writer) => writer.into_inner().finish()?.flush(),
        }
    }
}

fn is_bgzf_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("bgz"))
}

fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Build a tabix index for a finished BGZF VCF, written to `<path>.tbi`.
pub fn write_tabix_index(path: &Path) -> Result<PathBuf> {
    let index = vcf::fs::index(path)
        .with_context(|| format!("failed to index {}", path.display()))?;
    let index_path = sidecar_path(path, ".tbi");
    tabix::fs::write(&index_path, &index)
        .with_context(|| format!("failed to write index {}", index_path.display()))?;
    tracing::info!(index = %index_path.display(), "wrote tabix index");
    Ok(index_path)
}

/// Hex-encoded SHA-256 digest of a file.
pub fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Write `<path>.sha256` in `sha256sum` format.
pub fn write_checksum(path: &Path) -> Result<PathBuf> {
    let digest = sha256_file(path)
        .with_context(|| format!("failed to checksum {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let checksum_path = sidecar_path(path, ".sha256");
    std::fs::write(&checksum_path, format!("{digest}  {file_name}\n"))
        .with_context(|| format!("failed to write {}", checksum_path.display()))?;
    tracing::info!(checksum = %checksum_path.display(), "wrote checksum");
    Ok(checksum_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_from_extension() {
        assert_eq!(OutputFormat::detect(Path::new("out.bcf")), OutputFormat::Bcf);
        assert_eq!(OutputFormat::detect(Path::new("out.vcf.gz")), OutputFormat::Vcf);
        assert!(is_bgzf_path(Path::new("out.vcf.gz")));
        assert!(!is_bgzf_path(Path::new("out.vcf")));
    }

    #[test]
    fn sidecars_append_suffix() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/out.vcf.gz"), ".tbi"),
            PathBuf::from("/tmp/out.vcf.gz.tbi")
        );
    }

    #[test]
    fn checksum_matches_known_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, "abc").unwrap();

        assert_eq!(
            sha256_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        let checksum_path = write_checksum(&path).unwrap();
        let contents = std::fs::read_to_string(checksum_path).unwrap();
        assert!(contents.ends_with("  abc.txt\n"));
    }
}
