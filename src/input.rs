use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use flate2::read::MultiGzDecoder;
use noodles::bcf;
use noodles::vcf::{self, variant::RecordBuf};

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum InputFormat {
    /// Variant Call Format (plain or BGZF-compressed)
    Vcf,
    /// Binary Call Format
    Bcf,
    /// Detect format automatically
    Auto,
}

impl InputFormat {
    pub fn detect(path: &Path) -> Self {
        // First check file extension
        if let Some(filename) = path.file_name().map(|n| n.to_string_lossy().to_lowercase()) {
            if filename.ends_with(".vcf.gz") || filename.ends_with(".vcf") {
                return Self::Vcf;
            } else if filename.ends_with(".bcf") {
                return Self::Bcf;
            }
        }

        // BCF is BGZF-compressed and starts with 'BCF' once inflated
        if let Ok(file) = File::open(path) {
            let mut magic = [0u8; 3];
            if MultiGzDecoder::new(file).read_exact(&mut magic).is_ok() && &magic == b"BCF" {
                return Self::Bcf;
            }
        }

        Self::Vcf
    }

    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => Self::detect(path),
            other => other,
        }
    }
}

/// Streaming source of variant records. One record is held at a time.
pub trait VariantSource {
    fn header(&self) -> &vcf::Header;

    /// Fill `record` with the next record; returns `false` at end of input.
    fn read_record(&mut self, record: &mut RecordBuf) -> io::Result<bool>;
}

impl<T: VariantSource + ?Sized> VariantSource for Box<T> {
    fn header(&self) -> &vcf::Header {
        (**self).header()
    }

    fn read_record(&mut self, record: &mut RecordBuf) -> io::Result<bool> {
        (**self).read_record(record)
    }
}

/// Adapter for reading VCF files.
pub struct VcfSource<R> {
    reader: vcf::io::Reader<R>,
    header: vcf::Header,
    raw: vcf::Record,
}

impl<R: BufRead> VcfSource<R> {
    pub fn new(mut reader: vcf::io::Reader<R>) -> io::Result<Self> {
        let header = reader.read_header()?;
        Ok(Self {
            reader,
            header,
            raw: vcf::Record::default(),
        })
    }
}

impl<R: BufRead> VariantSource for VcfSource<R> {
    fn header(&self) -> &vcf::Header {
        &self.header
    }

    fn read_record(&mut self, record: &mut RecordBuf) -> io::Result<bool> {
        if self.reader.read_record(&mut self.raw)? == 0 {
            return Ok(false);
        }
        *record = RecordBuf::try_from_variant_record(&self.header, &self.raw)?;
        Ok(true)
    }
}

/// Adapter for reading BCF files.
pub struct BcfSource<R> {
    reader: bcf::io::Reader<R>,
    header: vcf::Header,
    raw: bcf::Record,
}

impl<R: Read> BcfSource<R> {
    pub fn new(mut reader: bcf::io::Reader<R>) -> io::Result<Self> {
        let header = reader.read_header()?;
        Ok(Self {
            reader,
            header,
            raw: bcf::Record::default(),
        })
    }
}

impl<R: Read> VariantSource for BcfSource<R> {
    fn header(&self) -> &vcf::Header {
        &self.header
    }

    fn read_record(&mut self, record: &mut RecordBuf) -> io::Result<bool> {
        if self.reader.read_record(&mut self.raw)? == 0 {
            return Ok(false);
        }
        *record = RecordBuf::try_from_variant_record(&self.header, &self.raw)?;
        Ok(true)
    }
}

/// Open a VCF or BCF file and read its header.
pub fn open_source(path: &Path, format: InputFormat) -> Result<Box<dyn VariantSource>> {
    match format.resolve(path) {
        InputFormat::Bcf => {
            let reader = bcf::io::reader::Builder::default()
                .build_from_path(path)
                .with_context(|| format!("failed to open BCF {}", path.display()))?;
            let source = BcfSource::new(reader)
                .with_context(|| format!("failed to read BCF header of {}", path.display()))?;
            Ok(Box::new(source))
        }
        InputFormat::Vcf | InputFormat::Auto => {
            let reader = vcf::io::reader::Builder::default()
                .build_from_path(path)
                .with_context(|| format!("failed to open VCF {}", path.display()))?;
            let source = VcfSource::new(reader)
                .with_context(|| format!("failed to read VCF header of {}", path.display()))?;
            Ok(Box::new(source))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            InputFormat::detect(&PathBuf::from("cohort.vcf.gz")),
            InputFormat::Vcf
        );
        assert_eq!(
            InputFormat::detect(&PathBuf::from("cohort.bcf")),
            InputFormat::Bcf
        );
        assert_eq!(
            InputFormat::Bcf.resolve(&PathBuf::from("cohort.vcf")),
            InputFormat::Bcf
        );
    }

    #[test]
    fn streams_records_from_vcf_text() {
        let data = b"##fileformat=VCFv4.3\n\
            ##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n\
            ##contig=<ID=1>\n\
            #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1\ts2\n\
            1\t10\t.\tA\tC\t.\t.\t.\tGT\t0/1\t1/1\n\
            1\t20\t.\tG\tT\t.\t.\t.\tGT\t0/0\t./.\n";
        let reader = vcf::io::Reader::new(&data[..]);
        let mut source = VcfSource::new(reader).unwrap();
        assert_eq!(source.header().sample_names().len(), 2);

        let mut record = RecordBuf::default();
        let mut count = 0;
        while source.read_record(&mut record).unwrap() {
            count += 1;
            assert_eq!(record.reference_sequence_name(), "1");
        }
        assert_eq!(count, 2);
    }
}
