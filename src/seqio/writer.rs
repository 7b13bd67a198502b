//! Sequence output writer for FASTA/FASTQ records.
//!
//! Every write call opens the destination, writes all of its records, flushes
//! and closes again, so calls made batch after batch in append mode never
//! leave a half-written record behind. Gzip destinations (`.gz`) receive one
//! complete gzip member per call; multi-member files decompress as one stream.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::constants::WRITE_BUF_SIZE;
use crate::error::{AlfieError, Result};
use crate::seqio::format::{is_gzipped, SeqFormat};
use crate::seqio::record::SequenceRecord;

/// How an existing destination file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Keep existing content and add to the end (file created if absent).
    Append,
    /// Truncate before writing.
    Overwrite,
}

impl WriteMode {
    pub fn from_append(append: bool) -> Self {
        if append {
            WriteMode::Append
        } else {
            WriteMode::Overwrite
        }
    }
}

/// Writer bound to one destination path.
///
/// The destination's extension fixes the format; records of the other format
/// are rejected rather than converted.
#[derive(Debug, Clone)]
pub struct SequenceWriter {
    path: PathBuf,
    format: SeqFormat,
    compressed: bool,
}

impl SequenceWriter {
    /// Create a writer for `path`.
    ///
    /// # Errors
    /// Returns a format error if the extension is not a FASTA/FASTQ one.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = SeqFormat::detect(&path)?;
        let compressed = is_gzipped(&path);
        Ok(Self {
            path,
            format,
            compressed,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SeqFormat {
        self.format
    }

    /// Write `records` in order, then flush and close the file.
    ///
    /// All records are checked against the destination format before the
    /// file is touched.
    ///
    /// # Errors
    /// Returns a validation error if any record's format differs from the
    /// destination's, or an I/O error if the file cannot be written.
    pub fn write(&self, records: &[SequenceRecord], mode: WriteMode) -> Result<()> {
        self.check_formats(records)?;

        let file = self.open(mode)?;
        let out = BufWriter::with_capacity(WRITE_BUF_SIZE, file);

        if self.compressed {
            let mut encoder = GzEncoder::new(out, Compression::default());
            self.write_all(&mut encoder, records)?;
            let mut out = encoder
                .finish()
                .map_err(|e| AlfieError::io(&self.path, "write", e))?;
            out.flush()
                .map_err(|e| AlfieError::io(&self.path, "flush", e))?;
        } else {
            let mut out = out;
            self.write_all(&mut out, records)?;
            out.flush()
                .map_err(|e| AlfieError::io(&self.path, "flush", e))?;
        }

        Ok(())
    }

    /// Write a single record.
    pub fn write_record(&self, record: &SequenceRecord, mode: WriteMode) -> Result<()> {
        self.write(std::slice::from_ref(record), mode)
    }

    fn check_formats(&self, records: &[SequenceRecord]) -> Result<()> {
        match records.iter().find(|r| r.format() != self.format) {
            Some(record) => Err(AlfieError::validation(format!(
                "cannot write {} record '{}' to {} file '{}'",
                record.format(),
                record.name(),
                self.format,
                self.path.display()
            ))),
            None => Ok(()),
        }
    }

    fn open(&self, mode: WriteMode) -> Result<File> {
        let mut options = OpenOptions::new();
        match mode {
            WriteMode::Append => options.create(true).append(true),
            WriteMode::Overwrite => options.create(true).write(true).truncate(true),
        };
        options
            .open(&self.path)
            .map_err(|e| AlfieError::io(&self.path, "open for writing", e))
    }

    fn write_all<W: Write>(&self, out: &mut W, records: &[SequenceRecord]) -> Result<()> {
        for record in records {
            write_one(out, record).map_err(|e| AlfieError::io(&self.path, "write", e))?;
        }
        Ok(())
    }
}

/// Serialize one record with its canonical header marker.
fn write_one<W: Write>(out: &mut W, record: &SequenceRecord) -> std::io::Result<()> {
    match record {
        SequenceRecord::Fasta { name, sequence } => {
            out.write_all(b">")?;
            out.write_all(name.as_bytes())?;
            out.write_all(b"\n")?;
            out.write_all(sequence.as_bytes())?;
            out.write_all(b"\n")
        }
        SequenceRecord::Fastq {
            name,
            sequence,
            strand,
            quality,
        } => {
            out.write_all(b"@")?;
            out.write_all(name.as_bytes())?;
            out.write_all(b"\n")?;
            out.write_all(sequence.as_bytes())?;
            out.write_all(b"\n")?;
            out.write_all(strand.as_bytes())?;
            out.write_all(b"\n")?;
            out.write_all(quality.as_bytes())?;
            out.write_all(b"\n")
        }
    }
}

/// Write records to `path`, appending or overwriting.
///
/// Convenience wrapper for one-off writes; see `SequenceWriter`.
pub fn write_records(
    records: &[SequenceRecord],
    path: impl Into<PathBuf>,
    append: bool,
) -> Result<()> {
    SequenceWriter::new(path)?.write(records, WriteMode::from_append(append))
}

// ============================================================================
// Unit Tests
// ============================================================================
