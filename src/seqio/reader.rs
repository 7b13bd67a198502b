//! Streaming FASTA/FASTQ readers.
//!
//! Two read modes are provided:
//! - `read_records` parses a whole file into memory, preserving file order.
//! - `read_batches` yields the same records lazily in batches of at most
//!   `batch_size`, so peak memory is bounded by one batch.
//!
//! Concatenating every batch yields exactly what `read_records` returns.
//!
//! # Examples
//! ```no_run
//! use alfie::seqio::{read_batches, read_records};
//!
//! let all = read_records("reads.fastq").unwrap();
//!
//! for batch in read_batches("reads.fastq", 1000).unwrap() {
//!     let batch = batch.unwrap();
//!     println!("{} records", batch.len());
//! }
//! ```

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::constants::READ_BUF_SIZE;
use crate::core::encoding::{base_to_rank, INVALID};
use crate::error::{AlfieError, Result};
use crate::seqio::format::{is_gzipped, SeqFormat};
use crate::seqio::record::SequenceRecord;

type BoxedRead = Box<dyn BufRead + Send>;

/// Open a sequence file for buffered reading, decompressing `.gz` input.
fn open_input(path: &Path) -> Result<BoxedRead> {
    let file = File::open(path).map_err(|e| AlfieError::io(path, "open", e))?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::with_capacity(
            READ_BUF_SIZE,
            MultiGzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(READ_BUF_SIZE, file)))
    }
}

/// Header text after the record marker, line terminator removed.
///
/// Names are free text: bytes that are not UTF-8 are replaced, never rejected.
fn header_name(line: &[u8], marker: u8) -> String {
    let line = line.strip_prefix(&[marker]).unwrap_or(line);
    String::from_utf8_lossy(strip_newline(line)).into_owned()
}

fn strip_newline(line: &[u8]) -> &[u8] {
    trim_end_by(line, |b| b == b'\n' || b == b'\r')
}

fn trim_end_by(line: &[u8], strip: impl Fn(u8) -> bool) -> &[u8] {
    let end = line.iter().rposition(|&b| !strip(b)).map_or(0, |i| i + 1);
    &line[..end]
}

/// Decode one line of sequence text belonging to record `name`.
///
/// Bytes that are not UTF-8 are never nucleotides, so they fail as an invalid
/// symbol. `offset` is the record's sequence length before this line.
fn sequence_text<'a>(name: &str, offset: usize, line: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(line).map_err(|e| {
        let bad = e.valid_up_to();
        let pos = line[..bad]
            .iter()
            .position(|&b| base_to_rank(b) == INVALID)
            .unwrap_or(bad);
        AlfieError::invalid_sequence(name, offset + pos, char::from(line[pos]))
    })
}

// ============================================================================
// FASTA Format
// ============================================================================

/// Sequential FASTA reader.
///
/// A record starts at a `>` header and collects every following line until
/// the next header or end of input. The header of the *next* record is held
/// between calls, so a record is only emitted once its end has been seen.
/// Lines before the first header are ignored.
pub struct FastaReader<R: BufRead> {
    reader: R,
    origin: PathBuf,
    line_buf: Vec<u8>,
    pending_name: Option<String>,
    started: bool,
}

impl<R: BufRead> FastaReader<R> {
    /// Wrap a buffered reader. `origin` is only used in error messages.
    pub fn new(reader: R, origin: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            line_buf: Vec::with_capacity(256),
            pending_name: None,
            started: false,
        }
    }

    fn read_line(&mut self) -> Result<usize> {
        self.line_buf.clear();
        self.reader
            .read_until(b'\n', &mut self.line_buf)
            .map_err(|e| AlfieError::io(&self.origin, "read", e))
    }

    /// Skip to the first header line.
    fn start(&mut self) -> Result<()> {
        self.started = true;
        let mut skipped = 0usize;
        while self.read_line()? > 0 {
            if self.line_buf.starts_with(b">") {
                self.pending_name = Some(header_name(&self.line_buf, b'>'));
                break;
            }
            skipped += 1;
        }
        if skipped > 0 {
            log::debug!(
                "Ignored {} line(s) before the first FASTA header in {}",
                skipped,
                self.origin.display()
            );
        }
        Ok(())
    }

    /// Read the next record.
    ///
    /// # Returns
    /// - `Ok(Some(record))` - Successfully read a record
    /// - `Ok(None)` - End of input reached
    /// - `Err(e)` - I/O error, or a sequence line that is not text
    pub fn read_next(&mut self) -> Result<Option<SequenceRecord>> {
        if !self.started {
            self.start()?;
        }

        let name = match self.pending_name.take() {
            Some(n) => n,
            None => return Ok(None),
        };

        let mut sequence = String::new();
        while self.read_line()? > 0 {
            if self.line_buf.starts_with(b">") {
                self.pending_name = Some(header_name(&self.line_buf, b'>'));
                break;
            }
            let line = trim_end_by(&self.line_buf, |b| b.is_ascii_whitespace());
            sequence.push_str(sequence_text(&name, sequence.len(), line)?);
        }

        Ok(Some(SequenceRecord::Fasta { name, sequence }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<SequenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

// ============================================================================
// FASTQ Format
// ============================================================================

/// Sequential FASTQ reader over fixed 4-line groups.
///
/// ```text
/// @read_name
/// SEQUENCE
/// +
/// QUALITY
/// ```
///
/// Sequences never span lines. A trailing group with fewer than four lines is
/// dropped. Line contents are not checked against the format (the strand line
/// is kept as-is, quality length is not compared with sequence length).
pub struct FastqReader<R: BufRead> {
    reader: R,
    origin: PathBuf,
    lines: [Vec<u8>; 4],
}

impl<R: BufRead> FastqReader<R> {
    /// Wrap a buffered reader. `origin` is only used in error messages.
    pub fn new(reader: R, origin: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            lines: Default::default(),
        }
    }

    /// Read the next complete 4-line record.
    ///
    /// # Returns
    /// - `Ok(Some(record))` - Successfully read a record
    /// - `Ok(None)` - End of input reached (an incomplete last group is discarded)
    /// - `Err(e)` - I/O error, or a sequence line that is not text
    pub fn read_next(&mut self) -> Result<Option<SequenceRecord>> {
        for filled in 0..4 {
            self.lines[filled].clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.lines[filled])
                .map_err(|e| AlfieError::io(&self.origin, "read", e))?;
            if n == 0 {
                if filled > 0 {
                    log::debug!(
                        "Dropped {} trailing line(s) of an incomplete FASTQ record in {}",
                        filled,
                        self.origin.display()
                    );
                }
                return Ok(None);
            }
        }

        let name = header_name(&self.lines[0], b'@');
        let sequence = sequence_text(&name, 0, strip_newline(&self.lines[1]))?.to_string();
        Ok(Some(SequenceRecord::Fastq {
            sequence,
            strand: String::from_utf8_lossy(strip_newline(&self.lines[2])).into_owned(),
            quality: String::from_utf8_lossy(strip_newline(&self.lines[3])).into_owned(),
            name,
        }))
    }
}

impl<R: BufRead> Iterator for FastqReader<R> {
    type Item = Result<SequenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

// ============================================================================
// Format-dispatching reader
// ============================================================================

/// Reader that picks FASTA or FASTQ parsing from the file extension.
pub enum RecordReader {
    Fasta(FastaReader<BoxedRead>),
    Fastq(FastqReader<BoxedRead>),
}

impl RecordReader {
    /// Open a sequence file; format (and gzip) is detected from the extension.
    ///
    /// # Errors
    /// Returns a format error for an unrecognized extension, or an I/O error
    /// if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SeqFormat::detect(path)?;
        let input = open_input(path)?;
        Ok(match format {
            SeqFormat::Fasta => RecordReader::Fasta(FastaReader::new(input, path)),
            SeqFormat::Fastq => RecordReader::Fastq(FastqReader::new(input, path)),
        })
    }

    pub fn format(&self) -> SeqFormat {
        match self {
            RecordReader::Fasta(_) => SeqFormat::Fasta,
            RecordReader::Fastq(_) => SeqFormat::Fastq,
        }
    }

    /// Read the next record from the underlying parser.
    pub fn read_next(&mut self) -> Result<Option<SequenceRecord>> {
        match self {
            RecordReader::Fasta(r) => r.read_next(),
            RecordReader::Fastq(r) => r.read_next(),
        }
    }
}

impl Iterator for RecordReader {
    type Item = Result<SequenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

/// Read every record of a FASTA/FASTQ file, in file order.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<SequenceRecord>> {
    RecordReader::open(path)?.collect()
}

// ============================================================================
// Batched reading
// ============================================================================

/// Lazy, forward-only sequence of record batches.
///
/// Every batch holds `batch_size` records except possibly the last, which
/// holds whatever remains. Once exhausted (or after an error) it yields
/// nothing more; re-reading requires opening the file again.
pub struct BatchReader {
    reader: RecordReader,
    batch_size: usize,
    finished: bool,
}

impl BatchReader {
    /// Batch records from an already opened reader.
    ///
    /// # Errors
    /// Returns a validation error if `batch_size` is 0.
    pub fn new(reader: RecordReader, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(AlfieError::validation("batch size must be greater than 0"));
        }
        Ok(Self {
            reader,
            batch_size,
            finished: false,
        })
    }

    pub fn format(&self) -> SeqFormat {
        self.reader.format()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Read the next batch, or `None` once the input is exhausted.
    pub fn next_batch(&mut self) -> Result<Option<Vec<SequenceRecord>>> {
        if self.finished {
            return Ok(None);
        }

        let mut batch = Vec::with_capacity(self.batch_size);
        while batch.len() < self.batch_size {
            match self.reader.read_next() {
                Ok(Some(record)) => batch.push(record),
                Ok(None) => {
                    self.finished = true;
                    break;
                }
                Err(e) => {
                    self.finished = true;
                    return Err(e);
                }
            }
        }

        if batch.is_empty() {
            Ok(None)
        } else {
            Ok(Some(batch))
        }
    }
}

impl Iterator for BatchReader {
    type Item = Result<Vec<SequenceRecord>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch().transpose()
    }
}

/// Open a sequence file for batched reading.
pub fn read_batches(path: impl AsRef<Path>, batch_size: usize) -> Result<BatchReader> {
    if batch_size == 0 {
        return Err(AlfieError::validation("batch size must be greater than 0"));
    }
    BatchReader::new(RecordReader::open(path)?, batch_size)
}

// ============================================================================
// Unit Tests
// ============================================================================
