//! Sequence format detection from file extensions.
//!
//! The extension is the only signal: file contents are never sniffed. A
//! trailing `.gz` marks gzip compression and is looked past to find the
//! format extension (`reads.fq.gz` is compressed FASTQ).

use std::fmt;
use std::path::Path;

use crate::constants::{FASTA_EXTENSIONS, FASTQ_EXTENSIONS, GZIP_EXTENSION};
use crate::error::{AlfieError, Result};

/// Sequence file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqFormat {
    Fasta,
    Fastq,
}

impl SeqFormat {
    /// Detect format from the path's extension.
    ///
    /// # Errors
    /// Returns `AlfieError::Format` naming the accepted extensions if the
    /// extension is not one of `fa`, `fasta`, `fq`, `fastq` (optionally
    /// followed by `.gz`).
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = format_extension(path).ok_or_else(|| AlfieError::unsupported_format(path))?;
        if FASTA_EXTENSIONS.contains(&ext.as_str()) {
            Ok(SeqFormat::Fasta)
        } else if FASTQ_EXTENSIONS.contains(&ext.as_str()) {
            Ok(SeqFormat::Fastq)
        } else {
            Err(AlfieError::unsupported_format(path))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeqFormat::Fasta => "fasta",
            SeqFormat::Fastq => "fastq",
        }
    }

    /// The header marker that starts every record.
    pub fn marker(&self) -> char {
        match self {
            SeqFormat::Fasta => '>',
            SeqFormat::Fastq => '@',
        }
    }
}

impl fmt::Display for SeqFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenience wrapper around `SeqFormat::detect` for string paths.
///
/// # Examples
/// ```
/// use alfie::{file_type, SeqFormat};
///
/// assert_eq!(file_type("sample.fq").unwrap(), SeqFormat::Fastq);
/// assert!(file_type("sample.xyz").is_err());
/// ```
pub fn file_type(path: impl AsRef<Path>) -> Result<SeqFormat> {
    SeqFormat::detect(path.as_ref())
}

/// Whether the path ends in `.gz`.
pub fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(GZIP_EXTENSION))
}

/// Lower-cased format extension, looking past a trailing `.gz`.
fn format_extension(path: &Path) -> Option<String> {
    let path = if is_gzipped(path) {
        Path::new(path.file_stem()?)
    } else {
        path
    };
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
