//! Typed FASTA/FASTQ records.

use crate::core::encoding::validate_sequence;
use crate::error::Result;
use crate::seqio::format::SeqFormat;

/// One parsed FASTA or FASTQ entry.
///
/// `name` is the header line without its leading `>`/`@` marker. FASTQ
/// records additionally carry the strand line (usually `+`) and the quality
/// string, both kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceRecord {
    Fasta {
        name: String,
        sequence: String,
    },
    Fastq {
        name: String,
        sequence: String,
        strand: String,
        quality: String,
    },
}

impl SequenceRecord {
    pub fn fasta(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        SequenceRecord::Fasta {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    pub fn fastq(
        name: impl Into<String>,
        sequence: impl Into<String>,
        strand: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        SequenceRecord::Fastq {
            name: name.into(),
            sequence: sequence.into(),
            strand: strand.into(),
            quality: quality.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SequenceRecord::Fasta { name, .. } | SequenceRecord::Fastq { name, .. } => name,
        }
    }

    pub fn sequence(&self) -> &str {
        match self {
            SequenceRecord::Fasta { sequence, .. } | SequenceRecord::Fastq { sequence, .. } => {
                sequence
            }
        }
    }

    /// The FASTQ strand line, `None` for FASTA records.
    pub fn strand(&self) -> Option<&str> {
        match self {
            SequenceRecord::Fasta { .. } => None,
            SequenceRecord::Fastq { strand, .. } => Some(strand.as_str()),
        }
    }

    /// The FASTQ quality string, `None` for FASTA records.
    pub fn quality(&self) -> Option<&str> {
        match self {
            SequenceRecord::Fasta { .. } => None,
            SequenceRecord::Fastq { quality, .. } => Some(quality.as_str()),
        }
    }

    /// The format this record was parsed from (and must be written as).
    pub fn format(&self) -> SeqFormat {
        match self {
            SequenceRecord::Fasta { .. } => SeqFormat::Fasta,
            SequenceRecord::Fastq { .. } => SeqFormat::Fastq,
        }
    }

    /// Check the sequence uses only `ACGTN-` (case-insensitive).
    pub fn validate(&self) -> Result<()> {
        validate_sequence(self.name(), self.sequence().as_bytes())
    }
}
