//! Constants used throughout the alfie library: k-mer limits, default
//! classification settings and I/O tuning.

// ============================================================================
// Nucleotide Alphabet
// ============================================================================

/// The four unambiguous nucleotides, in lexicographic order.
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Symbols accepted in a sequence but never counted inside a k-mer window.
pub const AMBIGUOUS_SYMBOLS: [u8; 2] = [b'N', b'-'];

// ============================================================================
// K-mer Limits
// ============================================================================

/// Default k-mer size used for feature extraction.
pub const DEFAULT_K: usize = 4;

/// Largest supported k. The alphabet holds 4^k labels, so 12 means ~16.7M entries.
pub const MAX_K: usize = 12;

/// k sizes above this are accepted but logged as a memory warning.
pub const LARGE_K_WARNING: usize = 8;

// ============================================================================
// Classification Defaults
// ============================================================================

/// Default class labels, in the alphabetical order the classifier was trained with.
pub const DEFAULT_LABELS: [&str; 5] = ["animalia", "bacteria", "fungi", "plantae", "protista"];

/// Output folder used by the CLI when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "alfie_out";

// ============================================================================
// File Formats
// ============================================================================

/// Extensions recognised as FASTA.
pub const FASTA_EXTENSIONS: [&str; 2] = ["fa", "fasta"];

/// Extensions recognised as FASTQ.
pub const FASTQ_EXTENSIONS: [&str; 2] = ["fq", "fastq"];

/// All accepted sequence file extensions, for error messages.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["fa", "fasta", "fq", "fastq"];

/// Suffix marking gzip-compressed input or output.
pub const GZIP_EXTENSION: &str = "gz";

// ============================================================================
// I/O Buffer Sizes
// ============================================================================

/// Buffer size for reading sequence files (1MB).
pub(crate) const READ_BUF_SIZE: usize = 1024 * 1024;

/// Buffer size for writing sequence and feature files (1MB).
pub(crate) const WRITE_BUF_SIZE: usize = 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_sorted() {
        let mut sorted = DEFAULT_LABELS;
        sorted.sort_unstable();
        assert_eq!(sorted, DEFAULT_LABELS);
    }

    #[test]
    fn test_accepted_extensions_cover_both_formats() {
        for ext in FASTA_EXTENSIONS.iter().chain(FASTQ_EXTENSIONS.iter()) {
            assert!(ACCEPTED_EXTENSIONS.contains(ext));
        }
    }

    #[test]
    fn test_default_k_within_limit() {
        assert!(DEFAULT_K >= 1 && DEFAULT_K <= MAX_K);
        assert!(LARGE_K_WARNING < MAX_K);
    }
}
