//! Sequence I/O: typed records, extension-based format detection, streaming
//! readers (full or batched) and append-safe writers.
//!
//! Supports FASTA (`.fa`, `.fasta`) and FASTQ (`.fq`, `.fastq`), each
//! optionally gzip-compressed (`.gz`).

pub mod format;
pub mod reader;
pub mod record;
pub mod writer;

pub use format::{file_type, is_gzipped, SeqFormat};
pub use reader::{read_batches, read_records, BatchReader, FastaReader, FastqReader, RecordReader};
pub use record::SequenceRecord;
pub use writer::{write_records, SequenceWriter, WriteMode};
