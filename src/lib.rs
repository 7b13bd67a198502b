//! Alignment-free k-mer classification of DNA sequences.
//!
//! Sequences are counted into dense k-mer tables over the `ACGT` alphabet,
//! turned into normalized frequency vectors (optionally at several k at
//! once), scored by an external model and routed to per-class FASTA/FASTQ
//! files.
//!
//! # Example
//!
//! ```
//! use alfie::{classify_records, Matrix, SequenceRecord};
//!
//! // Class 0 scores by A frequency, class 1 by T frequency.
//! let model = |m: &Matrix| -> alfie::Result<Matrix> {
//!     Matrix::from_rows(m.iter_rows().map(|r| vec![r[0], r[3]]).collect())
//! };
//!
//! let records = vec![
//!     SequenceRecord::fasta("a", "AAAT"),
//!     SequenceRecord::fasta("t", "TTTA"),
//! ];
//! let batch = classify_records(records, &model, &[1]).unwrap();
//! assert_eq!(batch.predictions, vec![0, 1]);
//! assert_eq!(batch.frequencies(0), [0.75, 0.0, 0.0, 0.25]);
//! ```

pub mod classify;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod logging;
pub mod seqio;

pub use classify::{
    argmax, classify_records, classify_with_alphabets, decode_predictions, feature_matrix,
    output_path, predict, ClassificationPipeline, ClassifiedBatch, Classifier, FeatureMatrix,
    LabelSet,
    LinearClassifier, Matrix, OutputRouter, PipelineConfig, RunSummary, ScoreMatrix,
};
pub use crate::core::{
    build_alphabet, feature_dimension, featurize, featurize_into, validate_k, validate_kmers,
    AlphabetCache, FeatureVector, KmerAlphabet, KmerCounts, SequenceFeatures,
};
pub use error::{AlfieError, Result};
pub use seqio::{
    file_type, read_batches, read_records, write_records, BatchReader, RecordReader, SeqFormat,
    SequenceRecord, SequenceWriter, WriteMode,
};
