//! Core algorithms for k-mer feature extraction.
//!
//! This module contains the fundamental algorithms used throughout alfie:
//! - Nucleotide ranking and sequence validation
//! - Deterministic alphabet construction with an owned per-run cache
//! - Sliding-window k-mer counting that skips ambiguous windows
//! - Frequency normalization into classifier-ready feature vectors

pub mod alphabet;
pub mod counting;
pub mod encoding;
pub mod features;

// Re-export commonly used items at the core module level
pub use alphabet::{build_alphabet, validate_k, AlphabetCache, KmerAlphabet};
pub use counting::KmerCounts;
pub use encoding::{base_to_rank, encode_kmer, validate_sequence};
pub use features::{
    feature_dimension, featurize, featurize_into, validate_kmers, FeatureVector,
    SequenceFeatures,
};
