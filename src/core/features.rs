//! K-mer frequency feature vectors.
//!
//! A `FeatureVector` pairs the alphabet labels for one k with the normalized
//! frequencies of a sequence. `SequenceFeatures` holds one vector per
//! configured k and exposes their concatenation, which is the row handed to
//! the classifier.

use std::sync::Arc;

use crate::core::alphabet::{validate_k, AlphabetCache, KmerAlphabet};
use crate::core::counting::KmerCounts;
use crate::core::encoding::validate_sequence;
use crate::error::{AlfieError, Result};

/// Normalized k-mer frequencies for one sequence at one k.
///
/// `labels()` and `frequencies()` always have the same length (4^k) and order.
#[derive(Debug, Clone)]
pub struct FeatureVector {
    alphabet: Arc<KmerAlphabet>,
    counts: KmerCounts,
    frequencies: Vec<f64>,
}

impl FeatureVector {
    /// Build a feature vector from counts and the matching alphabet.
    ///
    /// # Errors
    /// Returns a validation error if the alphabet and counts disagree on k.
    pub fn from_counts(counts: KmerCounts, alphabet: Arc<KmerAlphabet>) -> Result<Self> {
        if counts.k() != alphabet.k() {
            return Err(AlfieError::validation(format!(
                "alphabet k={} does not match counts k={}",
                alphabet.k(),
                counts.k()
            )));
        }
        let frequencies = counts.frequencies();
        Ok(Self {
            alphabet,
            counts,
            frequencies,
        })
    }

    pub fn k(&self) -> usize {
        self.counts.k()
    }

    /// K-mer labels in lexicographic order.
    pub fn labels(&self) -> &[String] {
        self.alphabet.kmers()
    }

    /// Frequencies parallel to `labels()`; sum to 1.0 or are all zero.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Raw counts parallel to `labels()`.
    pub fn values(&self) -> &[u64] {
        self.counts.values()
    }

    pub fn counts(&self) -> &KmerCounts {
        &self.counts
    }

    /// `(kmer, count)` pairs in lexicographic order.
    pub fn items(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.items(&self.alphabet)
    }

    /// `(kmer, frequency)` pairs in lexicographic order.
    pub fn freq_items(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels()
            .iter()
            .map(String::as_str)
            .zip(self.frequencies.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Total feature width for an ordered list of k sizes (sum of 4^k).
pub fn feature_dimension(kmers: &[usize]) -> usize {
    kmers.iter().map(|&k| 1usize << (2 * k)).sum()
}

/// Check a list of k sizes: non-empty and each within range.
pub fn validate_kmers(kmers: &[usize]) -> Result<()> {
    if kmers.is_empty() {
        return Err(AlfieError::validation("at least one k-mer size is required"));
    }
    kmers.iter().try_for_each(|&k| validate_k(k))
}

/// Build feature vectors for `seq` against pre-resolved alphabets.
///
/// The sequence is validated once, then counted at each alphabet's k.
pub fn featurize(
    name: &str,
    seq: &[u8],
    alphabets: &[Arc<KmerAlphabet>],
) -> Result<Vec<FeatureVector>> {
    validate_sequence(name, seq)?;
    alphabets
        .iter()
        .map(|alphabet| {
            let counts = KmerCounts::count_validated(seq, alphabet.k());
            FeatureVector::from_counts(counts, Arc::clone(alphabet))
        })
        .collect()
}

/// Write the concatenated frequency row of `seq` into `row`.
///
/// Each block is counted, normalized into its slice of `row` and dropped
/// before the next k is counted, so only one count table is alive at a time.
///
/// # Errors
/// Returns `InvalidSequence` for symbols outside `ACGTN-`, or a validation
/// error if `row` is not `sum(4^k)` long.
pub fn featurize_into(
    name: &str,
    seq: &[u8],
    alphabets: &[Arc<KmerAlphabet>],
    row: &mut [f64],
) -> Result<()> {
    let dim: usize = alphabets.iter().map(|a| a.len()).sum();
    if row.len() != dim {
        return Err(AlfieError::validation(format!(
            "feature row has {} slots, k sizes need {}",
            row.len(),
            dim
        )));
    }
    validate_sequence(name, seq)?;

    let mut offset = 0;
    for alphabet in alphabets {
        let block = &mut row[offset..offset + alphabet.len()];
        KmerCounts::count_validated(seq, alphabet.k()).write_frequencies(block);
        offset += alphabet.len();
    }
    Ok(())
}

/// K-mer features of one named sequence at one or more k sizes.
///
/// # Examples
/// ```
/// use alfie::{AlphabetCache, SequenceFeatures};
///
/// let mut cache = AlphabetCache::new();
/// let mut features = SequenceFeatures::new("s1", "aaaaaattttttatat", &[4], &mut cache).unwrap();
/// assert_eq!(features.frequencies().len(), 256);
///
/// features.change_k(2, &mut cache).unwrap();
/// assert_eq!(features.labels()[..4], ["AA", "AC", "AG", "AT"]);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceFeatures {
    name: String,
    sequence: String,
    vectors: Vec<FeatureVector>,
}

impl SequenceFeatures {
    /// Validate `sequence` and count it at every k in `kmers`, in order.
    pub fn new(
        name: impl Into<String>,
        sequence: &str,
        kmers: &[usize],
        cache: &mut AlphabetCache,
    ) -> Result<Self> {
        validate_kmers(kmers)?;
        let name = name.into();
        let alphabets = cache.resolve(kmers)?;
        let sequence = sequence.to_ascii_uppercase();
        let vectors = featurize(&name, sequence.as_bytes(), &alphabets)?;
        Ok(Self {
            name,
            sequence,
            vectors,
        })
    }

    /// Replace all k sizes with a single `k`, recounting from scratch.
    pub fn change_k(&mut self, k: usize, cache: &mut AlphabetCache) -> Result<()> {
        self.change_kmers(&[k], cache)
    }

    /// Replace all k sizes with `kmers`, recounting from scratch.
    pub fn change_kmers(&mut self, kmers: &[usize], cache: &mut AlphabetCache) -> Result<()> {
        validate_kmers(kmers)?;
        let alphabets = cache.resolve(kmers)?;
        self.vectors = alphabets
            .into_iter()
            .map(|alphabet| {
                let counts = KmerCounts::count_validated(self.sequence.as_bytes(), alphabet.k());
                FeatureVector::from_counts(counts, alphabet)
            })
            .collect::<Result<_>>()?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The upper-cased sequence the counts were taken from.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// The k sizes, in feature order.
    pub fn kmers(&self) -> Vec<usize> {
        self.vectors.iter().map(FeatureVector::k).collect()
    }

    /// One feature vector per k, in feature order.
    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    /// Concatenated labels across all k sizes.
    pub fn labels(&self) -> Vec<&str> {
        self.vectors
            .iter()
            .flat_map(|v| v.labels().iter().map(String::as_str))
            .collect()
    }

    /// Concatenated frequencies across all k sizes: the classifier input row.
    pub fn frequencies(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.vectors.iter().map(FeatureVector::len).sum());
        for v in &self.vectors {
            row.extend_from_slice(v.frequencies());
        }
        row
    }
}
