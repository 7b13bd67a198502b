//! K-mer alphabet construction and caching.
//!
//! The alphabet for a given k is every length-k string over `ACGT`, in
//! lexicographic order. It is built by iterative expansion: starting from the
//! four single bases, each round appends every base to every existing string.
//! Because both the existing list and the appended bases are already ordered,
//! the result is sorted without an explicit sort.

use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{MAX_K, NUCLEOTIDES};
use crate::core::encoding::encode_kmer;
use crate::error::{AlfieError, Result};

/// Check that `k` is a supported k-mer size.
pub fn validate_k(k: usize) -> Result<()> {
    if k == 0 || k > MAX_K {
        return Err(AlfieError::validation(format!(
            "k must be between 1 and {} (got {})",
            MAX_K, k
        )));
    }
    Ok(())
}

/// Build every k-mer over `ACGT` in lexicographic order.
///
/// # Errors
/// Returns a validation error if `k` is 0 or larger than `MAX_K`.
///
/// # Examples
/// ```
/// let kmers = alfie::build_alphabet(2).unwrap();
/// assert_eq!(kmers.len(), 16);
/// assert_eq!(&kmers[..4], &["AA", "AC", "AG", "AT"]);
/// ```
pub fn build_alphabet(k: usize) -> Result<Vec<String>> {
    validate_k(k)?;

    let mut kmers: Vec<String> = NUCLEOTIDES
        .iter()
        .map(|&b| char::from(b).to_string())
        .collect();

    for _ in 1..k {
        let mut next = Vec::with_capacity(kmers.len() * NUCLEOTIDES.len());
        for prefix in &kmers {
            for &base in &NUCLEOTIDES {
                let mut kmer = String::with_capacity(prefix.len() + 1);
                kmer.push_str(prefix);
                kmer.push(char::from(base));
                next.push(kmer);
            }
        }
        kmers = next;
    }

    Ok(kmers)
}

/// The ordered set of all k-mers for one k.
///
/// Immutable once built; share it through `Arc` (see `AlphabetCache`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerAlphabet {
    k: usize,
    kmers: Vec<String>,
}

impl KmerAlphabet {
    /// Build the alphabet for `k`.
    pub fn new(k: usize) -> Result<Self> {
        Ok(Self {
            k,
            kmers: build_alphabet(k)?,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of k-mers (always 4^k).
    pub fn len(&self) -> usize {
        self.kmers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kmers.is_empty()
    }

    /// All k-mers in lexicographic order.
    pub fn kmers(&self) -> &[String] {
        &self.kmers
    }

    /// Position of `kmer` in the alphabet, or `None` if it is not a
    /// length-k string over `ACGT` (case-insensitive).
    pub fn index_of(&self, kmer: &str) -> Option<usize> {
        if kmer.len() != self.k {
            return None;
        }
        encode_kmer(kmer.as_bytes())
    }
}

/// Owned, lazily populated cache of alphabets keyed by k.
///
/// One cache lives for the duration of a run; alphabets are built on first
/// use and then shared by every feature vector at that k.
#[derive(Debug, Default)]
pub struct AlphabetCache {
    alphabets: HashMap<usize, Arc<KmerAlphabet>>,
}

impl AlphabetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the alphabet for `k`, building it if this is the first request.
    pub fn get_or_build(&mut self, k: usize) -> Result<Arc<KmerAlphabet>> {
        if let Some(alphabet) = self.alphabets.get(&k) {
            return Ok(Arc::clone(alphabet));
        }
        let alphabet = Arc::new(KmerAlphabet::new(k)?);
        log::debug!("Built {}-mer alphabet ({} labels)", k, alphabet.len());
        self.alphabets.insert(k, Arc::clone(&alphabet));
        Ok(alphabet)
    }

    /// Resolve alphabets for an ordered list of k sizes.
    pub fn resolve(&mut self, kmers: &[usize]) -> Result<Vec<Arc<KmerAlphabet>>> {
        kmers.iter().map(|&k| self.get_or_build(k)).collect()
    }

    /// Number of distinct k sizes built so far.
    pub fn len(&self) -> usize {
        self.alphabets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alphabets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_sizes() {
        for k in 1..=6 {
            let kmers = build_alphabet(k).unwrap();
            assert_eq!(kmers.len(), 4usize.pow(k as u32), "k={}", k);
            assert!(kmers.iter().all(|s| s.len() == k));
        }
    }

    #[test]
    fn test_alphabet_sorted_without_duplicates() {
        for k in 1..=5 {
            let kmers = build_alphabet(k).unwrap();
            assert!(
                kmers.windows(2).all(|w| w[0] < w[1]),
                "k={} alphabet must be strictly increasing",
                k
            );
        }
    }

    #[test]
    fn test_alphabet_is_deterministic() {
        assert_eq!(build_alphabet(4).unwrap(), build_alphabet(4).unwrap());
    }

    #[test]
    fn test_alphabet_endpoints() {
        let kmers = build_alphabet(4).unwrap();
        assert_eq!(&kmers[..3], &["AAAA", "AAAC", "AAAG"]);
        assert_eq!(&kmers[kmers.len() - 3..], &["TTTC", "TTTG", "TTTT"]);
        assert_eq!(build_alphabet(1).unwrap(), vec!["A", "C", "G", "T"]);
    }

    #[test]
    fn test_invalid_k() {
        assert!(build_alphabet(0).is_err());
        assert!(build_alphabet(MAX_K + 1).is_err());
    }

    #[test]
    fn test_index_of_matches_position() {
        let alphabet = KmerAlphabet::new(3).unwrap();
        for (i, kmer) in alphabet.kmers().iter().enumerate() {
            assert_eq!(alphabet.index_of(kmer), Some(i));
        }
        assert_eq!(alphabet.index_of("acg"), alphabet.index_of("ACG"));
        assert_eq!(alphabet.index_of("ACGT"), None);
        assert_eq!(alphabet.index_of("ANG"), None);
    }

    #[test]
    fn test_cache_reuses_alphabets() {
        let mut cache = AlphabetCache::new();
        assert!(cache.is_empty());

        let a = cache.get_or_build(4).unwrap();
        let b = cache.get_or_build(4).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        let resolved = cache.resolve(&[6, 4]).unwrap();
        assert_eq!(resolved[0].k(), 6);
        assert!(Arc::ptr_eq(&resolved[1], &a));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_rejects_invalid_k() {
        let mut cache = AlphabetCache::new();
        assert!(cache.get_or_build(0).is_err());
        assert!(cache.is_empty());
    }
}
