//! Sliding-window k-mer counting.
//!
//! Counts are stored densely, indexed by the k-mer's lexicographic rank, so
//! every member of the alphabet starts at zero and iteration order is the
//! alphabet order. The window is advanced with a rolling base-4 index; any
//! window overlapping `N` or `-` is skipped entirely.

use crate::core::alphabet::{validate_k, KmerAlphabet};
use crate::core::encoding::{base_to_rank, validate_sequence, AMBIGUOUS};
use crate::error::Result;

/// Per-k-mer occurrence counts for one sequence at one k.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerCounts {
    k: usize,
    counts: Vec<u64>,
}

impl KmerCounts {
    /// Count k-mers in `seq` (case-insensitive).
    ///
    /// # Errors
    /// Returns a validation error for an unsupported `k`, or
    /// `InvalidSequence` if `seq` contains symbols outside `ACGTN-`.
    ///
    /// # Examples
    /// ```
    /// use alfie::KmerCounts;
    ///
    /// let counts = KmerCounts::count(b"ACGTNACG", 3).unwrap();
    /// assert_eq!(counts.get("ACG"), Some(2));
    /// assert_eq!(counts.total(), 3);
    /// ```
    pub fn count(seq: &[u8], k: usize) -> Result<Self> {
        validate_k(k)?;
        validate_sequence("<sequence>", seq)?;
        Ok(Self::count_validated(seq, k))
    }

    /// Count k-mers in a sequence that already passed `validate_sequence`.
    ///
    /// `k` must already be validated. Any unexpected byte is treated like `N`.
    pub(crate) fn count_validated(seq: &[u8], k: usize) -> Self {
        let mut counts = vec![0u64; 1usize << (2 * k)];
        let mask = counts.len() - 1;

        let mut index = 0usize;
        // Number of consecutive unambiguous bases ending at the current position
        let mut run = 0usize;

        for &byte in seq {
            let rank = base_to_rank(byte);
            if rank >= AMBIGUOUS {
                run = 0;
                index = 0;
                continue;
            }
            index = ((index << 2) | rank as usize) & mask;
            run += 1;
            if run >= k {
                counts[index] += 1;
            }
        }

        Self { k, counts }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Count for a single k-mer, or `None` if it is not in the alphabet.
    pub fn get(&self, kmer: &str) -> Option<u64> {
        if kmer.len() != self.k {
            return None;
        }
        crate::core::encoding::encode_kmer(kmer.as_bytes()).map(|i| self.counts[i])
    }

    /// Counts in lexicographic k-mer order (length 4^k).
    pub fn values(&self) -> &[u64] {
        &self.counts
    }

    /// Number of windows that were counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(kmer, count)` pairs in lexicographic order.
    ///
    /// `alphabet` must be the alphabet for this `k`.
    pub fn items<'a>(
        &'a self,
        alphabet: &'a KmerAlphabet,
    ) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        debug_assert_eq!(alphabet.k(), self.k);
        alphabet
            .kmers()
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }

    /// Normalize counts to frequencies.
    ///
    /// Returns all zeros (never NaN) when no window was counted.
    pub fn frequencies(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.counts.len()];
        self.write_frequencies(&mut out);
        out
    }

    /// Normalize counts into `out`, which must be `4^k` long.
    pub(crate) fn write_frequencies(&self, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.counts.len());
        let total = self.total();
        if total == 0 {
            out.fill(0.0);
            return;
        }
        let total = total as f64;
        for (slot, &c) in out.iter_mut().zip(&self.counts) {
            *slot = c as f64 / total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_homopolymer_runs() {
        let counts = KmerCounts::count(b"AAAAAATTTTTT", 4).unwrap();

        assert_eq!(counts.get("AAAA"), Some(3));
        assert_eq!(counts.get("AAAT"), Some(1));
        assert_eq!(counts.get("AATT"), Some(1));
        assert_eq!(counts.get("ATTT"), Some(1));
        assert_eq!(counts.get("TTTT"), Some(3));
        assert_eq!(counts.total(), 9);

        let nonzero = counts.values().iter().filter(|&&c| c > 0).count();
        assert_eq!(nonzero, 5);
    }

    #[test]
    fn test_count_is_case_insensitive() {
        let upper = KmerCounts::count(b"ACGTACGT", 2).unwrap();
        let lower = KmerCounts::count(b"acgtacgt", 2).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_ambiguous_windows_are_skipped() {
        // Windows: ACG, CGN, GNT, NTA, TAC, AC-, C-G, -GT
        let counts = KmerCounts::count(b"ACGNTAC-GT", 3).unwrap();
        assert_eq!(counts.get("ACG"), Some(1));
        assert_eq!(counts.get("TAC"), Some(1));
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_all_ambiguous_yields_zero_counts() {
        let counts = KmerCounts::count(b"NNNN", 4).unwrap();
        assert_eq!(counts.values().len(), 256);
        assert_eq!(counts.total(), 0);
        assert!(counts.frequencies().iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_short_sequence_yields_zero_counts() {
        let counts = KmerCounts::count(b"ACG", 4).unwrap();
        assert_eq!(counts.total(), 0);

        let empty = KmerCounts::count(b"", 4).unwrap();
        assert_eq!(empty.values().len(), 256);
        assert_eq!(empty.total(), 0);
    }

    #[test]
    fn test_invalid_symbol_rejected() {
        assert!(KmerCounts::count(b"NOTDNA", 4).is_err());
        assert!(KmerCounts::count(b"ACGU", 2).is_err());
    }

    #[test]
    fn test_invalid_k_rejected() {
        assert!(KmerCounts::count(b"ACGT", 0).is_err());
    }

    #[test]
    fn test_frequencies_sum_to_one() {
        let counts = KmerCounts::count(b"AAAAAATTTTTTATATATGCGCGCCCCCCGCCGCGCCGGGC", 4).unwrap();
        let sum: f64 = counts.frequencies().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_items_follow_alphabet_order() {
        let alphabet = KmerAlphabet::new(2).unwrap();
        let counts = KmerCounts::count(b"AACC", 2).unwrap();
        let items: Vec<(&str, u64)> = counts.items(&alphabet).collect();

        assert_eq!(items.len(), 16);
        assert_eq!(items[0], ("AA", 1));
        assert_eq!(items[1], ("AC", 1));
        assert_eq!(items[5], ("CC", 1));
        assert_eq!(items[15], ("TT", 0));
    }

    #[test]
    fn test_get_unknown_kmer() {
        let counts = KmerCounts::count(b"ACGT", 2).unwrap();
        assert_eq!(counts.get("ACG"), None);
        assert_eq!(counts.get("NN"), None);
    }
}
