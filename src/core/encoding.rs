//! Nucleotide encoding utilities.
//!
//! This module provides:
//! - Base-to-rank conversion (A=0, C=1, G=2, T=3) so that a k-mer read as a
//!   base-4 number is its position in the lexicographic alphabet
//! - Classification of the ambiguous symbols `N` and `-`
//! - Character-set validation of whole sequences

use crate::constants::{AMBIGUOUS_SYMBOLS, NUCLEOTIDES};
use crate::error::{AlfieError, Result};

/// Rank assigned to `N`/`-`: accepted, but breaks every window containing it.
pub(crate) const AMBIGUOUS: u8 = 4;

/// Rank assigned to every byte outside `ACGTN-` (either case).
pub(crate) const INVALID: u8 = u8::MAX;

/// Lookup table for base → rank conversion, built from the nucleotide constants.
/// - A/C/G/T (either case) → 0..=3
/// - N/n and `-` → `AMBIGUOUS`
/// - Other bytes → `INVALID`
pub(crate) const BASE_TO_RANK_LUT: [u8; 256] = {
    let mut lut = [INVALID; 256];
    let mut i = 0;
    while i < NUCLEOTIDES.len() {
        let base = NUCLEOTIDES[i];
        lut[base as usize] = i as u8;
        lut[base.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    let mut j = 0;
    while j < AMBIGUOUS_SYMBOLS.len() {
        let symbol = AMBIGUOUS_SYMBOLS[j];
        lut[symbol as usize] = AMBIGUOUS;
        lut[symbol.to_ascii_lowercase() as usize] = AMBIGUOUS;
        j += 1;
    }
    lut
};

/// Convert a nucleotide byte to its lexicographic rank.
#[inline(always)]
pub fn base_to_rank(byte: u8) -> u8 {
    BASE_TO_RANK_LUT[byte as usize]
}

/// Check that every byte of `seq` is one of `ACGTN-` (case-insensitive).
///
/// `name` is only used for the error message.
///
/// # Errors
/// Returns `AlfieError::InvalidSequence` naming the first offending symbol
/// and its 0-based position.
pub fn validate_sequence(name: &str, seq: &[u8]) -> Result<()> {
    match seq.iter().position(|&b| base_to_rank(b) == INVALID) {
        Some(pos) => Err(AlfieError::invalid_sequence(
            name,
            pos,
            char::from(seq[pos]),
        )),
        None => Ok(()),
    }
}

/// Encode an unambiguous k-mer as its base-4 rank.
///
/// Returns `None` if the k-mer contains anything other than `ACGT`.
pub fn encode_kmer(kmer: &[u8]) -> Option<usize> {
    kmer.iter().try_fold(0usize, |acc, &b| {
        let rank = base_to_rank(b);
        if rank < AMBIGUOUS {
            Some((acc << 2) | rank as usize)
        } else {
            None
        }
    })
}
