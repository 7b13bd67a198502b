//! Argument parsing utilities for CLI commands.

use alfie::constants::{LARGE_K_WARNING, MAX_K};

/// Validate a single `-k` value: an integer in 1..=MAX_K.
pub fn parse_kmer_size(s: &str) -> Result<usize, String> {
    let k: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid k-mer size", s))?;
    if k == 0 || k > MAX_K {
        return Err(format!("k-mer size must be between 1 and {} (got {})", MAX_K, k));
    }
    Ok(k)
}

/// k sizes above `LARGE_K_WARNING`, whose dense tables get expensive.
pub fn large_kmers(kmers: &[usize]) -> Vec<usize> {
    kmers
        .iter()
        .copied()
        .filter(|&k| k > LARGE_K_WARNING)
        .collect()
}

/// Log one warning per resolved k that is above `LARGE_K_WARNING`.
pub fn warn_large_kmers(kmers: &[usize]) {
    for k in large_kmers(kmers) {
        log::warn!(
            "k = {} gives {} features per record. Memory use grows as 4^k.",
            k,
            1usize << (2 * k)
        );
    }
}

/// Parse `-b/--batch`. 0 is accepted and means unbatched.
pub fn parse_batch_size(s: &str) -> Result<usize, String> {
    s.parse()
        .map_err(|_| format!("'{}' is not a valid non-negative integer", s))
}

/// Treat an absent or zero batch size as a whole-file read.
pub fn effective_batch_size(batch_size: Option<usize>) -> Option<usize> {
    batch_size.filter(|&b| b > 0)
}
