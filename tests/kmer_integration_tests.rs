//! K-mer alphabet, counting and feature vector behavior through the public API.

use anyhow::Result;

use alfie::{build_alphabet, AlfieError, AlphabetCache, KmerCounts, SequenceFeatures};

#[test]
fn test_alphabet_is_sorted_and_complete() -> Result<()> {
    for k in 1..=6 {
        let kmers = build_alphabet(k)?;
        assert_eq!(kmers.len(), 1 << (2 * k));
        assert!(kmers.windows(2).all(|w| w[0] < w[1]), "k={} not sorted", k);
        assert!(kmers.iter().all(|s| s.len() == k));
    }

    assert_eq!(build_alphabet(2)?[..5], ["AA", "AC", "AG", "AT", "CA"]);
    assert!(build_alphabet(0).is_err());
    assert!(build_alphabet(13).is_err());
    Ok(())
}

#[test]
fn test_counts_homopolymer_runs() -> Result<()> {
    let counts = KmerCounts::count(b"AAAAAATTTTTT", 4)?;

    assert_eq!(counts.get("AAAA"), Some(3));
    assert_eq!(counts.get("AAAT"), Some(1));
    assert_eq!(counts.get("AATT"), Some(1));
    assert_eq!(counts.get("ATTT"), Some(1));
    assert_eq!(counts.get("TTTT"), Some(3));
    assert_eq!(counts.get("ACGT"), Some(0));
    assert_eq!(counts.total(), 9);
    assert_eq!(counts.values().len(), 256);
    Ok(())
}

#[test]
fn test_ambiguous_symbols_break_windows() -> Result<()> {
    // Only ACG (before N) and CGT (after the gap) are complete windows.
    let counts = KmerCounts::count(b"ACGNAC-CGT", 3)?;
    assert_eq!(counts.total(), 2);
    assert_eq!(counts.get("ACG"), Some(1));
    assert_eq!(counts.get("CGT"), Some(1));
    Ok(())
}

#[test]
fn test_invalid_symbol_is_rejected() {
    let err = KmerCounts::count(b"ACGTX", 2).unwrap_err();
    assert!(matches!(err, AlfieError::InvalidSequence { position: 4, .. }));
}

#[test]
fn test_short_and_empty_sequences_count_nothing() -> Result<()> {
    assert_eq!(KmerCounts::count(b"ACG", 4)?.total(), 0);
    assert_eq!(KmerCounts::count(b"", 2)?.total(), 0);

    let mut cache = AlphabetCache::new();
    let features = SequenceFeatures::new("empty", "", &[2], &mut cache)?;
    assert!(features.frequencies().iter().all(|&f| f == 0.0));
    Ok(())
}

#[test]
fn test_frequencies_sum_to_one_per_block() -> Result<()> {
    let mut cache = AlphabetCache::new();
    let features =
        SequenceFeatures::new("s1", "acgtacgtnnggccaattACGT", &[1, 2, 3], &mut cache)?;

    assert_eq!(features.kmers(), vec![1, 2, 3]);
    assert_eq!(features.frequencies().len(), 4 + 16 + 64);
    for vector in features.vectors() {
        let sum: f64 = vector.frequencies().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "k={} sums to {}", vector.k(), sum);
    }
    Ok(())
}

#[test]
fn test_change_k_recounts_and_reuses_alphabets() -> Result<()> {
    let mut cache = AlphabetCache::new();
    let mut features = SequenceFeatures::new("s", "AAAAAATTTTTT", &[4], &mut cache)?;
    assert_eq!(cache.len(), 1);

    features.change_k(2, &mut cache)?;
    assert_eq!(features.kmers(), vec![2]);
    assert_eq!(features.labels().len(), 16);
    assert_eq!(cache.len(), 2);

    features.change_k(4, &mut cache)?;
    assert_eq!(cache.len(), 2);
    assert!(features.change_k(0, &mut cache).is_err());
    Ok(())
}
