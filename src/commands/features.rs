//! Features command handler: per-record k-mer frequency tables.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use alfie::constants::DEFAULT_K;
use alfie::{
    feature_matrix, file_type, read_batches, read_records, validate_kmers, AlphabetCache,
    KmerAlphabet, SequenceRecord,
};

use super::helpers::{
    effective_batch_size, format_feature_header, format_feature_rows, warn_large_kmers,
    OutputFormat, OutputWriter,
};

/// Arguments for the features command.
pub struct FeaturesArgs {
    pub file: PathBuf,
    pub kmers: Vec<usize>,
    pub batch_size: Option<usize>,
    pub output: Option<PathBuf>,
}

/// Write a TSV with a `name` column and one column per k-mer.
pub fn run_features(args: FeaturesArgs) -> Result<()> {
    file_type(&args.file)?;

    let kmers = if args.kmers.is_empty() {
        vec![DEFAULT_K]
    } else {
        args.kmers
    };
    validate_kmers(&kmers)?;
    warn_large_kmers(&kmers);

    let alphabets = AlphabetCache::new().resolve(&kmers)?;
    let format = OutputFormat::detect(args.output.as_ref());
    let mut writer = OutputWriter::new(format, args.output.as_ref())?;
    writer.write_chunk(&format_feature_header(&alphabets))?;

    let mut total = 0usize;
    match effective_batch_size(args.batch_size) {
        Some(size) => {
            for batch in read_batches(&args.file, size)? {
                total += write_batch(&mut writer, batch?, &alphabets)?;
            }
        }
        None => {
            let records = read_records(&args.file)?;
            total += write_batch(&mut writer, records, &alphabets)?;
        }
    }

    writer.finish()?;
    log::info!("Wrote features for {} records (k = {:?})", total, kmers);
    Ok(())
}

fn write_batch(
    writer: &mut OutputWriter,
    records: Vec<SequenceRecord>,
    alphabets: &[Arc<KmerAlphabet>],
) -> Result<usize> {
    let features =
        feature_matrix(&records, alphabets).context("Failed to compute features")?;
    writer.write_chunk(&format_feature_rows(&records, &features))?;
    Ok(records.len())
}
