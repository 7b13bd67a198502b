//! TSV formatting for feature tables.

use std::sync::Arc;

use alfie::{FeatureMatrix, KmerAlphabet, SequenceRecord};

/// Header row: `name` followed by every k-mer label, blocks in k order.
pub fn format_feature_header(alphabets: &[Arc<KmerAlphabet>]) -> Vec<u8> {
    let mut line = String::from("name");
    for label in alphabets.iter().flat_map(|a| a.kmers()) {
        line.push('\t');
        line.push_str(label);
    }
    line.push('\n');
    line.into_bytes()
}

/// One row per record: name, then its row of `features`.
pub fn format_feature_rows(records: &[SequenceRecord], features: &FeatureMatrix) -> Vec<u8> {
    let mut output = String::with_capacity(records.len() * (features.cols() * 4 + 16));
    for (record, row) in records.iter().zip(features.iter_rows()) {
        output.push_str(record.name());
        for freq in row {
            output.push('\t');
            output.push_str(&freq.to_string());
        }
        output.push('\n');
    }
    output.into_bytes()
}
