//! Helper functions and utilities for the alfie CLI.
//!
//! - `arg_parsing` - CLI argument validation
//! - `formatting` - Feature table TSV formatting
//! - `output` - Output format detection and writing

mod arg_parsing;
mod formatting;
mod output;

pub use arg_parsing::{
    effective_batch_size, parse_batch_size, parse_kmer_size, warn_large_kmers,
};
pub use formatting::{format_feature_header, format_feature_rows};
pub use output::{OutputFormat, OutputWriter};
