//! Command-line argument definitions for the alfie CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::helpers::{parse_batch_size, parse_kmer_size};

#[derive(Parser)]
#[command(name = "alfie")]
#[command(version)]
#[command(about = "Alignment-free k-mer classification of DNA sequences by kingdom")]
#[command(
    long_about = "Alfie: alignment-free classification of DNA sequences from k-mer frequency profiles.

Each record is counted at one or more k-mer sizes, its normalized frequencies are
scored by a trained model, and the record is written to a per-class output file
named {label}_{input file name}.

INPUT FORMATS:
  FASTA (.fa, .fasta) and FASTQ (.fq, .fastq) files are supported.
  Gzip-compressed files (.gz) are read and written transparently.
  Sequences may contain only A, C, G, T, N and '-' (either case).

MODEL FORMAT (classify):
  TOML with a weight matrix of one row per class and sum(4^k) columns:
    kmers = [4]
    labels = [\"animalia\", \"bacteria\", \"fungi\", \"plantae\", \"protista\"]
    weights = [[...], ...]
    bias = [...]           # optional
    softmax = true         # optional"
)]
#[command(after_help = "EXAMPLES:
  # Sort reads into alfie_out/{kingdom}_reads.fastq
  alfie classify -f reads.fastq -m model.toml

  # Custom labels, batched reading, explicit output folder
  alfie classify -f reads.fa.gz -m model.toml -c bill,george,sue -b 10000 -o sorted/

  # Print 4-mer frequencies for every record
  alfie features -f reads.fasta -k 4")]
pub struct Cli {
    /// Enable verbose progress output with timestamps
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify records and write each to a per-class output file
    Classify {
        /// Input FASTA/FASTQ file (optionally .gz)
        #[arg(short = 'f', long)]
        file: PathBuf,

        /// Linear model file (TOML)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// K-mer sizes, in feature order (1-12). Repeat or comma-separate: -k 2,4
        #[arg(short = 'k', long = "kmer", value_delimiter = ',', value_parser = parse_kmer_size)]
        kmers: Vec<usize>,

        /// Records per batch. Omit or pass 0 to read the whole file at once.
        #[arg(short, long = "batch", value_parser = parse_batch_size)]
        batch_size: Option<usize>,

        /// Comma-separated class labels, in model output order
        #[arg(short = 'c', long = "classes")]
        classes: Option<String>,

        /// Output folder (created if missing) [default: alfie_out]
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Run configuration file (TOML); flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write per-record k-mer frequencies as TSV
    Features {
        /// Input FASTA/FASTQ file (optionally .gz)
        #[arg(short = 'f', long)]
        file: PathBuf,

        /// K-mer sizes, in column order (1-12). Repeat or comma-separate: -k 2,4
        #[arg(short = 'k', long = "kmer", value_delimiter = ',', value_parser = parse_kmer_size)]
        kmers: Vec<usize>,

        /// Records per batch. Omit or pass 0 to read the whole file at once.
        #[arg(short, long = "batch", value_parser = parse_batch_size)]
        batch_size: Option<usize>,

        /// Output path (.tsv, .tsv.gz, or '-' for stdout) [default: stdout]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
