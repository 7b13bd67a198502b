//! Reading and writing FASTA/FASTQ files, plain and gzipped.

use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

use alfie::seqio::{read_batches, read_records, write_records, SequenceWriter, WriteMode};
use alfie::{file_type, AlfieError, SeqFormat, SequenceRecord};

fn sample_fastq() -> Vec<SequenceRecord> {
    (0..7)
        .map(|i| {
            SequenceRecord::fastq(
                format!("read{} lane=1", i),
                "ACGTNACGT",
                "+",
                "IIIIIIIII",
            )
        })
        .collect()
}

#[test]
fn test_file_type_detection() -> Result<()> {
    assert_eq!(file_type("a/b/reads.fa")?, SeqFormat::Fasta);
    assert_eq!(file_type("reads.FASTA")?, SeqFormat::Fasta);
    assert_eq!(file_type("reads.fq.gz")?, SeqFormat::Fastq);
    assert_eq!(file_type("reads.fastq")?, SeqFormat::Fastq);

    let err = file_type("reads.txt").unwrap_err();
    assert!(matches!(err, AlfieError::Format { .. }));
    assert!(err.to_string().contains("fastq"));
    Ok(())
}

#[test]
fn test_fasta_round_trip_multiline_input() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("in.fasta");
    fs::write(
        &input,
        "preamble line\n>seq1 first\nACGT\nacgt\n\n>seq2  \nNNNN-\n>empty\n",
    )?;

    let records = read_records(&input)?;
    assert_eq!(
        records,
        vec![
            SequenceRecord::fasta("seq1 first", "ACGTacgt"),
            SequenceRecord::fasta("seq2  ", "NNNN-"),
            SequenceRecord::fasta("empty", ""),
        ]
    );

    let output = dir.path().join("out.fa");
    write_records(&records, &output, false)?;
    assert_eq!(read_records(&output)?, records);
    Ok(())
}

#[test]
fn test_fastq_gz_round_trip_with_appends() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("out.fastq.gz");
    let records = sample_fastq();

    let writer = SequenceWriter::new(&path)?;
    writer.write(&records[..3], WriteMode::Overwrite)?;
    writer.write(&records[3..], WriteMode::Append)?;

    assert_eq!(read_records(&path)?, records);
    Ok(())
}

#[test]
fn test_batches_concatenate_to_full_read() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("reads.fq");
    write_records(&sample_fastq(), &path, false)?;

    let full = read_records(&path)?;
    for size in [1, 2, 3, 7, 100] {
        let batches: Vec<Vec<SequenceRecord>> =
            read_batches(&path, size)?.collect::<alfie::Result<_>>()?;
        assert_eq!(batches.len(), full.len().div_ceil(size), "size {}", size);
        assert!(batches[..batches.len() - 1].iter().all(|b| b.len() == size));
        assert_eq!(batches.concat(), full, "size {}", size);
    }

    assert!(read_batches(&path, 0).is_err());
    Ok(())
}

#[test]
fn test_fastq_incomplete_tail_dropped() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("partial.fq");
    fs::write(&path, "@r1\nACGT\n+r1\nIIII\n@r2\nAC\n+\n")?;

    let records = read_records(&path)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "r1");
    assert_eq!(records[0].strand(), Some("+r1"));
    assert_eq!(records[0].quality(), Some("IIII"));
    Ok(())
}

#[test]
fn test_reads_externally_gzipped_fasta() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("reads.fa.gz");
    let mut encoder = GzEncoder::new(File::create(&path)?, Compression::fast());
    encoder.write_all(b">a\nAC\nGT\n>b\nTT\n")?;
    encoder.finish()?;

    let records = read_records(&path)?;
    assert_eq!(
        records,
        vec![SequenceRecord::fasta("a", "ACGT"), SequenceRecord::fasta("b", "TT")]
    );
    Ok(())
}

#[test]
fn test_empty_file_yields_nothing() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("empty.fasta");
    fs::write(&path, "")?;

    assert!(read_records(&path)?.is_empty());
    assert_eq!(read_batches(&path, 10)?.count(), 0);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let err = read_records("/nonexistent/dir/reads.fa").unwrap_err();
    assert!(matches!(err, AlfieError::Io { .. }));
}

#[test]
fn test_names_with_trailing_whitespace_round_trip() -> Result<()> {
    let dir = tempdir()?;
    let records = vec![
        SequenceRecord::fasta("r1 ", "ACGT"),
        SequenceRecord::fasta("r2\t", "GGCC"),
    ];
    let fasta = dir.path().join("names.fa");
    write_records(&records, &fasta, false)?;
    assert_eq!(read_records(&fasta)?, records);

    let reads = vec![SequenceRecord::fastq("q1  ", "ACGT", "+", "IIII")];
    let fastq = dir.path().join("names.fq.gz");
    write_records(&reads, &fastq, false)?;
    assert_eq!(read_records(&fastq)?, reads);
    Ok(())
}

#[test]
fn test_non_utf8_sequence_byte_is_invalid_symbol() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("x.fa");
    fs::write(&path, b">r\nAC\xffGT\n")?;

    match read_records(&path).unwrap_err() {
        AlfieError::InvalidSequence { name, position, .. } => {
            assert_eq!(name, "r");
            assert_eq!(position, 2);
        }
        other => panic!("Expected InvalidSequence, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_non_utf8_header_is_read() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("latin1.fa");
    fs::write(&path, b">caf\xe9 sample\nACGT\n")?;

    let records = read_records(&path)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "caf\u{FFFD} sample");
    assert_eq!(records[0].sequence(), "ACGT");
    Ok(())
}
