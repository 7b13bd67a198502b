//! Per-class output destinations.
//!
//! Each class index maps to `{output_dir}/{label}_{input_basename}`. The
//! basename keeps the input's extension, so outputs inherit its format and
//! compression.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::labels::LabelSet;
use crate::error::{AlfieError, Result};
use crate::seqio::{SequenceRecord, SequenceWriter, WriteMode};

/// Destination path for records of class `label` read from `input`.
///
/// Without an output directory (or with an empty one) the result is a bare
/// file name, relative to the working directory.
pub fn output_path(input: &Path, label: &str, output_dir: Option<&Path>) -> Result<PathBuf> {
    let basename = input.file_name().ok_or_else(|| {
        AlfieError::validation(format!("input path '{}' has no file name", input.display()))
    })?;

    let file_name = format!("{}_{}", label, basename.to_string_lossy());

    Ok(match output_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    })
}

/// Class index to output writer map for one input file.
///
/// Built once per run; writers open and close their file on every call, so
/// repeated batches append to the same destinations.
#[derive(Debug, Clone)]
pub struct OutputRouter {
    writers: Vec<SequenceWriter>,
}

impl OutputRouter {
    /// Build destinations for every label and create `output_dir` (with any
    /// missing parents). Nothing is created if the input format is invalid.
    pub fn build(input: &Path, labels: &LabelSet, output_dir: Option<&Path>) -> Result<Self> {
        let writers = labels
            .iter()
            .map(|label| SequenceWriter::new(output_path(input, label, output_dir)?))
            .collect::<Result<Vec<_>>>()?;

        if let Some(dir) = output_dir.filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| AlfieError::io(dir, "create_dir", e))?;
        }

        Ok(Self { writers })
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }

    pub fn path(&self, class: usize) -> Option<&Path> {
        self.writers.get(class).map(SequenceWriter::path)
    }

    /// Every class index with its destination.
    pub fn paths(&self) -> BTreeMap<usize, PathBuf> {
        self.writers
            .iter()
            .enumerate()
            .map(|(i, w)| (i, w.path().to_path_buf()))
            .collect()
    }

    /// Append `records` to the destination for `class`.
    pub fn append(&self, class: usize, records: &[SequenceRecord]) -> Result<()> {
        let writer = self.writers.get(class).ok_or_else(|| {
            AlfieError::validation(format!(
                "no output destination for class {} ({} classes)",
                class,
                self.writers.len()
            ))
        })?;
        writer.write(records, WriteMode::Append)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_path_with_folder() {
        let path = output_path(Path::new("in/sample.fasta"), "a", Some(Path::new("out/"))).unwrap();
        assert_eq!(path, PathBuf::from("out/a_sample.fasta"));
    }

    #[test]
    fn test_output_path_without_folder() {
        let path = output_path(Path::new("/data/reads.fq.gz"), "fungi", None).unwrap();
        assert_eq!(path, PathBuf::from("fungi_reads.fq.gz"));

        let path = output_path(Path::new("reads.fq"), "fungi", Some(Path::new(""))).unwrap();
        assert_eq!(path, PathBuf::from("fungi_reads.fq"));
    }

    #[test]
    fn test_output_path_requires_file_name() {
        assert!(output_path(Path::new("/"), "a", None).is_err());
    }

    #[test]
    fn test_build_creates_folder_and_maps_every_class() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let labels = LabelSet::parse("a,b").unwrap();

        let router = OutputRouter::build(Path::new("in/sample.fasta"), &labels, Some(&out)).unwrap();
        assert!(out.is_dir());
        assert_eq!(router.len(), 2);

        let paths = router.paths();
        assert_eq!(paths[&0], out.join("a_sample.fasta"));
        assert_eq!(paths[&1], out.join("b_sample.fasta"));
        assert_eq!(router.path(2), None);
    }

    #[test]
    fn test_append_accumulates() {
        let dir = tempdir().unwrap();
        let labels = LabelSet::parse("x,y").unwrap();
        let router =
            OutputRouter::build(Path::new("reads.fa"), &labels, Some(dir.path())).unwrap();

        router.append(1, &[SequenceRecord::fasta("r1", "AC")]).unwrap();
        router.append(1, &[SequenceRecord::fasta("r2", "GT")]).unwrap();

        let written = fs::read_to_string(dir.path().join("y_reads.fa")).unwrap();
        assert_eq!(written, ">r1\nAC\n>r2\nGT\n");
        assert!(!dir.path().join("x_reads.fa").exists());
        assert!(router.append(5, &[]).is_err());
    }

    #[test]
    fn test_build_rejects_unsupported_input() {
        let labels = LabelSet::parse("a").unwrap();
        assert!(OutputRouter::build(Path::new("reads.txt"), &labels, None).is_err());
    }
}
