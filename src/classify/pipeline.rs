//! Batch classification: read, featurize, score, predict and route.
//!
//! Each batch is featurized in parallel (record order preserved), scored by
//! one classifier call, then split by predicted class and appended to that
//! class's output file. Every batch is written before the next is read.

use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::classify::classifier::Classifier;
use crate::classify::labels::LabelSet;
use crate::classify::matrix::{FeatureMatrix, Matrix};
use crate::classify::router::OutputRouter;
use crate::classify::scoring::predict;
use crate::constants::DEFAULT_K;
use crate::core::{
    feature_dimension, featurize_into, validate_kmers, AlphabetCache, KmerAlphabet,
};
use crate::error::{AlfieError, Result};
use crate::seqio::{read_batches, read_records, SequenceRecord};

/// Records of one batch with the features they were scored on.
///
/// Row `i` of `features` and `predictions[i]` belong to `records[i]`.
#[derive(Debug, Clone)]
pub struct ClassifiedBatch {
    pub records: Vec<SequenceRecord>,
    pub features: FeatureMatrix,
    pub predictions: Vec<usize>,
}

impl ClassifiedBatch {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            features: Matrix::zeros(0, 0),
            predictions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Concatenated frequencies of record `i` across all k sizes.
    pub fn frequencies(&self, i: usize) -> &[f64] {
        self.features.row(i)
    }

    /// `(record, predicted class)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&SequenceRecord, usize)> + '_ {
        self.records.iter().zip(self.predictions.iter().copied())
    }
}

/// Stack the feature rows of `records`, one row per record, in input order.
///
/// Rows are filled in parallel straight into the matrix.
pub fn feature_matrix(
    records: &[SequenceRecord],
    alphabets: &[Arc<KmerAlphabet>],
) -> Result<FeatureMatrix> {
    let dim: usize = alphabets.iter().map(|a| a.len()).sum();
    let mut matrix = Matrix::zeros(records.len(), dim);
    if dim > 0 {
        matrix
            .as_mut_slice()
            .par_chunks_mut(dim)
            .zip(records.par_iter())
            .try_for_each(|(row, r)| {
                featurize_into(r.name(), r.sequence().as_bytes(), alphabets, row)
            })?;
    }
    Ok(matrix)
}

/// Featurize `records` at each k in `kmers`, score them with a single
/// classifier call and return them with their predicted class indices, in
/// input order.
///
/// An empty input returns an empty batch without calling the classifier.
///
/// # Errors
/// Fails on invalid k sizes, on the first invalid sequence, or if the
/// classifier errors or returns a score matrix whose row count differs from
/// the input's or that has no columns.
pub fn classify_records<C: Classifier + ?Sized>(
    records: Vec<SequenceRecord>,
    classifier: &C,
    kmers: &[usize],
) -> Result<ClassifiedBatch> {
    validate_kmers(kmers)?;
    let alphabets = AlphabetCache::new().resolve(kmers)?;
    classify_with_alphabets(records, classifier, &alphabets)
}

/// As `classify_records`, with alphabets already resolved.
pub fn classify_with_alphabets<C: Classifier + ?Sized>(
    records: Vec<SequenceRecord>,
    classifier: &C,
    alphabets: &[Arc<KmerAlphabet>],
) -> Result<ClassifiedBatch> {
    if records.is_empty() {
        return Ok(ClassifiedBatch::empty());
    }

    let features = feature_matrix(&records, alphabets)?;

    let scores = classifier.score(&features)?;
    if scores.rows() != records.len() {
        return Err(AlfieError::classifier(format!(
            "returned {} score rows for {} records",
            scores.rows(),
            records.len()
        )));
    }
    if scores.cols() == 0 {
        return Err(AlfieError::classifier("returned scores with no classes"));
    }

    Ok(ClassifiedBatch {
        predictions: predict(&scores),
        records,
        features,
    })
}

/// Pipeline settings.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// k sizes, in feature order.
    pub kmers: Vec<usize>,
    /// Records per batch; `None` reads the whole file at once.
    pub batch_size: Option<usize>,
    pub labels: LabelSet,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            kmers: vec![DEFAULT_K],
            batch_size: None,
            labels: LabelSet::kingdoms(),
        }
    }
}

/// Counts from one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Records routed to each class, indexed like the label set.
    pub per_class: Vec<usize>,
    pub batches: usize,
}

impl RunSummary {
    pub fn new(n_classes: usize) -> Self {
        Self {
            per_class: vec![0; n_classes],
            batches: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.per_class.iter().sum()
    }
}

/// Classifies sequence files and sorts their records into per-class files.
pub struct ClassificationPipeline<C: Classifier> {
    classifier: C,
    config: PipelineConfig,
    cache: AlphabetCache,
}

impl<C: Classifier> ClassificationPipeline<C> {
    /// # Errors
    /// Returns a validation error for invalid k sizes, a zero batch size, or
    /// when the classifier reports an input width or class count that does
    /// not match the configuration.
    pub fn new(classifier: C, config: PipelineConfig) -> Result<Self> {
        validate_kmers(&config.kmers)?;
        if config.batch_size == Some(0) {
            return Err(AlfieError::validation("batch size must be greater than 0"));
        }

        let dim = feature_dimension(&config.kmers);
        if let Some(expected) = classifier.input_dimension() {
            if expected != dim {
                return Err(AlfieError::validation(format!(
                    "classifier expects {} features but k = {:?} gives {}",
                    expected, config.kmers, dim
                )));
            }
        }
        if let Some(n) = classifier.num_classes() {
            if n != config.labels.len() {
                return Err(AlfieError::validation(format!(
                    "classifier has {} classes but {} labels were given",
                    n,
                    config.labels.len()
                )));
            }
        }

        Ok(Self {
            classifier,
            config,
            cache: AlphabetCache::new(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelSet {
        &self.config.labels
    }

    /// Classify every record in `input` and append each to
    /// `{output_dir}/{label}_{basename}`.
    pub fn run(&mut self, input: &Path, output_dir: Option<&Path>) -> Result<RunSummary> {
        let router = OutputRouter::build(input, &self.config.labels, output_dir)?;
        self.run_with_router(input, &router)
    }

    /// As `run`, with a prebuilt router.
    pub fn run_with_router(&mut self, input: &Path, router: &OutputRouter) -> Result<RunSummary> {
        if router.len() != self.config.labels.len() {
            return Err(AlfieError::validation(format!(
                "router has {} destinations for {} labels",
                router.len(),
                self.config.labels.len()
            )));
        }

        let start = Instant::now();
        let mut summary = RunSummary::new(self.config.labels.len());

        match self.config.batch_size {
            Some(size) => {
                log::info!("Classifying {} in batches of {}", input.display(), size);
                for batch in read_batches(input, size)? {
                    self.process_batch(batch?, router, &mut summary)?;
                }
            }
            None => {
                log::info!("Classifying {}", input.display());
                let records = read_records(input)?;
                self.process_batch(records, router, &mut summary)?;
            }
        }

        log::info!(
            "Classified {} records in {} batch(es) in {:.2?}",
            summary.total(),
            summary.batches,
            start.elapsed()
        );
        for (label, n) in self.config.labels.iter().zip(&summary.per_class) {
            log::info!("  {}: {}", label, n);
        }

        Ok(summary)
    }

    /// Classify `records` and append each class group to its destination.
    pub fn process_batch(
        &mut self,
        records: Vec<SequenceRecord>,
        router: &OutputRouter,
        summary: &mut RunSummary,
    ) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let batch_start = Instant::now();
        let n = records.len();

        let alphabets = self.cache.resolve(&self.config.kmers)?;
        let batch = classify_with_alphabets(records, &self.classifier, &alphabets)?;
        let ClassifiedBatch {
            records,
            predictions,
            ..
        } = batch;

        let mut groups: Vec<Vec<SequenceRecord>> = vec![Vec::new(); self.config.labels.len()];
        for (record, class) in records.into_iter().zip(predictions) {
            // Out-of-range predictions are rejected with the label error.
            self.config.labels.decode(class)?;
            groups[class].push(record);
        }

        for (class, group) in groups.iter().enumerate() {
            if group.is_empty() {
                continue;
            }
            router.append(class, group)?;
            summary.per_class[class] += group.len();
        }
        summary.batches += 1;

        log::debug!(
            "Batch {}: {} records in {:.2?}",
            summary.batches,
            n,
            batch_start.elapsed()
        );
        Ok(())
    }
}
