//! Classification of sequence records against an external model.
//!
//! - `Classifier`: the scoring seam (any `Fn(&Matrix) -> Result<Matrix>` works)
//! - `LinearClassifier`: a TOML-loaded linear model for the command line
//! - `ClassificationPipeline`: batched read, featurize, score and route
//! - `argmax`/`predict`/`decode_predictions`: scores to labels, ties to the
//!   lowest index

pub mod classifier;
pub mod labels;
pub mod linear;
pub mod matrix;
pub mod pipeline;
pub mod router;
pub mod scoring;

pub use classifier::Classifier;
pub use labels::LabelSet;
pub use linear::LinearClassifier;
pub use matrix::{FeatureMatrix, Matrix, ScoreMatrix};
pub use pipeline::{
    classify_records, classify_with_alphabets, feature_matrix, ClassificationPipeline,
    ClassifiedBatch, PipelineConfig, RunSummary,
};
pub use router::{output_path, OutputRouter};
pub use scoring::{argmax, decode_predictions, predict};
