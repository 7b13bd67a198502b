//! Linear scoring model loaded from TOML.
//!
//! Model file layout:
//!
//! ```toml
//! kmers = [4]                          # k sizes, in feature order (default [4])
//! labels = ["animalia", "bacteria"]    # optional class names
//! weights = [[...], [...]]             # one row per class, sum(4^k) columns
//! bias = [0.0, 0.0]                    # optional, one per class
//! softmax = true                       # optional, normalize scores per row
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::classify::classifier::Classifier;
use crate::classify::matrix::{FeatureMatrix, Matrix, ScoreMatrix};
use crate::constants::DEFAULT_K;
use crate::core::{feature_dimension, validate_kmers};
use crate::error::{AlfieError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinearModelFile {
    #[serde(default = "default_kmers")]
    kmers: Vec<usize>,
    labels: Option<Vec<String>>,
    weights: Vec<Vec<f64>>,
    bias: Option<Vec<f64>>,
    #[serde(default)]
    softmax: bool,
}

fn default_kmers() -> Vec<usize> {
    vec![DEFAULT_K]
}

/// `scores = features * weights^T + bias`, optionally softmax-normalized.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    kmers: Vec<usize>,
    labels: Option<Vec<String>>,
    weights: Matrix,
    bias: Vec<f64>,
    softmax: bool,
}

impl LinearClassifier {
    /// Build a model from per-class weight rows.
    ///
    /// # Errors
    /// Returns a validation error if the k sizes are invalid, there are no
    /// classes, a weight row is not `feature_dimension(kmers)` wide, or the
    /// bias length differs from the class count.
    pub fn new(
        kmers: Vec<usize>,
        weights: Vec<Vec<f64>>,
        bias: Option<Vec<f64>>,
        softmax: bool,
    ) -> Result<Self> {
        validate_kmers(&kmers)?;
        if weights.is_empty() {
            return Err(AlfieError::validation("model has no classes"));
        }

        let dim = feature_dimension(&kmers);
        if let Some((class, row)) = weights.iter().enumerate().find(|(_, r)| r.len() != dim) {
            return Err(AlfieError::validation(format!(
                "weights for class {} have {} columns, expected {} for k = {:?}",
                class,
                row.len(),
                dim,
                kmers
            )));
        }

        let n_classes = weights.len();
        let bias = bias.unwrap_or_else(|| vec![0.0; n_classes]);
        if bias.len() != n_classes {
            return Err(AlfieError::validation(format!(
                "bias has {} values, expected {}",
                bias.len(),
                n_classes
            )));
        }

        Ok(Self {
            kmers,
            labels: None,
            weights: Matrix::from_rows(weights)?,
            bias,
            softmax,
        })
    }

    /// Parse a model from TOML text. `origin` is used in error messages.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self> {
        let file: LinearModelFile =
            toml::from_str(contents).map_err(|e| AlfieError::config(origin, e.to_string()))?;

        let mut model = Self::new(file.kmers, file.weights, file.bias, file.softmax)
            .map_err(|e| AlfieError::config(origin, e.to_string()))?;

        if let Some(labels) = file.labels {
            if labels.len() != model.weights.rows() {
                return Err(AlfieError::config(
                    origin,
                    format!(
                        "{} labels given for {} classes",
                        labels.len(),
                        model.weights.rows()
                    ),
                ));
            }
            model.labels = Some(labels);
        }

        Ok(model)
    }

    /// Load a model file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| AlfieError::io(path, "read", e))?;
        let model = Self::from_toml_str(&contents, path)?;
        log::debug!(
            "Loaded linear model from {}: {} classes, k = {:?}",
            path.display(),
            model.weights.rows(),
            model.kmers
        );
        Ok(model)
    }

    /// k sizes the model was trained on, in feature order.
    pub fn kmers(&self) -> &[usize] {
        &self.kmers
    }

    /// Class names stored with the model, if any.
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }
}

impl Classifier for LinearClassifier {
    fn score(&self, features: &FeatureMatrix) -> Result<ScoreMatrix> {
        if features.cols() != self.weights.cols() {
            return Err(AlfieError::classifier(format!(
                "model expects {} features per row, got {}",
                self.weights.cols(),
                features.cols()
            )));
        }

        let n_classes = self.weights.rows();
        let mut scores = Matrix::zeros(features.rows(), n_classes);
        for (i, x) in features.iter_rows().enumerate() {
            let out = scores.row_mut(i);
            for (c, w) in self.weights.iter_rows().enumerate() {
                out[c] = w.iter().zip(x).map(|(a, b)| a * b).sum::<f64>() + self.bias[c];
            }
            if self.softmax {
                softmax_in_place(out);
            }
        }
        Ok(scores)
    }

    fn num_classes(&self) -> Option<usize> {
        Some(self.weights.rows())
    }

    fn input_dimension(&self) -> Option<usize> {
        Some(self.weights.cols())
    }
}

fn softmax_in_place(row: &mut [f64]) {
    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in row.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        row.iter_mut().for_each(|v| *v /= sum);
    }
}
