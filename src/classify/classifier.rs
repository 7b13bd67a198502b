//! The scoring seam between feature extraction and prediction.

use crate::classify::matrix::{FeatureMatrix, ScoreMatrix};
use crate::error::Result;

/// A trained model that scores feature rows.
///
/// `score` receives one row per record, with the per-k frequency blocks
/// concatenated in the configured k order, and must return a matrix with the
/// same number of rows and one column per class.
///
/// Any `Fn(&Matrix) -> Result<Matrix>` closure is a classifier.
pub trait Classifier {
    fn score(&self, features: &FeatureMatrix) -> Result<ScoreMatrix>;

    /// Number of output classes, when the model knows it.
    fn num_classes(&self) -> Option<usize> {
        None
    }

    /// Expected feature width, when the model knows it.
    fn input_dimension(&self) -> Option<usize> {
        None
    }
}

impl<F> Classifier for F
where
    F: Fn(&FeatureMatrix) -> Result<ScoreMatrix>,
{
    fn score(&self, features: &FeatureMatrix) -> Result<ScoreMatrix> {
        self(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::matrix::Matrix;

    #[test]
    fn test_closure_is_classifier() {
        let first_column = |m: &Matrix| -> Result<Matrix> {
            Matrix::from_rows(m.iter_rows().map(|r| vec![r[0], 1.0 - r[0]]).collect())
        };
        let features = Matrix::from_rows(vec![vec![0.8, 0.2], vec![0.1, 0.9]]).unwrap();

        let scores = first_column.score(&features).unwrap();
        assert_eq!(scores.rows(), 2);
        assert_eq!(scores.cols(), 2);
        assert!((scores.row(1)[1] - 0.9).abs() < 1e-12);
        assert_eq!(first_column.num_classes(), None);
    }
}
