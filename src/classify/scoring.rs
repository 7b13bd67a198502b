//! Turning classifier scores into class predictions.

use crate::classify::labels::LabelSet;
use crate::classify::matrix::ScoreMatrix;
use crate::error::Result;

/// Index of the highest score in `scores`.
///
/// Ties go to the lowest index: a later score must be strictly greater to
/// replace the current best. NaN never wins. An empty row yields 0.
#[inline]
pub fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] || (scores[best].is_nan() && !s.is_nan()) {
            best = i;
        }
    }
    best
}

/// Predicted class index for every row of a score matrix.
pub fn predict(scores: &ScoreMatrix) -> Vec<usize> {
    scores.iter_rows().map(argmax).collect()
}

/// Map predicted indices to label names.
///
/// # Errors
/// Returns a validation error if any index is outside the label set.
pub fn decode_predictions<'a>(predictions: &[usize], labels: &'a LabelSet) -> Result<Vec<&'a str>> {
    predictions.iter().map(|&i| labels.decode(i)).collect()
}
