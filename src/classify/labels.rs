//! Ordered class label sets.

use std::collections::HashSet;

use crate::constants::DEFAULT_LABELS;
use crate::error::{AlfieError, Result};

/// Ordered class labels; position `i` names classifier output column `i`.
///
/// Labels are non-empty, unique, and usable as a file name prefix (no path
/// separators).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(AlfieError::validation("at least one class label is required"));
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if label.is_empty() {
                return Err(AlfieError::validation("class labels cannot be empty"));
            }
            if label.contains('/') || label.contains('\\') {
                return Err(AlfieError::validation(format!(
                    "class label '{}' cannot contain a path separator",
                    label
                )));
            }
            if !seen.insert(label.as_str()) {
                return Err(AlfieError::validation(format!(
                    "duplicate class label '{}'",
                    label
                )));
            }
        }

        Ok(Self { labels })
    }

    /// The five kingdom labels used when none are given.
    pub fn kingdoms() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a comma-separated list such as `"bill,george,sue"`.
    ///
    /// Whitespace around each label is trimmed.
    pub fn parse(list: &str) -> Result<Self> {
        Self::new(list.split(',').map(str::trim))
    }

    /// Label for class index `index`.
    ///
    /// # Errors
    /// Returns a validation error if `index >= len()`.
    pub fn decode(&self, index: usize) -> Result<&str> {
        self.labels.get(index).map(String::as_str).ok_or_else(|| {
            AlfieError::validation(format!(
                "predicted class {} is out of range for {} labels",
                index,
                self.labels.len()
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::kingdoms()
    }
}
