//! Top-k classification result processing.

use crate::core::EcgError;
use ndarray::ArrayView1;

/// Extracts the k most confident classes from classifier outputs.
///
/// Ranking is a stable descending sort, so classes with equal scores keep
/// their original index order and the first entry is always the argmax.
#[derive(Debug, Clone, Copy)]
pub struct Topk {
    k: usize,
}

impl Topk {
    /// Creates a processor that keeps `k` classes per prediction.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `k` is 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ecg_classifier::processors::Topk;
    /// use ndarray::arr1;
    ///
    /// let topk = Topk::new(3).unwrap();
    /// let (indexes, scores) = topk.rank(arr1(&[0.1, 0.6, 0.3]).view()).unwrap();
    /// assert_eq!(indexes, vec![1, 2, 0]);
    /// assert_eq!(scores, vec![0.6, 0.3, 0.1]);
    /// ```
    pub fn new(k: usize) -> Result<Self, EcgError> {
        if k == 0 {
            return Err(EcgError::config_error("k must be greater than 0"));
        }
        Ok(Self { k })
    }

    /// Number of classes kept per prediction.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Ranks one row of scores, returning (indexes, scores) best first.
    ///
    /// The row yields `min(k, row.len())` entries. Scores are expected to be
    /// finite; callers validate model output before ranking.
    ///
    /// # Errors
    ///
    /// Returns an error if the row is empty.
    pub fn rank(&self, prediction: ArrayView1<'_, f32>) -> Result<(Vec<usize>, Vec<f32>), EcgError> {
        if prediction.is_empty() {
            return Err(EcgError::invalid_input("Empty prediction vector"));
        }

        let mut indexed_scores: Vec<(usize, f32)> = prediction
            .iter()
            .enumerate()
            .map(|(idx, &score)| (idx, score))
            .collect();

        // Stable: equal scores keep ascending index order.
        indexed_scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed_scores.truncate(self.k);

        Ok(indexed_scores.into_iter().unzip())
    }
}
