//! Exact (flat) Euclidean nearest-neighbor index.
//!
//! The index is built per search over the filtered subset only, so `n` is
//! small (tens to a few hundred rows) and brute force is both exact and fast.
//! Rows are stacked into one dense row-major matrix.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{Result, SearchError};
use crate::types::QuestionRecord;

/// Number of results returned by a search unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 5;

/// A ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub record: &'a QuestionRecord,

    /// Squared Euclidean distance to the query. Ranking only.
    pub distance: f32,
}

/// Dense n × D matrix of embeddings with the records they came from.
#[derive(Debug)]
pub struct FlatIndex<'a> {
    records: Vec<&'a QuestionRecord>,
    matrix: Vec<f32>,
    dimension: usize,
}

impl<'a> FlatIndex<'a> {
    /// Stack the embeddings of `records`.
    ///
    /// All embeddings must share one length; the first record sets it.
    pub fn build(records: Vec<&'a QuestionRecord>) -> Result<Self> {
        let dimension = records.first().map(|r| r.dimension()).unwrap_or(0);
        let mut matrix = Vec::with_capacity(records.len() * dimension);

        for record in &records {
            if record.dimension() != dimension {
                return Err(SearchError::DimensionMismatch {
                    expected: dimension,
                    actual: record.dimension(),
                });
            }
            matrix.extend_from_slice(&record.embedding);
        }

        Ok(Self {
            records,
            matrix,
            dimension,
        })
    }

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `k` rows closest to `query`, ascending by distance.
    ///
    /// Equal distances keep index order. Returns fewer than `k` hits when the
    /// index is smaller than `k`.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor<'a>>> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .matrix
            .chunks_exact(self.dimension)
            .map(|row| squared_l2(row, query))
            .enumerate()
            .collect();

        let by_rank = |a: &(usize, f32), b: &(usize, f32)| -> Ordering {
            a.1.total_cmp(&b.1).then(a.0.cmp(&b.0))
        };

        if scored.len() > k {
            scored.select_nth_unstable_by(k - 1, by_rank);
            scored.truncate(k);
        }
        scored.sort_unstable_by(by_rank);

        debug!(
            rows = self.records.len(),
            dimension = self.dimension,
            k,
            returned = scored.len(),
            "Flat index search"
        );

        Ok(scored
            .into_iter()
            .map(|(idx, distance)| Neighbor {
                record: self.records[idx],
                distance,
            })
            .collect())
    }
}

/// Build an index over `records` and return the `k` nearest to `query`.
///
/// An empty subset yields no hits without building anything.
pub fn nearest<'a>(
    records: Vec<&'a QuestionRecord>,
    query: &[f32],
    k: usize,
) -> Result<Vec<Neighbor<'a>>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    FlatIndex::build(records)?.search(query, k)
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::question;

    fn records(vectors: &[&[f32]]) -> Vec<QuestionRecord> {
        vectors
            .iter()
            .enumerate()
            .map(|(i, v)| question(&format!("q{}", i), &["Math"], &["Algebra"], v.to_vec()))
            .collect()
    }

    fn names(hits: &[Neighbor<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.record.question.clone()).collect()
    }

    #[test]
    fn test_nearest_first() {
        let corpus = records(&[&[5.0, 5.0], &[1.0, 0.0], &[0.0, 0.0], &[3.0, 4.0]]);
        let hits = nearest(corpus.iter().collect(), &[0.0, 0.0], 5).unwrap();

        assert_eq!(names(&hits), vec!["q2", "q1", "q3", "q0"]);
        assert_eq!(hits[0].distance, 0.0);
        assert_eq!(hits[1].distance, 1.0);
        assert_eq!(hits[2].distance, 25.0);
    }

    #[test]
    fn test_result_sizes() {
        for n in 0..9usize {
            let vectors: Vec<Vec<f32>> = (0..n).map(|i| vec![i as f32, 0.0]).collect();
            let slices: Vec<&[f32]> = vectors.iter().map(|v| v.as_slice()).collect();
            let corpus = records(&slices);

            let hits = nearest(corpus.iter().collect(), &[0.0, 0.0], DEFAULT_TOP_K).unwrap();
            assert_eq!(hits.len(), n.min(DEFAULT_TOP_K), "n = {}", n);
        }
    }

    #[test]
    fn test_distances_non_decreasing() {
        let corpus = records(&[
            &[0.9, 0.1, 0.3],
            &[-1.0, 2.0, 0.0],
            &[0.2, 0.2, 0.2],
            &[4.0, -4.0, 1.0],
            &[0.0, 0.0, 1.0],
            &[0.5, 0.5, 0.5],
            &[1.0, 1.0, 1.0],
        ]);
        let hits = nearest(corpus.iter().collect(), &[0.3, 0.3, 0.3], 5).unwrap();

        assert_eq!(hits.len(), 5);
        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_ties_keep_subset_order() {
        let corpus = records(&[&[1.0, 0.0], &[0.0, 1.0], &[-1.0, 0.0], &[0.0, -1.0], &[2.0, 0.0]]);
        let hits = nearest(corpus.iter().collect(), &[0.0, 0.0], 3).unwrap();

        assert_eq!(names(&hits), vec!["q0", "q1", "q2"]);
    }

    #[test]
    fn test_deterministic() {
        let corpus = records(&[&[0.1, 0.7], &[0.7, 0.1], &[0.4, 0.4], &[0.1, 0.7], &[0.9, 0.9], &[0.0, 0.0]]);
        let index = FlatIndex::build(corpus.iter().collect()).unwrap();

        let first = index.search(&[0.3, 0.5], 5).unwrap();
        for _ in 0..10 {
            assert_eq!(index.search(&[0.3, 0.5], 5).unwrap(), first);
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let corpus = records(&[&[0.0; 8], &[1.0; 8]]);
        let err = nearest(corpus.iter().collect(), &[0.0; 5], 5).unwrap_err();

        assert!(matches!(
            err,
            SearchError::DimensionMismatch {
                expected: 8,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_mixed_row_dimensions_rejected_at_build() {
        let corpus = records(&[&[0.0, 0.0], &[0.0, 0.0, 0.0]]);
        let err = FlatIndex::build(corpus.iter().collect()).unwrap_err();
        assert!(matches!(err, SearchError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_empty_subset_skips_dimension_check() {
        let hits = nearest(Vec::new(), &[1.0, 2.0, 3.0], 5).unwrap();
        assert!(hits.is_empty());
    }
}
