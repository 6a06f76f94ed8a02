//! Cosine similarity over unit-normalized embeddings.
//!
//! All vectors entering the pipeline are unit-normalized, so cosine
//! similarity is a plain dot product. Ranking is fully deterministic:
//! ties break by ascending node index.

use ordered_float::OrderedFloat;

/// A node index with its query-similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredNode {
    /// Internal node index.
    pub index: usize,
    /// Dot-product similarity to the query.
    pub score: f32,
}

/// Normalize a vector to unit L2 length in place. Zero vectors are left
/// untouched.
pub fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

/// Dot product of two equal-length vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Rank the `k` most query-similar rows of `matrix`.
///
/// Returns at most `k` entries sorted by similarity descending, ties
/// broken by ascending index. Fewer than `k` rows returns all of them.
pub fn top_k(matrix: &[Vec<f32>], query: &[f32], k: usize) -> Vec<ScoredNode> {
    let mut scored: Vec<ScoredNode> = matrix
        .iter()
        .enumerate()
        .map(|(index, row)| ScoredNode {
            index,
            score: dot(row, query),
        })
        .collect();

    scored.sort_by_key(|s| (OrderedFloat(-s.score), s.index));
    scored.truncate(k.min(scored.len()));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_length() {
        let mut v = vec![3.0, 4.0];
        normalize(&mut v);
        assert!((dot(&v, &v) - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_untouched() {
        let mut v = vec![0.0, 0.0];
        normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0]);
    }

    #[test]
    fn test_top_k_ranking() {
        let matrix = vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![0.6, 0.8],
        ];
        let ranked = top_k(&matrix, &[1.0, 0.0], 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].index, 1);
        assert_eq!(ranked[1].index, 2);
    }

    #[test]
    fn test_top_k_tie_breaks_by_index() {
        let matrix = vec![
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 0.0],
        ];
        let ranked = top_k(&matrix, &[1.0, 0.0], 2);
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
    }

    #[test]
    fn test_top_k_exceeding_len_returns_all() {
        let matrix = vec![vec![1.0], vec![0.5]];
        assert_eq!(top_k(&matrix, &[1.0], 10).len(), 2);
    }

    #[test]
    fn test_top_k_zero_is_empty() {
        let matrix = vec![vec![1.0]];
        assert!(top_k(&matrix, &[1.0], 0).is_empty());
    }
}
