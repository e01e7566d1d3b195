/// Cosine similarity between two equal-length vectors
///
/// Returns a value in [-1.0, 1.0]. Zero-norm vectors score 0.0 against
/// everything, so they never clear any positive threshold.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        let score = cosine_similarity(&v, &v);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        let score = cosine_similarity(&a, &b);
        assert!((score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let zero = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = vec![0.3, -1.2, 4.5, 0.0];
        let b = vec![2.0, 0.7, -0.1, 3.3];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_range_bounds() {
        let vectors = [
            vec![1.0, 2.0, 3.0],
            vec![-4.0, 0.5, 2.2],
            vec![100.0, -200.0, 300.0],
            vec![0.001, 0.002, -0.003],
        ];
        for a in &vectors {
            for b in &vectors {
                let score = cosine_similarity(a, b);
                assert!((-1.0 - 1e-6..=1.0 + 1e-6).contains(&score));
            }
        }
    }

    #[test]
    fn test_magnitude_invariance() {
        // Scaling either vector must not change the score
        let a = vec![1.0, 2.0, 3.0];
        let scaled: Vec<f32> = a.iter().map(|x| x * 10.0).collect();
        let b = vec![3.0, 1.0, 2.0];
        let s1 = cosine_similarity(&a, &b);
        let s2 = cosine_similarity(&scaled, &b);
        assert!((s1 - s2).abs() < 1e-6);
    }
}
