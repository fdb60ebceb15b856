//! Skill-vector similarity between two sets of technical skills.

use crate::providers::{ProviderError, SkillVectors};

/// Cosine similarity of two vectors. Mismatched dimensions or a zero norm give 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Mean cosine similarity over every (candidate, job) pair of known skills.
///
/// Terms without an embedding are skipped rather than scored as zero. With no
/// valid pair at all the score is 0.0.
pub async fn skillset_similarity<'a, I, J>(
    cv_skills: I,
    job_skills: J,
    vectors: &dyn SkillVectors,
) -> Result<f64, ProviderError>
where
    I: IntoIterator<Item = &'a String>,
    J: IntoIterator<Item = &'a String>,
{
    let cv_vectors = known_vectors(cv_skills, vectors).await?;
    let job_vectors = known_vectors(job_skills, vectors).await?;

    let mut total = 0.0;
    let mut pairs = 0usize;
    for cv in &cv_vectors {
        for job in &job_vectors {
            total += cosine_similarity(cv, job);
            pairs += 1;
        }
    }

    if pairs == 0 {
        return Ok(0.0);
    }
    Ok(total / pairs as f64)
}

async fn known_vectors<'a, I>(
    terms: I,
    vectors: &dyn SkillVectors,
) -> Result<Vec<Vec<f32>>, ProviderError>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut known = Vec::new();
    for term in terms {
        match vectors.skill_vector(term).await? {
            Some(v) => known.push(v),
            None => tracing::trace!(term = %term, "No skill vector; skipping"),
        }
    }
    Ok(known)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::providers::fakes::MapVectors;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[tokio::test]
    async fn test_skillset_similarity_averages_all_pairs() {
        let vectors = MapVectors::with(&[
            ("python", &[1.0, 0.0]),
            ("sql", &[0.0, 1.0]),
            ("pandas", &[1.0, 0.0]),
        ]);
        // pairs: python/pandas = 1, sql/pandas = 0
        let score = skillset_similarity(&set(&["python", "sql"]), &set(&["pandas"]), &vectors)
            .await
            .unwrap();
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_terms_are_skipped_not_zeroed() {
        let vectors = MapVectors::with(&[("python", &[1.0, 0.0]), ("pandas", &[1.0, 0.0])]);
        let score = skillset_similarity(
            &set(&["python", "cobol"]),
            &set(&["pandas", "fortran"]),
            &vectors,
        )
        .await
        .unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_no_valid_pairs_scores_zero() {
        let vectors = MapVectors::with(&[("python", &[1.0, 0.0])]);
        let score = skillset_similarity(&set(&["python"]), &set(&["cobol"]), &vectors)
            .await
            .unwrap();
        assert_eq!(score, 0.0);

        let empty = skillset_similarity(&set(&[]), &set(&[]), &vectors).await.unwrap();
        assert_eq!(empty, 0.0);
    }
}
