//! In-memory skill embedding table, loaded once at startup.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{ProviderError, SkillVectors};

/// Read-only `term → vector` table. Keys are stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl EmbeddingTable {
    /// Builds a table, rejecting vectors whose dimension disagrees with the first one.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut vectors = HashMap::new();
        let mut dimension = 0;
        for (term, vector) in pairs {
            anyhow::ensure!(!vector.is_empty(), "empty vector for skill '{term}'");
            if dimension == 0 {
                dimension = vector.len();
            }
            anyhow::ensure!(
                vector.len() == dimension,
                "skill '{term}' has dimension {}, expected {dimension}",
                vector.len()
            );
            vectors.insert(term.trim().to_lowercase(), vector);
        }
        Ok(Self { vectors, dimension })
    }

    /// Loads a JSON object of the form `{ "python": [0.1, ...], "machine_learning": [...] }`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read skill vectors from {}", path.display()))?;
        let parsed: HashMap<String, Vec<f32>> = serde_json::from_str(&raw)
            .with_context(|| format!("invalid skill vector JSON in {}", path.display()))?;
        Self::from_pairs(parsed)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Exact lowercase lookup, then the underscore-joined form used by phrase vocabularies.
    pub fn get(&self, term: &str) -> Option<&[f32]> {
        let key = term.trim().to_lowercase();
        self.vectors
            .get(&key)
            .or_else(|| self.vectors.get(&key.split_whitespace().collect::<Vec<_>>().join("_")))
            .map(Vec::as_slice)
    }
}

#[async_trait]
impl SkillVectors for EmbeddingTable {
    async fn skill_vector(&self, term: &str) -> Result<Option<Vec<f32>>, ProviderError> {
        Ok(self.get(term).map(<[f32]>::to_vec))
    }
}
