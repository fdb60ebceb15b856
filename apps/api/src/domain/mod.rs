// Domain classification: four pretrained classifiers vote on a profile's
// professional domain and the votes are reconciled into one label.

pub mod handlers;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::normalize::clean_extracted_text;
use crate::providers::{DomainModel, ProviderError, TextVectorizer};

/// Separator of the disagreement marker returned on a four-way split.
pub const DISAGREEMENT_SEPARATOR: &str = " / ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classifier {
    #[serde(rename = "SVM")]
    Svm,
    #[serde(rename = "KNN")]
    Knn,
    RandomForest,
    DecisionTree,
}

impl Classifier {
    /// Name of the classifier on the model server.
    pub fn model_name(&self) -> &'static str {
        match self {
            Classifier::Svm => "svm",
            Classifier::Knn => "knn",
            Classifier::RandomForest => "random_forest",
            Classifier::DecisionTree => "decision_tree",
        }
    }
}

/// One label per classifier, for a single classification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Votes {
    pub svm: String,
    pub knn: String,
    pub random_forest: String,
    pub decision_tree: String,
}

impl Votes {
    /// Votes in reconciliation order: SVM, KNN, RandomForest, DecisionTree.
    pub fn in_order(&self) -> [(Classifier, &str); 4] {
        [
            (Classifier::Svm, self.svm.as_str()),
            (Classifier::Knn, self.knn.as_str()),
            (Classifier::RandomForest, self.random_forest.as_str()),
            (Classifier::DecisionTree, self.decision_tree.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDecision {
    pub domain: String,
    /// True when no label reached two votes; `domain` is then the
    /// `"<RandomForest> / <KNN>"` disagreement marker.
    pub ambiguous: bool,
    pub votes: Votes,
}

/// Reconciles four votes into a domain.
///
/// The most frequent label wins once it has at least two votes. Labels tied on
/// count resolve to the one seen first in vote order. A four-way split yields
/// the disagreement marker instead of a resolved label.
pub fn reconcile(votes: Votes) -> DomainDecision {
    let mut counts: Vec<(&str, usize)> = Vec::with_capacity(4);
    for (_, label) in votes.in_order() {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    // max_by_key keeps the last maximum; scan manually to keep the first.
    let mut leader: Option<(&str, usize)> = None;
    for &(label, n) in &counts {
        if leader.map_or(true, |(_, best)| n > best) {
            leader = Some((label, n));
        }
    }

    let winner = leader
        .filter(|&(_, n)| n >= 2)
        .map(|(label, _)| label.to_string());

    match winner {
        Some(domain) => DomainDecision {
            domain,
            ambiguous: false,
            votes,
        },
        None => DomainDecision {
            domain: format!(
                "{}{DISAGREEMENT_SEPARATOR}{}",
                votes.random_forest, votes.knn
            ),
            ambiguous: true,
            votes,
        },
    }
}

/// The four classifiers, loaded once and shared read-only.
pub struct DomainEnsemble {
    svm: Arc<dyn DomainModel>,
    knn: Arc<dyn DomainModel>,
    random_forest: Arc<dyn DomainModel>,
    decision_tree: Arc<dyn DomainModel>,
}

impl DomainEnsemble {
    pub fn new(
        svm: Arc<dyn DomainModel>,
        knn: Arc<dyn DomainModel>,
        random_forest: Arc<dyn DomainModel>,
        decision_tree: Arc<dyn DomainModel>,
    ) -> Self {
        Self {
            svm,
            knn,
            random_forest,
            decision_tree,
        }
    }

    /// Builds the ensemble from a factory keyed by classifier.
    pub fn from_factory<F>(mut factory: F) -> Self
    where
        F: FnMut(Classifier) -> Arc<dyn DomainModel>,
    {
        Self::new(
            factory(Classifier::Svm),
            factory(Classifier::Knn),
            factory(Classifier::RandomForest),
            factory(Classifier::DecisionTree),
        )
    }

    /// Collects all four votes. A single failing classifier fails the call.
    pub async fn vote(&self, features: &[f32]) -> Result<Votes, ProviderError> {
        let (svm, knn, random_forest, decision_tree) = tokio::try_join!(
            self.svm.predict(features),
            self.knn.predict(features),
            self.random_forest.predict(features),
            self.decision_tree.predict(features),
        )?;

        Ok(Votes {
            svm,
            knn,
            random_forest,
            decision_tree,
        })
    }

    pub async fn classify(&self, features: &[f32]) -> Result<DomainDecision, ProviderError> {
        let votes = self.vote(features).await?;
        let decision = reconcile(votes);
        debug!(
            domain = %decision.domain,
            ambiguous = decision.ambiguous,
            "Domain votes reconciled"
        );
        Ok(decision)
    }

    /// Cleans raw document text, vectorizes it and classifies the result.
    pub async fn classify_text(
        &self,
        text: &str,
        vectorizer: &dyn TextVectorizer,
    ) -> Result<DomainDecision, ProviderError> {
        let cleaned = clean_extracted_text(text);
        let features = vectorizer.vectorize(&cleaned).await?;
        self.classify(&features).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fakes::{BrokenModel, FixedLabel, FixedVectorizer};

    fn votes(svm: &str, knn: &str, rf: &str, dt: &str) -> Votes {
        Votes {
            svm: svm.to_string(),
            knn: knn.to_string(),
            random_forest: rf.to_string(),
            decision_tree: dt.to_string(),
        }
    }

    fn ensemble(labels: [&'static str; 4]) -> DomainEnsemble {
        DomainEnsemble::new(
            Arc::new(FixedLabel(labels[0])),
            Arc::new(FixedLabel(labels[1])),
            Arc::new(FixedLabel(labels[2])),
            Arc::new(FixedLabel(labels[3])),
        )
    }

    #[test]
    fn test_two_votes_win() {
        let decision = reconcile(votes("Tech", "Tech", "Finance", "HR"));
        assert_eq!(decision.domain, "Tech");
        assert!(!decision.ambiguous);
    }

    #[test]
    fn test_unanimous_and_three_votes() {
        assert_eq!(reconcile(votes("HR", "HR", "HR", "HR")).domain, "HR");
        assert_eq!(reconcile(votes("Finance", "HR", "HR", "HR")).domain, "HR");
    }

    #[test]
    fn test_four_way_split_returns_marker() {
        let decision = reconcile(votes("A", "B", "C", "D"));
        assert_eq!(decision.domain, "C / B");
        assert!(decision.ambiguous);
    }

    #[test]
    fn test_two_two_tie_resolves_to_first_seen_label() {
        assert_eq!(reconcile(votes("Finance", "Tech", "Tech", "Finance")).domain, "Finance");
        assert_eq!(reconcile(votes("Tech", "Finance", "Finance", "Tech")).domain, "Tech");
    }

    #[test]
    fn test_votes_serialize_by_classifier() {
        let json = serde_json::to_value(votes("A", "B", "C", "D")).unwrap();
        assert_eq!(json["random_forest"], "C");
        assert_eq!(serde_json::to_value(Classifier::Svm).unwrap(), "SVM");
    }

    #[tokio::test]
    async fn test_classify_collects_votes_in_order() {
        let decision = ensemble(["Tech", "Tech", "Finance", "HR"])
            .classify(&[0.1, 0.2])
            .await
            .unwrap();
        assert_eq!(decision.domain, "Tech");
        assert_eq!(decision.votes, votes("Tech", "Tech", "Finance", "HR"));
    }

    #[tokio::test]
    async fn test_classify_text_uses_vectorizer() {
        let vectorizer = FixedVectorizer(vec![1.0, 0.0]);
        let decision = ensemble(["A", "B", "C", "D"])
            .classify_text("•Data analyst  ▪python", &vectorizer)
            .await
            .unwrap();
        assert_eq!(decision.domain, "C / B");
    }

    #[tokio::test]
    async fn test_failing_classifier_fails_the_call() {
        let ensemble = DomainEnsemble::new(
            Arc::new(FixedLabel("Tech")),
            Arc::new(FixedLabel("Tech")),
            Arc::new(BrokenModel),
            Arc::new(FixedLabel("Tech")),
        );
        let err = ensemble.classify(&[0.0]).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse { .. }));
    }

    #[test]
    fn test_from_factory_wires_each_classifier() {
        let mut seen = Vec::new();
        let _ = DomainEnsemble::from_factory(|c| {
            seen.push(c.model_name());
            Arc::new(FixedLabel("x")) as Arc<dyn DomainModel>
        });
        assert_eq!(seen, vec!["svm", "knn", "random_forest", "decision_tree"]);
    }
}
