use std::path::Path;

use serde::Deserialize;

use super::{read_artifact, Classifier, ModelError};

/// On-disk shape of `model.json`, tagged by `kind`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClassifierArtifact {
    LogisticRegression {
        classes: Vec<String>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    MultinomialNb {
        classes: Vec<String>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    LogisticRegression,
    MultinomialNb,
}

/// Classifier whose per-class scores are `bias + weights · x`.
///
/// Logistic regression scores are logits and naive Bayes scores are joint
/// log-likelihoods; in both cases the probabilities are the softmax of the
/// scores.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    kind: ModelKind,
    classes: Vec<String>,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    n_features: usize,
}

impl LinearClassifier {
    pub fn new(
        kind: ModelKind,
        classes: Vec<String>,
        mut weights: Vec<Vec<f64>>,
        mut bias: Vec<f64>,
    ) -> Result<Self, ModelError> {
        if classes.len() < 2 {
            return Err(ModelError::Invalid(format!(
                "classifier needs at least 2 classes, got {}",
                classes.len()
            )));
        }

        // Binary logistic regression stores one row for the positive
        // class; softmax([0, z]) equals [1 - sigmoid(z), sigmoid(z)].
        if kind == ModelKind::LogisticRegression
            && classes.len() == 2
            && weights.len() == 1
            && bias.len() == 1
        {
            weights.insert(0, vec![0.0; weights[0].len()]);
            bias.insert(0, 0.0);
        }

        if weights.len() != classes.len() || bias.len() != classes.len() {
            return Err(ModelError::Invalid(format!(
                "{} classes but {} weight rows and {} bias terms",
                classes.len(),
                weights.len(),
                bias.len()
            )));
        }

        let n_features = weights[0].len();
        if n_features == 0 {
            return Err(ModelError::Invalid("classifier has no features".into()));
        }
        if let Some(row) = weights.iter().position(|w| w.len() != n_features) {
            return Err(ModelError::Invalid(format!(
                "weight row {row} has {} columns, expected {n_features}",
                weights[row].len()
            )));
        }

        Ok(Self {
            kind,
            classes,
            weights,
            bias,
            n_features,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        match read_artifact(path)? {
            ClassifierArtifact::LogisticRegression {
                classes,
                coef,
                intercept,
            } => Self::new(ModelKind::LogisticRegression, classes, coef, intercept),
            ClassifierArtifact::MultinomialNb {
                classes,
                class_log_prior,
                feature_log_prob,
            } => Self::new(
                ModelKind::MultinomialNb,
                classes,
                feature_log_prob,
                class_log_prior,
            ),
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }
}

impl Classifier for LinearClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        if x.len() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                actual: x.len(),
            });
        }

        let scores: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| b + row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>())
            .collect();

        let proba = softmax(&scores);
        if proba.iter().any(|p| !p.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        Ok(proba)
    }
}

/// Numerically stable softmax.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
