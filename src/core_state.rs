//! Process-wide, read-only inference context.
//!
//! `CoreState` is built once at startup from the resolved artifacts and
//! shared by every request through an `Arc`. Nothing in it is mutated
//! after construction, so handlers need no locking.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::ArtifactPaths;
use crate::model::{Classifier, DictVectorizer, FeatureEncoder, LinearClassifier, ModelError};
use crate::vocabulary::SYMPTOMS;

pub struct CoreState {
    encoder: Arc<dyn FeatureEncoder>,
    classifier: Arc<dyn Classifier>,
    /// When this context finished loading.
    pub started_at: DateTime<Utc>,
}

impl CoreState {
    /// Pair an encoder with a classifier, checking that the encoder's
    /// output width is what the classifier expects.
    pub fn new(
        encoder: Arc<dyn FeatureEncoder>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, CoreError> {
        let encoded = encoder.feature_names().len();
        if encoded != classifier.n_features() {
            return Err(CoreError::Incompatible {
                encoder_features: encoded,
                classifier_features: classifier.n_features(),
            });
        }

        let unknown: Vec<&str> = SYMPTOMS
            .iter()
            .copied()
            .filter(|s| !encoder.feature_names().iter().any(|f| f == s))
            .collect();
        if !unknown.is_empty() {
            tracing::warn!(?unknown, "Vocabulary symptoms not known to the encoder");
        }

        Ok(Self {
            encoder,
            classifier,
            started_at: Utc::now(),
        })
    }

    /// Load both artifacts from disk. Fails if either file is missing.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, CoreError> {
        if !paths.missing().is_empty() {
            return Err(CoreError::ArtifactsMissing {
                model: paths.model.clone(),
                vectorizer: paths.vectorizer.clone(),
            });
        }

        let encoder = DictVectorizer::from_path(&paths.vectorizer)?;
        let classifier = LinearClassifier::from_path(&paths.model)?;
        tracing::info!(
            model = %paths.model.display(),
            vectorizer = %paths.vectorizer.display(),
            kind = ?classifier.kind(),
            classes = classifier.classes().len(),
            features = classifier.n_features(),
            "Loaded inference artifacts"
        );

        Self::new(Arc::new(encoder), Arc::new(classifier))
    }

    pub fn encoder(&self) -> &dyn FeatureEncoder {
        self.encoder.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

/// Errors from building `CoreState`. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(
        "Model files not found. Checked: {} and {}. Place model.json / vectorizer.json in the working directory, upload them to /data/models, or set MODEL_PATH / VECTORIZER_PATH",
        .model.display(),
        .vectorizer.display()
    )]
    ArtifactsMissing { model: PathBuf, vectorizer: PathBuf },
    #[error("Artifact error: {0}")]
    Model(#[from] ModelError),
    #[error("Encoder produces {encoder_features} features but classifier expects {classifier_features}")]
    Incompatible {
        encoder_features: usize,
        classifier_features: usize,
    },
}

// ═══════════════════════════════════════════════════════════
// Test fixtures
// ═══════════════════════════════════════════════════════════

/// Class labels of the fixture classifier, in native order.
#[cfg(test)]
pub(crate) const FIXTURE_CLASSES: &[&str] =
    &["Allergy", "Chickenpox", "Common Cold", "Dengue", "Flu"];

/// Logistic weights of the fixture classifier, one row per class,
/// columns in vocabulary order.
#[cfg(test)]
fn fixture_weights() -> Vec<Vec<f64>> {
    let row = |active: &[(&str, f64)]| -> Vec<f64> {
        SYMPTOMS
            .iter()
            .map(|s| {
                active
                    .iter()
                    .find(|(name, _)| name == s)
                    .map(|(_, w)| *w)
                    .unwrap_or(0.0)
            })
            .collect()
    };
    vec![
        row(&[("sneezing", 2.5), ("rash", 1.0), ("cough", 0.5)]),
        row(&[("rash", 2.0), ("fever", 0.8)]),
        row(&[("sneezing", 1.5), ("cough", 1.5), ("sore_throat", 1.0)]),
        row(&[("fever", 2.0), ("joint_pain", 2.0), ("rash", 0.5), ("headache", 1.0)]),
        row(&[("fever", 2.0), ("cough", 1.0), ("body_pain", 1.5), ("fatigue", 1.0)]),
    ]
}

/// Fixture classifier and encoder over the full vocabulary.
#[cfg(test)]
pub(crate) fn fixture_state() -> CoreState {
    let encoder = DictVectorizer::new(SYMPTOMS.iter().map(|s| s.to_string()).collect()).unwrap();
    let classifier = LinearClassifier::new(
        crate::model::ModelKind::LogisticRegression,
        FIXTURE_CLASSES.iter().map(|s| s.to_string()).collect(),
        fixture_weights(),
        vec![0.0, -1.0, 0.2, -0.5, 0.1],
    )
    .unwrap();
    CoreState::new(Arc::new(encoder), Arc::new(classifier)).unwrap()
}

/// Write the fixture artifacts as JSON into `dir`.
#[cfg(test)]
pub(crate) fn write_fixture_artifacts(dir: &std::path::Path) -> ArtifactPaths {
    let model = serde_json::json!({
        "kind": "logistic_regression",
        "classes": FIXTURE_CLASSES,
        "coef": fixture_weights(),
        "intercept": [0.0, -1.0, 0.2, -0.5, 0.1],
    });
    let vectorizer = serde_json::json!({ "feature_names": SYMPTOMS });

    let paths = ArtifactPaths {
        model: dir.join("model.json"),
        vectorizer: dir.join("vectorizer.json"),
    };
    std::fs::write(&paths.model, model.to_string()).unwrap();
    std::fs::write(&paths.vectorizer, vectorizer.to_string()).unwrap();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_succeeds_with_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture_artifacts(dir.path());
        let state = CoreState::load(&paths).unwrap();
        assert_eq!(state.classifier().classes().len(), FIXTURE_CLASSES.len());
        assert_eq!(state.encoder().feature_names().len(), SYMPTOMS.len());
    }

    #[test]
    fn bundled_demo_artifacts_load() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        let paths = ArtifactPaths {
            model: root.join(crate::config::LOCAL_MODEL_PATH),
            vectorizer: root.join(crate::config::LOCAL_VECTORIZER_PATH),
        };
        let state = CoreState::load(&paths).unwrap();
        let preds = crate::diagnosis::diagnose(&state, &["diarrhea", "vomiting"]).unwrap();
        assert_eq!(preds[0].disease, "Gastroenteritis");
    }

    #[test]
    fn missing_model_prevents_initialization() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture_artifacts(dir.path());
        std::fs::remove_file(&paths.model).unwrap();

        let err = CoreState::load(&paths).err().unwrap();
        assert!(matches!(err, CoreError::ArtifactsMissing { .. }));
        assert!(err.to_string().contains("model.json"));
    }

    #[test]
    fn missing_vectorizer_prevents_initialization() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture_artifacts(dir.path());
        std::fs::remove_file(&paths.vectorizer).unwrap();

        assert!(matches!(
            CoreState::load(&paths),
            Err(CoreError::ArtifactsMissing { .. })
        ));
    }

    #[test]
    fn malformed_artifact_prevents_initialization() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture_artifacts(dir.path());
        std::fs::write(&paths.model, "{\"kind\": \"logistic_regression\"}").unwrap();

        assert!(matches!(
            CoreState::load(&paths),
            Err(CoreError::Model(ModelError::Parse { .. }))
        ));
    }

    #[test]
    fn width_mismatch_prevents_initialization() {
        let encoder = DictVectorizer::new(vec!["fever".into(), "cough".into()]).unwrap();
        let classifier = LinearClassifier::new(
            crate::model::ModelKind::MultinomialNb,
            vec!["A".into(), "B".into()],
            vec![vec![0.0; 3], vec![0.0; 3]],
            vec![0.0, 0.0],
        )
        .unwrap();

        let err = CoreState::new(Arc::new(encoder), Arc::new(classifier)).err().unwrap();
        assert!(matches!(
            err,
            CoreError::Incompatible {
                encoder_features: 2,
                classifier_features: 3
            }
        ));
    }
}
