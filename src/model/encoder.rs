use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::{read_artifact, FeatureEncoder, ModelError};

/// On-disk shape of `vectorizer.json`.
#[derive(Debug, Deserialize)]
struct DictVectorizerArtifact {
    feature_names: Vec<String>,
}

/// Dictionary vectorizer: one column per fitted feature name.
#[derive(Debug, Clone)]
pub struct DictVectorizer {
    feature_names: Vec<String>,
    index: HashMap<String, usize>,
}

impl DictVectorizer {
    pub fn new(feature_names: Vec<String>) -> Result<Self, ModelError> {
        if feature_names.is_empty() {
            return Err(ModelError::Invalid("vectorizer has no features".into()));
        }
        let mut index = HashMap::with_capacity(feature_names.len());
        for (i, name) in feature_names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ModelError::Invalid(format!(
                    "duplicate vectorizer feature '{name}'"
                )));
            }
        }
        Ok(Self {
            feature_names,
            index,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let artifact: DictVectorizerArtifact = read_artifact(path)?;
        Self::new(artifact.feature_names)
    }
}

impl FeatureEncoder for DictVectorizer {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn transform(&self, features: &[(&str, f64)]) -> Vec<f64> {
        let mut encoded = vec![0.0; self.feature_names.len()];
        for (name, value) in features {
            if let Some(&i) = self.index.get(*name) {
                encoded[i] = *value;
            }
        }
        encoded
    }
}
