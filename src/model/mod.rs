//! Feature encoder and classifier loaded from JSON artifacts.
//!
//! Both sit behind traits so the request path only sees
//! `transform` and `predict_proba`, whatever model produced them.

mod classifier;
mod encoder;
mod error;

use std::path::Path;

use serde::de::DeserializeOwned;

pub use classifier::{LinearClassifier, ModelKind};
pub use encoder::DictVectorizer;
pub use error::ModelError;

/// Maps named feature values onto the classifier's numeric input.
pub trait FeatureEncoder: Send + Sync {
    /// Column order of the encoded vector.
    fn feature_names(&self) -> &[String];

    /// Encode `(name, value)` pairs. Names the encoder was not fitted on
    /// are ignored; missing names encode as 0.
    fn transform(&self, features: &[(&str, f64)]) -> Vec<f64>;
}

/// A fitted probabilistic classifier.
pub trait Classifier: Send + Sync {
    /// Class labels in the classifier's native order.
    fn classes(&self) -> &[String];

    /// Expected width of the encoded input.
    fn n_features(&self) -> usize;

    /// One probability per entry of [`Classifier::classes`], summing to 1.
    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Read and deserialize a JSON artifact.
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
