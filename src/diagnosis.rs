//! Symptom set → ranked diagnoses with precautions.

use serde::Serialize;

use crate::core_state::CoreState;
use crate::model::ModelError;
use crate::vocabulary::{self, Symptom, SYMPTOMS};

/// Number of predictions returned per diagnosis.
pub const TOP_N: usize = 3;

/// Decimal digits kept on each probability.
const PROBABILITY_DIGITS: i32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub disease: String,
    pub probability: f64,
    pub precautions: Vec<&'static str>,
}

/// Binary presence flags in vocabulary order.
pub fn feature_vector(selected: &[Symptom]) -> Vec<(&'static str, f64)> {
    SYMPTOMS
        .iter()
        .map(|&s| (s, if selected.contains(&s) { 1.0 } else { 0.0 }))
        .collect()
}

/// Rank every class for `selected` and keep the top [`TOP_N`].
///
/// Callers only invoke this with at least one symptom.
pub fn diagnose(state: &CoreState, selected: &[Symptom]) -> Result<Vec<Prediction>, ModelError> {
    let features = feature_vector(selected);
    let x = state.encoder().transform(&features);
    let proba = state.classifier().predict_proba(&x)?;

    let classes = state.classifier().classes();
    if proba.len() != classes.len() {
        return Err(ModelError::ShapeMismatch {
            expected: classes.len(),
            actual: proba.len(),
        });
    }

    let mut ranked: Vec<(&str, f64)> = classes
        .iter()
        .map(String::as_str)
        .zip(proba)
        .collect();
    // Stable: equal probabilities keep the classifier's class order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let predictions: Vec<Prediction> = ranked
        .into_iter()
        .take(TOP_N)
        .map(|(disease, p)| Prediction {
            disease: disease.to_string(),
            probability: round_probability(p),
            precautions: vocabulary::precautions_for(disease).to_vec(),
        })
        .collect();

    tracing::debug!(
        symptoms = ?selected,
        top = ?predictions.first().map(|p| p.disease.as_str()),
        "Diagnosis ranked"
    );
    Ok(predictions)
}

/// Half-away-from-zero on `p * 10^4`.
fn round_probability(p: f64) -> f64 {
    let scale = 10f64.powi(PROBABILITY_DIGITS);
    (p * scale).round() / scale
}
