//! One chat turn: pick symptoms, then diagnose or reply with canned text.

use serde::{Deserialize, Serialize};

use crate::core_state::CoreState;
use crate::diagnosis::{self, Prediction};
use crate::extraction;
use crate::intents;
use crate::model::ModelError;
use crate::vocabulary::{Symptom, DISCLAIMER};

/// Inbound chat body. Both fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatResponse {
    Diagnosis {
        selected_symptoms: Vec<Symptom>,
        predictions: Vec<Prediction>,
        advice: &'static str,
    },
    Text {
        reply: &'static str,
    },
}

/// Answer a chat request against the loaded model.
pub fn respond(state: &CoreState, req: &ChatRequest) -> Result<ChatResponse, ModelError> {
    let message = req.message.as_deref().unwrap_or("").trim();
    let selected = extraction::select_symptoms(message, req.symptoms.as_deref());

    if selected.is_empty() {
        let intent = intents::classify(message);
        tracing::debug!(?intent, "No symptoms detected");
        return Ok(ChatResponse::Text {
            reply: intent.reply(),
        });
    }

    let predictions = diagnosis::diagnose(state, &selected)?;
    Ok(ChatResponse::Diagnosis {
        selected_symptoms: selected,
        predictions,
        advice: DISCLAIMER,
    })
}
