//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Layers (outermost → innermost):
//! 1. `Cache-Control: no-store` → 2. Access logger → Handler

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router around a loaded `CoreState`.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/symptoms", get(endpoints::symptoms::list))
        .route("/chat", post(endpoints::chat::send));

    Router::new()
        .route("/chat", post(endpoints::chat::send))
        .nest("/api", api)
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        // Diagnoses are per-request; never cache them.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::core_state::fixture_state;
    use crate::intents::FALLBACK_REPLY;
    use crate::model::{Classifier, DictVectorizer, ModelError};
    use crate::vocabulary::SYMPTOMS;

    fn test_app() -> Router {
        api_router(Arc::new(fixture_state()))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_hello_returns_greeting() {
        let response = test_app()
            .oneshot(post_json("/chat", r#"{"message":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");

        let json = body_json(response).await;
        assert_eq!(json["type"], "text");
        assert_eq!(
            json["reply"],
            "Hello! How can I help you today? You can tell me your symptoms."
        );
    }

    #[tokio::test]
    async fn chat_symptom_text_returns_diagnosis() {
        let response = test_app()
            .oneshot(post_json("/chat", r#"{"message":"  I have a Fever and body pain  "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["type"], "diagnosis");
        assert_eq!(json["selected_symptoms"], serde_json::json!(["fever", "body_pain"]));
        let preds = json["predictions"].as_array().unwrap();
        assert_eq!(preds.len(), 3);
        let probs: Vec<f64> = preds
            .iter()
            .map(|p| p["probability"].as_f64().unwrap())
            .collect();
        assert!(probs.windows(2).all(|w| w[0] >= w[1]));
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[tokio::test]
    async fn chat_explicit_symptoms_filter_unknown() {
        let response = test_app()
            .oneshot(post_json(
                "/api/chat",
                r#"{"symptoms":["fever","unknown_token"]}"#,
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["selected_symptoms"], serde_json::json!(["fever"]));
    }

    #[tokio::test]
    async fn chat_unrecognized_returns_fallback() {
        let response = test_app()
            .oneshot(post_json("/chat", r#"{"message":"purple monkey dishwasher"}"#))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"type": "text", "reply": FALLBACK_REPLY}));
    }

    #[tokio::test]
    async fn chat_empty_object_returns_fallback() {
        let response = test_app().oneshot(post_json("/chat", "{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["reply"], FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn chat_malformed_json_returns_400() {
        let response = test_app()
            .oneshot(post_json("/chat", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn chat_inference_failure_returns_500() {
        struct FailingClassifier(Vec<String>);
        impl Classifier for FailingClassifier {
            fn classes(&self) -> &[String] {
                &self.0
            }
            fn n_features(&self) -> usize {
                SYMPTOMS.len()
            }
            fn predict_proba(&self, _x: &[f64]) -> Result<Vec<f64>, ModelError> {
                Err(ModelError::NonFinite)
            }
        }

        let encoder =
            DictVectorizer::new(SYMPTOMS.iter().map(|s| s.to_string()).collect()).unwrap();
        let core = CoreState::new(
            Arc::new(encoder),
            Arc::new(FailingClassifier(vec!["A".into(), "B".into()])),
        )
        .unwrap();
        let app = api_router(Arc::new(core));

        let response = app
            .clone()
            .oneshot(post_json("/chat", r#"{"message":"fever"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INTERNAL");

        // Requests without symptoms never reach the classifier.
        let response = app
            .oneshot(post_json("/chat", r#"{"message":"thanks"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_reports_model_shape() {
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["features"], SYMPTOMS.len());
        assert_eq!(json["classes"], 5);
    }

    #[tokio::test]
    async fn symptoms_lists_vocabulary() {
        let request = Request::builder()
            .uri("/api/symptoms")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["symptoms"], serde_json::json!(SYMPTOMS));
    }

    #[tokio::test]
    async fn chat_rejects_get() {
        let request = Request::builder().uri("/chat").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let request = Request::builder()
            .uri("/nonexistent")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
