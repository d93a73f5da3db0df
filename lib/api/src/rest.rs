use crate::stats::DiagnosisStats;
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use dermadx_classifier::TextClassifier;
use dermadx_core::Error;
use dermadx_storage::SnapshotDescription;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

/// Shared service state handed to every handler.
///
/// `classifier` is `None` when the reference store or embedder failed to
/// load at startup; the prediction endpoint then reports itself
/// unavailable instead of the process crashing.
pub struct AppState {
    pub classifier: Option<Arc<TextClassifier>>,
    pub embed_timeout: Duration,
    pub snapshot: Option<SnapshotDescription>,
    pub stats: DiagnosisStats,
}

#[derive(Deserialize)]
struct PredictTextRequest {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct PredictTextResponse {
    disease: String,
    confidence: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    records: usize,
    dim: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .route("/predict_text", web::post().to(predict_text))
                .route("/health", web::get().to(health))
                .route("/stats", web::get().to(stats))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn predict_text(
    state: web::Data<Arc<AppState>>,
    req: web::Json<PredictTextRequest>,
) -> ActixResult<HttpResponse> {
    let classifier = match &state.classifier {
        Some(classifier) => classifier.clone(),
        None => {
            state.stats.record_error();
            return Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "text classifier is not available"
            })));
        }
    };

    let text = req.into_inner().text;

    // The embed step can block; run it on the blocking pool under a
    // deadline so a stuck request cannot pin a worker.
    let work = web::block(move || classifier.classify(&text));
    match tokio::time::timeout(state.embed_timeout, work).await {
        Err(_elapsed) => {
            state.stats.record_error();
            Ok(HttpResponse::GatewayTimeout().json(serde_json::json!({
                "error": "classification timed out"
            })))
        }
        Ok(Err(join_error)) => {
            state.stats.record_error();
            error!(%join_error, "classification task was cancelled");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "classification failed"
            })))
        }
        Ok(Ok(Err(e))) => {
            state.stats.record_error();
            Ok(error_response(e))
        }
        Ok(Ok(Ok(diagnosis))) => {
            state.stats.record_prediction(diagnosis.disease);
            Ok(HttpResponse::Ok().json(PredictTextResponse {
                disease: diagnosis.disease.to_string(),
                confidence: diagnosis.confidence_label(),
            }))
        }
    }
}

async fn health(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    match &state.classifier {
        Some(classifier) => Ok(HttpResponse::Ok().json(HealthResponse {
            status: "ready",
            records: classifier.store().len(),
            dim: classifier.store().dim(),
            snapshot: state.snapshot.as_ref().map(|s| s.name.clone()),
        })),
        None => Ok(HttpResponse::ServiceUnavailable().json(HealthResponse {
            status: "unavailable",
            records: 0,
            dim: 0,
            snapshot: None,
        })),
    }
}

async fn stats(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.stats.snapshot()))
}

/// Map a classification error to its HTTP shape.
///
/// User mistakes come back verbatim; internal failures are logged and
/// surfaced as a generic message so no internal state leaks.
fn error_response(e: Error) -> HttpResponse {
    match e {
        Error::EmptyInput => HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        })),
        Error::Unavailable(_) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": e.to_string()
        })),
        other => {
            error!(error = %other, "classification failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "classification failed"
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use dermadx_classifier::{SubstringMatcher, VotePolicy};
    use dermadx_core::ReferenceStore;
    use dermadx_embed::HashEmbedder;

    fn ready_state() -> web::Data<Arc<AppState>> {
        let embedder = Arc::new(HashEmbedder::new(64));
        let store = Arc::new(ReferenceStore::new(64, Vec::new()).unwrap());
        let classifier = TextClassifier::new(
            store,
            embedder,
            Box::new(SubstringMatcher::builtin()),
            VotePolicy::TopKSum,
        )
        .unwrap();

        web::Data::new(Arc::new(AppState {
            classifier: Some(Arc::new(classifier)),
            embed_timeout: Duration::from_secs(5),
            snapshot: None,
            stats: DiagnosisStats::new(),
        }))
    }

    fn unavailable_state() -> web::Data<Arc<AppState>> {
        web::Data::new(Arc::new(AppState {
            classifier: None,
            embed_timeout: Duration::from_secs(5),
            snapshot: None,
            stats: DiagnosisStats::new(),
        }))
    }

    #[actix_web::test]
    async fn test_predict_text_returns_disease_and_confidence() {
        let state = ready_state();
        let req = web::Json(PredictTextRequest {
            text: "hot spot with raw skin".to_string(),
        });

        let response = predict_text(state.clone(), req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["disease"], "Dermatitis");
        assert!(json["confidence"].as_str().unwrap().ends_with('%'));

        let stats = state.stats.snapshot();
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.errors, 0);
    }

    #[actix_web::test]
    async fn test_predict_text_rejects_empty_input() {
        let state = ready_state();
        let req = web::Json(PredictTextRequest {
            text: String::new(),
        });

        let response = predict_text(state, req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("error").is_some());
        assert!(json.get("disease").is_none());
    }

    #[actix_web::test]
    async fn test_predict_text_unavailable_without_classifier() {
        let state = unavailable_state();
        let req = web::Json(PredictTextRequest {
            text: "itchy skin".to_string(),
        });

        let response = predict_text(state, req).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_health_reflects_availability() {
        let ready = health(ready_state()).await.unwrap();
        assert_eq!(ready.status(), StatusCode::OK);

        let unavailable = health(unavailable_state()).await.unwrap();
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
