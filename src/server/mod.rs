//! HTTP API.
//!
//! Thin translation layer over [`ScoringService`]: payload structs mirror the
//! front-end JSON (optional fields with the documented defaults), handlers
//! delegate to the service and map error kinds to status codes. The scoring
//! engine itself never touches axum types.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::domain::{Marital, PropertyInputs, PurchaseInputs};
use crate::error::{ErrorKind, ScoreError};
use crate::service::ScoringService;

const READINESS_MODEL_INFO: &str = "Polynomial Regression (degree 2)";
const LIKELIHOOD_MODEL_INFO: &str = "Linear Regression with feature engineering";
const PROPERTY_MODEL_INFO: &str = "Linear Regression with German real estate market data";

pub fn router(service: Arc<ScoringService>) -> Router {
    Router::new()
        .route("/api/predict", post(predict_handler))
        .route("/api/predict-property-price", post(predict_property_handler))
        .route("/api/health", get(health_handler))
        .route("/api/retrain", post(retrain_handler))
        .fallback(not_found_handler)
        .with_state(service)
}

/// Bind and serve until the process is stopped.
pub async fn serve(service: Arc<ScoringService>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("scoring API listening on http://{addr}");
    axum::serve(listener, app).await
}

#[derive(Debug, Deserialize)]
struct PredictPayload {
    income: Option<f64>,
    equity: Option<f64>,
    savings: Option<f64>,
    target: Option<f64>,
    years: Option<f64>,
    rate: Option<f64>,
    marital: Option<Marital>,
    kids: Option<u32>,
}

impl PredictPayload {
    fn into_inputs(self) -> PurchaseInputs {
        PurchaseInputs {
            income: self.income.unwrap_or(0.0),
            equity: self.equity.unwrap_or(0.0),
            savings: self.savings.unwrap_or(0.0),
            target: self.target.unwrap_or(1.0),
            years: self.years.unwrap_or(1.0),
            rate: self.rate.unwrap_or(5.0),
            marital: self.marital.unwrap_or_default(),
            kids: self.kids.unwrap_or(0),
        }
    }
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    readiness_model: &'static str,
    likelihood_model: &'static str,
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    readiness: i64,
    likelihood: i64,
    #[serde(rename = "currPower")]
    curr_power: i64,
    #[serde(rename = "futureEquity")]
    future_equity: i64,
    model_info: ModelInfo,
}

async fn predict_handler(
    State(service): State<Arc<ScoringService>>,
    Json(payload): Json<PredictPayload>,
) -> Response {
    let inputs = payload.into_inputs();
    match service.predict_purchase(&inputs) {
        Ok(p) => json_response(
            StatusCode::OK,
            PredictResponse {
                readiness: p.readiness,
                likelihood: p.likelihood,
                curr_power: p.current_power,
                future_equity: p.future_equity,
                model_info: ModelInfo {
                    readiness_model: READINESS_MODEL_INFO,
                    likelihood_model: LIKELIHOOD_MODEL_INFO,
                },
            },
        ),
        Err(err) => score_error_response(&err),
    }
}

#[derive(Debug, Deserialize)]
struct PropertyPayload {
    sqm: Option<f64>,
    rooms: Option<f64>,
    bathrooms: Option<f64>,
    location: Option<String>,
    condition: Option<String>,
    #[serde(rename = "yearBuilt")]
    year_built: Option<i32>,
}

impl PropertyPayload {
    fn into_inputs(self) -> PropertyInputs {
        PropertyInputs {
            sqm: self.sqm.unwrap_or(100.0),
            rooms: self.rooms.unwrap_or(3.0),
            bathrooms: self.bathrooms.unwrap_or(1.0),
            location: self.location.unwrap_or_else(|| "city".to_string()),
            condition: self.condition.unwrap_or_else(|| "good".to_string()),
            year_built: self.year_built.unwrap_or(2000),
        }
    }
}

#[derive(Debug, Serialize)]
struct PropertyEcho {
    sqm: f64,
    rooms: f64,
    bathrooms: f64,
    location: String,
    condition: String,
    #[serde(rename = "yearBuilt")]
    year_built: i32,
}

impl From<PropertyInputs> for PropertyEcho {
    fn from(inputs: PropertyInputs) -> Self {
        Self {
            sqm: inputs.sqm,
            rooms: inputs.rooms,
            bathrooms: inputs.bathrooms,
            location: inputs.location,
            condition: inputs.condition,
            year_built: inputs.year_built,
        }
    }
}

#[derive(Debug, Serialize)]
struct PropertyResponse {
    #[serde(rename = "predictedPrice")]
    predicted_price: i64,
    inputs: PropertyEcho,
    model_info: &'static str,
}

async fn predict_property_handler(
    State(service): State<Arc<ScoringService>>,
    Json(payload): Json<PropertyPayload>,
) -> Response {
    let inputs = payload.into_inputs();
    match service.predict_property_price(&inputs) {
        Ok(price) => json_response(
            StatusCode::OK,
            PropertyResponse {
                predicted_price: price,
                inputs: inputs.into(),
                model_info: PROPERTY_MODEL_INFO,
            },
        ),
        Err(err) => score_error_response(&err),
    }
}

async fn health_handler() -> Response {
    // A running service implies fully trained models; construction would have
    // failed otherwise.
    json_response(
        StatusCode::OK,
        serde_json::json!({
            "status": "healthy",
            "models_loaded": true,
            "message": "scoring server is running",
        }),
    )
}

async fn retrain_handler(State(service): State<Arc<ScoringService>>) -> Response {
    // Synthesis plus three fits are CPU-bound; keep them off the async workers.
    match tokio::task::spawn_blocking(move || service.retrain()).await {
        Ok(Ok(())) => json_response(
            StatusCode::OK,
            serde_json::json!({ "message": "Models retrained successfully" }),
        ),
        Ok(Err(err)) => score_error_response(&err),
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("retrain task failed: {err}"),
        ),
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn score_error_response(err: &ScoreError) -> Response {
    match err.kind() {
        ErrorKind::Validation => {
            tracing::warn!("rejected request: {err}");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        ErrorKind::Computation => {
            tracing::error!("prediction failed: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    // The browser front-end is served from a different origin.
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorBody {
            error: msg.to_string(),
        },
    )
}
