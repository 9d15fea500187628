use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::USD_TO_SEK;
use crate::data::TrainTable;
use crate::error::ApiError;
use crate::features::build_features;
use crate::model::{invert_log_price, round2, PriceModel};
use crate::ors::OrsClient;
use crate::types::{PredictionOut, RouteRequest, RouteResponse, TripInput};

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<PriceModel>,
    pub train: Arc<TrainTable>,
    pub ors: Arc<OrsClient>,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/data/sample", get(data_sample))
        .route("/predict", post(predict))
        .route("/route", post(route))
        .with_state(state);

    Router::new().nest("/api/taxi/v1", api)
}

// ---------- Handlers ----------

async fn root() -> Json<Value> {
    Json(json!({ "message": "Taxi Price Prediction API is running" }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model_loaded": true,
        "train_rows": state.train.len(),
    }))
}

#[derive(Deserialize)]
struct SampleParams {
    rows: Option<usize>,
}

async fn data_sample(
    State(state): State<AppState>,
    Query(params): Query<SampleParams>,
) -> Json<Vec<Value>> {
    let rows = params.rows.unwrap_or(5);
    Json(state.train.head(rows).to_vec())
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<TripInput>, JsonRejection>,
) -> Result<Json<PredictionOut>, ApiError> {
    let Json(trip) = payload
        .map_err(|rej| ApiError::InvalidInput(format!("Missing or invalid field: {}", rej.body_text())))?;
    trip.validate()?;

    let features = build_features(&trip);
    let pred_log = state
        .model
        .predict_log(&features)
        .map_err(|e| ApiError::Prediction(e.to_string()))?;
    let estimated_price = round2(invert_log_price(pred_log) * USD_TO_SEK);

    Ok(Json(PredictionOut {
        estimated_price,
        currency: "SEK",
        predicted_price_log: pred_log,
    }))
}

async fn route(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>, ApiError> {
    let Json(req) = payload
        .map_err(|rej| ApiError::InvalidInput(format!("Missing or invalid field: {}", rej.body_text())))?;
    req.validate()?;

    let result = state.ors.route(&req.from_address, &req.to_address).await?;
    Ok(Json(result))
}
