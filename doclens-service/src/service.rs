use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use doclens_core::{
    ExtractionError, ExtractionRequest, ExtractionResult, Extractor, OpenRouterClient, ReportKind,
    TaskKind,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::models::{AnalyzeLabelRequest, AnalyzePrescriptionRequest, AnalyzeReportRequest};

type ApiResult<T> = Result<Json<T>, ApiError>;
type ApiError = (StatusCode, Json<Value>);

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
}

pub fn create_app() -> anyhow::Result<Router> {
    let client = OpenRouterClient::from_env()?;
    let state = AppState {
        extractor: Arc::new(Extractor::new(Arc::new(client))),
    };
    Ok(build_router(state))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/analyze/label", post(analyze_label))
        .route("/analyze/prescription", post(analyze_prescription))
        .route("/analyze/report", post(analyze_report))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Document Analysis Service",
        "version": "1.0.0",
        "description": "AI-powered analysis of product labels, prescriptions and medical reports",
        "endpoints": {
            "POST /analyze/label": "Analyze a product label image",
            "POST /analyze/prescription": "Explain the medicines on a prescription",
            "POST /analyze/report": "Summarize a medical report (image or PDF)",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn analyze_label(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeLabelRequest>,
) -> ApiResult<ExtractionResult> {
    info!("analyzing product label");
    run_extraction(&state, &request.image, TaskKind::ProductLabel, None).await
}

async fn analyze_prescription(
    State(state): State<AppState>,
    Json(request): Json<AnalyzePrescriptionRequest>,
) -> ApiResult<ExtractionResult> {
    info!("analyzing prescription");
    run_extraction(&state, &request.image, TaskKind::Prescription, None).await
}

async fn analyze_report(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeReportRequest>,
) -> ApiResult<ExtractionResult> {
    info!(report_type = ?request.report_type, "summarizing medical report");
    run_extraction(
        &state,
        &request.document,
        TaskKind::MedicalReport,
        request.report_type,
    )
    .await
}

async fn run_extraction(
    state: &AppState,
    raw_payload: &str,
    task: TaskKind,
    report_kind: Option<ReportKind>,
) -> ApiResult<ExtractionResult> {
    let request = ExtractionRequest::new(raw_payload, task, report_kind).map_err(api_error)?;

    let result = state.extractor.run(&request).await.map_err(|e| {
        error!(task = task.as_str(), "extraction failed: {}", e);
        api_error(e)
    })?;

    Ok(Json(result))
}

fn api_error(err: ExtractionError) -> ApiError {
    let status = match err {
        ExtractionError::RejectedInput(_) => StatusCode::BAD_REQUEST,
        ExtractionError::ModelFailure(_)
        | ExtractionError::EmptyResponse
        | ExtractionError::InvalidShape(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "error": err.to_string() })))
}
