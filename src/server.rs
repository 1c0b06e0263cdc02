use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::VaaniError;
use crate::pipeline::{MediaInput, MediaPipeline, ResultRecord};
use crate::transcribe::SpeechLanguage;

/// Uploads are base64-encoded JSON bodies; allow for large media files.
const MAX_BODY_BYTES: usize = 200 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<MediaPipeline>,
}

pub fn router(pipeline: Arc<MediaPipeline>) -> Router {
    Router::new()
        .route("/process", post(process_media))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(AppState { pipeline })
}

async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessRequest {
    #[serde(default)]
    file_data: String,
    #[serde(default)]
    file_type: String,
    #[serde(default)]
    file_name: String,
    #[serde(default)]
    language: String,
}

async fn process_media(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ResultRecord>, ApiError> {
    if request.file_data.trim().is_empty() {
        return Err(VaaniError::Input("No file data provided".to_string()).into());
    }

    // Strip an optional data-URI header ("data:...;base64,") before the
    // payload.
    let encoded = request
        .file_data
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or(&request.file_data);

    let data = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| VaaniError::Input(format!("Invalid base64 file data: {e}")))?;

    info!(
        "Processing upload: name={:?}, type={}, language={}, {} bytes",
        request.file_name,
        request.file_type,
        request.language,
        data.len()
    );

    let input = MediaInput {
        data,
        mime_type: request.file_type,
        file_name: (!request.file_name.is_empty()).then_some(request.file_name),
        language: SpeechLanguage::from_tag(&request.language),
    };

    let record = state.pipeline.process(input).await.map_err(|e| {
        error!("Processing failed: {e}");
        ApiError(e)
    })?;

    Ok(Json(record))
}

/// Maps pipeline errors onto HTTP statuses: client faults are 400,
/// everything else is a processing failure.
pub struct ApiError(VaaniError);

impl From<VaaniError> for ApiError {
    fn from(error: VaaniError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            VaaniError::Input(_) | VaaniError::UnsupportedMedia => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
