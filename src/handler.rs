//! `POST /api/grocery`: validate the upload, forward it to the vision model,
//! relay the text.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::page;
use crate::prompt::PromptProfile;
use crate::provider::VisionClient;
use crate::upload::{is_image, is_multipart, Upload};

pub const NO_RESPONSE: &str = "No response generated.";

/// Immutable per-process state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn VisionClient>,
    pub profile: Arc<PromptProfile>,
}

impl AppState {
    pub fn new(client: Arc<dyn VisionClient>, profile: PromptProfile) -> Self {
        Self {
            client,
            profile: Arc::new(profile),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(state.profile.view))
}

pub async fn analyze_image(State(state): State<AppState>, request: Request) -> Response {
    match analyze(&state, request).await {
        Ok(result) => Json(AnalyzeResponse { result }).into_response(),
        Err(ApiError::InvalidUpload) => {
            debug!("rejected upload");
            ApiError::InvalidUpload.into_response()
        }
        Err(err) => {
            error!("API Error: {}", err);
            err.into_response()
        }
    }
}

async fn analyze(state: &AppState, request: Request) -> Result<String, ApiError> {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(is_multipart)
        .unwrap_or(false);
    if !is_form {
        return Err(ApiError::InvalidUpload);
    }

    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|rejection| ApiError::Internal(rejection.body_text()))?;
    let upload = read_upload(&mut multipart).await?;

    info!(
        media_type = upload.media_type(),
        bytes = upload.len(),
        model = %state.profile.model,
        "analyzing image"
    );

    let completion = state
        .client
        .complete(state.profile.build_request(upload.data_uri()))
        .await?;

    Ok(completion
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NO_RESPONSE.to_string()))
}

/// Reads the first `file` field, which must be a file part with an image type.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        if field.file_name().is_none() {
            return Err(ApiError::InvalidUpload);
        }

        let media_type = field.content_type().unwrap_or_default().to_string();
        if !is_image(&media_type) {
            return Err(ApiError::InvalidUpload);
        }

        let bytes = field.bytes().await?;
        return Upload::new(media_type, bytes.to_vec()).ok_or(ApiError::InvalidUpload);
    }

    Err(ApiError::InvalidUpload)
}
