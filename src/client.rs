//! HTTP client for the `/api/grocery` endpoint.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::session::SelectedFile;

pub const PROCESSING_FAILED: &str = "Failed to process the image";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-success status; carries the server's `error` text.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Anything that can turn an uploaded image into model text.
#[async_trait]
pub trait GroceryApi: Send + Sync {
    async fn analyze(&self, file: &SelectedFile) -> Result<String, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    result: Option<String>,
    error: Option<String>,
}

pub struct HttpGroceryApi {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpGroceryApi {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/grocery", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl GroceryApi for HttpGroceryApi {
    async fn analyze(&self, file: &SelectedFile) -> Result<String, ClientError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.media_type())?;
        let form = Form::new().part("file", part);

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%status, "grocery endpoint responded");

        let body: ReplyBody =
            serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: body
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| PROCESSING_FAILED.to_string()),
            });
        }

        body.result
            .ok_or_else(|| ClientError::Decode("response has no `result`".to_string()))
    }
}
