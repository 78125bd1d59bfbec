//! Upload session: the state behind the upload page, usable from Rust.
//!
//! Mirrors what the browser page does: validate the chosen file, keep a
//! data URI preview, submit it, then present either the extracted grocery
//! list or the raw model text depending on the [`ResultView`].

use std::sync::Arc;

use tracing::warn;

use crate::client::GroceryApi;
use crate::grocery::{extract_grocery_list, GroceryList};
use crate::prompt::ResultView;
use crate::upload::{data_uri, is_image};

pub const INVALID_SELECTION: &str = "Please select a valid image file";
pub const NOTHING_SELECTED: &str = "Please select an image first";
pub const REQUEST_FAILED: &str = "An error occurred while processing your request";

/// A file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionResult {
    List(GroceryList),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FileSelected,
    Submitting,
    Success,
    Error,
}

#[derive(Debug)]
pub struct UploadSession {
    view: ResultView,
    file: Option<Arc<SelectedFile>>,
    preview: Option<String>,
    loading: bool,
    error: Option<String>,
    result: Option<SessionResult>,
}

impl UploadSession {
    pub fn new(view: ResultView) -> Self {
        Self {
            view,
            file: None,
            preview: None,
            loading: false,
            error: None,
            result: None,
        }
    }

    pub fn view(&self) -> ResultView {
        self.view
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.file.as_deref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Items of a list result; empty for text results or before success.
    pub fn items(&self) -> &[String] {
        match &self.result {
            Some(SessionResult::List(list)) => list.items(),
            _ => &[],
        }
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.loading
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if self.error.is_some() {
            Phase::Error
        } else if self.result.is_some() {
            Phase::Success
        } else if self.file.is_some() {
            Phase::FileSelected
        } else {
            Phase::Idle
        }
    }

    /// Accepts `file` if it is an image; anything else, including no file,
    /// clears the selection and preview and records an error.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        match file {
            Some(file) if is_image(file.media_type()) => {
                self.preview = Some(data_uri(file.media_type(), file.bytes()));
                self.file = Some(Arc::new(file));
                self.error = None;
            }
            _ => {
                self.file = None;
                self.preview = None;
                self.error = Some(INVALID_SELECTION.to_string());
            }
        }
    }

    /// Sends the selected file through `api` and records the outcome.
    ///
    /// The loading flag is released even if the returned future is dropped
    /// before completion.
    pub async fn submit<A>(&mut self, api: &A)
    where
        A: GroceryApi + ?Sized,
    {
        let Some(file) = self.file.clone() else {
            self.error = Some(NOTHING_SELECTED.to_string());
            return;
        };

        self.error = None;
        self.result = None;

        let outcome = {
            let _loading = LoadingGuard::engage(&mut self.loading);
            fetch(api, self.view, &file).await
        };

        match outcome {
            Ok(result) => self.result = Some(result),
            Err(message) => {
                warn!(error = %message, "submission failed");
                self.error = Some(message);
            }
        }
    }
}

/// Holds the loading flag up until dropped.
struct LoadingGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> LoadingGuard<'a> {
    fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

async fn fetch<A>(api: &A, view: ResultView, file: &SelectedFile) -> Result<SessionResult, String>
where
    A: GroceryApi + ?Sized,
{
    let text = api.analyze(file).await.map_err(|e| {
        let message = e.to_string();
        if message.is_empty() {
            REQUEST_FAILED.to_string()
        } else {
            message
        }
    })?;

    match view {
        ResultView::List => extract_grocery_list(&text)
            .map(SessionResult::List)
            .map_err(|e| e.to_string()),
        ResultView::Text => Ok(SessionResult::Text(text)),
    }
}
