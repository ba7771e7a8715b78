//! Forms API Client
//!
//! Async functions for the `/forms` endpoints. Every call returns the
//! decoded response body or an [`ApiError`]; nothing here panics or retries.

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::client::config::Config;
use crate::shared::form::{CreateFormRequest, DeleteFormResponse, FormDocument, UpdateFormRequest};

/// Errors returned by the forms API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {message}")]
    Decode { message: String },

    #[error("Invalid URL '{url}'")]
    InvalidUrl { url: String },
}

impl ApiError {
    /// HTTP status of a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

/// Forms API client
#[derive(Debug, Clone)]
pub struct FormsApiClient {
    config: Config,
    client: Client,
}

impl Default for FormsApiClient {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl FormsApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// URL of the form collection
    pub fn forms_url(&self) -> String {
        self.config.api_url("/forms")
    }

    /// URL of a single form, with `id` percent-encoded as one path segment
    fn form_url(&self, id: &str) -> Result<Url, ApiError> {
        let base = self.forms_url();
        let mut url = Url::parse(&base).map_err(|_| ApiError::InvalidUrl { url: base.clone() })?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl { url: base.clone() })?
            .push(id);
        Ok(url)
    }

    /// List all forms, newest first
    pub async fn list_forms(&self) -> Result<Vec<FormDocument>, ApiError> {
        let response = self.client.get(self.forms_url()).send().await?;
        decode(response).await
    }

    /// Fetch one form by storage id or `formId`
    pub async fn get_form(&self, id: &str) -> Result<FormDocument, ApiError> {
        let response = self.client.get(self.form_url(id)?).send().await?;
        decode(response).await
    }

    /// Create a form
    pub async fn create_form(&self, request: &CreateFormRequest) -> Result<FormDocument, ApiError> {
        let response = self
            .client
            .post(self.forms_url())
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// Replace the definition of a form
    pub async fn update_form(&self, id: &str, form_definition: Value) -> Result<FormDocument, ApiError> {
        let response = self
            .client
            .put(self.form_url(id)?)
            .json(&UpdateFormRequest::new(form_definition))
            .send()
            .await?;
        decode(response).await
    }

    /// Delete a form
    pub async fn delete_form(&self, id: &str) -> Result<DeleteFormResponse, ApiError> {
        let response = self.client.delete(self.form_url(id)?).send().await?;
        decode(response).await
    }

    /// Fetch the raw documents listed at `data_url`
    ///
    /// `data_url` is absolute; selector components may point at any
    /// endpoint returning a JSON array.
    pub async fn fetch_candidates(&self, data_url: &str) -> Result<Vec<Value>, ApiError> {
        let url = Url::parse(data_url).map_err(|_| ApiError::InvalidUrl {
            url: data_url.to_string(),
        })?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}

/// Decode a success body or turn the error body into [`ApiError::Status`]
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response.json::<T>().await.map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}
