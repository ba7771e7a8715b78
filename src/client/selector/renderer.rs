//! Rendering capability used by the selector widget
//!
//! The widget does not know how forms are drawn. It asks a renderer to
//! mount a definition into a named container and later to dispose of the
//! returned instance.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::api::{ApiError, FormsApiClient};
use crate::client::selector::error::RenderError;

/// Mounts form definitions into containers
pub trait FormRenderer {
    /// A mounted form instance
    type Handle;

    fn render(&mut self, container: &str, definition: &Value) -> Result<Self::Handle, RenderError>;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Source of the candidate documents a selector offers
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn list_candidates(&self, data_url: &str) -> Result<Vec<Value>, ApiError>;
}

#[async_trait]
impl CandidateSource for FormsApiClient {
    async fn list_candidates(&self, data_url: &str) -> Result<Vec<Value>, ApiError> {
        self.fetch_candidates(data_url).await
    }
}
