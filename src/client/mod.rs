//! Client Module
//!
//! Everything a form-building page needs to talk to the forms API:
//!
//! - **`config`** - API base URL from `CLIENT_API_URL`
//! - **`api`** - async HTTP client for the `/forms` endpoints
//! - **`selector`** - the form selector widget and its rendering capability
//! - **`session`** - builder session that saves and loads forms
//! - **`notice`** - transient user-facing messages

pub mod api;
pub mod config;
pub mod notice;
pub mod selector;
pub mod session;

pub use api::{ApiError, FormsApiClient};
pub use config::Config;
pub use notice::{Notice, NoticeLevel};
pub use selector::{CandidateSource, FormRenderer, FormSelect, SelectorConfig, SelectorError, SelectorState};
pub use session::{BuilderSession, SelectorRegistry, SessionError};
