//! Form Selector Widget
//!
//! A selector component lets a form author pick one of the stored forms and
//! embed it inside the form being built.
//!
//! # States
//!
//! ```text
//! Empty --load_forms--> Loaded --select--> Resolved
//!                          ^                  |
//!                          +------reset-------+
//! ```
//!
//! A failed fetch keeps the widget `Empty`. Selecting an id that is not in
//! the fetched list changes nothing.

pub mod config;
pub mod error;
pub mod renderer;
pub mod widget;

pub use config::{BuilderInfo, SelectorConfig};
pub use error::{RenderError, SelectorError};
pub use renderer::{CandidateSource, FormRenderer};
pub use widget::{FormLoadEvent, FormSelect, SelectOption, SelectedFormReference, SelectorState};
