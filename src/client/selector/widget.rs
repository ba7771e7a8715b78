use serde::Serialize;
use serde_json::Value;

use crate::client::notice::Notice;
use crate::client::selector::config::SelectorConfig;
use crate::client::selector::error::SelectorError;
use crate::client::selector::renderer::{CandidateSource, FormRenderer};
use crate::shared::reference::LiveSelection;

/// Lifecycle of a selector widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorState {
    /// No candidate list fetched yet
    Empty,
    /// Candidates available, nothing embedded
    Loaded,
    /// `form_id` is embedded
    Resolved { form_id: String },
}

/// One entry of the select input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Reference to the embedded form, as reported to the host page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFormReference {
    pub form_id: String,
    pub form_definition: Option<Value>,
}

/// Emitted each time a form is embedded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLoadEvent {
    pub form_id: String,
    pub form_definition: Value,
    /// Container the form was rendered into
    pub container: String,
}

type FormLoadListener = Box<dyn FnMut(&FormLoadEvent) + Send>;

/// Form selector widget
///
/// Fetches candidate forms, embeds the chosen one through its renderer and
/// remembers the selection so that the parent form can store it.
pub struct FormSelect<R: FormRenderer> {
    config: SelectorConfig,
    renderer: R,
    state: SelectorState,
    candidates: Vec<Value>,
    data_value: String,
    selected_definition: Option<Value>,
    embedded: Option<R::Handle>,
    notice: Option<Notice>,
    listeners: Vec<FormLoadListener>,
}

impl<R: FormRenderer> FormSelect<R> {
    pub fn new(config: SelectorConfig, renderer: R) -> Self {
        Self {
            config,
            renderer,
            state: SelectorState::Empty,
            candidates: Vec::new(),
            data_value: String::new(),
            selected_definition: None,
            embedded: None,
            notice: None,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn candidates(&self) -> &[Value] {
        &self.candidates
    }

    /// Current data value, the selected `formId` or empty
    pub fn value(&self) -> &str {
        &self.data_value
    }

    pub fn selected_form_id(&self) -> Option<&str> {
        Some(self.config.selected_form_id.as_str()).filter(|id| !id.is_empty())
    }

    pub fn selected_definition(&self) -> Option<&Value> {
        self.selected_definition.as_ref()
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded.is_some()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Register a callback run after every successful embed
    pub fn on_form_load<F>(&mut self, listener: F)
    where
        F: FnMut(&FormLoadEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the component settings, keeping the current selection
    ///
    /// Candidates fetched under the old `dataUrl` stay until the next
    /// `load_forms`.
    pub fn set_config(&mut self, config: SelectorConfig) {
        let selected_form_id = std::mem::take(&mut self.config.selected_form_id);
        if config.data_url != self.config.data_url {
            tracing::debug!(
                "Selector '{}' data URL changed to {}",
                config.key,
                config.data_url
            );
        }
        self.config = config;
        self.config.selected_form_id = selected_form_id;
    }

    /// Fetch the candidate list from `dataUrl`
    ///
    /// On success any preset selection is resolved against the new list. On
    /// failure the state is left as it was.
    pub async fn load_forms<S>(&mut self, source: &S) -> Result<(), SelectorError>
    where
        S: CandidateSource + ?Sized,
    {
        let candidates = match source.list_candidates(&self.config.data_url).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::error!("Error loading forms from {}: {}", self.config.data_url, e);
                let err = SelectorError::Fetch(e);
                self.notice = Some(Notice::error(err.to_string()));
                return Err(err);
            }
        };

        tracing::debug!(
            "Loaded {} candidate form(s) for selector '{}'",
            candidates.len(),
            self.config.key
        );
        self.candidates = candidates;
        if self.state == SelectorState::Empty {
            self.state = SelectorState::Loaded;
        }

        let preset = if self.config.selected_form_id.is_empty() {
            self.data_value.clone()
        } else {
            self.config.selected_form_id.clone()
        };
        if !preset.is_empty() {
            // Failures are logged by `select`; the list itself loaded fine
            let _ = self.select(&preset);
        }

        Ok(())
    }

    fn find_candidate(&self, form_id: &str) -> Option<&Value> {
        let property = self.config.value_property.as_str();
        self.candidates
            .iter()
            .find(|candidate| candidate.get(property).and_then(Value::as_str) == Some(form_id))
    }

    /// Embed the candidate whose `valueProperty` equals `form_id`
    pub fn select(&mut self, form_id: &str) -> Result<(), SelectorError> {
        let Some(candidate) = self.find_candidate(form_id) else {
            tracing::error!("Form not found with ID: {}", form_id);
            return Err(SelectorError::FormNotFound {
                form_id: form_id.to_string(),
            });
        };
        let Some(definition) = candidate.get("formDefinition").filter(|def| !def.is_null()).cloned() else {
            tracing::error!("Form definition not found for form with ID: {}", form_id);
            return Err(SelectorError::MissingDefinition {
                form_id: form_id.to_string(),
            });
        };

        self.dispose_embedded();

        match self.renderer.render(&self.config.form_container, &definition) {
            Ok(handle) => {
                tracing::info!("Form '{}' loaded into '{}'", form_id, self.config.form_container);
                self.embedded = Some(handle);
                self.config.selected_form_id = form_id.to_string();
                self.data_value = form_id.to_string();
                self.state = SelectorState::Resolved {
                    form_id: form_id.to_string(),
                };

                let event = FormLoadEvent {
                    form_id: form_id.to_string(),
                    form_definition: definition.clone(),
                    container: self.config.form_container.clone(),
                };
                self.selected_definition = Some(definition);
                for listener in &mut self.listeners {
                    listener(&event);
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading form '{}': {}", form_id, e);
                self.config.selected_form_id.clear();
                self.selected_definition = None;
                self.data_value.clear();
                self.state = SelectorState::Loaded;
                self.notice = Some(Notice::error(e.to_string()));
                Err(SelectorError::Render(e))
            }
        }
    }

    /// Drop the embedded form and clear the selection
    pub fn reset(&mut self) {
        self.dispose_embedded();
        self.config.selected_form_id.clear();
        self.selected_definition = None;
        self.data_value.clear();
        if matches!(self.state, SelectorState::Resolved { .. }) {
            self.state = SelectorState::Loaded;
        }
    }

    /// Set the data value, embedding the form unless `no_load` is set
    pub fn set_value(&mut self, value: &str, no_load: bool) -> Result<(), SelectorError> {
        // Stored before the lookup so an id missing from the current list
        // is resolved by the next `load_forms`
        self.data_value = value.to_string();
        if !value.is_empty() && !no_load {
            self.select(value)?;
        }
        Ok(())
    }

    /// The embedded form's id and, when references are stored, its definition
    pub fn form_reference(&self) -> Option<SelectedFormReference> {
        let form_id = self.selected_form_id()?;
        Some(SelectedFormReference {
            form_id: form_id.to_string(),
            form_definition: if self.config.store_reference {
                self.selected_definition.clone()
            } else {
                None
            },
        })
    }

    /// Select options: the placeholder, then one per candidate
    pub fn options(&self) -> Vec<SelectOption> {
        let property = self.config.value_property.as_str();
        let placeholder = SelectOption {
            value: String::new(),
            label: self.config.placeholder.clone(),
        };

        std::iter::once(placeholder)
            .chain(
                self.candidates
                    .iter()
                    .filter_map(|candidate| candidate.get(property).and_then(Value::as_str))
                    .map(|value| SelectOption {
                        value: value.to_string(),
                        label: value.to_string(),
                    }),
            )
            .collect()
    }

    /// Snapshot of the selection for saving the parent form
    pub fn live_selection(&self) -> LiveSelection {
        LiveSelection {
            selected_form_id: self.selected_form_id().map(str::to_string),
            resolved_definition: self.selected_definition.clone(),
        }
    }

    /// Dispose of the embedded form
    pub fn destroy(&mut self) {
        self.dispose_embedded();
    }

    fn dispose_embedded(&mut self) {
        if let Some(handle) = self.embedded.take() {
            self.renderer.destroy(handle);
        }
    }
}

impl<R: FormRenderer> Drop for FormSelect<R> {
    fn drop(&mut self) {
        self.dispose_embedded();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::ApiError;
    use crate::client::selector::error::RenderError;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct Recorder {
        mounted: Arc<Mutex<Vec<u32>>>,
        next: Arc<Mutex<u32>>,
        fail: Arc<Mutex<bool>>,
    }

    impl Recorder {
        fn failing() -> Self {
            let renderer = Self::default();
            renderer.set_failing(true);
            renderer
        }

        fn set_failing(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }
    }

    impl FormRenderer for Recorder {
        type Handle = u32;

        fn render(&mut self, _container: &str, _definition: &Value) -> Result<u32, RenderError> {
            if *self.fail.lock().unwrap() {
                return Err(RenderError::new("engine unavailable"));
            }
            let mut next = self.next.lock().unwrap();
            *next += 1;
            self.mounted.lock().unwrap().push(*next);
            Ok(*next)
        }

        fn destroy(&mut self, handle: u32) {
            self.mounted.lock().unwrap().retain(|h| *h != handle);
        }
    }

    struct Fixed(Result<Vec<Value>, u16>);

    #[async_trait]
    impl CandidateSource for Fixed {
        async fn list_candidates(&self, _data_url: &str) -> Result<Vec<Value>, ApiError> {
            self.0.clone().map_err(|status| ApiError::Status {
                status,
                message: "unavailable".into(),
            })
        }
    }

    fn candidates() -> Fixed {
        Fixed(Ok(vec![
            json!({ "formId": "contact", "formDefinition": { "components": [] } }),
            json!({ "formId": "survey", "formDefinition": { "components": [{ "key": "q1" }] } }),
            json!({ "formId": "draft" }),
        ]))
    }

    #[tokio::test]
    async fn test_load_then_select() {
        let renderer = Recorder::default();
        let mut widget = FormSelect::new(SelectorConfig::default(), renderer.clone());
        assert_eq!(widget.state(), &SelectorState::Empty);

        widget.load_forms(&candidates()).await.unwrap();
        assert_eq!(widget.state(), &SelectorState::Loaded);

        widget.select("survey").unwrap();
        assert_eq!(widget.state(), &SelectorState::Resolved { form_id: "survey".into() });
        assert_eq!(widget.value(), "survey");
        assert_eq!(widget.selected_definition(), Some(&json!({ "components": [{ "key": "q1" }] })));
        assert_eq!(renderer.mounted.lock().unwrap().len(), 1);

        widget.select("contact").unwrap();
        assert_eq!(renderer.mounted.lock().unwrap().as_slice(), &[2]);
    }

    #[tokio::test]
    async fn test_select_unknown_form_leaves_state() {
        let mut widget = FormSelect::new(SelectorConfig::default(), Recorder::default());
        widget.load_forms(&candidates()).await.unwrap();

        assert_matches!(widget.select("missing"), Err(SelectorError::FormNotFound { .. }));
        assert_matches!(widget.select("draft"), Err(SelectorError::MissingDefinition { .. }));
        assert_eq!(widget.state(), &SelectorState::Loaded);
        assert_eq!(widget.selected_form_id(), None);
    }

    #[tokio::test]
    async fn test_fetch_failure_stays_empty() {
        let mut widget = FormSelect::new(SelectorConfig::default(), Recorder::default());
        let result = widget.load_forms(&Fixed(Err(503))).await;

        assert_matches!(result, Err(SelectorError::Fetch(_)));
        assert_eq!(widget.state(), &SelectorState::Empty);
        assert!(widget.notice().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_preset_selection_resolves_on_load() {
        let config = SelectorConfig {
            selected_form_id: "contact".into(),
            ..SelectorConfig::default()
        };
        let mut widget = FormSelect::new(config, Recorder::default());
        widget.load_forms(&candidates()).await.unwrap();
        assert_eq!(widget.state(), &SelectorState::Resolved { form_id: "contact".into() });

        let mut from_value = FormSelect::new(SelectorConfig::default(), Recorder::default());
        from_value.set_value("survey", true).unwrap();
        assert_eq!(from_value.state(), &SelectorState::Empty);
        from_value.load_forms(&candidates()).await.unwrap();
        assert_eq!(from_value.state(), &SelectorState::Resolved { form_id: "survey".into() });
    }

    #[tokio::test]
    async fn test_reset_clears_selection() {
        let renderer = Recorder::default();
        let mut widget = FormSelect::new(SelectorConfig::default(), renderer.clone());
        widget.load_forms(&candidates()).await.unwrap();
        widget.set_value("contact", false).unwrap();

        widget.reset();
        assert_eq!(widget.state(), &SelectorState::Loaded);
        assert_eq!(widget.value(), "");
        assert_eq!(widget.form_reference(), None);
        assert!(renderer.mounted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_render_failure_stays_loaded() {
        let mut widget = FormSelect::new(SelectorConfig::default(), Recorder::failing());
        widget.load_forms(&candidates()).await.unwrap();

        assert_matches!(widget.select("contact"), Err(SelectorError::Render(_)));
        assert_eq!(widget.state(), &SelectorState::Loaded);
        assert_eq!(widget.live_selection(), LiveSelection::default());
    }

    #[tokio::test]
    async fn test_render_failure_clears_previous_selection() {
        let renderer = Recorder::default();
        let mut widget = FormSelect::new(SelectorConfig::default(), renderer.clone());
        widget.load_forms(&candidates()).await.unwrap();
        widget.select("contact").unwrap();

        renderer.set_failing(true);
        assert_matches!(widget.select("survey"), Err(SelectorError::Render(_)));
        assert_eq!(widget.state(), &SelectorState::Loaded);
        assert_eq!(widget.value(), "");
        assert_eq!(widget.selected_form_id(), None);
        assert!(renderer.mounted.lock().unwrap().is_empty());

        // A refresh must not bring back the form that was replaced
        renderer.set_failing(false);
        widget.load_forms(&candidates()).await.unwrap();
        assert_eq!(widget.state(), &SelectorState::Loaded);
        assert!(!widget.is_embedded());
    }

    #[tokio::test]
    async fn test_set_value_keeps_unknown_id_for_next_load() {
        let mut widget = FormSelect::new(SelectorConfig::default(), Recorder::default());
        widget.load_forms(&Fixed(Ok(Vec::new()))).await.unwrap();

        assert_matches!(widget.set_value("contact", false), Err(SelectorError::FormNotFound { .. }));
        assert_eq!(widget.value(), "contact");
        assert_eq!(widget.state(), &SelectorState::Loaded);

        widget.load_forms(&candidates()).await.unwrap();
        assert_eq!(widget.state(), &SelectorState::Resolved { form_id: "contact".into() });
    }

    #[tokio::test]
    async fn test_set_config_keeps_selection() {
        let renderer = Recorder::default();
        let mut widget = FormSelect::new(SelectorConfig::default(), renderer.clone());
        widget.load_forms(&candidates()).await.unwrap();
        widget.select("contact").unwrap();

        widget.set_config(SelectorConfig {
            data_url: "http://forms.internal/forms".into(),
            placeholder: "Pick one".into(),
            ..SelectorConfig::default()
        });

        assert_eq!(widget.config().data_url, "http://forms.internal/forms");
        assert_eq!(widget.options()[0].label, "Pick one");
        assert_eq!(widget.selected_form_id(), Some("contact"));
        assert_eq!(widget.value(), "contact");
        assert_eq!(widget.state(), &SelectorState::Resolved { form_id: "contact".into() });
        assert_eq!(renderer.mounted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_form_load_listeners_see_each_embed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut widget = FormSelect::new(SelectorConfig::default(), Recorder::default());
        let sink = seen.clone();
        widget.on_form_load(move |event| sink.lock().unwrap().push(event.clone()));
        widget.load_forms(&candidates()).await.unwrap();

        widget.select("survey").unwrap();
        assert_matches!(widget.select("draft"), Err(SelectorError::MissingDefinition { .. }));

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[FormLoadEvent {
                form_id: "survey".into(),
                form_definition: json!({ "components": [{ "key": "q1" }] }),
                container: "formio".into(),
            }]
        );
        assert_eq!(
            serde_json::to_value(&seen[0]).unwrap()["formId"],
            json!("survey")
        );
    }

    #[tokio::test]
    async fn test_form_reference_honours_store_reference() {
        let config = SelectorConfig {
            store_reference: false,
            ..SelectorConfig::default()
        };
        let mut widget = FormSelect::new(config, Recorder::default());
        widget.load_forms(&candidates()).await.unwrap();
        widget.select("contact").unwrap();

        let reference = widget.form_reference().unwrap();
        assert_eq!(reference.form_id, "contact");
        assert_eq!(reference.form_definition, None);
        assert!(widget.live_selection().resolved_definition.is_some());
    }

    #[tokio::test]
    async fn test_options_start_with_placeholder() {
        let mut widget = FormSelect::new(SelectorConfig::default(), Recorder::default());
        widget.load_forms(&candidates()).await.unwrap();

        let values: Vec<_> = widget.options().into_iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["", "contact", "survey", "draft"]);
        assert_eq!(widget.options()[0].label, "Select a form");
    }

    #[tokio::test]
    async fn test_drop_disposes_embedded_form() {
        let renderer = Recorder::default();
        {
            let mut widget = FormSelect::new(SelectorConfig::default(), renderer.clone());
            widget.load_forms(&candidates()).await.unwrap();
            widget.select("contact").unwrap();
            assert_eq!(renderer.mounted.lock().unwrap().len(), 1);
        }
        assert!(renderer.mounted.lock().unwrap().is_empty());
    }
}
