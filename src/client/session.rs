//! Builder Session
//!
//! Owns the schema of the form being built and the selector widgets living
//! in it. Saving turns the widgets' live selections into stored references;
//! loading turns stored references back into selector default values.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;
use thiserror::Error;

use crate::client::api::{ApiError, FormsApiClient};
use crate::client::notice::Notice;
use crate::client::selector::{CandidateSource, FormRenderer, FormSelect, SelectorConfig};
use crate::shared::component::{component_key, is_selector, walk_components};
use crate::shared::error::SharedError;
use crate::shared::form::{is_missing, CreateFormRequest, FormDocument};
use crate::shared::reference::{collect_references, prepare_for_render, SelectionSnapshot};

/// Builder session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Form definition not found for '{id}'")]
    MissingDefinition { id: String },
}

/// Live selector widgets by component key
pub struct SelectorRegistry<R: FormRenderer> {
    widgets: BTreeMap<String, FormSelect<R>>,
}

impl<R: FormRenderer> Default for SelectorRegistry<R> {
    fn default() -> Self {
        Self {
            widgets: BTreeMap::new(),
        }
    }
}

impl<R: FormRenderer> SelectorRegistry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, widget: FormSelect<R>) -> Option<FormSelect<R>> {
        self.widgets.insert(key.into(), widget)
    }

    pub fn get(&self, key: &str) -> Option<&FormSelect<R>> {
        self.widgets.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FormSelect<R>> {
        self.widgets.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.widgets.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Drop every widget whose key is not in `keys`
    pub fn retain(&mut self, keys: &HashSet<String>) {
        self.widgets.retain(|key, _| keys.contains(key));
    }

    pub fn clear(&mut self) {
        self.widgets.clear();
    }

    /// Current selection of every widget
    pub fn snapshot(&self) -> SelectionSnapshot {
        self.widgets
            .iter()
            .map(|(key, widget)| (key.clone(), widget.live_selection()))
            .collect()
    }
}

/// A form building session
pub struct BuilderSession<R: FormRenderer + Clone> {
    schema: Value,
    registry: SelectorRegistry<R>,
    renderer: R,
    notice: Option<Notice>,
}

impl<R: FormRenderer + Clone> BuilderSession<R> {
    /// An empty session; widgets render through clones of `renderer`
    pub fn new(renderer: R) -> Self {
        Self {
            schema: serde_json::json!({ "components": [] }),
            registry: SelectorRegistry::new(),
            renderer,
            notice: None,
        }
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn registry(&self) -> &SelectorRegistry<R> {
        &self.registry
    }

    pub fn widget(&self, key: &str) -> Option<&FormSelect<R>> {
        self.registry.get(key)
    }

    pub fn widget_mut(&mut self, key: &str) -> Option<&mut FormSelect<R>> {
        self.registry.get_mut(key)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Replace the schema and sync the widget registry with its selectors
    ///
    /// Widgets whose key is still present take the edited settings but keep
    /// their selection. New selector keys get a fresh widget and the rest
    /// are disposed.
    pub fn set_schema(&mut self, schema: Value) {
        let mut found: Vec<(String, SelectorConfig)> = Vec::new();

        if let Some(components) = schema.get("components") {
            walk_components(components, &mut |component| {
                if !is_selector(component) {
                    return;
                }
                let Some(key) = component_key(component) else {
                    return;
                };
                match SelectorConfig::from_component(component) {
                    Ok(config) => found.push((key.to_string(), config)),
                    Err(e) => tracing::warn!("Skipping selector '{}': {}", key, e),
                }
            });
        }

        let keys: HashSet<String> = found.iter().map(|(key, _)| key.clone()).collect();
        self.registry.retain(&keys);

        for (key, config) in found {
            if let Some(widget) = self.registry.get_mut(&key) {
                widget.set_config(config);
            } else {
                let widget = FormSelect::new(config, self.renderer.clone());
                self.registry.insert(key, widget);
            }
        }

        self.schema = schema;
    }

    /// Build the creation request for the current schema
    ///
    /// The title comes from the schema, else from `title_prompt`; a prompted
    /// title also becomes the `formId`. Live selections are copied into the
    /// definition's selector components.
    pub fn prepare_save(&self, title_prompt: Option<&str>) -> Result<CreateFormRequest, SessionError> {
        let mut definition = self.schema.clone();

        let title = match non_empty_str(&definition, "title") {
            Some(title) => title,
            None => {
                let title = title_prompt
                    .map(str::trim)
                    .filter(|title| !title.is_empty())
                    .ok_or_else(|| {
                        SharedError::validation("title", "A title is required to save the form")
                    })?
                    .to_string();
                if let Some(object) = definition.as_object_mut() {
                    object.insert("title".to_string(), Value::String(title.clone()));
                    object.insert("formId".to_string(), Value::String(title.clone()));
                }
                title
            }
        };

        let form_id = non_empty_str(&definition, "formId").unwrap_or_else(|| title.clone());
        if let Some(object) = definition.as_object_mut() {
            object.insert("formId".to_string(), Value::String(form_id.clone()));
        }

        if let Some(components) = definition.get_mut("components") {
            collect_references(components, &self.registry.snapshot());
        }

        Ok(CreateFormRequest::new(form_id, definition).with_title(title))
    }

    /// Save the current schema as a new form
    ///
    /// On success every widget's candidate list is refreshed so the new form
    /// can be selected right away.
    pub async fn save(
        &mut self,
        api: &FormsApiClient,
        title_prompt: Option<&str>,
    ) -> Result<FormDocument, SessionError> {
        let request = match self.prepare_save(title_prompt) {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(Notice::error(format!("Error: {}", e)));
                return Err(e);
            }
        };

        match api.create_form(&request).await {
            Ok(document) => {
                tracing::info!("Form '{}' saved", document.form_id);
                self.notice = Some(Notice::success(format!("Form \"{}\" saved.", document.title)));
                self.refresh_candidates(api).await;
                Ok(document)
            }
            Err(e) => {
                tracing::error!("Error saving form: {}", e);
                self.notice = Some(Notice::error(format!("Error saving form: {}", e)));
                Err(e.into())
            }
        }
    }

    /// Fetch a stored form and prepare its definition for rendering
    pub async fn load(&mut self, api: &FormsApiClient, id: &str) -> Result<Value, SessionError> {
        let result = match api.get_form(id).await {
            Ok(document) if is_missing(&document.form_definition) => {
                Err(SessionError::MissingDefinition { id: id.to_string() })
            }
            Ok(document) => {
                let mut definition = document.form_definition;
                if let Some(components) = definition.get_mut("components") {
                    prepare_for_render(components);
                }
                tracing::info!("Form '{}' loaded", document.title);
                Ok(definition)
            }
            Err(e) => Err(e.into()),
        };

        if let Err(e) = &result {
            tracing::error!("Error loading form '{}': {}", id, e);
            self.notice = Some(Notice::error(format!("Error loading form: {}", e)));
        }
        result
    }

    /// Re-fetch the candidate list of every widget
    ///
    /// Returns the keys of the widgets whose fetch failed.
    pub async fn refresh_candidates<S>(&mut self, source: &S) -> Vec<String>
    where
        S: CandidateSource + ?Sized,
    {
        let mut failed = Vec::new();
        for (key, widget) in self.registry.widgets.iter_mut() {
            if widget.load_forms(source).await.is_err() {
                failed.push(key.clone());
            }
        }
        failed
    }

    /// Dispose of every widget
    pub fn dispose(&mut self) {
        self.registry.clear();
    }
}

fn non_empty_str(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::selector::RenderError;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Clone, Default)]
    struct NullRenderer;

    impl FormRenderer for NullRenderer {
        type Handle = ();

        fn render(&mut self, _container: &str, _definition: &Value) -> Result<(), RenderError> {
            Ok(())
        }

        fn destroy(&mut self, _handle: ()) {}
    }

    fn schema() -> Value {
        json!({
            "components": [
                { "type": "textfield", "key": "name" },
                { "type": "formselect", "key": "embedded", "storeReference": true },
                { "type": "columns", "key": "cols", "rows": [[{ "components": [
                    { "type": "formselect", "key": "nested", "storeReference": false }
                ]}]]}
            ]
        })
    }

    #[test]
    fn test_set_schema_registers_selectors() {
        let mut session = BuilderSession::new(NullRenderer);
        session.set_schema(schema());

        let keys: Vec<_> = session.registry().keys().collect();
        assert_eq!(keys, vec!["embedded", "nested"]);
        assert!(!session.widget("nested").unwrap().config().store_reference);

        session.set_schema(json!({ "components": [{ "type": "formselect", "key": "nested" }] }));
        assert_eq!(session.registry().len(), 1);
        assert!(session.registry().contains("nested"));
        assert!(session.widget("embedded").is_none());
    }

    #[test]
    fn test_set_schema_refreshes_persisting_widget_config() {
        let mut session = BuilderSession::new(NullRenderer);
        session.set_schema(json!({ "components": [
            { "type": "formselect", "key": "k", "dataUrl": "http://a/forms" }
        ]}));
        session.widget_mut("k").unwrap().set_value("contact", true).unwrap();

        session.set_schema(json!({ "components": [
            { "type": "formselect", "key": "k", "dataUrl": "http://b/forms", "placeholder": "Choose" }
        ]}));

        let widget = session.widget("k").unwrap();
        assert_eq!(widget.config().data_url, "http://b/forms");
        assert_eq!(widget.config().placeholder, "Choose");
        assert_eq!(widget.value(), "contact");
    }

    #[test]
    fn test_prepare_save_requires_title() {
        let mut session = BuilderSession::new(NullRenderer);
        session.set_schema(schema());

        assert_matches!(session.prepare_save(None), Err(SessionError::Validation(_)));
        assert_matches!(session.prepare_save(Some("  ")), Err(SessionError::Validation(_)));

        let request = session.prepare_save(Some("Intake")).unwrap();
        assert_eq!(request.form_id.as_deref(), Some("Intake"));
        assert_eq!(request.title.as_deref(), Some("Intake"));
        let definition = request.form_definition.unwrap();
        assert_eq!(definition["title"], "Intake");
        assert_eq!(definition["formId"], "Intake");
    }

    #[test]
    fn test_prepare_save_keeps_schema_form_id() {
        let mut session = BuilderSession::new(NullRenderer);
        let mut with_title = schema();
        with_title["title"] = json!("Intake");
        with_title["formId"] = json!("intake-v2");
        session.set_schema(with_title);

        let request = session.prepare_save(Some("ignored")).unwrap();
        assert_eq!(request.form_id.as_deref(), Some("intake-v2"));
        assert_eq!(request.title.as_deref(), Some("Intake"));
    }

    #[test]
    fn test_prepare_save_without_selection_leaves_selectors_alone() {
        let mut session = BuilderSession::new(NullRenderer);
        session.set_schema(schema());

        let request = session.prepare_save(Some("Intake")).unwrap();
        let definition = request.form_definition.unwrap();
        assert_eq!(definition["components"], schema()["components"]);
    }

    #[test]
    fn test_dispose_clears_registry() {
        let mut session = BuilderSession::new(NullRenderer);
        session.set_schema(schema());
        session.dispose();
        assert!(session.registry().is_empty());
    }
}
