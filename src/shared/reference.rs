//! Form Reference Resolution
//!
//! A selector component embeds another stored form. The reference lives on
//! the selector component itself:
//!
//! - `selectedFormId` - the `formId` of the embedded form
//! - `storeReference` - whether a full copy of the embedded definition is kept
//! - `referencedFormDefinition` - that copy, when kept
//!
//! References are resolved once, when the parent form is saved, and read
//! back as-is when it is rendered. Two passes share the traversal in
//! [`crate::shared::component`]:
//!
//! - [`collect_references`] copies live widget selections into the tree
//!   before saving
//! - [`prepare_for_render`] turns stored selections into default values so
//!   that selectors come up already resolved

use std::collections::HashMap;

use serde_json::Value;

use crate::shared::component::{component_key, is_selector, walk_components, walk_components_mut, Component};

/// Current selection of a live selector widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveSelection {
    /// `formId` the widget currently shows, if any
    pub selected_form_id: Option<String>,
    /// Definition the widget resolved for that form
    pub resolved_definition: Option<Value>,
}

impl LiveSelection {
    pub fn new(selected_form_id: impl Into<String>, resolved_definition: Option<Value>) -> Self {
        Self {
            selected_form_id: Some(selected_form_id.into()),
            resolved_definition,
        }
    }

    fn form_id(&self) -> Option<&str> {
        self.selected_form_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Lookup of live selections by component key
pub trait SelectionSource {
    fn live_selection(&self, key: &str) -> Option<&LiveSelection>;
}

/// Selections captured from live widgets at save time
pub type SelectionSnapshot = HashMap<String, LiveSelection>;

impl SelectionSource for SelectionSnapshot {
    fn live_selection(&self, key: &str) -> Option<&LiveSelection> {
        self.get(key)
    }
}

/// Reference view of a selector component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormReference {
    pub selected_form_id: Option<String>,
    pub store_reference: bool,
    pub referenced_form_definition: Option<Value>,
}

impl FormReference {
    /// Read the reference fields of a component, `None` if it is not a selector
    pub fn from_component(component: &Component) -> Option<Self> {
        if !is_selector(component) {
            return None;
        }

        Some(Self {
            selected_form_id: component
                .get("selectedFormId")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            store_reference: stores_reference(component),
            referenced_form_definition: component
                .get("referencedFormDefinition")
                .filter(|def| !def.is_null())
                .cloned(),
        })
    }
}

fn stores_reference(component: &Component) -> bool {
    component
        .get("storeReference")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Copy live selections onto the selector components of `components`
///
/// For every selector whose key has a live selection with a form chosen,
/// `selectedFormId` is set; `referencedFormDefinition` is set as well when
/// the component has `storeReference: true` and the selection carries a
/// resolved definition. Everything else is left untouched.
pub fn collect_references<S>(components: &mut Value, live: &S)
where
    S: SelectionSource + ?Sized,
{
    walk_components_mut(components, &mut |component| {
        if !is_selector(component) {
            return;
        }
        let Some(selection) = component_key(component).and_then(|key| live.live_selection(key)) else {
            return;
        };
        let Some(form_id) = selection.form_id() else {
            return;
        };

        component.insert("selectedFormId".to_string(), Value::String(form_id.to_string()));

        if stores_reference(component) {
            if let Some(definition) = &selection.resolved_definition {
                component.insert("referencedFormDefinition".to_string(), definition.clone());
            }
        }
    });
}

/// Make stored selections the initial value of their selector components
pub fn prepare_for_render(components: &mut Value) {
    walk_components_mut(components, &mut |component| {
        if !is_selector(component) {
            return;
        }
        let selected = component
            .get("selectedFormId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        if let Some(form_id) = selected {
            component.insert("defaultValue".to_string(), Value::String(form_id));
        }
    });
}

/// Reference views of all selector components, in traversal order
pub fn form_references(components: &Value) -> Vec<FormReference> {
    let mut references = Vec::new();
    walk_components(components, &mut |component| {
        if let Some(reference) = FormReference::from_component(component) {
            references.push(reference);
        }
    });
    references
}
