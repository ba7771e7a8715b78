//! Selector component options
//!
//! A selector component in a form definition carries its own settings. The
//! settings not named here (`input`, `validate`, conditional logic, ...)
//! belong to the form engine and are kept as-is in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::shared::component::{Component, SELECTOR_TYPE};
use crate::shared::error::SharedError;

pub const DEFAULT_DATA_URL: &str = "http://localhost:3000/forms";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectorConfig {
    #[serde(rename = "type")]
    pub component_type: String,
    pub label: String,
    pub key: String,
    pub placeholder: String,
    /// Endpoint listing the candidate forms
    pub data_url: String,
    /// Candidate field used as option value and selection id
    pub value_property: String,
    pub search_field: String,
    /// Element id the embedded form is rendered into
    pub form_container: String,
    pub selected_form_id: String,
    /// Keep a copy of the selected definition when the parent form is saved
    pub store_reference: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            component_type: SELECTOR_TYPE.to_string(),
            label: "Form Select".to_string(),
            key: "formselect".to_string(),
            placeholder: "Select a form".to_string(),
            data_url: DEFAULT_DATA_URL.to_string(),
            value_property: "formId".to_string(),
            search_field: "formId".to_string(),
            form_container: "formio".to_string(),
            selected_form_id: String::new(),
            store_reference: true,
            extra: Map::new(),
        }
    }
}

/// How the selector appears in the builder palette
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuilderInfo {
    pub title: String,
    pub icon: String,
    pub group: String,
    pub weight: i32,
    pub schema: Value,
}

impl SelectorConfig {
    /// Read the options of a selector component, defaulting absent ones
    pub fn from_component(component: &Component) -> Result<Self, SharedError> {
        serde_json::from_value(Value::Object(component.clone())).map_err(|e| {
            SharedError::definition(format!("invalid selector component: {}", e))
        })
    }

    /// The component object, unknown keys included
    pub fn to_component(&self) -> Component {
        match serde_json::to_value(self) {
            Ok(Value::Object(component)) => component,
            _ => Map::new(),
        }
    }

    /// Default component schema
    pub fn schema() -> Value {
        Value::Object(Self::default().to_component())
    }

    pub fn builder_info() -> BuilderInfo {
        BuilderInfo {
            title: "Form Select".to_string(),
            icon: "list".to_string(),
            group: "basic".to_string(),
            weight: 0,
            schema: Self::schema(),
        }
    }

    /// Settings form shown to authors when editing a selector
    pub fn edit_form() -> Value {
        json!({
            "components": [{
                "type": "tabs",
                "key": "tabs",
                "components": [
                    {
                        "key": "display",
                        "label": "Display",
                        "components": [
                            { "type": "textfield", "key": "label", "label": "Label", "input": true },
                            {
                                "type": "textfield",
                                "key": "placeholder",
                                "label": "Placeholder",
                                "input": true,
                                "defaultValue": "Select a form"
                            }
                        ]
                    },
                    {
                        "key": "data",
                        "label": "Data",
                        "components": [
                            {
                                "type": "textfield",
                                "key": "dataUrl",
                                "label": "Data URL",
                                "input": true,
                                "placeholder": DEFAULT_DATA_URL,
                                "defaultValue": DEFAULT_DATA_URL
                            },
                            {
                                "type": "textfield",
                                "key": "valueProperty",
                                "label": "Value Property",
                                "input": true,
                                "placeholder": "formId",
                                "defaultValue": "formId"
                            },
                            {
                                "type": "textfield",
                                "key": "searchField",
                                "label": "Search Field",
                                "input": true,
                                "placeholder": "formId",
                                "defaultValue": "formId"
                            },
                            {
                                "type": "textfield",
                                "key": "formContainer",
                                "label": "Form Container ID",
                                "input": true,
                                "placeholder": "formio",
                                "defaultValue": "formio",
                                "tooltip": "The ID of the HTML element where the selected form will be rendered"
                            },
                            {
                                "type": "checkbox",
                                "key": "storeReference",
                                "label": "Store Form Reference",
                                "input": true,
                                "defaultValue": true,
                                "tooltip": "Whether to store the full form definition as a reference or just the formId"
                            }
                        ]
                    },
                    { "key": "validation", "label": "Validation", "components": [] }
                ]
            }]
        })
    }
}
