//! Component Tree Traversal
//!
//! A form definition is a JSON tree of component objects. A component can
//! hold child components in three shapes:
//!
//! 1. `components: [..]` - direct children
//! 2. `rows: [[{ components: [..] }, ..], ..]` - rows of columns
//! 3. `tabs: [{ components: [..] }, ..]` - tabs
//!
//! The walkers below visit every component object once, depth-first and
//! pre-order, descending into the three shapes in that order. Fields that
//! are absent or hold the wrong JSON type are skipped.

use serde_json::{Map, Value};

/// Component `type` of the form selector
pub const SELECTOR_TYPE: &str = "formselect";

/// A component object in a definition tree
pub type Component = Map<String, Value>;

/// Whether a component is a form selector
pub fn is_selector(component: &Component) -> bool {
    component.get("type").and_then(Value::as_str) == Some(SELECTOR_TYPE)
}

/// The `key` of a component, if it has a string one
pub fn component_key(component: &Component) -> Option<&str> {
    component.get("key").and_then(Value::as_str)
}

/// Visit every component in `components` mutably
///
/// `components` is expected to be a JSON array; any other value is a no-op.
pub fn walk_components_mut<F>(components: &mut Value, visit: &mut F)
where
    F: FnMut(&mut Component),
{
    let Some(list) = components.as_array_mut() else {
        return;
    };

    for node in list {
        let Some(component) = node.as_object_mut() else {
            continue;
        };

        visit(component);

        if let Some(children) = component.get_mut("components") {
            walk_components_mut(children, visit);
        }

        if let Some(Value::Array(rows)) = component.get_mut("rows") {
            for row in rows {
                let Some(columns) = row.as_array_mut() else {
                    continue;
                };
                for column in columns {
                    if let Some(children) = column.get_mut("components") {
                        walk_components_mut(children, visit);
                    }
                }
            }
        }

        if let Some(Value::Array(tabs)) = component.get_mut("tabs") {
            for tab in tabs {
                if let Some(children) = tab.get_mut("components") {
                    walk_components_mut(children, visit);
                }
            }
        }
    }
}

/// Visit every component in `components`
pub fn walk_components<F>(components: &Value, visit: &mut F)
where
    F: FnMut(&Component),
{
    let Some(list) = components.as_array() else {
        return;
    };

    for component in list.iter().filter_map(Value::as_object) {
        visit(component);

        if let Some(children) = component.get("components") {
            walk_components(children, visit);
        }

        if let Some(Value::Array(rows)) = component.get("rows") {
            for column in rows.iter().filter_map(Value::as_array).flatten() {
                if let Some(children) = column.get("components") {
                    walk_components(children, visit);
                }
            }
        }

        if let Some(Value::Array(tabs)) = component.get("tabs") {
            for tab in tabs {
                if let Some(children) = tab.get("components") {
                    walk_components(children, visit);
                }
            }
        }
    }
}

/// Keys of all selector components in traversal order
pub fn selector_keys(components: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    walk_components(components, &mut |component| {
        if is_selector(component) {
            if let Some(key) = component_key(component) {
                keys.push(key.to_string());
            }
        }
    });
    keys
}
