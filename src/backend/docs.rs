//! API Documentation
//!
//! Serves a hand-maintained OpenAPI 3 document for the forms API at
//! `GET /api-docs/openapi.json`.

use axum::Json;
use serde_json::{json, Value};

/// OpenAPI document handler
pub async fn openapi_spec() -> Json<Value> {
    Json(openapi_document())
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Error" } }
        }
    })
}

fn id_parameter(action: &str) -> Value {
    json!({
        "in": "path",
        "name": "id",
        "required": true,
        "schema": { "type": "string" },
        "description": format!("Storage id or formId of the form to {}", action)
    })
}

/// The OpenAPI document describing `/forms`
pub fn openapi_document() -> Value {
    let form_ref = json!({ "$ref": "#/components/schemas/Form" });

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Forms API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Stores form definitions addressable by storage id or formId"
        },
        "paths": {
            "/forms": {
                "post": {
                    "summary": "Create a form",
                    "tags": ["Forms"],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": {
                            "type": "object",
                            "required": ["formId", "formDefinition"],
                            "properties": {
                                "formId": { "type": "string" },
                                "title": { "type": "string" },
                                "formDefinition": { "type": "object" }
                            }
                        }}}
                    },
                    "responses": {
                        "201": { "description": "Form created", "content": { "application/json": { "schema": form_ref } } },
                        "400": error_response("Missing formId or formDefinition"),
                        "409": error_response("A form with this formId already exists"),
                        "500": error_response("Server error")
                    }
                },
                "get": {
                    "summary": "List all forms, newest first",
                    "tags": ["Forms"],
                    "responses": {
                        "200": { "description": "All forms", "content": { "application/json": {
                            "schema": { "type": "array", "items": form_ref }
                        }}},
                        "500": error_response("Server error")
                    }
                }
            },
            "/forms/{id}": {
                "get": {
                    "summary": "Get a form by storage id or formId",
                    "tags": ["Forms"],
                    "parameters": [id_parameter("fetch")],
                    "responses": {
                        "200": { "description": "Form found", "content": { "application/json": { "schema": form_ref } } },
                        "404": error_response("Form not found"),
                        "500": error_response("Server error")
                    }
                },
                "put": {
                    "summary": "Replace the definition of a form",
                    "tags": ["Forms"],
                    "parameters": [id_parameter("update")],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": {
                            "type": "object",
                            "required": ["formDefinition"],
                            "properties": { "formDefinition": { "type": "object" } }
                        }}}
                    },
                    "responses": {
                        "200": { "description": "Form updated", "content": { "application/json": { "schema": form_ref } } },
                        "400": error_response("Missing formDefinition"),
                        "404": error_response("Form not found"),
                        "500": error_response("Server error")
                    }
                },
                "delete": {
                    "summary": "Delete a form",
                    "tags": ["Forms"],
                    "parameters": [id_parameter("delete")],
                    "responses": {
                        "200": { "description": "Form deleted", "content": { "application/json": { "schema": {
                            "type": "object",
                            "properties": { "message": { "type": "string" } }
                        }}}},
                        "404": error_response("Form not found"),
                        "500": error_response("Server error")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Form": {
                    "type": "object",
                    "properties": {
                        "_id": { "type": "string", "format": "uuid" },
                        "formId": { "type": "string" },
                        "title": { "type": "string" },
                        "formDefinition": { "type": "object" },
                        "createdAt": { "type": "string", "format": "date-time" }
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": {
                        "error": { "type": "string" },
                        "status": { "type": "integer" }
                    }
                }
            }
        }
    })
}
