//! OpenAPI description of the match API.

use axum::Json;
use serde_json::{json, Value};

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Match ID",
        "schema": { "type": "integer" }
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(json!({ "$ref": "#/components/schemas/Error" }))
    })
}

fn message_response() -> Value {
    json!({
        "description": "OK",
        "content": json_content(json!({ "$ref": "#/components/schemas/Message" }))
    })
}

fn increment_operation(summary: &str) -> Value {
    json!({
        "tags": ["matches"],
        "summary": summary,
        "parameters": [id_parameter()],
        "responses": {
            "200": message_response(),
            "400": error_response("ID is not a number"),
            "404": error_response("Match not found"),
            "500": error_response("Store failure")
        }
    })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn match_ref() -> Value {
    json!({ "$ref": "#/components/schemas/Match" })
}

fn match_body() -> Value {
    json!({
        "required": true,
        "content": json_content(json!({ "$ref": "#/components/schemas/MatchInput" }))
    })
}

fn collection_path() -> Value {
    let list = json!({
        "tags": ["matches"],
        "summary": "List all matches",
        "responses": {
            "200": {
                "description": "OK",
                "content": json_content(json!({ "type": "array", "items": match_ref() }))
            },
            "500": error_response("Store failure")
        }
    });
    let create = json!({
        "tags": ["matches"],
        "summary": "Create a match",
        "requestBody": match_body(),
        "responses": {
            "201": { "description": "Created", "content": json_content(match_ref()) },
            "400": error_response("Missing fields or invalid date"),
            "500": error_response("Store failure")
        }
    });
    json!({ "get": list, "post": create })
}

fn item_path() -> Value {
    let get = json!({
        "tags": ["matches"],
        "summary": "Get a match by ID",
        "parameters": [id_parameter()],
        "responses": {
            "200": { "description": "OK", "content": json_content(match_ref()) },
            "400": error_response("ID is not a number"),
            "404": error_response("Match not found"),
            "500": error_response("Store failure")
        }
    });
    let put = json!({
        "tags": ["matches"],
        "summary": "Replace teams and date of a match",
        "parameters": [id_parameter()],
        "requestBody": match_body(),
        "responses": {
            "200": message_response(),
            "400": error_response("Invalid ID, missing fields or invalid date"),
            "404": error_response("Match not found"),
            "500": error_response("Store failure")
        }
    });
    let delete = json!({
        "tags": ["matches"],
        "summary": "Delete a match",
        "parameters": [id_parameter()],
        "responses": {
            "200": {
                "description": "Deleted match echoed back",
                "content": json_content(json!({ "$ref": "#/components/schemas/Deleted" }))
            },
            "400": error_response("ID is not a number"),
            "404": error_response("Match not found"),
            "500": error_response("Store failure")
        }
    });
    json!({ "get": get, "put": put, "delete": delete })
}

fn extra_time_path() -> Value {
    let patch = json!({
        "tags": ["matches"],
        "summary": "Add one minute of extra time (maximum 30)",
        "parameters": [id_parameter()],
        "responses": {
            "200": {
                "description": "OK",
                "content": json_content(json!({ "$ref": "#/components/schemas/ExtraTime" }))
            },
            "400": error_response("ID is not a number"),
            "404": error_response("Match not found"),
            "500": error_response("Store failure")
        }
    });
    json!({ "patch": patch })
}

fn schemas() -> Value {
    let r#match = json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "homeTeam": { "type": "string" },
            "awayTeam": { "type": "string" },
            "matchDate": { "type": "string", "format": "date" },
            "goals": { "type": "integer", "minimum": 0 },
            "yellowCards": { "type": "integer", "minimum": 0 },
            "redCards": { "type": "integer", "minimum": 0 },
            "extraTime": { "type": "integer", "minimum": 0, "maximum": 30 }
        }
    });
    let input = json!({
        "type": "object",
        "required": ["homeTeam", "awayTeam", "matchDate"],
        "properties": {
            "homeTeam": { "type": "string" },
            "awayTeam": { "type": "string" },
            "matchDate": { "type": "string", "format": "date", "example": "2025-04-01" }
        }
    });
    json!({
        "Match": r#match,
        "MatchInput": input,
        "Message": { "type": "object", "properties": { "message": { "type": "string" } } },
        "Deleted": {
            "type": "object",
            "properties": { "message": { "type": "string" }, "match": match_ref() }
        },
        "ExtraTime": {
            "type": "object",
            "properties": { "message": { "type": "string" }, "extraTime": { "type": "integer" } }
        },
        "Error": { "type": "object", "properties": { "error": { "type": "string" } } }
    })
}

/// Build the OpenAPI 3 document.
pub fn document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Match Tracker API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Football match records with goal, card and extra-time counters",
            "license": { "name": "MIT" }
        },
        "servers": [{ "url": "/api" }],
        "paths": {
            "/matches": collection_path(),
            "/matches/{id}": item_path(),
            "/matches/{id}/goals": { "patch": increment_operation("Register a goal") },
            "/matches/{id}/yellowcards": { "patch": increment_operation("Register a yellow card") },
            "/matches/{id}/redcards": { "patch": increment_operation("Register a red card") },
            "/matches/{id}/extratime": extra_time_path()
        },
        "components": { "schemas": schemas() }
    })
}

pub async fn openapi_json() -> Json<Value> {
    Json(document())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = document();
        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/matches",
            "/matches/{id}",
            "/matches/{id}/goals",
            "/matches/{id}/yellowcards",
            "/matches/{id}/redcards",
            "/matches/{id}/extratime",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert_eq!(doc["paths"]["/matches/{id}/extratime"]["patch"]["parameters"][0]["name"], "id");
    }
}
