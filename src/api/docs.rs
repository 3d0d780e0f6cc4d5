//! API documentation: an OpenAPI document and a page rendering it

use axum::{response::Html, Json};
use serde_json::{json, Value};

const DOCS_PAGE: &str = r#"<!DOCTYPE html>
<html>
	<head>
		<title>facestat API</title>
		<meta charset="utf-8" />
	</head>
	<body>
		<redoc spec-url="/openapi.json"></redoc>
		<script src="https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js"></script>
	</body>
</html>
"#;

pub(crate) async fn page() -> Html<&'static str> {
	Html(DOCS_PAGE)
}

pub(crate) async fn openapi() -> Json<Value> {
	Json(openapi_document())
}

fn task_id_param() -> Value {
	json!({
		"name": "task_id",
		"in": "path",
		"required": true,
		"schema": { "type": "integer" }
	})
}

fn error_response(description: &str) -> Value {
	json!({
		"description": description,
		"content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
	})
}

pub fn openapi_document() -> Value {
	json!({
		"openapi": "3.0.3",
		"info": {
			"title": "facestat",
			"version": env!("CARGO_PKG_VERSION"),
			"description": env!("CARGO_PKG_DESCRIPTION"),
		},
		"paths": {
			"/tasks/": tasks_path(),
			"/tasks/{task_id}/": task_path(),
			"/tasks/{task_id}/add_image/": add_image_path(),
		},
		"components": { "schemas": schemas() }
	})
}

fn tasks_path() -> Value {
	json!({
		"post": {
			"summary": "Create a task",
			"responses": {
				"201": {
					"description": "Task created",
					"content": { "application/json": { "schema": {
						"type": "object",
						"properties": { "task_id": { "type": "integer" } }
					} } }
				}
			}
		},
		"get": {
			"summary": "List tasks",
			"responses": {
				"200": {
					"description": "Every task",
					"content": { "application/json": { "schema": {
						"type": "array",
						"items": { "$ref": "#/components/schemas/TaskSummary" }
					} } }
				}
			}
		}
	})
}

fn task_path() -> Value {
	json!({
		"get": {
			"summary": "Get a task with its images, persons and statistics",
			"parameters": [task_id_param()],
			"responses": {
				"200": {
					"description": "Task found",
					"content": { "application/json": { "schema": { "$ref": "#/components/schemas/TaskView" } } }
				},
				"404": error_response("Task not found")
			}
		},
		"delete": {
			"summary": "Delete a task, its images and their files",
			"parameters": [task_id_param()],
			"responses": { "204": { "description": "Task deleted or already absent" } }
		}
	})
}

fn add_image_path() -> Value {
	let image_name_param = json!({
		"name": "image_name",
		"in": "query",
		"required": true,
		"schema": { "type": "string", "maxLength": 50 }
	});

	json!({
		"post": {
			"summary": "Upload a JPEG image and analyze it",
			"parameters": [task_id_param(), image_name_param],
			"requestBody": {
				"required": true,
				"content": { "multipart/form-data": { "schema": {
					"type": "object",
					"properties": { "image": { "type": "string", "format": "binary" } },
					"required": ["image"]
				} } }
			},
			"responses": {
				"201": {
					"description": "Image ingested",
					"content": { "application/json": { "schema": {
						"type": "object",
						"properties": { "image_id": { "type": "integer" } }
					} } }
				},
				"400": error_response("Malformed upload"),
				"404": error_response("Task not found"),
				"413": error_response("Upload exceeds the size limit"),
				"415": error_response("Image is not a JPEG"),
				"502": error_response("Face analysis service failed")
			}
		}
	})
}

fn schemas() -> Value {
	let person = json!({
		"type": "object",
		"properties": {
			"gender": { "type": "string", "enum": ["male", "female", "unknown"] },
			"age": { "type": "integer" },
			"bbox_height": { "type": "integer" },
			"bbox_width": { "type": "integer" },
			"bbox_x": { "type": "integer" },
			"bbox_y": { "type": "integer" }
		}
	});
	let task_view = json!({
		"type": "object",
		"properties": {
			"id": { "type": "integer" },
			"images": { "type": "array", "items": { "$ref": "#/components/schemas/Image" } },
			"person_num": { "type": "integer" },
			"male_num": { "type": "integer" },
			"female_num": { "type": "integer" },
			"male_mean_age": { "type": "integer" },
			"female_mean_age": { "type": "integer" }
		}
	});

	json!({
		"Error": {
			"type": "object",
			"properties": { "error": { "type": "string" } }
		},
		"TaskSummary": {
			"type": "object",
			"properties": { "id": { "type": "integer" } }
		},
		"Person": person,
		"Image": {
			"type": "object",
			"properties": {
				"id": { "type": "integer" },
				"name": { "type": "string" },
				"persons": { "type": "array", "items": { "$ref": "#/components/schemas/Person" } }
			}
		},
		"TaskView": task_view
	})
}
