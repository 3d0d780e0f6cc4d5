//! Task operation errors

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::infra::{analyzer::AnalyzerError, storage::StorageError};

#[derive(Error, Debug)]
pub enum TaskError {
	/// Upload was not declared as a JPEG
	#[error("Unsupported media type {0:?}, expected image/jpeg")]
	UnsupportedMediaType(String),

	#[error("Task {0} not found")]
	TaskNotFound(i32),

	#[error("Bad request: {0}")]
	BadRequest(String),

	#[error("Upload too large: {0}")]
	PayloadTooLarge(String),

	#[error("Face analysis service error: {0}")]
	ExternalService(#[from] AnalyzerError),

	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),

	#[error("Database error: {0}")]
	Database(#[from] DbErr),
}

impl TaskError {
	/// Translate a failed insert referencing `task_id`: a foreign key
	/// violation means the task does not exist
	pub(crate) fn from_task_insert(err: DbErr, task_id: i32) -> Self {
		match err.sql_err() {
			Some(SqlErr::ForeignKeyConstraintViolation(_)) => Self::TaskNotFound(task_id),
			_ => Self::Database(err),
		}
	}

	pub fn status_code(&self) -> StatusCode {
		match self {
			Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			Self::TaskNotFound(_) => StatusCode::NOT_FOUND,
			Self::BadRequest(_) => StatusCode::BAD_REQUEST,
			Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
			Self::ExternalService(_) => StatusCode::BAD_GATEWAY,
			Self::Storage(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Message sent to the client. Server side failures only get a generic
	/// message, their details stay in the log.
	fn public_message(&self) -> String {
		match self {
			Self::ExternalService(_) => "Face analysis service failed".to_string(),
			Self::Storage(_) | Self::Database(_) => "Internal server error".to_string(),
			_ => self.to_string(),
		}
	}
}

impl IntoResponse for TaskError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		if status.is_server_error() {
			error!("Request failed: {}", self);
		}

		(status, Json(json!({ "error": self.public_message() }))).into_response()
	}
}


/// Result type for task operations
pub type Result<T> = std::result::Result<T, TaskError>;
