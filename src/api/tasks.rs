use axum::{
	extract::{multipart::MultipartError, Multipart, Path, Query, State},
	http::StatusCode,
	Json,
};
use serde::{Deserialize, Serialize};

use crate::{
	context::TaskContext,
	error::{Result, TaskError},
	ops::{
		self,
		tasks::{self, TaskSummary},
		ImageUpload, TaskView,
	},
};

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "image";

#[derive(Serialize)]
pub(crate) struct CreatedTask {
	task_id: i32,
}

#[derive(Serialize)]
pub(crate) struct CreatedImage {
	image_id: i32,
}

#[derive(Deserialize)]
pub(crate) struct AddImageQuery {
	image_name: String,
}

pub(crate) async fn create_task(
	State(ctx): State<TaskContext>,
) -> Result<(StatusCode, Json<CreatedTask>)> {
	let task_id = tasks::create(&ctx.db).await?;
	Ok((StatusCode::CREATED, Json(CreatedTask { task_id })))
}

pub(crate) async fn list_tasks(State(ctx): State<TaskContext>) -> Result<Json<Vec<TaskSummary>>> {
	Ok(Json(tasks::list(&ctx.db).await?))
}

pub(crate) async fn retrieve_task(
	State(ctx): State<TaskContext>,
	Path(task_id): Path<i32>,
) -> Result<Json<TaskView>> {
	Ok(Json(ops::retrieve_task(&ctx, task_id).await?))
}

pub(crate) async fn delete_task(
	State(ctx): State<TaskContext>,
	Path(task_id): Path<i32>,
) -> Result<StatusCode> {
	tasks::delete_with_images(&ctx.db, &ctx.storage, task_id).await?;
	Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn add_image(
	State(ctx): State<TaskContext>,
	Path(task_id): Path<i32>,
	Query(AddImageQuery { image_name }): Query<AddImageQuery>,
	mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedImage>)> {
	while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
		if field.name() != Some(IMAGE_FIELD) {
			continue;
		}

		let content_type = field.content_type().map(str::to_string);
		// Reject before buffering the body
		ops::ingest::ensure_jpeg(content_type.as_deref())?;

		let file_name = field.file_name().map(str::to_string);
		let bytes = field.bytes().await.map_err(multipart_error)?;

		let image_id = ops::ingest_image(
			&ctx,
			ImageUpload {
				task_id,
				name: image_name,
				file_name,
				content_type,
				bytes,
			},
		)
		.await?;

		return Ok((StatusCode::CREATED, Json(CreatedImage { image_id })));
	}

	Err(TaskError::BadRequest(format!(
		"No `{IMAGE_FIELD}` field in request"
	)))
}

/// Uploads over the body limit are 413, anything else wrong with the
/// multipart body is a bad request
fn multipart_error(err: MultipartError) -> TaskError {
	if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
		TaskError::PayloadTooLarge(err.body_text())
	} else {
		TaskError::BadRequest(format!("Multipart error: {}", err.body_text()))
	}
}
