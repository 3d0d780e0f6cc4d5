//! Image ingestion: record the image, analyze it, store the file and persist
//! the detected persons

use bytes::Bytes;
use sea_orm::EntityTrait;
use std::path::Path;
use tracing::{info, warn};

use super::{images, persons};
use crate::{
	context::TaskContext,
	error::{Result, TaskError},
	infra::db::entities::image,
};

const JPEG_MEDIA_TYPE: &str = "image/jpeg";

/// An uploaded image waiting to be ingested
#[derive(Debug, Clone)]
pub struct ImageUpload {
	pub task_id: i32,
	/// Display name chosen by the client
	pub name: String,
	/// File name the client sent the image under
	pub file_name: Option<String>,
	pub content_type: Option<String>,
	pub bytes: Bytes,
}

/// Accept `image/jpeg`, ignoring case and parameters such as `; charset=`
pub fn ensure_jpeg(content_type: Option<&str>) -> Result<()> {
	let content_type = content_type.unwrap_or_default();
	let essence = content_type.split(';').next().unwrap_or_default().trim();

	if essence.eq_ignore_ascii_case(JPEG_MEDIA_TYPE) {
		Ok(())
	} else {
		Err(TaskError::UnsupportedMediaType(content_type.to_string()))
	}
}

fn validate(upload: &ImageUpload) -> Result<()> {
	ensure_jpeg(upload.content_type.as_deref())?;

	if upload.name.is_empty() || upload.name.chars().count() > images::MAX_NAME_LEN {
		return Err(TaskError::BadRequest(format!(
			"image name must be 1 to {} characters",
			images::MAX_NAME_LEN
		)));
	}
	if upload.bytes.is_empty() {
		return Err(TaskError::BadRequest("image is empty".to_string()));
	}

	Ok(())
}

/// Ingest one image into its task and return the new image id.
///
/// Validation happens before anything is written. Once the image row exists,
/// any later failure (analysis, file write, person insert) removes the row and
/// whatever file was written, so a failed upload leaves nothing behind.
pub async fn ingest_image(ctx: &TaskContext, upload: ImageUpload) -> Result<i32> {
	validate(&upload)?;

	let ImageUpload {
		task_id,
		name,
		file_name,
		bytes,
		..
	} = upload;

	let path = ctx.storage.generate_path(file_name.as_deref());
	let image_id = images::create(&ctx.db, &name, &path, task_id).await?;

	let detections = match ctx.analyzer.detect(bytes.clone()).await {
		Ok(detections) => detections,
		Err(e) => {
			discard_image(ctx, image_id, None).await;
			return Err(e.into());
		}
	};

	if let Err(e) = ctx.storage.write(&path, &bytes).await {
		discard_image(ctx, image_id, Some(&path)).await;
		return Err(e.into());
	}

	if let Err(e) = persons::create_from_detections(&ctx.db, image_id, &detections).await {
		discard_image(ctx, image_id, Some(&path)).await;
		return Err(e);
	}

	info!(
		"Ingested image {} into task {} with {} persons",
		image_id,
		task_id,
		detections.len()
	);

	Ok(image_id)
}

/// Undo a partially ingested image. Failures here are logged, the original
/// error is what the caller sees.
async fn discard_image(ctx: &TaskContext, image_id: i32, path: Option<&Path>) {
	if let Err(e) = image::Entity::delete_by_id(image_id).exec(&ctx.db).await {
		warn!("Failed to remove image {} after failed ingest: {}", image_id, e);
	}

	if let Some(path) = path {
		if let Err(e) = ctx.storage.discard(path).await {
			warn!("Failed to remove {:?} after failed ingest: {}", path, e);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_jpeg_content_types() {
		assert!(ensure_jpeg(Some("image/jpeg")).is_ok());
		assert!(ensure_jpeg(Some("IMAGE/JPEG")).is_ok());
		assert!(ensure_jpeg(Some("image/jpeg; charset=binary")).is_ok());
	}

	#[test]
	fn rejects_other_content_types() {
		for content_type in [Some("image/png"), Some("text/plain"), Some(""), None] {
			assert!(matches!(
				ensure_jpeg(content_type),
				Err(TaskError::UnsupportedMediaType(_))
			));
		}
	}

	fn upload(name: &str, bytes: &'static [u8]) -> ImageUpload {
		ImageUpload {
			task_id: 1,
			name: name.to_string(),
			file_name: Some("photo.jpg".to_string()),
			content_type: Some("image/jpeg".to_string()),
			bytes: Bytes::from_static(bytes),
		}
	}

	#[test]
	fn validates_name_and_body() {
		assert!(validate(&upload("holiday", b"\xff\xd8")).is_ok());
		assert!(matches!(
			validate(&upload("", b"\xff\xd8")),
			Err(TaskError::BadRequest(_))
		));
		assert!(matches!(
			validate(&upload(&"x".repeat(images::MAX_NAME_LEN + 1), b"\xff\xd8")),
			Err(TaskError::BadRequest(_))
		));
		assert!(matches!(
			validate(&upload("holiday", b"")),
			Err(TaskError::BadRequest(_))
		));
	}
}
