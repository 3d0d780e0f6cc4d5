//! Image store

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use std::path::Path;
use tracing::debug;

use crate::{
	error::{Result, TaskError},
	infra::{db::entities::image, storage::ImageStorage},
};

/// Longest display name the image table accepts
pub const MAX_NAME_LEN: usize = 50;

/// Record an image stored at `path` under `task_id`.
///
/// Fails with [`TaskError::TaskNotFound`] when the task doesn't exist.
pub async fn create(
	db: &impl ConnectionTrait,
	name: &str,
	path: &Path,
	task_id: i32,
) -> Result<i32> {
	let image = image::ActiveModel {
		name: Set(name.to_string()),
		path: Set(path.to_string_lossy().into_owned()),
		task_id: Set(task_id),
		..Default::default()
	}
	.insert(db)
	.await
	.map_err(|e| TaskError::from_task_insert(e, task_id))?;

	debug!("Created image {} for task {} at {:?}", image.id, task_id, path);
	Ok(image.id)
}

/// Delete the image row and then its backing file. A missing file is an error.
pub async fn delete(
	db: &impl ConnectionTrait,
	storage: &ImageStorage,
	image_id: i32,
	path: &Path,
) -> Result<()> {
	image::Entity::delete_by_id(image_id).exec(db).await?;
	storage.remove(path).await?;

	debug!("Deleted image {} and {:?}", image_id, path);
	Ok(())
}
