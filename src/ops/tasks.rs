//! Task store: creation, listing, nested lookup and cascading deletion

use sea_orm::{
	ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, QueryFilter,
	QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::images;
use crate::{
	error::Result,
	infra::{
		db::entities::{image, person, task, Gender},
		storage::ImageStorage,
	},
};

/// A task with every image and detected person under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTree {
	pub id: i32,
	pub images: Vec<ImageNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageNode {
	pub id: i32,
	pub name: String,
	pub persons: Vec<PersonView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
	pub gender: Gender,
	pub age: i32,
	pub bbox_height: i32,
	pub bbox_width: i32,
	pub bbox_x: i32,
	pub bbox_y: i32,
}

impl From<person::Model> for PersonView {
	fn from(person: person::Model) -> Self {
		Self {
			gender: person.gender,
			age: person.age,
			bbox_height: person.bbox_height,
			bbox_width: person.bbox_width,
			bbox_x: person.bbox_x,
			bbox_y: person.bbox_y,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
	pub id: i32,
}

impl From<task::Model> for TaskSummary {
	fn from(task: task::Model) -> Self {
		Self { id: task.id }
	}
}

pub async fn create(db: &impl ConnectionTrait) -> Result<i32> {
	let task = task::ActiveModel {
		..Default::default()
	}
	.insert(db)
	.await?;
	info!("Created task {}", task.id);
	Ok(task.id)
}

pub async fn list(db: &impl ConnectionTrait) -> Result<Vec<TaskSummary>> {
	Ok(task::Entity::find()
		.order_by_asc(task::Column::Id)
		.all(db)
		.await?
		.into_iter()
		.map(TaskSummary::from)
		.collect())
}

/// Load a task with its images and their persons, `None` if it doesn't exist
pub async fn find_tree(db: &impl ConnectionTrait, task_id: i32) -> Result<Option<TaskTree>> {
	let Some(task) = task::Entity::find_by_id(task_id).one(db).await? else {
		return Ok(None);
	};

	let images = image::Entity::find()
		.filter(image::Column::TaskId.eq(task.id))
		.order_by_asc(image::Column::Id)
		.all(db)
		.await?;
	let persons = if images.is_empty() {
		Vec::new()
	} else {
		images.load_many(person::Entity, db).await?
	};

	let images = images
		.into_iter()
		.zip(persons)
		.map(|(image, mut persons)| {
			persons.sort_by_key(|person| person.id);
			ImageNode {
				id: image.id,
				name: image.name,
				persons: persons.into_iter().map(PersonView::from).collect(),
			}
		})
		.collect();

	Ok(Some(TaskTree {
		id: task.id,
		images,
	}))
}

/// Delete a task, its images and their files. Deleting a task that doesn't
/// exist is a no-op.
///
/// Images are removed one by one so their backing files go with them; the
/// cascading foreign keys only take care of rows.
pub async fn delete_with_images(
	db: &impl ConnectionTrait,
	storage: &ImageStorage,
	task_id: i32,
) -> Result<()> {
	if task::Entity::find_by_id(task_id).one(db).await?.is_none() {
		debug!("Task {} already absent, nothing to delete", task_id);
		return Ok(());
	}

	let images = image::Entity::find()
		.filter(image::Column::TaskId.eq(task_id))
		.all(db)
		.await?;
	let image_count = images.len();

	for image in images {
		images::delete(db, storage, image.id, Path::new(&image.path)).await?;
	}

	task::Entity::delete_by_id(task_id).exec(db).await?;
	info!("Deleted task {} with {} images", task_id, image_count);

	Ok(())
}
