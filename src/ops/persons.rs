//! Person store

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::warn;

use crate::{
	error::Result,
	infra::{analyzer::Detection, db::entities::person},
};

impl person::ActiveModel {
	/// Keeps gender, floored age and bounding box; ethnicity, age variance and
	/// score are dropped
	pub fn from_detection(image_id: i32, detection: &Detection) -> Self {
		Self {
			gender: Set(detection.demographics.gender),
			age: Set(detection.age()),
			bbox_height: Set(detection.bbox.height),
			bbox_width: Set(detection.bbox.width),
			bbox_x: Set(detection.bbox.x),
			bbox_y: Set(detection.bbox.y),
			image_id: Set(image_id),
			..Default::default()
		}
	}
}

/// Persist one person per detection. Either every person is stored or none is.
pub async fn create_from_detections(
	db: &DatabaseConnection,
	image_id: i32,
	detections: &[Detection],
) -> Result<Vec<i32>> {
	if detections.is_empty() {
		return Ok(Vec::new());
	}

	let txn = db.begin().await?;
	let mut ids = Vec::with_capacity(detections.len());

	for detection in detections {
		match person::ActiveModel::from_detection(image_id, detection)
			.insert(&txn)
			.await
		{
			Ok(person) => ids.push(person.id),
			Err(e) => {
				if let Err(rollback) = txn.rollback().await {
					warn!(
						"Failed to roll back persons of image {}: {}",
						image_id, rollback
					);
				}
				return Err(e.into());
			}
		}
	}

	txn.commit().await?;
	Ok(ids)
}
