//! Shared handles every task operation runs against

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::infra::{analyzer::Analyzer, storage::ImageStorage};

#[derive(Clone)]
pub struct TaskContext {
	pub db: DatabaseConnection,
	pub analyzer: Arc<dyn Analyzer>,
	pub storage: ImageStorage,
}

impl TaskContext {
	pub fn new(db: DatabaseConnection, analyzer: Arc<dyn Analyzer>, storage: ImageStorage) -> Self {
		Self {
			db,
			analyzer,
			storage,
		}
	}
}
