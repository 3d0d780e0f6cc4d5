//! Image entity
//!
//! One uploaded photograph. `path` points at the JPEG on local disk; the row
//! is removed together with its task through the cascading foreign key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image_table")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,
	pub name: String,
	pub path: String,
	#[sea_orm(indexed)]
	pub task_id: i32, // Foreign key to task_table
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::task::Entity",
		from = "Column::TaskId",
		to = "super::task::Column::Id",
		on_delete = "Cascade"
	)]
	Task,
	#[sea_orm(has_many = "super::person::Entity")]
	Person,
}

impl Related<super::task::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Task.def()
	}
}

impl Related<super::person::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Person.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
