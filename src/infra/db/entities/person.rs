//! Person entity
//!
//! One face found by the analysis service inside an image.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person_table")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,
	pub gender: Gender,
	pub age: i32,
	pub bbox_height: i32,
	pub bbox_width: i32,
	pub bbox_x: i32,
	pub bbox_y: i32,
	#[sea_orm(indexed)]
	pub image_id: i32, // Foreign key to image_table
}

#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
	#[sea_orm(string_value = "male")]
	Male,
	#[sea_orm(string_value = "female")]
	Female,
	/// Anything the analysis service reports that isn't male or female
	#[sea_orm(string_value = "unknown")]
	#[serde(other)]
	Unknown,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::image::Entity",
		from = "Column::ImageId",
		to = "super::image::Column::Id",
		on_delete = "Cascade"
	)]
	Image,
}

impl Related<super::image::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Image.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
