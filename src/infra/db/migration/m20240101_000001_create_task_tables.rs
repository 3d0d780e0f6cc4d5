//! Create task, image and person tables with cascading foreign keys

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.create_table(
				Table::create()
					.table(TaskTable::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(TaskTable::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_table(
				Table::create()
					.table(ImageTable::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(ImageTable::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(ImageTable::Name).string_len(50).not_null())
					.col(ColumnDef::new(ImageTable::Path).string_len(255).not_null())
					.col(ColumnDef::new(ImageTable::TaskId).integer().not_null())
					.foreign_key(
						ForeignKey::create()
							.name("fk_image_task")
							.from(ImageTable::Table, ImageTable::TaskId)
							.to(TaskTable::Table, TaskTable::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_table(
				Table::create()
					.table(PersonTable::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(PersonTable::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(PersonTable::Gender).text().not_null())
					.col(ColumnDef::new(PersonTable::Age).integer().not_null())
					.col(ColumnDef::new(PersonTable::BboxHeight).integer().not_null())
					.col(ColumnDef::new(PersonTable::BboxWidth).integer().not_null())
					.col(ColumnDef::new(PersonTable::BboxX).integer().not_null())
					.col(ColumnDef::new(PersonTable::BboxY).integer().not_null())
					.col(ColumnDef::new(PersonTable::ImageId).integer().not_null())
					.foreign_key(
						ForeignKey::create()
							.name("fk_person_image")
							.from(PersonTable::Table, PersonTable::ImageId)
							.to(ImageTable::Table, ImageTable::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_image_task_id")
					.table(ImageTable::Table)
					.col(ImageTable::TaskId)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_person_image_id")
					.table(PersonTable::Table)
					.col(PersonTable::ImageId)
					.to_owned(),
			)
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_table(Table::drop().table(PersonTable::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(ImageTable::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(TaskTable::Table).to_owned())
			.await
	}
}

#[derive(DeriveIden)]
enum TaskTable {
	Table,
	Id,
}

#[derive(DeriveIden)]
enum ImageTable {
	Table,
	Id,
	Name,
	Path,
	TaskId,
}

#[derive(DeriveIden)]
enum PersonTable {
	Table,
	Id,
	Gender,
	Age,
	BboxHeight,
	BboxWidth,
	BboxX,
	BboxY,
	ImageId,
}
