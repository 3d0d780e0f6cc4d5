//! Task operations
//!
//! `tasks`, `images` and `persons` own their tables; `ingest` and `retrieve`
//! coordinate them with the analysis service, file storage and statistics.

pub mod images;
pub mod ingest;
pub mod persons;
pub mod retrieve;
pub mod statistics;
pub mod tasks;

pub use ingest::{ingest_image, ImageUpload};
pub use retrieve::{retrieve_task, TaskView};
pub use statistics::Statistics;
