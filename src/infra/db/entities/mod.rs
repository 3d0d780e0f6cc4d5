//! Sea-ORM entity definitions
//!
//! These map tasks, their images and the persons detected in them to tables.

pub mod image;
pub mod person;
pub mod task;

pub use image::Entity as Image;
pub use person::{Entity as Person, Gender};
pub use task::Entity as Task;
