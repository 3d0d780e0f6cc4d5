//! facestat: tasks of photos run through a face analysis service, with
//! per-task demographics statistics

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod infra;
pub mod ops;

pub use context::TaskContext;
pub use error::{Result, TaskError};
