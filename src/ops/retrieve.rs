//! Task retrieval with computed statistics

use serde::{Deserialize, Serialize};

use super::{
	statistics::{self, Statistics},
	tasks::{self, TaskTree},
};
use crate::{
	context::TaskContext,
	error::{Result, TaskError},
};

/// A fetched task combined with statistics computed from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
	#[serde(flatten)]
	pub task: TaskTree,
	#[serde(flatten)]
	pub statistics: Statistics,
}

impl From<TaskTree> for TaskView {
	fn from(task: TaskTree) -> Self {
		let statistics = statistics::compute(&task);
		Self { task, statistics }
	}
}

pub async fn retrieve_task(ctx: &TaskContext, task_id: i32) -> Result<TaskView> {
	tasks::find_tree(&ctx.db, task_id)
		.await?
		.map(TaskView::from)
		.ok_or(TaskError::TaskNotFound(task_id))
}
