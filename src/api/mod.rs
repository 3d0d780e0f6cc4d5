//! HTTP API

use axum::{
	extract::DefaultBodyLimit,
	middleware,
	routing::{get, post},
	Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::context::TaskContext;

pub mod auth;
mod docs;
mod tasks;

pub use auth::BasicCredentials;
pub use docs::openapi_document;

/// Create the HTTP router
pub fn create_router(
	ctx: TaskContext,
	docs_credentials: BasicCredentials,
	max_upload_bytes: usize,
) -> Router {
	let docs = Router::new()
		.route("/docs", get(docs::page))
		.route("/openapi.json", get(docs::openapi))
		.layer(middleware::from_fn_with_state(
			Arc::new(docs_credentials),
			auth::require_basic_auth,
		));

	Router::new()
		.route("/health", get(|| async { "OK" }))
		.route("/tasks/", post(tasks::create_task).get(tasks::list_tasks))
		.route(
			"/tasks/:task_id/",
			get(tasks::retrieve_task).delete(tasks::delete_task),
		)
		.route("/tasks/:task_id/add_image/", post(tasks::add_image))
		.layer(DefaultBodyLimit::max(max_upload_bytes))
		.with_state(ctx)
		.merge(docs)
		.layer(TraceLayer::new_for_http())
}
