//! Test helpers for integration tests

#![allow(dead_code)]

pub mod fake_analyzer;

pub use fake_analyzer::*;

use axum::{
	body::{to_bytes, Body},
	http::{header, Method, Request, StatusCode},
	Router,
};
use facestat::{
	api::{self, BasicCredentials},
	infra::{analyzer::Analyzer, db::Database, storage::ImageStorage},
	TaskContext,
};
use serde_json::Value;
use std::{path::Path, sync::Arc, time::Duration};
use tempfile::TempDir;
use tower::ServiceExt;

pub const DOCS_USER: &str = "docs";
pub const DOCS_PASSWORD: &str = "hunter2";

/// Body limit the test router is built with
pub const UPLOAD_LIMIT: usize = 1024 * 1024;

const BOUNDARY: &str = "facestat-test-boundary";

/// A router wired to a fresh database and image directory
pub struct TestServer {
	pub app: Router,
	pub ctx: TaskContext,
	/// Keeps the data directory alive for the duration of the test
	pub temp: TempDir,
}

impl TestServer {
	pub async fn new(analyzer: Arc<dyn Analyzer>) -> Self {
		let temp = TempDir::new().unwrap();
		let db = Database::create(&temp.path().join("facestat.db"))
			.await
			.unwrap();
		db.migrate().await.unwrap();

		let images_dir = temp.path().join("images");
		std::fs::create_dir_all(&images_dir).unwrap();
		let storage = ImageStorage::new(images_dir, Duration::from_secs(5));

		let ctx = TaskContext::new(db.conn().clone(), analyzer, storage);
		let app = api::create_router(
			ctx.clone(),
			BasicCredentials::new(DOCS_USER, DOCS_PASSWORD),
			UPLOAD_LIMIT,
		);

		Self { app, ctx, temp }
	}

	pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
		let response = self.app.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let json = if bytes.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&bytes).unwrap_or_else(|_| {
				Value::String(String::from_utf8_lossy(&bytes).into_owned())
			})
		};
		(status, json)
	}

	pub async fn create_task(&self) -> i32 {
		let (status, body) = self.send(empty(Method::POST, "/tasks/")).await;
		assert_eq!(status, StatusCode::CREATED);
		body["task_id"].as_i64().unwrap() as i32
	}

	pub async fn upload(
		&self,
		task_id: i32,
		image_name: &str,
		content_type: &str,
		bytes: &[u8],
	) -> (StatusCode, Value) {
		self.send(upload_request(task_id, image_name, content_type, bytes))
			.await
	}

	pub fn images_dir(&self) -> &Path {
		self.ctx.storage.root()
	}

	/// Number of files in the image directory
	pub fn stored_files(&self) -> usize {
		match std::fs::read_dir(self.images_dir()) {
			Ok(entries) => entries.count(),
			Err(_) => 0,
		}
	}
}

pub fn empty(method: Method, uri: &str) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.body(Body::empty())
		.unwrap()
}

/// Build a multipart body with a single `image` field
pub fn multipart_body(content_type: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
	let mut body = Vec::new();
	body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
	body.extend_from_slice(
		format!(
			"Content-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\n"
		)
		.as_bytes(),
	);
	body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
	body.extend_from_slice(bytes);
	body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
	body
}

pub fn upload_request(
	task_id: i32,
	image_name: &str,
	content_type: &str,
	bytes: &[u8],
) -> Request<Body> {
	upload_request_with_file_name(task_id, image_name, "photo.jpg", content_type, bytes)
}

pub fn upload_request_with_file_name(
	task_id: i32,
	image_name: &str,
	file_name: &str,
	content_type: &str,
	bytes: &[u8],
) -> Request<Body> {
	Request::builder()
		.method(Method::POST)
		.uri(format!("/tasks/{task_id}/add_image/?image_name={image_name}"))
		.header(
			header::CONTENT_TYPE,
			format!("multipart/form-data; boundary={BOUNDARY}"),
		)
		.body(Body::from(multipart_body(content_type, file_name, bytes)))
		.unwrap()
}

/// Start of a JPEG file; nothing here decodes it
pub const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00\x01\x01\x00\x00\x01\x00\x01\x00\x00\xff\xd9";
