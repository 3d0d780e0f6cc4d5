//! Face analysis service
//!
//! The [`Analyzer`] trait is the seam between ingestion and the remote
//! detection API; [`AnalyzerClient`] is the HTTP implementation used in
//! production.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infra::db::entities::Gender;

pub mod client;

pub use client::AnalyzerClient;

#[derive(Error, Debug)]
pub enum AnalyzerError {
	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("request timed out")]
	Timeout,

	#[error("service responded with status {status}: {body}")]
	Status { status: u16, body: String },

	#[error("malformed response: {0}")]
	MalformedResponse(String),
}

#[async_trait]
pub trait Analyzer: Send + Sync {
	/// Run face detection with demographics over a JPEG image
	async fn detect(&self, image: Bytes) -> Result<Vec<Detection>, AnalyzerError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
	pub height: i32,
	pub width: i32,
	pub x: i32,
	pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeEstimate {
	pub mean: f64,
	#[serde(default)]
	pub variance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
	pub gender: Gender,
	#[serde(default)]
	pub ethnicity: String,
	pub age: AgeEstimate,
}

/// One person found in a submitted image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
	pub bbox: BoundingBox,
	pub demographics: Demographics,
	pub score: f64,
}

impl Detection {
	/// Whole years, rounded down from the reported mean
	pub fn age(&self) -> i32 {
		self.demographics.age.mean.floor() as i32
	}
}

/// Every response from the service wraps its payload in `data`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
	pub data: T,
}
