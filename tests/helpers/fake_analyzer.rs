//! In-process stand-ins for the face analysis service

use async_trait::async_trait;
use bytes::Bytes;
use facestat::infra::{
	analyzer::{AgeEstimate, Analyzer, AnalyzerError, BoundingBox, Demographics, Detection},
	db::entities::Gender,
};
use std::sync::{
	atomic::{AtomicUsize, Ordering},
	Arc,
};

/// Answers every request with the same detections and counts calls
#[derive(Default)]
pub struct FakeAnalyzer {
	detections: Vec<Detection>,
	calls: AtomicUsize,
}

impl FakeAnalyzer {
	pub fn with_detections(detections: Vec<Detection>) -> Arc<Self> {
		Arc::new(Self {
			detections,
			calls: AtomicUsize::new(0),
		})
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Analyzer for FakeAnalyzer {
	async fn detect(&self, _image: Bytes) -> Result<Vec<Detection>, AnalyzerError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(self.detections.clone())
	}
}

/// Fails every request as if the service returned a 503
pub struct UnavailableAnalyzer;

#[async_trait]
impl Analyzer for UnavailableAnalyzer {
	async fn detect(&self, _image: Bytes) -> Result<Vec<Detection>, AnalyzerError> {
		Err(AnalyzerError::Status {
			status: 503,
			body: "service unavailable".to_string(),
		})
	}
}

pub fn detection(gender: Gender, age: f64, bbox: (i32, i32, i32, i32)) -> Detection {
	let (height, width, x, y) = bbox;
	Detection {
		bbox: BoundingBox {
			height,
			width,
			x,
			y,
		},
		demographics: Demographics {
			gender,
			ethnicity: "unspecified".to_string(),
			age: AgeEstimate {
				mean: age,
				variance: 4.0,
			},
		},
		score: 0.9,
	}
}
