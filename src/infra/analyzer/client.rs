//! HTTP client for the face analysis service

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use super::{Analyzer, AnalyzerError, Detection, Envelope};
use crate::config::AnalyzerConfig;

/// Longest response body kept in a [`AnalyzerError::Status`]
const MAX_ERROR_BODY_LEN: usize = 512;

#[derive(Deserialize)]
struct LoginData {
	access_token: String,
}

/// Authenticated client. The access token is obtained once by
/// [`AnalyzerClient::login`] and reused for every request; there is no refresh.
pub struct AnalyzerClient {
	http: reqwest::Client,
	api_host: String,
	access_token: String,
}

impl AnalyzerClient {
	pub async fn login(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
		let http = reqwest::Client::builder()
			.timeout(Duration::from_secs(config.timeout_secs))
			.build()?;
		let api_host = config.api_host.trim_end_matches('/').to_string();

		let response = http
			.post(format!("{}/api/v1/login", api_host))
			.json(&json!({
				"email": config.email,
				"password": config.password,
			}))
			.send()
			.await
			.map_err(request_error)?;
		let LoginData { access_token } = read_data(response).await?;

		info!("Authenticated with face analysis service at {}", api_host);

		Ok(Self {
			http,
			api_host,
			access_token,
		})
	}

	pub fn api_host(&self) -> &str {
		&self.api_host
	}
}

#[async_trait]
impl Analyzer for AnalyzerClient {
	async fn detect(&self, image: Bytes) -> Result<Vec<Detection>, AnalyzerError> {
		let size = image.len();
		let response = self
			.http
			.post(format!("{}/api/v1/detect", self.api_host))
			.query(&[("demographics", "true")])
			.bearer_auth(&self.access_token)
			.header(CONTENT_TYPE, "image/jpeg")
			.body(image)
			.send()
			.await
			.map_err(request_error)?;

		let detections: Vec<Detection> = read_data(response).await?;
		debug!("Analyzed {} bytes, {} detections", size, detections.len());

		Ok(detections)
	}
}

fn request_error(e: reqwest::Error) -> AnalyzerError {
	if e.is_timeout() {
		AnalyzerError::Timeout
	} else {
		AnalyzerError::Request(e)
	}
}

/// Check the status and unwrap the `data` envelope of a response
async fn read_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AnalyzerError> {
	let status = response.status();
	let body = response.text().await.map_err(request_error)?;

	if !status.is_success() {
		let mut body = body;
		if body.len() > MAX_ERROR_BODY_LEN {
			let mut end = MAX_ERROR_BODY_LEN;
			while !body.is_char_boundary(end) {
				end -= 1;
			}
			body.truncate(end);
		}
		return Err(AnalyzerError::Status {
			status: status.as_u16(),
			body,
		});
	}

	serde_json::from_str::<Envelope<T>>(&body)
		.map(|envelope| envelope.data)
		.map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))
}
