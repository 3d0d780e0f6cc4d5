//! HTTP Basic authentication for the documentation endpoints

use axum::{
	body::Body,
	extract::{Request, State},
	http::{header, HeaderValue, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use secstr::SecUtf8;
use std::sync::Arc;
use tracing::warn;

use crate::config::DocsAuthConfig;

const REALM: &str = r#"Basic realm="facestat docs", charset="UTF-8""#;

/// Expected credentials. `SecUtf8` compares in constant time and zeroes its
/// memory on drop.
pub struct BasicCredentials {
	username: SecUtf8,
	password: SecUtf8,
}

impl BasicCredentials {
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			username: SecUtf8::from(username.into()),
			password: SecUtf8::from(password.into()),
		}
	}

	fn matches(&self, username: &str, password: &str) -> bool {
		// Evaluate both so a wrong username takes as long as a wrong password
		let username_ok = self.username == SecUtf8::from(username);
		let password_ok = self.password == SecUtf8::from(password);
		username_ok & password_ok
	}
}

impl From<&DocsAuthConfig> for BasicCredentials {
	fn from(config: &DocsAuthConfig) -> Self {
		Self::new(config.username.clone(), config.password.clone())
	}
}

/// Pull `(username, password)` out of an `Authorization: Basic ...` header
fn parse_basic(header: &HeaderValue) -> Option<(String, String)> {
	let encoded = header.to_str().ok()?.strip_prefix("Basic ")?;
	let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
	let (username, password) = decoded.split_once(':')?;
	Some((username.to_string(), password.to_string()))
}

pub(crate) async fn require_basic_auth(
	State(credentials): State<Arc<BasicCredentials>>,
	request: Request,
	next: Next,
) -> Response {
	let authorized = request
		.headers()
		.get(header::AUTHORIZATION)
		.and_then(parse_basic)
		.is_some_and(|(username, password)| credentials.matches(&username, &password));

	if authorized {
		return next.run(request).await;
	}

	warn!("Rejected unauthenticated request to {}", request.uri().path());

	let mut response = (StatusCode::UNAUTHORIZED, Body::from("Unauthorized")).into_response();
	response.headers_mut().insert(
		header::WWW_AUTHENTICATE,
		HeaderValue::from_static(REALM),
	);
	response
}

#[cfg(test)]
mod tests {
	use super::*;

	fn basic(value: &str) -> HeaderValue {
		HeaderValue::from_str(&format!("Basic {}", STANDARD.encode(value))).unwrap()
	}

	#[test]
	fn parses_basic_header() {
		assert_eq!(
			parse_basic(&basic("docs:s3cr:et")),
			Some(("docs".to_string(), "s3cr:et".to_string()))
		);
		assert_eq!(parse_basic(&basic("no-colon")), None);
		assert_eq!(parse_basic(&HeaderValue::from_static("Bearer abc")), None);
		assert_eq!(parse_basic(&HeaderValue::from_static("Basic !!!")), None);
	}

	#[test]
	fn matches_only_exact_credentials() {
		let credentials = BasicCredentials::new("docs", "secret");

		assert!(credentials.matches("docs", "secret"));
		assert!(!credentials.matches("docs", "Secret"));
		assert!(!credentials.matches("doc", "secret"));
		assert!(!credentials.matches("", ""));
	}
}
