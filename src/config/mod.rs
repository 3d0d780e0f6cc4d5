//! Server configuration management

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub mod app_config;
pub mod migration;

pub use app_config::AppConfig;
pub use migration::Migrate;

/// Platform-specific data directory resolution
pub fn default_data_dir() -> Result<PathBuf> {
	#[cfg(target_os = "macos")]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("facestat");

	#[cfg(target_os = "windows")]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("Facestat");

	#[cfg(not(any(target_os = "macos", target_os = "windows")))]
	let dir = dirs::data_local_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("facestat");

	fs::create_dir_all(&dir)?;

	Ok(dir)
}

/// Connection settings for the remote face analysis service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
	/// Base URL, e.g. `https://analyzer.example.com`
	pub api_host: String,
	pub email: String,
	pub password: String,
	/// Upper bound for a single login or detect request
	pub timeout_secs: u64,
}

impl Default for AnalyzerConfig {
	fn default() -> Self {
		Self {
			api_host: "http://localhost:9000".to_string(),
			email: String::new(),
			password: String::new(),
			timeout_secs: 30,
		}
	}
}

/// Local image storage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
	/// Where uploaded images are written. Defaults to `<data_dir>/images`
	pub images_dir: Option<PathBuf>,
	pub io_timeout_secs: u64,
	pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			images_dir: None,
			io_timeout_secs: 10,
			max_upload_bytes: 20 * 1024 * 1024,
		}
	}
}

/// Credentials guarding the documentation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsAuthConfig {
	pub username: String,
	pub password: String,
}

impl Default for DocsAuthConfig {
	fn default() -> Self {
		Self {
			username: "admin".to_string(),
			password: "admin".to_string(),
		}
	}
}
