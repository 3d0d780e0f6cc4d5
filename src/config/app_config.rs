//! Application configuration

use super::{default_data_dir, AnalyzerConfig, DocsAuthConfig, Migrate, StorageConfig};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{
	fs,
	net::SocketAddr,
	path::{Path, PathBuf},
};
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "facestat.json";
const DATABASE_FILE_NAME: &str = "facestat.db";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
	/// Config schema version
	pub version: u32,

	/// Data directory path
	pub data_dir: PathBuf,

	/// Default tracing filter, overridden by `RUST_LOG`
	pub log_level: String,

	/// Address the HTTP server binds to
	pub listen_addr: SocketAddr,

	/// Overrides the SQLite file inside `data_dir`
	#[serde(default)]
	pub database_url: Option<String>,

	#[serde(default)]
	pub analyzer: AnalyzerConfig,

	#[serde(default)]
	pub storage: StorageConfig,

	#[serde(default)]
	pub docs_auth: DocsAuthConfig,
}

impl AppConfig {
	/// Load configuration from the default location
	pub fn load() -> Result<Self> {
		let data_dir = default_data_dir()?;
		Self::load_from(&data_dir)
	}

	/// Load configuration from a specific data directory, writing defaults if
	/// no config file exists yet
	pub fn load_from(data_dir: &Path) -> Result<Self> {
		let config_path = data_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			info!("Loading config from {:?}", config_path);
			let json = fs::read_to_string(&config_path)?;
			let mut config: AppConfig = serde_json::from_str(&json)?;

			if config.needs_migration() {
				info!(
					"Migrating config from v{} to v{}",
					config.version,
					Self::target_version()
				);
				config.migrate()?;
				config.save()?;
			}

			Ok(config)
		} else {
			warn!("No config found, creating default at {:?}", config_path);
			let config = Self::default_with_dir(data_dir.to_path_buf());
			config.save()?;
			Ok(config)
		}
	}

	/// Create default configuration with specific data directory
	pub fn default_with_dir(data_dir: PathBuf) -> Self {
		Self {
			version: Self::target_version(),
			data_dir,
			log_level: "info,facestat=debug".to_string(),
			listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
			database_url: None,
			analyzer: AnalyzerConfig::default(),
			storage: StorageConfig::default(),
			docs_auth: DocsAuthConfig::default(),
		}
	}

	/// Save configuration to disk
	pub fn save(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;

		let config_path = self.data_dir.join(CONFIG_FILE_NAME);
		let json = serde_json::to_string_pretty(self)?;
		fs::write(&config_path, json)?;
		info!("Saved config to {:?}", config_path);
		Ok(())
	}

	/// Get the path for logs directory
	pub fn logs_dir(&self) -> PathBuf {
		self.data_dir.join("logs")
	}

	/// Get the directory uploaded images are written to
	pub fn images_dir(&self) -> PathBuf {
		self.storage
			.images_dir
			.clone()
			.unwrap_or_else(|| self.data_dir.join("images"))
	}

	pub fn database_path(&self) -> PathBuf {
		self.data_dir.join(DATABASE_FILE_NAME)
	}

	/// Ensure all required directories exist
	pub fn ensure_directories(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;
		fs::create_dir_all(self.logs_dir())?;
		fs::create_dir_all(self.images_dir())?;
		Ok(())
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		let data_dir = default_data_dir().unwrap_or_else(|_| PathBuf::from("."));
		Self::default_with_dir(data_dir)
	}
}

impl Migrate for AppConfig {
	fn current_version(&self) -> u32 {
		self.version
	}

	fn target_version() -> u32 {
		1
	}

	fn migrate(&mut self) -> Result<()> {
		match self.version {
			0 => {
				// v0 had no storage/docs sections; serde defaults already filled them in
				self.version = 1;
				Ok(())
			}
			1 => Ok(()),
			v => Err(anyhow!("Unknown config version: {}", v)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn missing_config_is_created_with_defaults() {
		let temp = TempDir::new().unwrap();

		let config = AppConfig::load_from(temp.path()).unwrap();

		assert_eq!(config.version, AppConfig::target_version());
		assert!(temp.path().join(CONFIG_FILE_NAME).exists());
		assert_eq!(config.images_dir(), temp.path().join("images"));
		assert_eq!(config.database_path(), temp.path().join("facestat.db"));
	}

	#[test]
	fn saved_config_is_loaded_back() {
		let temp = TempDir::new().unwrap();
		let mut config = AppConfig::default_with_dir(temp.path().to_path_buf());
		config.analyzer.api_host = "https://analyzer.test".to_string();
		config.docs_auth.username = "docs".to_string();
		config.storage.io_timeout_secs = 3;
		config.save().unwrap();

		let loaded = AppConfig::load_from(temp.path()).unwrap();

		assert_eq!(loaded.analyzer.api_host, "https://analyzer.test");
		assert_eq!(loaded.docs_auth.username, "docs");
		assert_eq!(loaded.storage.io_timeout_secs, 3);
	}

	#[test]
	fn v0_config_is_migrated() {
		let temp = TempDir::new().unwrap();
		let legacy = serde_json::json!({
			"version": 0,
			"data_dir": temp.path(),
			"log_level": "info",
			"listen_addr": "127.0.0.1:9999",
		});
		fs::write(temp.path().join(CONFIG_FILE_NAME), legacy.to_string()).unwrap();

		let config = AppConfig::load_from(temp.path()).unwrap();

		assert_eq!(config.version, 1);
		assert_eq!(config.listen_addr.port(), 9999);
		assert_eq!(config.docs_auth.username, "admin");
		assert_eq!(config.storage.max_upload_bytes, 20 * 1024 * 1024);
	}

	#[test]
	fn partial_sections_fall_back_to_defaults() {
		let temp = TempDir::new().unwrap();
		let partial = serde_json::json!({
			"version": 1,
			"data_dir": temp.path(),
			"log_level": "info",
			"listen_addr": "0.0.0.0:8080",
			"analyzer": { "api_host": "https://analyzer.test" },
			"storage": { "images_dir": "/srv/images" },
			"docs_auth": { "username": "docs" },
		});
		fs::write(temp.path().join(CONFIG_FILE_NAME), partial.to_string()).unwrap();

		let config = AppConfig::load_from(temp.path()).unwrap();

		assert_eq!(config.analyzer.api_host, "https://analyzer.test");
		assert_eq!(config.analyzer.timeout_secs, 30);
		assert_eq!(config.images_dir(), PathBuf::from("/srv/images"));
		assert_eq!(config.storage.io_timeout_secs, 10);
		assert_eq!(config.storage.max_upload_bytes, 20 * 1024 * 1024);
		assert_eq!(config.docs_auth.username, "docs");
		assert_eq!(config.docs_auth.password, "admin");
	}

	#[test]
	fn unknown_version_is_rejected() {
		let mut config = AppConfig::default_with_dir(PathBuf::from("."));
		config.version = 7;
		assert!(config.migrate().is_err());
	}
}
