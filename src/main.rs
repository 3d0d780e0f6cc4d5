use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::{net::TcpListener, signal};
use tracing::info;

use facestat::{
	api::{self, BasicCredentials},
	config::AppConfig,
	infra::{analyzer::AnalyzerClient, db::Database, logging, storage::ImageStorage},
	TaskContext,
};

#[derive(Parser)]
#[command(name = "facestat")]
#[command(about = "Task server analyzing uploaded photos for faces", long_about = None)]
struct Cli {
	/// Data directory holding the config, database, images and logs
	#[arg(long, env = "DATA_DIR")]
	data_dir: Option<PathBuf>,

	/// Port to listen on, overrides the configured listen address port
	#[arg(long, env = "PORT")]
	port: Option<u16>,

	#[arg(long, env = "DATABASE_URL")]
	database_url: Option<String>,

	#[arg(long, env = "ANALYZER_HOST")]
	analyzer_host: Option<String>,

	#[arg(long, env = "ANALYZER_EMAIL")]
	analyzer_email: Option<String>,

	#[arg(long, env = "ANALYZER_PASSWORD", hide_env_values = true)]
	analyzer_password: Option<String>,

	#[arg(long, env = "DOCS_USERNAME")]
	docs_user: Option<String>,

	#[arg(long, env = "DOCS_PASSWORD", hide_env_values = true)]
	docs_password: Option<String>,
}

impl Cli {
	fn apply(self, config: &mut AppConfig) {
		if let Some(port) = self.port {
			config.listen_addr.set_port(port);
		}
		if let Some(url) = self.database_url {
			config.database_url = Some(url);
		}
		if let Some(host) = self.analyzer_host {
			config.analyzer.api_host = host;
		}
		if let Some(email) = self.analyzer_email {
			config.analyzer.email = email;
		}
		if let Some(password) = self.analyzer_password {
			config.analyzer.password = password;
		}
		if let Some(username) = self.docs_user {
			config.docs_auth.username = username;
		}
		if let Some(password) = self.docs_password {
			config.docs_auth.password = password;
		}
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let mut config = match &cli.data_dir {
		Some(data_dir) => AppConfig::load_from(data_dir)?,
		None => AppConfig::load()?,
	};
	cli.apply(&mut config);
	config.ensure_directories()?;

	let _log_guard = logging::init_tracing(&config.logs_dir(), &config.log_level)?;
	info!("Data directory: {:?}", config.data_dir);

	let db = match &config.database_url {
		Some(url) => Database::connect(url.as_str()).await?,
		None => Database::create(&config.database_path()).await?,
	};
	db.migrate().await?;

	// Authenticate once; the token lives as long as the process
	let analyzer = AnalyzerClient::login(&config.analyzer)
		.await
		.context("Failed to authenticate with the face analysis service")?;

	let storage = ImageStorage::new(
		config.images_dir(),
		Duration::from_secs(config.storage.io_timeout_secs),
	);

	let ctx = TaskContext::new(db.conn().clone(), Arc::new(analyzer), storage);
	let app = api::create_router(
		ctx,
		BasicCredentials::from(&config.docs_auth),
		config.storage.max_upload_bytes,
	);

	let listener = TcpListener::bind(config.listen_addr).await?;
	info!("Listening on http://{}", listener.local_addr()?);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.context("HTTP server error")?;

	info!("Server stopped");
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		signal::ctrl_c()
			.await
			.expect("failed to install Ctrl+C handler");
	};

	#[cfg(unix)]
	let terminate = async {
		signal::unix::signal(signal::unix::SignalKind::terminate())
			.expect("failed to install signal handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	info!("Shutting down HTTP server");
}
