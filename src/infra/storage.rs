//! Local disk storage for uploaded images

use std::{
	future::Future,
	io,
	path::{Path, PathBuf},
	time::Duration,
};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt, time::timeout};
use tracing::debug;
use uuid::Uuid;

/// Bytes handed to the file per write call
const WRITE_CHUNK_SIZE: usize = 64 * 1024;

const FALLBACK_FILE_NAME: &str = "image";

/// Longest part of the client file name kept in a stored path, in bytes.
/// Leaves room for `_<uuid>.jpeg` under the usual 255 byte name limit.
const MAX_KEPT_NAME_BYTES: usize = 100;

#[derive(Error, Debug)]
pub enum StorageError {
	#[error("I/O error at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("Timed out after {timeout:?} accessing {path}")]
	Timeout { path: PathBuf, timeout: Duration },
}

impl StorageError {
	fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
		move |source| Self::Io {
			path: path.to_path_buf(),
			source,
		}
	}
}

#[derive(Debug, Clone)]
pub struct ImageStorage {
	root: PathBuf,
	io_timeout: Duration,
}

impl ImageStorage {
	pub fn new(root: impl Into<PathBuf>, io_timeout: Duration) -> Self {
		Self {
			root: root.into(),
			io_timeout,
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Build a fresh `<root>/<file name>_<uuid>.jpeg` path for an upload.
	///
	/// Only the final component of the client supplied name is kept, so a name
	/// like `../../etc/passwd` cannot escape the storage root. It is cut to
	/// [`MAX_KEPT_NAME_BYTES`].
	pub fn generate_path(&self, original_name: Option<&str>) -> PathBuf {
		let file_name = original_name
			.and_then(|name| Path::new(name).file_name())
			.and_then(|name| name.to_str())
			.filter(|name| is_safe_path_segment(name))
			.map(|name| truncate_at_char_boundary(name, MAX_KEPT_NAME_BYTES))
			.unwrap_or(FALLBACK_FILE_NAME);

		self.root
			.join(format!("{}_{}.jpeg", file_name, Uuid::new_v4()))
	}

	/// Write `bytes` to `path`, creating parent directories as needed
	pub async fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
		self.with_timeout(path, async {
			if let Some(parent) = path.parent() {
				fs::create_dir_all(parent)
					.await
					.map_err(StorageError::io(parent))?;
			}

			let mut file = fs::File::create(path)
				.await
				.map_err(StorageError::io(path))?;
			for chunk in bytes.chunks(WRITE_CHUNK_SIZE) {
				file.write_all(chunk).await.map_err(StorageError::io(path))?;
			}
			file.sync_all().await.map_err(StorageError::io(path))?;

			debug!("Wrote {} bytes to {:?}", bytes.len(), path);
			Ok(())
		})
		.await
	}

	/// Remove the file at `path`. A missing file is an error.
	pub async fn remove(&self, path: &Path) -> Result<(), StorageError> {
		self.with_timeout(path, async {
			fs::remove_file(path).await.map_err(StorageError::io(path))?;
			debug!("Removed {:?}", path);
			Ok(())
		})
		.await
	}

	/// Remove the file at `path` if there is one
	pub async fn discard(&self, path: &Path) -> Result<(), StorageError> {
		match self.remove(path).await {
			Err(StorageError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
				Ok(())
			}
			result => result,
		}
	}

	async fn with_timeout<T>(
		&self,
		path: &Path,
		fut: impl Future<Output = Result<T, StorageError>>,
	) -> Result<T, StorageError> {
		timeout(self.io_timeout, fut)
			.await
			.map_err(|_| StorageError::Timeout {
				path: path.to_path_buf(),
				timeout: self.io_timeout,
			})?
	}
}

fn truncate_at_char_boundary(name: &str, max_bytes: usize) -> &str {
	if name.len() <= max_bytes {
		return name;
	}
	let mut end = max_bytes;
	while !name.is_char_boundary(end) {
		end -= 1;
	}
	&name[..end]
}

/// Rejects segments that are empty or contain traversal/separator characters
fn is_safe_path_segment(segment: &str) -> bool {
	!(segment.is_empty()
		|| segment == "."
		|| segment.contains("..")
		|| segment.contains('/')
		|| segment.contains('\\')
		|| segment.contains('\0'))
}
