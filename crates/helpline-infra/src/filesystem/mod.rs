//! Filesystem adapters for Helpline.
//!
//! Implements the `FileSystem` trait from `helpline-core` for real filesystem
//! I/O, plus the data-directory layout shared by the stores.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use helpline_core::storage::fs::FileSystem;
use helpline_types::session::SessionId;

/// Local filesystem implementation of the `FileSystem` trait.
///
/// All operations go through `tokio::fs` for async I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }

    /// `{data_dir}/leads/`
    pub fn leads_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("leads")
    }

    /// `{data_dir}/leads/{stem}.json`
    pub fn lead_path(data_dir: &Path, session: &SessionId) -> PathBuf {
        Self::leads_dir(data_dir).join(format!("{}.json", session.file_stem()))
    }

    /// `{data_dir}/feature_requests/`
    pub fn feature_requests_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("feature_requests")
    }

    /// `{data_dir}/feature_requests/{stem}.txt`
    pub fn feature_request_path(data_dir: &Path, session: &SessionId) -> PathBuf {
        Self::feature_requests_dir(data_dir).join(format!("{}.txt", session.file_stem()))
    }

    /// Knowledge directory; relative `kb_dir` values resolve against `data_dir`.
    pub fn kb_dir(data_dir: &Path, kb_dir: &str) -> PathBuf {
        let kb = Path::new(kb_dir);
        if kb.is_absolute() {
            kb.to_path_buf()
        } else {
            data_dir.join(kb)
        }
    }
}

impl FileSystem for LocalFileSystem {
    async fn write_file(&self, path: &Path, content: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await
    }

    async fn append_file(&self, path: &Path, content: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await
    }

    async fn read_file(&self, path: &Path) -> Result<String, std::io::Error> {
        tokio::fs::read_to_string(path).await
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

/// Resolve the data directory.
///
/// Priority:
/// 1. `HELPLINE_DATA_DIR` environment variable
/// 2. `~/.helpline`
/// 3. `./.helpline`
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_with(|key| std::env::var(key).ok(), dirs::home_dir())
}

/// [`resolve_data_dir`] with the environment and home directory supplied.
pub fn resolve_data_dir_with<L>(lookup: L, home: Option<PathBuf>) -> PathBuf
where
    L: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup("HELPLINE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = home {
        return home.join(".helpline");
    }

    PathBuf::from(".helpline")
}
