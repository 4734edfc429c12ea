//! Feature requests as plain text, one line per request, one file per
//! session at `{data_dir}/feature_requests/{stem}.txt`.

use std::path::PathBuf;

use helpline_core::storage::feature_log::FeatureRequestLog;
use helpline_core::storage::fs::FileSystem;
use helpline_types::error::StoreError;
use helpline_types::session::SessionId;

use crate::filesystem::LocalFileSystem;

pub struct FileFeatureRequestLog<F = LocalFileSystem> {
    fs: F,
    data_dir: PathBuf,
}

impl<F: FileSystem> FileFeatureRequestLog<F> {
    pub fn new(fs: F, data_dir: PathBuf) -> Self {
        Self { fs, data_dir }
    }

    fn path(&self, session: &SessionId) -> PathBuf {
        LocalFileSystem::feature_request_path(&self.data_dir, session)
    }
}

impl<F: FileSystem> FeatureRequestLog for FileFeatureRequestLog<F> {
    async fn append(&self, session: &SessionId, text: &str) -> Result<(), StoreError> {
        let path = self.path(session);
        let entry = format!("{}\n", text.trim());
        self.fs.append_file(&path, &entry).await?;
        tracing::debug!(path = %path.display(), "feature request appended");
        Ok(())
    }

    async fn entries(&self, session: &SessionId) -> Result<Vec<String>, StoreError> {
        let path = self.path(session);
        if !self.fs.exists(&path).await {
            return Ok(Vec::new());
        }
        let content = self.fs.read_file(&path).await?;
        Ok(content.lines().map(str::to_string).collect())
    }
}
