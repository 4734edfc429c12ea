//! Lead records as pretty-printed JSON, one file per session at
//! `{data_dir}/leads/{stem}.json`.

use std::path::PathBuf;

use serde_json::Value;

use helpline_core::storage::fs::FileSystem;
use helpline_core::storage::lead_store::LeadStore;
use helpline_types::error::StoreError;
use helpline_types::lead::{LeadRecord, RequiredFields};
use helpline_types::session::SessionId;

use crate::filesystem::LocalFileSystem;

pub struct FileLeadStore<F = LocalFileSystem> {
    fs: F,
    data_dir: PathBuf,
}

impl<F: FileSystem> FileLeadStore<F> {
    pub fn new(fs: F, data_dir: PathBuf) -> Self {
        Self { fs, data_dir }
    }

    fn path(&self, session: &SessionId) -> PathBuf {
        LocalFileSystem::lead_path(&self.data_dir, session)
    }
}

impl<F: FileSystem> LeadStore for FileLeadStore<F> {
    async fn load(&self, session: &SessionId, fields: &RequiredFields) -> LeadRecord {
        let path = self.path(session);
        if !self.fs.exists(&path).await {
            return LeadRecord::empty(fields);
        }

        let content = match self.fs.read_file(&path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable lead record, starting empty");
                return LeadRecord::empty(fields);
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(value @ Value::Object(_)) => LeadRecord::from_json_value(&value, fields),
            Ok(_) => {
                tracing::warn!(path = %path.display(), "lead record is not a JSON object, starting empty");
                LeadRecord::empty(fields)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt lead record, starting empty");
                LeadRecord::empty(fields)
            }
        }
    }

    async fn save(&self, session: &SessionId, record: &LeadRecord) -> Result<(), StoreError> {
        let path = self.path(session);
        let json = serde_json::to_string_pretty(record)?;
        self.fs.write_file(&path, &json).await?;
        tracing::debug!(path = %path.display(), "lead record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> FileLeadStore {
        FileLeadStore::new(LocalFileSystem::new(), tmp.path().to_path_buf())
    }

    #[tokio::test]
    async fn test_load_missing_is_empty_template() {
        let tmp = TempDir::new().unwrap();
        let fields = RequiredFields::default();
        let record = store(&tmp)
            .load(&SessionId::new("fresh").unwrap(), &fields)
            .await;
        assert_eq!(record, LeadRecord::empty(&fields));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let fields = RequiredFields::default();
        let session = SessionId::new("s-1").unwrap();
        let s = store(&tmp);

        let mut record = LeadRecord::empty(&fields);
        record.set("company_name", "Acme");
        s.save(&session, &record).await.unwrap();

        let loaded = s.load(&session, &fields).await;
        assert_eq!(loaded.get("company_name"), "Acme");
        assert_eq!(loaded.get("team_size"), "");

        let on_disk = std::fs::read_to_string(tmp.path().join("leads/s-1.json")).unwrap();
        assert!(on_disk.contains("\n  \"company_name\": \"Acme\""));
    }

    #[tokio::test]
    async fn test_corrupt_file_yields_empty() {
        let tmp = TempDir::new().unwrap();
        let fields = RequiredFields::default();
        std::fs::create_dir_all(tmp.path().join("leads")).unwrap();
        std::fs::write(tmp.path().join("leads/bad.json"), "{ not json").unwrap();
        std::fs::write(tmp.path().join("leads/list.json"), "[1, 2]").unwrap();

        let s = store(&tmp);
        for id in ["bad", "list"] {
            let record = s.load(&SessionId::new(id).unwrap(), &fields).await;
            assert_eq!(record, LeadRecord::empty(&fields));
        }
    }

    #[tokio::test]
    async fn test_non_string_values_coerced_on_load() {
        let tmp = TempDir::new().unwrap();
        let fields = RequiredFields::default();
        std::fs::create_dir_all(tmp.path().join("leads")).unwrap();
        std::fs::write(
            tmp.path().join("leads/n.json"),
            r#"{"company_name": "Acme", "team_size": 8, "note": null}"#,
        )
        .unwrap();

        let record = store(&tmp).load(&SessionId::new("n").unwrap(), &fields).await;
        assert_eq!(record.get("team_size"), "8");
        assert_eq!(record.get("note"), "");
    }

    #[tokio::test]
    async fn test_session_key_is_sanitized() {
        let tmp = TempDir::new().unwrap();
        let fields = RequiredFields::default();
        let session = SessionId::new("../escape").unwrap();
        store(&tmp)
            .save(&session, &LeadRecord::empty(&fields))
            .await
            .unwrap();
        assert!(tmp.path().join("leads/%2E%2E%2Fescape.json").exists());
        assert!(!tmp.path().join("escape.json").exists());
    }

    #[tokio::test]
    async fn test_lookalike_sessions_keep_separate_records() {
        let tmp = TempDir::new().unwrap();
        let fields = RequiredFields::default();
        let s = store(&tmp);
        let email = SessionId::new("user@example.com").unwrap();
        let underscored = SessionId::new("user_example_com").unwrap();

        let mut record = LeadRecord::empty(&fields);
        record.set("company_name", "Acme");
        s.save(&email, &record).await.unwrap();

        let other = s.load(&underscored, &fields).await;
        assert_eq!(other, LeadRecord::empty(&fields));
        assert_eq!(s.load(&email, &fields).await.get("company_name"), "Acme");
    }
}
