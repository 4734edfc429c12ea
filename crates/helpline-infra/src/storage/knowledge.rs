//! Knowledge corpus loader.

use std::path::Path;

use helpline_types::error::StoreError;
use helpline_types::knowledge::KnowledgeDocument;

/// Load every `*.txt` file (extension case-insensitive) directly under `dir`,
/// sorted by file name.
///
/// A missing directory yields an empty corpus. Files that are not valid UTF-8
/// are skipped with a warning.
pub async fn load_corpus(dir: &Path) -> Result<Vec<KnowledgeDocument>, StoreError> {
    if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
        tracing::info!(path = %dir.display(), "knowledge directory not found, corpus is empty");
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.to_lowercase().ends_with(".txt") {
            continue;
        }
        if entry.file_type().await?.is_file() {
            names.push(name);
        }
    }
    names.sort();

    let mut documents = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(&name);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => documents.push(KnowledgeDocument::new(name, text)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable knowledge file")
            }
        }
    }

    tracing::info!(path = %dir.display(), documents = documents.len(), "knowledge corpus loaded");
    Ok(documents)
}
