// Directory-backed snapshot repository
use crate::application::snapshot_repository::SnapshotRepository;
use crate::domain::logs::LogKind;
use crate::infrastructure::config::prepare_template;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSnapshotRepository {
    directory: PathBuf,
    file_template: String,
}

impl FileSnapshotRepository {
    pub fn new(directory: impl Into<PathBuf>, file_template: String) -> Self {
        Self {
            directory: directory.into(),
            file_template,
        }
    }

    fn snapshot_path(&self, kind: LogKind) -> PathBuf {
        let mut vars = HashMap::new();
        vars.insert("kind".to_string(), kind.stem().to_string());
        self.directory.join(prepare_template(&self.file_template, &vars))
    }
}

#[async_trait]
impl SnapshotRepository for FileSnapshotRepository {
    async fn fetch_snapshot(&self, kind: LogKind) -> Result<String> {
        let path = self.snapshot_path(kind);
        tracing::debug!("Reading {} snapshot from {}", kind, path.display());

        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_templated_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Robot_export.csv"), "id,name\n1,Atlas").unwrap();

        let repo = FileSnapshotRepository::new(dir.path(), "${kind}_export.csv".to_string());
        let text = repo.fetch_snapshot(LogKind::Robot).await.unwrap();

        assert_eq!(text, "id,name\n1,Atlas");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path(), "${kind}_export.csv".to_string());

        let err = repo.fetch_snapshot(LogKind::PathLog).await.unwrap_err();
        assert!(err.to_string().contains("PathLog_export.csv"));
    }
}
