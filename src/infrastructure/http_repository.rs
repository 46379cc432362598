// HTTP-backed snapshot repository
use crate::application::snapshot_repository::SnapshotRepository;
use crate::domain::logs::LogKind;
use crate::infrastructure::config::prepare_template;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct HttpSnapshotRepository {
    base_url: String,
    file_template: String,
    client: reqwest::Client,
}

impl HttpSnapshotRepository {
    pub fn new(base_url: String, file_template: String, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            file_template,
            client,
        }
    }

    fn build_snapshot_url(&self, kind: LogKind) -> String {
        let mut vars = HashMap::new();
        vars.insert("kind".to_string(), kind.stem().to_string());
        let file_name = prepare_template(&self.file_template, &vars);
        format!("{}/{}", self.base_url, urlencoding::encode(&file_name))
    }
}

#[async_trait]
impl SnapshotRepository for HttpSnapshotRepository {
    async fn fetch_snapshot(&self, kind: LogKind) -> Result<String> {
        let url = self.build_snapshot_url(kind);
        tracing::debug!("Fetching {} snapshot from {}", kind, url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "text/csv")
            .send()
            .await
            .with_context(|| format!("Failed to send request for {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Snapshot request {} failed with status {}: {}", url, status, body);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read snapshot body from {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_snapshot_url() {
        let repo = HttpSnapshotRepository::new(
            "http://localhost:5173/src/data/".to_string(),
            "${kind}_export.csv".to_string(),
            reqwest::Client::new(),
        );

        assert_eq!(
            repo.build_snapshot_url(LogKind::JointData),
            "http://localhost:5173/src/data/JointData_export.csv"
        );
    }

    #[test]
    fn test_file_name_is_encoded() {
        let repo = HttpSnapshotRepository::new(
            "http://fleet.local".to_string(),
            "${kind} export.csv".to_string(),
            reqwest::Client::new(),
        );

        assert_eq!(
            repo.build_snapshot_url(LogKind::Robot),
            "http://fleet.local/Robot%20export.csv"
        );
    }
}
