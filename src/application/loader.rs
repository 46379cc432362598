// Snapshot loading - fetch, normalize and decode one log kind
use crate::application::snapshot_repository::SnapshotRepository;
use crate::domain::logs::LogKind;
use crate::domain::record::Record;
use crate::infrastructure::csv_normalizer;
use crate::infrastructure::schema::{FromRecord, decode};
use std::sync::Arc;

#[derive(Clone)]
pub struct SnapshotLoader {
    repository: Arc<dyn SnapshotRepository>,
}

impl SnapshotLoader {
    pub fn new(repository: Arc<dyn SnapshotRepository>) -> Self {
        Self { repository }
    }

    /// Normalized records for `kind`. A failed fetch degrades to no records.
    pub async fn load_records(&self, kind: LogKind) -> Vec<Record> {
        match self.repository.fetch_snapshot(kind).await {
            Ok(text) => {
                let records = csv_normalizer::parse(&text);
                tracing::debug!("Loaded {} {} records", records.len(), kind);
                records
            }
            Err(e) => {
                tracing::error!("Error fetching {} snapshot: {:#}", kind, e);
                Vec::new()
            }
        }
    }

    /// The `kind` export re-emitted as clean CSV.
    pub async fn normalized(&self, kind: LogKind) -> String {
        csv_normalizer::serialize(&self.load_records(kind).await)
    }

    pub async fn load<T: FromRecord>(&self) -> Vec<T> {
        let records = self.load_records(T::KIND).await;
        decode(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::snapshot_repository::testing::StaticSnapshots;
    use crate::domain::logs::HealthLog;
    use crate::domain::robot::Robot;

    #[tokio::test]
    async fn test_load_typed() {
        let repo = StaticSnapshots::new().with(LogKind::Robot, "id,name,status\nr1,Atlas-01,online");
        let loader = SnapshotLoader::new(Arc::new(repo));

        let robots: Vec<Robot> = loader.load().await;
        assert_eq!(robots.len(), 1);
        assert_eq!(robots[0].name.as_deref(), Some("Atlas-01"));
    }

    #[tokio::test]
    async fn test_normalized_export() {
        let repo = StaticSnapshots::new().with(LogKind::UpdateLog, "robot_id,status\r\nr1,\"done, ok\"\r\n");
        let loader = SnapshotLoader::new(Arc::new(repo));

        assert_eq!(loader.normalized(LogKind::UpdateLog).await, "robot_id,status\nr1,\"done, ok\"\n");
        assert_eq!(loader.normalized(LogKind::PathLog).await, "");
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_empty() {
        let loader = SnapshotLoader::new(Arc::new(StaticSnapshots::new()));

        let logs: Vec<HealthLog> = loader.load().await;
        assert!(logs.is_empty());
    }
}
