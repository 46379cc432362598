// Repository trait for raw log snapshots
use crate::domain::logs::LogKind;
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Fetch the raw CSV export for one log kind
    async fn fetch_snapshot(&self, kind: LogKind) -> anyhow::Result<String>;
}
