// reqwest implementation of the fleet management API
use crate::application::fleet_api::{
    ApiError, ApiHealth, ApiRobot, Command, FleetApi, NewRobot, ScheduleUpdate, TelemetryEntry,
    UpdateJob,
};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpFleetApi {
    api_base: String,
    client: reqwest::Client,
}

impl HttpFleetApi {
    /// `base_url` is the service root; requests go to `{base_url}/api/...`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            api_base: format!("{}/api", base_url.trim_end_matches('/')),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl FleetApi for HttpFleetApi {
    async fn list_robots(&self) -> Result<Vec<ApiRobot>, ApiError> {
        self.get_json("/robots").await
    }

    async fn create_robot(&self, robot: &NewRobot) -> Result<ApiRobot, ApiError> {
        robot.validate()?;
        self.post_json("/robots", robot).await
    }

    async fn list_telemetry(&self, limit: usize) -> Result<Vec<TelemetryEntry>, ApiError> {
        self.get_json(&format!("/telemetry?limit={}", limit)).await
    }

    async fn list_update_jobs(&self, limit: usize) -> Result<Vec<UpdateJob>, ApiError> {
        self.get_json(&format!("/updates?limit={}", limit)).await
    }

    async fn schedule_update(&self, request: &ScheduleUpdate) -> Result<UpdateJob, ApiError> {
        self.post_json("/updates", request).await
    }

    async fn health(&self) -> Result<ApiHealth, ApiError> {
        self.get_json("/health").await
    }

    async fn send_command(&self, command: &Command) -> Result<serde_json::Value, ApiError> {
        self.post_json("/commands", command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_urls() {
        let api = HttpFleetApi::with_client("https://fleet.example.com/", reqwest::Client::new());

        assert_eq!(api.url("/robots"), "https://fleet.example.com/api/robots");
        assert_eq!(
            api.url(&format!("/updates?limit={}", 50)),
            "https://fleet.example.com/api/updates?limit=50"
        );
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_before_sending() {
        // Nothing listens here; validation must fail first.
        let api = HttpFleetApi::with_client("http://127.0.0.1:9", reqwest::Client::new());
        let robot = NewRobot {
            name: String::new(),
            firmware_version: "1.0.0".to_string(),
            status: "Offline".to_string(),
        };

        let err = api.create_robot(&robot).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
