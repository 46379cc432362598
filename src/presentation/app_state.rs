// Application state shared by command handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::fleet_api::FleetApi;
use crate::application::health_service::HealthService;
use crate::application::loader::SnapshotLoader;
use crate::application::operations_service::OperationsService;
use crate::application::prediction_service::PredictionService;
use crate::application::robots_service::RobotsService;
use crate::application::snapshot_repository::SnapshotRepository;
use crate::application::synthesizer::FallbackSynthesizer;
use crate::infrastructure::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub loader: SnapshotLoader,
    pub dashboard_service: DashboardService,
    pub robots_service: RobotsService,
    pub health_service: HealthService,
    pub prediction_service: PredictionService,
    pub operations_service: OperationsService,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn SnapshotRepository>,
        api: Arc<dyn FleetApi>,
        config: &AppConfig,
    ) -> Self {
        let loader = SnapshotLoader::new(repository);
        let synthesizer = Arc::new(FallbackSynthesizer::new());

        Self {
            dashboard_service: DashboardService::new(loader.clone(), synthesizer.clone()),
            robots_service: RobotsService::new(loader.clone(), api.clone()),
            health_service: HealthService::new(loader.clone(), config.health.recent_logs),
            prediction_service: PredictionService::new(
                loader.clone(),
                synthesizer,
                config.predictions.clone(),
            ),
            operations_service: OperationsService::new(api, &config.api),
            loader,
        }
    }
}
