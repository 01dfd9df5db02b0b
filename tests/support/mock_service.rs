use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use cardioai::features::FeatureVector;
use cardioai::prediction::{HealthStatus, PredictError, PredictResponse, PredictionService};

/// Prediction service that replays queued outcomes and records requests.
#[derive(Clone)]
pub struct ScriptedService {
    outcomes: Arc<Mutex<VecDeque<Result<PredictResponse, PredictError>>>>,
    requests: Arc<Mutex<Vec<FeatureVector>>>,
    health: HealthStatus,
}

impl ScriptedService {
    pub fn new(health: HealthStatus) -> Self {
        Self {
            outcomes: Arc::default(),
            requests: Arc::default(),
            health,
        }
    }

    pub fn push_ok(&self, prediction: u8, probability: f64, raw: Option<serde_json::Value>) {
        self.push(Ok(PredictResponse {
            prediction,
            probability,
            raw,
        }));
    }

    pub fn push(&self, outcome: Result<PredictResponse, PredictError>) {
        self.outcomes
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push_back(outcome);
    }

    pub fn requests(&self) -> Vec<FeatureVector> {
        self.requests
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }
}

impl PredictionService for ScriptedService {
    fn predict(&self, features: &FeatureVector) -> Result<PredictResponse, PredictError> {
        self.requests
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(features.clone());
        self.outcomes
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(PredictError::Unreachable("no scripted outcome".into())))
    }

    fn probe_health(&self) -> HealthStatus {
        self.health
    }
}
