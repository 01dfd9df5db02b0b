use tracing::{debug, warn};
use url::Url;

use super::{
    HealthStatus, MAX_RESPONSE_BYTES, PredictError, PredictResponse, PredictionService,
    parse_predict_response,
};
use crate::config::{ConfigError, ServiceSettings};
use crate::features::FeatureVector;
use crate::http_client;

const PREDICT_PATH: &str = "predict";
const HEALTH_PATH: &str = "openapi.json";

/// [`PredictionService`] speaking JSON over HTTP.
pub struct HttpPredictionService {
    agent: ureq::Agent,
    predict_url: Url,
    health_url: Url,
}

impl HttpPredictionService {
    pub fn new(settings: &ServiceSettings) -> Result<Self, ConfigError> {
        let base = settings.base()?;
        let join = |path: &str| {
            base.join(path).map_err(|source| ConfigError::InvalidUrl {
                url: settings.base_url.clone(),
                source,
            })
        };
        Ok(Self {
            agent: http_client::agent_for(settings),
            predict_url: join(PREDICT_PATH)?,
            health_url: join(HEALTH_PATH)?,
        })
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

impl PredictionService for HttpPredictionService {
    fn predict(&self, features: &FeatureVector) -> Result<PredictResponse, PredictError> {
        let request = self
            .agent
            .post(self.predict_url.as_str())
            .set("Accept", "application/json");
        let response = match request.send_json(features) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = http_client::read_error_body(response, MAX_RESPONSE_BYTES);
                warn!("Prediction request failed with HTTP {code}");
                return Err(PredictError::Status { code, body });
            }
            Err(ureq::Error::Transport(err)) => {
                warn!("Prediction service unreachable: {err}");
                return Err(PredictError::Unreachable(err.to_string()));
            }
        };
        let body = http_client::read_response_bytes(response, MAX_RESPONSE_BYTES)
            .map_err(|err| PredictError::Malformed(err.to_string()))?;
        parse_predict_response(&body)
    }

    fn probe_health(&self) -> HealthStatus {
        match self.agent.get(self.health_url.as_str()).call() {
            Ok(response) if (200..300).contains(&response.status()) => HealthStatus::Up,
            Ok(response) => {
                debug!("Health probe returned HTTP {}", response.status());
                HealthStatus::Down
            }
            Err(err) => {
                debug!("Health probe failed: {err}");
                HealthStatus::Down
            }
        }
    }
}
