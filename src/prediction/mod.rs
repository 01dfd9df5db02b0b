//! Boundary to the out-of-process prediction service.

mod http;

pub use http::HttpPredictionService;

use serde_json::Value;

use crate::features::FeatureVector;

/// Upper bound on any response body read from the service.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// A validated prediction returned by the service.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictResponse {
    pub prediction: u8,
    pub probability: f64,
    /// Opaque metadata, kept verbatim for display.
    pub raw: Option<Value>,
}

/// Why a prediction could not be obtained.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("Prediction service unreachable: {0}")]
    Unreachable(String),
    #[error("{}", status_text(.code, .body))]
    Status { code: u16, body: String },
    #[error("Malformed prediction response: {0}")]
    Malformed(String),
}

fn status_text(code: &u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("HTTP {code}")
    } else {
        body.to_string()
    }
}

/// Reachability of the service as last observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Up,
    Down,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Backend: ...",
            Self::Up => "Backend: Connected",
            Self::Down => "Backend: Down",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Unknown => "Checking backend...",
            Self::Up => "Backend connected",
            Self::Down => "Backend not reachable",
        }
    }
}

/// Narrow interface the UI and CLI use to reach the prediction model.
pub trait PredictionService: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<PredictResponse, PredictError>;

    fn probe_health(&self) -> HealthStatus;
}

/// Validate a decoded response body.
pub fn parse_predict_response(body: &[u8]) -> Result<PredictResponse, PredictError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| PredictError::Malformed(format!("body is not JSON: {err}")))?;
    let Value::Object(map) = value else {
        return Err(PredictError::Malformed("body is not a JSON object".into()));
    };
    let prediction = match map.get("prediction").and_then(Value::as_f64) {
        Some(label) if label == 0.0 => 0,
        Some(label) if label == 1.0 => 1,
        Some(label) => {
            return Err(PredictError::Malformed(format!(
                "prediction must be 0 or 1, got {label}"
            )));
        }
        None => {
            return Err(PredictError::Malformed(
                "prediction is missing or not a number".into(),
            ));
        }
    };
    let probability = map
        .get("probability")
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            PredictError::Malformed("probability is missing or not a number".into())
        })?;
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(PredictError::Malformed(format!(
            "probability {probability} is outside [0, 1]"
        )));
    }
    let raw = map.get("raw").filter(|raw| !raw.is_null()).cloned();
    Ok(PredictResponse {
        prediction,
        probability,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimal_response() {
        let parsed = parse_predict_response(br#"{"prediction":1,"probability":0.82}"#).unwrap();
        assert_eq!(parsed.prediction, 1);
        assert_eq!(parsed.probability, 0.82);
        assert!(parsed.raw.is_none());
    }

    #[test]
    fn keeps_raw_payload_and_drops_null() {
        let parsed = parse_predict_response(
            br#"{"prediction":0,"probability":0.1,"raw":{"used_order":["age"]}}"#,
        )
        .unwrap();
        assert_eq!(parsed.raw.unwrap()["used_order"][0], "age");
        let parsed =
            parse_predict_response(br#"{"prediction":0,"probability":0.1,"raw":null}"#).unwrap();
        assert!(parsed.raw.is_none());
    }

    #[test]
    fn rejects_out_of_range_values() {
        for body in [
            r#"{"prediction":2,"probability":0.5}"#,
            r#"{"prediction":1,"probability":1.5}"#,
            r#"{"prediction":1}"#,
            r#"{"probability":0.5}"#,
            r#"[1, 0.5]"#,
            "not json",
        ] {
            let err = parse_predict_response(body.as_bytes()).unwrap_err();
            assert!(matches!(err, PredictError::Malformed(_)), "{body}");
        }
    }

    #[test]
    fn status_error_displays_body_verbatim() {
        let err = PredictError::Status {
            code: 500,
            body: "{\"detail\":\"Model not loaded\"}".into(),
        };
        assert_eq!(err.to_string(), "{\"detail\":\"Model not loaded\"}");
        let err = PredictError::Status {
            code: 502,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 502");
    }
}
