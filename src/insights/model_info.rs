//! Data behind the "About the model" view.

use serde::Serialize;

use super::round3;
use crate::report::{FeatureImportance, RocPoint};
use crate::store::ReportSlot;

/// File name used when exporting the about data.
pub const EXPORT_FILE_NAME: &str = "model_info.json";

const MOCK_FEATURES: [&str; 8] = [
    "thalch", "oldpeak", "trestbps", "age", "chol", "ca", "thal", "cp",
];

const MOCK_ROC: [(f64, f64); 8] = [
    (0.0, 0.0),
    (0.05, 0.35),
    (0.1, 0.55),
    (0.2, 0.72),
    (0.3, 0.82),
    (0.4, 0.88),
    (0.6, 0.94),
    (1.0, 1.0),
];

/// Static description of the deployed model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub dataset: &'static str,
    pub trained_on: &'static str,
    pub notes: &'static str,
}

pub const MODEL_INFO: ModelInfo = ModelInfo {
    name: "RandomForestClassifier",
    dataset: "Heart Disease (cleaned)",
    trained_on: "Unknown",
    notes: "Model object loaded from saved pickle (the client does not have full training metrics).",
};

/// Placeholder importances used until the service supplies real ones.
pub fn mock_importances() -> Vec<FeatureImportance> {
    let count = MOCK_FEATURES.len() as f64;
    MOCK_FEATURES
        .iter()
        .enumerate()
        .map(|(idx, feature)| FeatureImportance {
            feature: (*feature).to_string(),
            importance: round3((count - idx as f64) / (count * 2.0)),
        })
        .collect()
}

/// Illustrative ROC curve.
pub fn mock_roc_points() -> Vec<RocPoint> {
    MOCK_ROC
        .iter()
        .map(|&(fpr, tpr)| RocPoint { fpr, tpr })
        .collect()
}

/// Area under a polyline by the trapezoidal rule, in point order.
pub fn trapezoid_auc(points: &[RocPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1].fpr - pair[0].fpr) * (pair[0].tpr + pair[1].tpr) / 2.0)
        .sum()
}

/// Everything the about view shows, with provenance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AboutData {
    #[serde(rename = "modelInfo")]
    pub model_info: ModelInfo,
    pub importances: Vec<FeatureImportance>,
    #[serde(rename = "roc")]
    pub roc_points: Vec<RocPoint>,
    /// Area under `roc_points`, rounded to three decimals.
    pub auc: Option<f64>,
    #[serde(skip)]
    pub importances_from_service: bool,
    #[serde(skip)]
    pub roc_from_service: bool,
}

impl AboutData {
    /// Prefer service metadata from the current report, else mock data.
    pub fn from_slot(slot: &ReportSlot) -> Self {
        let report = slot.report();
        let service_importances = report
            .map(|report| report.feature_importances())
            .unwrap_or_default();
        let service_roc = report.map(|report| report.roc_points()).unwrap_or_default();
        let importances_from_service = !service_importances.is_empty();
        let roc_from_service = !service_roc.is_empty();
        let importances = if importances_from_service {
            service_importances
        } else {
            mock_importances()
        };
        let roc_points = if roc_from_service {
            service_roc
        } else {
            mock_roc_points()
        };
        let auc = (roc_points.len() >= 2)
            .then(|| trapezoid_auc(&roc_points))
            .filter(|auc| auc.is_finite())
            .map(round3);
        Self {
            model_info: MODEL_INFO,
            importances,
            roc_points,
            auc,
            importances_from_service,
            roc_from_service,
        }
    }

    /// Pretty-printed JSON export.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureVector, PatientInputs};
    use crate::report::PredictionReport;
    use serde_json::json;
    use time::OffsetDateTime;

    fn slot_with_raw(raw: serde_json::Value) -> ReportSlot {
        ReportSlot::Present(PredictionReport::new(
            FeatureVector::from_inputs(&PatientInputs::default()),
            0,
            0.3,
            Some(raw),
            OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
        ))
    }

    #[test]
    fn mock_importances_descend_from_one_half() {
        let values: Vec<f64> = mock_importances().iter().map(|e| e.importance).collect();
        assert_eq!(
            values,
            vec![0.5, 0.438, 0.375, 0.313, 0.25, 0.188, 0.125, 0.063]
        );
    }

    #[test]
    fn mock_curve_area() {
        let auc = trapezoid_auc(&mock_roc_points());
        assert!((auc - 0.82675).abs() < 1e-9, "{auc}");
        assert_eq!(trapezoid_auc(&[]), 0.0);
    }

    #[test]
    fn empty_slot_uses_mock_data() {
        let about = AboutData::from_slot(&ReportSlot::Empty);
        assert!(!about.importances_from_service);
        assert!(!about.roc_from_service);
        assert_eq!(about.importances.len(), 8);
        assert!((about.auc.unwrap() - 0.827).abs() < 1e-9);
    }

    #[test]
    fn service_curve_gets_its_own_area() {
        let about = AboutData::from_slot(&slot_with_raw(json!({
            "roc": [{"fpr": 0.0, "tpr": 0.0}, {"fpr": 1.0, "tpr": 1.0}],
            "feature_importances": [{"feature": "age", "importance": 0.9}]
        })));
        assert!(about.roc_from_service);
        assert!(about.importances_from_service);
        assert_eq!(about.auc, Some(0.5));
        assert_eq!(about.importances[0].feature, "age");
    }

    #[test]
    fn export_uses_documented_keys() {
        let json: serde_json::Value =
            serde_json::from_str(&AboutData::from_slot(&ReportSlot::Empty).export_json().unwrap())
                .unwrap();
        assert_eq!(json["modelInfo"]["name"], "RandomForestClassifier");
        assert_eq!(json["roc"].as_array().unwrap().len(), 8);
        assert_eq!(json["importances"][0]["feature"], "thalch");
        assert!(json["auc"].is_number());
        assert!(json.get("roc_from_service").is_none());
    }
}
