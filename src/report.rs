//! The persisted outcome of a prediction and its history form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{
    OffsetDateTime, format_description::FormatItem, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::features::FeatureVector;

/// Layout version written alongside every persisted report.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const ISO_MILLIS: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);
const DISPLAY_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Result of one successful prediction call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    /// ISO-8601 UTC creation time with millisecond precision.
    pub timestamp: String,
    pub inputs: FeatureVector,
    /// Binary class label returned by the service (0 or 1).
    pub prediction: u8,
    /// Probability of the positive class, in `[0, 1]`.
    pub probability: f64,
    /// Opaque service metadata (feature importances, ROC points, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// One service-provided feature ranking entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// One point of a ROC curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

impl PredictionReport {
    pub fn new(
        inputs: FeatureVector,
        prediction: u8,
        probability: f64,
        raw: Option<Value>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            timestamp: iso_timestamp(created_at),
            inputs,
            prediction,
            probability,
            raw,
        }
    }

    /// Probability as a whole percentage, rounded half away from zero.
    pub fn percent(&self) -> i64 {
        percent_of(self.probability)
    }

    pub fn created_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(self.timestamp.trim(), &Rfc3339).ok()
    }

    /// Milliseconds since the Unix epoch of the creation time, when parsable.
    pub fn epoch_millis(&self) -> Option<i64> {
        self.created_at().map(epoch_millis)
    }

    /// Local, human-readable creation time; the raw string when unparsable.
    pub fn display_timestamp(&self) -> String {
        self.created_at()
            .and_then(|at| {
                let offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
                at.to_offset(offset).format(DISPLAY_FORMAT).ok()
            })
            .unwrap_or_else(|| self.timestamp.clone())
    }

    /// Service-provided feature importances, if the raw payload carries any.
    ///
    /// Entries without a string `feature` are skipped; a missing or
    /// non-numeric `importance` counts as zero.
    pub fn feature_importances(&self) -> Vec<FeatureImportance> {
        let Some(entries) = self
            .raw
            .as_ref()
            .and_then(|raw| raw.get("feature_importances"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| {
                let feature = entry.get("feature")?.as_str()?.to_string();
                let importance = entry
                    .get("importance")
                    .and_then(number_of)
                    .filter(|value| value.is_finite())
                    .unwrap_or(0.0);
                Some(FeatureImportance {
                    feature,
                    importance,
                })
            })
            .collect()
    }

    /// Service-provided ROC points, if the raw payload carries any.
    pub fn roc_points(&self) -> Vec<RocPoint> {
        let Some(entries) = self
            .raw
            .as_ref()
            .and_then(|raw| raw.get("roc"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| {
                Some(RocPoint {
                    fpr: entry.get("fpr").and_then(number_of)?,
                    tpr: entry.get("tpr").and_then(number_of)?,
                })
            })
            .collect()
    }

    /// Pretty-printed raw payload for the "Model details" panels.
    pub fn raw_pretty(&self) -> Option<String> {
        self.raw
            .as_ref()
            .filter(|raw| !raw.is_null())
            .and_then(|raw| serde_json::to_string_pretty(raw).ok())
    }
}

/// A report copied into the history log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub report: PredictionReport,
    #[serde(rename = "savedAt")]
    pub saved_at: String,
}

impl HistoryEntry {
    pub fn new(report: PredictionReport, saved_at: OffsetDateTime) -> Self {
        Self {
            report,
            saved_at: iso_timestamp(saved_at),
        }
    }
}

/// Envelope used on disk so layout changes are detected instead of misread.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoredReport {
    #[serde(rename = "schemaVersion", default = "legacy_schema_version")]
    pub(crate) schema_version: u32,
    #[serde(flatten)]
    pub(crate) report: PredictionReport,
}

fn legacy_schema_version() -> u32 {
    1
}

/// Format a time the way browsers print `Date.toISOString()`.
pub fn iso_timestamp(at: OffsetDateTime) -> String {
    let utc = at.to_offset(time::UtcOffset::UTC);
    utc.format(ISO_MILLIS)
        .unwrap_or_else(|_| utc.unix_timestamp().to_string())
}

pub fn epoch_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn percent_of(probability: f64) -> i64 {
    if probability.is_finite() {
        (probability * 100.0).round() as i64
    } else {
        0
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PatientInputs;
    use serde_json::json;

    fn report_with_raw(raw: Option<Value>) -> PredictionReport {
        PredictionReport::new(
            FeatureVector::from_inputs(&PatientInputs::default()),
            1,
            0.82,
            raw,
            OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
        )
    }

    #[test]
    fn timestamp_matches_browser_iso_format() {
        let report = report_with_raw(None);
        assert_eq!(report.timestamp, "2023-11-14T22:13:20.000Z");
        assert_eq!(report.epoch_millis(), Some(1_700_000_000_000));
    }

    #[test]
    fn percent_rounds_probability() {
        let mut report = report_with_raw(None);
        assert_eq!(report.percent(), 82);
        report.probability = 0.826;
        assert_eq!(report.percent(), 83);
        report.probability = f64::NAN;
        assert_eq!(report.percent(), 0);
    }

    #[test]
    fn importances_skip_entries_without_feature_names() {
        let report = report_with_raw(Some(json!({
            "feature_importances": [
                {"feature": "chol", "importance": 0.3},
                {"importance": 0.9},
                {"feature": "age"},
                {"feature": "ca", "importance": "0.12"}
            ]
        })));
        let importances = report.feature_importances();
        assert_eq!(importances.len(), 3);
        assert_eq!(importances[0].feature, "chol");
        assert_eq!(importances[1].importance, 0.0);
        assert_eq!(importances[2].importance, 0.12);
    }

    #[test]
    fn roc_points_require_both_coordinates() {
        let report = report_with_raw(Some(json!({
            "roc": [{"fpr": 0.0, "tpr": 0.0}, {"fpr": 0.5}, {"fpr": 1.0, "tpr": 1.0}]
        })));
        assert_eq!(report.roc_points().len(), 2);
    }

    #[test]
    fn history_entry_serializes_flat_with_saved_at() {
        let entry = HistoryEntry::new(
            report_with_raw(None),
            OffsetDateTime::from_unix_timestamp(1_700_000_060).unwrap(),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["savedAt"], "2023-11-14T22:14:20.000Z");
        assert_eq!(json["probability"], 0.82);
        assert!(json.get("report").is_none());
    }

    #[test]
    fn unversioned_layout_reads_as_schema_one() {
        let text = r#"{"timestamp":"2024-01-01T00:00:00.000Z","inputs":{"age":54,"sex":1,"cp":0,"trestbps":130,"chol":246,"fbs":0,"restecg":0,"thalch":149,"exang":0,"oldpeak":1,"slope":1,"ca":0,"thal":1,"dataset":0},"prediction":1,"probability":0.82,"raw":null}"#;
        let stored: StoredReport = serde_json::from_str(text).unwrap();
        assert_eq!(stored.schema_version, 1);
        assert_eq!(stored.report.inputs.chol, 246.0);
        assert!(stored.report.raw.is_none());
    }
}
