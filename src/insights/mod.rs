//! Pure helpers deriving display data from a report.

pub mod advice;
pub mod model_info;

use crate::report::PredictionReport;

/// Threshold at or above which risk is high.
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Threshold at or above which risk is moderate.
pub const MODERATE_RISK_THRESHOLD: f64 = 0.4;
/// Maximum number of bars in the factor chart.
pub const MAX_CHART_BARS: usize = 6;

/// Risk bucket for a predicted probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskCategory {
    Unknown,
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High (Critical)",
        }
    }

    /// One-sentence interpretation shown next to the gauge.
    pub fn summary(self) -> &'static str {
        match self {
            Self::High => "High predicted risk. Please consult a clinician urgently if symptomatic.",
            Self::Moderate => {
                "Moderate predicted risk. Consider clinical review and follow recommended tests."
            }
            Self::Low | Self::Unknown => "Low predicted risk. Continue preventive measures.",
        }
    }

    pub fn immediate_actions(self) -> &'static [&'static str] {
        match self {
            Self::High => &[
                "Contact your GP or local urgent care. If severe symptoms, call emergency services.",
                "Bring this report to your appointment.",
            ],
            _ => &[
                "Consider scheduling a GP appointment within 1-4 weeks for assessment.",
                "Start lifestyle measures and re-check in ~3 months.",
            ],
        }
    }
}

/// Bucket `probability`; missing or non-finite values are [`RiskCategory::Unknown`].
pub fn risk_category(probability: Option<f64>) -> RiskCategory {
    match probability {
        Some(p) if p.is_finite() => {
            if p >= HIGH_RISK_THRESHOLD {
                RiskCategory::High
            } else if p >= MODERATE_RISK_THRESHOLD {
                RiskCategory::Moderate
            } else {
                RiskCategory::Low
            }
        }
        _ => RiskCategory::Unknown,
    }
}

/// The most influential feature for `report`.
///
/// Service importances win whenever present; otherwise the editable input
/// with the largest magnitude is chosen, earlier inputs winning ties.
pub fn top_factor(report: &PredictionReport) -> String {
    let mut importances = report.feature_importances();
    if !importances.is_empty() {
        importances.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        return importances.swap_remove(0).feature;
    }
    let mut best = ("", f64::NEG_INFINITY);
    for (key, magnitude) in report.inputs.input_magnitudes() {
        if magnitude > best.1 {
            best = (key, magnitude);
        }
    }
    best.0.to_string()
}

/// One bar of the "most affecting factors" chart.
#[derive(Clone, Debug, PartialEq)]
pub struct FactorBar {
    pub name: String,
    /// Normalized value, rounded to three decimals.
    pub value: f64,
}

impl FactorBar {
    /// Bar annotation: the value itself above 1, otherwise a whole percentage.
    pub fn label(&self) -> String {
        if self.value > 1.0 {
            format!("{}", self.value)
        } else {
            format!("{:.0}%", self.value * 100.0)
        }
    }
}

/// Up to six ranked bars, from service importances or input magnitudes.
pub fn factor_chart(report: &PredictionReport) -> Vec<FactorBar> {
    let mut importances = report.feature_importances();
    let mut bars: Vec<(String, f64)> = if importances.is_empty() {
        report
            .inputs
            .input_magnitudes()
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    } else {
        importances.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        importances
            .into_iter()
            .map(|entry| (entry.feature, entry.importance))
            .collect()
    };
    bars.sort_by(|a, b| b.1.total_cmp(&a.1));
    bars.truncate(MAX_CHART_BARS);
    let max = bars.iter().map(|(_, value)| *value).fold(1.0, f64::max);
    bars.into_iter()
        .map(|(name, value)| FactorBar {
            name,
            value: round3(value / max),
        })
        .collect()
}

/// Round to three decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureVector, PatientInputs};
    use serde_json::json;
    use time::OffsetDateTime;

    fn report(probability: f64, raw: Option<serde_json::Value>) -> PredictionReport {
        PredictionReport::new(
            FeatureVector::from_inputs(&PatientInputs::default()),
            1,
            probability,
            raw,
            OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
        )
    }

    #[test]
    fn thresholds_are_inclusive_on_lower_bound() {
        assert_eq!(risk_category(Some(0.0)), RiskCategory::Low);
        assert_eq!(risk_category(Some(0.399)), RiskCategory::Low);
        assert_eq!(risk_category(Some(0.4)), RiskCategory::Moderate);
        assert_eq!(risk_category(Some(0.699)), RiskCategory::Moderate);
        assert_eq!(risk_category(Some(0.7)), RiskCategory::High);
        assert_eq!(risk_category(Some(1.0)), RiskCategory::High);
        assert_eq!(risk_category(None), RiskCategory::Unknown);
        assert_eq!(risk_category(Some(f64::NAN)), RiskCategory::Unknown);
    }

    #[test]
    fn category_is_monotonic_in_probability() {
        let mut previous = RiskCategory::Low;
        for step in 0..=1000 {
            let category = risk_category(Some(step as f64 / 1000.0));
            assert!(category >= previous);
            previous = category;
        }
    }

    #[test]
    fn example_report_is_high_and_driven_by_cholesterol() {
        let report = report(0.82, None);
        assert_eq!(report.percent(), 82);
        assert_eq!(risk_category(Some(report.probability)).label(), "High (Critical)");
        assert_eq!(top_factor(&report), "chol");
    }

    #[test]
    fn importances_take_precedence_over_inputs() {
        let report = report(
            0.5,
            Some(json!({"feature_importances": [
                {"feature": "ca", "importance": 0.1},
                {"feature": "oldpeak", "importance": 0.4},
                {"feature": "thal", "importance": 0.4}
            ]})),
        );
        assert_eq!(top_factor(&report), "oldpeak");
    }

    #[test]
    fn empty_importances_fall_back_to_inputs() {
        let report = report(0.5, Some(json!({"feature_importances": []})));
        assert_eq!(top_factor(&report), "chol");
    }

    #[test]
    fn magnitude_ties_keep_fixed_input_order() {
        let mut report = report(0.5, None);
        report.inputs.age = 300.0;
        report.inputs.trestbps = 300.0;
        report.inputs.chol = 300.0;
        assert_eq!(top_factor(&report), "age");
    }

    #[test]
    fn fallback_chart_normalizes_to_largest_input() {
        let chart = factor_chart(&report(0.5, None));
        assert_eq!(chart.len(), 6);
        assert_eq!(chart[0].name, "chol");
        assert_eq!(chart[0].value, 1.0);
        assert_eq!(chart[1].name, "thalch");
        assert_eq!(chart[1].value, round3(149.0 / 246.0));
        assert_eq!(chart[5].value, 0.0);
    }

    #[test]
    fn importance_chart_keeps_small_values_unscaled() {
        let entries: Vec<_> = (0..8)
            .map(|idx| json!({"feature": format!("f{idx}"), "importance": (idx as f64) / 10.0}))
            .collect();
        let chart = factor_chart(&report(0.5, Some(json!({ "feature_importances": entries }))));
        assert_eq!(chart.len(), MAX_CHART_BARS);
        assert_eq!(chart[0].name, "f7");
        assert_eq!(chart[0].value, 0.7);
        assert_eq!(chart[0].label(), "70%");
    }

    #[test]
    fn bar_label_shows_raw_value_above_one() {
        let bar = FactorBar {
            name: "x".into(),
            value: 2.5,
        };
        assert_eq!(bar.label(), "2.5");
    }
}
