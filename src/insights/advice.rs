//! Static, educational advice text keyed by factor and risk bucket.

use super::RiskCategory;

/// An external reading link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resource {
    pub title: &'static str,
    pub url: &'static str,
}

const DEFAULT_REMEDIES: &[&str] = &[
    "Maintain a heart-healthy lifestyle: balanced diet, regular activity, quit smoking, limit alcohol.",
    "Monitor vitals (blood pressure, heart rate) and follow up with your primary care doctor.",
];

const REMEDIES: &[(&str, &[&str])] = &[
    (
        "age",
        &[
            "Maintain regular exercise (150 min/week moderate-intensity).",
            "Annual health check-ups and monitor BP/lipids.",
        ],
    ),
    (
        "trestbps",
        &[
            "Reduce salt intake and processed foods; follow DASH-style diet.",
            "Monitor blood pressure at home and consult GP if persistently high.",
            "Regular aerobic exercise and weight management.",
        ],
    ),
    (
        "chol",
        &[
            "Reduce saturated fats, increase dietary fiber (oats, legumes).",
            "Consider seeking lipid panel & advice from physician.",
            "Increase physical activity and avoid smoking.",
        ],
    ),
    (
        "thalch",
        &[
            "Improve cardiovascular fitness with gradual aerobic exercise.",
            "If unusually low, consult physician for exercise testing / ECG.",
        ],
    ),
    (
        "oldpeak",
        &[
            "Oldpeak indicates exercise-induced ST changes; seek cardiology review if high.",
            "Avoid strenuous exercise until cleared; get stress test if recommended.",
        ],
    ),
    (
        "ca",
        &[
            "Number of vessels (ca) can indicate existing coronary disease; seek cardiologist.",
            "Cardiac imaging or angiography might be considered by a specialist.",
        ],
    ),
    (
        "thal",
        &[
            "Abnormal thalassemia encoding in dataset; consult clinician for further testing.",
            "Consider hemoglobin and related blood tests if indicated.",
        ],
    ),
    (
        "cp",
        &["Chest pain requires careful evaluation; any persistent/atypical pain should be seen promptly."],
    ),
];

/// Checklist shown on the recommendations view.
pub const ACTION_PLAN: &[&str] = &[
    "Share this report with your primary care physician.",
    "Book recommended tests (blood tests, ECG) as advised.",
    "Adopt lifestyle goals: ~150 min/week moderate exercise, reduce salt/saturated fat.",
    "Monitor blood pressure & symptoms daily for two weeks.",
    "Follow up with clinician and update plan.",
];

pub const RESOURCES: &[Resource] = &[
    Resource {
        title: "WHO - Cardiovascular diseases",
        url: "https://www.who.int/news-room/fact-sheets/detail/cardiovascular-diseases-(cvds)",
    },
    Resource {
        title: "American Heart Association",
        url: "https://www.heart.org",
    },
];

pub const DISCLAIMER: &str =
    "This report is an educational aid only and not medical advice.";

/// Remedies for `factor`; unknown factors get general guidance.
pub fn remedies_for_factor(factor: &str) -> &'static [&'static str] {
    let key = if factor == "thalach" { "thalch" } else { factor };
    REMEDIES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, remedies)| *remedies)
        .unwrap_or(DEFAULT_REMEDIES)
}

/// Tests and referrals suggested for a risk bucket.
pub fn tests_for_risk(category: RiskCategory) -> &'static [&'static str] {
    match category {
        RiskCategory::High => &[
            "Immediate GP/Primary care assessment",
            "Referral to cardiologist",
            "12-lead ECG; cardiac enzymes if symptomatic",
            "Lipid profile, fasting blood sugar/HbA1c, kidney function",
            "Consider stress testing / echocardiography as advised",
        ],
        RiskCategory::Moderate => &[
            "GP visit for clinical review",
            "Lipid profile and blood pressure monitoring",
            "Lifestyle modification plan and follow-up in 4-12 weeks",
        ],
        RiskCategory::Low | RiskCategory::Unknown => &[
            "Continue preventive measures: healthy diet, exercise, regular screening",
            "Routine check-ups and monitoring of blood pressure and lipids",
        ],
    }
}

/// Recommendation line for the patient report, keyed on the class label.
pub fn prediction_recommendation(prediction: u8) -> &'static str {
    if prediction == 1 {
        "High risk: seek medical consultation."
    } else {
        "Low / moderate risk: consult a physician if symptoms persist."
    }
}

/// Headline for the patient report, keyed on the class label.
pub fn prediction_headline(prediction: u8) -> &'static str {
    if prediction == 1 {
        "Predicted: High risk"
    } else {
        "Predicted: Low/Moderate risk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_factor_uses_default_bucket() {
        assert_eq!(remedies_for_factor("dataset"), DEFAULT_REMEDIES);
        assert_eq!(remedies_for_factor(""), DEFAULT_REMEDIES);
    }

    #[test]
    fn every_ranked_input_has_specific_remedies() {
        for key in crate::features::EDITABLE_KEYS {
            assert_ne!(remedies_for_factor(key), DEFAULT_REMEDIES, "{key}");
        }
        assert_eq!(remedies_for_factor("thalach"), remedies_for_factor("thalch"));
    }

    #[test]
    fn tests_scale_with_risk() {
        assert_eq!(tests_for_risk(RiskCategory::High).len(), 5);
        assert_eq!(tests_for_risk(RiskCategory::Moderate).len(), 3);
        assert_eq!(
            tests_for_risk(RiskCategory::Unknown),
            tests_for_risk(RiskCategory::Low)
        );
    }
}
