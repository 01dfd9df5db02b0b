//! Patient feature vector sent to the prediction service.
//!
//! Six values come from the input form; the remaining eight are fixed
//! defaults the service expects to be present.

use serde::{Deserialize, Serialize};

/// Names of the six user-editable inputs, in the order they are ranked.
pub const EDITABLE_KEYS: [&str; 6] = ["age", "trestbps", "chol", "thalch", "oldpeak", "ca"];

/// One editable form field: wire key, label and slider bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Slider bounds for the form. Typed values are not clamped to them.
pub const INPUT_SPECS: [InputSpec; 6] = [
    InputSpec {
        key: "age",
        label: "Age",
        min: 18.0,
        max: 100.0,
        step: 1.0,
    },
    InputSpec {
        key: "trestbps",
        label: "Resting BP (trestbps)",
        min: 60.0,
        max: 250.0,
        step: 1.0,
    },
    InputSpec {
        key: "chol",
        label: "Cholesterol (chol)",
        min: 100.0,
        max: 600.0,
        step: 1.0,
    },
    InputSpec {
        key: "thalch",
        label: "Max heart rate (thalach)",
        min: 60.0,
        max: 220.0,
        step: 1.0,
    },
    InputSpec {
        key: "oldpeak",
        label: "Oldpeak (ST depression)",
        min: 0.0,
        max: 6.0,
        step: 0.1,
    },
    InputSpec {
        key: "ca",
        label: "Number of major vessels (ca)",
        min: 0.0,
        max: 3.0,
        step: 1.0,
    },
];

/// The values a user edits on the input form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatientInputs {
    pub age: f64,
    pub trestbps: f64,
    pub chol: f64,
    pub thalach: f64,
    pub oldpeak: f64,
    pub ca: f64,
}

impl Default for PatientInputs {
    fn default() -> Self {
        Self {
            age: 54.0,
            trestbps: 130.0,
            chol: 246.0,
            thalach: 149.0,
            oldpeak: 1.0,
            ca: 0.0,
        }
    }
}

impl PatientInputs {
    /// Mutable access by wire key, used by the form to bind widgets generically.
    pub fn value_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "age" => Some(&mut self.age),
            "trestbps" => Some(&mut self.trestbps),
            "chol" => Some(&mut self.chol),
            "thalch" | "thalach" => Some(&mut self.thalach),
            "oldpeak" => Some(&mut self.oldpeak),
            "ca" => Some(&mut self.ca),
            _ => None,
        }
    }
}

/// Complete 14-field record the prediction service consumes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub age: f64,
    pub sex: f64,
    pub cp: f64,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: f64,
    pub restecg: f64,
    #[serde(alias = "thalach")]
    pub thalch: f64,
    pub exang: f64,
    pub oldpeak: f64,
    pub slope: f64,
    pub ca: f64,
    pub thal: f64,
    pub dataset: f64,
}

impl FeatureVector {
    /// Merge user-supplied inputs with the fixed defaults.
    pub fn from_inputs(inputs: &PatientInputs) -> Self {
        Self {
            age: inputs.age,
            sex: 1.0,
            cp: 0.0,
            trestbps: inputs.trestbps,
            chol: inputs.chol,
            fbs: 0.0,
            restecg: 0.0,
            thalch: inputs.thalach,
            exang: 0.0,
            oldpeak: inputs.oldpeak,
            slope: 1.0,
            ca: inputs.ca,
            thal: 1.0,
            dataset: 0.0,
        }
    }

    /// Absolute values of the six editable inputs, in [`EDITABLE_KEYS`] order.
    ///
    /// Non-finite values count as zero.
    pub fn input_magnitudes(&self) -> [(&'static str, f64); 6] {
        let values = [
            self.age,
            self.trestbps,
            self.chol,
            self.thalch,
            self.oldpeak,
            self.ca,
        ];
        let mut out = [("", 0.0); 6];
        for (slot, (key, value)) in out.iter_mut().zip(EDITABLE_KEYS.iter().zip(values)) {
            let magnitude = if value.is_finite() { value.abs() } else { 0.0 };
            *slot = (*key, magnitude);
        }
        out
    }

    /// All fields as `(key, value)` pairs in wire order, for tabular display.
    pub fn entries(&self) -> [(&'static str, f64); 14] {
        [
            ("age", self.age),
            ("sex", self.sex),
            ("cp", self.cp),
            ("trestbps", self.trestbps),
            ("chol", self.chol),
            ("fbs", self.fbs),
            ("restecg", self.restecg),
            ("thalch", self.thalch),
            ("exang", self.exang),
            ("oldpeak", self.oldpeak),
            ("slope", self.slope),
            ("ca", self.ca),
            ("thal", self.thal),
            ("dataset", self.dataset),
        ]
    }
}

/// Format a feature value the way a JSON number would read.
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_user_values_with_fixed_defaults() {
        let features = FeatureVector::from_inputs(&PatientInputs::default());
        assert_eq!(features.age, 54.0);
        assert_eq!(features.thalch, 149.0);
        assert_eq!(features.oldpeak, 1.0);
        assert_eq!(features.sex, 1.0);
        assert_eq!(features.slope, 1.0);
        assert_eq!(features.thal, 1.0);
        assert_eq!(features.dataset, 0.0);
    }

    #[test]
    fn serializes_thalach_under_service_key() {
        let features = FeatureVector::from_inputs(&PatientInputs::default());
        let json = serde_json::to_value(&features).unwrap();
        assert_eq!(json["thalch"], 149.0);
        assert!(json.get("thalach").is_none());
        assert_eq!(json.as_object().unwrap().len(), 14);
    }

    #[test]
    fn accepts_thalach_alias() {
        let mut json = serde_json::to_value(FeatureVector::from_inputs(&PatientInputs::default()))
            .unwrap();
        let object = json.as_object_mut().unwrap();
        let value = object.remove("thalch").unwrap();
        object.insert("thalach".into(), value);
        let parsed: FeatureVector = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.thalch, 149.0);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let inputs = PatientInputs {
            age: 140.0,
            chol: -5.0,
            ..PatientInputs::default()
        };
        let features = FeatureVector::from_inputs(&inputs);
        assert_eq!(features.age, 140.0);
        assert_eq!(features.chol, -5.0);
    }

    #[test]
    fn magnitudes_use_absolute_values_and_zero_non_finite() {
        let inputs = PatientInputs {
            chol: -300.0,
            oldpeak: f64::NAN,
            ..PatientInputs::default()
        };
        let magnitudes = FeatureVector::from_inputs(&inputs).input_magnitudes();
        assert_eq!(magnitudes[2], ("chol", 300.0));
        assert_eq!(magnitudes[4], ("oldpeak", 0.0));
    }

    #[test]
    fn value_mut_binds_every_form_key() {
        let mut inputs = PatientInputs::default();
        for spec in INPUT_SPECS {
            *inputs.value_mut(spec.key).unwrap() = 7.0;
        }
        assert_eq!(inputs.thalach, 7.0);
        assert_eq!(inputs.ca, 7.0);
        assert!(inputs.value_mut("dataset").is_none());
    }

    #[test]
    fn format_value_drops_trailing_zero_fraction() {
        assert_eq!(format_value(54.0), "54");
        assert_eq!(format_value(1.5), "1.5");
    }
}
