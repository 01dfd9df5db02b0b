//! CLI utility to request a prediction without the desktop UI.
//!
//! The report is stored exactly as the input form stores it, so the desktop
//! views pick it up on their next visit.

use cardioai::config;
use cardioai::features::{FeatureVector, PatientInputs, format_value};
use cardioai::insights::{self, advice};
use cardioai::prediction::{HttpPredictionService, PredictionService};
use cardioai::report::PredictionReport;
use cardioai::store::{ReportSlot, ReportStore};
use time::OffsetDateTime;

fn main() {
    if let Err(err) = cardioai::logging::init_stderr() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    let store = ReportStore::open_default().map_err(|err| err.to_string())?;
    match options.action {
        Action::Show => {
            match store.load_slot() {
                ReportSlot::Present(report) => print_summary(&report),
                ReportSlot::Empty => println!("No report stored."),
                ReportSlot::Unreadable(reason) => {
                    return Err(format!("Stored report could not be read: {reason}"));
                }
            }
            Ok(())
        }
        Action::Clear => {
            store.clear().map_err(|err| err.to_string())?;
            println!("Cleared stored report.");
            Ok(())
        }
        Action::Predict => predict(&store, &options),
    }
}

fn predict(store: &ReportStore, options: &Options) -> Result<(), String> {
    let mut config = config::load_or_default().map_err(|err| err.to_string())?;
    if let Some(url) = &options.base_url {
        config.service.base_url = url.clone();
    }
    let service = HttpPredictionService::new(&config.service).map_err(|err| err.to_string())?;
    let features = FeatureVector::from_inputs(&options.inputs);
    let response = service
        .predict(&features)
        .map_err(|err| format!("Prediction failed: {err}"))?;
    let report = PredictionReport::new(
        features,
        response.prediction,
        response.probability,
        response.raw,
        OffsetDateTime::now_utc(),
    );
    store
        .save(&report)
        .map_err(|err| format!("Prediction succeeded but could not be saved: {err}"))?;
    if options.save_history {
        let limit = config.storage.effective_history_limit();
        let len = store
            .append_history(&report, OffsetDateTime::now_utc(), limit)
            .map_err(|err| format!("Failed to save to history: {err}"))?;
        println!("Saved to history ({len} entries).");
    }
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &PredictionReport) {
    for line in summary_lines(report) {
        println!("{line}");
    }
}

fn summary_lines(report: &PredictionReport) -> Vec<String> {
    let category = insights::risk_category(Some(report.probability));
    let factor = insights::top_factor(report);
    let mut lines = vec![
        format!("Generated: {}", report.display_timestamp()),
        format!(
            "Prediction: {} ({}% risk, {})",
            report.prediction,
            report.percent(),
            category.label()
        ),
        advice::prediction_recommendation(report.prediction).to_string(),
        String::new(),
        "Inputs:".to_string(),
    ];
    for (key, value) in report.inputs.entries() {
        lines.push(format!("  {key:<10} {}", format_value(value)));
    }
    lines.push(String::new());
    lines.push(format!("Top contributing factor: {factor}"));
    lines.push("Targeted remedies:".to_string());
    for (idx, remedy) in advice::remedies_for_factor(&factor).iter().enumerate() {
        lines.push(format!("  {}. {remedy}", idx + 1));
    }
    lines.push("Recommended tests & referrals:".to_string());
    for test in advice::tests_for_risk(category) {
        lines.push(format!("  - {test}"));
    }
    lines.push(String::new());
    lines.push(advice::DISCLAIMER.to_string());
    lines
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Action {
    #[default]
    Predict,
    Show,
    Clear,
}

#[derive(Debug, Default)]
struct Options {
    action: Action,
    inputs: PatientInputs,
    base_url: Option<String>,
    save_history: bool,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--show" => options.action = Action::Show,
            "--clear" => options.action = Action::Clear,
            "--history" => options.save_history = true,
            "--url" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--url requires a value".to_string())?;
                options.base_url = Some(value.clone());
            }
            _ => {
                let Some(key) = flag.strip_prefix("--") else {
                    return Err(format!("Unknown argument: {flag}\n\n{}", help_text()));
                };
                let Some(slot) = options.inputs.value_mut(key) else {
                    return Err(format!("Unknown argument: {flag}\n\n{}", help_text()));
                };
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| format!("{flag} requires a value"))?;
                *slot = value
                    .parse::<f64>()
                    .map_err(|err| format!("{flag}: invalid number {value:?}: {err}"))?;
            }
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn help_text() -> &'static str {
    "cardioai-predict\n\n\
Request a heart-disease risk prediction and store it as the current report.\n\n\
Usage:\n\
  cardioai-predict [--age N] [--trestbps N] [--chol N] [--thalach N] [--oldpeak N] [--ca N]\n\
                   [--url <base>] [--history]\n\
  cardioai-predict --show\n\
  cardioai-predict --clear\n\n\
Options:\n\
  --age, --trestbps, --chol, --thalach, --oldpeak, --ca\n\
                 Patient inputs; omitted values use the form defaults.\n\
  --url <base>   Prediction service base URL (overrides config.toml).\n\
  --history      Also append the new report to the history log.\n\
  --show         Print the stored report instead of predicting.\n\
  --clear        Remove the stored report.\n"
}
