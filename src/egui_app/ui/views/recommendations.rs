use super::*;
use crate::insights::{self, advice};

const NO_PLAN: EmptyPrompt = EmptyPrompt {
    title: "No report available",
    body: "Run a prediction first on the Input page.",
    action: "Go to Input",
};

/// Header buttons of the plan view, drawn right to left.
enum PlanAction {
    Download,
    Goto(View, &'static str),
}

const PLAN_ACTIONS: [PlanAction; 3] = [
    PlanAction::Download,
    PlanAction::Goto(View::Result, "Back to Result"),
    PlanAction::Goto(View::Form, "Edit Inputs"),
];

impl EguiApp {
    pub(in crate::egui_app::ui) fn render_recommendations(&mut self, ui: &mut Ui) {
        let Some(report) = self.report_or_prompt(ui, NO_PLAN) else {
            return;
        };
        self.page_header(
            ui,
            "Personalized Recommendations",
            "Based on the last prediction. Educational only.",
            |app, ui| {
                for action in &PLAN_ACTIONS {
                    match action {
                        PlanAction::Download => {
                            app.pdf_button(ui, PdfKind::Plan, "Download Plan (PDF)")
                        }
                        PlanAction::Goto(view, label) => {
                            if ui.button(*label).clicked() {
                                app.controller.navigate(*view);
                            }
                        }
                    }
                }
            },
        );
        let palette = self.palette();
        self.printable_panel(ui, PdfKind::Plan, style::card(palette), |app, ui| {
            ui.set_width(ui.available_width());
            app.render_plan(ui, &report);
        });
    }

    fn render_plan(&mut self, ui: &mut Ui, report: &PredictionReport) {
        let palette = self.palette();
        let category = insights::risk_category(Some(report.probability));
        let factor = insights::top_factor(report);
        ui.columns(3, |columns| {
            let ui = &mut columns[0];
            ui.label(RichText::new("Risk score").color(palette.text_muted));
            ui.label(
                RichText::new(format!("{}%", report.percent()))
                    .size(40.0)
                    .strong()
                    .color(style::risk_text(category)),
            );
            ui.label(RichText::new(category.label()).color(palette.text_muted));

            let ui = &mut columns[1];
            ui.label(RichText::new("Top contributing factor").strong());
            ui.label(RichText::new(&factor).size(20.0));
            ui.label(
                RichText::new(
                    "This is the most affecting factor identified. Recommendations below \
                     are tailored to address it.",
                )
                .color(palette.text_muted),
            );

            let ui = &mut columns[2];
            ui.label(RichText::new("Immediate actions").strong());
            super::bullet_list(ui, category.immediate_actions());
        });
        ui.separator();
        ui.columns(2, |columns| {
            let ui = &mut columns[0];
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("Targeted remedies for").size(15.0));
                ui.label(RichText::new(&factor).size(15.0).strong());
            });
            super::numbered_list(ui, advice::remedies_for_factor(&factor));
            ui.add_space(10.0);
            ui.label(RichText::new("Recommended tests & referrals").size(15.0));
            super::bullet_list(ui, advice::tests_for_risk(category));
            ui.add_space(10.0);
            ui.label(RichText::new("Action plan (simple checklist)").size(15.0));
            super::numbered_list(ui, advice::ACTION_PLAN);

            let ui = &mut columns[1];
            ui.label(RichText::new("Quick resources").size(15.0));
            for resource in advice::RESOURCES {
                ui.hyperlink_to(resource.title, resource.url);
            }
            ui.add_space(12.0);
            ui.label(RichText::new("Save plan").strong());
            ui.label(
                RichText::new("Save this plan to your local history for later review.")
                    .color(palette.text_muted),
            );
            self.history_button(ui);
            ui.add_space(12.0);
            ui.label(
                RichText::new(advice::DISCLAIMER)
                    .size(12.0)
                    .color(palette.text_muted),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_offers_a_single_download() {
        let downloads = PLAN_ACTIONS
            .iter()
            .filter(|action| matches!(action, PlanAction::Download))
            .count();
        assert_eq!(downloads, 1);
        assert!(
            PLAN_ACTIONS
                .iter()
                .any(|action| matches!(action, PlanAction::Goto(View::Form, _)))
        );
    }
}
