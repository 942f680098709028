use crate::services::report_view::{REPORT_NOTES, REPORT_TITLE, ReportView, Stat};

pub fn format_estimate_report(view: &ReportView) -> String {
    let mut lines = Vec::new();
    lines.push(REPORT_TITLE.to_string());
    lines.push(format!(
        "Locale: {} | Currency: {}",
        view.locale.code(),
        view.currency.code()
    ));
    lines.push(String::new());
    push_stats(&mut lines, &view.headline_stats());
    lines.push(String::new());

    lines.push("Inputs:".to_string());
    lines.push(format!(
        "Advanced waste inputs: {}",
        if view.inputs.show_advanced { "shown" } else { "hidden" }
    ));
    for row in view.input_rows() {
        lines.push(format!("{}: {}", row.label, row.value));
    }
    lines.push(String::new());

    lines.push("Savings Breakdown:".to_string());
    for row in view.breakdown() {
        lines.push(format!("{}: {}  ({})", row.title, row.value, row.formula));
    }
    lines.push(String::new());
    push_stats(&mut lines, &view.cost_stats());
    lines.push(String::new());
    lines.push(REPORT_NOTES.to_string());

    lines.join("\n")
}

/// One-line summary printed after every edit in a session.
pub fn format_headline(view: &ReportView) -> String {
    view.headline_stats()
        .iter()
        .map(|stat| format!("{}: {}", stat.title, stat.value))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn push_stats(lines: &mut Vec<String>, stats: &[Stat]) {
    for stat in stats {
        lines.push(format!("{}: {} ({})", stat.title, stat.value, stat.subtitle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::display::{Currency, Locale};
    use crate::domain::inputs::InputSnapshot;

    fn build_view() -> ReportView {
        ReportView::new(InputSnapshot::default(), Locale::EnUs, Currency::Usd)
    }

    #[test]
    fn format_estimate_report_includes_stats_and_breakdown() {
        let output = format_estimate_report(&build_view());

        assert!(output.contains("Track&Trace4Tools ROI Calculator"));
        assert!(output.contains("Locale: en-US | Currency: USD"));
        assert!(output.contains("Estimated Annual Savings: $46,800.00"));
        assert!(output.contains("Year 0 ROI: 56%"));
        assert!(output.contains("Year 1+ ROI: 160%"));
        assert!(output.contains("Payback Period: 8 months"));
        assert!(output.contains("Cost per plate (USD): 150"));
        assert!(output.contains("Savings from fewer plate remakes: $10,800.00"));
        assert!(output.contains("Year 0 Cost: $30,000.00"));
        assert!(output.contains("Advanced waste inputs: hidden"));
        assert!(!output.contains("Material spend per month"));
        assert!(output.contains("tracking running meters and tool status"));
        assert!(output.ends_with("Currency is display-only."));
    }

    #[test]
    fn format_headline_is_a_single_line() {
        let headline = format_headline(&build_view());

        assert!(!headline.contains('\n'));
        assert_eq!(
            headline,
            "Estimated Annual Savings: $46,800.00 | Year 0 ROI: 56% | Year 1+ ROI: 160% | Payback Period: 8 months"
        );
    }
}
