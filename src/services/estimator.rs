use tracing::{debug, warn};

use crate::domain::display::{Currency, Locale};
use crate::domain::inputs::{InputField, InputSnapshot};
use crate::domain::outputs::DerivedOutputs;
use crate::services::derivation::derive;
use crate::services::report_view::ReportView;

/// Single-user estimator state.
///
/// Inputs are only reachable through the mutation methods, each of which
/// recomputes the outputs before returning, so `outputs()` always matches
/// `inputs()`.
#[derive(Debug, Clone)]
pub struct EstimatorSession {
    inputs: InputSnapshot,
    outputs: DerivedOutputs,
    locale: Locale,
    currency: Currency,
}

impl Default for EstimatorSession {
    fn default() -> Self {
        Self::new(InputSnapshot::default())
    }
}

impl EstimatorSession {
    pub fn new(inputs: InputSnapshot) -> Self {
        let outputs = derive(&inputs);
        Self {
            inputs,
            outputs,
            locale: Locale::default(),
            currency: Currency::default(),
        }
    }

    pub fn inputs(&self) -> &InputSnapshot {
        &self.inputs
    }

    pub fn outputs(&self) -> &DerivedOutputs {
        &self.outputs
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Snapshot of everything the report view renders.
    pub fn view(&self) -> ReportView {
        ReportView::new(self.inputs.clone(), self.locale, self.currency)
    }

    pub fn set_presses(&mut self, value: f64) {
        self.update(|inputs| inputs.presses = value);
    }

    pub fn set_plate_remakes_per_month(&mut self, value: f64) {
        self.update(|inputs| inputs.plate_remakes_per_month = value);
    }

    pub fn set_downtime_hours_per_month(&mut self, value: f64) {
        self.update(|inputs| inputs.downtime_hours_per_month = value);
    }

    pub fn set_cost_per_plate(&mut self, value: f64) {
        self.update(|inputs| inputs.cost_per_plate = value);
    }

    pub fn set_downtime_cost_per_hour(&mut self, value: f64) {
        self.update(|inputs| inputs.downtime_cost_per_hour = value);
    }

    pub fn set_show_advanced(&mut self, show: bool) {
        self.update(|inputs| inputs.show_advanced = show);
    }

    pub fn toggle_advanced(&mut self) {
        self.update(|inputs| inputs.show_advanced = !inputs.show_advanced);
    }

    pub fn set_material_spend_per_month(&mut self, value: f64) {
        self.update(|inputs| inputs.material_spend_per_month = value);
    }

    pub fn set_waste_percent(&mut self, value: f64) {
        self.update(|inputs| inputs.waste_percent = value);
    }

    pub fn set_remake_reduction_pct(&mut self, value: f64) {
        self.update(|inputs| inputs.remake_reduction_pct = value);
    }

    pub fn set_downtime_reduction_pct(&mut self, value: f64) {
        self.update(|inputs| inputs.downtime_reduction_pct = value);
    }

    pub fn set_waste_reduction_pct(&mut self, value: f64) {
        self.update(|inputs| inputs.waste_reduction_pct = value);
    }

    pub fn set_one_time_setup(&mut self, value: f64) {
        self.update(|inputs| inputs.one_time_setup = value);
    }

    pub fn set_annual_license(&mut self, value: f64) {
        self.update(|inputs| inputs.annual_license = value);
    }

    /// Applies raw text to a field the way an input control would: numbers
    /// that fail to parse become 0, values outside the control's range are
    /// kept as typed. Returns the stored value.
    pub fn set_field(&mut self, field: InputField, raw: &str) -> f64 {
        let value = if field == InputField::ShowAdvanced {
            if coerce_flag(raw) { 1.0 } else { 0.0 }
        } else {
            coerce_number(raw)
        };

        if let Some((min, max)) = field.range() {
            if value < min || value > max {
                warn!(field = field.key(), value, min, max, "input outside expected range");
            }
        }

        self.update(|inputs| inputs.set_value(field, value));
        value
    }

    /// Replaces every input at once, e.g. after loading an inputs file.
    pub fn replace_inputs(&mut self, inputs: InputSnapshot) {
        self.update(|current| *current = inputs);
    }

    /// Restores the default inputs. Locale and currency are kept.
    pub fn reset(&mut self) {
        self.update(|inputs| *inputs = InputSnapshot::default());
    }

    fn update(&mut self, apply: impl FnOnce(&mut InputSnapshot)) {
        apply(&mut self.inputs);
        self.outputs = derive(&self.inputs);
        debug!(
            total_annual_savings = self.outputs.total_annual_savings,
            payback_months = self.outputs.payback_months,
            "recomputed estimate"
        );
    }
}

/// Numeric input coercion: empty, unparsable or non-finite text reads as 0.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

pub fn coerce_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "on" | "yes" | "1"
    )
}
