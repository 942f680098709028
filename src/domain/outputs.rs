use serde::Serialize;

/// Financial figures derived from an [`InputSnapshot`](crate::domain::inputs::InputSnapshot).
///
/// Values are unrounded and unclamped. `payback_months` is `f64::INFINITY`
/// when there are no savings to recoup the investment; serde_json writes it
/// as `null`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedOutputs {
    pub annual_remake_savings: f64,
    pub annual_downtime_savings: f64,
    pub annual_waste_savings: f64,
    pub total_annual_savings: f64,
    pub year0_cost: f64,
    pub subsequent_annual_cost: f64,
    pub roi_year0_pct: f64,
    pub roi_year1_plus_pct: f64,
    pub payback_months: f64,
}

impl DerivedOutputs {
    pub fn has_payback(&self) -> bool {
        self.payback_months.is_finite()
    }
}
