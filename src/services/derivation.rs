//! Annualized savings, ROI and payback figures.
//!
//! - Every monthly figure is annualized over 12 months.
//! - Waste savings only count while advanced waste inputs are shown.
//! - ROI denominators are floored at 1 so zero investment stays finite.
//! - Payback is `f64::INFINITY` when total savings are not positive.
//! - Nothing is rounded or clamped here; that is left to presentation.

use crate::domain::inputs::InputSnapshot;
use crate::domain::outputs::DerivedOutputs;

pub const MONTHS_PER_YEAR: f64 = 12.0;

pub fn derive(inputs: &InputSnapshot) -> DerivedOutputs {
    let annual_remake_savings = inputs.plate_remakes_per_month
        * inputs.cost_per_plate
        * (inputs.remake_reduction_pct / 100.0)
        * MONTHS_PER_YEAR;
    let annual_downtime_savings = inputs.downtime_hours_per_month
        * inputs.downtime_cost_per_hour
        * (inputs.downtime_reduction_pct / 100.0)
        * MONTHS_PER_YEAR;
    let annual_waste_savings = if inputs.show_advanced {
        inputs.material_spend_per_month
            * (inputs.waste_percent / 100.0)
            * (inputs.waste_reduction_pct / 100.0)
            * MONTHS_PER_YEAR
    } else {
        0.0
    };
    let total_annual_savings =
        annual_remake_savings + annual_downtime_savings + annual_waste_savings;

    let year0_cost = inputs.one_time_setup + inputs.annual_license;
    let subsequent_annual_cost = inputs.annual_license;

    DerivedOutputs {
        annual_remake_savings,
        annual_downtime_savings,
        annual_waste_savings,
        total_annual_savings,
        year0_cost,
        subsequent_annual_cost,
        roi_year0_pct: roi_pct(total_annual_savings, year0_cost),
        roi_year1_plus_pct: roi_pct(total_annual_savings, subsequent_annual_cost),
        payback_months: payback_months(total_annual_savings, year0_cost),
    }
}

fn roi_pct(savings: f64, cost: f64) -> f64 {
    (savings - cost) / cost.max(1.0) * 100.0
}

fn payback_months(total_annual_savings: f64, year0_cost: f64) -> f64 {
    if total_annual_savings > 0.0 {
        (year0_cost / (total_annual_savings / MONTHS_PER_YEAR)).max(0.0)
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn defaults_produce_documented_outputs() {
        let outputs = derive(&InputSnapshot::default());

        assert_close(outputs.annual_remake_savings, 10800.0);
        assert_close(outputs.annual_downtime_savings, 36000.0);
        assert_eq!(outputs.annual_waste_savings, 0.0);
        assert_close(outputs.total_annual_savings, 46800.0);
        assert_eq!(outputs.year0_cost, 30000.0);
        assert_eq!(outputs.subsequent_annual_cost, 18000.0);
        assert_close(outputs.roi_year0_pct, 56.0);
        assert_close(outputs.roi_year1_plus_pct, 160.0);
        assert_close(outputs.payback_months, 30000.0 / (46800.0 / 12.0));
        assert!((outputs.payback_months - 7.69).abs() < 0.01);
    }

    #[test]
    fn total_is_the_exact_sum_of_categories() {
        let inputs = InputSnapshot {
            show_advanced: true,
            plate_remakes_per_month: 17.0,
            cost_per_plate: 133.3,
            downtime_hours_per_month: 7.25,
            downtime_cost_per_hour: 912.0,
            material_spend_per_month: 31234.5,
            waste_percent: 7.0,
            waste_reduction_pct: 13.0,
            ..InputSnapshot::default()
        };
        let outputs = derive(&inputs);

        assert_eq!(
            outputs.total_annual_savings,
            outputs.annual_remake_savings
                + outputs.annual_downtime_savings
                + outputs.annual_waste_savings
        );
    }

    #[test]
    fn waste_savings_require_advanced_inputs() {
        let mut inputs = InputSnapshot {
            material_spend_per_month: 1_000_000.0,
            waste_percent: 90.0,
            waste_reduction_pct: 40.0,
            ..InputSnapshot::default()
        };
        assert_eq!(derive(&inputs).annual_waste_savings, 0.0);

        inputs.show_advanced = true;
        assert_close(
            derive(&inputs).annual_waste_savings,
            1_000_000.0 * 0.9 * 0.4 * 12.0,
        );
    }

    #[test]
    fn advanced_defaults_add_waste_savings() {
        let inputs = InputSnapshot {
            show_advanced: true,
            ..InputSnapshot::default()
        };
        let outputs = derive(&inputs);

        // 20000 * 5% * 15% * 12
        assert_close(outputs.annual_waste_savings, 1800.0);
        assert_close(outputs.total_annual_savings, 48600.0);
    }

    #[test]
    fn zero_investment_keeps_roi_finite() {
        let inputs = InputSnapshot {
            one_time_setup: 0.0,
            annual_license: 0.0,
            ..InputSnapshot::default()
        };
        let outputs = derive(&inputs);

        assert!(outputs.roi_year0_pct.is_finite());
        assert!(outputs.roi_year1_plus_pct.is_finite());
        assert_close(outputs.roi_year0_pct, 46800.0 * 100.0);
        assert_eq!(outputs.payback_months, 0.0);
    }

    #[test]
    fn payback_is_unbounded_without_savings() {
        let inputs = InputSnapshot {
            plate_remakes_per_month: 0.0,
            downtime_hours_per_month: 0.0,
            ..InputSnapshot::default()
        };
        let outputs = derive(&inputs);

        assert_eq!(outputs.total_annual_savings, 0.0);
        assert!(outputs.payback_months.is_infinite());
        assert!(!outputs.has_payback());
        assert_close(outputs.roi_year0_pct, -100.0);
    }

    #[test]
    fn negative_inputs_stay_well_defined() {
        let inputs = InputSnapshot {
            plate_remakes_per_month: -10.0,
            downtime_hours_per_month: 0.0,
            one_time_setup: -5000.0,
            annual_license: -1.0,
            ..InputSnapshot::default()
        };
        let outputs = derive(&inputs);

        assert!(outputs.total_annual_savings < 0.0);
        assert!(outputs.payback_months.is_infinite());
        assert!(outputs.roi_year0_pct.is_finite());
        assert!(outputs.roi_year1_plus_pct.is_finite());
        // Stored values are never clamped.
        assert_close(outputs.annual_remake_savings, -10.0 * 150.0 * 0.2 * 12.0);
    }

    #[test]
    fn negative_cost_floors_payback_at_zero() {
        let inputs = InputSnapshot {
            one_time_setup: -50000.0,
            ..InputSnapshot::default()
        };
        assert_eq!(derive(&inputs).payback_months, 0.0);
    }
}
