use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every user-editable input of the estimator.
///
/// Numeric domains are only affordances: any real value is accepted and the
/// derivation stays well-defined for it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InputSnapshot {
    pub presses: f64,
    pub plate_remakes_per_month: f64,
    pub downtime_hours_per_month: f64,
    pub cost_per_plate: f64,
    pub downtime_cost_per_hour: f64,
    pub show_advanced: bool,
    pub material_spend_per_month: f64,
    pub waste_percent: f64,
    pub remake_reduction_pct: f64,
    pub downtime_reduction_pct: f64,
    pub waste_reduction_pct: f64,
    pub one_time_setup: f64,
    pub annual_license: f64,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            presses: 9.0,
            plate_remakes_per_month: 30.0,
            downtime_hours_per_month: 12.0,
            cost_per_plate: 150.0,
            downtime_cost_per_hour: 1000.0,
            show_advanced: false,
            material_spend_per_month: 20000.0,
            waste_percent: 5.0,
            remake_reduction_pct: 20.0,
            downtime_reduction_pct: 25.0,
            waste_reduction_pct: 15.0,
            one_time_setup: 12000.0,
            annual_license: 18000.0,
        }
    }
}

impl InputSnapshot {
    /// Returns the numeric value of a field. `ShowAdvanced` reads as 1 or 0.
    pub fn value(&self, field: InputField) -> f64 {
        match field {
            InputField::Presses => self.presses,
            InputField::PlateRemakesPerMonth => self.plate_remakes_per_month,
            InputField::DowntimeHoursPerMonth => self.downtime_hours_per_month,
            InputField::CostPerPlate => self.cost_per_plate,
            InputField::DowntimeCostPerHour => self.downtime_cost_per_hour,
            InputField::ShowAdvanced => {
                if self.show_advanced {
                    1.0
                } else {
                    0.0
                }
            }
            InputField::MaterialSpendPerMonth => self.material_spend_per_month,
            InputField::WastePercent => self.waste_percent,
            InputField::RemakeReductionPct => self.remake_reduction_pct,
            InputField::DowntimeReductionPct => self.downtime_reduction_pct,
            InputField::WasteReductionPct => self.waste_reduction_pct,
            InputField::OneTimeSetup => self.one_time_setup,
            InputField::AnnualLicense => self.annual_license,
        }
    }

    /// Stores a numeric value into a field. `ShowAdvanced` is set for any
    /// nonzero value.
    pub fn set_value(&mut self, field: InputField, value: f64) {
        match field {
            InputField::Presses => self.presses = value,
            InputField::PlateRemakesPerMonth => self.plate_remakes_per_month = value,
            InputField::DowntimeHoursPerMonth => self.downtime_hours_per_month = value,
            InputField::CostPerPlate => self.cost_per_plate = value,
            InputField::DowntimeCostPerHour => self.downtime_cost_per_hour = value,
            InputField::ShowAdvanced => self.show_advanced = value != 0.0,
            InputField::MaterialSpendPerMonth => self.material_spend_per_month = value,
            InputField::WastePercent => self.waste_percent = value,
            InputField::RemakeReductionPct => self.remake_reduction_pct = value,
            InputField::DowntimeReductionPct => self.downtime_reduction_pct = value,
            InputField::WasteReductionPct => self.waste_reduction_pct = value,
            InputField::OneTimeSetup => self.one_time_setup = value,
            InputField::AnnualLicense => self.annual_license = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Presses,
    PlateRemakesPerMonth,
    DowntimeHoursPerMonth,
    CostPerPlate,
    DowntimeCostPerHour,
    ShowAdvanced,
    MaterialSpendPerMonth,
    WastePercent,
    RemakeReductionPct,
    DowntimeReductionPct,
    WasteReductionPct,
    OneTimeSetup,
    AnnualLicense,
}

impl InputField {
    pub const ALL: [InputField; 13] = [
        InputField::Presses,
        InputField::PlateRemakesPerMonth,
        InputField::DowntimeHoursPerMonth,
        InputField::CostPerPlate,
        InputField::DowntimeCostPerHour,
        InputField::ShowAdvanced,
        InputField::MaterialSpendPerMonth,
        InputField::WastePercent,
        InputField::RemakeReductionPct,
        InputField::DowntimeReductionPct,
        InputField::WasteReductionPct,
        InputField::OneTimeSetup,
        InputField::AnnualLicense,
    ];

    /// The camelCase key used in input files and lead payloads.
    pub fn key(self) -> &'static str {
        match self {
            InputField::Presses => "presses",
            InputField::PlateRemakesPerMonth => "plateRemakesPerMonth",
            InputField::DowntimeHoursPerMonth => "downtimeHoursPerMonth",
            InputField::CostPerPlate => "costPerPlate",
            InputField::DowntimeCostPerHour => "downtimeCostPerHour",
            InputField::ShowAdvanced => "showAdvanced",
            InputField::MaterialSpendPerMonth => "materialSpendPerMonth",
            InputField::WastePercent => "wastePercent",
            InputField::RemakeReductionPct => "remakeReductionPct",
            InputField::DowntimeReductionPct => "downtimeReductionPct",
            InputField::WasteReductionPct => "wasteReductionPct",
            InputField::OneTimeSetup => "oneTimeSetup",
            InputField::AnnualLicense => "annualLicense",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputField::Presses => "Number of presses",
            InputField::PlateRemakesPerMonth => "Plate remakes per month",
            InputField::DowntimeHoursPerMonth => "Plate-related downtime (hours/month)",
            InputField::CostPerPlate => "Cost per plate",
            InputField::DowntimeCostPerHour => "Downtime cost per hour",
            InputField::ShowAdvanced => "Advanced waste inputs",
            InputField::MaterialSpendPerMonth => "Material spend per month",
            InputField::WastePercent => "Waste % attributable to plate/tool issues",
            InputField::RemakeReductionPct => "Remake reduction",
            InputField::DowntimeReductionPct => "Downtime reduction",
            InputField::WasteReductionPct => "Waste reduction",
            InputField::OneTimeSetup => "One-time setup",
            InputField::AnnualLicense => "Annual license",
        }
    }

    /// Inclusive range offered by the input controls, `None` for the flag.
    /// An upper bound of `f64::INFINITY` means the control has no maximum.
    pub fn range(self) -> Option<(f64, f64)> {
        match self {
            InputField::ShowAdvanced => None,
            InputField::Presses => Some((1.0, f64::INFINITY)),
            InputField::WastePercent => Some((0.0, 100.0)),
            InputField::RemakeReductionPct | InputField::DowntimeReductionPct => {
                Some((0.0, 50.0))
            }
            InputField::WasteReductionPct => Some((0.0, 40.0)),
            _ => Some((0.0, f64::INFINITY)),
        }
    }

    /// True for the money-valued fields that the view labels with a currency.
    pub fn is_money(self) -> bool {
        matches!(
            self,
            InputField::CostPerPlate
                | InputField::DowntimeCostPerHour
                | InputField::MaterialSpendPerMonth
                | InputField::OneTimeSetup
                | InputField::AnnualLicense
        )
    }

    pub fn is_percent(self) -> bool {
        matches!(
            self,
            InputField::WastePercent
                | InputField::RemakeReductionPct
                | InputField::DowntimeReductionPct
                | InputField::WasteReductionPct
        )
    }

    /// Waste fields only take part in the estimate while advanced inputs are shown.
    pub fn is_advanced(self) -> bool {
        matches!(
            self,
            InputField::MaterialSpendPerMonth | InputField::WastePercent
        )
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown input field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for InputField {
    type Err = UnknownField;

    /// Accepts the camelCase key, kebab-case or snake_case, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        InputField::ALL
            .into_iter()
            .find(|field| field.key().to_lowercase() == wanted)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_snapshot_matches_documented_defaults() {
        let inputs = InputSnapshot::default();
        assert_eq!(inputs.presses, 9.0);
        assert_eq!(inputs.plate_remakes_per_month, 30.0);
        assert_eq!(inputs.downtime_hours_per_month, 12.0);
        assert_eq!(inputs.cost_per_plate, 150.0);
        assert_eq!(inputs.downtime_cost_per_hour, 1000.0);
        assert!(!inputs.show_advanced);
        assert_eq!(inputs.material_spend_per_month, 20000.0);
        assert_eq!(inputs.waste_percent, 5.0);
        assert_eq!(inputs.remake_reduction_pct, 20.0);
        assert_eq!(inputs.downtime_reduction_pct, 25.0);
        assert_eq!(inputs.waste_reduction_pct, 15.0);
        assert_eq!(inputs.one_time_setup, 12000.0);
        assert_eq!(inputs.annual_license, 18000.0);
    }

    #[test]
    fn field_names_parse_in_several_spellings() {
        assert_eq!(
            "costPerPlate".parse::<InputField>(),
            Ok(InputField::CostPerPlate)
        );
        assert_eq!(
            "cost-per-plate".parse::<InputField>(),
            Ok(InputField::CostPerPlate)
        );
        assert_eq!(
            "annual_license".parse::<InputField>(),
            Ok(InputField::AnnualLicense)
        );
        assert!("nope".parse::<InputField>().is_err());
    }

    #[test]
    fn value_and_set_value_address_the_same_field() {
        let mut inputs = InputSnapshot::default();
        for (index, field) in InputField::ALL.into_iter().enumerate() {
            if field == InputField::ShowAdvanced {
                continue;
            }
            inputs.set_value(field, index as f64 + 0.5);
            assert_eq!(inputs.value(field), index as f64 + 0.5, "{field}");
        }
        inputs.set_value(InputField::ShowAdvanced, 1.0);
        assert!(inputs.show_advanced);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(InputSnapshot::default()).unwrap();
        for field in InputField::ALL {
            assert!(json.get(field.key()).is_some(), "missing {}", field.key());
        }
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let inputs: InputSnapshot = serde_yaml::from_str("costPerPlate: 200\n").unwrap();
        assert_eq!(inputs.cost_per_plate, 200.0);
        assert_eq!(inputs.presses, 9.0);
    }
}
