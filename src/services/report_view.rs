use crate::domain::display::{Currency, Locale};
use crate::domain::inputs::{InputField, InputSnapshot};
use crate::domain::outputs::DerivedOutputs;
use crate::services::derivation::derive;
use crate::services::formatting::{format_money, format_number, format_payback, format_percent};

pub const REPORT_TITLE: &str = "Track&Trace4Tools ROI Calculator";
pub const REPORT_SUBTITLE: &str = "Estimate annual savings from fewer plate remakes, reduced press downtime, and lower waste.";
pub const REPORT_NOTES: &str = "Notes: Results are indicative and depend on accurate inputs. Track&Trace4Tools improves data quality by tracking running meters and tool status, enabling proactive planning and fewer failures. Currency is display-only.";

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub title: &'static str,
    pub value: String,
    pub subtitle: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    pub field: InputField,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub title: &'static str,
    pub amount: f64,
    pub value: String,
    pub formula: &'static str,
}

/// The rendered state of an estimate: what the terminal prints and what the
/// report document captures.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub inputs: InputSnapshot,
    pub outputs: DerivedOutputs,
    pub locale: Locale,
    pub currency: Currency,
}

impl ReportView {
    pub fn new(inputs: InputSnapshot, locale: Locale, currency: Currency) -> Self {
        let outputs = derive(&inputs);
        Self {
            inputs,
            outputs,
            locale,
            currency,
        }
    }

    pub fn money(&self, value: f64) -> String {
        format_money(value, self.currency, self.locale)
    }

    pub fn headline_stats(&self) -> Vec<Stat> {
        vec![
            Stat {
                title: "Estimated Annual Savings",
                value: self.money(self.outputs.total_annual_savings),
                subtitle: "Live estimate based on your inputs",
            },
            Stat {
                title: "Year 0 ROI",
                value: format_percent(self.outputs.roi_year0_pct, self.locale),
                subtitle: "Includes setup + license",
            },
            Stat {
                title: "Year 1+ ROI",
                value: format_percent(self.outputs.roi_year1_plus_pct, self.locale),
                subtitle: "Ongoing years (license only)",
            },
            Stat {
                title: "Payback Period",
                value: format_payback(self.outputs.payback_months),
                subtitle: "Break-even (Year 0)",
            },
        ]
    }

    /// Input rows as shown; waste fields only appear with advanced inputs.
    pub fn input_rows(&self) -> Vec<InputRow> {
        InputField::ALL
            .into_iter()
            .filter(|field| *field != InputField::ShowAdvanced)
            .filter(|field| self.inputs.show_advanced || !field.is_advanced())
            .map(|field| {
                let value = self.inputs.value(field);
                let label = if field.is_money() {
                    format!("{} ({})", field.label(), self.currency.code())
                } else {
                    field.label().to_string()
                };
                let value = if field.is_percent() {
                    format!("{}%", format_number(value, self.locale))
                } else {
                    format_number(value, self.locale)
                };
                InputRow {
                    field,
                    label,
                    value,
                }
            })
            .collect()
    }

    pub fn breakdown(&self) -> Vec<BreakdownRow> {
        vec![
            BreakdownRow {
                title: "Savings from fewer plate remakes",
                amount: self.outputs.annual_remake_savings,
                value: self.money(self.outputs.annual_remake_savings),
                formula: "= Remakes/month x Cost/plate x Reduction x 12",
            },
            BreakdownRow {
                title: "Savings from reduced downtime",
                amount: self.outputs.annual_downtime_savings,
                value: self.money(self.outputs.annual_downtime_savings),
                formula: "= Downtime hrs/month x Cost/hr x Reduction x 12",
            },
            BreakdownRow {
                title: "Savings from lower waste",
                amount: self.outputs.annual_waste_savings,
                value: self.money(self.outputs.annual_waste_savings),
                formula: "= Material spend x Waste% x Reduction x 12",
            },
        ]
    }

    pub fn cost_stats(&self) -> Vec<Stat> {
        vec![
            Stat {
                title: "Year 0 Cost",
                value: self.money(self.outputs.year0_cost),
                subtitle: "Setup + license",
            },
            Stat {
                title: "Year 1+ Cost",
                value: self.money(self.outputs.subsequent_annual_cost),
                subtitle: "Annual license only",
            },
            Stat {
                title: "Total Annual Savings",
                value: self.money(self.outputs.total_annual_savings),
                subtitle: "Remakes + downtime + waste",
            },
        ]
    }
}
