use serde::Serialize;

use crate::domain::display::{Currency, Locale};
use crate::domain::inputs::InputSnapshot;
use crate::domain::outputs::DerivedOutputs;

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub company: String,
}

impl Contact {
    pub fn new(name: &str, email: &str, company: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            company: company.to_string(),
        }
    }

    /// First required field that is empty or whitespace only.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("company", &self.company),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }
}

/// What gets forwarded to the lead sink when a report is requested.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LeadRecord {
    #[serde(flatten)]
    pub contact: Contact,
    pub locale: Locale,
    pub currency: Currency,
    pub inputs: InputSnapshot,
    pub outputs: DerivedOutputs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::derivation::derive;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_field_reports_first_blank_field() {
        assert_eq!(Contact::new("", "a@b.c", "Acme").missing_field(), Some("name"));
        assert_eq!(Contact::new("Jane", "  ", "Acme").missing_field(), Some("email"));
        assert_eq!(Contact::new("Jane", "a@b.c", "").missing_field(), Some("company"));
        assert!(Contact::new("Jane", "a@b.c", "Acme").is_complete());
    }

    #[test]
    fn lead_record_serializes_flat() {
        let inputs = InputSnapshot::default();
        let lead = LeadRecord {
            contact: Contact::new("Jane Doe", "jane@acme.test", "Acme Ltd."),
            locale: Locale::EnGb,
            currency: Currency::Aed,
            outputs: derive(&inputs),
            inputs,
        };

        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["name"], "Jane Doe");
        assert_eq!(json["email"], "jane@acme.test");
        assert_eq!(json["company"], "Acme Ltd.");
        assert_eq!(json["locale"], "en-GB");
        assert_eq!(json["currency"], "AED");
        assert_eq!(json["inputs"]["costPerPlate"], 150.0);
        assert_eq!(json["outputs"]["totalAnnualSavings"], 46800.0);
    }
}
