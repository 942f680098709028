use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Display currency. A label only: amounts are never converted.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum Currency {
    Usd,
    Eur,
    #[default]
    Aed,
    Gbp,
    Sar,
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Aed,
        Currency::Gbp,
        Currency::Sar,
        Currency::Inr,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Aed => "AED",
            Currency::Gbp => "GBP",
            Currency::Sar => "SAR",
            Currency::Inr => "INR",
        }
    }

    /// Symbol written next to amounts. Codes without a common symbol use the code.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
            Currency::Aed => "AED",
            Currency::Sar => "SAR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported currency: {s}"))
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[serde(rename = "en-US")]
    #[value(name = "en-US")]
    EnUs,
    #[default]
    #[serde(rename = "en-GB")]
    #[value(name = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    #[value(name = "de-DE")]
    DeDe,
    #[serde(rename = "ar-AE")]
    #[value(name = "ar-AE")]
    ArAe,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::EnUs, Locale::EnGb, Locale::DeDe, Locale::ArAe];

    pub fn code(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
            Locale::ArAe => "ar-AE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Locale::EnUs => "English (US)",
            Locale::EnGb => "English (UK)",
            Locale::DeDe => "Deutsch",
            Locale::ArAe => "العربية (الإمارات)",
        }
    }

    /// Thousands and decimal separators.
    pub fn separators(self) -> (char, char) {
        match self {
            Locale::DeDe => ('.', ','),
            _ => (',', '.'),
        }
    }

    /// Whether the currency symbol follows the amount.
    pub fn currency_after_amount(self) -> bool {
        matches!(self, Locale::DeDe)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unsupported locale: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_and_locale_parse_case_insensitively() {
        assert_eq!("eur".parse::<Currency>(), Ok(Currency::Eur));
        assert_eq!("de_de".parse::<Locale>(), Ok(Locale::DeDe));
        assert!("JPY".parse::<Currency>().is_err());
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_value(Currency::Sar).unwrap(), "SAR");
        assert_eq!(serde_json::to_value(Locale::ArAe).unwrap(), "ar-AE");
        let locale: Locale = serde_yaml::from_str("en-US").unwrap();
        assert_eq!(locale, Locale::EnUs);
    }
}
