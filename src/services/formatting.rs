/// Display formatting for computed figures.
///
/// - Money is clamped at 0 and shown with two decimals.
/// - Percentages are shown unclamped with no fraction digits.
/// - Payback shows whole months, or `-` when it is unbounded.
use crate::domain::display::{Currency, Locale};

pub fn format_money(value: f64, currency: Currency, locale: Locale) -> String {
    let amount = format_grouped(value.max(0.0), 2, locale);
    let symbol = currency.symbol();
    if locale.currency_after_amount() {
        format!("{amount} {symbol}")
    } else if symbol.chars().all(|c| c.is_ascii_uppercase()) {
        format!("{symbol} {amount}")
    } else {
        format!("{symbol}{amount}")
    }
}

pub fn format_percent(value: f64, locale: Locale) -> String {
    format!("{}%", format_grouped(value, 0, locale))
}

pub fn format_payback(months: f64) -> String {
    if months.is_finite() {
        format!("{} months", months.round())
    } else {
        "-".to_string()
    }
}

/// Plain number for input values: grouping, and decimals only when present.
pub fn format_number(value: f64, locale: Locale) -> String {
    let decimals = if value.fract() == 0.0 { 0 } else { 2 };
    format_grouped(value, decimals, locale)
}

fn format_grouped(value: f64, decimals: usize, locale: Locale) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let (group_sep, decimal_sep) = locale.separators();
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(rendered.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push(decimal_sep);
        grouped.push_str(fraction);
    }

    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn money_uses_locale_separators_and_symbols() {
        assert_eq!(format_money(46800.0, Currency::Usd, Locale::EnUs), "$46,800.00");
        assert_eq!(format_money(46800.0, Currency::Aed, Locale::EnGb), "AED 46,800.00");
        assert_eq!(format_money(1234567.891, Currency::Eur, Locale::DeDe), "1.234.567,89 €");
        assert_eq!(format_money(999.5, Currency::Gbp, Locale::EnGb), "£999.50");
    }

    #[test]
    fn money_clamps_negative_amounts() {
        assert_eq!(format_money(-250.0, Currency::Usd, Locale::EnUs), "$0.00");
    }

    #[test]
    fn percent_is_not_clamped() {
        assert_eq!(format_percent(56.000000001, Locale::EnGb), "56%");
        assert_eq!(format_percent(160.0, Locale::EnGb), "160%");
        assert_eq!(format_percent(-100.0, Locale::EnUs), "-100%");
        assert_eq!(format_percent(4_680_000.0, Locale::DeDe), "4.680.000%");
        assert_eq!(format_percent(-0.3, Locale::EnUs), "0%");
    }

    #[test]
    fn payback_rounds_or_shows_dash() {
        assert_eq!(format_payback(7.692307), "8 months");
        assert_eq!(format_payback(0.0), "0 months");
        assert_eq!(format_payback(f64::INFINITY), "-");
    }

    #[test]
    fn number_omits_trailing_decimals_for_whole_values() {
        assert_eq!(format_number(20000.0, Locale::EnUs), "20,000");
        assert_eq!(format_number(12.5, Locale::DeDe), "12,50");
    }
}
