// Currency formatting for minor-unit amounts
use serde::Deserialize;

const NBSP: char = '\u{a0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "en-US")]
    EnUs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
}

/// Formats integer minor units (cents) as major-unit currency strings.
///
/// The same formatter backs axis ticks and tooltips so every value shown on
/// a chart is in major units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Money {
    locale: Locale,
    currency: Currency,
}

impl Money {
    pub fn new(locale: Locale, currency: Currency) -> Self {
        Self { locale, currency }
    }

    /// Format `cents / 100` without going through floating point.
    pub fn format_minor(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        let major = group_digits(abs / 100, self.group_separator(), self.min_grouping());
        let minor = abs % 100;
        let symbol = self.symbol();

        match self.locale {
            Locale::EsEs => format!("{sign}{major},{minor:02}{NBSP}{symbol}"),
            Locale::EnUs => format!("{sign}{symbol}{major}.{minor:02}"),
        }
    }

    /// Format a chart value (tick or parsed point) given in minor units.
    ///
    /// Ticks may be fractional; they round to the nearest minor unit, half
    /// away from zero. Non-finite values format as zero.
    pub fn format_value(&self, cents: f64) -> String {
        let cents = if cents.is_finite() { cents.round() as i64 } else { 0 };
        self.format_minor(cents)
    }

    fn symbol(&self) -> &'static str {
        match (self.locale, self.currency) {
            (_, Currency::Eur) => "€",
            (Locale::EsEs, Currency::Usd) => "US$",
            (Locale::EnUs, Currency::Usd) => "$",
            (Locale::EsEs, Currency::Gbp) => "GB£",
            (Locale::EnUs, Currency::Gbp) => "£",
        }
    }

    fn group_separator(&self) -> char {
        match self.locale {
            Locale::EsEs => '.',
            Locale::EnUs => ',',
        }
    }

    // Spanish leaves four-digit amounts ungrouped ("1000,00 €").
    fn min_grouping(&self) -> usize {
        match self.locale {
            Locale::EsEs => 5,
            Locale::EnUs => 4,
        }
    }
}

fn group_digits(value: u64, separator: char, min_digits: usize) -> String {
    let digits = value.to_string();
    if digits.len() < min_digits {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eur() -> Money {
        Money::new(Locale::EsEs, Currency::Eur)
    }

    #[test]
    fn test_zero_is_not_blank() {
        assert_eq!(eur().format_minor(0), "0,00\u{a0}€");
        assert_eq!(
            Money::new(Locale::EnUs, Currency::Usd).format_minor(0),
            "$0.00"
        );
    }

    #[test]
    fn test_spanish_grouping() {
        let money = eur();
        assert_eq!(money.format_minor(1000), "10,00\u{a0}€");
        assert_eq!(money.format_minor(5), "0,05\u{a0}€");
        assert_eq!(money.format_minor(100_000), "1000,00\u{a0}€");
        assert_eq!(money.format_minor(1_234_567), "12.345,67\u{a0}€");
        assert_eq!(money.format_minor(123_456_789), "1.234.567,89\u{a0}€");
    }

    #[test]
    fn test_us_grouping() {
        let money = Money::new(Locale::EnUs, Currency::Eur);
        assert_eq!(money.format_minor(100_000), "€1,000.00");
        assert_eq!(money.format_minor(-250), "-€2.50");
        assert_eq!(
            Money::new(Locale::EnUs, Currency::Gbp).format_minor(99),
            "£0.99"
        );
    }

    #[test]
    fn test_every_cent_maps_to_major_units() {
        let money = eur();
        for cents in (0..20_000).step_by(7) {
            let expected = format!("{},{:02}\u{a0}€", cents / 100, cents % 100);
            assert_eq!(money.format_minor(cents), expected);
        }
    }

    #[test]
    fn test_fractional_ticks_round() {
        let money = eur();
        assert_eq!(money.format_value(2.5), "0,03\u{a0}€");
        assert_eq!(money.format_value(-2.5), "-0,03\u{a0}€");
        assert_eq!(money.format_value(1999.4), "19,99\u{a0}€");
        assert_eq!(money.format_value(f64::NAN), "0,00\u{a0}€");
    }
}
