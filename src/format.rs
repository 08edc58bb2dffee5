//! Display formatting for monetary amounts and percentages.
//!
//! Only presentation surfaces (the terminal dashboard) use these; the engine
//! and the CSV export keep raw numbers.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Formats an amount as a currency string with two decimal places.
pub fn currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // numfmt hardcodes zero as "0", so the zero string is spelled out here
        "$0.00".to_owned()
    };

    // numfmt drops the last trailing zero ("12.30" renders as "12.3"),
    // so it has to be restored.
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

/// Formats a rate as a percentage string with two decimal places.
pub fn percent(number: f64) -> String {
    format!("{number:.2}%")
}

#[cfg(test)]
mod tests {
    use super::{currency, percent};

    #[test]
    fn formats_zero_with_two_decimals() {
        assert_eq!(currency(0.0), "$0.00");
    }

    #[test]
    fn restores_the_trailing_zero() {
        assert_eq!(currency(12.3), "$12.30");
    }

    #[test]
    fn formats_whole_amounts() {
        assert_eq!(currency(150.0), "$150.00");
    }

    #[test]
    fn formats_negative_amounts_with_a_leading_sign() {
        assert_eq!(currency(-42.5), "-$42.50");
    }

    #[test]
    fn formats_percentages() {
        assert_eq!(percent(2.5), "2.50%");
        assert_eq!(percent(0.0), "0.00%");
    }
}
