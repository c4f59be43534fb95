//! Price formatting for display
//!
//! English uses Latin digits and `,` grouping; Arabic uses Arabic-Indic
//! digits with `٬` grouping and `٫` as the decimal separator.

use rust_decimal::Decimal;

use crate::catalog::Language;
use crate::money::round_money;

const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Format an amount in SAR for the given language
pub fn format_price(amount: Decimal, language: Language) -> String {
    match language {
        Language::En => format!("{} SAR", format_number(amount, ',', '.', |c| c)),
        Language::Ar => format!("{} ر.س", format_number(amount, '٬', '٫', to_arabic_digit)),
    }
}

fn to_arabic_digit(c: char) -> char {
    c.to_digit(10)
        .map(|d| ARABIC_DIGITS[d as usize])
        .unwrap_or(c)
}

fn format_number(amount: Decimal, group: char, point: char, digit: impl Fn(char) -> char) -> String {
    let text = round_money(amount).normalize().abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if amount.is_sign_negative() && !round_money(amount).is_zero() {
        out.push('-');
    }

    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(group);
        }
        out.push(digit(c));
    }

    if let Some(frac) = frac_part {
        out.push(point);
        out.extend(frac.chars().map(&digit));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_english() {
        assert_eq!(format_price(dec!(305), Language::En), "305 SAR");
        assert_eq!(format_price(dec!(1234.5), Language::En), "1,234.5 SAR");
        assert_eq!(format_price(dec!(169.377713), Language::En), "169.38 SAR");
        assert_eq!(format_price(dec!(1000000), Language::En), "1,000,000 SAR");
        assert_eq!(format_price(dec!(0.00), Language::En), "0 SAR");
    }

    #[test]
    fn test_format_arabic() {
        assert_eq!(format_price(dec!(305), Language::Ar), "٣٠٥ ر.س");
        assert_eq!(format_price(dec!(1234.5), Language::Ar), "١٬٢٣٤٫٥ ر.س");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_price(dec!(-1250), Language::En), "-1,250 SAR");
        assert_eq!(format_price(dec!(-0.001), Language::En), "0 SAR");
    }
}
