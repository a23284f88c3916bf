//! Display formatting shared by the chart builders and the dashboard cards.

/// Groups the integer part of `value` in thousands: `1234567.0` -> `"1,234,567"`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + decimals + 2);
    for (idx, digit) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = rendered.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn group_int(value: i64) -> String {
    group_thousands(value as f64, 0)
}

/// `$` amount in thousands with a `k` suffix, sign after the currency symbol.
pub fn currency_k(value: f64, decimals: usize) -> String {
    format!("${}k", group_thousands(value / 1000.0, decimals))
}

/// Like [`currency_k`] without thousands separators, as used on chart bars.
pub fn plain_k(value: f64, decimals: usize) -> String {
    format!("${:.*}k", decimals, value / 1000.0)
}

/// Negated `$` amount in thousands for a magnitude shown as a deduction.
pub fn deduction_k(magnitude: f64, decimals: usize) -> String {
    format!("-{}", plain_k(magnitude, decimals))
}

pub fn currency(value: f64) -> String {
    format!("${}", group_thousands(value, 0))
}

pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}
