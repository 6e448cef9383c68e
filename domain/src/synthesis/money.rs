//! Number and word formatting shared by the tool handlers.

/// Two decimals with thousands separators: `1650.0` → `"1,650.00"`.
pub fn format_money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.004 rounds to 0.00 and keeps no sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, cents)
}

/// A percentage as typed: `10` → `"10"`, `12.5` → `"12.5"`.
pub fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 && percent.abs() < 1e15 {
        format!("{}", percent as i64)
    } else {
        format!("{}", percent)
    }
}

/// Capitalise the first letter of every alphabetic run, lower-case the rest.
///
/// `"medium"` → `"Medium"`, `"high-end"` → `"High-End"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
