//! Display formatting helpers for prices and large quantities.

/// Format a price with precision scaled to magnitude: sub-cent values
/// get 8 decimals, sub-unit values 4, everything else 2 with thousands
/// grouping. Unavailable prices render as "0.00".
pub fn format_price(value: Option<f64>) -> String {
    let v = match value {
        Some(v) if v > 0.0 => v,
        _ => return "0.00".to_string(),
    };
    if v < 0.0001 {
        format!("{v:.8}")
    } else if v < 1.0 {
        format!("{v:.4}")
    } else {
        group_thousands(&format!("{v:.2}"))
    }
}

/// Compact K/M/B formatting for volumes and market caps; unavailable
/// values render as "---".
pub fn format_compact(value: Option<f64>) -> String {
    let v = match value {
        Some(v) if v > 0.0 => v,
        _ => return "---".to_string(),
    };
    if v >= 1_000_000_000.0 {
        format!("{:.2}B", v / 1_000_000_000.0)
    } else if v >= 1_000_000.0 {
        format!("{:.2}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.2}K", v / 1_000.0)
    } else {
        format!("{v:.2}")
    }
}

/// Signed percentage with an explicit plus for gains. A missing value
/// displays as a flat 0.
pub fn format_change(pct: Option<f64>) -> String {
    let c = pct.unwrap_or(0.0);
    if c > 0.0 {
        format!("+{c:.2}%")
    } else {
        format!("{c:.2}%")
    }
}

fn group_thousands(formatted: &str) -> String {
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}
