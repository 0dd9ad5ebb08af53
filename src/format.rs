// ---------------------------------------------------------------------------
// Number formatting for KPIs, axes, and summary cells
// ---------------------------------------------------------------------------

/// Format with thousands separators and a fixed number of decimals.
pub fn thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((&raw, ""));

    let mut grouped = String::new();
    for (idx, ch) in int_part.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    if decimals == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// KPI money rendering: two decimals, thousands separators, rupee marker.
pub fn currency(value: f64) -> String {
    format!("{} ₹", thousands(value, 2))
}

/// Axis tick rendering: whole amounts with separators.
pub fn axis_amount(value: f64) -> String {
    thousands(value, 0)
}

/// Summary-cell rendering of a recovery percentage; `None` (undefined, the
/// zero-loss case) renders blank.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(thousands(1000.0, 0), "1,000");
        assert_eq!(thousands(999.0, 0), "999");
        assert_eq!(thousands(0.0, 2), "0.00");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside_the_grouping() {
        assert_eq!(thousands(-1234.5, 2), "-1,234.50");
    }

    #[test]
    fn non_finite_renders_blank() {
        assert_eq!(thousands(f64::NAN, 2), "");
        assert_eq!(thousands(f64::INFINITY, 0), "");
    }

    #[test]
    fn currency_and_percent() {
        assert_eq!(currency(1500.0), "1,500.00 ₹");
        assert_eq!(percent(Some(26.666_666)), "26.67%");
        assert_eq!(percent(None), "");
    }
}
