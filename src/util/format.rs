/// Formats an integer with comma thousands separators, e.g. `150000` → `150,000`.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Renders a fixed-width text progress bar such as `` `████░░░░` 40/100 ``.
pub fn progress_bar(current: u64, total: u64, length: usize) -> String {
    let filled = if total == 0 {
        length
    } else {
        let ratio = (current.min(total) as f64) / (total as f64);
        (ratio * length as f64).round() as usize
    };

    format!(
        "`{}{}` {}/{}",
        "█".repeat(filled),
        "░".repeat(length - filled),
        format_number(current),
        format_number(total)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(150000), "150,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(50, 100, 4), "`██░░` 50/100");
        assert_eq!(progress_bar(250, 100, 2), "`██` 250/100");
        assert_eq!(progress_bar(0, 1000, 3), "`░░░` 0/1,000");
    }
}
