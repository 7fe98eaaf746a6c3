//! Report rendering for estimate results.

use crate::domain::EstimateResult;

/// Render a result as the human-readable memento mori message.
#[must_use]
pub fn render_text(result: &EstimateResult, breakdown: bool) -> String {
    let mut lines = vec![format!(
        "Expected until {} ({:.2} years)",
        result.expected_end_date(),
        result.expectancy_years
    )];

    if result.is_past_expectancy() {
        lines.push("Already past the estimate. Every day from here is extra.".to_string());
    } else {
        lines.push(format!(
            "{} days, {} hours remain",
            group_thousands(result.remaining_days()),
            result.remaining_hours()
        ));
    }

    if breakdown {
        lines.push(String::new());
        lines.push(format!(
            "  {:<26} {:>7.2}",
            format!("baseline ({})", result.model),
            result.baseline_years
        ));
        for c in &result.contributions {
            lines.push(format!("  {:<26} {:>+7.2}", c.attribute, c.years));
        }
        lines.push(format!("  {:<26} {:>7.2}", "total", result.expectancy_years));
        lines.push(String::new());
    }

    lines.push("Memento mori.".to_string());
    lines.join("\n")
}

/// Render a result as pretty-printed JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render_json(result: &EstimateResult) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contribution, EstimateModel};
    use chrono::NaiveDate;

    fn result(baseline: f64, contributions: Vec<Contribution>) -> EstimateResult {
        EstimateResult::new(
            NaiveDate::from_ymd_opt(2001, 9, 11).expect("valid"),
            NaiveDate::from_ymd_opt(2026, 10, 18)
                .expect("valid")
                .and_hms_opt(0, 0, 0)
                .expect("valid"),
            EstimateModel::Period,
            baseline,
            contributions,
        )
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(22_316), "22,316");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_text_report() {
        let text = render_text(&result(78.8, Vec::new()), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Expected until 2080-"));
        assert!(lines[0].ends_with("(78.80 years)"));
        assert!(lines[1].ends_with("hours remain"));
        assert_eq!(lines[2], "Memento mori.");
    }

    #[test]
    fn test_breakdown_lists_contributions() {
        let text = render_text(
            &result(
                78.65,
                vec![Contribution {
                    attribute: "left-handed".into(),
                    years: -1.0,
                }],
            ),
            true,
        );
        assert!(text.contains("baseline (period)"));
        assert!(text.contains("left-handed"));
        assert!(text.contains("-1.00"));
        assert!(text.contains("77.65"));
    }

    #[test]
    fn test_past_expectancy_message() {
        let text = render_text(&result(10.0, Vec::new()), false);
        assert!(text.contains("Already past the estimate"));
        assert!(!text.contains("remain"));
    }
}
