use std::fmt;

// ---------------------------------------------------------------------------
// Expression thresholds
// ---------------------------------------------------------------------------

/// Values strictly below this are `Low`.
pub const LOW_THRESHOLD: f64 = 2.0;

/// Values strictly above this are `High`.
pub const HIGH_THRESHOLD: f64 = 5.0;

// ---------------------------------------------------------------------------
// ExpressionCategory
// ---------------------------------------------------------------------------

/// Display bucket for an expression value.
///
/// Every view (table badge, trend icon, chart bar colour) goes through
/// [`ExpressionCategory::classify`] so the thresholds can never drift apart.
///
/// * `Low`    – `(-inf, 2.0)`
/// * `Medium` – `[2.0, 5.0]`
/// * `High`   – `(5.0, inf)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpressionCategory {
    Low,
    Medium,
    High,
}

impl ExpressionCategory {
    pub const ALL: [ExpressionCategory; 3] = [
        ExpressionCategory::Low,
        ExpressionCategory::Medium,
        ExpressionCategory::High,
    ];

    pub fn classify(value: f64) -> Self {
        if value > HIGH_THRESHOLD {
            ExpressionCategory::High
        } else if value < LOW_THRESHOLD {
            ExpressionCategory::Low
        } else {
            ExpressionCategory::Medium
        }
    }

    /// Lower-case badge text.
    pub fn label(self) -> &'static str {
        match self {
            ExpressionCategory::Low => "low",
            ExpressionCategory::Medium => "medium",
            ExpressionCategory::High => "high",
        }
    }

    /// Capitalised label used in tooltips and legends.
    pub fn title(self) -> &'static str {
        match self {
            ExpressionCategory::Low => "Low",
            ExpressionCategory::Medium => "Medium",
            ExpressionCategory::High => "High",
        }
    }

    /// Trend glyph shown next to the value in tables.
    pub fn trend_icon(self) -> &'static str {
        match self {
            ExpressionCategory::Low => "▼",
            ExpressionCategory::Medium => "–",
            ExpressionCategory::High => "▲",
        }
    }

    /// Human-readable range, e.g. `< 2.0`.
    pub fn range_text(self) -> String {
        match self {
            ExpressionCategory::Low => format!("< {LOW_THRESHOLD:.1}"),
            ExpressionCategory::Medium => format!("{LOW_THRESHOLD:.1} – {HIGH_THRESHOLD:.1}"),
            ExpressionCategory::High => format!("> {HIGH_THRESHOLD:.1}"),
        }
    }
}

impl fmt::Display for ExpressionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_medium() {
        assert_eq!(ExpressionCategory::classify(2.0), ExpressionCategory::Medium);
        assert_eq!(ExpressionCategory::classify(5.0), ExpressionCategory::Medium);
    }

    #[test]
    fn just_outside_boundaries() {
        assert_eq!(ExpressionCategory::classify(1.999), ExpressionCategory::Low);
        assert_eq!(ExpressionCategory::classify(5.001), ExpressionCategory::High);
    }

    #[test]
    fn extremes() {
        assert_eq!(ExpressionCategory::classify(-1e9), ExpressionCategory::Low);
        assert_eq!(ExpressionCategory::classify(0.0), ExpressionCategory::Low);
        assert_eq!(ExpressionCategory::classify(3.5), ExpressionCategory::Medium);
        assert_eq!(ExpressionCategory::classify(f64::MAX), ExpressionCategory::High);
    }

    #[test]
    fn labels_and_icons_are_distinct() {
        let labels: Vec<_> = ExpressionCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["low", "medium", "high"]);

        let icons: std::collections::BTreeSet<_> =
            ExpressionCategory::ALL.iter().map(|c| c.trend_icon()).collect();
        assert_eq!(icons.len(), 3);
    }

    #[test]
    fn display_uses_badge_label() {
        assert_eq!(ExpressionCategory::High.to_string(), "high");
        assert_eq!(ExpressionCategory::Low.range_text(), "< 2.0");
    }
}
