use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How much of the budget is left, as a band of the remaining percentage.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// More than 50% remaining.
    Healthy,
    /// More than 25% and at most 50% remaining.
    Warning,
    /// 25% or less remaining.
    Danger,
}

serde_plain::derive_display_from_serialize!(Status);
serde_plain::derive_fromstr_from_deserialize!(Status);

impl Status {
    pub fn classify(percentage: Decimal) -> Self {
        if percentage > Decimal::from(50) {
            Status::Healthy
        } else if percentage <= Decimal::from(25) {
            Status::Danger
        } else {
            Status::Warning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pct(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_classify() {
        assert_eq!(Status::classify(pct("100")), Status::Healthy);
        assert_eq!(Status::classify(pct("50.01")), Status::Healthy);
        assert_eq!(Status::classify(pct("50")), Status::Warning);
        assert_eq!(Status::classify(pct("25.01")), Status::Warning);
        assert_eq!(Status::classify(pct("25")), Status::Danger);
        assert_eq!(Status::classify(pct("0")), Status::Danger);
        assert_eq!(Status::classify(pct("-30")), Status::Danger);
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::Healthy.to_string(), "healthy");
        assert_eq!(Status::from_str("danger").unwrap(), Status::Danger);
    }
}
