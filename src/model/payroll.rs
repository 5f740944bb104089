use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    Pending,
    Paid,
    Cancelled,
}

/// Net pay is derived, never taken from the client.
pub fn net_salary(base_salary: f64, bonus: f64, deductions: f64) -> f64 {
    base_salary + bonus - deductions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn net_salary_is_base_plus_bonus_minus_deductions() {
        assert_eq!(net_salary(50000.0, 5000.0, 2000.0), 53000.0);
        assert_eq!(net_salary(1000.0, 0.0, 0.0), 1000.0);
    }

    #[test]
    fn net_salary_handles_negative_adjustments() {
        // Negative bonus/deductions are not rejected anywhere upstream.
        assert_eq!(net_salary(1000.0, -100.0, 0.0), 900.0);
        assert_eq!(net_salary(1000.0, 0.0, -100.0), 1100.0);
        assert_eq!(net_salary(0.0, -50.0, -50.0), 0.0);
    }

    #[test]
    fn status_parses_lowercase() {
        assert_eq!(
            PayrollStatus::from_str("pending").unwrap(),
            PayrollStatus::Pending
        );
        assert_eq!(PayrollStatus::from_str("paid").unwrap(), PayrollStatus::Paid);
        assert_eq!(
            PayrollStatus::from_str("cancelled").unwrap(),
            PayrollStatus::Cancelled
        );
        assert!(PayrollStatus::from_str("void").is_err());
    }
}
