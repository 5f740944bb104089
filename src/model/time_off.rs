use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Rejected,
}

impl TimeOffStatus {
    /// Only pending -> approved and pending -> rejected exist; both targets
    /// are terminal.
    pub fn is_reviewable_target(self) -> bool {
        matches!(self, TimeOffStatus::Approved | TimeOffStatus::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn only_approved_and_rejected_are_review_targets() {
        assert!(TimeOffStatus::Approved.is_reviewable_target());
        assert!(TimeOffStatus::Rejected.is_reviewable_target());
        assert!(!TimeOffStatus::Pending.is_reviewable_target());
    }

    #[test]
    fn unknown_status_does_not_parse() {
        assert!(TimeOffStatus::from_str("cancelled").is_err());
        assert!(TimeOffStatus::from_str("Approved").is_err());
    }
}
