use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_wire_form() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("hr").unwrap(), Role::Hr);
        assert!(Role::from_str("employee").is_err());
    }

    #[test]
    fn displays_wire_form() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Hr.to_string(), "hr");
    }
}
