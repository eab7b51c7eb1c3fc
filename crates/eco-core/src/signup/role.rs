use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account type chosen in the first signup step.
///
/// The role decides which later steps exist (see [`crate::signup::StepSequencer`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationRole {
    Customer,
    #[serde(alias = "eventOrganizer")]
    Organizer,
    Shop,
}

impl RegistrationRole {
    pub const ALL: [RegistrationRole; 3] = [
        RegistrationRole::Customer,
        RegistrationRole::Organizer,
        RegistrationRole::Shop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationRole::Customer => "customer",
            RegistrationRole::Organizer => "organizer",
            RegistrationRole::Shop => "shop",
        }
    }

    /// Value sent as `role` in the registration request.
    ///
    /// `None` (no role picked) maps to `"customer"`.
    pub fn wire_value(role: Option<RegistrationRole>) -> &'static str {
        match role {
            Some(RegistrationRole::Shop) => "shop",
            Some(RegistrationRole::Organizer) => "organizer",
            _ => "customer",
        }
    }

    pub fn is_shop(&self) -> bool {
        matches!(self, RegistrationRole::Shop)
    }
}

impl fmt::Display for RegistrationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown registration role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for RegistrationRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "customer" => Ok(RegistrationRole::Customer),
            "organizer" | "eventOrganizer" => Ok(RegistrationRole::Organizer),
            "shop" => Ok(RegistrationRole::Shop),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_event_organizer_value() {
        assert_eq!(
            "eventOrganizer".parse::<RegistrationRole>(),
            Ok(RegistrationRole::Organizer)
        );
        assert!("admin".parse::<RegistrationRole>().is_err());
    }

    #[test]
    fn wire_value_defaults_to_customer() {
        assert_eq!(RegistrationRole::wire_value(Some(RegistrationRole::Shop)), "shop");
        assert_eq!(
            RegistrationRole::wire_value(Some(RegistrationRole::Organizer)),
            "organizer"
        );
        assert_eq!(
            RegistrationRole::wire_value(Some(RegistrationRole::Customer)),
            "customer"
        );
        assert_eq!(RegistrationRole::wire_value(None), "customer");
    }
}
