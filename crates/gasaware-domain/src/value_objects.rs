//! Value objects representing immutable domain concepts

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new random identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Create from string representation
            pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(uuid::Uuid::parse_str(s)?))
            }

            /// Underlying UUID
            pub fn as_uuid(&self) -> uuid::Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// User identifier
    UserId
);
entity_id!(
    /// Video identifier
    VideoId
);
entity_id!(
    /// Simulation identifier
    SimulationId
);
entity_id!(
    /// Survey identifier
    SurveyId
);
entity_id!(
    /// Question identifier, shared by simulation and survey questions
    QuestionId
);
entity_id!(
    /// Answer option identifier
    OptionId
);
entity_id!(
    /// Attempt identifier
    AttemptId
);
entity_id!(
    /// Score identifier
    ScoreId
);
entity_id!(
    /// Content targeting rule identifier
    RuleId
);
entity_id!(
    /// Generic record identifier for append-only logs
    RecordId
);

/// Age segment of a user. Ordered: a group may access content targeted at
/// itself and every younger group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AgeGroup {
    Child,
    Adult,
    Senior,
}

impl AgeGroup {
    /// All groups in ascending order
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Child, AgeGroup::Adult, AgeGroup::Senior];

    /// Upper age bound (inclusive) of the child group
    pub const CHILD_MAX_AGE: i32 = 12;
    /// Upper age bound (inclusive) of the adult group
    pub const ADULT_MAX_AGE: i32 = 65;

    /// Derive the age group from a birth date as of `today`
    pub fn from_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Self {
        Self::from_age(age_on(birth_date, today))
    }

    /// Map a whole-year age onto a group
    pub fn from_age(age: i32) -> Self {
        if age <= Self::CHILD_MAX_AGE {
            AgeGroup::Child
        } else if age <= Self::ADULT_MAX_AGE {
            AgeGroup::Adult
        } else {
            AgeGroup::Senior
        }
    }

    /// Whether a member of this group may see content whose minimum group is `min`
    pub fn can_access(&self, min: AgeGroup) -> bool {
        min <= *self
    }

    /// Groups whose content this group may see
    pub fn allowed_groups(&self) -> Vec<AgeGroup> {
        Self::ALL.into_iter().filter(|g| self.can_access(*g)).collect()
    }

    /// Variant name
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Child => "Child",
            AgeGroup::Adult => "Adult",
            AgeGroup::Senior => "Senior",
        }
    }
}

/// Whole years between `birth_date` and `today`
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Subscription tier of a gas customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SubscriptionType {
    /// Individual household
    Bireysel,
    /// Central heating (building-wide)
    Merkezi,
    /// Industrial
    Endustriyel,
}

impl SubscriptionType {
    /// All tiers in declaration order
    pub const ALL: [SubscriptionType; 3] = [
        SubscriptionType::Bireysel,
        SubscriptionType::Merkezi,
        SubscriptionType::Endustriyel,
    ];

    /// Variant name
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Bireysel => "Bireysel",
            SubscriptionType::Merkezi => "Merkezi",
            SubscriptionType::Endustriyel => "Endustriyel",
        }
    }
}

/// Role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserRole {
    #[default]
    User,
    Editor,
    Admin,
}

impl UserRole {
    /// Variant name
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "User",
            UserRole::Editor => "Editor",
            UserRole::Admin => "Admin",
        }
    }

    /// Create and update videos, simulations and surveys
    pub fn can_author_content(&self) -> bool {
        matches!(self, UserRole::Editor | UserRole::Admin)
    }

    /// Delete content, manage targeting rules, read reports
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(UserRole::User),
            "Editor" => Ok(UserRole::Editor),
            "Admin" => Ok(UserRole::Admin),
            other => Err(DomainError::validation("role", format!("unknown role '{other}'"))),
        }
    }
}

/// Platform module a score or targeting rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ModuleType {
    Video,
    Simulation,
    Survey,
}

/// Kind of survey question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum QuestionType {
    SingleChoice,
    TrueFalse,
    /// Numeric answer on a 0..=10 scale
    Scale,
}

impl QuestionType {
    /// Highest numeric answer accepted for scale questions
    pub const SCALE_MAX: i32 = 10;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let birth = date(2000, 6, 15);
        assert_eq!(age_on(birth, date(2020, 6, 14)), 19);
        assert_eq!(age_on(birth, date(2020, 6, 15)), 20);
    }

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(AgeGroup::from_age(12), AgeGroup::Child);
        assert_eq!(AgeGroup::from_age(13), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_age(65), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_age(66), AgeGroup::Senior);
    }

    #[test]
    fn test_age_group_from_birth_date() {
        let today = date(2026, 1, 1);
        assert_eq!(AgeGroup::from_birth_date(date(2018, 5, 1), today), AgeGroup::Child);
        assert_eq!(AgeGroup::from_birth_date(date(1990, 5, 1), today), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_birth_date(date(1950, 5, 1), today), AgeGroup::Senior);
    }

    #[test]
    fn test_access_hierarchy() {
        assert_eq!(AgeGroup::Child.allowed_groups(), vec![AgeGroup::Child]);
        assert_eq!(
            AgeGroup::Adult.allowed_groups(),
            vec![AgeGroup::Child, AgeGroup::Adult]
        );
        assert_eq!(AgeGroup::Senior.allowed_groups(), AgeGroup::ALL.to_vec());
        assert!(!AgeGroup::Child.can_access(AgeGroup::Senior));
    }

    #[test]
    fn test_role_permissions() {
        assert!(!UserRole::User.can_author_content());
        assert!(UserRole::Editor.can_author_content());
        assert!(!UserRole::Editor.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert_eq!("Editor".parse::<UserRole>().unwrap(), UserRole::Editor);
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_id_roundtrip() {
        let id = VideoId::new();
        assert_eq!(VideoId::from_string(&id.to_string()).unwrap(), id);
        assert!(VideoId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_enums_serialize_by_name() {
        assert_eq!(serde_json::to_string(&AgeGroup::Senior).unwrap(), "\"Senior\"");
        assert_eq!(
            serde_json::to_string(&SubscriptionType::Endustriyel).unwrap(),
            "\"Endustriyel\""
        );
    }
}
