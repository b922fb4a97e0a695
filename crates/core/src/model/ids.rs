use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an id from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying row id.
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self::new)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

row_id!(
    /// Identifier of a registered user.
    UserId
);
row_id!(
    /// Identifier of a skill area.
    SkillId
);
row_id!(
    /// Identifier of a practice question. Navigation order follows this id.
    QuestionId
);
row_id!(
    /// Identifier of a recorded attempt.
    AttemptId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_display() {
        assert_eq!(QuestionId::new(42).to_string(), "42");
    }

    #[test]
    fn skill_id_from_str_trims_whitespace() {
        let id: SkillId = " 7 ".parse().unwrap();
        assert_eq!(id, SkillId::new(7));
    }

    #[test]
    fn id_from_str_rejects_garbage() {
        let err = "abc".parse::<QuestionId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse QuestionId from string");
        assert!("-1".parse::<UserId>().is_err());
    }

    #[test]
    fn debug_names_the_kind() {
        assert_eq!(format!("{:?}", AttemptId::new(3)), "AttemptId(3)");
    }

    #[test]
    fn ids_order_by_value() {
        assert!(QuestionId::new(1) < QuestionId::new(2));
    }
}
