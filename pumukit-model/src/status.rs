use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication status of a multimedia object.
///
/// Each series holds one `Prototype` object, the template new objects of
/// the series are copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Prototype,
    #[default]
    New,
    Normal,
    Blocked,
    Hidden,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Self::Prototype,
        Self::New,
        Self::Normal,
        Self::Blocked,
        Self::Hidden,
    ];

    /// Numeric code stored alongside the document.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Prototype => -2,
            Self::New => -1,
            Self::Normal => 0,
            Self::Blocked => 1,
            Self::Hidden => 2,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prototype => "prototype",
            Self::New => "new",
            Self::Normal => "normal",
            Self::Blocked => "blocked",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}
