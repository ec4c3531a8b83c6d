use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// `JOIN <table> ON <left> = <right>` as written in a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    /// Join type text (`INNER`, `LEFT`, `RIGHT`, any case). Unrecognized
    /// types are not an error; the executor runs the query unjoined.
    pub join_type: String,
    pub table: String,
    pub predicate: JoinPredicate,
}

/// Equality between one column on each side, both written `table.column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinPredicate {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinSpec {
    pub fn new(
        join_type: impl Into<String>,
        table: impl Into<String>,
        predicate: JoinPredicate,
    ) -> Self {
        JoinSpec {
            join_type: join_type.into(),
            table: table.into(),
            predicate,
        }
    }

    /// The recognized join kind, if any.
    pub fn kind(&self) -> Option<JoinKind> {
        self.join_type.parse().ok()
    }
}

impl JoinPredicate {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        JoinPredicate {
            left: left.into(),
            right: right.into(),
        }
    }
}

impl FromStr for JoinKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INNER" => Ok(JoinKind::Inner),
            "LEFT" => Ok(JoinKind::Left),
            "RIGHT" => Ok(JoinKind::Right),
            _ => Err(format!("Unsupported join type: {s}")),
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKind::Inner => write!(f, "INNER"),
            JoinKind::Left => write!(f, "LEFT"),
            JoinKind::Right => write!(f, "RIGHT"),
        }
    }
}
