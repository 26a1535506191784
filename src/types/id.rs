use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a row, column or cell group.
///
/// Hosts may use either strings or integers; both compare by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Str(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json_round_trip() {
        let ids: Vec<Id> = serde_json::from_str(r#"["a", 7]"#).unwrap();
        assert_eq!(ids, vec![Id::from("a"), Id::from(7)]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"["a",7]"#);
    }

    #[test]
    fn display_is_bare_value() {
        assert_eq!(Id::from("price").to_string(), "price");
        assert_eq!(Id::from(-3).to_string(), "-3");
    }
}
