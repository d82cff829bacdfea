use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

const CURRENT: &str = "current";

/// Reference to one side of a comparison: a numbered revision or the page's
/// current revision.
///
/// Serialized as a JSON number or the string `"current"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRevisionRef", into = "RawRevisionRef")]
pub enum RevisionRef {
    Number(u64),
    #[default]
    Current,
}

impl RevisionRef {
    /// Resolve to a concrete number, using `current` for the sentinel.
    pub fn resolve(&self, current: u64) -> u64 {
        match self {
            Self::Number(n) => *n,
            Self::Current => current,
        }
    }

    /// Display label for a comparison header.
    ///
    /// Numbers render as `vN`. The sentinel renders as the current revision's
    /// number when it is known, otherwise as `current`.
    pub fn label(&self, current_number: Option<u64>) -> String {
        match (*self, current_number) {
            (Self::Number(n), _) | (Self::Current, Some(n)) => format!("v{n}"),
            (Self::Current, None) => CURRENT.to_string(),
        }
    }
}

impl fmt::Display for RevisionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Current => f.write_str(CURRENT),
        }
    }
}

impl FromStr for RevisionRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(CURRENT) {
            return Ok(Self::Current);
        }
        let digits = s.strip_prefix('v').unwrap_or(s);
        digits
            .parse::<u64>()
            .map(Self::Number)
            .map_err(|_| TypeError::InvalidRevision(s.to_string()))
    }
}

impl From<u64> for RevisionRef {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRevisionRef {
    Number(u64),
    Text(String),
}

impl TryFrom<RawRevisionRef> for RevisionRef {
    type Error = TypeError;

    fn try_from(raw: RawRevisionRef) -> Result<Self, Self::Error> {
        match raw {
            RawRevisionRef::Number(n) => Ok(Self::Number(n)),
            RawRevisionRef::Text(s) => s.parse(),
        }
    }
}

impl From<RevisionRef> for RawRevisionRef {
    fn from(rev: RevisionRef) -> Self {
        match rev {
            RevisionRef::Number(n) => Self::Number(n),
            RevisionRef::Current => Self::Text(CURRENT.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_current_and_numbers() {
        assert_eq!("current".parse::<RevisionRef>().unwrap(), RevisionRef::Current);
        assert_eq!("CURRENT".parse::<RevisionRef>().unwrap(), RevisionRef::Current);
        assert_eq!("12".parse::<RevisionRef>().unwrap(), RevisionRef::Number(12));
        assert_eq!("v3".parse::<RevisionRef>().unwrap(), RevisionRef::Number(3));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "latest".parse::<RevisionRef>().unwrap_err();
        assert_eq!(err, TypeError::InvalidRevision("latest".into()));
        assert!("-1".parse::<RevisionRef>().is_err());
    }

    #[test]
    fn json_shape() {
        assert_eq!(serde_json::to_string(&RevisionRef::Number(4)).unwrap(), "4");
        assert_eq!(serde_json::to_string(&RevisionRef::Current).unwrap(), "\"current\"");
        let back: RevisionRef = serde_json::from_str("\"current\"").unwrap();
        assert_eq!(back, RevisionRef::Current);
        let back: RevisionRef = serde_json::from_str("9").unwrap();
        assert_eq!(back, RevisionRef::Number(9));
        assert!(serde_json::from_str::<RevisionRef>("\"newest\"").is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(RevisionRef::Number(2).label(Some(5)), "v2");
        assert_eq!(RevisionRef::Current.label(Some(5)), "v5");
        assert_eq!(RevisionRef::Current.label(None), "current");
    }

    #[test]
    fn resolve_sentinel() {
        assert_eq!(RevisionRef::Current.resolve(8), 8);
        assert_eq!(RevisionRef::Number(3).resolve(8), 3);
    }
}
