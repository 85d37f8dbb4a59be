use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Participation in an optional program. `Unset` means no feed has said either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flag {
    #[default]
    Unset,
    Yes,
    No,
}

impl Flag {
    /// Reads the feed vocabulary ("sim"/"não", "yes"/"no", "true"/"false").
    pub fn parse(raw: &str) -> Self {
        match crate::common::text::fold(raw).as_str() {
            "sim" | "s" | "yes" | "true" => Flag::Yes,
            "nao" | "n" | "no" | "false" => Flag::No,
            _ => Flag::Unset,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Flag::Unset => None,
            Flag::Yes => Some(true),
            Flag::No => Some(false),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Unset => "",
            Flag::Yes => "sim",
            Flag::No => "não",
        }
    }

    pub fn is_yes(self) -> bool {
        self == Flag::Yes
    }
}

impl From<Option<bool>> for Flag {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Flag::Unset,
            Some(true) => Flag::Yes,
            Some(false) => Flag::No,
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag::from(Some(value))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bool().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<bool>::deserialize(deserializer)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feed_vocabulary() {
        assert_eq!(Flag::parse("sim"), Flag::Yes);
        assert_eq!(Flag::parse("NÃO"), Flag::No);
        assert_eq!(Flag::parse("não"), Flag::No);
        assert_eq!(Flag::parse(""), Flag::Unset);
    }

    #[test]
    fn test_json_uses_nullable_bool() {
        assert_eq!(serde_json::to_string(&Flag::Yes).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Flag::Unset).unwrap(), "null");
        let parsed: Flag = serde_json::from_str("false").unwrap();
        assert_eq!(parsed, Flag::No);
    }
}
