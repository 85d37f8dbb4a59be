use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a value came from. Feeds plus the two internal origins (`Base`, `Document`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    Base,
    Document,
    Str,
    Sitraf,
    Spi,
    Slc,
    Ctc,
    Siloc,
    Pcps,
    Pcr,
    Cql,
    DetectaFlow,
}

impl Source {
    /// Feeds in the order their passes run. Identity-establishing feeds come first.
    pub const MERGE_ORDER: [Source; 10] = [
        Source::Str,
        Source::Sitraf,
        Source::Spi,
        Source::Slc,
        Source::Ctc,
        Source::Siloc,
        Source::Pcps,
        Source::Pcr,
        Source::Cql,
        Source::DetectaFlow,
    ];

    /// Label used in change-report lines.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Base => "Base",
            Source::Document => "Document",
            Source::Str => "STR",
            Source::Sitraf => "SITRAF",
            Source::Spi => "SPI",
            Source::Slc => "SLC",
            Source::Ctc => "CTC",
            Source::Siloc => "SILOC",
            Source::Pcps => "PCPS",
            Source::Pcr => "PCR",
            Source::Cql => "CQL",
            Source::DetectaFlow => "DetectaFlow",
        }
    }

    /// Key used in configuration and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Source::Base => "base",
            Source::Document => "document",
            Source::Str => "str",
            Source::Sitraf => "sitraf",
            Source::Spi => "spi",
            Source::Slc => "slc",
            Source::Ctc => "ctc",
            Source::Siloc => "siloc",
            Source::Pcps => "pcps",
            Source::Pcr => "pcr",
            Source::Cql => "cql",
            Source::DetectaFlow => "detecta_flow",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Source::MERGE_ORDER
            .iter()
            .chain([Source::Base, Source::Document].iter())
            .find(|source| source.key() == wanted || source.label().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| format!("unknown source '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_key_and_label() {
        assert_eq!("str".parse::<Source>(), Ok(Source::Str));
        assert_eq!("SITRAF".parse::<Source>(), Ok(Source::Sitraf));
        assert_eq!("detecta-flow".parse::<Source>(), Ok(Source::DetectaFlow));
        assert_eq!("DetectaFlow".parse::<Source>(), Ok(Source::DetectaFlow));
        assert!("boleto".parse::<Source>().is_err());
    }
}
