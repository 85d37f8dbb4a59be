use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{compiled, each_line, group, number, Pattern, SequenceCheck};
use crate::apis::base::FeedParser;
use crate::common::text::clean_name;
use crate::domain::{Entity, Flag, Source};
use crate::error::Result;

static CQL_LINE: Pattern =
    Lazy::new(|| Regex::new(r"(?i)^(?P<code>\d{1,3})\s(?P<nome>.+?)\s(?P<ispb>\d{7,8})\s(?P<tipo>.+?)$"));

/// CQL participants. Presence in the list means legal-cheque capable.
pub struct CqlParser;

impl FeedParser for CqlParser {
    fn source(&self) -> Source {
        Source::Cql
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let pattern = compiled(&CQL_LINE)?;
        let mut sequence = SequenceCheck::new(Source::Cql);

        Ok(each_line(text, |line| {
            let captures = pattern.captures(line)?;
            sequence.observe(number(&captures, "code")?);
            Some(Entity {
                ispb: number(&captures, "ispb")?,
                long_name: clean_name(group(&captures, "nome")),
                kind: group(&captures, "tipo").to_string(),
                legal_cheque: Flag::Yes,
                ..Entity::default()
            })
        }))
    }
}
