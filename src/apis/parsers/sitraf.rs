use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{compiled, group, number, splice_lines, Pattern, SequenceCheck};
use crate::apis::base::FeedParser;
use crate::common::text::clean_name;
use crate::domain::{Entity, Source};
use crate::error::Result;

static SITRAF_LINE: Pattern =
    Lazy::new(|| Regex::new(r"(?i)^(?P<code>\d{1,3})\s(?P<compe>\d{3})\s(?P<ispb>\d{8})\s(?P<nome>.+?)$"));

/// SITRAF client list: sequence, clearing code, ISPB, name.
pub struct SitrafParser;

impl FeedParser for SitrafParser {
    fn source(&self) -> Source {
        Source::Sitraf
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let pattern = compiled(&SITRAF_LINE)?;
        let mut sequence = SequenceCheck::new(Source::Sitraf);

        Ok(splice_lines(text, pattern, None, |line| {
            let captures = pattern.captures(line)?;
            sequence.observe(number(&captures, "code")?);
            Some(Entity {
                clearing_code: number(&captures, "compe")?,
                ispb: number(&captures, "ispb")?,
                long_name: clean_name(group(&captures, "nome")),
                ..Entity::default()
            })
        }))
    }
}
