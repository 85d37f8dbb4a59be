use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{compiled, group, number, splice_lines, Pattern, SequenceCheck};
use crate::apis::base::FeedParser;
use crate::common::document;
use crate::common::text::clean_name;
use crate::domain::{Entity, Source};
use crate::error::Result;

static SLC_LINE: Pattern = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<code>\d{1,3})\s(?P<cnpj>\d{1,2}\.\d{3}\.\d{3}(?:.|/)\d{4}([-|·|\.|\s]{1,2})\d{2})\s(?P<nome>.+?)(?:[\s|X]){2,7}(Confidencial)?$",
    )
});

/// SLC homologated participants: sequence, CNPJ, name, then a row of X marks.
pub struct SlcParser;

impl FeedParser for SlcParser {
    fn source(&self) -> Source {
        Source::Slc
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let pattern = compiled(&SLC_LINE)?;
        let mut sequence = SequenceCheck::new(Source::Slc);

        Ok(splice_lines(text, pattern, None, |line| {
            let captures = pattern.captures(line)?;
            sequence.observe(number(&captures, "code")?);
            Some(Entity {
                document: document::normalize(group(&captures, "cnpj")),
                long_name: clean_name(group(&captures, "nome")),
                ..Entity::default()
            })
        }))
    }
}
