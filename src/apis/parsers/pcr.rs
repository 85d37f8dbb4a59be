use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{compiled, group, number, splice_lines, Pattern, SequenceCheck};
use crate::apis::base::FeedParser;
use crate::common::document;
use crate::common::text::clean_name;
use crate::domain::{Entity, Flag, Source};
use crate::error::Result;

static PCR_LINE: Pattern = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<code>\d{1,3})\s(?P<nome>.+?)\s(?P<cnpj>\d{1,2}\.\d{3}\.\d{3}(?:.|/)\d{4}([-|·|\.|\s]{1,2})\d{2})\s+(?P<compe>\d{3})\s+(?P<ispb>\d{7,8})\s(?P<pcr>.{3})\s(?P<pcrp>.{3})(.+)?$",
    )
});

/// PCR clients with their PCR and PCR-P enrolment.
pub struct PcrParser;

impl FeedParser for PcrParser {
    fn source(&self) -> Source {
        Source::Pcr
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let pattern = compiled(&PCR_LINE)?;
        let mut sequence = SequenceCheck::new(Source::Pcr);

        Ok(splice_lines(text, pattern, None, |line| {
            let captures = pattern.captures(line)?;
            sequence.observe(number(&captures, "code")?);
            Some(Entity {
                document: document::normalize(group(&captures, "cnpj")),
                clearing_code: number(&captures, "compe")?,
                ispb: number(&captures, "ispb")?,
                long_name: clean_name(group(&captures, "nome")),
                pcr: Flag::parse(group(&captures, "pcr")),
                pcrp: Flag::parse(group(&captures, "pcrp")),
                ..Entity::default()
            })
        }))
    }
}
