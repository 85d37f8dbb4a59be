use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{compiled, each_line, group, number, Pattern, SequenceCheck};
use crate::apis::base::FeedParser;
use crate::common::document;
use crate::common::text::clean_name;
use crate::domain::{Entity, Flag, Source};
use crate::error::Result;

static DETECTA_FLOW_LINE: Pattern = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<code>\d{1,3})\s(?P<nome>.+?)\s(?P<cnpj>\d{1,2}\.\d{3}\.\d{3}(?:.|/)\d{4}([-|·|\.|\s]{1,2})\d{2})\s+(?P<ispb>\d{7,8})(.+?)$",
    )
});

/// Detecta Flow participants. Presence in the list turns the flag on.
pub struct DetectaFlowParser;

impl FeedParser for DetectaFlowParser {
    fn source(&self) -> Source {
        Source::DetectaFlow
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let pattern = compiled(&DETECTA_FLOW_LINE)?;
        let mut sequence = SequenceCheck::new(Source::DetectaFlow);

        Ok(each_line(text, |line| {
            let captures = pattern.captures(line)?;
            sequence.observe(number(&captures, "code")?);
            Some(Entity {
                document: document::normalize(group(&captures, "cnpj")),
                ispb: number(&captures, "ispb")?,
                long_name: clean_name(group(&captures, "nome")),
                detecta_flow: Flag::Yes,
                ..Entity::default()
            })
        }))
    }
}
