use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{compiled, each_line, group, number, Pattern};
use crate::apis::base::FeedParser;
use crate::common::text::clean_name;
use crate::domain::{Entity, Flag, Source};
use crate::error::Result;

static SILOC_LINE: Pattern = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<code>\d{1,3})\s(?P<compe>\d{3})\s(?P<ispb>\d{8})\s(?P<cobranca>sim|não)\s(?P<doc>sim|não)\s(?P<nome>.+?)$",
    )
});

/// SILOC participants with charge and credit-document capability.
pub struct SilocParser;

impl FeedParser for SilocParser {
    fn source(&self) -> Source {
        Source::Siloc
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let pattern = compiled(&SILOC_LINE)?;

        Ok(each_line(text, |line| {
            let captures = pattern.captures(line)?;
            Some(Entity {
                clearing_code: number(&captures, "compe")?,
                ispb: number(&captures, "ispb")?,
                long_name: clean_name(group(&captures, "nome")),
                charge: Flag::parse(group(&captures, "cobranca")),
                credit_document: Flag::parse(group(&captures, "doc")),
                ..Entity::default()
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let text = "1 001 00000000 sim sim BANCO DO BRASIL S.A.\n2 237 60746948 Não sim BANCO BRADESCO S.A.\nrodape";
        let candidates = SilocParser.parse(text).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].clearing_code, 1);
        assert_eq!(candidates[0].charge, Flag::Yes);
        assert_eq!(candidates[1].ispb, 60746948);
        assert_eq!(candidates[1].charge, Flag::No);
        assert_eq!(candidates[1].credit_document, Flag::Yes);
    }
}
