use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{compiled, group, number, splice_lines, Pattern, SequenceCheck};
use crate::apis::base::FeedParser;
use crate::common::document;
use crate::common::text::clean_name;
use crate::domain::{Entity, Source};
use crate::error::Result;

static PCPS_LINE: Pattern = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<code>\d{1,3})\s(?P<nome>.+?)\s(?P<cnpj>\d{1,2}\.\d{3}\.\d{3}(?:.|/)\d{4}([-|·|\.|\s]{1,3})\d{2})\s+(?P<ispb>\d{7,8})\s(?P<adesao>.+?)$",
    )
});

/// PCPS participants and their salary-portability enrolment.
pub struct PcpsParser;

impl FeedParser for PcpsParser {
    fn source(&self) -> Source {
        Source::Pcps
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let pattern = compiled(&PCPS_LINE)?;
        let mut sequence = SequenceCheck::new(Source::Pcps);

        Ok(splice_lines(text, pattern, None, |line| {
            let captures = pattern.captures(line)?;
            sequence.observe(number(&captures, "code")?);
            Some(Entity {
                document: document::normalize(group(&captures, "cnpj")),
                ispb: number(&captures, "ispb")?,
                long_name: clean_name(group(&captures, "nome")),
                salary_portability: group(&captures, "adesao").replace("- 1 -", "").trim().to_string(),
                ..Entity::default()
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_strips_page_marker() {
        let text = "1 BANCO BRADESCO S.A. 60.746.948/0001-12 60746948 Banco Folha - 1 -";
        let candidates = PcpsParser.parse(text).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].salary_portability, "Banco Folha");
        assert_eq!(candidates[0].ispb, 60746948);
    }
}
