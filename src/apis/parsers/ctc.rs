use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use super::common::{compiled, group, number, splice_lines, Pattern, SequenceCheck};
use crate::apis::base::FeedParser;
use crate::common::document;
use crate::common::text::clean_name;
use crate::domain::{Entity, Source};
use crate::error::Result;

static CTC_LINE: Pattern = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s?(?P<code>\d{1,3})\s(?P<nome>.+?)\s(?P<cnpj>\d{1,2}\.\d{3}\.\d{3}(?:.|/)\d{4}([-|·|\.|\s]{1,2})\d{2})\s+(?P<ispb>\d{8})\s(?P<produtos>.+?)$",
    )
});

/// Continuation lines tolerated before a CTC record is parsed anyway.
const CTC_SPLICE_LIMIT: usize = 2;

/// CTC clients and the products each one is enrolled in.
pub struct CtcParser;

/// "DOC, TED e Boleto" -> {Boleto, DOC, TED}
pub fn parse_products(raw: &str) -> BTreeSet<String> {
    let mut items: Vec<&str> = raw.split(',').map(str::trim).collect();
    let last = items.pop().unwrap_or_default();
    items.extend(last.split(" e ").map(str::trim));
    items
        .into_iter()
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl FeedParser for CtcParser {
    fn source(&self) -> Source {
        Source::Ctc
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let pattern = compiled(&CTC_LINE)?;
        let mut sequence = SequenceCheck::new(Source::Ctc);

        Ok(splice_lines(text, pattern, Some(CTC_SPLICE_LIMIT), |line| {
            let captures = pattern.captures(line)?;
            sequence.observe(number(&captures, "code")?);
            Some(Entity {
                document: document::normalize(group(&captures, "cnpj")),
                ispb: number(&captures, "ispb")?,
                long_name: clean_name(group(&captures, "nome")),
                products: parse_products(group(&captures, "produtos")),
                ..Entity::default()
            })
        }))
    }
}
