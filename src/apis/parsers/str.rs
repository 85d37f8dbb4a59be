use chrono::NaiveDate;
use tracing::{debug, warn};

use super::common::{split_quoted, unquote};
use crate::apis::base::FeedParser;
use crate::common::document;
use crate::common::text::digits_only;
use crate::domain::{Entity, Source};
use crate::error::Result;

const ISPB: usize = 0;
const SHORT_NAME: usize = 1;
const COMPE: usize = 2;
const NETWORK: usize = 4;
const LONG_NAME: usize = 5;
const DATE_STARTED: usize = 6;

/// STR participant CSV: header line, then one participant per row.
pub struct StrParser;

impl FeedParser for StrParser {
    fn source(&self) -> Source {
        Source::Str
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let mut candidates = Vec::new();

        for line in text.lines().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let columns = split_quoted(line, ',');
            if columns.len() <= DATE_STARTED {
                debug!("STR: skipping short row '{}'", line);
                continue;
            }
            // Rows without a clearing code ("n/a") are not participants we track
            let Ok(clearing_code) = unquote(&columns[COMPE]).parse::<u16>() else {
                continue;
            };
            let ispb_digits = digits_only(&columns[ISPB]);
            let Ok(ispb) = ispb_digits.parse::<u32>() else {
                warn!("STR: invalid ISPB '{}'", columns[ISPB]);
                continue;
            };
            let started = unquote(&columns[DATE_STARTED]);
            let date_operation_started = match NaiveDate::parse_from_str(started, "%d/%m/%Y") {
                Ok(date) => date.format("%Y-%m-%d").to_string(),
                Err(e) => {
                    warn!("STR: invalid start date '{}' for {}: {}", started, ispb_digits, e);
                    continue;
                }
            };

            candidates.push(Entity {
                clearing_code,
                ispb,
                document: document::normalize(&ispb_digits),
                long_name: unquote(&columns[LONG_NAME]).replace('"', "").replace('?', "-").trim().to_string(),
                short_name: unquote(&columns[SHORT_NAME]).to_string(),
                network: unquote(&columns[NETWORK]).to_string(),
                date_operation_started,
                ..Entity::default()
            });
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "ISPB,Nome_Reduzido,Número_Código,Participa_da_Compe,Acesso_Principal,Nome_Extenso,Início_da_Operação\n\
00000000,BCO DO BRASIL S.A.,001,Sim,RSFN,\"Banco do Brasil S.A.\",22/04/2002\n\
00038121,Selic,n/a,Não,RSFN,\"Banco Central do Brasil - Selic\",22/04/2002\n\
60746948,BCO BRADESCO S.A.,237,Sim,RSFN,\"Banco Bradesco S.A.\",22/04/2002\n";

    #[test]
    fn test_parse_rows_with_clearing_code() {
        let candidates = StrParser.parse(SAMPLE).unwrap();
        assert_eq!(candidates.len(), 2);

        let bb = &candidates[0];
        assert_eq!(bb.clearing_code, 1);
        assert_eq!(bb.ispb, 0);
        assert_eq!(bb.document, "00000000000191");
        assert_eq!(bb.long_name, "Banco do Brasil S.A.");
        assert_eq!(bb.short_name, "BCO DO BRASIL S.A.");
        assert_eq!(bb.network, "RSFN");
        assert_eq!(bb.date_operation_started, "2002-04-22");

        assert_eq!(candidates[1].document, "60746948000112");
    }

    #[test]
    fn test_question_marks_become_dashes() {
        let text = "header\n12345678,X,999,Sim,RSFN,\"BANCO X ? EM LIQUIDACAO\",01/01/2020\n";
        let candidates = StrParser.parse(text).unwrap();
        assert_eq!(candidates[0].long_name, "BANCO X - EM LIQUIDACAO");
    }
}
