use chrono::{Duration, NaiveDateTime};
use tracing::warn;

use super::common::{split_quoted, unquote};
use crate::apis::base::FeedParser;
use crate::common::constants::SPI_UTC_OFFSET_HOURS;
use crate::common::text::digits_only;
use crate::domain::{Entity, Source};
use crate::error::Result;

const ISPB: usize = 0;
const LONG_NAME: usize = 1;
const SHORT_NAME: usize = 2;
const PIX_TYPE: usize = 4;
const PIX_STARTED: usize = 5;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// SPI participant list: semicolon-separated, header line first.
pub struct SpiParser;

fn pix_started(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let parsed = TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())?;
    let shifted = parsed + Duration::hours(SPI_UTC_OFFSET_HOURS);
    Some(shifted.format("%Y-%m-%d %H:%M:%S").to_string())
}

impl FeedParser for SpiParser {
    fn source(&self) -> Source {
        Source::Spi
    }

    fn parse(&self, text: &str) -> Result<Vec<Entity>> {
        let mut candidates = Vec::new();

        for line in text.lines().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let columns = split_quoted(line, ';');
            if columns.len() <= PIX_STARTED {
                continue;
            }
            let Ok(ispb) = unquote(&columns[ISPB]).parse::<u32>() else {
                continue;
            };
            let Some(date_pix_started) = pix_started(unquote(&columns[PIX_STARTED])) else {
                warn!("SPI: invalid start timestamp '{}' for {}", columns[PIX_STARTED], digits_only(&columns[ISPB]));
                continue;
            };

            candidates.push(Entity {
                ispb,
                long_name: unquote(&columns[LONG_NAME]).to_string(),
                short_name: unquote(&columns[SHORT_NAME]).to_string(),
                pix_type: unquote(&columns[PIX_TYPE]).to_string(),
                date_pix_started,
                ..Entity::default()
            });
        }

        Ok(candidates)
    }
}
