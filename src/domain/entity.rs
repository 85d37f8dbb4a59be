use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use super::change::ChangeSet;
use super::field::Update;
use super::flag::Flag;
use super::source::Source;
use crate::common::document;
use crate::common::text::{names_equal, normalize_url};

/// A financial-system participant, as stored in the canonical registry and as produced
/// by every feed parser (a "candidate" is an `Entity` with only the fields its feed knows).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "COMPE", default, serialize_with = "ser_compe", deserialize_with = "de_u16")]
    pub clearing_code: u16,

    #[serde(rename = "ISPB", default, serialize_with = "ser_ispb", deserialize_with = "de_u32")]
    pub ispb: u32,

    #[serde(
        rename = "Document",
        default,
        serialize_with = "ser_document",
        deserialize_with = "de_document"
    )]
    pub document: String,

    #[serde(rename = "LongName", default, serialize_with = "ser_text", deserialize_with = "de_text")]
    pub long_name: String,

    #[serde(rename = "ShortName", default, serialize_with = "ser_text", deserialize_with = "de_text")]
    pub short_name: String,

    #[serde(rename = "Network", default, serialize_with = "ser_text", deserialize_with = "de_text")]
    pub network: String,

    #[serde(rename = "Type", default, serialize_with = "ser_text", deserialize_with = "de_text")]
    pub kind: String,

    #[serde(rename = "PixType", default, serialize_with = "ser_text", deserialize_with = "de_text")]
    pub pix_type: String,

    #[serde(rename = "Charge", default)]
    pub charge: Flag,

    #[serde(rename = "CreditDocument", default)]
    pub credit_document: Flag,

    #[serde(rename = "LegalCheque", default)]
    pub legal_cheque: Flag,

    #[serde(rename = "DetectaFlow", default)]
    pub detecta_flow: Flag,

    #[serde(rename = "PCR", default)]
    pub pcr: Flag,

    #[serde(rename = "PCRP", default)]
    pub pcrp: Flag,

    #[serde(
        rename = "SalaryPortability",
        default,
        serialize_with = "ser_text",
        deserialize_with = "de_text"
    )]
    pub salary_portability: String,

    #[serde(
        rename = "Products",
        default,
        serialize_with = "ser_products",
        deserialize_with = "de_products"
    )]
    pub products: BTreeSet<String>,

    #[serde(rename = "Url", default, serialize_with = "ser_text", deserialize_with = "de_url")]
    pub url: String,

    #[serde(
        rename = "DateOperationStarted",
        default,
        serialize_with = "ser_text",
        deserialize_with = "de_text"
    )]
    pub date_operation_started: String,

    #[serde(
        rename = "DatePixStarted",
        default,
        serialize_with = "ser_text",
        deserialize_with = "de_text"
    )]
    pub date_pix_started: String,

    #[serde(rename = "DateRegistered", default)]
    pub date_registered: Option<DateTime<Utc>>,

    #[serde(rename = "DateUpdated", default)]
    pub date_updated: Option<DateTime<Utc>>,

    /// Provenance of the fields written in the current run; never serialized
    #[serde(skip)]
    pub changes: ChangeSet,
}

impl Entity {
    pub fn ispb_string(&self) -> String {
        format!("{:08}", self.ispb)
    }

    pub fn compe_string(&self) -> String {
        format!("{:03}", self.clearing_code)
    }

    pub fn has_valid_document(&self) -> bool {
        document::is_valid(&self.document)
    }

    /// Fields changed during the current run.
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }

    /// Writes `update`, stamps `date_updated` and records provenance for the field.
    pub fn apply(&mut self, source: Source, update: Update, now: DateTime<Utc>) {
        let field = update.field();
        let old_value = field.render(self);
        let new_value = update.render();
        update.write_to(self);
        self.date_updated = Some(now);
        self.changes.add_change(field, source, old_value, new_value);
    }

    /// Full-field equality. Text compares case- and diacritics-insensitively, products as
    /// sets, timestamps exactly.
    pub fn equivalent(&self, other: &Entity) -> bool {
        self.clearing_code == other.clearing_code
            && self.ispb == other.ispb
            && self.document == other.document
            && names_equal(&self.long_name, &other.long_name)
            && names_equal(&self.short_name, &other.short_name)
            && names_equal(&self.network, &other.network)
            && names_equal(&self.kind, &other.kind)
            && names_equal(&self.pix_type, &other.pix_type)
            && self.charge == other.charge
            && self.credit_document == other.credit_document
            && self.legal_cheque == other.legal_cheque
            && self.detecta_flow == other.detecta_flow
            && self.pcr == other.pcr
            && self.pcrp == other.pcrp
            && names_equal(&self.salary_portability, &other.salary_portability)
            && self.products == other.products
            && self.url.eq_ignore_ascii_case(&other.url)
            && self.date_operation_started == other.date_operation_started
            && self.date_pix_started == other.date_pix_started
            && self.date_registered == other.date_registered
            && self.date_updated == other.date_updated
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.compe_string(),
            self.ispb_string(),
            document::format(&self.document),
            self.long_name,
            self.short_name
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

fn de_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(0),
        Some(NumberOrText::Number(n)) => Ok(n),
        Some(NumberOrText::Text(text)) => {
            let digits = crate::common::text::digits_only(&text);
            if digits.is_empty() {
                return Ok(0);
            }
            digits.parse().map_err(serde::de::Error::custom)
        }
    }
}

fn de_u16<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    u16::try_from(de_number(deserializer)?).map_err(serde::de::Error::custom)
}

fn de_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    u32::try_from(de_number(deserializer)?).map_err(serde::de::Error::custom)
}

fn ser_compe<S: Serializer>(value: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:03}", value))
}

fn ser_ispb<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:08}", value))
}

fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .unwrap_or_default())
}

#[allow(clippy::ptr_arg)]
fn ser_text<S: Serializer>(value: &String, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(value)
    }
}

fn de_document<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(document::normalize(&de_text(deserializer)?))
}

#[allow(clippy::ptr_arg)]
fn ser_document<S: Serializer>(value: &String, serializer: S) -> Result<S::Ok, S::Error> {
    ser_text(&document::format(value), serializer)
}

fn de_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(normalize_url(&de_text(deserializer)?))
}

fn de_products<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect())
}

fn ser_products<S: Serializer>(value: &BTreeSet<String>, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.collect_seq(value.iter())
    }
}
