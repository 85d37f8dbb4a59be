use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;

use crate::common::document;
use crate::domain::{Entity, Flag};
use crate::error::{MergeError, Result};

const MARKDOWN_TITLE: &str = "# Bancos Brasileiros";
const SQL_TABLE: &str = "Banks";
const XML_ROOT: &str = "Banks";
const XML_ROW: &str = "Bank";

/// Column key (as in `bancos.json`) and display name, in output order.
const COLUMNS: [(&str, &str); 21] = [
    ("COMPE", "COMPE"),
    ("ISPB", "ISPB"),
    ("Document", "Document"),
    ("LongName", "Long Name"),
    ("ShortName", "Short Name"),
    ("Network", "Network"),
    ("Type", "Type"),
    ("PixType", "PIX Type"),
    ("Charge", "Charge"),
    ("CreditDocument", "Credit Document"),
    ("LegalCheque", "Legal Cheque"),
    ("DetectaFlow", "Detecta Flow"),
    ("PCR", "PCR"),
    ("PCRP", "PCRP"),
    ("SalaryPortability", "Salary Portability"),
    ("Products", "Products"),
    ("Url", "Url"),
    ("DateOperationStarted", "Date Operation Started"),
    ("DatePixStarted", "Date PIX Started"),
    ("DateRegistered", "Date Registered"),
    ("DateUpdated", "Date Updated"),
];

/// One participant with every column already rendered as text.
#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "COMPE")]
    compe: String,
    #[serde(rename = "ISPB")]
    ispb: String,
    #[serde(rename = "Document")]
    document: String,
    #[serde(rename = "LongName")]
    long_name: String,
    #[serde(rename = "ShortName")]
    short_name: String,
    #[serde(rename = "Network")]
    network: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "PixType")]
    pix_type: String,
    #[serde(rename = "Charge")]
    charge: String,
    #[serde(rename = "CreditDocument")]
    credit_document: String,
    #[serde(rename = "LegalCheque")]
    legal_cheque: String,
    #[serde(rename = "DetectaFlow")]
    detecta_flow: String,
    #[serde(rename = "PCR")]
    pcr: String,
    #[serde(rename = "PCRP")]
    pcrp: String,
    #[serde(rename = "SalaryPortability")]
    salary_portability: String,
    #[serde(rename = "Products")]
    products: String,
    #[serde(rename = "Url")]
    url: String,
    #[serde(rename = "DateOperationStarted")]
    date_operation_started: String,
    #[serde(rename = "DatePixStarted")]
    date_pix_started: String,
    #[serde(rename = "DateRegistered")]
    date_registered: String,
    #[serde(rename = "DateUpdated")]
    date_updated: String,
}

impl Row {
    fn from_entity(entity: &Entity) -> Self {
        Self {
            compe: entity.compe_string(),
            ispb: entity.ispb_string(),
            document: document::format(&entity.document),
            long_name: entity.long_name.clone(),
            short_name: entity.short_name.clone(),
            network: entity.network.clone(),
            kind: entity.kind.clone(),
            pix_type: entity.pix_type.clone(),
            charge: flag_label(entity.charge),
            credit_document: flag_label(entity.credit_document),
            legal_cheque: flag_label(entity.legal_cheque),
            detecta_flow: flag_label(entity.detecta_flow),
            pcr: flag_label(entity.pcr),
            pcrp: flag_label(entity.pcrp),
            salary_portability: entity.salary_portability.clone(),
            products: entity.products.iter().cloned().collect::<Vec<_>>().join("; "),
            url: entity.url.clone(),
            date_operation_started: entity.date_operation_started.clone(),
            date_pix_started: entity.date_pix_started.clone(),
            date_registered: timestamp(entity.date_registered),
            date_updated: timestamp(entity.date_updated),
        }
    }

    /// Values in `COLUMNS` order.
    fn values(&self) -> [&str; 21] {
        [
            &self.compe,
            &self.ispb,
            &self.document,
            &self.long_name,
            &self.short_name,
            &self.network,
            &self.kind,
            &self.pix_type,
            &self.charge,
            &self.credit_document,
            &self.legal_cheque,
            &self.detecta_flow,
            &self.pcr,
            &self.pcrp,
            &self.salary_portability,
            &self.products,
            &self.url,
            &self.date_operation_started,
            &self.date_pix_started,
            &self.date_registered,
            &self.date_updated,
        ]
    }
}

fn flag_label(flag: Flag) -> String {
    match flag {
        Flag::Yes => "Sim".to_string(),
        Flag::No => "Não".to_string(),
        Flag::Unset => String::new(),
    }
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|at| at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_default()
}

/// `bancos.csv`: header row plus one record per participant.
pub fn render_csv(entities: &[Entity]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS.iter().map(|(key, _)| *key))?;
    for entity in entities {
        writer.serialize(Row::from_entity(entity))?;
    }
    writer
        .into_inner()
        .map_err(|e| MergeError::Render(format!("CSV: {}", e)))
}

/// `bancos.md`: a pipe table under the registry title; empty cells show `-`.
pub fn render_markdown(entities: &[Entity]) -> String {
    let mut lines = vec![MARKDOWN_TITLE.to_string(), String::new()];
    lines.push(
        COLUMNS
            .iter()
            .map(|(_, display)| *display)
            .collect::<Vec<_>>()
            .join(" | "),
    );
    lines.push(vec!["---"; COLUMNS.len()].join(" | "));

    for entity in entities {
        let row = Row::from_entity(entity);
        let cells: Vec<&str> = row
            .values()
            .into_iter()
            .map(|value| if value.is_empty() { "-" } else { value })
            .collect();
        lines.push(cells.join(" | ").replace('\n', " "));
    }

    let mut markdown = lines.join("\n");
    markdown.push('\n');
    markdown
}

fn sql_text(value: &str) -> String {
    if value.is_empty() {
        "NULL".to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}

fn sql_flag(flag: Flag) -> String {
    match flag.as_bool() {
        Some(true) => "1".to_string(),
        Some(false) => "0".to_string(),
        None => "NULL".to_string(),
    }
}

/// `bancos.sql`: one `INSERT` per participant. Flags are `1`/`0`, empty values `NULL`.
pub fn render_sql(entities: &[Entity]) -> String {
    let columns = COLUMNS
        .iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = String::new();
    for entity in entities {
        let row = Row::from_entity(entity);
        let values = [
            sql_text(&row.compe),
            sql_text(&row.ispb),
            sql_text(&row.document),
            sql_text(&row.long_name),
            sql_text(&row.short_name),
            sql_text(&row.network),
            sql_text(&row.kind),
            sql_text(&row.pix_type),
            sql_flag(entity.charge),
            sql_flag(entity.credit_document),
            sql_flag(entity.legal_cheque),
            sql_flag(entity.detecta_flow),
            sql_flag(entity.pcr),
            sql_flag(entity.pcrp),
            sql_text(&row.salary_portability),
            sql_text(&row.products),
            sql_text(&row.url),
            sql_text(&row.date_operation_started),
            sql_text(&row.date_pix_started),
            sql_text(&row.date_registered),
            sql_text(&row.date_updated),
        ];
        sql.push_str(&format!(
            "INSERT INTO {} ({}) VALUES({});\n",
            SQL_TABLE,
            columns,
            values.join(", ")
        ));
    }
    sql
}

fn xml_error(e: impl std::fmt::Display) -> MergeError {
    MergeError::Render(format!("XML: {}", e))
}

/// `bancos.xml`: `<Banks>` holding one `<Bank>` per participant, one element per column.
pub fn render_xml(entities: &[Entity]) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new(XML_ROOT)))
        .map_err(xml_error)?;

    for entity in entities {
        let row = Row::from_entity(entity);
        writer
            .write_event(Event::Start(BytesStart::new(XML_ROW)))
            .map_err(xml_error)?;
        for ((key, _), value) in COLUMNS.iter().zip(row.values()) {
            if value.is_empty() {
                writer
                    .write_event(Event::Empty(BytesStart::new(*key)))
                    .map_err(xml_error)?;
                continue;
            }
            writer
                .write_event(Event::Start(BytesStart::new(*key)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::Text(BytesText::new(value)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(*key)))
                .map_err(xml_error)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(XML_ROW)))
            .map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(XML_ROOT)))
        .map_err(xml_error)?;
    Ok(writer.into_inner())
}
