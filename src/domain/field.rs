//! Owned fields of a participant and the typed writes the merge passes perform on them.
//!
//! Every mutation goes through an [`Update`]; the variant fixes both the field and the
//! type of the new value, so a pass cannot write a flag into a name.

use std::collections::BTreeSet;
use std::fmt;

use super::entity::Entity;
use super::flag::Flag;
use crate::common::text::names_equal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Document,
    LongName,
    ShortName,
    Network,
    Type,
    PixType,
    Charge,
    CreditDocument,
    LegalCheque,
    DetectaFlow,
    Pcr,
    Pcrp,
    SalaryPortability,
    Products,
    Url,
    DateOperationStarted,
    DatePixStarted,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Document => "Document",
            Field::LongName => "LongName",
            Field::ShortName => "ShortName",
            Field::Network => "Network",
            Field::Type => "Type",
            Field::PixType => "PixType",
            Field::Charge => "Charge",
            Field::CreditDocument => "CreditDocument",
            Field::LegalCheque => "LegalCheque",
            Field::DetectaFlow => "DetectaFlow",
            Field::Pcr => "PCR",
            Field::Pcrp => "PCRP",
            Field::SalaryPortability => "SalaryPortability",
            Field::Products => "Products",
            Field::Url => "Url",
            Field::DateOperationStarted => "DateOperationStarted",
            Field::DatePixStarted => "DatePixStarted",
        }
    }

    /// Current value of this field on `entity`, rendered for the change report.
    pub fn render(&self, entity: &Entity) -> String {
        match self {
            Field::Document => entity.document.clone(),
            Field::LongName => entity.long_name.clone(),
            Field::ShortName => entity.short_name.clone(),
            Field::Network => entity.network.clone(),
            Field::Type => entity.kind.clone(),
            Field::PixType => entity.pix_type.clone(),
            Field::Charge => entity.charge.to_string(),
            Field::CreditDocument => entity.credit_document.to_string(),
            Field::LegalCheque => entity.legal_cheque.to_string(),
            Field::DetectaFlow => entity.detecta_flow.to_string(),
            Field::Pcr => entity.pcr.to_string(),
            Field::Pcrp => entity.pcrp.to_string(),
            Field::SalaryPortability => entity.salary_portability.clone(),
            Field::Products => render_products(&entity.products),
            Field::Url => entity.url.clone(),
            Field::DateOperationStarted => entity.date_operation_started.clone(),
            Field::DatePixStarted => entity.date_pix_started.clone(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn render_products(products: &BTreeSet<String>) -> String {
    products.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// A single typed write to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Document(String),
    LongName(String),
    ShortName(String),
    Network(String),
    Type(String),
    PixType(String),
    Charge(Flag),
    CreditDocument(Flag),
    LegalCheque(Flag),
    DetectaFlow(Flag),
    Pcr(Flag),
    Pcrp(Flag),
    SalaryPortability(String),
    Products(BTreeSet<String>),
    Url(String),
    DateOperationStarted(String),
    DatePixStarted(String),
}

impl Update {
    pub fn field(&self) -> Field {
        match self {
            Update::Document(_) => Field::Document,
            Update::LongName(_) => Field::LongName,
            Update::ShortName(_) => Field::ShortName,
            Update::Network(_) => Field::Network,
            Update::Type(_) => Field::Type,
            Update::PixType(_) => Field::PixType,
            Update::Charge(_) => Field::Charge,
            Update::CreditDocument(_) => Field::CreditDocument,
            Update::LegalCheque(_) => Field::LegalCheque,
            Update::DetectaFlow(_) => Field::DetectaFlow,
            Update::Pcr(_) => Field::Pcr,
            Update::Pcrp(_) => Field::Pcrp,
            Update::SalaryPortability(_) => Field::SalaryPortability,
            Update::Products(_) => Field::Products,
            Update::Url(_) => Field::Url,
            Update::DateOperationStarted(_) => Field::DateOperationStarted,
            Update::DatePixStarted(_) => Field::DatePixStarted,
        }
    }

    /// The new value as it appears in the change report.
    pub fn render(&self) -> String {
        match self {
            Update::Document(v)
            | Update::LongName(v)
            | Update::ShortName(v)
            | Update::Network(v)
            | Update::Type(v)
            | Update::PixType(v)
            | Update::SalaryPortability(v)
            | Update::Url(v)
            | Update::DateOperationStarted(v)
            | Update::DatePixStarted(v) => v.clone(),
            Update::Charge(f)
            | Update::CreditDocument(f)
            | Update::LegalCheque(f)
            | Update::DetectaFlow(f)
            | Update::Pcr(f)
            | Update::Pcrp(f) => f.to_string(),
            Update::Products(p) => render_products(p),
        }
    }

    /// True when writing this update would leave `entity` semantically unchanged.
    /// Names compare case- and diacritics-insensitively, everything else exactly.
    pub fn is_current(&self, entity: &Entity) -> bool {
        match self {
            Update::Document(v) => &entity.document == v,
            Update::LongName(v) => names_equal(&entity.long_name, v),
            Update::ShortName(v) => names_equal(&entity.short_name, v),
            Update::Network(v) => names_equal(&entity.network, v),
            Update::Type(v) => names_equal(&entity.kind, v),
            Update::PixType(v) => names_equal(&entity.pix_type, v),
            Update::Charge(f) => entity.charge == *f,
            Update::CreditDocument(f) => entity.credit_document == *f,
            Update::LegalCheque(f) => entity.legal_cheque == *f,
            Update::DetectaFlow(f) => entity.detecta_flow == *f,
            Update::Pcr(f) => entity.pcr == *f,
            Update::Pcrp(f) => entity.pcrp == *f,
            Update::SalaryPortability(v) => names_equal(&entity.salary_portability, v),
            Update::Products(p) => &entity.products == p,
            Update::Url(v) => entity.url.eq_ignore_ascii_case(v),
            Update::DateOperationStarted(v) => &entity.date_operation_started == v,
            Update::DatePixStarted(v) => &entity.date_pix_started == v,
        }
    }

    /// Stores the value without provenance bookkeeping; see [`Entity::apply`].
    pub(crate) fn write_to(self, entity: &mut Entity) {
        match self {
            Update::Document(v) => entity.document = v,
            Update::LongName(v) => entity.long_name = v,
            Update::ShortName(v) => entity.short_name = v,
            Update::Network(v) => entity.network = v,
            Update::Type(v) => entity.kind = v,
            Update::PixType(v) => entity.pix_type = v,
            Update::Charge(f) => entity.charge = f,
            Update::CreditDocument(f) => entity.credit_document = f,
            Update::LegalCheque(f) => entity.legal_cheque = f,
            Update::DetectaFlow(f) => entity.detecta_flow = f,
            Update::Pcr(f) => entity.pcr = f,
            Update::Pcrp(f) => entity.pcrp = f,
            Update::SalaryPortability(v) => entity.salary_portability = v,
            Update::Products(p) => entity.products = p,
            Update::Url(v) => entity.url = v,
            Update::DateOperationStarted(v) => entity.date_operation_started = v,
            Update::DatePixStarted(v) => entity.date_pix_started = v,
        }
    }
}
