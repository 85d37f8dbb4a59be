/// Default locations for the canonical registry and every upstream feed.
/// Each one can be overridden per source in `merge.toml`.

pub const CANONICAL_URL: &str =
    "https://raw.githubusercontent.com/guibranco/BancosBrasileiros/main/data/bancos.json";
pub const CHANGELOG_URL: &str =
    "https://raw.githubusercontent.com/guibranco/BancosBrasileiros/main/CHANGELOG.md";

pub const STR_URL: &str =
    "https://www.bcb.gov.br/content/estabilidadefinanceira/str1/ParticipantesSTR.csv";
/// `{date}` is replaced with `yyyyMMdd`, walking back one day at a time.
pub const SPI_URL: &str =
    "https://www.bcb.gov.br/content/estabilidadefinanceira/spi/participantes-spi-{date}.csv";
// Document feeds are published as PDF.
pub const SLC_URL: &str = "https://www2.nuclea.com.br/Monitoramento/Participantes%20Homologados.pdf";
pub const SILOC_URL: &str = "https://www2.nuclea.com.br/Monitoramento/SILOC.pdf";
pub const SITRAF_URL: &str =
    "https://www2.nuclea.com.br/Monitoramento/Rela%C3%A7%C3%A3o%20de%20Clientes%20SITRAF.pdf";
pub const CTC_URL: &str = "https://www2.nuclea.com.br/SAP/Rela%C3%A7%C3%A3o%20de%20Clientes%20CTC.pdf";
pub const PCPS_URL: &str =
    "https://www2.nuclea.com.br/SAP/Rela%C3%A7%C3%A3o%20de%20Participantes%20PCPS.pdf";
pub const CQL_URL: &str =
    "https://www2.nuclea.com.br/SAP/Rela%C3%A7%C3%A3o%20de%20Participantes%20CQL.pdf";
pub const DETECTA_FLOW_URL: &str =
    "https://www2.nuclea.com.br/SAP/Rela%C3%A7%C3%A3o%20de%20Participantes%20-%20Detecta%20Flow.pdf";
pub const PCR_URL: &str = "https://www2.nuclea.com.br/SAP/Rela%C3%A7%C3%A3o%20de%20Clientes%20PCR.pdf";

pub const DATE_PLACEHOLDER: &str = "{date}";
pub const DEFAULT_SPI_LOOKBACK_DAYS: u32 = 10;

pub const DEFAULT_CONFIG_PATH: &str = "merge.toml";
pub const CONFIG_PATH_ENV: &str = "MERGE_CONFIG";
pub const DEFAULT_OUTPUT_DIR: &str = "result";

pub const CANONICAL_FILE: &str = "bancos.json";
pub const CSV_FILE: &str = "bancos.csv";
pub const MARKDOWN_FILE: &str = "bancos.md";
pub const SQL_FILE: &str = "bancos.sql";
pub const XML_FILE: &str = "bancos.xml";
pub const RELEASE_NOTES_FILE: &str = "release-notes.md";
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";
pub const CHANGELOG_HEADING: &str = "## Changelog";
pub const CHANGELOG_LINK: &str = "[MergeTool](https://github.com/guibranco/BancosBrasileiros-MergeTool)";

/// Process exit code for a run that found nothing new.
pub const NO_CHANGES_EXIT_CODE: u8 = 187;

/// Long name allowed through the zero ISPB-root fallback.
pub const ZERO_ROOT_EXCEPTION_NAME: &str = "Banco do Brasil";

/// Offset applied to SPI start timestamps (Brasilia time).
pub const SPI_UTC_OFFSET_HOURS: i64 = -3;
