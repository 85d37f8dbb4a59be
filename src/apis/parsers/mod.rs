//! One parser per feed. Parsers are pure: text in, candidates out.

pub mod common;
pub mod cql;
pub mod ctc;
pub mod detecta_flow;
pub mod pcps;
pub mod pcr;
pub mod siloc;
pub mod sitraf;
pub mod slc;
pub mod spi;
pub mod str;

pub use cql::CqlParser;
pub use ctc::CtcParser;
pub use detecta_flow::DetectaFlowParser;
pub use pcps::PcpsParser;
pub use pcr::PcrParser;
pub use siloc::SilocParser;
pub use sitraf::SitrafParser;
pub use slc::SlcParser;
pub use spi::SpiParser;
pub use self::str::StrParser;
