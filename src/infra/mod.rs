pub mod canonical_store;
pub mod http_client;
pub mod output_writer;
pub mod payload_store;
pub mod renderers;

pub use canonical_store::JsonCanonicalStore;
pub use http_client::ReqwestHttp;
pub use output_writer::FileOutputWriter;
pub use payload_store::LocationPayloadStore;
