// Observability: merge and fetch counters

pub mod metrics;

pub use metrics::MetricName;
