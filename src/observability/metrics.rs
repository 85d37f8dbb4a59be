//! Counters for the merge tool.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the embedding
//! binary installs a recorder.

use std::fmt;

/// Every metric name used by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Merge passes
    MergeCandidates,

    // Feed fetching
    SourcesFetchSuccess,
    SourcesFetchError,
    SourcesCandidatesParsed,

    // Run outcome
    RunOutcome,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::MergeCandidates => "merge_candidates_total",
            MetricName::SourcesFetchSuccess => "merge_sources_fetch_success_total",
            MetricName::SourcesFetchError => "merge_sources_fetch_error_total",
            MetricName::SourcesCandidatesParsed => "merge_sources_candidates_parsed",
            MetricName::RunOutcome => "merge_run_outcome_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            MergeCandidates,
            SourcesFetchSuccess,
            SourcesFetchError,
            SourcesCandidatesParsed,
            RunOutcome,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod merge {
    use super::MetricName;
    use crate::domain::Source;
    use crate::pipeline::processing::merge::MergeOutcome;

    pub fn candidate(source: Source, outcome: MergeOutcome) {
        let metric_name = MetricName::MergeCandidates.as_str();
        ::metrics::counter!(metric_name, "source" => source.key(), "outcome" => outcome.as_str()).increment(1);
    }
}

pub mod sources {
    use super::MetricName;
    use crate::domain::Source;

    pub fn fetch_success(source: Source, candidates: usize) {
        ::metrics::counter!(MetricName::SourcesFetchSuccess.as_str(), "source" => source.key()).increment(1);
        ::metrics::histogram!(MetricName::SourcesCandidatesParsed.as_str(), "source" => source.key())
            .record(candidates as f64);
    }

    pub fn fetch_error(source: Source) {
        ::metrics::counter!(MetricName::SourcesFetchError.as_str(), "source" => source.key()).increment(1);
    }
}

pub mod run {
    use super::MetricName;

    pub fn outcome(label: &'static str) {
        ::metrics::counter!(MetricName::RunOutcome.as_str(), "outcome" => label).increment(1);
    }
}
