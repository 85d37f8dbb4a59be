// Feed adapters: fetching each upstream list and parsing it into candidates

pub mod base;
pub mod factory;
pub mod parsers;

pub use base::{BaseFeed, FeedParser};
pub use factory::{create_feed, create_feeds, create_parser};
