pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod providers;
pub mod search;
