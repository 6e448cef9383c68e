//! Application services shared by the tool handlers.

pub mod data_fetcher;

pub use data_fetcher::DataFetcher;
