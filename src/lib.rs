pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod output;
pub mod pipeline;
pub mod refresh;
pub mod request;
pub mod state;
