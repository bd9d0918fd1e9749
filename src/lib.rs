pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod locations;
pub mod monitor;
pub mod report;
pub mod snapshot;
pub mod statuspage;
pub mod utils;

pub use error::{Result, StatusError};
