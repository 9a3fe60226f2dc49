pub mod catalog;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod parse;
pub mod schedule;
pub mod store;
