pub mod aggregate;
pub mod config;
pub mod discover;
pub mod errors;
pub mod report;
pub mod runner;
pub mod suite;
pub mod types;
