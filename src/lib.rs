pub mod aggregate;
pub mod api;
pub mod car;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod parser;
pub mod scorer;
pub mod scrape;
// cmd and reports are binary modules of main.rs.
