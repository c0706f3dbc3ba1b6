//! quoting-service: quotation and invoice document engine.
//!
//! The calculation core (`engine`) is pure and synchronous; everything that
//! talks to the outside world (catalog, customer directory, persistence,
//! conversion target) goes through the async traits in
//! `services::interfaces`.

pub mod config;
pub mod engine;
pub mod models;
pub mod services;
