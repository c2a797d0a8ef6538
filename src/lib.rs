//! Monument Designer Library
//!
//! This library provides the headless core of the memorial product
//! designer: loading the XML product catalog, resolving additions and
//! materials, the design context with its section controllers, the placed
//! item lifecycle, order storage and the web API.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod store;
#[cfg(feature = "web")]
pub mod web;
