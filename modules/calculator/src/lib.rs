//! Calculator Module
//!
//! Exposes `POST /api/v1/calculate`, which evaluates an arithmetic expression
//! and answers with a `{"result": ...}` or `{"error": ...}` JSON envelope.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - evaluation through the `calculation` crate
//! - `api/rest/` - DTOs, handlers, error mapping, routes, `OpenAPI` document
//! - `module.rs` - module configuration and route registration
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === MODULE DEFINITION ===
mod module;
pub use module::CalculatorModule;

pub mod config;
pub use config::CalculatorConfig;

// === PUBLIC EXPORTS ===
pub mod domain;
pub use domain::{Service, ServiceError};

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
