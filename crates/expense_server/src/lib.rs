//! HTTP JSON surface for the expense registry.
//!
//! # Responsibility
//! - Parse and validate requests, run each one in its own unit of work.
//! - Serialize entities and translate failures into the error envelope.
//!
//! # Invariants
//! - Handlers never touch SQL; all rules live in `expense_core` services.
//! - Every request gets exactly one transaction scope.

pub mod config;
pub mod cors;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ConfigError, DatabaseTarget, Settings};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
