//! Domain model for expense categories and their codes.
//!
//! # Responsibility
//! - Define the entity shapes returned by repositories and services.
//! - Serialize to the wire shapes `{id, name, is_active}` and
//!   `{id, category_id, code, description, is_active}`.
//!
//! # Invariants
//! - Every entity is identified by a store-assigned integer id.
//! - No operation exposed by core deletes an entity.

pub mod category;
pub mod code;
