//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` structs matching the database rows a query returns
//! - `Serialize` response shapes built from those rows
//! - `Deserialize` create / update DTOs for request payloads

pub mod category;
pub mod prompt;
pub mod session;
pub mod user;
pub mod vote;
