//! Domain types, validation rules, and pure helpers shared by the database
//! and API crates. Nothing in here performs I/O.

pub mod account;
pub mod error;
pub mod pagination;
pub mod prompt;
pub mod trending;
pub mod types;
