//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//!   As `Option<AuthUser>` it treats a missing or invalid token as anonymous.

pub mod auth;
