pub mod auth;
pub mod categories;
pub mod prompts;
pub mod votes;
