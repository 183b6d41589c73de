//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod prompt_repo;
pub mod ranking_repo;
pub mod session_repo;
pub mod user_repo;
pub mod vote_repo;

pub use category_repo::CategoryRepo;
pub use prompt_repo::PromptRepo;
pub use ranking_repo::RankingRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
