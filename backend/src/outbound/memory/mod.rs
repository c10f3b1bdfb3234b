//! In-memory adapters for the driven repository ports.
//!
//! Used when no database URL is configured and throughout the test suites.
//! Each port call takes the store lock exactly once, so find-and-mutate
//! operations are atomic with respect to each other.

mod cat_repository;
mod user_repository;

pub use cat_repository::InMemoryCatRepository;
pub use user_repository::InMemoryUserRepository;
