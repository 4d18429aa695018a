//! `SeaORM` entities for `SqliteStore`.

pub mod submission;
pub mod user;
