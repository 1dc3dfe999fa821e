//! wingmate/crates/storage-adapters/src/lib.rs
//!
//! `DatingRepo` implementations: Postgres for real deployments
//! (feature `db-postgres`), and a single-file JSON store for demos and
//! the integration tests.

pub mod jsonfile;
#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use jsonfile::JsonFileRepo;
#[cfg(feature = "db-postgres")]
pub use postgres::PgDatingRepo;
