//! Repository traits and SQLite implementations
//!
//! Each repository is a trait (so the sync core and tests can substitute
//! implementations) plus a `Sqlite*` implementation over the shared pool.

pub mod form;
pub mod media;

pub use form::{FormsRepository, SqliteFormsRepository};
pub use media::{MediaFileRepository, SqliteMediaFileRepository};
