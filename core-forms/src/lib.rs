//! # Form Library Module
//!
//! Local storage and remote contracts for survey form definitions.
//!
//! ## Overview
//!
//! This crate owns everything the sync core needs to reason about forms:
//!
//! - **Models** (`models`): installed [`Form`](models::Form) records and
//!   [`LocalMediaFile`](models::LocalMediaFile) descriptors
//! - **Repositories** (`repositories`): SQLite-backed persistence for
//!   installed forms and their media mirrors
//! - **Form source** (`source`): the [`FormSource`](source::FormSource)
//!   contract a form server provider implements, plus the wire-level types
//!   it returns
//! - **Hashing** (`hash`): the `md5:`-prefixed content hash convention used
//!   by the server and the bare-hex form stored locally
//! - **Database** (`db`): pool construction with WAL mode and automatic
//!   migrations

pub mod db;
pub mod error;
pub mod hash;
pub mod models;
pub mod repositories;
pub mod source;

pub use db::{create_pool, create_test_pool, DatabaseConfig};
pub use error::{FormsError, Result};
pub use models::{Form, LocalMediaFile};
pub use repositories::{
    FormsRepository, MediaFileRepository, SqliteFormsRepository, SqliteMediaFileRepository,
};
pub use source::{FormListItem, FormSource, FormSourceError, ManifestFile, MediaFile};
