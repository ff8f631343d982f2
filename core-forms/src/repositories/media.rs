//! Media file repository trait and implementation
//!
//! Media attachments for a form+version live in a "mirror": a registered
//! media directory plus the files installed into it. `get_all` distinguishes
//! a mirror that was never registered (`None`) from a registered but empty
//! one (`Some(vec![])`) — sync treats those differently.

use crate::error::Result;
use crate::models::LocalMediaFile;
use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, SqlitePool};

/// Media mirror repository interface
#[async_trait]
pub trait MediaFileRepository: Send + Sync {
    /// Files installed for `form_id` at `version`.
    ///
    /// # Returns
    /// - `Ok(None)` if no media mirror is registered for this form+version
    /// - `Ok(Some(files))` otherwise, possibly empty
    async fn get_all(
        &self,
        form_id: &str,
        version: Option<&str>,
    ) -> Result<Option<Vec<LocalMediaFile>>>;

    /// Register (or re-register) the media directory for a form+version.
    async fn register_dir(&self, form_id: &str, version: Option<&str>, path: &str) -> Result<()>;

    /// Record one installed media file.
    async fn add_file(
        &self,
        form_id: &str,
        version: Option<&str>,
        file: &LocalMediaFile,
    ) -> Result<()>;

    /// Drop the mirrors and file records of every version of `form_id`.
    async fn delete_for_form(&self, form_id: &str) -> Result<()>;
}

/// SQLite implementation of MediaFileRepository
pub struct SqliteMediaFileRepository {
    pool: SqlitePool,
}

impl SqliteMediaFileRepository {
    /// Create a new SQLite media file repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Unversioned forms are keyed by the empty string.
    fn version_key(version: Option<&str>) -> &str {
        version.unwrap_or("")
    }
}

#[async_trait]
impl MediaFileRepository for SqliteMediaFileRepository {
    async fn get_all(
        &self,
        form_id: &str,
        version: Option<&str>,
    ) -> Result<Option<Vec<LocalMediaFile>>> {
        let registered: i64 =
            query_scalar("SELECT COUNT(*) FROM media_dirs WHERE form_id = ? AND version = ?")
                .bind(form_id)
                .bind(Self::version_key(version))
                .fetch_one(&self.pool)
                .await?;

        if registered == 0 {
            return Ok(None);
        }

        let files = query_as::<_, LocalMediaFile>(
            r#"
            SELECT filename, path, hash FROM media_files
            WHERE form_id = ? AND version = ?
            ORDER BY filename
            "#,
        )
        .bind(form_id)
        .bind(Self::version_key(version))
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(files))
    }

    async fn register_dir(&self, form_id: &str, version: Option<&str>, path: &str) -> Result<()> {
        query(
            r#"
            INSERT INTO media_dirs (form_id, version, path) VALUES (?, ?, ?)
            ON CONFLICT (form_id, version) DO UPDATE SET path = excluded.path
            "#,
        )
        .bind(form_id)
        .bind(Self::version_key(version))
        .bind(path)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add_file(
        &self,
        form_id: &str,
        version: Option<&str>,
        file: &LocalMediaFile,
    ) -> Result<()> {
        query(
            r#"
            INSERT INTO media_files (form_id, version, filename, path, hash)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (form_id, version, filename)
            DO UPDATE SET path = excluded.path, hash = excluded.hash
            "#,
        )
        .bind(form_id)
        .bind(Self::version_key(version))
        .bind(&file.filename)
        .bind(&file.path)
        .bind(&file.hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_for_form(&self, form_id: &str) -> Result<()> {
        query("DELETE FROM media_files WHERE form_id = ?")
            .bind(form_id)
            .execute(&self.pool)
            .await?;

        query("DELETE FROM media_dirs WHERE form_id = ?")
            .bind(form_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
