//! Forms repository trait and implementation

use crate::error::{FormsError, Result};
use crate::models::Form;
use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, SqlitePool};

/// Installed-forms repository interface
#[async_trait]
pub trait FormsRepository: Send + Sync {
    /// Check whether any version of `form_id` is installed.
    async fn contains(&self, form_id: &str) -> Result<bool>;

    /// All installed forms, every version included.
    async fn get_all(&self) -> Result<Vec<Form>>;

    /// All installed versions of one form.
    async fn get_by_form_id(&self, form_id: &str) -> Result<Vec<Form>>;

    /// Insert a new form record.
    ///
    /// # Errors
    /// Returns an error if validation fails or a record with the same row
    /// id already exists.
    async fn insert(&self, form: &Form) -> Result<()>;

    /// Delete every installed version of `form_id`.
    ///
    /// # Returns
    /// The number of rows removed.
    async fn delete_by_form_id(&self, form_id: &str) -> Result<u64>;
}

/// SQLite implementation of FormsRepository
pub struct SqliteFormsRepository {
    pool: SqlitePool,
}

impl SqliteFormsRepository {
    /// Create a new SQLite forms repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormsRepository for SqliteFormsRepository {
    async fn contains(&self, form_id: &str) -> Result<bool> {
        let count: i64 = query_scalar("SELECT COUNT(*) FROM forms WHERE form_id = ?")
            .bind(form_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn get_all(&self) -> Result<Vec<Form>> {
        let forms = query_as::<_, Form>("SELECT * FROM forms ORDER BY form_id, version")
            .fetch_all(&self.pool)
            .await?;

        Ok(forms)
    }

    async fn get_by_form_id(&self, form_id: &str) -> Result<Vec<Form>> {
        let forms = query_as::<_, Form>("SELECT * FROM forms WHERE form_id = ? ORDER BY version")
            .bind(form_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(forms)
    }

    async fn insert(&self, form: &Form) -> Result<()> {
        form.validate().map_err(|msg| FormsError::InvalidInput {
            field: "form".to_string(),
            message: msg,
        })?;

        query(
            r#"
            INSERT INTO forms (
                id, form_id, display_name, version, hash,
                form_file_path, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&form.id)
        .bind(&form.form_id)
        .bind(&form.display_name)
        .bind(&form.version)
        .bind(&form.hash)
        .bind(&form.form_file_path)
        .bind(form.created_at)
        .bind(form.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_form_id(&self, form_id: &str) -> Result<u64> {
        let result = query("DELETE FROM forms WHERE form_id = ?")
            .bind(form_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
