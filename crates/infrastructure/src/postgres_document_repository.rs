use async_trait::async_trait;
use rolegraph_application::{Document, DocumentFilter, DocumentRepository, document_name};
use rolegraph_core::{AppError, AppResult};
use rolegraph_domain::Collection;
use serde_json::Value;
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed document store over the `collection_documents` table.
#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    document: Value,
}

impl DocumentRow {
    fn into_document(self, collection: Collection) -> AppResult<Document> {
        match self.document {
            Value::Object(document) => Ok(document),
            other => Err(AppError::Internal(format!(
                "stored {collection} document is not a JSON object: '{other}'"
            ))),
        }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn find_by_name(
        &self,
        collection: Collection,
        name: &str,
    ) -> AppResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT document
            FROM collection_documents
            WHERE collection = $1 AND name = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            storage_error(format!("failed to find {collection} document '{name}'"), error)
        })?;

        row.map(|row| row.into_document(collection)).transpose()
    }

    async fn find_all(
        &self,
        collection: Collection,
        filter: DocumentFilter,
    ) -> AppResult<Vec<Document>> {
        let query = match &filter {
            DocumentFilter::All => sqlx::query_as::<_, DocumentRow>(
                r#"
                SELECT document
                FROM collection_documents
                WHERE collection = $1
                ORDER BY name
                "#,
            )
            .bind(collection.as_str()),
            DocumentFilter::Name(name) => sqlx::query_as::<_, DocumentRow>(
                r#"
                SELECT document
                FROM collection_documents
                WHERE collection = $1 AND name = $2
                ORDER BY name
                "#,
            )
            .bind(collection.as_str())
            .bind(name.as_str()),
            DocumentFilter::FieldEquals { field, value } => sqlx::query_as::<_, DocumentRow>(
                r#"
                SELECT document
                FROM collection_documents
                WHERE collection = $1 AND document -> $2 = $3
                ORDER BY name
                "#,
            )
            .bind(collection.as_str())
            .bind(field.as_str())
            .bind(value),
        };

        let rows = query.fetch_all(&self.pool).await.map_err(|error| {
            storage_error(format!("failed to list {collection} documents"), error)
        })?;

        rows.into_iter()
            .map(|row| row.into_document(collection))
            .collect()
    }

    async fn insert_unique(&self, collection: Collection, document: Document) -> AppResult<()> {
        let name = document_name(&document)?.to_owned();

        sqlx::query(
            r#"
            INSERT INTO collection_documents (collection, name, document)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection.as_str())
        .bind(name.as_str())
        .bind(Value::Object(document))
        .execute(&self.pool)
        .await
        .map_err(|error| map_name_conflict(error, collection, name.as_str()))?;

        Ok(())
    }

    async fn update_by_name(
        &self,
        collection: Collection,
        name: &str,
        fields: Document,
    ) -> AppResult<u64> {
        let target_name = fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_owned();

        let result = sqlx::query(
            r#"
            UPDATE collection_documents
            SET document = document || $3,
                name = COALESCE($3 ->> 'name', name)
            WHERE collection = $1 AND name = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(name)
        .bind(Value::Object(fields))
        .execute(&self.pool)
        .await
        .map_err(|error| map_name_conflict(error, collection, target_name.as_str()))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_name(&self, collection: Collection, name: &str) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM collection_documents
            WHERE collection = $1 AND name = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            storage_error(
                format!("failed to delete {collection} document '{name}'"),
                error,
            )
        })?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|error| storage_error("database ping failed".to_owned(), error))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

fn map_name_conflict(error: sqlx::Error, collection: Collection, name: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::DuplicateName(format!("{collection} document '{name}' already exists"));
    }

    storage_error(
        format!("failed to write {collection} document '{name}'"),
        error,
    )
}

fn storage_error(context: String, error: sqlx::Error) -> AppError {
    match error {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            AppError::Internal(format!("{context}: {error}"))
        }
        _ => AppError::StorageFailure(format!("{context}: {error}")),
    }
}
