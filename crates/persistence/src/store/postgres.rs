//! PostgreSQL JSONB document store.
//!
//! Each document is one row of the `documents` table. Top-level updates use
//! the JSONB `||` operator, which replaces the named keys and keeps the rest.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{CollectionQuery, Document, DocumentStore, Fields, OrderKind, SortDirection};
use crate::entities::DocumentEntity;
use crate::error::StoreError;
use crate::metrics::QueryTimer;

/// Document store backed by the `documents` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a new PgDocumentStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_document(entity: DocumentEntity) -> Result<Document, StoreError> {
    match entity.data {
        Value::Object(fields) => Ok(Document::new(entity.key, fields)),
        _ => Err(StoreError::Unavailable(format!(
            "document {}/{} is not a JSON object",
            entity.collection, entity.key
        ))),
    }
}

/// RFC 3339 shape accepted as a timestamp ordering value. Anything else sorts
/// as missing instead of failing the cast.
const TIMESTAMP_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}[Tt ]\d{2}:\d{2}:\d{2}(\.\d+)?([Zz]|[+-]\d{2}:\d{2})$";

/// SQL expression for the ordering field of the row aliased `alias`. `$2` is
/// the field name. Missing or malformed values evaluate to NULL.
fn order_expression(kind: OrderKind, alias: &str) -> String {
    match kind {
        OrderKind::Timestamp => format!(
            "(CASE WHEN ({alias}.data->>$2) ~ '{TIMESTAMP_PATTERN}' \
             THEN ({alias}.data->>$2)::timestamptz END)"
        ),
        OrderKind::Text => format!("({alias}.data->>$2)"),
    }
}

/// Ordered scan with NULLs last in either direction.
///
/// After a cursor with a value, the page continues with later non-NULL rows
/// and then every NULL row. After a cursor without a value, only NULL rows
/// with a later key remain. An unknown cursor key matches nothing.
fn scan_sql(query: &CollectionQuery) -> String {
    let expr = order_expression(query.order_kind, "d");
    let cursor_expr = order_expression(query.order_kind, "c");
    let direction = query.direction.as_sql();
    let comparison = match query.direction {
        SortDirection::Ascending => ">",
        SortDirection::Descending => "<",
    };

    format!(
        r#"
        WITH cursor_doc AS (
            SELECT {cursor_expr} AS value, c.key
            FROM documents c
            WHERE c.collection = $1 AND c.key = $3
        )
        SELECT d.collection, d.key, d.data, d.created_at, d.updated_at
        FROM documents d
        WHERE d.collection = $1
          AND ($3::text IS NULL OR EXISTS (
                SELECT 1 FROM cursor_doc
                WHERE (cursor_doc.value IS NOT NULL
                       AND ({expr} IS NULL
                            OR ({expr}, d.key) {comparison} (cursor_doc.value, cursor_doc.key)))
                   OR (cursor_doc.value IS NULL
                       AND {expr} IS NULL
                       AND d.key {comparison} cursor_doc.key)
          ))
        ORDER BY {expr} {direction} NULLS LAST, d.key {direction}
        LIMIT $4
        "#
    )
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        let timer = QueryTimer::new("document_get");
        let result = sqlx::query_as::<_, DocumentEntity>(
            r#"
            SELECT collection, key, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND key = $2
            "#,
        )
        .bind(collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result?.map(into_document).transpose()
    }

    async fn update(&self, collection: &str, key: &str, fields: Fields) -> Result<(), StoreError> {
        let timer = QueryTimer::new("document_update");
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = data || $3, updated_at = NOW()
            WHERE collection = $1 AND key = $2
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(Value::Object(fields))
        .execute(&self.pool)
        .await;
        timer.record();

        if result?.rows_affected() == 0 {
            return Err(StoreError::not_found(collection, key));
        }
        Ok(())
    }

    async fn set(&self, collection: &str, key: &str, fields: Fields) -> Result<(), StoreError> {
        let timer = QueryTimer::new("document_set");
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, key, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, key)
            DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(Value::Object(fields))
        .execute(&self.pool)
        .await;
        timer.record();

        result?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        query: &CollectionQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let timer = QueryTimer::new("document_query");
        let sql = scan_sql(query);
        let result = sqlx::query_as::<_, DocumentEntity>(&sql)
            .bind(collection)
            .bind(&query.order_by)
            .bind(query.start_after.as_deref())
            .bind(i64::from(query.limit))
            .fetch_all(&self.pool)
            .await;
        timer.record();

        result?.into_iter().map(into_document).collect()
    }
}
