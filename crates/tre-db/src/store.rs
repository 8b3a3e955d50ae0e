//! SurrealDB implementation of [`DocumentStore`].
//!
//! Each document lives in the `doc` field of a record whose key is the
//! document `id`. Query predicates become `doc.<field>` comparisons with
//! bound parameters; the rendered SQL text is only logged.
//!
//! SurrealDB integers are signed 64-bit. Documents holding an integer
//! above `i64::MAX` anywhere are rejected on write, since the value would
//! otherwise be read back as a float.

use serde_json::Value;
use surrealdb::{Connection, Surreal};
use tracing::debug;
use tre_core::error::{TreError, TreResult};
use tre_core::query::DocumentQuery;
use tre_core::repository::{DocumentStore, document_id};

use crate::error::DbError;
use crate::schema::USER_RESOURCE_TABLE;

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Path of the first integer that does not fit in `i64`, if any.
fn find_unsigned_overflow(value: &Value, path: &str) -> Option<String> {
    match value {
        Value::Number(n) if n.is_u64() && !n.is_i64() => {
            Some(if path.is_empty() { "$".into() } else { path.to_string() })
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, v)| find_unsigned_overflow(v, &format!("{path}[{i}]"))),
        Value::Object(map) => map
            .iter()
            .find_map(|(k, v)| find_unsigned_overflow(v, &format!("{path}.{k}"))),
        _ => None,
    }
}

/// Translate a document query to parameterized SurrealQL. Returns the
/// statement and its bindings in parameter order.
fn to_surql(table: &str, query: &DocumentQuery) -> Result<(String, Vec<Value>), DbError> {
    let mut statement = format!("SELECT VALUE doc FROM {table}");
    let mut bindings = Vec::with_capacity(query.predicates().len());

    for (i, predicate) in query.predicates().iter().enumerate() {
        if !is_identifier(&predicate.field) {
            return Err(DbError::Query(format!(
                "invalid field name: {}",
                predicate.field
            )));
        }
        let keyword = if i == 0 { "WHERE" } else { "AND" };
        statement.push_str(&format!(
            " {keyword} doc.{} {} $p{i}",
            predicate.field,
            predicate.op.as_str()
        ));
        bindings.push(Value::from(&predicate.value));
    }

    Ok((statement, bindings))
}

/// SurrealDB-backed document container.
#[derive(Clone)]
pub struct SurrealDocumentStore<C: Connection> {
    db: Surreal<C>,
    table: String,
}

impl<C: Connection> SurrealDocumentStore<C> {
    /// Container over the user resource table.
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            table: USER_RESOURCE_TABLE.to_string(),
        }
    }

    async fn write(&self, statement: &str, item: &Value) -> TreResult<()> {
        let id = document_id(item)?.to_string();
        if let Some(path) = find_unsigned_overflow(item, "") {
            return Err(TreError::validation(format!(
                "integer at {path} exceeds the storable range"
            )));
        }

        self.db
            .query(statement)
            .bind(("id", id))
            .bind(("doc", item.clone()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}

impl<C: Connection> DocumentStore for SurrealDocumentStore<C> {
    async fn query(&self, query: &DocumentQuery) -> TreResult<Vec<Value>> {
        let (statement, bindings) = to_surql(&self.table, query)?;
        debug!(table = %self.table, query = %query, "Querying documents");

        let mut builder = self.db.query(statement);
        for (i, value) in bindings.into_iter().enumerate() {
            builder = builder.bind((format!("p{i}"), value));
        }

        let mut result = builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let docs: Vec<Value> = result.take(0).map_err(DbError::from)?;
        Ok(docs)
    }

    async fn save_item(&self, item: &Value) -> TreResult<()> {
        let statement = format!(
            "CREATE type::record('{}', $id) SET doc = $doc",
            self.table
        );
        self.write(&statement, item).await
    }

    async fn update_item(&self, item: &Value) -> TreResult<()> {
        let statement = format!(
            "UPSERT type::record('{}', $id) SET doc = $doc, updated_at = time::now()",
            self.table
        );
        self.write(&statement, item).await
    }

    async fn read_item_by_id(&self, id: &str) -> TreResult<Value> {
        let mut result = self
            .db
            .query(format!(
                "SELECT VALUE doc FROM type::record('{}', $id)",
                self.table
            ))
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let docs: Vec<Value> = result.take(0).map_err(DbError::from)?;
        let doc = docs.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: self.table.clone(),
            id: id.to_string(),
        })?;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tre_core::query::Predicate;

    #[test]
    fn predicates_become_bound_doc_comparisons() {
        let query = DocumentQuery::new()
            .filter(Predicate::ne("isActive", false))
            .filter(Predicate::eq("workspaceId", "w1"));

        let (statement, bindings) = to_surql("user_resource", &query).unwrap();

        assert_eq!(
            statement,
            "SELECT VALUE doc FROM user_resource WHERE doc.isActive != $p0 AND doc.workspaceId = $p1"
        );
        assert_eq!(bindings, vec![Value::Bool(false), Value::String("w1".into())]);
    }

    #[test]
    fn oversized_integers_are_located() {
        let doc = serde_json::json!({"id": "x", "properties": {"sizes": [1, u64::MAX]}});
        assert_eq!(
            find_unsigned_overflow(&doc, "").as_deref(),
            Some(".properties.sizes[1]")
        );
        assert!(find_unsigned_overflow(&serde_json::json!({"n": i64::MAX, "f": 1.5}), "").is_none());
    }

    #[test]
    fn unsafe_field_names_are_rejected() {
        let query = DocumentQuery::new().filter(Predicate::eq("id; DELETE x", "y"));
        assert!(matches!(
            to_surql("user_resource", &query),
            Err(DbError::Query(_))
        ));
    }
}
