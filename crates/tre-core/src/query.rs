//! Structured document queries.
//!
//! A [`DocumentQuery`] is a conjunction of field comparisons over a single
//! document container. Its [`Display`](fmt::Display) form is the SQL text
//! consumed by existing tooling:
//!
//! ```text
//! SELECT * FROM c WHERE c.isActive != false AND c.workspaceId = "..."
//! ```
//!
//! Store backends are free to execute the predicates with bound
//! parameters instead of the rendered literals.

use std::fmt;

/// Comparison operator of a [`Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
        }
    }
}

/// Literal operand of a [`Predicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    String(String),
    Bool(bool),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<&QueryValue> for serde_json::Value {
    fn from(value: &QueryValue) -> Self {
        match value {
            QueryValue::String(s) => serde_json::Value::String(s.clone()),
            QueryValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Bool(b) => write!(f, "{b}"),
            QueryValue::String(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        other => write!(f, "{other}")?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

/// A single `field <op> value` comparison on a top-level document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: String,
    pub op: Comparison,
    pub value: QueryValue,
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        Self {
            field: field.into(),
            op: Comparison::Eq,
            value: value.into(),
        }
    }

    pub fn ne(field: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        Self {
            field: field.into(),
            op: Comparison::Ne,
            value: value.into(),
        }
    }

    /// Evaluate against a JSON document. A missing field compares unequal
    /// to every literal.
    pub fn matches(&self, doc: &serde_json::Value) -> bool {
        let expected = serde_json::Value::from(&self.value);
        let equal = doc.get(&self.field) == Some(&expected);
        match self.op {
            Comparison::Eq => equal,
            Comparison::Ne => !equal,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c.{} {} {}", self.field, self.op.as_str(), self.value)
    }
}

/// Conjunction of predicates selecting whole documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentQuery {
    predicates: Vec<Predicate>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate. Predicates render in insertion order.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, doc: &serde_json::Value) -> bool {
        self.predicates.iter().all(|p| p.matches(doc))
    }
}

impl fmt::Display for DocumentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT * FROM c")?;
        for (i, predicate) in self.predicates.iter().enumerate() {
            let keyword = if i == 0 { "WHERE" } else { "AND" };
            write!(f, " {keyword} {predicate}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_select_without_predicates() {
        assert_eq!(DocumentQuery::new().to_string(), "SELECT * FROM c");
    }

    #[test]
    fn renders_bool_bare_and_strings_quoted() {
        let query = DocumentQuery::new()
            .filter(Predicate::ne("isActive", false))
            .filter(Predicate::eq("id", "abc"));
        assert_eq!(
            query.to_string(),
            r#"SELECT * FROM c WHERE c.isActive != false AND c.id = "abc""#
        );
    }

    #[test]
    fn string_literals_are_escaped() {
        let query = DocumentQuery::new().filter(Predicate::eq("id", r#"a" OR "1"="1\"#));
        assert_eq!(
            query.to_string(),
            r#"SELECT * FROM c WHERE c.id = "a\" OR \"1\"=\"1\\""#
        );
    }

    #[test]
    fn missing_field_passes_not_equal() {
        let query = DocumentQuery::new().filter(Predicate::ne("isActive", false));
        assert!(query.matches(&json!({"id": "x"})));
        assert!(query.matches(&json!({"isActive": true})));
        assert!(!query.matches(&json!({"isActive": false})));
    }
}
