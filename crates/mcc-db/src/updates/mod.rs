//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. The same structs are
//! the PATCH bodies of the HTTP API: they reject unknown keys, and nullable
//! columns use `Option<Option<T>>` so an explicit `null` clears the value.

pub mod adr;
pub mod feature;
pub mod project;
pub mod proposal;
pub mod refactor;
pub mod rule;
pub mod specification;

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including `null`) as `Some(inner)`.
///
/// Combined with `#[serde(default)]`, a missing key stays `None` while
/// `"key": null` becomes `Some(None)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accumulates `column = ?N` SET clauses and their bound values.
#[derive(Default)]
pub(crate) struct SetClauses {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SetClauses {
    pub(crate) fn push(&mut self, column: &str, value: impl Into<libsql::Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    pub(crate) fn push_opt(&mut self, column: &str, value: Option<impl Into<libsql::Value>>) {
        self.push(column, value.map_or(libsql::Value::Null, Into::into));
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Finish the statement: stamp `updated_at` and bind `id` last.
    pub(crate) fn into_sql(mut self, table: &str, id: i64) -> (String, Vec<libsql::Value>) {
        self.push("updated_at", chrono::Utc::now().to_rfc3339());
        self.params.push(id.into());
        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{}",
            self.sets.join(", "),
            self.params.len()
        );
        (sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clauses_number_params_in_order() {
        let mut sets = SetClauses::default();
        sets.push("name", "demo");
        sets.push_opt("repo_url", None::<String>);
        let (sql, params) = sets.into_sql("projects", 7);
        assert_eq!(
            sql,
            "UPDATE projects SET name = ?1, repo_url = ?2, updated_at = ?3 WHERE id = ?4"
        );
        assert_eq!(params.len(), 4);
        assert!(matches!(params[1], libsql::Value::Null));
        assert!(matches!(params[3], libsql::Value::Integer(7)));
    }
}
