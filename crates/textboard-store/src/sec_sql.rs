//! SQL statement builder with positional binding
//!
//! `SecSql` accumulates SQL fragments containing `?` placeholders together
//! with the values that fill them, then prepares and binds the statement
//! against a connection. Values never become part of the SQL text that is
//! executed; `debug_string()` inlines them for logs only.
//!
//! ```
//! use textboard_store::{sql_args, SecSql};
//!
//! let sql = SecSql::create("SELECT * FROM article")
//!     .append("WHERE id = ?", [3])
//!     .append("AND title = ?", ["hello"]);
//!
//! assert_eq!(sql.render(), "SELECT * FROM article WHERE id = ? AND title = ?");
//! assert_eq!(
//!     sql.debug_string(),
//!     "SELECT * FROM article WHERE id = '3' AND title = 'hello'"
//! );
//!
//! let update = SecSql::create("UPDATE article")
//!     .append("SET title = ?, body = ?", sql_args!["t", "b"])
//!     .append("WHERE id = ?", [1]);
//! assert_eq!(update.parameters().len(), 3);
//! ```

#![allow(clippy::result_large_err)]

use std::fmt;

use rusqlite::{Connection, Row, Statement};

use crate::errors::{from_rusqlite, statement_bind_error, unsupported_value_kind, Result};

/// Build a `Vec<Value>` from mixed integer and text arguments
#[macro_export]
macro_rules! sql_args {
    ($($arg:expr),* $(,)?) => {{
        let args: ::std::vec::Vec<$crate::sec_sql::Value> =
            ::std::vec![$($crate::sec_sql::Value::from($arg)),*];
        args
    }};
}

/// A value that can be bound to a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl TryFrom<rusqlite::types::Value> for Value {
    type Error = textboard_core::ExError;

    fn try_from(v: rusqlite::types::Value) -> Result<Self> {
        match v {
            rusqlite::types::Value::Integer(i) => Ok(Value::Int(i)),
            rusqlite::types::Value::Text(s) => Ok(Value::Text(s)),
            rusqlite::types::Value::Null => Err(unsupported_value_kind("NULL")),
            rusqlite::types::Value::Real(_) => Err(unsupported_value_kind("REAL")),
            rusqlite::types::Value::Blob(_) => Err(unsupported_value_kind("BLOB")),
        }
    }
}

/// SQL text plus the values for its placeholders, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecSql {
    template: String,
    parameters: Vec<Value>,
}

impl SecSql {
    /// Start a builder seeded with the first fragment
    pub fn create(first_fragment: &str) -> Self {
        Self::default().append_sql(first_fragment)
    }

    /// Append a fragment and the values for the placeholders it introduces
    ///
    /// Placeholder and value counts are not compared here; a mismatch is
    /// reported by `bind`.
    pub fn append<I>(mut self, fragment: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.template.push_str(fragment);
        self.template.push(' ');
        self.parameters.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append a fragment that has no placeholders
    pub fn append_sql(self, fragment: &str) -> Self {
        self.append(fragment, Vec::<Value>::new())
    }

    /// The statement text with placeholders intact
    pub fn render(&self) -> &str {
        self.template.trim()
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    /// Number of `?` characters in the rendered text, quoted ones included
    pub fn placeholder_count(&self) -> usize {
        self.render().matches('?').count()
    }

    /// Whether executing this statement yields a generated key
    pub fn is_insert(&self) -> bool {
        self.render()
            .get(..6)
            .is_some_and(|head| head.eq_ignore_ascii_case("INSERT"))
    }

    /// The statement with every placeholder replaced by its quoted value
    ///
    /// No escaping is performed: the result is for logs, never for execution.
    /// Placeholders without a value are left as `?`.
    pub fn debug_string(&self) -> String {
        let rendered = self.render();
        let mut out = String::with_capacity(rendered.len());
        let mut values = self.parameters.iter();

        for ch in rendered.chars() {
            if ch != '?' {
                out.push(ch);
                continue;
            }
            match values.next() {
                Some(value) => {
                    out.push('\'');
                    out.push_str(&value.to_string());
                    out.push('\'');
                }
                None => out.push('?'),
            }
        }

        out
    }

    /// Prepare the statement on `conn` and bind every value by position
    ///
    /// # Errors
    ///
    /// `StatementBind` when the SQL does not prepare or when the statement's
    /// placeholder count differs from the number of values.
    pub fn bind<'conn>(&self, conn: &'conn Connection) -> Result<BoundStatement<'conn>> {
        let sql = self.render();
        tracing::debug!(sql = %self.debug_string(), "binding statement");

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| statement_bind_error(sql, e.to_string()))?;

        let expected = stmt.parameter_count();
        if expected != self.parameters.len() {
            return Err(statement_bind_error(
                sql,
                format!(
                    "statement has {} placeholder(s) ({} `?` in text) but {} value(s) were appended",
                    expected,
                    self.placeholder_count(),
                    self.parameters.len()
                ),
            ));
        }

        for (index, value) in self.parameters.iter().enumerate() {
            let position = index + 1;
            let bound = match value {
                Value::Int(v) => stmt.raw_bind_parameter(position, *v),
                Value::Text(v) => stmt.raw_bind_parameter(position, v.as_str()),
            };
            bound.map_err(|e| statement_bind_error(sql, e.to_string()))?;
        }

        Ok(BoundStatement {
            conn,
            stmt,
            returns_generated_key: self.is_insert(),
        })
    }
}

impl fmt::Display for SecSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

/// A prepared statement with all values bound, ready to run once
pub struct BoundStatement<'conn> {
    conn: &'conn Connection,
    stmt: Statement<'conn>,
    returns_generated_key: bool,
}

impl<'conn> BoundStatement<'conn> {
    pub fn returns_generated_key(&self) -> bool {
        self.returns_generated_key
    }

    /// Run an INSERT/UPDATE/DELETE and return the number of affected rows
    ///
    /// # Errors
    ///
    /// `Persistence` when SQLite rejects the statement.
    pub fn execute_update(mut self) -> Result<usize> {
        self.stmt.raw_execute().map_err(from_rusqlite)
    }

    /// Run an INSERT and return the generated row id
    ///
    /// # Errors
    ///
    /// `StatementBind` when the statement is not an INSERT, `Persistence`
    /// when SQLite rejects it.
    pub fn execute_insert(mut self) -> Result<i64> {
        if !self.returns_generated_key {
            let sql = self.stmt.expanded_sql().unwrap_or_default();
            return Err(statement_bind_error(
                &sql,
                "generated keys are only available for INSERT statements",
            ));
        }
        self.stmt.raw_execute().map_err(from_rusqlite)?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Run a query and map every row
    ///
    /// # Errors
    ///
    /// `Persistence` when the query or the row mapping fails.
    pub fn query_map<T, F>(mut self, mut f: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut rows = self.stmt.raw_query();
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(from_rusqlite)? {
            out.push(f(row).map_err(from_rusqlite)?);
        }
        Ok(out)
    }

    /// Run a query and map the first row, if any
    ///
    /// # Errors
    ///
    /// `Persistence` when the query or the row mapping fails.
    pub fn query_row_optional<T, F>(mut self, f: F) -> Result<Option<T>>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut rows = self.stmt.raw_query();
        match rows.next().map_err(from_rusqlite)? {
            Some(row) => f(row).map(Some).map_err(from_rusqlite),
            None => Ok(None),
        }
    }

    /// Run a query whose first column of the first row is an integer
    ///
    /// # Errors
    ///
    /// `Persistence` when the query fails or returns no row.
    pub fn query_scalar_i64(self) -> Result<i64> {
        self.query_row_optional(|row| row.get::<_, i64>(0))?
            .ok_or_else(|| from_rusqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}
