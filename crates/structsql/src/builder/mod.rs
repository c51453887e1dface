//! Statement builders.
//!
//! Every builder follows the same shape:
//!
//! - Resolve the record and run every check before touching the caller's
//!   output slots. On error, `sql` and `values` are left exactly as they were.
//! - Assemble the statement in the engine's reusable buffer.
//! - Copy the buffer into `sql` and refill `values` in placeholder order.
//!
//! Column order always follows the record's declaration order, whatever the
//! dialect.

mod delete;
mod insert;
mod update;


use crate::dialect::Dialect;
use crate::engine::Engine;

/// Which statement is being built. Drives the table naming rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append `a, b, c`.
fn write_columns<'a>(out: &mut String, columns: impl Iterator<Item = &'a str>) {
    for (i, column) in columns.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(column);
    }
}

/// Append `count` placeholders separated by `, `, numbered from `first`.
fn write_placeholders(out: &mut String, dialect: Dialect, first: usize, count: usize) {
    for i in 0..count {
        if i > 0 {
            out.push_str(", ");
        }
        dialect.write_placeholder(first + i, out);
    }
}

impl Engine {
    /// Publish the assembled statement into the caller's `sql` slot.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn emit(&self, kind: StatementKind, sql: &mut String, params: usize) {
        sql.clear();
        sql.push_str(&self.buf);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "structsql",
            kind = kind.as_str(),
            dialect = self.config.dialect.as_str(),
            params,
            sql = %self.buf,
            "built statement"
        );
    }
}
