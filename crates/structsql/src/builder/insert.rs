use super::{StatementKind, write_columns, write_placeholders};
use crate::engine::Engine;
use crate::error::{BuildError, BuildResult};
use crate::introspect::Resolved;
use crate::record::{Record, Reflect};
use crate::value::Value;

impl Engine {
    /// Build an INSERT for `record`.
    ///
    /// Every declared field is inserted, zero-valued or not:
    ///
    /// ```text
    /// INSERT INTO users (id, name, email) VALUES ($1, $2, $3)
    /// ```
    ///
    /// On success `sql` holds the statement and `values` holds one value per
    /// column, in column order. On error both are left untouched.
    pub fn insert<'r, R: Reflect + ?Sized>(
        &mut self,
        record: &'r R,
        sql: &mut String,
        values: &mut Vec<Value<'r>>,
    ) -> BuildResult<()> {
        let Resolved { record, descriptor } = self.resolve(record)?;
        let table = descriptor.table(StatementKind::Insert, self.config.table_naming);
        if descriptor.is_empty() {
            return Err(BuildError::no_fields(table));
        }
        let n = descriptor.field_count();

        self.buf.clear();
        self.buf.push_str("INSERT INTO ");
        self.buf.push_str(table);
        self.buf.push_str(" (");
        write_columns(&mut self.buf, descriptor.columns());
        self.buf.push_str(") VALUES (");
        write_placeholders(&mut self.buf, self.config.dialect, 1, n);
        self.buf.push(')');

        self.emit(StatementKind::Insert, sql, n);
        values.clear();
        values.extend((0..n).map(|i| record.field_value(i)));
        Ok(())
    }

    /// Build one multi-row INSERT for a batch of records of the same type.
    ///
    /// ```text
    /// INSERT INTO users (id, name) VALUES ($1, $2), ($3, $4)
    /// ```
    ///
    /// `values` is filled row by row. An empty batch is
    /// [`BuildError::InvalidInput`]; records of different types are
    /// [`BuildError::MixedRecordTypes`].
    pub fn insert_many<'r, R: Reflect>(
        &mut self,
        records: &'r [R],
        sql: &mut String,
        values: &mut Vec<Value<'r>>,
    ) -> BuildResult<()> {
        let Some((first, rest)) = records.split_first() else {
            return Err(BuildError::InvalidInput);
        };

        let head = self.resolve(first)?;
        let table = head
            .descriptor
            .table(StatementKind::Insert, self.config.table_naming);
        if head.descriptor.is_empty() {
            return Err(BuildError::no_fields(table));
        }

        let mut rows: Vec<&'r dyn Record> = Vec::with_capacity(records.len());
        rows.push(head.record);
        for record in rest {
            let next = self.resolve(record)?;
            if next.descriptor.key() != head.descriptor.key() {
                return Err(BuildError::MixedRecordTypes {
                    expected: head.descriptor.type_name().to_string(),
                    found: next.descriptor.type_name().to_string(),
                });
            }
            rows.push(next.record);
        }

        let n = head.descriptor.field_count();
        self.buf.clear();
        self.buf.push_str("INSERT INTO ");
        self.buf.push_str(table);
        self.buf.push_str(" (");
        write_columns(&mut self.buf, head.descriptor.columns());
        self.buf.push_str(") VALUES ");
        for row in 0..rows.len() {
            if row > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push('(');
            write_placeholders(&mut self.buf, self.config.dialect, row * n + 1, n);
            self.buf.push(')');
        }

        self.emit(StatementKind::Insert, sql, rows.len() * n);
        values.clear();
        values.reserve(rows.len() * n);
        for row in rows {
            values.extend((0..n).map(|i| row.field_value(i)));
        }
        Ok(())
    }
}
