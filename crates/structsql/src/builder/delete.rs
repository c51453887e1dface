use super::StatementKind;
use crate::engine::Engine;
use crate::error::{BuildError, BuildResult};
use crate::introspect::Resolved;
use crate::record::Reflect;
use crate::value::Value;

impl Engine {
    /// Build a DELETE for `record`, keyed on its primary key.
    ///
    /// ```text
    /// DELETE FROM users WHERE id=$1
    /// ```
    ///
    /// `values` holds just the key value, which is bound even when zero.
    pub fn delete<'r, R: Reflect + ?Sized>(
        &mut self,
        record: &'r R,
        sql: &mut String,
        values: &mut Vec<Value<'r>>,
    ) -> BuildResult<()> {
        let Resolved { record, descriptor } = self.resolve(record)?;
        let table = descriptor.table(StatementKind::Delete, self.config.table_naming);
        let (Some(pk), Some(pk_column)) = (descriptor.primary_key(), descriptor.primary_key_column())
        else {
            return Err(BuildError::missing_primary_key(table));
        };

        self.buf.clear();
        self.buf.push_str("DELETE FROM ");
        self.buf.push_str(table);
        self.buf.push_str(" WHERE ");
        self.buf.push_str(pk_column);
        self.buf.push('=');
        self.config.dialect.write_placeholder(1, &mut self.buf);

        self.emit(StatementKind::Delete, sql, 1);
        values.clear();
        values.push(record.field_value(pk));
        Ok(())
    }
}
