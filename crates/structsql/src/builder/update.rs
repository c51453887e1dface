use super::StatementKind;
use crate::engine::Engine;
use crate::error::{BuildError, BuildResult};
use crate::introspect::Resolved;
use crate::record::Reflect;
use crate::value::Value;

impl Engine {
    /// Build an UPDATE for `record`, keyed on its primary key.
    ///
    /// Only non-key fields holding a non-zero value go into the SET list, in
    /// declaration order. The key value comes last:
    ///
    /// ```text
    /// UPDATE users SET name=$1, email=$2 WHERE id=$3
    /// ```
    ///
    /// A record with no key field fails with
    /// [`BuildError::MissingPrimaryKey`]; one whose non-key fields are all
    /// zero fails with [`BuildError::NoFieldsToUpdate`]. Wrap a field in
    /// `Option` to be able to SET a zero value explicitly.
    pub fn update<'r, R: Reflect + ?Sized>(
        &mut self,
        record: &'r R,
        sql: &mut String,
        values: &mut Vec<Value<'r>>,
    ) -> BuildResult<()> {
        let Resolved { record, descriptor } = self.resolve(record)?;
        let table = descriptor.table(StatementKind::Update, self.config.table_naming);
        if descriptor.is_empty() {
            return Err(BuildError::no_fields(table));
        }
        let Some(pk) = descriptor.primary_key() else {
            return Err(BuildError::missing_primary_key(table));
        };

        self.selected.clear();
        self.selected.extend(
            (0..descriptor.field_count()).filter(|&i| i != pk && !record.field_is_zero(i)),
        );
        if self.selected.is_empty() {
            return Err(BuildError::no_fields_to_update(table));
        }

        let fields = descriptor.fields();
        let dialect = self.config.dialect;
        self.buf.clear();
        self.buf.push_str("UPDATE ");
        self.buf.push_str(table);
        self.buf.push_str(" SET ");
        for (pos, &i) in self.selected.iter().enumerate() {
            if pos > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push_str(&fields[i].column);
            self.buf.push('=');
            dialect.write_placeholder(pos + 1, &mut self.buf);
        }
        let key_position = self.selected.len() + 1;
        self.buf.push_str(" WHERE ");
        self.buf.push_str(&fields[pk].column);
        self.buf.push('=');
        dialect.write_placeholder(key_position, &mut self.buf);

        self.emit(StatementKind::Update, sql, key_position);
        values.clear();
        values.extend(self.selected.iter().map(|&i| record.field_value(i)));
        values.push(record.field_value(pk));
        Ok(())
    }
}
