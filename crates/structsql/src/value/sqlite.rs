//! Binding [`Value`]s as rusqlite parameters.

use super::Value;
use rusqlite::types::{ToSqlOutput, Value as SqliteValue, ValueRef};
use rusqlite::{Error, ToSql};

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let out = match self {
            Value::Null => ToSqlOutput::Owned(SqliteValue::Null),
            Value::Bool(v) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*v))),
            Value::Int(v) => ToSqlOutput::Owned(SqliteValue::Integer(*v)),
            Value::UInt(v) => {
                let v = i64::try_from(*v).map_err(|e| Error::ToSqlConversionFailure(Box::new(e)))?;
                ToSqlOutput::Owned(SqliteValue::Integer(v))
            }
            Value::Float(v) => ToSqlOutput::Owned(SqliteValue::Real(*v)),
            Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v.as_ref())),
            Value::Uuid(v) => ToSqlOutput::Owned(SqliteValue::Text(v.hyphenated().to_string())),
            Value::Timestamp(v) => ToSqlOutput::Owned(SqliteValue::Text(v.to_rfc3339())),
            Value::Json(_) | Value::List(_) | Value::Map(_) | Value::Record(_) => {
                let json = serde_json::to_string(self)
                    .map_err(|e| Error::ToSqlConversionFailure(Box::new(e)))?;
                ToSqlOutput::Owned(SqliteValue::Text(json))
            }
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dyn_record::DynRecord;

    #[test]
    fn binds_through_rusqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE users (id INTEGER, name TEXT, meta TEXT)")
            .unwrap();

        let meta = Value::Record(DynRecord::named("Meta").field("Level", 2));
        let values = [Value::Int(1), Value::from("alice"), meta];
        conn.execute(
            "INSERT INTO users (id, name, meta) VALUES (?, ?, ?)",
            rusqlite::params_from_iter(values.iter()),
        )
        .unwrap();

        let (name, meta): (String, String) = conn
            .query_row("SELECT name, meta FROM users WHERE id = ?", [1], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(name, "alice");
        assert_eq!(meta, r#"{"Level":2}"#);
    }

    #[test]
    fn oversized_uint_fails() {
        assert!(Value::UInt(u64::MAX).to_sql().is_err());
    }
}
