//! Zero-value classification.
//!
//! An UPDATE only SETs fields that are not zero. A field explicitly set to its
//! zero value is indistinguishable from one never touched; wrap the field in
//! `Option` when that difference matters.

use crate::dyn_record::DynRecord;
use crate::value::Value;

impl Value<'_> {
    /// Whether this is the empty/default value of its kind.
    ///
    /// Timestamps are opaque and never zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(v) => !*v,
            Self::Int(v) => *v == 0,
            Self::UInt(v) => *v == 0,
            Self::Float(v) => *v == 0.0,
            Self::Text(v) => v.is_empty(),
            Self::Bytes(v) => v.is_empty(),
            Self::Uuid(v) => v.is_nil(),
            Self::Timestamp(_) => false,
            Self::Json(v) => v.is_null(),
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Record(record) => record.is_zero(),
        }
    }
}

impl DynRecord<'_> {
    /// A record is zero when every one of its fields is.
    pub fn is_zero(&self) -> bool {
        self.values().all(Value::is_zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn scalars() {
        assert!(Value::Null.is_zero());
        assert!(Value::Bool(false).is_zero());
        assert!(!Value::Bool(true).is_zero());
        assert!(Value::Int(0).is_zero());
        assert!(!Value::Int(-1).is_zero());
        assert!(Value::UInt(0).is_zero());
        assert!(Value::Float(0.0).is_zero());
        assert!(Value::Float(-0.0).is_zero());
        assert!(!Value::Float(f64::NAN).is_zero());
    }

    #[test]
    fn text_and_bytes() {
        assert!(Value::Text(Cow::Borrowed("")).is_zero());
        assert!(!Value::Text(Cow::Borrowed(" ")).is_zero());
        assert!(Value::Bytes(Cow::Borrowed(&[])).is_zero());
        assert!(!Value::Bytes(Cow::Owned(vec![0])).is_zero());
    }

    #[test]
    fn collections() {
        assert!(Value::List(vec![]).is_zero());
        assert!(!Value::List(vec![Value::Int(0)]).is_zero());
        assert!(Value::Map(vec![]).is_zero());
        assert!(Value::Json(serde_json::Value::Null).is_zero());
        assert!(!Value::Json(serde_json::json!({})).is_zero());
    }

    #[test]
    fn uuid_and_timestamp() {
        assert!(Value::Uuid(uuid::Uuid::nil()).is_zero());
        assert!(!Value::Uuid(uuid::Uuid::new_v4()).is_zero());
        assert!(!Value::Timestamp(chrono::DateTime::UNIX_EPOCH).is_zero());
    }

    #[test]
    fn nested_records_are_zero_only_when_all_fields_are() {
        let empty = DynRecord::named("Address").field("Street", "").field("Zip", 0);
        assert!(Value::Record(empty).is_zero());

        let partial = DynRecord::named("Address").field("Street", "").field("Zip", 12345);
        assert!(!Value::Record(partial).is_zero());

        assert!(DynRecord::named("Nothing").is_zero());
    }
}
