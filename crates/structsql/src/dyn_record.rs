//! Records assembled at runtime.

use crate::record::{FieldDef, Record, Reflect, Reflected, TypeKey};
use crate::value::Value;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt::Write;
use std::sync::{Arc, OnceLock};

/// A record whose name and fields are supplied at runtime.
///
/// Two `DynRecord`s share a cached descriptor when they agree on name, table
/// and field layout. The shape key is computed on first use and reused until
/// the record is modified.
///
/// ```ignore
/// let row = DynRecord::named("User")
///     .field("ID", 1)
///     .field("Name", "Alice");
/// engine.insert(&row, &mut sql, &mut values)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DynRecord<'a> {
    name: Option<Cow<'a, str>>,
    table: Option<Cow<'a, str>>,
    fields: Vec<DynField<'a>>,
    shape: OnceLock<Arc<str>>,
}

#[derive(Debug, Clone, PartialEq)]
struct DynField<'a> {
    name: Cow<'a, str>,
    column: Option<Cow<'a, str>>,
    primary_key: bool,
    value: Value<'a>,
}

impl<'a> DynRecord<'a> {
    /// A record of the named type.
    pub fn named(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A record with no type name. Statements cannot be built from it.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Copy the shape and values of any record.
    pub fn from_record(record: &'a dyn Record) -> Self {
        let fields = record.fields();
        let fields = fields
            .iter()
            .enumerate()
            .map(|(i, def)| DynField {
                name: Cow::Borrowed(def.name),
                column: def.column.map(Cow::Borrowed),
                primary_key: def.primary_key,
                value: record.field_value(i),
            })
            .collect();

        Self {
            name: record.type_name().map(Cow::Borrowed),
            table: record.table_name().map(Cow::Borrowed),
            fields,
            shape: OnceLock::new(),
        }
    }

    /// Use an explicit table name for every statement.
    pub fn table(mut self, table: impl Into<Cow<'a, str>>) -> Self {
        self.table = Some(table.into());
        self.shape.take();
        self
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<Cow<'a, str>>, value: impl Into<Value<'a>>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field stored under a different column name.
    pub fn field_as(
        mut self,
        name: impl Into<Cow<'a, str>>,
        column: impl Into<Cow<'a, str>>,
        value: impl Into<Value<'a>>,
    ) -> Self {
        self.shape.take();
        self.fields.push(DynField {
            name: name.into(),
            column: Some(column.into()),
            primary_key: false,
            value: value.into(),
        });
        self
    }

    /// Append a field explicitly marked as the primary key.
    pub fn primary_key(
        mut self,
        name: impl Into<Cow<'a, str>>,
        value: impl Into<Value<'a>>,
    ) -> Self {
        self.shape.take();
        self.fields.push(DynField {
            name: name.into(),
            column: None,
            primary_key: true,
            value: value.into(),
        });
        self
    }

    pub fn push(&mut self, name: impl Into<Cow<'a, str>>, value: impl Into<Value<'a>>) {
        self.shape.take();
        self.fields.push(DynField {
            name: name.into(),
            column: None,
            primary_key: false,
            value: value.into(),
        });
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of the first field with the given declared name.
    pub fn get(&self, name: &str) -> Option<&Value<'a>> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &Value<'a>> {
        self.fields.iter().map(|f| &f.value)
    }

    pub fn borrowed(&self) -> DynRecord<'_> {
        DynRecord {
            name: self.name.as_deref().map(Cow::Borrowed),
            table: self.table.as_deref().map(Cow::Borrowed),
            fields: self
                .fields
                .iter()
                .map(|f| DynField {
                    name: Cow::Borrowed(f.name.as_ref()),
                    column: f.column.as_deref().map(Cow::Borrowed),
                    primary_key: f.primary_key,
                    value: f.value.borrowed(),
                })
                .collect(),
            shape: self.shape.clone(),
        }
    }

    pub fn into_owned(self) -> DynRecord<'static> {
        DynRecord {
            name: self.name.map(|n| Cow::Owned(n.into_owned())),
            table: self.table.map(|t| Cow::Owned(t.into_owned())),
            fields: self
                .fields
                .into_iter()
                .map(|f| DynField {
                    name: Cow::Owned(f.name.into_owned()),
                    column: f.column.map(|c| Cow::Owned(c.into_owned())),
                    primary_key: f.primary_key,
                    value: f.value.into_owned(),
                })
                .collect(),
            shape: self.shape,
        }
    }

    /// Shape signature: name, table and field layout, without values.
    ///
    /// Every name is length-prefixed, so no choice of names can make two
    /// different layouts produce the same signature.
    fn signature(&self) -> String {
        fn part(sig: &mut String, s: Option<&str>) {
            match s {
                Some(s) => {
                    let _ = write!(sig, "{}:{s}", s.len());
                }
                None => sig.push('-'),
            }
        }

        let mut sig = String::from("dyn ");
        part(&mut sig, self.name.as_deref());
        part(&mut sig, self.table.as_deref());
        let _ = write!(sig, "#{}", self.fields.len());
        for f in &self.fields {
            part(&mut sig, Some(&f.name));
            part(&mut sig, f.column.as_deref());
            sig.push(if f.primary_key { '*' } else { '.' });
        }
        sig
    }
}

impl PartialEq for DynRecord<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.table == other.table && self.fields == other.fields
    }
}

impl Record for DynRecord<'_> {
    fn type_key(&self) -> TypeKey {
        TypeKey::Shape(self.shape.get_or_init(|| self.signature().into()).clone())
    }

    fn type_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    fn fields(&self) -> Cow<'_, [FieldDef<'_>]> {
        Cow::Owned(
            self.fields
                .iter()
                .map(|f| FieldDef {
                    name: &f.name,
                    column: f.column.as_deref(),
                    primary_key: f.primary_key,
                })
                .collect(),
        )
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field_value(&self, index: usize) -> Value<'_> {
        self.fields
            .get(index)
            .map_or(Value::Null, |f| f.value.borrowed())
    }

    fn field_is_zero(&self, index: usize) -> bool {
        self.fields.get(index).is_none_or(|f| f.value.is_zero())
    }
}

impl Reflect for DynRecord<'_> {
    fn reflect(&self) -> Reflected<'_> {
        Reflected::Record(self)
    }
}

impl Serialize for DynRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for f in &self.fields {
            map.serialize_entry(f.column.as_deref().unwrap_or(&f.name), &f.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_fields_in_order() {
        let row = DynRecord::named("User").field("ID", 1).field("Name", "Alice");
        assert_eq!(row.type_name(), Some("User"));
        assert_eq!(row.field_count(), 2);
        let names: Vec<_> = row.fields().iter().map(|f| f.name.to_string()).collect();
        assert_eq!(names, ["ID", "Name"]);
        assert_eq!(row.field_value(1).as_str(), Some("Alice"));
        assert_eq!(row.field_value(9), Value::Null);
    }

    #[test]
    fn signature_ignores_values() {
        let a = DynRecord::named("User").field("ID", 1);
        let b = DynRecord::named("User").field("ID", 2);
        let c = DynRecord::named("User").primary_key("ID", 2);
        assert_eq!(a.type_key(), b.type_key());
        assert_ne!(a.type_key(), c.type_key());
    }

    #[test]
    fn signature_separates_names_containing_delimiters() {
        let pair = DynRecord::named("User").field("id", 1).field("name", "x");
        let joined = DynRecord::named("User").field("id,name", 7);
        assert_ne!(pair.type_key(), joined.type_key());

        let column = DynRecord::named("User").field_as("id", "name", 1);
        let colon = DynRecord::named("User").field("id:name", 1);
        assert_ne!(column.type_key(), colon.type_key());

        let table = DynRecord::named("User").table("t").field("id", 1);
        let at = DynRecord::named("User@t").field("id", 1);
        assert_ne!(table.type_key(), at.type_key());
    }

    #[test]
    fn shape_key_is_reused_until_modified() {
        let mut row = DynRecord::named("User").field("ID", 1);
        let (TypeKey::Shape(a), TypeKey::Shape(b)) = (row.type_key(), row.type_key()) else {
            panic!("runtime records are keyed by shape");
        };
        assert!(Arc::ptr_eq(&a, &b));

        row.push("Name", "x");
        let TypeKey::Shape(c) = row.type_key() else {
            panic!("runtime records are keyed by shape");
        };
        assert_ne!(a, c);
        assert_eq!(row.type_key(), row.clone().into_owned().type_key());
        assert_eq!(row, DynRecord::named("User").field("ID", 1).field("Name", "x"));
    }

    #[test]
    fn from_record_copies_shape() {
        let src = DynRecord::named("Post")
            .table("blog_posts")
            .field_as("Title", "headline", "Hi");
        let copy = DynRecord::from_record(&src);
        assert_eq!(copy.type_name(), Some("Post"));
        assert_eq!(copy.table_name(), Some("blog_posts"));
        assert_eq!(copy.fields()[0].column, Some("headline"));
        assert_eq!(copy.get("Title").and_then(Value::as_str), Some("Hi"));
    }

    #[test]
    fn serializes_by_column() {
        let row = DynRecord::named("User")
            .field("ID", 1)
            .field_as("Mail", "email", "a@b.c");
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"ID":1,"email":"a@b.c"}"#
        );
    }
}
