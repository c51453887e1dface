//! The record abstraction the engine reflects over.
//!
//! Rust has no runtime field reflection, so a record describes itself through
//! [`Record`]: a type name, an ordered field list and by-index value
//! extraction. `#[derive(Record)]` implements it at compile time and
//! [`DynRecord`](crate::DynRecord) implements it for rows assembled at runtime.
//!
//! Engine operations accept anything that is [`Reflect`], which also lets them
//! report absent inputs and non-record values as errors instead of refusing to
//! compile.

use crate::value::Value;
use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Coarse kind of a value, reported when something that is not a record is
/// handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    UInt,
    Float,
    Text,
    Bytes,
    Uuid,
    Timestamp,
    Json,
    List,
    Map,
    Record,
}

/// Identity of a record type, used as the descriptor cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    /// A `'static` Rust type.
    Id(TypeId),
    /// A type identified by its full type path (generic and borrowing types).
    Name(Cow<'static, str>),
    /// A runtime record identified by its shape signature.
    Shape(Arc<str>),
}

impl TypeKey {
    /// Key for a `'static` type.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Id(TypeId::of::<T>())
    }

    /// Key from the full type path; works for types with lifetimes.
    pub fn named<T: ?Sized>() -> Self {
        Self::Name(Cow::Borrowed(std::any::type_name::<T>()))
    }
}

/// Declaration of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef<'a> {
    /// Declared field name; lowercased to form the column name.
    pub name: &'a str,
    /// Column name override, used verbatim.
    pub column: Option<&'a str>,
    /// Explicit primary key marker; wins over the naming rule.
    pub primary_key: bool,
}

impl<'a> FieldDef<'a> {
    pub const fn new(name: &'a str) -> Self {
        Self {
            name,
            column: None,
            primary_key: false,
        }
    }

    pub const fn column(mut self, column: &'a str) -> Self {
        self.column = Some(column);
        self
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// A row-shaped value: named type, ordered fields, readable values.
///
/// Indices passed to [`field_value`](Record::field_value) and
/// [`field_is_zero`](Record::field_is_zero) are positions in
/// [`fields`](Record::fields). Out-of-range indices yield `Value::Null`.
pub trait Record {
    /// Cache identity of the record's type.
    fn type_key(&self) -> TypeKey;

    /// Type name the table name is derived from. `None` or empty means the
    /// type is anonymous.
    fn type_name(&self) -> Option<&str>;

    /// Explicit table name, used verbatim for every statement.
    fn table_name(&self) -> Option<&str> {
        None
    }

    /// Fields in declaration order.
    fn fields(&self) -> Cow<'_, [FieldDef<'_>]>;

    fn field_count(&self) -> usize {
        self.fields().len()
    }

    /// Declaration of the field at `index`.
    fn field_def(&self, index: usize) -> Option<FieldDef<'_>> {
        self.fields().get(index).copied()
    }

    /// Extract the value of the field at `index`.
    fn field_value(&self, index: usize) -> Value<'_>;

    /// Whether the field at `index` holds its type's zero value.
    fn field_is_zero(&self, index: usize) -> bool {
        self.field_value(index).is_zero()
    }
}

/// What a value looks like to the engine.
pub enum Reflected<'a> {
    /// No value (`None`, `Value::Null`).
    Absent,
    /// A usable record.
    Record(&'a dyn Record),
    /// A scalar or collection.
    Other(Kind),
}

impl std::fmt::Debug for Reflected<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Record(r) => f
                .debug_tuple("Record")
                .field(&r.type_name().unwrap_or("<anonymous>"))
                .finish(),
            Self::Other(kind) => f.debug_tuple("Other").field(kind).finish(),
        }
    }
}

/// Anything that can be handed to an engine operation.
pub trait Reflect {
    fn reflect(&self) -> Reflected<'_>;
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect(&self) -> Reflected<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    fn reflect(&self) -> Reflected<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> Reflected<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn reflect(&self) -> Reflected<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Reflected<'_> {
        match self {
            Some(inner) => inner.reflect(),
            None => Reflected::Absent,
        }
    }
}

impl Reflect for () {
    fn reflect(&self) -> Reflected<'_> {
        Reflected::Absent
    }
}

macro_rules! reflect_as_kind {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Reflected<'_> {
                    Reflected::Other($kind)
                }
            }
        )+
    };
}

reflect_as_kind!(Kind::Bool => bool);
reflect_as_kind!(Kind::Int => i8, i16, i32, i64, i128, isize);
reflect_as_kind!(Kind::UInt => u8, u16, u32, u64, u128, usize);
reflect_as_kind!(Kind::Float => f32, f64);
reflect_as_kind!(Kind::Text => str, String, char);
reflect_as_kind!(Kind::Uuid => uuid::Uuid);
reflect_as_kind!(Kind::Timestamp => chrono::DateTime<chrono::Utc>, chrono::NaiveDateTime);
reflect_as_kind!(Kind::Json => serde_json::Value);

impl<T> Reflect for Vec<T> {
    fn reflect(&self) -> Reflected<'_> {
        Reflected::Other(Kind::List)
    }
}

impl<T> Reflect for [T] {
    fn reflect(&self) -> Reflected<'_> {
        Reflected::Other(Kind::List)
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Reflected<'_> {
        Reflected::Other(Kind::Map)
    }
}

impl<K, V> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Reflected<'_> {
        Reflected::Other(Kind::Map)
    }
}
