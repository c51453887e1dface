//! # structsql
//!
//! Build parameterized INSERT, UPDATE and DELETE statements from Rust structs.
//!
//! ## Features
//!
//! - **Derived metadata**: `#[derive(Record)]` describes a struct's fields at
//!   compile time; [`DynRecord`] covers rows assembled at runtime
//! - **Declaration order**: columns and values always follow field order
//! - **Sparse updates**: UPDATE only sets fields holding a non-zero value
//!   (wrap a field in `Option` to set zero values on purpose)
//! - **Placeholder dialects**: `$1, $2` for Postgres, `?` for SQLite and MySQL
//! - **Driver binding**: [`Value`] implements `ToSql` for tokio-postgres
//!   (`postgres` feature) and rusqlite (`sqlite` feature)
//!
//! ## Example
//!
//! ```ignore
//! use structsql::{Engine, Record};
//!
//! #[derive(Record)]
//! struct User {
//!     id: i64,
//!     name: String,
//!     email: String,
//! }
//!
//! let mut engine = Engine::new();
//! let (mut sql, mut values) = (String::new(), Vec::new());
//!
//! let user = User { id: 7, name: "Bob".into(), email: String::new() };
//! engine.update(&user, &mut sql, &mut values)?;
//! assert_eq!(sql, "UPDATE users SET name=$1 WHERE id=$2");
//!
//! client.execute(&sql, &structsql::params_ref(&values)).await?;
//! ```
//!
//! ## Table names
//!
//! The table is the lowercased type name, pluralized with a trailing `s` by
//! default. See [`TableNaming`] for the alternatives, or set
//! `#[structsql(table = "...")]` to name the table explicitly.

pub mod builder;
pub mod cache;
pub mod config;
pub mod descriptor;
pub mod dialect;
pub mod dyn_record;
pub mod engine;
pub mod error;
mod introspect;
pub mod prelude;
pub mod record;
pub mod value;
pub mod zero;

pub use builder::StatementKind;
pub use cache::TypeCache;
pub use config::{DEFAULT_CACHE_CAPACITY, EngineConfig, TableNaming};
pub use descriptor::{FieldInfo, TypeDescriptor, is_primary_key_column};
pub use dialect::{Dialect, UnknownDialect};
pub use dyn_record::DynRecord;
pub use engine::Engine;
pub use error::{BuildError, BuildResult};
pub use record::{FieldDef, Kind, Record, Reflect, Reflected, TypeKey};
pub use value::{ToValue, Value};

#[cfg(feature = "postgres")]
pub use value::params_ref;

#[cfg(feature = "derive")]
pub use structsql_derive::Record;
