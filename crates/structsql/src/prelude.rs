//! Convenient imports for typical `structsql` usage.
//!
//! ```ignore
//! use structsql::prelude::*;
//! ```

pub use crate::{
    BuildError, BuildResult, Dialect, DynRecord, Engine, EngineConfig, Record, Reflect,
    TableNaming, ToValue, Value,
};

#[cfg(feature = "postgres")]
pub use crate::params_ref;
