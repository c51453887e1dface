//! Derive macros for structsql
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod record;
mod sql_ident;

/// Derive `Record` (plus `Reflect` and `ToValue`) for a struct.
///
/// # Example
///
/// ```ignore
/// use structsql::Record;
///
/// #[derive(Record)]
/// #[structsql(table = "accounts")]
/// struct Account {
///     #[structsql(id)]
///     code: String,
///     owner: String,
///     #[structsql(column = "balance_cents")]
///     balance: Option<i64>,
///     #[structsql(bytes)]
///     avatar: Vec<u8>,
///     #[structsql(skip)]
///     dirty: bool,
/// }
/// ```
///
/// # Attributes
///
/// - `#[structsql(table = "name")]` - Explicit table name, used verbatim
/// - `#[structsql(id)]` - Mark field as primary key
/// - `#[structsql(column = "name")]` - Map field to a different column name
/// - `#[structsql(bytes)]` - Extract the field as bytes (`AsRef<[u8]>`)
/// - `#[structsql(skip)]` - Leave the field out of every statement
///
/// Every other field must implement `ToValue`.
#[proc_macro_derive(Record, attributes(structsql))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
