//! Attribute parsing for the Record derive macro.

use syn::{Error, Result};

use crate::sql_ident::{parse_sql_ident, parse_sql_table};

/// `#[structsql(...)]` on the struct.
#[derive(Debug, Default)]
pub(crate) struct StructAttrs {
    pub(crate) table: Option<String>,
}

impl syn::parse::Parse for StructAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = StructAttrs::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            let _: syn::Token![=] = input.parse()?;
            let value: syn::LitStr = input.parse()?;

            match ident.to_string().as_str() {
                "table" => attrs.table = Some(parse_sql_table(&value)?),
                other => {
                    return Err(Error::new(
                        ident.span(),
                        format!("unknown structsql struct attribute `{other}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

/// `#[structsql(...)]` on a field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttrs {
    pub(crate) id: bool,
    pub(crate) skip: bool,
    pub(crate) bytes: bool,
    pub(crate) column: Option<String>,
}

impl syn::parse::Parse for FieldAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = FieldAttrs::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;

            match ident.to_string().as_str() {
                "id" => attrs.id = true,
                "skip" => attrs.skip = true,
                "bytes" => attrs.bytes = true,
                "column" => {
                    let _: syn::Token![=] = input.parse()?;
                    let value: syn::LitStr = input.parse()?;
                    attrs.column = Some(parse_sql_ident(&value, "column")?);
                }
                other => {
                    return Err(Error::new(
                        ident.span(),
                        format!("unknown structsql field attribute `{other}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

pub(crate) fn get_struct_attrs(input: &syn::DeriveInput) -> Result<StructAttrs> {
    let mut merged = StructAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("structsql") {
            continue;
        }
        let parsed: StructAttrs = attr.parse_args()?;
        if parsed.table.is_some() {
            merged.table = parsed.table;
        }
    }

    Ok(merged)
}

pub(crate) fn get_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut merged = FieldAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("structsql") {
            continue;
        }
        let parsed: FieldAttrs = attr.parse_args()?;
        merged.id |= parsed.id;
        merged.skip |= parsed.skip;
        merged.bytes |= parsed.bytes;
        if parsed.column.is_some() {
            merged.column = parsed.column;
        }
    }

    if merged.skip && (merged.id || merged.bytes || merged.column.is_some()) {
        return Err(Error::new_spanned(
            field,
            "skip cannot be combined with id, bytes or column",
        ));
    }

    Ok(merged)
}
