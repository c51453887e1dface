use proc_macro2::Span;
use syn::{Error, LitStr, Result};

pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn parse_sql_ident(lit: &LitStr, what: &str) -> Result<String> {
    parse_sql_ident_with_span(&lit.value(), lit.span(), what)
}

pub(crate) fn parse_sql_ident_with_span(s: &str, span: Span, what: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::new(span, format!("{what} must not be empty")));
    }
    if !is_valid_sql_ident(s) {
        return Err(Error::new(
            span,
            format!("{what} '{s}' must be a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_]*)"),
        ));
    }
    Ok(s.to_string())
}

/// Table names may be schema-qualified: `schema.table`.
pub(crate) fn parse_sql_table(lit: &LitStr) -> Result<String> {
    let s = lit.value();
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::new(lit.span(), "table must not be empty"));
    }
    if !s.split('.').all(is_valid_sql_ident) {
        return Err(Error::new(
            lit.span(),
            format!("table '{s}' must be a valid SQL identifier, optionally schema-qualified"),
        ));
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(is_valid_sql_ident("email"));
        assert!(is_valid_sql_ident("_hidden"));
        assert!(is_valid_sql_ident("emailAddress2"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_valid_sql_ident(""));
        assert!(!is_valid_sql_ident("2fa"));
        assert!(!is_valid_sql_ident("user id"));
        assert!(!is_valid_sql_ident("users; DROP TABLE users"));
        assert!(!is_valid_sql_ident("public.users"));
    }

    #[test]
    fn table_names_allow_one_schema_per_segment() {
        let ok: LitStr = syn::parse_quote!(" public.users ");
        assert_eq!(parse_sql_table(&ok).unwrap(), "public.users");

        for bad in ["users; DROP TABLE users", "public..users", "users.", "my table"] {
            let lit = LitStr::new(bad, Span::call_site());
            assert!(parse_sql_table(&lit).is_err(), "{bad}");
        }
    }

    #[test]
    fn trims_before_validating() {
        let ident = parse_sql_ident_with_span(" name ", Span::call_site(), "column").unwrap();
        assert_eq!(ident, "name");
        assert!(parse_sql_ident_with_span("  ", Span::call_site(), "column").is_err());
    }
}
