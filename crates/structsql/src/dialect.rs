//! Placeholder dialects.
//!
//! A [`Dialect`] only decides how the N-th parameter is spelled in SQL text.
//! Column order, table names and value order never depend on it.

use serde::Deserialize;
use std::fmt::{self, Write};
use std::str::FromStr;

/// SQL placeholder style of the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Dialect {
    /// Numbered placeholders: `$1, $2, ...`.
    #[default]
    Postgres,
    /// Positional placeholders: `?`.
    Sqlite,
    /// Positional placeholders: `?`.
    MySql,
}

impl Dialect {
    /// Append the placeholder for the 1-based `position` to `out`.
    pub fn write_placeholder(self, position: usize, out: &mut String) {
        match self {
            Self::Postgres => {
                out.push('$');
                let _ = write!(out, "{position}");
            }
            Self::Sqlite | Self::MySql => out.push('?'),
        }
    }

    /// Whether placeholders carry their position (`$N`).
    pub fn is_numbered(self) -> bool {
        matches!(self, Self::Postgres)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
            Self::MySql => "mysql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown SQL dialect: '{0}'")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "mysql" | "mariadb" => Ok(Self::MySql),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = UnknownDialect;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(dialect: Dialect, position: usize) -> String {
        let mut out = String::new();
        dialect.write_placeholder(position, &mut out);
        out
    }

    #[test]
    fn postgres_numbers_placeholders() {
        assert_eq!(render(Dialect::Postgres, 1), "$1");
        assert_eq!(render(Dialect::Postgres, 12), "$12");
        // Positions past two digits must not wrap.
        assert_eq!(render(Dialect::Postgres, 105), "$105");
    }

    #[test]
    fn positional_dialects_ignore_position() {
        assert_eq!(render(Dialect::Sqlite, 1), "?");
        assert_eq!(render(Dialect::Sqlite, 42), "?");
        assert_eq!(render(Dialect::MySql, 7), "?");
    }

    #[test]
    fn appends_without_clearing() {
        let mut out = String::from("id=");
        Dialect::Postgres.write_placeholder(3, &mut out);
        assert_eq!(out, "id=$3");
    }

    #[test]
    fn default_is_postgres() {
        assert_eq!(Dialect::default(), Dialect::Postgres);
    }

    #[test]
    fn parse_names() {
        assert_eq!("postgresql".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("PG".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!(" sqlite ".parse::<Dialect>().unwrap(), Dialect::Sqlite);
        assert_eq!("mysql".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert!("oracle".parse::<Dialect>().is_err());
    }
}
