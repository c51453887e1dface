//! Per-type metadata derived once from a record.

use crate::builder::StatementKind;
use crate::config::TableNaming;
use crate::record::{Record, TypeKey};

/// One column of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Declared field name.
    pub name: String,
    /// Column name: the lowercased field name, or the declared override.
    pub column: String,
}

/// Cached metadata for one record type.
///
/// Immutable once built. `fields` follows the record's declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    key: TypeKey,
    type_name: String,
    singular: String,
    plural: String,
    explicit_table: Option<String>,
    fields: Vec<FieldInfo>,
    primary_key: Option<usize>,
}

impl TypeDescriptor {
    /// Build the descriptor for `record`, whose type is named `type_name`.
    pub(crate) fn build(key: TypeKey, record: &dyn Record, type_name: &str) -> Self {
        let singular = type_name.to_lowercase();
        let mut plural = String::with_capacity(singular.len() + 1);
        plural.push_str(&singular);
        plural.push('s');

        let explicit_table = record
            .table_name()
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let defs = record.fields();
        let fields: Vec<FieldInfo> = defs
            .iter()
            .map(|def| FieldInfo {
                name: def.name.to_string(),
                column: def
                    .column
                    .map_or_else(|| def.name.to_lowercase(), str::to_string),
            })
            .collect();

        let primary_key = defs.iter().position(|def| def.primary_key).or_else(|| {
            fields.iter().position(|f| {
                is_primary_key_column(&singular, &f.column)
                    || explicit_table
                        .as_deref()
                        .is_some_and(|t| is_primary_key_column(t, &f.column))
            })
        });

        Self {
            key,
            type_name: type_name.to_string(),
            singular,
            plural,
            explicit_table,
            fields,
            primary_key,
        }
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// The record's type name as declared.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Table name for a statement of `kind` under `naming`.
    pub fn table(&self, kind: StatementKind, naming: TableNaming) -> &str {
        if let Some(table) = &self.explicit_table {
            return table;
        }
        match (naming, kind) {
            (TableNaming::Singular, _)
            | (TableNaming::InsertPlural, StatementKind::Update | StatementKind::Delete) => {
                &self.singular
            }
            _ => &self.plural,
        }
    }

    /// Explicit table override, if the record declares one.
    pub fn explicit_table(&self) -> Option<&str> {
        self.explicit_table.as_deref()
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.column.as_str())
    }

    /// Index of the primary-key field.
    pub fn primary_key(&self) -> Option<usize> {
        self.primary_key
    }

    pub fn primary_key_column(&self) -> Option<&str> {
        self.primary_key.map(|i| self.fields[i].column.as_str())
    }
}

/// The primary-key naming rule.
///
/// `column` is the key if it is `id`, or the table name joined with `id` in
/// either order, with or without an underscore (`userid`, `user_id`,
/// `iduser`, `id_user`).
pub fn is_primary_key_column(table: &str, column: &str) -> bool {
    if column == "id" {
        return true;
    }
    if table.is_empty() {
        return false;
    }

    let table_then_id = column
        .strip_prefix(table)
        .is_some_and(|rest| rest == "id" || rest == "_id");
    let id_then_table = column
        .strip_prefix("id")
        .map(|rest| rest.strip_prefix('_').unwrap_or(rest))
        .is_some_and(|rest| rest == table);

    table_then_id || id_then_table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dyn_record::DynRecord;

    fn describe(record: &DynRecord<'_>) -> TypeDescriptor {
        TypeDescriptor::build(
            record.type_key(),
            record,
            record.type_name().unwrap_or_default(),
        )
    }

    #[test]
    fn primary_key_rule() {
        assert!(is_primary_key_column("user", "id"));
        assert!(is_primary_key_column("user", "userid"));
        assert!(is_primary_key_column("user", "user_id"));
        assert!(is_primary_key_column("user", "iduser"));
        assert!(is_primary_key_column("user", "id_user"));

        assert!(!is_primary_key_column("user", "uid"));
        assert!(!is_primary_key_column("user", "id_account"));
        assert!(!is_primary_key_column("user", "user_idx"));
        assert!(!is_primary_key_column("user", "identity"));
        assert!(!is_primary_key_column("", "userid"));
    }

    #[test]
    fn columns_are_lowercased_in_order() {
        let row = DynRecord::named("User")
            .field("ID", 1)
            .field("Name", "a")
            .field("EmailAddress", "b");
        let desc = describe(&row);
        assert_eq!(
            desc.columns().collect::<Vec<_>>(),
            ["id", "name", "emailaddress"]
        );
        assert_eq!(desc.primary_key(), Some(0));
        assert_eq!(desc.primary_key_column(), Some("id"));
    }

    #[test]
    fn first_matching_key_wins() {
        let row = DynRecord::named("User")
            .field("Name", "a")
            .field("UserID", 2)
            .field("ID", 1);
        assert_eq!(describe(&row).primary_key_column(), Some("userid"));
    }

    #[test]
    fn explicit_key_beats_naming_rule() {
        let row = DynRecord::named("User")
            .field("ID", 1)
            .primary_key("Code", "abc");
        assert_eq!(describe(&row).primary_key_column(), Some("code"));
    }

    #[test]
    fn no_key_when_nothing_matches() {
        let row = DynRecord::named("Log").field("Message", "x").field("Level", 1);
        assert_eq!(describe(&row).primary_key(), None);
    }

    #[test]
    fn column_override_is_verbatim() {
        let row = DynRecord::named("User").field_as("EmailAddress", "email_Address", "x");
        assert_eq!(describe(&row).fields()[0].column, "email_Address");
    }

    #[test]
    fn table_naming_modes() {
        let desc = describe(&DynRecord::named("User").field("ID", 1));
        assert_eq!(desc.table(StatementKind::Insert, TableNaming::Plural), "users");
        assert_eq!(desc.table(StatementKind::Delete, TableNaming::Plural), "users");
        assert_eq!(desc.table(StatementKind::Insert, TableNaming::Singular), "user");
        assert_eq!(desc.table(StatementKind::Update, TableNaming::Singular), "user");
        assert_eq!(desc.table(StatementKind::Insert, TableNaming::InsertPlural), "users");
        assert_eq!(desc.table(StatementKind::Update, TableNaming::InsertPlural), "user");
        assert_eq!(desc.table(StatementKind::Delete, TableNaming::InsertPlural), "user");
    }

    #[test]
    fn explicit_table_is_never_pluralized() {
        let desc = describe(&DynRecord::named("Person").table("people").field("ID", 1));
        assert_eq!(desc.table(StatementKind::Insert, TableNaming::Plural), "people");
        assert_eq!(desc.table(StatementKind::Update, TableNaming::Singular), "people");
        assert_eq!(desc.explicit_table(), Some("people"));
    }

    #[test]
    fn key_rule_accepts_explicit_table_prefix() {
        let row = DynRecord::named("Person").table("people").field("PeopleID", 1);
        assert_eq!(describe(&row).primary_key_column(), Some("peopleid"));
    }
}
