//! Entity field metadata
//!
//! Each persisted entity is described by one static [`EntityMeta`] table.
//! The filter engine is generic over this table: criteria parsing, predicate
//! building, search composition and SQL generation all look fields up here
//! instead of carrying per-entity code.

use crate::core::constants::{ACCOUNT_ROLES, DEPARTMENT_TYPES};

/// Scalar type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    String,
    /// Closed set of allowed string values
    Enum(&'static [&'static str]),
    Boolean,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Enum(_) => "enum",
            Self::Boolean => "boolean",
        }
    }

    /// Declared spelling of an enum value, matched case-insensitively
    pub fn canonical(&self, raw: &str) -> Option<&'static str> {
        match self {
            Self::Enum(variants) => variants
                .iter()
                .copied()
                .find(|v| v.eq_ignore_ascii_case(raw.trim())),
            _ => None,
        }
    }
}

/// A single field of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// API-facing field name (used in query params and expressions)
    pub name: &'static str,
    /// Column in the backing table
    pub column: &'static str,
    pub kind: ScalarKind,
    pub sortable: bool,
    /// Included in free-text `search` OR groups
    pub searchable: bool,
}

impl FieldMeta {
    const fn new(name: &'static str, column: &'static str, kind: ScalarKind) -> Self {
        Self {
            name,
            column,
            kind,
            sortable: true,
            searchable: false,
        }
    }

    const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }
}

/// Field metadata table for one entity
#[derive(Debug)]
pub struct EntityMeta {
    pub name: &'static str,
    pub table: &'static str,
    /// Name of the integer primary key field
    pub id_field: &'static str,
    /// Fields in declaration order (also the SELECT column order)
    pub fields: &'static [FieldMeta],
}

impl EntityMeta {
    /// Look up a field by its API name
    pub fn field(&self, name: &str) -> Option<&'static FieldMeta> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The primary key field
    pub fn id(&self) -> &'static FieldMeta {
        self.field(self.id_field).unwrap_or(&self.fields[0])
    }

    /// Fields taking part in free-text search
    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static FieldMeta> {
        self.fields.iter().filter(|f| f.searchable)
    }

    /// Comma-separated column list for SELECT statements
    pub fn select_columns(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.column)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub static ACCOUNT: EntityMeta = EntityMeta {
    name: "account",
    table: "accounts",
    id_field: "id",
    fields: &[
        FieldMeta::new("id", "id", ScalarKind::Integer),
        FieldMeta::new("username", "username", ScalarKind::String).searchable(),
        FieldMeta::new("first_name", "first_name", ScalarKind::String).searchable(),
        FieldMeta::new("last_name", "last_name", ScalarKind::String).searchable(),
        FieldMeta::new("role", "role", ScalarKind::Enum(ACCOUNT_ROLES)).searchable(),
        FieldMeta::new("department_id", "department_id", ScalarKind::Integer),
        FieldMeta::new("is_deleted", "is_deleted", ScalarKind::Boolean),
        FieldMeta::new("created_at", "created_at", ScalarKind::Integer),
        FieldMeta::new("updated_at", "updated_at", ScalarKind::Integer),
    ],
};

pub static DEPARTMENT: EntityMeta = EntityMeta {
    name: "department",
    table: "departments",
    id_field: "id",
    fields: &[
        FieldMeta::new("id", "id", ScalarKind::Integer),
        FieldMeta::new("name", "name", ScalarKind::String).searchable(),
        FieldMeta::new(
            "department_type",
            "department_type",
            ScalarKind::Enum(DEPARTMENT_TYPES),
        )
        .searchable(),
        FieldMeta::new("is_deleted", "is_deleted", ScalarKind::Boolean),
        FieldMeta::new("created_at", "created_at", ScalarKind::Integer),
        FieldMeta::new("updated_at", "updated_at", ScalarKind::Integer),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup_by_name() {
        let field = ACCOUNT.field("first_name").unwrap();
        assert_eq!(field.column, "first_name");
        assert_eq!(field.kind, ScalarKind::String);
        assert!(ACCOUNT.field("password").is_none());
    }

    #[test]
    fn id_field_is_first_integer() {
        assert_eq!(ACCOUNT.id().name, "id");
        assert_eq!(DEPARTMENT.id().kind, ScalarKind::Integer);
    }

    #[test]
    fn searchable_fields_in_declaration_order() {
        let names: Vec<_> = ACCOUNT.searchable_fields().map(|f| f.name).collect();
        assert_eq!(names, vec!["username", "first_name", "last_name", "role"]);
    }

    #[test]
    fn select_columns_lists_every_field() {
        assert_eq!(
            DEPARTMENT.select_columns(),
            "id, name, department_type, is_deleted, created_at, updated_at"
        );
    }
}
