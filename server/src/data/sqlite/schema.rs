//! SQLite schema definitions
//!
//! `SCHEMA` is always the latest full schema and is applied as-is to fresh
//! databases. Older databases are brought forward by the versioned
//! migrations in `migrations.rs`.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Departments (must be before accounts due to FK)
-- =============================================================================
CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK(length(name) >= 1 AND length(name) <= 100),
    department_type TEXT NOT NULL CHECK(department_type IN ('DEV', 'TEST', 'SCRUM_MASTER', 'PM')),
    is_deleted INTEGER NOT NULL DEFAULT 0 CHECK(is_deleted IN (0, 1)),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_departments_type ON departments(department_type);

-- =============================================================================
-- 2. Accounts (references departments)
-- =============================================================================
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE CHECK(length(username) >= 1 AND length(username) <= 50),
    first_name TEXT NOT NULL CHECK(length(first_name) <= 50),
    last_name TEXT NOT NULL CHECK(length(last_name) <= 50),
    role TEXT NOT NULL CHECK(role IN ('ADMIN', 'EMPLOYEE', 'MANAGER')),
    department_id INTEGER REFERENCES departments(id) ON DELETE SET NULL,
    is_deleted INTEGER NOT NULL DEFAULT 0 CHECK(is_deleted IN (0, 1)),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_accounts_department ON accounts(department_id);
CREATE INDEX IF NOT EXISTS idx_accounts_role ON accounts(role);
CREATE INDEX IF NOT EXISTS idx_accounts_deleted ON accounts(is_deleted);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{ACCOUNT_ROLES, DEPARTMENT_TYPES};

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn test_schema_version_is_positive() {
        assert!(SCHEMA_VERSION > 0);
    }

    #[test]
    fn test_schema_contains_required_tables() {
        let required_tables = [
            "schema_version",
            "schema_migrations",
            "departments",
            "accounts",
        ];

        for table in required_tables {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "Schema missing table: {}",
                table
            );
        }
    }

    #[test]
    fn test_schema_checks_match_enum_constants() {
        for role in ACCOUNT_ROLES {
            assert!(SCHEMA.contains(&format!("'{}'", role)), "role {} not allowed", role);
        }
        for kind in DEPARTMENT_TYPES {
            assert!(SCHEMA.contains(&format!("'{}'", kind)), "type {} not allowed", kind);
        }
    }
}
