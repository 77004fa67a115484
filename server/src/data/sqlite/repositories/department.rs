//! Department repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::filters::{Comparison, DEPARTMENT, Fragment, Page, PageRequest, SqlValue};
use crate::data::sqlite::SqliteError;
use crate::data::sqlite::executor::{fetch_all, fetch_optional, fetch_page};
use crate::data::types::{DepartmentRow, DepartmentUpdate, NewDepartment};

fn id_equals(id: i64) -> Fragment {
    Fragment::compare(DEPARTMENT.id().column, Comparison::Eq(SqlValue::Integer(id)))
}

fn name_taken(name: &str) -> impl FnOnce() -> String + '_ {
    move || format!("department name '{}' already exists", name)
}

/// Insert a department and return the stored row
pub async fn create_department(
    pool: &SqlitePool,
    new: &NewDepartment,
) -> Result<DepartmentRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let sql = format!(
        "INSERT INTO departments (name, department_type, is_deleted, created_at, updated_at) \
         VALUES (?, ?, 0, ?, ?) RETURNING {}",
        DEPARTMENT.select_columns()
    );

    sqlx::query_as::<_, DepartmentRow>(&sql)
        .bind(&new.name)
        .bind(&new.department_type)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| SqliteError::unique_as_conflict(e, name_taken(&new.name)))
}

/// Get a department by ID (soft-deleted rows included)
pub async fn get_department(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<DepartmentRow>, SqliteError> {
    fetch_optional(pool, &DEPARTMENT, &id_equals(id)).await
}

/// Get a department by exact name
pub async fn get_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<DepartmentRow>, SqliteError> {
    let by_name = Fragment::compare("name", Comparison::Eq(SqlValue::from(name)));
    fetch_optional(pool, &DEPARTMENT, &by_name).await
}

/// Check whether a department row exists
pub async fn department_exists(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM departments WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Replace a department's name and type; `None` when the ID does not exist
pub async fn update_department(
    pool: &SqlitePool,
    id: i64,
    update: &DepartmentUpdate,
) -> Result<Option<DepartmentRow>, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let sql = format!(
        "UPDATE departments SET name = ?, department_type = ?, updated_at = ? \
         WHERE id = ? RETURNING {}",
        DEPARTMENT.select_columns()
    );

    sqlx::query_as::<_, DepartmentRow>(&sql)
        .bind(&update.name)
        .bind(&update.department_type)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| SqliteError::unique_as_conflict(e, name_taken(&update.name)))
}

/// Flag a department as deleted; `None` when the ID does not exist
pub async fn soft_delete_department(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<DepartmentRow>, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let sql = format!(
        "UPDATE departments SET is_deleted = 1, updated_at = ? WHERE id = ? RETURNING {}",
        DEPARTMENT.select_columns()
    );

    let row = sqlx::query_as::<_, DepartmentRow>(&sql)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Paged listing for a composed predicate
pub async fn find_departments(
    pool: &SqlitePool,
    fragment: &Fragment,
    request: &PageRequest,
) -> Result<Page<DepartmentRow>, SqliteError> {
    fetch_page(pool, &DEPARTMENT, fragment, request).await
}

/// Unpaged listing for a composed predicate, ordered by ID
pub async fn filter_departments(
    pool: &SqlitePool,
    fragment: &Fragment,
) -> Result<Vec<DepartmentRow>, SqliteError> {
    fetch_all(pool, &DEPARTMENT, fragment).await
}
