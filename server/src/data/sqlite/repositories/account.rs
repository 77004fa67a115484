//! Account repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::filters::{ACCOUNT, Comparison, Fragment, Page, PageRequest, SqlValue};
use crate::data::sqlite::SqliteError;
use crate::data::sqlite::executor::{fetch_all, fetch_optional, fetch_page};
use crate::data::types::{AccountRow, AccountUpdate, NewAccount};

/// Insert an account and return the stored row
pub async fn create_account(pool: &SqlitePool, new: &NewAccount) -> Result<AccountRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let sql = format!(
        "INSERT INTO accounts (username, first_name, last_name, role, department_id, is_deleted, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 0, ?, ?) RETURNING {}",
        ACCOUNT.select_columns()
    );

    sqlx::query_as::<_, AccountRow>(&sql)
        .bind(&new.username)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.role)
        .bind(new.department_id)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            SqliteError::unique_as_conflict(e, || {
                format!("username '{}' already exists", new.username)
            })
        })
}

/// Get an account by ID (soft-deleted rows included)
pub async fn get_account(pool: &SqlitePool, id: i64) -> Result<Option<AccountRow>, SqliteError> {
    let by_id = Fragment::compare(ACCOUNT.id().column, Comparison::Eq(SqlValue::Integer(id)));
    fetch_optional(pool, &ACCOUNT, &by_id).await
}

/// Get an account by exact username
pub async fn get_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<AccountRow>, SqliteError> {
    let by_username = Fragment::compare("username", Comparison::Eq(SqlValue::from(username)));
    fetch_optional(pool, &ACCOUNT, &by_username).await
}

/// Replace an account's mutable fields; `None` when the ID does not exist
pub async fn update_account(
    pool: &SqlitePool,
    id: i64,
    update: &AccountUpdate,
) -> Result<Option<AccountRow>, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let sql = format!(
        "UPDATE accounts SET first_name = ?, last_name = ?, role = ?, department_id = ?, updated_at = ? \
         WHERE id = ? RETURNING {}",
        ACCOUNT.select_columns()
    );

    let row = sqlx::query_as::<_, AccountRow>(&sql)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.role)
        .bind(update.department_id)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Flag an account as deleted; `None` when the ID does not exist
pub async fn soft_delete_account(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<AccountRow>, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let sql = format!(
        "UPDATE accounts SET is_deleted = 1, updated_at = ? WHERE id = ? RETURNING {}",
        ACCOUNT.select_columns()
    );

    let row = sqlx::query_as::<_, AccountRow>(&sql)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Paged listing for a composed predicate
pub async fn find_accounts(
    pool: &SqlitePool,
    fragment: &Fragment,
    request: &PageRequest,
) -> Result<Page<AccountRow>, SqliteError> {
    fetch_page(pool, &ACCOUNT, fragment, request).await
}

/// Unpaged listing for a composed predicate, ordered by ID
pub async fn filter_accounts(
    pool: &SqlitePool,
    fragment: &Fragment,
) -> Result<Vec<AccountRow>, SqliteError> {
    fetch_all(pool, &ACCOUNT, fragment).await
}
