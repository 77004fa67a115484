//! Repository trait for the transactional store
//!
//! Services talk to storage only through [`TransactionalRepository`]; the
//! SQLite backend implements it for `Arc<SqliteService>`. Listing operations
//! take an already composed [`Fragment`], so backends never see raw filter
//! input.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::{Fragment, Page, PageRequest};
use crate::data::types::{
    AccountRow, AccountUpdate, DepartmentRow, DepartmentUpdate, NewAccount, NewDepartment,
};

/// Repository trait for account and department operations
#[async_trait]
pub trait TransactionalRepository: Send + Sync {
    // ==================== Account Operations ====================

    /// Insert a new account
    async fn create_account(&self, new: &NewAccount) -> Result<AccountRow, DataError>;

    /// Get an account by ID
    async fn get_account(&self, id: i64) -> Result<Option<AccountRow>, DataError>;

    /// Get an account by username
    async fn get_account_by_username(&self, username: &str)
    -> Result<Option<AccountRow>, DataError>;

    /// Replace mutable account fields (returns None if not found)
    async fn update_account(
        &self,
        id: i64,
        update: &AccountUpdate,
    ) -> Result<Option<AccountRow>, DataError>;

    /// Set the soft-delete flag (returns None if not found)
    async fn soft_delete_account(&self, id: i64) -> Result<Option<AccountRow>, DataError>;

    /// One page of accounts matching `fragment`, plus the total match count
    async fn find_accounts(
        &self,
        fragment: &Fragment,
        request: &PageRequest,
    ) -> Result<Page<AccountRow>, DataError>;

    /// All accounts matching `fragment`, ordered by ID
    async fn filter_accounts(&self, fragment: &Fragment) -> Result<Vec<AccountRow>, DataError>;

    // ==================== Department Operations ====================

    /// Insert a new department
    async fn create_department(&self, new: &NewDepartment) -> Result<DepartmentRow, DataError>;

    /// Get a department by ID
    async fn get_department(&self, id: i64) -> Result<Option<DepartmentRow>, DataError>;

    /// Get a department by name
    async fn get_department_by_name(&self, name: &str)
    -> Result<Option<DepartmentRow>, DataError>;

    /// Check whether a department exists
    async fn department_exists(&self, id: i64) -> Result<bool, DataError>;

    /// Replace department fields (returns None if not found)
    async fn update_department(
        &self,
        id: i64,
        update: &DepartmentUpdate,
    ) -> Result<Option<DepartmentRow>, DataError>;

    /// Set the soft-delete flag (returns None if not found)
    async fn soft_delete_department(&self, id: i64) -> Result<Option<DepartmentRow>, DataError>;

    /// One page of departments matching `fragment`, plus the total match count
    async fn find_departments(
        &self,
        fragment: &Fragment,
        request: &PageRequest,
    ) -> Result<Page<DepartmentRow>, DataError>;

    /// All departments matching `fragment`, ordered by ID
    async fn filter_departments(&self, fragment: &Fragment)
    -> Result<Vec<DepartmentRow>, DataError>;
}
