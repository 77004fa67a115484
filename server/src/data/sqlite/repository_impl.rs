//! TransactionalRepository trait implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::{Fragment, Page, PageRequest};
use crate::data::traits::TransactionalRepository;
use crate::data::types::{
    AccountRow, AccountUpdate, DepartmentRow, DepartmentUpdate, NewAccount, NewDepartment,
};

use super::SqliteService;
use super::repositories::{account, department};

#[async_trait]
impl TransactionalRepository for Arc<SqliteService> {
    // ==================== Account Operations ====================

    async fn create_account(&self, new: &NewAccount) -> Result<AccountRow, DataError> {
        account::create_account(self.pool(), new)
            .await
            .map_err(Into::into)
    }

    async fn get_account(&self, id: i64) -> Result<Option<AccountRow>, DataError> {
        account::get_account(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn get_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountRow>, DataError> {
        account::get_by_username(self.pool(), username)
            .await
            .map_err(Into::into)
    }

    async fn update_account(
        &self,
        id: i64,
        update: &AccountUpdate,
    ) -> Result<Option<AccountRow>, DataError> {
        account::update_account(self.pool(), id, update)
            .await
            .map_err(Into::into)
    }

    async fn soft_delete_account(&self, id: i64) -> Result<Option<AccountRow>, DataError> {
        account::soft_delete_account(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn find_accounts(
        &self,
        fragment: &Fragment,
        request: &PageRequest,
    ) -> Result<Page<AccountRow>, DataError> {
        account::find_accounts(self.pool(), fragment, request)
            .await
            .map_err(Into::into)
    }

    async fn filter_accounts(&self, fragment: &Fragment) -> Result<Vec<AccountRow>, DataError> {
        account::filter_accounts(self.pool(), fragment)
            .await
            .map_err(Into::into)
    }

    // ==================== Department Operations ====================

    async fn create_department(&self, new: &NewDepartment) -> Result<DepartmentRow, DataError> {
        department::create_department(self.pool(), new)
            .await
            .map_err(Into::into)
    }

    async fn get_department(&self, id: i64) -> Result<Option<DepartmentRow>, DataError> {
        department::get_department(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn get_department_by_name(
        &self,
        name: &str,
    ) -> Result<Option<DepartmentRow>, DataError> {
        department::get_by_name(self.pool(), name)
            .await
            .map_err(Into::into)
    }

    async fn department_exists(&self, id: i64) -> Result<bool, DataError> {
        department::department_exists(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn update_department(
        &self,
        id: i64,
        update: &DepartmentUpdate,
    ) -> Result<Option<DepartmentRow>, DataError> {
        department::update_department(self.pool(), id, update)
            .await
            .map_err(Into::into)
    }

    async fn soft_delete_department(&self, id: i64) -> Result<Option<DepartmentRow>, DataError> {
        department::soft_delete_department(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn find_departments(
        &self,
        fragment: &Fragment,
        request: &PageRequest,
    ) -> Result<Page<DepartmentRow>, DataError> {
        department::find_departments(self.pool(), fragment, request)
            .await
            .map_err(Into::into)
    }

    async fn filter_departments(
        &self,
        fragment: &Fragment,
    ) -> Result<Vec<DepartmentRow>, DataError> {
        department::filter_departments(self.pool(), fragment)
            .await
            .map_err(Into::into)
    }
}
