//! Account service
//!
//! Wraps the repository with the account business rules and the two listing
//! modes (criteria and expression).

use std::sync::Arc;

use crate::core::constants::ACCOUNT_ROLES;
use crate::data::TransactionalRepository;
use crate::data::filters::{
    ACCOUNT, Criteria, Expression, Page, ScalarKind, compose_criteria, compose_expression,
};
use crate::data::types::{AccountRow, AccountUpdate, NewAccount};

use super::error::{ServiceError, codes};
use super::query::QueryPolicy;

const ENTITY: &str = "account";

/// Input for a new account; `department_id` is checked by the service
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub department_id: Option<i64>,
}

#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn TransactionalRepository>,
    policy: QueryPolicy,
}

impl AccountService {
    pub fn new(repo: Arc<dyn TransactionalRepository>, policy: QueryPolicy) -> Self {
        Self { repo, policy }
    }

    /// Criteria listing straight from query parameters
    pub async fn list(&self, params: &[(String, String)]) -> Result<Page<AccountRow>, ServiceError> {
        let criteria = self.policy.criteria(&ACCOUNT, params)?;
        self.find_by_criteria(&criteria).await
    }

    pub async fn find_by_criteria(
        &self,
        criteria: &Criteria,
    ) -> Result<Page<AccountRow>, ServiceError> {
        let fragment = compose_criteria(criteria);
        Ok(self.repo.find_accounts(&fragment, &criteria.page).await?)
    }

    /// Unpaged listing for a single expression
    pub async fn find_by_expression(
        &self,
        expression: &Expression,
    ) -> Result<Vec<AccountRow>, ServiceError> {
        let Some(validated) = self.policy.expression(&ACCOUNT, expression)? else {
            return Ok(Vec::new());
        };
        let fragment = compose_expression(&validated);
        Ok(self.repo.filter_accounts(&fragment).await?)
    }

    pub async fn get(&self, id: i64) -> Result<AccountRow, ServiceError> {
        self.repo
            .get_account(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<AccountRow, ServiceError> {
        self.repo
            .get_account_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, username))
    }

    pub async fn create(&self, input: CreateAccount) -> Result<AccountRow, ServiceError> {
        if self
            .repo
            .get_account_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(ServiceError::rejected(
                codes::ACCOUNT_USERNAME_EXISTS,
                &input.username,
            ));
        }

        let role = canonical_role(&input.role)?;
        let department_id = input
            .department_id
            .ok_or_else(|| ServiceError::rejected(codes::ACCOUNT_DEPARTMENT_NULL, "null"))?;
        self.require_department(department_id).await?;

        let account = self
            .repo
            .create_account(&NewAccount {
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                role,
                department_id,
            })
            .await?;

        tracing::debug!(id = account.id, username = %account.username, "Account created");
        Ok(account)
    }

    /// Replace mutable fields; a `None` department detaches the account
    pub async fn update(
        &self,
        id: i64,
        mut update: AccountUpdate,
    ) -> Result<AccountRow, ServiceError> {
        update.role = canonical_role(&update.role)?;
        if let Some(department_id) = update.department_id {
            self.require_department(department_id).await?;
        }

        self.repo
            .update_account(id, &update)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    /// Soft delete; the row stays visible to listings with `is_deleted = true`
    pub async fn delete(&self, id: i64) -> Result<AccountRow, ServiceError> {
        let account = self
            .repo
            .soft_delete_account(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        tracing::debug!(id, "Account soft-deleted");
        Ok(account)
    }

    async fn require_department(&self, department_id: i64) -> Result<(), ServiceError> {
        if self.repo.department_exists(department_id).await? {
            Ok(())
        } else {
            Err(ServiceError::rejected(
                codes::ACCOUNT_DEPARTMENT_MISSING,
                department_id,
            ))
        }
    }
}

fn canonical_role(raw: &str) -> Result<String, ServiceError> {
    ScalarKind::Enum(ACCOUNT_ROLES)
        .canonical(raw)
        .map(str::to_string)
        .ok_or_else(|| ServiceError::rejected(codes::ACCOUNT_ROLE_INVALID, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::QueryConfig;
    use crate::data::filters::FilterError;
    use crate::data::sqlite::test_pool_with_schema;
    use crate::data::types::NewDepartment;
    use crate::data::{DataError, SqliteService, TransactionalService};

    async fn setup(lenient: bool) -> (AccountService, i64) {
        let pool = test_pool_with_schema().await;
        let repo =
            TransactionalService::Sqlite(Arc::new(SqliteService::from_pool(pool))).repository();
        let department = repo
            .create_department(&NewDepartment {
                name: "Platform".to_string(),
                department_type: "DEV".to_string(),
            })
            .await
            .unwrap();
        let policy = QueryPolicy::from_config(&QueryConfig {
            lenient_expressions: lenient,
            ..QueryConfig::default()
        });
        (AccountService::new(repo, policy), department.id)
    }

    fn input(username: &str, role: &str, department_id: Option<i64>) -> CreateAccount {
        CreateAccount {
            username: username.to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            role: role.to_string(),
            department_id,
        }
    }

    fn rejection_code(err: ServiceError) -> &'static str {
        match err {
            ServiceError::Rejected { code, .. } => code,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, dept) = setup(false).await;
        let created = service
            .create(input("ann", "employee", Some(dept)))
            .await
            .unwrap();
        assert_eq!(created.role, "EMPLOYEE");
        assert_eq!(created.department_id, Some(dept));
        assert!(!created.is_deleted);

        assert_eq!(service.get(created.id).await.unwrap(), created);
        assert_eq!(service.get_by_username("ann").await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let (service, dept) = setup(false).await;
        service.create(input("ann", "ADMIN", Some(dept))).await.unwrap();

        let err = service
            .create(input("ann", "ADMIN", Some(dept)))
            .await
            .unwrap_err();
        assert_eq!(rejection_code(err), codes::ACCOUNT_USERNAME_EXISTS);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_role() {
        let (service, dept) = setup(false).await;
        let err = service
            .create(input("ann", "OWNER", Some(dept)))
            .await
            .unwrap_err();
        assert_eq!(rejection_code(err), codes::ACCOUNT_ROLE_INVALID);
    }

    #[tokio::test]
    async fn test_create_requires_existing_department() {
        let (service, _) = setup(false).await;

        let err = service.create(input("ann", "ADMIN", None)).await.unwrap_err();
        assert_eq!(rejection_code(err), codes::ACCOUNT_DEPARTMENT_NULL);

        let err = service
            .create(input("ann", "ADMIN", Some(999)))
            .await
            .unwrap_err();
        assert_eq!(rejection_code(err), codes::ACCOUNT_DEPARTMENT_MISSING);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_detaches() {
        let (service, dept) = setup(false).await;
        let created = service.create(input("ann", "ADMIN", Some(dept))).await.unwrap();

        let updated = service
            .update(
                created.id,
                AccountUpdate {
                    first_name: "Anna".to_string(),
                    last_name: "Berg".to_string(),
                    role: "manager".to_string(),
                    department_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Anna");
        assert_eq!(updated.role, "MANAGER");
        assert_eq!(updated.department_id, None);
        assert_eq!(updated.username, "ann");
    }

    #[tokio::test]
    async fn test_update_rejects_missing_department_and_unknown_id() {
        let (service, dept) = setup(false).await;
        let created = service.create(input("ann", "ADMIN", Some(dept))).await.unwrap();

        let update = AccountUpdate {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            role: "ADMIN".to_string(),
            department_id: Some(404),
        };
        let err = service.update(created.id, update.clone()).await.unwrap_err();
        assert_eq!(rejection_code(err), codes::ACCOUNT_DEPARTMENT_MISSING);

        let err = service
            .update(
                777,
                AccountUpdate {
                    department_id: None,
                    ..update
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_soft() {
        let (service, dept) = setup(false).await;
        let created = service.create(input("ann", "ADMIN", Some(dept))).await.unwrap();

        let deleted = service.delete(created.id).await.unwrap();
        assert!(deleted.is_deleted);
        assert!(service.get(created.id).await.unwrap().is_deleted);

        let err = service.delete(12345).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_filters_by_params() {
        let (service, dept) = setup(false).await;
        service.create(input("ann", "ADMIN", Some(dept))).await.unwrap();
        service.create(input("bob", "EMPLOYEE", Some(dept))).await.unwrap();
        service.create(input("cat", "EMPLOYEE", Some(dept))).await.unwrap();

        let params = vec![("role.equals".to_string(), "EMPLOYEE".to_string())];
        let page = service.list(&params).await.unwrap();
        assert_eq!(page.total_elements, 2);
        let names: Vec<_> = page.content.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "cat"]);

        let all = service.list(&[]).await.unwrap();
        assert_eq!(all.total_elements, 3);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_field() {
        let (service, _) = setup(false).await;
        let params = vec![("password.equals".to_string(), "x".to_string())];
        let err = service.list(&params).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(FilterError::UnknownField { .. })
        ));
    }

    #[tokio::test]
    async fn test_expression_strict_and_lenient() {
        let blank = Expression {
            field: Some("username".to_string()),
            operator: Some("equals".to_string()),
            value: None,
        };

        let (strict, dept) = setup(false).await;
        strict.create(input("ann", "ADMIN", Some(dept))).await.unwrap();
        assert!(matches!(
            strict.find_by_expression(&blank).await.unwrap_err(),
            ServiceError::Validation(FilterError::MissingValue)
        ));

        let (lenient, dept) = setup(true).await;
        lenient.create(input("ann", "ADMIN", Some(dept))).await.unwrap();
        assert!(lenient.find_by_expression(&blank).await.unwrap().is_empty());

        let found = lenient
            .find_by_expression(&Expression::new("username", "equals", "ann"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_unique_race_maps_to_conflict() {
        let (service, dept) = setup(false).await;
        service.create(input("ann", "ADMIN", Some(dept))).await.unwrap();

        // Bypass the pre-check to hit the database constraint
        let err = service
            .repo
            .create_account(&NewAccount {
                username: "ann".to_string(),
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                role: "ADMIN".to_string(),
                department_id: dept,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Conflict(_)));
    }
}
