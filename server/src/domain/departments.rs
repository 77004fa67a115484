//! Department service

use std::sync::Arc;

use crate::core::constants::DEPARTMENT_TYPES;
use crate::data::TransactionalRepository;
use crate::data::filters::{
    Criteria, DEPARTMENT, Expression, Page, ScalarKind, compose_criteria, compose_expression,
};
use crate::data::types::{DepartmentRow, DepartmentUpdate, NewDepartment};

use super::error::{ServiceError, codes};
use super::query::QueryPolicy;

const ENTITY: &str = "department";

#[derive(Clone)]
pub struct DepartmentService {
    repo: Arc<dyn TransactionalRepository>,
    policy: QueryPolicy,
}

impl DepartmentService {
    pub fn new(repo: Arc<dyn TransactionalRepository>, policy: QueryPolicy) -> Self {
        Self { repo, policy }
    }

    pub async fn list(
        &self,
        params: &[(String, String)],
    ) -> Result<Page<DepartmentRow>, ServiceError> {
        let criteria = self.policy.criteria(&DEPARTMENT, params)?;
        self.find_by_criteria(&criteria).await
    }

    pub async fn find_by_criteria(
        &self,
        criteria: &Criteria,
    ) -> Result<Page<DepartmentRow>, ServiceError> {
        let fragment = compose_criteria(criteria);
        Ok(self.repo.find_departments(&fragment, &criteria.page).await?)
    }

    pub async fn find_by_expression(
        &self,
        expression: &Expression,
    ) -> Result<Vec<DepartmentRow>, ServiceError> {
        let Some(validated) = self.policy.expression(&DEPARTMENT, expression)? else {
            return Ok(Vec::new());
        };
        Ok(self
            .repo
            .filter_departments(&compose_expression(&validated))
            .await?)
    }

    pub async fn get(&self, id: i64) -> Result<DepartmentRow, ServiceError> {
        self.repo
            .get_department(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    pub async fn create(&self, mut new: NewDepartment) -> Result<DepartmentRow, ServiceError> {
        if self.repo.get_department_by_name(&new.name).await?.is_some() {
            return Err(ServiceError::rejected(codes::DEPARTMENT_NAME_EXISTS, &new.name));
        }
        new.department_type = canonical_type(&new.department_type)?;

        let department = self.repo.create_department(&new).await?;
        tracing::debug!(id = department.id, name = %department.name, "Department created");
        Ok(department)
    }

    /// Rename or retype; the new name may not belong to another department
    pub async fn update(
        &self,
        id: i64,
        mut update: DepartmentUpdate,
    ) -> Result<DepartmentRow, ServiceError> {
        if let Some(existing) = self.repo.get_department_by_name(&update.name).await?
            && existing.id != id
        {
            return Err(ServiceError::rejected(
                codes::DEPARTMENT_NAME_EXISTS,
                &update.name,
            ));
        }
        update.department_type = canonical_type(&update.department_type)?;

        self.repo
            .update_department(id, &update)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    pub async fn delete(&self, id: i64) -> Result<DepartmentRow, ServiceError> {
        let department = self
            .repo
            .soft_delete_department(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        tracing::debug!(id, "Department soft-deleted");
        Ok(department)
    }
}

fn canonical_type(raw: &str) -> Result<String, ServiceError> {
    ScalarKind::Enum(DEPARTMENT_TYPES)
        .canonical(raw)
        .map(str::to_string)
        .ok_or_else(|| ServiceError::rejected(codes::DEPARTMENT_TYPE_INVALID, raw))
}
