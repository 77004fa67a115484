//! Listing policy: page limits and expression strictness
//!
//! Criteria mode always rejects malformed input. Expression mode is strict by
//! default; with `query.lenient_expressions` a rejected expression yields an
//! empty result instead of an error.

use crate::core::config::QueryConfig;
use crate::data::filters::{Criteria, EntityMeta, Expression, PageLimits, ValidatedExpression};

use super::error::ServiceError;

#[derive(Debug, Clone, Copy)]
pub struct QueryPolicy {
    pub limits: PageLimits,
    pub lenient_expressions: bool,
}

impl QueryPolicy {
    pub fn from_config(config: &QueryConfig) -> Self {
        Self {
            limits: config.page_limits(),
            lenient_expressions: config.lenient_expressions,
        }
    }

    /// Parse listing query parameters for `entity`
    pub fn criteria(
        &self,
        entity: &'static EntityMeta,
        params: &[(String, String)],
    ) -> Result<Criteria, ServiceError> {
        Criteria::from_params(entity, params, self.limits).map_err(Into::into)
    }

    /// Validate an expression; `Ok(None)` means "lenient rejection, return nothing"
    pub fn expression(
        &self,
        entity: &'static EntityMeta,
        expression: &Expression,
    ) -> Result<Option<ValidatedExpression>, ServiceError> {
        match expression.validate(entity) {
            Ok(validated) => Ok(Some(validated)),
            Err(e) if self.lenient_expressions => {
                tracing::debug!(
                    entity = entity.name,
                    code = e.code(),
                    error = %e,
                    "Ignoring invalid filter expression"
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{ACCOUNT, FilterError};

    fn policy(lenient: bool) -> QueryPolicy {
        QueryPolicy::from_config(&QueryConfig {
            default_page_size: 10,
            max_page_size: 50,
            lenient_expressions: lenient,
        })
    }

    fn blank_value() -> Expression {
        Expression {
            field: Some("username".to_string()),
            operator: Some("equals".to_string()),
            value: Some(String::new()),
        }
    }

    #[test]
    fn test_strict_rejects_invalid_expression() {
        let err = policy(false).expression(&ACCOUNT, &blank_value()).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(FilterError::MissingValue)));
    }

    #[test]
    fn test_lenient_swallows_invalid_expression() {
        assert!(policy(true).expression(&ACCOUNT, &blank_value()).unwrap().is_none());
    }

    #[test]
    fn test_valid_expression_passes_both_modes() {
        let expr = Expression::new("role", "equals", "ADMIN");
        assert!(policy(false).expression(&ACCOUNT, &expr).unwrap().is_some());
        assert!(policy(true).expression(&ACCOUNT, &expr).unwrap().is_some());
    }

    #[test]
    fn test_criteria_uses_configured_limits() {
        let criteria = policy(false).criteria(&ACCOUNT, &[]).unwrap();
        assert_eq!(criteria.page.size, 10);

        let too_big = vec![("size".to_string(), "51".to_string())];
        let err = policy(true).criteria(&ACCOUNT, &too_big).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(FilterError::InvalidPage { .. })));
    }
}
