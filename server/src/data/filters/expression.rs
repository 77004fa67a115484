//! Dynamic single-predicate expressions
//!
//! An [`Expression`] arrives as three raw strings. [`Expression::validate`]
//! is the only way to obtain a [`ValidatedExpression`], so every rejection
//! happens before a predicate is built.

use serde::Deserialize;

use super::entity::{EntityMeta, FieldMeta};
use super::error::FilterError;
use super::types::{FieldFilter, FieldValue, Operator};

/// Raw `(field, operator, value)` triple
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Expression {
    pub field: Option<String>,
    pub operator: Option<String>,
    pub value: Option<String>,
}

/// An expression checked against an entity, with its filter populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExpression {
    pub field: &'static FieldMeta,
    pub operator: Operator,
    pub filter: FieldFilter,
}

fn required(value: &Option<String>, missing: FilterError) -> Result<&str, FilterError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(missing),
    }
}

impl Expression {
    pub fn new(field: &str, operator: &str, value: &str) -> Self {
        Self {
            field: Some(field.to_string()),
            operator: Some(operator.to_string()),
            value: Some(value.to_string()),
        }
    }

    pub fn validate(&self, entity: &'static EntityMeta) -> Result<ValidatedExpression, FilterError> {
        let field = required(&self.field, FilterError::MissingField)?;
        let operator = required(&self.operator, FilterError::MissingOperator)?;
        let raw = required(&self.value, FilterError::MissingValue)?;

        let operator = Operator::parse(operator)?;
        let field = entity
            .field(field)
            .ok_or_else(|| FilterError::UnknownField {
                entity: entity.name,
                field: field.to_string(),
            })?;

        // A list with no items would leave the filter unpopulated and match
        // every record
        let value = FieldValue::parse(field, operator, raw)?;
        if value.is_empty_list() {
            return Err(FilterError::MissingValue);
        }
        let mut filter = FieldFilter::for_kind(field.kind);
        filter.set(field, operator, value)?;

        Ok(ValidatedExpression {
            field,
            operator,
            filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::entity::{ACCOUNT, DEPARTMENT};
    use crate::data::filters::types::{IntegerFilter, StringFilter};

    #[test]
    fn validates_equals_on_integer() {
        let expr = Expression::new("department_id", "equals", "3")
            .validate(&ACCOUNT)
            .unwrap();
        assert_eq!(expr.field.name, "department_id");
        assert_eq!(expr.operator, Operator::Equals);
        assert_eq!(expr.filter, FieldFilter::Integer(IntegerFilter::equal_to(3)));
    }

    #[test]
    fn validates_contains_on_string() {
        let expr = Expression::new("name", "contains", "Dev")
            .validate(&DEPARTMENT)
            .unwrap();
        assert_eq!(expr.filter, FieldFilter::String(StringFilter::containing("Dev")));
    }

    #[test]
    fn missing_parts_are_rejected_in_order() {
        let cases = [
            (Expression::default(), FilterError::MissingField),
            (
                Expression {
                    field: Some("id".into()),
                    ..Default::default()
                },
                FilterError::MissingOperator,
            ),
            (
                Expression {
                    field: Some("id".into()),
                    operator: Some("equals".into()),
                    value: None,
                },
                FilterError::MissingValue,
            ),
            (Expression::new("", "equals", "1"), FilterError::MissingField),
            (Expression::new("id", "", "1"), FilterError::MissingOperator),
            (Expression::new("id", "equals", ""), FilterError::MissingValue),
        ];

        for (expr, expected) in cases {
            assert_eq!(expr.validate(&ACCOUNT).unwrap_err(), expected);
        }
    }

    #[test]
    fn list_without_items_is_rejected() {
        for raw in [",", " , ,"] {
            for operator in ["in", "notIn"] {
                assert_eq!(
                    Expression::new("id", operator, raw)
                        .validate(&ACCOUNT)
                        .unwrap_err(),
                    FilterError::MissingValue
                );
            }
        }
        assert_eq!(
            Expression::new("role", "in", ",").validate(&ACCOUNT).unwrap_err(),
            FilterError::MissingValue
        );
    }

    #[test]
    fn unknown_operator_and_field() {
        assert_eq!(
            Expression::new("id", "between", "1").validate(&ACCOUNT).unwrap_err(),
            FilterError::UnknownOperator("between".to_string())
        );
        assert_eq!(
            Expression::new("salary", "equals", "1")
                .validate(&ACCOUNT)
                .unwrap_err()
                .code(),
            "INVALID_FILTER_FIELD"
        );
    }

    #[test]
    fn uncoercible_value_is_rejected() {
        let err = Expression::new("id", "greaterThan", "many")
            .validate(&ACCOUNT)
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidValue { field: "id", .. }));
    }

    #[test]
    fn operator_unsupported_by_type() {
        let err = Expression::new("role", "lessThan", "ADMIN")
            .validate(&ACCOUNT)
            .unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FILTER_OPERATOR");
    }
}
