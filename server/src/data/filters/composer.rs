//! Predicate composition
//!
//! Criteria mode ANDs one fragment per populated field, in the entity's
//! declaration order, then ANDs in the free-text search group. Expression
//! mode builds exactly one fragment.

use super::builder::build;
use super::criteria::Criteria;
use super::entity::EntityMeta;
use super::expression::ValidatedExpression;
use super::fragment::Fragment;
use super::types::{FieldFilter, IntegerFilter, StringFilter};

pub fn compose_criteria(criteria: &Criteria) -> Fragment {
    let entity = criteria.entity();

    let fields = entity
        .fields
        .iter()
        .filter_map(|field| criteria.filter(field.name).map(|f| build(field, f)));
    let composed = Fragment::all(fields);

    match criteria.search.as_deref() {
        Some(text) => composed.and(search_group(entity, text)),
        None => composed,
    }
}

pub fn compose_expression(expression: &ValidatedExpression) -> Fragment {
    build(expression.field, &expression.filter)
}

/// OR group of `contains` over every searchable field
///
/// Numeric text also matches the primary key exactly.
pub fn search_group(entity: &EntityMeta, text: &str) -> Fragment {
    let contains = FieldFilter::String(StringFilter::containing(text));
    let mut parts: Vec<Fragment> = entity
        .searchable_fields()
        .map(|field| build(field, &contains))
        .collect();

    if let Ok(id) = text.trim().parse::<i64>() {
        parts.push(build(
            entity.id(),
            &FieldFilter::Integer(IntegerFilter::equal_to(id)),
        ));
    }

    Fragment::any(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::criteria::PageLimits;
    use crate::data::filters::entity::{ACCOUNT, DEPARTMENT};
    use crate::data::filters::expression::Expression;
    use crate::data::filters::fragment::{Comparison, SqlParams, SqlValue};
    use crate::data::filters::page::PageRequest;

    const LIMITS: PageLimits = PageLimits {
        default_size: 20,
        max_size: 100,
    };

    fn criteria(pairs: &[(&str, &str)]) -> Criteria {
        let params: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Criteria::from_params(&ACCOUNT, &params, LIMITS).unwrap()
    }

    fn contains(column: &'static str, text: &str) -> Fragment {
        Fragment::compare(column, Comparison::Contains(text.to_string()))
    }

    #[test]
    fn empty_criteria_is_always() {
        let c = Criteria::new(&ACCOUNT, PageRequest::new(0, 10));
        assert_eq!(compose_criteria(&c), Fragment::Always);
    }

    #[test]
    fn fields_follow_declaration_order() {
        // params arrive out of order
        let f = compose_criteria(&criteria(&[
            ("role.equals", "ADMIN"),
            ("department_id.equals", "1"),
            ("username.contains", "a"),
        ]));
        assert_eq!(
            f,
            Fragment::And(vec![
                contains("username", "a"),
                Fragment::compare("role", Comparison::Eq(SqlValue::from("ADMIN"))),
                Fragment::compare("department_id", Comparison::Eq(SqlValue::Integer(1))),
            ])
        );
    }

    #[test]
    fn text_search_ors_searchable_fields() {
        let f = search_group(&ACCOUNT, "an");
        assert_eq!(
            f,
            Fragment::Or(vec![
                contains("username", "an"),
                contains("first_name", "an"),
                contains("last_name", "an"),
                contains("role", "an"),
            ])
        );
    }

    #[test]
    fn numeric_search_adds_id_match() {
        let f = search_group(&DEPARTMENT, "7");
        assert_eq!(
            f,
            Fragment::Or(vec![
                contains("name", "7"),
                contains("department_type", "7"),
                Fragment::compare("id", Comparison::Eq(SqlValue::Integer(7))),
            ])
        );
    }

    #[test]
    fn search_group_is_anded_last() {
        let f = compose_criteria(&criteria(&[("search", "jo"), ("is_deleted.equals", "false")]));
        let mut params = SqlParams::default();
        let sql = f.to_sql(&mut params);
        assert!(sql.starts_with("(is_deleted = ? AND (LOWER(username) LIKE ?"));
        assert_eq!(params.values[0], SqlValue::Bool(false));
        assert_eq!(params.values.len(), 5);
    }

    #[test]
    fn expression_equals_matches_criteria_equals() {
        let expr = Expression::new("username", "equals", "ann")
            .validate(&ACCOUNT)
            .unwrap();
        assert_eq!(
            compose_expression(&expr),
            compose_criteria(&criteria(&[("username.equals", "ann")]))
        );
    }

    #[test]
    fn contradictory_conditions_still_compose() {
        let f = compose_criteria(&criteria(&[("id.equals", "1"), ("id.notEquals", "1")]));
        assert_eq!(
            f,
            Fragment::And(vec![
                Fragment::compare("id", Comparison::Eq(SqlValue::Integer(1))),
                Fragment::compare("id", Comparison::Ne(SqlValue::Integer(1))),
            ])
        );
    }
}
