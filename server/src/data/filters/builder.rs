//! Predicate builder
//!
//! Turns one (field, filter) pair into a [`Fragment`]. Populated conditions
//! are ANDed in a fixed order: equals, notEquals, in, notIn, greaterThan,
//! lessThan, contains, isNull. An empty filter builds `Fragment::Always`.

use super::entity::FieldMeta;
use super::fragment::{Comparison, Fragment, SqlValue};
use super::types::{BooleanFilter, EnumFilter, FieldFilter, IntegerFilter, StringFilter};

/// Build the predicate for a single field
pub fn build(field: &FieldMeta, filter: &FieldFilter) -> Fragment {
    let conditions = Conditions::new(field.column);
    match filter {
        FieldFilter::Integer(f) => build_integer(conditions, f),
        FieldFilter::String(f) => build_string(conditions, f),
        FieldFilter::Enum(f) => build_enum(conditions, f),
        FieldFilter::Boolean(f) => build_boolean(conditions, f),
    }
}

fn build_integer(c: Conditions, f: &IntegerFilter) -> Fragment {
    c.push(scalar(&f.equals, Comparison::Eq))
        .push(scalar(&f.not_equals, Comparison::Ne))
        .push(list(&f.any_of, Comparison::In))
        .push(list(&f.none_of, Comparison::NotIn))
        .push(scalar(&f.greater_than, Comparison::Gt))
        .push(scalar(&f.less_than, Comparison::Lt))
        .push(null_check(f.is_null))
        .finish()
}

fn build_string(c: Conditions, f: &StringFilter) -> Fragment {
    c.push(scalar(&f.equals, Comparison::Eq))
        .push(scalar(&f.not_equals, Comparison::Ne))
        .push(list(&f.any_of, Comparison::In))
        .push(list(&f.none_of, Comparison::NotIn))
        .push(f.contains.clone().map(Comparison::Contains))
        .push(null_check(f.is_null))
        .finish()
}

fn build_enum(c: Conditions, f: &EnumFilter) -> Fragment {
    c.push(scalar(&f.equals, Comparison::Eq))
        .push(scalar(&f.not_equals, Comparison::Ne))
        .push(list(&f.any_of, Comparison::In))
        .push(list(&f.none_of, Comparison::NotIn))
        .push(null_check(f.is_null))
        .finish()
}

fn build_boolean(c: Conditions, f: &BooleanFilter) -> Fragment {
    c.push(scalar(&f.equals, Comparison::Eq))
        .push(scalar(&f.not_equals, Comparison::Ne))
        .push(null_check(f.is_null))
        .finish()
}

/// Accumulates comparisons against one column
struct Conditions {
    column: &'static str,
    parts: Vec<Fragment>,
}

impl Conditions {
    fn new(column: &'static str) -> Self {
        Self {
            column,
            parts: Vec::new(),
        }
    }

    fn push(mut self, comparison: Option<Comparison>) -> Self {
        if let Some(comparison) = comparison {
            self.parts.push(Fragment::compare(self.column, comparison));
        }
        self
    }

    fn finish(self) -> Fragment {
        Fragment::all(self.parts)
    }
}

fn scalar<T>(value: &Option<T>, op: fn(SqlValue) -> Comparison) -> Option<Comparison>
where
    T: Clone + Into<SqlValue>,
{
    value.clone().map(|v| op(v.into()))
}

// Empty lists are unpopulated, not "matches nothing"
fn list<T>(values: &Option<Vec<T>>, op: fn(Vec<SqlValue>) -> Comparison) -> Option<Comparison>
where
    T: Clone + Into<SqlValue>,
{
    values
        .as_ref()
        .filter(|v| !v.is_empty())
        .map(|v| op(v.iter().cloned().map(Into::into).collect()))
}

fn null_check(is_null: Option<bool>) -> Option<Comparison> {
    is_null.map(|null| {
        if null {
            Comparison::IsNull
        } else {
            Comparison::IsNotNull
        }
    })
}
