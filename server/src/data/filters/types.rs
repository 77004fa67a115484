//! Filter type definitions
//!
//! Typed predicate descriptors per scalar kind. Which conditions exist is
//! decided by the type: only [`IntegerFilter`] has ranges, only
//! [`StringFilter`] has `contains`. `any_of`/`none_of` are the `in`/`notIn`
//! operators.

use super::entity::{FieldMeta, ScalarKind};
use super::error::FilterError;

/// Operators accepted in criteria query params and expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    In,
    NotIn,
    GreaterThan,
    LessThan,
    Contains,
    IsNull,
}

impl Operator {
    pub const ALL: &'static [Operator] = &[
        Self::Equals,
        Self::NotEquals,
        Self::In,
        Self::NotIn,
        Self::GreaterThan,
        Self::LessThan,
        Self::Contains,
        Self::IsNull,
    ];

    pub fn parse(s: &str) -> Result<Self, FilterError> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| FilterError::UnknownOperator(s.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::Contains => "contains",
            Self::IsNull => "isNull",
        }
    }

    /// Whether the operator takes a comma-separated list
    pub fn takes_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    pub fn supported_by(&self, kind: ScalarKind) -> bool {
        match self {
            Self::Equals | Self::NotEquals | Self::IsNull => true,
            Self::In | Self::NotIn => kind != ScalarKind::Boolean,
            Self::GreaterThan | Self::LessThan => kind == ScalarKind::Integer,
            Self::Contains => kind == ScalarKind::String,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerFilter {
    pub equals: Option<i64>,
    pub not_equals: Option<i64>,
    pub any_of: Option<Vec<i64>>,
    pub none_of: Option<Vec<i64>>,
    pub greater_than: Option<i64>,
    pub less_than: Option<i64>,
    pub is_null: Option<bool>,
}

impl IntegerFilter {
    pub fn equal_to(value: i64) -> Self {
        Self {
            equals: Some(value),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringFilter {
    pub equals: Option<String>,
    pub not_equals: Option<String>,
    pub any_of: Option<Vec<String>>,
    pub none_of: Option<Vec<String>>,
    pub contains: Option<String>,
    pub is_null: Option<bool>,
}

impl StringFilter {
    pub fn containing(text: impl Into<String>) -> Self {
        Self {
            contains: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Filter over a closed set of string values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumFilter {
    pub equals: Option<String>,
    pub not_equals: Option<String>,
    pub any_of: Option<Vec<String>>,
    pub none_of: Option<Vec<String>>,
    pub is_null: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanFilter {
    pub equals: Option<bool>,
    pub not_equals: Option<bool>,
    pub is_null: Option<bool>,
}

/// A filter for any scalar kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFilter {
    Integer(IntegerFilter),
    String(StringFilter),
    Enum(EnumFilter),
    Boolean(BooleanFilter),
}

/// A raw value coerced to a field's scalar kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Bool(bool),
    Integers(Vec<i64>),
    Texts(Vec<String>),
}

impl FieldValue {
    /// True for a list operator's value that held only separators
    pub fn is_empty_list(&self) -> bool {
        match self {
            Self::Integers(items) => items.is_empty(),
            Self::Texts(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Coerce a raw string for `operator` on `field`
    ///
    /// List operators split on commas; `isNull` takes `true`/`false`.
    pub fn parse(
        field: &'static FieldMeta,
        operator: Operator,
        raw: &str,
    ) -> Result<Self, FilterError> {
        if !operator.supported_by(field.kind) {
            return Err(FilterError::UnsupportedOperator {
                field: field.name,
                kind: field.kind.as_str(),
                operator: operator.as_str(),
            });
        }

        if operator == Operator::IsNull {
            return parse_bool(field, raw).map(Self::Bool);
        }

        if operator.takes_list() {
            let items = raw.split(',').map(str::trim).filter(|s| !s.is_empty());
            return match field.kind {
                ScalarKind::Integer => items
                    .map(|item| parse_integer(field, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::Integers),
                _ => items
                    .map(|item| parse_text(field, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::Texts),
            };
        }

        match field.kind {
            ScalarKind::Integer => parse_integer(field, raw.trim()).map(Self::Integer),
            ScalarKind::Boolean => parse_bool(field, raw).map(Self::Bool),
            ScalarKind::String | ScalarKind::Enum(_) => parse_text(field, raw).map(Self::Text),
        }
    }
}

fn invalid(field: &'static FieldMeta, raw: &str) -> FilterError {
    FilterError::InvalidValue {
        field: field.name,
        kind: field.kind.as_str(),
        value: raw.to_string(),
    }
}

fn parse_integer(field: &'static FieldMeta, raw: &str) -> Result<i64, FilterError> {
    raw.parse::<i64>().map_err(|_| invalid(field, raw))
}

fn parse_bool(field: &'static FieldMeta, raw: &str) -> Result<bool, FilterError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(field, raw)),
    }
}

/// Strings pass through; enum values are matched case-insensitively and
/// normalized to their declared spelling
fn parse_text(field: &'static FieldMeta, raw: &str) -> Result<String, FilterError> {
    match field.kind {
        ScalarKind::Enum(_) => field
            .kind
            .canonical(raw)
            .map(str::to_string)
            .ok_or_else(|| invalid(field, raw)),
        _ => Ok(raw.to_string()),
    }
}

impl FieldFilter {
    /// An empty filter matching the field's kind
    pub fn for_kind(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Integer => Self::Integer(IntegerFilter::default()),
            ScalarKind::String => Self::String(StringFilter::default()),
            ScalarKind::Enum(_) => Self::Enum(EnumFilter::default()),
            ScalarKind::Boolean => Self::Boolean(BooleanFilter::default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        fn none<T>(list: &Option<Vec<T>>) -> bool {
            list.as_ref().is_none_or(|l| l.is_empty())
        }

        match self {
            Self::Integer(f) => {
                f.equals.is_none()
                    && f.not_equals.is_none()
                    && none(&f.any_of)
                    && none(&f.none_of)
                    && f.greater_than.is_none()
                    && f.less_than.is_none()
                    && f.is_null.is_none()
            }
            Self::String(f) => {
                f.equals.is_none()
                    && f.not_equals.is_none()
                    && none(&f.any_of)
                    && none(&f.none_of)
                    && f.contains.is_none()
                    && f.is_null.is_none()
            }
            Self::Enum(f) => {
                f.equals.is_none()
                    && f.not_equals.is_none()
                    && none(&f.any_of)
                    && none(&f.none_of)
                    && f.is_null.is_none()
            }
            Self::Boolean(f) => f.equals.is_none() && f.not_equals.is_none() && f.is_null.is_none(),
        }
    }

    /// Populate one condition, replacing any earlier value for it
    ///
    /// Fails when the operator/value pair does not exist on this filter type.
    pub fn set(
        &mut self,
        field: &'static FieldMeta,
        operator: Operator,
        value: FieldValue,
    ) -> Result<(), FilterError> {
        use FieldValue as V;
        use Operator as Op;

        match (self, operator, value) {
            (Self::Integer(f), Op::Equals, V::Integer(v)) => f.equals = Some(v),
            (Self::Integer(f), Op::NotEquals, V::Integer(v)) => f.not_equals = Some(v),
            (Self::Integer(f), Op::In, V::Integers(v)) => f.any_of = Some(v),
            (Self::Integer(f), Op::NotIn, V::Integers(v)) => f.none_of = Some(v),
            (Self::Integer(f), Op::GreaterThan, V::Integer(v)) => f.greater_than = Some(v),
            (Self::Integer(f), Op::LessThan, V::Integer(v)) => f.less_than = Some(v),
            (Self::Integer(f), Op::IsNull, V::Bool(b)) => f.is_null = Some(b),

            (Self::String(f), Op::Equals, V::Text(v)) => f.equals = Some(v),
            (Self::String(f), Op::NotEquals, V::Text(v)) => f.not_equals = Some(v),
            (Self::String(f), Op::In, V::Texts(v)) => f.any_of = Some(v),
            (Self::String(f), Op::NotIn, V::Texts(v)) => f.none_of = Some(v),
            (Self::String(f), Op::Contains, V::Text(v)) => f.contains = Some(v),
            (Self::String(f), Op::IsNull, V::Bool(b)) => f.is_null = Some(b),

            (Self::Enum(f), Op::Equals, V::Text(v)) => f.equals = Some(v),
            (Self::Enum(f), Op::NotEquals, V::Text(v)) => f.not_equals = Some(v),
            (Self::Enum(f), Op::In, V::Texts(v)) => f.any_of = Some(v),
            (Self::Enum(f), Op::NotIn, V::Texts(v)) => f.none_of = Some(v),
            (Self::Enum(f), Op::IsNull, V::Bool(b)) => f.is_null = Some(b),

            (Self::Boolean(f), Op::Equals, V::Bool(b)) => f.equals = Some(b),
            (Self::Boolean(f), Op::NotEquals, V::Bool(b)) => f.not_equals = Some(b),
            (Self::Boolean(f), Op::IsNull, V::Bool(b)) => f.is_null = Some(b),

            _ => {
                return Err(FilterError::UnsupportedOperator {
                    field: field.name,
                    kind: field.kind.as_str(),
                    operator: operator.as_str(),
                });
            }
        }
        Ok(())
    }

    /// Parse `raw` for `operator` and populate the matching condition
    pub fn apply(
        &mut self,
        field: &'static FieldMeta,
        operator: Operator,
        raw: &str,
    ) -> Result<(), FilterError> {
        let value = FieldValue::parse(field, operator, raw)?;
        self.set(field, operator, value)
    }
}
