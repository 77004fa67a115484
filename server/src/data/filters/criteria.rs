//! Criteria parsing
//!
//! Builds a [`Criteria`] from raw query parameters:
//!
//! - `<field>.<operator>=<value>` populates one condition of the field's filter
//! - `search=<text>` (or `search.contains=<text>`) sets the free-text search
//! - `page`, `size` and `sort=<field>[,asc|desc]` set the window
//!
//! Every unknown key, field, operator or malformed value is rejected.

use std::collections::HashMap;

use super::entity::EntityMeta;
use super::error::FilterError;
use super::page::{PageRequest, SortDirection, SortOrder};
use super::types::{FieldFilter, Operator};

const PARAM_PAGE: &str = "page";
const PARAM_SIZE: &str = "size";
const PARAM_SORT: &str = "sort";
const PARAM_SEARCH: &str = "search";
const PARAM_SEARCH_CONTAINS: &str = "search.contains";

/// Page size bounds applied while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

/// Per-field filters, free-text search and window for one listing request
#[derive(Debug, Clone)]
pub struct Criteria {
    entity: &'static EntityMeta,
    filters: HashMap<&'static str, FieldFilter>,
    pub search: Option<String>,
    pub page: PageRequest,
}

impl Criteria {
    /// Criteria with no filters: matches every record
    pub fn new(entity: &'static EntityMeta, page: PageRequest) -> Self {
        Self {
            entity,
            filters: HashMap::new(),
            search: None,
            page,
        }
    }

    pub fn entity(&self) -> &'static EntityMeta {
        self.entity
    }

    /// Filter for a field, if any condition on it was populated
    ///
    /// A list condition such as `role.in=,` parses to no items and counts as
    /// unpopulated, so the field is not filtered.
    pub fn filter(&self, field: &str) -> Option<&FieldFilter> {
        self.filters.get(field).filter(|f| !f.is_empty())
    }

    /// Populate one condition from raw strings
    pub fn add(&mut self, field: &str, operator: &str, raw: &str) -> Result<(), FilterError> {
        let meta = self
            .entity
            .field(field)
            .ok_or_else(|| FilterError::UnknownField {
                entity: self.entity.name,
                field: field.to_string(),
            })?;
        let operator = Operator::parse(operator)?;

        self.filters
            .entry(meta.name)
            .or_insert_with(|| FieldFilter::for_kind(meta.kind))
            .apply(meta, operator, raw)
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Parse query parameters in arrival order
    pub fn from_params(
        entity: &'static EntityMeta,
        params: &[(String, String)],
        limits: PageLimits,
    ) -> Result<Self, FilterError> {
        let mut criteria = Self::new(entity, PageRequest::new(0, limits.default_size));

        for (key, value) in params {
            match key.as_str() {
                PARAM_PAGE => criteria.page.page = parse_page(value)?,
                PARAM_SIZE => criteria.page.size = parse_size(value, limits.max_size)?,
                PARAM_SORT => {
                    let SortOrder { field, direction } = parse_sort(entity, value)?;
                    criteria.page = criteria.page.sorted_by(field, direction);
                }
                PARAM_SEARCH | PARAM_SEARCH_CONTAINS => {
                    criteria = criteria.with_search(value.as_str());
                }
                _ => match key.split_once('.') {
                    Some((field, operator)) => criteria.add(field, operator, value)?,
                    None if entity.field(key).is_some() => {
                        return Err(FilterError::MissingOperator);
                    }
                    None => {
                        return Err(FilterError::UnknownField {
                            entity: entity.name,
                            field: key.clone(),
                        });
                    }
                },
            }
        }

        Ok(criteria)
    }
}

fn parse_page(raw: &str) -> Result<u32, FilterError> {
    raw.trim().parse().map_err(|_| FilterError::InvalidPage {
        param: PARAM_PAGE,
        message: format!("expected a non-negative integer, got '{}'", raw),
    })
}

fn parse_size(raw: &str, max: u32) -> Result<u32, FilterError> {
    match raw.trim().parse::<u32>() {
        Ok(size) if (1..=max).contains(&size) => Ok(size),
        _ => Err(FilterError::InvalidPage {
            param: PARAM_SIZE,
            message: format!("must be between 1 and {}, got '{}'", max, raw),
        }),
    }
}

fn parse_sort(entity: &'static EntityMeta, raw: &str) -> Result<SortOrder, FilterError> {
    let invalid = || FilterError::InvalidSort {
        entity: entity.name,
        field: raw.to_string(),
    };

    let (name, direction) = match raw.split_once(',') {
        Some((name, dir)) => (name.trim(), SortDirection::parse(dir).ok_or_else(invalid)?),
        None => (raw.trim(), SortDirection::Asc),
    };

    let field = entity
        .field(name)
        .filter(|f| f.sortable)
        .ok_or_else(invalid)?;

    Ok(SortOrder { field, direction })
}
